//! メインアプリケーションコンポーネント
//!
//! パスをルート表で解決し、未ログイン・ログイン済みに応じて遷移させる。

use crate::components::header::Header;
use crate::pages::{
    currency::CurrencyPage,
    login::{LoginPage, RegisterPage},
    not_found::NotFoundPage,
    profile::ProfilePage,
    users::UsersPage,
};
use crate::session::{current_path, current_session, navigate};
use admin_dashboard_common::routes::{self, Layout, Page, Resolution};
use admin_dashboard_common::Session;
use leptos::prelude::*;

fn page_view(page: Page, session: Session) -> AnyView {
    match page {
        Page::Currency => view! { <CurrencyPage session=session /> }.into_any(),
        Page::UserList => view! { <UsersPage session=session /> }.into_any(),
        Page::Profile => view! { <ProfilePage session=session /> }.into_any(),
        Page::Login => view! { <LoginPage /> }.into_any(),
        Page::Register => view! { <RegisterPage /> }.into_any(),
        Page::NotFound => view! { <NotFoundPage /> }.into_any(),
    }
}

fn set_title(title: &str) {
    if let Some(doc) = web_sys::window().and_then(|w| w.document()) {
        doc.set_title(&format!("{} | Admin Dashboard", title));
    }
}

#[component]
pub fn App() -> impl IntoView {
    let path = current_path();
    let session = current_session();

    match routes::resolve(&path, &session) {
        Resolution::Redirect(target) => {
            navigate(target);
            view! { <div class="redirecting"></div> }.into_any()
        }
        Resolution::Render { page, layout } => {
            set_title(routes::lookup(&path).title);
            let content = page_view(page, session);
            match layout {
                Layout::Default => view! {
                    <div class="container">
                        <Header current=path />
                        <main>{content}</main>
                    </div>
                }
                .into_any(),
                Layout::Blank => view! { <div class="container blank">{content}</div> }.into_any(),
            }
        }
    }
}
