//! ナビゲーションヘッダー

use crate::session::{clear_session, navigate};
use admin_dashboard_common::routes::{self, LOGIN_PATH};
use leptos::prelude::*;

const NAV: &[&str] = &["/", "/users/list", "/users/profile"];

#[component]
pub fn Header(current: String) -> impl IntoView {
    let on_logout = move |_: leptos::ev::MouseEvent| {
        clear_session();
        navigate(LOGIN_PATH);
    };

    view! {
        <header class="header">
            <h1>"Admin Dashboard"</h1>
            <nav class="nav">
                {NAV
                    .iter()
                    .map(|&path| {
                        let entry = routes::lookup(path);
                        let active = entry.path == routes::lookup(&current).path;
                        view! {
                            <a href=path class:active=active>{entry.title}</a>
                        }
                    })
                    .collect_view()}
            </nav>
            <button class="btn btn-tertiary btn-small" on:click=on_logout>"Logout"</button>
        </header>
    }
}
