//! ログイン・登録画面
//!
//! 発行済みのAPIトークンを Cookie に保存する。

use crate::session::{navigate, store_session};
use admin_dashboard_common::routes::{HOME_PATH, LOGIN_PATH};
use leptos::prelude::*;

#[component]
pub fn LoginPage() -> impl IntoView {
    let token = RwSignal::new(String::new());
    let role = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let value = token.get_untracked();
        let value = value.trim();
        if value.is_empty() {
            error.set(Some("Token is required".to_string()));
            return;
        }
        let role = role.get_untracked();
        store_session(value, Some(role.trim()));
        navigate(HOME_PATH);
    };

    view! {
        <section class="auth-card">
            <h1>"Login"</h1>
            {super::error_banner(error)}
            <form on:submit=on_submit>
                <div class="form-group">
                    <label for="login-token">"API Token"</label>
                    <input
                        type="password"
                        id="login-token"
                        prop:value=move || token.get()
                        on:input=move |ev| token.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="login-role">"Role"</label>
                    <select id="login-role" on:change=move |ev| role.set(event_target_value(&ev))>
                        <option value="" selected=true>"user"</option>
                        <option value="admin">"admin"</option>
                    </select>
                </div>
                <button type="submit" class="btn btn-primary">"Sign In"</button>
            </form>
            <p class="text-muted">
                "No account yet? "
                <a href="/auth/register">"Register"</a>
            </p>
        </section>
    }
}

#[component]
pub fn RegisterPage() -> impl IntoView {
    view! {
        <section class="auth-card">
            <h1>"Register"</h1>
            <p>"Accounts are created by an administrator from the user list."</p>
            <a class="btn btn-primary" href=LOGIN_PATH>"Back to Login"</a>
        </section>
    }
}
