//! アカウント設定

use super::error_banner;
use crate::api::WebApi;
use admin_dashboard_common::{ProfileUpdate, Session};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn ProfilePage(session: Session) -> impl IntoView {
    let api = WebApi::new(&session);

    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password_confirmation = RwSignal::new(String::new());
    let error = RwSignal::new(None::<String>);
    let notice = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    {
        let api = api.clone();
        spawn_local(async move {
            match api.profile().await {
                Ok(profile) => {
                    name.set(profile.name);
                    email.set(profile.email);
                }
                Err(e) => {
                    gloo::console::error!(e.to_string());
                    error.set(Some(e.to_string()));
                }
            }
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        let optional = |s: String| if s.is_empty() { None } else { Some(s) };
        let update = ProfileUpdate {
            email: email.get_untracked(),
            name: name.get_untracked(),
            password: optional(password.get_untracked()),
            password_confirmation: optional(password_confirmation.get_untracked()),
        };

        let api = api.clone();
        saving.set(true);
        notice.set(None);
        spawn_local(async move {
            match api.update_profile(&update).await {
                Ok(()) => {
                    error.set(None);
                    password.set(String::new());
                    password_confirmation.set(String::new());
                    notice.set(Some("Profile updated".to_string()));
                }
                Err(e) => {
                    gloo::console::error!(e.to_string());
                    error.set(Some(e.to_string()));
                }
            }
            saving.set(false);
        });
    };

    view! {
        <section class="card">
            <h2>"Account Setting"</h2>
            {error_banner(error)}
            {move || notice.get().map(|message| view! { <div class="alert alert-success">{message}</div> })}

            <form class="profile-form" on:submit=on_submit>
                <div class="form-group">
                    <label for="profile-name">"Name"</label>
                    <input
                        type="text"
                        id="profile-name"
                        prop:value=move || name.get()
                        on:input=move |ev| name.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="profile-email">"Email"</label>
                    <input
                        type="email"
                        id="profile-email"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="profile-password">"New Password"</label>
                    <input
                        type="password"
                        id="profile-password"
                        placeholder="Leave blank to keep current password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                </div>
                <div class="form-group">
                    <label for="profile-password-confirmation">"Confirm Password"</label>
                    <input
                        type="password"
                        id="profile-password-confirmation"
                        prop:value=move || password_confirmation.get()
                        on:input=move |ev| password_confirmation.set(event_target_value(&ev))
                    />
                </div>
                <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                    {move || if saving.get() { "Saving..." } else { "Save Changes" }}
                </button>
            </form>
        </section>
    }
}
