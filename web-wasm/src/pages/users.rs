//! ユーザー一覧（作成・編集・削除）

use super::{error_banner, reload, table_handles};
use crate::api::WebApi;
use crate::components::{pagination::Pagination, sort_header::SortHeader};
use admin_dashboard_common::{
    Capability, Error, NewUser, RecordStore, Session, SessionGate, TabularViewModel, User,
    UserUpdate,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormMode {
    Hidden,
    Create,
    Edit(u64),
}

#[component]
pub fn UsersPage(session: Session) -> impl IntoView {
    let api = WebApi::new(&session);
    let can_manage = session.is_authorized(Capability::ManageUsers);

    let vm = RwSignal::new(TabularViewModel::<User>::new());
    let error = RwSignal::new(None::<String>);
    let table = table_handles(vm, error);

    let mode = RwSignal::new(FormMode::Hidden);
    let name = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password_confirmation = RwSignal::new(String::new());
    let form_error = RwSignal::new(None::<String>);
    let saving = RwSignal::new(false);

    reload(vm, api.clone(), error);

    let reset_form = move |next: FormMode| {
        name.set(String::new());
        email.set(String::new());
        password.set(String::new());
        password_confirmation.set(String::new());
        form_error.set(None);
        mode.set(next);
    };

    let on_edit = {
        let api = api.clone();
        Callback::new(move |id: u64| {
            reset_form(FormMode::Edit(id));
            if let Some(user) = vm.with_untracked(|m| m.find(&id).cloned()) {
                name.set(user.name);
                email.set(user.email);
            }
            // 最新の値で上書きする
            let api = api.clone();
            spawn_local(async move {
                match api.get_user(id).await {
                    Ok(user) if mode.get_untracked() == FormMode::Edit(id) => {
                        name.set(user.name);
                        email.set(user.email);
                    }
                    Ok(_) => {}
                    Err(e) => form_error.set(Some(Error::FetchFailed(e).to_string())),
                }
            });
        })
    };

    let on_delete = {
        let api = api.clone();
        Callback::new(move |user: User| {
            let message = format!("Delete {} <{}>?", user.name, user.email);
            if !gloo::dialogs::confirm(&message) {
                return;
            }
            let api = api.clone();
            spawn_local(async move {
                match RecordStore::<User>::delete(&api, &user.id).await {
                    Ok(()) => reload(vm, api, error),
                    Err(e) => {
                        let e = Error::MutationFailed(e);
                        gloo::console::error!(e.to_string());
                        error.set(Some(e.to_string()));
                    }
                }
            });
        })
    };

    let on_submit = {
        let api = api.clone();
        move |ev: leptos::ev::SubmitEvent| {
            ev.prevent_default();
            let current = mode.get_untracked();
            if current == FormMode::Hidden {
                return;
            }
            let api = api.clone();
            saving.set(true);
            spawn_local(async move {
                let result = match current {
                    FormMode::Create => {
                        let draft = NewUser {
                            email: email.get_untracked(),
                            name: name.get_untracked(),
                            password: password.get_untracked(),
                            password_confirmation: password_confirmation.get_untracked(),
                        };
                        RecordStore::<User>::create(&api, &draft).await
                    }
                    FormMode::Edit(id) => {
                        let patch = UserUpdate {
                            email: email.get_untracked(),
                            name: name.get_untracked(),
                        };
                        RecordStore::<User>::update(&api, &id, &patch).await
                    }
                    FormMode::Hidden => Ok(()),
                };
                saving.set(false);
                match result {
                    Ok(()) => {
                        reset_form(FormMode::Hidden);
                        reload(vm, api, error);
                    }
                    Err(e) => {
                        let e = Error::MutationFailed(e);
                        gloo::console::error!(e.to_string());
                        form_error.set(Some(e.to_string()));
                    }
                }
            });
        }
    };

    let columns: usize = if can_manage { 4 } else { 3 };

    view! {
        <section class="card">
            <div class="card-header">
                <h2>"List"</h2>
                <Show when=move || can_manage>
                    <button
                        class="btn btn-primary btn-small"
                        on:click=move |_| reset_form(FormMode::Create)
                    >
                        "Add User"
                    </button>
                </Show>
            </div>

            {error_banner(error)}

            <Show when=move || mode.get() != FormMode::Hidden>
                <form class="user-form" on:submit=on_submit.clone()>
                    <h3>
                        {move || match mode.get() {
                            FormMode::Edit(_) => "Edit User",
                            _ => "Create User",
                        }}
                    </h3>
                    {error_banner(form_error)}
                    <div class="form-group">
                        <label for="user-name">"Name"</label>
                        <input
                            type="text"
                            id="user-name"
                            required=true
                            prop:value=move || name.get()
                            on:input=move |ev| name.set(event_target_value(&ev))
                        />
                    </div>
                    <div class="form-group">
                        <label for="user-email">"Email"</label>
                        <input
                            type="email"
                            id="user-email"
                            required=true
                            prop:value=move || email.get()
                            on:input=move |ev| email.set(event_target_value(&ev))
                        />
                    </div>
                    <Show when=move || mode.get() == FormMode::Create>
                        <div class="form-group">
                            <label for="user-password">"Password"</label>
                            <input
                                type="password"
                                id="user-password"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="form-group">
                            <label for="user-password-confirmation">"Confirm Password"</label>
                            <input
                                type="password"
                                id="user-password-confirmation"
                                prop:value=move || password_confirmation.get()
                                on:input=move |ev| password_confirmation.set(event_target_value(&ev))
                            />
                        </div>
                    </Show>
                    <div class="form-actions">
                        <button type="submit" class="btn btn-primary" disabled=move || saving.get()>
                            {move || if saving.get() { "Saving..." } else { "Save" }}
                        </button>
                        <button
                            type="button"
                            class="btn btn-secondary"
                            on:click=move |_| reset_form(FormMode::Hidden)
                        >
                            "Cancel"
                        </button>
                    </div>
                </form>
            </Show>

            <input
                type="search"
                class="search"
                placeholder="Search..."
                prop:value=move || vm.with(|m| m.state().search_term.clone())
                on:input=move |ev| vm.update(|m| m.set_search_term(event_target_value(&ev)))
            />

            <table class="table">
                <thead>
                    <tr>
                        <SortHeader field="id" title="ID" sort=table.sort on_sort=table.on_sort />
                        <SortHeader field="name" title="Name" sort=table.sort on_sort=table.on_sort />
                        <SortHeader field="email" title="Email" sort=table.sort on_sort=table.on_sort />
                        <Show when=move || can_manage>
                            <th>"Actions"</th>
                        </Show>
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || vm.with(|m| m.is_loading())>
                        <tr><td colspan=columns.to_string() class="text-muted">"Loading..."</td></tr>
                    </Show>
                    <Show when=move || vm.with(|m| !m.is_loading() && m.filtered_count() == 0)>
                        <tr><td colspan=columns.to_string() class="text-muted">"No data available"</td></tr>
                    </Show>
                    <For
                        each=move || vm.with(|m| m.page_rows())
                        key=|u| (u.id, u.name.clone(), u.email.clone())
                        children=move |user| {
                            let id = user.id;
                            view! {
                                <tr>
                                    <td>{user.id.to_string()}</td>
                                    <td>{user.name.clone()}</td>
                                    <td>{user.email.clone()}</td>
                                    <Show when=move || can_manage>
                                        <td class="actions">
                                            <button
                                                class="btn btn-secondary btn-small"
                                                on:click=move |_| on_edit.run(id)
                                            >
                                                "Edit"
                                            </button>
                                            <button
                                                class="btn btn-tertiary btn-small"
                                                on:click={
                                                    let user = user.clone();
                                                    move |_| on_delete.run(user.clone())
                                                }
                                            >
                                                "Delete"
                                            </button>
                                        </td>
                                    </Show>
                                </tr>
                            }
                        }
                    />
                </tbody>
            </table>

            <Pagination info=table.info on_page=table.on_page on_page_size=table.on_page_size />
        </section>
    }
}
