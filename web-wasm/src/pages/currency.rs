//! 為替レート表

use super::{error_banner, reload, table_handles};
use crate::api::WebApi;
use crate::components::{pagination::Pagination, sort_header::SortHeader};
use admin_dashboard_common::{
    Capability, Currency, Error, FieldValue, RecordStore, Session, SessionGate, TabularViewModel,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

#[component]
pub fn CurrencyPage(session: Session) -> impl IntoView {
    let api = WebApi::new(&session);
    let can_refresh = session.is_authorized(Capability::RefreshCurrency);

    let vm = RwSignal::new(TabularViewModel::<Currency>::new());
    let error = RwSignal::new(None::<String>);
    let refreshing = RwSignal::new(false);
    let table = table_handles(vm, error);

    reload(vm, api.clone(), error);

    let on_refresh = move |_: leptos::ev::MouseEvent| {
        let api = api.clone();
        refreshing.set(true);
        spawn_local(async move {
            match RecordStore::<Currency>::refresh(&api).await {
                Ok(()) => reload(vm, api, error),
                Err(e) => {
                    let e = Error::FetchFailed(e);
                    gloo::console::error!(e.to_string());
                    error.set(Some(e.to_string()));
                }
            }
            refreshing.set(false);
        });
    };

    view! {
        <section class="card">
            <div class="card-header">
                <h2>"Currency Table"</h2>
                <Show when=move || can_refresh>
                    <button
                        class="btn btn-primary btn-small"
                        disabled=move || refreshing.get()
                        on:click=on_refresh.clone()
                    >
                        {move || if refreshing.get() { "Refreshing..." } else { "Refresh Rates" }}
                    </button>
                </Show>
            </div>

            {error_banner(error)}

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
                        <SortHeader field="name" title="Currency" sort=table.sort on_sort=table.on_sort />
                        <SortHeader field="value" title="Value" sort=table.sort on_sort=table.on_sort />
                    </tr>
                </thead>
                <tbody>
                    <Show when=move || vm.with(|m| m.is_loading())>
                        <tr><td colspan="2" class="text-muted">"Loading..."</td></tr>
                    </Show>
                    <Show when=move || vm.with(|m| !m.is_loading() && m.filtered_count() == 0)>
                        <tr><td colspan="2" class="text-muted">"No data available"</td></tr>
                    </Show>
                    <For
                        each=move || vm.with(|m| m.page_rows())
                        key=|c| (c.name.clone(), FieldValue::from(&c.value).to_string())
                        children=move |c| {
                            view! {
                                <tr>
                                    <td>{c.name.clone()}</td>
                                    <td>{FieldValue::from(&c.value).to_string()}</td>
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
