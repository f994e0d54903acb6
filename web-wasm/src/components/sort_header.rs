//! クリックでソートする列見出し

use admin_dashboard_common::SortDirection;
use leptos::prelude::*;

#[component]
pub fn SortHeader(
    field: &'static str,
    title: &'static str,
    sort: Signal<(String, SortDirection)>,
    on_sort: Callback<&'static str>,
) -> impl IntoView {
    let arrow = move || {
        let (key, direction) = sort.get();
        if key == field {
            direction.arrow()
        } else {
            ""
        }
    };

    view! {
        <th class="sortable" on:click=move |_| on_sort.run(field)>
            {title}
            " "
            <span class="sort-arrow">{arrow}</span>
        </th>
    }
}
