//! ページネーション（件数選択・前後移動・表示範囲）

use admin_dashboard_common::{PageInfo, PAGE_SIZES};
use leptos::prelude::*;

#[component]
pub fn Pagination(
    info: Signal<PageInfo>,
    on_page: Callback<usize>,
    on_page_size: Callback<usize>,
) -> impl IntoView {
    view! {
        <div class="pagination">
            <label class="page-size">
                "Show "
                <select on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_page_size.run(size);
                    }
                }>
                    {PAGE_SIZES
                        .iter()
                        .map(|&size| {
                            view! {
                                <option
                                    value=size.to_string()
                                    selected=move || info.get().page_size == size
                                >
                                    {size.to_string()}
                                </option>
                            }
                        })
                        .collect_view()}
                </select>
                " entries"
            </label>

            <span class="summary">{move || info.get().summary()}</span>

            <div class="page-buttons">
                <button
                    class="btn btn-secondary btn-small"
                    disabled=move || !info.get().has_prev()
                    on:click=move |_| on_page.run(info.get().page_index.saturating_sub(1).max(1))
                >
                    "Previous"
                </button>
                <span class="page-number">
                    {move || {
                        let info = info.get();
                        format!("{} / {}", info.page_index, info.page_count().max(1))
                    }}
                </span>
                <button
                    class="btn btn-secondary btn-small"
                    disabled=move || !info.get().has_next()
                    on:click=move |_| on_page.run(info.get().page_index + 1)
                >
                    "Next"
                </button>
            </div>
        </div>
    }
}
