//! 画面
//!
//! 一覧画面はビューモデルを `RwSignal` に入れ、操作ごとに更新する。

pub mod currency;
pub mod login;
pub mod not_found;
pub mod profile;
pub mod users;

use admin_dashboard_common::{
    LoadOutcome, PageInfo, Record, RecordStore, SortDirection, TabularViewModel,
};
use leptos::prelude::*;
use leptos::task::spawn_local;

/// 全件読み込みを発行する
///
/// 完了時に最新の要求でなければ結果は捨てられる。
pub fn reload<R, S>(
    vm: RwSignal<TabularViewModel<R>>,
    store: S,
    error: RwSignal<Option<String>>,
) where
    R: Record + Send + Sync + 'static,
    S: RecordStore<R> + 'static,
{
    let Some(ticket) = vm.try_update(|m| m.begin_load()) else {
        return;
    };

    spawn_local(async move {
        let response = store.fetch_all().await;
        match vm.try_update(|m| m.finish_load(ticket, response)) {
            Some(Ok(LoadOutcome::Applied { .. })) => error.set(None),
            Some(Ok(LoadOutcome::Superseded)) | None => {}
            Some(Err(e)) => {
                gloo::console::error!(e.to_string());
                error.set(Some(e.to_string()));
            }
        }
    });
}

/// 列見出し・ページネーションに渡す派生シグナルとハンドラ
pub struct TableHandles {
    pub sort: Signal<(String, SortDirection)>,
    pub info: Signal<PageInfo>,
    pub on_sort: Callback<&'static str>,
    pub on_page: Callback<usize>,
    pub on_page_size: Callback<usize>,
}

pub fn table_handles<R>(
    vm: RwSignal<TabularViewModel<R>>,
    error: RwSignal<Option<String>>,
) -> TableHandles
where
    R: Record + Send + Sync + 'static,
{
    let report = move |result: Option<admin_dashboard_common::Result<()>>| {
        if let Some(Err(e)) = result {
            error.set(Some(e.to_string()));
        }
    };

    TableHandles {
        sort: Signal::derive(move || {
            vm.with(|m| (m.state().sort_key.clone(), m.state().sort_direction))
        }),
        info: Signal::derive(move || vm.with(|m| m.page_info())),
        on_sort: Callback::new(move |field: &'static str| {
            report(vm.try_update(|m| m.toggle_sort(field)))
        }),
        on_page: Callback::new(move |page: usize| report(vm.try_update(|m| m.set_page_index(page)))),
        on_page_size: Callback::new(move |size: usize| {
            report(vm.try_update(|m| m.set_page_size(size)))
        }),
    }
}

/// エラー表示
pub fn error_banner(error: RwSignal<Option<String>>) -> impl IntoView {
    move || {
        error
            .get()
            .map(|message| view! { <div class="alert alert-error">{message}</div> })
    }
}
