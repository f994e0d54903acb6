//! 対話式テーブル閲覧
//!
//! 1行コマンドで検索・ソート・ページ移動を行い、その都度テーブルを再描画する。

use crate::error::Result;
use crate::render::{render_table, Columns};
use admin_dashboard_common::{Error, LoadOutcome, Record, RecordStore, TabularViewModel};
use dialoguer::Input;

/// 対話アクション
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BrowseAction {
    /// 検索語を設定（空で解除）
    Search(String),
    /// 列見出しのクリック相当
    Sort(String),
    PageSize(usize),
    Page(usize),
    Next,
    Prev,
    /// 再読み込み
    Reload,
    /// バックエンドで再取得してから再読み込み
    Refresh,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "操作: search 語 (/語)  sort 列 (s)  next (n/Enter)  prev (p)  page 番号 (g)  size 件数 (z)  reload (r)  refresh (R)  help (h)  quit (q)";

pub fn parse_action(input: &str) -> BrowseAction {
    let trimmed = input.trim();

    if let Some(term) = trimmed.strip_prefix('/') {
        return BrowseAction::Search(term.trim().to_string());
    }

    let (head, arg) = match trimmed.split_once(char::is_whitespace) {
        Some((h, a)) => (h, a.trim()),
        None => (trimmed, ""),
    };
    let unknown = || BrowseAction::Unknown(trimmed.to_string());

    match (head, arg) {
        ("search", term) => BrowseAction::Search(term.to_string()),
        ("sort" | "s", key) if !key.is_empty() => BrowseAction::Sort(key.to_string()),
        ("page" | "g", n) => n.parse().map(BrowseAction::Page).unwrap_or_else(|_| unknown()),
        ("size" | "z", n) => n.parse().map(BrowseAction::PageSize).unwrap_or_else(|_| unknown()),
        ("" | "next" | "n", "") => BrowseAction::Next,
        ("prev" | "p", "") => BrowseAction::Prev,
        ("reload" | "r", "") => BrowseAction::Reload,
        ("refresh" | "R", "") => BrowseAction::Refresh,
        ("help" | "h" | "?", "") => BrowseAction::Help,
        ("quit" | "q" | "Q", "") => BrowseAction::Quit,
        _ => unknown(),
    }
}

/// 表示状態だけを変えるアクションを適用する
///
/// 読み込みを伴うもの・終了は `false` を返し、呼び出し側で処理する。
pub fn apply_view_action<R: Record>(
    vm: &mut TabularViewModel<R>,
    action: &BrowseAction,
) -> std::result::Result<bool, Error> {
    match action {
        BrowseAction::Search(term) => vm.set_search_term(term.as_str()),
        BrowseAction::Sort(key) => vm.toggle_sort(key)?,
        BrowseAction::PageSize(size) => vm.set_page_size(*size)?,
        BrowseAction::Page(page) => vm.set_page_index(*page)?,
        BrowseAction::Next => {
            if vm.page_info().has_next() {
                let next = vm.state().page_index + 1;
                vm.set_page_index(next)?;
            }
        }
        BrowseAction::Prev => {
            if vm.page_info().has_prev() {
                let prev = vm.state().page_index - 1;
                vm.set_page_index(prev)?;
            }
        }
        _ => return Ok(false),
    }
    Ok(true)
}

/// 対話ループ
///
/// `can_refresh` が偽の場合 `R` は無視する。
pub async fn run_browse<R, S>(
    vm: &mut TabularViewModel<R>,
    store: &S,
    columns: Columns,
    can_refresh: bool,
) -> Result<()>
where
    R: Record,
    S: RecordStore<R>,
{
    println!("{}", HELP);
    println!("---\n");
    print!("{}", render_table(vm, columns));

    loop {
        let input: String = Input::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()?;

        let action = parse_action(&input);
        let outcome = match &action {
            BrowseAction::Quit => break,
            BrowseAction::Help => {
                println!("{}", HELP);
                continue;
            }
            BrowseAction::Unknown(raw) => {
                println!("  不明な操作: {} (h でヘルプ)", raw);
                continue;
            }
            BrowseAction::Reload => vm.load(store).await.map(Some),
            BrowseAction::Refresh if can_refresh => vm.refresh(store).await.map(Some),
            BrowseAction::Refresh => {
                println!("  再取得の権限がありません");
                continue;
            }
            _ => apply_view_action(vm, &action).map(|_| None),
        };

        match outcome {
            Ok(Some(LoadOutcome::Applied { count })) => println!("✔ {}件を読み込みました", count),
            Ok(_) => {}
            Err(e) => {
                // 失敗しても直前の表示は残る
                println!("  ⚠ {}", e);
                continue;
            }
        }
        print!("{}", render_table(vm, columns));
    }

    Ok(())
}
