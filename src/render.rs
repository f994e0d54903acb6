//! ターミナル向けのテーブル描画

use admin_dashboard_common::{Record, TabularViewModel};

/// 列定義: (フィールド名, 見出し)
pub type Columns = &'static [(&'static str, &'static str)];

pub const USER_COLUMNS: Columns = &[("id", "ID"), ("name", "Name"), ("email", "Email")];
pub const CURRENCY_COLUMNS: Columns = &[("name", "Currency"), ("value", "Value")];

/// 現在ページをテーブル文字列にする（末尾にページ情報）
pub fn render_table<R: Record>(vm: &TabularViewModel<R>, columns: Columns) -> String {
    let projection = vm.projection();
    let state = vm.state();

    let headers: Vec<String> = columns
        .iter()
        .map(|(field, title)| {
            if *field == state.sort_key {
                format!("{} {}", title, state.sort_direction.arrow())
            } else {
                title.to_string()
            }
        })
        .collect();

    let rows: Vec<Vec<String>> = projection
        .rows
        .iter()
        .map(|record| {
            columns
                .iter()
                .map(|(field, _)| record.field(field).map(|v| v.to_string()).unwrap_or_default())
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            rows.iter()
                .map(|row| display_width(&row[i]))
                .chain(std::iter::once(display_width(&headers[i])))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    out.push_str(&format_row(&headers, &widths));
    out.push('\n');
    out.push_str(
        &widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-"),
    );
    out.push('\n');

    if rows.is_empty() {
        out.push_str("(no records)\n");
    }
    for row in &rows {
        out.push_str(&format_row(row, &widths));
        out.push('\n');
    }

    let page = projection.page;
    out.push_str(&format!(
        "{}  [page {}/{}, {} per page]",
        page.summary(),
        page.page_index,
        page.page_count().max(1),
        page.page_size
    ));
    if !state.search_term.is_empty() {
        out.push_str(&format!("  search: \"{}\"", state.search_term));
    }
    out.push('\n');
    out
}

fn format_row(cells: &[String], widths: &[usize]) -> String {
    cells
        .iter()
        .zip(widths)
        .map(|(cell, w)| {
            let pad = w.saturating_sub(display_width(cell));
            format!("{}{}", cell, " ".repeat(pad))
        })
        .collect::<Vec<_>>()
        .join(" | ")
        .trim_end()
        .to_string()
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}
