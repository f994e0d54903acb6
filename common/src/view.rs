//! 表示状態（検索・ソート・ページ）とページ情報

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// 選択可能なページサイズ
pub const PAGE_SIZES: [usize; 5] = [10, 20, 30, 50, 100];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }

    /// 列見出しに付ける記号
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Asc => "▲",
            SortDirection::Desc => "▼",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(SortDirection::Asc),
            "desc" | "descending" => Ok(SortDirection::Desc),
            other => Err(format!("unknown sort direction: {}", other)),
        }
    }
}

/// ユーザー操作で変わる表示パラメータ
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub search_term: String,
    pub sort_key: String,
    pub sort_direction: SortDirection,
    /// 1始まり
    pub page_index: usize,
    pub page_size: usize,
}

impl ViewState {
    pub fn new(sort_key: &str) -> Self {
        Self {
            search_term: String::new(),
            sort_key: sort_key.to_string(),
            sort_direction: SortDirection::Asc,
            page_index: 1,
            page_size: PAGE_SIZES[0],
        }
    }

    /// 現在ページの先頭位置（0始まり）
    pub fn offset(&self) -> usize {
        self.page_index.saturating_sub(1).saturating_mul(self.page_size)
    }
}

/// ページネーション表示用の情報
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageInfo {
    pub page_index: usize,
    pub page_size: usize,
    /// 検索で絞り込んだ後の件数
    pub total: usize,
    /// 表示中の先頭行番号（1始まり、空なら0）
    pub from: usize,
    /// 表示中の末尾行番号（空なら0）
    pub to: usize,
}

impl PageInfo {
    pub fn new(page_index: usize, page_size: usize, total: usize) -> Self {
        let start = page_index.saturating_sub(1).saturating_mul(page_size);
        let end = start.saturating_add(page_size).min(total);
        let (from, to) = if start < end { (start + 1, end) } else { (0, 0) };
        Self {
            page_index,
            page_size,
            total,
            from,
            to,
        }
    }

    pub fn page_count(&self) -> usize {
        if self.page_size == 0 {
            return 0;
        }
        self.total.div_ceil(self.page_size)
    }

    pub fn has_prev(&self) -> bool {
        self.page_index > 1
    }

    pub fn has_next(&self) -> bool {
        self.page_index < self.page_count()
    }

    /// "Showing 1 to 10 of 42 entries"
    pub fn summary(&self) -> String {
        format!(
            "Showing {} to {} of {} entries",
            self.from, self.to, self.total
        )
    }
}
