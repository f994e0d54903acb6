//! テーブルに表示するレコードの共通インターフェース

use crate::value::FieldValue;
use std::fmt;

/// 一意キーと名前付きフィールドを持つ行データ
pub trait Record: Clone {
    /// 編集・削除の対象を特定するキー
    type Key: Clone + PartialEq + fmt::Debug + fmt::Display;

    /// ソート可能なフィールド名（表示順）
    const FIELDS: &'static [&'static str];

    /// 検索対象フィールド
    const SEARCH_FIELDS: &'static [&'static str];

    /// 初期ソートキー（主表示フィールド）
    const DEFAULT_SORT: &'static str;

    fn key(&self) -> Self::Key;

    /// フィールド値を取得。未知のフィールドは `None`
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// 小文字化済みの検索語にマッチするか
    ///
    /// 空の検索語はすべてにマッチする。
    fn matches(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        Self::SEARCH_FIELDS.iter().any(|name| {
            self.field(name)
                .map(|v| v.search_text().contains(needle))
                .unwrap_or(false)
        })
    }

    fn has_field(name: &str) -> bool {
        Self::FIELDS.contains(&name)
    }
}
