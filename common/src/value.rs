//! テーブルセルの値
//!
//! ソートと検索はすべて `FieldValue` を介して行う。
//! 昇順の並び: 数値（数値順） → 文字列（コードポイント順） → 欠損値

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Null,
}

impl FieldValue {
    fn rank(&self) -> u8 {
        match self {
            FieldValue::Number(_) => 0,
            FieldValue::Text(_) => 1,
            FieldValue::Null => 2,
        }
    }

    /// 昇順の比較（全順序）
    pub fn cmp_ascending(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Number(a), FieldValue::Number(b)) => a.total_cmp(b),
            (FieldValue::Text(a), FieldValue::Text(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// 検索対象の小文字化済みテキスト
    pub fn search_text(&self) -> String {
        self.to_string().to_lowercase()
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Number(n) => write!(f, "{}", format_number(*n)),
            FieldValue::Text(s) => f.write_str(s),
            FieldValue::Null => Ok(()),
        }
    }
}

/// 整数値は小数部なしで表示する（`1.0` ではなく `1`）
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

impl From<u64> for FieldValue {
    fn from(n: u64) -> Self {
        FieldValue::Number(n as f64)
    }
}

impl From<f64> for FieldValue {
    fn from(n: f64) -> Self {
        FieldValue::Number(n)
    }
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(s: String) -> Self {
        FieldValue::Text(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_compare_numerically() {
        let a = FieldValue::from(9u64);
        let b = FieldValue::from(10u64);
        assert_eq!(a.cmp_ascending(&b), Ordering::Less);
    }

    #[test]
    fn test_text_compares_by_code_point() {
        let upper = FieldValue::from("Zeta");
        let lower = FieldValue::from("alpha");
        // 大文字は小文字より前
        assert_eq!(upper.cmp_ascending(&lower), Ordering::Less);
    }

    #[test]
    fn test_mixed_kinds_order() {
        let n = FieldValue::Number(1_000_000.0);
        let t = FieldValue::from("0");
        let null = FieldValue::Null;
        assert_eq!(n.cmp_ascending(&t), Ordering::Less);
        assert_eq!(t.cmp_ascending(&null), Ordering::Less);
        assert_eq!(null.cmp_ascending(&null), Ordering::Equal);
    }

    #[test]
    fn test_display_integers_without_fraction() {
        assert_eq!(FieldValue::Number(42.0).to_string(), "42");
        assert_eq!(FieldValue::Number(0.5).to_string(), "0.5");
        assert_eq!(FieldValue::Null.to_string(), "");
    }

    #[test]
    fn test_search_text_is_lowercase() {
        assert_eq!(FieldValue::from("USD").search_text(), "usd");
    }
}
