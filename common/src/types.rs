//! バックエンドのデータ型
//!
//! CLIとWeb(WASM)で共有される型:
//! - User: ユーザー一覧の行
//! - Currency: 為替レート表の行（名前 → 値）
//! - NewUser / UserUpdate / ProfileUpdate: 送信ペイロード

use crate::record::Record;
use crate::value::FieldValue;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// ユーザー
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

impl Record for User {
    type Key = u64;

    const FIELDS: &'static [&'static str] = &["id", "name", "email"];
    const SEARCH_FIELDS: &'static [&'static str] = &["id", "name", "email"];
    const DEFAULT_SORT: &'static str = "id";

    fn key(&self) -> u64 {
        self.id
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "id" => Some(FieldValue::from(self.id)),
            "name" => Some(FieldValue::from(self.name.as_str())),
            "email" => Some(FieldValue::from(self.email.as_str())),
            _ => None,
        }
    }
}

/// レート値（数値または文字列）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CurrencyValue {
    Number(f64),
    Text(String),
    #[default]
    Missing,
}

impl From<&JsonValue> for CurrencyValue {
    fn from(v: &JsonValue) -> Self {
        match v {
            JsonValue::Number(n) => n
                .as_f64()
                .map(CurrencyValue::Number)
                .unwrap_or_else(|| CurrencyValue::Text(n.to_string())),
            JsonValue::String(s) => CurrencyValue::Text(s.clone()),
            JsonValue::Null => CurrencyValue::Missing,
            other => CurrencyValue::Text(other.to_string()),
        }
    }
}

impl From<&CurrencyValue> for FieldValue {
    fn from(v: &CurrencyValue) -> Self {
        match v {
            CurrencyValue::Number(n) => FieldValue::Number(*n),
            CurrencyValue::Text(s) => FieldValue::Text(s.clone()),
            CurrencyValue::Missing => FieldValue::Null,
        }
    }
}

/// 為替レート
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Currency {
    pub name: String,
    pub value: CurrencyValue,
}

impl Record for Currency {
    type Key = String;

    const FIELDS: &'static [&'static str] = &["name", "value"];
    const SEARCH_FIELDS: &'static [&'static str] = &["name"];
    const DEFAULT_SORT: &'static str = "name";

    fn key(&self) -> String {
        self.name.clone()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        match name {
            "name" => Some(FieldValue::from(self.name.as_str())),
            "value" => Some(FieldValue::from(&self.value)),
            _ => None,
        }
    }
}

/// ユーザー作成ペイロード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
    pub password_confirmation: String,
}

/// ユーザー更新ペイロード
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserUpdate {
    pub email: String,
    pub name: String,
}

impl From<&User> for UserUpdate {
    fn from(user: &User) -> Self {
        Self {
            email: user.email.clone(),
            name: user.name.clone(),
        }
    }
}

/// ログイン中アカウントのプロフィール
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<u64>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// プロフィール更新ペイロード（パスワードは空なら送らない）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    pub email: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password_confirmation: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_fields() {
        let user = User {
            id: 7,
            name: "Adit".to_string(),
            email: "adit@example.com".to_string(),
        };
        assert_eq!(user.key(), 7);
        assert_eq!(user.field("id"), Some(FieldValue::Number(7.0)));
        assert_eq!(user.field("password"), None);
        assert!(User::has_field("email"));
        assert!(!User::has_field("role"));
    }

    #[test]
    fn test_user_matches_id_name_email() {
        let user = User {
            id: 42,
            name: "Budi".to_string(),
            email: "budi@Mail.com".to_string(),
        };
        assert!(user.matches("42"));
        assert!(user.matches("bud"));
        assert!(user.matches("mail.com"));
        assert!(user.matches(""));
        assert!(!user.matches("siti"));
    }

    #[test]
    fn test_currency_matches_name_only() {
        let currency = Currency {
            name: "USD".to_string(),
            value: CurrencyValue::Number(15800.0),
        };
        assert!(currency.matches("us"));
        assert!(!currency.matches("158"));
    }

    #[test]
    fn test_currency_value_from_json() {
        assert_eq!(
            CurrencyValue::from(&serde_json::json!(1.5)),
            CurrencyValue::Number(1.5)
        );
        assert_eq!(
            CurrencyValue::from(&serde_json::json!("n/a")),
            CurrencyValue::Text("n/a".to_string())
        );
        assert_eq!(CurrencyValue::from(&JsonValue::Null), CurrencyValue::Missing);
        assert_eq!(
            CurrencyValue::from(&serde_json::json!(true)),
            CurrencyValue::Text("true".to_string())
        );
    }

    #[test]
    fn test_user_deserialize_ignores_extra_fields() {
        let json = r#"{"id": 3, "name": "Citra", "email": "c@x.id", "created_at": "2024-01-01"}"#;
        let user: User = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(user.id, 3);
        assert_eq!(user.name, "Citra");
    }

    #[test]
    fn test_profile_update_skips_empty_password() {
        let update = ProfileUpdate {
            email: "a@b.c".to_string(),
            name: "A".to_string(),
            password: None,
            password_confirmation: None,
        };
        let json = serde_json::to_string(&update).expect("シリアライズ失敗");
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_new_user_serialize() {
        let user = NewUser {
            email: "d@x.id".to_string(),
            name: "Dewi".to_string(),
            password: "secret".to_string(),
            password_confirmation: "secret".to_string(),
        };
        let json = serde_json::to_string(&user).expect("シリアライズ失敗");
        assert!(json.contains("\"password_confirmation\":\"secret\""));
    }
}
