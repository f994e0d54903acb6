//! バックエンドREST APIのエンドポイントとレスポンス解析
//!
//! 通信手段（reqwest / fetch）に依存しない部分だけをここに置く。
//! 成功時は `{ "data": ... }`、失敗時は
//! `{ "response_code", "response_message", "error" }` が返る。

use crate::error::StoreError;
use crate::types::{Currency, CurrencyValue, Profile, User};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value as JsonValue;

pub const DEFAULT_BASE_URL: &str = "https://backend-uki.project-adit.my.id/api";

/// エンドポイントURLの組み立て
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    base: String,
}

impl Endpoints {
    pub fn new(base: &str) -> Self {
        Self {
            base: base.trim_end_matches('/').to_string(),
        }
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base, path)
    }

    pub fn users(&self) -> String {
        self.url("/user/list")
    }

    pub fn user(&self, id: u64) -> String {
        self.url(&format!("/user/list/{}", id))
    }

    pub fn create_user(&self) -> String {
        self.url("/user/create")
    }

    pub fn update_user(&self, id: u64) -> String {
        self.url(&format!("/user/update/{}", id))
    }

    pub fn delete_user(&self, id: u64) -> String {
        self.url(&format!("/user/delete/{}", id))
    }

    pub fn currency(&self) -> String {
        self.url("/currency/get-currency")
    }

    /// 為替レートの再取得（管理者）
    pub fn currency_fetch(&self) -> String {
        self.url("/currency/fetch")
    }

    pub fn profile(&self) -> String {
        self.url("/get-profile")
    }

    pub fn update_profile(&self) -> String {
        self.url("/update-profile")
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

#[derive(Deserialize, Default)]
struct ErrorBody {
    #[serde(default)]
    response_code: Option<JsonValue>,
    #[serde(default)]
    response_message: Option<String>,
    #[serde(default)]
    error: Option<JsonValue>,
}

/// `data` フィールドを取り出してデコード
pub fn decode_data<T: DeserializeOwned>(body: &str) -> Result<T, StoreError> {
    serde_json::from_str::<Envelope<T>>(body)
        .map(|e| e.data)
        .map_err(|e| StoreError::Decode(e.to_string()))
}

pub fn decode_users(body: &str) -> Result<Vec<User>, StoreError> {
    decode_data(body)
}

pub fn decode_user(body: &str) -> Result<User, StoreError> {
    decode_data(body)
}

pub fn decode_profile(body: &str) -> Result<Profile, StoreError> {
    decode_data(body)
}

/// `{ "USD": 15800, ... }` をレコード列に展開
pub fn decode_currency(body: &str) -> Result<Vec<Currency>, StoreError> {
    let map: serde_json::Map<String, JsonValue> = decode_data(body)?;
    Ok(map
        .iter()
        .map(|(name, value)| Currency {
            name: name.clone(),
            value: CurrencyValue::from(value),
        })
        .collect())
}

/// 失敗レスポンスを `StoreError` に変換
pub fn error_from_response(status: u16, body: &str) -> StoreError {
    let parsed: ErrorBody = serde_json::from_str(body).unwrap_or_default();
    let code = match parsed.response_code {
        Some(JsonValue::String(s)) => s,
        Some(JsonValue::Null) | None => "Unknown Error".to_string(),
        Some(other) => other.to_string(),
    };
    let message = parsed
        .response_message
        .unwrap_or_else(|| "Something went wrong".to_string());
    let detail = match parsed.error {
        Some(JsonValue::String(s)) => Some(s),
        Some(JsonValue::Null) | None => None,
        Some(other) => Some(other.to_string()),
    };
    StoreError::Rejected {
        status,
        code,
        message,
        detail,
    }
}
