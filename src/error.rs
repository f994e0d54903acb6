use admin_dashboard_common::StoreError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ログインしていません。`admin-dashboard login --token YOUR_TOKEN` でトークンを設定してください")]
    NotLoggedIn,

    #[error("この操作の権限がありません: {0}")]
    Forbidden(String),

    #[error("ユーザーが見つかりません: {0}")]
    UserNotFound(u64),

    #[error("{0}")]
    View(#[from] admin_dashboard_common::Error),

    #[error("API呼び出しエラー: {0}")]
    Api(#[from] StoreError),

    #[error("HTTPクライアントエラー: {0}")]
    Http(#[from] reqwest::Error),

    #[error("入力エラー: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
