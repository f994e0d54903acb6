//! エラー型定義

use thiserror::Error;

/// RecordStore（バックエンド通信）のエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StoreError {
    /// バックエンドがリクエストを拒否した（バリデーションエラー等）
    #[error("{code}: {message}")]
    Rejected {
        status: u16,
        code: String,
        message: String,
        detail: Option<String>,
    },

    #[error("Not logged in: no session token")]
    MissingToken,

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Unsupported operation: {0}")]
    Unsupported(&'static str),
}

impl StoreError {
    /// HTTPステータス（バックエンドが応答した場合のみ）
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// ビューモデルのエラー
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("Fetch failed: {0}")]
    FetchFailed(#[source] StoreError),

    #[error("Mutation failed: {0}")]
    MutationFailed(#[source] StoreError),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_display() {
        let error = StoreError::Rejected {
            status: 422,
            code: "422".to_string(),
            message: "The email has already been taken.".to_string(),
            detail: None,
        };
        assert_eq!(format!("{}", error), "422: The email has already been taken.");
        assert_eq!(error.status(), Some(422));
    }

    #[test]
    fn test_fetch_failed_wraps_store_error() {
        let error = Error::FetchFailed(StoreError::Transport("connection refused".into()));
        let display = format!("{}", error);
        assert!(display.contains("Fetch failed"));
        assert!(display.contains("connection refused"));
        assert_eq!(StoreError::MissingToken.status(), None);
    }

    #[test]
    fn test_source_is_store_error() {
        use std::error::Error as _;
        let error = Error::MutationFailed(StoreError::Unsupported("create"));
        let source = error.source().expect("source missing");
        assert!(source.to_string().contains("create"));
    }

    #[test]
    fn test_invalid_input_debug() {
        let error = Error::InvalidInput("page size 7".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("InvalidInput"));
        assert!(debug.contains("page size 7"));
    }
}
