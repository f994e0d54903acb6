//! RecordStore: リモートのレコード取得・更新
//!
//! ブラウザ（シングルスレッド）と tokio の両方で使うため `?Send`。

use crate::error::StoreError;
use crate::record::Record;
use async_trait::async_trait;

#[async_trait(?Send)]
pub trait RecordStore<R: Record> {
    /// 作成時のペイロード
    type Draft;
    /// 更新時のペイロード
    type Patch;

    /// 全件取得（順序は問わない）
    async fn fetch_all(&self) -> Result<Vec<R>, StoreError>;

    async fn create(&self, _draft: &Self::Draft) -> Result<(), StoreError> {
        Err(StoreError::Unsupported("create"))
    }

    async fn update(&self, _key: &R::Key, _patch: &Self::Patch) -> Result<(), StoreError> {
        Err(StoreError::Unsupported("update"))
    }

    async fn delete(&self, _key: &R::Key) -> Result<(), StoreError> {
        Err(StoreError::Unsupported("delete"))
    }

    /// バックエンド側のデータ再取得を依頼する（為替レート更新など）
    async fn refresh(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
