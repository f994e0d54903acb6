//! reqwest によるバックエンドAPIクライアント
//!
//! `RecordStore<User>` と `RecordStore<Currency>` を実装し、
//! ビューモデルから直接使えるようにする。

use crate::config::Config;
use crate::error::Result;
use admin_dashboard_common::api::{self, Endpoints};
use admin_dashboard_common::{
    Currency, NewUser, Profile, ProfileUpdate, RecordStore, StoreError, User, UserUpdate,
};
use async_trait::async_trait;
use reqwest::{Method, RequestBuilder};
use serde::Serialize;
use std::time::Duration;

pub struct ApiClient {
    http: reqwest::Client,
    endpoints: Endpoints,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            endpoints: Endpoints::new(base_url),
            token,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.base_url(),
            config.session().token,
            Duration::from_secs(config.timeout_seconds),
        )
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn request(&self, method: Method, url: &str) -> std::result::Result<RequestBuilder, StoreError> {
        let token = self.token.as_deref().ok_or(StoreError::MissingToken)?;
        tracing::debug!(%method, url, "request");
        Ok(self.http.request(method, url).bearer_auth(token))
    }

    /// 送信してボディ文字列を返す。2xx以外はエラー本文を解析する
    async fn send(&self, builder: RequestBuilder) -> std::result::Result<String, StoreError> {
        let response = builder
            .send()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;
        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| StoreError::Transport(e.to_string()))?;

        if status.is_success() {
            Ok(body)
        } else {
            let error = api::error_from_response(status.as_u16(), &body);
            tracing::warn!(status = status.as_u16(), error = %error, "request rejected");
            Err(error)
        }
    }

    async fn get(&self, url: &str) -> std::result::Result<String, StoreError> {
        self.send(self.request(Method::GET, url)?).await
    }

    async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: Method,
        url: &str,
        body: &T,
    ) -> std::result::Result<String, StoreError> {
        self.send(self.request(method, url)?.json(body)).await
    }

    /// 編集フォーム用の1件取得
    pub async fn get_user(&self, id: u64) -> std::result::Result<User, StoreError> {
        let body = self.get(&self.endpoints.user(id)).await?;
        api::decode_user(&body)
    }

    pub async fn profile(&self) -> std::result::Result<Profile, StoreError> {
        let body = self.get(&self.endpoints.profile()).await?;
        api::decode_profile(&body)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> std::result::Result<(), StoreError> {
        self.send_json(Method::PATCH, &self.endpoints.update_profile(), update)
            .await
            .map(|_| ())
    }
}

#[async_trait(?Send)]
impl RecordStore<User> for ApiClient {
    type Draft = NewUser;
    type Patch = UserUpdate;

    async fn fetch_all(&self) -> std::result::Result<Vec<User>, StoreError> {
        let body = self.get(&self.endpoints.users()).await?;
        api::decode_users(&body)
    }

    async fn create(&self, draft: &NewUser) -> std::result::Result<(), StoreError> {
        self.send_json(Method::POST, &self.endpoints.create_user(), draft)
            .await
            .map(|_| ())
    }

    async fn update(&self, key: &u64, patch: &UserUpdate) -> std::result::Result<(), StoreError> {
        self.send_json(Method::PATCH, &self.endpoints.update_user(*key), patch)
            .await
            .map(|_| ())
    }

    async fn delete(&self, key: &u64) -> std::result::Result<(), StoreError> {
        let builder = self.request(Method::DELETE, &self.endpoints.delete_user(*key))?;
        self.send(builder).await.map(|_| ())
    }
}

#[async_trait(?Send)]
impl RecordStore<Currency> for ApiClient {
    type Draft = std::convert::Infallible;
    type Patch = std::convert::Infallible;

    async fn fetch_all(&self) -> std::result::Result<Vec<Currency>, StoreError> {
        let body = self.get(&self.endpoints.currency()).await?;
        api::decode_currency(&body)
    }

    async fn refresh(&self) -> std::result::Result<(), StoreError> {
        let empty = serde_json::json!({});
        self.send_json(Method::POST, &self.endpoints.currency_fetch(), &empty)
            .await
            .map(|_| ())
    }
}
