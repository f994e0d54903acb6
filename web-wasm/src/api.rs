//! fetch によるバックエンドAPI呼び出し
//!
//! レスポンスはテキストで受け取り、解析は共通ライブラリに任せる。

use admin_dashboard_common::api::{self, Endpoints, DEFAULT_BASE_URL};
use admin_dashboard_common::{
    Currency, NewUser, Profile, ProfileUpdate, RecordStore, Session, StoreError, User, UserUpdate,
};
use async_trait::async_trait;
use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Headers, Request, RequestInit, RequestMode, Response};

fn transport(e: JsValue) -> StoreError {
    StoreError::Transport(format!("{:?}", e))
}

#[derive(Clone)]
pub struct WebApi {
    endpoints: Endpoints,
    token: Option<String>,
}

impl WebApi {
    pub fn new(session: &Session) -> Self {
        Self {
            endpoints: Endpoints::new(DEFAULT_BASE_URL),
            token: session.token.clone(),
        }
    }

    async fn send(&self, method: &str, url: &str, body: Option<String>) -> Result<String, StoreError> {
        let token = self.token.as_deref().ok_or(StoreError::MissingToken)?;

        let opts = RequestInit::new();
        opts.set_method(method);
        opts.set_mode(RequestMode::Cors);

        let headers = Headers::new().map_err(transport)?;
        headers
            .set("Authorization", &format!("Bearer {}", token))
            .map_err(transport)?;
        headers.set("Accept", "application/json").map_err(transport)?;
        if let Some(body) = &body {
            headers
                .set("Content-Type", "application/json")
                .map_err(transport)?;
            opts.set_body(&JsValue::from_str(body));
        }
        opts.set_headers(&headers);

        let request = Request::new_with_str_and_init(url, &opts).map_err(transport)?;
        let window = web_sys::window().ok_or_else(|| StoreError::Transport("no window".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(transport)?;
        let resp: Response = resp_value.dyn_into().map_err(transport)?;

        let text = JsFuture::from(resp.text().map_err(transport)?)
            .await
            .map_err(transport)?;
        let text = text.as_string().unwrap_or_default();

        if resp.ok() {
            Ok(text)
        } else {
            let error = api::error_from_response(resp.status(), &text);
            gloo::console::warn!(format!("{} {} -> {}", method, url, error));
            Err(error)
        }
    }

    async fn send_json<T: Serialize + ?Sized>(
        &self,
        method: &str,
        url: &str,
        body: &T,
    ) -> Result<(), StoreError> {
        let body = serde_json::to_string(body).map_err(|e| StoreError::Decode(e.to_string()))?;
        self.send(method, url, Some(body)).await.map(|_| ())
    }

    pub async fn get_user(&self, id: u64) -> Result<User, StoreError> {
        let body = self.send("GET", &self.endpoints.user(id), None).await?;
        api::decode_user(&body)
    }

    pub async fn profile(&self) -> Result<Profile, StoreError> {
        let body = self.send("GET", &self.endpoints.profile(), None).await?;
        api::decode_profile(&body)
    }

    pub async fn update_profile(&self, update: &ProfileUpdate) -> Result<(), StoreError> {
        self.send_json("PATCH", &self.endpoints.update_profile(), update)
            .await
    }
}

#[async_trait(?Send)]
impl RecordStore<User> for WebApi {
    type Draft = NewUser;
    type Patch = UserUpdate;

    async fn fetch_all(&self) -> Result<Vec<User>, StoreError> {
        let body = self.send("GET", &self.endpoints.users(), None).await?;
        api::decode_users(&body)
    }

    async fn create(&self, draft: &NewUser) -> Result<(), StoreError> {
        self.send_json("POST", &self.endpoints.create_user(), draft)
            .await
    }

    async fn update(&self, key: &u64, patch: &UserUpdate) -> Result<(), StoreError> {
        self.send_json("PATCH", &self.endpoints.update_user(*key), patch)
            .await
    }

    async fn delete(&self, key: &u64) -> Result<(), StoreError> {
        self.send("DELETE", &self.endpoints.delete_user(*key), None)
            .await
            .map(|_| ())
    }
}

#[async_trait(?Send)]
impl RecordStore<Currency> for WebApi {
    type Draft = std::convert::Infallible;
    type Patch = std::convert::Infallible;

    async fn fetch_all(&self) -> Result<Vec<Currency>, StoreError> {
        let body = self.send("GET", &self.endpoints.currency(), None).await?;
        api::decode_currency(&body)
    }

    async fn refresh(&self) -> Result<(), StoreError> {
        self.send("POST", &self.endpoints.currency_fetch(), Some("{}".to_string()))
            .await
            .map(|_| ())
    }
}
