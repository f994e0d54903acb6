//! APIクライアント結合テスト
//!
//! ローカルのモックHTTPサーバーに対して、ビューモデル経由の読み込み・変更を検証

use admin_dashboard_common::{
    Currency, CurrencyValue, Error, LoadOutcome, NewUser, RecordStore, StoreError,
    TabularViewModel, User, UserUpdate,
};
use admin_dashboard_rust::client::ApiClient;
use axum::extract::State;
use axum::http::{header, HeaderMap, Method, StatusCode, Uri};
use axum::response::IntoResponse;
use axum::Router;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

/// モックサーバーが受け取ったリクエスト
#[derive(Debug, Clone)]
struct Recorded {
    method: String,
    path: String,
    authorization: Option<String>,
    body: String,
}

/// (メソッド, パス, ステータス, ボディ)
type Route = (&'static str, &'static str, u16, &'static str);

#[derive(Clone)]
struct MockState {
    routes: Arc<Vec<Route>>,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

/// 登録済みの応答を返し、リクエストを記録する（未登録は404）
async fn respond(
    State(state): State<MockState>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: String,
) -> impl IntoResponse {
    let (status, reply) = state
        .routes
        .iter()
        .find(|(m, p, _, _)| *m == method.as_str() && *p == uri.path())
        .map(|(_, _, s, b)| (*s, *b))
        .unwrap_or((404, r#"{"response_message": "Not Found"}"#));

    state.requests.lock().unwrap().push(Recorded {
        method: method.to_string(),
        path: uri.path().to_string(),
        authorization: headers
            .get(header::AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        body,
    });

    (
        StatusCode::from_u16(status).unwrap(),
        [(header::CONTENT_TYPE, "application/json")],
        reply,
    )
}

struct MockServer {
    base_url: String,
    requests: Arc<Mutex<Vec<Recorded>>>,
}

impl MockServer {
    async fn start(routes: Vec<Route>) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let requests = Arc::new(Mutex::new(Vec::new()));

        let app = Router::new().fallback(respond).with_state(MockState {
            routes: Arc::new(routes),
            requests: Arc::clone(&requests),
        });
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}/api", addr),
            requests,
        }
    }

    fn client(&self, token: Option<&str>) -> ApiClient {
        ApiClient::new(
            &self.base_url,
            token.map(str::to_string),
            Duration::from_secs(5),
        )
        .expect("Failed to build client")
    }

    fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }
}

const USERS: &str = r#"{"response_code": 200, "data": [
    {"id": 2, "name": "Budi", "email": "budi@example.com"},
    {"id": 1, "name": "Adit", "email": "adit@example.com"},
    {"id": 3, "name": "Citra", "email": "citra@example.com"}
]}"#;

/// ユーザー一覧の読み込みとBearerトークン
#[tokio::test]
async fn test_load_users_sends_bearer_token() {
    let server = MockServer::start(vec![("GET", "/api/user/list", 200, USERS)]).await;
    let client = server.client(Some("secret-token"));

    let mut vm: TabularViewModel<User> = TabularViewModel::new();
    let outcome = vm.load(&client).await.expect("読み込み失敗");
    assert_eq!(outcome, LoadOutcome::Applied { count: 3 });

    let ids: Vec<u64> = vm.projection().rows.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);

    let requests = server.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(
        requests[0].authorization.as_deref(),
        Some("Bearer secret-token")
    );
}

/// トークンがなければ送信しない
#[tokio::test]
async fn test_missing_token_is_not_sent() {
    let server = MockServer::start(vec![("GET", "/api/user/list", 200, USERS)]).await;
    let client = server.client(None);

    let mut vm: TabularViewModel<User> = TabularViewModel::new();
    let result = vm.load(&client).await;
    assert_eq!(result, Err(Error::FetchFailed(StoreError::MissingToken)));
    assert!(server.requests().is_empty());
}

/// 為替レートの連想配列を行に展開
#[tokio::test]
async fn test_load_currency_map() {
    let body = r#"{"data": {"USD": 15800, "JPY": 105.5, "EUR": "17000", "XAU": null}}"#;
    let server = MockServer::start(vec![("GET", "/api/currency/get-currency", 200, body)]).await;
    let client = server.client(Some("t"));

    let mut vm: TabularViewModel<Currency> = TabularViewModel::new();
    vm.load(&client).await.expect("読み込み失敗");

    let names: Vec<&str> = vm.projection().rows.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["EUR", "JPY", "USD", "XAU"]);

    let usd = vm.find(&"USD".to_string()).expect("USDがない");
    assert_eq!(usd.value, CurrencyValue::Number(15800.0));
    let xau = vm.find(&"XAU".to_string()).expect("XAUがない");
    assert_eq!(xau.value, CurrencyValue::Missing);
}

/// 再取得はPOSTしてから一覧を読み直す
#[tokio::test]
async fn test_refresh_currency_posts_then_loads() {
    let server = MockServer::start(vec![
        ("POST", "/api/currency/fetch", 200, r#"{"data": null}"#),
        ("GET", "/api/currency/get-currency", 200, r#"{"data": {"USD": 1}}"#),
    ])
    .await;
    let client = server.client(Some("t"));

    let mut vm: TabularViewModel<Currency> = TabularViewModel::new();
    let outcome = vm.refresh(&client).await.expect("再取得失敗");
    assert_eq!(outcome, LoadOutcome::Applied { count: 1 });

    let methods: Vec<String> = server.requests().iter().map(|r| r.method.clone()).collect();
    assert_eq!(methods, vec!["POST", "GET"]);
}

/// バリデーションエラーのレスポンスを解析し、一覧は変えない
#[tokio::test]
async fn test_create_rejected_keeps_records() {
    let rejected = r#"{"response_code": "VALIDATION_ERROR", "response_message": "Email already taken", "error": "email"}"#;
    let server = MockServer::start(vec![
        ("GET", "/api/user/list", 200, USERS),
        ("POST", "/api/user/create", 422, rejected),
    ])
    .await;
    let client = server.client(Some("t"));

    let mut vm: TabularViewModel<User> = TabularViewModel::new();
    vm.load(&client).await.expect("読み込み失敗");

    let draft = NewUser {
        email: "adit@example.com".into(),
        name: "Adit".into(),
        password: "password".into(),
        password_confirmation: "password".into(),
    };
    let err = vm.create(&client, &draft).await.unwrap_err();
    match err {
        Error::MutationFailed(StoreError::Rejected {
            status,
            code,
            message,
            detail,
        }) => {
            assert_eq!(status, 422);
            assert_eq!(code, "VALIDATION_ERROR");
            assert_eq!(message, "Email already taken");
            assert_eq!(detail.as_deref(), Some("email"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(vm.records().len(), 3);

    let create = server
        .requests()
        .into_iter()
        .find(|r| r.method == "POST")
        .expect("POSTがない");
    let sent: serde_json::Value = serde_json::from_str(&create.body).expect("JSONでない");
    assert_eq!(sent["password_confirmation"], "password");
}

/// 更新はPATCH、削除はDELETEのあとに全件を読み直す
#[tokio::test]
async fn test_update_and_delete_reload() {
    let server = MockServer::start(vec![
        ("GET", "/api/user/list", 200, USERS),
        ("PATCH", "/api/user/update/2", 200, r#"{"data": null}"#),
        ("DELETE", "/api/user/delete/3", 200, r#"{"data": null}"#),
    ])
    .await;
    let client = server.client(Some("t"));

    let mut vm: TabularViewModel<User> = TabularViewModel::new();
    vm.load(&client).await.expect("読み込み失敗");

    let patch = UserUpdate {
        email: "budi@example.com".into(),
        name: "Budi S".into(),
    };
    vm.update(&client, &2, &patch).await.expect("更新失敗");
    vm.delete(&client, &3).await.expect("削除失敗");

    let calls: Vec<(String, String)> = server
        .requests()
        .into_iter()
        .map(|r| (r.method, r.path))
        .collect();
    assert_eq!(
        calls,
        vec![
            ("GET".to_string(), "/api/user/list".to_string()),
            ("PATCH".to_string(), "/api/user/update/2".to_string()),
            ("GET".to_string(), "/api/user/list".to_string()),
            ("DELETE".to_string(), "/api/user/delete/3".to_string()),
            ("GET".to_string(), "/api/user/list".to_string()),
        ]
    );
}

/// 形式の違うエラー本文は既定のメッセージになる
#[tokio::test]
async fn test_unparseable_error_body() {
    let server = MockServer::start(vec![("GET", "/api/user/list", 500, "<html>oops</html>")]).await;
    let client = server.client(Some("t"));

    let err = RecordStore::<User>::fetch_all(&client).await.unwrap_err();
    assert_eq!(
        err,
        StoreError::Rejected {
            status: 500,
            code: "Unknown Error".into(),
            message: "Something went wrong".into(),
            detail: None,
        }
    );
}

/// 1件取得とプロフィール
#[tokio::test]
async fn test_get_user_and_profile() {
    let server = MockServer::start(vec![
        ("GET", "/api/user/list/1", 200, r#"{"data": {"id": 1, "name": "Adit", "email": "adit@example.com"}}"#),
        ("GET", "/api/get-profile", 200, r#"{"data": {"name": "Adit", "email": "adit@example.com"}}"#),
    ])
    .await;
    let client = server.client(Some("t"));

    let user = client.get_user(1).await.expect("取得失敗");
    assert_eq!(user.name, "Adit");

    let profile = client.profile().await.expect("取得失敗");
    assert_eq!(profile.id, None);
    assert_eq!(profile.email, "adit@example.com");
}
