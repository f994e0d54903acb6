//! Cookie によるセッションの読み書きと画面遷移

use admin_dashboard_common::session::{ROLE_COOKIE, TOKEN_COOKIE};
use admin_dashboard_common::Session;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

fn html_document() -> Option<HtmlDocument> {
    web_sys::window()?.document()?.dyn_into::<HtmlDocument>().ok()
}

/// 現在の Cookie からセッションを組み立てる
pub fn current_session() -> Session {
    html_document()
        .and_then(|doc| doc.cookie().ok())
        .map(|cookies| Session::from_cookies_with(&cookies, decode_cookie))
        .unwrap_or_default()
}

/// `write_cookie` の `encodeURIComponent` と対になるデコード（不正な並びは生の値のまま）
fn decode_cookie(raw: &str) -> String {
    js_sys::decode_uri_component(raw)
        .map(String::from)
        .unwrap_or_else(|_| raw.to_string())
}

fn write_cookie(name: &str, value: &str, max_age: i64) {
    let Some(doc) = html_document() else {
        return;
    };
    let encoded: String = js_sys::encode_uri_component(value).into();
    let cookie = format!("{}={}; path=/; max-age={}; SameSite=Lax", name, encoded, max_age);
    if let Err(e) = doc.set_cookie(&cookie) {
        gloo::console::error!(format!("cookie write failed: {:?}", e));
    }
}

/// ログイン: トークンとロールを Cookie に保存
pub fn store_session(token: &str, role: Option<&str>) {
    write_cookie(TOKEN_COOKIE, token, 60 * 60 * 24);
    match role {
        Some(role) if !role.is_empty() => write_cookie(ROLE_COOKIE, role, 60 * 60 * 24),
        _ => write_cookie(ROLE_COOKIE, "", 0),
    }
}

/// ログアウト
pub fn clear_session() {
    write_cookie(TOKEN_COOKIE, "", 0);
    write_cookie(ROLE_COOKIE, "", 0);
}

pub fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// ページ全体を遷移させる（ルート判定をやり直すため）
pub fn navigate(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(path) {
            gloo::console::error!(format!("navigation failed: {:?}", e));
        }
    }
}

#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use admin_dashboard_common::{Capability, SessionGate};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn wasm_store_and_clear_session() {
        store_session("abc=123", Some("admin"));
        let session = current_session();
        assert_eq!(session.token.as_deref(), Some("abc=123"));
        assert!(session.is_authorized(Capability::RefreshCurrency));

        clear_session();
        assert!(!current_session().is_authenticated());
    }

    #[wasm_bindgen_test]
    fn wasm_decode_cookie_keeps_malformed_escape() {
        assert_eq!(decode_cookie("a%7C1"), "a|1");
        assert_eq!(decode_cookie("a%+1b"), "a%+1b");
        assert_eq!(decode_cookie("50%"), "50%");
    }
}
