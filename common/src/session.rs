//! ログインセッションと権限判定
//!
//! Web版は Cookie（`token` / `role`）、CLI版は設定ファイルからセッションを組み立てる。

use serde::{Deserialize, Serialize};

/// UI上の操作の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// 一覧の閲覧
    ViewRecords,
    /// ユーザーの作成・編集・削除
    ManageUsers,
    /// 為替レートの再取得（管理者のみ）
    RefreshCurrency,
}

/// 操作ボタンを表示するかの判定
///
/// 実際の権限チェックはバックエンドが行う。
pub trait SessionGate {
    fn is_authorized(&self, capability: Capability) -> bool;
}

pub const TOKEN_COOKIE: &str = "token";
pub const ROLE_COOKIE: &str = "role";
pub const ADMIN_ROLE: &str = "admin";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub token: Option<String>,
    pub role: Option<String>,
}

impl Session {
    pub fn new(token: Option<String>, role: Option<String>) -> Self {
        Self { token, role }
    }

    /// `document.cookie` 形式の文字列から組み立てる（値はエスケープされたまま）
    pub fn from_cookies(cookies: &str) -> Self {
        Self::from_cookies_with(cookies, str::to_string)
    }

    /// 各値を `decode` に通して組み立てる
    pub fn from_cookies_with(cookies: &str, decode: impl Fn(&str) -> String) -> Self {
        Self {
            token: cookie_value(cookies, TOKEN_COOKIE).map(|v| decode(&v)),
            role: cookie_value(cookies, ROLE_COOKIE).map(|v| decode(&v)),
        }
    }

    /// トークンCookieが存在するか（値の中身は問わない）
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    pub fn is_admin(&self) -> bool {
        self.role.as_deref() == Some(ADMIN_ROLE)
    }
}

impl SessionGate for Session {
    fn is_authorized(&self, capability: Capability) -> bool {
        match capability {
            Capability::ViewRecords | Capability::ManageUsers => self.is_authenticated(),
            Capability::RefreshCurrency => self.is_authenticated() && self.is_admin(),
        }
    }
}

/// Cookie文字列から値を取り出す
///
/// 値はエスケープされたまま返す。デコードは書き込み側と対になる処理で行う。
pub fn cookie_value(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| k.trim() == name)
        .map(|(_, v)| v.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_value() {
        let cookies = "theme=dark; token=abc%7C123; role=admin";
        assert_eq!(cookie_value(cookies, "token"), Some("abc%7C123".to_string()));
        assert_eq!(cookie_value(cookies, "role"), Some("admin".to_string()));
        assert_eq!(cookie_value(cookies, "missing"), None);
        assert_eq!(cookie_value("", "token"), None);
    }

    #[test]
    fn test_cookie_value_is_not_decoded() {
        assert_eq!(cookie_value("token=50%", "token"), Some("50%".to_string()));
        assert_eq!(cookie_value("token=%zz", "token"), Some("%zz".to_string()));
        // `%+1` は16進数ではない
        assert_eq!(cookie_value("token=a%+1b", "token"), Some("a%+1b".to_string()));
    }

    #[test]
    fn test_session_from_cookies_with_decoder() {
        let session = Session::from_cookies_with("token=abc%3D123; role=admin", |v| {
            v.replace("%3D", "=")
        });
        assert_eq!(session.token.as_deref(), Some("abc=123"));
        assert!(session.is_admin());

        let raw = Session::from_cookies("token=abc%3D123");
        assert_eq!(raw.token.as_deref(), Some("abc%3D123"));
    }

    #[test]
    fn test_session_from_cookies() {
        let session = Session::from_cookies("token=t1; role=user");
        assert!(session.is_authenticated());
        assert!(!session.is_admin());
        assert!(session.is_authorized(Capability::ManageUsers));
        assert!(!session.is_authorized(Capability::RefreshCurrency));
    }

    #[test]
    fn test_admin_can_refresh() {
        let session = Session::new(Some("t".into()), Some("admin".into()));
        assert!(session.is_authorized(Capability::RefreshCurrency));
    }

    #[test]
    fn test_anonymous_session() {
        let session = Session::default();
        assert!(!session.is_authorized(Capability::ViewRecords));
        // role だけあってもトークンがなければ不可
        let session = Session::new(None, Some("admin".into()));
        assert!(!session.is_authorized(Capability::RefreshCurrency));
    }
}
