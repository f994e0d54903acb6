//! 画面ルーティング表
//!
//! トークンCookieの有無だけで遷移先を決める静的な表。

use crate::session::Session;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    Currency,
    UserList,
    Profile,
    Login,
    Register,
    NotFound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    /// ログイン必須
    Protected,
    /// 未ログイン専用（ログイン済みならトップへ）
    Public,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// ナビゲーション付き
    Default,
    /// 認証画面・404用
    Blank,
}

#[derive(Debug, Clone, Copy)]
pub struct RouteEntry {
    pub path: &'static str,
    pub page: Page,
    pub access: Access,
    pub layout: Layout,
    pub title: &'static str,
}

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/auth/login";

pub const ROUTES: &[RouteEntry] = &[
    RouteEntry {
        path: "/",
        page: Page::Currency,
        access: Access::Protected,
        layout: Layout::Default,
        title: "Currency Table",
    },
    RouteEntry {
        path: "/users/list",
        page: Page::UserList,
        access: Access::Protected,
        layout: Layout::Default,
        title: "List",
    },
    RouteEntry {
        path: "/users/profile",
        page: Page::Profile,
        access: Access::Protected,
        layout: Layout::Default,
        title: "Account Setting",
    },
    RouteEntry {
        path: "/auth/login",
        page: Page::Login,
        access: Access::Public,
        layout: Layout::Blank,
        title: "Login",
    },
    RouteEntry {
        path: "/auth/register",
        page: Page::Register,
        access: Access::Public,
        layout: Layout::Blank,
        title: "Register",
    },
];

static NOT_FOUND: RouteEntry = RouteEntry {
    path: "*",
    page: Page::NotFound,
    access: Access::Open,
    layout: Layout::Blank,
    title: "Error 404",
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    Render { page: Page, layout: Layout },
    Redirect(&'static str),
}

/// パスに対応するルート（未登録なら404）
pub fn lookup(path: &str) -> &'static RouteEntry {
    let path = normalize(path);
    ROUTES
        .iter()
        .find(|r| r.path == path)
        .unwrap_or(&NOT_FOUND)
}

pub fn resolve(path: &str, session: &Session) -> Resolution {
    let route = lookup(path);
    match (route.access, session.is_authenticated()) {
        (Access::Protected, false) => Resolution::Redirect(LOGIN_PATH),
        (Access::Public, true) => Resolution::Redirect(HOME_PATH),
        _ => Resolution::Render {
            page: route.page,
            layout: route.layout,
        },
    }
}

/// クエリ・フラグメントと末尾の `/` を除く
fn normalize(path: &str) -> &str {
    let path = path.split(['?', '#']).next().unwrap_or("");
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() {
        "/"
    } else {
        trimmed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn logged_in() -> Session {
        Session::new(Some("t".to_string()), None)
    }

    #[test]
    fn test_protected_redirects_to_login() {
        assert_eq!(
            resolve("/users/list", &Session::default()),
            Resolution::Redirect(LOGIN_PATH)
        );
        assert_eq!(resolve("/", &Session::default()), Resolution::Redirect(LOGIN_PATH));
    }

    #[test]
    fn test_public_redirects_home_when_logged_in() {
        assert_eq!(resolve("/auth/login", &logged_in()), Resolution::Redirect(HOME_PATH));
        assert_eq!(
            resolve("/auth/register", &Session::default()),
            Resolution::Render {
                page: Page::Register,
                layout: Layout::Blank
            }
        );
    }

    #[test]
    fn test_render_protected_with_session() {
        assert_eq!(
            resolve("/users/profile/", &logged_in()),
            Resolution::Render {
                page: Page::Profile,
                layout: Layout::Default
            }
        );
        assert_eq!(
            resolve("/?tab=1", &logged_in()),
            Resolution::Render {
                page: Page::Currency,
                layout: Layout::Default
            }
        );
    }

    #[test]
    fn test_unknown_path_is_not_found_for_everyone() {
        for session in [Session::default(), logged_in()] {
            assert_eq!(
                resolve("/nope", &session),
                Resolution::Render {
                    page: Page::NotFound,
                    layout: Layout::Blank
                }
            );
        }
        assert_eq!(lookup("/nope").title, "Error 404");
    }
}
