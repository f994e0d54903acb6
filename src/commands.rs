//! サブコマンドの実処理
//!
//! 一覧系はすべて `TabularViewModel` を通して表示する。
//! 変更系もビューモデル経由で行い、成功後の再読み込み結果を件数として表示する。

use crate::browse::run_browse;
use crate::cli::ViewArgs;
use crate::client::ApiClient;
use crate::config::Config;
use crate::error::{DashboardError, Result};
use crate::render::{render_table, CURRENCY_COLUMNS, USER_COLUMNS};
use admin_dashboard_common::{
    Capability, Currency, LoadOutcome, NewUser, ProfileUpdate, Record, Session, SessionGate,
    TabularViewModel, User, UserUpdate, PAGE_SIZES,
};
use dialoguer::{Confirm, Password};
use indicatif::{ProgressBar, ProgressStyle};
use std::future::Future;
use std::time::Duration;

/// 表示オプションを反映する
///
/// ソートとページサイズの変更はページを1に戻すため、ページ指定は最後に行う。
pub fn apply_view_args<R: Record>(
    vm: &mut TabularViewModel<R>,
    args: &ViewArgs,
    default_page_size: usize,
) -> Result<()> {
    if let Some(term) = &args.search {
        vm.set_search_term(term.as_str());
    }
    if let Some(key) = &args.sort {
        vm.set_sort(key, args.direction())?;
    } else if args.desc {
        let key = vm.state().sort_key.clone();
        vm.set_sort(&key, args.direction())?;
    }

    match args.page_size {
        Some(size) => vm.set_page_size(size)?,
        None if PAGE_SIZES.contains(&default_page_size) => vm.set_page_size(default_page_size)?,
        None => tracing::warn!(default_page_size, "ignoring invalid page size in config"),
    }

    if let Some(page) = args.page {
        vm.set_page_index(page)?;
    }
    Ok(())
}

/// ログイン済みで、かつ操作が許可されているセッションを返す
pub fn require(session: Session, capability: Capability) -> Result<Session> {
    if !session.is_authenticated() {
        return Err(DashboardError::NotLoggedIn);
    }
    if !session.is_authorized(capability) {
        return Err(DashboardError::Forbidden(describe(capability).to_string()));
    }
    Ok(session)
}

fn describe(capability: Capability) -> &'static str {
    match capability {
        Capability::ViewRecords => "一覧の閲覧",
        Capability::ManageUsers => "ユーザー管理",
        Capability::RefreshCurrency => "為替レートの再取得（管理者のみ）",
    }
}

fn spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

async fn with_spinner<T, F>(message: &str, fut: F) -> T
where
    F: Future<Output = T>,
{
    let pb = spinner(message);
    let out = fut.await;
    pb.finish_and_clear();
    out
}

fn report(outcome: LoadOutcome) {
    if let LoadOutcome::Applied { count } = outcome {
        tracing::info!(count, "records loaded");
    }
}

// --- 為替レート ---

pub async fn currency(config: &Config, view: &ViewArgs, refresh: bool, browse: bool) -> Result<()> {
    let session = require(config.session(), Capability::ViewRecords)?;
    let can_refresh = session.is_authorized(Capability::RefreshCurrency);
    if refresh && !can_refresh {
        return Err(DashboardError::Forbidden(
            describe(Capability::RefreshCurrency).to_string(),
        ));
    }

    let client = ApiClient::from_config(config)?;
    let mut vm: TabularViewModel<Currency> = TabularViewModel::new();

    let outcome = if refresh {
        with_spinner("為替レートを再取得中...", vm.refresh(&client)).await?
    } else {
        with_spinner("為替レートを取得中...", vm.load(&client)).await?
    };
    report(outcome);
    if refresh {
        println!("✔ 為替レートを更新しました");
    }

    apply_view_args(&mut vm, view, config.page_size)?;

    if browse {
        run_browse(&mut vm, &client, CURRENCY_COLUMNS, can_refresh).await
    } else {
        print!("{}", render_table(&vm, CURRENCY_COLUMNS));
        Ok(())
    }
}

// --- ユーザー ---

async fn user_view(client: &ApiClient) -> Result<TabularViewModel<User>> {
    let mut vm = TabularViewModel::new();
    let outcome = with_spinner("ユーザー一覧を取得中...", vm.load(client)).await?;
    report(outcome);
    Ok(vm)
}

pub async fn users_list(config: &Config, view: &ViewArgs, browse: bool) -> Result<()> {
    require(config.session(), Capability::ViewRecords)?;
    let client = ApiClient::from_config(config)?;
    let mut vm = user_view(&client).await?;
    apply_view_args(&mut vm, view, config.page_size)?;

    if browse {
        run_browse(&mut vm, &client, USER_COLUMNS, false).await
    } else {
        print!("{}", render_table(&vm, USER_COLUMNS));
        Ok(())
    }
}

pub async fn users_show(config: &Config, id: u64) -> Result<()> {
    require(config.session(), Capability::ViewRecords)?;
    let client = ApiClient::from_config(config)?;
    let user = client.get_user(id).await?;

    println!("ユーザー:");
    println!("  ID: {}", user.id);
    println!("  名前: {}", user.name);
    println!("  メール: {}", user.email);
    Ok(())
}

pub async fn users_create(config: &Config, name: String, email: String) -> Result<()> {
    require(config.session(), Capability::ManageUsers)?;
    let client = ApiClient::from_config(config)?;

    let password = Password::new()
        .with_prompt("パスワード")
        .with_confirmation("パスワード（確認）", "パスワードが一致しません")
        .interact()?;

    let draft = NewUser {
        email,
        name,
        password_confirmation: password.clone(),
        password,
    };

    let mut vm: TabularViewModel<User> = TabularViewModel::new();
    let outcome = with_spinner("ユーザーを作成中...", vm.create(&client, &draft)).await?;
    report(outcome);
    println!("✔ ユーザーを作成しました: {} <{}>", draft.name, draft.email);
    println!("  登録ユーザー数: {}", vm.records().len());
    Ok(())
}

pub async fn users_update(
    config: &Config,
    id: u64,
    name: Option<String>,
    email: Option<String>,
) -> Result<()> {
    require(config.session(), Capability::ManageUsers)?;
    let client = ApiClient::from_config(config)?;

    let mut vm = user_view(&client).await?;
    let current = vm.find(&id).ok_or(DashboardError::UserNotFound(id))?;

    let mut patch = UserUpdate::from(current);
    if let Some(name) = name {
        patch.name = name;
    }
    if let Some(email) = email {
        patch.email = email;
    }

    let outcome = with_spinner("ユーザーを更新中...", vm.update(&client, &id, &patch)).await?;
    report(outcome);
    println!("✔ ユーザーを更新しました: {} <{}>", patch.name, patch.email);
    Ok(())
}

pub async fn users_delete(config: &Config, id: u64, yes: bool) -> Result<()> {
    require(config.session(), Capability::ManageUsers)?;
    let client = ApiClient::from_config(config)?;

    let mut vm = user_view(&client).await?;
    let target = vm.find(&id).ok_or(DashboardError::UserNotFound(id))?;
    let label = format!("{} <{}>", target.name, target.email);

    if !yes {
        let confirmed = Confirm::new()
            .with_prompt(format!("{} を削除しますか?", label))
            .default(false)
            .interact()?;
        if !confirmed {
            println!("キャンセルしました");
            return Ok(());
        }
    }

    let outcome = with_spinner("ユーザーを削除中...", vm.delete(&client, &id)).await?;
    report(outcome);
    println!("✔ ユーザーを削除しました: {}", label);
    Ok(())
}

// --- プロフィール ---

pub async fn profile_show(config: &Config) -> Result<()> {
    let session = require(config.session(), Capability::ViewRecords)?;
    let client = ApiClient::from_config(config)?;
    let profile = client.profile().await?;

    println!("プロフィール:");
    if let Some(id) = profile.id {
        println!("  ID: {}", id);
    }
    println!("  名前: {}", profile.name);
    println!("  メール: {}", profile.email);
    println!("  ロール: {}", session.role.as_deref().unwrap_or("-"));
    Ok(())
}

pub async fn profile_update(
    config: &Config,
    name: Option<String>,
    email: Option<String>,
    change_password: bool,
) -> Result<()> {
    require(config.session(), Capability::ViewRecords)?;
    let client = ApiClient::from_config(config)?;
    let current = client.profile().await?;

    let password = if change_password {
        Some(
            Password::new()
                .with_prompt("新しいパスワード")
                .with_confirmation("新しいパスワード（確認）", "パスワードが一致しません")
                .interact()?,
        )
    } else {
        None
    };

    let update = ProfileUpdate {
        email: email.unwrap_or(current.email),
        name: name.unwrap_or(current.name),
        password_confirmation: password.clone(),
        password,
    };

    with_spinner("プロフィールを更新中...", client.update_profile(&update)).await?;
    println!("✔ プロフィールを更新しました");
    Ok(())
}

// --- セッション・設定 ---

pub fn login(mut config: Config, token: String, role: Option<String>) -> Result<()> {
    if token.trim().is_empty() {
        return Err(DashboardError::Config("トークンが空です".into()));
    }
    config.set_session(token, role);
    config.save()?;
    let session = config.session();
    println!(
        "✔ トークンを保存しました（ロール: {}）",
        session.role.as_deref().unwrap_or("-")
    );
    Ok(())
}

pub fn logout(mut config: Config) -> Result<()> {
    config.clear_session();
    config.save()?;
    println!("✔ ログアウトしました");
    Ok(())
}

pub fn configure(
    mut config: Config,
    base_url: Option<String>,
    page_size: Option<usize>,
    show: bool,
) -> Result<()> {
    let changed = base_url.is_some() || page_size.is_some();

    if let Some(url) = base_url {
        config.base_url = url;
        println!("✔ ベースURLを設定しました");
    }
    if let Some(size) = page_size {
        config.set_page_size(size)?;
        println!("✔ ページサイズを設定しました");
    }
    if changed {
        config.save()?;
    }

    if show || !changed {
        println!("設定:");
        println!("  ベースURL: {}", config.base_url());
        println!("  ページサイズ: {}", config.page_size);
        println!("  タイムアウト: {}秒", config.timeout_seconds);
        let session = config.session();
        println!(
            "  トークン: {}",
            if session.is_authenticated() { "設定済み" } else { "未設定" }
        );
        println!("  ロール: {}", session.role.as_deref().unwrap_or("-"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vm(n: u64) -> TabularViewModel<User> {
        let mut vm = TabularViewModel::new();
        let records = (1..=n)
            .map(|id| User {
                id,
                name: format!("name{:02}", id),
                email: format!("u{}@example.com", id),
            })
            .collect();
        let ticket = vm.begin_load();
        vm.finish_load(ticket, Ok(records)).unwrap();
        vm
    }

    #[test]
    fn test_apply_view_args_keeps_page_after_size() {
        let mut vm = vm(45);
        let args = ViewArgs {
            sort: Some("name".into()),
            desc: true,
            page_size: Some(20),
            page: Some(2),
            ..Default::default()
        };
        apply_view_args(&mut vm, &args, 10).unwrap();

        let state = vm.state();
        assert_eq!(state.page_size, 20);
        assert_eq!(state.page_index, 2);
        let first = vm.projection().rows[0].id;
        assert_eq!(first, 25);
    }

    #[test]
    fn test_apply_view_args_desc_uses_current_key() {
        let mut vm = vm(3);
        let args = ViewArgs {
            desc: true,
            ..Default::default()
        };
        apply_view_args(&mut vm, &args, 10).unwrap();
        let ids: Vec<u64> = vm.projection().rows.iter().map(|u| u.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn test_apply_view_args_uses_config_page_size() {
        let mut vm = vm(3);
        apply_view_args(&mut vm, &ViewArgs::default(), 50).unwrap();
        assert_eq!(vm.state().page_size, 50);

        // 設定値が不正なら既定のまま
        let mut vm2 = TabularViewModel::<User>::new();
        apply_view_args(&mut vm2, &ViewArgs::default(), 7).unwrap();
        assert_eq!(vm2.state().page_size, 10);
    }

    #[test]
    fn test_apply_view_args_rejects_unknown_sort() {
        let mut vm = vm(3);
        let args = ViewArgs {
            sort: Some("password".into()),
            ..Default::default()
        };
        let err = apply_view_args(&mut vm, &args, 10).unwrap_err();
        assert!(matches!(
            err,
            DashboardError::View(admin_dashboard_common::Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_require_session() {
        let none = Session::default();
        assert!(matches!(
            require(none, Capability::ViewRecords),
            Err(DashboardError::NotLoggedIn)
        ));

        let user = Session::new(Some("t".into()), Some("user".into()));
        assert!(require(user.clone(), Capability::ManageUsers).is_ok());
        assert!(matches!(
            require(user, Capability::RefreshCurrency),
            Err(DashboardError::Forbidden(_))
        ));

        let admin = Session::new(Some("t".into()), Some("admin".into()));
        assert!(require(admin, Capability::RefreshCurrency).is_ok());
    }
}
