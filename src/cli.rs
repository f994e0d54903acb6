use admin_dashboard_common::SortDirection;
use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "admin-dashboard")]
#[command(about = "通貨レート表・ユーザー管理ダッシュボード", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// テーブル表示の検索・ソート・ページ指定
#[derive(Args, Debug, Clone, Default)]
pub struct ViewArgs {
    /// 検索語（大文字小文字を区別しない部分一致）
    #[arg(short, long)]
    pub search: Option<String>,

    /// ソートする列
    #[arg(long)]
    pub sort: Option<String>,

    /// 降順でソート
    #[arg(long)]
    pub desc: bool,

    /// 1ページの件数 (10/20/30/50/100)
    #[arg(long)]
    pub page_size: Option<usize>,

    /// 表示するページ（1始まり）
    #[arg(short, long)]
    pub page: Option<usize>,
}

impl ViewArgs {
    pub fn direction(&self) -> SortDirection {
        if self.desc {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// 為替レート表を表示
    Currency {
        #[command(flatten)]
        view: ViewArgs,

        /// 表示前にバックエンドでレートを再取得（管理者のみ）
        #[arg(long)]
        refresh: bool,

        /// 対話モードで閲覧
        #[arg(long)]
        browse: bool,
    },

    /// ユーザー管理
    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    /// ログイン中アカウントのプロフィール
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },

    /// APIトークンを保存
    Login {
        /// Bearerトークン
        #[arg(long)]
        token: String,

        /// ロール（admin でレート再取得が可能）
        #[arg(long)]
        role: Option<String>,
    },

    /// 保存済みトークンを削除
    Logout,

    /// 設定管理
    Config {
        /// APIのベースURL
        #[arg(long)]
        base_url: Option<String>,

        /// 既定のページサイズ
        #[arg(long)]
        page_size: Option<usize>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// ユーザー一覧
    List {
        #[command(flatten)]
        view: ViewArgs,

        /// 対話モードで閲覧
        #[arg(long)]
        browse: bool,
    },

    /// ユーザー詳細
    Show { id: u64 },

    /// ユーザー作成（パスワードは対話入力）
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,
    },

    /// ユーザー更新（省略した項目は現在値のまま）
    Update {
        id: u64,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,
    },

    /// ユーザー削除
    Delete {
        id: u64,

        /// 確認をスキップ
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
pub enum ProfileAction {
    /// プロフィール表示
    Show,

    /// プロフィール更新
    Update {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        /// パスワードも変更する（対話入力）
        #[arg(long)]
        password: bool,
    },
}
