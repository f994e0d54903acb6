//! tracing-subscriber の初期化
//!
//! ログは標準エラーへ出力し、テーブル出力（標準出力）と混ざらないようにする。

use tracing_subscriber::EnvFilter;

const VERBOSE_FILTER: &str = "admin_dashboard_rust=debug,admin_dashboard_common=debug";
const DEFAULT_FILTER: &str = "warn";

/// `RUST_LOG` があればそれを使い、なければ `--verbose` で切り替える
pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER })
    });

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
