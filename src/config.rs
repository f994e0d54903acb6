use crate::error::{DashboardError, Result};
use admin_dashboard_common::api::DEFAULT_BASE_URL;
use admin_dashboard_common::{Session, PAGE_SIZES};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    pub token: Option<String>,
    pub role: Option<String>,
    pub page_size: usize,
    pub timeout_seconds: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            token: None,
            role: None,
            page_size: PAGE_SIZES[0],
            timeout_seconds: 30,
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| DashboardError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("admin-dashboard").join("config.json"))
    }

    /// APIのベースURL（環境変数を優先）
    pub fn base_url(&self) -> String {
        std::env::var("DASHBOARD_BASE_URL").unwrap_or_else(|_| self.base_url.clone())
    }

    /// 現在のセッション（環境変数を優先）
    pub fn session(&self) -> Session {
        let token = std::env::var("DASHBOARD_TOKEN").ok().or_else(|| self.token.clone());
        let role = std::env::var("DASHBOARD_ROLE").ok().or_else(|| self.role.clone());
        Session::new(token, role)
    }

    pub fn set_session(&mut self, token: String, role: Option<String>) {
        self.token = Some(token);
        self.role = role;
    }

    pub fn clear_session(&mut self) {
        self.token = None;
        self.role = None;
    }

    pub fn set_page_size(&mut self, size: usize) -> Result<()> {
        if !PAGE_SIZES.contains(&size) {
            return Err(DashboardError::Config(format!(
                "ページサイズは {:?} のいずれかを指定してください",
                PAGE_SIZES
            )));
        }
        self.page_size = size;
        Ok(())
    }
}
