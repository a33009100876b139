use crate::error::{Result, SearchCliError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// セッションCookieを上書きする環境変数
pub const SESSION_ENV: &str = "XIAOYU_SESSION";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub base_url: String,
    /// `Cookie` ヘッダにそのまま載せる値（例: `session=...`）
    pub session_cookie: Option<String>,
    pub search_timeout_secs: u64,
    pub save_timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:5000".into(),
            session_cookie: None,
            search_timeout_secs: xiaoyu_common::SEARCH_TIMEOUT.as_secs(),
            save_timeout_secs: xiaoyu_common::SAVE_TIMEOUT.as_secs(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = serde_json::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| SearchCliError::Config("找不到用户主目录".into()))?;
        Ok(home.join(".config").join("xiaoyu").join("config.json"))
    }

    /// 末尾の `/` を除いたベースURL
    pub fn base_url(&self) -> &str {
        self.base_url.trim_end_matches('/')
    }

    pub fn session_cookie(&self) -> Option<String> {
        // 環境変数を優先
        if let Ok(cookie) = std::env::var(SESSION_ENV) {
            if !cookie.trim().is_empty() {
                return Some(cookie);
            }
        }
        self.session_cookie.clone()
    }

    pub fn search_timeout(&self) -> Duration {
        Duration::from_secs(self.search_timeout_secs)
    }

    pub fn save_timeout(&self) -> Duration {
        Duration::from_secs(self.save_timeout_secs)
    }

    pub fn set_base_url(&mut self, url: String) -> Result<()> {
        let url = url.trim().to_string();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(SearchCliError::Config(format!("无效的地址: {}", url)));
        }
        self.base_url = url;
        Ok(())
    }

    pub fn set_session(&mut self, cookie: String) {
        let cookie = cookie.trim().to_string();
        self.session_cookie = if cookie.is_empty() { None } else { Some(cookie) };
    }
}
