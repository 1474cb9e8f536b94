#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::domain::model::DatabaseType;
use crate::domain::ports::ConfigProvider;
use crate::utils::error::Result;
use crate::utils::validation::{validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 30;
pub const DEFAULT_STALE_TIME_SECONDS: u64 = 60;

/// 最終生效的用戶端設定（預設值 → TOML → CLI 依序覆蓋）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    pub db_type: DatabaseType,
    pub timeout_seconds: u64,
    pub stale_time_seconds: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            db_type: DatabaseType::default(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
            stale_time_seconds: DEFAULT_STALE_TIME_SECONDS,
        }
    }
}

impl Validate for ClientConfig {
    fn validate(&self) -> Result<()> {
        validate_url("client.base_url", &self.base_url)?;
        validate_range("client.timeout_seconds", self.timeout_seconds, 1, 600)?;
        validate_range("cache.stale_time_seconds", self.stale_time_seconds, 0, 86_400)?;
        Ok(())
    }
}

impl ConfigProvider for ClientConfig {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    fn db_type(&self) -> DatabaseType {
        self.db_type
    }

    fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }

    fn stale_time(&self) -> Duration {
        Duration::from_secs(self.stale_time_seconds)
    }
}
