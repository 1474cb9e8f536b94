use crate::config::ClientConfig;
use crate::domain::model::DatabaseType;
use crate::utils::error::{ClientError, Result};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::OnceLock;

/// TOML 設定檔格式：
///
/// ```toml
/// [client]
/// base_url = "http://localhost:8000"
/// db_type = "duckdb"
/// timeout_seconds = 10
///
/// [cache]
/// stale_time_seconds = 30
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    pub client: Option<ClientSection>,
    pub cache: Option<CacheSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ClientSection {
    pub base_url: Option<String>,
    pub db_type: Option<DatabaseType>,
    pub timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheSection {
    pub stale_time_seconds: Option<u64>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ClientError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${ASM3_BASE_URL})；引用未設定的變數視為缺少設定
    fn substitute_env_vars(content: &str) -> Result<String> {
        static ENV_VAR: OnceLock<Regex> = OnceLock::new();
        let re = ENV_VAR.get_or_init(|| {
            Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}").expect("static regex is valid")
        });

        if let Some(missing) = re
            .captures_iter(content)
            .map(|caps| caps[1].to_string())
            .find(|name| std::env::var(name).is_err())
        {
            return Err(ClientError::MissingConfigError { field: missing });
        }

        Ok(re
            .replace_all(content, |caps: &regex::Captures| {
                std::env::var(&caps[1]).unwrap_or_default()
            })
            .into_owned())
    }

    /// 將檔案中有設定的欄位覆蓋到 base
    pub fn apply_to(&self, mut base: ClientConfig) -> ClientConfig {
        if let Some(client) = &self.client {
            if let Some(base_url) = &client.base_url {
                base.base_url = base_url.clone();
            }
            if let Some(db_type) = client.db_type {
                base.db_type = db_type;
            }
            if let Some(timeout) = client.timeout_seconds {
                base.timeout_seconds = timeout;
            }
        }
        if let Some(stale) = self.cache.as_ref().and_then(|c| c.stale_time_seconds) {
            base.stale_time_seconds = stale;
        }
        base
    }
}
