use crate::utils::error::{GatewayError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_positive_number, validate_range, validate_url, Validate,
};
use axum::http::HeaderValue;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::ops::Range;
use std::path::Path;

/// Full service configuration. Every section and key has a default, so an
/// empty file (or no file) yields a runnable setup.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub server: ServerConfig,
    pub provider: ProviderConfig,
    pub seasons: SeasonsConfig,
    pub cache: CacheConfig,
    pub logging: LoggingConfig,
}

/// How gateway errors become HTTP statuses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusMapping {
    /// Every failure is a 500 carrying the error message.
    #[default]
    Uniform,
    /// 400 / 404 / 502 / 504 by error kind.
    Typed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub cors_origins: Vec<String>,
    pub status_mapping: StatusMapping,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            // 前端 React 開發伺服器
            cors_origins: vec!["http://localhost:3000".to_string()],
            status_mapping: StatusMapping::Uniform,
        }
    }
}

impl ServerConfig {
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub base_url: String,
    pub request_timeout_seconds: u64,
    pub page_size: u32,
    pub user_agent: String,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.jolpi.ca/ergast/f1".to_string(),
            request_timeout_seconds: 30,
            page_size: 100,
            user_agent: format!("f1-lap-gateway/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

/// Supported seasons, `first_year` inclusive and `end_year` exclusive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SeasonsConfig {
    pub first_year: i32,
    pub end_year: i32,
}

impl Default for SeasonsConfig {
    fn default() -> Self {
        Self {
            first_year: 2018,
            end_year: 2024,
        }
    }
}

impl SeasonsConfig {
    pub fn range(&self) -> Range<i32> {
        self.first_year..self.end_year
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub enabled: bool,
    pub ttl_seconds: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            ttl_seconds: 600,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl GatewayConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    /// Loads `path` when it exists, otherwise falls back to defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| GatewayError::Config {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${JOLPICA_URL}); unknown variables are left untouched.
    fn substitute_env_vars(content: &str) -> Result<String> {
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| GatewayError::Config {
            message: format!("invalid substitution pattern: {}", e),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }
}

impl Validate for GatewayConfig {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("server.host", &self.server.host)?;
        validate_positive_number("server.port", u64::from(self.server.port), 1)?;
        for origin in &self.server.cors_origins {
            HeaderValue::from_str(origin).map_err(|e| GatewayError::InvalidConfigValue {
                field: "server.cors_origins".to_string(),
                value: origin.clone(),
                reason: e.to_string(),
            })?;
        }

        validate_url("provider.base_url", &self.provider.base_url)?;
        validate_positive_number(
            "provider.request_timeout_seconds",
            self.provider.request_timeout_seconds,
            1,
        )?;
        validate_range("provider.page_size", self.provider.page_size, 1, 1000)?;
        validate_non_empty_string("provider.user_agent", &self.provider.user_agent)?;

        validate_range("seasons.first_year", self.seasons.first_year, 1950, i32::MAX)?;
        if self.seasons.first_year >= self.seasons.end_year {
            return Err(GatewayError::InvalidConfigValue {
                field: "seasons.end_year".to_string(),
                value: self.seasons.end_year.to_string(),
                reason: format!(
                    "must be greater than seasons.first_year ({})",
                    self.seasons.first_year
                ),
            });
        }

        if self.cache.enabled {
            validate_positive_number("cache.ttl_seconds", self.cache.ttl_seconds, 1)?;
        }

        Ok(())
    }
}
