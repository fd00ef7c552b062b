#[cfg(feature = "cli")]
pub mod cli;
pub mod toml_config;

use crate::core::context::MAX_RECAP_WINDOW;
use crate::core::{barcode::DEFAULT_VISION_MODEL, generator::DEFAULT_TEXT_MODEL};
use crate::utils::error::Result;
use crate::utils::validation::{
    validate_credential, validate_non_empty_string, validate_positive_number, validate_range,
    validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const DEFAULT_CATALOG_URL: &str = "https://gateway.marvel.com/v1/public";
pub const DEFAULT_OLLAMA_HOST: &str = "http://localhost:11434";
pub const DEFAULT_BIND: &str = "127.0.0.1:5000";

/// Process-wide settings, built once at startup and passed down by reference.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub llm: LlmConfig,
    #[serde(default)]
    pub recap: RecapConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    pub base_url: String,
    pub public_key: String,
    pub private_key: String,
    pub timeout_seconds: u64,
    pub series_limit: u32,
    pub no_variants: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CATALOG_URL.to_string(),
            public_key: String::new(),
            private_key: String::new(),
            timeout_seconds: 30,
            series_limit: 100,
            no_variants: true,
        }
    }
}

impl fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("base_url", &self.base_url)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("timeout_seconds", &self.timeout_seconds)
            .field("series_limit", &self.series_limit)
            .field("no_variants", &self.no_variants)
            .finish()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    pub host: String,
    pub model: String,
    pub vision_model: String,
    pub timeout_seconds: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_OLLAMA_HOST.to_string(),
            model: DEFAULT_TEXT_MODEL.to_string(),
            vision_model: DEFAULT_VISION_MODEL.to_string(),
            timeout_seconds: 300,
        }
    }
}

impl LlmConfig {
    /// Host with a scheme. `OLLAMA_LOCAL_HOST` is often given as `host:port`.
    pub fn endpoint(&self) -> String {
        let host = self.host.trim().trim_end_matches('/');
        if host.starts_with("http://") || host.starts_with("https://") {
            host.to_string()
        } else {
            format!("http://{}", host)
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RecapConfig {
    pub window: usize,
}

impl Default for RecapConfig {
    fn default() -> Self {
        Self {
            window: MAX_RECAP_WINDOW,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub log_json: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.to_string(),
            log_json: false,
        }
    }
}

impl Validate for AppConfig {
    fn validate(&self) -> Result<()> {
        validate_url("catalog.base_url", &self.catalog.base_url)?;
        validate_credential("catalog.public_key", &self.catalog.public_key)?;
        validate_credential("catalog.private_key", &self.catalog.private_key)?;
        validate_positive_number("catalog.timeout_seconds", self.catalog.timeout_seconds, 1)?;
        validate_range("catalog.series_limit", self.catalog.series_limit, 1, 100)?;

        validate_url("llm.host", &self.llm.endpoint())?;
        validate_non_empty_string("llm.model", &self.llm.model)?;
        validate_non_empty_string("llm.vision_model", &self.llm.vision_model)?;
        validate_positive_number("llm.timeout_seconds", self.llm.timeout_seconds, 1)?;

        validate_range("recap.window", self.recap.window, 1, MAX_RECAP_WINDOW)?;
        validate_non_empty_string("server.bind", &self.server.bind)?;
        Ok(())
    }
}
