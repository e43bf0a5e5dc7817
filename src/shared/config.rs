//! Application configuration. Data paths, HTTP endpoints, recipe credentials.

use crate::adapters::persistence::DEFAULT_HISTORY_LIMIT;
use crate::adapters::recipes::SpoonacularAuth;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = "./data";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_OFF_BASE_URL: &str = "https://world.openfoodfacts.org/api/v2";
pub const DEFAULT_OFF_USER_AGENT: &str = "LentScanner/1.0";
pub const DEFAULT_SPOONACULAR_BASE_URL: &str = "https://api.spoonacular.com";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Directory for history.json. Read from LENT_SCANNER_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,

    /// Scans kept in history. Read from LENT_SCANNER_HISTORY_LIMIT.
    #[serde(default)]
    pub history_limit: Option<usize>,

    /// Timeout for every outbound HTTP request.
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,

    // ─────────────────────────────────────────────────────────────────────────
    // Open Food Facts
    // ─────────────────────────────────────────────────────────────────────────
    #[serde(default)]
    pub off_base_url: Option<String>,

    #[serde(default)]
    pub off_user_agent: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Spoonacular
    // ─────────────────────────────────────────────────────────────────────────
    /// Direct API key. Falls back to SPOONACULAR_API_KEY.
    #[serde(default)]
    pub spoonacular_api_key: Option<String>,

    #[serde(default)]
    pub spoonacular_base_url: Option<String>,

    /// Proxy that holds the key server-side. Falls back to SPOONACULAR_PROXY_URL.
    #[serde(default)]
    pub spoonacular_proxy_url: Option<String>,

    /// JSON file overriding the built-in keyword tables.
    #[serde(default)]
    pub keywords_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        if let Ok(path) = std::env::var("LENT_SCANNER_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c = c.add_source(config::Environment::with_prefix("LENT_SCANNER"));
        let mut cfg: Self = c.build()?.try_deserialize()?;
        // Unprefixed names are what the Spoonacular docs tell people to export.
        if cfg.spoonacular_api_key.is_none() {
            cfg.spoonacular_api_key = std::env::var("SPOONACULAR_API_KEY").ok();
        }
        if cfg.spoonacular_proxy_url.is_none() {
            cfg.spoonacular_proxy_url = std::env::var("SPOONACULAR_PROXY_URL").ok();
        }
        Ok(cfg)
    }

    pub fn data_dir_or_default(&self) -> PathBuf {
        PathBuf::from(self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR))
    }

    pub fn history_path(&self) -> PathBuf {
        self.data_dir_or_default().join("history.json")
    }

    /// Defaults to DEFAULT_HISTORY_LIMIT; zero is treated as unset.
    pub fn history_limit_or_default(&self) -> usize {
        self.history_limit
            .filter(|n| *n > 0)
            .unwrap_or(DEFAULT_HISTORY_LIMIT)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(
            self.request_timeout_secs
                .filter(|s| *s > 0)
                .unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS),
        )
    }

    pub fn off_base_url_or_default(&self) -> String {
        self.off_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_OFF_BASE_URL.to_string())
    }

    pub fn off_user_agent_or_default(&self) -> String {
        self.off_user_agent
            .clone()
            .unwrap_or_else(|| DEFAULT_OFF_USER_AGENT.to_string())
    }

    pub fn spoonacular_base_url_or_default(&self) -> String {
        self.spoonacular_base_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SPOONACULAR_BASE_URL.to_string())
    }

    /// Proxy wins over a direct key. None when neither is set.
    pub fn spoonacular_auth(&self) -> Option<SpoonacularAuth> {
        let non_empty = |s: &Option<String>| s.clone().filter(|v| !v.trim().is_empty());
        if let Some(proxy) = non_empty(&self.spoonacular_proxy_url) {
            return Some(SpoonacularAuth::Proxy(proxy));
        }
        non_empty(&self.spoonacular_api_key).map(SpoonacularAuth::ApiKey)
    }

    pub fn is_recipes_configured(&self) -> bool {
        self.spoonacular_auth().is_some()
    }

    pub fn keywords_path(&self) -> Option<PathBuf> {
        self.keywords_path.as_deref().map(PathBuf::from)
    }
}
