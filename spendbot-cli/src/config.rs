use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

const DEFAULT_CONFIG: &str = r#"
[currency]
# Currency expenses are recorded in when a user has no preference
default = "SGD"

[users]
# Preferred currency per chat user id
# 42 = "USD"

[rates]
base_url = "https://api.frankfurter.app"
timeout_secs = 10
cache_ttl_secs = 3600
enabled = true

[categories]
names = ["Food - Grocery", "Food - Dining Out", "Transport", "Travel & Vacation"]
"#;

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct AppConfig {
    pub currency: Option<CurrencyConfig>,
    pub users: Option<HashMap<String, String>>,
    pub rates: Option<RatesConfig>,
    pub categories: Option<CategoriesConfig>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct CurrencyConfig {
    pub default: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RatesConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_cache_ttl_secs")]
    pub cache_ttl_secs: i64,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            cache_ttl_secs: default_cache_ttl_secs(),
            enabled: default_enabled(),
        }
    }
}

fn default_base_url() -> String {
    "https://api.frankfurter.app".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_cache_ttl_secs() -> i64 {
    3600
}

fn default_enabled() -> bool {
    true
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CategoriesConfig {
    #[serde(default)]
    pub names: Vec<String>,
}

impl AppConfig {
    /// Load the config at `path`, or at the per-user default location, writing a
    /// commented default file first when none exists.
    ///
    /// `SPENDBOT__<SECTION>__<KEY>` environment variables override file values.
    pub fn load(path: Option<&Path>) -> Result<(Self, PathBuf), ConfigError> {
        let config_path = path.map(Path::to_path_buf).unwrap_or_else(get_config_path);

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                ConfigError::Message(format!("Failed to create config directory: {e}"))
            })?;
        }

        if !config_path.exists() {
            std::fs::write(&config_path, DEFAULT_CONFIG).map_err(|e| {
                ConfigError::Message(format!("Failed to write default config: {e}"))
            })?;
        }

        let builder = Config::builder()
            .add_source(File::from(config_path.clone()))
            .add_source(Environment::with_prefix("SPENDBOT").separator("__"))
            .build()?;

        let config: AppConfig = builder.try_deserialize()?;

        Ok((config, config_path))
    }

    pub fn default_currency(&self) -> Option<&str> {
        self.currency.as_ref()?.default.as_deref()
    }

    pub fn rates(&self) -> RatesConfig {
        self.rates.clone().unwrap_or_default()
    }

    pub fn category_names(&self) -> Vec<String> {
        self.categories
            .as_ref()
            .map(|c| c.names.clone())
            .unwrap_or_default()
    }
}

pub fn get_config_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        config_dir.join("spendbot").join("config.toml")
    } else {
        PathBuf::from("config.toml")
    }
}
