pub mod config;
pub mod preferences;
pub mod rate_cache;
pub mod rates;

pub use config::AppConfig;
pub use preferences::ConfigPreferences;
pub use rates::HttpRateConverter;
