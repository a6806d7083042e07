use async_trait::async_trait;
use extractors::CurrencyPreferences;
use shared_types::ConversionError;
use std::collections::HashMap;

use crate::config::AppConfig;

/// Preferred currencies read from the `[users]` config table.
///
/// Users without an entry get `[currency].default`; without that the lookup fails.
pub struct ConfigPreferences {
    users: HashMap<String, String>,
    fallback: Option<String>,
}

impl ConfigPreferences {
    pub fn new(users: HashMap<String, String>, fallback: Option<String>) -> Self {
        Self { users, fallback }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.users.clone().unwrap_or_default(),
            config.default_currency().map(str::to_string),
        )
    }
}

#[async_trait]
impl CurrencyPreferences for ConfigPreferences {
    async fn default_currency(&self, user_id: i64) -> Result<String, ConversionError> {
        self.users
            .get(&user_id.to_string())
            .or(self.fallback.as_ref())
            .cloned()
            .ok_or_else(|| {
                ConversionError::PreferenceLookup(format!("no currency preference for user {}", user_id))
            })
    }
}
