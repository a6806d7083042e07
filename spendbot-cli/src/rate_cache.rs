use chrono::{DateTime, Duration, NaiveDate, Utc};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedRate {
    pub rate: Decimal,
    pub rate_date: NaiveDate,
    pub expires_at: DateTime<Utc>,
}

/// Exchange rates keyed by `(from, to)`, kept for a fixed time to live.
#[derive(Clone)]
pub struct RateCache {
    rates: Arc<Mutex<HashMap<(String, String), CachedRate>>>,
    ttl: Duration,
}

impl RateCache {
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            rates: Arc::new(Mutex::new(HashMap::new())),
            ttl: Duration::seconds(ttl_seconds),
        }
    }

    pub async fn store_rate(&self, from: &str, to: &str, rate: Decimal, rate_date: NaiveDate) {
        if self.ttl <= Duration::zero() {
            return;
        }
        let cached = CachedRate {
            rate,
            rate_date,
            expires_at: Utc::now() + self.ttl,
        };

        let mut rates = self.rates.lock().await;
        rates.insert((from.to_string(), to.to_string()), cached);
    }

    pub async fn get_rate(&self, from: &str, to: &str) -> Option<(Decimal, NaiveDate)> {
        let rates = self.rates.lock().await;
        let cached = rates.get(&(from.to_string(), to.to_string()))?;
        if Utc::now() < cached.expires_at {
            return Some((cached.rate, cached.rate_date));
        }
        None
    }
}
