use async_trait::async_trait;
use chrono::NaiveDate;
use extractors::RateConverter;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use shared_types::{ConversionError, ConversionResult};
use std::collections::HashMap;
use std::time::Duration;

use crate::config::RatesConfig;
use crate::rate_cache::RateCache;

/// Body of `GET /latest?amount=1&from=..&to=..` on a Frankfurter-compatible rate service.
#[derive(Debug, Deserialize)]
struct LatestRatesResponse {
    date: NaiveDate,
    rates: HashMap<String, Decimal>,
}

/// Rate collaborator backed by an HTTP exchange rate service.
pub struct HttpRateConverter {
    client: reqwest::Client,
    base_url: String,
    cache: RateCache,
}

impl HttpRateConverter {
    pub fn new(config: &RatesConfig) -> Result<Self, ConversionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ConversionError::Http(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            cache: RateCache::new(config.cache_ttl_secs),
        })
    }

    async fn fetch_rate(&self, from: &str, to: &str) -> Result<(Decimal, NaiveDate), ConversionError> {
        if let Some(cached) = self.cache.get_rate(from, to).await {
            tracing::debug!(from, to, "using cached rate");
            return Ok(cached);
        }

        let url = format!("{}/latest", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&latest_query(from, to))
            .send()
            .await
            .map_err(|e| ConversionError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ConversionError::Http(format!("{} returned {}", url, status)));
        }

        let body = response
            .text()
            .await
            .map_err(|e| ConversionError::Http(e.to_string()))?;
        let (rate, rate_date) = parse_latest_response(&body, to)?;

        tracing::info!(from, to, %rate, %rate_date, "fetched exchange rate");
        self.cache.store_rate(from, to, rate, rate_date).await;
        Ok((rate, rate_date))
    }
}

#[async_trait]
impl RateConverter for HttpRateConverter {
    async fn convert(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
    ) -> Result<ConversionResult, ConversionError> {
        let (rate, rate_date) = self.fetch_rate(from, to).await?;
        Ok(conversion_at_rate(amount, rate, rate_date))
    }
}

/// Query string of a single-unit `/latest` rate lookup.
fn latest_query<'a>(from: &'a str, to: &'a str) -> [(&'static str, &'a str); 3] {
    [("amount", "1"), ("from", from), ("to", to)]
}

/// Read the `to` rate out of a rate service response body.
pub fn parse_latest_response(body: &str, to: &str) -> Result<(Decimal, NaiveDate), ConversionError> {
    let parsed: LatestRatesResponse =
        serde_json::from_str(body).map_err(|e| ConversionError::InvalidResponse(e.to_string()))?;

    let rate = parsed
        .rates
        .get(to)
        .copied()
        .ok_or_else(|| ConversionError::RateUnavailable(format!("no {} rate in response", to)))?;

    if rate <= Decimal::ZERO {
        return Err(ConversionError::InvalidResponse(format!(
            "non-positive {} rate {}",
            to, rate
        )));
    }

    Ok((rate, parsed.date))
}

/// Apply `rate` to `amount`, rounding to cents.
pub fn conversion_at_rate(amount: Decimal, rate: Decimal, rate_date: NaiveDate) -> ConversionResult {
    ConversionResult {
        amount: (amount * rate).round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        rate,
        rate_date,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_parse_latest_response() {
        let body = r#"{"amount":1.0,"base":"USD","date":"2026-02-14","rates":{"SGD":1.35}}"#;
        let (rate, date) = parse_latest_response(body, "SGD").unwrap();
        assert_eq!(rate, dec!(1.35));
        assert_eq!(date, NaiveDate::from_ymd_opt(2026, 2, 14).unwrap());
    }

    #[test]
    fn test_parse_latest_response_missing_rate() {
        let body = r#"{"date":"2026-02-14","rates":{"EUR":0.92}}"#;
        assert!(matches!(
            parse_latest_response(body, "SGD"),
            Err(ConversionError::RateUnavailable(_))
        ));
    }

    #[test]
    fn test_parse_latest_response_rejects_garbage() {
        assert!(matches!(
            parse_latest_response("<html>", "SGD"),
            Err(ConversionError::InvalidResponse(_))
        ));

        let body = r#"{"date":"2026-02-14","rates":{"SGD":0}}"#;
        assert!(matches!(
            parse_latest_response(body, "SGD"),
            Err(ConversionError::InvalidResponse(_))
        ));
    }

    #[test]
    fn test_latest_query_asks_for_one_unit() {
        let request = reqwest::Client::new()
            .get("http://rates.test/latest")
            .query(&latest_query("USD", "SGD"))
            .build()
            .unwrap();
        assert_eq!(request.url().query(), Some("amount=1&from=USD&to=SGD"));
    }

    #[test]
    fn test_conversion_at_rate() {
        let date = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();
        let result = conversion_at_rate(dec!(18), dec!(1.35), date);
        assert_eq!(result.amount, dec!(24.30));
        assert_eq!(result.rate, dec!(1.35));
        assert_eq!(result.rate_date, date);

        let result = conversion_at_rate(dec!(0.01), dec!(0.5), date);
        assert_eq!(result.amount, dec!(0.01));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_an_error() {
        let converter = HttpRateConverter::new(&RatesConfig {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 1,
            cache_ttl_secs: 0,
            enabled: true,
        })
        .unwrap();

        let result = converter.convert(dec!(10), "USD", "SGD").await;
        assert!(matches!(result, Err(ConversionError::Http(_))));
    }
}
