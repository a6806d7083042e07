//! Normalizes a parsed expense into the user's preferred currency.
//!
//! Conversion never fails an expense: when rates cannot be obtained the original
//! amount and currency are kept and the description records why.

use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use shared_types::{
    is_supported_currency, ConversionError, ConversionResult, ConvertedExpense, DEFAULT_CURRENCY,
};
use std::sync::Arc;

/// Exchange rate collaborator.
#[async_trait]
pub trait RateConverter: Send + Sync {
    async fn convert(
        &self,
        amount: Decimal,
        from: &str,
        to: &str,
    ) -> Result<ConversionResult, ConversionError>;
}

/// User preference collaborator.
#[async_trait]
pub trait CurrencyPreferences: Send + Sync {
    async fn default_currency(&self, user_id: i64) -> Result<String, ConversionError>;
}

pub struct CurrencyConverter {
    preferences: Arc<dyn CurrencyPreferences>,
    rates: Option<Arc<dyn RateConverter>>,
}

impl CurrencyConverter {
    pub fn new(
        preferences: Arc<dyn CurrencyPreferences>,
        rates: Option<Arc<dyn RateConverter>>,
    ) -> Self {
        Self { preferences, rates }
    }

    /// Currency expenses of `user_id` are recorded in.
    pub async fn resolve_default_currency(&self, user_id: i64) -> String {
        match self.preferences.default_currency(user_id).await {
            Ok(code) => {
                let code = code.trim().to_uppercase();
                if is_supported_currency(&code) {
                    code
                } else {
                    tracing::warn!(user_id, currency = %code, "unsupported preferred currency, using {}", DEFAULT_CURRENCY);
                    DEFAULT_CURRENCY.to_string()
                }
            }
            Err(e) => {
                tracing::warn!(user_id, error = %e, "preferred currency lookup failed, using {}", DEFAULT_CURRENCY);
                DEFAULT_CURRENCY.to_string()
            }
        }
    }

    /// Convert `amount` in `currency` into the user's default currency.
    pub async fn convert_expense_currency(
        &self,
        user_id: i64,
        amount: Decimal,
        currency: &str,
        description: &str,
    ) -> ConvertedExpense {
        let target = self.resolve_default_currency(user_id).await;

        let mut source = currency.trim().to_uppercase();
        if source.is_empty() {
            source = target.clone();
        } else if !is_supported_currency(&source) {
            tracing::warn!(currency = %source, "unsupported expense currency, using {}", target);
            source = target.clone();
        }

        if source == target {
            return ConvertedExpense {
                amount,
                currency: source,
                description: description.to_string(),
            };
        }

        let Some(rates) = &self.rates else {
            tracing::warn!(from = %source, to = %target, "no rate service configured");
            return unavailable(amount, source, &target, description);
        };

        match rates.convert(amount, &source, &target).await {
            Ok(result) if result.amount > Decimal::ZERO && result.rate > Decimal::ZERO => {
                let note = format!(
                    "[orig: {} {} -> {} {} @ {} ({})]",
                    fixed(amount, 2),
                    source,
                    fixed(result.amount, 2),
                    target,
                    fixed(result.rate, 4),
                    result.rate_date.format("%Y-%m-%d"),
                );
                tracing::debug!(from = %source, to = %target, rate = %result.rate, "expense converted");
                ConvertedExpense {
                    amount: result.amount,
                    currency: target,
                    description: annotate(description, &note),
                }
            }
            Ok(result) => {
                tracing::warn!(
                    from = %source,
                    to = %target,
                    amount = %result.amount,
                    rate = %result.rate,
                    "rate service returned a non-positive conversion"
                );
                unavailable(amount, source, &target, description)
            }
            Err(e) => {
                tracing::warn!(from = %source, to = %target, error = %e, "currency conversion failed");
                unavailable(amount, source, &target, description)
            }
        }
    }
}

fn unavailable(amount: Decimal, source: String, target: &str, description: &str) -> ConvertedExpense {
    let note = format!("[fx_unavailable: kept {}, target {}]", source, target);
    ConvertedExpense {
        amount,
        currency: source,
        description: annotate(description, &note),
    }
}

fn fixed(value: Decimal, dp: u32) -> String {
    let rounded = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    format!("{:.*}", dp as usize, rounded)
}

/// Append a bracketed note to a description.
pub fn annotate(description: &str, note: &str) -> String {
    let description = description.trim_end();
    if description.trim().is_empty() {
        note.to_string()
    } else {
        format!("{} {}", description, note)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedPreference(Result<&'static str, ()>);

    #[async_trait]
    impl CurrencyPreferences for FixedPreference {
        async fn default_currency(&self, _user_id: i64) -> Result<String, ConversionError> {
            self.0
                .map(str::to_string)
                .map_err(|_| ConversionError::PreferenceLookup("not found".to_string()))
        }
    }

    struct MockRates {
        calls: AtomicUsize,
        response: Option<ConversionResult>,
    }

    impl MockRates {
        fn ok(result: ConversionResult) -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: Some(result),
            })
        }

        fn failing() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
                response: None,
            })
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl RateConverter for MockRates {
        async fn convert(
            &self,
            _amount: Decimal,
            _from: &str,
            _to: &str,
        ) -> Result<ConversionResult, ConversionError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.response
                .clone()
                .ok_or_else(|| ConversionError::RateUnavailable("service down".to_string()))
        }
    }

    fn converter(preference: &'static str, rates: Option<Arc<MockRates>>) -> CurrencyConverter {
        CurrencyConverter::new(
            Arc::new(FixedPreference(Ok(preference))),
            rates.map(|r| r as Arc<dyn RateConverter>),
        )
    }

    fn sgd_rate() -> ConversionResult {
        ConversionResult {
            amount: dec!(24.30),
            rate: dec!(1.35),
            rate_date: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
        }
    }

    #[tokio::test]
    async fn test_same_currency_is_noop() {
        let rates = MockRates::ok(sgd_rate());
        let conv = converter("SGD", Some(rates.clone()));

        let out = conv
            .convert_expense_currency(1, dec!(12.345), "sgd", "hawker dinner")
            .await;

        assert_eq!(rates.calls(), 0);
        assert_eq!(out.amount, dec!(12.345));
        assert_eq!(out.currency, "SGD");
        assert_eq!(out.description, "hawker dinner");
    }

    #[tokio::test]
    async fn test_empty_source_means_default() {
        let rates = MockRates::ok(sgd_rate());
        let conv = converter("SGD", Some(rates.clone()));

        let out = conv.convert_expense_currency(1, dec!(3), "  ", "").await;

        assert_eq!(rates.calls(), 0);
        assert_eq!(out.currency, "SGD");
        assert_eq!(out.description, "");
    }

    #[tokio::test]
    async fn test_unsupported_source_falls_back_to_default() {
        let rates = MockRates::ok(sgd_rate());
        let conv = converter("SGD", Some(rates.clone()));

        let out = conv.convert_expense_currency(1, dec!(3), "XYZ", "mystery").await;

        assert_eq!(rates.calls(), 0);
        assert_eq!(out.currency, "SGD");
        assert_eq!(out.description, "mystery");
    }

    #[tokio::test]
    async fn test_failing_rates_keep_original() {
        let rates = MockRates::failing();
        let conv = converter("SGD", Some(rates.clone()));

        let out = conv
            .convert_expense_currency(1, dec!(18), "USD", "Lunch")
            .await;

        assert_eq!(rates.calls(), 1);
        assert_eq!(out.amount, dec!(18));
        assert_eq!(out.currency, "USD");
        assert_eq!(out.description, "Lunch [fx_unavailable: kept USD, target SGD]");
    }

    #[tokio::test]
    async fn test_missing_rate_service_keeps_original() {
        let conv = converter("SGD", None);

        let out = conv.convert_expense_currency(1, dec!(18), "usd", "  ").await;

        assert_eq!(out.amount, dec!(18));
        assert_eq!(out.currency, "USD");
        assert_eq!(out.description, "[fx_unavailable: kept USD, target SGD]");
    }

    #[tokio::test]
    async fn test_successful_conversion_annotates() {
        let rates = MockRates::ok(sgd_rate());
        let conv = converter("SGD", Some(rates.clone()));

        let out = conv
            .convert_expense_currency(1, dec!(18), "USD", "Lunch")
            .await;

        assert_eq!(rates.calls(), 1);
        assert_eq!(out.amount, dec!(24.30));
        assert_eq!(out.currency, "SGD");
        assert_eq!(
            out.description,
            "Lunch [orig: 18.00 USD -> 24.30 SGD @ 1.3500 (2026-02-14)]"
        );
    }

    #[tokio::test]
    async fn test_non_positive_conversion_is_unavailable() {
        let rates = MockRates::ok(ConversionResult {
            amount: dec!(0),
            rate: dec!(0),
            rate_date: NaiveDate::from_ymd_opt(2026, 2, 14).unwrap(),
        });
        let conv = converter("SGD", Some(rates.clone()));

        let out = conv.convert_expense_currency(1, dec!(5), "EUR", "").await;

        assert_eq!(out.amount, dec!(5));
        assert_eq!(out.currency, "EUR");
        assert_eq!(out.description, "[fx_unavailable: kept EUR, target SGD]");
    }

    #[tokio::test]
    async fn test_preference_failure_uses_default_currency() {
        let conv = CurrencyConverter::new(Arc::new(FixedPreference(Err(()))), None);
        assert_eq!(conv.resolve_default_currency(7).await, DEFAULT_CURRENCY);

        let conv = converter("zzz", None);
        assert_eq!(conv.resolve_default_currency(7).await, DEFAULT_CURRENCY);

        let conv = converter(" usd ", None);
        assert_eq!(conv.resolve_default_currency(7).await, "USD");
    }

    #[test]
    fn test_fixed_rounds_half_away_from_zero() {
        assert_eq!(fixed(dec!(1.005), 2), "1.01");
        assert_eq!(fixed(dec!(18), 2), "18.00");
        assert_eq!(fixed(dec!(1.35), 4), "1.3500");
    }

    #[test]
    fn test_annotate() {
        assert_eq!(annotate("", "[x]"), "[x]");
        assert_eq!(annotate("   ", "[x]"), "[x]");
        assert_eq!(annotate("taxi ", "[x]"), "taxi [x]");
    }
}
