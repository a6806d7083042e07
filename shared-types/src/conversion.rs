use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Rate lookup result returned by a rate collaborator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ConversionResult {
    /// Amount expressed in the target currency
    #[ts(type = "string")]
    pub amount: Decimal,
    #[ts(type = "string")]
    pub rate: Decimal,
    /// Day the rate is valid for
    pub rate_date: NaiveDate,
}

/// Amount, currency and description after normalizing into the user's currency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ConvertedExpense {
    #[ts(type = "string")]
    pub amount: Decimal,
    pub currency: String,
    pub description: String,
}

/// Currency conversion error types
#[derive(Debug, thiserror::Error)]
pub enum ConversionError {
    #[error("Unsupported currency: {0}")]
    UnsupportedCurrency(String),

    #[error("Rate unavailable: {0}")]
    RateUnavailable(String),

    #[error("Preference lookup failed: {0}")]
    PreferenceLookup(String),

    #[error("HTTP error: {0}")]
    Http(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}
