use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Expense recognized in a chat message or `/add` command.
///
/// Created fresh by every parse call and never mutated by the parser afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
pub struct ParsedExpense {
    /// Always strictly positive
    #[ts(type = "string")]
    pub amount: Decimal,
    pub description: String,
    /// Canonical name from the caller's category list
    pub category_name: Option<String>,
    /// Supported 3-letter currency code
    pub currency: Option<String>,
    /// Lowercase, deduplicated, in order of first appearance
    pub tags: Vec<String>,
}

impl ParsedExpense {
    pub fn new(amount: Decimal) -> Self {
        Self {
            amount,
            description: String::new(),
            category_name: None,
            currency: None,
            tags: Vec::new(),
        }
    }
}

/// Result of interpreting free text as an expense.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    Parsed(ParsedExpense),
    /// The text has no usable leading amount
    NotAnExpense,
}

impl ParseOutcome {
    pub fn is_expense(&self) -> bool {
        matches!(self, ParseOutcome::Parsed(_))
    }

    pub fn expense(&self) -> Option<&ParsedExpense> {
        match self {
            ParseOutcome::Parsed(expense) => Some(expense),
            ParseOutcome::NotAnExpense => None,
        }
    }

    pub fn into_option(self) -> Option<ParsedExpense> {
        match self {
            ParseOutcome::Parsed(expense) => Some(expense),
            ParseOutcome::NotAnExpense => None,
        }
    }
}

impl From<Option<ParsedExpense>> for ParseOutcome {
    fn from(value: Option<ParsedExpense>) -> Self {
        match value {
            Some(expense) => ParseOutcome::Parsed(expense),
            None => ParseOutcome::NotAnExpense,
        }
    }
}

/// Amount parsing errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,

    #[error("Unparseable amount: {0}")]
    Unparseable(String),

    #[error("Amount must be positive, got {0}")]
    NonPositive(Decimal),
}
