//! Extractors Crate
//!
//! Turns user-typed chat text into structured expenses and normalizes their currency.
//!
//! # Available Extractors
//!
//! - `ExpenseInputParser`: recognizes `amount [currency] description [#tags] [category]`
//!   in free text and `/add` commands
//! - `CurrencyConverter`: converts a parsed expense into the user's preferred currency
//!   through pluggable rate and preference collaborators
//!
//! # Example
//!
//! ```rust
//! use extractors::ExpenseInputParser;
//!
//! let parser = ExpenseInputParser::with_categories(["Transport"]);
//! let expense = parser.parse("$3.20 bus Transport").into_option().unwrap();
//! assert_eq!(expense.currency.as_deref(), Some("USD"));
//! assert_eq!(expense.description, "bus");
//! assert_eq!(expense.category_name.as_deref(), Some("Transport"));
//! ```

pub mod currency_conversion;
pub mod expense_input;

// Re-export commonly used types
pub use currency_conversion::{CurrencyConverter, CurrencyPreferences, RateConverter};
pub use expense_input::{
    parse_add_command_with_categories, parse_amount, parse_expense_input,
    parse_expense_input_with_categories, ExpenseInputParser,
};

pub use shared_types::{ConvertedExpense, ParseOutcome, ParsedExpense};
