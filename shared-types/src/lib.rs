pub mod conversion;
pub mod currency;
pub mod expense;

pub use conversion::{ConversionError, ConversionResult, ConvertedExpense};
pub use currency::{
    currency_symbol, is_supported_currency, symbol_to_code, symbols_by_length, CurrencyDef,
    DEFAULT_CURRENCY, SUPPORTED_CURRENCIES, SYMBOL_TO_CODE,
};
pub use expense::{AmountError, ParseOutcome, ParsedExpense};

