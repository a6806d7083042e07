//! Supported currencies and the symbol table used when reading amounts.
//!
//! Both tables are static configuration. Adding a currency means adding a row to
//! `SUPPORTED_CURRENCIES`, plus a row to `SYMBOL_TO_CODE` if users may type its symbol.

use std::sync::OnceLock;

/// Currency used whenever a user's preference is missing or unsupported.
pub const DEFAULT_CURRENCY: &str = "SGD";

pub struct CurrencyDef {
    /// ISO 4217 code (e.g., "USD")
    pub code: &'static str,
    /// Display symbol (e.g., "$", "S$")
    pub symbol: &'static str,
}

pub static SUPPORTED_CURRENCIES: &[CurrencyDef] = &[
    CurrencyDef { code: "USD", symbol: "$" },
    CurrencyDef { code: "EUR", symbol: "€" },
    CurrencyDef { code: "GBP", symbol: "£" },
    CurrencyDef { code: "JPY", symbol: "¥" },
    CurrencyDef { code: "CNY", symbol: "¥" },
    CurrencyDef { code: "THB", symbol: "฿" },
    CurrencyDef { code: "PHP", symbol: "₱" },
    CurrencyDef { code: "VND", symbol: "₫" },
    CurrencyDef { code: "KRW", symbol: "₩" },
    CurrencyDef { code: "INR", symbol: "₹" },
    CurrencyDef { code: "SGD", symbol: "S$" },
    CurrencyDef { code: "AUD", symbol: "A$" },
    CurrencyDef { code: "HKD", symbol: "HK$" },
    CurrencyDef { code: "NZD", symbol: "NZ$" },
    CurrencyDef { code: "TWD", symbol: "NT$" },
    CurrencyDef { code: "MYR", symbol: "RM" },
    CurrencyDef { code: "IDR", symbol: "Rp" },
    CurrencyDef { code: "CAD", symbol: "C$" },
    CurrencyDef { code: "CHF", symbol: "CHF" },
];

/// Symbols recognized in user input. Matching is case-sensitive.
pub static SYMBOL_TO_CODE: &[(&str, &str)] = &[
    ("$", "USD"),
    ("€", "EUR"),
    ("£", "GBP"),
    ("¥", "JPY"),
    ("฿", "THB"),
    ("₱", "PHP"),
    ("₫", "VND"),
    ("₩", "KRW"),
    ("₹", "INR"),
    ("S$", "SGD"),
    ("A$", "AUD"),
    ("HK$", "HKD"),
    ("NZ$", "NZD"),
    ("NT$", "TWD"),
    ("RM", "MYR"),
    ("Rp", "IDR"),
];

/// Whether `code` is a supported currency code. Expects an uppercase code.
pub fn is_supported_currency(code: &str) -> bool {
    SUPPORTED_CURRENCIES.iter().any(|def| def.code == code)
}

pub fn currency_symbol(code: &str) -> Option<&'static str> {
    SUPPORTED_CURRENCIES
        .iter()
        .find(|def| def.code == code)
        .map(|def| def.symbol)
}

pub fn symbol_to_code(symbol: &str) -> Option<&'static str> {
    SYMBOL_TO_CODE
        .iter()
        .find(|(sym, _)| *sym == symbol)
        .map(|(_, code)| *code)
}

/// `SYMBOL_TO_CODE` ordered by symbol length, longest first, so `S$` is tried before `$`.
/// Symbols of equal length keep table order.
pub fn symbols_by_length() -> &'static [(&'static str, &'static str)] {
    static SORTED: OnceLock<Vec<(&'static str, &'static str)>> = OnceLock::new();
    SORTED.get_or_init(|| {
        let mut symbols = SYMBOL_TO_CODE.to_vec();
        symbols.sort_by_key(|(sym, _)| std::cmp::Reverse(sym.chars().count()));
        symbols
    })
}
