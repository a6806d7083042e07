//! Currency designations around the amount of an expense message.
//!
//! Checked in order by the parser, each only while the currency is unresolved:
//! prefix (`$10`, `SGD 10`), glued symbol (`10S$`), adjacent code (`10 usd - taxi`),
//! and a code closing the description (`taxi home sgd`).

use regex::Regex;
use shared_types::{is_supported_currency, symbols_by_length};
use std::sync::OnceLock;

fn suffix_code_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?:^|\s)([A-Za-z]{3})$").expect("invalid suffix code regex"))
}

/// Uppercase `word` and return the matching supported code.
fn supported_code(word: &str) -> Option<String> {
    if word.len() != 3 || !word.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let code = word.to_ascii_uppercase();
    is_supported_currency(&code).then_some(code)
}

fn starts_with_digit(text: &str) -> bool {
    text.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Symbol or code directly in front of the amount.
///
/// Returns the code and the number of bytes to skip to reach the amount.
pub fn detect_prefix(text: &str) -> Option<(String, usize)> {
    for (symbol, code) in symbols_by_length() {
        if let Some(rest) = text.strip_prefix(*symbol) {
            let amount = rest.trim_start();
            if starts_with_digit(amount) {
                return Some((code.to_string(), text.len() - amount.len()));
            }
        }
    }

    let head = text.get(..3)?;
    let code = supported_code(head)?;
    let amount = text[3..].trim_start();
    if starts_with_digit(amount) {
        return Some((code, text.len() - amount.len()));
    }

    None
}

/// Symbol glued to the end of the amount, longest symbol first.
///
/// Returns the code and the byte length of the symbol.
pub fn detect_glued_symbol(rest: &str) -> Option<(String, usize)> {
    symbols_by_length()
        .iter()
        .find(|(symbol, _)| rest.starts_with(*symbol))
        .map(|(symbol, code)| (code.to_string(), symbol.len()))
}

/// Three-letter code forming the first word after the amount, plus one optional `-`
/// separator after it.
///
/// Returns the code and the number of bytes consumed from `rest`.
pub fn detect_adjacent_code(rest: &str) -> Option<(String, usize)> {
    let word_start = rest.len() - rest.trim_start().len();
    let word_region = &rest[word_start..];
    let word_len = word_region
        .find(char::is_whitespace)
        .unwrap_or(word_region.len());
    let code = supported_code(&word_region[..word_len])?;

    let mut consumed = word_start + word_len;
    let after = &rest[consumed..];
    let separator = after.trim_start();
    if separator.starts_with('-') {
        consumed += after.len() - separator.len() + 1;
    }

    Some((code, consumed))
}

/// Three-letter code that closes the description.
///
/// Returns the code and the byte offset where the description should be cut.
pub fn detect_suffix_code(description: &str) -> Option<(String, usize)> {
    let caps = suffix_code_re().captures(description)?;
    let word = caps.get(1)?;
    let code = supported_code(word.as_str())?;
    Some((code, word.start()))
}
