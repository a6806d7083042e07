//! Expense recognition for free-text chat messages and `/add` commands.
//!
//! A message is read as `[currency] amount[currency] [currency] description [#tags] [category]`.
//! Only the amount is mandatory; everything else is optional and detected heuristically.

mod amount;
mod category;
mod currency;
mod tags;

pub use amount::{extract_leading_amount, parse_amount, AmountToken};
pub use category::match_category;
pub use tags::extract_tags;

use shared_types::{ParseOutcome, ParsedExpense};

/// Command token understood by [`ExpenseInputParser::parse_add_command`].
pub const ADD_COMMAND: &str = "/add";

/// Parser holding the category names expenses may be filed under.
#[derive(Debug, Clone, Default)]
pub struct ExpenseInputParser {
    categories: Vec<String>,
}

impl ExpenseInputParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_categories<I, S>(categories: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Parse a raw chat message.
    pub fn parse(&self, text: &str) -> ParseOutcome {
        parse_with_categories(text, &self.categories)
    }

    /// Parse a message starting with `command`, optionally addressed to a bot
    /// (`/add@SpendBot 5 coffee`). Text not starting with the command is parsed as is.
    pub fn parse_command(&self, text: &str, command: &str) -> ParseOutcome {
        parse_with_categories(strip_command(text, command), &self.categories)
    }

    pub fn parse_add_command(&self, text: &str) -> ParseOutcome {
        self.parse_command(text, ADD_COMMAND)
    }
}

/// Parse free text without any known categories.
pub fn parse_expense_input(text: &str) -> ParseOutcome {
    parse_with_categories::<&str>(text, &[])
}

pub fn parse_expense_input_with_categories<S: AsRef<str>>(
    text: &str,
    categories: &[S],
) -> ParseOutcome {
    parse_with_categories(text, categories)
}

pub fn parse_add_command_with_categories<S: AsRef<str>>(
    text: &str,
    categories: &[S],
) -> ParseOutcome {
    parse_with_categories(strip_command(text, ADD_COMMAND), categories)
}

/// Remove a leading command token and its `@bot` mention.
fn strip_command<'a>(text: &'a str, command: &str) -> &'a str {
    let trimmed = text.trim_start();
    let Some(head) = trimmed.get(..command.len()) else {
        return trimmed;
    };
    if command.is_empty() || !head.eq_ignore_ascii_case(command) {
        return trimmed;
    }

    let mut rest = &trimmed[command.len()..];
    if let Some(mention) = rest.strip_prefix('@') {
        let end = mention.find(char::is_whitespace).unwrap_or(mention.len());
        rest = &mention[end..];
    }

    if rest.is_empty() || rest.starts_with(char::is_whitespace) {
        rest
    } else {
        // `/addition` is not `/add`
        trimmed
    }
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn parse_with_categories<S: AsRef<str>>(text: &str, categories: &[S]) -> ParseOutcome {
    let input = text.trim();
    let mut currency_code: Option<String> = None;
    let mut cursor = 0;

    if let Some((code, consumed)) = currency::detect_prefix(input) {
        tracing::debug!(currency = %code, "currency from prefix");
        currency_code = Some(code);
        cursor = consumed;
    }

    let Some(token) = amount::extract_leading_amount(&input[cursor..]) else {
        return ParseOutcome::NotAnExpense;
    };
    cursor += token.end;

    // A glued symbol is consumed even when a prefix already set the currency.
    if let Some((code, len)) = currency::detect_glued_symbol(&input[cursor..]) {
        cursor += len;
        if currency_code.is_none() {
            tracing::debug!(currency = %code, "currency from glued symbol");
            currency_code = Some(code);
        }
    }

    if currency_code.is_none() {
        if let Some((code, consumed)) = currency::detect_adjacent_code(&input[cursor..]) {
            tracing::debug!(currency = %code, "currency from code after amount");
            currency_code = Some(code);
            cursor += consumed;
        }
    }

    let mut description = collapse_whitespace(&input[cursor..]);

    if currency_code.is_none() {
        if let Some((code, start)) = currency::detect_suffix_code(&description) {
            tracing::debug!(currency = %code, "currency from trailing code");
            currency_code = Some(code);
            description.truncate(start);
            description.truncate(description.trim_end().len());
        }
    }

    let (description, tags) = tags::extract_tags(&description);
    let (description, category_name) = category::match_category(&description, categories);

    ParseOutcome::Parsed(ParsedExpense {
        amount: token.value,
        description,
        category_name,
        currency: currency_code,
        tags,
    })
}
