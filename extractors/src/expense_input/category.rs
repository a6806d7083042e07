use regex::Regex;
use std::sync::OnceLock;

fn bracket_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\[([^\[\]]*)\]\s*$").expect("invalid category bracket regex"))
}

fn same_name(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Resolve the category of a description against the known category names.
///
/// A trailing `[Name]` wins when it names a known category; otherwise the longest
/// category name that ends the description is taken. The matched text is removed from
/// the returned description and the category is returned as spelled in `categories`.
pub fn match_category<S: AsRef<str>>(
    description: &str,
    categories: &[S],
) -> (String, Option<String>) {
    if description.is_empty() {
        return (String::new(), None);
    }

    if let Some((start, category)) = match_bracket(description, categories) {
        return (description[..start].trim().to_string(), Some(category));
    }

    if let Some((start, category)) = match_suffix(description, categories) {
        return (description[..start].trim().to_string(), Some(category));
    }

    (description.to_string(), None)
}

fn match_bracket<S: AsRef<str>>(description: &str, categories: &[S]) -> Option<(usize, String)> {
    let caps = bracket_re().captures(description)?;
    let whole = caps.get(0)?;
    let name = caps.get(1)?.as_str().trim();
    if name.is_empty() {
        return None;
    }

    for category in categories {
        let category: &str = category.as_ref();
        if same_name(category.trim(), name) {
            return Some((whole.start(), category.to_string()));
        }
    }

    None
}

/// Longest category name ending the description, compared case-insensitively.
fn match_suffix<S: AsRef<str>>(description: &str, categories: &[S]) -> Option<(usize, String)> {
    let mut best: Option<(usize, usize, &str)> = None;

    for category in categories {
        let category: &str = category.as_ref();
        let name = category.trim();
        let name_chars = name.chars().count();
        if name_chars == 0 {
            continue;
        }
        if best.is_some_and(|(len, _, _)| len >= name_chars) {
            continue;
        }

        let Some((start, _)) = description.char_indices().rev().nth(name_chars - 1) else {
            continue;
        };
        if same_name(&description[start..], name) {
            best = Some((name_chars, start, category));
        }
    }

    best.map(|(_, start, category)| (start, category.to_string()))
}
