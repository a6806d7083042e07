use regex::Regex;
use std::sync::OnceLock;

fn tag_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^#[A-Za-z][A-Za-z0-9_]{0,29}$").expect("invalid tag regex"))
}

/// Pull `#tag` words out of `text`.
///
/// Returns the remaining words joined by single spaces, and the tags lowercased and
/// deduplicated in order of first appearance. Text without any `#` is returned as is.
pub fn extract_tags(text: &str) -> (String, Vec<String>) {
    if !text.contains('#') {
        return (text.to_string(), Vec::new());
    }

    let mut tags: Vec<String> = Vec::new();
    let mut words = Vec::new();

    for word in text.split_whitespace() {
        if tag_re().is_match(word) {
            let tag = word[1..].to_ascii_lowercase();
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        } else {
            words.push(word);
        }
    }

    (words.join(" "), tags)
}
