//! HTML Helpers
//!
//! Escaping and CSS list helpers matching the runtime functions that
//! compiled templates call.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static ENTITY_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^&(?:[A-Za-z][A-Za-z0-9]*|#[0-9]+|#[xX][0-9A-Fa-f]+);").unwrap());

/// Escape `& < > " '`. Without double encoding, existing entities are kept.
pub fn escape(value: &str, double_encode: bool) -> String {
    let mut escaped = String::with_capacity(value.len() + value.len() / 8);
    for (index, ch) in value.char_indices() {
        match ch {
            '&' if !double_encode && ENTITY_REGEXP.is_match(&value[index..]) => escaped.push('&'),
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escape strings bound onto component attributes; other values pass.
pub fn sanitize_component_attribute(value: &Value) -> Value {
    match value {
        Value::String(text) => Value::String(escape(text, true)),
        other => other.clone(),
    }
}

/// Space-separated class list of every entry whose condition holds.
pub fn classes_from<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    entries
        .into_iter()
        .filter(|(_, enabled)| *enabled)
        .map(|(class, _)| class)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Style declarations whose condition holds, each ending in one `;`.
pub fn styles_from<'a, I>(entries: I) -> String
where
    I: IntoIterator<Item = (&'a str, bool)>,
{
    entries
        .into_iter()
        .filter(|(_, enabled)| *enabled)
        .map(|(style, _)| format!("{};", style.trim_end_matches(';')))
        .collect::<Vec<_>>()
        .join(" ")
}
