//! Utility Functions
//!
//! String casing and trimming helpers shared by the directive rules and the
//! component tag compiler. Casing follows the conventions the rendering
//! runtime uses for component class names and constructor parameters.

use once_cell::sync::Lazy;
use regex::Regex;

static DIRECTIVE_NAME_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\w+(?:::\w+)?$").unwrap());

static NUMERIC_REGEXP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[ \t\n\r\x0B\x0C]*[+-]?(?:\d+(?:\.\d*)?|\.\d+)(?:[eE][+-]?\d+)?[ \t\n\r\x0B\x0C]*$")
        .unwrap()
});

/// Regex for the word separators recognised by [`studly`]
static WORD_SEPARATOR_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"[-_]").unwrap());

/// Whether `name` may be registered as a directive.
pub fn is_valid_directive_name(name: &str) -> bool {
    DIRECTIVE_NAME_REGEXP.is_match(name)
}

/// Numeric strings in the host language sense (`1`, `-2.5`, `1e3`, ` 4`).
pub fn is_numeric(value: &str) -> bool {
    NUMERIC_REGEXP.is_match(value)
}

pub fn ucfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

pub fn lcfirst(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// `user-id` / `user_id` to `UserId`.
pub fn studly(value: &str) -> String {
    WORD_SEPARATOR_REGEXP
        .replace_all(value, " ")
        .split(' ')
        .map(ucfirst)
        .collect()
}

/// `user-id` / `user_id` to `userId`.
pub fn camel(value: &str) -> String {
    lcfirst(&studly(value))
}

/// `AlertBox` to `alert-box`.
pub fn kebab(value: &str) -> String {
    if value.chars().all(|c| c.is_lowercase()) {
        return value.to_string();
    }

    let words: String = value
        .split_whitespace()
        .map(ucfirst)
        .collect::<Vec<_>>()
        .join("");

    let chars: Vec<char> = words.chars().collect();
    let mut result = String::with_capacity(chars.len() + 4);
    for (i, ch) in chars.iter().enumerate() {
        result.push(*ch);
        if chars.get(i + 1).is_some_and(|next| next.is_uppercase()) {
            result.push('-');
        }
    }
    result.to_lowercase()
}

/// Component tag name to class path: `forms.text-input` to `Forms\TextInput`.
pub fn format_class_name(component: &str) -> String {
    component
        .split('.')
        .map(|section| ucfirst(&camel(section)))
        .collect::<Vec<_>>()
        .join("\\")
}

/// Drop one matching quote pair. Unterminated values are returned as is.
pub fn strip_quotes(value: &str) -> &str {
    ['"', '\'']
        .iter()
        .find_map(|&quote| value.strip_prefix(quote)?.strip_suffix(quote))
        .unwrap_or(value)
}

/// Drop one surrounding parenthesis pair, if the value has both.
pub fn strip_parentheses(expression: &str) -> &str {
    expression
        .strip_prefix('(')
        .and_then(|inner| inner.strip_suffix(')'))
        .unwrap_or(expression)
}

/// Trim any of `chars` from both ends.
pub fn trim_chars<'a>(value: &'a str, chars: &str) -> &'a str {
    value.trim_matches(|c| chars.contains(c))
}

/// Everything after the last occurrence of `search`, or the whole value.
pub fn after_last<'a>(value: &'a str, search: &str) -> &'a str {
    match value.rfind(search) {
        Some(index) => &value[index + search.len()..],
        None => value,
    }
}

/// Escape `\` and `'` for embedding inside a single-quoted host string.
pub fn escape_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}
