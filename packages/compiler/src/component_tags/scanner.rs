//! Tag Scanner
//!
//! Finds where an `<x-...>` tag ends and checks its attribute region
//! against the attribute grammar. Quoted values, `{{ ... }}` groups and
//! `@class(...)`/`@style(...)` argument groups may all contain `>`, so the
//! end of a tag is the first `>` outside of them.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::balanced::scan_group;
use crate::chars::{is_quote, AT, GT, LBRACE, MINUS, SLASH, EQ};

const CSS_STATEMENTS: [&str; 2] = ["@class(", "@style("];

/// Attribute grammar of component tags, applied after argument groups of
/// `@class`/`@style` have been emptied.
static TAG_ATTRIBUTES_REGEXP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:\s+(?:@(?:class|style)\(\)|\{\{\s*\$attributes(?:[^}]+?)?\s*\}\}|:\$\w+|[\w\-:.@%]+(?:=(?:"[^"]*"|'[^']*'|[^'"=<>]+))?))*\s*$"#,
    )
    .unwrap()
});

/// Slot tags allow neither the `:$name` shorthand nor `%` in names.
static SLOT_ATTRIBUTES_REGEXP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"^(?:\s+(?:@(?:class|style)\(\)|\{\{\s*\$attributes(?:[^}]+?)?\s*\}\}|[\w\-:.@]+(?:=(?:"[^"]*"|'[^']*'|[^'"=<>]+))?))*\s*$"#,
    )
    .unwrap()
});

/// End of a `@class(...)` or `@style(...)` group starting at `at`.
fn css_statement_end(text: &str, at: usize) -> Option<usize> {
    let rest = &text[at..];
    let statement = CSS_STATEMENTS.iter().find(|s| rest.starts_with(**s))?;
    scan_group(text, at + statement.len() - 1)
}

/// Index of the `>` that ends a tag whose attribute region starts at `from`.
pub fn find_tag_end(text: &str, from: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    let mut index = from;

    while index < bytes.len() {
        let code = bytes[index];
        if is_quote(code) {
            let close = text[index + 1..].find(char::from(code))?;
            index += close + 2;
            continue;
        }
        match code {
            LBRACE if bytes.get(index + 1) == Some(&LBRACE) => {
                let close = text[index + 2..].find("}}")?;
                index += close + 4;
            }
            AT => match css_statement_end(text, index) {
                Some(end) => index = end,
                None => index += 1,
            },
            GT => return Some(index),
            _ => index += 1,
        }
    }
    None
}

/// Whether the character before the `>` at `gt` rules out an opening tag.
pub fn ends_with_forbidden_char(text: &str, gt: usize) -> bool {
    gt > 0 && matches!(text.as_bytes()[gt - 1], SLASH | EQ | MINUS)
}

/// `region` with the argument groups of `@class`/`@style` emptied.
fn mask_css_statements(region: &str) -> String {
    let bytes = region.as_bytes();
    let mut masked = String::with_capacity(region.len());
    let mut cursor = 0;
    let mut index = 0;

    while index < bytes.len() {
        let code = bytes[index];
        if is_quote(code) {
            index = match region[index + 1..].find(char::from(code)) {
                Some(close) => index + close + 2,
                None => bytes.len(),
            };
            continue;
        }
        if code == AT {
            if let Some(end) = css_statement_end(region, index) {
                masked.push_str(&region[cursor..index]);
                masked.push_str(&region[index..index + 6]);
                masked.push_str("()");
                cursor = end;
                index = end;
                continue;
            }
        }
        index += 1;
    }
    masked.push_str(&region[cursor..]);
    masked
}

pub fn is_valid_tag_region(region: &str) -> bool {
    TAG_ATTRIBUTES_REGEXP.is_match(&mask_css_statements(region))
}

pub fn is_valid_slot_region(region: &str) -> bool {
    SLOT_ATTRIBUTES_REGEXP.is_match(&mask_css_statements(region))
}
