//! Balanced Expressions
//!
//! Character-level scanners for parenthesised host expressions. They stand
//! in for the recursive regex groups a PCRE engine would use: strings and
//! comments are skipped, so parentheses inside `'('` or `/* ) */` never count.

use crate::chars::{
    is_quote, BACKSLASH, CR, HASH, LF, LPAREN, QUESTION, RPAREN, SLASH, STAR, GT,
};

/// Position just past a string literal opening at `start`. Unterminated
/// strings run to the end of input.
fn skip_string(bytes: &[u8], start: usize) -> usize {
    let quote = bytes[start];
    let mut index = start + 1;
    while index < bytes.len() {
        match bytes[index] {
            BACKSLASH => index += 2,
            code if code == quote => return index + 1,
            _ => index += 1,
        }
    }
    bytes.len()
}

/// Position just past a comment opening at `start`, if one opens there.
/// Line comments also end before a `?>` close tag.
fn skip_comment(bytes: &[u8], start: usize) -> Option<usize> {
    let code = bytes[start];
    let next = bytes.get(start + 1).copied();

    if code == SLASH && next == Some(STAR) {
        let mut index = start + 2;
        while index + 1 < bytes.len() {
            if bytes[index] == STAR && bytes[index + 1] == SLASH {
                return Some(index + 2);
            }
            index += 1;
        }
        return Some(bytes.len());
    }

    if (code == SLASH && next == Some(SLASH)) || code == HASH {
        let mut index = start + if code == HASH { 1 } else { 2 };
        while index < bytes.len() {
            match bytes[index] {
                LF | CR => return Some(index),
                QUESTION if bytes.get(index + 1) == Some(&GT) => return Some(index),
                _ => index += 1,
            }
        }
        return Some(bytes.len());
    }

    None
}

/// Whether `expression` has as many `(` as `)` tokens and its last token
/// is a `)`. String literals and comments are single tokens.
pub fn has_balanced_parentheses(expression: &str) -> bool {
    let bytes = expression.as_bytes();
    let mut opening = 0usize;
    let mut closing = 0usize;
    let mut last_is_closing = false;
    let mut index = 0;

    while index < bytes.len() {
        let code = bytes[index];
        if is_quote(code) {
            index = skip_string(bytes, index);
            last_is_closing = false;
            continue;
        }
        if let Some(end) = skip_comment(bytes, index) {
            index = end;
            last_is_closing = false;
            continue;
        }
        match code {
            LPAREN => {
                opening += 1;
                last_is_closing = false;
            }
            RPAREN => {
                closing += 1;
                last_is_closing = true;
            }
            code if code.is_ascii_whitespace() => {}
            _ => last_is_closing = false,
        }
        index += 1;
    }

    last_is_closing && opening == closing
}

/// Given `text[open]` is `(`, return the index just past its matching `)`.
/// Quoted strings are skipped. `None` when the group never closes.
pub fn scan_group(text: &str, open: usize) -> Option<usize> {
    let bytes = text.as_bytes();
    if bytes.get(open) != Some(&LPAREN) {
        return None;
    }

    let mut depth = 0usize;
    let mut index = open;
    while index < bytes.len() {
        let code = bytes[index];
        if is_quote(code) {
            index = skip_string(bytes, index);
            continue;
        }
        match code {
            LPAREN => depth += 1,
            RPAREN => {
                depth -= 1;
                if depth == 0 {
                    return Some(index + 1);
                }
            }
            _ => {}
        }
        index += 1;
    }
    None
}
