//! Literal and Code Segments
//!
//! Splits compiled text into literal markup and embedded host-code blocks.
//! Only literal segments receive directive and echo compilation; code
//! blocks (written by hand or emitted by earlier passes) pass through.

use crate::chars::{is_quote, is_whitespace, BACKSLASH, CR, GT, HASH, LF, LT, QUESTION, SLASH, STAR};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    Literal(&'a str),
    /// Open tag through `?>` (plus one trailing newline), or to the end of
    /// input when the block is never closed.
    Code(&'a str),
}

/// Length of an open tag at `index`: `<?php` followed by whitespace or end
/// of input, or `<?=`.
fn open_tag_len(bytes: &[u8], index: usize) -> Option<usize> {
    if bytes.get(index) != Some(&LT) || bytes.get(index + 1) != Some(&QUESTION) {
        return None;
    }
    if bytes.get(index + 2) == Some(&b'=') {
        return Some(3);
    }
    let word = bytes.get(index + 2..index + 5)?;
    if !word.eq_ignore_ascii_case(b"php") {
        return None;
    }
    match bytes.get(index + 5) {
        None => Some(5),
        Some(code) if is_whitespace(*code) => Some(6),
        Some(_) => None,
    }
}

/// End of the code block whose body starts at `index`, and whether a `?>`
/// closed it.
fn code_end(bytes: &[u8], mut index: usize) -> (usize, bool) {
    while index < bytes.len() {
        let code = bytes[index];
        if is_quote(code) {
            index += 1;
            while index < bytes.len() && bytes[index] != code {
                index += if bytes[index] == BACKSLASH { 2 } else { 1 };
            }
            index += 1;
            continue;
        }
        if code == SLASH && bytes.get(index + 1) == Some(&STAR) {
            index += 2;
            while index + 1 < bytes.len() && !(bytes[index] == STAR && bytes[index + 1] == SLASH) {
                index += 1;
            }
            index += 2;
            continue;
        }
        if code == HASH || (code == SLASH && bytes.get(index + 1) == Some(&SLASH)) {
            while index < bytes.len()
                && bytes[index] != LF
                && !(bytes[index] == QUESTION && bytes.get(index + 1) == Some(&GT))
            {
                index += 1;
            }
            continue;
        }
        if code == QUESTION && bytes.get(index + 1) == Some(&GT) {
            let mut end = index + 2;
            if bytes.get(end) == Some(&LF) {
                end += 1;
            } else if bytes.get(end) == Some(&CR) && bytes.get(end + 1) == Some(&LF) {
                end += 2;
            }
            return (end, true);
        }
        index += 1;
    }
    (bytes.len(), false)
}

/// Split `text` into alternating literal and code segments, in order.
pub fn split(text: &str) -> Vec<Segment<'_>> {
    let bytes = text.as_bytes();
    let mut segments = Vec::new();
    let mut literal_start = 0;
    let mut index = 0;

    while index < bytes.len() {
        let Some(tag_len) = open_tag_len(bytes, index) else {
            index += 1;
            continue;
        };
        if literal_start < index {
            segments.push(Segment::Literal(&text[literal_start..index]));
        }
        let (end, _) = code_end(bytes, index + tag_len);
        let end = end.min(bytes.len());
        segments.push(Segment::Code(&text[index..end]));
        literal_start = end;
        index = end;
    }

    if literal_start < bytes.len() {
        segments.push(Segment::Literal(&text[literal_start..]));
    }
    segments
}

/// Whether `text` ends inside a code block that was opened but never closed.
pub fn ends_in_open_code(text: &str) -> bool {
    let bytes = text.as_bytes();
    let mut index = 0;
    let mut open = false;

    while index < bytes.len() {
        match open_tag_len(bytes, index) {
            Some(tag_len) => {
                let (end, closed) = code_end(bytes, index + tag_len);
                open = !closed;
                index = end.min(bytes.len());
            }
            None => index += 1,
        }
    }
    open
}

/// Apply `f` to every literal segment, copying code segments unchanged.
pub fn map_literals<E>(
    text: &str,
    mut f: impl FnMut(&str) -> Result<String, E>,
) -> Result<String, E> {
    let mut result = String::with_capacity(text.len());
    for segment in split(text) {
        match segment {
            Segment::Literal(literal) => result.push_str(&f(literal)?),
            Segment::Code(code) => result.push_str(code),
        }
    }
    Ok(result)
}
