//! Raw Block Store
//!
//! `@verbatim ... @endverbatim` and `@php ... @endphp` regions are lifted out
//! of the template before any other pass runs and replaced with numbered
//! placeholders. After compilation the placeholders are swapped back in a
//! single pass.

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::chars::AT;

static PLACEHOLDER_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"@__raw_block_(\d+)__@").unwrap());

/// Placeholder text for the block at `index`.
pub fn placeholder(index: usize) -> String {
    format!("@__raw_block_{}__@", index)
}

#[derive(Debug, Default, Clone)]
pub struct RawBlockStore {
    blocks: Vec<String>,
}

impl RawBlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    pub fn clear(&mut self) {
        self.blocks.clear();
    }

    /// Store `value` and return its placeholder.
    pub fn store(&mut self, value: String) -> String {
        self.blocks.push(value);
        placeholder(self.blocks.len() - 1)
    }

    /// Lift out verbatim regions, then raw-code regions.
    pub fn extract(&mut self, source: &str) -> String {
        let mut value = source.to_string();

        if value.contains("@verbatim") {
            value = self.extract_regions(&value, "@verbatim", "@endverbatim", |body| body.to_string());
        }
        if value.contains("@php") {
            value = self.extract_regions(&value, "@php", "@endphp", |body| format!("<?php{}?>", body));
        }
        value
    }

    /// Replace each `start ... end` region not escaped by a preceding `@`.
    /// The body is the shortest span up to the next `end` marker.
    fn extract_regions(
        &mut self,
        value: &str,
        start: &str,
        end: &str,
        wrap: impl Fn(&str) -> String,
    ) -> String {
        let bytes = value.as_bytes();
        let mut result = String::with_capacity(value.len());
        let mut copied = 0;
        let mut cursor = 0;

        while let Some(offset) = value[cursor..].find(start) {
            let open = cursor + offset;
            if open > 0 && bytes[open - 1] == AT {
                cursor = open + 1;
                continue;
            }
            let body_start = open + start.len();
            let Some(close_offset) = value[body_start..].find(end) else {
                break;
            };
            let body_end = body_start + close_offset;

            result.push_str(&value[copied..open]);
            result.push_str(&self.store(wrap(&value[body_start..body_end])));
            copied = body_end + end.len();
            cursor = copied;
        }

        result.push_str(&value[copied..]);
        result
    }

    /// Swap every placeholder for its stored block and clear the store.
    /// Placeholders with no stored block are left as they are.
    pub fn restore(&mut self, text: &str) -> String {
        let blocks = &self.blocks;
        let restored = PLACEHOLDER_REGEXP
            .replace_all(text, |caps: &Captures| {
                caps[1]
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| blocks.get(index))
                    .cloned()
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned();
        self.clear();
        restored
    }
}
