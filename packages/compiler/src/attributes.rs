//! Component Attributes
//!
//! Parses the attribute region of a component or slot tag into ordered
//! name/value entries. Literal values become quoted host strings with any
//! echoes concatenated in; bound values (`:name="expr"`) are kept as
//! expressions and remembered so they can be sanitized at render time.

use std::collections::HashSet;

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::balanced::scan_group;
use crate::echo::EchoCompiler;
use crate::error::{CompileError, Result};
use crate::options::RuntimeNames;
use crate::segments::{split, Segment};
use crate::util::{camel, is_numeric, strip_quotes};

/// `:$userId` shorthand.
static SHORT_ATTRIBUTE_REGEXP: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s:\$(\w+)").unwrap());

/// `{{ $attributes }}` or `{{ $attributes->merge(...) }}` passed straight through.
static ATTRIBUTE_BAG_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?:^|\s+)\{\{\s*(\$attributes(?:[^}]+?)?)\s*\}\}").unwrap());

static BIND_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)(?:^|\s+):([\w\-:.@]+)=").unwrap());

static ATTRIBUTE_REGEXP: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"([\w\-:.@%]+)(=("[^"]+"|'[^']+'|[^\s>]+))?"#).unwrap()
});

const BIND_PREFIX: &str = "bind:";

/// Ordered attribute entries; later duplicates replace the value in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attributes {
    entries: IndexMap<String, String>,
    bound: HashSet<String>,
}

impl Attributes {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(name.into(), value.into());
    }

    pub fn insert_bound(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.bound.insert(name.clone());
        self.entries.insert(name, value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.get(name).map(String::as_str)
    }

    pub fn is_bound(&self, name: &str) -> bool {
        self.bound.contains(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merge `other` in; existing names keep their position.
    pub fn extend(&mut self, other: Attributes) {
        self.bound.extend(other.bound);
        self.entries.extend(other.entries);
    }

    /// Entries with camel-cased names. Data entries are never sanitized, so
    /// the bound markers are dropped.
    pub fn camel_keyed(&self) -> Attributes {
        Attributes {
            entries: self
                .entries
                .iter()
                .map(|(name, value)| (camel(name), value.clone()))
                .collect(),
            bound: HashSet::new(),
        }
    }

    /// Split into constructor data (camel-cased names found in `params`)
    /// and the remaining attributes.
    pub fn partition(&self, params: &[String]) -> (Attributes, Attributes) {
        let mut data = Attributes::new();
        let mut rest = Attributes::new();
        for (name, value) in &self.entries {
            let key = camel(name);
            if params.iter().any(|param| *param == key) {
                data.insert(key, value.clone());
            } else if self.bound.contains(name) {
                rest.insert_bound(name.clone(), value.clone());
            } else {
                rest.insert(name.clone(), value.clone());
            }
        }
        (data, rest)
    }

    /// `'name' => value` entries joined with `,`. With a sanitizer, bound
    /// values other than `true` and numbers are wrapped in it.
    pub fn to_array_entries(&self, sanitizer: Option<&str>) -> String {
        self.entries
            .iter()
            .map(|(name, value)| match sanitizer {
                Some(sanitizer)
                    if self.bound.contains(name) && value != "true" && !is_numeric(value) =>
                {
                    format!("'{}' => {}({})", name, sanitizer, value)
                }
                _ => format!("'{}' => {}", name, value),
            })
            .collect::<Vec<_>>()
            .join(",")
    }
}

pub struct AttributeParser<'a> {
    runtime: &'a RuntimeNames,
    echo: &'a EchoCompiler,
}

impl<'a> AttributeParser<'a> {
    pub fn new(runtime: &'a RuntimeNames, echo: &'a EchoCompiler) -> Self {
        Self { runtime, echo }
    }

    /// Parse the attribute region of `tag`.
    pub fn parse(&self, tag: &str, attribute_string: &str) -> Result<Attributes> {
        let value = parse_short_attribute_syntax(attribute_string);
        let value = parse_attribute_bag(&value);
        let value = self.parse_css_statement(&value, "@class(", "class", &self.runtime.css_classes);
        let value = self.parse_css_statement(&value, "@style(", "style", &self.runtime.css_styles);
        let value = parse_bind_attributes(&value);

        let mut attributes = Attributes::new();
        for caps in ATTRIBUTE_REGEXP.captures_iter(&value) {
            let mut name = caps[1].to_string();
            let raw_value = caps.get(3).map(|m| m.as_str());

            let (bound, value) = match raw_value {
                None => (true, "true".to_string()),
                Some(raw) => {
                    let raw = strip_quotes(raw);
                    match name.strip_prefix(BIND_PREFIX) {
                        Some(stripped) => {
                            if raw.trim().is_empty() {
                                return Err(CompileError::AttributeParse {
                                    tag: tag.to_string(),
                                    attribute: stripped.to_string(),
                                    reason: "bound attribute has an empty expression".to_string(),
                                });
                            }
                            name = stripped.to_string();
                            (true, raw.to_string())
                        }
                        None => (false, format!("'{}'", self.compile_attribute_echos(raw))),
                    }
                }
            };

            if name.starts_with("::") {
                name.remove(0);
            }

            if bound {
                attributes.insert_bound(name, value);
            } else {
                attributes.insert(name, value);
            }
        }
        Ok(attributes)
    }

    /// `@class([...])` becomes `:class="<classes>([...])"`; the argument
    /// group is matched with quotes taken into account.
    fn parse_css_statement(
        &self,
        value: &str,
        statement: &str,
        attribute: &str,
        helper: &str,
    ) -> String {
        let mut result = String::with_capacity(value.len());
        let mut cursor = 0;

        while let Some(offset) = value[cursor..].find(statement) {
            let start = cursor + offset;
            let open = start + statement.len() - 1;
            let Some(end) = scan_group(value, open) else {
                break;
            };
            result.push_str(&value[cursor..start]);
            result.push_str(&format!(
                ":{}=\"{}{}\"",
                attribute,
                helper,
                value[open..end].replace('"', "'")
            ));
            cursor = end;
        }
        result.push_str(&value[cursor..]);
        result
    }

    /// Echoes inside a literal value become string concatenation.
    fn compile_attribute_echos(&self, value: &str) -> String {
        let compiled = self.echo.compile(value);
        let escaped: String = split(&compiled)
            .into_iter()
            .map(|segment| match segment {
                Segment::Literal(text) => text.replace('\'', "\\'"),
                Segment::Code(code) => code.to_string(),
            })
            .collect();
        escaped.replace("<?php echo ", "'.").replace("; ?>", ".'")
    }
}

fn parse_short_attribute_syntax(value: &str) -> String {
    SHORT_ATTRIBUTE_REGEXP
        .replace_all(value, |caps: &Captures| format!(" :{0}=\"${0}\"", &caps[1]))
        .into_owned()
}

fn parse_attribute_bag(value: &str) -> String {
    ATTRIBUTE_BAG_REGEXP
        .replace_all(value, |caps: &Captures| {
            format!(" :attributes=\"{}\"", caps[1].trim_end())
        })
        .into_owned()
}

/// `:name=` becomes `bind:name=`; `::name=` is an escaped literal.
fn parse_bind_attributes(value: &str) -> String {
    BIND_REGEXP
        .replace_all(value, |caps: &Captures| {
            if caps[1].starts_with(':') {
                caps[0].to_string()
            } else {
                format!(" {}{}=", BIND_PREFIX, &caps[1])
            }
        })
        .into_owned()
}
