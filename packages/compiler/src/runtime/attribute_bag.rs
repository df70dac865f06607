//! Attribute Bag
//!
//! Ordered attribute map handed to component views, with the merge rules
//! used when a component combines its defaults with caller attributes.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::html::escape;
use crate::util::kebab;

/// A default for [`AttributeBag::merge`]. `Prepends` defaults are combined
/// with the caller's value instead of being replaced by it.
#[derive(Debug, Clone, PartialEq)]
pub enum AttributeDefault {
    Value(Value),
    Prepends(Value),
}

impl From<Value> for AttributeDefault {
    fn from(value: Value) -> Self {
        AttributeDefault::Value(value)
    }
}

impl From<&str> for AttributeDefault {
    fn from(value: &str) -> Self {
        AttributeDefault::Value(Value::from(value))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AttributeBag {
    attributes: IndexMap<String, Value>,
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for AttributeBag {
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        Self {
            attributes: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

fn is_falsy(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(flag) => !flag,
        Value::String(text) => text.is_empty() || text == "0",
        Value::Number(number) => number.as_f64() == Some(0.0),
        Value::Array(items) => items.is_empty(),
        Value::Object(map) => map.is_empty(),
    }
}

fn text_of(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => String::new(),
        other => other.to_string(),
    }
}

/// Escape a default unless escaping is off or it is null or a boolean.
fn escape_default(value: Value, escape_values: bool) -> Value {
    match value {
        Value::String(text) if escape_values => Value::String(escape(&text, true)),
        Value::Number(number) if escape_values => Value::String(escape(&number.to_string(), true)),
        other => other,
    }
}

impl AttributeBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark a default value as one the caller's value is appended to.
    pub fn prepends(value: impl Into<Value>) -> AttributeDefault {
        AttributeDefault::Prepends(value.into())
    }

    pub fn first(&self) -> Option<&Value> {
        self.attributes.values().next()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    /// Whether every key is present.
    pub fn has(&self, keys: &[&str]) -> bool {
        keys.iter().all(|key| self.attributes.contains_key(*key))
    }

    pub fn has_any(&self, keys: &[&str]) -> bool {
        keys.iter().any(|key| self.attributes.contains_key(*key))
    }

    pub fn missing(&self, key: &str) -> bool {
        !self.attributes.contains_key(key)
    }

    pub fn only(&self, keys: &[&str]) -> AttributeBag {
        self.filter(|_, key| keys.contains(&key))
    }

    pub fn except(&self, keys: &[&str]) -> AttributeBag {
        self.filter(|_, key| !keys.contains(&key))
    }

    pub fn filter<F>(&self, predicate: F) -> AttributeBag
    where
        F: Fn(&Value, &str) -> bool,
    {
        AttributeBag {
            attributes: self
                .attributes
                .iter()
                .filter(|(key, value)| predicate(value, key))
                .map(|(key, value)| (key.clone(), value.clone()))
                .collect(),
        }
    }

    pub fn where_starts_with(&self, needles: &[&str]) -> AttributeBag {
        self.filter(|_, key| needles.iter().any(|needle| key.starts_with(needle)))
    }

    pub fn where_doesnt_start_with(&self, needles: &[&str]) -> AttributeBag {
        self.filter(|_, key| !needles.iter().any(|needle| key.starts_with(needle)))
    }

    /// Declared props, matched by name and by kebab-cased name.
    pub fn only_props(&self, props: &[&str]) -> AttributeBag {
        let names = prop_names(props);
        self.filter(|_, key| names.iter().any(|name| name == key))
    }

    pub fn except_props(&self, props: &[&str]) -> AttributeBag {
        let names = prop_names(props);
        self.filter(|_, key| !names.iter().any(|name| name == key))
    }

    /// Merge `defaults` under this bag's attributes.
    ///
    /// `class`, `style` and keys whose default is [`AttributeDefault::Prepends`]
    /// are combined: default first, falsy parts dropped, duplicates removed,
    /// joined with a space. Every other attribute replaces its default.
    pub fn merge(&self, defaults: IndexMap<String, AttributeDefault>, escape_values: bool) -> AttributeBag {
        let mut appendable: IndexMap<String, Value> = IndexMap::new();
        let mut others: IndexMap<String, Value> = IndexMap::new();

        for (key, value) in &self.attributes {
            let prepends = matches!(defaults.get(key), Some(AttributeDefault::Prepends(_)));
            if key == "class" || key == "style" || prepends {
                let default = match defaults.get(key) {
                    Some(AttributeDefault::Prepends(value)) | Some(AttributeDefault::Value(value)) => {
                        escape_default(value.clone(), escape_values)
                    }
                    None => Value::String(String::new()),
                };

                let mut own = text_of(value);
                if key == "style" && !own.ends_with(';') {
                    own.push(';');
                }

                let mut parts: Vec<String> = Vec::with_capacity(2);
                for part in [default, Value::String(own)] {
                    if is_falsy(&part) {
                        continue;
                    }
                    let part = text_of(&part);
                    if !parts.contains(&part) {
                        parts.push(part);
                    }
                }
                appendable.insert(key.clone(), Value::String(parts.join(" ")));
            } else {
                others.insert(key.clone(), value.clone());
            }
        }

        let mut merged: IndexMap<String, Value> = defaults
            .into_iter()
            .map(|(key, default)| {
                let value = match default {
                    AttributeDefault::Value(value) | AttributeDefault::Prepends(value) => value,
                };
                (key, escape_default(value, escape_values))
            })
            .collect();
        merged.extend(appendable);
        merged.extend(others);

        AttributeBag { attributes: merged }
    }

    /// Replace the attributes. With a `parent` bag the new entries are
    /// merged into the parent, unescaped.
    pub fn set_attributes(&mut self, attributes: IndexMap<String, Value>, parent: Option<&AttributeBag>) {
        self.attributes = match parent {
            Some(parent) => {
                let defaults = attributes
                    .into_iter()
                    .map(|(key, value)| (key, AttributeDefault::Value(value)))
                    .collect();
                parent.merge(defaults, false).attributes
            }
            None => attributes,
        };
    }

    pub fn attributes(&self) -> &IndexMap<String, Value> {
        &self.attributes
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.attributes.insert(key.into(), value.into());
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.attributes.shift_remove(key)
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    /// Whether the bag renders to nothing.
    pub fn is_empty(&self) -> bool {
        self.to_string().trim().is_empty()
    }
}

fn prop_names(props: &[&str]) -> Vec<String> {
    props
        .iter()
        .flat_map(|prop| [prop.to_string(), kebab(prop)])
        .collect()
}

impl fmt::Display for AttributeBag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (key, value) in &self.attributes {
            let text = match value {
                Value::Null | Value::Bool(false) => continue,
                // x-data with no value must stay empty for Alpine
                Value::Bool(true) if key == "x-data" => String::new(),
                Value::Bool(true) => key.clone(),
                other => text_of(other),
            };
            if !first {
                f.write_str(" ")?;
            }
            first = false;
            write!(f, "{}=\"{}\"", key, text.trim().replace('"', "\\\""))?;
        }
        Ok(())
    }
}
