//! Component Tag Compiler
//!
//! Rewrites `<x-slot>` tags into `@slot`/`@endslot` and component tags into
//! `@component` / `@endComponentClass` directives, before the statement
//! pass runs. Tag names resolve through the alias table, then namespace
//! prefixes, then the default namespace; names with no type behind them
//! fall back to an anonymous view component.

pub mod scanner;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::attributes::{AttributeParser, Attributes};
use crate::components::Components;
use crate::echo::EchoCompiler;
use crate::error::{CompileError, Result};
use crate::options::RuntimeNames;
use crate::types::normalize_identifier;
use crate::util::{camel, format_class_name, strip_quotes};

use scanner::{ends_with_forbidden_char, find_tag_end, is_valid_slot_region, is_valid_tag_region};

static SLOT_HEAD_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<\s*x[-:]slot(?::(\w+(?:-\w+)*))?").unwrap());

static SLOT_NAME_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s+name=("[^"]+"|'[^']+'|[^\s>]+)"#).unwrap());

static SLOT_BOUND_NAME_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"^\s+:name=("[^"]+"|'[^']+'|[^\s>]+)"#).unwrap());

static SLOT_CLOSING_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</\s*x[-:]slot[^>]*>").unwrap());

static TAG_HEAD_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^<\s*x[-:]([\w\-:.]*)").unwrap());

static TAG_CLOSING_REGEXP: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"</\s*x[-:][\w\-:.]*\s*>").unwrap());

const HINT_PATH_DELIMITER: &str = "::";
const CLOSING_FRAGMENT: &str = " @endComponentClass##END-COMPONENT-CLASS##";
const SELF_CLOSING_FRAGMENT: &str = "\n@endComponentClass##END-COMPONENT-CLASS##";

pub struct ComponentTagCompiler<'a> {
    components: &'a Components,
    runtime: &'a RuntimeNames,
    attributes: AttributeParser<'a>,
}

impl<'a> ComponentTagCompiler<'a> {
    pub fn new(components: &'a Components, runtime: &'a RuntimeNames, echo: &'a EchoCompiler) -> Self {
        Self {
            components,
            runtime,
            attributes: AttributeParser::new(runtime, echo),
        }
    }

    /// Compile slot tags, then component tags.
    pub fn compile(&self, value: &str) -> Result<String> {
        let value = self.compile_slots(value)?;
        self.compile_tags(&value)
    }

    pub fn compile_slots(&self, value: &str) -> Result<String> {
        let value = replace_tags(value, |start| self.compile_slot_at(value, start))?;
        Ok(SLOT_CLOSING_REGEXP.replace_all(&value, " @endslot").into_owned())
    }

    pub fn compile_tags(&self, value: &str) -> Result<String> {
        let value = replace_tags(value, |start| self.compile_tag_at(value, start))?;
        Ok(TAG_CLOSING_REGEXP
            .replace_all(&value, CLOSING_FRAGMENT)
            .into_owned())
    }

    /// Slot tag starting at `start`, as `(end, replacement)`.
    fn compile_slot_at(&self, value: &str, start: usize) -> Result<Option<(usize, String)>> {
        let Some(head) = SLOT_HEAD_REGEXP.captures(&value[start..]) else {
            return Ok(None);
        };
        let inline_name = head.get(1).map(|m| m.as_str());
        let mut position = start + head[0].len();

        let name = SLOT_NAME_REGEXP.captures(&value[position..]).map(|caps| {
            position += caps[0].len();
            caps.get(1).map_or("", |m| m.as_str())
        });
        let bound_name = SLOT_BOUND_NAME_REGEXP.captures(&value[position..]).map(|caps| {
            position += caps[0].len();
            caps.get(1).map_or("", |m| m.as_str())
        });

        let Some(gt) = find_tag_end(value, position) else {
            return Ok(None);
        };
        let region = &value[position..gt];
        if ends_with_forbidden_char(value, gt) || !is_valid_slot_region(region) {
            return Ok(None);
        }

        let mut slot_name = strip_quotes(inline_name.or(name).or(bound_name).unwrap_or("")).to_string();
        if inline_name.is_some() && slot_name.contains('-') {
            slot_name = camel(&slot_name);
        }
        if inline_name.is_some() || name.is_some() {
            slot_name = format!("'{}'", slot_name);
        }

        let mut attributes = self.attributes.parse("slot", region)?;
        if inline_name.is_some() {
            if let Some(name) = name {
                attributes.extend(self.attributes.parse("slot", &format!("name={}", name))?);
            } else if let Some(bound_name) = bound_name {
                attributes.extend(self.attributes.parse("slot", &format!(":name={}", bound_name))?);
            }
        }

        let replacement = format!(
            " @slot({}, null, [{}]) ",
            slot_name,
            attributes.to_array_entries(Some(&self.runtime.sanitizer))
        );
        Ok(Some((gt + 1, replacement)))
    }

    /// Opening or self-closing component tag starting at `start`.
    fn compile_tag_at(&self, value: &str, start: usize) -> Result<Option<(usize, String)>> {
        let Some(head) = TAG_HEAD_REGEXP.captures(&value[start..]) else {
            return Ok(None);
        };
        let tag = head.get(1).map_or("", |m| m.as_str());
        if tag.is_empty() {
            return Ok(None);
        }
        let position = start + head[0].len();

        let Some(gt) = find_tag_end(value, position) else {
            return Ok(None);
        };
        let region = &value[position..gt];

        if let Some(attribute_region) = region.strip_suffix('/') {
            if !is_valid_tag_region(attribute_region) {
                return Ok(None);
            }
            let attributes = self.attributes.parse(tag, attribute_region)?;
            let opening = self.component_string(tag, attributes)?;
            return Ok(Some((gt + 1, opening + SELF_CLOSING_FRAGMENT)));
        }

        if ends_with_forbidden_char(value, gt) || !is_valid_tag_region(region) {
            return Ok(None);
        }
        let attributes = self.attributes.parse(tag, region)?;
        Ok(Some((gt + 1, self.component_string(tag, attributes)?)))
    }

    /// Type identifier a tag name refers to, before any existence check.
    fn guess_identifier(&self, tag: &str) -> String {
        if let Some((prefix, name)) = tag.split_once(HINT_PATH_DELIMITER) {
            if let Some(namespace) = self.components.namespace(prefix) {
                return format!("{}\\{}", namespace, format_class_name(name));
            }
        }
        format!(
            "{}\\{}",
            self.components.default_namespace(),
            format_class_name(tag)
        )
    }

    fn component_string(&self, tag: &str, attributes: Attributes) -> Result<String> {
        let aliased = self.components.aliased(tag);
        let identifier = match &aliased {
            Some(identifier) => identifier.clone(),
            None => self.guess_identifier(tag),
        };

        let (class, params, data, attributes) = match self.components.descriptor(&identifier) {
            Some(descriptor) => {
                let params: Vec<String> = descriptor.params.to_vec();
                let (data, rest) = attributes.partition(&params);
                (identifier, params, data, rest)
            }
            None if aliased.is_some() => return Err(CompileError::component_resolution(tag)),
            None => {
                let view = self
                    .components
                    .find_view(tag)
                    .ok_or_else(|| CompileError::component_resolution(tag))?;
                let mut data = Attributes::new();
                data.insert("view", format!("'{}'", view));
                data.insert(
                    "data",
                    format!("[{}]", attributes.camel_keyed().to_array_entries(None)),
                );
                let class = self.runtime.anonymous_component.clone();
                let params = self
                    .components
                    .descriptor(&class)
                    .map(|descriptor| descriptor.params.to_vec())
                    .unwrap_or_default();
                (class, params, data, attributes)
            }
        };

        tracing::trace!(tag, class = %class, "compiled component tag");

        let mut fragment = format!(
            "##BEGIN-COMPONENT-CLASS##@component('{}', '{}', [{}])",
            class,
            tag,
            data.to_array_entries(None)
        );

        if !params.is_empty() {
            let names = params
                .iter()
                .map(|param| format!("'{}'", param))
                .collect::<Vec<_>>()
                .join(",");
            fragment.push_str(&format!(
                "\n<?php if (isset($attributes) && $attributes instanceof {}): ?>\n<?php $attributes = $attributes->except([{}]); ?>\n<?php endif; ?>",
                self.runtime.attribute_bag, names
            ));
        }

        let sanitizer = (normalize_identifier(&class)
            != normalize_identifier(&self.runtime.dynamic_component))
        .then_some(self.runtime.sanitizer.as_str());
        fragment.push_str(&format!(
            "\n<?php $component->withAttributes([{}]); ?>",
            attributes.to_array_entries(sanitizer)
        ));
        Ok(fragment)
    }
}

/// Walk every `<` in `value`, splicing in replacements from `compile_at`.
fn replace_tags<F>(value: &str, mut compile_at: F) -> Result<String>
where
    F: FnMut(usize) -> Result<Option<(usize, String)>>,
{
    let mut result = String::with_capacity(value.len());
    let mut cursor = 0;
    let mut search = 0;

    while let Some(offset) = value[search..].find('<') {
        let start = search + offset;
        match compile_at(start)? {
            Some((end, replacement)) => {
                result.push_str(&value[cursor..start]);
                result.push_str(&replacement);
                cursor = end;
                search = end;
            }
            None => search = start + 1,
        }
    }
    result.push_str(&value[cursor..]);
    Ok(result)
}
