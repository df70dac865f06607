//! Component Directives
//!
//! `@component` either starts a view component or, for class components,
//! resolves the instance and saves any enclosing `$component`/`$attributes`
//! under a per-instance hash so `@endComponentClass` can restore them.

use std::collections::HashMap;

use super::{raw, Rule};
use crate::compiler::Compiler;
use crate::error::Result;
use crate::options::RuntimeNames;
use crate::types::normalize_identifier;
use crate::util::trim_chars;

pub(super) fn register(rules: &mut HashMap<&'static str, Rule>) {
    rules.insert("component", compile_component);
    rules.insert("endcomponent", compile_end_component);
    rules.insert("endcomponentclass", compile_end_component_class);
    rules.insert("componentfirst", compile_component_first);
    rules.insert("endcomponentfirst", compile_end_component);
    rules.insert("slot", compile_slot);
    rules.insert("endslot", compile_end_slot);
    rules.insert("props", compile_props);
    rules.insert("aware", compile_aware);
}

/// `(component, alias, data)`, each trimmed; missing parts are empty.
fn component_parts(expression: &str) -> (String, String, String) {
    let inner = trim_chars(expression, "()");
    let mut parts = inner.splitn(3, ',').map(str::trim);
    let component = parts.next().unwrap_or("");
    let alias = parts.next().unwrap_or("");
    let data = parts.next().unwrap_or("");
    (
        trim_chars(component, "'\"").to_string(),
        alias.to_string(),
        data.to_string(),
    )
}

fn compile_component(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    let expression = raw(expression);
    let (component, alias, data) = component_parts(expression);

    let anonymous = normalize_identifier(&compiler.options.runtime.anonymous_component);
    let identifier = if normalize_identifier(&component) == anonymous {
        format!("{}:{}", component, trim_chars(&alias, "'\""))
    } else {
        component.clone()
    };
    let hash = compiler.new_component_hash(&identifier);

    let is_class = component.contains("::class")
        || component.contains('\\')
        || compiler.components.has_type(&component);
    if is_class {
        return Ok(class_component_opening(
            &compiler.options.runtime,
            &component,
            &alias,
            &data,
            &hash,
        ));
    }

    Ok(format!("<?php $__env->startComponent{}; ?>", expression))
}

/// Opening code for a class component: resolve, name, and start rendering.
pub(crate) fn class_component_opening(
    runtime: &RuntimeNames,
    component: &str,
    alias: &str,
    data: &str,
    hash: &str,
) -> String {
    let data = if data.is_empty() { "[]" } else { data };
    [
        format!("<?php if (isset($component)) {{ $__componentOriginal{hash} = $component; }} ?>"),
        format!("<?php if (isset($attributes)) {{ $__attributesOriginal{hash} = $attributes; }} ?>"),
        format!(
            "<?php $component = {component}::resolve({data} + (isset($attributes) && $attributes instanceof {bag} ? (array) $attributes->getIterator() : [])); ?>",
            bag = runtime.attribute_bag
        ),
        format!("<?php $component->withName({alias}); ?>"),
        "<?php if ($component->shouldRender()): ?>".to_string(),
        "<?php $__env->startComponent($component->resolveView(), $component->data()); ?>"
            .to_string(),
    ]
    .join("\n")
}

fn compile_end_component(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php echo $__env->renderComponent(); ?>".to_string())
}

/// Closes the innermost class component and restores the saved variables.
fn compile_end_component_class(compiler: &mut Compiler, _: Option<&str>) -> Result<String> {
    let hash = compiler.component_hash_stack.pop().unwrap_or_default();
    let restore = [
        "<?php endif; ?>".to_string(),
        format!("<?php if (isset($__attributesOriginal{hash})): ?>"),
        format!("<?php $attributes = $__attributesOriginal{hash}; ?>"),
        format!("<?php unset($__attributesOriginal{hash}); ?>"),
        "<?php endif; ?>".to_string(),
        format!("<?php if (isset($__componentOriginal{hash})): ?>"),
        format!("<?php $component = $__componentOriginal{hash}; ?>"),
        format!("<?php unset($__componentOriginal{hash}); ?>"),
        "<?php endif; ?>".to_string(),
    ]
    .join("\n");

    Ok(format!(
        "<?php echo $__env->renderComponent(); ?>\n{}",
        restore
    ))
}

fn compile_component_first(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!("<?php $__env->startComponentFirst{}; ?>", raw(expression)))
}

fn compile_slot(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!("<?php $__env->slot{}; ?>", raw(expression)))
}

fn compile_end_slot(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php $__env->endSlot(); ?>".to_string())
}

/// Pull declared props out of `$attributes` into local variables.
fn compile_props(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    let expression = raw(expression);
    let bag = &compiler.options.runtime.attribute_bag;
    Ok(format!(
        "<?php $attributes ??= new \\{bag}; ?>
<?php foreach($attributes->onlyProps{expression} as $__key => $__value) {{
    $$__key = $$__key ?? $__value;
}} ?>
<?php $__defined_vars = get_defined_vars(); ?>
<?php foreach ($attributes->exceptProps{expression} as $__key => $__value) {{
    if (array_key_exists($__key, $__defined_vars)) unset($$__key);
}} ?>
<?php unset($__defined_vars); ?>"
    ))
}

/// Pull values handed down by parent components into local variables.
fn compile_aware(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    let expression = raw(expression);
    Ok(format!(
        "<?php foreach ({expression} as $__key => $__value) {{
    $__consumeVariable = is_string($__key) ? $__key : $__value;
    $$__consumeVariable = is_string($__key) ? $__env->getConsumableComponentData($__key, $__value) : $__env->getConsumableComponentData($__value);
}} ?>"
    ))
}
