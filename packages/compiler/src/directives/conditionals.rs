//! Conditional Directives

use std::collections::HashMap;

use super::{raw, stripped, Rule};
use crate::compiler::Compiler;
use crate::error::Result;

pub(super) fn register(rules: &mut HashMap<&'static str, Rule>) {
    rules.insert("if", compile_if);
    rules.insert("elseif", compile_elseif);
    rules.insert("else", compile_else);
    rules.insert("endif", end_if);
    rules.insert("unless", compile_unless);
    rules.insert("endunless", end_if);
    rules.insert("isset", compile_isset);
    rules.insert("endisset", end_if);
    rules.insert("empty", compile_empty);
    rules.insert("endempty", end_if);
    rules.insert("switch", compile_switch);
    rules.insert("case", compile_case);
    rules.insert("default", compile_default);
    rules.insert("endswitch", compile_end_switch);
    rules.insert("hassection", compile_has_section);
    rules.insert("sectionmissing", compile_section_missing);
    rules.insert("env", compile_env);
    rules.insert("endenv", end_if);
    rules.insert("production", compile_production);
    rules.insert("endproduction", end_if);
    rules.insert("once", compile_once);
    rules.insert("endonce", end_if);
    rules.insert("selected", compile_selected);
    rules.insert("checked", compile_checked);
    rules.insert("disabled", compile_disabled);
    rules.insert("required", compile_required);
    rules.insert("readonly", compile_readonly);
    rules.insert("pushif", compile_push_if);
    rules.insert("elsepushif", compile_else_push_if);
    rules.insert("elsepush", compile_else_push);
    rules.insert("endpushif", compile_end_push_if);
}

fn compile_if(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!("<?php if{}: ?>", raw(expression)))
}

fn compile_elseif(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!("<?php elseif{}: ?>", raw(expression)))
}

fn compile_else(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php else: ?>".to_string())
}

fn end_if(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php endif; ?>".to_string())
}

fn compile_unless(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!("<?php if (! {}): ?>", raw(expression)))
}

fn compile_isset(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!("<?php if(isset{}): ?>", raw(expression)))
}

/// `@empty($x)` tests emptiness; a bare `@empty` is the `@forelse` fallback
/// branch and closes the loop opened by the matching `@forelse`.
fn compile_empty(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    if let Some(expression) = expression.filter(|e| !e.is_empty()) {
        return Ok(format!("<?php if(empty{}): ?>", expression));
    }

    let empty = format!("$__empty_{}", compiler.for_else_counter);
    compiler.for_else_counter -= 1;
    Ok(format!(
        "<?php endforeach; $__env->popLoop(); $loop = $__env->getLastLoop(); if ({}): ?>",
        empty
    ))
}

fn compile_switch(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    compiler.first_case_in_switch = true;
    Ok(format!("<?php switch{}:", raw(expression)))
}

/// The first case shares the code block opened by `@switch`.
fn compile_case(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    if compiler.first_case_in_switch {
        compiler.first_case_in_switch = false;
        return Ok(format!("case {}: ?>", raw(expression)));
    }
    Ok(format!("<?php case {}: ?>", raw(expression)))
}

fn compile_default(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php default: ?>".to_string())
}

fn compile_end_switch(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php endswitch; ?>".to_string())
}

fn compile_has_section(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!(
        "<?php if (! empty(trim($__env->yieldContent{}))): ?>",
        raw(expression)
    ))
}

fn compile_section_missing(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!(
        "<?php if (empty(trim($__env->yieldContent{}))): ?>",
        raw(expression)
    ))
}

fn compile_env(_: &mut Compiler, environments: Option<&str>) -> Result<String> {
    Ok(format!("<?php if(app()->environment{}): ?>", raw(environments)))
}

fn compile_production(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php if(app()->environment('production')): ?>".to_string())
}

fn compile_once(compiler: &mut Compiler, id: Option<&str>) -> Result<String> {
    let id = match id.filter(|id| !id.is_empty()) {
        Some(id) => stripped(Some(id)).to_string(),
        None => format!("'{}'", compiler.next_once_id()),
    };
    Ok(format!(
        "<?php if (! $__env->hasRenderedOnce({id})): $__env->markAsRenderedOnce({id}); ?>"
    ))
}

fn echo_if(condition: Option<&str>, attribute: &str) -> String {
    format!("<?php if{}: echo '{}'; endif; ?>", raw(condition), attribute)
}

fn compile_selected(_: &mut Compiler, condition: Option<&str>) -> Result<String> {
    Ok(echo_if(condition, "selected"))
}

fn compile_checked(_: &mut Compiler, condition: Option<&str>) -> Result<String> {
    Ok(echo_if(condition, "checked"))
}

fn compile_disabled(_: &mut Compiler, condition: Option<&str>) -> Result<String> {
    Ok(echo_if(condition, "disabled"))
}

fn compile_required(_: &mut Compiler, condition: Option<&str>) -> Result<String> {
    Ok(echo_if(condition, "required"))
}

fn compile_readonly(_: &mut Compiler, condition: Option<&str>) -> Result<String> {
    Ok(echo_if(condition, "readonly"))
}

/// Split `(condition, stack...)` at the first comma.
fn condition_and_stack(expression: Option<&str>) -> (&str, &str) {
    stripped(expression).split_once(',').unwrap_or((stripped(expression), ""))
}

fn compile_push_if(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    let (condition, stack) = condition_and_stack(expression);
    Ok(format!(
        "<?php if({}): $__env->startPush({}); ?>",
        condition, stack
    ))
}

fn compile_else_push_if(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    let (condition, stack) = condition_and_stack(expression);
    Ok(format!(
        "<?php $__env->stopPush(); elseif({}): $__env->startPush({}); ?>",
        condition, stack
    ))
}

fn compile_else_push(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!(
        "<?php $__env->stopPush(); else: $__env->startPush{}; ?>",
        raw(expression)
    ))
}

fn compile_end_push_if(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php $__env->stopPush(); endif; ?>".to_string())
}
