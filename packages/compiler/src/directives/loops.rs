//! Loop Directives

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use super::{raw, Rule};
use crate::compiler::Compiler;
use crate::error::{CompileError, Result};

static FOREACH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?is)^\( *(.+) +as +(.*)\)$").unwrap());
static FORELSE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)^\( *(.+) +as +([^\)]+)\)$").unwrap());
static LEVEL: Lazy<Regex> = Lazy::new(|| Regex::new(r"\(\s*(-?\d+)\s*\)$").unwrap());

pub(super) fn register(rules: &mut HashMap<&'static str, Rule>) {
    rules.insert("for", compile_for);
    rules.insert("endfor", compile_end_for);
    rules.insert("foreach", compile_foreach);
    rules.insert("endforeach", compile_end_foreach);
    rules.insert("forelse", compile_forelse);
    rules.insert("endforelse", compile_end_forelse);
    rules.insert("while", compile_while);
    rules.insert("endwhile", compile_end_while);
    rules.insert("break", compile_break);
    rules.insert("continue", compile_continue);
}

/// Split `($iteratee as $iteration)` into its two halves.
fn loop_parts<'a>(
    pattern: &Regex,
    directive: &str,
    expression: Option<&'a str>,
) -> Result<(&'a str, &'a str)> {
    let expression = raw(expression);
    let captures = pattern
        .captures(expression)
        .ok_or_else(|| CompileError::malformed(directive, "expected `(<iterable> as <binding>)`"))?;
    let iteratee = captures.get(1).map_or("", |m| m.as_str()).trim();
    let iteration = captures.get(2).map_or("", |m| m.as_str()).trim();
    Ok((iteratee, iteration))
}

fn compile_for(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!("<?php for{}: ?>", raw(expression)))
}

fn compile_end_for(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php endfor; ?>".to_string())
}

fn compile_foreach(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    let (iteratee, iteration) = loop_parts(&FOREACH, "foreach", expression)?;
    Ok(format!(
        "<?php $__currentLoopData = {}; $__env->addLoop($__currentLoopData); foreach($__currentLoopData as {}): $__env->incrementLoopIndices(); $loop = $__env->getLastLoop(); ?>",
        iteratee, iteration
    ))
}

fn compile_end_foreach(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php endforeach; $__env->popLoop(); $loop = $__env->getLastLoop(); ?>".to_string())
}

/// Each `@forelse` gets its own `$__empty_N` flag so nested loops keep
/// their fallbacks apart; the matching bare `@empty` counts back down.
fn compile_forelse(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    let (iteratee, iteration) = loop_parts(&FORELSE, "forelse", expression)?;
    compiler.for_else_counter += 1;
    let empty = format!("$__empty_{}", compiler.for_else_counter);
    Ok(format!(
        "<?php {empty} = true; $__currentLoopData = {iteratee}; $__env->addLoop($__currentLoopData); foreach($__currentLoopData as {iteration}): $__env->incrementLoopIndices(); $loop = $__env->getLastLoop(); {empty} = false; ?>"
    ))
}

fn compile_end_forelse(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php endif; ?>".to_string())
}

fn compile_while(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!("<?php while{}: ?>", raw(expression)))
}

fn compile_end_while(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php endwhile; ?>".to_string())
}

/// `@break(2)` leaves two levels, `@break($done)` leaves conditionally.
fn jump(keyword: &str, expression: Option<&str>) -> String {
    match expression.filter(|e| !e.is_empty()) {
        Some(expression) => match LEVEL.captures(expression) {
            Some(captures) => {
                let level = captures[1].parse::<i64>().unwrap_or(1).max(1);
                format!("<?php {} {}; ?>", keyword, level)
            }
            None => format!("<?php if{} {}; ?>", expression, keyword),
        },
        None => format!("<?php {}; ?>", keyword),
    }
}

fn compile_break(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(jump("break", expression))
}

fn compile_continue(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(jump("continue", expression))
}
