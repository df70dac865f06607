//! Helper Directives

use std::collections::HashMap;

use super::{raw, stripped, Rule};
use crate::compiler::Compiler;
use crate::error::Result;

/// `JSON_HEX_TAG | JSON_HEX_APOS | JSON_HEX_AMP | JSON_HEX_QUOT`
const JSON_ENCODING_OPTIONS: &str = "15";
const JSON_DEPTH: &str = "512";

pub(super) fn register(rules: &mut HashMap<&'static str, Rule>) {
    rules.insert("php", compile_php);
    rules.insert("unset", compile_unset);
    rules.insert("json", compile_json);
    rules.insert("js", compile_js);
    rules.insert("class", compile_class);
    rules.insert("style", compile_style);
    rules.insert("dd", compile_dd);
    rules.insert("dump", compile_dump);
    rules.insert("method", compile_method);
    rules.insert("csrf", compile_csrf);
}

/// Inline `@php($x = 1)`. A bare `@php` left over after block extraction
/// has no closing `@endphp` and stays as written.
fn compile_php(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    match expression.filter(|e| !e.is_empty()) {
        Some(expression) => Ok(format!("<?php {}; ?>", expression)),
        None => Ok("@php".to_string()),
    }
}

fn compile_unset(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!("<?php unset{}; ?>", raw(expression)))
}

fn compile_json(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    let parts: Vec<&str> = stripped(expression).split(',').collect();
    let value = parts.first().copied().unwrap_or("");
    let options = parts.get(1).map_or(JSON_ENCODING_OPTIONS, |part| part.trim());
    let depth = parts.get(2).map_or(JSON_DEPTH, |part| part.trim());
    Ok(format!(
        "<?php echo json_encode({}, {}, {}) ?>",
        value, options, depth
    ))
}

fn compile_js(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!(
        "<?php echo {}::from({}); ?>",
        compiler.options.runtime.js,
        stripped(expression)
    ))
}

fn compile_class(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    let expression = expression.filter(|e| !e.is_empty()).unwrap_or("([])");
    Ok(format!(
        "class=\"<?php echo {}{}; ?>\"",
        compiler.options.runtime.css_classes, expression
    ))
}

fn compile_style(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    let expression = expression.filter(|e| !e.is_empty()).unwrap_or("([])");
    Ok(format!(
        "style=\"<?php echo {}{} ?>\"",
        compiler.options.runtime.css_styles, expression
    ))
}

fn compile_dd(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!("<?php dd{}; ?>", raw(expression)))
}

fn compile_dump(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!("<?php dump{}; ?>", raw(expression)))
}

fn compile_method(_: &mut Compiler, method: Option<&str>) -> Result<String> {
    Ok(format!("<?php echo method_field{}; ?>", raw(method)))
}

fn compile_csrf(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php echo csrf_field(); ?>".to_string())
}
