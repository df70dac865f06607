//! Layout Directives
//!
//! Template inheritance. `@extends` renders the parent after the child, so
//! it is queued on the footer instead of emitted in place.

use std::collections::HashMap;

use super::{raw, stripped, Rule};
use crate::compiler::Compiler;
use crate::error::Result;
use crate::util::{escape_single_quoted, trim_chars};

pub(super) fn register(rules: &mut HashMap<&'static str, Rule>) {
    rules.insert("extends", compile_extends);
    rules.insert("extendsfirst", compile_extends_first);
    rules.insert("section", compile_section);
    rules.insert("parent", compile_parent);
    rules.insert("yield", compile_yield);
    rules.insert("show", compile_show);
    rules.insert("append", compile_append);
    rules.insert("overwrite", compile_overwrite);
    rules.insert("stop", compile_stop);
    rules.insert("endsection", compile_stop);
}

fn compile_extends(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    let line = format!(
        "<?php echo $__env->make({}, {}); ?>",
        stripped(expression),
        compiler.options.runtime.defined_vars()
    );
    compiler.footer.push(line);
    Ok(String::new())
}

fn compile_extends_first(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    let line = format!(
        "<?php echo $__env->first({}, {}); ?>",
        stripped(expression),
        compiler.options.runtime.defined_vars()
    );
    compiler.footer.push(line);
    Ok(String::new())
}

fn compile_section(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    compiler.last_section = trim_chars(raw(expression), "()'\" ").to_string();
    Ok(format!("<?php $__env->startSection{}; ?>", raw(expression)))
}

/// Placeholder later replaced with the parent's section content.
fn compile_parent(compiler: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok(format!(
        "<?php echo {}::parentPlaceholder('{}'); ?>",
        compiler.options.runtime.renderer,
        escape_single_quoted(&compiler.last_section)
    ))
}

fn compile_yield(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!("<?php echo $__env->yieldContent{}; ?>", raw(expression)))
}

fn compile_show(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php echo $__env->yieldSection(); ?>".to_string())
}

fn compile_append(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php $__env->appendSection(); ?>".to_string())
}

fn compile_overwrite(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php $__env->stopSection(true); ?>".to_string())
}

fn compile_stop(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php $__env->stopSection(); ?>".to_string())
}
