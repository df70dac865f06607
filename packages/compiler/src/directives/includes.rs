//! Include Directives

use std::collections::HashMap;

use super::{raw, stripped, Rule};
use crate::compiler::Compiler;
use crate::error::Result;

pub(super) fn register(rules: &mut HashMap<&'static str, Rule>) {
    rules.insert("each", compile_each);
    rules.insert("include", compile_include);
    rules.insert("includeif", compile_include_if);
    rules.insert("includewhen", compile_include_when);
    rules.insert("includeunless", compile_include_unless);
    rules.insert("includefirst", compile_include_first);
}

fn compile_each(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!("<?php echo $__env->renderEach{}; ?>", raw(expression)))
}

/// `$__env->{method}(<arguments>, <local scope>)`.
fn render_with_scope(compiler: &Compiler, method: &str, expression: Option<&str>) -> String {
    format!(
        "<?php echo $__env->{}({}, {}); ?>",
        method,
        stripped(expression),
        compiler.options.runtime.defined_vars()
    )
}

fn compile_include(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(render_with_scope(compiler, "make", expression))
}

fn compile_include_if(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    let view = stripped(expression);
    Ok(format!(
        "<?php if ($__env->exists({})) echo $__env->make({}, {}); ?>",
        view,
        view,
        compiler.options.runtime.defined_vars()
    ))
}

fn compile_include_when(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(render_with_scope(compiler, "renderWhen", expression))
}

fn compile_include_unless(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(render_with_scope(compiler, "renderUnless", expression))
}

fn compile_include_first(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(render_with_scope(compiler, "first", expression))
}
