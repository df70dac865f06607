//! Stack Directives

use std::collections::HashMap;

use super::{raw, stripped, Rule};
use crate::compiler::Compiler;
use crate::error::Result;

pub(super) fn register(rules: &mut HashMap<&'static str, Rule>) {
    rules.insert("stack", compile_stack);
    rules.insert("push", compile_push);
    rules.insert("pushonce", compile_push_once);
    rules.insert("endpush", compile_end_push);
    rules.insert("endpushonce", compile_end_push_once);
    rules.insert("prepend", compile_prepend);
    rules.insert("prependonce", compile_prepend_once);
    rules.insert("endprepend", compile_end_prepend);
    rules.insert("endprependonce", compile_end_prepend_once);
}

fn compile_stack(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!("<?php echo $__env->yieldPushContent{}; ?>", raw(expression)))
}

fn compile_push(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!("<?php $__env->startPush{}; ?>", raw(expression)))
}

fn compile_prepend(_: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(format!("<?php $__env->startPrepend{}; ?>", raw(expression)))
}

/// `(stack[, id])`; without an id a fresh one is generated.
fn once_guarded(compiler: &mut Compiler, method: &str, expression: Option<&str>) -> String {
    let arguments = stripped(expression);
    let (stack, id) = arguments.split_once(',').unwrap_or((arguments, ""));
    let stack = stack.trim();
    let id = match id.trim() {
        "" => format!("'{}'", compiler.next_once_id()),
        id => id.to_string(),
    };

    format!(
        "<?php if (! $__env->hasRenderedOnce({id})): $__env->markAsRenderedOnce({id});\n$__env->{method}({stack}); ?>"
    )
}

fn compile_push_once(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(once_guarded(compiler, "startPush", expression))
}

fn compile_prepend_once(compiler: &mut Compiler, expression: Option<&str>) -> Result<String> {
    Ok(once_guarded(compiler, "startPrepend", expression))
}

fn compile_end_push(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php $__env->stopPush(); ?>".to_string())
}

fn compile_end_push_once(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php $__env->stopPush(); endif; ?>".to_string())
}

fn compile_end_prepend(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php $__env->stopPrepend(); ?>".to_string())
}

fn compile_end_prepend_once(_: &mut Compiler, _: Option<&str>) -> Result<String> {
    Ok("<?php $__env->stopPrepend(); endif; ?>".to_string())
}
