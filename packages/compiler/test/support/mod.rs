//! Shared helpers for the compiler integration tests

#![allow(dead_code)]

use blade_compiler::Compiler;

/// Local scope forwarded to included and extended views.
pub const DEFINED_VARS: &str =
    r"\Diana\Support\Helpers\Arr::except(get_defined_vars(), ['__data', '__path'])";

pub const ESCAPE: &str = r"\Diana\Support\Helpers\Emit::e";

pub fn compile(source: &str) -> String {
    Compiler::default()
        .compile_string(source)
        .expect("template should compile")
}

pub fn compile_with(compiler: &mut Compiler, source: &str) -> String {
    compiler
        .compile_string(source)
        .expect("template should compile")
}
