//! Include Directive Tests

#[path = "../support/mod.rs"]
mod support;

use support::{compile, DEFINED_VARS};

#[test]
fn should_compile_eachs() {
    assert_eq!(
        compile("@each('foo', 'bar')"),
        "<?php echo $__env->renderEach('foo', 'bar'); ?>"
    );
    assert_eq!(
        compile("@each('foo', '(bar))')"),
        "<?php echo $__env->renderEach('foo', '(bar))'); ?>"
    );
    assert_eq!(
        compile("@each(name(foo))"),
        "<?php echo $__env->renderEach(name(foo)); ?>"
    );
}

#[test]
fn should_compile_includes() {
    assert_eq!(
        compile("@include('foo')"),
        format!("<?php echo $__env->make('foo', {}); ?>", DEFINED_VARS)
    );
    assert_eq!(
        compile("@include('foo', ['(('])"),
        format!("<?php echo $__env->make('foo', ['(('], {}); ?>", DEFINED_VARS)
    );
    assert_eq!(
        compile("@include('foo', ['((a)' => '((a)'])"),
        format!(
            "<?php echo $__env->make('foo', ['((a)' => '((a)'], {}); ?>",
            DEFINED_VARS
        )
    );
    assert_eq!(
        compile("@include(name(foo))"),
        format!("<?php echo $__env->make(name(foo), {}); ?>", DEFINED_VARS)
    );
}

#[test]
fn should_compile_include_ifs() {
    assert_eq!(
        compile("@includeIf('foo')"),
        format!(
            "<?php if ($__env->exists('foo')) echo $__env->make('foo', {}); ?>",
            DEFINED_VARS
        )
    );
    assert_eq!(
        compile("@includeIf(name(foo))"),
        format!(
            "<?php if ($__env->exists(name(foo))) echo $__env->make(name(foo), {}); ?>",
            DEFINED_VARS
        )
    );
}

#[test]
fn should_compile_include_whens() {
    assert_eq!(
        compile("@includeWhen(true, 'foo', [\"foo\" => \"bar\"])"),
        format!(
            "<?php echo $__env->renderWhen(true, 'foo', [\"foo\" => \"bar\"], {}); ?>",
            DEFINED_VARS
        )
    );
    assert_eq!(
        compile("@includeWhen(true, 'foo')"),
        format!("<?php echo $__env->renderWhen(true, 'foo', {}); ?>", DEFINED_VARS)
    );
}

#[test]
fn should_compile_include_unlesses() {
    assert_eq!(
        compile("@includeUnless(true, 'foo', [\"foo\" => \"bar\"])"),
        format!(
            "<?php echo $__env->renderUnless(true, 'foo', [\"foo\" => \"bar\"], {}); ?>",
            DEFINED_VARS
        )
    );
    assert_eq!(
        compile("@includeUnless(true, 'foo', [\"foo\" => \"bar_))-))>\"])"),
        format!(
            "<?php echo $__env->renderUnless(true, 'foo', [\"foo\" => \"bar_))-))>\"], {}); ?>",
            DEFINED_VARS
        )
    );
    assert_eq!(
        compile("@includeUnless($undefined ?? true, 'foo')"),
        format!(
            "<?php echo $__env->renderUnless($undefined ?? true, 'foo', {}); ?>",
            DEFINED_VARS
        )
    );
}

#[test]
fn should_compile_include_firsts() {
    assert_eq!(
        compile("@includeFirst([\"one\", \"two\"])"),
        format!(
            "<?php echo $__env->first([\"one\", \"two\"], {}); ?>",
            DEFINED_VARS
        )
    );
    assert_eq!(
        compile("@includeFirst([\"one\", \"two\"], [\"foo\" => \"bar\"])"),
        format!(
            "<?php echo $__env->first([\"one\", \"two\"], [\"foo\" => \"bar\"], {}); ?>",
            DEFINED_VARS
        )
    );
    assert_eq!(
        compile("@includeFirst([\"issue\", \"#45424)\"], [\"foo()\" => \"bar)-))\"])"),
        format!(
            "<?php echo $__env->first([\"issue\", \"#45424)\"], [\"foo()\" => \"bar)-))\"], {}); ?>",
            DEFINED_VARS
        )
    );
    assert_eq!(
        compile("@includeFirst([\"issue\", \"#45424)\"], [(string) \"foo()\" => \"bar(-((\"])"),
        format!(
            "<?php echo $__env->first([\"issue\", \"#45424)\"], [(string) \"foo()\" => \"bar(-((\"], {}); ?>",
            DEFINED_VARS
        )
    );
}
