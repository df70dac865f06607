//! Layout Directive Tests

#[path = "../support/mod.rs"]
mod support;

use blade_compiler::Compiler;
use support::{compile, compile_with, DEFINED_VARS};

#[test]
fn should_compile_extends() {
    assert_eq!(
        compile("@extends('foo')\ntest"),
        format!("test\n<?php echo $__env->make('foo', {}); ?>", DEFINED_VARS)
    );
    assert_eq!(
        compile("@extends(name(foo))\ntest"),
        format!("test\n<?php echo $__env->make(name(foo), {}); ?>", DEFINED_VARS)
    );
}

#[test]
fn should_compile_sequential_extends_with_one_compiler() {
    let mut compiler = Compiler::default();
    assert_eq!(
        compile_with(&mut compiler, "@extends('foo')\ntest"),
        format!("test\n<?php echo $__env->make('foo', {}); ?>", DEFINED_VARS)
    );
    assert_eq!(
        compile_with(&mut compiler, "@extends(name(foo))\ntest"),
        format!("test\n<?php echo $__env->make(name(foo), {}); ?>", DEFINED_VARS)
    );
}

#[test]
fn should_compile_extends_first() {
    assert_eq!(
        compile("@extendsFirst(['foo', 'milwad'])\ntest"),
        format!(
            "test\n<?php echo $__env->first(['foo', 'milwad'], {}); ?>",
            DEFINED_VARS
        )
    );
    assert_eq!(
        compile("@extendsFirst([name(foo), name(milwad)])\ntest"),
        format!(
            "test\n<?php echo $__env->first([name(foo), name(milwad)], {}); ?>",
            DEFINED_VARS
        )
    );
}

#[test]
fn should_compile_sections() {
    assert_eq!(
        compile("@section('content')\nbody\n@endsection"),
        "<?php $__env->startSection('content'); ?>\nbody\n<?php $__env->stopSection(); ?>"
    );
    assert_eq!(
        compile("@section('title', 'Home')"),
        "<?php $__env->startSection('title', 'Home'); ?>"
    );
}

#[test]
fn should_compile_parent_placeholder_for_current_section() {
    assert_eq!(
        compile("@section('sidebar')\n@parent\n@stop"),
        r"<?php $__env->startSection('sidebar'); ?>
<?php echo \Diana\Rendering\Drivers\BladeRenderer::parentPlaceholder('sidebar'); ?>
<?php $__env->stopSection(); ?>"
    );
}

#[test]
fn should_compile_yields() {
    assert_eq!(
        compile("@yield('foo')"),
        "<?php echo $__env->yieldContent('foo'); ?>"
    );
    assert_eq!(
        compile("@yield('foo', 'bar')"),
        "<?php echo $__env->yieldContent('foo', 'bar'); ?>"
    );
    assert_eq!(
        compile("@yield('title', $post->title)"),
        "<?php echo $__env->yieldContent('title', $post->title); ?>"
    );
}

#[test]
fn should_compile_section_endings() {
    assert_eq!(compile("@show"), "<?php echo $__env->yieldSection(); ?>");
    assert_eq!(compile("@append"), "<?php $__env->appendSection(); ?>");
    assert_eq!(compile("@overwrite"), "<?php $__env->stopSection(true); ?>");
    assert_eq!(compile("@stop"), "<?php $__env->stopSection(); ?>");
    assert_eq!(compile("@endsection"), "<?php $__env->stopSection(); ?>");
}
