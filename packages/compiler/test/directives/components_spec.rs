//! Component Directive Tests

#[path = "../support/mod.rs"]
mod support;

use blade_compiler::Compiler;
use support::{compile, compile_with};
use xxhash_rust::xxh3::xxh3_128;

fn hash(identifier: &str) -> String {
    format!("{:032x}", xxh3_128(identifier.as_bytes()))
}

fn end_component_class(hash: &str) -> String {
    format!(
        "<?php echo $__env->renderComponent(); ?>
<?php endif; ?>
<?php if (isset($__attributesOriginal{hash})): ?>
<?php $attributes = $__attributesOriginal{hash}; ?>
<?php unset($__attributesOriginal{hash}); ?>
<?php endif; ?>
<?php if (isset($__componentOriginal{hash})): ?>
<?php $component = $__componentOriginal{hash}; ?>
<?php unset($__componentOriginal{hash}); ?>
<?php endif; ?>"
    )
}

#[test]
fn should_compile_view_components() {
    assert_eq!(
        compile("@component('foo', [\"foo\" => \"bar\"])"),
        "<?php $__env->startComponent('foo', [\"foo\" => \"bar\"]); ?>"
    );
    assert_eq!(
        compile("@component('foo')"),
        "<?php $__env->startComponent('foo'); ?>"
    );
}

#[test]
fn should_compile_class_components() {
    let class = r"App\View\Components\Alert::class";
    let hash = hash(class);
    let expected = format!(
        r#"<?php if (isset($component)) {{ $__componentOriginal{hash} = $component; }} ?>
<?php if (isset($attributes)) {{ $__attributesOriginal{hash} = $attributes; }} ?>
<?php $component = App\View\Components\Alert::class::resolve(["foo" => "bar"] + (isset($attributes) && $attributes instanceof Diana\Rendering\ComponentAttributeBag ? (array) $attributes->getIterator() : [])); ?>
<?php $component->withName('test'); ?>
<?php if ($component->shouldRender()): ?>
<?php $__env->startComponent($component->resolveView(), $component->data()); ?>"#
    );
    assert_eq!(
        compile(r#"@component('App\View\Components\Alert::class', 'test', ["foo" => "bar"])"#),
        expected
    );
}

#[test]
fn should_treat_registered_types_as_class_components() {
    let mut compiler = Compiler::default();
    compiler.components().register_type("Card", ["title"]);
    let compiled = compile_with(&mut compiler, "@component('Card', 'card')");
    assert!(compiled.contains("<?php $component = Card::resolve([] + (isset($attributes)"));
    assert!(compiled.contains("<?php $component->withName('card'); ?>"));
}

#[test]
fn should_compile_end_components() {
    assert_eq!(
        compile("@endcomponent"),
        "<?php echo $__env->renderComponent(); ?>"
    );
    assert_eq!(
        compile("@endcomponentFirst"),
        "<?php echo $__env->renderComponent(); ?>"
    );
}

#[test]
fn should_compile_end_component_classes() {
    let mut compiler = Compiler::default();
    compiler.new_component_hash("foo");
    assert_eq!(
        compile_with(&mut compiler, "@endcomponentClass"),
        end_component_class(&hash("foo"))
    );
}

#[test]
fn should_restore_nested_components_innermost_first() {
    let mut compiler = Compiler::default();
    compiler.new_component_hash("outer");
    compiler.new_component_hash("inner");

    let inner = compile_with(&mut compiler, "@endComponentClass");
    let outer = compile_with(&mut compiler, "@endComponentClass");
    assert_eq!(inner, end_component_class(&hash("inner")));
    assert_eq!(outer, end_component_class(&hash("outer")));
}

#[test]
fn should_pair_opening_and_closing_hashes() {
    let compiled = compile("@component('App\\Alert', 'alert')\n@endComponentClass");
    let hash = hash(r"App\Alert");
    assert!(compiled.contains(&format!("$__componentOriginal{} = $component;", hash)));
    assert!(compiled.ends_with(&end_component_class(&hash)));
}

#[test]
fn should_hash_anonymous_components_by_view() {
    let string = r"@component('Diana\Rendering\Components\AnonymousComponent', 'alert', ['view' => 'a'])";
    let compiled = compile(string);
    let hash = hash(r"Diana\Rendering\Components\AnonymousComponent:alert");
    assert!(compiled.contains(&format!("$__componentOriginal{} = $component;", hash)));
}

#[test]
fn should_compile_component_first() {
    assert_eq!(
        compile("@componentFirst(['a', 'b'], ['x' => 1])"),
        "<?php $__env->startComponentFirst(['a', 'b'], ['x' => 1]); ?>"
    );
}

#[test]
fn should_compile_slots() {
    assert_eq!(
        compile("@slot('foo', null, [\"foo\" => \"bar\"])"),
        "<?php $__env->slot('foo', null, [\"foo\" => \"bar\"]); ?>"
    );
    assert_eq!(compile("@slot('foo')"), "<?php $__env->slot('foo'); ?>");
    assert_eq!(compile("@endslot"), "<?php $__env->endSlot(); ?>");
}

#[test]
fn should_compile_props() {
    let compiled = compile("@props(['type' => 'info', 'message'])");
    assert!(compiled.starts_with(
        r"<?php $attributes ??= new \Diana\Rendering\ComponentAttributeBag; ?>"
    ));
    assert!(compiled.contains("$attributes->onlyProps(['type' => 'info', 'message']) as $__key => $__value"));
    assert!(compiled.contains("$attributes->exceptProps(['type' => 'info', 'message']) as $__key => $__value"));
    assert!(compiled.ends_with("<?php unset($__defined_vars); ?>"));
}

#[test]
fn should_compile_aware() {
    let compiled = compile("@aware(['color' => 'gray'])");
    assert!(compiled.starts_with("<?php foreach ((['color' => 'gray']) as $__key => $__value) {"));
    assert!(compiled.contains("$__env->getConsumableComponentData($__key, $__value)"));
    assert!(compiled.ends_with("} ?>"));
}
