//! Helper Directive Tests

#[path = "../support/mod.rs"]
mod support;

use blade_compiler::{Compiler, CompilerOptions, RuntimeNames};
use support::{compile, compile_with};

#[test]
fn should_compile_class_statements() {
    assert_eq!(
        compile("<span @class(['font-bold', 'mt-4', 'ml-2' => true, 'mr-2' => false])></span>"),
        r#"<span class="<?php echo \Diana\Support\Helpers\Arr::toCssClasses(['font-bold', 'mt-4', 'ml-2' => true, 'mr-2' => false]); ?>"></span>"#
    );
}

#[test]
fn should_compile_style_statements() {
    assert_eq!(
        compile("<span @style(['font-weight: bold', 'color: red' => $error])></span>"),
        "<span style=\"<?php echo \\Diana\\Support\\Helpers\\Arr::toCssStyles(['font-weight: bold', 'color: red' => $error]) ?>\"></span>"
    );
}

#[test]
fn should_compile_js_statements() {
    assert_eq!(
        compile("<div x-data=\"@js($data)\"></div>"),
        "<div x-data=\"<?php echo \\Diana\\Rendering\\Js::from($data); ?>\"></div>"
    );
    assert_eq!(
        compile("<div x-data=\"@js(['a' => 1], JSON_FORCE_OBJECT)\"></div>"),
        "<div x-data=\"<?php echo \\Diana\\Rendering\\Js::from(['a' => 1], JSON_FORCE_OBJECT); ?>\"></div>"
    );
    assert_eq!(
        compile("<div x-data=\"@js($data, JSON_FORCE_OBJECT, 256)\"></div>"),
        "<div x-data=\"<?php echo \\Diana\\Rendering\\Js::from($data, JSON_FORCE_OBJECT, 256); ?>\"></div>"
    );
}

#[test]
fn should_compile_json_statements() {
    assert_eq!(
        compile("var foo = @json($var);"),
        "var foo = <?php echo json_encode($var, 15, 512) ?>;"
    );
    assert_eq!(
        compile("var foo = @json($var, JSON_PRETTY_PRINT);"),
        "var foo = <?php echo json_encode($var, JSON_PRETTY_PRINT, 512) ?>;"
    );
    assert_eq!(
        compile("@json($var, 0, 64)"),
        "<?php echo json_encode($var, 0, 64) ?>"
    );
}

#[test]
fn should_compile_unset_statements() {
    assert_eq!(compile("@unset ($unset)"), "<?php unset($unset); ?>");
    assert_eq!(compile("@unset ($unset)))"), "<?php unset($unset); ?>))");
}

#[test]
fn should_compile_inline_php() {
    assert_eq!(compile("@php($set = true)"), "<?php ($set = true); ?>");
    assert_eq!(compile("@php"), "@php");
}

#[test]
fn should_compile_debug_helpers() {
    assert_eq!(compile("@dd($var1)"), "<?php dd($var1); ?>");
    assert_eq!(compile("@dd($var1, $var2)"), "<?php dd($var1, $var2); ?>");
    assert_eq!(compile("@dump($var1)"), "<?php dump($var1); ?>");
}

#[test]
fn should_compile_form_helpers() {
    assert_eq!(compile("@csrf"), "<?php echo csrf_field(); ?>");
    assert_eq!(
        compile("@method('patch')"),
        "<?php echo method_field('patch'); ?>"
    );
}

#[test]
fn should_use_configured_runtime_names() {
    let options = CompilerOptions {
        runtime: RuntimeNames {
            css_classes: "classes".to_string(),
            js: "Js".to_string(),
            ..RuntimeNames::default()
        },
        ..CompilerOptions::default()
    };
    let mut compiler = Compiler::new(options);

    assert_eq!(
        compile_with(&mut compiler, "@class(['a'])"),
        "class=\"<?php echo classes(['a']); ?>\""
    );
    assert_eq!(
        compile_with(&mut compiler, "@js($a)"),
        "<?php echo Js::from($a); ?>"
    );
}
