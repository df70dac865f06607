//! Conditional Directive Tests

#[path = "../support/mod.rs"]
mod support;

use blade_compiler::Compiler;
use support::{compile, compile_with};

#[test]
fn should_compile_if_statements() {
    let string = "@if (name(foo(bar)))
breeze
@elseif ($b)
ocean
@else
desert
@endif";
    let expected = "<?php if(name(foo(bar))): ?>
breeze
<?php elseif($b): ?>
ocean
<?php else: ?>
desert
<?php endif; ?>";
    assert_eq!(compile(string), expected);
}

#[test]
fn should_compile_unless_statements() {
    let string = "@unless ($test)
breeze
@endunless";
    let expected = "<?php if (! ($test)): ?>
breeze
<?php endif; ?>";
    assert_eq!(compile(string), expected);
}

#[test]
fn should_compile_isset_statements() {
    assert_eq!(
        compile("@isset ($test)\nbreeze\n@endisset"),
        "<?php if(isset($test)): ?>\nbreeze\n<?php endif; ?>"
    );
}

#[test]
fn should_compile_empty_statements() {
    let string = "@empty ($test)
breeze
@endempty";
    let expected = "<?php if(empty($test)): ?>
breeze
<?php endif; ?>";
    assert_eq!(compile(string), expected);
}

#[test]
fn should_compile_switch_statements() {
    let string = "@switch($i)
@case(1)
First case...
@break
@case(2)
Second case...
@break
@default
Default case...
@endswitch";
    let expected = "<?php switch($i):
case (1): ?>
First case...
<?php break; ?>
<?php case (2): ?>
Second case...
<?php break; ?>
<?php default: ?>
Default case...
<?php endswitch; ?>";
    assert_eq!(compile(string), expected);
}

#[test]
fn should_reset_first_case_for_each_switch() {
    let mut compiler = Compiler::default();
    let first = compile_with(&mut compiler, "@switch($a)\n@case(1)\n@endswitch");
    let second = compile_with(&mut compiler, "@switch($b)\n@case(1)\n@endswitch");
    assert!(first.contains("\ncase (1): ?>"));
    assert!(second.contains("\ncase (1): ?>"));
}

#[test]
fn should_compile_section_checks() {
    assert_eq!(
        compile("@hasSection(\"section\")\nbreeze\n@endif"),
        "<?php if (! empty(trim($__env->yieldContent(\"section\")))): ?>\nbreeze\n<?php endif; ?>"
    );
    assert_eq!(
        compile("@sectionMissing(\"section\")\nbreeze\n@endif"),
        "<?php if (empty(trim($__env->yieldContent(\"section\")))): ?>\nbreeze\n<?php endif; ?>"
    );
}

#[test]
fn should_compile_environment_checks() {
    assert_eq!(
        compile("@env('staging')\nbreeze\n@else\nboom\n@endenv"),
        "<?php if(app()->environment('staging')): ?>\nbreeze\n<?php else: ?>\nboom\n<?php endif; ?>"
    );
    assert_eq!(
        compile("@env(['staging', 'production'])"),
        "<?php if(app()->environment(['staging', 'production'])): ?>"
    );
    assert_eq!(
        compile("@production\nbreeze\n@endproduction"),
        "<?php if(app()->environment('production')): ?>\nbreeze\n<?php endif; ?>"
    );
}

#[test]
fn should_compile_once_blocks_with_explicit_ids() {
    assert_eq!(
        compile("@once('jquery')\nx\n@endonce"),
        "<?php if (! $__env->hasRenderedOnce('jquery')): $__env->markAsRenderedOnce('jquery'); ?>\nx\n<?php endif; ?>"
    );
}

#[test]
fn should_generate_distinct_ids_for_bare_once_blocks() {
    let compiled = compile("@once\na\n@endonce\n@once\nb\n@endonce");
    let ids: Vec<&str> = compiled
        .match_indices("hasRenderedOnce('")
        .map(|(index, needle)| &compiled[index + needle.len()..index + needle.len() + 36])
        .collect();

    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
    assert!(ids.iter().all(|id| id.split('-').count() == 5));
}

#[test]
fn should_generate_stable_ids_for_the_same_source() {
    let source = "@once\na\n@endonce";
    assert_eq!(compile(source), compile(source));
}

#[test]
fn should_compile_form_attribute_helpers() {
    assert_eq!(
        compile("<option @selected($a == 1)>"),
        "<option <?php if($a == 1): echo 'selected'; endif; ?>>"
    );
    assert_eq!(
        compile("<input @checked($on)>"),
        "<input <?php if($on): echo 'checked'; endif; ?>>"
    );
    assert_eq!(
        compile("<input @disabled($off)>"),
        "<input <?php if($off): echo 'disabled'; endif; ?>>"
    );
    assert_eq!(
        compile("<input @required(true)>"),
        "<input <?php if(true): echo 'required'; endif; ?>>"
    );
    assert_eq!(
        compile("<input @readonly($locked)>"),
        "<input <?php if($locked): echo 'readonly'; endif; ?>>"
    );
}

#[test]
fn should_compile_conditional_pushes() {
    let string = "@pushIf($a, 'scripts')\nfoo\n@elsePushIf($b, 'styles')\nbar\n@elsePush('other')\nbaz\n@endPushIf";
    let expected = "<?php if($a): $__env->startPush( 'scripts'); ?>\nfoo\n<?php $__env->stopPush(); elseif($b): $__env->startPush( 'styles'); ?>\nbar\n<?php $__env->stopPush(); else: $__env->startPush('other'); ?>\nbaz\n<?php $__env->stopPush(); endif; ?>";
    assert_eq!(compile(string), expected);
}
