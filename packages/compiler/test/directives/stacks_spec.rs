//! Stack Directive Tests

#[path = "../support/mod.rs"]
mod support;

use support::compile;

#[test]
fn should_compile_stacks() {
    assert_eq!(
        compile("@stack('foo')"),
        "<?php echo $__env->yieldPushContent('foo'); ?>"
    );
    assert_eq!(
        compile("@stack('foo', 'default')"),
        "<?php echo $__env->yieldPushContent('foo', 'default'); ?>"
    );
}

#[test]
fn should_compile_pushes() {
    assert_eq!(
        compile("@push('foo')\ntest\n@endpush"),
        "<?php $__env->startPush('foo'); ?>\ntest\n<?php $__env->stopPush(); ?>"
    );
}

#[test]
fn should_compile_prepends() {
    assert_eq!(
        compile("@prepend('foo')\nbar\n@endprepend"),
        "<?php $__env->startPrepend('foo'); ?>\nbar\n<?php $__env->stopPrepend(); ?>"
    );
}

#[test]
fn should_compile_push_once_with_explicit_id() {
    let string = "@pushOnce('foo', 'bar')\ntest\n@endPushOnce";
    let expected = "<?php if (! $__env->hasRenderedOnce('bar')): $__env->markAsRenderedOnce('bar');
$__env->startPush('foo'); ?>
test
<?php $__env->stopPush(); endif; ?>";
    assert_eq!(compile(string), expected);
}

#[test]
fn should_compile_prepend_once_with_explicit_id() {
    let string = "@prependOnce('foo', $id)\ntest\n@endPrependOnce";
    let expected = "<?php if (! $__env->hasRenderedOnce($id)): $__env->markAsRenderedOnce($id);
$__env->startPrepend('foo'); ?>
test
<?php $__env->stopPrepend(); endif; ?>";
    assert_eq!(compile(string), expected);
}

#[test]
fn should_generate_ids_for_push_once_without_one() {
    let compiled = compile("@pushOnce('foo')\ntest\n@endPushOnce");
    let start = compiled.find("hasRenderedOnce('").unwrap() + "hasRenderedOnce('".len();
    let id = &compiled[start..start + 36];

    assert_eq!(id.split('-').count(), 5);
    assert!(compiled.contains(&format!("markAsRenderedOnce('{}');\n$__env->startPush('foo'); ?>", id)));
}
