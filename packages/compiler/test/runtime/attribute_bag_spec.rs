//! Attribute Bag Tests
//!
//! Merge rules, filtering and rendering of the component attribute bag,
//! plus the HTML helpers compiled templates rely on.

use blade_compiler::runtime::{
    classes_from, escape, sanitize_component_attribute, styles_from, AttributeBag,
    AttributeDefault,
};
use indexmap::IndexMap;
use serde_json::{json, Value};

fn bag(entries: &[(&str, Value)]) -> AttributeBag {
    entries.iter().cloned().collect()
}

fn defaults(entries: Vec<(&str, AttributeDefault)>) -> IndexMap<String, AttributeDefault> {
    entries
        .into_iter()
        .map(|(key, value)| (key.to_string(), value))
        .collect()
}

#[test]
fn should_prepend_default_classes() {
    let attributes = bag(&[("class", json!("mt-4")), ("id", json!("x"))]);
    let merged = attributes.merge(defaults(vec![("class", "btn".into())]), true);
    assert_eq!(merged.to_string(), r#"class="btn mt-4" id="x""#);
}

#[test]
fn should_terminate_and_prepend_default_styles() {
    let attributes = bag(&[("style", json!("color: red"))]);
    let merged = attributes.merge(defaults(vec![("style", "font-weight: bold;".into())]), true);
    assert_eq!(
        merged.get("style"),
        Some(&json!("font-weight: bold; color: red;"))
    );
}

#[test]
fn should_combine_prepending_defaults() {
    let attributes = bag(&[("data-controller", json!("extra"))]);
    let merged = attributes.merge(
        defaults(vec![("data-controller", AttributeBag::prepends("base"))]),
        true,
    );
    assert_eq!(merged.get("data-controller"), Some(&json!("base extra")));
}

#[test]
fn should_override_other_defaults_in_place() {
    let attributes = bag(&[("type", json!("submit"))]);
    let merged = attributes.merge(
        defaults(vec![("id", "a".into()), ("type", "button".into())]),
        true,
    );
    assert_eq!(merged.to_string(), r#"id="a" type="submit""#);
}

#[test]
fn should_drop_falsy_and_duplicate_class_parts() {
    let merged = bag(&[("class", json!(false))]).merge(defaults(vec![("class", "btn".into())]), true);
    assert_eq!(merged.get("class"), Some(&json!("btn")));

    let merged = bag(&[("class", json!("btn"))]).merge(defaults(vec![("class", "btn".into())]), true);
    assert_eq!(merged.get("class"), Some(&json!("btn")));
}

#[test]
fn should_escape_defaults_only_when_asked() {
    let escaped = AttributeBag::new().merge(defaults(vec![("title", "<b>".into())]), true);
    assert_eq!(escaped.get("title"), Some(&json!("&lt;b&gt;")));

    let raw = AttributeBag::new().merge(defaults(vec![("title", "<b>".into())]), false);
    assert_eq!(raw.get("title"), Some(&json!("<b>")));

    let flag = AttributeBag::new().merge(
        defaults(vec![("disabled", AttributeDefault::Value(json!(true)))]),
        true,
    );
    assert_eq!(flag.get("disabled"), Some(&json!(true)));
}

#[test]
fn should_filter_by_keys() {
    let attributes = bag(&[
        ("class", json!("a")),
        ("wire:model", json!("name")),
        ("wire:click", json!("save")),
        ("id", json!("b")),
    ]);

    assert_eq!(attributes.only(&["id"]).to_string(), r#"id="b""#);
    assert_eq!(
        attributes.except(&["class", "id"]).to_string(),
        r#"wire:model="name" wire:click="save""#
    );
    assert_eq!(attributes.where_starts_with(&["wire:"]).len(), 2);
    assert_eq!(
        attributes.where_doesnt_start_with(&["wire:"]).to_string(),
        r#"class="a" id="b""#
    );
    assert_eq!(attributes.first(), Some(&json!("a")));
}

#[test]
fn should_match_props_by_kebab_cased_name() {
    let attributes = bag(&[("user-id", json!(1)), ("class", json!("a"))]);
    assert_eq!(attributes.only_props(&["userId"]).get("user-id"), Some(&json!(1)));
    assert_eq!(attributes.except_props(&["userId"]).to_string(), r#"class="a""#);
}

#[test]
fn should_check_key_presence() {
    let attributes = bag(&[("class", json!("a")), ("id", json!("b"))]);
    assert!(attributes.has(&["class", "id"]));
    assert!(!attributes.has(&["class", "title"]));
    assert!(attributes.has_any(&["title", "id"]));
    assert!(attributes.missing("title"));
}

#[test]
fn should_merge_new_attributes_into_a_parent_bag() {
    let parent = bag(&[("class", json!("b"))]);
    let mut attributes = AttributeBag::new();
    let mut incoming = IndexMap::new();
    incoming.insert("class".to_string(), json!("a"));
    incoming.insert("id".to_string(), json!("<x>"));

    attributes.set_attributes(incoming, Some(&parent));
    assert_eq!(attributes.get("class"), Some(&json!("a b")));
    assert_eq!(attributes.get("id"), Some(&json!("<x>")));
}

#[test]
fn should_render_booleans_and_quotes() {
    let mut attributes = AttributeBag::new();
    attributes.insert("required", true);
    attributes.insert("title", "say \"hi\"");
    attributes.insert("count", 3);
    assert_eq!(
        attributes.to_string(),
        r#"required="required" title="say \"hi\"" count="3""#
    );

    attributes.remove("title");
    assert_eq!(attributes.to_string(), r#"required="required" count="3""#);
}

#[test]
fn should_serialize_as_a_plain_map() {
    let attributes = bag(&[("b", json!("1")), ("a", json!(2))]);
    assert_eq!(serde_json::to_string(&attributes).unwrap(), r#"{"b":"1","a":2}"#);

    let parsed: AttributeBag = serde_json::from_str(r#"{"class":"x"}"#).unwrap();
    assert_eq!(parsed.get("class"), Some(&json!("x")));
}

#[test]
fn should_escape_html() {
    assert_eq!(escape("<b>Tom & \"Jerry\"</b>", true), "&lt;b&gt;Tom &amp; &quot;Jerry&quot;&lt;/b&gt;");
    assert_eq!(escape("&lt;kept&gt;", false), "&lt;kept&gt;");
    assert_eq!(escape("&lt;kept&gt;", true), "&amp;lt;kept&amp;gt;");
}

#[test]
fn should_build_class_and_style_lists() {
    assert_eq!(
        classes_from([("p-4", true), ("font-bold", false), ("bg-red", true)]),
        "p-4 bg-red"
    );
    assert_eq!(
        styles_from([("color: red", true), ("font-weight: bold;", true)]),
        "color: red; font-weight: bold;"
    );
    assert_eq!(classes_from(Vec::<(&str, bool)>::new()), "");
}

#[test]
fn should_sanitize_only_string_attributes() {
    assert_eq!(
        sanitize_component_attribute(&json!("<script>")),
        json!("&lt;script&gt;")
    );
    assert_eq!(sanitize_component_attribute(&json!(true)), json!(true));
    assert_eq!(sanitize_component_attribute(&json!([1, 2])), json!([1, 2]));
}
