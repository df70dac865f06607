//! Runtime Helpers
//!
//! Rust versions of the helpers compiled templates call: escaping, CSS
//! class and style lists, and the component attribute bag.

pub mod attribute_bag;
pub mod html;

pub use attribute_bag::{AttributeBag, AttributeDefault};
pub use html::{classes_from, escape, sanitize_component_attribute, styles_from};
