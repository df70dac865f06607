//! Compiler Options
//!
//! Names of the runtime helpers referenced by generated code, plus the
//! switches that change how templates compile.

use serde::{Deserialize, Serialize};

/// Fully-qualified runtime names written into compiled output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RuntimeNames {
    /// `escape(value, doubleEncode)`
    pub escape: String,
    pub css_classes: String,
    pub css_styles: String,
    /// `except(array, keys)` used to forward the local scope into includes.
    pub arr_except: String,
    pub attribute_bag: String,
    pub sanitizer: String,
    pub js: String,
    pub renderer: String,
    pub anonymous_component: String,
    pub dynamic_component: String,
}

impl Default for RuntimeNames {
    fn default() -> Self {
        Self {
            escape: r"\Diana\Support\Helpers\Emit::e".to_string(),
            css_classes: r"\Diana\Support\Helpers\Arr::toCssClasses".to_string(),
            css_styles: r"\Diana\Support\Helpers\Arr::toCssStyles".to_string(),
            arr_except: r"\Diana\Support\Helpers\Arr::except".to_string(),
            attribute_bag: r"Diana\Rendering\ComponentAttributeBag".to_string(),
            sanitizer: r"\Diana\Rendering\Compiler::sanitizeComponentAttribute".to_string(),
            js: r"\Diana\Rendering\Js".to_string(),
            renderer: r"\Diana\Rendering\Drivers\BladeRenderer".to_string(),
            anonymous_component: r"Diana\Rendering\Components\AnonymousComponent".to_string(),
            dynamic_component: r"Diana\Rendering\Components\DynamicComponent".to_string(),
        }
    }
}

impl RuntimeNames {
    /// `except(get_defined_vars(), ['__data', '__path'])`, the scope handed
    /// to included views.
    pub fn defined_vars(&self) -> String {
        format!("{}(get_defined_vars(), ['__data', '__path'])", self.arr_except)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CompilerOptions {
    pub runtime: RuntimeNames,
    /// `None` keeps the single-argument escape call.
    pub double_encode: Option<bool>,
    pub compile_component_tags: bool,
    /// Extension appended to hashed compiled-view file names.
    pub compiled_extension: String,
}

impl Default for CompilerOptions {
    fn default() -> Self {
        Self {
            runtime: RuntimeNames::default(),
            double_encode: None,
            compile_component_tags: true,
            compiled_extension: "php".to_string(),
        }
    }
}
