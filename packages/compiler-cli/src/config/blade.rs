use indexmap::IndexMap;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use blade_compiler::{CompilerOptions, Components, FileViewFinder, RuntimeNames};

/// Contents of `blade.json`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BladeConfig {
    /// Tag name to component type identifier.
    pub aliases: IndexMap<String, String>,
    /// Tag prefix to namespace, for `<x-prefix::name>`.
    pub namespaces: IndexMap<String, String>,
    pub default_namespace: Option<String>,
    /// Component type identifier to constructor parameter names.
    pub types: IndexMap<String, Vec<String>>,
    /// Roots searched for anonymous component views.
    pub view_paths: Vec<PathBuf>,
    pub view_extensions: Vec<String>,
    pub double_encode: Option<bool>,
    pub compiled_extension: Option<String>,
    pub runtime: RuntimeNames,
}

impl BladeConfig {
    /// Read a config file. Relative view paths resolve against its directory.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: BladeConfig = serde_json::from_str(&content)?;

        let base = path.parent().unwrap_or(Path::new("."));
        for view_path in &mut config.view_paths {
            if view_path.is_relative() {
                *view_path = base.join(&*view_path);
            }
        }
        Ok(config)
    }

    pub fn compiler_options(&self) -> CompilerOptions {
        let mut options = CompilerOptions {
            runtime: self.runtime.clone(),
            double_encode: self.double_encode,
            ..CompilerOptions::default()
        };
        if let Some(extension) = &self.compiled_extension {
            options.compiled_extension = extension.clone();
        }
        options
    }

    /// Component registry populated from the config.
    pub fn components(&self) -> Components {
        let components = Components::new(&self.runtime);

        for (identifier, params) in &self.types {
            components.register_type(identifier, params.iter().cloned());
        }
        for (tag, identifier) in &self.aliases {
            components.alias(tag, identifier);
        }
        for (prefix, namespace) in &self.namespaces {
            components.component_namespace(namespace, prefix);
        }
        if let Some(namespace) = &self.default_namespace {
            components.set_default_namespace(namespace);
        }

        if !self.view_paths.is_empty() {
            let mut finder = FileViewFinder::new(self.view_paths.iter().cloned());
            if !self.view_extensions.is_empty() {
                finder = finder.with_extensions(self.view_extensions.iter().cloned());
            }
            components.set_view_finder(Arc::new(finder));
        }
        components
    }
}
