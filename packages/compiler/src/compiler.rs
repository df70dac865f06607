//! Template Compiler
//!
//! Drives one compile: prepare hooks, raw block extraction, comment
//! stripping, component tags, precompilers, then per literal segment the
//! extensions, statements and echoes. Raw blocks and footers are put back
//! at the end.
//!
//! A `Compiler` owns the per-compile state. Directive and component
//! registrations live in shared handles so several compilers can use them
//! at once.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde_json::Value;
use xxhash_rust::xxh3::xxh3_128;

use crate::component_tags::ComponentTagCompiler;
use crate::components::Components;
use crate::directives::{self, Directives};
use crate::echo::{strip_comments, EchoCompiler};
use crate::error::{CompileError, Result};
use crate::options::CompilerOptions;
use crate::raw_blocks::RawBlockStore;
use crate::segments::{ends_in_open_code, map_literals};
use crate::statements::{self, Statement};
use crate::util::strip_parentheses;

const BEGIN_COMPONENT_CLASS: &str = "##BEGIN-COMPONENT-CLASS##";
const END_COMPONENT_CLASS: &str = "##END-COMPONENT-CLASS##";

/// Rewrites a literal segment before statements are compiled.
pub type Extension = Arc<dyn Fn(&str, &Compiler) -> String + Send + Sync>;

/// Rewrites the whole template text.
pub type Precompiler = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Renders a value of one kind for `{{ }}` output.
pub type EchoHandler = Arc<dyn Fn(&Value) -> String + Send + Sync>;

pub struct Compiler {
    pub(crate) options: CompilerOptions,
    pub(crate) directives: Directives,
    pub(crate) components: Components,
    pub(crate) echo: EchoCompiler,
    pub(crate) raw_blocks: RawBlockStore,
    pub(crate) footer: Vec<String>,
    pub(crate) path: Option<PathBuf>,
    extensions: Vec<Extension>,
    precompilers: Vec<Precompiler>,
    prepare_hooks: Vec<Precompiler>,
    echo_handlers: IndexMap<String, EchoHandler>,
    pub(crate) first_case_in_switch: bool,
    pub(crate) for_else_counter: i64,
    pub(crate) last_section: String,
    pub(crate) component_hash_stack: Vec<String>,
    once_counter: u64,
    source_hash: u128,
}

impl Default for Compiler {
    fn default() -> Self {
        Self::new(CompilerOptions::default())
    }
}

impl std::fmt::Debug for Compiler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Compiler")
            .field("options", &self.options)
            .field("directives", &self.directives)
            .field("components", &self.components)
            .field("path", &self.path)
            .field("extensions", &self.extensions.len())
            .field("precompilers", &self.precompilers.len())
            .field("echo_handlers", &self.echo_handlers.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Compiler {
    pub fn new(options: CompilerOptions) -> Self {
        let components = Components::new(&options.runtime);
        Self::with_registries(options, Directives::new(), components)
    }

    /// Compiler sharing existing directive and component registrations.
    pub fn with_registries(
        options: CompilerOptions,
        directives: Directives,
        components: Components,
    ) -> Self {
        let mut echo = EchoCompiler::new(options.runtime.escape.clone());
        if let Some(double_encode) = options.double_encode {
            echo.set_double_encoding(double_encode);
        }

        Self {
            options,
            directives,
            components,
            echo,
            raw_blocks: RawBlockStore::new(),
            footer: Vec::new(),
            path: None,
            extensions: Vec::new(),
            precompilers: Vec::new(),
            prepare_hooks: Vec::new(),
            echo_handlers: IndexMap::new(),
            first_case_in_switch: true,
            for_else_counter: 0,
            last_section: String::new(),
            component_hash_stack: Vec::new(),
            once_counter: 0,
            source_hash: 0,
        }
    }

    pub fn options(&self) -> &CompilerOptions {
        &self.options
    }

    pub fn directives(&self) -> &Directives {
        &self.directives
    }

    pub fn components(&self) -> &Components {
        &self.components
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
    }

    /// Compile template source into host code. A failed compile leaves the
    /// component hash stack and loop counter as they were on entry.
    pub fn compile_string(&mut self, source: &str) -> Result<String> {
        let hash_depth = self.component_hash_stack.len();
        let for_else_counter = self.for_else_counter;

        let result = self.compile_source(source);
        if let Err(error) = &result {
            tracing::debug!(%error, "compile failed");
            self.component_hash_stack.truncate(hash_depth);
            self.for_else_counter = for_else_counter;
            self.raw_blocks.clear();
            self.footer.clear();
        }
        result
    }

    fn compile_source(&mut self, source: &str) -> Result<String> {
        self.footer.clear();
        self.raw_blocks.clear();
        self.source_hash = xxh3_128(source.as_bytes());

        let mut value = source.to_string();
        for hook in &self.prepare_hooks {
            value = hook(&value);
        }

        let value = self.raw_blocks.extract(&value);
        let mut value = self.compile_component_tags(&strip_comments(&value))?;

        for precompiler in &self.precompilers {
            value = precompiler(&value);
        }

        let mut result = map_literals(&value, |literal| self.compile_literal(literal))?;

        if !self.raw_blocks.is_empty() {
            result = self.raw_blocks.restore(&result);
        }

        if !self.footer.is_empty() {
            result = self.add_footers(&result);
        }

        tracing::trace!(
            bytes = source.len(),
            footers = self.footer.len(),
            "compiled template"
        );

        Ok(result
            .replace(BEGIN_COMPONENT_CLASS, "")
            .replace(END_COMPONENT_CLASS, ""))
    }

    /// Read, compile and tag the template at `path`.
    pub fn compile_path(&mut self, path: impl AsRef<Path>) -> Result<String> {
        let path = path.as_ref();
        let source = fs::read_to_string(path).map_err(|source| CompileError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        tracing::debug!(path = %path.display(), "compiling template");
        self.set_path(path);

        let mut contents = self.compile_string(&source)?;
        if ends_in_open_code(&contents) {
            contents.push_str(" ?>");
        }
        contents.push_str(&format!("<?php /**PATH {} ENDPATH**/ ?>", path.display()));
        Ok(contents)
    }

    /// Location of the compiled output for `path` under `cache_dir`.
    pub fn compiled_path(&self, cache_dir: impl AsRef<Path>, path: impl AsRef<Path>) -> PathBuf {
        let key = format!("v2{}", path.as_ref().display());
        cache_dir.as_ref().join(format!(
            "{:032x}.{}",
            xxh3_128(key.as_bytes()),
            self.options.compiled_extension
        ))
    }

    /// Whether the compiled output for `path` is missing or older than the
    /// template itself.
    pub fn is_expired(&self, cache_dir: impl AsRef<Path>, path: impl AsRef<Path>) -> Result<bool> {
        let path = path.as_ref();
        let compiled = self.compiled_path(cache_dir, path);
        let Ok(compiled_meta) = fs::metadata(&compiled) else {
            return Ok(true);
        };

        let io_error = |source| CompileError::Io {
            path: path.to_path_buf(),
            source,
        };
        let source_modified = fs::metadata(path).and_then(|m| m.modified()).map_err(io_error)?;
        let compiled_modified = compiled_meta.modified().map_err(|source| CompileError::Io {
            path: compiled.clone(),
            source,
        })?;
        Ok(source_modified >= compiled_modified)
    }

    fn compile_component_tags(&self, value: &str) -> Result<String> {
        if !self.options.compile_component_tags {
            return Ok(value.to_string());
        }
        ComponentTagCompiler::new(&self.components, &self.options.runtime, &self.echo).compile(value)
    }

    fn compile_literal(&mut self, literal: &str) -> Result<String> {
        let mut value = literal.to_string();
        let extensions = self.extensions.clone();
        for extension in &extensions {
            value = extension(&value, self);
        }

        let value = self.compile_statements(&value)?;
        Ok(self.echo.compile(&value))
    }

    /// Replace every `@statement` in `template`, left to right.
    pub(crate) fn compile_statements(&mut self, template: &str) -> Result<String> {
        let statements = statements::scan(template)?;
        let mut result = String::with_capacity(template.len());
        let mut cursor = 0;

        for statement in &statements {
            result.push_str(&template[cursor..statement.start]);
            result.push_str(&self.compile_statement(template, statement)?);
            cursor = statement.end;
        }
        result.push_str(&template[cursor..]);
        Ok(result)
    }

    fn compile_statement(&mut self, template: &str, statement: &Statement<'_>) -> Result<String> {
        let compiled = if statement.is_escaped() {
            format!("{}{}", statement.name, statement.arguments.unwrap_or(""))
        } else if let Some(handler) = self.directives.handler(statement.name) {
            handler(custom_directive_argument(statement.arguments))
        } else if let Some(rule) = directives::builtin(statement.name) {
            rule(self, statement.arguments)?
        } else {
            return Ok(statement.text(template).to_string());
        };

        Ok(match statement.arguments {
            Some(_) => compiled,
            None => compiled + statement.whitespace,
        })
    }

    fn add_footers(&self, result: &str) -> String {
        let footers: Vec<&str> = self.footer.iter().rev().map(String::as_str).collect();
        format!("{}\n{}", result.trim_start_matches('\n'), footers.join("\n"))
    }

    /// Push a hash for a class component about to be opened.
    pub fn new_component_hash(&mut self, identifier: &str) -> String {
        let hash = format!("{:032x}", xxh3_128(identifier.as_bytes()));
        self.component_hash_stack.push(hash.clone());
        hash
    }

    /// Deterministic UUID-shaped id for `@once` blocks without an explicit id.
    pub(crate) fn next_once_id(&mut self) -> String {
        self.once_counter += 1;

        let mut seed = Vec::with_capacity(64);
        seed.extend_from_slice(&self.source_hash.to_le_bytes());
        if let Some(path) = &self.path {
            seed.extend_from_slice(path.to_string_lossy().as_bytes());
        }
        seed.extend_from_slice(&self.once_counter.to_le_bytes());

        let hex = format!("{:032x}", xxh3_128(&seed));
        format!(
            "{}-{}-{}-{}-{}",
            &hex[0..8],
            &hex[8..12],
            &hex[12..16],
            &hex[16..20],
            &hex[20..32]
        )
    }

    /// Register a custom directive.
    pub fn directive<F>(&self, name: &str, handler: F) -> Result<()>
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.directives.register(name, handler)
    }

    /// Register an `@name` / `@elsename` / `@endname` condition.
    pub fn if_condition<F>(&self, name: &str, predicate: F) -> Result<()>
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        self.directives.register_condition(name, predicate)
    }

    pub fn check(&self, name: &str, parameters: &[Value]) -> bool {
        self.directives.check(name, parameters)
    }

    pub fn extend<F>(&mut self, extension: F)
    where
        F: Fn(&str, &Compiler) -> String + Send + Sync + 'static,
    {
        self.extensions.push(Arc::new(extension));
    }

    pub fn precompiler<F>(&mut self, precompiler: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.precompilers.push(Arc::new(precompiler));
    }

    pub fn prepare_strings_using<F>(&mut self, hook: F) -> &mut Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.prepare_hooks.push(Arc::new(hook));
        self
    }

    /// `printf`-style format for regular echoes; `%s` is the expression.
    pub fn set_echo_format(&mut self, format: impl Into<String>) {
        self.echo.echo_format = format.into();
    }

    pub fn with_double_encoding(&mut self) {
        self.echo.set_double_encoding(true);
    }

    pub fn without_double_encoding(&mut self) {
        self.echo.set_double_encoding(false);
    }

    pub fn without_component_tags(&mut self) {
        self.options.compile_component_tags = false;
    }

    /// Route echoed values of `kind` through `handler`. Once any handler is
    /// registered, every echo goes through `$__compiler->applyEchoHandler`.
    pub fn stringable<F>(&mut self, kind: &str, handler: F)
    where
        F: Fn(&Value) -> String + Send + Sync + 'static,
    {
        self.echo_handlers.insert(kind.to_string(), Arc::new(handler));
        self.echo.uses_echo_handlers = true;
    }

    /// Render `value` with the handler registered for its kind, or as
    /// plain text.
    pub fn apply_echo_handler(&self, value: &Value) -> String {
        match self.echo_handlers.get(echo_kind(value)) {
            Some(handler) => handler(value),
            None => match value {
                Value::String(text) => text.clone(),
                Value::Null => String::new(),
                Value::Bool(true) => "1".to_string(),
                Value::Bool(false) => String::new(),
                other => other.to_string(),
            },
        }
    }

    pub fn component(&self, class: &str, alias: Option<&str>, prefix: &str) {
        self.components.component(class, alias, prefix);
    }

    pub fn components_from<I, S>(&self, components: I, prefix: &str)
    where
        I: IntoIterator<Item = (S, Option<S>)>,
        S: AsRef<str>,
    {
        self.components.components(components, prefix);
    }

    pub fn component_namespace(&self, namespace: &str, prefix: &str) {
        self.components.component_namespace(namespace, prefix);
    }

    /// `@alias(...)` / `@endalias` for a view component at `path`. The
    /// alias defaults to the last dotted segment of the path.
    pub fn alias_component(&self, path: &str, alias: Option<&str>) -> Result<()> {
        let alias = alias_or_basename(path, alias);
        let view = path.to_string();
        self.directives.register(&alias, move |expression| {
            if expression.is_empty() {
                format!("<?php $__env->startComponent('{}'); ?>", view)
            } else {
                format!("<?php $__env->startComponent('{}', {}); ?>", view, expression)
            }
        })?;
        self.directives.register(&format!("end{}", alias), |_| {
            "<?php echo $__env->renderComponent(); ?>".to_string()
        })
    }

    /// `@alias(data)` renders the view at `path` with the local scope.
    pub fn alias_include(&self, path: &str, alias: Option<&str>) -> Result<()> {
        let alias = alias_or_basename(path, alias);
        let view = path.to_string();
        let defined_vars = self.options.runtime.defined_vars();
        self.directives.register(&alias, move |expression| {
            let expression = match strip_parentheses(expression) {
                "" => "[]",
                expression => expression,
            };
            format!(
                "<?php echo $__env->make('{}', {}, {}); ?>",
                view, expression, defined_vars
            )
        })
    }

    pub fn include(&self, path: &str, alias: Option<&str>) -> Result<()> {
        self.alias_include(path, alias)
    }
}

/// Custom directives get the argument without its outer parentheses.
fn custom_directive_argument(arguments: Option<&str>) -> &str {
    let value = arguments.unwrap_or("");
    let value = match value.strip_prefix('(').and_then(|v| v.strip_suffix(')')) {
        Some(inner) => inner,
        None => value,
    };
    value.trim()
}

fn alias_or_basename(path: &str, alias: Option<&str>) -> String {
    match alias.filter(|alias| !alias.is_empty()) {
        Some(alias) => alias.to_string(),
        None => path.rsplit('.').next().unwrap_or(path).to_string(),
    }
}

/// Handler key for a runtime value.
fn echo_kind(value: &Value) -> &'static str {
    match value {
        Value::Array(_) => "iterable",
        Value::Object(_) => "object",
        Value::String(_) => "string",
        Value::Number(_) => "number",
        Value::Bool(_) => "bool",
        Value::Null => "null",
    }
}
