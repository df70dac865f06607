//! Directives
//!
//! The custom directive registry and the table of built-in statement rules.
//! Custom directives receive their argument with the outer parentheses
//! stripped; built-in rules receive the raw argument group.

mod components;
mod conditionals;
mod helpers;
mod includes;
mod layouts;
mod loops;
mod stacks;

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;
use once_cell::sync::Lazy;
use serde_json::Value;

use crate::compiler::Compiler;
use crate::error::{CompileError, Result};
use crate::util::{is_valid_directive_name, strip_parentheses};

/// Compiles a directive's argument into output text.
pub type DirectiveHandler = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Evaluates a named condition for `$__compiler->check(...)`.
pub type ConditionPredicate = Arc<dyn Fn(&[Value]) -> bool + Send + Sync>;

/// Built-in rule: compiler state plus the raw argument group.
pub(crate) type Rule = fn(&mut Compiler, Option<&str>) -> Result<String>;

#[derive(Default)]
struct Registry {
    directives: IndexMap<String, DirectiveHandler>,
    conditions: IndexMap<String, ConditionPredicate>,
}

/// Cloneable handle to the directive registry; clones share registrations.
#[derive(Clone, Default)]
pub struct Directives {
    inner: Arc<RwLock<Registry>>,
}

impl std::fmt::Debug for Directives {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let registry = self.read();
        f.debug_struct("Directives")
            .field("directives", &registry.directives.keys().collect::<Vec<_>>())
            .field("conditions", &registry.conditions.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Directives {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, Registry> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Registry> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `@name`. Fails for names other than `\w+(::\w+)?`.
    pub fn register<F>(&self, name: &str, handler: F) -> Result<()>
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.register_handler(name, Arc::new(handler))
    }

    pub fn register_handler(&self, name: &str, handler: DirectiveHandler) -> Result<()> {
        if !is_valid_directive_name(name) {
            return Err(CompileError::registration(name));
        }
        tracing::debug!(name, "registered directive");
        self.write().directives.insert(name.to_string(), handler);
        Ok(())
    }

    /// Register `@name`, `@else<name>` and `@end<name>` backed by a
    /// runtime check of `predicate`.
    pub fn register_condition<F>(&self, name: &str, predicate: F) -> Result<()>
    where
        F: Fn(&[Value]) -> bool + Send + Sync + 'static,
    {
        if !is_valid_directive_name(name) {
            return Err(CompileError::registration(name));
        }

        let opening = name.to_string();
        self.register(name, move |expression| {
            if expression.is_empty() {
                format!("<?php if ($__compiler->check('{}')): ?>", opening)
            } else {
                format!("<?php if ($__compiler->check('{}', {})): ?>", opening, expression)
            }
        })?;

        let branch = name.to_string();
        self.register(&format!("else{}", name), move |expression| {
            if expression.is_empty() {
                format!("<?php elseif ($__compiler->check('{}')): ?>", branch)
            } else {
                format!("<?php elseif ($__compiler->check('{}', {})): ?>", branch, expression)
            }
        })?;

        self.register(&format!("end{}", name), |_| "<?php endif; ?>".to_string())?;

        self.write()
            .conditions
            .insert(name.to_string(), Arc::new(predicate));
        Ok(())
    }

    /// Evaluate a registered condition. Unknown conditions are false.
    pub fn check(&self, name: &str, parameters: &[Value]) -> bool {
        let predicate = self.read().conditions.get(name).cloned();
        predicate.is_some_and(|predicate| predicate(parameters))
    }

    pub fn handler(&self, name: &str) -> Option<DirectiveHandler> {
        self.read().directives.get(name).cloned()
    }

    pub fn names(&self) -> Vec<String> {
        self.read().directives.keys().cloned().collect()
    }

    /// Drop every registered directive and condition.
    pub fn reset(&self) {
        let mut registry = self.write();
        registry.directives.clear();
        registry.conditions.clear();
    }
}

/// Built-in rules keyed by lower-cased directive name.
static BUILTINS: Lazy<HashMap<&'static str, Rule>> = Lazy::new(|| {
    let mut rules: HashMap<&'static str, Rule> = HashMap::new();
    conditionals::register(&mut rules);
    loops::register(&mut rules);
    layouts::register(&mut rules);
    includes::register(&mut rules);
    components::register(&mut rules);
    stacks::register(&mut rules);
    helpers::register(&mut rules);
    rules
});

/// Argument group of a rule, or the empty string.
fn raw(arguments: Option<&str>) -> &str {
    arguments.unwrap_or("")
}

/// Argument group without its outer parentheses.
fn stripped(arguments: Option<&str>) -> &str {
    strip_parentheses(raw(arguments))
}

/// Look up a built-in rule. Names are matched case-insensitively.
pub(crate) fn builtin(name: &str) -> Option<Rule> {
    BUILTINS.get(name.to_ascii_lowercase().as_str()).copied()
}

/// Whether `name` is one of the built-in directives.
pub fn is_builtin(name: &str) -> bool {
    builtin(name).is_some()
}
