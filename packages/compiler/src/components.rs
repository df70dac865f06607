//! Component Catalog
//!
//! Tag aliases, namespace prefixes, type descriptors and the view finder,
//! shared between compiler instances behind one lock.

use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use indexmap::IndexMap;

use crate::options::RuntimeNames;
use crate::types::{TypeCache, TypeDescriptor, TypeIntrospector, ViewFinder};
use crate::util::{after_last, kebab};

const COMPONENTS_NAMESPACE: &str = "\\View\\Components\\";

#[derive(Default)]
struct Catalog {
    aliases: IndexMap<String, String>,
    namespaces: IndexMap<String, String>,
    default_namespace: String,
    types: TypeCache,
    view_finder: Option<Arc<dyn ViewFinder>>,
    views: HashMap<String, Option<String>>,
}

/// Cloneable handle; clones share registrations and caches.
#[derive(Clone)]
pub struct Components {
    inner: Arc<RwLock<Catalog>>,
}

impl Default for Components {
    fn default() -> Self {
        Self::new(&RuntimeNames::default())
    }
}

impl std::fmt::Debug for Components {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let catalog = self.read();
        f.debug_struct("Components")
            .field("aliases", &catalog.aliases)
            .field("namespaces", &catalog.namespaces)
            .field("default_namespace", &catalog.default_namespace)
            .field("types", &catalog.types)
            .finish()
    }
}

impl Components {
    /// Catalog with the dynamic and anonymous component types registered.
    pub fn new(runtime: &RuntimeNames) -> Self {
        let components = Self {
            inner: Arc::new(RwLock::new(Catalog::default())),
        };
        components.register_type(&runtime.dynamic_component, ["component"]);
        components.register_type(&runtime.anonymous_component, ["view", "data"]);
        components.alias("dynamic-component", &runtime.dynamic_component);
        components
    }

    fn read(&self) -> RwLockReadGuard<'_, Catalog> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Catalog> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Declare the constructor parameters of a component type.
    pub fn register_type<I, S>(&self, identifier: &str, params: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.write().types.declare(identifier, params);
    }

    pub fn set_introspector(&self, introspector: Arc<dyn TypeIntrospector>) {
        self.write().types.set_introspector(introspector);
    }

    pub fn set_view_finder(&self, finder: Arc<dyn ViewFinder>) {
        let mut catalog = self.write();
        catalog.view_finder = Some(finder);
        catalog.views.clear();
    }

    /// Map a tag name straight to an identifier.
    pub fn alias(&self, tag: &str, identifier: &str) {
        self.write()
            .aliases
            .insert(tag.to_string(), identifier.to_string());
    }

    /// Register a class component. Without an alias, one is derived from the
    /// class name: `App\View\Components\Forms\Input` becomes `forms:input`,
    /// anything else its kebab-cased base name.
    pub fn component(&self, class: &str, alias: Option<&str>, prefix: &str) {
        let (class, alias) = match alias {
            Some(alias) if alias.contains('\\') => (alias, Some(class)),
            _ => (class, alias),
        };

        let mut alias = match alias {
            Some(alias) => alias.to_string(),
            None => match class.find(COMPONENTS_NAMESPACE) {
                Some(index) => class[index + COMPONENTS_NAMESPACE.len()..]
                    .split('\\')
                    .map(kebab)
                    .collect::<Vec<_>>()
                    .join(":"),
                None => kebab(after_last(class, "\\")),
            },
        };

        if !prefix.is_empty() {
            alias = format!("{}-{}", prefix, alias);
        }

        tracing::debug!(alias = %alias, class, "registered component");
        self.alias(&alias, class);
    }

    /// Register several classes; entries without an alias derive one.
    pub fn components<I, S>(&self, components: I, prefix: &str)
    where
        I: IntoIterator<Item = (S, Option<S>)>,
        S: AsRef<str>,
    {
        for (class, alias) in components {
            self.component(class.as_ref(), alias.as_ref().map(AsRef::as_ref), prefix);
        }
    }

    /// Resolve `prefix::name` tags under `namespace`.
    pub fn component_namespace(&self, namespace: &str, prefix: &str) {
        self.write()
            .namespaces
            .insert(prefix.to_string(), namespace.trim_end_matches('\\').to_string());
    }

    /// Namespace for tags with no alias and no prefix.
    pub fn set_default_namespace(&self, namespace: &str) {
        self.write().default_namespace = namespace.trim_end_matches('\\').to_string();
    }

    pub fn default_namespace(&self) -> String {
        self.read().default_namespace.clone()
    }

    pub fn aliases(&self) -> IndexMap<String, String> {
        self.read().aliases.clone()
    }

    pub fn namespaces(&self) -> IndexMap<String, String> {
        self.read().namespaces.clone()
    }

    pub fn aliased(&self, tag: &str) -> Option<String> {
        self.read().aliases.get(tag).cloned()
    }

    pub fn namespace(&self, prefix: &str) -> Option<String> {
        self.read().namespaces.get(prefix).cloned()
    }

    pub fn descriptor(&self, identifier: &str) -> Option<TypeDescriptor> {
        self.write().types.descriptor(identifier)
    }

    pub fn has_type(&self, identifier: &str) -> bool {
        self.descriptor(identifier).is_some()
    }

    /// View file backing a class-less component tag.
    pub fn find_view(&self, tag: &str) -> Option<String> {
        let mut catalog = self.write();
        if let Some(found) = catalog.views.get(tag) {
            return found.clone();
        }
        let found = catalog.view_finder.as_ref().and_then(|finder| finder.find(tag));
        catalog.views.insert(tag.to_string(), found.clone());
        found
    }

    /// Forget memoised type and view lookups.
    pub fn flush(&self) {
        let mut catalog = self.write();
        catalog.types.flush();
        catalog.views.clear();
    }
}
