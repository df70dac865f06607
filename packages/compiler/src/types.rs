//! Type Descriptors
//!
//! Constructor signatures of component types, used to split tag attributes
//! into constructor data and residual attributes. Signatures are declared
//! up front or supplied by a [`TypeIntrospector`]; lookups are memoised
//! until [`TypeCache::flush`].

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use indexmap::IndexMap;
use smallvec::SmallVec;

pub type ParamList = SmallVec<[String; 4]>;

/// Ordered constructor parameter names of one component type.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TypeDescriptor {
    pub identifier: String,
    pub params: ParamList,
}

impl TypeDescriptor {
    pub fn new<I, S>(identifier: impl Into<String>, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            identifier: identifier.into(),
            params: params.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_param(&self, name: &str) -> bool {
        self.params.iter().any(|param| param == name)
    }
}

/// Source of constructor signatures for types that were not declared.
pub trait TypeIntrospector: Send + Sync {
    /// `None` for unknown types; `Some(vec![])` for types without an
    /// explicit constructor.
    fn constructor_params(&self, identifier: &str) -> Option<Vec<String>>;
}

/// `\Foo\Bar::class` and `Foo\Bar` name the same type.
pub fn normalize_identifier(identifier: &str) -> &str {
    let identifier = identifier.trim_start_matches('\\');
    identifier.strip_suffix("::class").unwrap_or(identifier)
}

#[derive(Default, Clone)]
pub struct TypeCache {
    declared: IndexMap<String, ParamList>,
    introspector: Option<Arc<dyn TypeIntrospector>>,
    resolved: HashMap<String, Option<TypeDescriptor>>,
}

impl std::fmt::Debug for TypeCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TypeCache")
            .field("declared", &self.declared)
            .field("has_introspector", &self.introspector.is_some())
            .field("resolved", &self.resolved.len())
            .finish()
    }
}

impl TypeCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare<I, S>(&mut self, identifier: &str, params: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let key = normalize_identifier(identifier).to_string();
        self.resolved.remove(&key);
        self.declared
            .insert(key, params.into_iter().map(Into::into).collect());
    }

    pub fn set_introspector(&mut self, introspector: Arc<dyn TypeIntrospector>) {
        self.introspector = Some(introspector);
        self.resolved.clear();
    }

    /// Descriptor for `identifier`, consulting declarations first.
    pub fn descriptor(&mut self, identifier: &str) -> Option<TypeDescriptor> {
        let key = normalize_identifier(identifier);
        if let Some(cached) = self.resolved.get(key) {
            return cached.clone();
        }

        let descriptor = match self.declared.get(key) {
            Some(params) => Some(TypeDescriptor {
                identifier: key.to_string(),
                params: params.clone(),
            }),
            None => self
                .introspector
                .as_ref()
                .and_then(|introspector| introspector.constructor_params(key))
                .map(|params| TypeDescriptor::new(key, params)),
        };

        tracing::trace!(identifier = key, found = descriptor.is_some(), "type descriptor");
        self.resolved.insert(key.to_string(), descriptor.clone());
        descriptor
    }

    pub fn exists(&mut self, identifier: &str) -> bool {
        self.descriptor(identifier).is_some()
    }

    /// Forget memoised lookups. Declarations stay registered.
    pub fn flush(&mut self) {
        self.resolved.clear();
    }
}

/// Locates template files backing class-less components.
pub trait ViewFinder: Send + Sync {
    /// Path of the view for a component tag name, if one exists.
    fn find(&self, name: &str) -> Option<String>;
}

/// Looks for `name` (with `:` as a directory separator) under each root,
/// first as given and then with each extension appended.
#[derive(Debug, Clone, Default)]
pub struct FileViewFinder {
    roots: Vec<PathBuf>,
    extensions: Vec<String>,
}

impl FileViewFinder {
    pub fn new<I, P>(roots: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        Self {
            roots: roots.into_iter().map(Into::into).collect(),
            extensions: vec!["blade.php".to_string()],
        }
    }

    pub fn with_extensions<I, S>(mut self, extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.extensions = extensions.into_iter().map(Into::into).collect();
        self
    }
}

impl ViewFinder for FileViewFinder {
    fn find(&self, name: &str) -> Option<String> {
        let relative = name.replace(':', "/");
        let roots: Vec<PathBuf> = if self.roots.is_empty() {
            vec![PathBuf::new()]
        } else {
            self.roots.clone()
        };

        for root in &roots {
            let exact = root.join(&relative);
            if exact.is_file() {
                return Some(exact.to_string_lossy().into_owned());
            }
            for extension in &self.extensions {
                let candidate = root.join(format!("{}.{}", relative, extension));
                if candidate.is_file() {
                    return Some(candidate.to_string_lossy().into_owned());
                }
            }
        }
        None
    }
}
