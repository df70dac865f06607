//! Compile Errors
//!
//! Every hard failure aborts the compile of the current source.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while registering directives or compiling a template.
#[derive(Debug, Error)]
pub enum CompileError {
    /// A directive or condition name that is not `\w+(::\w+)?`.
    #[error("The directive name [{name}] is not valid. Directive names must only contain alphanumeric characters and underscores.")]
    Registration { name: String },

    /// A component tag that maps to neither a known type nor a view file.
    #[error("Unable to locate a class or view for component [{tag}].")]
    ComponentResolution { tag: String },

    #[error("Malformed @{directive} statement: {reason}")]
    MalformedExpression { directive: String, reason: String },

    #[error("Unable to parse attribute [{attribute}] on component [{tag}]: {reason}")]
    AttributeParse {
        tag: String,
        attribute: String,
        reason: String,
    },

    #[error("Failed to read template {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CompileError {
    pub fn registration(name: impl Into<String>) -> Self {
        CompileError::Registration { name: name.into() }
    }

    pub fn component_resolution(tag: impl Into<String>) -> Self {
        CompileError::ComponentResolution { tag: tag.into() }
    }

    pub fn malformed(directive: impl Into<String>, reason: impl Into<String>) -> Self {
        CompileError::MalformedExpression {
            directive: directive.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, CompileError>;
