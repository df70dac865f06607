//! Blade Template Compiler
//!
//! Compiles Blade-style templates (literal markup with `@directives`,
//! `{{ echoes }}` and `<x-component>` tags) into host-language source with
//! embedded `<?php ... ?>` code blocks.

pub mod attributes;
pub mod balanced;
pub mod chars;
pub mod compiler;
pub mod component_tags;
pub mod components;
pub mod directives;
pub mod echo;
pub mod error;
pub mod options;
pub mod raw_blocks;
pub mod runtime;
pub mod segments;
pub mod statements;
pub mod types;
pub mod util;

pub use compiler::Compiler;
pub use components::Components;
pub use directives::Directives;
pub use error::{CompileError, Result};
pub use options::{CompilerOptions, RuntimeNames};
pub use raw_blocks::RawBlockStore;
pub use types::{FileViewFinder, TypeDescriptor, TypeIntrospector, ViewFinder};

/// Crate version, written into generated file headers by the CLI.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
