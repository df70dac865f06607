#![deny(clippy::all)]

//! Blade Compiler CLI
//!
//! Configuration loading, logging setup and the parallel compile driver
//! behind the `bladec` binary.

pub use blade_compiler as compiler;

pub mod config;
pub mod logging;
pub mod perform_compile;

/// CLI version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
