//! Perform Compile
//!
//! Expands the input patterns and compiles every template in parallel, one
//! `Compiler` per file over shared directive and component registries.

use anyhow::Context;
use rayon::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use blade_compiler::{Compiler, CompilerOptions, Components, Directives};

use crate::config::BladeConfig;

/// What to compile and where the output goes.
#[derive(Debug, Clone, Default)]
pub struct CompileRequest {
    pub inputs: Vec<PathBuf>,
    /// Without one, compiled text is returned for printing.
    pub out_dir: Option<PathBuf>,
    /// Recompile even when the compiled file is newer than the template.
    pub force: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Written(PathBuf),
    /// The compiled file is up to date.
    Fresh(PathBuf),
    Printed(String),
}

#[derive(Debug)]
pub struct FileResult {
    pub path: PathBuf,
    pub outcome: anyhow::Result<Outcome>,
}

#[derive(Debug, Default)]
pub struct CompilationResult {
    pub files: Vec<FileResult>,
}

impl CompilationResult {
    pub fn failures(&self) -> usize {
        self.files.iter().filter(|file| file.outcome.is_err()).count()
    }

    pub fn has_failures(&self) -> bool {
        self.failures() > 0
    }
}

/// Files named directly, plus every file matching the glob patterns, in a
/// stable order without duplicates.
pub fn expand_inputs(patterns: &[String]) -> anyhow::Result<Vec<PathBuf>> {
    let mut inputs = Vec::new();

    for pattern in patterns {
        if Path::new(pattern).is_file() {
            inputs.push(PathBuf::from(pattern));
            continue;
        }

        let before = inputs.len();
        for entry in glob::glob(pattern).with_context(|| format!("invalid pattern {}", pattern))? {
            let path = entry?;
            if path.is_file() {
                inputs.push(path);
            }
        }
        if inputs.len() == before {
            anyhow::bail!("no templates match {}", pattern);
        }
    }

    inputs.sort();
    inputs.dedup();
    Ok(inputs)
}

pub fn perform_compile(config: &BladeConfig, request: &CompileRequest) -> anyhow::Result<CompilationResult> {
    let start = Instant::now();

    if let Some(out_dir) = &request.out_dir {
        fs::create_dir_all(out_dir)
            .with_context(|| format!("failed to create {}", out_dir.display()))?;
    }

    let options = config.compiler_options();
    let directives = Directives::new();
    let components = config.components();

    let files: Vec<FileResult> = request
        .inputs
        .par_iter()
        .map(|path| FileResult {
            path: path.clone(),
            outcome: compile_file(&options, &directives, &components, path, request),
        })
        .collect();

    let result = CompilationResult { files };
    tracing::info!(
        files = result.files.len(),
        failures = result.failures(),
        elapsed = ?start.elapsed(),
        "compilation finished"
    );
    Ok(result)
}

fn compile_file(
    options: &CompilerOptions,
    directives: &Directives,
    components: &Components,
    path: &Path,
    request: &CompileRequest,
) -> anyhow::Result<Outcome> {
    let mut compiler = Compiler::with_registries(options.clone(), directives.clone(), components.clone());

    let Some(out_dir) = &request.out_dir else {
        return Ok(Outcome::Printed(compiler.compile_path(path)?));
    };

    let target = compiler.compiled_path(out_dir, path);
    if !request.force && !compiler.is_expired(out_dir, path)? {
        tracing::debug!(path = %path.display(), "up to date");
        return Ok(Outcome::Fresh(target));
    }

    let contents = compiler.compile_path(path)?;
    fs::write(&target, contents).with_context(|| format!("failed to write {}", target.display()))?;
    tracing::debug!(path = %path.display(), target = %target.display(), "compiled");
    Ok(Outcome::Written(target))
}
