//! bladec
//!
//! Compiles Blade templates to files under `--out-dir`, or to stdout.

use clap::{Arg, ArgAction, Command};
use std::path::{Path, PathBuf};
use std::process;

use blade_compiler_cli::config::BladeConfig;
use blade_compiler_cli::logging::init_tracing;
use blade_compiler_cli::perform_compile::{expand_inputs, perform_compile, CompileRequest, Outcome};

const DEFAULT_CONFIG: &str = "blade.json";

fn main() {
    let matches = Command::new("bladec")
        .version(blade_compiler::VERSION)
        .about("Blade template compiler")
        .arg(
            Arg::new("config")
                .short('c')
                .long("config")
                .value_name("PATH")
                .help("Path to blade.json"),
        )
        .arg(
            Arg::new("out-dir")
                .short('o')
                .long("out-dir")
                .value_name("DIR")
                .help("Write compiled views here instead of stdout"),
        )
        .arg(
            Arg::new("force")
                .short('f')
                .long("force")
                .action(ArgAction::SetTrue)
                .help("Recompile views that are up to date"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .action(ArgAction::Count)
                .help("Increase log verbosity"),
        )
        .arg(
            Arg::new("inputs")
                .value_name("INPUT")
                .num_args(1..)
                .required(true)
                .help("Template files or glob patterns"),
        )
        .get_matches();

    init_tracing(matches.get_count("verbose"));

    let config_path = match matches.get_one::<String>("config") {
        Some(path) => Some(PathBuf::from(path)),
        None => Path::new(DEFAULT_CONFIG)
            .exists()
            .then(|| PathBuf::from(DEFAULT_CONFIG)),
    };

    let patterns: Vec<String> = matches
        .get_many::<String>("inputs")
        .map(|values| values.cloned().collect())
        .unwrap_or_default();

    let request = CompileRequest {
        inputs: Vec::new(),
        out_dir: matches.get_one::<String>("out-dir").map(PathBuf::from),
        force: matches.get_flag("force"),
    };

    match run(config_path.as_deref(), &patterns, request) {
        Ok(true) => {}
        Ok(false) => process::exit(1),
        Err(error) => {
            eprintln!("Error: {:#}", error);
            process::exit(1);
        }
    }
}

/// `Ok(false)` when any template failed to compile.
fn run(config_path: Option<&Path>, patterns: &[String], mut request: CompileRequest) -> anyhow::Result<bool> {
    let config = match config_path {
        Some(path) => BladeConfig::load(path)?,
        None => BladeConfig::default(),
    };
    request.inputs = expand_inputs(patterns)?;

    let result = perform_compile(&config, &request)?;
    for file in &result.files {
        match &file.outcome {
            Ok(Outcome::Printed(text)) => println!("{}", text),
            Ok(Outcome::Written(target)) => {
                tracing::info!(path = %file.path.display(), target = %target.display(), "compiled")
            }
            Ok(Outcome::Fresh(_)) => {}
            Err(error) => eprintln!("Error: {}: {:#}", file.path.display(), error),
        }
    }
    Ok(!result.has_failures())
}
