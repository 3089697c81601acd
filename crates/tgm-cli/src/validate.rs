//! # Validate Subcommand
//!
//! Loads and merges declaration files, constructs the model and runs one
//! validation pass. Every message is printed in traversal order as
//! `<severity>: <text> (at <location>)`.
//!
//! Exit code 1 if any error was reported, or any warning when
//! `--deny-warnings` is set; 0 otherwise. Files that cannot be read or
//! parsed are reported through `anyhow` and also exit 1.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use tgm_model::{Model, ModelConfig, ValidationResult};

/// Arguments for the validate subcommand.
#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Declaration files (YAML or JSON), merged in the given order.
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Treat warnings as failures.
    #[arg(long)]
    pub deny_warnings: bool,
}

/// Execute the validate subcommand.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let result = validate_files(&args.files)?;

    for message in result.messages() {
        println!("{message}");
    }

    let code = exit_code(&result, args.deny_warnings);
    if code == 0 {
        println!(
            "OK: {} file(s), {} warning(s)",
            args.files.len(),
            result.warning_count()
        );
    } else {
        eprintln!(
            "FAILED: {} error(s), {} warning(s)",
            result.error_count(),
            result.warning_count()
        );
    }
    Ok(code)
}

/// Load, merge and validate `files` without rejecting on errors.
pub fn validate_files(files: &[PathBuf]) -> Result<ValidationResult> {
    let config = ModelConfig::load_all(files).context("failed to load model declarations")?;
    tracing::debug!(types = config.types.len(), "declarations merged");
    Ok(Model::new(config).validate())
}

/// Map a validation result to a process exit code.
pub fn exit_code(result: &ValidationResult, deny_warnings: bool) -> u8 {
    if result.has_errors() || (deny_warnings && result.warning_count() > 0) {
        1
    } else {
        0
    }
}
