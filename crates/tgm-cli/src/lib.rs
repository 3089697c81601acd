//! # tgm-cli — Type Graph Model Command Line
//!
//! Library half of the `tgm` binary. Each subcommand lives in its own
//! module with a clap `Args` struct and a `run_*` handler returning the
//! process exit code, so handlers can be driven from tests without
//! spawning the binary.
//!
//! ## Subcommands
//!
//! - `tgm validate <FILES>...` loads and merges declaration files, builds
//!   the model and prints every validation message.
//! - `tgm inspect <FILES>...` prints the introspection projection as JSON.
//!
//! ## Crate Policy
//!
//! - `anyhow` for error context; engine errors stay typed below this crate.
//! - Results go to stdout, diagnostics to stderr, logs through `tracing`.

pub mod inspect;
pub mod validate;
