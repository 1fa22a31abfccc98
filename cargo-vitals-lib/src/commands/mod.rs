//! Command-line interface and orchestration for cargo-vitals
//!
//! This module implements the CLI commands and wires the provider pipeline, the history file,
//! the reports, and webhook delivery together.
//!
//! # Commands
//!
//! - **collect**: Run the configured providers, print the changes since the previous run, append
//!   the run to the history file, and post the report to a webhook
//! - **history**: List the recorded runs
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//!
//! The `collect` command prints its report before saving and delivering it, so a broken history
//! file or an unreachable webhook never hides the measurements of the run.

mod collect;
mod common;
mod config;
mod history;
mod host;
mod init;
mod run;
mod validate;

#[cfg(debug_assertions)]
pub use config::Config;

pub use collect::{CollectArgs, collect_vitals};
pub use common::{ColorMode, CommonArgs, LogLevel};
pub use history::{HistoryArgs, show_history};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
