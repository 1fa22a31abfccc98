//! Command dispatch logic for cargo-vitals

use super::{CollectArgs, HistoryArgs, InitArgs, ValidateArgs, collect_vitals, init_config, show_history, validate_config};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "cargo-vitals", bin_name = "cargo", version, about, author)]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: CargoSubcommand,
}

#[derive(Subcommand, Debug)]
enum CargoSubcommand {
    Vitals(Args),
}

#[derive(Parser, Debug)]
#[command(name = "cargo-vitals", author, version, long_about = None, display_name = "cargo-vitals")]
#[command(about = "Track the vitals of a Rust project over time")]
struct Args {
    #[command(subcommand)]
    command: VitalsSubcommand,
}

#[derive(Subcommand, Debug)]
enum VitalsSubcommand {
    /// Extract the project's metrics, compare them with the previous run, and report the changes
    Collect(Box<CollectArgs>),
    /// Show the runs recorded in the history file
    History(HistoryArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if command parsing fails or if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    let CargoSubcommand::Vitals(args) = Cli::parse_from(args).command;

    match &args.command {
        VitalsSubcommand::Collect(collect_args) => collect_vitals(host, collect_args).await,
        VitalsSubcommand::History(history_args) => show_history(host, history_args),
        VitalsSubcommand::Init(init_args) => init_config(host, init_args),
        VitalsSubcommand::Validate(validate_args) => validate_config(host, validate_args),
    }
}
