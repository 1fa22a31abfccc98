use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::reports::generate_history;
use clap::Parser;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct HistoryArgs {
    /// Show at most this many runs, newest first
    #[arg(long, short = 'n', value_name = "N")]
    pub limit: Option<usize>,

    #[command(flatten)]
    pub common: CommonArgs,
}

/// Print the runs recorded in the history file.
pub fn show_history<H: Host>(host: &mut H, args: &HistoryArgs) -> Result<()> {
    let common = Common::new(&args.common)?;
    let history = common.history_store().load()?;

    let mut text = String::new();
    generate_history(&history, args.limit, common.use_colors, &mut text)?;
    let _ = write!(host.output(), "{text}");
    Ok(())
}
