use super::diagnostics::{self, DiagnosticKind};
use crate::Result;
use crate::info::{Context, InfoProvider, Summary, Trend};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// Counts the distinct compiler warnings of the workspace.
#[derive(Debug, Clone, Copy, Default)]
pub struct WarningCount;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WarningCountArgs {
    /// A saved `--message-format=json` log to read instead of running `cargo check`
    #[serde(default)]
    pub messages: Option<Utf8PathBuf>,

    /// Check every target (tests, benches, examples), not just the default ones
    #[serde(default)]
    pub all_targets: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct WarningCountData {
    pub warnings: u64,
}

impl InfoProvider for WarningCount {
    type Data = WarningCountData;
    type Args = WarningCountArgs;

    fn identifier(&self) -> &str {
        "warning_count"
    }

    fn extract(&self, context: &Context, args: Option<&WarningCountArgs>) -> Result<WarningCountData> {
        let messages = args.and_then(|a| a.messages.as_deref());
        let mut cargo_args = vec!["check", "--package", context.project().package.as_str()];
        if args.is_some_and(|a| a.all_targets) {
            cargo_args.push("--all-targets");
        }

        let stream = diagnostics::read_messages(context, messages, &cargo_args)?;
        let warnings = diagnostics::collect(&stream, DiagnosticKind::Warning);

        Ok(WarningCountData {
            warnings: warnings.len() as u64,
        })
    }

    fn summarize(&self, current: &WarningCountData, previous: Option<&WarningCountData>, _args: Option<&WarningCountArgs>) -> Vec<Summary> {
        vec![Summary::compare(
            "warnings",
            current.warnings,
            previous.map(|p| p.warnings),
            Trend::IncreaseIsBad,
            |v| v.to_string(),
        )]
    }
}
