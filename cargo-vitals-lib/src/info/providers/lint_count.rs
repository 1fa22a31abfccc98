use super::diagnostics::{self, DiagnosticKind};
use crate::Result;
use crate::info::{Context, InfoProvider, Summary, SummaryStyle, Trend};
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const DEFAULT_MAX_LISTED: usize = 5;

/// Counts clippy lint violations, in total and per lint.
#[derive(Debug, Clone, Copy, Default)]
pub struct LintCount;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LintCountArgs {
    /// A saved `cargo clippy --message-format=json` log to read instead of running clippy
    #[serde(default)]
    pub messages: Option<Utf8PathBuf>,

    /// Lint every target (tests, benches, examples), not just the default ones
    #[serde(default)]
    pub all_targets: bool,

    /// How many lints that got worse are listed individually
    #[serde(default = "default_max_listed")]
    pub max_listed: usize,
}

const fn default_max_listed() -> usize {
    DEFAULT_MAX_LISTED
}

impl Default for LintCountArgs {
    fn default() -> Self {
        Self {
            messages: None,
            all_targets: false,
            max_listed: DEFAULT_MAX_LISTED,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct LintCountData {
    pub total: u64,

    #[serde(default)]
    pub by_lint: BTreeMap<String, u64>,
}

impl InfoProvider for LintCount {
    type Data = LintCountData;
    type Args = LintCountArgs;

    fn identifier(&self) -> &str {
        "lint_count"
    }

    fn extract(&self, context: &Context, args: Option<&LintCountArgs>) -> Result<LintCountData> {
        let messages = args.and_then(|a| a.messages.as_deref());
        let mut cargo_args = vec!["clippy", "--package", context.project().package.as_str()];
        if args.is_some_and(|a| a.all_targets) {
            cargo_args.push("--all-targets");
        }

        let stream = diagnostics::read_messages(context, messages, &cargo_args)?;

        let mut by_lint = BTreeMap::new();
        for diagnostic in diagnostics::collect(&stream, DiagnosticKind::Lint) {
            if let Some(name) = diagnostics::lint_name(&diagnostic) {
                *by_lint.entry(name.to_string()).or_insert(0) += 1;
            }
        }

        Ok(LintCountData {
            total: by_lint.values().sum(),
            by_lint,
        })
    }

    fn summarize(&self, current: &LintCountData, previous: Option<&LintCountData>, args: Option<&LintCountArgs>) -> Vec<Summary> {
        let mut summaries = vec![Summary::compare(
            "clippy lints",
            current.total,
            previous.map(|p| p.total),
            Trend::IncreaseIsBad,
            |v| v.to_string(),
        )];

        let Some(previous) = previous else {
            return summaries;
        };

        let mut grown: Vec<(&str, u64, u64)> = current
            .by_lint
            .iter()
            .filter_map(|(name, &now)| {
                let before = previous.by_lint.get(name).copied().unwrap_or_default();
                (now > before).then_some((name.as_str(), now, before))
            })
            .collect();

        // largest growth first, then by name
        grown.sort_by(|a, b| (b.1 - b.2).cmp(&(a.1 - a.2)).then_with(|| a.0.cmp(b.0)));

        let max_listed = args.map_or(DEFAULT_MAX_LISTED, |a| a.max_listed);
        for &(name, now, before) in grown.iter().take(max_listed) {
            summaries.push(Summary::compare(&format!("x {name}"), now, Some(before), Trend::IncreaseIsBad, |v| v.to_string()));
        }

        if grown.len() > max_listed {
            summaries.push(Summary::new(
                format!("...and {} more lint(s) got worse", grown.len() - max_listed),
                SummaryStyle::Negative,
            ));
        }

        summaries
    }
}
