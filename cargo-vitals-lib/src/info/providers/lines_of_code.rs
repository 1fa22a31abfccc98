use crate::Result;
use crate::info::{Context, InfoProvider, Summary, Trend};
use camino::Utf8PathBuf;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use walkdir::{DirEntry, WalkDir};

const LOG_TARGET: &str = "       loc";

/// Counts the non-blank lines of the project's Rust sources.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinesOfCode;

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LinesOfCodeArgs {
    /// Directories to scan, relative to the workspace root
    #[serde(default = "default_paths")]
    pub paths: Vec<Utf8PathBuf>,
}

fn default_paths() -> Vec<Utf8PathBuf> {
    vec![Utf8PathBuf::from("src")]
}

impl Default for LinesOfCodeArgs {
    fn default() -> Self {
        Self { paths: default_paths() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct LinesOfCodeData {
    pub files: u64,
    pub lines: u64,
}

fn is_skipped_dir(entry: &DirEntry) -> bool {
    // never skip the root the walk started from
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    name == "target" || name.starts_with('.')
}

impl InfoProvider for LinesOfCode {
    type Data = LinesOfCodeData;
    type Args = LinesOfCodeArgs;

    fn identifier(&self) -> &str {
        "lines_of_code"
    }

    fn extract(&self, context: &Context, args: Option<&LinesOfCodeArgs>) -> Result<LinesOfCodeData> {
        let default_args = LinesOfCodeArgs::default();
        let args = args.unwrap_or(&default_args);

        let mut data = LinesOfCodeData { files: 0, lines: 0 };
        for path in &args.paths {
            let root = context.resolve(path);
            if !root.exists() {
                return Err(app_err!("source directory '{root}' does not exist"));
            }

            let walker = WalkDir::new(&root)
                .follow_links(false)
                .into_iter()
                .filter_entry(|e| !is_skipped_dir(e));

            for entry in walker {
                let entry = entry.into_app_err_with(|| format!("walking '{root}'"))?;
                if entry.file_type().is_dir() || entry.path().extension().and_then(|s| s.to_str()) != Some("rs") {
                    continue;
                }

                let text = fs::read_to_string(entry.path()).into_app_err_with(|| format!("reading '{}'", entry.path().display()))?;
                data.files += 1;
                data.lines += text.lines().filter(|l| !l.trim().is_empty()).count() as u64;
            }
        }

        log::debug!(target: LOG_TARGET, "Counted {} line(s) in {} file(s)", data.lines, data.files);
        Ok(data)
    }

    fn summarize(&self, current: &LinesOfCodeData, previous: Option<&LinesOfCodeData>, _args: Option<&LinesOfCodeArgs>) -> Vec<Summary> {
        vec![
            Summary::compare("lines of code", current.lines, previous.map(|p| p.lines), Trend::Neutral, |v| v.to_string()),
            Summary::compare("source files", current.files, previous.map(|p| p.files), Trend::Neutral, |v| v.to_string()),
        ]
    }
}
