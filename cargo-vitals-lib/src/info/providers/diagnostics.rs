//! Shared handling of cargo's `--message-format=json` diagnostics stream.

use crate::Result;
use crate::info::Context;
use camino::Utf8Path;
use cargo_metadata::Message;
use cargo_metadata::diagnostic::{Diagnostic, DiagnosticLevel};
use ohno::IntoAppError;
use std::collections::HashSet;
use std::fs;

const LOG_TARGET: &str = "diagnostic";

const CLIPPY_PREFIX: &str = "clippy::";

/// Which diagnostics a provider is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DiagnosticKind {
    /// Compiler warnings, excluding clippy lints.
    Warning,

    /// Clippy lints, whatever their level.
    Lint,
}

impl DiagnosticKind {
    fn matches(self, diagnostic: &Diagnostic) -> bool {
        let is_lint = lint_name(diagnostic).is_some();
        match self {
            Self::Warning => !is_lint && diagnostic.level == DiagnosticLevel::Warning,
            Self::Lint => is_lint && matches!(diagnostic.level, DiagnosticLevel::Warning | DiagnosticLevel::Error),
        }
    }
}

/// The clippy lint name of a diagnostic, without the `clippy::` prefix.
#[must_use]
pub fn lint_name(diagnostic: &Diagnostic) -> Option<&str> {
    diagnostic.code.as_ref().and_then(|c| c.code.strip_prefix(CLIPPY_PREFIX))
}

/// Obtain a JSON message stream, either from a saved log or by running cargo.
///
/// `cargo_args` is the cargo invocation used when no log is given, without the message format flag.
pub fn read_messages(context: &Context, messages: Option<&Utf8Path>, cargo_args: &[&str]) -> Result<String> {
    if let Some(path) = messages {
        let path = context.resolve(path);
        log::debug!(target: LOG_TARGET, "Reading compiler messages from '{path}'");
        return fs::read_to_string(&path).into_app_err_with(|| format!("reading compiler messages from '{path}'"));
    }

    let mut args = cargo_args.to_vec();
    args.push("--message-format=json");
    context.toolchain().run_cargo_messages(context.workspace_root(), &args)
}

/// The distinct diagnostics of `kind` found in a JSON message stream.
///
/// Diagnostics without a source location (such as the "N warnings emitted" summary) are ignored,
/// and diagnostics reported more than once, for instance by several targets sharing a module,
/// are only returned once. Lines that are not compiler messages are skipped.
#[must_use]
pub fn collect(messages: &str, kind: DiagnosticKind) -> Vec<Diagnostic> {
    let mut seen = HashSet::new();
    let mut result = Vec::new();

    for message in Message::parse_stream(messages.as_bytes()) {
        let message = match message {
            Ok(message) => message,
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Could not read compiler message: {e:#}");
                continue;
            }
        };

        let Message::CompilerMessage(compiler_message) = message else {
            continue;
        };

        let diagnostic = compiler_message.message;
        if diagnostic.spans.is_empty() || !kind.matches(&diagnostic) {
            continue;
        }

        let key = diagnostic.rendered.clone().unwrap_or_else(|| diagnostic.message.clone());
        if seen.insert(key) {
            result.push(diagnostic);
        }
    }

    log::debug!(target: LOG_TARGET, "Found {} distinct {kind:?} diagnostic(s)", result.len());
    result
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
pub(crate) mod tests {
    use super::*;
    use serde_json::json;

    /// A single `compiler-message` line as emitted by `cargo check --message-format=json`.
    pub(crate) fn compiler_message(level: &str, code: Option<&str>, file: &str, line: u64, text: &str) -> String {
        json!({
            "reason": "compiler-message",
            "package_id": "path+file:///work/widget#0.1.0",
            "manifest_path": "/work/widget/Cargo.toml",
            "target": {
                "name": "widget",
                "kind": ["lib"],
                "crate_types": ["lib"],
                "src_path": "/work/widget/src/lib.rs",
                "edition": "2021"
            },
            "message": {
                "message": text,
                "code": code.map(|c| json!({ "code": c, "explanation": null })),
                "level": level,
                "spans": [{
                    "file_name": file,
                    "byte_start": 10,
                    "byte_end": 20,
                    "line_start": line,
                    "line_end": line,
                    "column_start": 5,
                    "column_end": 15,
                    "is_primary": true,
                    "text": [],
                    "label": null,
                    "suggested_replacement": null,
                    "suggestion_applicability": null,
                    "expansion": null
                }],
                "children": [],
                "rendered": format!("{level}: {text}\n --> {file}:{line}:5\n")
            }
        })
        .to_string()
    }

    /// The location-less "N warnings emitted" line rustc appends.
    pub(crate) fn warnings_emitted(count: u64) -> String {
        json!({
            "reason": "compiler-message",
            "package_id": "path+file:///work/widget#0.1.0",
            "target": {
                "name": "widget",
                "kind": ["lib"],
                "src_path": "/work/widget/src/lib.rs"
            },
            "message": {
                "message": format!("{count} warnings emitted"),
                "code": null,
                "level": "warning",
                "spans": [],
                "children": [],
                "rendered": format!("warning: {count} warnings emitted\n")
            }
        })
        .to_string()
    }

    fn stream(lines: &[String]) -> String {
        let mut s = lines.join("\n");
        s.push('\n');
        s
    }

    #[test]
    fn test_counts_warnings_only() {
        let messages = stream(&[
            compiler_message("warning", Some("unused_variables"), "src/lib.rs", 3, "unused variable: `x`"),
            compiler_message("warning", Some("clippy::needless_return"), "src/lib.rs", 8, "unneeded `return` statement"),
            compiler_message("error", Some("E0308"), "src/lib.rs", 12, "mismatched types"),
            warnings_emitted(2),
        ]);

        let warnings = collect(&messages, DiagnosticKind::Warning);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].message, "unused variable: `x`");
    }

    #[test]
    fn test_counts_lints_only() {
        let messages = stream(&[
            compiler_message("warning", Some("unused_variables"), "src/lib.rs", 3, "unused variable: `x`"),
            compiler_message("warning", Some("clippy::needless_return"), "src/lib.rs", 8, "unneeded `return` statement"),
            compiler_message("error", Some("clippy::panic"), "src/lib.rs", 9, "`panic` should not be present"),
        ]);

        let lints = collect(&messages, DiagnosticKind::Lint);
        let names: Vec<_> = lints.iter().filter_map(lint_name).collect();
        assert_eq!(names, vec!["needless_return", "panic"]);
    }

    #[test]
    fn test_duplicates_count_once() {
        let line = compiler_message("warning", Some("dead_code"), "src/lib.rs", 3, "function `f` is never used");
        let messages = stream(&[line.clone(), line]);
        assert_eq!(collect(&messages, DiagnosticKind::Warning).len(), 1);
    }

    #[test]
    fn test_skips_non_json_lines() {
        let messages = format!(
            "   Compiling widget v0.1.0\n{}\nnot json at all\n",
            compiler_message("warning", None, "src/main.rs", 1, "unused import")
        );
        assert_eq!(collect(&messages, DiagnosticKind::Warning).len(), 1);
    }

    #[test]
    fn test_empty_stream() {
        assert!(collect("", DiagnosticKind::Warning).is_empty());
        assert!(collect("", DiagnosticKind::Lint).is_empty());
    }

    #[test]
    fn test_read_messages_from_missing_file() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(tmp.path()).unwrap();
        let context = crate::info::providers::tests::context_in(root);
        let _ = read_messages(&context, Some(Utf8Path::new("missing.json")), &["check"]).unwrap_err();
    }
}
