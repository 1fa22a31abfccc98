use crate::Result;
use crate::info::{History, Output, PROJECT_INFO_KEY, ProjectInfo, SummaryStyle};
use core::fmt::Write;
use owo_colors::OwoColorize;

const fn marker(style: SummaryStyle) -> &'static str {
    match style {
        SummaryStyle::Positive => "+",
        SummaryStyle::Negative => "-",
        SummaryStyle::Neutral => "·",
    }
}

pub fn generate<W: Write>(output: &Output, project: &ProjectInfo, use_colors: bool, writer: &mut W) -> Result<()> {
    let header = project.to_string();
    if use_colors {
        writeln!(writer, "{}", header.bold())?;
    } else {
        writeln!(writer, "{header}")?;
    }

    if let Some(description) = &project.description {
        writeln!(writer, "{description}")?;
    }

    writeln!(writer)?;

    if output.summaries().is_empty() && output.errors().is_empty() {
        writeln!(writer, "  No metrics were extracted")?;
        return Ok(());
    }

    for tagged in output.summaries() {
        let line = format!("{} {}", marker(tagged.summary.style), tagged.summary.text);
        if use_colors {
            match tagged.summary.style {
                SummaryStyle::Positive => writeln!(writer, "  {}", line.green())?,
                SummaryStyle::Negative => writeln!(writer, "  {}", line.red())?,
                SummaryStyle::Neutral => writeln!(writer, "  {line}")?,
            }
        } else {
            writeln!(writer, "  {line}")?;
        }
    }

    if !output.errors().is_empty() {
        writeln!(writer)?;
        if use_colors {
            writeln!(writer, "{}", "Errors".red().bold())?;
        } else {
            writeln!(writer, "Errors")?;
        }

        for error in output.errors() {
            writeln!(writer, "  {error}")?;
        }
    }

    Ok(())
}

/// Render the recorded runs, newest first, showing at most `limit` of them.
pub fn generate_history<W: Write>(history: &History, limit: Option<usize>, use_colors: bool, writer: &mut W) -> Result<()> {
    if history.is_empty() {
        writeln!(writer, "No runs recorded yet")?;
        return Ok(());
    }

    let count = history.len();
    let shown = limit.unwrap_or(count).min(count);

    for (index, (record, info)) in history.records().iter().zip(history.project_infos()).take(shown).enumerate() {
        let number = format!("#{}", count - index);
        let title = info.as_ref().map_or_else(
            || "(no project information)".to_string(),
            |info| format!("{}  {info}", info.timestamp.format("%Y-%m-%d %H:%M:%S UTC")),
        );

        if use_colors {
            writeln!(writer, "{} {title}", number.bold())?;
        } else {
            writeln!(writer, "{number} {title}")?;
        }

        if let Some(description) = info.as_ref().and_then(|i| i.description.as_ref()) {
            writeln!(writer, "    {description}")?;
        }

        let providers: Vec<&str> = record.keys().map(String::as_str).filter(|k| *k != PROJECT_INFO_KEY).collect();
        if providers.is_empty() {
            writeln!(writer, "    no metrics recorded")?;
        } else {
            writeln!(writer, "    {}", providers.join(", "))?;
        }
    }

    if shown < count {
        writeln!(writer, "... {} older run(s) not shown", count - shown)?;
    }

    Ok(())
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::info::{OutputBuilder, RunProjectInfo, RunRecord};
    use crate::reports::tests::{output, project};
    use chrono::{TimeZone, Utc};
    use serde_json::{Map, json};

    #[test]
    fn test_generate_no_colors() {
        let mut text = String::new();
        generate(&output(), &project(), false, &mut text).unwrap();

        assert_eq!(
            text,
            "widget 1.4.0 (88) widget [release]\n\
             Nightly build\n\
             \n  \
             - 15 warnings (increased by 3 from 12)\n  \
             · 900 lines of code (unchanged)\n  \
             + 10 source files (decreased by 1 from 11)\n\
             \n\
             Errors\n  \
             lint_count: tool not found\n"
        );
    }

    #[test]
    fn test_generate_with_colors() {
        let mut text = String::new();
        generate(&output(), &project(), true, &mut text).unwrap();

        assert!(text.contains("\u{1b}["));
        assert!(text.contains("15 warnings (increased by 3 from 12)"));
        assert!(text.contains("lint_count: tool not found"));
    }

    #[test]
    fn test_generate_empty_output() {
        let mut project = project();
        project.description = None;

        let mut text = String::new();
        generate(&OutputBuilder::new().build(), &project, false, &mut text).unwrap();
        assert_eq!(text, "widget 1.4.0 (88) widget [release]\n\n  No metrics were extracted\n");
    }

    fn history() -> History {
        let mut history = History::new(vec![json!({ "lines_of_code": { "files": 1, "lines": 2 } }).as_object().unwrap().clone()]);

        let mut data = Map::new();
        let _ = data.insert("warning_count".to_string(), json!({ "warnings": 3 }));
        history
            .prepend(RunRecord {
                project: RunProjectInfo {
                    package: "widget".to_string(),
                    target: "widget".to_string(),
                    profile: "debug".to_string(),
                    version: "0.2.0".to_string(),
                    build_number: None,
                    description: Some("from CI".to_string()),
                    timestamp: Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap(),
                },
                data,
            })
            .unwrap();
        history
    }

    #[test]
    fn test_generate_history() {
        let mut text = String::new();
        generate_history(&history(), None, false, &mut text).unwrap();

        assert_eq!(
            text,
            "#2 2024-01-15 10:30:00 UTC  widget 0.2.0 widget [debug]\n    \
             from CI\n    \
             warning_count\n\
             #1 (no project information)\n    \
             lines_of_code\n"
        );
    }

    #[test]
    fn test_generate_history_with_limit() {
        let mut text = String::new();
        generate_history(&history(), Some(1), false, &mut text).unwrap();

        assert!(text.starts_with("#2 "));
        assert!(!text.contains("#1 "));
        assert!(text.ends_with("... 1 older run(s) not shown\n"));
    }

    #[test]
    fn test_generate_empty_history() {
        let mut text = String::new();
        generate_history(&History::default(), None, false, &mut text).unwrap();
        assert_eq!(text, "No runs recorded yet\n");
    }
}
