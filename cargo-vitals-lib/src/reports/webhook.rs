//! Chat webhook payloads.
//!
//! The payload follows the incoming-webhook message format: a `text` header followed by one
//! `attachments` entry per summary, colored by the summary's style. Summaries that carry a value
//! also get a short field titled with the provider identifier.

use crate::info::{Output, ProjectInfo, SummaryStyle};
use core::fmt::Write;
use serde_json::{Value, json};

pub const POSITIVE_COLOR: &str = "#36a64f";
pub const NEGATIVE_COLOR: &str = "#c41919";
pub const NEUTRAL_COLOR: &str = "#757575";

#[must_use]
pub const fn color(style: SummaryStyle) -> &'static str {
    match style {
        SummaryStyle::Positive => POSITIVE_COLOR,
        SummaryStyle::Negative => NEGATIVE_COLOR,
        SummaryStyle::Neutral => NEUTRAL_COLOR,
    }
}

/// Build the webhook message for a run.
#[must_use]
pub fn generate(output: &Output, project: &ProjectInfo) -> Value {
    let mut text = format!("*{project}*");
    if let Some(description) = &project.description {
        let _ = write!(text, "\n{description}");
    }

    if !output.errors().is_empty() {
        text.push_str("\n\n*Errors:*");
        for error in output.errors() {
            let _ = write!(text, "\n• {error}");
        }
    }

    let attachments: Vec<Value> = output
        .summaries()
        .iter()
        .map(|tagged| {
            let mut attachment = json!({
                "color": color(tagged.summary.style),
                "text": tagged.summary.text,
            });

            if let Some(number) = tagged.summary.number {
                attachment["fields"] = json!([{ "title": tagged.provider, "value": number.to_string(), "short": true }]);
            }

            attachment
        })
        .collect();

    json!({
        "text": text,
        "attachments": attachments,
    })
}
