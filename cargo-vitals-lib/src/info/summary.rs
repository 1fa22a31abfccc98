use serde::{Deserialize, Serialize};

/// How a summary line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize, strum::Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SummaryStyle {
    /// The metric moved in a good direction.
    Positive,

    /// The metric moved in a bad direction.
    Negative,

    /// Informational, no judgement attached.
    Neutral,
}

/// Which direction of change is considered an improvement for a metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trend {
    IncreaseIsBad,
    IncreaseIsGood,
    Neutral,
}

/// One human-readable line describing a metric, usually as a delta against the previous run.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Summary {
    pub text: String,
    pub style: SummaryStyle,

    /// The numeric value the text describes, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<f64>,
}

impl Summary {
    #[must_use]
    pub fn new(text: impl Into<String>, style: SummaryStyle) -> Self {
        Self {
            text: text.into(),
            style,
            number: None,
        }
    }

    #[must_use]
    pub fn neutral(text: impl Into<String>) -> Self {
        Self::new(text, SummaryStyle::Neutral)
    }

    #[must_use]
    pub fn with_number(mut self, number: f64) -> Self {
        self.number = Some(number);
        self
    }

    /// Describe `current` relative to `previous`.
    ///
    /// Without a baseline the absolute value is reported and tagged as the first data point.
    /// With a baseline the text states whether the value is unchanged, or by how much it grew or
    /// shrank, and the style reflects whether that direction is good or bad for the metric.
    ///
    /// `format` renders raw values, which lets callers print byte sizes or other units.
    #[must_use]
    #[expect(clippy::cast_precision_loss, reason = "the number is only used for display")]
    pub fn compare(subject: &str, current: u64, previous: Option<u64>, trend: Trend, format: impl Fn(u64) -> String) -> Self {
        let now = format(current);

        let Some(previous) = previous else {
            return Self::neutral(format!("{now} {subject} (no previous data)")).with_number(current as f64);
        };

        let (text, increased) = match current.cmp(&previous) {
            core::cmp::Ordering::Equal => {
                return Self::neutral(format!("{now} {subject} (unchanged)")).with_number(current as f64);
            }
            core::cmp::Ordering::Greater => (
                format!("{now} {subject} (increased by {} from {})", format(current - previous), format(previous)),
                true,
            ),
            core::cmp::Ordering::Less => (
                format!("{now} {subject} (decreased by {} from {})", format(previous - current), format(previous)),
                false,
            ),
        };

        let style = match (trend, increased) {
            (Trend::Neutral, _) => SummaryStyle::Neutral,
            (Trend::IncreaseIsBad, true) | (Trend::IncreaseIsGood, false) => SummaryStyle::Negative,
            (Trend::IncreaseIsBad, false) | (Trend::IncreaseIsGood, true) => SummaryStyle::Positive,
        };

        Self::new(text, style).with_number(current as f64)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    fn plain(value: u64) -> String {
        value.to_string()
    }

    #[test]
    fn test_compare_without_baseline() {
        let summary = Summary::compare("warnings", 12, None, Trend::IncreaseIsBad, plain);
        assert_eq!(summary.text, "12 warnings (no previous data)");
        assert_eq!(summary.style, SummaryStyle::Neutral);
        assert_eq!(summary.number, Some(12.0));
        assert!(!summary.text.contains("increased"));
        assert!(!summary.text.contains("decreased"));
    }

    #[test]
    fn test_compare_increase_is_bad() {
        let summary = Summary::compare("warnings", 15, Some(12), Trend::IncreaseIsBad, plain);
        assert_eq!(summary.text, "15 warnings (increased by 3 from 12)");
        assert_eq!(summary.style, SummaryStyle::Negative);
    }

    #[test]
    fn test_compare_decrease_is_good_when_increase_is_bad() {
        let summary = Summary::compare("warnings", 10, Some(12), Trend::IncreaseIsBad, plain);
        assert_eq!(summary.text, "10 warnings (decreased by 2 from 12)");
        assert_eq!(summary.style, SummaryStyle::Positive);
    }

    #[test]
    fn test_compare_increase_is_good() {
        let summary = Summary::compare("tests", 40, Some(30), Trend::IncreaseIsGood, plain);
        assert_eq!(summary.style, SummaryStyle::Positive);

        let summary = Summary::compare("tests", 20, Some(30), Trend::IncreaseIsGood, plain);
        assert_eq!(summary.style, SummaryStyle::Negative);
    }

    #[test]
    fn test_compare_neutral_trend() {
        let summary = Summary::compare("lines of code", 200, Some(100), Trend::Neutral, plain);
        assert_eq!(summary.text, "200 lines of code (increased by 100 from 100)");
        assert_eq!(summary.style, SummaryStyle::Neutral);
    }

    #[test]
    fn test_compare_unchanged() {
        let summary = Summary::compare("warnings", 7, Some(7), Trend::IncreaseIsBad, plain);
        assert_eq!(summary.text, "7 warnings (unchanged)");
        assert_eq!(summary.style, SummaryStyle::Neutral);
    }

    #[test]
    fn test_compare_uses_formatter_for_every_value() {
        let summary = Summary::compare("for app", 2048, Some(1024), Trend::IncreaseIsBad, |v| format!("{v}B"));
        assert_eq!(summary.text, "2048B for app (increased by 1024B from 1024B)");
    }

    #[test]
    fn test_style_serializes_as_snake_case() {
        let summary = Summary::new("x", SummaryStyle::Negative);
        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["style"], "negative");
        assert!(json.get("number").is_none());
    }
}
