use super::{ProviderResult, RunProjectInfo, RunRecord, Summary};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const LOG_TARGET: &str = "    output";

/// A summary line along with the identifier of the provider that produced it.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TaggedSummary {
    pub provider: String,

    #[serde(flatten)]
    pub summary: Summary,
}

/// The combined result of one run: raw data per provider, all summaries, and all errors.
///
/// Every provider that ran contributes either a raw data entry plus its summaries, or a single
/// error message. Never both.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Output {
    raw: Map<String, Value>,
    summaries: Vec<TaggedSummary>,
    errors: Vec<String>,
}

impl Output {
    /// Raw extracted data, keyed by provider identifier.
    #[must_use]
    pub const fn raw(&self) -> &Map<String, Value> {
        &self.raw
    }

    /// Summaries in provider registration order.
    #[must_use]
    pub fn summaries(&self) -> &[TaggedSummary] {
        &self.summaries
    }

    #[must_use]
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.raw.is_empty() && self.summaries.is_empty() && self.errors.is_empty()
    }

    /// Append `other` to this output. Raw entries of `other` replace entries with the same identifier.
    #[must_use]
    pub fn merge(mut self, other: Self) -> Self {
        self.raw.extend(other.raw);
        self.summaries.extend(other.summaries);
        self.errors.extend(other.errors);
        self
    }

    /// Turn the output into the record persisted to the run history.
    #[must_use]
    pub fn into_run_record(self, project: RunProjectInfo) -> RunRecord {
        RunRecord { project, data: self.raw }
    }
}

/// Accumulates provider results into an [`Output`].
#[derive(Debug, Default)]
pub struct OutputBuilder {
    output: Output,
}

impl OutputBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of one provider.
    ///
    /// Data that cannot be serialized is recorded as a failure of that provider.
    pub fn push<T: Serialize>(&mut self, identifier: &str, result: ProviderResult<T>) {
        match result {
            ProviderResult::Extracted(info) => match serde_json::to_value(&info.data) {
                Ok(value) => {
                    let _ = self.output.raw.insert(identifier.to_string(), value);
                    self.output.summaries.extend(info.summaries.into_iter().map(|summary| TaggedSummary {
                        provider: identifier.to_string(),
                        summary,
                    }));
                }
                Err(e) => {
                    let message = format!("{identifier}: unable to serialize extracted data: {e}");
                    log::error!(target: LOG_TARGET, "{message}");
                    self.output.errors.push(message);
                }
            },
            ProviderResult::Failed(message) => self.output.errors.push(message),
        }
    }

    #[must_use]
    pub fn build(self) -> Output {
        self.output
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::info::ExtractedInfo;
    use serde::Serializer;
    use serde_json::json;

    fn extracted(value: u64, lines: &[&str]) -> ProviderResult<u64> {
        ProviderResult::Extracted(ExtractedInfo {
            data: value,
            summaries: lines.iter().map(|l| Summary::neutral(*l)).collect(),
        })
    }

    /// Data whose serialization always fails.
    struct Unserializable;

    impl Serialize for Unserializable {
        fn serialize<S: Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
            Err(serde::ser::Error::custom("not today"))
        }
    }

    #[test]
    fn test_push_extracted() {
        let mut builder = OutputBuilder::new();
        builder.push("count", extracted(12, &["12 things"]));
        let output = builder.build();

        assert_eq!(output.raw().get("count"), Some(&json!(12)));
        assert_eq!(output.summaries().len(), 1);
        assert_eq!(output.summaries()[0].provider, "count");
        assert_eq!(output.summaries()[0].summary.text, "12 things");
        assert!(output.errors().is_empty());
    }

    #[test]
    fn test_push_failed() {
        let mut builder = OutputBuilder::new();
        builder.push::<u64>("count", ProviderResult::Failed("count: boom".to_string()));
        let output = builder.build();

        assert!(output.raw().is_empty());
        assert!(output.summaries().is_empty());
        assert_eq!(output.errors(), ["count: boom".to_string()]);
    }

    #[test]
    fn test_push_serialization_failure_is_a_provider_error() {
        let mut builder = OutputBuilder::new();
        builder.push(
            "weird",
            ProviderResult::Extracted(ExtractedInfo {
                data: Unserializable,
                summaries: vec![Summary::neutral("should not appear")],
            }),
        );
        let output = builder.build();

        assert!(output.raw().is_empty());
        assert!(output.summaries().is_empty());
        assert_eq!(output.errors().len(), 1);
        assert!(output.errors()[0].starts_with("weird: "));
        assert!(output.errors()[0].contains("not today"));
    }

    #[test]
    fn test_summaries_keep_push_order() {
        let mut builder = OutputBuilder::new();
        builder.push("b", extracted(1, &["b1", "b2"]));
        builder.push::<u64>("x", ProviderResult::Failed("x: nope".to_string()));
        builder.push("a", extracted(2, &["a1"]));
        let output = builder.build();

        let texts: Vec<_> = output.summaries().iter().map(|s| s.summary.text.as_str()).collect();
        assert_eq!(texts, vec!["b1", "b2", "a1"]);
    }

    #[test]
    fn test_empty_output() {
        let output = OutputBuilder::new().build();
        assert!(output.is_empty());
    }

    #[test]
    fn test_merge() {
        let mut first = OutputBuilder::new();
        first.push("a", extracted(1, &["a"]));
        let mut second = OutputBuilder::new();
        second.push("b", extracted(2, &["b"]));
        second.push::<u64>("c", ProviderResult::Failed("c: failed".to_string()));

        let merged = first.build().merge(second.build());
        assert_eq!(merged.raw().len(), 2);
        assert_eq!(merged.summaries().len(), 2);
        assert_eq!(merged.errors().len(), 1);
    }

    #[test]
    fn test_into_run_record_carries_raw_data_only() {
        let mut builder = OutputBuilder::new();
        builder.push("a", extracted(1, &["a"]));
        builder.push::<u64>("b", ProviderResult::Failed("b: failed".to_string()));

        let project = RunProjectInfo {
            package: "p".to_string(),
            target: "t".to_string(),
            profile: "debug".to_string(),
            version: "1.0.0".to_string(),
            build_number: None,
            description: None,
            timestamp: chrono::DateTime::<chrono::Utc>::UNIX_EPOCH,
        };

        let record = builder.build().into_run_record(project);
        assert_eq!(record.data.len(), 1);
        assert_eq!(record.data.get("a"), Some(&json!(1)));
    }
}
