use crate::Result;
use crate::info::{Context, InfoProvider, Summary, Trend};
use camino::Utf8PathBuf;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env::consts::EXE_SUFFIX;
use std::fs;

const LOG_TARGET: &str = "    binary";

/// Measures the size of build artifacts.
#[derive(Debug, Clone, Copy, Default)]
pub struct BinarySize;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct BinarySizeArgs {
    /// Artifacts to measure, relative to the workspace root.
    ///
    /// When empty, the project's target binary for the configured profile is measured.
    #[serde(default)]
    pub artifacts: Vec<Utf8PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct BinarySizeData {
    /// Size in bytes, keyed by artifact name
    pub sizes: BTreeMap<String, u64>,
}

impl BinarySize {
    fn artifacts(context: &Context, args: Option<&BinarySizeArgs>) -> Vec<(String, Utf8PathBuf)> {
        match args {
            Some(args) if !args.artifacts.is_empty() => args
                .artifacts
                .iter()
                .map(|path| (path.to_string(), context.resolve(path)))
                .collect(),
            _ => {
                let project = context.project();

                // the dev profile builds into `debug`
                let dir = if project.profile == "dev" { "debug" } else { project.profile.as_str() };
                let path = context.target_directory().join(dir).join(format!("{}{EXE_SUFFIX}", project.target));
                vec![(project.target.clone(), path)]
            }
        }
    }
}

impl InfoProvider for BinarySize {
    type Data = BinarySizeData;
    type Args = BinarySizeArgs;

    fn identifier(&self) -> &str {
        "binary_size"
    }

    fn extract(&self, context: &Context, args: Option<&BinarySizeArgs>) -> Result<BinarySizeData> {
        let mut sizes = BTreeMap::new();
        for (name, path) in Self::artifacts(context, args) {
            let metadata = fs::metadata(&path).into_app_err_with(|| format!("could not find artifact '{path}', was the project built?"))?;
            log::debug!(target: LOG_TARGET, "'{path}' is {} bytes", metadata.len());
            let _ = sizes.insert(name, metadata.len());
        }

        Ok(BinarySizeData { sizes })
    }

    fn summarize(&self, current: &BinarySizeData, previous: Option<&BinarySizeData>, _args: Option<&BinarySizeArgs>) -> Vec<Summary> {
        current
            .sizes
            .iter()
            .map(|(name, &size)| {
                let before = previous.and_then(|p| p.sizes.get(name).copied());
                Summary::compare(&format!("for {name}"), size, before, Trend::IncreaseIsBad, format_bytes)
            })
            .collect()
    }
}

/// Render a byte count with a binary unit, such as `1.5 MiB`.
#[must_use]
#[expect(clippy::cast_precision_loss, reason = "sizes are rounded for display anyway")]
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];

    if bytes < 1024 {
        return format!("{bytes} B");
    }

    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for &next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }

    format!("{value:.1} {unit}")
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::info::SummaryStyle;
    use crate::info::providers::tests::context_in;
    use camino::Utf8Path;

    fn data(sizes: &[(&str, u64)]) -> BinarySizeData {
        BinarySizeData {
            sizes: sizes.iter().map(|(n, s)| ((*n).to_string(), *s)).collect(),
        }
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KiB");
        assert_eq!(format_bytes(1536), "1.5 KiB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5.0 MiB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3.0 GiB");
    }

    #[test]
    fn test_extract_default_artifact() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(tmp.path()).unwrap();
        let dir = root.join("target").join("debug");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("widget{EXE_SUFFIX}")), vec![0_u8; 2048]).unwrap();

        let extracted = BinarySize.extract(&context_in(root), None).unwrap();
        assert_eq!(extracted, data(&[("widget", 2048)]));
    }

    #[test]
    fn test_extract_configured_artifacts() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(tmp.path()).unwrap();
        fs::write(root.join("a.bin"), [1_u8; 10]).unwrap();
        fs::write(root.join("b.bin"), [1_u8; 20]).unwrap();

        let args = BinarySizeArgs {
            artifacts: vec![Utf8PathBuf::from("a.bin"), Utf8PathBuf::from("b.bin")],
        };
        let extracted = BinarySize.extract(&context_in(root), Some(&args)).unwrap();
        assert_eq!(extracted, data(&[("a.bin", 10), ("b.bin", 20)]));
    }

    #[test]
    fn test_missing_artifact_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8Path::from_path(tmp.path()).unwrap();
        let _ = BinarySize.extract(&context_in(root), None).unwrap_err();
    }

    #[test]
    fn test_summary() {
        let previous = data(&[("widget", 1024 * 1024)]);
        let current = data(&[("widget", 1024 * 1024 + 512 * 1024), ("helper", 100)]);

        let summaries = BinarySize.summarize(&current, Some(&previous), None);
        assert_eq!(summaries.len(), 2);

        // artifacts are listed by name
        assert_eq!(summaries[0].text, "100 B for helper (no previous data)");
        assert_eq!(summaries[1].text, "1.5 MiB for widget (increased by 512.0 KiB from 1.0 MiB)");
        assert_eq!(summaries[1].style, SummaryStyle::Negative);
    }
}
