//! The on-disk run history.
//!
//! [`HistoryStore`] wraps the path of a JSON file holding an array of run records, newest first.

use super::{History, RunRecord};
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use ohno::IntoAppError;
use serde_json::{Map, Value};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, ErrorKind, Write};

const LOG_TARGET: &str = "     store";

#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: Utf8PathBuf,
}

impl HistoryStore {
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Load the recorded runs.
    ///
    /// A missing file is an empty history. A file that exists but cannot be read or parsed is an error.
    pub fn load(&self) -> Result<History> {
        let file = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!(target: LOG_TARGET, "No history found at '{}', starting a new one", self.path);
                return Ok(History::default());
            }
            Err(e) => return Err(e).into_app_err_with(|| format!("opening history file '{}'", self.path)),
        };

        let reader = BufReader::new(file);
        let records: Vec<Map<String, Value>> =
            serde_json::from_reader(reader).into_app_err_with(|| format!("parsing history file '{}'", self.path))?;

        log::debug!(target: LOG_TARGET, "Loaded {} previous run(s) from '{}'", records.len(), self.path);
        Ok(History::new(records))
    }

    /// Write `record` as the newest entry followed by the entries of `history`.
    ///
    /// Returns the updated history.
    pub fn save(&self, record: RunRecord, history: &History) -> Result<History> {
        let mut updated = history.clone();
        updated.prepend(record)?;

        if let Some(parent) = self.path.parent()
            && !parent.as_str().is_empty()
        {
            fs::create_dir_all(parent).into_app_err_with(|| format!("creating directory '{parent}'"))?;
        }

        let file = File::create(&self.path).into_app_err_with(|| format!("creating history file '{}'", self.path))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, updated.records()).into_app_err_with(|| format!("writing history file '{}'", self.path))?;
        writer
            .flush()
            .into_app_err_with(|| format!("flushing history file '{}'", self.path))?;

        log::info!(target: LOG_TARGET, "Saved run #{} to '{}'", updated.len(), self.path);
        Ok(updated)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use crate::info::{PROJECT_INFO_KEY, RunProjectInfo};
    use chrono::{DateTime, Utc};
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, PartialEq, Deserialize)]
    struct Count {
        count: u64,
    }

    fn store_in(dir: &tempfile::TempDir, name: &str) -> HistoryStore {
        HistoryStore::new(Utf8PathBuf::from_path_buf(dir.path().join(name)).unwrap())
    }

    fn record(count: u64) -> RunRecord {
        let mut data = Map::new();
        let _ = data.insert("counter".to_string(), json!({ "count": count }));
        RunRecord {
            project: RunProjectInfo {
                package: "widget".to_string(),
                target: "widget".to_string(),
                profile: "debug".to_string(),
                version: "0.1.0".to_string(),
                build_number: None,
                description: None,
                timestamp: DateTime::<Utc>::UNIX_EPOCH,
            },
            data,
        }
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let history = store_in(&tmp, "history.json").load().unwrap();
        assert!(history.is_empty());
    }

    #[test]
    fn test_load_invalid_json_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("history.json"), "not valid json").unwrap();
        let _ = store_in(&tmp, "history.json").load().unwrap_err();
    }

    #[test]
    fn test_load_non_array_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("history.json"), "{\"a\": 1}").unwrap();
        let _ = store_in(&tmp, "history.json").load().unwrap_err();
    }

    #[test]
    fn test_save_creates_parent_directories() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp, "nested/deeper/history.json");

        let _ = store.save(record(1), &History::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn test_save_prepends_and_round_trips() {
        let tmp = tempfile::tempdir().unwrap();
        let store = store_in(&tmp, "history.json");

        let first = store.save(record(1), &History::default()).unwrap();
        let second = store.save(record(2), &first).unwrap();
        assert_eq!(second.len(), 2);

        let loaded = store.load().unwrap();
        assert_eq!(loaded, second);
        assert_eq!(loaded.last_extracted::<Count>("counter"), Some(Count { count: 2 }));
        assert!(loaded.records()[1].contains_key(PROJECT_INFO_KEY));
        assert_eq!(loaded.records()[1]["counter"], json!({ "count": 1 }));
    }
}
