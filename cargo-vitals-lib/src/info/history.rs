use super::{RunProjectInfo, RunRecord};
use crate::Result;
use ohno::{IntoAppError, app_err};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

const LOG_TARGET: &str = "   history";

/// Key under which each run record stores its project metadata.
pub const PROJECT_INFO_KEY: &str = "vitals_run_project_info";

/// Previously recorded runs, newest first.
///
/// Records are kept as raw JSON objects so that an entry written by an older or newer version of a
/// provider never prevents the remaining history from being used.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    records: Vec<Map<String, Value>>,
}

impl History {
    #[must_use]
    pub const fn new(records: Vec<Map<String, Value>>) -> Self {
        Self { records }
    }

    #[must_use]
    pub fn records(&self) -> &[Map<String, Value>] {
        &self.records
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The most recent data recorded for `identifier`.
    ///
    /// Looks at the newest record that has an entry for `identifier`. Returns `None` when no record
    /// has one, or when that entry cannot be deserialized into `T`.
    #[must_use]
    pub fn last_extracted<T: DeserializeOwned>(&self, identifier: &str) -> Option<T> {
        let entry = self.records.iter().find_map(|record| record.get(identifier))?;

        match serde_json::from_value(entry.clone()) {
            Ok(data) => Some(data),
            Err(e) => {
                log::debug!(target: LOG_TARGET, "Ignoring previously recorded data for '{identifier}': {e:#}");
                None
            }
        }
    }

    /// The project metadata of each record, newest first. Unreadable metadata yields `None`.
    pub fn project_infos(&self) -> impl Iterator<Item = Option<RunProjectInfo>> + '_ {
        self.records
            .iter()
            .map(|record| record.get(PROJECT_INFO_KEY).and_then(|v| serde_json::from_value(v.clone()).ok()))
    }

    /// Add `record` as the newest entry.
    pub fn prepend(&mut self, record: RunRecord) -> Result<()> {
        let value = serde_json::to_value(record).into_app_err("serializing run record")?;
        let Value::Object(object) = value else {
            return Err(app_err!("run records must serialize to a JSON object"));
        };

        self.records.insert(0, object);
        Ok(())
    }
}
