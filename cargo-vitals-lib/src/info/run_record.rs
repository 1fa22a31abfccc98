use super::ProjectInfo;
use super::project_info::write_header;
use chrono::{DateTime, Utc};
use core::fmt::{Display, Formatter};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Project metadata stored alongside each recorded run.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct RunProjectInfo {
    pub package: String,
    pub target: String,
    pub profile: String,
    pub version: String,

    #[serde(default)]
    pub build_number: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl RunProjectInfo {
    #[must_use]
    pub fn new(project: &ProjectInfo, timestamp: DateTime<Utc>) -> Self {
        Self {
            package: project.package.clone(),
            target: project.target.clone(),
            profile: project.profile.clone(),
            version: project.version.clone(),
            build_number: project.build_number.clone(),
            description: project.description.clone(),
            timestamp,
        }
    }
}

impl Display for RunProjectInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        write_header(
            f,
            &self.package,
            &self.version,
            self.build_number.as_deref(),
            &self.target,
            &self.profile,
        )
    }
}

/// One entry of the run history: the raw data of every successful provider plus project metadata.
///
/// Serialized as a single JSON object whose keys are provider identifiers, with the project metadata
/// under the reserved `vitals_run_project_info` key.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RunRecord {
    #[serde(rename = "vitals_run_project_info")]
    pub project: RunProjectInfo,

    #[serde(flatten)]
    pub data: Map<String, Value>,
}
