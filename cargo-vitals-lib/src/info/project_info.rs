use crate::Result;
use cargo_metadata::Metadata;
use core::fmt::{Display, Formatter};
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};

/// User-provided overrides for the project metadata.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Workspace member to report on (defaults to the root package)
    #[serde(default)]
    pub package: Option<String>,

    /// Build target to report on (defaults to the package's first binary target)
    #[serde(default)]
    pub target: Option<String>,

    /// Build profile whose artifacts are measured
    #[serde(default = "default_profile")]
    pub profile: String,

    /// Free-form description included with every recorded run
    #[serde(default)]
    pub description: Option<String>,
}

fn default_profile() -> String {
    "debug".to_string()
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            package: None,
            target: None,
            profile: default_profile(),
            description: None,
        }
    }
}

/// Metadata describing the project being measured.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectInfo {
    pub package: String,
    pub target: String,
    pub profile: String,
    pub version: String,
    pub build_number: Option<String>,
    pub description: Option<String>,
}

impl ProjectInfo {
    /// Build the project info from cargo metadata and the user's overrides.
    pub fn from_metadata(metadata: &Metadata, config: &ProjectConfig, build_number: Option<String>) -> Result<Self> {
        let package = match &config.package {
            Some(name) => metadata
                .workspace_packages()
                .into_iter()
                .find(|p| p.name == name.as_str())
                .into_app_err_with(|| format!("package '{name}' is not a member of the workspace"))?,
            None => metadata
                .root_package()
                .into_app_err("the workspace has no root package, set `project.package` in the configuration")?,
        };

        let target = config
            .target
            .clone()
            .or_else(|| package.targets.iter().find(|t| t.is_bin()).map(|t| t.name.clone()))
            .unwrap_or_else(|| package.name.to_string());

        Ok(Self {
            package: package.name.to_string(),
            target,
            profile: config.profile.clone(),
            version: package.version.to_string(),
            build_number,
            description: config.description.clone().or_else(|| package.description.clone()),
        })
    }
}

/// The one-line project header shared by live and recorded runs: `package version (build) target [profile]`.
pub(crate) fn write_header(
    f: &mut Formatter<'_>,
    package: &str,
    version: &str,
    build_number: Option<&str>,
    target: &str,
    profile: &str,
) -> core::fmt::Result {
    write!(f, "{package} {version}")?;
    if let Some(build) = build_number {
        write!(f, " ({build})")?;
    }
    write!(f, " {target} [{profile}]")
}

impl Display for ProjectInfo {
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
