use super::ProjectInfo;
use crate::Result;
use camino::{Utf8Path, Utf8PathBuf};
use cargo_metadata::MetadataCommand;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::process::{Command, Output};

const LOG_TARGET: &str = "   context";

const COMPILER_MESSAGE_MARKER: &str = r#""reason":"compiler-message""#;

/// Location of the tools providers may shell out to.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Toolchain {
    /// The cargo executable
    #[serde(default = "default_cargo")]
    pub cargo: Utf8PathBuf,
}

fn default_cargo() -> Utf8PathBuf {
    Utf8PathBuf::from("cargo")
}

impl Default for Toolchain {
    fn default() -> Self {
        Self { cargo: default_cargo() }
    }
}

impl Toolchain {
    /// A metadata command that uses this toolchain's cargo.
    #[must_use]
    pub fn metadata_command(&self) -> MetadataCommand {
        let mut cmd = MetadataCommand::new();
        let _ = cmd.cargo_path(&self.cargo);
        cmd
    }

    /// Run a cargo build command emitting `--message-format=json` in `dir` and return its message stream.
    ///
    /// Compilation errors, including lints at `deny` level, make cargo exit with a failure status
    /// while still reporting every diagnostic. The stream is returned as long as it holds compiler
    /// messages; a failure without any is an error.
    pub fn run_cargo_messages(&self, dir: &Utf8Path, args: &[&str]) -> Result<String> {
        let invocation = format!("{} {}", self.cargo, args.join(" "));
        log::debug!(target: LOG_TARGET, "Running '{invocation}' in '{dir}'");

        let output = Command::new(&self.cargo)
            .args(args)
            .current_dir(dir)
            .output()
            .into_app_err_with(|| format!("running '{invocation}'"))?;

        let failed = (!output.status.success()).then(|| failure(&invocation, &output));
        let stdout = String::from_utf8(output.stdout).into_app_err_with(|| format!("decoding output of '{invocation}'"))?;

        match failed {
            None => Ok(stdout),
            Some(e) if stdout.contains(COMPILER_MESSAGE_MARKER) => {
                log::warn!(target: LOG_TARGET, "{e}, using the diagnostics it reported");
                Ok(stdout)
            }
            Some(e) => Err(e),
        }
    }
}

fn failure(invocation: &str, output: &Output) -> ohno::AppError {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let last_line = stderr.lines().rev().find(|l| !l.trim().is_empty()).unwrap_or_default();
    app_err!("'{invocation}' failed with {}: {last_line}", output.status)
}

/// Read-only view of the environment handed to every provider's extraction.
#[derive(Debug, Clone)]
pub struct Context {
    workspace_root: Utf8PathBuf,
    target_directory: Utf8PathBuf,
    project: ProjectInfo,
    toolchain: Toolchain,
}

impl Context {
    #[must_use]
    pub fn new(workspace_root: impl Into<Utf8PathBuf>, target_directory: impl Into<Utf8PathBuf>, project: ProjectInfo, toolchain: Toolchain) -> Self {
        Self {
            workspace_root: workspace_root.into(),
            target_directory: target_directory.into(),
            project,
            toolchain,
        }
    }

    #[must_use]
    pub fn workspace_root(&self) -> &Utf8Path {
        &self.workspace_root
    }

    #[must_use]
    pub fn target_directory(&self) -> &Utf8Path {
        &self.target_directory
    }

    #[must_use]
    pub const fn project(&self) -> &ProjectInfo {
        &self.project
    }

    #[must_use]
    pub const fn toolchain(&self) -> &Toolchain {
        &self.toolchain
    }

    /// Resolve a possibly relative path against the workspace root.
    #[must_use]
    pub fn resolve(&self, path: &Utf8Path) -> Utf8PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.workspace_root.join(path)
        }
    }
}
