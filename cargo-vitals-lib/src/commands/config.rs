use crate::Result;
use crate::delivery::parse_webhook_url;
use crate::info::providers::{BuiltinProvider, ProviderSettings, registry_for};
use crate::info::{ProjectConfig, Toolchain};
use camino::{Utf8Path, Utf8PathBuf};
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::io;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the workspace root
pub const CONFIG_FILE_NAME: &str = "vitals.toml";

#[derive(Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Providers to run, in the order their summaries should appear
    #[serde(default = "default_providers")]
    pub providers: Vec<BuiltinProvider>,

    /// File holding the history of previous runs, relative to the workspace root
    #[serde(default = "default_history_path")]
    pub history_path: Utf8PathBuf,

    /// Incoming webhook that receives each run's report
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhook_url: Option<String>,

    /// Tools used by the providers
    #[serde(default)]
    pub toolchain: Toolchain,

    /// Which package, target, and profile are measured
    #[serde(default)]
    pub project: ProjectConfig,

    /// Arguments for individual providers
    #[serde(default)]
    pub settings: ProviderSettings,
}

fn default_providers() -> Vec<BuiltinProvider> {
    vec![
        BuiltinProvider::WarningCount,
        BuiltinProvider::LintCount,
        BuiltinProvider::BinarySize,
        BuiltinProvider::LinesOfCode,
        BuiltinProvider::DependencyCount,
    ]
}

fn default_history_path() -> Utf8PathBuf {
    Utf8PathBuf::from("vitals/history.json")
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or fails validation
    pub fn load(workspace_root: &Utf8Path, config_path: Option<&Utf8PathBuf>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading cargo-vitals configuration file '{path}'"))?;
            (path.clone(), text)
        } else {
            let path = workspace_root.join(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // No config file found, use defaults
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading cargo-vitals configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if no provider is selected, a provider is listed twice, the history path is
    /// empty, or the webhook URL is not an http(s) URL
    pub fn validate(&self) -> Result<()> {
        if self.providers.is_empty() {
            return Err(app_err!("at least one provider must be listed in `providers`"));
        }

        let mut seen = HashSet::new();
        for provider in &self.providers {
            if !seen.insert(provider) {
                return Err(app_err!("provider '{provider}' is listed more than once in `providers`"));
            }
        }

        if self.history_path.as_str().is_empty() {
            return Err(app_err!("history_path cannot be empty"));
        }

        if let Some(url) = &self.webhook_url {
            let _ = parse_webhook_url(url)?;
        }

        let _ = registry_for(&self.providers, &self.settings)?;

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
