//! Processing shared between the commands that operate on a workspace.

use super::config::Config;
use crate::Result;
use crate::info::HistoryStore;
use camino::{Utf8Path, Utf8PathBuf};
use cargo_metadata::{Metadata, MetadataCommand};
use clap::{Args, ValueEnum};
use ohno::IntoAppError;

/// Color mode configuration for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Always use colors
    Always,

    /// Never use colors
    Never,

    /// Use colors if the output is a terminal, otherwise don't use colors
    Auto,
}

impl ColorMode {
    #[must_use]
    pub fn use_colors(self) -> bool {
        match self {
            Self::Always => true,
            Self::Never => false,
            Self::Auto => {
                use std::io::{IsTerminal, stdout};
                stdout().is_terminal()
            }
        }
    }
}

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Arguments shared between the commands that operate on a workspace
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to Cargo.toml file
    #[arg(long, default_value = "Cargo.toml", value_name = "PATH")]
    pub manifest_path: Utf8PathBuf,

    /// Path to configuration file (default is `vitals.toml` in the workspace root)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// The workspace being measured along with its configuration.
#[derive(Debug)]
pub struct Common {
    pub metadata: Metadata,
    pub config: Config,
    pub use_colors: bool,
}

impl Common {
    /// Initialize logging, read the workspace metadata, and load the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the metadata cannot be retrieved or the configuration cannot be loaded
    pub fn new(args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let mut metadata_cmd = MetadataCommand::new();
        let _ = metadata_cmd.manifest_path(&args.manifest_path);
        let metadata = metadata_cmd.exec().into_app_err("retrieving workspace metadata")?;

        let config = Config::load(&metadata.workspace_root, args.config.as_ref())?;

        Ok(Self {
            metadata,
            config,
            use_colors: args.color.use_colors(),
        })
    }

    #[must_use]
    pub fn workspace_root(&self) -> &Utf8Path {
        &self.metadata.workspace_root
    }

    /// The history file named by the configuration, relative paths being anchored at the workspace root.
    #[must_use]
    pub fn history_store(&self) -> HistoryStore {
        let path = &self.config.history_path;
        if path.is_absolute() {
            HistoryStore::new(path.clone())
        } else {
            HistoryStore::new(self.workspace_root().join(path))
        }
    }
}

/// Initialize logger based on log level
pub fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    // a logger may already be installed when commands run more than once in a process
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .try_init();
}
