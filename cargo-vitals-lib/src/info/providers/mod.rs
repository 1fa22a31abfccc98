//! The built-in providers.
//!
//! Each provider measures one aspect of a Rust project. They are selected and configured by name
//! in the configuration file, and registered in the order they are listed there.

mod binary_size;
mod dependency_count;
pub mod diagnostics;
mod lines_of_code;
mod lint_count;
mod warning_count;

pub use binary_size::{BinarySize, BinarySizeArgs, BinarySizeData, format_bytes};
pub use dependency_count::{DependencyCount, DependencyCountArgs, DependencyCountData};
pub use lines_of_code::{LinesOfCode, LinesOfCodeArgs, LinesOfCodeData};
pub use lint_count::{LintCount, LintCountArgs, LintCountData};
pub use warning_count::{WarningCount, WarningCountArgs, WarningCountData};

use super::Registry;
use crate::Result;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// Names of the built-in providers, as used in the configuration file and the run history.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Deserialize, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BuiltinProvider {
    WarningCount,
    LintCount,
    BinarySize,
    LinesOfCode,
    DependencyCount,
}

/// Per-provider arguments, one optional table per built-in provider.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ProviderSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warning_count: Option<WarningCountArgs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lint_count: Option<LintCountArgs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub binary_size: Option<BinarySizeArgs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines_of_code: Option<LinesOfCodeArgs>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dependency_count: Option<DependencyCountArgs>,
}

impl BuiltinProvider {
    /// Add this provider to `registry`, taking its arguments from `settings`.
    pub fn register(self, registry: &mut Registry, settings: &ProviderSettings) -> Result<()> {
        match self {
            Self::WarningCount => registry.register(WarningCount, settings.warning_count.clone()),
            Self::LintCount => registry.register(LintCount, settings.lint_count.clone()),
            Self::BinarySize => registry.register(BinarySize, settings.binary_size.clone()),
            Self::LinesOfCode => registry.register(LinesOfCode, settings.lines_of_code.clone()),
            Self::DependencyCount => registry.register(DependencyCount, settings.dependency_count.clone()),
        }
    }
}

/// Build a registry holding `providers` in the given order.
pub fn registry_for(providers: &[BuiltinProvider], settings: &ProviderSettings) -> Result<Registry> {
    let mut registry = Registry::new();
    for provider in providers {
        provider.register(&mut registry, settings)?;
    }

    Ok(registry)
}
