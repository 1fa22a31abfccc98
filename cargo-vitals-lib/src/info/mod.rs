//! Metric extraction and comparison against previous runs
//!
//! This module holds the pipeline that turns a set of independently defined metrics into one
//! combined report.
//!
//! # Implementation Model
//!
//! Every metric is produced by an [`InfoProvider`], which measures the project through `extract`
//! and compares a measurement with the previously recorded one through `summarize`. Providers are
//! collected into a [`Registry`] in the order they should run.
//!
//! The [`Runner`] invokes each registered provider once. It looks up the provider's baseline in the
//! [`History`] of earlier runs, and wraps the outcome in a [`ProviderResult`]. A provider that fails
//! is recorded as an error message prefixed with its identifier; the remaining providers still run.
//!
//! Results are accumulated by an [`OutputBuilder`] into an immutable [`Output`] holding the raw data
//! of each successful provider, the summaries of all providers in registration order, and the
//! error messages. The output becomes a [`RunRecord`] that the [`HistoryStore`] prepends to the
//! history file, so the next run can compare against it.
//!
//! The built-in providers live in [`providers`].

mod context;
mod history;
mod history_store;
mod output;
mod project_info;
mod provider;
mod provider_result;
pub mod providers;
mod registry;
mod run_record;
mod runner;
mod summary;

pub use context::{Context, Toolchain};
pub use history::{History, PROJECT_INFO_KEY};
pub use history_store::HistoryStore;
pub use output::{Output, OutputBuilder, TaggedSummary};
pub use project_info::{ProjectConfig, ProjectInfo};
pub use provider::{Extraction, InfoProvider, Registered};
pub use provider_result::{ExtractedInfo, ProviderResult};
pub use registry::Registry;
pub use run_record::{RunProjectInfo, RunRecord};
pub use runner::Runner;
pub use summary::{Summary, SummaryStyle, Trend};
