#![doc(hidden)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core library for cargo-vitals
//!
//! This library consolidates all functionality for the cargo-vitals tool, which extracts a set of
//! metrics about a Rust project, compares each of them with the previously recorded run, and
//! reports the deltas.
//!
//! # Module Organization
//!
//! - [`commands`]: Command-line interface and orchestration
//! - [`info`]: Provider contract, extraction runner, output aggregation, and run history
//! - [`reports`]: Console, JSON, and webhook renderings of a run's output
//! - [`delivery`]: Sending a rendered report to a webhook endpoint

pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[cfg(any(debug_assertions, test))]
pub mod commands;
#[cfg(not(any(debug_assertions, test)))]
mod commands;

pub mod delivery;
pub mod info;
pub mod reports;

pub use crate::commands::{Host, run};
