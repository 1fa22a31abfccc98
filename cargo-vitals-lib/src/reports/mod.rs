//! Renderings of a run's output
//!
//! Every report takes the same input, the [`Output`](crate::info::Output) of a run plus the
//! [`ProjectInfo`](crate::info::ProjectInfo) it describes, so callers can produce several
//! renderings of one run.
//!
//! # Implementation Model
//!
//! Three generators are provided:
//! - **Console**: one line per summary with a `+`, `-`, or `·` marker, colored when the
//!   terminal supports it, followed by the errors of failed providers
//! - **JSON**: the output serialized as-is, for consumption by other tools
//! - **Webhook**: a chat message payload with one colored attachment per summary
//!
//! The console generator also renders the run history for the `history` command.

mod console;
mod json;
pub mod webhook;

pub use console::generate as generate_console;
pub use console::generate_history;
pub use json::generate as generate_json;
