//! `lectio-progress`: per-user completion records for daily readings and
//! weekly questions.
//!
//! A daily record carries two independent flags (morning and evening) and is
//! complete once both are set; a weekly record has a single flag. Records are
//! merged on write, never replaced.

pub mod db;
pub mod error;
pub mod store;
pub mod tracker;
pub mod types;

pub use error::{ProgressError, Result};
pub use store::{ProgressStore, SqliteProgressStore};
pub use tracker::ProgressTracker;
pub use types::{CompletionState, DailyProgress, Period, WeeklyProgress};
