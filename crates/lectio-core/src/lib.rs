//! `lectio-core`: configuration, error taxonomy, and shared types used by
//! every other Lectio crate.

pub mod clock;
pub mod config;
pub mod error;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::LectioConfig;
pub use error::{LectioError, Result};
pub use types::UserId;
