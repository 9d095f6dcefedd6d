//! `lectio-plan`: builds the 365-day reading plan and persists it.
//!
//! # Streams
//!
//! | Stream         | Corpus                 | Distribution                         |
//! |----------------|------------------------|--------------------------------------|
//! | Old Testament  | 39 books, 929 chapters | [`sequencer`]: proportional, once    |
//! | New Testament  | 27 books, 260 chapters | [`sequencer`]: proportional, once    |
//! | Psalms         | 150-chapter cycle      | [`cyclic`]: one per day, wraps       |
//! | Proverbs       | 31-chapter cycle       | [`cyclic`]: one per day, wraps       |
//!
//! Every stream is computed independently from the slot number; no stream's
//! state ever influences another's.

pub mod builder;
pub mod canon;
pub mod corpus;
pub mod cyclic;
pub mod db;
pub mod error;
pub mod sequencer;
pub mod store;
pub mod types;

pub use builder::{PlanBuilder, SeedReport};
pub use corpus::{Corpus, CyclicCorpus, SubUnit};
pub use error::{PlanError, Result};
pub use store::{PlanStore, SqlitePlanStore};
pub use types::Assignment;
