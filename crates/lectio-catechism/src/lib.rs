//! `lectio-catechism`: one question per calendar week, derived from the date.
//!
//! There is no stored cursor: the active question is recomputed from the
//! number of whole weeks between a reference Sunday and the week containing
//! the requested date (see [`rotation`]).

pub mod db;
pub mod error;
pub mod import;
pub mod rotation;
pub mod store;
pub mod types;

pub use error::{CatechismError, Result};
pub use import::{import_file, parse_feed, ImportReport};
pub use rotation::{week_start, WeekWindow, WeeklyRotation};
pub use store::{CatechismStore, SqliteCatechismStore};
pub use types::WeeklyItem;
