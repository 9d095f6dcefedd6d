use serde::{Deserialize, Serialize};

/// One day of the reading plan.
///
/// A reference is empty when no chapter of that stream fell on the day; it is
/// never absent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// 1-based slot, unique within a plan.
    pub day_of_year: u32,
    pub old_testament_ref: String,
    pub new_testament_ref: String,
    pub psalms_ref: String,
    pub proverbs_ref: String,
}
