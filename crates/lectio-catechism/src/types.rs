use serde::{Deserialize, Serialize};

/// One catechism question and its answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeeklyItem {
    /// 1-based, unique within the corpus.
    pub question_number: u32,
    pub question_text: String,
    pub answer_text: String,
}
