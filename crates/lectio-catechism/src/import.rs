//! Loading the rotating corpus from the public JSON feed format:
//!
//! ```json
//! [{ "number": 1, "q": "What is the chief end of man?", "a": "..." }]
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use crate::error::{CatechismError, Result};
use crate::store::CatechismStore;
use crate::types::WeeklyItem;

/// Log a progress line every this many saved questions.
const PROGRESS_EVERY: usize = 20;

#[derive(Debug, Deserialize)]
struct FeedItem {
    number: i64,
    #[serde(default)]
    q: String,
    #[serde(default)]
    a: String,
}

/// Outcome of [`import_file`] / [`import_items`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    /// Entries in the feed with a number in `1..=max_items`.
    pub valid: usize,
    pub written: usize,
    pub failed: usize,
}

/// Parse a feed, keeping only numbers in `1..=max_items`, with texts trimmed.
///
/// An empty feed, or one with no entry in range, is an error.
pub fn parse_feed(json: &str, max_items: u32) -> Result<Vec<WeeklyItem>> {
    let raw: Vec<FeedItem> = serde_json::from_str(json)
        .map_err(|e| CatechismError::InvalidSource(format!("malformed feed: {e}")))?;
    if raw.is_empty() {
        return Err(CatechismError::InvalidSource("feed has no questions".into()));
    }

    let items: Vec<WeeklyItem> = raw
        .into_iter()
        .filter_map(|item| {
            let number = u32::try_from(item.number).ok()?;
            (1..=max_items).contains(&number).then(|| WeeklyItem {
                question_number: number,
                question_text: item.q.trim().to_string(),
                answer_text: item.a.trim().to_string(),
            })
        })
        .collect();

    if items.is_empty() {
        return Err(CatechismError::InvalidSource(format!(
            "no questions numbered 1..={max_items}"
        )));
    }
    Ok(items)
}

/// Upsert `items` into `store`. A failed write is logged and skipped.
pub fn import_items(
    store: &dyn CatechismStore,
    items: &[WeeklyItem],
    max_items: u32,
) -> ImportReport {
    let mut report = ImportReport {
        valid: items.len(),
        ..ImportReport::default()
    };

    for (i, item) in items.iter().enumerate() {
        match store.upsert(item) {
            Ok(()) => report.written += 1,
            Err(e) => {
                warn!(number = item.question_number, error = %e, "failed to save question");
                report.failed += 1;
            }
        }
        if (i + 1) % PROGRESS_EVERY == 0 {
            info!("saved {}/{} questions", i + 1, items.len());
        }
    }

    if report.valid < max_items as usize {
        warn!(
            expected = max_items,
            found = report.valid,
            "catechism feed is incomplete"
        );
    }
    info!(
        written = report.written,
        failed = report.failed,
        "catechism populated"
    );
    report
}

/// Read a feed file from disk and import it.
#[instrument(skip(store))]
pub fn import_file(
    store: &dyn CatechismStore,
    path: &Path,
    max_items: u32,
) -> Result<ImportReport> {
    let json = std::fs::read_to_string(path)?;
    let items = parse_feed(&json, max_items)?;
    info!(count = items.len(), "parsed catechism feed");
    Ok(import_items(store, &items, max_items))
}
