use serde::Serialize;
use tracing::{info, warn};

use crate::canon;
use crate::corpus::{Corpus, CyclicCorpus};
use crate::error::Result;
use crate::sequencer::sequence;
use crate::store::PlanStore;
use crate::types::Assignment;

/// Log a progress line every this many days while seeding.
const PROGRESS_EVERY: u32 = 50;

/// Four independent streams combined into one assignment per day.
#[derive(Debug, Clone)]
pub struct PlanBuilder {
    old_testament: Corpus,
    new_testament: Corpus,
    psalms: CyclicCorpus,
    proverbs: CyclicCorpus,
}

/// Outcome of [`PlanBuilder::seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub written: u32,
    pub failed: u32,
}

impl PlanBuilder {
    pub fn new(
        old_testament: Corpus,
        new_testament: Corpus,
        psalms: CyclicCorpus,
        proverbs: CyclicCorpus,
    ) -> Self {
        Self {
            old_testament,
            new_testament,
            psalms,
            proverbs,
        }
    }

    /// The full-canon plan served by default.
    pub fn canonical() -> Result<Self> {
        Ok(Self::new(
            canon::old_testament()?,
            canon::new_testament()?,
            canon::psalms()?,
            canon::proverbs()?,
        ))
    }

    /// One [`Assignment`] per day `1..=total_slots`. Pure: identical inputs
    /// always produce identical output.
    pub fn build(&self, total_slots: u32) -> Vec<Assignment> {
        // Each sequencer owns its own cursor; the streams never interact.
        let old = sequence(&self.old_testament, total_slots);
        let new = sequence(&self.new_testament, total_slots);

        old.into_iter()
            .zip(new)
            .zip(1..=total_slots)
            .map(|((old_testament_ref, new_testament_ref), day)| Assignment {
                day_of_year: day,
                old_testament_ref,
                new_testament_ref,
                psalms_ref: self.psalms.reference(day),
                proverbs_ref: self.proverbs.reference(day),
            })
            .collect()
    }

    /// Build the plan and upsert every day into `store`.
    ///
    /// A failed write is logged and counted; the remaining days are still
    /// written. Rerunning overwrites the same days with the same values.
    pub fn seed(&self, store: &dyn PlanStore, total_slots: u32) -> SeedReport {
        info!(days = total_slots, "populating reading plan");
        let mut report = SeedReport::default();

        for assignment in self.build(total_slots) {
            let day = assignment.day_of_year;
            match store.upsert(&assignment) {
                Ok(()) => report.written += 1,
                Err(e) => {
                    warn!(day, error = %e, "failed to store plan day");
                    report.failed += 1;
                }
            }
            if day % PROGRESS_EVERY == 0 {
                info!(day, "processed {day} days");
            }
        }

        info!(
            written = report.written,
            failed = report.failed,
            "reading plan populated"
        );
        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tiny() -> PlanBuilder {
        PlanBuilder::new(
            Corpus::from_table("ot", &[("A", 3), ("B", 2)]).unwrap(),
            Corpus::from_table("nt", &[("M", 2)]).unwrap(),
            CyclicCorpus::new("Sl", 3).unwrap(),
            CyclicCorpus::new("Pv", 2).unwrap(),
        )
    }

    #[test]
    fn streams_are_independent() {
        let plan = tiny().build(5);
        let ot: Vec<&str> = plan.iter().map(|a| a.old_testament_ref.as_str()).collect();
        let nt: Vec<&str> = plan.iter().map(|a| a.new_testament_ref.as_str()).collect();
        let ps: Vec<&str> = plan.iter().map(|a| a.psalms_ref.as_str()).collect();
        let pv: Vec<&str> = plan.iter().map(|a| a.proverbs_ref.as_str()).collect();
        assert_eq!(ot, ["A 1", "A 2", "A 3", "B 1", "B 2"]);
        assert_eq!(nt, ["", "", "M 1", "", "M 2"]);
        assert_eq!(ps, ["Sl 1", "Sl 2", "Sl 3", "Sl 1", "Sl 2"]);
        assert_eq!(pv, ["Pv 1", "Pv 2", "Pv 1", "Pv 2", "Pv 1"]);
    }

    #[test]
    fn days_are_unique_and_contiguous() {
        let plan = PlanBuilder::canonical().unwrap().build(365);
        assert_eq!(plan.len(), 365);
        assert!(plan.iter().zip(1..).all(|(a, d)| a.day_of_year == d));
    }

    #[test]
    fn canonical_plan_landmarks() {
        let plan = PlanBuilder::canonical().unwrap().build(365);
        // 929/365 ≈ 2.55 chapters a day of the Old Testament.
        assert_eq!(plan[0].old_testament_ref, "Gênesis 1; Gênesis 2");
        assert!(plan[364].old_testament_ref.ends_with("Malaquias 4"));
        assert!(plan[364].new_testament_ref.ends_with("Apocalipse 22"));
        assert_eq!(plan[150].psalms_ref, "Salmos 1");
        assert_eq!(plan[364].proverbs_ref, "Provérbios 24");
    }

    #[test]
    fn build_is_idempotent() {
        let builder = PlanBuilder::canonical().unwrap();
        assert_eq!(builder.build(365), builder.build(365));
    }
}
