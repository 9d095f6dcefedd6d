//! Proportional distribution of a corpus over a fixed number of slots.
//!
//! Each slot is owed `total_items / total_slots` items. The owed amount is
//! accumulated and only its whole part is paid out; the fractional remainder
//! carries into the next slot. With 260 chapters over 365 days that yields a
//! steady mix of one-chapter and empty days instead of 260 full days followed
//! by 105 empty ones.
//!
//! The accumulator is kept as an exact numerator over `total_slots`, so the
//! payouts always sum to exactly `total_items`.

use crate::corpus::{Corpus, Item};

/// Separator between several items assigned to the same slot.
pub const ITEM_SEPARATOR: &str = "; ";

/// Walk position inside a corpus plus the carried fraction.
///
/// `position` is 1-based and always within the current unit's length while
/// `unit_index` points at a unit; once `unit_index == units.len()` the corpus
/// is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SequenceCursor {
    unit_index: usize,
    position: u32,
    /// Numerator of the carried fraction; the denominator is the slot count.
    carry: u64,
}

impl SequenceCursor {
    fn start() -> Self {
        Self {
            unit_index: 0,
            position: 1,
            carry: 0,
        }
    }

    pub fn unit_index(&self) -> usize {
        self.unit_index
    }

    pub fn position(&self) -> u32 {
        self.position
    }

    /// Take the item under the cursor and step past it.
    fn advance<'c>(&mut self, corpus: &'c Corpus) -> Option<Item<'c>> {
        let unit = corpus.units().get(self.unit_index)?;
        let item = Item {
            unit: unit.name(),
            position: self.position,
        };
        if self.position >= unit.length() {
            self.unit_index += 1;
            self.position = 1;
        } else {
            self.position += 1;
        }
        Some(item)
    }
}

/// Yields one reference string per slot, `total_slots` times.
#[derive(Debug, Clone)]
pub struct Sequencer<'c> {
    corpus: &'c Corpus,
    total_items: u64,
    total_slots: u64,
    slots_emitted: u64,
    cursor: SequenceCursor,
}

impl<'c> Sequencer<'c> {
    pub fn new(corpus: &'c Corpus, total_slots: u32) -> Self {
        Self {
            corpus,
            total_items: corpus.total_items(),
            total_slots: u64::from(total_slots),
            slots_emitted: 0,
            cursor: SequenceCursor::start(),
        }
    }

    pub fn cursor(&self) -> SequenceCursor {
        self.cursor
    }

    /// Carried fraction in `[0, 1)`.
    pub fn fractional_carry(&self) -> f64 {
        if self.total_slots == 0 {
            return 0.0;
        }
        self.cursor.carry as f64 / self.total_slots as f64
    }

    /// Accrue one slot's share and pay out its whole part.
    fn next_count(&mut self) -> u64 {
        self.cursor.carry += self.total_items;
        let whole = self.cursor.carry / self.total_slots;
        self.cursor.carry %= self.total_slots;
        whole
    }
}

impl Iterator for Sequencer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        if self.slots_emitted >= self.total_slots {
            return None;
        }
        self.slots_emitted += 1;

        let count = self.next_count();
        let mut parts = Vec::new();
        for _ in 0..count {
            match self.cursor.advance(self.corpus) {
                Some(item) => parts.push(item.to_string()),
                // Only reachable if the arithmetic above were inconsistent
                // with the corpus size; the slot degrades to fewer items.
                None => break,
            }
        }
        Some(parts.join(ITEM_SEPARATOR))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = (self.total_slots - self.slots_emitted) as usize;
        (left, Some(left))
    }
}

impl ExactSizeIterator for Sequencer<'_> {}

/// Distribute `corpus` over `total_slots` slots; element `i` is slot `i + 1`.
pub fn sequence(corpus: &Corpus, total_slots: u32) -> Vec<String> {
    Sequencer::new(corpus, total_slots).collect()
}
