use std::fmt;
use std::num::NonZeroU32;

use serde::Serialize;

use crate::cyclic;
use crate::error::{PlanError, Result};

/// A named run of consecutive items, e.g. a book and its chapter count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SubUnit {
    name: String,
    length: u32,
}

impl SubUnit {
    pub fn new(name: impl Into<String>, length: u32) -> Result<Self> {
        let name = name.into();
        if length == 0 {
            return Err(PlanError::EmptyUnit { name });
        }
        Ok(Self { name, length })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Always at least 1.
    pub fn length(&self) -> u32 {
        self.length
    }
}

/// Ordered, immutable collection of sub-units consumed once, start to finish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Corpus {
    name: String,
    units: Vec<SubUnit>,
}

impl Corpus {
    pub fn new(name: impl Into<String>, units: Vec<SubUnit>) -> Self {
        Self {
            name: name.into(),
            units,
        }
    }

    /// Build from a static `(name, length)` table.
    pub fn from_table(name: impl Into<String>, table: &[(&str, u32)]) -> Result<Self> {
        let units = table
            .iter()
            .map(|(unit, len)| SubUnit::new(*unit, *len))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self::new(name, units))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn units(&self) -> &[SubUnit] {
        &self.units
    }

    pub fn total_items(&self) -> u64 {
        self.units.iter().map(|u| u64::from(u.length)).sum()
    }

    /// Every item of the corpus, in order.
    pub fn iter_items(&self) -> impl Iterator<Item = Item<'_>> + '_ {
        self.units.iter().flat_map(|unit| {
            (1..=unit.length).map(move |position| Item {
                unit: &unit.name,
                position,
            })
        })
    }
}

/// One addressable item: sub-unit name plus 1-based position inside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Item<'a> {
    pub unit: &'a str,
    pub position: u32,
}

impl fmt::Display for Item<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.unit, self.position)
    }
}

/// A flat `1..=length` corpus that restarts once exhausted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CyclicCorpus {
    name: String,
    length: NonZeroU32,
}

impl CyclicCorpus {
    pub fn new(name: impl Into<String>, length: u32) -> Result<Self> {
        let name = name.into();
        match NonZeroU32::new(length) {
            Some(length) => Ok(Self { name, length }),
            None => Err(PlanError::EmptyUnit { name }),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn length(&self) -> NonZeroU32 {
        self.length
    }

    /// Reference string for `slot`, e.g. `"Salmos 1"` for slot 151 of a 150 cycle.
    pub fn reference(&self, slot: u32) -> String {
        format!("{} {}", self.name, cyclic::assign(self.length, slot))
    }
}
