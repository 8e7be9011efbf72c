// Sentence occurrence indices with per-index frequency.
//
// An entity mentioned three times in sentence 4 is recorded once with a
// frequency of 3. Indices are relative to their document section until
// shifted by the section's absolute offset.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<u32>", into = "Vec<u32>")]
pub struct SentenceIndices {
    frequencies: BTreeMap<u32, u32>,
}

impl SentenceIndices {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, index: u32) {
        self.add_with_frequency(index, 1);
    }

    pub fn add_with_frequency(&mut self, index: u32, frequency: u32) {
        *self.frequencies.entry(index).or_insert(0) += frequency;
    }

    /// Fold another index set into this one, summing frequencies.
    pub fn merge(&mut self, other: &SentenceIndices) {
        for (&index, &frequency) in &other.frequencies {
            self.add_with_frequency(index, frequency);
        }
    }

    /// Shift every index by `offset`. Not idempotent: shifting twice moves twice.
    pub fn shift_by(&mut self, offset: u32) {
        if offset == 0 {
            return;
        }
        self.frequencies = std::mem::take(&mut self.frequencies)
            .into_iter()
            .map(|(index, frequency)| (index.saturating_add(offset), frequency))
            .collect();
    }

    /// Distinct indices in ascending order.
    pub fn values(&self) -> impl Iterator<Item = u32> + '_ {
        self.frequencies.keys().copied()
    }

    pub fn frequency(&self, index: u32) -> u32 {
        self.frequencies.get(&index).copied().unwrap_or(0)
    }

    pub fn contains(&self, index: u32) -> bool {
        self.frequencies.contains_key(&index)
    }

    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

impl From<Vec<u32>> for SentenceIndices {
    fn from(indices: Vec<u32>) -> Self {
        let mut set = SentenceIndices::new();
        for index in indices {
            set.add(index);
        }
        set
    }
}

impl From<SentenceIndices> for Vec<u32> {
    fn from(set: SentenceIndices) -> Self {
        set.frequencies
            .into_iter()
            .flat_map(|(index, frequency)| std::iter::repeat(index).take(frequency as usize))
            .collect()
    }
}

impl fmt::Display for SentenceIndices {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .frequencies
            .iter()
            .map(|(index, frequency)| format!("{index}:{frequency}"))
            .collect();
        write!(f, "[{}]", parts.join(", "))
    }
}
