//! CPU1 vector memory.
//!
//! Stores frozen snapshots of the path integrator, each with a reward
//! strength. The bank is bounded: storing into a full bank evicts the oldest
//! record first, so insertion order is also recency order.

use super::basis::PopulationActivity;
use super::gaussian;
use rand::Rng;
use std::collections::VecDeque;

/// A stored integrator snapshot and its reward strength.
#[derive(Clone, Debug, PartialEq)]
pub struct MemoryRecord {
    pub activity: PopulationActivity,
    pub strength: f64,
}

#[derive(Clone, Debug)]
pub struct VectorMemoryBank {
    records: VecDeque<MemoryRecord>,
    capacity: usize,
    neurons: usize,
    interference: f64,
    consolidation_increment: f64,
    max_strength: f64,
}

impl VectorMemoryBank {
    #[must_use]
    pub fn new(
        capacity: usize,
        neurons: usize,
        interference: f64,
        consolidation_increment: f64,
        max_strength: f64,
    ) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity),
            capacity,
            neurons,
            interference,
            consolidation_increment,
            max_strength,
        }
    }

    /// Stores a copy of `activity`, evicting the oldest record when full.
    ///
    /// With non-zero interference each column of the copy is perturbed by
    /// Gaussian noise before it is frozen.
    pub fn store<R: Rng + ?Sized>(
        &mut self,
        activity: &PopulationActivity,
        strength: f64,
        rng: &mut R,
    ) {
        if self.capacity == 0 {
            return;
        }
        while self.records.len() >= self.capacity {
            self.records.pop_front();
        }

        let mut snapshot = activity.clone();
        for a in snapshot.as_mut_slice() {
            *a += gaussian(rng, self.interference);
        }
        self.records.push_back(MemoryRecord {
            activity: snapshot,
            strength: strength.max(0.0),
        });
    }

    /// Returns the stored activity at `id`, or a silent population when
    /// `id` does not name a record.
    #[must_use]
    pub fn recall(&self, id: usize) -> PopulationActivity {
        self.records
            .get(id)
            .map_or_else(|| PopulationActivity::zeros(self.neurons), |r| r.activity.clone())
    }

    /// Strengthens record `id` by the consolidation increment, capped at the
    /// maximum strength. Invalid ids are ignored.
    pub fn consolidate(&mut self, id: usize) {
        if let Some(record) = self.records.get_mut(id) {
            record.strength = (record.strength + self.consolidation_increment).min(self.max_strength);
        }
    }

    /// Strength of every record, oldest first.
    #[must_use]
    pub fn strengths(&self) -> Vec<f64> {
        self.records.iter().map(|r| r.strength).collect()
    }

    /// Index of the most recently stored record.
    #[must_use]
    pub fn newest(&self) -> Option<usize> {
        self.records.len().checked_sub(1)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    #[must_use]
    pub const fn neurons(&self) -> usize {
        self.neurons
    }
}
