use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::hash::Hash;

use crate::point::{Point, Radius};
use crate::proximity::{count_within, CandidateSource, RadiusQuery};

/// Per-batch memo of pickup-point counts.
///
/// Scoped to one batch of queries (one listing request) and bound to a
/// single radius. Cached counts are only valid while the candidate data is
/// unchanged.
#[derive(Debug)]
pub struct BatchContext<K> {
    radius: Radius,
    counts: HashMap<K, usize>,
    hits: usize,
    misses: usize,
}

impl<K: Eq + Hash> BatchContext<K> {
    pub fn new(radius: Radius) -> Self {
        Self {
            radius,
            counts: HashMap::new(),
            hits: 0,
            misses: 0,
        }
    }

    pub fn radius(&self) -> Radius {
        self.radius
    }

    /// Count candidates near `center`, reusing the result stored under `key`.
    pub fn count_within_cached<S>(&mut self, source: &S, key: K, center: Point) -> usize
    where
        S: CandidateSource + ?Sized,
    {
        match self.counts.entry(key) {
            Entry::Occupied(entry) => {
                self.hits += 1;
                *entry.get()
            }
            Entry::Vacant(entry) => {
                self.misses += 1;
                let count = count_within(source, &RadiusQuery::new(center, self.radius));
                *entry.insert(count)
            }
        }
    }

    pub fn get(&self, key: &K) -> Option<usize> {
        self.counts.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }

    pub fn misses(&self) -> usize {
        self.misses
    }
}
