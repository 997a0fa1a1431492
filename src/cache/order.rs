//! Insertion Order Module
//!
//! Tracks the order keys were first inserted, for FIFO capacity eviction.

use std::collections::VecDeque;

// == Insertion Order ==
/// Records keys in first-insertion order.
///
/// - Front = oldest inserted (next to evict)
/// - Back = newest inserted
///
/// Reads never reorder keys, and pushing a tracked key keeps its original slot.
#[derive(Debug, Default)]
pub struct InsertionOrder {
    order: VecDeque<String>,
}

impl InsertionOrder {
    // == Constructor ==
    pub fn new() -> Self {
        Self {
            order: VecDeque::new(),
        }
    }

    // == Push ==
    /// Appends a key if it is not already tracked.
    pub fn push(&mut self, key: &str) {
        if !self.contains(key) {
            self.order.push_back(key.to_string());
        }
    }

    // == Remove ==
    /// Removes a key from the tracker.
    pub fn remove(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }

    // == Pop Oldest ==
    /// Returns and removes the oldest-inserted key.
    pub fn pop_oldest(&mut self) -> Option<String> {
        self.order.pop_front()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.order.iter().any(|k| k == key)
    }

    /// Iterates keys from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.order.iter()
    }

    pub fn clear(&mut self) {
        self.order.clear();
    }
}
