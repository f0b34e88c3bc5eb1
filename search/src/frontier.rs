//! FIFO frontier for breadth-first traversal.
//!
//! Unlike a deduplicating frontier, the same node may sit in the queue more
//! than once: it is enqueued once per visited neighbor that discovers it
//! before its own visit. Double visits are prevented at dequeue time by the
//! engine, not here.

use std::collections::VecDeque;

/// Queue of node positions awaiting a dequeue, front first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FifoFrontier {
    queue: VecDeque<usize>,
    high_water: u64,
    total_enqueued: u64,
}

impl FifoFrontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a frontier from exported parts.
    ///
    /// `high_water` is raised to the queue length if it is lower.
    #[must_use]
    pub fn from_parts(queue: Vec<usize>, high_water: u64, total_enqueued: u64) -> Self {
        let len = queue.len() as u64;
        Self {
            queue: queue.into(),
            high_water: high_water.max(len),
            total_enqueued: total_enqueued.max(len),
        }
    }

    /// Append a node at the back.
    pub fn push(&mut self, node: usize) {
        self.queue.push_back(node);
        self.total_enqueued += 1;
        let size = self.queue.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
    }

    /// Remove the front node.
    pub fn pop(&mut self) -> Option<usize> {
        self.queue.pop_front()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Largest queue size seen so far.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Number of pushes over the frontier's lifetime.
    #[must_use]
    pub fn total_enqueued(&self) -> u64 {
        self.total_enqueued
    }

    /// Queue contents, front first.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.queue.iter().copied()
    }
}
