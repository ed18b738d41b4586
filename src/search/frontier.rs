//! Min-priority frontier for best-first algorithms.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

/// A frontier entry. Lower priority pops first; equal priorities pop in
/// insertion order.
#[derive(Debug)]
pub(crate) struct Entry<S> {
    pub priority: f64,
    pub seq: u64,
    pub depth: usize,
    pub state: S,
}

impl<S> PartialEq for Entry<S> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<S> Eq for Entry<S> {}

impl<S> Ord for Entry<S> {
    // BinaryHeap is a max-heap: reverse both keys.
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .priority
            .total_cmp(&self.priority)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl<S> PartialOrd for Entry<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Priority queue keyed by `f64`, popping the smallest value first.
#[derive(Debug)]
pub(crate) struct Frontier<S> {
    heap: BinaryHeap<Entry<S>>,
    next_seq: u64,
}

impl<S> Frontier<S> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            next_seq: 0,
        }
    }

    pub fn push(&mut self, priority: f64, depth: usize, state: S) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.heap.push(Entry {
            priority,
            seq,
            depth,
            state,
        });
    }

    pub fn pop(&mut self) -> Option<Entry<S>> {
        self.heap.pop()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pops_lowest_first() {
        let mut frontier = Frontier::new();
        frontier.push(3.0, 0, "c");
        frontier.push(-2.0, 0, "a");
        frontier.push(0.5, 0, "b");
        let order: Vec<&str> = std::iter::from_fn(|| frontier.pop().map(|e| e.state)).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ties_pop_in_insertion_order() {
        let mut frontier = Frontier::new();
        for (i, name) in ["first", "second", "third"].into_iter().enumerate() {
            frontier.push(1.0, i, name);
        }
        let order: Vec<&str> = std::iter::from_fn(|| frontier.pop().map(|e| e.state)).collect();
        assert_eq!(order, vec!["first", "second", "third"]);
    }
}
