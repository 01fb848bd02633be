use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::error::{HuffError, Result};

/// Entry in the queue. Ordered so the BinaryHeap (a max-heap) pops the lowest weight first,
/// and the earliest insert first among equal weights.
#[derive(Debug)]
struct Entry<T> {
    weight: u64,
    seq: u64,
    item: T,
}

impl<T> PartialEq for Entry<T> {
    fn eq(&self, other: &Self) -> bool {
        self.weight == other.weight && self.seq == other.seq
    }
}
impl<T> Eq for Entry<T> {}

impl<T> PartialOrd for Entry<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Entry<T> {
    /// Sort Entries by decreasing weight and decreasing insertion sequence
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .weight
            .cmp(&self.weight)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// Min-priority queue over opaque items, keyed only by the weight given on insert.
/// Items of equal weight come out in insertion order.
#[derive(Debug)]
pub struct PriorityQueue<T> {
    heap: BinaryHeap<Entry<T>>,
    seq: u64,
}

impl<T> PriorityQueue<T> {
    pub fn new() -> Self {
        Self {
            heap: BinaryHeap::new(),
            seq: 0,
        }
    }

    /// Create a queue with room for `size` items.
    pub fn with_capacity(size: usize) -> Result<Self> {
        let mut queue = Self::new();
        queue.heap.try_reserve_exact(size).map_err(|_| HuffError::AllocationFailure {
            size: size.saturating_mul(std::mem::size_of::<Entry<T>>()),
        })?;
        Ok(queue)
    }

    /// Add an item with its weight.
    pub fn insert(&mut self, item: T, weight: u64) -> Result<()> {
        self.heap.try_reserve(1).map_err(|_| HuffError::AllocationFailure {
            size: std::mem::size_of::<Entry<T>>(),
        })?;
        self.heap.push(Entry {
            weight,
            seq: self.seq,
            item,
        });
        self.seq += 1;
        Ok(())
    }

    /// Remove the lowest weight item, returning it with its weight. None when empty.
    pub fn extract_min(&mut self) -> Option<(T, u64)> {
        self.heap.pop().map(|e| (e.item, e.weight))
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }
}

impl<T> Default for PriorityQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod test {
    use super::PriorityQueue;

    #[test]
    fn extract_order_test() {
        let mut pq = PriorityQueue::new();
        for (item, weight) in [('a', 5), ('b', 1), ('c', 9), ('d', 3)] {
            pq.insert(item, weight).unwrap();
        }
        assert_eq!(pq.len(), 4);
        let order: Vec<char> = std::iter::from_fn(|| pq.extract_min().map(|(c, _)| c)).collect();
        assert_eq!(order, vec!['b', 'd', 'a', 'c']);
        assert!(pq.is_empty());
        assert!(pq.extract_min().is_none());
    }

    #[test]
    fn equal_weights_fifo_test() {
        let mut pq = PriorityQueue::with_capacity(8).unwrap();
        for item in 0..8 {
            pq.insert(item, 2).unwrap();
        }
        pq.insert(100, 1).unwrap();
        assert_eq!(pq.extract_min(), Some((100, 1)));
        for expected in 0..8 {
            assert_eq!(pq.extract_min(), Some((expected, 2)));
        }
    }
}
