use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

/// Min-priority queue keyed by `(weight, sequence)`.
///
/// The sequence number is assigned by the caller and must be unique, so two
/// entries never compare equal and the extraction order is fully determined
/// by the keys. Items themselves never take part in the ordering.
#[derive(Debug)]
pub struct MinHeap<T> {
    elements: BinaryHeap<Reverse<Entry<T>>>,
}

#[derive(Debug)]
struct Entry<T> {
    weight: u64,
    seq: usize,
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
    fn cmp(&self, other: &Self) -> Ordering {
        (self.weight, self.seq).cmp(&(other.weight, other.seq))
    }
}

impl<T> MinHeap<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        MinHeap {
            elements: BinaryHeap::with_capacity(capacity),
        }
    }

    pub fn heap_size(&self) -> usize {
        self.elements.len()
    }

    pub fn insert(&mut self, weight: u64, seq: usize, item: T) {
        self.elements.push(Reverse(Entry { weight, seq, item }));
    }

    /// Removes the entry with the smallest `(weight, sequence)` key.
    pub fn extract_min(&mut self) -> Option<(u64, T)> {
        self.elements
            .pop()
            .map(|Reverse(entry)| (entry.weight, entry.item))
    }
}
