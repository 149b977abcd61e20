//! One-pass materialization of a forward-only sequence.
//!
//! Sorting and reversal need random access over their input. `SequenceBuffer`
//! pulls the source exactly once and keeps every element, in order, in a dense
//! array. When the source reports an exact size (`size_hint` with equal bounds)
//! the array is allocated once at that size; otherwise it starts at a small seed
//! capacity and doubles as elements arrive.

use std::ops::Index;

use crate::config::DEFAULT_BUFFER_SEED;

#[derive(Debug, Clone)]
pub struct SequenceBuffer<T> {
    items: Vec<T>,
}

impl<T> SequenceBuffer<T> {
    /// Buffer `source` using the default seed capacity for unsized sources.
    pub fn new<I: IntoIterator<Item = T>>(source: I) -> Self {
        Self::with_seed_capacity(source, DEFAULT_BUFFER_SEED)
    }

    /// Buffer `source`; `seed` is the starting capacity when the size is unknown.
    pub fn with_seed_capacity<I: IntoIterator<Item = T>>(source: I, seed: usize) -> Self {
        let iter = source.into_iter();
        let items = match iter.size_hint() {
            (lo, Some(hi)) if lo == hi => {
                let mut items = Vec::with_capacity(lo);
                items.extend(iter);
                items
            }
            _ => {
                let mut items: Vec<T> = Vec::new();
                for item in iter {
                    if items.len() == items.capacity() {
                        let grow = if items.capacity() == 0 {
                            seed.max(1)
                        } else {
                            items.capacity()
                        };
                        items.reserve_exact(grow);
                    }
                    items.push(item);
                }
                items
            }
        };
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Allocated slots (>= `len`).
    pub fn capacity(&self) -> usize {
        self.items.capacity()
    }

    pub fn get(&self, idx: usize) -> Option<&T> {
        self.items.get(idx)
    }

    pub fn as_slice(&self) -> &[T] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn into_vec(self) -> Vec<T> {
        self.items
    }
}

impl<T> Index<usize> for SequenceBuffer<T> {
    type Output = T;

    fn index(&self, idx: usize) -> &T {
        &self.items[idx]
    }
}

impl<T> FromIterator<T> for SequenceBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new(iter)
    }
}

impl<T> IntoIterator for SequenceBuffer<T> {
    type Item = T;
    type IntoIter = std::vec::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a SequenceBuffer<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
