//! One enumeration of an ordered sequence.
//!
//! Execution steps:
//! 1. buffer the source (`SequenceBuffer`),
//! 2. compute one key array per level, primary first,
//! 3. start from the identity permutation,
//! 4. quicksort the permutation; ties on every level fall back to the
//!    original index, which makes the whole sort stable,
//! 5. hand the buffer and permutation to [`Sorted`] for lazy emission.
//!
//! The quicksort takes the middle element of each range as pivot. Inputs built
//! to defeat a fixed middle pivot degrade it to quadratic time.

use std::cmp::Ordering;

use seqops_core::buffer::SequenceBuffer;

use super::level::{BoxedLevel, LevelKeys};

/// Buffered input, per-level keys, and the sorted permutation.
pub struct SortExecution<'a, T> {
    buffer: SequenceBuffer<T>,
    keys: Vec<Box<dyn LevelKeys + 'a>>,
    map: Vec<usize>,
}

impl<'a, T> SortExecution<'a, T> {
    pub fn new<'s: 'a>(buffer: SequenceBuffer<T>, levels: &'a [BoxedLevel<'s, T>]) -> Self {
        let keys: Vec<Box<dyn LevelKeys + 'a>> = levels
            .iter()
            .map(|level| level.materialize(buffer.as_slice()))
            .collect();
        Self {
            map: (0..buffer.len()).collect(),
            buffer,
            keys,
        }
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Compare two element positions across all levels, then by position.
    #[inline]
    pub fn compare_keys(&self, a: usize, b: usize) -> Ordering {
        compare_keys(&self.keys, a, b)
    }

    /// Sort the permutation in place and return it.
    pub fn sort(&mut self) -> &[usize] {
        #[cfg(feature = "tracing")]
        tracing::debug!(rows = self.buffer.len(), levels = self.keys.len(), "sort execution");

        if self.map.len() > 1 {
            let keys = &self.keys;
            let right = self.map.len() as isize - 1;
            quick_sort(&mut self.map, 0, right, &|a, b| compare_keys(keys, a, b));
        }
        &self.map
    }

    /// Sort, then release the key arrays and keep buffer + permutation.
    pub fn into_sorted(mut self) -> Sorted<T> {
        self.sort();
        Sorted::new(self.buffer, self.map)
    }
}

#[inline]
fn compare_keys(keys: &[Box<dyn LevelKeys + '_>], a: usize, b: usize) -> Ordering {
    for level in keys {
        match level.compare(a, b) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.cmp(&b)
}

/// Hoare-partition quicksort over `map[left..=right]` with a middle pivot.
///
/// Recurses into the smaller side and loops on the larger one, so stack depth
/// stays logarithmic even when the running time does not.
fn quick_sort<F>(map: &mut [usize], mut left: isize, mut right: isize, cmp: &F)
where
    F: Fn(usize, usize) -> Ordering,
{
    let len = map.len() as isize;
    loop {
        let mut i = left;
        let mut j = right;
        let pivot = map[(i + ((j - i) >> 1)) as usize];
        loop {
            while i < len && cmp(pivot, map[i as usize]) == Ordering::Greater {
                i += 1;
            }
            while j >= 0 && cmp(pivot, map[j as usize]) == Ordering::Less {
                j -= 1;
            }
            if i > j {
                break;
            }
            if i < j {
                map.swap(i as usize, j as usize);
            }
            i += 1;
            j -= 1;
            if i > j {
                break;
            }
        }
        if j - left <= right - i {
            if left < j {
                quick_sort(map, left, j, cmp);
            }
            left = i;
        } else {
            if i < right {
                quick_sort(map, i, right, cmp);
            }
            right = j;
        }
        if left >= right {
            break;
        }
    }
}

/// Lazily emits buffered elements in permutation order.
pub struct Sorted<T> {
    slots: Vec<Option<T>>,
    map: Vec<usize>,
    pos: usize,
}

impl<T> Sorted<T> {
    fn new(buffer: SequenceBuffer<T>, map: Vec<usize>) -> Self {
        Self {
            slots: buffer.into_iter().map(Some).collect(),
            map,
            pos: 0,
        }
    }

    /// The permutation: `permutation()[k]` is the source position of output `k`.
    pub fn permutation(&self) -> &[usize] {
        &self.map
    }
}

impl<T> Iterator for Sorted<T> {
    type Item = T;

    fn next(&mut self) -> Option<T> {
        let idx = *self.map.get(self.pos)?;
        self.pos += 1;
        self.slots[idx].take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let rest = self.map.len() - self.pos;
        (rest, Some(rest))
    }
}

impl<T> ExactSizeIterator for Sorted<T> {}
