//! Sort levels: one (key extractor, comparer, direction) step of an ordering.
//!
//! A level's key type is erased behind [`KeyLevel`] so levels with different
//! key types can share one chain. Per enumeration, each level turns the
//! buffered elements into a [`LevelKeys`] array that answers index comparisons.

use std::cmp::Ordering;
use std::marker::PhantomData;

use seqops_core::comparer::{OrderComparer, SortDirection};

/// A sort level with its key type erased.
pub trait KeyLevel<T> {
    fn direction(&self) -> SortDirection;

    /// Extract this level's key for every element, in element order.
    fn materialize<'a>(&'a self, items: &[T]) -> Box<dyn LevelKeys + 'a>;
}

/// Chain entry as stored by an ordered sequence.
pub type BoxedLevel<'s, T> = Box<dyn KeyLevel<T> + 's>;

/// Key array of one level over one buffered input.
pub trait LevelKeys {
    /// Compare the keys at element positions `a` and `b`, direction applied.
    fn compare(&self, a: usize, b: usize) -> Ordering;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub struct SortLevel<F, C, K> {
    key: F,
    comparer: C,
    direction: SortDirection,
    _key: PhantomData<fn() -> K>,
}

impl<F, C, K> SortLevel<F, C, K> {
    pub fn new(key: F, comparer: C, direction: SortDirection) -> Self {
        Self {
            key,
            comparer,
            direction,
            _key: PhantomData,
        }
    }
}

impl<T, K, F, C> KeyLevel<T> for SortLevel<F, C, K>
where
    F: Fn(&T) -> K,
    C: OrderComparer<K>,
{
    fn direction(&self) -> SortDirection {
        self.direction
    }

    fn materialize<'a>(&'a self, items: &[T]) -> Box<dyn LevelKeys + 'a> {
        let keys: Vec<K> = items.iter().map(&self.key).collect();
        Box::new(KeyArray {
            keys,
            comparer: &self.comparer,
            direction: self.direction,
        })
    }
}

struct KeyArray<'a, K, C> {
    keys: Vec<K>,
    comparer: &'a C,
    direction: SortDirection,
}

impl<K, C: OrderComparer<K>> LevelKeys for KeyArray<'_, K, C> {
    #[inline]
    fn compare(&self, a: usize, b: usize) -> Ordering {
        self.direction
            .apply(self.comparer.compare(&self.keys[a], &self.keys[b]))
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}
