//! `OrderedSequence`: a source plus an ordering chain, sorted on enumeration.

use seqops_core::buffer::SequenceBuffer;
use seqops_core::comparer::{NaturalOrder, OrderComparer, SortDirection};
use seqops_core::config::{SeqConfig, DEFAULT_BUFFER_SEED};
use seqops_core::error::{Error, Result};

use super::execution::{SortExecution, Sorted};
use super::level::{BoxedLevel, SortLevel};

/// A deferred, stable, multi-level ordering of `source`.
///
/// Levels are compared primary-first. Nothing is pulled from the source until
/// enumeration starts, and every enumeration redoes the whole sort: the
/// level chain is the only state shared between enumerations.
pub struct OrderedSequence<'s, I: Iterator> {
    source: I,
    levels: Vec<BoxedLevel<'s, I::Item>>,
    buffer_seed: usize,
}

impl<'s, I: Iterator> OrderedSequence<'s, I> {
    /// Start a chain with one level.
    pub fn new<K, F, C>(source: I, key: F, comparer: C, direction: SortDirection) -> Self
    where
        F: Fn(&I::Item) -> K + 's,
        C: OrderComparer<K> + 's,
        K: 's,
    {
        Self {
            source,
            levels: vec![Box::new(SortLevel::new(key, comparer, direction))],
            buffer_seed: DEFAULT_BUFFER_SEED,
        }
    }

    /// Build from a prepared chain. An empty chain is rejected.
    pub fn from_levels(source: I, levels: Vec<BoxedLevel<'s, I::Item>>) -> Result<Self> {
        if levels.is_empty() {
            return Err(Error::invalid_argument("ordering needs at least one sort level"));
        }
        Ok(Self {
            source,
            levels,
            buffer_seed: DEFAULT_BUFFER_SEED,
        })
    }

    /// Apply buffer tunables from `config`.
    pub fn with_config(mut self, config: &SeqConfig) -> Self {
        self.buffer_seed = config.buffer_seed_capacity.max(1);
        self
    }

    /// Append a level compared after every existing one.
    pub fn then_by_with<K, F, C>(mut self, key: F, comparer: C, direction: SortDirection) -> Self
    where
        F: Fn(&I::Item) -> K + 's,
        C: OrderComparer<K> + 's,
        K: 's,
    {
        self.levels
            .push(Box::new(SortLevel::new(key, comparer, direction)));
        self
    }

    pub fn then_by<K, F>(self, key: F) -> Self
    where
        F: Fn(&I::Item) -> K + 's,
        K: Ord + 's,
    {
        self.then_by_with(key, NaturalOrder, SortDirection::Ascending)
    }

    pub fn then_by_descending<K, F>(self, key: F) -> Self
    where
        F: Fn(&I::Item) -> K + 's,
        K: Ord + 's,
    {
        self.then_by_with(key, NaturalOrder, SortDirection::Descending)
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    pub fn directions(&self) -> impl Iterator<Item = SortDirection> + '_ {
        self.levels.iter().map(|l| l.direction())
    }

    /// Enumerate a copy of the source. The sequence stays reusable.
    pub fn iter(&self) -> Sorted<I::Item>
    where
        I: Clone,
    {
        let buffer = SequenceBuffer::with_seed_capacity(self.source.clone(), self.buffer_seed);
        SortExecution::new(buffer, &self.levels).into_sorted()
    }

    /// Sorted source positions for a copy of the source.
    pub fn permutation(&self) -> Vec<usize>
    where
        I: Clone,
    {
        self.iter().permutation().to_vec()
    }
}

impl<'s, I: Iterator> IntoIterator for OrderedSequence<'s, I> {
    type Item = I::Item;
    type IntoIter = Sorted<I::Item>;

    fn into_iter(self) -> Self::IntoIter {
        let buffer = SequenceBuffer::with_seed_capacity(self.source, self.buffer_seed);
        SortExecution::new(buffer, &self.levels).into_sorted()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqops_core::comparer::IgnoreAsciiCase;
    use std::cell::Cell;

    #[test]
    fn then_by_breaks_ties() {
        let people = [("Kim", 30), ("Lee", 25), ("Kim", 20), ("Lee", 35)];
        let sorted: Vec<_> = OrderedSequence::new(
            people.iter(),
            |p: &&(&str, i32)| p.0,
            NaturalOrder,
            SortDirection::Ascending,
        )
        .then_by(|p| p.1)
        .into_iter()
        .copied()
        .collect();
        assert_eq!(sorted, vec![("Kim", 20), ("Kim", 30), ("Lee", 25), ("Lee", 35)]);
    }

    #[test]
    fn each_enumeration_recomputes_keys() {
        let calls = std::cell::Cell::new(0);
        let ordered = OrderedSequence::new(
            [3, 1, 2].iter(),
            |x: &&i32| {
                calls.set(calls.get() + 1);
                **x
            },
            NaturalOrder,
            SortDirection::Ascending,
        );
        assert_eq!(calls.get(), 0);
        let first: Vec<i32> = ordered.iter().copied().collect();
        let second: Vec<i32> = ordered.iter().copied().collect();
        assert_eq!(first, second);
        assert_eq!(calls.get(), 6);
    }

    #[test]
    fn descending_level_with_custom_comparer() {
        let words = ["b", "A", "c", "B"];
        let sorted: Vec<&str> = OrderedSequence::new(
            words.iter().copied(),
            |w: &&str| w.to_string(),
            IgnoreAsciiCase,
            SortDirection::Descending,
        )
        .into_iter()
        .collect();
        // "b" and "B" tie and keep source order
        assert_eq!(sorted, vec!["c", "b", "B", "A"]);
    }

    #[test]
    fn empty_chain_is_invalid() {
        let err = OrderedSequence::from_levels(std::iter::empty::<u8>(), Vec::new()).err();
        assert!(matches!(err, Some(Error::InvalidArgument(_))));
    }

    #[test]
    fn nothing_pulled_before_enumeration() {
        let pulled = Cell::new(0);
        let src = (0..4).inspect(|_| pulled.set(pulled.get() + 1));
        let ordered = OrderedSequence::new(src, |x: &i32| -x, NaturalOrder, SortDirection::Ascending);
        assert_eq!(pulled.get(), 0);
        let out: Vec<i32> = ordered.into_iter().collect();
        assert_eq!(out, vec![3, 2, 1, 0]);
        assert_eq!(pulled.get(), 4);
    }
}
