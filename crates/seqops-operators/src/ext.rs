//! Method-call syntax for every operator.
//!
//! ```
//! use seqops_operators::SequenceExt;
//!
//! let people = vec![("Lee", 25), ("Kim", 30), ("Kim", 20)];
//! let sorted: Vec<_> = people.into_iter().order_by(|p| p.0).then_by(|p| p.1).into_iter().collect();
//! assert_eq!(sorted, vec![("Kim", 20), ("Kim", 30), ("Lee", 25)]);
//! ```

use seqops_core::buffer::SequenceBuffer;
use seqops_core::comparer::{DefaultEquality, EqualityComparer, NaturalOrder, OrderComparer, SortDirection};
use seqops_core::config::SeqConfig;
use seqops_core::error::Result;
use seqops_lookup::Lookup;

use crate::group::{self, Groups};
use crate::join::{self, GroupJoin, Join};
use crate::reverse::Reverse;
use crate::sort::OrderedSequence;

/// Operator adapters, implemented for every iterator.
pub trait SequenceExt: Iterator + Sized {
    /// Deferred ascending ordering by `key`.
    fn order_by<'s, K, F>(self, key: F) -> OrderedSequence<'s, Self>
    where
        F: Fn(&Self::Item) -> K + 's,
        K: Ord + 's,
    {
        OrderedSequence::new(self, key, NaturalOrder, SortDirection::Ascending)
    }

    fn order_by_descending<'s, K, F>(self, key: F) -> OrderedSequence<'s, Self>
    where
        F: Fn(&Self::Item) -> K + 's,
        K: Ord + 's,
    {
        OrderedSequence::new(self, key, NaturalOrder, SortDirection::Descending)
    }

    fn order_by_with<'s, K, F, C>(
        self,
        key: F,
        comparer: C,
        direction: SortDirection,
    ) -> OrderedSequence<'s, Self>
    where
        F: Fn(&Self::Item) -> K + 's,
        C: OrderComparer<K> + 's,
        K: 's,
    {
        OrderedSequence::new(self, key, comparer, direction)
    }

    fn to_lookup<K, V, KF, EF>(self, key: KF, element: EF) -> Result<Lookup<K, V>>
    where
        KF: FnMut(&Self::Item) -> K,
        EF: FnMut(Self::Item) -> V,
        DefaultEquality: EqualityComparer<K>,
    {
        group::to_lookup(self, key, element)
    }

    fn to_lookup_with<K, V, C, KF, EF>(
        self,
        key: KF,
        element: EF,
        comparer: C,
        config: &SeqConfig,
    ) -> Result<Lookup<K, V, C>>
    where
        C: EqualityComparer<K>,
        KF: FnMut(&Self::Item) -> K,
        EF: FnMut(Self::Item) -> V,
    {
        group::to_lookup_with(self, key, element, comparer, config)
    }

    fn group_by<K, V, KF, EF>(self, key: KF, element: EF) -> Result<Groups<K, V>>
    where
        KF: FnMut(&Self::Item) -> K,
        EF: FnMut(Self::Item) -> V,
        DefaultEquality: EqualityComparer<K>,
    {
        group::group_by(self, key, element)
    }

    /// Inner join with `self` as the outer side.
    fn join<I, K, OK, IK, R, Out>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: R,
    ) -> Result<Join<Self, K, I::Item, DefaultEquality, OK, R>>
    where
        I: IntoIterator,
        OK: FnMut(&Self::Item) -> Option<K>,
        IK: FnMut(&I::Item) -> Option<K>,
        R: FnMut(&Self::Item, &I::Item) -> Out,
        DefaultEquality: EqualityComparer<K>,
    {
        join::join(self, inner, outer_key, inner_key, result)
    }

    #[allow(clippy::too_many_arguments)]
    fn join_with<I, K, C, OK, IK, R, Out>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: R,
        comparer: C,
        config: &SeqConfig,
    ) -> Result<Join<Self, K, I::Item, C, OK, R>>
    where
        I: IntoIterator,
        C: EqualityComparer<K>,
        OK: FnMut(&Self::Item) -> Option<K>,
        IK: FnMut(&I::Item) -> Option<K>,
        R: FnMut(&Self::Item, &I::Item) -> Out,
    {
        join::join_with(self, inner, outer_key, inner_key, result, comparer, config)
    }

    /// Group join with `self` as the outer side.
    fn group_join<I, K, OK, IK, R, Out>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: R,
    ) -> Result<GroupJoin<Self, K, I::Item, DefaultEquality, OK, R>>
    where
        I: IntoIterator,
        OK: FnMut(&Self::Item) -> Option<K>,
        IK: FnMut(&I::Item) -> Option<K>,
        R: FnMut(Self::Item, &[I::Item]) -> Out,
        DefaultEquality: EqualityComparer<K>,
    {
        join::group_join(self, inner, outer_key, inner_key, result)
    }

    #[allow(clippy::too_many_arguments)]
    fn group_join_with<I, K, C, OK, IK, R, Out>(
        self,
        inner: I,
        outer_key: OK,
        inner_key: IK,
        result: R,
        comparer: C,
        config: &SeqConfig,
    ) -> Result<GroupJoin<Self, K, I::Item, C, OK, R>>
    where
        I: IntoIterator,
        C: EqualityComparer<K>,
        OK: FnMut(&Self::Item) -> Option<K>,
        IK: FnMut(&I::Item) -> Option<K>,
        R: FnMut(Self::Item, &[I::Item]) -> Out,
    {
        join::group_join_with(self, inner, outer_key, inner_key, result, comparer, config)
    }

    /// Back-to-front; buffers the source on the first pull.
    fn reversed(self) -> Reverse<Self> {
        Reverse::new(self)
    }

    /// Pull everything now into a [`SequenceBuffer`].
    fn buffer(self) -> SequenceBuffer<Self::Item> {
        SequenceBuffer::new(self)
    }
}

impl<I: Iterator> SequenceExt for I {}
