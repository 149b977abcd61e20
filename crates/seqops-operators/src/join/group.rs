//! Group join: one result per outer element.

use seqops_core::comparer::{DefaultEquality, EqualityComparer};
use seqops_core::config::SeqConfig;
use seqops_core::error::Result;
use seqops_lookup::Lookup;

use super::index_inner;

/// Pairs every outer element with its inner matches.
///
/// Unmatched outer elements, and outer elements with an absent key, are paired
/// with an empty slice; the output always has exactly as many items as the
/// outer side.
pub struct GroupJoin<O, K, T, C, OK, R> {
    outer: O,
    lookup: Lookup<K, T, C>,
    outer_key: OK,
    result: R,
}

/// Group join under `Hash + Eq` key equality.
pub fn group_join<O, I, K, OK, IK, R, Out>(
    outer: O,
    inner: I,
    outer_key: OK,
    inner_key: IK,
    result: R,
) -> Result<GroupJoin<O::IntoIter, K, I::Item, DefaultEquality, OK, R>>
where
    O: IntoIterator,
    I: IntoIterator,
    OK: FnMut(&O::Item) -> Option<K>,
    IK: FnMut(&I::Item) -> Option<K>,
    R: FnMut(O::Item, &[I::Item]) -> Out,
    DefaultEquality: EqualityComparer<K>,
{
    group_join_with(
        outer,
        inner,
        outer_key,
        inner_key,
        result,
        DefaultEquality,
        &SeqConfig::default(),
    )
}

/// Group join under a caller-supplied comparer.
pub fn group_join_with<O, I, K, C, OK, IK, R, Out>(
    outer: O,
    inner: I,
    outer_key: OK,
    inner_key: IK,
    result: R,
    comparer: C,
    config: &SeqConfig,
) -> Result<GroupJoin<O::IntoIter, K, I::Item, C, OK, R>>
where
    O: IntoIterator,
    I: IntoIterator,
    C: EqualityComparer<K>,
    OK: FnMut(&O::Item) -> Option<K>,
    IK: FnMut(&I::Item) -> Option<K>,
    R: FnMut(O::Item, &[I::Item]) -> Out,
{
    let lookup = index_inner(inner, inner_key, comparer, config)?;
    Ok(GroupJoin {
        outer: outer.into_iter(),
        lookup,
        outer_key,
        result,
    })
}

impl<O, K, T, C, OK, R> GroupJoin<O, K, T, C, OK, R> {
    /// The indexed inner side.
    pub fn inner(&self) -> &Lookup<K, T, C> {
        &self.lookup
    }
}

impl<O, K, T, C, OK, R, Out> Iterator for GroupJoin<O, K, T, C, OK, R>
where
    O: Iterator,
    C: EqualityComparer<K>,
    OK: FnMut(&O::Item) -> Option<K>,
    R: FnMut(O::Item, &[T]) -> Out,
{
    type Item = Out;

    fn next(&mut self) -> Option<Out> {
        let outer = self.outer.next()?;
        let matches = match (self.outer_key)(&outer) {
            Some(key) => self.lookup.get(&key),
            None => &[],
        };
        Some((self.result)(outer, matches))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.outer.size_hint()
    }
}

impl<O, K, T, C, OK, R, Out> ExactSizeIterator for GroupJoin<O, K, T, C, OK, R>
where
    O: ExactSizeIterator,
    C: EqualityComparer<K>,
    OK: FnMut(&O::Item) -> Option<K>,
    R: FnMut(O::Item, &[T]) -> Out,
{
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_outer_key_gets_empty_matches() {
        let outer = vec![Some("a"), None, Some("z")];
        let inner = vec![("a", 1), ("a", 2)];
        let out: Vec<usize> = group_join(outer, inner, |o| *o, |i| Some(i.0), |_, m| m.len())
            .unwrap()
            .collect();
        assert_eq!(out, vec![2, 0, 0]);
    }

    #[test]
    fn cardinality_matches_outer() {
        let j = group_join(0..10, vec![1, 1, 3], |o| Some(*o), |i| Some(*i), |o, m| (o, m.len()))
            .unwrap();
        assert_eq!(j.len(), 10);
    }
}
