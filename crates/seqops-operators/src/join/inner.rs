//! Inner join: one result per matching (outer, inner) pair.

use seqops_core::comparer::{DefaultEquality, EqualityComparer};
use seqops_core::config::SeqConfig;
use seqops_core::error::Result;
use seqops_lookup::Lookup;

use super::index_inner;

/// Streams outer elements against an indexed inner side.
///
/// Results follow outer order; the matches of one outer element follow inner
/// order.
pub struct Join<O: Iterator, K, T, C, OK, R> {
    outer: O,
    lookup: Lookup<K, T, C>,
    outer_key: OK,
    result: R,
    /// Current outer element, its grouping position, next match position.
    current: Option<(O::Item, usize, usize)>,
}

/// Inner join under `Hash + Eq` key equality.
pub fn join<O, I, K, OK, IK, R, Out>(
    outer: O,
    inner: I,
    outer_key: OK,
    inner_key: IK,
    result: R,
) -> Result<Join<O::IntoIter, K, I::Item, DefaultEquality, OK, R>>
where
    O: IntoIterator,
    I: IntoIterator,
    OK: FnMut(&O::Item) -> Option<K>,
    IK: FnMut(&I::Item) -> Option<K>,
    R: FnMut(&O::Item, &I::Item) -> Out,
    DefaultEquality: EqualityComparer<K>,
{
    join_with(
        outer,
        inner,
        outer_key,
        inner_key,
        result,
        DefaultEquality,
        &SeqConfig::default(),
    )
}

/// Inner join under a caller-supplied comparer.
pub fn join_with<O, I, K, C, OK, IK, R, Out>(
    outer: O,
    inner: I,
    outer_key: OK,
    inner_key: IK,
    result: R,
    comparer: C,
    config: &SeqConfig,
) -> Result<Join<O::IntoIter, K, I::Item, C, OK, R>>
where
    O: IntoIterator,
    I: IntoIterator,
    C: EqualityComparer<K>,
    OK: FnMut(&O::Item) -> Option<K>,
    IK: FnMut(&I::Item) -> Option<K>,
    R: FnMut(&O::Item, &I::Item) -> Out,
{
    let lookup = index_inner(inner, inner_key, comparer, config)?;
    Ok(Join {
        outer: outer.into_iter(),
        lookup,
        outer_key,
        result,
        current: None,
    })
}

impl<O, K, T, C, OK, R> Join<O, K, T, C, OK, R>
where
    O: Iterator,
{
    /// The indexed inner side.
    pub fn inner(&self) -> &Lookup<K, T, C> {
        &self.lookup
    }
}

impl<O, K, T, C, OK, R, Out> Iterator for Join<O, K, T, C, OK, R>
where
    O: Iterator,
    C: EqualityComparer<K>,
    OK: FnMut(&O::Item) -> Option<K>,
    R: FnMut(&O::Item, &T) -> Out,
{
    type Item = Out;

    fn next(&mut self) -> Option<Out> {
        loop {
            if let Some((outer, group, pos)) = &mut self.current {
                let matches = self
                    .lookup
                    .get_index(*group)
                    .map_or(&[][..], |g| g.elements());
                if let Some(inner) = matches.get(*pos) {
                    *pos += 1;
                    return Some((self.result)(outer, inner));
                }
                self.current = None;
            }

            let outer = self.outer.next()?;
            let Some(key) = (self.outer_key)(&outer) else {
                continue;
            };
            if let Some(group) = self.lookup.index_of(&key) {
                self.current = Some((outer, group, 0));
            }
        }
    }
}
