//! Hash joins built on the lookup.
//!
//! Both joins index the inner side once, when the join is constructed, and
//! then stream the outer side. Key selectors return `Option<K>`: `None` is an
//! absent key. Absent inner keys are never indexed, so they never match;
//! an absent outer key matches nothing.
//!
//! - [`Join`] (inner join) flattens: one result per (outer, matching inner).
//! - [`GroupJoin`] preserves the left side: exactly one result per outer
//!   element, paired with its matches (possibly none).

pub mod group;
pub mod inner;

pub use group::{group_join, group_join_with, GroupJoin};
pub use inner::{join, join_with, Join};

use seqops_core::comparer::EqualityComparer;
use seqops_core::config::SeqConfig;
use seqops_core::error::Result;
use seqops_lookup::{Lookup, LookupBuilder};

/// Index `inner` by `key`, dropping elements whose key is absent.
pub(crate) fn index_inner<T, K, C, I, F>(
    inner: I,
    mut key: F,
    comparer: C,
    config: &SeqConfig,
) -> Result<Lookup<K, T, C>>
where
    I: IntoIterator<Item = T>,
    F: FnMut(&T) -> Option<K>,
    C: EqualityComparer<K>,
{
    let mut builder = LookupBuilder::with_config(comparer, config)?;
    #[cfg_attr(not(feature = "tracing"), allow(unused_variables, unused_assignments))]
    let mut skipped = 0usize;
    for item in inner {
        match key(&item) {
            Some(k) => builder.push(k, item)?,
            None => skipped += 1,
        }
    }

    #[cfg(feature = "tracing")]
    tracing::debug!(keys = builder.len(), skipped, "join inner indexed");

    Ok(builder.finish())
}
