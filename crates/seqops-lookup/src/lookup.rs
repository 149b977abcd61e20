//! Hash-chained lookup with first-occurrence iteration order.
//!
//! Layout:
//! - `groupings`: append-only arena; index order is first-occurrence order.
//! - `buckets[b]`: first grouping in bucket `b` (most recently created first).
//! - `next[id]`: the grouping after `id` in the same bucket.
//!
//! A grouping's bucket is `hash % buckets.len()` where `hash` is the comparer's
//! hash masked to 31 bits. The bucket array grows to `count * 2 + 1` once the
//! groupings outnumber it; growth only rewrites `buckets` and `next`.

use std::borrow::Borrow;

use seqops_core::comparer::{DefaultEquality, EqualityComparer};
use seqops_core::config::SeqConfig;
use seqops_core::error::{Error, Result};
use seqops_core::id::GroupingId;

use crate::grouping::Grouping;

const HASH_MASK: u64 = 0x7FFF_FFFF;

/// Read-only keyed multimap produced by [`LookupBuilder`] or [`Lookup::build`].
#[derive(Debug, Clone)]
pub struct Lookup<K, V, C = DefaultEquality> {
    groupings: Vec<Grouping<K, V>>,
    buckets: Vec<Option<GroupingId>>,
    next: Vec<Option<GroupingId>>,
    comparer: C,
    rehashes: usize,
}

impl<K, V> Lookup<K, V, DefaultEquality>
where
    DefaultEquality: EqualityComparer<K>,
{
    /// Group `source` by `key`, storing `element(item)` for each item.
    pub fn build<T, I, KF, EF>(source: I, key: KF, element: EF) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        KF: FnMut(&T) -> K,
        EF: FnMut(T) -> V,
    {
        Self::build_with(source, key, element, DefaultEquality, &SeqConfig::default())
    }
}

impl<K, V, C: EqualityComparer<K>> Lookup<K, V, C> {
    /// Group `source` under a caller-supplied comparer and config.
    ///
    /// Key and element selectors run once per item, in source order, before
    /// this returns.
    pub fn build_with<T, I, KF, EF>(
        source: I,
        mut key: KF,
        mut element: EF,
        comparer: C,
        config: &SeqConfig,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        KF: FnMut(&T) -> K,
        EF: FnMut(T) -> V,
    {
        let mut builder = LookupBuilder::with_config(comparer, config)?;
        for item in source {
            let k = key(&item);
            builder.push(k, element(item))?;
        }
        Ok(builder.finish())
    }

    fn empty(comparer: C, bucket_count: usize) -> Self {
        Self {
            groupings: Vec::new(),
            buckets: vec![None; bucket_count],
            next: Vec::new(),
            comparer,
            rehashes: 0,
        }
    }

    /// Append `value` under `key`, creating the grouping on first sight.
    fn insert(&mut self, key: K, value: V) -> Result<()> {
        let hash = self.hash_of::<K>(&key);
        let id = match self.find::<K>(&key, hash) {
            Some(id) => id,
            None => self.create(key, hash)?,
        };
        self.groupings[id.index()].push(value);
        Ok(())
    }

    fn create(&mut self, key: K, hash: u32) -> Result<GroupingId> {
        let id = GroupingId::new(self.groupings.len() as u64);
        let bucket = hash as usize % self.buckets.len();
        self.groupings.push(Grouping::new(key, hash));
        self.next.push(self.buckets[bucket]);
        self.buckets[bucket] = Some(id);

        if self.groupings.len() > self.buckets.len() {
            self.grow()?;
        }
        Ok(id)
    }

    /// Relink every grouping into a bucket array of `count * 2 + 1` slots.
    fn grow(&mut self) -> Result<()> {
        let count = self.groupings.len();
        let new_len = count
            .checked_mul(2)
            .and_then(|n| n.checked_add(1))
            .ok_or(Error::CapacityOverflow { groupings: count })?;

        #[cfg(feature = "tracing")]
        tracing::trace!(
            old_buckets = self.buckets.len(),
            new_buckets = new_len,
            groupings = count,
            "lookup rehash"
        );

        let mut buckets = vec![None; new_len];
        for (idx, g) in self.groupings.iter().enumerate() {
            let bucket = g.hash as usize % new_len;
            self.next[idx] = buckets[bucket];
            buckets[bucket] = Some(GroupingId::new(idx as u64));
        }
        self.buckets = buckets;
        self.rehashes += 1;
        Ok(())
    }
}

impl<K, V, C> Lookup<K, V, C> {
    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.groupings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groupings.is_empty()
    }

    /// Current bucket-array length.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// How many times the bucket array has been regrown.
    pub fn rehash_count(&self) -> usize {
        self.rehashes
    }

    pub fn comparer(&self) -> &C {
        &self.comparer
    }

    /// Groupings in first-occurrence order.
    pub fn iter(&self) -> std::slice::Iter<'_, Grouping<K, V>> {
        self.groupings.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.groupings.iter().map(Grouping::key)
    }

    /// Map every `(key, elements)` pair through `f`, in first-occurrence order.
    pub fn apply<'a, R, F>(&'a self, mut f: F) -> impl Iterator<Item = R> + 'a
    where
        F: FnMut(&'a K, &'a [V]) -> R + 'a,
    {
        self.groupings.iter().map(move |g| f(g.key(), g.elements()))
    }

    /// Consume the lookup, yielding owned groupings in first-occurrence order.
    pub fn into_groupings(self) -> std::vec::IntoIter<Grouping<K, V>> {
        self.groupings.into_iter()
    }
}

impl<K, V, C> Lookup<K, V, C> {
    /// Elements stored under `key`; empty when the key was never seen.
    ///
    /// `Q` follows the `Borrow` contract: the comparer must hash and compare a
    /// borrowed key exactly as it does the owned one.
    pub fn get<Q: ?Sized>(&self, key: &Q) -> &[V]
    where
        K: Borrow<Q>,
        C: EqualityComparer<Q>,
    {
        match self.grouping(key) {
            Some(g) => g.elements(),
            None => &[],
        }
    }

    pub fn grouping<Q: ?Sized>(&self, key: &Q) -> Option<&Grouping<K, V>>
    where
        K: Borrow<Q>,
        C: EqualityComparer<Q>,
    {
        self.find(key, self.hash_of(key))
            .map(|id| &self.groupings[id.index()])
    }

    #[inline]
    fn hash_of<Q: ?Sized>(&self, key: &Q) -> u32
    where
        C: EqualityComparer<Q>,
    {
        (EqualityComparer::<Q>::hash(&self.comparer, key) & HASH_MASK) as u32
    }

    fn find<Q: ?Sized>(&self, key: &Q, hash: u32) -> Option<GroupingId>
    where
        K: Borrow<Q>,
        C: EqualityComparer<Q>,
    {
        let mut cur = self.buckets[hash as usize % self.buckets.len()];
        while let Some(id) = cur {
            let g = &self.groupings[id.index()];
            if g.hash == hash
                && EqualityComparer::<Q>::equals(&self.comparer, Borrow::<Q>::borrow(g.key()), key)
            {
                return Some(id);
            }
            cur = self.next[id.index()];
        }
        None
    }

    /// Position of `key` in first-occurrence order.
    pub fn index_of<Q: ?Sized>(&self, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        C: EqualityComparer<Q>,
    {
        self.find(key, self.hash_of(key)).map(GroupingId::index)
    }

    /// Grouping at position `idx` in first-occurrence order.
    pub fn get_index(&self, idx: usize) -> Option<&Grouping<K, V>> {
        self.groupings.get(idx)
    }

    pub fn contains<Q: ?Sized>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        C: EqualityComparer<Q>,
    {
        self.grouping(key).is_some()
    }
}

impl<'a, K, V, C> IntoIterator for &'a Lookup<K, V, C> {
    type Item = &'a Grouping<K, V>;
    type IntoIter = std::slice::Iter<'a, Grouping<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groupings.iter()
    }
}

impl<K, V, C> IntoIterator for Lookup<K, V, C> {
    type Item = Grouping<K, V>;
    type IntoIter = std::vec::IntoIter<Grouping<K, V>>;

    fn into_iter(self) -> Self::IntoIter {
        self.groupings.into_iter()
    }
}

/// Incremental construction of a [`Lookup`].
///
/// Callers that need to keep some keys out of the lookup (joins drop absent
/// keys) filter before `push`; the builder itself accepts every key.
#[derive(Debug)]
pub struct LookupBuilder<K, V, C = DefaultEquality> {
    inner: Lookup<K, V, C>,
}

impl<K, V> LookupBuilder<K, V, DefaultEquality>
where
    DefaultEquality: EqualityComparer<K>,
{
    pub fn new() -> Self {
        Self {
            inner: Lookup::empty(DefaultEquality, SeqConfig::default().initial_bucket_count),
        }
    }
}

impl<K, V> Default for LookupBuilder<K, V, DefaultEquality>
where
    DefaultEquality: EqualityComparer<K>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, C: EqualityComparer<K>> LookupBuilder<K, V, C> {
    pub fn with_comparer(comparer: C) -> Self {
        Self {
            inner: Lookup::empty(comparer, SeqConfig::default().initial_bucket_count),
        }
    }

    pub fn with_config(comparer: C, config: &SeqConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            inner: Lookup::empty(comparer, config.initial_bucket_count),
        })
    }

    /// Append `value` to the grouping for `key`.
    ///
    /// Fails only if the bucket array would have to grow past `usize`.
    pub fn push(&mut self, key: K, value: V) -> Result<()> {
        self.inner.insert(key, value)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn finish(self) -> Lookup<K, V, C> {
        self.inner
    }
}
