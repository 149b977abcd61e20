//! Equality and order comparers.
//!
//! Lookups and joins take an [`EqualityComparer`] (hash + equality), sorting
//! takes an [`OrderComparer`]. Each has a "natural" default that defers to the
//! key type's own `Hash + Eq` / `Ord`, so callers only name a comparer when they
//! want something else (case-insensitive strings, float ordering, ...).
//!
//! Any `Fn(&K, &K) -> Ordering` closure is an order comparer.

use std::cmp::Ordering;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

/// Hash + equality over keys of type `K`.
///
/// Implementations must keep the usual contract: `equals(a, b)` implies
/// `hash(a) == hash(b)`.
pub trait EqualityComparer<K: ?Sized> {
    fn equals(&self, a: &K, b: &K) -> bool;
    fn hash(&self, key: &K) -> u64;
}

/// Total order over keys of type `K`.
pub trait OrderComparer<K: ?Sized> {
    fn compare(&self, a: &K, b: &K) -> Ordering;
}

impl<K: ?Sized, C: EqualityComparer<K> + ?Sized> EqualityComparer<K> for &C {
    fn equals(&self, a: &K, b: &K) -> bool {
        (**self).equals(a, b)
    }
    fn hash(&self, key: &K) -> u64 {
        (**self).hash(key)
    }
}

impl<K: ?Sized, F> OrderComparer<K> for F
where
    F: Fn(&K, &K) -> Ordering,
{
    fn compare(&self, a: &K, b: &K) -> Ordering {
        self(a, b)
    }
}

/// Sort direction of one level in an ordering chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn from_descending(descending: bool) -> Self {
        if descending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        }
    }

    /// Apply this direction to an ascending comparison result.
    #[inline]
    pub fn apply(self, ord: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    }
}

/// Defers to `Hash + Eq`. Hashing uses SipHash with fixed keys, so bucket
/// layout is reproducible across runs of the same binary.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultEquality;

impl<K: Hash + Eq + ?Sized> EqualityComparer<K> for DefaultEquality {
    #[inline]
    fn equals(&self, a: &K, b: &K) -> bool {
        a == b
    }

    #[inline]
    fn hash(&self, key: &K) -> u64 {
        let mut h = DefaultHasher::new();
        key.hash(&mut h);
        h.finish()
    }
}

/// Defers to `Ord`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NaturalOrder;

impl<K: Ord + ?Sized> OrderComparer<K> for NaturalOrder {
    #[inline]
    fn compare(&self, a: &K, b: &K) -> Ordering {
        a.cmp(b)
    }
}

/// Float ordering: numbers compare numerically, NaN sorts after every number
/// and equal to other NaNs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatOrder;

macro_rules! float_order {
    ($t:ty) => {
        impl OrderComparer<$t> for FloatOrder {
            fn compare(&self, a: &$t, b: &$t) -> Ordering {
                match (a.is_nan(), b.is_nan()) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
                }
            }
        }
    };
}

float_order!(f32);
float_order!(f64);

/// ASCII case-insensitive string comparer (both equality and order).
#[derive(Debug, Clone, Copy, Default)]
pub struct IgnoreAsciiCase;

impl EqualityComparer<str> for IgnoreAsciiCase {
    fn equals(&self, a: &str, b: &str) -> bool {
        a.eq_ignore_ascii_case(b)
    }

    fn hash(&self, key: &str) -> u64 {
        let mut h = DefaultHasher::new();
        for b in key.bytes() {
            h.write_u8(b.to_ascii_lowercase());
        }
        h.finish()
    }
}

impl EqualityComparer<String> for IgnoreAsciiCase {
    fn equals(&self, a: &String, b: &String) -> bool {
        <Self as EqualityComparer<str>>::equals(self, a, b)
    }

    fn hash(&self, key: &String) -> u64 {
        <Self as EqualityComparer<str>>::hash(self, key)
    }
}

impl OrderComparer<str> for IgnoreAsciiCase {
    fn compare(&self, a: &str, b: &str) -> Ordering {
        a.bytes()
            .map(|b| b.to_ascii_lowercase())
            .cmp(b.bytes().map(|b| b.to_ascii_lowercase()))
    }
}

impl OrderComparer<String> for IgnoreAsciiCase {
    fn compare(&self, a: &String, b: &String) -> Ordering {
        <Self as OrderComparer<str>>::compare(self, a, b)
    }
}

/// Lifts a comparer over `K` to `Option<K>`.
///
/// `None` is an ordinary key here: it hashes to 0, equals only `None`, and
/// orders before every `Some`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Nullable<C>(pub C);

impl<K, C: EqualityComparer<K>> EqualityComparer<Option<K>> for Nullable<C> {
    fn equals(&self, a: &Option<K>, b: &Option<K>) -> bool {
        match (a, b) {
            (None, None) => true,
            (Some(x), Some(y)) => self.0.equals(x, y),
            _ => false,
        }
    }

    fn hash(&self, key: &Option<K>) -> u64 {
        key.as_ref().map_or(0, |k| self.0.hash(k))
    }
}

impl<K, C: OrderComparer<K>> OrderComparer<Option<K>> for Nullable<C> {
    fn compare(&self, a: &Option<K>, b: &Option<K>) -> Ordering {
        match (a, b) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(x), Some(y)) => self.0.compare(x, y),
        }
    }
}
