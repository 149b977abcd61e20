//! Grouping operators: thin wrappers that build a lookup and hand it back.
//!
//! Grouping is eager. The whole source is consumed when the operator is
//! called; the returned iterator only walks finished groupings.

use seqops_core::comparer::{DefaultEquality, EqualityComparer};
use seqops_core::config::SeqConfig;
use seqops_core::error::Result;
use seqops_lookup::{Grouping, Lookup};

/// Owned groupings in first-occurrence order.
pub type Groups<K, V> = std::vec::IntoIter<Grouping<K, V>>;

/// Build a lookup of `element(item)` keyed by `key(item)`.
pub fn to_lookup<T, I, K, V, KF, EF>(source: I, key: KF, element: EF) -> Result<Lookup<K, V>>
where
    I: IntoIterator<Item = T>,
    KF: FnMut(&T) -> K,
    EF: FnMut(T) -> V,
    DefaultEquality: EqualityComparer<K>,
{
    Lookup::build(source, key, element)
}

pub fn to_lookup_with<T, I, K, V, C, KF, EF>(
    source: I,
    key: KF,
    element: EF,
    comparer: C,
    config: &SeqConfig,
) -> Result<Lookup<K, V, C>>
where
    I: IntoIterator<Item = T>,
    C: EqualityComparer<K>,
    KF: FnMut(&T) -> K,
    EF: FnMut(T) -> V,
{
    Lookup::build_with(source, key, element, comparer, config)
}

/// Group `source` by key; each grouping holds the projected elements.
pub fn group_by<T, I, K, V, KF, EF>(source: I, key: KF, element: EF) -> Result<Groups<K, V>>
where
    I: IntoIterator<Item = T>,
    KF: FnMut(&T) -> K,
    EF: FnMut(T) -> V,
    DefaultEquality: EqualityComparer<K>,
{
    Ok(to_lookup(source, key, element)?.into_groupings())
}

/// Group under `comparer`, then map each `(key, elements)` through `result`.
pub fn group_by_with<T, I, K, V, C, KF, EF, R, Out>(
    source: I,
    key: KF,
    element: EF,
    mut result: R,
    comparer: C,
    config: &SeqConfig,
) -> Result<impl Iterator<Item = Out>>
where
    I: IntoIterator<Item = T>,
    C: EqualityComparer<K>,
    KF: FnMut(&T) -> K,
    EF: FnMut(T) -> V,
    R: FnMut(K, Vec<V>) -> Out,
{
    let lookup = Lookup::build_with(source, key, element, comparer, config)?;
    Ok(lookup.into_groupings().map(move |g| {
        let (k, vs) = g.into_parts();
        result(k, vs)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqops_core::comparer::IgnoreAsciiCase;

    #[test]
    fn fruits_by_first_letter() {
        let fruits = ["apple", "banana", "avocado", "blueberry", "cherry"];
        let groups: Vec<(char, Vec<&str>)> = group_by(fruits, |f| f.as_bytes()[0] as char, |f| f)
            .unwrap()
            .map(Grouping::into_parts)
            .collect();
        assert_eq!(
            groups,
            vec![
                ('a', vec!["apple", "avocado"]),
                ('b', vec!["banana", "blueberry"]),
                ('c', vec!["cherry"]),
            ]
        );
    }

    #[test]
    fn result_selector_sees_each_group_once() {
        let counts: Vec<String> = group_by_with(
            vec!["Dev", "HR", "dev", "DEV"],
            |s| s.to_string(),
            |s| s,
            |k, vs| format!("{}={}", k, vs.len()),
            IgnoreAsciiCase,
            &SeqConfig::default(),
        )
        .unwrap()
        .collect();
        assert_eq!(counts, vec!["Dev=3", "HR=1"]);
    }

    #[test]
    fn empty_source_has_no_groups() {
        let mut groups = group_by(Vec::<u8>::new(), |b| *b, |b| b).unwrap();
        assert!(groups.next().is_none());
    }
}
