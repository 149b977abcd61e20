//! A key plus the elements that share it.

use std::ops::Index;

use serde::Serialize;

/// Elements sharing one key, in source order.
///
/// Created by a lookup on the first occurrence of its key and only ever
/// appended to while the lookup is being built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Grouping<K, V> {
    key: K,
    elements: Vec<V>,
    #[serde(skip)]
    pub(crate) hash: u32,
}

impl<K, V> Grouping<K, V> {
    pub(crate) fn new(key: K, hash: u32) -> Self {
        Self {
            key,
            elements: Vec::new(),
            hash,
        }
    }

    #[inline]
    pub(crate) fn push(&mut self, value: V) {
        self.elements.push(value);
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn elements(&self) -> &[V] {
        &self.elements
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, V> {
        self.elements.iter()
    }

    pub fn into_parts(self) -> (K, Vec<V>) {
        (self.key, self.elements)
    }
}

impl<K, V> Index<usize> for Grouping<K, V> {
    type Output = V;

    fn index(&self, idx: usize) -> &V {
        &self.elements[idx]
    }
}

impl<K, V> IntoIterator for Grouping<K, V> {
    type Item = V;
    type IntoIter = std::vec::IntoIter<V>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.into_iter()
    }
}

impl<'a, K, V> IntoIterator for &'a Grouping<K, V> {
    type Item = &'a V;
    type IntoIter = std::slice::Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.elements.iter()
    }
}
