//! Insertion-ordered table keyed by ordinary `Hash + Eq` keys.
//!
//! [`ArrayCollection`] is the plain counterpart of
//! [`HashTable`](super::HashTable): keys are compared with `Eq` directly,
//! without a hash policy. With `usize` keys it also behaves as a list, where
//! [`ArrayCollection::push`] appends under the next free index.

use std::fmt;
use std::hash::Hash;
use std::iter::FromIterator;

use indexmap::IndexMap;

use super::{Collection, Table};
use crate::error::{CollectionError, Result};
use crate::stream::{ArrayCombineStream, IntoStream, Streamable};

/// An ordered key/value collection.
///
/// # Examples
///
/// ```rust
/// use hashstream::collection::ArrayCollection;
///
/// let mut collection = ArrayCollection::new();
/// collection.push("a")?;
/// collection.set(10, "b");
/// collection.push("c")?;
///
/// assert_eq!(collection.keys().copied().collect::<Vec<_>>(), vec![0, 10, 11]);
/// # Ok::<(), hashstream::error::CollectionError>(())
/// ```
pub struct ArrayCollection<K, V> {
    entries: IndexMap<K, V>,
    next_index: Option<usize>,
}

impl<K, V> ArrayCollection<K, V> {
    /// Creates an empty collection.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
            next_index: Some(0),
        }
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the collection has no entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.next_index = Some(0);
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> indexmap::map::Keys<'_, K, V> {
        self.entries.keys()
    }

    /// Returns an iterator over the values in insertion order.
    pub fn values(&self) -> indexmap::map::Values<'_, K, V> {
        self.entries.values()
    }

    /// Returns an iterator over `(key, value)` references in insertion order.
    pub fn iter(&self) -> indexmap::map::Iter<'_, K, V> {
        self.entries.iter()
    }

    /// Calls `consumer(value, key)` for every entry in insertion order.
    pub fn for_each<F>(&self, mut consumer: F)
    where
        F: FnMut(&V, &K),
    {
        for (key, value) in &self.entries {
            consumer(value, key);
        }
    }

    /// Returns the entries as `(key, value)` pairs.
    pub fn to_pairs(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.entries
            .iter()
            .map(|(key, value)| (key.clone(), value.clone()))
            .collect()
    }

    /// Returns a copy of the underlying map.
    pub fn to_map(&self) -> IndexMap<K, V>
    where
        K: Clone,
        V: Clone,
    {
        self.entries.clone()
    }

    /// Consumes the collection and returns the underlying map.
    pub fn into_map(self) -> IndexMap<K, V> {
        self.entries
    }

    /// Returns a stream over a snapshot of the entries.
    pub fn stream(&self) -> ArrayCombineStream<K, V>
    where
        K: Clone,
        V: Clone,
    {
        ArrayCombineStream::from_pairs(self.to_pairs())
    }
}

impl<K: Hash + Eq, V> ArrayCollection<K, V> {
    /// Inserts or overwrites the value stored under `key`.
    pub fn set(&mut self, key: K, value: V) {
        self.next_index = None;
        self.entries.insert(key, value);
    }

    /// Returns `true` if an entry exists for `key`.
    pub fn has_key(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    /// Removes the entry for `key`, returning whether it existed.
    pub fn unset(&mut self, key: &K) -> bool {
        self.entries.shift_remove(key).is_some()
    }

    /// Clears the collection and inserts every `(key, value)` pair.
    pub fn replace<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.clear();
        self.extend(pairs);
    }
}

impl<K: Hash + Eq + fmt::Debug, V> ArrayCollection<K, V> {
    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] when no entry exists.
    pub fn get(&self, key: &K) -> Result<&V> {
        self.entries
            .get(key)
            .ok_or_else(|| CollectionError::not_found(format!("{key:?}")))
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] when no entry exists.
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        self.entries
            .get_mut(key)
            .ok_or_else(|| CollectionError::not_found(format!("{key:?}")))
    }
}

impl<K, V: PartialEq> ArrayCollection<K, V> {
    /// Returns `true` if some entry holds `value`.
    pub fn contains(&self, value: &V) -> bool {
        self.entries.values().any(|stored| stored == value)
    }

    /// Removes the first entry holding `value`, returning whether one existed.
    pub fn remove(&mut self, value: &V) -> bool {
        match self.entries.values().position(|stored| stored == value) {
            Some(position) => {
                self.entries.shift_remove_index(position);
                true
            }
            None => false,
        }
    }
}

impl<V> ArrayCollection<usize, V> {
    /// Appends `value` under the next free index and returns that index.
    ///
    /// The next free index is one past the largest index in use.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidState`] when the largest index in use
    /// is `usize::MAX`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hashstream::collection::ArrayCollection;
    ///
    /// let mut list = ArrayCollection::new();
    /// assert_eq!(list.push('a'), Ok(0));
    /// assert_eq!(list.push('b'), Ok(1));
    /// ```
    pub fn push(&mut self, value: V) -> Result<usize> {
        let index = match self.next_index {
            Some(index) => index,
            None => match self.entries.keys().max() {
                Some(largest) => largest.checked_add(1).ok_or_else(|| {
                    CollectionError::invalid_state("no index left after usize::MAX")
                })?,
                None => 0,
            },
        };
        self.entries.insert(index, value);
        self.next_index = index.checked_add(1);
        Ok(index)
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K, V> Default for ArrayCollection<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for ArrayCollection<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            next_index: self.next_index,
        }
    }
}

impl<K: Hash + Eq, V> From<IndexMap<K, V>> for ArrayCollection<K, V> {
    fn from(entries: IndexMap<K, V>) -> Self {
        Self {
            entries,
            next_index: None,
        }
    }
}

impl<V> From<Vec<V>> for ArrayCollection<usize, V> {
    fn from(values: Vec<V>) -> Self {
        let next_index = Some(values.len());
        Self {
            entries: values.into_iter().enumerate().collect(),
            next_index,
        }
    }
}

impl<K: Hash + Eq, V> FromIterator<(K, V)> for ArrayCollection<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<IndexMap<K, V>>())
    }
}

impl<K: Hash + Eq, V> Extend<(K, V)> for ArrayCollection<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.next_index = None;
        self.entries.extend(iter);
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for ArrayCollection<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len()
            && self.entries.iter().zip(&other.entries).all(|(left, right)| left == right)
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for ArrayCollection<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.entries.iter()).finish()
    }
}

// =============================================================================
// Collection and Stream Integration
// =============================================================================

impl<V: PartialEq> Collection<V> for ArrayCollection<usize, V> {
    fn add(&mut self, element: V) -> Result<bool> {
        self.push(element).map(|_| true)
    }

    fn contains(&self, element: &V) -> bool {
        Self::contains(self, element)
    }

    fn remove(&mut self, element: &V) -> bool {
        Self::remove(self, element)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl<K: Hash + Eq + fmt::Debug, V> Table<K, V> for ArrayCollection<K, V> {
    fn set(&mut self, key: K, value: V) {
        Self::set(self, key, value);
    }

    fn get(&self, key: &K) -> Result<&V> {
        Self::get(self, key)
    }

    fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        Self::get_mut(self, key)
    }

    fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        if !self.entries.contains_key(&key) {
            self.next_index = None;
        }
        self.entries.entry(key).or_insert_with(default)
    }

    fn has_key(&self, key: &K) -> bool {
        Self::has_key(self, key)
    }

    fn unset(&mut self, key: &K) -> bool {
        Self::unset(self, key)
    }
}

impl<K: Clone, V: Clone> Streamable for ArrayCollection<K, V> {
    type Stream = ArrayCombineStream<K, V>;

    fn stream(&self) -> Self::Stream {
        Self::stream(self)
    }
}

impl<K, V> IntoStream for ArrayCollection<K, V> {
    type Key = K;
    type Value = V;
    type IntoStream = ArrayCombineStream<K, V>;

    fn into_stream(self) -> Self::IntoStream {
        ArrayCombineStream::from_pairs(self.entries.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn test_push_follows_largest_index() {
        let mut list: ArrayCollection<usize, &str> = ArrayCollection::new();
        list.set(4, "four");
        assert_eq!(list.push("five"), Ok(5));

        list.unset(&5);
        list.unset(&4);
        assert_eq!(list.push("again"), Ok(6));
    }

    #[rstest]
    fn test_push_after_bulk_insert_recomputes_index() {
        let mut list: ArrayCollection<usize, i32> = vec![(3, 30), (1, 10)].into_iter().collect();
        assert_eq!(list.push(40), Ok(4));
    }

    #[rstest]
    fn test_push_after_largest_index_fails() {
        let mut list: ArrayCollection<usize, u8> = ArrayCollection::new();
        list.set(usize::MAX, 1);

        assert_eq!(
            list.push(2),
            Err(CollectionError::invalid_state("no index left after usize::MAX"))
        );
        assert_eq!(list.len(), 1);
    }

    #[rstest]
    fn test_get_missing_key() {
        let collection: ArrayCollection<String, i32> = ArrayCollection::new();
        assert_eq!(
            collection.get(&"x".to_string()),
            Err(CollectionError::not_found("\"x\""))
        );
    }

    #[rstest]
    fn test_collection_add_appends() {
        let mut list = ArrayCollection::from(vec!['a']);
        assert_eq!(Collection::add_all(&mut list, vec!['b', 'c']), Ok(true));

        assert_eq!(list.values().copied().collect::<String>(), "abc");
        assert!(Collection::contains(&list, &'b'));
    }

    #[rstest]
    fn test_remove_by_value() {
        let mut list = ArrayCollection::from(vec![1, 2, 1]);
        assert!(list.remove(&1));
        assert_eq!(list.to_pairs(), vec![(1, 2), (2, 1)]);
    }
}
