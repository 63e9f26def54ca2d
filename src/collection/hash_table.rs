//! Insertion-ordered key/value table keyed by hash code.
//!
//! [`HashTable`] accepts any key type: the key is reduced to a [`HashCode`]
//! by the table's [`HashFunction`], and the original key is stored next to its
//! value so that it can be iterated, streamed and exported again.
//!
//! # Examples
//!
//! ```rust
//! use hashstream::collection::HashTable;
//!
//! let mut table = HashTable::new();
//! table.set((1, 2), "one-two");
//! table.set((2, 1), "two-one");
//! table.set((1, 2), "again");
//!
//! assert_eq!(table.len(), 2);
//! assert_eq!(table.get(&(1, 2)), Ok(&"again"));
//! assert_eq!(table.keys().collect::<Vec<_>>(), vec![&(1, 2), &(2, 1)]);
//! ```

use std::fmt;
use std::hash::Hash;
use std::iter::FromIterator;
use std::ops::Index;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;

use super::{Collection, HashIndex, Table, new_hash_index};
use crate::error::{CollectionError, Result};
use crate::hash::{HashCode, HashFunction, Hashable};
use crate::stream::{ArrayCombineStream, IntoStream, Streamable};

const TYPE_NAME: &str = "HashTable";

// =============================================================================
// HashTable Definition
// =============================================================================

/// A table of values whose keys are identified by a hash function.
///
/// Setting an existing key overwrites its value in place: the entry keeps its
/// position and the newly given key replaces the stored one.
///
/// # Examples
///
/// ```rust
/// use hashstream::collection::HashTable;
///
/// let mut table = HashTable::with_hash_function(|name: &String| name.to_lowercase());
/// table.set("Alice".to_string(), 1);
/// table.set("ALICE".to_string(), 2);
///
/// assert_eq!(table.to_pairs(), vec![("ALICE".to_string(), 2)]);
/// ```
pub struct HashTable<K, V> {
    entries: HashIndex<(K, V)>,
    hash_function: HashFunction<K>,
}

impl<K: Serialize, V> HashTable<K, V> {
    /// Creates an empty table using the structural hash policy for keys.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(HashFunction::structural())
    }
}

impl<K: Hashable, V> HashTable<K, V> {
    /// Creates an empty table hashing keys with their own [`Hashable::hash`].
    #[inline]
    #[must_use]
    pub fn hashable() -> Self {
        Self::with_hasher(HashFunction::hashable())
    }
}

impl<K, V> HashTable<K, V> {
    /// Creates an empty table hashing keys with `function`.
    pub fn with_hash_function<F, H>(function: F) -> Self
    where
        F: Fn(&K) -> H + 'static,
        H: Into<HashCode>,
    {
        Self::with_hasher(HashFunction::new(function))
    }

    /// Creates an empty table hashing keys with `hash_function`.
    #[must_use]
    pub fn with_hasher(hash_function: HashFunction<K>) -> Self {
        Self {
            entries: new_hash_index(),
            hash_function,
        }
    }

    /// Returns the key hash policy of this table.
    #[inline]
    pub const fn hash_function(&self) -> &HashFunction<K> {
        &self.hash_function
    }

    /// Returns the number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the table has no entry.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inserts `value` under `key`, overwriting any entry with the same hash code.
    pub fn set(&mut self, key: K, value: V) {
        match self.entries.entry(self.hash_function.apply(&key)) {
            Entry::Occupied(mut entry) => {
                *entry.get_mut() = (key, value);
            }
            Entry::Vacant(entry) => {
                entry.insert((key, value));
            }
        }
    }

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] carrying the key's hash code when
    /// no entry exists.
    pub fn get(&self, key: &K) -> Result<&V> {
        let code = self.hash_function.apply(key);
        match self.entries.get(&code) {
            Some((_, value)) => Ok(value),
            None => Err(CollectionError::not_found(code.into_string())),
        }
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] when no entry exists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hashstream::collection::HashTable;
    ///
    /// let mut table = HashTable::new();
    /// table.set("visits", 1);
    /// *table.get_mut(&"visits").unwrap() += 1;
    ///
    /// assert_eq!(table.get(&"visits"), Ok(&2));
    /// ```
    pub fn get_mut(&mut self, key: &K) -> Result<&mut V> {
        let code = self.hash_function.apply(key);
        match self.entries.get_mut(&code) {
            Some((_, value)) => Ok(value),
            None => Err(CollectionError::not_found(code.into_string())),
        }
    }

    /// Returns the value under `key`, inserting `default()` first if absent.
    pub fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V,
    {
        let entry = self
            .entries
            .entry(self.hash_function.apply(&key))
            .or_insert_with(|| (key, default()));
        &mut entry.1
    }

    /// Returns `true` if an entry exists for `key`.
    pub fn has_key(&self, key: &K) -> bool {
        self.entries.contains_key(&self.hash_function.apply(key))
    }

    /// Removes the entry for `key`, returning whether it existed.
    pub fn unset(&mut self, key: &K) -> bool {
        self.entries
            .shift_remove(&self.hash_function.apply(key))
            .is_some()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Clears the table and inserts every `(key, value)` pair.
    pub fn replace<I>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.clear();
        self.extend(pairs);
    }

    /// Returns an iterator over the keys in insertion order.
    pub fn keys(&self) -> impl ExactSizeIterator<Item = &K> + '_ {
        self.entries.values().map(|(key, _)| key)
    }

    /// Returns an iterator over the values in insertion order.
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> + '_ {
        self.entries.values().map(|(_, value)| value)
    }

    /// Returns an iterator over `(key, value)` references in insertion order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&K, &V)> + '_ {
        self.entries.values().map(|(key, value)| (key, value))
    }

    /// Calls `consumer(value, key)` for every entry in insertion order.
    pub fn for_each<F>(&self, mut consumer: F)
    where
        F: FnMut(&V, &K),
    {
        for (key, value) in self.entries.values() {
            consumer(value, key);
        }
    }

    /// Returns the entries as `(key, value)` pairs in insertion order.
    pub fn to_pairs(&self) -> Vec<(K, V)>
    where
        K: Clone,
        V: Clone,
    {
        self.entries.values().cloned().collect()
    }

    /// Consumes the table and returns its `(key, value)` pairs in insertion order.
    pub fn into_pairs(self) -> Vec<(K, V)> {
        self.entries.into_values().collect()
    }

    /// Returns the entries as a map keyed by the original keys.
    ///
    /// Keys that are distinct under the table's hash function but equal under
    /// `Eq` collapse into one entry: the later value wins and the earlier
    /// position is kept.
    pub fn to_map(&self) -> IndexMap<K, V>
    where
        K: Clone + Hash + Eq,
        V: Clone,
    {
        self.entries.values().cloned().collect()
    }

    /// Returns a stream over a snapshot of the entries, keyed by the original keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hashstream::collection::HashTable;
    /// use hashstream::stream::Stream;
    ///
    /// let mut table = HashTable::new();
    /// table.set("a", 1);
    /// table.set("b", 2);
    ///
    /// let keys: Vec<&str> = table.stream().map(|_, key| *key).to_vec();
    /// assert_eq!(keys, vec!["a", "b"]);
    /// ```
    pub fn stream(&self) -> ArrayCombineStream<K, V>
    where
        K: Clone,
        V: Clone,
    {
        ArrayCombineStream::from_pairs(self.to_pairs())
    }
}

impl<K, V: PartialEq> HashTable<K, V> {
    /// Returns `true` if some entry holds `value`.
    pub fn contains(&self, value: &V) -> bool {
        self.values().any(|stored| stored == value)
    }

    /// Removes the first entry holding `value`, returning whether one existed.
    pub fn remove(&mut self, value: &V) -> bool {
        match self.entries.values().position(|(_, stored)| stored == value) {
            Some(position) => {
                self.entries.shift_remove_index(position);
                true
            }
            None => false,
        }
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<K: Serialize, V> Default for HashTable<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Clone, V: Clone> Clone for HashTable<K, V> {
    fn clone(&self) -> Self {
        Self {
            entries: self.entries.clone(),
            hash_function: self.hash_function.clone(),
        }
    }
}

impl<K: Serialize, V> FromIterator<(K, V)> for HashTable<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut table = Self::new();
        table.extend(iter);
        table
    }
}

impl<K, V> Extend<(K, V)> for HashTable<K, V> {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.set(key, value);
        }
    }
}

/// # Panics
///
/// Indexing panics when the key is absent; use [`HashTable::get`] to handle it.
impl<K, V> Index<&K> for HashTable<K, V> {
    type Output = V;

    fn index(&self, key: &K) -> &V {
        match self.get(key) {
            Ok(value) => value,
            Err(error) => panic!("{error}"),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for HashTable<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_map().entries(self.iter()).finish()
    }
}

// =============================================================================
// Collection and Stream Integration
// =============================================================================

/// Tables only accept keyed insertion: `add`, `add_all` and `replace` fail.
impl<K, V: PartialEq> Collection<V> for HashTable<K, V> {
    fn add(&mut self, _element: V) -> Result<bool> {
        tracing::debug!(type_name = TYPE_NAME, "rejected insertion without a key");
        Err(CollectionError::unsupported(TYPE_NAME, "add"))
    }

    fn add_all<I>(&mut self, _elements: I) -> Result<bool>
    where
        I: IntoIterator<Item = V>,
    {
        tracing::debug!(type_name = TYPE_NAME, "rejected insertion without a key");
        Err(CollectionError::unsupported(TYPE_NAME, "add_all"))
    }

    fn replace<I>(&mut self, _elements: I) -> Result<bool>
    where
        I: IntoIterator<Item = V>,
    {
        Err(CollectionError::unsupported(TYPE_NAME, "replace without keys"))
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

impl<K, V> Table<K, V> for HashTable<K, V> {
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
        Self::get_or_insert_with(self, key, default)
    }

    fn has_key(&self, key: &K) -> bool {
        Self::has_key(self, key)
    }

    fn unset(&mut self, key: &K) -> bool {
        Self::unset(self, key)
    }
}

impl<K: Clone, V: Clone> Streamable for HashTable<K, V> {
    type Stream = ArrayCombineStream<K, V>;

    fn stream(&self) -> Self::Stream {
        Self::stream(self)
    }
}

impl<K, V> IntoStream for HashTable<K, V> {
    type Key = K;
    type Value = V;
    type IntoStream = ArrayCombineStream<K, V>;

    fn into_stream(self) -> Self::IntoStream {
        ArrayCombineStream::from_pairs(self.into_pairs())
    }
}

// The hash policy is reference counted without atomics.
static_assertions::assert_not_impl_any!(HashTable<i32, i32>: Send, Sync);
