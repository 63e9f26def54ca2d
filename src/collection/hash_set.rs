//! Insertion-ordered set keyed by hash code.
//!
//! This module provides [`HashSet`], a set whose element identity is decided
//! by a [`HashFunction`] rather than by `Eq`. Any `serde::Serialize` value can
//! be stored with the structural policy, so vectors, maps and structs can be
//! deduplicated without implementing `Hash` or `Eq`.
//!
//! - O(1) average `add`, `contains`, `lookup`
//! - O(n) `remove` (insertion order is preserved)
//! - The first inserted representative of a hash code is the one kept
//!
//! # Examples
//!
//! ```rust
//! use hashstream::collection::HashSet;
//!
//! let mut set = HashSet::new();
//! assert!(set.add(vec![1, 2]));
//! assert!(!set.add(vec![1, 2]));
//! assert!(set.add(vec![2, 1]));
//!
//! assert_eq!(set.len(), 2);
//! assert!(set.contains(&vec![1, 2]));
//! ```

use std::fmt;
use std::iter::FromIterator;

use indexmap::map::Entry;
use serde::Serialize;

use super::{Collection, HashIndex, new_hash_index};
use crate::error::Result;
use crate::hash::{HashCode, HashFunction, Hashable};
use crate::stream::{ArrayStream, IntoStream, Streamable};

// =============================================================================
// HashSet Definition
// =============================================================================

/// A set of unique elements, identity given by a hash function.
///
/// # Time Complexity
///
/// | Operation         | Complexity |
/// |-------------------|------------|
/// | `add`             | O(1)*      |
/// | `contains`        | O(1)*      |
/// | `lookup`          | O(1)*      |
/// | `remove`          | O(n)       |
/// | `len`, `is_empty` | O(1)       |
///
/// \* average, plus the cost of computing the hash code.
///
/// # Examples
///
/// ```rust
/// use hashstream::collection::HashSet;
///
/// let mut by_length = HashSet::with_hash_function(|word: &&str| word.len());
/// by_length.add("apple");
/// by_length.add("mango");
///
/// assert_eq!(by_length.to_vec(), vec!["apple"]);
/// ```
pub struct HashSet<T> {
    elements: HashIndex<T>,
    hash_function: HashFunction<T>,
}

impl<T: Serialize> HashSet<T> {
    /// Creates an empty set using the structural hash policy.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hashstream::collection::HashSet;
    ///
    /// let set: HashSet<i32> = HashSet::new();
    /// assert!(set.is_empty());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(HashFunction::structural())
    }
}

impl<T: Hashable> HashSet<T> {
    /// Creates an empty set using each element's own [`Hashable::hash`].
    #[inline]
    #[must_use]
    pub fn hashable() -> Self {
        Self::with_hasher(HashFunction::hashable())
    }
}

impl<T> HashSet<T> {
    /// Creates an empty set hashing elements with `function`.
    pub fn with_hash_function<F, H>(function: F) -> Self
    where
        F: Fn(&T) -> H + 'static,
        H: Into<HashCode>,
    {
        Self::with_hasher(HashFunction::new(function))
    }

    /// Creates an empty set hashing elements with `hash_function`.
    #[must_use]
    pub fn with_hasher(hash_function: HashFunction<T>) -> Self {
        Self {
            elements: new_hash_index(),
            hash_function,
        }
    }

    /// Returns the hash policy of this set.
    #[inline]
    pub const fn hash_function(&self) -> &HashFunction<T> {
        &self.hash_function
    }

    /// Returns the number of elements in the set.
    #[inline]
    pub fn len(&self) -> usize {
        self.elements.len()
    }

    /// Returns `true` if the set contains no element.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Adds an element unless one with the same hash code is present.
    ///
    /// Returns `true` if the element was added. An existing element is never
    /// replaced.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hashstream::collection::HashSet;
    ///
    /// let mut set = HashSet::new();
    /// assert!(set.add("a"));
    /// assert!(!set.add("a"));
    /// ```
    pub fn add(&mut self, element: T) -> bool {
        match self.elements.entry(self.hash_function.apply(&element)) {
            Entry::Occupied(_) => false,
            Entry::Vacant(entry) => {
                entry.insert(element);
                true
            }
        }
    }

    /// Returns `true` if an element with the same hash code is present.
    pub fn contains(&self, element: &T) -> bool {
        self.elements
            .contains_key(&self.hash_function.apply(element))
    }

    /// Returns the stored element sharing `element`'s hash code.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hashstream::collection::HashSet;
    ///
    /// let mut set = HashSet::with_hash_function(|word: &String| word.to_lowercase());
    /// set.add("Hello".to_string());
    ///
    /// assert_eq!(set.lookup(&"HELLO".to_string()).map(String::as_str), Some("Hello"));
    /// ```
    pub fn lookup(&self, element: &T) -> Option<&T> {
        self.elements.get(&self.hash_function.apply(element))
    }

    /// Removes the element sharing `element`'s hash code.
    ///
    /// Returns `true` if an element was removed. The relative order of the
    /// remaining elements is preserved.
    pub fn remove(&mut self, element: &T) -> bool {
        self.elements
            .shift_remove(&self.hash_function.apply(element))
            .is_some()
    }

    /// Removes every element.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Returns an iterator over the elements in insertion order.
    pub fn iter(&self) -> HashSetIter<'_, T> {
        HashSetIter {
            inner: self.elements.values(),
        }
    }

    /// Calls `consumer` on every element in insertion order.
    pub fn for_each<F>(&self, consumer: F)
    where
        F: FnMut(&T),
    {
        self.iter().for_each(consumer);
    }

    /// Returns the elements in insertion order.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Consumes the set and returns its elements in insertion order.
    pub fn into_vec(self) -> Vec<T> {
        self.into_iter().collect()
    }

    /// Returns a stream over a snapshot of the elements.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hashstream::collection::HashSet;
    /// use hashstream::stream::Stream;
    ///
    /// let set: HashSet<i32> = vec![3, 1, 3].into_iter().collect();
    /// assert_eq!(set.stream().map(|value, _| value * 10).to_vec(), vec![30, 10]);
    /// ```
    pub fn stream(&self) -> ArrayStream<T>
    where
        T: Clone,
    {
        ArrayStream::new(self.to_vec())
    }
}

impl<T: PartialEq> HashSet<T> {
    /// Like [`HashSet::contains`], but the stored element must also equal `element`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hashstream::collection::HashSet;
    ///
    /// let mut set = HashSet::with_hash_function(|word: &&str| word.len());
    /// set.add("abc");
    ///
    /// assert!(set.contains(&"xyz"));
    /// assert!(!set.contains_strict(&"xyz"));
    /// assert!(set.contains_strict(&"abc"));
    /// ```
    pub fn contains_strict(&self, element: &T) -> bool {
        self.lookup(element).is_some_and(|stored| stored == element)
    }

    /// Like [`HashSet::remove`], but only removes an element equal to `element`.
    pub fn remove_strict(&mut self, element: &T) -> bool {
        if self.contains_strict(element) {
            self.remove(element)
        } else {
            false
        }
    }
}

// =============================================================================
// Iterator Implementations
// =============================================================================

/// Borrowing iterator over a [`HashSet`].
pub struct HashSetIter<'a, T> {
    inner: indexmap::map::Values<'a, HashCode, T>,
}

impl<'a, T> Iterator for HashSetIter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for HashSetIter<'_, T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

/// Owning iterator over a [`HashSet`].
pub struct HashSetIntoIter<T> {
    inner: indexmap::map::IntoValues<HashCode, T>,
}

impl<T> Iterator for HashSetIntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<T> ExactSizeIterator for HashSetIntoIter<T> {
    fn len(&self) -> usize {
        self.inner.len()
    }
}

// =============================================================================
// Standard Trait Implementations
// =============================================================================

impl<T: Serialize> Default for HashSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone> Clone for HashSet<T> {
    fn clone(&self) -> Self {
        Self {
            elements: self.elements.clone(),
            hash_function: self.hash_function.clone(),
        }
    }
}

impl<T: Serialize> FromIterator<T> for HashSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<T> Extend<T> for HashSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T> IntoIterator for HashSet<T> {
    type Item = T;
    type IntoIter = HashSetIntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        HashSetIntoIter {
            inner: self.elements.into_values(),
        }
    }
}

impl<'a, T> IntoIterator for &'a HashSet<T> {
    type Item = &'a T;
    type IntoIter = HashSetIter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Two sets are equal when they hold the same hash codes, in any order.
impl<T> PartialEq for HashSet<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .elements
                .keys()
                .all(|code| other.elements.contains_key(code))
    }
}

impl<T> Eq for HashSet<T> {}

impl<T: fmt::Debug> fmt::Debug for HashSet<T> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.debug_set().entries(self.iter()).finish()
    }
}

// =============================================================================
// Collection and Stream Integration
// =============================================================================

impl<T> Collection<T> for HashSet<T> {
    fn add(&mut self, element: T) -> Result<bool> {
        Ok(Self::add(self, element))
    }

    fn contains(&self, element: &T) -> bool {
        Self::contains(self, element)
    }

    fn remove(&mut self, element: &T) -> bool {
        Self::remove(self, element)
    }

    fn clear(&mut self) {
        Self::clear(self);
    }

    fn len(&self) -> usize {
        Self::len(self)
    }

    fn is_empty(&self) -> bool {
        Self::is_empty(self)
    }
}

impl<T: Clone> Streamable for HashSet<T> {
    type Stream = ArrayStream<T>;

    fn stream(&self) -> Self::Stream {
        Self::stream(self)
    }
}

impl<T> IntoStream for HashSet<T> {
    type Key = usize;
    type Value = T;
    type IntoStream = ArrayStream<T>;

    fn into_stream(self) -> Self::IntoStream {
        ArrayStream::new(self.into_vec())
    }
}

// The hash policy is reference counted without atomics.
static_assertions::assert_not_impl_any!(HashSet<i32>: Send, Sync);
