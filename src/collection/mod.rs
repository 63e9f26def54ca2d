//! Collections keyed by hash code, by plain key, or kept in sorted order.
//!
//! - [`HashSet`]: unique elements, identity given by a [`HashFunction`](crate::hash::HashFunction)
//! - [`HashTable`]: key/value entries, key identity given by a hash function
//! - [`ArrayCollection`]: key/value entries keyed by ordinary `Hash + Eq` keys
//! - [`OrderedCollection`]: elements kept sorted by a comparator
//!
//! All of them preserve insertion order (the ordered collection aside) and can
//! be turned into a [`Stream`](crate::stream::Stream) through
//! [`Streamable`](crate::stream::Streamable).
//!
//! Types wrapping one of them can forward [`Collection`] and [`Table`] with
//! [`delegate_collection!`](crate::delegate_collection) and
//! [`delegate_table!`](crate::delegate_table).

mod array_collection;
mod delegate;
mod hash_set;
mod hash_table;
mod ordered_collection;

pub use array_collection::ArrayCollection;
pub use hash_set::{HashSet, HashSetIntoIter, HashSetIter};
pub use hash_table::HashTable;
pub use ordered_collection::{LINEAR_SEARCH_THRESHOLD, NaturalOrder, OrderedCollection};

use indexmap::IndexMap;

use crate::error::Result;
use crate::hash::HashCode;

#[cfg(feature = "fxhash")]
pub(crate) type IndexBuildHasher = rustc_hash::FxBuildHasher;

#[cfg(all(feature = "ahash", not(feature = "fxhash")))]
pub(crate) type IndexBuildHasher = ahash::RandomState;

#[cfg(not(any(feature = "fxhash", feature = "ahash")))]
pub(crate) type IndexBuildHasher = std::collections::hash_map::RandomState;

/// Insertion-ordered index from hash code to entry.
pub(crate) type HashIndex<V> = IndexMap<HashCode, V, IndexBuildHasher>;

pub(crate) fn new_hash_index<V>() -> HashIndex<V> {
    IndexMap::with_hasher(IndexBuildHasher::default())
}

/// A mutable container of elements.
///
/// # Examples
///
/// ```rust
/// use hashstream::collection::{Collection, HashSet};
///
/// let mut set = HashSet::new();
/// assert_eq!(set.add_all(vec![1, 2, 2]), Ok(false));
/// assert_eq!(set.len(), 2);
/// ```
pub trait Collection<T> {
    /// Adds an element, returning whether the collection changed.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::UnsupportedOperation`](crate::error::CollectionError::UnsupportedOperation)
    /// when the collection cannot accept an element without a key.
    fn add(&mut self, element: T) -> Result<bool>;

    /// Adds every element, returning whether all of them were added.
    ///
    /// # Errors
    ///
    /// Stops at, and returns, the first error raised by [`Collection::add`].
    fn add_all<I>(&mut self, elements: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        let mut all_added = true;
        for element in elements {
            all_added = self.add(element)? && all_added;
        }
        Ok(all_added)
    }

    /// Clears the collection and adds every element.
    ///
    /// # Errors
    ///
    /// Same as [`Collection::add_all`].
    fn replace<I>(&mut self, elements: I) -> Result<bool>
    where
        I: IntoIterator<Item = T>,
        Self: Sized,
    {
        self.clear();
        self.add_all(elements)
    }

    /// Returns `true` if the collection holds `element`.
    fn contains(&self, element: &T) -> bool;

    /// Removes `element`, returning whether it was present.
    fn remove(&mut self, element: &T) -> bool;

    /// Removes every element.
    fn clear(&mut self);

    /// Returns the number of elements.
    fn len(&self) -> usize;

    /// Returns `true` if the collection holds no element.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A collection of values addressed by key.
///
/// # Examples
///
/// ```rust
/// use hashstream::collection::{HashTable, Table};
///
/// let mut table = HashTable::new();
/// table.set(vec![1, 2], "pair");
///
/// assert_eq!(table.get(&vec![1, 2]), Ok(&"pair"));
/// assert!(!table.has_key(&vec![2, 1]));
/// ```
pub trait Table<K, V> {
    /// Inserts or overwrites the value stored under `key`.
    fn set(&mut self, key: K, value: V);

    /// Returns the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`](crate::error::CollectionError::NotFound)
    /// when the key is absent.
    fn get(&self, key: &K) -> Result<&V>;

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`](crate::error::CollectionError::NotFound)
    /// when the key is absent.
    fn get_mut(&mut self, key: &K) -> Result<&mut V>;

    /// Returns the value under `key`, inserting `default()` first if absent.
    fn get_or_insert_with<F>(&mut self, key: K, default: F) -> &mut V
    where
        F: FnOnce() -> V;

    /// Returns `true` if an entry exists for `key`.
    fn has_key(&self, key: &K) -> bool;

    /// Removes the entry for `key`, returning whether it existed.
    fn unset(&mut self, key: &K) -> bool;
}
