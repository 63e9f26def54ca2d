//! Single-valued indexing collector.

use serde::Serialize;

use super::Collector;
use crate::collection::{ArrayCollection, HashTable, Table};
use crate::hash::{HashFunction, Hashable};

/// Indexes the values of a stream by a key derived from each value.
///
/// When two values share a derived key, the later one is kept.
///
/// # Examples
///
/// ```rust
/// use hashstream::stream::{IndexingBy, Stream, Streams};
///
/// let by_initial = Streams::of(vec!["apple", "banana", "avocado"])
///     .collect(IndexingBy::scalar(|word: &&str| word.chars().next()));
///
/// assert_eq!(by_initial.get(&Some('a')), Ok(&"avocado"));
/// assert_eq!(by_initial.len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct IndexingBy<F, T> {
    getter: F,
    table: T,
}

impl<F, T> IndexingBy<F, T> {
    /// Indexes into `table`.
    pub const fn new(getter: F, table: T) -> Self {
        Self { getter, table }
    }
}

impl<F, G, V> IndexingBy<F, ArrayCollection<G, V>> {
    /// Indexes into an [`ArrayCollection`] keyed by the derived keys.
    pub fn scalar(getter: F) -> Self {
        Self::new(getter, ArrayCollection::new())
    }
}

impl<F, G, V> IndexingBy<F, HashTable<G, V>> {
    /// Indexes into a [`HashTable`] whose keys are hashed structurally.
    pub fn hash(getter: F) -> Self
    where
        G: Serialize,
    {
        Self::new(getter, HashTable::new())
    }

    /// Indexes into a [`HashTable`] whose keys are hashed with [`Hashable::hash`].
    pub fn hashable(getter: F) -> Self
    where
        G: Hashable,
    {
        Self::new(getter, HashTable::hashable())
    }

    /// Indexes into a [`HashTable`] whose keys are hashed with `hash_function`.
    pub fn hash_with(getter: F, hash_function: HashFunction<G>) -> Self {
        Self::new(getter, HashTable::with_hasher(hash_function))
    }
}

impl<K, V, F, G, T> Collector<K, V> for IndexingBy<F, T>
where
    F: FnMut(&V) -> G,
    T: Table<G, V>,
{
    type Output = T;

    fn aggregate(&mut self, value: V, _key: K) {
        let index = (self.getter)(&value);
        self.table.set(index, value);
    }

    fn finalize(self) -> T {
        self.table
    }
}
