//! Multi-valued grouping collector.
//!
//! [`GroupingBy`] buckets values under a key derived from each value. Scalar
//! keys group into an [`ArrayCollection`]; composite or [`Hashable`] keys group
//! into a [`HashTable`].

use std::hash::Hash;

use indexmap::IndexMap;
use serde::Serialize;

use super::Collector;
use crate::collection::{ArrayCollection, HashTable, Table};
use crate::hash::{HashFunction, Hashable};
use crate::stream::{PreserveKeys, Reindex};

/// How [`GroupingBy`] stores the entries of one group.
///
/// - [`Reindex`]: a `Vec` of values, in stream order
/// - [`PreserveKeys`]: an `IndexMap` from stream key to value; a repeated
///   stream key within one group keeps the later value
pub trait GroupKeys<K, V> {
    /// Storage of one group.
    type Group: Default;

    /// Adds an entry to `group`.
    fn insert(&self, group: &mut Self::Group, key: K, value: V);
}

impl<K, V> GroupKeys<K, V> for Reindex {
    type Group = Vec<V>;

    fn insert(&self, group: &mut Vec<V>, _key: K, value: V) {
        group.push(value);
    }
}

impl<K: Hash + Eq, V> GroupKeys<K, V> for PreserveKeys {
    type Group = IndexMap<K, V>;

    fn insert(&self, group: &mut IndexMap<K, V>, key: K, value: V) {
        group.insert(key, value);
    }
}

/// Groups the values of a stream under a key derived from each value.
///
/// Groups appear in the order of their first member; members keep stream
/// order. The groups are stored in any [`Table`]: an [`ArrayCollection`] for
/// ordinary keys ([`GroupingBy::scalar`]), a [`HashTable`] for keys of any
/// type ([`GroupingBy::hash`]).
///
/// # Examples
///
/// ```rust
/// use hashstream::stream::{GroupingBy, Reindex, Stream, Streams};
///
/// let by_length = Streams::of(vec!["kiwi", "fig", "pear", "yam"])
///     .collect(GroupingBy::scalar(|word: &&str| word.len(), Reindex));
///
/// assert_eq!(by_length.get(&3), Ok(&vec!["fig", "yam"]));
/// assert_eq!(by_length.keys().copied().collect::<Vec<_>>(), vec![4, 3]);
/// ```
#[derive(Debug, Clone)]
pub struct GroupingBy<F, T, P> {
    getter: F,
    keys: P,
    table: T,
}

impl<F, T, P> GroupingBy<F, T, P> {
    /// Groups into `table`, storing groups as `keys` dictates.
    pub const fn new(getter: F, keys: P, table: T) -> Self {
        Self {
            getter,
            keys,
            table,
        }
    }
}

impl<F, G, Group, P> GroupingBy<F, ArrayCollection<G, Group>, P> {
    /// Groups into an [`ArrayCollection`] keyed by the derived keys.
    pub fn scalar(getter: F, keys: P) -> Self {
        Self::new(getter, keys, ArrayCollection::new())
    }
}

impl<F, G, Group, P> GroupingBy<F, HashTable<G, Group>, P> {
    /// Groups into a [`HashTable`] whose keys are hashed structurally.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hashstream::stream::{GroupingBy, Reindex, Stream, Streams};
    ///
    /// let by_bounds = Streams::of(vec![vec![1, 9], vec![9, 1], vec![1, 9]])
    ///     .collect(GroupingBy::hash(|values: &Vec<i32>| (values[0], values[1]), Reindex));
    ///
    /// assert_eq!(by_bounds.len(), 2);
    /// assert_eq!(by_bounds.get(&(1, 9)).map(Vec::len), Ok(2));
    /// ```
    pub fn hash(getter: F, keys: P) -> Self
    where
        G: Serialize,
    {
        Self::new(getter, keys, HashTable::new())
    }

    /// Groups into a [`HashTable`] whose keys are hashed with [`Hashable::hash`].
    pub fn hashable(getter: F, keys: P) -> Self
    where
        G: Hashable,
    {
        Self::new(getter, keys, HashTable::hashable())
    }

    /// Groups into a [`HashTable`] whose keys are hashed with `hash_function`.
    pub fn hash_with(getter: F, keys: P, hash_function: HashFunction<G>) -> Self {
        Self::new(getter, keys, HashTable::with_hasher(hash_function))
    }
}

impl<K, V, F, G, T, P> Collector<K, V> for GroupingBy<F, T, P>
where
    F: FnMut(&V) -> G,
    P: GroupKeys<K, V>,
    T: Table<G, P::Group>,
{
    type Output = T;

    fn aggregate(&mut self, value: V, key: K) {
        let group_key = (self.getter)(&value);
        let group = self.table.get_or_insert_with(group_key, P::Group::default);
        self.keys.insert(group, key, value);
    }

    fn finalize(self) -> T {
        self.table
    }
}
