//! The stream with exactly one entry.

use std::cmp::Ordering;

use super::{KeyPolicy, Stream};

/// A stream holding at most one entry.
///
/// Transformations on a singleton are applied eagerly and return another
/// singleton, so no stage is built. A singleton that has been filtered out or
/// pulled behaves as an empty stream.
///
/// # Examples
///
/// ```rust
/// use hashstream::stream::{SingletonStream, Stream};
///
/// let doubled = SingletonStream::new(21).map(|value, _| value * 2);
/// assert_eq!(doubled.first(), Some(42));
///
/// let rejected = SingletonStream::new(21).filter(|value, _| *value > 100);
/// assert_eq!(rejected.first(), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SingletonStream<K, V> {
    entry: Option<(K, V)>,
}

impl<V> SingletonStream<usize, V> {
    /// Creates a singleton keyed `0`.
    #[must_use]
    pub const fn new(value: V) -> Self {
        Self {
            entry: Some((0, value)),
        }
    }

    /// Creates a singleton keyed `0` from `Some`, or an empty one from `None`.
    #[must_use]
    pub fn from_option(value: Option<V>) -> Self {
        Self {
            entry: value.map(|value| (0, value)),
        }
    }
}

impl<K, V> SingletonStream<K, V> {
    /// Creates a singleton with an explicit key.
    #[must_use]
    pub const fn with_key(key: K, value: V) -> Self {
        Self {
            entry: Some((key, value)),
        }
    }

    /// Returns `true` if the entry has not been filtered out or pulled.
    pub const fn is_present(&self) -> bool {
        self.entry.is_some()
    }

    /// Applies `transformer(value, &key)` now.
    pub fn map<U, F>(self, transformer: F) -> SingletonStream<K, U>
    where
        F: FnOnce(V, &K) -> U,
    {
        SingletonStream {
            entry: self.entry.map(|(key, value)| {
                let value = transformer(value, &key);
                (key, value)
            }),
        }
    }

    /// Applies `transformer(&value, key)` now.
    pub fn map_key<K2, F>(self, transformer: F) -> SingletonStream<K2, V>
    where
        F: FnOnce(&V, K) -> K2,
    {
        SingletonStream {
            entry: self
                .entry
                .map(|(key, value)| (transformer(&value, key), value)),
        }
    }

    /// Evaluates `predicate(&value, &key)` now, dropping the entry if it fails.
    #[must_use]
    pub fn filter<P>(self, predicate: P) -> Self
    where
        P: FnOnce(&V, &K) -> bool,
    {
        Self {
            entry: self.entry.filter(|(key, value)| predicate(value, key)),
        }
    }

    /// Returns `self`: one entry is always distinct.
    #[must_use]
    pub fn distinct(self) -> Self {
        self
    }

    /// Returns the entry re-keyed by the policy: one entry is always sorted.
    pub fn sort<P>(self, keys: P) -> SingletonStream<P::Key, V>
    where
        P: KeyPolicy<K>,
    {
        SingletonStream {
            entry: self.entry.map(|(key, value)| (keys.assign(key, 0), value)),
        }
    }

    /// Same as [`SingletonStream::sort`]; the comparator is never called.
    pub fn sort_by<C, P>(self, _comparator: C, keys: P) -> SingletonStream<P::Key, V>
    where
        C: FnMut(&V, &V) -> Ordering,
        P: KeyPolicy<K>,
    {
        self.sort(keys)
    }

    /// Keeps the entry only when `offset` is `0` and `count` is positive.
    #[must_use]
    pub fn limit(self, count: usize, offset: usize) -> Self {
        if count > 0 && offset == 0 {
            self
        } else {
            Self { entry: None }
        }
    }
}

impl<K, V> Stream for SingletonStream<K, V> {
    type Key = K;
    type Value = V;

    #[inline]
    fn next_entry(&mut self) -> Option<(K, V)> {
        self.entry.take()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::from(self.entry.is_some());
        (remaining, Some(remaining))
    }
}
