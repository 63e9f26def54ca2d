//! The stream with no entries.

use std::fmt;
use std::marker::PhantomData;

use super::{KeyPolicy, Stream};

/// A stream that never produces an entry.
///
/// Transformations on an `EmptyStream` short-circuit: they drop their
/// argument and return another `EmptyStream` instead of building a stage.
///
/// # Examples
///
/// ```rust
/// use hashstream::stream::{EmptyStream, Stream};
///
/// let empty: EmptyStream<usize, i32> = EmptyStream::new();
/// let mapped: EmptyStream<usize, String> = empty.map(|value, _| value.to_string());
///
/// assert!(mapped.to_vec().is_empty());
/// ```
pub struct EmptyStream<K, V> {
    marker: PhantomData<fn() -> (K, V)>,
}

static_assertions::assert_eq_size!(EmptyStream<usize, String>, ());

impl<K, V> EmptyStream<K, V> {
    /// Creates an empty stream.
    #[inline]
    #[must_use]
    pub const fn new() -> Self {
        Self {
            marker: PhantomData,
        }
    }

    /// Returns an empty stream of the mapped value type.
    #[inline]
    pub fn map<U, F>(self, _transformer: F) -> EmptyStream<K, U>
    where
        F: FnMut(V, &K) -> U,
    {
        EmptyStream::new()
    }

    /// Returns an empty stream of the mapped key type.
    #[inline]
    pub fn map_key<K2, F>(self, _transformer: F) -> EmptyStream<K2, V>
    where
        F: FnMut(&V, K) -> K2,
    {
        EmptyStream::new()
    }

    /// Returns `self`.
    #[inline]
    pub fn filter<P>(self, _predicate: P) -> Self
    where
        P: FnMut(&V, &K) -> bool,
    {
        self
    }

    /// Returns `self`.
    #[inline]
    #[must_use]
    pub const fn distinct(self) -> Self {
        self
    }

    /// Returns an empty stream keyed by the policy.
    #[inline]
    pub fn sort<P>(self, _keys: P) -> EmptyStream<P::Key, V>
    where
        P: KeyPolicy<K>,
    {
        EmptyStream::new()
    }

    /// Returns `self`.
    #[inline]
    #[must_use]
    pub const fn limit(self, _count: usize, _offset: usize) -> Self {
        self
    }

    /// Returns `self`.
    #[inline]
    #[must_use]
    pub const fn skip(self, _count: usize) -> Self {
        self
    }
}

impl<K, V> Stream for EmptyStream<K, V> {
    type Key = K;
    type Value = V;

    #[inline]
    fn next_entry(&mut self) -> Option<(K, V)> {
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(0))
    }
}

impl<K, V> Default for EmptyStream<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> Clone for EmptyStream<K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for EmptyStream<K, V> {}

impl<K, V> fmt::Debug for EmptyStream<K, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str("EmptyStream")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stream::{Accumulators, Reindex};
    use rstest::rstest;

    #[rstest]
    fn test_terminals() {
        let empty: EmptyStream<usize, i32> = EmptyStream::new();

        assert_eq!(empty.first(), None);
        assert_eq!(empty.reduce(Accumulators::sum()), 0);
        assert!(empty.match_all(|_, _| false));
        assert!(!empty.match_one(|_, _| true));
        assert!(empty.to_map().is_empty());
    }

    #[rstest]
    fn test_transformations_stay_empty() {
        let empty: EmptyStream<&str, i32> = EmptyStream::new();
        let sorted: EmptyStream<usize, i32> = empty.filter(|_, _| true).distinct().sort(Reindex);

        assert_eq!(sorted.count(), 0);
    }

    #[rstest]
    fn test_trait_stages_accept_empty() {
        let concatenated = EmptyStream::new().concat(vec![1, 2], crate::stream::PreserveKeys);
        assert_eq!(concatenated.to_pairs(), vec![(0, 1), (1, 2)]);
    }
}
