//! Streams over in-memory data and iterators.

use std::hash::Hash;
use std::vec;

use indexmap::IndexMap;

use super::Stream;
use crate::error::{CollectionError, Result};

// =============================================================================
// ArrayStream
// =============================================================================

/// Stream over the elements of a vector, keyed by position.
///
/// Cloning an `ArrayStream` before it is consumed yields an independent
/// stream over the same remaining elements.
///
/// # Examples
///
/// ```rust
/// use hashstream::stream::{ArrayStream, Stream};
///
/// let stream = ArrayStream::new(vec!['a', 'b']);
/// let again = stream.clone();
///
/// assert_eq!(stream.to_pairs(), vec![(0, 'a'), (1, 'b')]);
/// assert_eq!(again.count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ArrayStream<V> {
    values: vec::IntoIter<V>,
    position: usize,
}

impl<V> ArrayStream<V> {
    /// Creates a stream over `values`.
    #[must_use]
    pub fn new(values: Vec<V>) -> Self {
        Self {
            values: values.into_iter(),
            position: 0,
        }
    }
}

impl<V> From<Vec<V>> for ArrayStream<V> {
    fn from(values: Vec<V>) -> Self {
        Self::new(values)
    }
}

impl<V> Stream for ArrayStream<V> {
    type Key = usize;
    type Value = V;

    #[inline]
    fn next_entry(&mut self) -> Option<(usize, V)> {
        let value = self.values.next()?;
        let key = self.position;
        self.position += 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }

    fn to_vec(self) -> Vec<V> {
        self.values.collect()
    }

    fn count(self) -> usize {
        self.values.len()
    }
}

// =============================================================================
// ArrayCombineStream
// =============================================================================

/// Stream over explicit `(key, value)` entries.
///
/// Keys may be of any type and may repeat; they are emitted as given.
///
/// # Examples
///
/// ```rust
/// use hashstream::stream::{ArrayCombineStream, Stream};
///
/// let stream = ArrayCombineStream::new(vec![vec![1], vec![2]], vec!["one", "two"]).unwrap();
/// assert_eq!(stream.to_pairs(), vec![(vec![1], "one"), (vec![2], "two")]);
///
/// assert!(ArrayCombineStream::new(vec![1, 2], vec!["one"]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct ArrayCombineStream<K, V> {
    entries: vec::IntoIter<(K, V)>,
}

impl<K, V> ArrayCombineStream<K, V> {
    /// Pairs `keys[i]` with `values[i]`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidArgument`] when the two vectors differ
    /// in length.
    pub fn new(keys: Vec<K>, values: Vec<V>) -> Result<Self> {
        if keys.len() != values.len() {
            return Err(CollectionError::invalid_argument(format!(
                "{} keys cannot be combined with {} values",
                keys.len(),
                values.len()
            )));
        }
        Ok(Self::from_pairs(keys.into_iter().zip(values).collect()))
    }

    /// Creates a stream over `pairs`.
    #[must_use]
    pub fn from_pairs(pairs: Vec<(K, V)>) -> Self {
        Self {
            entries: pairs.into_iter(),
        }
    }
}

impl<K: Hash + Eq, V> From<IndexMap<K, V>> for ArrayCombineStream<K, V> {
    fn from(map: IndexMap<K, V>) -> Self {
        Self::from_pairs(map.into_iter().collect())
    }
}

impl<K, V> Stream for ArrayCombineStream<K, V> {
    type Key = K;
    type Value = V;

    #[inline]
    fn next_entry(&mut self) -> Option<(K, V)> {
        self.entries.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.entries.size_hint()
    }

    fn to_pairs(self) -> Vec<(K, V)> {
        self.entries.collect()
    }

    fn count(self) -> usize {
        self.entries.len()
    }
}

// =============================================================================
// IteratorStream
// =============================================================================

/// Stream over the items of an iterator, keyed by position.
///
/// The iterator is pulled one item per entry, so infinite iterators are fine
/// as long as the pipeline is bounded by [`Stream::limit`] or a
/// short-circuiting terminal.
///
/// # Examples
///
/// ```rust
/// use hashstream::stream::{IteratorStream, Stream};
///
/// let squares = IteratorStream::new((1..).map(|n| n * n)).limit(3, 1).to_vec();
/// assert_eq!(squares, vec![4, 9, 16]);
/// ```
#[derive(Debug, Clone)]
pub struct IteratorStream<I> {
    iterator: I,
    position: usize,
}

impl<I: Iterator> IteratorStream<I> {
    /// Creates a stream over `iterator`.
    pub fn new<T>(iterator: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            iterator: iterator.into_iter(),
            position: 0,
        }
    }
}

impl<I: Iterator> Stream for IteratorStream<I> {
    type Key = usize;
    type Value = I::Item;

    #[inline]
    fn next_entry(&mut self) -> Option<(usize, I::Item)> {
        let value = self.iterator.next()?;
        let key = self.position;
        self.position += 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.iterator.size_hint()
    }
}
