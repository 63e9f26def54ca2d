//! Lazy, single-pass pipelines of key/value entries.
//!
//! A [`Stream`] produces `(key, value)` entries on demand. Transformations
//! ([`map`](Stream::map), [`filter`](Stream::filter), [`distinct`](Stream::distinct),
//! [`sort`](Stream::sort), [`concat`](Stream::concat), [`flat_map`](Stream::flat_map),
//! [`limit`](Stream::limit)) consume a stream and return a new stage without
//! pulling anything; terminals ([`to_vec`](Stream::to_vec), [`reduce`](Stream::reduce),
//! [`collect`](Stream::collect), ...) drive the whole pipeline once.
//!
//! Stages are plain values: a pipeline is a nest of generic structs that the
//! compiler flattens, and it can be type-erased with [`Stream::boxed`] when it
//! has to be stored or returned from several branches.
//!
//! # Sources
//!
//! | Source                                  | Keys                  |
//! |-----------------------------------------|-----------------------|
//! | [`ArrayStream`] (`Vec<V>`)              | positions             |
//! | [`ArrayCombineStream`] (pairs, maps)    | given keys            |
//! | [`IteratorStream`] (any iterator)       | positions             |
//! | [`SingletonStream`]                     | `0`, or a given key   |
//! | [`EmptyStream`]                         | none                  |
//! | [`Streams::wrap`] ([`Source`])          | positions             |
//!
//! # Examples
//!
//! ```rust
//! use hashstream::stream::{Accumulators, Reindex, Stream, Streams};
//!
//! let total = Streams::of(vec![5, 3, 8, 3])
//!     .distinct()
//!     .sort(Reindex)
//!     .filter(|value, position| *position > 0 || *value > 4)
//!     .reduce(Accumulators::sum());
//!
//! assert_eq!(total, 13);
//! ```

mod accumulator;
mod collector;
mod concat;
mod distinct;
mod empty;
mod filter;
mod flat_map;
mod keys;
mod limit;
mod map;
mod singleton;
mod sort;
mod source;
mod streams;

pub use accumulator::{Accumulator, Accumulators, Folding, Max, Min, Product, Sum};
pub use collector::{Collector, GroupKeys, GroupingBy, IndexingBy, Joining};
pub use concat::ConcatStream;
pub use distinct::DistinctStream;
pub use empty::EmptyStream;
pub use filter::FilterStream;
pub use flat_map::FlatMapStream;
pub use keys::{KeyPolicy, PreserveKeys, Reindex};
pub use limit::LimitStream;
pub use map::{MapKeyStream, MapStream};
pub use singleton::SingletonStream;
pub use sort::{SortStream, natural_order};
pub use source::{ArrayCombineStream, ArrayStream, IteratorStream};
pub use streams::{Source, StreamSource, Streams, WrappedStream};

use std::cmp::Ordering;
use std::hash::Hash;

use indexmap::IndexMap;
use indexmap::map::Entry;
use serde::Serialize;

use crate::collection::NaturalOrder;
use crate::error::{CollectionError, Result};
use crate::hash::HashFunction;

/// A type-erased stream.
pub type BoxStream<'a, K, V> = Box<dyn Stream<Key = K, Value = V> + 'a>;

// =============================================================================
// Stream
// =============================================================================

/// A lazy, single-pass producer of `(key, value)` entries.
///
/// Only [`next_entry`](Stream::next_entry) has to be implemented; every
/// transformation and terminal is provided. Transformations take the stream
/// by value, so a stream is consumed by the pipeline built on top of it and
/// cannot be pulled twice.
///
/// Closures receive the value first and the key second, matching the order of
/// [`Stream::for_each`].
///
/// # Examples
///
/// ```rust
/// use hashstream::stream::{Stream, Streams};
///
/// let labels: Vec<String> = Streams::of(vec!["a", "b", "c"])
///     .filter(|_, position| position % 2 == 0)
///     .map(|value, position| format!("{position}:{value}"))
///     .to_vec();
///
/// assert_eq!(labels, vec!["0:a", "2:c"]);
/// ```
pub trait Stream {
    /// Key type of the entries.
    type Key;
    /// Value type of the entries.
    type Value;

    /// Pulls the next entry, or `None` once the stream is exhausted.
    fn next_entry(&mut self) -> Option<(Self::Key, Self::Value)>;

    /// Bounds on the number of remaining entries, as [`Iterator::size_hint`].
    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, None)
    }

    // =========================================================================
    // Transformations
    // =========================================================================

    /// Transforms every value with `transformer(value, &key)`; keys are kept.
    fn map<U, F>(self, transformer: F) -> MapStream<Self, F>
    where
        Self: Sized,
        F: FnMut(Self::Value, &Self::Key) -> U,
    {
        MapStream::new(self, transformer)
    }

    /// Replaces every key with `transformer(&value, key)`; values are kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hashstream::stream::{Stream, Streams};
    ///
    /// let map = Streams::of(vec!["apple", "kiwi"])
    ///     .map_key(|value, _| value.len())
    ///     .to_map();
    ///
    /// assert_eq!(map.get(&4), Some(&"kiwi"));
    /// ```
    fn map_key<K, F>(self, transformer: F) -> MapKeyStream<Self, F>
    where
        Self: Sized,
        F: FnMut(&Self::Value, Self::Key) -> K,
    {
        MapKeyStream::new(self, transformer)
    }

    /// Keeps the entries for which `predicate(&value, &key)` holds; keys are kept.
    fn filter<P>(self, predicate: P) -> FilterStream<Self, P>
    where
        Self: Sized,
        P: FnMut(&Self::Value, &Self::Key) -> bool,
    {
        FilterStream::new(self, predicate)
    }

    /// Drops every entry whose value has the structural hash of an earlier one.
    ///
    /// The first occurrence wins and keeps its key.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hashstream::stream::{Stream, Streams};
    ///
    /// let pairs = Streams::of(vec![vec![1], vec![2], vec![1]]).distinct().to_pairs();
    /// assert_eq!(pairs, vec![(0, vec![1]), (1, vec![2])]);
    /// ```
    fn distinct(self) -> DistinctStream<Self>
    where
        Self: Sized,
        Self::Value: Serialize,
    {
        DistinctStream::new(self, HashFunction::structural())
    }

    /// Like [`Stream::distinct`], with value identity given by `hash_function`.
    fn distinct_by(self, hash_function: HashFunction<Self::Value>) -> DistinctStream<Self>
    where
        Self: Sized,
    {
        DistinctStream::new(self, hash_function)
    }

    /// Sorts the values in natural order.
    ///
    /// Incomparable values (such as `NaN`) are treated as equal. The sort is
    /// stable. The whole upstream is buffered on the first pull.
    fn sort<P>(self, keys: P) -> SortStream<Self, NaturalOrder<Self::Value>, P>
    where
        Self: Sized,
        Self::Value: PartialOrd,
        P: KeyPolicy<Self::Key>,
    {
        let comparator: NaturalOrder<Self::Value> = natural_order::<Self::Value>;
        SortStream::new(self, comparator, keys)
    }

    /// Sorts the values with `comparator`; stable.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hashstream::stream::{PreserveKeys, Stream, Streams};
    ///
    /// let by_parity = Streams::of(vec![4, 5, 1, 8, 3])
    ///     .sort_by(|a, b| (a % 2).cmp(&(b % 2)), PreserveKeys)
    ///     .to_pairs();
    ///
    /// assert_eq!(by_parity, vec![(0, 4), (3, 8), (1, 5), (2, 1), (4, 3)]);
    /// ```
    fn sort_by<C, P>(self, comparator: C, keys: P) -> SortStream<Self, C, P>
    where
        Self: Sized,
        C: FnMut(&Self::Value, &Self::Value) -> Ordering,
        P: KeyPolicy<Self::Key>,
    {
        SortStream::new(self, comparator, keys)
    }

    /// Emits every entry of this stream, then every entry of `other`.
    fn concat<S, P>(self, other: S, keys: P) -> ConcatStream<Self, S::IntoStream, P>
    where
        Self: Sized,
        S: IntoStream<Key = Self::Key, Value = Self::Value>,
        P: KeyPolicy<Self::Key>,
    {
        ConcatStream::new(self, other.into_stream(), keys)
    }

    /// Replaces every entry with the entries of `transformer(value, &key)`.
    ///
    /// The transformer may return any [`IntoStream`]: a stream, a `Vec`, an
    /// `Option`, a collection.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hashstream::stream::{Reindex, Stream, Streams};
    ///
    /// let letters = Streams::of(vec!["ab", "", "c"])
    ///     .flat_map(|word, _| word.chars().collect::<Vec<_>>(), Reindex)
    ///     .to_pairs();
    ///
    /// assert_eq!(letters, vec![(0, 'a'), (1, 'b'), (2, 'c')]);
    /// ```
    fn flat_map<R, F, P>(self, transformer: F, keys: P) -> FlatMapStream<Self, F, R, P>
    where
        Self: Sized,
        F: FnMut(Self::Value, &Self::Key) -> R,
        R: IntoStream,
        P: KeyPolicy<R::Key>,
    {
        FlatMapStream::new(self, transformer, keys)
    }

    /// Skips `offset` entries, then emits at most `count`; keys are kept.
    ///
    /// The upstream is never pulled past the last emitted entry.
    fn limit(self, count: usize, offset: usize) -> LimitStream<Self>
    where
        Self: Sized,
    {
        LimitStream::new(self, Some(count), offset)
    }

    /// Skips `count` entries and emits the rest; keys are kept.
    fn skip(self, count: usize) -> LimitStream<Self>
    where
        Self: Sized,
    {
        LimitStream::new(self, None, count)
    }

    /// Erases the concrete type of this stream.
    fn boxed<'a>(self) -> BoxStream<'a, Self::Key, Self::Value>
    where
        Self: Sized + 'a,
    {
        Box::new(self)
    }

    // =========================================================================
    // Terminals
    // =========================================================================

    /// Adapts this stream into an [`Iterator`] of `(key, value)` entries.
    fn entries(self) -> Entries<Self>
    where
        Self: Sized,
    {
        Entries { stream: self }
    }

    /// Adapts this stream into an [`Iterator`] of values.
    fn values(self) -> Values<Self>
    where
        Self: Sized,
    {
        Values { stream: self }
    }

    /// Calls `consumer(value, key)` for every entry.
    fn for_each<F>(mut self, mut consumer: F)
    where
        Self: Sized,
        F: FnMut(Self::Value, Self::Key),
    {
        while let Some((key, value)) = self.next_entry() {
            consumer(value, key);
        }
    }

    /// Collects the values, dropping the keys.
    fn to_vec(self) -> Vec<Self::Value>
    where
        Self: Sized,
    {
        self.values().collect()
    }

    /// Collects the `(key, value)` entries, duplicates included.
    fn to_pairs(self) -> Vec<(Self::Key, Self::Value)>
    where
        Self: Sized,
    {
        self.entries().collect()
    }

    /// Collects the entries into a map keyed by the stream keys.
    ///
    /// On a duplicate key the later value wins and the first position is kept.
    fn to_map(self) -> IndexMap<Self::Key, Self::Value>
    where
        Self: Sized,
        Self::Key: Hash + Eq,
    {
        self.entries().collect()
    }

    /// Collects the entries into a map, failing on the first duplicate key.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidState`] naming the position of the
    /// first entry whose key was already emitted.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hashstream::stream::{Stream, Streams};
    ///
    /// let clash = Streams::of(vec!["a", "b"]).map_key(|_, _| 0).try_to_map();
    /// assert!(clash.is_err());
    /// ```
    fn try_to_map(mut self) -> Result<IndexMap<Self::Key, Self::Value>>
    where
        Self: Sized,
        Self::Key: Hash + Eq,
    {
        let mut map = IndexMap::new();
        let mut position = 0_usize;
        while let Some((key, value)) = self.next_entry() {
            match map.entry(key) {
                Entry::Occupied(_) => {
                    return Err(CollectionError::invalid_state(format!(
                        "duplicate key at position {position}"
                    )));
                }
                Entry::Vacant(entry) => {
                    entry.insert(value);
                }
            }
            position += 1;
        }
        Ok(map)
    }

    /// Returns the first value, or `None` if the stream is empty.
    fn first(mut self) -> Option<Self::Value>
    where
        Self: Sized,
    {
        self.next_entry().map(|(_, value)| value)
    }

    /// Folds the values with an [`Accumulator`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hashstream::stream::{Accumulators, Stream, Streams};
    ///
    /// assert_eq!(Streams::of(vec![2, 3, 4]).reduce(Accumulators::multiply()), 24);
    /// assert_eq!(Streams::of(Vec::<i32>::new()).reduce(Accumulators::max()), None);
    /// ```
    fn reduce<A>(mut self, mut accumulator: A) -> A::Carry
    where
        Self: Sized,
        A: Accumulator<Self::Value>,
    {
        let mut carry = accumulator.initial();
        while let Some((_, value)) = self.next_entry() {
            carry = accumulator.accumulate(carry, value);
        }
        carry
    }

    /// Folds the values with `function`, starting from `initial`.
    fn reduce_from<C, F>(self, initial: C, function: F) -> C
    where
        Self: Sized,
        F: FnMut(C, Self::Value) -> C,
    {
        self.values().fold(initial, function)
    }

    /// Feeds every entry to a [`Collector`] and returns its result.
    fn collect<C>(mut self, mut collector: C) -> C::Output
    where
        Self: Sized,
        C: Collector<Self::Key, Self::Value>,
    {
        while let Some((key, value)) = self.next_entry() {
            collector.aggregate(value, key);
        }
        collector.finalize()
    }

    /// Returns `true` if `predicate(&value, &key)` holds for every entry.
    ///
    /// Stops at the first failure; an empty stream matches.
    fn match_all<P>(mut self, mut predicate: P) -> bool
    where
        Self: Sized,
        P: FnMut(&Self::Value, &Self::Key) -> bool,
    {
        while let Some((key, value)) = self.next_entry() {
            if !predicate(&value, &key) {
                return false;
            }
        }
        true
    }

    /// Returns `true` if `predicate(&value, &key)` holds for some entry.
    ///
    /// Stops at the first match; an empty stream does not match.
    fn match_one<P>(mut self, mut predicate: P) -> bool
    where
        Self: Sized,
        P: FnMut(&Self::Value, &Self::Key) -> bool,
    {
        while let Some((key, value)) = self.next_entry() {
            if predicate(&value, &key) {
                return true;
            }
        }
        false
    }

    /// Counts the entries.
    fn count(mut self) -> usize
    where
        Self: Sized,
    {
        let mut count = 0;
        while self.next_entry().is_some() {
            count += 1;
        }
        count
    }
}

impl<S: Stream + ?Sized> Stream for Box<S> {
    type Key = S::Key;
    type Value = S::Value;

    #[inline]
    fn next_entry(&mut self) -> Option<(Self::Key, Self::Value)> {
        (**self).next_entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (**self).size_hint()
    }
}

// =============================================================================
// Iterator Adapters
// =============================================================================

/// Iterator over the `(key, value)` entries of a stream.
///
/// Created by [`Stream::entries`].
#[derive(Debug, Clone)]
pub struct Entries<S> {
    stream: S,
}

impl<S: Stream> Iterator for Entries<S> {
    type Item = (S::Key, S::Value);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.stream.next_entry()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}

/// Iterator over the values of a stream.
///
/// Created by [`Stream::values`].
#[derive(Debug, Clone)]
pub struct Values<S> {
    stream: S,
}

impl<S: Stream> Iterator for Values<S> {
    type Item = S::Value;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.stream.next_entry().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.stream.size_hint()
    }
}

// =============================================================================
// Conversions
// =============================================================================

/// Conversion into a [`Stream`].
///
/// Every stream converts into itself; vectors, options and the collections of
/// this crate convert into their natural stream. Stages that accept "another
/// stream" ([`Stream::concat`], [`Stream::flat_map`]) take an `IntoStream`.
pub trait IntoStream {
    /// Key type of the produced stream.
    type Key;
    /// Value type of the produced stream.
    type Value;
    /// The produced stream.
    type IntoStream: Stream<Key = Self::Key, Value = Self::Value>;

    /// Converts `self` into a stream.
    fn into_stream(self) -> Self::IntoStream;
}

impl<S: Stream> IntoStream for S {
    type Key = S::Key;
    type Value = S::Value;
    type IntoStream = S;

    #[inline]
    fn into_stream(self) -> S {
        self
    }
}

impl<V> IntoStream for Vec<V> {
    type Key = usize;
    type Value = V;
    type IntoStream = ArrayStream<V>;

    fn into_stream(self) -> Self::IntoStream {
        ArrayStream::new(self)
    }
}

/// `Some(value)` streams as a singleton keyed `0`; `None` as an empty stream.
impl<V> IntoStream for Option<V> {
    type Key = usize;
    type Value = V;
    type IntoStream = SingletonStream<usize, V>;

    fn into_stream(self) -> Self::IntoStream {
        SingletonStream::from_option(self)
    }
}

/// A value that can open a fresh stream over a snapshot of its content.
///
/// Unlike [`IntoStream`], `stream` borrows: the source stays usable and can be
/// streamed again.
pub trait Streamable {
    /// The produced stream.
    type Stream: Stream;

    /// Opens a stream over the current content.
    fn stream(&self) -> Self::Stream;
}

impl<T: Clone> Streamable for Option<T> {
    type Stream = SingletonStream<usize, T>;

    fn stream(&self) -> Self::Stream {
        SingletonStream::from_option(self.clone())
    }
}

impl<T: Clone> Streamable for Vec<T> {
    type Stream = ArrayStream<T>;

    fn stream(&self) -> Self::Stream {
        ArrayStream::new(self.clone())
    }
}

impl<T: Clone> Streamable for [T] {
    type Stream = ArrayStream<T>;

    fn stream(&self) -> Self::Stream {
        ArrayStream::new(self.to_vec())
    }
}
