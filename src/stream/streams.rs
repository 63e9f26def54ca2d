//! Stream construction.
//!
//! [`Streams`] gathers the constructors of the source streams.
//! [`Streams::wrap`] normalizes a heterogeneous [`Source`] into one stream
//! type, [`WrappedStream`], keyed by position.

use std::fmt;

use super::{
    ArrayCombineStream, ArrayStream, BoxStream, EmptyStream, IntoStream, IteratorStream,
    SingletonStream, Stream, Streamable,
};

// =============================================================================
// Source
// =============================================================================

/// A value that can open a type-erased, position-keyed stream.
///
/// Implemented for every [`Streamable`] whose stream is keyed by `usize`.
pub trait StreamSource<'a, V> {
    /// Opens a stream over the current content.
    fn open(&self) -> BoxStream<'a, usize, V>;
}

impl<'a, T, V> StreamSource<'a, V> for T
where
    T: Streamable + ?Sized,
    T::Stream: Stream<Key = usize, Value = V> + 'a,
{
    fn open(&self) -> BoxStream<'a, usize, V> {
        Box::new(self.stream())
    }
}

/// Anything [`Streams::wrap`] accepts.
///
/// The variants are checked in declaration order, so an empty `Sequence` is
/// wrapped as an empty stream rather than as an array.
pub enum Source<'a, V> {
    /// An existing stream, returned as is.
    Stream(BoxStream<'a, usize, V>),
    /// A streamable value; its own stream is opened.
    Streamable(Box<dyn StreamSource<'a, V> + 'a>),
    /// Nothing.
    Empty,
    /// A sequence of values.
    Sequence(Vec<V>),
    /// A lazily pulled iterator.
    Iterable(Box<dyn Iterator<Item = V> + 'a>),
    /// A single value.
    Scalar(V),
}

impl<'a, V> Source<'a, V> {
    /// Wraps an existing stream.
    pub fn stream<S>(stream: S) -> Self
    where
        S: Stream<Key = usize, Value = V> + 'a,
    {
        Self::Stream(Box::new(stream))
    }

    /// Wraps a streamable value.
    pub fn streamable<T>(value: T) -> Self
    where
        T: StreamSource<'a, V> + 'a,
    {
        Self::Streamable(Box::new(value))
    }

    /// Wraps an iterator.
    pub fn iterable<I>(iterable: I) -> Self
    where
        I: IntoIterator<Item = V>,
        I::IntoIter: 'a,
    {
        Self::Iterable(Box::new(iterable.into_iter()))
    }
}

impl<V> From<Vec<V>> for Source<'_, V> {
    fn from(values: Vec<V>) -> Self {
        Self::Sequence(values)
    }
}

impl<V> From<Option<V>> for Source<'_, V> {
    fn from(value: Option<V>) -> Self {
        value.map_or(Self::Empty, Self::Scalar)
    }
}

impl<V> fmt::Debug for Source<'_, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            Self::Stream(_) => "Stream",
            Self::Streamable(_) => "Streamable",
            Self::Empty => "Empty",
            Self::Sequence(_) => "Sequence",
            Self::Iterable(_) => "Iterable",
            Self::Scalar(_) => "Scalar",
        };
        formatter.debug_tuple("Source").field(&variant).finish()
    }
}

impl<'a, V> IntoStream for Source<'a, V> {
    type Key = usize;
    type Value = V;
    type IntoStream = WrappedStream<'a, V>;

    fn into_stream(self) -> Self::IntoStream {
        Streams::wrap(self)
    }
}

// =============================================================================
// WrappedStream
// =============================================================================

/// The stream produced by [`Streams::wrap`].
pub enum WrappedStream<'a, V> {
    /// Wrapped `Empty` or empty `Sequence`.
    Empty(EmptyStream<usize, V>),
    /// Wrapped `Scalar`.
    Singleton(SingletonStream<usize, V>),
    /// Wrapped `Sequence`.
    Array(ArrayStream<V>),
    /// Wrapped `Iterable`.
    Iterator(IteratorStream<Box<dyn Iterator<Item = V> + 'a>>),
    /// Wrapped `Stream` or `Streamable`.
    Stream(BoxStream<'a, usize, V>),
}

impl<V> Stream for WrappedStream<'_, V> {
    type Key = usize;
    type Value = V;

    fn next_entry(&mut self) -> Option<(usize, V)> {
        match self {
            Self::Empty(stream) => stream.next_entry(),
            Self::Singleton(stream) => stream.next_entry(),
            Self::Array(stream) => stream.next_entry(),
            Self::Iterator(stream) => stream.next_entry(),
            Self::Stream(stream) => stream.next_entry(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            Self::Empty(stream) => stream.size_hint(),
            Self::Singleton(stream) => stream.size_hint(),
            Self::Array(stream) => stream.size_hint(),
            Self::Iterator(stream) => stream.size_hint(),
            Self::Stream(stream) => stream.size_hint(),
        }
    }
}

impl<V> fmt::Debug for WrappedStream<'_, V> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        let variant = match self {
            Self::Empty(_) => "Empty",
            Self::Singleton(_) => "Singleton",
            Self::Array(_) => "Array",
            Self::Iterator(_) => "Iterator",
            Self::Stream(_) => "Stream",
        };
        formatter.debug_tuple("WrappedStream").field(&variant).finish()
    }
}

// =============================================================================
// Streams
// =============================================================================

/// Constructors for source streams.
///
/// # Examples
///
/// ```rust
/// use hashstream::stream::{Source, Stream, Streams};
///
/// assert_eq!(Streams::wrap(Source::Scalar(7)).to_vec(), vec![7]);
/// assert_eq!(Streams::wrap(Source::from(vec![1, 2])).to_vec(), vec![1, 2]);
/// assert_eq!(Streams::wrap(Source::<i32>::Empty).count(), 0);
/// assert_eq!(Streams::wrap(Source::iterable(1..=3)).count(), 3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Streams;

impl Streams {
    /// Normalizes `source` into a stream keyed by position.
    ///
    /// | Source                    | Stream                            |
    /// |---------------------------|-----------------------------------|
    /// | `Stream`                  | the stream itself                 |
    /// | `Streamable`              | the value's own stream            |
    /// | `Empty`, empty `Sequence` | [`EmptyStream`]                   |
    /// | `Sequence`                | [`ArrayStream`]                   |
    /// | `Iterable`                | [`IteratorStream`]                |
    /// | `Scalar`                  | [`SingletonStream`]               |
    pub fn wrap<V>(source: Source<'_, V>) -> WrappedStream<'_, V> {
        match source {
            Source::Stream(stream) => WrappedStream::Stream(stream),
            Source::Streamable(streamable) => WrappedStream::Stream(streamable.open()),
            Source::Empty => WrappedStream::Empty(EmptyStream::new()),
            Source::Sequence(values) if values.is_empty() => {
                WrappedStream::Empty(EmptyStream::new())
            }
            Source::Sequence(values) => WrappedStream::Array(ArrayStream::new(values)),
            Source::Iterable(iterator) => WrappedStream::Iterator(IteratorStream::new(iterator)),
            Source::Scalar(value) => WrappedStream::Singleton(SingletonStream::new(value)),
        }
    }

    /// Returns an empty stream.
    #[must_use]
    pub const fn empty<K, V>() -> EmptyStream<K, V> {
        EmptyStream::new()
    }

    /// Returns a stream holding `value` under key `0`.
    #[must_use]
    pub const fn singleton<V>(value: V) -> SingletonStream<usize, V> {
        SingletonStream::new(value)
    }

    /// Returns a stream over `values`, keyed by position.
    #[must_use]
    pub fn of<V>(values: Vec<V>) -> ArrayStream<V> {
        ArrayStream::new(values)
    }

    /// Returns a stream pulling from `iterable`, keyed by position.
    pub fn iterate<I: IntoIterator>(iterable: I) -> IteratorStream<I::IntoIter> {
        IteratorStream::new(iterable)
    }

    /// Returns a stream over `(key, value)` pairs.
    pub fn entries<K, V, I>(pairs: I) -> ArrayCombineStream<K, V>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        ArrayCombineStream::from_pairs(pairs.into_iter().collect())
    }
}
