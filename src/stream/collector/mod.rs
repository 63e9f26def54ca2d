//! Collectors for [`Stream::collect`](super::Stream::collect).
//!
//! A [`Collector`] receives every entry of a stream, then turns what it
//! gathered into a result:
//!
//! - [`Joining`]: concatenates the values' `Display` output
//! - [`GroupingBy`]: groups values under a key derived from each value
//! - [`IndexingBy`]: indexes values by a key derived from each value

mod grouping_by;
mod indexing_by;
mod joining;

pub use grouping_by::{GroupKeys, GroupingBy};
pub use indexing_by::IndexingBy;
pub use joining::Joining;

/// Mutable reduction of a stream's entries.
///
/// # Examples
///
/// ```rust
/// use hashstream::stream::{Collector, Stream, Streams};
///
/// struct KeySum(usize);
///
/// impl<V> Collector<usize, V> for KeySum {
///     type Output = usize;
///
///     fn aggregate(&mut self, _value: V, key: usize) {
///         self.0 += key;
///     }
///
///     fn finalize(self) -> usize {
///         self.0
///     }
/// }
///
/// assert_eq!(Streams::of(vec!['a', 'b', 'c']).collect(KeySum(0)), 3);
/// ```
pub trait Collector<K, V> {
    /// The collected result.
    type Output;

    /// Receives one entry.
    fn aggregate(&mut self, value: V, key: K);

    /// Returns the collected result.
    fn finalize(self) -> Self::Output;
}
