//! Deduplication stage.

use super::Stream;
use crate::collection::{HashIndex, new_hash_index};
use crate::hash::HashFunction;

/// Stage dropping values whose hash code was already seen. Created by
/// [`Stream::distinct`] and [`Stream::distinct_by`].
///
/// Only the hash codes of emitted values are remembered, so memory grows with
/// the number of distinct values but no value is cloned.
pub struct DistinctStream<S: Stream> {
    upstream: S,
    hash_function: HashFunction<S::Value>,
    seen: HashIndex<()>,
}

impl<S: Stream> DistinctStream<S> {
    pub(super) fn new(upstream: S, hash_function: HashFunction<S::Value>) -> Self {
        Self {
            upstream,
            hash_function,
            seen: new_hash_index(),
        }
    }
}

impl<S: Stream> Stream for DistinctStream<S> {
    type Key = S::Key;
    type Value = S::Value;

    fn next_entry(&mut self) -> Option<(S::Key, S::Value)> {
        loop {
            let (key, value) = self.upstream.next_entry()?;
            if self.seen.insert(self.hash_function.apply(&value), ()).is_none() {
                return Some((key, value));
            }
            tracing::trace!("distinct stage skipped a repeated value");
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.upstream.size_hint().1)
    }
}

#[cfg(test)]
mod tests {
    use crate::hash::HashFunction;
    use crate::stream::{Stream, Streams};
    use rstest::rstest;
    use std::cell::Cell;
    use std::rc::Rc;

    #[rstest]
    fn test_distinct_keeps_first_occurrence_and_key() {
        let pairs = Streams::of(vec![3, 1, 3, 2, 1]).distinct().to_pairs();
        assert_eq!(pairs, vec![(0, 3), (1, 1), (3, 2)]);
    }

    #[rstest]
    fn test_distinct_separates_kinds() {
        let values = Streams::of(vec![1.0, 1.5, 1.0]).distinct().to_vec();
        assert_eq!(values, vec![1.0, 1.5]);
    }

    #[rstest]
    fn test_distinct_by_custom_hash() {
        let words = Streams::of(vec!["Apple", "apple", "Pear"])
            .distinct_by(HashFunction::new(|word: &&str| word.to_lowercase()))
            .to_vec();

        assert_eq!(words, vec!["Apple", "Pear"]);
    }

    #[rstest]
    fn test_distinct_hashes_each_value_once() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let values = Streams::of(vec![1, 2, 1, 3])
            .distinct_by(HashFunction::new(move |value: &i32| {
                counter.set(counter.get() + 1);
                *value
            }))
            .to_vec();

        assert_eq!(values, vec![1, 2, 3]);
        assert_eq!(calls.get(), 4);
    }

    #[rstest]
    fn test_distinct_separates_nested_options() {
        let values = Streams::of(vec![None, Some(None), Some(Some(0)), Some(None), None])
            .distinct()
            .to_vec();

        assert_eq!(values, vec![None, Some(None), Some(Some(0))]);
    }

    #[rstest]
    fn test_distinct_does_not_need_clone() {
        struct Ticket(u32);

        let tickets = Streams::of(vec![Ticket(1), Ticket(1), Ticket(2)])
            .distinct_by(HashFunction::new(|ticket: &Ticket| ticket.0))
            .count();

        assert_eq!(tickets, 2);
    }
}
