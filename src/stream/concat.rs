//! Concatenation stage.

use super::{KeyPolicy, Stream};

/// Stage emitting every entry of a first stream, then every entry of a
/// second one. Created by [`Stream::concat`].
///
/// Under [`Reindex`](super::Reindex) the output is keyed `0..` across both
/// streams; under [`PreserveKeys`](super::PreserveKeys) duplicate keys may be
/// emitted.
///
/// # Examples
///
/// ```rust
/// use hashstream::stream::{Reindex, Stream, Streams};
///
/// let pairs = Streams::of(vec!['a', 'b'])
///     .concat(vec!['c'], Reindex)
///     .to_pairs();
///
/// assert_eq!(pairs, vec![(0, 'a'), (1, 'b'), (2, 'c')]);
/// ```
#[derive(Clone)]
pub struct ConcatStream<A, B, P> {
    first: Option<A>,
    second: B,
    keys: P,
    position: usize,
}

impl<A, B, P> ConcatStream<A, B, P> {
    pub(super) const fn new(first: A, second: B, keys: P) -> Self {
        Self {
            first: Some(first),
            second,
            keys,
            position: 0,
        }
    }
}

impl<A, B, P> Stream for ConcatStream<A, B, P>
where
    A: Stream,
    B: Stream<Key = A::Key, Value = A::Value>,
    P: KeyPolicy<A::Key>,
{
    type Key = P::Key;
    type Value = A::Value;

    fn next_entry(&mut self) -> Option<(P::Key, A::Value)> {
        let mut entry = None;
        if let Some(first) = &mut self.first {
            entry = first.next_entry();
            if entry.is_none() {
                self.first = None;
            }
        }
        let (key, value) = match entry {
            Some(entry) => entry,
            None => self.second.next_entry()?,
        };
        let key = self.keys.assign(key, self.position);
        self.position += 1;
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (second_lower, second_upper) = self.second.size_hint();
        match &self.first {
            Some(first) => {
                let (first_lower, first_upper) = first.size_hint();
                let upper = match (first_upper, second_upper) {
                    (Some(left), Some(right)) => left.checked_add(right),
                    _ => None,
                };
                (first_lower.saturating_add(second_lower), upper)
            }
            None => (second_lower, second_upper),
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::stream::{PreserveKeys, Reindex, Stream, Streams};
    use rstest::rstest;

    #[rstest]
    fn test_preserve_keys_allows_duplicates() {
        let pairs = Streams::of(vec![1, 2]).concat(vec![3], PreserveKeys).to_pairs();
        assert_eq!(pairs, vec![(0, 1), (1, 2), (0, 3)]);
    }

    #[rstest]
    fn test_empty_sides() {
        let left_empty = Streams::of(Vec::<i32>::new()).concat(vec![1], Reindex).to_vec();
        let right_empty = Streams::of(vec![1]).concat(Vec::new(), Reindex).to_vec();

        assert_eq!(left_empty, vec![1]);
        assert_eq!(right_empty, vec![1]);
    }

    #[rstest]
    fn test_chained_concat_counts() {
        let count = Streams::of(vec![1])
            .concat(vec![2], Reindex)
            .concat(Streams::of(vec![3]), Reindex)
            .count();

        assert_eq!(count, 3);
    }
}
