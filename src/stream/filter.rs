//! Filtering stage.

use super::Stream;

/// Stage keeping the entries that satisfy a predicate. Created by
/// [`Stream::filter`].
#[derive(Clone)]
pub struct FilterStream<S, P> {
    upstream: S,
    predicate: P,
}

impl<S, P> FilterStream<S, P> {
    pub(super) const fn new(upstream: S, predicate: P) -> Self {
        Self {
            upstream,
            predicate,
        }
    }
}

impl<S, P> Stream for FilterStream<S, P>
where
    S: Stream,
    P: FnMut(&S::Value, &S::Key) -> bool,
{
    type Key = S::Key;
    type Value = S::Value;

    fn next_entry(&mut self) -> Option<(S::Key, S::Value)> {
        loop {
            let (key, value) = self.upstream.next_entry()?;
            if (self.predicate)(&value, &key) {
                return Some((key, value));
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, self.upstream.size_hint().1)
    }
}

#[cfg(test)]
mod tests {
    use crate::stream::{Stream, Streams};
    use rstest::rstest;

    #[rstest]
    fn test_filter_preserves_keys() {
        let pairs = Streams::of(vec![1, 2, 3, 4])
            .filter(|value, _| value % 2 == 0)
            .to_pairs();

        assert_eq!(pairs, vec![(1, 2), (3, 4)]);
    }

    #[rstest]
    fn test_filter_can_reject_everything() {
        assert_eq!(Streams::of(vec![1, 2]).filter(|_, _| false).first(), None);
    }
}
