//! Sorting stage.

use std::cmp::Ordering;
use std::vec;

use super::{KeyPolicy, Stream};

/// Compares two values by `PartialOrd`, treating incomparable values as equal.
///
/// # Examples
///
/// ```rust
/// use std::cmp::Ordering;
/// use hashstream::stream::natural_order;
///
/// assert_eq!(natural_order(&1, &2), Ordering::Less);
/// assert_eq!(natural_order(&f64::NAN, &1.0), Ordering::Equal);
/// ```
pub fn natural_order<T: PartialOrd + ?Sized>(left: &T, right: &T) -> Ordering {
    left.partial_cmp(right).unwrap_or(Ordering::Equal)
}

enum State<S: Stream, C, P: KeyPolicy<S::Key>> {
    Pending {
        upstream: S,
        comparator: C,
        keys: P,
    },
    Sorted(vec::IntoIter<(P::Key, S::Value)>),
}

/// Stage emitting the upstream values in sorted order. Created by
/// [`Stream::sort`] and [`Stream::sort_by`].
///
/// Nothing is pulled until the first entry is requested; the first pull
/// buffers and sorts the whole upstream. [`Stream::first`] only scans for the
/// smallest value and skips the sort.
pub struct SortStream<S: Stream, C, P: KeyPolicy<S::Key>> {
    state: Option<State<S, C, P>>,
}

impl<S, C, P> SortStream<S, C, P>
where
    S: Stream,
    C: FnMut(&S::Value, &S::Value) -> Ordering,
    P: KeyPolicy<S::Key>,
{
    pub(super) const fn new(upstream: S, comparator: C, keys: P) -> Self {
        Self {
            state: Some(State::Pending {
                upstream,
                comparator,
                keys,
            }),
        }
    }

    fn sorted(
        mut upstream: S,
        mut comparator: C,
        keys: &P,
    ) -> vec::IntoIter<(P::Key, S::Value)> {
        let mut buffer = Vec::new();
        while let Some(entry) = upstream.next_entry() {
            buffer.push(entry);
        }
        buffer.sort_by(|(_, left), (_, right)| comparator(left, right));
        tracing::trace!(entries = buffer.len(), "sort stage materialized its upstream");

        buffer
            .into_iter()
            .enumerate()
            .map(|(position, (key, value))| (keys.assign(key, position), value))
            .collect::<Vec<_>>()
            .into_iter()
    }
}

impl<S, C, P> Stream for SortStream<S, C, P>
where
    S: Stream,
    C: FnMut(&S::Value, &S::Value) -> Ordering,
    P: KeyPolicy<S::Key>,
{
    type Key = P::Key;
    type Value = S::Value;

    fn next_entry(&mut self) -> Option<(P::Key, S::Value)> {
        if let Some(State::Pending { .. }) = self.state {
            if let Some(State::Pending {
                upstream,
                comparator,
                keys,
            }) = self.state.take()
            {
                self.state = Some(State::Sorted(Self::sorted(upstream, comparator, &keys)));
            }
        }
        match &mut self.state {
            Some(State::Sorted(entries)) => entries.next(),
            _ => None,
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.state {
            Some(State::Pending { upstream, .. }) => upstream.size_hint(),
            Some(State::Sorted(entries)) => entries.size_hint(),
            None => (0, Some(0)),
        }
    }

    fn first(mut self) -> Option<S::Value> {
        match self.state.take() {
            Some(State::Pending {
                mut upstream,
                mut comparator,
                ..
            }) => {
                let mut smallest = upstream.next_entry()?.1;
                while let Some((_, value)) = upstream.next_entry() {
                    if comparator(&value, &smallest) == Ordering::Less {
                        smallest = value;
                    }
                }
                Some(smallest)
            }
            Some(State::Sorted(mut entries)) => entries.next().map(|(_, value)| value),
            None => None,
        }
    }
}
