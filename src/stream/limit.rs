//! Offset and limit stage.

use super::Stream;

/// Stage skipping a number of entries, then emitting at most a number of
/// them. Created by [`Stream::limit`] and [`Stream::skip`].
///
/// Keys are kept. The upstream is not pulled once the limit is reached.
#[derive(Clone)]
pub struct LimitStream<S> {
    upstream: S,
    remaining: Option<usize>,
    offset: usize,
}

impl<S> LimitStream<S> {
    pub(super) const fn new(upstream: S, count: Option<usize>, offset: usize) -> Self {
        Self {
            upstream,
            remaining: count,
            offset,
        }
    }
}

impl<S: Stream> Stream for LimitStream<S> {
    type Key = S::Key;
    type Value = S::Value;

    fn next_entry(&mut self) -> Option<(S::Key, S::Value)> {
        if self.remaining == Some(0) {
            return None;
        }
        while self.offset > 0 {
            self.offset -= 1;
            self.upstream.next_entry()?;
        }
        let entry = self.upstream.next_entry()?;
        if let Some(remaining) = &mut self.remaining {
            *remaining -= 1;
        }
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let (lower, upper) = self.upstream.size_hint();
        let lower = lower.saturating_sub(self.offset);
        let upper = upper.map(|upper| upper.saturating_sub(self.offset));
        match self.remaining {
            Some(remaining) => (
                lower.min(remaining),
                Some(upper.map_or(remaining, |upper| upper.min(remaining))),
            ),
            None => (lower, upper),
        }
    }
}
