//! Value and key transformation stages.

use super::Stream;

/// Stage transforming values. Created by [`Stream::map`].
#[derive(Clone)]
pub struct MapStream<S, F> {
    upstream: S,
    transformer: F,
}

impl<S, F> MapStream<S, F> {
    pub(super) const fn new(upstream: S, transformer: F) -> Self {
        Self {
            upstream,
            transformer,
        }
    }
}

impl<S, F, U> Stream for MapStream<S, F>
where
    S: Stream,
    F: FnMut(S::Value, &S::Key) -> U,
{
    type Key = S::Key;
    type Value = U;

    #[inline]
    fn next_entry(&mut self) -> Option<(S::Key, U)> {
        let (key, value) = self.upstream.next_entry()?;
        let value = (self.transformer)(value, &key);
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}

/// Stage transforming keys. Created by [`Stream::map_key`].
#[derive(Clone)]
pub struct MapKeyStream<S, F> {
    upstream: S,
    transformer: F,
}

impl<S, F> MapKeyStream<S, F> {
    pub(super) const fn new(upstream: S, transformer: F) -> Self {
        Self {
            upstream,
            transformer,
        }
    }
}

impl<S, F, K> Stream for MapKeyStream<S, F>
where
    S: Stream,
    F: FnMut(&S::Value, S::Key) -> K,
{
    type Key = K;
    type Value = S::Value;

    #[inline]
    fn next_entry(&mut self) -> Option<(K, S::Value)> {
        let (key, value) = self.upstream.next_entry()?;
        let key = (self.transformer)(&value, key);
        Some((key, value))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.upstream.size_hint()
    }
}
