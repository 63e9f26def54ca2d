//! Flattening stage.

use super::{IntoStream, KeyPolicy, Stream};

/// Stage replacing each upstream entry with the entries of a derived stream.
/// Created by [`Stream::flat_map`].
///
/// The derived stream of an upstream entry is opened only when the previous
/// one is exhausted.
pub struct FlatMapStream<S, F, R: IntoStream, P> {
    upstream: S,
    transformer: F,
    current: Option<R::IntoStream>,
    keys: P,
    position: usize,
}

impl<S, F, R: IntoStream, P> FlatMapStream<S, F, R, P> {
    pub(super) const fn new(upstream: S, transformer: F, keys: P) -> Self {
        Self {
            upstream,
            transformer,
            current: None,
            keys,
            position: 0,
        }
    }
}

impl<S, F, R, P> Stream for FlatMapStream<S, F, R, P>
where
    S: Stream,
    F: FnMut(S::Value, &S::Key) -> R,
    R: IntoStream,
    P: KeyPolicy<R::Key>,
{
    type Key = P::Key;
    type Value = R::Value;

    fn next_entry(&mut self) -> Option<(P::Key, R::Value)> {
        loop {
            if let Some(current) = &mut self.current {
                if let Some((key, value)) = current.next_entry() {
                    let key = self.keys.assign(key, self.position);
                    self.position += 1;
                    return Some((key, value));
                }
                self.current = None;
            }
            let (key, value) = self.upstream.next_entry()?;
            self.current = Some((self.transformer)(value, &key).into_stream());
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::stream::{PreserveKeys, Reindex, SingletonStream, Stream, Streams};
    use rstest::rstest;

    #[rstest]
    fn test_flat_map_preserving_inner_keys() {
        let pairs = Streams::of(vec![vec![1, 2], vec![3]])
            .flat_map(|values, _| values, PreserveKeys)
            .to_pairs();

        assert_eq!(pairs, vec![(0, 1), (1, 2), (0, 3)]);
    }

    #[rstest]
    fn test_flat_map_over_options() {
        let halves = Streams::of(vec![1, 2, 3, 4])
            .flat_map(|value, _| (value % 2 == 0).then_some(value / 2), Reindex)
            .to_pairs();

        assert_eq!(halves, vec![(0, 1), (1, 2)]);
    }

    #[rstest]
    fn test_flat_map_into_streams() {
        let tagged = Streams::of(vec!["a", "b"])
            .flat_map(|value, key| SingletonStream::with_key(value, *key), PreserveKeys)
            .to_pairs();

        assert_eq!(tagged, vec![("a", 0), ("b", 1)]);
    }

    #[rstest]
    fn test_flat_map_is_lazy() {
        let mut opened = 0;
        let first = Streams::of(vec![1, 2, 3])
            .flat_map(
                |value, _| {
                    opened += 1;
                    vec![value; 2]
                },
                Reindex,
            )
            .first();

        assert_eq!(first, Some(1));
        assert_eq!(opened, 1);
    }
}
