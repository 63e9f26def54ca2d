//! Integration tests for the concat stage.

use hashstream::stream::{PreserveKeys, Reindex, Stream, Streams};
use rstest::rstest;

#[rstest]
fn test_concat_reindexes_across_both_streams() {
    let pairs = Streams::of(vec!['a', 'b'])
        .concat(Streams::of(vec!['c', 'd']), Reindex)
        .to_pairs();

    assert_eq!(pairs, vec![(0, 'a'), (1, 'b'), (2, 'c'), (3, 'd')]);
}

#[rstest]
fn test_concat_preserving_keys_repeats_them() {
    let pairs = Streams::of(vec!['a', 'b'])
        .concat(vec!['c'], PreserveKeys)
        .to_pairs();

    assert_eq!(pairs, vec![(0, 'a'), (1, 'b'), (0, 'c')]);
}

#[rstest]
fn test_concat_preserving_keys_into_map_overwrites() {
    let map = Streams::entries(vec![("x", 1), ("y", 2)])
        .concat(Streams::entries(vec![("x", 10)]), PreserveKeys)
        .to_map();

    assert_eq!(map.get("x"), Some(&10));
    assert_eq!(map.len(), 2);
}

#[rstest]
fn test_concat_with_empty_streams() {
    let left_empty = Streams::empty().concat(vec![1], Reindex).to_vec();
    let right_empty = Streams::of(vec![1]).concat(Streams::empty(), Reindex).to_vec();

    assert_eq!(left_empty, vec![1]);
    assert_eq!(right_empty, vec![1]);
}

#[rstest]
fn test_concat_is_lazy_on_second_stream() {
    let first = Streams::of(vec![1, 2])
        .concat(Streams::iterate(3..), Reindex)
        .limit(3, 0)
        .to_vec();

    assert_eq!(first, vec![1, 2, 3]);
}

#[rstest]
fn test_concat_chain() {
    let values = Streams::of(vec![1])
        .concat(vec![2], Reindex)
        .concat(Some(3), Reindex)
        .to_pairs();

    assert_eq!(values, vec![(0, 1), (1, 2), (2, 3)]);
}

#[rstest]
fn test_concat_size_hint_adds_up() {
    let stream = Streams::of(vec![1, 2]).concat(vec![3, 4, 5], Reindex);
    assert_eq!(stream.size_hint(), (5, Some(5)));
}
