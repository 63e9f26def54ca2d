//! Integration tests for the flat map stage.

use hashstream::stream::{PreserveKeys, Reindex, Source, Stream, Streams};
use rstest::rstest;

#[rstest]
fn test_flat_map_skips_empty_results() {
    let sources: Vec<Source<'static, i32>> = vec![
        Source::from(Vec::new()),
        Source::from(vec![4, 7, 8]),
        Source::from(Vec::new()),
        Source::Scalar(12),
        Source::from(None),
    ];

    let values = Streams::of(sources)
        .flat_map(|source, _| source, Reindex)
        .to_vec();

    assert_eq!(values, vec![4, 7, 8, 12]);
}

#[rstest]
fn test_flat_map_reindexes() {
    let pairs = Streams::of(vec![vec![1, 2], vec![3]])
        .flat_map(|values, _| values, Reindex)
        .to_pairs();

    assert_eq!(pairs, vec![(0, 1), (1, 2), (2, 3)]);
}

#[rstest]
fn test_flat_map_preserves_inner_keys() {
    let map = Streams::of(vec![vec![("a", 1)], vec![("b", 2), ("a", 3)]])
        .flat_map(|pairs, _| Streams::entries(pairs), PreserveKeys)
        .to_map();

    assert_eq!(map.get("a"), Some(&3));
    assert_eq!(map.get("b"), Some(&2));
}

#[rstest]
fn test_flat_map_receives_outer_key() {
    let values = Streams::of(vec!["x", "y"])
        .flat_map(|value, key| vec![value.repeat(*key + 1)], Reindex)
        .to_vec();

    assert_eq!(values, vec!["x".to_string(), "yy".to_string()]);
}

#[rstest]
fn test_flat_map_to_options() {
    let parsed = Streams::of(vec!["1", "x", "3"])
        .flat_map(|text, _| text.parse::<i32>().ok(), Reindex)
        .to_vec();

    assert_eq!(parsed, vec![1, 3]);
}

#[rstest]
fn test_flat_map_opens_inner_streams_lazily() {
    let values = Streams::iterate(1..)
        .flat_map(|value, _| Streams::iterate(0..value), Reindex)
        .limit(4, 0)
        .to_vec();

    assert_eq!(values, vec![0, 0, 1, 0]);
}
