//! Integration tests for the Stream pipeline core.
//!
//! Covers laziness, the key/value closures of map, map_key and filter,
//! distinct, and the terminal operations.

use hashstream::collection::HashSet;
use hashstream::error::CollectionError;
use hashstream::hash::HashFunction;
use hashstream::stream::{BoxStream, IntoStream, Stream, Streams};
use rstest::rstest;
use std::cell::Cell;

// =============================================================================
// Laziness
// =============================================================================

#[rstest]
fn test_transformations_are_lazy() {
    let calls = Cell::new(0);
    let pipeline = Streams::of(vec![1, 2, 3])
        .map(|value, _| {
            calls.set(calls.get() + 1);
            value * 2
        })
        .filter(|value, _| {
            calls.set(calls.get() + 1);
            *value > 2
        });

    assert_eq!(calls.get(), 0);
    assert_eq!(pipeline.to_vec(), vec![4, 6]);
    assert_eq!(calls.get(), 6);
}

#[rstest]
fn test_first_pulls_only_what_it_needs() {
    let pulled = Cell::new(0);
    let first = Streams::iterate((1..).inspect(|_| pulled.set(pulled.get() + 1)))
        .filter(|value, _| value % 3 == 0)
        .first();

    assert_eq!(first, Some(3));
    assert_eq!(pulled.get(), 3);
}

// =============================================================================
// Map, map_key and filter
// =============================================================================

#[rstest]
fn test_map_receives_value_and_key() {
    let labels = Streams::entries(vec![("a", 1), ("b", 2)])
        .map(|value, key| format!("{key}{value}"))
        .to_pairs();

    assert_eq!(labels, vec![("a", "a1".to_string()), ("b", "b2".to_string())]);
}

#[rstest]
fn test_map_key_replaces_keys() {
    let by_name = Streams::of(vec![("alice", 31), ("bob", 27)])
        .map_key(|(name, _), _| *name)
        .map(|(_, age), _| age)
        .to_map();

    assert_eq!(by_name.get("bob"), Some(&27));
    assert_eq!(by_name.keys().copied().collect::<Vec<_>>(), vec!["alice", "bob"]);
}

#[rstest]
fn test_filter_keeps_original_keys() {
    let pairs = Streams::of(vec![10, 11, 12, 13])
        .filter(|value, _| value % 2 == 1)
        .to_pairs();

    assert_eq!(pairs, vec![(1, 11), (3, 13)]);
}

#[rstest]
fn test_filter_by_key() {
    let values = Streams::of(vec!['a', 'b', 'c', 'd'])
        .filter(|_, key| *key >= 2)
        .to_vec();

    assert_eq!(values, vec!['c', 'd']);
}

// =============================================================================
// Distinct
// =============================================================================

#[rstest]
fn test_distinct_keeps_first_occurrence() {
    let values = Streams::of(vec![4, 8, 4, 5, 1, 7, 1]).distinct().to_vec();
    assert_eq!(values, vec![4, 8, 5, 1, 7]);
}

#[rstest]
fn test_distinct_keeps_keys_of_first_occurrence() {
    let pairs = Streams::of(vec!["x", "y", "x", "z"]).distinct().to_pairs();
    assert_eq!(pairs, vec![(0, "x"), (1, "y"), (3, "z")]);
}

#[rstest]
fn test_distinct_compares_structures() {
    let values = Streams::of(vec![vec![1, 2], vec![2, 1], vec![1, 2]]).distinct().count();
    assert_eq!(values, 2);
}

#[rstest]
fn test_distinct_by_custom_hash() {
    let values = Streams::of(vec!["Apple", "apple", "APPLE", "pear"])
        .distinct_by(HashFunction::new(|word: &&str| word.to_lowercase()))
        .to_vec();

    assert_eq!(values, vec!["Apple", "pear"]);
}

#[rstest]
fn test_distinct_is_lazy_over_infinite_source() {
    let values = Streams::iterate((0..).map(|value| value % 4))
        .distinct()
        .limit(4, 0)
        .to_vec();

    assert_eq!(values, vec![0, 1, 2, 3]);
}

// =============================================================================
// Terminals
// =============================================================================

#[rstest]
fn test_for_each_receives_value_then_key() {
    let mut visited = Vec::new();
    Streams::of(vec!['a', 'b']).for_each(|value, key| visited.push((value, key)));

    assert_eq!(visited, vec![('a', 0), ('b', 1)]);
}

#[rstest]
fn test_to_map_last_write_wins() {
    let map = Streams::of(vec!["one", "two", "three"])
        .map_key(|value, _| value.len())
        .to_map();

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&3), Some(&"two"));
    assert_eq!(map.get_index(0), Some((&3, &"two")));
}

#[rstest]
fn test_try_to_map_rejects_colliding_keys() {
    let result = Streams::of(vec!["one", "two", "three"])
        .map_key(|value, _| value.len())
        .try_to_map();

    assert_eq!(result, Err(CollectionError::invalid_state("duplicate key at position 1")));
}

#[rstest]
fn test_try_to_map_with_unique_keys() {
    let map = Streams::of(vec!["a", "bb"]).map_key(|value, _| value.len()).try_to_map();
    assert_eq!(map.map(|map| map.len()), Ok(2));
}

#[rstest]
fn test_to_pairs_keeps_duplicates() {
    let pairs = Streams::of(vec![1, 2])
        .concat(vec![3], hashstream::stream::PreserveKeys)
        .to_pairs();

    assert_eq!(pairs, vec![(0, 1), (1, 2), (0, 3)]);
}

#[rstest]
#[case::all_small(vec![1, 2, 3], true)]
#[case::one_large(vec![1, 20, 3], false)]
#[case::empty(vec![], true)]
fn test_match_all(#[case] values: Vec<i32>, #[case] expected: bool) {
    assert_eq!(Streams::of(values).match_all(|value, _| *value < 10), expected);
}

#[rstest]
#[case::none_large(vec![1, 2, 3], false)]
#[case::one_large(vec![1, 20, 3], true)]
#[case::empty(vec![], false)]
fn test_match_one(#[case] values: Vec<i32>, #[case] expected: bool) {
    assert_eq!(Streams::of(values).match_one(|value, _| *value >= 10), expected);
}

#[rstest]
fn test_match_one_stops_at_first_match() {
    let pulled = Cell::new(0);
    let found = Streams::iterate((0..).inspect(|_| pulled.set(pulled.get() + 1)))
        .match_one(|value, _| *value == 4);

    assert!(found);
    assert_eq!(pulled.get(), 5);
}

#[rstest]
fn test_entries_and_values_are_iterators() {
    let doubled: Vec<i32> = Streams::of(vec![1, 2, 3]).values().map(|value| value * 2).collect();
    let keys: Vec<usize> = Streams::of(vec!['x', 'y']).entries().map(|(key, _)| key).collect();

    assert_eq!(doubled, vec![2, 4, 6]);
    assert_eq!(keys, vec![0, 1]);
}

#[rstest]
fn test_boxed_pipelines_from_branches() {
    fn pipeline(even: bool) -> BoxStream<'static, usize, i32> {
        let source = Streams::of(vec![1, 2, 3, 4]);
        if even {
            source.filter(|value, _| value % 2 == 0).boxed()
        } else {
            source.filter(|value, _| value % 2 == 1).boxed()
        }
    }

    assert_eq!(pipeline(true).to_vec(), vec![2, 4]);
    assert_eq!(pipeline(false).to_vec(), vec![1, 3]);
}

#[rstest]
fn test_array_stream_can_be_replayed_before_consumption() {
    let stream = Streams::of(vec![1, 2, 3]);
    let replay = stream.clone();

    assert_eq!(stream.count(), 3);
    assert_eq!(replay.reduce_from(0, |total, value| total + value), 6);
}

#[rstest]
fn test_collections_convert_into_streams() {
    let set: HashSet<i32> = vec![2, 2, 3].into_iter().collect();

    assert_eq!(set.into_stream().to_vec(), vec![2, 3]);
    assert_eq!(vec![5].into_stream().to_pairs(), vec![(0, 5)]);
}

#[rstest]
fn test_size_hint_of_array_pipeline() {
    let stream = Streams::of(vec![1, 2, 3, 4, 5]).limit(2, 1);
    assert_eq!(stream.size_hint(), (2, Some(2)));
}
