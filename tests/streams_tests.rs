//! Integration tests for the Streams factory and the null-object streams.

use hashstream::collection::{HashTable, OrderedCollection};
use hashstream::stream::{
    ArrayCombineStream, EmptyStream, PreserveKeys, Reindex, SingletonStream, Source, Stream,
    Streams,
};
use rstest::rstest;

// =============================================================================
// wrap
// =============================================================================

#[rstest]
fn test_wrap_sequence() {
    assert_eq!(Streams::wrap(Source::from(vec![1, 2, 3])).to_pairs(), vec![(0, 1), (1, 2), (2, 3)]);
}

#[rstest]
fn test_wrap_scalar_is_singleton() {
    assert_eq!(Streams::wrap(Source::Scalar("only")).to_pairs(), vec![(0, "only")]);
}

#[rstest]
fn test_wrap_none_and_empty_sequence_are_empty() {
    assert_eq!(Streams::wrap(Source::<i32>::from(None)).count(), 0);
    assert_eq!(Streams::wrap(Source::<i32>::from(Vec::new())).count(), 0);
    assert_eq!(Streams::wrap(Source::<i32>::Empty).first(), None);
}

#[rstest]
fn test_wrap_iterable_is_lazy() {
    let wrapped = Streams::wrap(Source::iterable((1..).map(|value| value * value)));
    assert_eq!(wrapped.limit(3, 0).to_vec(), vec![1, 4, 9]);
}

#[rstest]
fn test_wrap_stream_is_returned_as_is() {
    let stream = Streams::of(vec![3, 1, 2]).sort(Reindex);
    assert_eq!(Streams::wrap(Source::stream(stream)).to_vec(), vec![1, 2, 3]);
}

#[rstest]
fn test_wrap_streamable_opens_its_stream() {
    let ordered: OrderedCollection<i32> = vec![3, 1, 2].into_iter().collect();
    let wrapped = Streams::wrap(Source::streamable(ordered));

    assert_eq!(wrapped.to_vec(), vec![1, 2, 3]);
}

#[rstest]
fn test_wrap_borrowed_values() {
    let words = vec!["a".to_string(), "b".to_string()];
    let lengths = Streams::wrap(Source::iterable(words.iter()))
        .map(|word, _| word.len())
        .to_vec();

    assert_eq!(lengths, vec![1, 1]);
}

// =============================================================================
// Sources
// =============================================================================

#[rstest]
fn test_array_combine_stream() {
    let stream = ArrayCombineStream::new(vec!["a", "b"], vec![1, 2]).unwrap();
    assert_eq!(stream.to_pairs(), vec![("a", 1), ("b", 2)]);
}

#[rstest]
fn test_array_combine_stream_rejects_mismatched_lengths() {
    let error = ArrayCombineStream::new(vec!["a"], vec![1, 2]).unwrap_err();
    assert_eq!(error.to_string(), "invalid argument: 1 keys cannot be combined with 2 values");
}

#[rstest]
fn test_entries_helper_keeps_arbitrary_keys() {
    let table: HashTable<Vec<u8>, char> = Streams::entries(vec![(vec![1], 'a'), (vec![2], 'b')])
        .entries()
        .collect();

    assert_eq!(table.get(&vec![2]), Ok(&'b'));
}

// =============================================================================
// Singleton
// =============================================================================

#[rstest]
fn test_singleton_transformations_are_eager() {
    let stream = Streams::singleton(5)
        .map(|value, _| value * 2)
        .map_key(|value, _| format!("k{value}"))
        .filter(|value, _| *value == 10);

    assert!(stream.is_present());
    assert_eq!(stream.to_pairs(), vec![("k10".to_string(), 10)]);
}

#[rstest]
fn test_singleton_filter_can_empty_it() {
    let stream = Streams::singleton(5).filter(|value, _| *value > 5);

    assert!(!stream.is_present());
    assert_eq!(stream.count(), 0);
}

#[rstest]
#[case::kept(1, 0, true)]
#[case::offset(1, 1, false)]
#[case::zero_count(0, 0, false)]
fn test_singleton_limit(#[case] count: usize, #[case] offset: usize, #[case] present: bool) {
    assert_eq!(Streams::singleton('x').limit(count, offset).is_present(), present);
}

#[rstest]
fn test_singleton_sort_applies_key_policy() {
    let keyed = SingletonStream::with_key("key", 1);

    assert_eq!(keyed.clone().sort(PreserveKeys).to_pairs(), vec![("key", 1)]);
    assert_eq!(keyed.sort(Reindex).to_pairs(), vec![(0, 1)]);
}

#[rstest]
fn test_singleton_distinct_and_first() {
    assert_eq!(Streams::singleton("a").distinct().first(), Some("a"));
}

// =============================================================================
// Empty
// =============================================================================

#[rstest]
fn test_empty_terminals_return_neutral_results() {
    let empty: EmptyStream<usize, i32> = Streams::empty();

    assert_eq!(empty.to_vec(), Vec::<i32>::new());
    assert_eq!(empty.first(), None);
    assert!(empty.match_all(|_, _| false));
    assert!(!empty.match_one(|_, _| true));
    assert_eq!(empty.reduce_from(5, |total, value| total + value), 5);
    assert_eq!(empty.count(), 0);
}

#[rstest]
fn test_empty_transformations_stay_empty() {
    let empty: EmptyStream<usize, i32> = Streams::empty();
    let transformed = empty
        .map(|value, _| value.to_string())
        .filter(|_, _| true)
        .distinct()
        .sort(Reindex)
        .limit(3, 0)
        .skip(1);

    assert_eq!(transformed.count(), 0);
}
