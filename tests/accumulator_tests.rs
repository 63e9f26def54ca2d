//! Integration tests for accumulators and `Stream::reduce`.

use hashstream::stream::{Accumulator, Accumulators, Stream, Streams};
use rstest::rstest;

#[rstest]
fn test_sum_of_empty_stream_is_initial() {
    assert_eq!(Streams::of(Vec::<i64>::new()).reduce(Accumulators::sum()), 0);
    assert_eq!(Streams::of(Vec::<f64>::new()).reduce(Accumulators::sum()), 0.0);
}

#[rstest]
fn test_multiply_of_empty_stream_is_one() {
    assert_eq!(Streams::of(Vec::<u32>::new()).reduce(Accumulators::multiply()), 1);
}

#[rstest]
#[case::sum(vec![1, 2, 3, 4], 10)]
#[case::negative(vec![-5, 5, -1], -1)]
#[case::single(vec![42], 42)]
fn test_sum(#[case] values: Vec<i32>, #[case] expected: i32) {
    assert_eq!(Streams::of(values).reduce(Accumulators::sum()), expected);
}

#[rstest]
fn test_min_and_max() {
    let values = vec![3.5, -1.0, 7.25, 0.0];

    assert_eq!(Streams::of(values.clone()).reduce(Accumulators::min()), Some(-1.0));
    assert_eq!(Streams::of(values).reduce(Accumulators::max()), Some(7.25));
    assert_eq!(Streams::of(Vec::<i32>::new()).reduce(Accumulators::min()), None);
}

#[rstest]
fn test_min_keeps_first_of_equal_items() {
    let shortest = Streams::of(vec![(2, 'a'), (1, 'b'), (1, 'c')])
        .map(|(length, name), _| Ranked { length, name })
        .reduce(Accumulators::min())
        .map(|ranked| ranked.name);

    assert_eq!(shortest, Some('b'));
}

#[derive(Debug, PartialEq)]
struct Ranked {
    length: u8,
    name: char,
}

impl PartialOrd for Ranked {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        self.length.partial_cmp(&other.length)
    }
}

#[rstest]
fn test_from_fn_with_initial_value() {
    let folded = Streams::of(vec!["a", "b", "c"])
        .reduce(Accumulators::from_fn(String::from(">"), |carry: String, item: &str| carry + item));

    assert_eq!(folded, ">abc");
}

#[rstest]
fn test_reduce_from_on_empty_stream_never_calls_function() {
    let mut calls = 0;
    let result = Streams::of(Vec::<i32>::new()).reduce_from(5, |carry, value| {
        calls += 1;
        carry + value
    });

    assert_eq!(result, 5);
    assert_eq!(calls, 0);
}

/// Counts items while keeping the running total.
struct Tally;

impl Accumulator<u32> for Tally {
    type Carry = (usize, u32);

    fn initial(&self) -> (usize, u32) {
        (0, 0)
    }

    fn accumulate(&mut self, (count, total): (usize, u32), item: u32) -> (usize, u32) {
        (count + 1, total + item)
    }
}

#[rstest]
fn test_custom_accumulator() {
    assert_eq!(Streams::of(vec![2_u32, 3, 5]).reduce(Tally), (3, 10));
    assert_eq!(Streams::of(Vec::<u32>::new()).reduce(Tally), (0, 0));
}
