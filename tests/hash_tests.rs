//! Integration tests for hash codes and hashing policies.
//!
//! Covers the structural hash, the `Hashable` capability and the
//! `HashFunction` strategy handle shared by the hash-keyed collections.

use hashstream::hash::{
    HashCode, HashFunction, Hashable, compute, compute_hashable, serialize_hashable,
};
use rstest::rstest;
use serde::Serialize;
use std::collections::BTreeMap;
use std::rc::Rc;

#[derive(Serialize)]
struct Point {
    x: i32,
    y: i32,
}

#[derive(Serialize)]
struct Pixel {
    x: i32,
    y: i32,
}

struct Token(&'static str);

impl Hashable for Token {
    fn hash(&self) -> HashCode {
        self.0.to_lowercase().into()
    }
}

#[derive(Serialize)]
struct Labelled {
    #[serde(serialize_with = "serialize_hashable")]
    token: Token,
    weight: u8,
}

// =============================================================================
// Structural hash
// =============================================================================

#[rstest]
fn test_compute_is_deterministic() {
    let value = vec![(1, "one".to_string()), (2, "two".to_string())];
    assert_eq!(compute(&value), compute(&value.clone()));
}

#[rstest]
#[case::integer_and_string(compute(&123), compute("123"))]
#[case::integer_and_float(compute(&123), compute(&123.0))]
#[case::string_and_float(compute("123"), compute(&123.0))]
#[case::bool_and_integer(compute(&true), compute(&1))]
#[case::none_and_zero(compute(&Option::<i32>::None), compute(&0))]
#[case::sequence_order(compute(&vec![1, 2]), compute(&vec![2, 1]))]
#[case::struct_names(compute(&Point { x: 1, y: 2 }), compute(&Pixel { x: 1, y: 2 }))]
fn test_compute_distinguishes_type_and_value(#[case] left: HashCode, #[case] right: HashCode) {
    assert_ne!(left, right);
}

#[rstest]
#[case::none_and_some_none(compute(&Option::<Option<i32>>::None), compute(&Some(Option::<i32>::None)))]
#[case::some_none_and_some_some(compute(&Some(Option::<i32>::None)), compute(&Some(Some(0))))]
#[case::none_and_some_unit(compute(&Option::<()>::None), compute(&Some(())))]
#[case::strings_with_separators(
    compute(&vec!["a\";s:1:\"b".to_string()]),
    compute(&vec!["a".to_string(), "b".to_string()])
)]
fn test_compute_separates_values_of_one_type(#[case] left: HashCode, #[case] right: HashCode) {
    assert_ne!(left, right);
}

#[rstest]
fn test_compute_of_structurally_equal_values_is_equal() {
    let mut left = BTreeMap::new();
    left.insert("a", 1);
    left.insert("b", 2);
    let mut right = BTreeMap::new();
    right.insert("b", 2);
    right.insert("a", 1);

    assert_eq!(compute(&left), compute(&right));
    assert_eq!(compute(&Point { x: 3, y: 4 }), compute(&Point { x: 3, y: 4 }));
}

#[rstest]
fn test_compute_renders_known_codes() {
    assert_eq!(compute(&42).as_str(), "i:42;");
    assert_eq!(compute("ab").as_str(), "s:2:\"ab\";");
    assert_eq!(compute(&(1, "a")).as_str(), "a:2:{i:0;i:1;i:1;s:1:\"a\";}");
}

// =============================================================================
// Hashable capability
// =============================================================================

#[rstest]
fn test_compute_hashable_never_collides_with_structural_codes() {
    let token = Token("abc");
    assert_eq!(compute_hashable(&token).as_str(), "H:3:\"abc\";");
    assert_ne!(compute_hashable(&token), compute("abc"));
}

#[rstest]
fn test_hashable_field_inside_structure() {
    let upper = Labelled {
        token: Token("KEY"),
        weight: 1,
    };
    let lower = Labelled {
        token: Token("key"),
        weight: 1,
    };
    let heavier = Labelled {
        token: Token("key"),
        weight: 2,
    };

    assert_eq!(compute(&upper), compute(&lower));
    assert_ne!(compute(&lower), compute(&heavier));
    assert!(compute(&upper).as_str().contains("H:3:\"key\";"));
}

#[rstest]
fn test_hashable_fields_cannot_forge_boundaries() {
    #[derive(Serialize)]
    struct Pair(
        #[serde(serialize_with = "serialize_hashable")] Token,
        #[serde(serialize_with = "serialize_hashable")] Token,
    );

    assert_ne!(
        compute(&Pair(Token("a;i:1;H:b"), Token("c"))),
        compute(&Pair(Token("a"), Token("b;i:1;H:c")))
    );
}

#[rstest]
fn test_hashable_through_shared_pointers() {
    let shared = Rc::new(Token("Shared"));
    assert_eq!(shared.hash(), Token("shared").hash());
}

// =============================================================================
// HashFunction
// =============================================================================

#[rstest]
fn test_structural_policy_matches_compute() {
    let policy = HashFunction::<Vec<u8>>::structural();
    assert_eq!(policy.apply(&vec![1, 2]), compute(&vec![1_u8, 2]));
}

#[rstest]
fn test_default_policy_is_structural() {
    let policy: HashFunction<&str> = HashFunction::default();
    assert_eq!(policy.apply(&"x"), compute("x"));
}

#[rstest]
fn test_hashable_policy_uses_own_hash() {
    let policy = HashFunction::<Token>::hashable();
    assert_eq!(policy.apply(&Token("A")), policy.apply(&Token("a")));
    assert_eq!(policy.apply(&Token("A")), compute_hashable(&Token("a")));
}

#[rstest]
fn test_closure_policy_accepts_integers_and_strings() {
    let by_number = HashFunction::new(|value: &u32| *value);
    let by_text = HashFunction::new(|value: &u32| value.to_string());

    assert_eq!(by_number.apply(&123), by_text.apply(&123));
}

#[rstest]
fn test_cloned_policy_shares_behavior() {
    let policy = HashFunction::new(|word: &String| word.len());
    let copy = policy.clone();

    assert_eq!(policy.apply(&"abc".to_string()), copy.apply(&"xyz".to_string()));
}

#[rstest]
fn test_hash_code_conversions() {
    let code = HashCode::from("abc");
    assert_eq!(code.to_string(), "abc");
    assert_eq!(AsRef::<str>::as_ref(&code), "abc");
    assert_eq!(code.into_string(), String::from("abc"));
}
