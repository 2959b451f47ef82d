#![cfg(feature = "multimap")]
//! Unit tests for MultiValueMap.
//!
//! The driver operations are exercised once per value strategy, followed by
//! the behaviour specific to each strategy.

use massive_collections::CollectionError;
use massive_collections::multimap::{
    ArrayStrategy, CircularStrategy, MultiValueMap, SetStrategy, ValueStrategy,
};
use rstest::rstest;

fn first_letter(value: &String) -> String {
    value.chars().take(1).collect()
}

fn words() -> Vec<String> {
    ["apple", "avocado", "banana", "blueberry", "cherry"]
        .into_iter()
        .map(String::from)
        .collect()
}

// =============================================================================
// Driver Operations
// =============================================================================

#[rstest]
fn test_new_map_is_empty() {
    let map: MultiValueMap<String, i32, _> = MultiValueMap::of_array();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.total_count(), 0);
}

#[rstest]
fn test_absent_key_lookups_are_empty() {
    let map: MultiValueMap<&str, i32, _> = MultiValueMap::of_array();
    assert!(!map.has("missing"));
    assert_eq!(map.count("missing"), 0);
    assert_eq!(map.values_for("missing").count(), 0);
    assert!(map.get("missing").is_none());
    assert!(!map.has_key_value("missing", &1));
    assert!(map.find("missing", |_| true).is_none());
    assert_eq!(map.filter("missing", |_| true).count(), 0);
    assert!(map.without("missing", &1).is_none());
}

#[rstest]
fn test_add_keyed_values_creates_entry_even_without_values() {
    let mut map: MultiValueMap<&str, i32, _> = MultiValueMap::of_array();
    map.add_keyed_values("empty", []);
    assert!(map.has("empty"));
    assert_eq!(map.count("empty"), 0);
}

#[rstest]
fn test_keys_keep_first_insertion_order() {
    let mut map = MultiValueMap::of_array();
    map.add_keyed_values("c", [1]);
    map.add_keyed_values("a", [2]);
    map.add_keyed_values("b", [3]);
    map.add_keyed_values("c", [4]);

    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["c", "a", "b"]);
    assert_eq!(
        map.keys_and_counts().map(|(key, count)| (*key, count)).collect::<Vec<_>>(),
        vec![("c", 2), ("a", 1), ("b", 1)]
    );
}

#[rstest]
fn test_entries_flat_is_key_then_value_order() {
    let mut map = MultiValueMap::of_array();
    map.add_value_by(first_letter, words());

    let flat: Vec<(String, String)> = map
        .entries_flat()
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();
    assert_eq!(
        flat,
        vec![
            ("a".to_string(), "apple".to_string()),
            ("a".to_string(), "avocado".to_string()),
            ("b".to_string(), "banana".to_string()),
            ("b".to_string(), "blueberry".to_string()),
            ("c".to_string(), "cherry".to_string()),
        ]
    );
    assert_eq!(map.values_flat().count(), 5);
}

#[rstest]
fn test_lazy_sequences_restart() {
    let mut map = MultiValueMap::of_array();
    map.add_keyed_values(1, ["x", "y"]);

    let first: Vec<&&str> = map.values_for(&1).collect();
    let second: Vec<&&str> = map.values_for(&1).collect();
    assert_eq!(first, second);
}

#[rstest]
fn test_delete_removes_key_and_values() {
    let mut map = MultiValueMap::of_array();
    map.add_keyed_values("a", [1, 2]);
    map.add_keyed_values("b", [3]);

    assert!(map.delete("a"));
    assert!(!map.delete("a"));
    assert!(!map.has("a"));
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["b"]);
}

#[rstest]
fn test_readded_key_moves_to_the_end() {
    let mut map = MultiValueMap::of_array();
    map.add_keyed_values("a", [1]);
    map.add_keyed_values("b", [2]);
    map.delete("a");
    map.add_keyed_values("a", [3]);

    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["b", "a"]);
}

#[rstest]
fn test_clear_removes_everything() {
    let mut map = MultiValueMap::of_array();
    map.add_keyed_values("a", [1, 2]);
    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.entries_flat().count(), 0);
}

#[rstest]
fn test_set_replaces_values_in_place() {
    let mut map = MultiValueMap::of_array();
    map.add_keyed_values("a", [1, 2]);
    map.add_keyed_values("b", [3]);
    map.set("a", [9]);

    assert_eq!(map.values_for("a").copied().collect::<Vec<_>>(), vec![9]);
    assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec!["a", "b"]);
}

#[rstest]
fn test_delete_key_value_keeps_the_key() {
    let mut map = MultiValueMap::of_array();
    map.add_keyed_values("a", [1, 2, 1]);

    assert!(map.delete_key_value("a", &1));
    assert!(!map.delete_key_value("a", &1));
    assert!(!map.delete_key_value("missing", &1));
    assert_eq!(map.values_for("a").copied().collect::<Vec<_>>(), vec![2]);

    assert!(map.delete_key_value("a", &2));
    assert!(map.has("a"));
    assert_eq!(map.count("a"), 0);
}

#[rstest]
fn test_delete_by_value_counts_affected_keys() {
    let mut map = MultiValueMap::of_array();
    map.add_keyed_values("a", [1, 2]);
    map.add_keyed_values("b", [2, 3]);
    map.add_keyed_values("c", [3]);

    assert_eq!(map.delete_by_value(&2), 2);
    assert_eq!(map.delete_by_value(&2), 0);
    assert_eq!(map.total_count(), 3);
}

#[rstest]
fn test_first_key_by_value_follows_key_order() {
    let mut map = MultiValueMap::of_array();
    map.add_keyed_values("late", [7]);
    map.add_keyed_values("early", [7]);

    assert_eq!(map.first_key_by_value(&7), Some(&"late"));
    assert_eq!(map.first_key_by_value(&8), None);
}

#[rstest]
fn test_find_filter_and_without_do_not_mutate() {
    let mut map = MultiValueMap::of_array();
    map.add_keyed_values("n", [1, 2, 3, 4]);

    assert_eq!(map.find("n", |value| *value > 1), Some(&2));
    assert_eq!(
        map.filter("n", |value| value % 2 == 1).copied().collect::<Vec<_>>(),
        vec![1, 3]
    );
    assert_eq!(map.without("n", &3), Some(vec![1, 2, 4]));
    assert_eq!(map.count("n"), 4);
}

#[rstest]
fn test_extend_with_pairs() {
    let mut map = MultiValueMap::of_array();
    map.extend([("x", 1), ("y", 2), ("x", 3)]);
    assert_eq!(map.values_for("x").copied().collect::<Vec<_>>(), vec![1, 3]);
}

#[rstest]
fn test_debug_renders_keys_with_values() {
    let mut map = MultiValueMap::of_array();
    map.add_keyed_values("k", [1, 2]);
    assert_eq!(format!("{map:?}"), "{\"k\": [1, 2]}");
}

#[rstest]
fn test_clone_is_independent() {
    let mut map = MultiValueMap::of_array();
    map.add_keyed_values("k", [1]);
    let snapshot = map.clone();
    map.add_keyed_values("k", [2]);

    assert_eq!(snapshot.count("k"), 1);
    assert_eq!(map.count("k"), 2);
}

// =============================================================================
// Array Strategy
// =============================================================================

#[rstest]
fn test_array_allows_duplicates() {
    let mut map = MultiValueMap::of_array();
    map.add_keyed_values("k", ["v", "v"]);
    assert_eq!(map.count("k"), 2);
    assert!(map.has_key_value("k", &"v"));
}

#[rstest]
fn test_array_with_custom_comparer() {
    let strategy = ArrayStrategy::with_comparer(|left: &String, right: &String| {
        left.eq_ignore_ascii_case(right)
    });
    let mut map = MultiValueMap::new(strategy);
    map.add_keyed_values(0, ["Hello".to_string(), "World".to_string()]);

    assert!(map.has_key_value(&0, &"HELLO".to_string()));
    assert!(map.delete_key_value(&0, &"world".to_string()));
    assert_eq!(map.count(&0), 1);
}

// =============================================================================
// Set Strategy
// =============================================================================

#[cfg(feature = "json")]
#[rstest]
fn test_set_dedupes_same_value() {
    let mut map = MultiValueMap::of_set();
    map.add_keyed_values("k", ["v"]);
    map.add_keyed_values("k", ["v"]);
    assert_eq!(map.count("k"), 1);
}

#[cfg(feature = "json")]
#[rstest]
fn test_set_dedupes_equal_json_representations() {
    #[derive(serde::Serialize, Debug, PartialEq)]
    struct Reading {
        sensor: &'static str,
        value: i32,
    }

    let mut map = MultiValueMap::of_set();
    map.add_keyed_values(
        "k",
        [
            Reading { sensor: "t", value: 1 },
            Reading { sensor: "t", value: 1 },
            Reading { sensor: "t", value: 2 },
        ],
    );
    assert_eq!(map.count("k"), 2);
}

#[rstest]
fn test_set_skips_rather_than_overwrites() {
    let strategy = SetStrategy::with_key(|value: &(char, i32)| value.0.to_string());
    let mut map = MultiValueMap::new(strategy);
    map.add_keyed_values("k", [('a', 1), ('a', 2), ('b', 3)]);

    let values: Vec<(char, i32)> = map.values_for("k").copied().collect();
    assert_eq!(values, vec![('a', 1), ('b', 3)]);
}

#[cfg(feature = "json")]
#[rstest]
fn test_set_values_keep_first_insertion_order() {
    const ORDER: [&str; 5] = ["first", "second", "third", "fourth", "fifth"];

    for _ in 0..20 {
        let mut map = MultiValueMap::of_set();
        map.add_keyed_values("k", ORDER);
        map.add_keyed_values("k", ["third", "first"]);

        assert_eq!(map.values_for("k").copied().collect::<Vec<_>>(), ORDER.to_vec());
        assert_eq!(map.find("k", |value| value.starts_with('f')), Some(&"first"));
    }
}

#[cfg(feature = "json")]
#[rstest]
fn test_set_entries_flat_follows_value_order() {
    let mut map = MultiValueMap::of_set();
    map.add_keyed_values('b', [3, 1, 3]);
    map.add_keyed_values('a', [2]);
    map.add_keyed_values('b', [2]);

    let pairs: Vec<(char, i32)> = map.entries_flat().map(|(key, value)| (*key, *value)).collect();
    assert_eq!(pairs, vec![('b', 3), ('b', 1), ('b', 2), ('a', 2)]);
    assert_eq!(map.first_key_by_value(&2), Some(&'b'));
}

// =============================================================================
// Circular Strategy
// =============================================================================

#[rstest]
fn test_circular_requires_capacity() {
    let result = MultiValueMap::<&str, i32, CircularStrategy<i32>>::of_circular(0);
    assert!(matches!(result, Err(CollectionError::InvalidCapacity(_))));
}

#[rstest]
#[case(1, 0)]
#[case(3, 2)]
#[case(3, 10)]
fn test_circular_bounds_each_key(#[case] capacity: usize, #[case] overflow: usize) {
    let mut map = MultiValueMap::of_circular(capacity).unwrap();
    let total = capacity + overflow;
    map.add_keyed_values("k", 0..total);

    assert_eq!(map.count("k"), capacity);
    for evicted in 0..overflow {
        assert!(!map.has_key_value("k", &evicted));
    }
    assert_eq!(
        map.values_for("k").copied().collect::<Vec<_>>(),
        (overflow..total).collect::<Vec<_>>()
    );
}

#[rstest]
fn test_circular_keys_are_independent() {
    let mut map = MultiValueMap::of_circular(2).unwrap();
    map.add_keyed_values("a", [1, 2, 3]);
    map.add_keyed_values("b", [4]);

    assert_eq!(map.count("a"), 2);
    assert_eq!(map.count("b"), 1);
    assert_eq!(map.strategy().capacity(), 2);
}

#[rstest]
fn test_circular_delete_key_value() {
    let mut map = MultiValueMap::of_circular(3).unwrap();
    map.add_keyed_values("k", [1, 2, 3, 4]);

    assert!(map.delete_key_value("k", &3));
    assert_eq!(map.values_for("k").copied().collect::<Vec<_>>(), vec![2, 4]);

    map.add_keyed_values("k", [5, 6]);
    assert_eq!(map.values_for("k").copied().collect::<Vec<_>>(), vec![4, 5, 6]);
}

// =============================================================================
// Generic Strategy Use
// =============================================================================

fn fill<S: ValueStrategy<i32>>(strategy: S) -> MultiValueMap<&'static str, i32, S> {
    let mut map = MultiValueMap::new(strategy);
    map.add_keyed_values("k", [1, 2, 2, 3]);
    map
}

#[rstest]
fn test_same_driver_for_every_strategy() {
    assert_eq!(fill(ArrayStrategy::new()).count("k"), 4);
    assert_eq!(fill(SetStrategy::with_key(|value: &i32| value.to_string())).count("k"), 3);
    assert_eq!(fill(CircularStrategy::new(2).unwrap()).count("k"), 2);
}

#[rstest]
fn test_strategy_laws_hold_for_array() {
    let strategy = ArrayStrategy::new();
    let mut container = strategy.create();
    strategy.add(&mut container, 5);

    assert!(strategy.has(&container, &5));
    assert_eq!(strategy.count(&container), strategy.values(&container).count());
    assert!(!strategy.has(&strategy.without(&container, &5), &5));
}
