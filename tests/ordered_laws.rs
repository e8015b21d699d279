//! Property-based tests for the ordered containers.
//!
//! Random operation sequences are mirrored against `BTreeSet` / `BTreeMap`
//! models; after every step the container must agree with the model and
//! its ordering invariants must hold.

use proptest::prelude::*;
use sortedlists::{OrderedMap, OrderedSet};
use std::collections::{BTreeMap, BTreeSet};

// =============================================================================
// Operation Vocabulary and Strategies
// =============================================================================

#[derive(Debug, Clone)]
enum SetOperation {
    Insert(i8),
    Remove(i8),
    Rename(i8, i8),
}

fn set_operation() -> impl Strategy<Value = SetOperation> {
    // i8 keeps the domain small enough for frequent collisions.
    prop_oneof![
        any::<i8>().prop_map(SetOperation::Insert),
        any::<i8>().prop_map(SetOperation::Remove),
        (any::<i8>(), any::<i8>()).prop_map(|(old, new)| SetOperation::Rename(old, new)),
    ]
}

#[derive(Debug, Clone)]
enum MapOperation {
    Insert(i8, i8),
    Remove(i8),
    Rename(i8, i8),
}

fn map_operation() -> impl Strategy<Value = MapOperation> {
    prop_oneof![
        (any::<i8>(), any::<i8>()).prop_map(|(key, value)| MapOperation::Insert(key, value)),
        any::<i8>().prop_map(MapOperation::Remove),
        (any::<i8>(), any::<i8>()).prop_map(|(old, new)| MapOperation::Rename(old, new)),
    ]
}

// =============================================================================
// Reference Models
// =============================================================================

fn apply_to_set(set: &OrderedSet<i8>, operation: &SetOperation) -> bool {
    match operation {
        SetOperation::Insert(element) => set.insert(*element),
        SetOperation::Remove(element) => set.remove(element),
        SetOperation::Rename(old, new) => set.rename(old, *new),
    }
}

fn apply_to_set_model(model: &mut BTreeSet<i8>, operation: &SetOperation) -> bool {
    match operation {
        SetOperation::Insert(element) => model.insert(*element),
        SetOperation::Remove(element) => model.remove(element),
        SetOperation::Rename(old, new) => {
            if model.is_empty() || old == new {
                false
            } else if model.contains(old) {
                model.remove(old);
                model.insert(*new);
                true
            } else {
                model.insert(*new)
            }
        }
    }
}

fn apply_to_map(map: &OrderedMap<i8, i8>, operation: &MapOperation) -> bool {
    match operation {
        MapOperation::Insert(key, value) => map.insert(*key, *value),
        MapOperation::Remove(key) => map.remove(key),
        MapOperation::Rename(old, new) => map.rename(old, *new),
    }
}

fn apply_to_map_model(model: &mut BTreeMap<i8, i8>, operation: &MapOperation) -> bool {
    match operation {
        MapOperation::Insert(key, value) => {
            model.insert(*key, *value);
            true
        }
        MapOperation::Remove(key) => model.remove(key).is_some(),
        MapOperation::Rename(old, new) => {
            if model.contains_key(new) {
                return false;
            }
            match model.remove(old) {
                Some(value) => {
                    model.insert(*new, value);
                    true
                }
                None => false,
            }
        }
    }
}

fn is_strictly_ascending(sequence: &[i8]) -> bool {
    sequence.windows(2).all(|pair| pair[0] < pair[1])
}

// =============================================================================
// OrderedSet Laws
// =============================================================================

proptest! {
    /// After any operation sequence the set agrees with a BTreeSet model
    /// and its snapshot is strictly ascending with no duplicates.
    #[test]
    fn set_agrees_with_model_after_every_operation(
        operations in prop::collection::vec(set_operation(), 0..64)
    ) {
        let set: OrderedSet<i8> = OrderedSet::new();
        let mut model = BTreeSet::new();

        for operation in &operations {
            let expected = apply_to_set_model(&mut model, operation);
            let actual = apply_to_set(&set, operation);
            prop_assert_eq!(actual, expected, "operation {:?} disagreed", operation);

            let snapshot = set.to_sorted_vec();
            prop_assert!(is_strictly_ascending(&snapshot));
            let expected_contents: Vec<i8> = model.iter().copied().collect();
            prop_assert_eq!(snapshot, expected_contents);
        }
    }

    /// Positional access agrees with the snapshot for every valid index.
    #[test]
    fn set_get_matches_snapshot_positions(
        elements in prop::collection::btree_set(any::<i8>(), 0..32)
    ) {
        let set = OrderedSet::from_elements(elements.iter().copied().collect());
        let snapshot = set.to_sorted_vec();

        for (index, element) in snapshot.iter().enumerate() {
            prop_assert_eq!(set.get(index), Some(*element));
            prop_assert_eq!(set.find_index(element), Some(index));
        }
        prop_assert_eq!(set.get(snapshot.len()), None);
    }

    /// Remove after a fresh insert restores the exact previous contents.
    #[test]
    fn set_insert_remove_round_trip(
        existing in prop::collection::btree_set(any::<i8>(), 0..32),
        element: i8
    ) {
        prop_assume!(!existing.contains(&element));
        let set = OrderedSet::from_elements(existing.iter().copied().collect());
        let before = set.to_sorted_vec();

        prop_assert!(set.insert(element));
        prop_assert!(set.remove(&element));
        prop_assert_eq!(set.to_sorted_vec(), before);
    }

    /// A second identical insert changes nothing and reports a no-op.
    #[test]
    fn set_insert_is_idempotent(
        existing in prop::collection::btree_set(any::<i8>(), 0..32),
        element: i8
    ) {
        let set = OrderedSet::from_elements(existing.iter().copied().collect());

        let first = set.insert(element);
        let after_first = set.to_sorted_vec();
        prop_assert_eq!(first, !existing.contains(&element));

        prop_assert!(!set.insert(element));
        prop_assert_eq!(set.to_sorted_vec(), after_first);
    }
}

// =============================================================================
// OrderedMap Laws
// =============================================================================

proptest! {
    /// After any operation sequence the keys are exactly the model's
    /// sorted key set, and every value matches the model.
    #[test]
    fn map_agrees_with_model_after_every_operation(
        operations in prop::collection::vec(map_operation(), 0..64)
    ) {
        let map: OrderedMap<i8, i8> = OrderedMap::new();
        let mut model = BTreeMap::new();

        for operation in &operations {
            let expected = apply_to_map_model(&mut model, operation);
            let actual = apply_to_map(&map, operation);
            prop_assert_eq!(actual, expected, "operation {:?} disagreed", operation);

            let keys = map.keys();
            let expected_keys: Vec<i8> = model.keys().copied().collect();
            prop_assert_eq!(&keys, &expected_keys);
            prop_assert!(is_strictly_ascending(&keys));

            for (key, value) in &model {
                prop_assert_eq!(map.get(key), Some(*value));
            }
        }
    }

    /// Reverse lookup returns exactly the keys holding the queried value.
    #[test]
    fn map_find_keys_matches_model_scan(
        entries in prop::collection::btree_map(any::<i8>(), any::<i8>(), 0..32),
        value: i8
    ) {
        let map: OrderedMap<i8, i8> = entries.iter().map(|(k, v)| (*k, *v)).collect();

        let expected: Vec<i8> = entries
            .iter()
            .filter(|(_, candidate)| **candidate == value)
            .map(|(key, _)| *key)
            .collect();
        prop_assert_eq!(map.find_keys(&value), expected);
    }

    /// The cursor and the callback traversal agree on contents and order.
    #[test]
    fn map_cursor_agrees_with_for_each(
        entries in prop::collection::btree_map(any::<i8>(), any::<i8>(), 0..32)
    ) {
        let map: OrderedMap<i8, i8> = entries.iter().map(|(k, v)| (*k, *v)).collect();

        let from_cursor: Vec<(i8, i8)> = map.iter().collect();
        let mut from_callback = Vec::new();
        map.for_each(|key, value| from_callback.push((*key, *value)));

        prop_assert_eq!(&from_cursor, &from_callback);
        let expected: Vec<(i8, i8)> = entries.iter().map(|(k, v)| (*k, *v)).collect();
        prop_assert_eq!(from_cursor, expected);
    }
}
