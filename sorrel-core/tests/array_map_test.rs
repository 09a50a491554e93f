// sorrel-core - Array map integration tests
// Copyright (c) 2025 The Sorrel Authors. MIT licensed.

//! Integration tests for the small persistent array map: nil keys,
//! persistence, promotion to the trie representation, equality, and the
//! aggregate hash formula.

mod common;

use common::{default_hash_eq, modulo_hash_eq};
use sorrel_core::{Error, PersistentArrayMap, PersistentMap, Value};

#[test]
fn test_empty() {
    let map = PersistentArrayMap::empty(modulo_hash_eq(2));

    assert_eq!(map.count(), 0);
    assert!(!map.contains(&Value::string("test")));
    assert!(!map.contains(&Value::Nil));
    assert!(map.find(&Value::string("test")).is_none());
}

#[test]
fn test_cannot_create_from_uneven_kv_list() {
    let result = PersistentArrayMap::from_kvs(modulo_hash_eq(2), vec![Value::string("test")]);
    assert!(matches!(result, Err(Error::UnevenKeyValueList { len: 1 })));
}

#[test]
fn test_nil_is_an_ordinary_key() {
    let map = PersistentArrayMap::empty(modulo_hash_eq(2));
    let with_nil = map.put(Value::Nil, Value::string("test"));

    // The original map is untouched
    assert!(map.find(&Value::Nil).is_none());
    assert_eq!(map.count(), 0);
    assert!(!map.contains(&Value::Nil));

    assert_eq!(with_nil.find(&Value::Nil), Some(&Value::string("test")));
    assert_eq!(with_nil.count(), 1);
    assert!(with_nil.contains(&Value::Nil));
}

#[test]
fn test_put_key_value() {
    let map = PersistentArrayMap::empty(modulo_hash_eq(2)).put(Value::int(1), Value::string("test"));

    assert_eq!(map.count(), 1);
    assert!(map.contains(&Value::int(1)));
    assert_eq!(map.find(&Value::int(1)), Some(&Value::string("test")));
}

#[test]
fn test_put_same_key_value_twice() {
    let map = PersistentArrayMap::empty(modulo_hash_eq(2))
        .put(Value::int(1), Value::string("test"))
        .put(Value::int(1), Value::string("test"));

    assert_eq!(map.count(), 1);
    assert_eq!(map.find(&Value::int(1)), Some(&Value::string("test")));
}

#[test]
fn test_put_same_key_different_value() {
    let map = PersistentArrayMap::empty(modulo_hash_eq(2))
        .put(Value::int(1), Value::string("test"))
        .put(Value::int(1), Value::string("foo"));

    assert_eq!(map.count(), 1);
    assert_eq!(map.find(&Value::int(1)), Some(&Value::string("foo")));
}

#[test]
fn test_put_nil_twice() {
    let map = PersistentArrayMap::empty(modulo_hash_eq(2))
        .put(Value::Nil, Value::string("test"))
        .put(Value::Nil, Value::string("test"));

    assert_eq!(map.count(), 1);
    assert!(map.contains(&Value::Nil));
}

#[test]
fn test_merge() {
    let left = PersistentArrayMap::empty(modulo_hash_eq(2)).put(Value::int(1), Value::string("test"));
    let right = PersistentArrayMap::empty(modulo_hash_eq(2)).put(Value::int(2), Value::string("bar"));

    let expected = PersistentArrayMap::empty(modulo_hash_eq(2))
        .put(Value::int(1), Value::string("test"))
        .put(Value::int(2), Value::string("bar"));

    assert!(left.merge(&right).equals(&expected));
}

#[test]
fn test_merge_is_right_biased() {
    let left = PersistentArrayMap::empty(modulo_hash_eq(2)).put(Value::int(1), Value::string("old"));
    let right = PersistentArrayMap::empty(modulo_hash_eq(2)).put(Value::int(1), Value::string("new"));

    let merged = left.merge(&right);
    assert_eq!(merged.count(), 1);
    assert_eq!(merged.find(&Value::int(1)), Some(&Value::string("new")));
}

#[test]
fn test_promotes_to_hash_map_past_max_size() {
    let mut map = PersistentMap::Array(PersistentArrayMap::empty(modulo_hash_eq(2)));
    for i in 0..=(PersistentArrayMap::MAX_SIZE as i64) {
        map = map.put(Value::int(i), Value::string("foo"));
    }

    assert!(matches!(map, PersistentMap::Hash(_)));
    assert_eq!(map.count(), PersistentArrayMap::MAX_SIZE + 1);
    for i in 0..=(PersistentArrayMap::MAX_SIZE as i64) {
        assert_eq!(map.find(&Value::int(i)), Some(&Value::string("foo")));
    }
}

#[test]
fn test_exactly_max_size_keys_stays_array_map() {
    let mut map = PersistentMap::Array(PersistentArrayMap::empty(modulo_hash_eq(2)));
    for i in 0..(PersistentArrayMap::MAX_SIZE as i64) {
        map = map.put(Value::int(i), Value::string("foo"));
    }

    assert!(matches!(map, PersistentMap::Array(_)));
    assert_eq!(map.count(), PersistentArrayMap::MAX_SIZE);
}

#[test]
fn test_replacing_at_max_size_does_not_promote() {
    let mut map = PersistentMap::Array(PersistentArrayMap::empty(modulo_hash_eq(2)));
    for i in 0..(PersistentArrayMap::MAX_SIZE as i64) {
        map = map.put(Value::int(i), Value::string("foo"));
    }
    // Overwriting an existing key adds no entry, so no promotion
    map = map.put(Value::int(0), Value::string("bar"));

    assert!(matches!(map, PersistentMap::Array(_)));
    assert_eq!(map.find(&Value::int(0)), Some(&Value::string("bar")));
}

#[test]
fn test_remove_existing_nil_key() {
    let map = PersistentArrayMap::empty(modulo_hash_eq(2)).put(Value::Nil, Value::string("test"));
    let removed = map.remove(&Value::Nil);

    assert_eq!(removed.count(), 0);
    assert!(!removed.contains(&Value::Nil));
    assert!(removed.find(&Value::Nil).is_none());
}

#[test]
fn test_remove_non_existing_key() {
    let map = PersistentArrayMap::empty(modulo_hash_eq(2)).remove(&Value::int(1));

    assert_eq!(map.count(), 0);
    assert!(!map.contains(&Value::int(1)));
}

#[test]
fn test_remove_leaves_other_entries() {
    let map = PersistentArrayMap::empty(modulo_hash_eq(2))
        .put(Value::int(2), Value::string("test"))
        .remove(&Value::int(1));

    assert_eq!(map.count(), 1);
    assert_eq!(map.find(&Value::int(2)), Some(&Value::string("test")));
    assert!(!map.contains(&Value::int(1)));
}

#[test]
fn test_remove_existing_key() {
    let map = PersistentArrayMap::empty(modulo_hash_eq(2))
        .put(Value::int(1), Value::string("test"))
        .remove(&Value::int(1));

    assert_eq!(map.count(), 0);
    assert!(!map.contains(&Value::int(1)));
}

#[test]
fn test_equals_is_insertion_order_independent() {
    let a = PersistentArrayMap::empty(modulo_hash_eq(2))
        .put(Value::int(1), Value::string("foo"))
        .put(Value::int(2), Value::string("bar"));
    let b = PersistentArrayMap::empty(modulo_hash_eq(2))
        .put(Value::int(2), Value::string("bar"))
        .put(Value::int(1), Value::string("foo"));

    assert!(a.equals(&b));
    assert!(b.equals(&a));
}

#[test]
fn test_equals_different_keys() {
    let a = PersistentArrayMap::empty(modulo_hash_eq(2))
        .put(Value::int(1), Value::string("foo"))
        .put(Value::int(2), Value::string("bar"));
    let b = PersistentArrayMap::empty(modulo_hash_eq(2))
        .put(Value::int(3), Value::string("bar"))
        .put(Value::int(4), Value::string("foo"));

    assert!(!a.equals(&b));
    assert!(!b.equals(&a));
}

#[test]
fn test_equals_different_length() {
    let a = PersistentArrayMap::empty(modulo_hash_eq(2))
        .put(Value::int(1), Value::string("foo"))
        .put(Value::int(2), Value::string("bar"))
        .put(Value::int(3), Value::string("foobar"));
    let b = PersistentArrayMap::empty(modulo_hash_eq(2))
        .put(Value::int(2), Value::string("bar"))
        .put(Value::int(1), Value::string("foo"));

    assert!(!a.equals(&b));
    assert!(!b.equals(&a));
}

#[test]
fn test_equals_different_values() {
    let a = PersistentArrayMap::empty(modulo_hash_eq(2))
        .put(Value::int(1), Value::string("foo"))
        .put(Value::int(2), Value::string("bar"));
    let b = PersistentArrayMap::empty(modulo_hash_eq(2))
        .put(Value::int(1), Value::string("bar"))
        .put(Value::int(2), Value::string("foo"));

    assert!(!a.equals(&b));
}

#[test]
fn test_iterates_in_insertion_order() {
    let map = PersistentArrayMap::empty(modulo_hash_eq(2))
        .put(Value::int(1), Value::string("foo"))
        .put(Value::int(2), Value::string("bar"))
        .put(Value::int(3), Value::string("foobar"));

    let keys: Vec<Value> = map.iter().map(|(k, _)| k.clone()).collect();
    assert_eq!(keys, vec![Value::int(1), Value::int(2), Value::int(3)]);
}

#[test]
fn test_iterate_on_empty() {
    let map = PersistentArrayMap::empty(modulo_hash_eq(2));
    assert_eq!(map.iter().count(), 0);
}

#[test]
fn test_hash_on_empty_map() {
    let map = PersistentArrayMap::empty(default_hash_eq());
    assert_eq!(map.hash(), 1);
}

#[test]
fn test_hash_on_single_entry_map() {
    // Seed 1 plus key_hash XOR value_hash; small non-negative integers hash
    // to themselves under the default strategy
    let map = PersistentArrayMap::empty(default_hash_eq()).put(Value::int(1), Value::int(10));
    assert_eq!(map.hash(), 1 + (1 ^ 10));
}

#[test]
fn test_hash_is_insertion_order_independent() {
    let a = PersistentArrayMap::empty(default_hash_eq())
        .put(Value::int(1), Value::int(10))
        .put(Value::int(2), Value::int(20));
    let b = PersistentArrayMap::empty(default_hash_eq())
        .put(Value::int(2), Value::int(20))
        .put(Value::int(1), Value::int(10));

    assert_eq!(a.hash(), b.hash());
}

#[test]
fn test_metadata() {
    let meta = Value::map(vec![(Value::string("doc"), Value::string("a map"))]);
    let map = PersistentArrayMap::empty(modulo_hash_eq(2)).with_meta(meta.clone());

    assert_eq!(map.meta(), Some(&meta));
    // Metadata never affects equality
    assert!(map.equals(&PersistentArrayMap::empty(modulo_hash_eq(2))));
}
