// sorrel-core - Representation-hiding persistent map
// Copyright (c) 2025 The Sorrel Authors. MIT licensed.

//! The map type callers see.
//!
//! Small maps are array-backed; a `put` past the array map's size threshold
//! silently switches to the trie-backed representation. The representation is
//! a value-model optimization and never demotes.

use std::fmt;
use std::rc::Rc;

use crate::collections::array_map::PersistentArrayMap;
use crate::collections::hash_eq::HashEq;
use crate::collections::hash_map::{HashMapIter, PersistentHashMap};
use crate::error::Result;
use crate::value::Value;

/// Persistent map with a transparent array/trie representation.
#[derive(Clone)]
pub enum PersistentMap {
    Array(PersistentArrayMap),
    Hash(PersistentHashMap),
}

impl PersistentMap {
    /// Create an empty (array-backed) map with the given strategy.
    pub fn empty(hash_eq: Rc<dyn HashEq>) -> Self {
        PersistentMap::Array(PersistentArrayMap::empty(hash_eq))
    }

    /// Build from key/value pairs, left to right.
    pub fn from_pairs(hash_eq: Rc<dyn HashEq>, pairs: Vec<(Value, Value)>) -> Self {
        let mut map = PersistentMap::empty(hash_eq);
        for (k, v) in pairs {
            map = map.put(k, v);
        }
        map
    }

    /// Build from a flat `[k1, v1, k2, v2, …]` list. Fails on odd length.
    pub fn from_kvs(hash_eq: Rc<dyn HashEq>, kvs: Vec<Value>) -> Result<Self> {
        PersistentArrayMap::from_kvs(hash_eq, kvs)
    }

    /// Number of entries.
    pub fn count(&self) -> usize {
        match self {
            PersistentMap::Array(m) => m.count(),
            PersistentMap::Hash(m) => m.count(),
        }
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.count() == 0
    }

    /// Look up the stored entry for `key`.
    pub fn entry(&self, key: &Value) -> Option<(&Value, &Value)> {
        match self {
            PersistentMap::Array(m) => m.entry(key),
            PersistentMap::Hash(m) => m.entry(key),
        }
    }

    /// Look up the value for `key`, or `None` when absent.
    pub fn find(&self, key: &Value) -> Option<&Value> {
        self.entry(key).map(|(_, v)| v)
    }

    /// Whether `key` is present (a stored `nil` value still counts).
    pub fn contains(&self, key: &Value) -> bool {
        self.entry(key).is_some()
    }

    /// Return a new map with `key` bound to `value`.
    pub fn put(&self, key: Value, value: Value) -> Self {
        match self {
            PersistentMap::Array(m) => m.put(key, value),
            PersistentMap::Hash(m) => PersistentMap::Hash(m.put(key, value)),
        }
    }

    /// Return a new map without `key`. The representation never demotes.
    pub fn remove(&self, key: &Value) -> Self {
        match self {
            PersistentMap::Array(m) => PersistentMap::Array(m.remove(key)),
            PersistentMap::Hash(m) => PersistentMap::Hash(m.remove(key)),
        }
    }

    /// Right-biased merge: entries of `other` overwrite on key conflict.
    pub fn merge(&self, other: &PersistentMap) -> Self {
        match self {
            PersistentMap::Array(m) => m.merge(other),
            PersistentMap::Hash(m) => PersistentMap::Hash(m.merge(other)),
        }
    }

    /// Structural, order-independent equality over entries.
    pub fn equals(&self, other: &PersistentMap) -> bool {
        if self.count() != other.count() {
            return false;
        }
        let hash_eq = self.hash_eq();
        self.iter().all(|(k, v)| match other.entry(k) {
            Some((_, other_v)) => hash_eq.equals(v, other_v),
            None => false,
        })
    }

    /// Iterate entries in the representation's deterministic order:
    /// insertion order for array maps, trie order for hash maps.
    pub fn iter(&self) -> MapIter<'_> {
        match self {
            PersistentMap::Array(m) => MapIter::Array(m.entries.iter()),
            PersistentMap::Hash(m) => MapIter::Hash(m.iter()),
        }
    }

    /// Aggregate, insertion-order-independent hash (seed 1).
    pub fn hash(&self) -> u32 {
        match self {
            PersistentMap::Array(m) => m.hash(),
            PersistentMap::Hash(m) => m.hash(),
        }
    }

    /// Attach metadata, replacing any existing metadata.
    pub fn with_meta(&self, meta: Value) -> Self {
        match self {
            PersistentMap::Array(m) => PersistentMap::Array(m.with_meta(meta)),
            PersistentMap::Hash(m) => PersistentMap::Hash(m.with_meta(meta)),
        }
    }

    /// Get the attached metadata, if any.
    pub fn meta(&self) -> Option<&Value> {
        match self {
            PersistentMap::Array(m) => m.meta(),
            PersistentMap::Hash(m) => m.meta(),
        }
    }

    /// Detach any metadata.
    pub fn without_meta(&self) -> Self {
        match self {
            PersistentMap::Array(m) => PersistentMap::Array(m.without_meta()),
            PersistentMap::Hash(m) => PersistentMap::Hash(m.without_meta()),
        }
    }

    pub(crate) fn hash_eq(&self) -> &Rc<dyn HashEq> {
        match self {
            PersistentMap::Array(m) => m.hash_eq(),
            PersistentMap::Hash(m) => m.hash_eq(),
        }
    }
}

impl PartialEq for PersistentMap {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for PersistentMap {}

impl fmt::Debug for PersistentMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistentMap::Array(m) => fmt::Debug::fmt(m, f),
            PersistentMap::Hash(m) => fmt::Debug::fmt(m, f),
        }
    }
}

/// Iterator over either map representation.
pub enum MapIter<'a> {
    Array(std::slice::Iter<'a, (Value, Value)>),
    Hash(HashMapIter<'a>),
}

impl<'a> Iterator for MapIter<'a> {
    type Item = (&'a Value, &'a Value);

    fn next(&mut self) -> Option<Self::Item> {
        match self {
            MapIter::Array(iter) => iter.next().map(|(k, v)| (k, v)),
            MapIter::Hash(iter) => iter.next(),
        }
    }
}
