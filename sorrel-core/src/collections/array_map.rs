// sorrel-core - Small persistent map with linear scan
// Copyright (c) 2025 The Sorrel Authors. MIT licensed.

//! Persistent array map: a flat, ordered pair list for small maps.
//!
//! Lookup is a linear scan with the equality strategy. A `put` that would
//! grow the map beyond [`PersistentArrayMap::MAX_SIZE`] distinct keys
//! promotes to a [`PersistentHashMap`] instead, the only way a hash map is
//! produced from an array map, and one-directional. Iteration is insertion
//! order.

use std::fmt;
use std::rc::Rc;

use crate::collections::hash_eq::HashEq;
use crate::collections::hash_map::PersistentHashMap;
use crate::collections::map::PersistentMap;
use crate::error::{Error, Result};
use crate::value::Value;

/// Small persistent map backed by an ordered pair list.
#[derive(Clone)]
pub struct PersistentArrayMap {
    hash_eq: Rc<dyn HashEq>,
    pub(crate) entries: Rc<[(Value, Value)]>,
    meta: Option<Rc<Value>>,
}

impl PersistentArrayMap {
    /// Maximum number of entries before `put` promotes to a hash map.
    pub const MAX_SIZE: usize = 8;

    /// Create an empty array map with the given strategy.
    pub fn empty(hash_eq: Rc<dyn HashEq>) -> Self {
        PersistentArrayMap {
            hash_eq,
            entries: Rc::from(Vec::new()),
            meta: None,
        }
    }

    /// Build from a flat `[k1, v1, k2, v2, …]` list.
    ///
    /// Fails on an odd-length list. Duplicate keys keep the rightmost value;
    /// more than [`Self::MAX_SIZE`] distinct keys promote, so the result is
    /// the representation-hiding [`PersistentMap`].
    pub fn from_kvs(hash_eq: Rc<dyn HashEq>, kvs: Vec<Value>) -> Result<PersistentMap> {
        if kvs.len() % 2 != 0 {
            return Err(Error::UnevenKeyValueList { len: kvs.len() });
        }
        let mut map = PersistentMap::Array(PersistentArrayMap::empty(hash_eq));
        let mut iter = kvs.into_iter();
        while let (Some(k), Some(v)) = (iter.next(), iter.next()) {
            map = map.put(k, v);
        }
        Ok(map)
    }

    /// Number of entries.
    pub fn count(&self) -> usize {
        self.entries.len()
    }

    fn index_of(&self, key: &Value) -> Option<usize> {
        self.entries
            .iter()
            .position(|(k, _)| self.hash_eq.equals(k, key))
    }

    /// Look up the stored entry for `key`.
    pub fn entry(&self, key: &Value) -> Option<(&Value, &Value)> {
        let i = self.index_of(key)?;
        let (k, v) = &self.entries[i];
        Some((k, v))
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
    ///
    /// Returns the facade type because growth past [`Self::MAX_SIZE`]
    /// promotes to a [`PersistentHashMap`].
    pub fn put(&self, key: Value, value: Value) -> PersistentMap {
        if let Some(i) = self.index_of(&key) {
            let mut entries: Vec<(Value, Value)> = self.entries.to_vec();
            entries[i] = (key, value);
            return PersistentMap::Array(PersistentArrayMap {
                hash_eq: Rc::clone(&self.hash_eq),
                entries: Rc::from(entries),
                meta: self.meta.clone(),
            });
        }

        if self.entries.len() >= Self::MAX_SIZE {
            // Promote: hand every entry plus the new one to a trie map.
            let mut map = PersistentHashMap::empty(Rc::clone(&self.hash_eq));
            for (k, v) in self.entries.iter() {
                map = map.put(k.clone(), v.clone());
            }
            map = map.put(key, value);
            map.set_meta(self.meta.clone());
            return PersistentMap::Hash(map);
        }

        let mut entries: Vec<(Value, Value)> = self.entries.to_vec();
        entries.push((key, value));
        PersistentMap::Array(PersistentArrayMap {
            hash_eq: Rc::clone(&self.hash_eq),
            entries: Rc::from(entries),
            meta: self.meta.clone(),
        })
    }

    /// Return a new map without `key`. Absent keys leave the map unchanged.
    pub fn remove(&self, key: &Value) -> Self {
        let i = match self.index_of(key) {
            Some(i) => i,
            None => return self.clone(),
        };
        let mut entries: Vec<(Value, Value)> = self.entries.to_vec();
        entries.remove(i);
        PersistentArrayMap {
            hash_eq: Rc::clone(&self.hash_eq),
            entries: Rc::from(entries),
            meta: self.meta.clone(),
        }
    }

    /// Right-biased merge: entries of `other` overwrite on key conflict.
    /// May promote.
    pub fn merge(&self, other: &PersistentMap) -> PersistentMap {
        let mut map = PersistentMap::Array(self.clone());
        for (k, v) in other.iter() {
            map = map.put(k.clone(), v.clone());
        }
        map
    }

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Structural, order-independent equality.
    pub fn equals(&self, other: &PersistentArrayMap) -> bool {
        self.count() == other.count()
            && self.iter().all(|(k, v)| {
                matches!(other.entry(k), Some((_, other_v)) if self.hash_eq.equals(v, other_v))
            })
    }

    /// Aggregate hash: seed 1 plus the wrapping sum of `key_hash ^ value_hash`
    /// per entry. The empty map hashes to exactly 1.
    pub fn hash(&self) -> u32 {
        self.iter().fold(1u32, |acc, (k, v)| {
            acc.wrapping_add(self.hash_eq.hash(k) ^ self.hash_eq.hash(v))
        })
    }

    /// Attach metadata, replacing any existing metadata.
    pub fn with_meta(&self, meta: Value) -> Self {
        let mut map = self.clone();
        map.meta = Some(Rc::new(meta));
        map
    }

    /// Get the attached metadata, if any.
    pub fn meta(&self) -> Option<&Value> {
        self.meta.as_deref()
    }

    /// Detach any metadata.
    pub fn without_meta(&self) -> Self {
        let mut detached = self.clone();
        detached.meta = None;
        detached
    }

    pub(crate) fn hash_eq(&self) -> &Rc<dyn HashEq> {
        &self.hash_eq
    }
}

impl PartialEq for PersistentArrayMap {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for PersistentArrayMap {}

impl fmt::Debug for PersistentArrayMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{} {}", k, v)?;
        }
        write!(f, "}}")
    }
}
