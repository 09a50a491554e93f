// sorrel-core - Persistent set
// Copyright (c) 2025 The Sorrel Authors. MIT licensed.

//! Persistent set, represented as a map from element to `true`.
//!
//! Inherits the map's representation strategy: array-backed while small,
//! trie-backed past the promotion threshold.

use std::fmt;
use std::rc::Rc;

use crate::collections::hash_eq::HashEq;
use crate::collections::map::{MapIter, PersistentMap};
use crate::value::Value;

/// Persistent set of values, unordered.
#[derive(Clone)]
pub struct PersistentSet {
    map: PersistentMap,
    meta: Option<Rc<Value>>,
}

impl PersistentSet {
    /// Create an empty set with the given strategy.
    pub fn empty(hash_eq: Rc<dyn HashEq>) -> Self {
        PersistentSet {
            map: PersistentMap::empty(hash_eq),
            meta: None,
        }
    }

    /// Build from elements; duplicates collapse.
    pub fn from_values(hash_eq: Rc<dyn HashEq>, values: Vec<Value>) -> Self {
        let mut set = PersistentSet::empty(hash_eq);
        for v in values {
            set = set.put(v);
        }
        set
    }

    /// Number of elements.
    pub fn count(&self) -> usize {
        self.map.count()
    }

    /// Whether the set has no elements.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Whether `value` is a member.
    pub fn contains(&self, value: &Value) -> bool {
        self.map.contains(value)
    }

    /// Return a new set including `value`.
    pub fn put(&self, value: Value) -> Self {
        PersistentSet {
            map: self.map.put(value, Value::Bool(true)),
            meta: self.meta.clone(),
        }
    }

    /// Return a new set without `value`.
    pub fn remove(&self, value: &Value) -> Self {
        PersistentSet {
            map: self.map.remove(value),
            meta: self.meta.clone(),
        }
    }

    /// Union with `other`; membership is representation-independent.
    pub fn merge(&self, other: &PersistentSet) -> Self {
        PersistentSet {
            map: self.map.merge(&other.map),
            meta: self.meta.clone(),
        }
    }

    /// Iterate members in the underlying map's deterministic order.
    pub fn iter(&self) -> SetIter<'_> {
        SetIter {
            inner: self.map.iter(),
        }
    }

    /// Order-independent structural equality.
    pub fn equals(&self, other: &PersistentSet) -> bool {
        self.count() == other.count() && self.iter().all(|v| other.contains(v))
    }

    /// Order-independent aggregate hash (seed 1, wrapping sum of member
    /// hashes).
    pub fn hash(&self) -> u32 {
        let hash_eq = self.map.hash_eq();
        self.iter()
            .fold(1u32, |acc, v| acc.wrapping_add(hash_eq.hash(v)))
    }

    /// Attach metadata, replacing any existing metadata.
    pub fn with_meta(&self, meta: Value) -> Self {
        let mut set = self.clone();
        set.meta = Some(Rc::new(meta));
        set
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
}

impl PartialEq for PersistentSet {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for PersistentSet {}

impl fmt::Debug for PersistentSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{{")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, "}}")
    }
}

/// Iterator over set members.
pub struct SetIter<'a> {
    inner: MapIter<'a>,
}

impl<'a> Iterator for SetIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(k, _)| k)
    }
}

// ============================================================================
// Tests
// ============================================================================
