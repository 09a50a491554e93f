// sorrel-core - Common test utilities
// Copyright (c) 2025 The Sorrel Authors. MIT licensed.

//! Shared helpers for collection integration tests.
//!
//! The star of the show is [`ModuloHashEq`], a deliberately degenerate
//! strategy that collapses integer hashes into a handful of buckets so tests
//! can force hash collisions deterministically while keeping structural
//! equality intact.

#![allow(dead_code)]

use std::rc::Rc;

pub use sorrel_core::{
    DefaultHashEq, HashEq, PersistentArrayMap, PersistentHashMap, PersistentMap, Value,
    default_hash_eq,
};

/// Strategy that hashes integers modulo a small constant and everything else
/// like the default strategy. Equality stays structural, so distinct keys
/// with equal hashes exercise the collision paths.
pub struct ModuloHashEq {
    modulo: u32,
}

impl ModuloHashEq {
    /// `modulo` must be at least 1; 1 makes every integer collide.
    pub fn new(modulo: u32) -> Self {
        assert!(modulo >= 1);
        ModuloHashEq { modulo }
    }
}

impl HashEq for ModuloHashEq {
    fn hash(&self, value: &Value) -> u32 {
        match value {
            Value::Int(n) => n.rem_euclid(i64::from(self.modulo)) as u32,
            other => DefaultHashEq.hash(other),
        }
    }

    fn equals(&self, a: &Value, b: &Value) -> bool {
        a == b
    }
}

/// Shorthand for an `Rc`'d modulo strategy.
pub fn modulo_hash_eq(modulo: u32) -> Rc<dyn HashEq> {
    Rc::new(ModuloHashEq::new(modulo))
}

/// Build a map (through the facade) from integer key/value pairs.
pub fn map_of(hash_eq: Rc<dyn HashEq>, pairs: &[(i64, i64)]) -> PersistentMap {
    let mut map = PersistentMap::empty(hash_eq);
    for &(k, v) in pairs {
        map = map.put(Value::int(k), Value::int(v));
    }
    map
}
