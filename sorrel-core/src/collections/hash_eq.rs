// sorrel-core - Hash/equality strategy for persistent collections
// Copyright (c) 2025 The Sorrel Authors. MIT licensed.

//! Pluggable hash/equality strategy.
//!
//! Every persistent collection takes a strategy at construction instead of
//! hard-coding how keys hash and compare. The contract:
//!
//! - `hash` is total and deterministic within one process
//! - `equals` is an equivalence relation, distinct from identity
//! - `equals(a, b)` implies `hash(a) == hash(b)`
//!
//! Violating the contract is undefined behaviour from the collections'
//! perspective; it is not detected. Tests substitute degenerate strategies
//! (see the modulo hasher in the integration tests) to force hash collisions
//! deterministically.

use std::rc::Rc;

use crate::value::Value;

/// A hash/equality strategy: exactly two operations, injected into every
/// collection constructor.
pub trait HashEq {
    /// Hash a value. Must be consistent with [`HashEq::equals`].
    fn hash(&self, value: &Value) -> u32;

    /// Structural equality. Two independently constructed, structurally
    /// equal collections must compare equal.
    fn equals(&self, a: &Value, b: &Value) -> bool;
}

/// The default strategy used by the reader-facing constructors.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHashEq;

const FNV_OFFSET: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 16_777_619;

fn fnv1a(seed: u32, bytes: &[u8]) -> u32 {
    let mut h = seed;
    for &b in bytes {
        h ^= u32::from(b);
        h = h.wrapping_mul(FNV_PRIME);
    }
    h
}

fn fold64(x: u64) -> u32 {
    (x ^ (x >> 32)) as u32
}

impl HashEq for DefaultHashEq {
    fn hash(&self, value: &Value) -> u32 {
        match value {
            Value::Nil => 0,
            Value::Bool(b) => {
                if *b {
                    1231
                } else {
                    1237
                }
            }
            Value::Int(n) => fold64(*n as u64),
            Value::Float(f) => fold64(f.to_bits()),
            Value::String(s) => fnv1a(FNV_OFFSET, s.as_bytes()),
            Value::Keyword(kw) => fnv1a(fnv1a(FNV_OFFSET, b":"), kw.name().as_bytes()),
            // Symbol hash covers the name only, even though equality also
            // compares the namespace. Namespaced symbols sharing a name
            // therefore collide; equal symbols still hash equal, which is
            // all the contract requires.
            Value::Symbol(sym) => fnv1a(FNV_OFFSET, sym.name().as_bytes()),
            Value::List(l) => l.hash(),
            Value::Vector(v) => v.hash(),
            Value::Map(m) => m.hash(),
            Value::Set(s) => s.hash(),
            Value::Opaque(o) => fold64(Rc::as_ptr(o) as *const u8 as usize as u64),
        }
    }

    fn equals(&self, a: &Value, b: &Value) -> bool {
        a == b
    }
}

thread_local! {
    static DEFAULT_HASH_EQ: Rc<dyn HashEq> = Rc::new(DefaultHashEq);
}

/// Shared instance of the default strategy.
pub fn default_hash_eq() -> Rc<dyn HashEq> {
    DEFAULT_HASH_EQ.with(Rc::clone)
}

// ============================================================================
// Tests
// ============================================================================
