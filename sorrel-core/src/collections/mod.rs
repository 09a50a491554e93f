// sorrel-core - Persistent collections
// Copyright (c) 2025 The Sorrel Authors. MIT licensed.

//! Persistent collections for the Sorrel value model.
//!
//! All collections are immutable with structural sharing: a "mutating"
//! operation allocates only the path from the root to the changed slot and
//! returns a new version, while existing references keep observing the old
//! structure. Every collection takes a [`HashEq`] strategy at construction.

pub mod array_map;
pub mod hash_eq;
pub mod hash_map;
pub mod list;
pub mod map;
pub mod node;
pub mod set;
pub mod vector;

pub use array_map::PersistentArrayMap;
pub use hash_eq::{DefaultHashEq, HashEq, default_hash_eq};
pub use hash_map::{HashMapIter, PersistentHashMap};
pub use list::{ListIter, PersistentList};
pub use map::{MapIter, PersistentMap};
pub use node::CollisionNode;
pub use set::{PersistentSet, SetIter};
pub use vector::{PersistentVector, VectorIter};
