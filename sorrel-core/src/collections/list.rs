// sorrel-core - Persistent list
// Copyright (c) 2025 The Sorrel Authors. MIT licensed.

//! Persistent singly-linked list.
//!
//! Prepending shares the entire existing chain; `first`/`next`/`rest` are the
//! sequence accessors the binding deconstructor's emitted code vocabulary
//! (`first`, `next`) evaluates against.

use std::fmt;
use std::rc::Rc;

use crate::collections::hash_eq::HashEq;
use crate::value::Value;

struct ConsCell {
    value: Value,
    next: Option<Rc<ConsCell>>,
}

/// Persistent linked list with O(1) prepend.
#[derive(Clone)]
pub struct PersistentList {
    hash_eq: Rc<dyn HashEq>,
    head: Option<Rc<ConsCell>>,
    count: usize,
    meta: Option<Rc<Value>>,
}

impl PersistentList {
    /// Create an empty list with the given strategy.
    pub fn empty(hash_eq: Rc<dyn HashEq>) -> Self {
        PersistentList {
            hash_eq,
            head: None,
            count: 0,
            meta: None,
        }
    }

    /// Build from elements, preserving their order.
    pub fn from_values(hash_eq: Rc<dyn HashEq>, values: Vec<Value>) -> Self {
        let mut list = PersistentList::empty(hash_eq);
        for v in values.into_iter().rev() {
            list = list.cons(v);
        }
        list
    }

    /// Number of elements.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether the list has no elements.
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Return a new list with `value` prepended.
    pub fn cons(&self, value: Value) -> Self {
        PersistentList {
            hash_eq: Rc::clone(&self.hash_eq),
            head: Some(Rc::new(ConsCell {
                value,
                next: self.head.clone(),
            })),
            count: self.count + 1,
            meta: self.meta.clone(),
        }
    }

    /// First element, or `None` when empty.
    pub fn first(&self) -> Option<&Value> {
        self.head.as_ref().map(|cell| &cell.value)
    }

    /// All elements but the first, or `None` when that would be empty.
    pub fn next(&self) -> Option<Self> {
        let head = self.head.as_ref()?;
        head.next.as_ref()?;
        Some(PersistentList {
            hash_eq: Rc::clone(&self.hash_eq),
            head: head.next.clone(),
            count: self.count - 1,
            meta: None,
        })
    }

    /// All elements but the first; the empty list when exhausted.
    pub fn rest(&self) -> Self {
        self.next().unwrap_or_else(|| PersistentList {
            hash_eq: Rc::clone(&self.hash_eq),
            head: None,
            count: 0,
            meta: None,
        })
    }

    /// Iterate elements front to back.
    pub fn iter(&self) -> ListIter<'_> {
        ListIter {
            cell: self.head.as_deref(),
        }
    }

    /// Order-sensitive structural equality.
    pub fn equals(&self, other: &PersistentList) -> bool {
        self.count == other.count
            && self
                .iter()
                .zip(other.iter())
                .all(|(a, b)| self.hash_eq.equals(a, b))
    }

    /// Order-sensitive accumulated hash.
    pub fn hash(&self) -> u32 {
        self.iter().fold(1u32, |acc, v| {
            acc.wrapping_mul(31).wrapping_add(self.hash_eq.hash(v))
        })
    }

    /// Attach metadata, replacing any existing metadata.
    pub fn with_meta(&self, meta: Value) -> Self {
        let mut list = self.clone();
        list.meta = Some(Rc::new(meta));
        list
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

impl PartialEq for PersistentList {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for PersistentList {}

impl fmt::Debug for PersistentList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, v) in self.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", v)?;
        }
        write!(f, ")")
    }
}

/// Iterator following the cons chain.
pub struct ListIter<'a> {
    cell: Option<&'a ConsCell>,
}

impl<'a> Iterator for ListIter<'a> {
    type Item = &'a Value;

    fn next(&mut self) -> Option<Self::Item> {
        let cell = self.cell?;
        self.cell = cell.next.as_deref();
        Some(&cell.value)
    }
}

// ============================================================================
// Tests
// ============================================================================
