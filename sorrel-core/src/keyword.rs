// sorrel-core - Keyword type with interning
// Copyright (c) 2025 The Sorrel Authors. MIT licensed.

//! Keywords are self-evaluating bare-name identifiers.
//!
//! Unlike symbols, keywords carry no namespace: `:foo` is just the name
//! `foo`. They are interned, so equality and hashing are pointer operations
//! with structural meaning, and identical keywords share storage for the
//! lifetime of the program (interned keywords are never deallocated).

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, OnceLock};

/// A keyword: an interned, self-evaluating name.
///
/// Prints with a leading colon, e.g. `:foo`.
#[derive(Clone)]
pub struct Keyword {
    inner: Arc<str>,
}

/// Global keyword interner
static KEYWORD_INTERNER: OnceLock<Mutex<HashMap<String, Arc<str>>>> = OnceLock::new();

fn get_interner() -> &'static Mutex<HashMap<String, Arc<str>>> {
    KEYWORD_INTERNER.get_or_init(|| Mutex::new(HashMap::new()))
}

impl Keyword {
    /// Create a new keyword.
    pub fn new(name: &str) -> Self {
        let mut interner = get_interner().lock().expect(
            "Keyword interner mutex poisoned: another thread panicked while holding the lock",
        );
        let inner = if let Some(existing) = interner.get(name) {
            Arc::clone(existing)
        } else {
            let interned: Arc<str> = Arc::from(name);
            interner.insert(name.to_string(), Arc::clone(&interned));
            interned
        };
        Keyword { inner }
    }

    /// Parse a keyword from a string like ":foo". The leading colon is
    /// optional.
    pub fn parse(s: &str) -> Self {
        Keyword::new(s.strip_prefix(':').unwrap_or(s))
    }

    /// Get the name.
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, ":{}", self.inner)
    }
}

impl fmt::Debug for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Keyword({})", self)
    }
}

impl PartialEq for Keyword {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        // Due to interning, pointer comparison is sufficient
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Keyword {}

impl Hash for Keyword {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Use pointer hash for interned keywords
        Arc::as_ptr(&self.inner).hash(state);
    }
}

// ============================================================================
// Tests
// ============================================================================
