// sorrel-core - Symbol type with interning
// Copyright (c) 2025 The Sorrel Authors. MIT licensed.

//! Symbols are identifiers that may be optionally namespaced.
//!
//! # Interning
//!
//! Symbols are interned using a global string interner, meaning that two
//! symbols with the same namespace and name will share the same underlying
//! storage. Equality is therefore a pointer comparison while still meaning
//! structural equality: two independently created `foo/bar` symbols compare
//! equal.
//!
//! # Memory Behaviour
//!
//! Interned symbols are never deallocated. The interner holds strong
//! references (`Arc`) to every symbol created during the program's lifetime,
//! so memory grows monotonically with unique symbols. Generated symbols (see
//! [`SymbolGenerator`]) accumulate too; a compiler pipeline creates a bounded
//! number per compilation unit.
//!
//! # Thread Safety
//!
//! The interner is protected by a `Mutex`, making symbol creation
//! thread-safe. Lookup and comparison are lock-free after creation.

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Mutex, OnceLock};

/// A symbol with optional namespace.
///
/// Symbols are interned, so two symbols with the same namespace and name
/// share the same underlying storage.
#[derive(Clone)]
pub struct Symbol {
    inner: Arc<SymbolInner>,
}

#[derive(Debug)]
struct SymbolInner {
    namespace: Option<Arc<str>>,
    name: Arc<str>,
}

/// Global symbol interner
static SYMBOL_INTERNER: OnceLock<Mutex<SymbolInterner>> = OnceLock::new();

/// Key type for the interner: (namespace, name)
type InternerKey = (Option<Arc<str>>, Arc<str>);

struct SymbolInterner {
    /// Map from (namespace, name) to interned symbol
    symbols: HashMap<InternerKey, Arc<SymbolInner>>,
    /// Interned strings for reuse
    strings: HashMap<String, Arc<str>>,
}

impl SymbolInterner {
    fn new() -> Self {
        SymbolInterner {
            symbols: HashMap::new(),
            strings: HashMap::new(),
        }
    }

    fn intern_string(&mut self, s: &str) -> Arc<str> {
        if let Some(interned) = self.strings.get(s) {
            Arc::clone(interned)
        } else {
            let interned: Arc<str> = Arc::from(s);
            self.strings.insert(s.to_string(), Arc::clone(&interned));
            interned
        }
    }

    fn intern(&mut self, namespace: Option<&str>, name: &str) -> Arc<SymbolInner> {
        let ns = namespace.map(|s| self.intern_string(s));
        let n = self.intern_string(name);

        let key = (ns.clone(), n.clone());
        if let Some(existing) = self.symbols.get(&key) {
            Arc::clone(existing)
        } else {
            let inner = Arc::new(SymbolInner {
                namespace: ns,
                name: n,
            });
            self.symbols.insert(key, Arc::clone(&inner));
            inner
        }
    }
}

fn get_interner() -> &'static Mutex<SymbolInterner> {
    SYMBOL_INTERNER.get_or_init(|| Mutex::new(SymbolInterner::new()))
}

impl Symbol {
    /// Special-form and primitive names the analyzer recognises. Keeping them
    /// here gives every pass one spelling to agree on.
    pub const NAME_DEF: &'static str = "def";
    pub const NAME_FN: &'static str = "fn";
    pub const NAME_LET: &'static str = "let";
    pub const NAME_IF: &'static str = "if";
    pub const NAME_DO: &'static str = "do";
    pub const NAME_QUOTE: &'static str = "quote";
    pub const NAME_LOOP: &'static str = "loop";
    pub const NAME_RECUR: &'static str = "recur";
    pub const NAME_FOREACH: &'static str = "foreach";
    pub const NAME_APPLY: &'static str = "apply";
    pub const NAME_THROW: &'static str = "throw";
    pub const NAME_TRY: &'static str = "try";
    /// Sequence accessors emitted by the binding deconstructor.
    pub const NAME_FIRST: &'static str = "first";
    pub const NAME_NEXT: &'static str = "next";
    /// Indexed/keyed access primitive emitted by the binding deconstructor.
    pub const NAME_ARRAY_GET: &'static str = "aget";

    /// Create a new symbol with no namespace.
    pub fn new(name: &str) -> Self {
        let inner = get_interner()
            .lock()
            .expect(
                "Symbol interner mutex poisoned: another thread panicked while holding the lock",
            )
            .intern(None, name);
        Symbol { inner }
    }

    /// Create a new symbol with a namespace.
    pub fn with_namespace(namespace: &str, name: &str) -> Self {
        let inner = get_interner()
            .lock()
            .expect(
                "Symbol interner mutex poisoned: another thread panicked while holding the lock",
            )
            .intern(Some(namespace), name);
        Symbol { inner }
    }

    /// Parse a symbol from a string like "foo" or "ns/foo".
    pub fn parse(s: &str) -> Self {
        if let Some(slash_pos) = s.find('/') {
            // Handle special case of "/" symbol
            if s == "/" {
                return Symbol::new("/");
            }
            let ns = &s[..slash_pos];
            let name = &s[slash_pos + 1..];
            Symbol::with_namespace(ns, name)
        } else {
            Symbol::new(s)
        }
    }

    /// Get the namespace, if any.
    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.inner.namespace.as_deref()
    }

    /// Get the name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Check if this symbol has a namespace.
    #[must_use]
    pub fn has_namespace(&self) -> bool {
        self.inner.namespace.is_some()
    }

    /// Get the printed form, "ns/name" or "name".
    #[must_use]
    pub fn full_name(&self) -> String {
        match &self.inner.namespace {
            Some(ns) => format!("{}/{}", ns, self.inner.name),
            None => self.inner.name.to_string(),
        }
    }
}

impl fmt::Display for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(ns) = &self.inner.namespace {
            write!(f, "{}/{}", ns, self.inner.name)
        } else {
            write!(f, "{}", self.inner.name)
        }
    }
}

impl fmt::Debug for Symbol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Symbol({})", self)
    }
}

impl PartialEq for Symbol {
    fn eq(&self, other: &Self) -> bool {
        // Due to interning, pointer comparison is sufficient
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Symbol {}

impl Hash for Symbol {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Use pointer hash for interned symbols
        Arc::as_ptr(&self.inner).hash(state);
    }
}

// ============================================================================
// SymbolGenerator
// ============================================================================

/// Generator for fresh, compiler-internal symbols.
///
/// Each generator owns its counter, so independent passes (and tests) get
/// deterministic sequences without sharing global state. The counter starts
/// at 1 and only restarts when [`SymbolGenerator::reset`] is called
/// explicitly; generated names are unique for the lifetime of one generator.
#[derive(Debug)]
pub struct SymbolGenerator {
    counter: u64,
}

impl SymbolGenerator {
    /// Prefix used when the caller does not supply one.
    pub const DEFAULT_PREFIX: &'static str = "__gensym_";

    /// Create a generator whose first symbol is `__gensym_1`.
    pub fn new() -> Self {
        SymbolGenerator { counter: 1 }
    }

    /// Generate a fresh symbol with the default prefix.
    pub fn r#gen(&mut self) -> Symbol {
        self.gen_with_prefix(Self::DEFAULT_PREFIX)
    }

    /// Generate a fresh symbol with a caller-chosen prefix.
    pub fn gen_with_prefix(&mut self, prefix: &str) -> Symbol {
        let n = self.counter;
        self.counter += 1;
        Symbol::new(&format!("{}{}", prefix, n))
    }

    /// Restart the counter at 1.
    ///
    /// Intended for deterministic tests and REPL session restarts only; it
    /// must not race with live generation.
    pub fn reset(&mut self) {
        self.counter = 1;
    }
}

impl Default for SymbolGenerator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// Tests
// ============================================================================
