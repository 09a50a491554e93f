// sorrel-compiler - Binding pattern lowering
// Copyright (c) 2025 The Sorrel Authors. MIT licensed.

//! Lowering of nested binding patterns into flat binding sequences.
//!
//! `let`, `loop`, `foreach`, and parameter lists all accept nested patterns:
//! vectors for positional destructuring, maps for keyed (or integer-indexed)
//! destructuring, bare symbols for direct binds, and `nil` to evaluate a
//! value without binding it. The [`Deconstructor`] rewrites every pattern
//! into an ordered sequence of `(symbol, expression)` pairs that only ever
//! bind a plain symbol, introducing fresh symbols for the intermediate
//! values. Expressions are ordinary [`Value`]s built from the `first`,
//! `next`, and `aget` primitives.
//!
//! A lowered binding may reference any symbol bound earlier in the same
//! sequence and never a later one, so an evaluator that binds left to right
//! reproduces exactly the bindings the nested pattern describes.
//!
//! For example, `(let [[a] [10]])` lowers to:
//!
//! ```text
//! __gensym_1 = [10]
//! __gensym_2 = (first __gensym_1)
//! __gensym_3 = (next __gensym_1)
//! a          = __gensym_2
//! ```
//!
//! Pattern arity and shape validation is the calling analyzer's job; the
//! injected [`BindingValidator`] is its hook for rejecting patterns with a
//! located error before lowering begins.

use tracing::trace;

use sorrel_core::value::Value;
use sorrel_core::{PersistentMap, PersistentVector, Symbol, SymbolGenerator};

use crate::error::{Error, Result};

/// An ordered sequence of primitive symbol-to-expression bindings.
pub type Bindings = Vec<(Symbol, Value)>;

/// Validation hook the wrapping special-form analyzers implement.
///
/// Called once per top-level pattern before lowering. Implementations that
/// track source positions reject unsupported patterns here with a located
/// compiler error; the deconstructor itself reports unlocated errors only.
pub trait BindingValidator {
    fn assert_supported_binding(&self, pattern: &Value) -> Result<()>;
}

/// Default validator accepting exactly the pattern kinds the deconstructor
/// can lower.
#[derive(Debug, Default, Clone, Copy)]
pub struct PatternValidator;

impl BindingValidator for PatternValidator {
    fn assert_supported_binding(&self, pattern: &Value) -> Result<()> {
        match pattern {
            Value::Nil | Value::Symbol(_) | Value::Vector(_) | Value::Map(_) => Ok(()),
            other => Err(Error::UnsupportedBinding {
                type_name: other.type_name(),
            }),
        }
    }
}

/// States of the sequence-pattern walk.
#[derive(PartialEq)]
enum SeqState {
    /// Walking positional elements
    Each,
    /// Saw `&`, the next element binds the remaining sequence
    Rest,
    /// Rest pattern consumed; nothing may follow
    Done,
}

/// Lowers binding patterns into flat binding sequences.
///
/// Owns its [`SymbolGenerator`], so fresh-symbol numbering is deterministic
/// per instance: a new deconstructor always starts at `__gensym_1`.
pub struct Deconstructor {
    validator: Box<dyn BindingValidator>,
    generator: SymbolGenerator,
}

impl Deconstructor {
    /// Create a deconstructor with the given validation hook.
    pub fn new(validator: Box<dyn BindingValidator>) -> Self {
        Deconstructor {
            validator,
            generator: SymbolGenerator::new(),
        }
    }

    /// Lower a flat `[pattern value pattern value …]` binding form, left to
    /// right, concatenating the lowered bindings of every pair.
    pub fn deconstruct(&mut self, form: &PersistentVector) -> Result<Bindings> {
        if form.count() % 2 != 0 {
            return Err(Error::UnevenBindingForm {
                count: form.count(),
            });
        }
        trace!(pairs = form.count() / 2, "lowering binding form");

        let mut bindings = Bindings::new();
        let mut iter = form.iter();
        while let (Some(pattern), Some(value)) = (iter.next(), iter.next()) {
            self.validator.assert_supported_binding(pattern)?;
            self.deconstruct_binding(&mut bindings, pattern, value)?;
        }
        Ok(bindings)
    }

    /// Lower a single pattern/value pair into a fresh binding sequence.
    pub fn deconstruct_pair(&mut self, pattern: &Value, value: &Value) -> Result<Bindings> {
        let mut bindings = Bindings::new();
        self.deconstruct_binding(&mut bindings, pattern, value)?;
        Ok(bindings)
    }

    /// Lower one pattern/value pair, appending to `bindings`.
    pub fn deconstruct_binding(
        &mut self,
        bindings: &mut Bindings,
        pattern: &Value,
        value: &Value,
    ) -> Result<()> {
        match pattern {
            // The surrounding form evaluates the value for effect; nothing
            // is bound.
            Value::Nil => Ok(()),
            Value::Symbol(sym) => {
                bindings.push((sym.clone(), value.clone()));
                Ok(())
            }
            Value::Vector(elements) => self.deconstruct_vector(bindings, elements, value),
            Value::Map(entries) => self.deconstruct_map(bindings, entries, value),
            other => Err(Error::UnsupportedBinding {
                type_name: other.type_name(),
            }),
        }
    }

    /// Positional destructuring. The whole value is bound to one fresh
    /// symbol; each element then binds against a `first` accessor while a
    /// running rest symbol advances through `next` accessors. `&` hands the
    /// current rest symbol to the one pattern that may follow it.
    fn deconstruct_vector(
        &mut self,
        bindings: &mut Bindings,
        pattern: &PersistentVector,
        value: &Value,
    ) -> Result<()> {
        let seq_sym = self.generator.r#gen();
        bindings.push((seq_sym.clone(), value.clone()));

        let mut rest_sym = seq_sym;
        let mut state = SeqState::Each;

        for element in pattern.iter() {
            match state {
                SeqState::Each => {
                    if let Value::Symbol(sym) = element
                        && sym.name() == "&"
                    {
                        state = SeqState::Rest;
                        continue;
                    }
                    let first_sym = self.generator.r#gen();
                    let next_sym = self.generator.r#gen();
                    bindings.push((first_sym.clone(), accessor(Symbol::NAME_FIRST, &rest_sym)));
                    bindings.push((next_sym.clone(), accessor(Symbol::NAME_NEXT, &rest_sym)));
                    rest_sym = next_sym;
                    self.deconstruct_binding(bindings, element, &Value::symbol(first_sym))?;
                }
                SeqState::Rest => {
                    state = SeqState::Done;
                    let access_sym = self.generator.r#gen();
                    bindings.push((access_sym.clone(), Value::symbol(rest_sym.clone())));
                    self.deconstruct_binding(bindings, element, &Value::symbol(access_sym))?;
                }
                SeqState::Done => return Err(Error::TrailingRestPattern),
            }
        }

        if state == SeqState::Rest {
            return Err(Error::MissingRestPattern);
        }
        Ok(())
    }

    /// Keyed destructuring. The whole value is bound to one fresh symbol;
    /// each `(key, sub-pattern)` entry, in the pattern map's own iteration
    /// order, binds a fresh symbol to an `aget` accessor and recurses.
    /// Integer keys give fixed-index destructuring with the same lowering.
    fn deconstruct_map(
        &mut self,
        bindings: &mut Bindings,
        pattern: &PersistentMap,
        value: &Value,
    ) -> Result<()> {
        let map_sym = self.generator.r#gen();
        bindings.push((map_sym.clone(), value.clone()));

        for (key, sub_pattern) in pattern.iter() {
            let access_sym = self.generator.r#gen();
            let access = Value::list(vec![
                Value::symbol(Symbol::new(Symbol::NAME_ARRAY_GET)),
                Value::symbol(map_sym.clone()),
                key.clone(),
            ]);
            bindings.push((access_sym.clone(), access));
            self.deconstruct_binding(bindings, sub_pattern, &Value::symbol(access_sym))?;
        }
        Ok(())
    }
}

impl Default for Deconstructor {
    fn default() -> Self {
        Deconstructor::new(Box::new(PatternValidator))
    }
}

/// Build a one-argument accessor call like `(first sym)`.
fn accessor(name: &str, arg: &Symbol) -> Value {
    Value::list(vec![
        Value::symbol(Symbol::new(name)),
        Value::symbol(arg.clone()),
    ])
}

// ============================================================================
// Tests
// ============================================================================
