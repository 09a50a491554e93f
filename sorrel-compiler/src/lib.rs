// sorrel-compiler - Analyzer-side binding resolution for Sorrel
// Copyright (c) 2025 The Sorrel Authors. MIT licensed.

//! # sorrel-compiler
//!
//! The binding-resolution pass of the Sorrel compiler front end: lowers the
//! nested binding patterns of `let`, `loop`, `foreach`, and parameter lists
//! into flat, ordered `(symbol, expression)` sequences the code generator
//! consumes.

pub mod deconstruct;
pub mod error;

pub use deconstruct::{BindingValidator, Bindings, Deconstructor, PatternValidator};
pub use error::{Error, Result};

// Re-export core types for convenience
pub use sorrel_core::{Keyword, Symbol, SymbolGenerator, Value};
