// sorrel-compiler - Error types for the binding analyzer
// Copyright (c) 2025 The Sorrel Authors. MIT licensed.

//! Error types for binding resolution.
//!
//! These carry no source locations: the wrapping special-form analyzer owns
//! the offending form and attaches its position before surfacing an error to
//! the user.

use std::fmt;

/// Result type for binding resolution.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while lowering binding patterns.
#[derive(Debug, Clone)]
pub enum Error {
    /// A pattern of a kind the deconstructor cannot lower
    UnsupportedBinding { type_name: &'static str },
    /// A binding form whose flat pattern/value list has odd length
    UnevenBindingForm { count: usize },
    /// `&` at the end of a sequence pattern with nothing to bind
    MissingRestPattern,
    /// More than one pattern after `&` in a sequence pattern
    TrailingRestPattern,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnsupportedBinding { type_name } => {
                write!(
                    f,
                    "Cannot destructure a {}: binding patterns must be a symbol, nil, vector, or map",
                    type_name
                )
            }
            Error::UnevenBindingForm { count } => {
                write!(
                    f,
                    "Binding form must contain pattern/value pairs, got {} forms",
                    count
                )
            }
            Error::MissingRestPattern => {
                write!(f, "'&' must be followed by a binding pattern")
            }
            Error::TrailingRestPattern => {
                write!(f, "Only one binding pattern may follow '&'")
            }
        }
    }
}

impl std::error::Error for Error {}
