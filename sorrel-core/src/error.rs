// sorrel-core - Error types for the value model
// Copyright (c) 2025 The Sorrel Authors. MIT licensed.

//! Error types for value and collection construction.

use std::fmt;

/// Result type for value-model operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing or manipulating values.
#[derive(Debug, Clone)]
pub enum Error {
    /// A flat key/value list had an odd number of elements
    UnevenKeyValueList { len: usize },
    /// Index out of bounds for an indexed collection
    IndexOutOfBounds { index: usize, length: usize },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnevenKeyValueList { len } => {
                write!(
                    f,
                    "Cannot build a map from a key/value list of odd length {}",
                    len
                )
            }
            Error::IndexOutOfBounds { index, length } => {
                write!(
                    f,
                    "Index {} out of bounds for collection of length {}",
                    index, length
                )
            }
        }
    }
}

impl std::error::Error for Error {}
