//! Error type shared by the collections and streams.
//!
//! Every fallible operation in this crate returns [`Result`], whose error side
//! is a [`CollectionError`]. Operations that have a natural "absent" answer
//! (`contains`, `first`, `remove`) report it through `bool` or `Option`
//! instead of an error.

use thiserror::Error;

/// Errors raised by collections and stream terminals.
///
/// # Examples
///
/// ```rust
/// use hashstream::collection::{HashTable, Table};
/// use hashstream::error::CollectionError;
///
/// let table: HashTable<String, i32> = HashTable::new();
/// let error = table.get(&"missing".to_string()).unwrap_err();
///
/// assert!(matches!(error, CollectionError::NotFound { .. }));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum CollectionError {
    /// A keyed lookup found no entry.
    #[error("no entry found for key {key}")]
    NotFound {
        /// Rendering of the key (or its hash code) that was looked up.
        key: String,
    },

    /// The collection does not support the requested operation.
    #[error("{type_name} does not support {operation}")]
    UnsupportedOperation {
        /// Name of the collection type.
        type_name: &'static str,
        /// Name of the rejected operation.
        operation: &'static str,
    },

    /// An argument did not satisfy the operation's contract.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// What was wrong with the argument.
        message: String,
    },

    /// The operation reached a state it cannot represent.
    #[error("invalid state: {message}")]
    InvalidState {
        /// What went wrong.
        message: String,
    },
}

impl CollectionError {
    /// Creates a [`CollectionError::NotFound`] for the given key rendering.
    pub fn not_found(key: impl Into<String>) -> Self {
        Self::NotFound { key: key.into() }
    }

    /// Creates a [`CollectionError::UnsupportedOperation`].
    #[must_use]
    pub const fn unsupported(type_name: &'static str, operation: &'static str) -> Self {
        Self::UnsupportedOperation {
            type_name,
            operation,
        }
    }

    /// Creates a [`CollectionError::InvalidArgument`].
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            message: message.into(),
        }
    }

    /// Creates a [`CollectionError::InvalidState`].
    pub fn invalid_state(message: impl Into<String>) -> Self {
        Self::InvalidState {
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, CollectionError>;

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::not_found(CollectionError::not_found("i:3;"), "no entry found for key i:3;")]
    #[case::unsupported(
        CollectionError::unsupported("HashTable", "add"),
        "HashTable does not support add"
    )]
    #[case::invalid_argument(
        CollectionError::invalid_argument("keys and values differ in length"),
        "invalid argument: keys and values differ in length"
    )]
    #[case::invalid_state(
        CollectionError::invalid_state("duplicate key"),
        "invalid state: duplicate key"
    )]
    fn test_display(#[case] error: CollectionError, #[case] expected: &str) {
        assert_eq!(error.to_string(), expected);
    }
}
