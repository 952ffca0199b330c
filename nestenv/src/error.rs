//! Error types for decoding nested values from environment variables

use crate::shape::Shape;

/// Errors that can occur while decoding a value from a namespace.
///
/// Decoding is fail-fast: the first error aborts the whole decode. Every variant
/// that refers to a key carries the full environment variable name, prefix
/// included, so the offending variable can be found directly.
///
/// A failed decode may leave the target partially written. Fields and elements
/// visited before the failure keep their decoded values.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The top-level target cannot be addressed by the requested call.
    ///
    /// Occurs when a scalar-shaped value is decoded without a name, so there is
    /// no key to look it up by.
    #[error("Cannot decode into {shape} without a name; use decode_named")]
    InvalidTarget {
        /// Shape of the rejected target
        shape: String,
    },

    /// Required environment variable is not set.
    ///
    /// For sequences and mappings this means no indexed entries exist below the
    /// name.
    #[error("Environment variable '{name}' is required but not set")]
    MissingKey {
        /// Name of the missing environment variable
        name: String,
    },

    /// A record field or pointer referent cannot be written.
    #[error("Location '{name}' is not writable")]
    NotAddressable {
        /// Name the unwritable location is addressed by
        name: String,
    },

    /// Failed to parse an environment variable value into the target shape.
    ///
    /// Also reported when a sequence's indices are not a dense run from zero or
    /// exceed a fixed-size array.
    #[error("Failed to parse environment variable '{name}' as {expected}: {message}")]
    MalformedValue {
        /// Name of the environment variable being parsed
        name: String,
        /// Description of the shape that parsing was attempted for
        expected: String,
        /// Error message from the parser
        message: String,
    },

    /// The target shape has no decode strategy.
    #[error("Unsupported shape {shape} at '{name}'")]
    UnsupportedShape {
        /// Name the unsupported value is addressed by
        name: String,
        /// Description of the unsupported shape
        shape: String,
    },

    /// Nesting went deeper than the configured limit.
    ///
    /// Self-referential shapes (a record holding an `Option<Box<Self>>`) end here.
    #[error("Decoding '{name}' exceeds the nesting limit of {limit}")]
    DepthExceeded {
        /// Name of the node at which the limit was hit
        name: String,
        /// Configured maximum depth
        limit: usize,
    },

    /// The configured separator is empty, so nested names cannot be told apart.
    #[error("Separator must not be empty")]
    EmptySeparator,
}

impl DecodeError {
    /// Create a missing environment variable error
    pub fn missing(name: impl Into<String>) -> Self {
        Self::MissingKey { name: name.into() }
    }

    /// Create a parse error for a value expected to have `shape`
    pub fn malformed(name: impl Into<String>, shape: &Shape, message: impl std::fmt::Display) -> Self {
        Self::MalformedValue {
            name: name.into(),
            expected: shape.to_string(),
            message: message.to_string(),
        }
    }

    /// Create an error for a location that cannot be written
    pub fn not_addressable(name: impl Into<String>) -> Self {
        Self::NotAddressable { name: name.into() }
    }

    /// Create an error for a shape without a decode strategy
    pub fn unsupported(name: impl Into<String>, shape: impl std::fmt::Display) -> Self {
        Self::UnsupportedShape {
            name: name.into(),
            shape: shape.to_string(),
        }
    }
}
