//! Error types for code generation.

use thiserror::Error;

/// Error type for code generation operations.
#[derive(Debug, Error)]
pub enum CodegenError {
    /// Node loading error.
    #[error("node parse error: {0}")]
    Parse(#[from] objdictgen_schema::ParseError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A type name that CanFestival cannot represent.
    #[error("'{type_name}' isn't a valid type for CanFestival.")]
    InvalidType {
        /// Offending type name.
        type_name: String,
    },

    /// Dictionary data does not have the shape the generator relies on.
    #[error("contract violation at {location}: expected {expected}, found {found}")]
    ContractViolation {
        /// Where the data was read.
        location: String,
        /// Expected shape.
        expected: &'static str,
        /// Actual shape.
        found: String,
    },

    /// Template substitution error.
    #[error("template error: {message}")]
    Template {
        /// Error message.
        message: String,
    },
}

impl CodegenError {
    /// Creates an invalid type error.
    pub fn invalid_type(type_name: impl Into<String>) -> Self {
        Self::InvalidType {
            type_name: type_name.into(),
        }
    }

    /// Creates a contract violation error.
    pub fn contract(
        location: impl Into<String>,
        expected: &'static str,
        found: impl Into<String>,
    ) -> Self {
        Self::ContractViolation {
            location: location.into(),
            expected,
            found: found.into(),
        }
    }

    /// Creates a template error with the given message.
    pub fn template(message: impl Into<String>) -> Self {
        Self::Template {
            message: message.into(),
        }
    }

    /// Returns true for errors that front ends show to the user verbatim,
    /// because only fixing the node description resolves them.
    #[must_use]
    pub const fn is_user_facing(&self) -> bool {
        matches!(self, Self::InvalidType { .. })
    }
}
