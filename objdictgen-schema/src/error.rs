//! Error types for node loading.

use thiserror::Error;

/// Error type for node parsing operations.
#[derive(Debug, Error)]
pub enum ParseError {
    /// XML parsing error.
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// Missing required attribute.
    #[error("missing required attribute '{attribute}' on element '{element}'")]
    MissingAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
    },

    /// Invalid attribute value.
    #[error("invalid value '{value}' for attribute '{attribute}' on element '{element}'")]
    InvalidAttribute {
        /// Element name.
        element: String,
        /// Attribute name.
        attribute: String,
        /// Invalid value.
        value: String,
    },

    /// The same index was declared twice.
    #[error("duplicate entry for index 0x{index:04X}")]
    DuplicateIndex {
        /// Offending index.
        index: u16,
    },

    /// Invalid node structure.
    #[error("invalid node structure: {message}")]
    InvalidStructure {
        /// Error message.
        message: String,
    },

    /// UTF-8 decoding error.
    #[error("UTF-8 error: {0}")]
    Utf8(#[from] std::str::Utf8Error),
}

impl ParseError {
    /// Creates a missing attribute error.
    pub fn missing_attr(element: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::MissingAttribute {
            element: element.into(),
            attribute: attribute.into(),
        }
    }

    /// Creates an invalid attribute error.
    pub fn invalid_attr(
        element: impl Into<String>,
        attribute: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::InvalidAttribute {
            element: element.into(),
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Creates an invalid structure error.
    pub fn structure(message: impl Into<String>) -> Self {
        Self::InvalidStructure {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_attr_display() {
        let err = ParseError::missing_attr("entry", "index");
        assert_eq!(
            err.to_string(),
            "missing required attribute 'index' on element 'entry'"
        );
    }

    #[test]
    fn test_invalid_attr_display() {
        let err = ParseError::invalid_attr("sub", "value", "0xZZ");
        assert_eq!(
            err.to_string(),
            "invalid value '0xZZ' for attribute 'value' on element 'sub'"
        );
    }

    #[test]
    fn test_duplicate_index_display() {
        let err = ParseError::DuplicateIndex { index: 0x1000 };
        assert_eq!(err.to_string(), "duplicate entry for index 0x1000");
    }
}
