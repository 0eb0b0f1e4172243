//! Error types for layout composition.
//!
//! Every failure in this crate is a contract violation detected at the point
//! it happens: malformed construction input, an operand of the wrong kind, or
//! a lookup that does not resolve. [`LayoutError::kind`] classifies each
//! variant into one of these three [`ErrorKind`]s.

use std::fmt;

use thiserror::Error;

/// A type alias for `Result<T, LayoutError>`.
pub type Result<T> = std::result::Result<T, LayoutError>;

/// The broad category of a [`LayoutError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Malformed construction or configuration input.
    Configuration,

    /// An operand or value of the wrong capability type.
    TypeMismatch,

    /// A key, path or index that does not resolve.
    Lookup,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Configuration => write!(f, "configuration error"),
            ErrorKind::TypeMismatch => write!(f, "type mismatch"),
            ErrorKind::Lookup => write!(f, "lookup error"),
        }
    }
}

/// The error type for layout operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("AdjointLayout accepts no more than three elements, got {count}")]
    TooManySlots { count: usize },

    #[error("position `{0}` is not valid in an AdjointLayout")]
    InvalidPosition(String),

    #[error("position `{0}` is given more than once")]
    DuplicatePosition(String),

    #[error("display option must be one of 'auto', 'all', got `{0}`")]
    InvalidDisplay(String),

    #[error("key {key} has {found} coordinates but {expected} key dimensions are declared")]
    KeyArity {
        key: String,
        expected: usize,
        found: usize,
    },

    #[error("{container} only accepts {expected}, got {found}")]
    TypeMismatch {
        container: &'static str,
        expected: &'static str,
        found: &'static str,
    },

    #[error("key `{0}` not found")]
    KeyNotFound(String),

    #[error("index {index} is out of range for {len} items")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("grid cell ({row}, {col}) is outside the available item range")]
    CellOutOfRange { row: usize, col: usize },
}

impl LayoutError {
    /// Returns the category this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TooManySlots { .. }
            | Self::InvalidPosition(_)
            | Self::DuplicatePosition(_)
            | Self::InvalidDisplay(_)
            | Self::KeyArity { .. } => ErrorKind::Configuration,
            Self::TypeMismatch { .. } => ErrorKind::TypeMismatch,
            Self::KeyNotFound(_) | Self::IndexOutOfRange { .. } | Self::CellOutOfRange { .. } => {
                ErrorKind::Lookup
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            LayoutError::TooManySlots { count: 4 }.kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            LayoutError::DuplicatePosition("main".to_string()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            LayoutError::InvalidDisplay("some".to_string()).kind(),
            ErrorKind::Configuration
        );
        assert_eq!(
            LayoutError::TypeMismatch {
                container: "AdjointLayout",
                expected: "elements",
                found: "AdjointLayout",
            }
            .kind(),
            ErrorKind::TypeMismatch
        );
        assert_eq!(
            LayoutError::CellOutOfRange { row: 3, col: 0 }.kind(),
            ErrorKind::Lookup
        );
    }

    #[test]
    fn test_display_messages() {
        assert_eq!(
            LayoutError::TooManySlots { count: 4 }.to_string(),
            "AdjointLayout accepts no more than three elements, got 4"
        );
        assert_eq!(
            LayoutError::KeyNotFound("Curve.II".to_string()).to_string(),
            "key `Curve.II` not found"
        );
        assert_eq!(ErrorKind::Lookup.to_string(), "lookup error");
    }
}
