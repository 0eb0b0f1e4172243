//! Dimensions describe the semantic axes of elements and keyed containers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A named axis of a dimensioned object.
///
/// Key dimensions index a container (or the independent variables of an
/// element), value dimensions describe the data held at each key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dimension {
    name: String,
}

impl Dimension {
    /// Creates a new dimension with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// Returns the name of this dimension.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

impl From<&str> for Dimension {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// A reference to a dimension, either by name or by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DimensionRef {
    Name(String),
    Index(usize),
}

impl DimensionRef {
    /// Resolves this reference against an ordered list of dimensions.
    ///
    /// Returns `None` when no dimension matches.
    ///
    /// # Example
    ///
    /// ```
    /// # use montage_core::dimension::{Dimension, DimensionRef};
    /// let dims = vec![Dimension::new("x"), Dimension::new("y")];
    ///
    /// assert_eq!(DimensionRef::from(1).resolve(&dims), Some(&dims[1]));
    /// assert_eq!(DimensionRef::from("x").resolve(&dims), Some(&dims[0]));
    /// assert_eq!(DimensionRef::from("z").resolve(&dims), None);
    /// ```
    pub fn resolve<'a>(&self, dimensions: &'a [Dimension]) -> Option<&'a Dimension> {
        match self {
            Self::Name(name) => dimensions.iter().find(|dim| dim.name() == name),
            Self::Index(index) => dimensions.get(*index),
        }
    }
}

impl fmt::Display for DimensionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Name(name) => write!(f, "{name}"),
            Self::Index(index) => write!(f, "#{index}"),
        }
    }
}

impl From<&str> for DimensionRef {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<String> for DimensionRef {
    fn from(name: String) -> Self {
        Self::Name(name)
    }
}

impl From<usize> for DimensionRef {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&Dimension> for DimensionRef {
    fn from(dimension: &Dimension) -> Self {
        Self::Name(dimension.name().to_string())
    }
}
