//! Configuration types for layout containers.
//!
//! All types implement [`serde::Deserialize`] so grid and display defaults can
//! be loaded from external sources; missing fields fall back to defaults.
//!
//! # Example
//!
//! ```
//! # use montage::config::{DisplayPolicy, LayoutConfig};
//! let config = LayoutConfig::default();
//! assert_eq!(config.max_cols(), 4);
//! assert_eq!(config.display(), DisplayPolicy::Auto);
//! ```

use std::{fmt, str::FromStr};

use serde::Deserialize;

use crate::error::LayoutError;

const DEFAULT_MAX_COLS: usize = 4;

/// Display verbosity of a [`Layout`](crate::Layout).
///
/// `Auto` lets a renderer summarise large trees, `All` always shows every
/// leaf. Freshly composed layouts are `All`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayPolicy {
    #[default]
    Auto,
    All,
}

impl DisplayPolicy {
    /// Returns the option string for this policy.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Auto => "auto",
            Self::All => "all",
        }
    }
}

impl fmt::Display for DisplayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DisplayPolicy {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "all" => Ok(Self::All),
            other => Err(LayoutError::InvalidDisplay(other.to_string())),
        }
    }
}

/// Grid and display defaults applied to new containers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LayoutConfig {
    /// Grid wrap width: the maximum number of columns per row.
    #[serde(default = "default_max_cols")]
    max_cols: usize,

    /// Display policy of new [`Layout`](crate::Layout)s.
    #[serde(default)]
    display: DisplayPolicy,
}

fn default_max_cols() -> usize {
    DEFAULT_MAX_COLS
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_cols: DEFAULT_MAX_COLS,
            display: DisplayPolicy::default(),
        }
    }
}

impl LayoutConfig {
    /// Creates a new [`LayoutConfig`].
    ///
    /// # Arguments
    ///
    /// * `max_cols` - Grid wrap width.
    /// * `display` - Display policy for layouts.
    pub fn new(max_cols: usize, display: DisplayPolicy) -> Self {
        Self { max_cols, display }
    }

    /// Returns the grid wrap width.
    pub fn max_cols(&self) -> usize {
        self.max_cols
    }

    /// Returns the display policy.
    pub fn display(&self) -> DisplayPolicy {
        self.display
    }
}
