//! Montage - A compositional layout algebra for labelled, dimensioned elements.
//!
//! Montage arranges [`Viewable`](element::Viewable) elements into containers
//! that a rendering layer can lay out on a grid:
//!
//! - [`Layout`]: a flat tree of items addressed by unique `group.label` paths.
//! - [`NdLayout`]: items indexed by multi-dimensional keys.
//! - [`AdjointLayout`]: a main item with up to two marginal items.
//! - [`HoloMap`]: a uniform keyed mapping of elements.
//!
//! Containers are combined with the [`Compose`] and [`Adjoin`] traits, which
//! always build new containers. Grid width and display policy are configured
//! in place through [`GridLayout::cols`] and [`Layout::display`].
//!
//! # Examples
//!
//! ```rust
//! use montage::{GridLayout, Layout, config::DisplayPolicy};
//!
//! let mut layout = Layout::new();
//! layout.cols(2).display(DisplayPolicy::All);
//!
//! assert_eq!(layout.shape(), (1, 0));
//! assert_eq!(layout.display_policy(), DisplayPolicy::All);
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod path;

mod adjoint;
mod holomap;
mod item;
mod layout;
mod ndlayout;

#[cfg(test)]
mod test_utils;

pub use montage_core::{dimension, element, roman, value};

pub use adjoint::{AdjointEntry, AdjointKey, AdjointLayout, Position};
pub use error::{ErrorKind, LayoutError, Result};
pub use grid::GridLayout;
pub use holomap::HoloMap;
pub use item::{Adjoin, Compose, Item, Operand};
pub use layout::{Layout, LayoutKey, Node};
pub use ndlayout::NdLayout;
