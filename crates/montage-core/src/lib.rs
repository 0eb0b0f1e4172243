//! Montage Core Types and Definitions
//!
//! This crate provides the foundational types shared by the Montage layout
//! algebra. It includes:
//!
//! - **Dimensions**: Named axes and references to them ([`dimension`] module)
//! - **Values**: Coordinate values and multi-dimensional keys ([`value`] module)
//! - **Elements**: The [`element::Viewable`] capability every leaf satisfies
//! - **Roman numerals**: Path disambiguation identifiers ([`roman`] module)

pub mod dimension;
pub mod element;
pub mod roman;
pub mod value;
