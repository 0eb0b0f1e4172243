//! Leaf values and the composition algebra.
//!
//! [`Item`] is the closed set of things a container can hold: a bare
//! element, a [`HoloMap`], an [`AdjointLayout`] or an [`NdLayout`].
//!
//! The algebra has two operators, both of which leave their operands
//! untouched and build a new container:
//!
//! - [`Compose`] merges operands side by side into a [`Layout`]. Operand
//!   order matters: earlier leaves keep simpler paths when paths collide.
//! - [`Adjoin`] attaches supplementary elements to a primary one in an
//!   [`AdjointLayout`].

use std::rc::Rc;

use montage_core::{
    dimension::{Dimension, DimensionRef},
    element::{Selection, Viewable},
    value::Value,
};

use crate::{
    adjoint::AdjointLayout,
    error::{LayoutError, Result},
    holomap::HoloMap,
    layout::Layout,
    ndlayout::NdLayout,
};

/// A value held by a layout container.
#[derive(Debug, Clone)]
pub enum Item {
    /// A single viewable element.
    Element(Rc<dyn Viewable>),
    /// A keyed mapping of elements.
    HoloMap(HoloMap),
    /// A primary element with adjoined annotations.
    Adjoint(AdjointLayout),
    /// A keyed grid of items.
    NdLayout(NdLayout),
}

impl Item {
    /// Wraps a concrete element.
    pub fn element(element: impl Viewable + 'static) -> Self {
        Self::Element(Rc::new(element))
    }

    /// Returns a short name of the item's kind, used in error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Element(_) => "element",
            Self::HoloMap(_) => "HoloMap",
            Self::Adjoint(_) => "AdjointLayout",
            Self::NdLayout(_) => "NdLayout",
        }
    }

    /// Returns the group string.
    pub fn group(&self) -> &str {
        match self {
            Self::Element(element) => element.group(),
            Self::HoloMap(map) => map.group(),
            Self::Adjoint(adjoint) => adjoint.group(),
            Self::NdLayout(layout) => layout.group(),
        }
    }

    /// Returns the label string.
    pub fn label(&self) -> &str {
        match self {
            Self::Element(element) => element.label(),
            Self::HoloMap(map) => map.label(),
            Self::Adjoint(adjoint) => adjoint.label(),
            Self::NdLayout(layout) => layout.label(),
        }
    }

    /// Returns `true` if the label is non-empty.
    pub fn is_labelled(&self) -> bool {
        !self.label().is_empty()
    }

    /// Returns the dimensions of the item.
    pub fn dimensions(&self) -> Vec<Dimension> {
        match self {
            Self::Element(element) => element.dimensions(),
            Self::HoloMap(map) => map.dimensions(),
            Self::Adjoint(adjoint) => adjoint.dimensions(),
            Self::NdLayout(layout) => layout.dimensions(),
        }
    }

    /// Returns the values along a dimension.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::KeyNotFound`] if the item has no such dimension.
    pub fn dimension_values(&self, dimension: &DimensionRef) -> Result<Vec<Value>> {
        match self {
            Self::Element(element) => element_values(element.as_ref(), dimension),
            Self::HoloMap(map) => map.dimension_values(dimension),
            Self::Adjoint(adjoint) => adjoint.dimension_values(dimension),
            Self::NdLayout(layout) => layout.dimension_values(dimension),
        }
    }

    /// Returns a copy with the group and/or label replaced.
    pub fn relabel(&self, group: Option<&str>, label: Option<&str>) -> Item {
        match self {
            Self::Element(element) => Self::Element(element.relabel(group, label)),
            Self::HoloMap(map) => Self::HoloMap(map.relabel(group, label)),
            Self::Adjoint(adjoint) => Self::Adjoint(adjoint.relabel(group, label)),
            Self::NdLayout(layout) => Self::NdLayout(layout.relabel(group, label)),
        }
    }

    /// Returns a copy restricted by `selection`.
    ///
    /// Selectors for dimensions the item does not have are ignored.
    pub fn select(&self, selection: &Selection) -> Item {
        match self {
            Self::Element(element) => Self::Element(select_element(element, selection)),
            Self::HoloMap(map) => Self::HoloMap(map.select(selection)),
            Self::Adjoint(adjoint) => Self::Adjoint(adjoint.select(selection)),
            Self::NdLayout(layout) => Self::NdLayout(layout.select(selection)),
        }
    }

    /// Returns the element if this is a bare element.
    pub fn as_element(&self) -> Option<&Rc<dyn Viewable>> {
        match self {
            Self::Element(element) => Some(element),
            _ => None,
        }
    }

    /// Returns the adjoint layout if this is one.
    pub fn as_adjoint(&self) -> Option<&AdjointLayout> {
        match self {
            Self::Adjoint(adjoint) => Some(adjoint),
            _ => None,
        }
    }
}

impl From<Rc<dyn Viewable>> for Item {
    fn from(element: Rc<dyn Viewable>) -> Self {
        Self::Element(element)
    }
}

impl From<HoloMap> for Item {
    fn from(map: HoloMap) -> Self {
        Self::HoloMap(map)
    }
}

impl From<AdjointLayout> for Item {
    fn from(adjoint: AdjointLayout) -> Self {
        Self::Adjoint(adjoint)
    }
}

impl From<NdLayout> for Item {
    fn from(layout: NdLayout) -> Self {
        Self::NdLayout(layout)
    }
}

/// Looks up an element's values along a dimension reference.
pub(crate) fn element_values(
    element: &dyn Viewable,
    dimension: &DimensionRef,
) -> Result<Vec<Value>> {
    element
        .get_dimension(dimension)
        .and_then(|dim| element.dimension_values(dim.name()))
        .ok_or_else(|| LayoutError::KeyNotFound(dimension.to_string()))
}

/// Applies the applicable part of `selection` to an element.
pub(crate) fn select_element(
    element: &Rc<dyn Viewable>,
    selection: &Selection,
) -> Rc<dyn Viewable> {
    let applicable = selection.restricted_to(&element.dimensions());
    if applicable.is_empty() {
        return Rc::clone(element);
    }
    element.select(&applicable)
}

/// Anything that can appear on either side of [`Compose::compose`].
#[derive(Debug, Clone)]
pub enum Operand {
    /// A single leaf.
    Item(Item),
    /// An existing layout, merged entry by entry.
    Layout(Layout),
    /// A sequence of operands, folded left to right.
    Sequence(Vec<Operand>),
}

impl From<Item> for Operand {
    fn from(item: Item) -> Self {
        Self::Item(item)
    }
}

impl From<&Item> for Operand {
    fn from(item: &Item) -> Self {
        Self::Item(item.clone())
    }
}

impl From<Layout> for Operand {
    fn from(layout: Layout) -> Self {
        Self::Layout(layout)
    }
}

impl From<&Layout> for Operand {
    fn from(layout: &Layout) -> Self {
        Self::Layout(layout.clone())
    }
}

impl From<Rc<dyn Viewable>> for Operand {
    fn from(element: Rc<dyn Viewable>) -> Self {
        Self::Item(Item::Element(element))
    }
}

impl From<HoloMap> for Operand {
    fn from(map: HoloMap) -> Self {
        Self::Item(Item::HoloMap(map))
    }
}

impl From<AdjointLayout> for Operand {
    fn from(adjoint: AdjointLayout) -> Self {
        Self::Item(Item::Adjoint(adjoint))
    }
}

impl From<NdLayout> for Operand {
    fn from(layout: NdLayout) -> Self {
        Self::Item(Item::NdLayout(layout))
    }
}

impl<T: Into<Operand>> From<Vec<T>> for Operand {
    fn from(values: Vec<T>) -> Self {
        Self::Sequence(values.into_iter().map(Into::into).collect())
    }
}

/// Side-by-side composition into a [`Layout`].
///
/// `a.compose(b)` places the leaves of `a` before the leaves of `b` and
/// resolves path collisions in that order, so it is not commutative. Neither
/// operand is modified; the result is a new layout whose display policy is
/// [`DisplayPolicy::All`](crate::config::DisplayPolicy::All).
pub trait Compose {
    /// Composes `self` with `other` into a new layout.
    fn compose(&self, other: impl Into<Operand>) -> Layout;
}

impl Compose for Item {
    fn compose(&self, other: impl Into<Operand>) -> Layout {
        Layout::from_leaf(self.clone()).compose(other)
    }
}

impl Compose for Rc<dyn Viewable> {
    fn compose(&self, other: impl Into<Operand>) -> Layout {
        Item::Element(Rc::clone(self)).compose(other)
    }
}

impl Compose for HoloMap {
    fn compose(&self, other: impl Into<Operand>) -> Layout {
        Item::HoloMap(self.clone()).compose(other)
    }
}

impl Compose for AdjointLayout {
    fn compose(&self, other: impl Into<Operand>) -> Layout {
        Item::Adjoint(self.clone()).compose(other)
    }
}

impl Compose for NdLayout {
    fn compose(&self, other: impl Into<Operand>) -> Layout {
        Item::NdLayout(self.clone()).compose(other)
    }
}

/// Attaching supplementary items into an [`AdjointLayout`].
pub trait Adjoin {
    /// Builds a new adjoint layout from `self` and `other`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::TypeMismatch`] if `other` cannot occupy an
    /// adjoint slot, or [`LayoutError::TooManySlots`] if the result would
    /// need more than three slots.
    fn adjoin(&self, other: impl Into<Item>) -> Result<AdjointLayout>;
}

impl Adjoin for Item {
    fn adjoin(&self, other: impl Into<Item>) -> Result<AdjointLayout> {
        if let Self::Adjoint(adjoint) = self {
            return adjoint.adjoin(other);
        }

        match other.into() {
            Self::Adjoint(adjoint) => {
                let mut items: Vec<Item> = adjoint.iter().map(|(_, item)| item.clone()).collect();
                items.push(self.clone());
                AdjointLayout::from_items(items)
            }
            other => AdjointLayout::from_items(vec![self.clone(), other]),
        }
    }
}

impl Adjoin for Rc<dyn Viewable> {
    fn adjoin(&self, other: impl Into<Item>) -> Result<AdjointLayout> {
        Item::Element(Rc::clone(self)).adjoin(other)
    }
}

impl Adjoin for HoloMap {
    fn adjoin(&self, other: impl Into<Item>) -> Result<AdjointLayout> {
        Item::HoloMap(self.clone()).adjoin(other)
    }
}
