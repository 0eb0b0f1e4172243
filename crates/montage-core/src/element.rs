//! The viewable element capability.
//!
//! Layout containers never look inside the elements they arrange. Anything
//! implementing [`Viewable`] can be stored as a leaf: it has a `(group,
//! label)` identity, a set of dimensions, and supports relabelling and
//! selection by producing new elements.
//!
//! # Overview
//!
//! - [`Viewable`]: The capability trait implemented by concrete elements.
//! - [`Selection`]: A set of per-dimension filters passed to [`Viewable::select`].
//! - [`Selector`]: A single filter (exact value, half-open range or value set).

use std::{cmp::Ordering, fmt, rc::Rc};

use indexmap::IndexMap;
use log::trace;

use crate::{
    dimension::{Dimension, DimensionRef},
    value::Value,
};

/// An atomic, dimensioned, labelled unit of displayable data.
///
/// Implementors are immutable from the point of view of the layout algebra:
/// operations that change an element return a new shared element.
pub trait Viewable: fmt::Debug {
    /// The group string, the first segment of the element's layout path.
    fn group(&self) -> &str;

    /// The label string; empty when the element is unlabelled.
    fn label(&self) -> &str;

    /// All dimensions of the element, key dimensions first.
    fn dimensions(&self) -> Vec<Dimension>;

    /// Returns the values along the named dimension, or `None` if the
    /// element has no such dimension.
    fn dimension_values(&self, dimension: &str) -> Option<Vec<Value>>;

    /// Returns a copy of this element with the given group and/or label
    /// replaced. `None` keeps the current value.
    fn relabel(&self, group: Option<&str>, label: Option<&str>) -> Rc<dyn Viewable>;

    /// Returns a copy of this element restricted by `selection`.
    ///
    /// Callers only pass selectors for dimensions reported by
    /// [`Viewable::dimensions`].
    fn select(&self, selection: &Selection) -> Rc<dyn Viewable>;

    /// Resolves a dimension reference against [`Viewable::dimensions`].
    fn get_dimension(&self, dimension: &DimensionRef) -> Option<Dimension> {
        dimension.resolve(&self.dimensions()).cloned()
    }
}

/// A filter applied to the values of one dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum Selector {
    /// Matches a single value.
    Exact(Value),
    /// Matches values in `[start, end)`; a missing bound is unbounded.
    Range {
        start: Option<Value>,
        end: Option<Value>,
    },
    /// Matches any of the listed values.
    OneOf(Vec<Value>),
}

impl Selector {
    /// Creates a half-open range selector.
    pub fn range(start: impl Into<Value>, end: impl Into<Value>) -> Self {
        Self::Range {
            start: Some(start.into()),
            end: Some(end.into()),
        }
    }

    /// Returns `true` if `value` passes this filter.
    ///
    /// # Example
    ///
    /// ```
    /// # use montage_core::element::Selector;
    /// # use montage_core::value::Value;
    /// let selector = Selector::range(0, 10);
    ///
    /// assert!(selector.matches(&Value::from(0)));
    /// assert!(selector.matches(&Value::from(9.5)));
    /// assert!(!selector.matches(&Value::from(10)));
    /// ```
    pub fn matches(&self, value: &Value) -> bool {
        match self {
            Self::Exact(expected) => expected.eq_coordinate(value),
            Self::Range { start, end } => {
                let above = start.as_ref().is_none_or(|start| {
                    matches!(
                        value.cmp_coordinate(start),
                        Some(Ordering::Greater | Ordering::Equal)
                    )
                });
                let below = end
                    .as_ref()
                    .is_none_or(|end| value.cmp_coordinate(end) == Some(Ordering::Less));
                above && below
            }
            Self::OneOf(values) => values.iter().any(|candidate| candidate.eq_coordinate(value)),
        }
    }
}

impl From<Value> for Selector {
    fn from(value: Value) -> Self {
        Self::Exact(value)
    }
}

/// An ordered set of per-dimension selectors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Selection {
    selectors: IndexMap<String, Selector>,
}

impl Selection {
    /// Creates an empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a selector for the named dimension (builder style).
    pub fn with(mut self, dimension: impl Into<String>, selector: impl Into<Selector>) -> Self {
        self.selectors.insert(dimension.into(), selector.into());
        self
    }

    /// Returns the selector for the named dimension.
    pub fn get(&self, dimension: &str) -> Option<&Selector> {
        self.selectors.get(dimension)
    }

    /// Returns `true` if the selection filters nothing.
    pub fn is_empty(&self) -> bool {
        self.selectors.is_empty()
    }

    /// Returns the number of filtered dimensions.
    pub fn len(&self) -> usize {
        self.selectors.len()
    }

    /// Iterates over `(dimension name, selector)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Selector)> {
        self.selectors
            .iter()
            .map(|(name, selector)| (name.as_str(), selector))
    }

    /// Returns the subset of this selection that applies to `dimensions`.
    ///
    /// Selectors naming dimensions absent from the list are dropped, which is
    /// how selections spanning heterogeneous elements ignore invalid
    /// dimensions.
    pub fn restricted_to(&self, dimensions: &[Dimension]) -> Selection {
        let selectors: IndexMap<String, Selector> = self
            .selectors
            .iter()
            .filter(|(name, _)| dimensions.iter().any(|dim| dim.name() == name.as_str()))
            .map(|(name, selector)| (name.clone(), selector.clone()))
            .collect();

        if selectors.len() != self.selectors.len() {
            trace!(
                requested = self.selectors.len(),
                applicable = selectors.len();
                "Dropped selectors for missing dimensions"
            );
        }

        Selection { selectors }
    }
}
