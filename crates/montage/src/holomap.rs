//! Uniform keyed mappings of elements.
//!
//! A [`HoloMap`] holds elements indexed by multi-dimensional [`Key`]s, one
//! coordinate per key dimension, in insertion order. It is typically used to
//! hold a parameter sweep or a time series of the same kind of element.

use std::rc::Rc;

use indexmap::IndexMap;

use montage_core::{
    dimension::{Dimension, DimensionRef},
    element::{Selection, Viewable},
    value::{Key, Value},
};

use crate::{
    error::{LayoutError, Result},
    item::{element_values, select_element},
};

const HOLOMAP_GROUP: &str = "HoloMap";

/// Checks that `key` has one coordinate per key dimension.
pub(crate) fn check_key_arity(key: &Key, key_dimensions: &[Dimension]) -> Result<()> {
    if key.arity() != key_dimensions.len() {
        return Err(LayoutError::KeyArity {
            key: key.to_string(),
            expected: key_dimensions.len(),
            found: key.arity(),
        });
    }
    Ok(())
}

/// Returns `true` if every key-dimension selector accepts the matching
/// coordinate of `key`.
pub(crate) fn key_matches(key: &Key, key_dimensions: &[Dimension], selection: &Selection) -> bool {
    key_dimensions
        .iter()
        .zip(key.values())
        .all(|(dim, value)| {
            selection
                .get(dim.name())
                .is_none_or(|selector| selector.matches(value))
        })
}

/// Returns the coordinates of `keys` along the key dimension at `index`.
pub(crate) fn key_coordinates<'a>(keys: impl Iterator<Item = &'a Key>, index: usize) -> Vec<Value> {
    keys.filter_map(|key| key.get(index).cloned()).collect()
}

/// An insertion-ordered mapping from keys to elements.
#[derive(Debug, Clone, Default)]
pub struct HoloMap {
    key_dimensions: Vec<Dimension>,
    data: IndexMap<Key, Rc<dyn Viewable>>,
    group: Option<String>,
    label: Option<String>,
}

impl HoloMap {
    /// Creates an empty map with the given key dimensions.
    pub fn new(key_dimensions: Vec<Dimension>) -> Self {
        Self {
            key_dimensions,
            ..Self::default()
        }
    }

    /// Creates a map from `(key, element)` pairs.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::KeyArity`] if any key does not match the number
    /// of key dimensions.
    pub fn from_items<K: Into<Key>>(
        key_dimensions: Vec<Dimension>,
        items: impl IntoIterator<Item = (K, Rc<dyn Viewable>)>,
    ) -> Result<Self> {
        let mut map = Self::new(key_dimensions);
        for (key, element) in items {
            map.insert(key, element)?;
        }
        Ok(map)
    }

    /// Sets an explicit group (builder style).
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Sets an explicit label (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Inserts an element, replacing any element already at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::KeyArity`] if the key does not match the number
    /// of key dimensions.
    pub fn insert(&mut self, key: impl Into<Key>, element: Rc<dyn Viewable>) -> Result<()> {
        let key = key.into();
        check_key_arity(&key, &self.key_dimensions)?;
        self.data.insert(key, element);
        Ok(())
    }

    /// Returns the element at `key`.
    pub fn get(&self, key: &Key) -> Option<&Rc<dyn Viewable>> {
        self.data.get(key)
    }

    /// Returns the key dimensions.
    pub fn key_dimensions(&self) -> &[Dimension] {
        &self.key_dimensions
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> {
        self.data.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Rc<dyn Viewable>> {
        self.data.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Rc<dyn Viewable>)> {
        self.data.iter()
    }

    /// Returns the most recently inserted key.
    pub fn last_key(&self) -> Option<&Key> {
        self.data.last().map(|(key, _)| key)
    }

    /// Returns the most recently inserted element.
    pub fn last(&self) -> Option<&Rc<dyn Viewable>> {
        self.data.last().map(|(_, element)| element)
    }

    /// Returns a copy holding only the last entry.
    pub fn last_entry(&self) -> HoloMap {
        HoloMap {
            key_dimensions: self.key_dimensions.clone(),
            data: self
                .data
                .last()
                .map(|(key, element)| (key.clone(), Rc::clone(element)))
                .into_iter()
                .collect(),
            group: self.group.clone(),
            label: self.label.clone(),
        }
    }

    /// The explicit group, else the last element's group, else `"HoloMap"`.
    pub fn group(&self) -> &str {
        self.group
            .as_deref()
            .or_else(|| self.last().map(|element| element.group()))
            .unwrap_or(HOLOMAP_GROUP)
    }

    /// The explicit label, else the last element's label, else empty.
    pub fn label(&self) -> &str {
        self.label
            .as_deref()
            .or_else(|| self.last().map(|element| element.label()))
            .unwrap_or("")
    }

    /// Key dimensions followed by the dimensions of the last element.
    pub fn dimensions(&self) -> Vec<Dimension> {
        let mut dimensions = self.key_dimensions.clone();
        if let Some(last) = self.last() {
            dimensions.extend(last.dimensions());
        }
        dimensions
    }

    /// Returns key coordinates for a key dimension, otherwise the values of
    /// every element along the dimension, concatenated in key order.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::KeyNotFound`] if the dimension is unknown.
    pub fn dimension_values(&self, dimension: &DimensionRef) -> Result<Vec<Value>> {
        let dimensions = self.dimensions();
        let resolved = dimension
            .resolve(&dimensions)
            .ok_or_else(|| LayoutError::KeyNotFound(dimension.to_string()))?;

        if let Some(index) = self.key_dimensions.iter().position(|dim| dim == resolved) {
            return Ok(key_coordinates(self.data.keys(), index));
        }

        let by_name = DimensionRef::from(resolved);
        let mut values = Vec::new();
        for element in self.data.values() {
            values.extend(element_values(element.as_ref(), &by_name)?);
        }
        Ok(values)
    }

    /// Returns a copy with every element relabelled.
    ///
    /// An explicit group or label is also recorded on the map itself.
    pub fn relabel(&self, group: Option<&str>, label: Option<&str>) -> HoloMap {
        HoloMap {
            key_dimensions: self.key_dimensions.clone(),
            data: self
                .data
                .iter()
                .map(|(key, element)| (key.clone(), element.relabel(group, label)))
                .collect(),
            group: group.map(str::to_string).or_else(|| self.group.clone()),
            label: label.map(str::to_string).or_else(|| self.label.clone()),
        }
    }

    /// Returns a copy keeping the entries whose keys match the key-dimension
    /// selectors, with the remaining selectors applied to each element.
    pub fn select(&self, selection: &Selection) -> HoloMap {
        HoloMap {
            key_dimensions: self.key_dimensions.clone(),
            data: self
                .data
                .iter()
                .filter(|(key, _)| key_matches(key, &self.key_dimensions, selection))
                .map(|(key, element)| (key.clone(), select_element(element, selection)))
                .collect(),
            group: self.group.clone(),
            label: self.label.clone(),
        }
    }
}
