//! Keyed grids of items.
//!
//! An [`NdLayout`] arranges a family of items, indexed by multi-dimensional
//! keys, on a grid: entries fill rows left to right in insertion order and
//! wrap after [`GridLayout::max_cols`] columns.

use indexmap::IndexMap;

use montage_core::{
    dimension::{Dimension, DimensionRef},
    element::Selection,
    value::{Key, Value},
};

use crate::{
    config::LayoutConfig,
    error::{LayoutError, Result},
    grid::{GridLayout, grid_cell},
    holomap::{check_key_arity, key_coordinates, key_matches},
    item::Item,
};

const NDLAYOUT_GROUP: &str = "NdLayout";

/// An insertion-ordered mapping from keys to items, laid out on a grid.
#[derive(Debug, Clone)]
pub struct NdLayout {
    key_dimensions: Vec<Dimension>,
    data: IndexMap<Key, Item>,
    max_cols: usize,
    group: String,
    label: String,
}

impl NdLayout {
    /// Creates an empty layout with the given key dimensions.
    pub fn new(key_dimensions: Vec<Dimension>) -> Self {
        Self::with_config(key_dimensions, &LayoutConfig::default())
    }

    /// Creates an empty layout whose wrap width comes from `config`.
    pub fn with_config(key_dimensions: Vec<Dimension>, config: &LayoutConfig) -> Self {
        Self {
            key_dimensions,
            data: IndexMap::new(),
            max_cols: config.max_cols(),
            group: NDLAYOUT_GROUP.to_string(),
            label: String::new(),
        }
    }

    /// Creates a layout from `(key, item)` pairs in order.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::KeyArity`] if any key does not match the number
    /// of key dimensions.
    ///
    /// # Example
    ///
    /// ```
    /// # use montage::{GridLayout, Item, NdLayout};
    /// # use montage::dimension::Dimension;
    /// let layout = NdLayout::from_items(vec![Dimension::new("k")], Vec::<(i64, Item)>::new()).unwrap();
    /// assert_eq!(layout.shape(), (1, 0));
    /// ```
    pub fn from_items<K: Into<Key>, I: Into<Item>>(
        key_dimensions: Vec<Dimension>,
        items: impl IntoIterator<Item = (K, I)>,
    ) -> Result<Self> {
        let mut layout = Self::new(key_dimensions);
        for (key, item) in items {
            layout.insert(key, item)?;
        }
        Ok(layout)
    }

    /// Sets the group (builder style).
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = group.into();
        self
    }

    /// Sets the label (builder style).
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Inserts an item, replacing any item already at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::KeyArity`] if the key does not match the number
    /// of key dimensions.
    pub fn insert(&mut self, key: impl Into<Key>, item: impl Into<Item>) -> Result<()> {
        let key = key.into();
        check_key_arity(&key, &self.key_dimensions)?;
        self.data.insert(key, item.into());
        Ok(())
    }

    /// Returns the item at `key`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::KeyNotFound`] if no item has this key.
    pub fn get(&self, key: &Key) -> Result<&Item> {
        self.data
            .get(key)
            .ok_or_else(|| LayoutError::KeyNotFound(key.to_string()))
    }

    /// Returns the entry at `index` in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::IndexOutOfRange`] past the last entry.
    pub fn get_index(&self, index: usize) -> Result<(&Key, &Item)> {
        self.data.get_index(index).ok_or(LayoutError::IndexOutOfRange {
            index,
            len: self.data.len(),
        })
    }

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

    pub fn values(&self) -> impl Iterator<Item = &Item> {
        self.data.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Key, &Item)> {
        self.data.iter()
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The key dimensions.
    pub fn dimensions(&self) -> Vec<Dimension> {
        self.key_dimensions.clone()
    }

    /// Maps each entry, in insertion order, to its `(row, col)` grid cell.
    pub fn grid_items(&self) -> IndexMap<(usize, usize), (&Key, &Item)> {
        self.data
            .iter()
            .enumerate()
            .map(|(index, entry)| (grid_cell(index, self.max_cols), entry))
            .collect()
    }

    /// Returns key coordinates for a key dimension, otherwise the values of
    /// every item that has the dimension, concatenated in key order.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::KeyNotFound`] if neither the layout nor any of
    /// its items has the dimension.
    pub fn dimension_values(&self, dimension: &DimensionRef) -> Result<Vec<Value>> {
        let key_index = dimension
            .resolve(&self.key_dimensions)
            .and_then(|resolved| self.key_dimensions.iter().position(|dim| dim == resolved));
        if let Some(index) = key_index {
            return Ok(key_coordinates(self.data.keys(), index));
        }

        let mut found = false;
        let mut values = Vec::new();
        for item in self.data.values() {
            if let Ok(item_values) = item.dimension_values(dimension) {
                found = true;
                values.extend(item_values);
            }
        }

        if !found {
            return Err(LayoutError::KeyNotFound(dimension.to_string()));
        }
        Ok(values)
    }

    /// Returns a copy holding only the last entry.
    pub fn last_entry(&self) -> NdLayout {
        NdLayout {
            data: self
                .data
                .last()
                .map(|(key, item)| (key.clone(), item.clone()))
                .into_iter()
                .collect(),
            ..self.clone()
        }
    }

    /// Returns a copy in which every nested mapping is reduced to its last
    /// entry and every [`AdjointLayout`](crate::AdjointLayout) to its
    /// [`last`](crate::AdjointLayout::last). Elements pass through unchanged.
    pub fn last(&self) -> NdLayout {
        let data = self
            .data
            .iter()
            .map(|(key, item)| {
                let item = match item {
                    Item::HoloMap(map) => Item::HoloMap(map.last_entry()),
                    Item::NdLayout(layout) => Item::NdLayout(layout.last_entry()),
                    Item::Adjoint(adjoint) => Item::Adjoint(adjoint.last()),
                    Item::Element(_) => item.clone(),
                };
                (key.clone(), item)
            })
            .collect();

        NdLayout {
            data,
            ..self.clone()
        }
    }

    /// Returns a copy with the layout's own group and/or label replaced.
    pub fn relabel(&self, group: Option<&str>, label: Option<&str>) -> NdLayout {
        let mut relabelled = self.clone();
        if let Some(group) = group {
            relabelled.group = group.to_string();
        }
        if let Some(label) = label {
            relabelled.label = label.to_string();
        }
        relabelled
    }

    /// Returns a copy keeping the entries whose keys match the key-dimension
    /// selectors, with `selection` applied to each remaining item.
    pub fn select(&self, selection: &Selection) -> NdLayout {
        let data = self
            .data
            .iter()
            .filter(|(key, _)| key_matches(key, &self.key_dimensions, selection))
            .map(|(key, item)| (key.clone(), item.select(selection)))
            .collect();

        NdLayout {
            data,
            ..self.clone()
        }
    }
}

impl GridLayout for NdLayout {
    fn cell_count(&self) -> usize {
        self.data.len()
    }

    fn max_cols(&self) -> usize {
        self.max_cols
    }

    fn cols(&mut self, max_cols: usize) -> &mut Self {
        self.max_cols = max_cols;
        self
    }
}
