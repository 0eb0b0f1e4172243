//! A primary item with up to two adjoined annotations.
//!
//! An [`AdjointLayout`] binds a `main` item to optional `right` and `top`
//! items, for example an image with a histogram of its values along the
//! right edge:
//!
//! ```text
//!  ___________ __
//! |____top____|__|
//! |           |  |
//! |           |  |
//! |   main    |R |
//! |           |  |
//! |___________|__|
//! ```
//!
//! Slots are always kept in [`Position::LAYOUT_ORDER`].

use std::{fmt, str::FromStr};

use indexmap::IndexMap;
use log::trace;

use montage_core::{
    dimension::{Dimension, DimensionRef},
    element::Selection,
    value::Value,
};

use crate::{
    error::{LayoutError, Result},
    item::{Adjoin, Item},
};

const ADJOINT_GROUP: &str = "AdjointLayout";
const MAX_SLOTS: usize = 3;

/// A slot of an [`AdjointLayout`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Position {
    Main,
    Right,
    Top,
}

impl Position {
    /// Slot order used for positional construction and iteration.
    pub const LAYOUT_ORDER: [Position; MAX_SLOTS] = [Position::Main, Position::Right, Position::Top];

    /// Returns the position tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Right => "right",
            Self::Top => "top",
        }
    }

    /// Returns the position at `index` in [`Position::LAYOUT_ORDER`].
    pub fn from_index(index: usize) -> Option<Position> {
        Self::LAYOUT_ORDER.get(index).copied()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Position {
    type Err = LayoutError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "main" => Ok(Self::Main),
            "right" => Ok(Self::Right),
            "top" => Ok(Self::Top),
            other => Err(LayoutError::InvalidPosition(other.to_string())),
        }
    }
}

/// A key for [`AdjointLayout::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdjointKey {
    /// The whole container.
    Whole,
    /// A slot by its index in [`Position::LAYOUT_ORDER`].
    Index(usize),
    /// A slot by its position tag.
    Name(String),
    /// A slot by position.
    Position(Position),
}

impl From<()> for AdjointKey {
    fn from(_: ()) -> Self {
        Self::Whole
    }
}

impl From<usize> for AdjointKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for AdjointKey {
    fn from(name: &str) -> Self {
        Self::Name(name.to_string())
    }
}

impl From<Position> for AdjointKey {
    fn from(position: Position) -> Self {
        Self::Position(position)
    }
}

/// The result of indexing an [`AdjointLayout`].
#[derive(Debug, Clone, Copy)]
pub enum AdjointEntry<'a> {
    Whole(&'a AdjointLayout),
    Slot(&'a Item),
}

impl<'a> AdjointEntry<'a> {
    /// Returns the slot item, if a single slot was selected.
    pub fn item(&self) -> Option<&'a Item> {
        match self {
            Self::Slot(item) => Some(item),
            Self::Whole(_) => None,
        }
    }
}

/// Rejects items that cannot occupy a slot.
fn check_slot_item(item: &Item) -> Result<()> {
    match item {
        Item::Adjoint(_) => Err(LayoutError::TypeMismatch {
            container: ADJOINT_GROUP,
            expected: "elements, HoloMaps or NdLayouts",
            found: item.kind_name(),
        }),
        _ => Ok(()),
    }
}

/// A main item with optional `right` and `top` annotations.
#[derive(Debug, Clone)]
pub struct AdjointLayout {
    data: IndexMap<Position, Item>,
    main_layer: usize,
    group: String,
    label: String,
}

impl Default for AdjointLayout {
    fn default() -> Self {
        Self {
            data: IndexMap::new(),
            main_layer: 0,
            group: ADJOINT_GROUP.to_string(),
            label: String::new(),
        }
    }
}

impl AdjointLayout {
    /// Creates an empty adjoint layout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an adjoint layout from up to three items, assigned to the
    /// slots in [`Position::LAYOUT_ORDER`].
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::TooManySlots`] for more than three items and
    /// [`LayoutError::TypeMismatch`] if an item cannot occupy a slot.
    ///
    /// # Example
    ///
    /// ```
    /// # use montage::AdjointLayout;
    /// let empty = AdjointLayout::from_items(Vec::new()).map(|adjoint| adjoint.len());
    /// assert_eq!(empty, Ok(0));
    /// ```
    pub fn from_items(items: Vec<Item>) -> Result<Self> {
        if items.len() > MAX_SLOTS {
            return Err(LayoutError::TooManySlots { count: items.len() });
        }

        let mut adjoint = Self::new();
        for (position, item) in Position::LAYOUT_ORDER.into_iter().zip(items) {
            check_slot_item(&item)?;
            adjoint.data.insert(position, item);
        }
        Ok(adjoint)
    }

    /// Creates an adjoint layout from explicitly positioned items.
    ///
    /// Entries are stored in [`Position::LAYOUT_ORDER`] whatever the input
    /// order.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::TooManySlots`] for more than three entries,
    /// [`LayoutError::InvalidPosition`] for an unknown position tag,
    /// [`LayoutError::DuplicatePosition`] for a tag given twice and
    /// [`LayoutError::TypeMismatch`] if an item cannot occupy a slot.
    pub fn from_positions<S: AsRef<str>>(entries: impl IntoIterator<Item = (S, Item)>) -> Result<Self> {
        let entries: Vec<(S, Item)> = entries.into_iter().collect();
        if entries.len() > MAX_SLOTS {
            return Err(LayoutError::TooManySlots {
                count: entries.len(),
            });
        }

        let mut adjoint = Self::new();
        for (name, item) in entries {
            let position: Position = name.as_ref().parse()?;
            check_slot_item(&item)?;
            if adjoint.data.contains_key(&position) {
                return Err(LayoutError::DuplicatePosition(position.to_string()));
            }
            adjoint.data.insert(position, item);
        }
        adjoint.data.sort_keys();
        Ok(adjoint)
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

    /// Returns the item at `position`, if populated.
    pub fn slot(&self, position: Position) -> Option<&Item> {
        self.data.get(&position)
    }

    pub fn main(&self) -> Option<&Item> {
        self.slot(Position::Main)
    }

    pub fn right(&self) -> Option<&Item> {
        self.slot(Position::Right)
    }

    pub fn top(&self) -> Option<&Item> {
        self.slot(Position::Top)
    }

    /// Indexes the layout.
    ///
    /// Indices 0, 1 and 2 select `main`, `right` and `top`; position tags
    /// select the same slots by name; [`AdjointKey::Whole`] (from `()`)
    /// returns the container itself.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::IndexOutOfRange`] for an index past `top`, and
    /// [`LayoutError::KeyNotFound`] for an unknown tag or an empty slot.
    pub fn get(&self, key: impl Into<AdjointKey>) -> Result<AdjointEntry<'_>> {
        let position = match key.into() {
            AdjointKey::Whole => return Ok(AdjointEntry::Whole(self)),
            AdjointKey::Index(index) => {
                Position::from_index(index).ok_or(LayoutError::IndexOutOfRange {
                    index,
                    len: MAX_SLOTS,
                })?
            }
            AdjointKey::Name(name) => name
                .parse::<Position>()
                .map_err(|_| LayoutError::KeyNotFound(name.clone()))?,
            AdjointKey::Position(position) => position,
        };

        self.slot(position)
            .map(AdjointEntry::Slot)
            .ok_or_else(|| LayoutError::KeyNotFound(position.to_string()))
    }

    /// Assigns `item` to `position`, replacing any previous occupant.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::TypeMismatch`] if the item cannot occupy a slot.
    pub fn set(&mut self, position: Position, item: impl Into<Item>) -> Result<()> {
        let item = item.into();
        check_slot_item(&item)?;
        self.data.insert(position, item);
        self.data.sort_keys();
        Ok(())
    }

    /// Assigns `item` to the slot named by `position`.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidPosition`] for an unknown position tag,
    /// otherwise as [`AdjointLayout::set`].
    pub fn set_str(&mut self, position: &str, item: impl Into<Item>) -> Result<()> {
        self.set(position.parse()?, item)
    }

    /// Returns the populated positions in layout order.
    pub fn positions(&self) -> Vec<Position> {
        self.data.keys().copied().collect()
    }

    /// Iterates over populated slots in layout order.
    pub fn iter(&self) -> impl Iterator<Item = (Position, &Item)> {
        self.data.iter().map(|(position, item)| (*position, item))
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Index of the main layer when `main` holds a multi-layer item.
    pub fn main_layer(&self) -> usize {
        self.main_layer
    }

    pub fn set_main_layer(&mut self, main_layer: usize) {
        self.main_layer = main_layer;
    }

    pub fn group(&self) -> &str {
        &self.group
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// The single synthetic `AdjointLayout` index dimension.
    pub fn dimensions(&self) -> Vec<Dimension> {
        vec![Dimension::new(ADJOINT_GROUP)]
    }

    /// Dimensions of the `main` slot.
    pub fn deep_dimensions(&self) -> Vec<Dimension> {
        self.main().map(Item::dimensions).unwrap_or_default()
    }

    /// Returns the populated position tags for the `AdjointLayout`
    /// dimension, otherwise the values of the `main` slot.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::KeyNotFound`] if `main` is empty or does not
    /// have the dimension.
    pub fn dimension_values(&self, dimension: &DimensionRef) -> Result<Vec<Value>> {
        let dimensions = self.dimensions();
        let is_index_dimension = match dimension {
            DimensionRef::Index(_) => dimension.resolve(&dimensions).is_some(),
            DimensionRef::Name(name) => name == ADJOINT_GROUP,
        };

        if is_index_dimension {
            return Ok(self
                .data
                .keys()
                .map(|position| Value::from(position.as_str()))
                .collect());
        }
        if let DimensionRef::Index(index) = dimension {
            return Err(LayoutError::IndexOutOfRange {
                index: *index,
                len: dimensions.len(),
            });
        }

        self.main()
            .ok_or_else(|| LayoutError::KeyNotFound(Position::Main.to_string()))?
            .dimension_values(dimension)
    }

    /// Returns a copy in which every mapping slot is replaced by its last
    /// entry: a [`HoloMap`](crate::HoloMap) by its last element and an
    /// [`NdLayout`](crate::NdLayout) by its own [`last`](crate::NdLayout::last).
    pub fn last(&self) -> AdjointLayout {
        let data = self
            .data
            .iter()
            .map(|(position, item)| {
                let item = match item {
                    Item::HoloMap(map) => map
                        .last()
                        .map(|element| Item::Element(element.clone()))
                        .unwrap_or_else(|| item.clone()),
                    Item::NdLayout(layout) => Item::NdLayout(layout.last()),
                    other => other.clone(),
                };
                (*position, item)
            })
            .collect();

        AdjointLayout {
            data,
            ..self.clone()
        }
    }

    /// Returns a copy with the layout's own group and/or label replaced.
    pub fn relabel(&self, group: Option<&str>, label: Option<&str>) -> AdjointLayout {
        let mut relabelled = self.clone();
        if let Some(group) = group {
            relabelled.group = group.to_string();
        }
        if let Some(label) = label {
            relabelled.label = label.to_string();
        }
        relabelled
    }

    /// Returns a copy with `selection` applied to every slot.
    pub fn select(&self, selection: &Selection) -> AdjointLayout {
        AdjointLayout {
            data: self
                .data
                .iter()
                .map(|(position, item)| (*position, item.select(selection)))
                .collect(),
            ..self.clone()
        }
    }
}

impl Adjoin for AdjointLayout {
    /// Appends `other` after the populated slots, in a new layout.
    fn adjoin(&self, other: impl Into<Item>) -> Result<AdjointLayout> {
        let other = other.into();
        check_slot_item(&other)?;

        let mut items: Vec<Item> = self.data.values().cloned().collect();
        items.push(other);
        trace!(slots = items.len(); "Adjoining item");

        let mut adjoint = AdjointLayout::from_items(items)?;
        adjoint.group.clone_from(&self.group);
        adjoint.label.clone_from(&self.label);
        Ok(adjoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::ErrorKind,
        holomap::HoloMap,
        ndlayout::NdLayout,
        test_utils::{curve, curve_element},
    };
    use montage_core::value::Key;

    fn image_with_histogram() -> AdjointLayout {
        AdjointLayout::from_items(vec![curve("Image", ""), curve("Histogram", "")]).unwrap()
    }

    #[test]
    fn test_from_items_assigns_layout_order() {
        let adjoint =
            AdjointLayout::from_items(vec![curve("A", ""), curve("B", ""), curve("C", "")]).unwrap();

        assert_eq!(adjoint.len(), 3);
        assert_eq!(
            adjoint.positions(),
            vec![Position::Main, Position::Right, Position::Top]
        );
        assert_eq!(adjoint.top().map(Item::group), Some("C"));
    }

    #[test]
    fn test_from_items_rejects_four() {
        let items = vec![curve("A", ""), curve("B", ""), curve("C", ""), curve("D", "")];
        let err = AdjointLayout::from_items(items).unwrap_err();

        assert_eq!(err, LayoutError::TooManySlots { count: 4 });
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_from_items_rejects_nested_adjoint() {
        let err = AdjointLayout::from_items(vec![Item::Adjoint(image_with_histogram())]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_from_positions_normalises_order() {
        let adjoint =
            AdjointLayout::from_positions([("top", curve("T", "")), ("main", curve("M", ""))]).unwrap();

        assert_eq!(adjoint.positions(), vec![Position::Main, Position::Top]);
        assert!(adjoint.right().is_none());
    }

    #[test]
    fn test_from_positions_rejects_unknown_position() {
        let err = AdjointLayout::from_positions([("left", curve("L", ""))]).unwrap_err();

        assert_eq!(err, LayoutError::InvalidPosition("left".to_string()));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_from_positions_rejects_duplicate_position() {
        let err = AdjointLayout::from_positions([
            ("main", curve("First", "")),
            ("main", curve("Second", "")),
        ])
        .unwrap_err();

        assert_eq!(err, LayoutError::DuplicatePosition("main".to_string()));
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_get_by_index_name_and_whole() {
        let adjoint = image_with_histogram();

        let main = adjoint.get(0usize).unwrap().item().unwrap();
        assert_eq!(main.group(), "Image");
        let right = adjoint.get("right").unwrap().item().unwrap();
        assert_eq!(right.group(), "Histogram");
        assert!(matches!(adjoint.get(()), Ok(AdjointEntry::Whole(_))));
    }

    #[test]
    fn test_get_failures_are_lookup_errors() {
        let adjoint = image_with_histogram();

        for err in [
            adjoint.get(3usize).unwrap_err(),
            adjoint.get(2usize).unwrap_err(),
            adjoint.get("left").unwrap_err(),
            adjoint.get(Position::Top).unwrap_err(),
        ] {
            assert_eq!(err.kind(), ErrorKind::Lookup);
        }
    }

    #[test]
    fn test_set_validates_position_and_type() {
        let mut adjoint = AdjointLayout::new();

        adjoint.set_str("top", curve("T", "")).unwrap();
        adjoint.set(Position::Main, curve_element("M", "")).unwrap();
        assert_eq!(adjoint.positions(), vec![Position::Main, Position::Top]);

        let err = adjoint.set_str("bottom", curve("B", "")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);

        let err = adjoint.set(Position::Right, image_with_histogram()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
        assert_eq!(adjoint.len(), 2);
    }

    #[test]
    fn test_adjoin_returns_new_layout() {
        let adjoint = image_with_histogram();
        let extended = adjoint.adjoin(curve("Profile", "")).unwrap();

        assert_eq!(adjoint.len(), 2);
        assert_eq!(extended.len(), 3);
        assert_eq!(extended.top().map(Item::group), Some("Profile"));
    }

    #[test]
    fn test_adjoin_fills_gaps_in_layout_order() {
        let sparse =
            AdjointLayout::from_positions([("main", curve("M", "")), ("top", curve("T", ""))]).unwrap();
        let extended = sparse.adjoin(curve("X", "")).unwrap();

        let groups: Vec<&str> = extended.iter().map(|(_, item)| item.group()).collect();
        assert_eq!(groups, vec!["M", "T", "X"]);
    }

    #[test]
    fn test_adjoin_rejects_adjoint_operand() {
        let err = image_with_histogram()
            .adjoin(image_with_histogram())
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_deep_dimensions_come_from_main() {
        let adjoint = image_with_histogram();

        let names: Vec<String> = adjoint
            .deep_dimensions()
            .iter()
            .map(|dim| dim.name().to_string())
            .collect();
        assert_eq!(names, vec!["x", "y"]);
        assert!(AdjointLayout::new().deep_dimensions().is_empty());
    }

    #[test]
    fn test_dimension_values_index_dimension() {
        let adjoint = image_with_histogram();

        assert_eq!(
            adjoint.dimension_values(&"AdjointLayout".into()).unwrap(),
            vec![Value::from("main"), Value::from("right")]
        );
        assert_eq!(
            adjoint.dimension_values(&0usize.into()).unwrap(),
            vec![Value::from("main"), Value::from("right")]
        );
        assert_eq!(adjoint.dimension_values(&"y".into()).unwrap().len(), 3);
        assert!(AdjointLayout::new().dimension_values(&"y".into()).is_err());
    }

    #[test]
    fn test_last_replaces_mappings() {
        let map = HoloMap::from_items(
            vec![Dimension::new("t")],
            vec![
                (Key::from(0), curve_element("Frame", "first")),
                (Key::from(1), curve_element("Frame", "second")),
            ],
        )
        .unwrap();
        let mut adjoint = AdjointLayout::new();
        adjoint.set(Position::Main, map).unwrap();
        adjoint
            .set(
                Position::Right,
                NdLayout::from_items(
                    vec![Dimension::new("k")],
                    vec![(Key::from(1), curve("A", "")), (Key::from(2), curve("B", ""))],
                )
                .unwrap(),
            )
            .unwrap();
        adjoint.set(Position::Top, curve("Static", "")).unwrap();

        let last = adjoint.last();

        let main = last.main().unwrap();
        assert!(main.as_element().is_some());
        assert_eq!(main.label(), "second");
        match last.right() {
            Some(Item::NdLayout(layout)) => assert_eq!(layout.len(), 2),
            other => panic!("expected NdLayout, got {other:?}"),
        }
        assert_eq!(last.top().map(Item::group), Some("Static"));
        assert!(matches!(adjoint.main(), Some(Item::HoloMap(_))));
    }
}
