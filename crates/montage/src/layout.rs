//! Path-addressed layouts.
//!
//! A [`Layout`] is a flat, insertion-ordered mapping from [`Path`]s to
//! [`Item`]s. Paths derive from each item's group and label; when two items
//! would share a path, the conflict is resolved with Roman-numeral segments
//! as described in [`crate::path`].
//!
//! Layouts are built by composition. Every [`Compose::compose`] call returns
//! a fresh layout and leaves both operands untouched, while the configuration
//! setters ([`GridLayout::cols`] and [`Layout::display`]) mutate the receiver
//! in place.

use indexmap::IndexMap;
use log::debug;

use montage_core::element::Selection;

use crate::{
    config::{DisplayPolicy, LayoutConfig},
    error::{LayoutError, Result},
    grid::{GridLayout, effective_cols, grid_cell},
    item::{Compose, Item, Operand},
    path::{Path, relabel_item_paths},
};

/// Key accepted by [`Layout::get`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutKey {
    /// The n-th entry in insertion order.
    Index(usize),
    /// A `(row, col)` grid cell.
    Grid(usize, usize),
    /// A full path or a path prefix.
    Path(Path),
}

impl From<usize> for LayoutKey {
    fn from(index: usize) -> Self {
        Self::Index(index)
    }
}

impl From<(usize, usize)> for LayoutKey {
    fn from((row, col): (usize, usize)) -> Self {
        Self::Grid(row, col)
    }
}

impl From<Path> for LayoutKey {
    fn from(path: Path) -> Self {
        Self::Path(path)
    }
}

impl From<&Path> for LayoutKey {
    fn from(path: &Path) -> Self {
        Self::Path(path.clone())
    }
}

impl From<&str> for LayoutKey {
    fn from(path: &str) -> Self {
        Self::Path(Path::from(path))
    }
}

/// Result of a [`Layout`] lookup.
#[derive(Debug, Clone)]
pub enum Node<'a> {
    /// A single item.
    Leaf(&'a Item),
    /// The entries below a path prefix, with the prefix stripped.
    Branch(Layout),
}

impl<'a> Node<'a> {
    pub fn leaf(&self) -> Option<&'a Item> {
        match self {
            Self::Leaf(item) => Some(item),
            Self::Branch(_) => None,
        }
    }

    pub fn into_branch(self) -> Option<Layout> {
        match self {
            Self::Leaf(_) => None,
            Self::Branch(layout) => Some(layout),
        }
    }
}

/// An insertion-ordered tree of items addressed by unique paths.
#[derive(Debug, Clone)]
pub struct Layout {
    items: IndexMap<Path, Item>,
    max_cols: usize,
    display: DisplayPolicy,
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}

impl Layout {
    /// Creates an empty layout with the default configuration.
    pub fn new() -> Self {
        Self::with_config(&LayoutConfig::default())
    }

    /// Creates an empty layout seeded from `config`.
    pub fn with_config(config: &LayoutConfig) -> Self {
        Self {
            items: IndexMap::new(),
            max_cols: config.max_cols(),
            display: config.display(),
        }
    }

    /// Builds a layout from a value.
    ///
    /// - A sequence is folded left to right with [`Compose::compose`], so
    ///   earlier entries keep bare paths and later duplicates are numbered.
    ///   The result's display policy is [`DisplayPolicy::Auto`].
    /// - A layout is returned as is.
    /// - A single item is wrapped under `(group, label)`, where an empty
    ///   label becomes `"I"`.
    ///
    /// # Example
    ///
    /// ```
    /// # use montage::Layout;
    /// let layout = Layout::from_values(Vec::<montage::Item>::new());
    /// assert!(layout.is_empty());
    /// ```
    pub fn from_values(values: impl Into<Operand>) -> Layout {
        match values.into() {
            Operand::Sequence(operands) => {
                let mut layout = Self::fold_compose(operands);
                layout.display = DisplayPolicy::Auto;
                layout
            }
            Operand::Layout(layout) => layout,
            Operand::Item(item) => {
                let path = Path::for_value(item.group(), item.label());
                Self::from_entries([(path, item)])
            }
        }
    }

    /// Builds a layout from explicit `(path, item)` pairs.
    ///
    /// Conflicting paths are resolved in order, exactly as during
    /// composition.
    pub fn from_path_items<P: Into<Path>, I: Into<Item>>(
        items: impl IntoIterator<Item = (P, I)>,
    ) -> Layout {
        let entries = items
            .into_iter()
            .map(|(path, item)| (path.into(), item.into()));
        Self::from_entries(relabel_item_paths(entries, Item::is_labelled))
    }

    /// Wraps one item under its bare path.
    pub(crate) fn from_leaf(item: Item) -> Layout {
        let path = Path::for_leaf(item.group(), item.label());
        Self::from_entries([(path, item)])
    }

    fn from_entries(entries: impl IntoIterator<Item = (Path, Item)>) -> Layout {
        Self {
            items: entries.into_iter().collect(),
            ..Self::new()
        }
    }

    /// Normalizes the right-hand side of a composition.
    fn from_operand(operand: Operand) -> Layout {
        match operand {
            Operand::Item(item) => Self::from_leaf(item),
            Operand::Layout(layout) => layout,
            sequence @ Operand::Sequence(_) => Self::from_values(sequence),
        }
    }

    fn fold_compose(operands: Vec<Operand>) -> Layout {
        let mut operands = operands.into_iter();
        let Some(first) = operands.next() else {
            return Self::new();
        };
        operands.fold(Self::from_operand(first), |layout, operand| {
            layout.compose(operand)
        })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.items.keys()
    }

    pub fn values(&self) -> impl Iterator<Item = &Item> {
        self.items.values()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Path, &Item)> {
        self.items.iter()
    }

    /// Looks up an entry by index, grid cell or path.
    ///
    /// A grid cell `(row, col)` maps to index `row * max_cols + col`.
    ///
    /// # Errors
    ///
    /// - [`LayoutError::IndexOutOfRange`] for an index past the last entry.
    /// - [`LayoutError::CellOutOfRange`] for a column outside the grid width
    ///   or a cell past the last entry.
    /// - [`LayoutError::KeyNotFound`] for a path that neither names nor
    ///   prefixes any entry.
    pub fn get(&self, key: impl Into<LayoutKey>) -> Result<Node<'_>> {
        match key.into() {
            LayoutKey::Index(index) => self
                .items
                .get_index(index)
                .map(|(_, item)| Node::Leaf(item))
                .ok_or(LayoutError::IndexOutOfRange {
                    index,
                    len: self.items.len(),
                }),
            LayoutKey::Grid(row, col) => {
                let cols = effective_cols(self.max_cols);
                let index = row.saturating_mul(cols).saturating_add(col);
                match self.items.get_index(index) {
                    Some((_, item)) if col < cols => Ok(Node::Leaf(item)),
                    _ => Err(LayoutError::CellOutOfRange { row, col }),
                }
            }
            LayoutKey::Path(path) => self.get_path(&path),
        }
    }

    fn get_path(&self, path: &Path) -> Result<Node<'_>> {
        if let Some(item) = self.items.get(path) {
            return Ok(Node::Leaf(item));
        }

        let branch: IndexMap<Path, Item> = self
            .items
            .iter()
            .filter_map(|(full, item)| {
                full.strip_prefix(path)
                    .filter(|rest| !rest.is_empty())
                    .map(|rest| (rest, item.clone()))
            })
            .collect();

        if branch.is_empty() {
            return Err(LayoutError::KeyNotFound(path.to_string()));
        }

        Ok(Node::Branch(Layout {
            items: branch,
            ..self.empty_like()
        }))
    }

    fn empty_like(&self) -> Layout {
        Layout {
            items: IndexMap::new(),
            max_cols: self.max_cols,
            display: self.display,
        }
    }

    /// Sets the display policy in place and returns the same layout.
    pub fn display(&mut self, display: DisplayPolicy) -> &mut Self {
        self.display = display;
        self
    }

    /// Parses and sets the display policy in place.
    ///
    /// # Errors
    ///
    /// Returns [`LayoutError::InvalidDisplay`] for anything other than
    /// `"auto"` or `"all"`; the layout is left unchanged.
    pub fn display_str(&mut self, display: &str) -> Result<&mut Self> {
        let display = display.parse()?;
        Ok(self.display(display))
    }

    pub fn display_policy(&self) -> DisplayPolicy {
        self.display
    }

    /// Returns the layout's current configuration.
    pub fn config(&self) -> LayoutConfig {
        LayoutConfig::new(self.max_cols, self.display)
    }

    /// Maps each entry, in insertion order, to its `(row, col)` grid cell.
    pub fn grid_items(&self) -> IndexMap<(usize, usize), (&Path, &Item)> {
        let (_, cols) = self.shape();
        self.items
            .iter()
            .enumerate()
            .map(|(index, entry)| (grid_cell(index, cols), entry))
            .collect()
    }

    /// Rebuilds the layout with every item's group replaced by `group`.
    ///
    /// The regrouped items are composed afresh, so paths are derived again
    /// and new duplicates are numbered as in any composition.
    pub fn regroup(&self, group: &str) -> Layout {
        let operands = self
            .items
            .values()
            .map(|item| Operand::Item(item.relabel(Some(group), None)))
            .collect();
        Self::fold_compose(operands)
    }

    /// Returns a copy with `selection` applied to every item.
    ///
    /// Paths and configuration are kept; items without the selected
    /// dimensions are returned unchanged.
    pub fn select(&self, selection: &Selection) -> Layout {
        Layout {
            items: self
                .items
                .iter()
                .map(|(path, item)| (path.clone(), item.select(selection)))
                .collect(),
            ..self.empty_like()
        }
    }
}

impl Compose for Layout {
    fn compose(&self, other: impl Into<Operand>) -> Layout {
        let other = Self::from_operand(other.into());
        let (left, right) = (self.len(), other.len());

        let entries = self
            .items
            .iter()
            .map(|(path, item)| (path.clone(), item.clone()))
            .chain(other.items);
        let mut layout = Self::from_entries(relabel_item_paths(entries, Item::is_labelled));
        layout.display = DisplayPolicy::All;

        debug!(left, right, result = layout.len(); "Composed layouts");
        layout
    }
}

impl GridLayout for Layout {
    fn cell_count(&self) -> usize {
        self.items.len()
    }

    fn max_cols(&self) -> usize {
        self.max_cols
    }

    fn cols(&mut self, max_cols: usize) -> &mut Self {
        self.max_cols = max_cols;
        self
    }
}

#[cfg(test)]
mod tests {
    use montage_core::{element::Selector, value::Value};

    use super::*;
    use crate::{error::ErrorKind, test_utils::curve};

    fn paths(layout: &Layout) -> Vec<String> {
        layout.paths().map(ToString::to_string).collect()
    }

    #[test]
    fn test_single_value_gets_default_label() {
        let layout = Layout::from_values(curve("Curve", ""));
        assert_eq!(paths(&layout), vec!["Curve.I"]);

        let layout = Layout::from_values(curve("Curve", "speed"));
        assert_eq!(paths(&layout), vec!["Curve.speed"]);
    }

    #[test]
    fn test_compose_uses_bare_leaf_paths() {
        let layout = curve("Curve", "").compose(curve("Scatter", "points"));
        assert_eq!(paths(&layout), vec!["Curve", "Scatter.points"]);
        assert_eq!(layout.display_policy(), DisplayPolicy::All);
    }

    #[test]
    fn test_three_unlabelled_duplicates() {
        let layout = Layout::from_values(vec![curve("A", ""), curve("A", ""), curve("A", "")]);

        assert_eq!(paths(&layout), vec!["A.I", "A.II", "A"]);
        assert_eq!(layout.display_policy(), DisplayPolicy::Auto);
    }

    #[test]
    fn test_labelled_duplicates_are_numbered() {
        let layout = Layout::from_values(vec![
            curve("Curve", "speed"),
            curve("Curve", "speed"),
            curve("Curve", "speed"),
        ]);
        assert_eq!(
            paths(&layout),
            vec!["Curve.speed.I", "Curve.speed.II", "Curve.speed"]
        );
    }

    #[test]
    fn test_from_values_of_layout_is_identity() {
        let mut layout = curve("A", "").compose(curve("B", ""));
        layout.cols(7);

        let same = Layout::from_values(layout.clone());
        assert_eq!(paths(&same), paths(&layout));
        assert_eq!(same.max_cols(), 7);
        assert_eq!(same.display_policy(), DisplayPolicy::All);
    }

    #[test]
    fn test_from_values_empty_sequence() {
        let layout = Layout::from_values(Vec::<Item>::new());
        assert!(layout.is_empty());
        assert_eq!(layout.shape(), (1, 0));
    }

    #[test]
    fn test_compose_does_not_mutate_operands() {
        let first = Layout::from_values(curve("A", ""));
        let composed = first.compose(curve("A", ""));

        assert_eq!(paths(&first), vec!["A.I"]);
        assert_eq!(paths(&composed), vec!["A.I", "A"]);
    }

    #[test]
    fn test_compose_with_layout_merges_entries() {
        let left = curve("A", "").compose(curve("B", ""));
        let right = curve("A", "").compose(curve("C", ""));

        let layout = left.compose(&right);
        assert_eq!(paths(&layout), vec!["A.I", "B", "A.II", "C"]);
    }

    #[test]
    fn test_from_path_items_resolves_conflicts() {
        let layout = Layout::from_path_items([
            ("Curve.I", curve("Curve", "")),
            ("Curve.I", curve("Curve", "")),
        ]);
        assert_eq!(paths(&layout), vec!["Curve.I", "Curve.II"]);
    }

    #[test]
    fn test_get_by_index() {
        let layout = Layout::from_values(vec![curve("A", ""), curve("B", "")]);

        assert_eq!(layout.get(1usize).unwrap().leaf().unwrap().group(), "B");
        assert_eq!(
            layout.get(2usize).unwrap_err(),
            LayoutError::IndexOutOfRange { index: 2, len: 2 }
        );
    }

    #[test]
    fn test_get_by_grid_cell() {
        let groups = ["A", "B", "C", "D", "E", "F"];
        let mut layout = Layout::from_values(groups.iter().map(|g| curve(g, "")).collect::<Vec<_>>());
        layout.cols(4);

        let item = layout.get((1usize, 1usize)).unwrap().leaf().unwrap();
        assert_eq!(item.group(), "F");
        assert_eq!(
            layout.get((1usize, 2usize)).unwrap_err(),
            LayoutError::CellOutOfRange { row: 1, col: 2 }
        );
        assert_eq!(
            layout.get((0usize, 4usize)).unwrap_err().kind(),
            ErrorKind::Lookup
        );
    }

    #[test]
    fn test_get_by_path_and_prefix() {
        let layout = Layout::from_values(vec![curve("A", ""), curve("A", ""), curve("B", "")]);

        assert!(layout.get("A.II").unwrap().leaf().is_some());

        let branch = layout.get("A").unwrap().into_branch().unwrap();
        assert_eq!(paths(&branch), vec!["I", "II"]);

        assert_eq!(
            layout.get("C").unwrap_err(),
            LayoutError::KeyNotFound("C".to_string())
        );
    }

    #[test]
    fn test_display_mutates_in_place() {
        let mut layout = Layout::from_values(vec![curve("A", ""), curve("B", "")]);
        let returned: *const Layout = layout.display(DisplayPolicy::All);

        assert!(std::ptr::eq(returned, &layout));
        assert_eq!(layout.display_policy(), DisplayPolicy::All);
    }

    #[test]
    fn test_display_str_rejects_unknown_policy() {
        let mut layout = Layout::new();

        let err = layout.display_str("some").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert_eq!(layout.display_policy(), DisplayPolicy::Auto);

        layout.display_str("all").unwrap();
        assert_eq!(layout.display_policy(), DisplayPolicy::All);
    }

    #[test]
    fn test_with_config() {
        let config = LayoutConfig::new(2, DisplayPolicy::All);
        let layout = Layout::with_config(&config);

        assert_eq!(layout.config(), config);
    }

    #[test]
    fn test_grid_items_follow_shape() {
        let groups = ["A", "B", "C", "D", "E"];
        let mut layout = Layout::from_values(groups.iter().map(|g| curve(g, "")).collect::<Vec<_>>());
        layout.cols(2);

        let cells: Vec<((usize, usize), String)> = layout
            .grid_items()
            .into_iter()
            .map(|(cell, (path, _))| (cell, path.to_string()))
            .collect();

        assert_eq!(
            cells,
            vec![
                ((0, 0), "A".to_string()),
                ((0, 1), "B".to_string()),
                ((1, 0), "C".to_string()),
                ((1, 1), "D".to_string()),
                ((2, 0), "E".to_string()),
            ]
        );
    }

    #[test]
    fn test_regroup_renumbers_duplicates() {
        let layout = Layout::from_values(vec![curve("A", ""), curve("B", "")]);
        let regrouped = layout.regroup("Z");

        assert_eq!(paths(&regrouped), vec!["Z.I", "Z.II"]);
        assert!(regrouped.values().all(|item| item.group() == "Z"));
        assert_eq!(paths(&layout), vec!["A", "B"]);
    }

    #[test]
    fn test_select_keeps_paths_and_config() {
        let mut layout = Layout::from_values(vec![curve("A", ""), curve("B", "")]);
        layout.cols(3).display(DisplayPolicy::Auto);

        let selection = Selection::new().with(
            "x",
            Selector::Range {
                start: Some(Value::from(1)),
                end: None,
            },
        );
        let selected = layout.select(&selection);

        assert_eq!(paths(&selected), paths(&layout));
        assert_eq!(selected.config(), layout.config());
        let xs = selected
            .get(0usize)
            .unwrap()
            .leaf()
            .unwrap()
            .dimension_values(&"x".into())
            .unwrap();
        assert_eq!(xs, vec![Value::from(1.0), Value::from(2.0)]);
    }
}
