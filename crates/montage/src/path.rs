//! Layout paths and collision-free path allocation.
//!
//! Every leaf of a [`Layout`](crate::Layout) is addressed by a [`Path`], a
//! short tuple of string segments derived from the leaf's `(group, label)`
//! pair. When two leaves would share a path, [`new_path`] disambiguates them
//! with Roman numeral segments, and [`relabel_item_paths`] applies it across
//! a whole sequence of leaves.
//!
//! # Disambiguation
//!
//! A candidate that is already allocated is resolved in one of two ways:
//!
//! - **Split**: for a one-segment path of an unlabelled leaf, or a two-segment
//!   path of a labelled leaf, the earlier leaf holding the path is rewritten to
//!   `path.I` and the new leaf is offered `path.II`.
//! - **Increment**: otherwise the last segment is replaced by successive Roman
//!   numerals (`II`, `III`, `IV`, ...) until the path is free.
//!
//! ```
//! # use montage::path::{Path, new_path};
//! let mut allocated = vec![Path::new(["Curve"])];
//!
//! let path = new_path(Path::new(["Curve"]), false, &mut allocated);
//!
//! assert_eq!(allocated, vec![Path::new(["Curve", "I"])]);
//! assert_eq!(path, Path::new(["Curve", "II"]));
//! ```

use std::{convert::Infallible, fmt, str::FromStr};

use log::trace;

use montage_core::roman::int_to_roman;

const SEPARATOR: char = '.';

/// Default label segment used when wrapping a single unlabelled value.
pub(crate) const DEFAULT_LABEL: &str = "I";

/// A tuple of string segments addressing a leaf within a layout tree.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Path(Vec<String>);

impl Path {
    /// Creates a path from its segments.
    pub fn new<S: Into<String>>(segments: impl IntoIterator<Item = S>) -> Self {
        Self(segments.into_iter().map(Into::into).collect())
    }

    /// Path of a leaf entering a composition as an operand.
    ///
    /// `(group,)` when the label is empty, otherwise `(group, label)`.
    pub fn for_leaf(group: &str, label: &str) -> Self {
        if label.is_empty() {
            Self::new([group])
        } else {
            Self::new([group, label])
        }
    }

    /// Path of a single value wrapped on its own.
    ///
    /// Always two segments; an empty label becomes `"I"`.
    pub fn for_value(group: &str, label: &str) -> Self {
        let label = if label.is_empty() { DEFAULT_LABEL } else { label };
        Self::new([group, label])
    }

    /// Returns the path segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Returns the number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` if the path has no segments.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns `true` if `prefix` matches the leading segments of this path.
    pub fn starts_with(&self, prefix: &Path) -> bool {
        self.0.starts_with(&prefix.0)
    }

    /// Returns this path with `prefix` removed, if it starts with it.
    pub fn strip_prefix(&self, prefix: &Path) -> Option<Path> {
        self.0
            .strip_prefix(prefix.0.as_slice())
            .map(|rest| Path(rest.to_vec()))
    }

    /// Returns a new path with `segment` appended.
    pub fn child(&self, segment: impl Into<String>) -> Path {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Path(segments)
    }

    /// Returns a new path with the last segment replaced by `segment`.
    fn with_last(&self, segment: impl Into<String>) -> Path {
        let mut segments = self.0.clone();
        segments.pop();
        segments.push(segment.into());
        Path(segments)
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(&SEPARATOR.to_string()))
    }
}

impl FromStr for Path {
    type Err = Infallible;

    /// Parses a `.`-separated path such as `"Curve.I"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl From<&str> for Path {
    fn from(s: &str) -> Self {
        Self::new(s.split(SEPARATOR).filter(|segment| !segment.is_empty()))
    }
}

impl<const N: usize> From<[&str; N]> for Path {
    fn from(segments: [&str; N]) -> Self {
        Self::new(segments)
    }
}

/// Replaces the last segment of `path` with successive numerals starting at
/// `count` until it is absent from `allocated`.
///
/// Returns the free path and the next unused counter.
fn increment_until_free(mut path: Path, allocated: &[Path], mut count: usize) -> (Path, usize) {
    while allocated.contains(&path) {
        path = path.with_last(int_to_roman(count));
        count += 1;
    }
    (path, count)
}

/// Resolves `path` against the already `allocated` paths.
///
/// Returns `path` unchanged when it is free. Otherwise applies the split or
/// increment strategy described in the [module docs](self). A split rewrites
/// the earliest matching entry of `allocated` in place; the returned path is
/// not pushed, that is left to the caller.
///
/// # Arguments
///
/// * `path` - Candidate path for the leaf being placed.
/// * `labelled` - Whether the leaf being placed has a non-empty label.
/// * `allocated` - Paths of the leaves placed so far, in placement order.
pub fn new_path(path: Path, labelled: bool, allocated: &mut [Path]) -> Path {
    if !allocated.contains(&path) {
        return path;
    }

    let splits = match path.len() {
        1 => !labelled,
        2 => labelled,
        _ => false,
    };

    let (candidate, count) = if splits {
        if let Some(prior) = allocated.iter().position(|p| *p == path) {
            let (rewritten, _) = increment_until_free(path.child(DEFAULT_LABEL), allocated, 2);
            trace!(from:% = path, to:% = rewritten; "Rewrote earlier path");
            allocated[prior] = rewritten;
        }
        (path.child(int_to_roman(2)), 3)
    } else {
        (path.clone(), 2)
    };

    let (resolved, _) = increment_until_free(candidate, allocated, count);
    trace!(requested:% = path, resolved:% = resolved; "Resolved path conflict");
    resolved
}

/// Assigns collision-free paths to an ordered sequence of leaves.
///
/// Leaves are placed in order; each one is resolved with [`new_path`] against
/// the leaves before it, which may rename an earlier leaf. The output keeps
/// the input order and contains no duplicate paths.
///
/// # Arguments
///
/// * `items` - `(path, item)` pairs in placement order.
/// * `is_labelled` - Reports whether an item has a non-empty label.
pub fn relabel_item_paths<T>(
    items: impl IntoIterator<Item = (Path, T)>,
    is_labelled: impl Fn(&T) -> bool,
) -> Vec<(Path, T)> {
    let mut paths: Vec<Path> = Vec::new();
    let mut values = Vec::new();

    for (path, item) in items {
        let resolved = new_path(path, is_labelled(&item), &mut paths);
        paths.push(resolved);
        values.push(item);
    }

    paths.into_iter().zip(values).collect()
}
