//! Grid geometry shared by [`NdLayout`](crate::NdLayout) and
//! [`Layout`](crate::Layout).
//!
//! Containers lay their entries out row-major, wrapping after a configurable
//! number of columns. The shape of a grid of `n` entries with wrap width `w`
//! is `(ceil(n / w), min(n, w))`, except that an empty container reports a
//! single empty row `(1, 0)`.
//!
//! [`GridLayout`] groups the configuration setters that mutate a container in
//! place. They return the same container rather than a copy, so every
//! reference to it observes the change. Composition never goes through this
//! trait; see [`Compose`](crate::Compose).

use log::warn;

/// Returns the effective wrap width, treating zero as a single column.
pub(crate) fn effective_cols(max_cols: usize) -> usize {
    if max_cols == 0 {
        warn!(max_cols; "Zero grid width requested, using a single column");
        return 1;
    }
    max_cols
}

/// Computes the `(rows, cols)` shape of a grid of `count` entries.
///
/// # Example
///
/// ```
/// # use montage::grid::grid_shape;
/// assert_eq!(grid_shape(0, 4), (1, 0));
/// assert_eq!(grid_shape(3, 4), (1, 3));
/// assert_eq!(grid_shape(8, 4), (2, 4));
/// assert_eq!(grid_shape(9, 4), (3, 4));
/// ```
pub fn grid_shape(count: usize, max_cols: usize) -> (usize, usize) {
    let max_cols = effective_cols(max_cols);
    if count <= max_cols {
        return (1, count);
    }
    (count.div_ceil(max_cols), max_cols)
}

/// Maps a flat insertion index onto its `(row, col)` grid cell.
pub fn grid_cell(index: usize, cols: usize) -> (usize, usize) {
    let cols = effective_cols(cols);
    (index / cols, index % cols)
}

/// Mutating grid configuration for containers laid out on a grid.
pub trait GridLayout {
    /// Returns the number of entries placed on the grid.
    fn cell_count(&self) -> usize;

    /// Returns the configured wrap width.
    fn max_cols(&self) -> usize;

    /// Sets the wrap width in place and returns the same container.
    fn cols(&mut self, max_cols: usize) -> &mut Self;

    /// Returns the `(rows, cols)` grid shape.
    fn shape(&self) -> (usize, usize) {
        grid_shape(self.cell_count(), self.max_cols())
    }
}
