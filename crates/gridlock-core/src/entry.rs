//! Entries: named groups of cells bound to a constraint.
//!
//! An entry pairs a cell extent with two closures supplied by the puzzle
//! kind: `ClueFull` decides whether a complete value sequence solves the
//! entry, and `CluePartial` decides whether appending a value keeps a prefix
//! viable. `CluePartial` must be prefix-consistent: once it rejects an
//! extension, no completion of that prefix may satisfy `ClueFull`. The
//! solver's pruning is sound only under that contract.

use crate::grid::{Candidate, Position};

/// Complete-sequence validity predicate. The sequence is ordered like the
/// entry's cells, with the sentinel substituted for non-writable cells.
pub type ClueFull = Box<dyn Fn(&[Candidate]) -> bool + Send + Sync>;

/// Prefix-extension validity predicate. Must be prefix-consistent with the
/// entry's `ClueFull`.
pub type CluePartial = Box<dyn Fn(&[Candidate], u8) -> bool + Send + Sync>;

/// A set of distinct cells bound to a clue.
pub struct Entry {
    cells: Vec<Position>,
    clue_full: ClueFull,
    clue_partial: CluePartial,
    reorderable: bool,
    value: Option<i64>,
}

impl Entry {
    /// Create an entry whose cell order may be permuted for cheaper pruning.
    ///
    /// Duplicate cells are dropped, keeping the first occurrence. An entry
    /// must contain at least one cell; callers validate user-supplied
    /// extents before construction.
    pub fn new(
        cells: impl IntoIterator<Item = Position>,
        clue_full: ClueFull,
        clue_partial: CluePartial,
    ) -> Self {
        let mut seen = Vec::new();
        for cell in cells {
            if !seen.contains(&cell) {
                seen.push(cell);
            }
        }
        assert!(!seen.is_empty(), "an entry must contain at least one cell");
        Self {
            cells: seen,
            clue_full,
            clue_partial,
            reorderable: true,
            value: None,
        }
    }

    /// Create an entry whose clue depends on the given cell order.
    pub fn ordered(
        cells: impl IntoIterator<Item = Position>,
        clue_full: ClueFull,
        clue_partial: CluePartial,
    ) -> Self {
        let mut entry = Self::new(cells, clue_full, clue_partial);
        entry.reorderable = false;
        entry
    }

    /// Attach the target value the clue closures were built from.
    pub fn with_value(mut self, value: i64) -> Self {
        self.value = Some(value);
        self
    }

    #[inline]
    pub fn cells(&self) -> &[Position] {
        &self.cells
    }

    #[inline]
    pub fn reorderable(&self) -> bool {
        self.reorderable
    }

    /// The associated target value, if any. Opaque to the engine.
    #[inline]
    pub fn value(&self) -> Option<i64> {
        self.value
    }

    /// Whether `seq` is a valid complete solution for this entry.
    pub fn is_valid_solution(&self, seq: &[Candidate]) -> bool {
        (self.clue_full)(seq)
    }

    /// Whether appending `value` to `prefix` keeps the prefix viable.
    pub fn allows_extension(&self, prefix: &[Candidate], value: u8) -> bool {
        (self.clue_partial)(prefix, value)
    }

    /// Stable-sort the cells by a key, used by the solver to generate
    /// sequences in increasing-domain order for reorderable entries.
    pub(crate) fn reorder_cells_by_key(&mut self, mut key: impl FnMut(Position) -> usize) {
        self.cells.sort_by_key(|&cell| key(cell));
    }
}

impl std::fmt::Debug for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entry")
            .field("cells", &self.cells)
            .field("reorderable", &self.reorderable)
            .field("value", &self.value)
            .finish()
    }
}

/// The full clue that accepts every complete sequence. Used by entries whose
/// constraint lives entirely in the partial clue, like all-distinct lines.
pub fn clue_full_any() -> ClueFull {
    Box::new(|_| true)
}

/// The partial clue that accepts every extension.
pub fn clue_partial_any() -> CluePartial {
    Box::new(|_, _| true)
}

/// The all-distinct partial clue: a value may be appended only if it does
/// not already occur in the prefix. Sentinels never collide with values.
pub fn clue_partial_distinct() -> CluePartial {
    Box::new(|seq, v| !seq.contains(&Some(v)))
}

/// Cells of a rectangle, column-major.
///
/// Column-major matches how line and whole-grid extents are declared, so
/// order-sensitive clues index their sequences consistently: a 1-wide
/// rectangle reads top to bottom, a 1-tall rectangle left to right.
pub fn rect_cells(row: usize, col: usize, height: usize, width: usize) -> Vec<Position> {
    let mut cells = Vec::with_capacity(width * height);
    for c in col..col + width {
        for r in row..row + height {
            cells.push(Position::new(r, c));
        }
    }
    cells
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_cells_column_major() {
        let cells = rect_cells(1, 2, 2, 2);
        assert_eq!(
            cells,
            vec![
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(1, 3),
                Position::new(2, 3),
            ]
        );
    }

    #[test]
    fn test_rect_cells_row() {
        let cells = rect_cells(3, 0, 1, 4);
        let cols: Vec<usize> = cells.iter().map(|p| p.col).collect();
        assert_eq!(cols, vec![0, 1, 2, 3]);
        assert!(cells.iter().all(|p| p.row == 3));
    }

    #[test]
    fn test_entry_deduplicates_cells() {
        let p = Position::new(0, 0);
        let q = Position::new(0, 1);
        let entry = Entry::new(vec![p, q, p], clue_full_any(), clue_partial_distinct());
        assert_eq!(entry.cells(), &[p, q]);
    }

    #[test]
    #[should_panic(expected = "at least one cell")]
    fn test_entry_rejects_empty() {
        let _ = Entry::new(Vec::new(), clue_full_any(), clue_partial_any());
    }

    #[test]
    fn test_distinct_partial_ignores_sentinel() {
        let entry = Entry::new(
            rect_cells(0, 0, 1, 3),
            clue_full_any(),
            clue_partial_distinct(),
        );
        assert!(entry.allows_extension(&[Some(1), None], 2));
        assert!(!entry.allows_extension(&[Some(1), None], 1));
        // The sentinel in the prefix never blocks a concrete value.
        assert!(entry.allows_extension(&[None], 5));
    }

    #[test]
    fn test_ordered_entry_is_not_reorderable() {
        let entry = Entry::ordered(rect_cells(0, 0, 1, 2), clue_full_any(), clue_partial_any());
        assert!(!entry.reorderable());
        let entry = Entry::new(rect_cells(0, 0, 1, 2), clue_full_any(), clue_partial_any());
        assert!(entry.reorderable());
    }

    #[test]
    fn test_with_value() {
        let entry = Entry::new(rect_cells(0, 0, 1, 2), clue_full_any(), clue_partial_any())
            .with_value(17);
        assert_eq!(entry.value(), Some(17));
    }
}
