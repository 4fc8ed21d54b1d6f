//! Puzzle-kind policies: the contract between the engine and concrete
//! puzzle variants, plus the built-in catalog and its registry.
//!
//! The engine never names a concrete kind; it sees only `PuzzleKind` (and,
//! for kinds whose entries arrive with the instance, `DynamicEntryKind`).

mod arithmetic;
mod binary;
mod latin;

pub use arithmetic::{InshiNoHeya, Kakuro, KillerSudoku};
pub use binary::Takuzu;
pub use latin::{HyperSudoku, LatinSquare, Str8ts, Sudoku, SudokuX};

use crate::entry::{clue_full_any, clue_partial_distinct, rect_cells, ClueFull, CluePartial, Entry};
use crate::grid::{Grid, GridSize};
use crate::puzzle::DefinitionKind;
use std::fmt;
use std::ops::RangeInclusive;

/// The largest supported grid dimension.
pub const MAX_GRID_SIZE: usize = 100;

/// Which grid dimensions a puzzle kind accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizeRule {
    /// Any size in `1..=100`.
    Any,
    /// Perfect squares up to 100 (box geometry needs an integer box size).
    Square,
    /// Even sizes up to 100 (balance constraints need an even cell count).
    Even,
}

impl SizeRule {
    pub fn allows(self, size: usize) -> bool {
        if size == 0 || size > MAX_GRID_SIZE {
            return false;
        }
        match self {
            SizeRule::Any => true,
            SizeRule::Square => isqrt(size) * isqrt(size) == size,
            SizeRule::Even => size % 2 == 0,
        }
    }

    /// Human-readable statement of the rule, used in configuration errors.
    pub fn requirement(self) -> &'static str {
        match self {
            SizeRule::Any => "the puzzle size must be at least one and at most 100",
            SizeRule::Square => "the puzzle size must be a square number between one and 100",
            SizeRule::Even => "the puzzle size must be an even number between two and 100",
        }
    }
}

impl fmt::Display for SizeRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.requirement())
    }
}

/// Contract every puzzle kind implements.
///
/// A kind supplies the grid legality rules, the global value range, and the
/// structurally fixed entries (rows, columns, boxes, diagonals). Kinds whose
/// entries vary per instance additionally expose a `DynamicEntryKind`.
pub trait PuzzleKind: Send + Sync {
    /// Human-readable kind name.
    fn name(&self) -> &'static str;

    /// Short registry code, e.g. `"su"` for Sudoku.
    fn code(&self) -> &'static str;

    /// The argument shape `Puzzle::initialize` expects for this kind.
    fn definition_kind(&self) -> DefinitionKind;

    fn must_be_square(&self) -> bool;

    fn size_rule(&self) -> SizeRule;

    /// The grid dimension used when the caller does not pick one.
    fn default_size(&self) -> usize;

    /// The global per-cell value range for a grid of the given size.
    fn value_range(&self, size: GridSize) -> RangeInclusive<u8>;

    /// Entries fully determined by the kind once the grid is sized.
    fn fixed_entries(&self, grid: &Grid) -> Vec<Entry>;

    /// The variable-entry capability set, for kinds defined by entries.
    fn dynamic(&self) -> Option<&dyn DynamicEntryKind> {
        None
    }
}

/// Capability set for kinds whose entries (extent and target value) are part
/// of the puzzle instance rather than the kind.
pub trait DynamicEntryKind {
    /// Whether entries must be contiguous line segments, declared by their
    /// first and last cell.
    fn linear_entries(&self) -> bool;

    /// Whether every cell must belong to exactly one entry.
    fn one_entry_per_cell(&self) -> bool;

    /// Whether declared cell order within an entry is irrelevant.
    fn reorderable(&self) -> bool;

    /// The smallest target value an entry of `len` cells can have.
    fn min_entry_value(&self, len: usize, max_value: u8) -> i64;

    /// The largest target value an entry of `len` cells can have.
    fn max_entry_value(&self, len: usize, max_value: u8) -> i64;

    /// Build the complete-sequence predicate for a target value.
    fn clue_full(&self, target: i64) -> ClueFull;

    /// Build the prefix-extension predicate for a target value. Must be
    /// prefix-consistent with the corresponding `clue_full`.
    fn clue_partial(&self, target: i64) -> CluePartial;
}

/// The built-in catalog: (code, name, constructor), sorted by code.
///
/// An explicit read-only table rather than ambient global state; external
/// loaders look kinds up by code without naming concrete types.
pub const KINDS: &[(&str, &str, fn() -> Box<dyn PuzzleKind>)] = &[
    ("hs", "Hyper Sudoku", boxed::<HyperSudoku>),
    ("in", "Inshi no heya", boxed::<InshiNoHeya>),
    ("ka", "Kakuro", boxed::<Kakuro>),
    ("ks", "Killer Sudoku", boxed::<KillerSudoku>),
    ("ls", "Latin square", boxed::<LatinSquare>),
    ("s8", "Str8ts", boxed::<Str8ts>),
    ("su", "Sudoku", boxed::<Sudoku>),
    ("sx", "Sudoku X", boxed::<SudokuX>),
    ("ta", "Takuzu", boxed::<Takuzu>),
];

fn boxed<K: PuzzleKind + Default + 'static>() -> Box<dyn PuzzleKind> {
    Box::new(K::default())
}

/// Look up a puzzle kind by its registry code.
pub fn kind_for_code(code: &str) -> Option<Box<dyn PuzzleKind>> {
    KINDS
        .iter()
        .find(|(c, _, _)| *c == code)
        .map(|(_, _, ctor)| ctor())
}

/// Integer square root, exact for the perfect squares the size rules allow.
pub(crate) fn isqrt(n: usize) -> usize {
    (n as f64).sqrt().round() as usize
}

/// One all-distinct entry per column and per row.
///
/// The constraint lives entirely in the partial clue; any complete distinct
/// sequence is a valid line.
pub(crate) fn unique_line_entries(size: GridSize) -> Vec<Entry> {
    let mut entries = Vec::with_capacity(size.width + size.height);
    for i in 0..size.width.max(size.height) {
        if i < size.width {
            entries.push(Entry::new(
                rect_cells(0, i, size.height, 1),
                clue_full_any(),
                clue_partial_distinct(),
            ));
        }
        if i < size.height {
            entries.push(Entry::new(
                rect_cells(i, 0, 1, size.width),
                clue_full_any(),
                clue_partial_distinct(),
            ));
        }
    }
    entries
}

/// One all-distinct entry per box of a `b²×b²` grid.
pub(crate) fn box_entries(size: GridSize) -> Vec<Entry> {
    let b = isqrt(size.width);
    (0..size.width)
        .map(|i| {
            Entry::new(
                rect_cells((i / b) * b, (i % b) * b, b, b),
                clue_full_any(),
                clue_partial_distinct(),
            )
        })
        .collect()
}
