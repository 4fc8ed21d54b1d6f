//! Takuzu (binary balance): each row and column holds as many 0s as 1s,
//! never three equal values in a row, and no two rows or columns repeat.

use super::{isqrt, PuzzleKind, SizeRule};
use crate::entry::{clue_partial_any, rect_cells, ClueFull, CluePartial, Entry};
use crate::grid::{Grid, GridSize};
use crate::puzzle::DefinitionKind;
use std::ops::RangeInclusive;

/// A line is balanced when its 1s make up exactly half its cells.
fn clue_full_balanced() -> ClueFull {
    Box::new(|seq| {
        let ones: usize = seq.iter().copied().flatten().map(usize::from).sum();
        ones == seq.len() / 2
    })
}

/// At most two equal values in a row: an extension is allowed unless the
/// last two elements of the prefix already equal it.
fn clue_partial_max_cluster() -> CluePartial {
    Box::new(|seq, v| seq.len() < 2 || seq[seq.len() - 2..].iter().any(|&e| e != Some(v)))
}

/// Whole-grid clue over a column-major sequence of a square grid: every two
/// columns must differ somewhere, and every two rows must differ somewhere.
fn clue_full_unique_lines() -> ClueFull {
    Box::new(|seq| {
        let n = isqrt(seq.len());
        for a in 0..n.saturating_sub(1) {
            for b in a + 1..n {
                let mut row_diff = false;
                let mut col_diff = false;
                for i in 0..n {
                    // seq[c * n + r] is the cell at row r, column c.
                    col_diff = col_diff || seq[a * n + i] != seq[b * n + i];
                    row_diff = row_diff || seq[a + n * i] != seq[b + n * i];
                    if row_diff && col_diff {
                        break;
                    }
                }
                if !row_diff || !col_diff {
                    return false;
                }
            }
        }
        true
    })
}

/// Balanced binary puzzle on an even-sized square grid of 0s and 1s.
#[derive(Debug, Default)]
pub struct Takuzu;

impl PuzzleKind for Takuzu {
    fn name(&self) -> &'static str {
        "Takuzu"
    }

    fn code(&self) -> &'static str {
        "ta"
    }

    fn definition_kind(&self) -> DefinitionKind {
        DefinitionKind::Values
    }

    fn must_be_square(&self) -> bool {
        true
    }

    fn size_rule(&self) -> SizeRule {
        SizeRule::Even
    }

    fn default_size(&self) -> usize {
        10
    }

    fn value_range(&self, _size: GridSize) -> RangeInclusive<u8> {
        0..=1
    }

    fn fixed_entries(&self, grid: &Grid) -> Vec<Entry> {
        let size = grid.size();
        let mut entries = Vec::with_capacity(size.width + size.height + 1);
        // Line order matters for the cluster clue, so lines are fixed-order.
        for i in 0..size.width {
            entries.push(Entry::ordered(
                rect_cells(0, i, size.height, 1),
                clue_full_balanced(),
                clue_partial_max_cluster(),
            ));
            entries.push(Entry::ordered(
                rect_cells(i, 0, 1, size.width),
                clue_full_balanced(),
                clue_partial_max_cluster(),
            ));
        }
        // One whole-grid entry enforcing that no two rows or columns repeat.
        entries.push(Entry::ordered(
            rect_cells(0, 0, size.height, size.width),
            clue_full_unique_lines(),
            clue_partial_any(),
        ));
        entries
    }
}
