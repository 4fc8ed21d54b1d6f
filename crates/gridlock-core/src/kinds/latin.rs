//! Latin-square-family kinds: every row and column holds distinct values.
//!
//! Sudoku adds boxes, Sudoku X the two diagonals, Hyper Sudoku four extra
//! boxes, and Str8ts compartment "straight" runs over writable segments.

use super::{box_entries, isqrt, unique_line_entries, PuzzleKind, SizeRule};
use crate::entry::{clue_full_any, clue_partial_distinct, rect_cells, ClueFull, Entry};
use crate::grid::{Grid, GridSize, Position};
use crate::puzzle::DefinitionKind;
use std::ops::RangeInclusive;

/// Plain Latin square: rows and columns of distinct values `1..=n`.
#[derive(Debug, Default)]
pub struct LatinSquare;

impl PuzzleKind for LatinSquare {
    fn name(&self) -> &'static str {
        "Latin square"
    }

    fn code(&self) -> &'static str {
        "ls"
    }

    fn definition_kind(&self) -> DefinitionKind {
        DefinitionKind::Values
    }

    fn must_be_square(&self) -> bool {
        true
    }

    fn size_rule(&self) -> SizeRule {
        SizeRule::Any
    }

    fn default_size(&self) -> usize {
        5
    }

    fn value_range(&self, size: GridSize) -> RangeInclusive<u8> {
        1..=size.width as u8
    }

    fn fixed_entries(&self, grid: &Grid) -> Vec<Entry> {
        unique_line_entries(grid.size())
    }
}

/// Classic Sudoku: a Latin square with distinct boxes.
#[derive(Debug, Default)]
pub struct Sudoku;

impl PuzzleKind for Sudoku {
    fn name(&self) -> &'static str {
        "Sudoku"
    }

    fn code(&self) -> &'static str {
        "su"
    }

    fn definition_kind(&self) -> DefinitionKind {
        DefinitionKind::Values
    }

    fn must_be_square(&self) -> bool {
        true
    }

    fn size_rule(&self) -> SizeRule {
        SizeRule::Square
    }

    fn default_size(&self) -> usize {
        9
    }

    fn value_range(&self, size: GridSize) -> RangeInclusive<u8> {
        1..=size.width as u8
    }

    fn fixed_entries(&self, grid: &Grid) -> Vec<Entry> {
        let mut entries = unique_line_entries(grid.size());
        entries.extend(box_entries(grid.size()));
        entries
    }
}

/// Sudoku X: both main diagonals also hold distinct values.
#[derive(Debug, Default)]
pub struct SudokuX;

impl PuzzleKind for SudokuX {
    fn name(&self) -> &'static str {
        "Sudoku X"
    }

    fn code(&self) -> &'static str {
        "sx"
    }

    fn definition_kind(&self) -> DefinitionKind {
        DefinitionKind::Values
    }

    fn must_be_square(&self) -> bool {
        true
    }

    fn size_rule(&self) -> SizeRule {
        SizeRule::Square
    }

    fn default_size(&self) -> usize {
        9
    }

    fn value_range(&self, size: GridSize) -> RangeInclusive<u8> {
        1..=size.width as u8
    }

    fn fixed_entries(&self, grid: &Grid) -> Vec<Entry> {
        let n = grid.size().width;
        let mut entries = Sudoku.fixed_entries(grid);
        entries.push(Entry::new(
            (0..n).map(|i| Position::new(i, i)),
            clue_full_any(),
            clue_partial_distinct(),
        ));
        entries.push(Entry::new(
            (0..n).map(|i| Position::new(n - 1 - i, i)),
            clue_full_any(),
            clue_partial_distinct(),
        ));
        entries
    }
}

/// Hyper Sudoku: four (for 9×9) extra distinct boxes offset into the grid.
#[derive(Debug, Default)]
pub struct HyperSudoku;

impl PuzzleKind for HyperSudoku {
    fn name(&self) -> &'static str {
        "Hyper Sudoku"
    }

    fn code(&self) -> &'static str {
        "hs"
    }

    fn definition_kind(&self) -> DefinitionKind {
        DefinitionKind::Values
    }

    fn must_be_square(&self) -> bool {
        true
    }

    fn size_rule(&self) -> SizeRule {
        SizeRule::Square
    }

    fn default_size(&self) -> usize {
        9
    }

    fn value_range(&self, size: GridSize) -> RangeInclusive<u8> {
        1..=size.width as u8
    }

    fn fixed_entries(&self, grid: &Grid) -> Vec<Entry> {
        let b = isqrt(grid.size().width);
        let mut entries = Sudoku.fixed_entries(grid);
        // (b-1)² hyper boxes, spaced one cell in from the regular box grid.
        for i in 0..(b - 1) * (b - 1) {
            let row = 1 + (i / (b - 1)) * (b + 1);
            let col = 1 + (i % (b - 1)) * (b + 1);
            entries.push(Entry::new(
                rect_cells(row, col, b, b),
                clue_full_any(),
                clue_partial_distinct(),
            ));
        }
        entries
    }
}

/// Str8ts: a Latin square over writable cells, where every maximal run of
/// writable cells in a row or column must form a consecutive "straight".
#[derive(Debug, Default)]
pub struct Str8ts;

/// A sequence is a straight when, ignoring order, its values are
/// consecutive: every value is either the maximum or has its successor
/// present. Sentinels (never produced for compartments, which span only
/// writable cells) are accepted.
fn clue_full_straight() -> ClueFull {
    Box::new(|seq| {
        let max = seq.iter().copied().flatten().max();
        seq.iter().all(|&c| match c {
            Some(v) => Some(v) == max || seq.contains(&Some(v + 1)),
            None => true,
        })
    })
}

impl Str8ts {
    /// Compartment entries: maximal horizontal and vertical runs of two or
    /// more writable cells.
    fn compartment_entries(grid: &Grid) -> Vec<Entry> {
        let size = grid.size();
        let mut entries = Vec::new();
        for row in 0..size.height {
            let mut col = 0;
            while col < size.width {
                let start = col;
                while col < size.width && grid.is_writable(Position::new(row, col)) {
                    col += 1;
                }
                if col - start > 1 {
                    entries.push(Entry::ordered(
                        rect_cells(row, start, 1, col - start),
                        clue_full_straight(),
                        clue_partial_distinct(),
                    ));
                }
                if col == start {
                    col += 1;
                }
            }
        }
        for col in 0..size.width {
            let mut row = 0;
            while row < size.height {
                let start = row;
                while row < size.height && grid.is_writable(Position::new(row, col)) {
                    row += 1;
                }
                if row - start > 1 {
                    entries.push(Entry::ordered(
                        rect_cells(start, col, row - start, 1),
                        clue_full_straight(),
                        clue_partial_distinct(),
                    ));
                }
                if row == start {
                    row += 1;
                }
            }
        }
        entries
    }
}

impl PuzzleKind for Str8ts {
    fn name(&self) -> &'static str {
        "Str8ts"
    }

    fn code(&self) -> &'static str {
        "s8"
    }

    fn definition_kind(&self) -> DefinitionKind {
        DefinitionKind::ValuesAndWritability
    }

    fn must_be_square(&self) -> bool {
        true
    }

    fn size_rule(&self) -> SizeRule {
        SizeRule::Any
    }

    fn default_size(&self) -> usize {
        9
    }

    fn value_range(&self, size: GridSize) -> RangeInclusive<u8> {
        1..=size.width as u8
    }

    fn fixed_entries(&self, grid: &Grid) -> Vec<Entry> {
        let mut entries = unique_line_entries(grid.size());
        entries.extend(Self::compartment_entries(grid));
        entries
    }
}
