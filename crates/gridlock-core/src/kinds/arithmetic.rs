//! Arithmetic kinds: entries carry a target sum or product.
//!
//! Kakuro, Killer Sudoku and Inshi no heya all receive their entry extents
//! and target values with the puzzle instance, so each implements
//! `DynamicEntryKind` alongside the base policy.

use super::{unique_line_entries, DynamicEntryKind, PuzzleKind, SizeRule};
use crate::entry::{ClueFull, CluePartial, Entry};
use crate::grid::{Grid, GridSize};
use crate::kinds::latin::Sudoku;
use crate::puzzle::DefinitionKind;
use std::ops::RangeInclusive;

fn sum(seq: &[Option<u8>]) -> i64 {
    seq.iter().copied().flatten().map(i64::from).sum()
}

fn product(seq: &[Option<u8>]) -> i64 {
    seq.iter()
        .copied()
        .flatten()
        .fold(1i64, |acc, v| acc.saturating_mul(i64::from(v)))
}

/// No concrete value occurs twice. Sentinels may repeat.
fn distinct(seq: &[Option<u8>]) -> bool {
    seq.iter()
        .enumerate()
        .all(|(i, &c)| c.is_none() || !seq[..i].contains(&c))
}

/// Sum clue pair: distinct values summing exactly to the target. The
/// partial clue prunes repeats and any prefix already exceeding the target,
/// which is prefix-consistent because values are positive; the full clue
/// re-checks distinctness so it never accepts what the partial clue prunes.
fn sum_clues(target: i64) -> (ClueFull, CluePartial) {
    (
        Box::new(move |seq| distinct(seq) && sum(seq) == target),
        Box::new(move |seq, v| !seq.contains(&Some(v)) && sum(seq) + i64::from(v) <= target),
    )
}

/// Product clue pair, same shape as the sum clues. Values are at least 1,
/// so a prefix whose product exceeds the target can never recover.
fn product_clues(target: i64) -> (ClueFull, CluePartial) {
    (
        Box::new(move |seq| distinct(seq) && product(seq) == target),
        Box::new(move |seq, v| {
            !seq.contains(&Some(v)) && product(seq).saturating_mul(i64::from(v)) <= target
        }),
    )
}

/// Smallest sum of `len` distinct values starting at 1.
fn min_sum(len: usize) -> i64 {
    (1..=len as i64).sum()
}

/// Largest sum of `len` distinct values up to `max_value`.
fn max_sum(len: usize, max_value: u8) -> i64 {
    let hi = i64::from(max_value);
    (hi - len as i64 + 1..=hi).sum()
}

fn min_product(len: usize) -> i64 {
    (1..=len as i64).fold(1, i64::saturating_mul)
}

fn max_product(len: usize, max_value: u8) -> i64 {
    let hi = i64::from(max_value);
    (hi - len as i64 + 1..=hi).fold(1, i64::saturating_mul)
}

/// Kakuro: a sparse grid of linear sum entries over values 1..=9; cells
/// outside every entry are structural blanks.
#[derive(Debug, Default)]
pub struct Kakuro;

impl PuzzleKind for Kakuro {
    fn name(&self) -> &'static str {
        "Kakuro"
    }

    fn code(&self) -> &'static str {
        "ka"
    }

    fn definition_kind(&self) -> DefinitionKind {
        DefinitionKind::Entries
    }

    fn must_be_square(&self) -> bool {
        false
    }

    fn size_rule(&self) -> SizeRule {
        SizeRule::Any
    }

    fn default_size(&self) -> usize {
        16
    }

    fn value_range(&self, _size: GridSize) -> RangeInclusive<u8> {
        1..=9
    }

    fn fixed_entries(&self, _grid: &Grid) -> Vec<Entry> {
        Vec::new()
    }

    fn dynamic(&self) -> Option<&dyn DynamicEntryKind> {
        Some(self)
    }
}

impl DynamicEntryKind for Kakuro {
    fn linear_entries(&self) -> bool {
        true
    }

    fn one_entry_per_cell(&self) -> bool {
        false
    }

    fn reorderable(&self) -> bool {
        true
    }

    fn min_entry_value(&self, len: usize, _max_value: u8) -> i64 {
        min_sum(len)
    }

    fn max_entry_value(&self, len: usize, _max_value: u8) -> i64 {
        max_sum(len, 9)
    }

    fn clue_full(&self, target: i64) -> ClueFull {
        sum_clues(target).0
    }

    fn clue_partial(&self, target: i64) -> CluePartial {
        sum_clues(target).1
    }
}

/// Killer Sudoku: regular Sudoku geometry plus cage entries that partition
/// the grid, each with a target sum over distinct values.
#[derive(Debug, Default)]
pub struct KillerSudoku;

impl PuzzleKind for KillerSudoku {
    fn name(&self) -> &'static str {
        "Killer Sudoku"
    }

    fn code(&self) -> &'static str {
        "ks"
    }

    fn definition_kind(&self) -> DefinitionKind {
        DefinitionKind::Entries
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
        Sudoku.fixed_entries(grid)
    }

    fn dynamic(&self) -> Option<&dyn DynamicEntryKind> {
        Some(self)
    }
}

impl DynamicEntryKind for KillerSudoku {
    fn linear_entries(&self) -> bool {
        false
    }

    fn one_entry_per_cell(&self) -> bool {
        true
    }

    fn reorderable(&self) -> bool {
        true
    }

    fn min_entry_value(&self, len: usize, _max_value: u8) -> i64 {
        min_sum(len)
    }

    fn max_entry_value(&self, len: usize, max_value: u8) -> i64 {
        max_sum(len, max_value)
    }

    fn clue_full(&self, target: i64) -> ClueFull {
        sum_clues(target).0
    }

    fn clue_partial(&self, target: i64) -> CluePartial {
        sum_clues(target).1
    }
}

/// Inshi no heya: a Latin square partitioned into linear rooms, each with a
/// target product over distinct values.
#[derive(Debug, Default)]
pub struct InshiNoHeya;

impl PuzzleKind for InshiNoHeya {
    fn name(&self) -> &'static str {
        "Inshi no heya"
    }

    fn code(&self) -> &'static str {
        "in"
    }

    fn definition_kind(&self) -> DefinitionKind {
        DefinitionKind::Entries
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
        unique_line_entries(grid.size())
    }

    fn dynamic(&self) -> Option<&dyn DynamicEntryKind> {
        Some(self)
    }
}

impl DynamicEntryKind for InshiNoHeya {
    fn linear_entries(&self) -> bool {
        true
    }

    fn one_entry_per_cell(&self) -> bool {
        true
    }

    fn reorderable(&self) -> bool {
        true
    }

    fn min_entry_value(&self, len: usize, _max_value: u8) -> i64 {
        min_product(len)
    }

    fn max_entry_value(&self, len: usize, max_value: u8) -> i64 {
        max_product(len, max_value)
    }

    fn clue_full(&self, target: i64) -> ClueFull {
        product_clues(target).0
    }

    fn clue_partial(&self, target: i64) -> CluePartial {
        product_clues(target).1
    }
}
