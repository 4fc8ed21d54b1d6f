//! Error taxonomy for puzzle configuration and lifecycle misuse.
//!
//! Logical unsolvability is deliberately *not* represented here: a puzzle
//! whose constraints cannot pin every writable cell ends in the
//! `Unsolvable` state, which is a normal terminal outcome of solving.

use crate::grid::Position;
use crate::kinds::SizeRule;
use crate::puzzle::{DefinitionKind, PuzzleState};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Configuration and state-contract errors.
///
/// All variants are raised eagerly, close to the violated precondition, and
/// never leave a puzzle partially initialized.
#[derive(Debug, Error)]
pub enum Error {
    #[error("the puzzle grid must be rectangular")]
    GridNotRectangular,

    #[error("this puzzle type must have the same number of rows and columns")]
    GridNotSquare,

    #[error("invalid grid size {size}: {}", .rule.requirement())]
    InvalidGridSize { size: usize, rule: SizeRule },

    #[error("a {kind} puzzle must be initialized from {expected}")]
    DefinitionMismatch {
        kind: &'static str,
        expected: DefinitionKind,
    },

    #[error("the value and writability grids must be the same size")]
    WritabilityShapeMismatch,

    #[error(
        "the given value {value} at row {}, column {} is outside the range {min}..={max}",
        .pos.row, .pos.col
    )]
    GivenOutOfRange {
        pos: Position,
        value: u8,
        min: u8,
        max: u8,
    },

    #[error("an entry must contain at least one cell")]
    EmptyEntry,

    #[error("linear entries must be defined by their first and last cell, or by their only cell")]
    LinearEntryEndpoints,

    #[error("the first and last cell of a linear entry must be in the same row or in the same column")]
    LinearEntryNotAligned,

    #[error("an entry of length {len} cannot have a value of {value}")]
    EntryValueOutOfRange { len: usize, value: i64 },

    #[error(
        "this puzzle type does not allow the cell at row {}, column {} to belong to multiple entries",
        .pos.row, .pos.col
    )]
    CellInMultipleEntries { pos: Position },

    #[error(
        "this puzzle type requires every cell to be part of an entry, but row {}, column {} is uncovered",
        .pos.row, .pos.col
    )]
    CellNotCovered { pos: Position },

    #[error("this puzzle kind does not define its entries at load time")]
    DynamicEntriesUnsupported,

    #[error("cannot {operation} a puzzle in the {state} state")]
    InvalidState {
        operation: &'static str,
        state: PuzzleState,
    },
}
