//! Constraint-propagation engine for numeric grid puzzles.
//!
//! A puzzle is a grid of cells, each holding a domain of candidate values,
//! plus a set of entries (rows, columns, boxes, cages, compartments) whose
//! clues constrain the value sequence written into their cells. Solving
//! enumerates the sequences each entry still allows and intersects, cell by
//! cell, the values those sequences support, repeating until nothing
//! changes. There is no guessing: a puzzle that propagation cannot pin down
//! completely is reported `Unsolvable`, which deliberately includes puzzles
//! with more than one solution.
//!
//! Nine puzzle kinds ship in [`kinds`]: Latin squares, Sudoku and its X,
//! Hyper and Killer variants, Str8ts, Kakuro, Takuzu and Inshi no heya.
//! New kinds only implement [`kinds::PuzzleKind`]; the engine itself is
//! kind-agnostic.
//!
//! ```
//! use gridlock_core::{solve, Definition, Puzzle, PuzzleState};
//!
//! # fn main() -> gridlock_core::Result<()> {
//! let mut puzzle = Puzzle::from_code("ls").unwrap();
//! puzzle.initialize(Definition::Values(vec![
//!     vec![Some(1), Some(2), None],
//!     vec![None, Some(3), None],
//!     vec![None, None, None],
//! ]))?;
//! assert_eq!(solve(&mut puzzle)?, PuzzleState::Solved);
//! # Ok(())
//! # }
//! ```

pub mod entry;
pub mod error;
pub mod grid;
pub mod kinds;
pub mod puzzle;
pub mod solver;

pub use entry::{ClueFull, CluePartial, Entry};
pub use error::{Error, Result};
pub use grid::{Candidate, Domain, Grid, GridSize, Position};
pub use kinds::{kind_for_code, DynamicEntryKind, PuzzleKind, SizeRule, KINDS};
pub use puzzle::{Definition, DefinitionKind, Puzzle, PuzzleState};
pub use solver::{solve, Solver, SolverConfig};
