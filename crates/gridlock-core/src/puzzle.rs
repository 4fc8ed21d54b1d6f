//! The puzzle aggregate: grid, entries, kind policy and lifecycle state.
//!
//! Initialization validates everything eagerly and commits atomically; a
//! failed `initialize` leaves the puzzle untouched in the `Uninitialized`
//! state. Entries live here until the solver consumes them destructively.

use crate::entry::{rect_cells, Entry};
use crate::error::{Error, Result};
use crate::grid::{Domain, Grid, GridSize, Position};
use crate::kinds::{kind_for_code, DynamicEntryKind, PuzzleKind};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fmt::Write as _;

/// Lifecycle of a puzzle. `Initialized` is the only state solving may start
/// from; `Solved` and `Unsolvable` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PuzzleState {
    Uninitialized,
    Initialized,
    Solved,
    Unsolvable,
}

impl fmt::Display for PuzzleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PuzzleState::Uninitialized => "uninitialized",
            PuzzleState::Initialized => "initialized",
            PuzzleState::Solved => "solved",
            PuzzleState::Unsolvable => "unsolvable",
        };
        f.write_str(name)
    }
}

/// Which argument shape a puzzle kind expects at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefinitionKind {
    /// A rectangular grid of optional known values.
    Values,
    /// Known values plus a parallel writability mask.
    ValuesAndWritability,
    /// Entry extents with their target values.
    Entries,
}

impl fmt::Display for DefinitionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DefinitionKind::Values => "given values",
            DefinitionKind::ValuesAndWritability => "given values and writability",
            DefinitionKind::Entries => "entry extents and values",
        };
        f.write_str(name)
    }
}

/// Caller-supplied puzzle description, matched against the kind's
/// `DefinitionKind` during initialization.
#[derive(Debug, Clone)]
pub enum Definition {
    Values(Vec<Vec<Option<u8>>>),
    ValuesAndWritability {
        values: Vec<Vec<Option<u8>>>,
        writable: Vec<Vec<bool>>,
    },
    /// Entry extents with their target values. For kinds with linear
    /// entries an extent is the first and last cell (or a single cell);
    /// otherwise it lists every cell.
    Entries(Vec<(Vec<Position>, i64)>),
}

impl Definition {
    fn kind(&self) -> DefinitionKind {
        match self {
            Definition::Values(_) => DefinitionKind::Values,
            Definition::ValuesAndWritability { .. } => DefinitionKind::ValuesAndWritability,
            Definition::Entries(_) => DefinitionKind::Entries,
        }
    }
}

/// A grid puzzle being configured or solved.
pub struct Puzzle {
    kind: Box<dyn PuzzleKind>,
    grid: Option<Grid>,
    entries: Vec<Entry>,
    state: PuzzleState,
}

impl Puzzle {
    /// Create an uninitialized puzzle of the given kind.
    pub fn new(kind: Box<dyn PuzzleKind>) -> Self {
        Self {
            kind,
            grid: None,
            entries: Vec::new(),
            state: PuzzleState::Uninitialized,
        }
    }

    /// Create an uninitialized puzzle from a registry code.
    pub fn from_code(code: &str) -> Option<Self> {
        kind_for_code(code).map(Self::new)
    }

    #[inline]
    pub fn state(&self) -> PuzzleState {
        self.state
    }

    #[inline]
    pub fn kind(&self) -> &dyn PuzzleKind {
        self.kind.as_ref()
    }

    pub fn grid_size(&self) -> Option<GridSize> {
        self.grid.as_ref().map(Grid::size)
    }

    /// The cell's value, if the puzzle is initialized and the cell's domain
    /// is pinned to one concrete value.
    pub fn value(&self, pos: Position) -> Option<u8> {
        self.grid.as_ref().and_then(|g| g.value(pos))
    }

    /// The cell's remaining candidates, if the puzzle is initialized.
    pub fn candidates(&self, pos: Position) -> Option<Domain> {
        self.grid.as_ref().map(|g| g.candidates(pos))
    }

    pub fn is_writable(&self, pos: Position) -> bool {
        self.grid.as_ref().is_some_and(|g| g.is_writable(pos))
    }

    /// Number of live (not yet consumed) entries.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Hand the grid and the accumulated entries to the solver. The entries
    /// are consumed; solving is a one-shot transition out of `Initialized`.
    pub(crate) fn begin_solve(&mut self) -> Result<(&mut Grid, Vec<Entry>)> {
        if self.state != PuzzleState::Initialized {
            return Err(Error::InvalidState {
                operation: "solve",
                state: self.state,
            });
        }
        let grid = self.grid.as_mut().ok_or(Error::InvalidState {
            operation: "solve",
            state: PuzzleState::Uninitialized,
        })?;
        Ok((grid, std::mem::take(&mut self.entries)))
    }

    pub(crate) fn set_state(&mut self, state: PuzzleState) {
        self.state = state;
    }

    /// Define the puzzle's size, entries and any known cell values, moving
    /// it from `Uninitialized` to `Initialized`.
    ///
    /// All configuration errors are raised here, before any state is
    /// committed; on error the puzzle remains `Uninitialized`.
    pub fn initialize(&mut self, definition: Definition) -> Result<()> {
        if self.state != PuzzleState::Uninitialized {
            return Err(Error::InvalidState {
                operation: "initialize",
                state: self.state,
            });
        }
        if definition.kind() != self.kind.definition_kind() {
            return Err(Error::DefinitionMismatch {
                kind: self.kind.name(),
                expected: self.kind.definition_kind(),
            });
        }

        let (mut grid, mut entries) = match definition {
            Definition::Values(values) => (self.build_value_grid(values, None)?, Vec::new()),
            Definition::ValuesAndWritability { values, writable } => {
                (self.build_value_grid(values, Some(writable))?, Vec::new())
            }
            Definition::Entries(declared) => self.build_entry_grid(declared)?,
        };

        entries.extend(self.kind.fixed_entries(&grid));
        // Commit only now that every validation has passed.
        self.grid = Some(grid);
        self.entries = entries;
        self.state = PuzzleState::Initialized;
        Ok(())
    }

    fn check_size(&self, size: GridSize) -> Result<()> {
        let rule = self.kind.size_rule();
        for dim in [size.width, size.height] {
            if !rule.allows(dim) {
                return Err(Error::InvalidGridSize { size: dim, rule });
            }
        }
        if self.kind.must_be_square() && size.width != size.height {
            return Err(Error::GridNotSquare);
        }
        Ok(())
    }

    /// Build the grid for kinds defined by given values, optionally with a
    /// writability mask.
    fn build_value_grid(
        &self,
        values: Vec<Vec<Option<u8>>>,
        writable: Option<Vec<Vec<bool>>>,
    ) -> Result<Grid> {
        let height = values.len();
        let width = values.first().map_or(0, Vec::len);
        if values.iter().any(|row| row.len() != width) {
            return Err(Error::GridNotRectangular);
        }
        if let Some(mask) = &writable {
            if mask.len() != height || mask.iter().any(|row| row.len() != width) {
                return Err(Error::WritabilityShapeMismatch);
            }
        }
        let size = GridSize::new(width, height);
        self.check_size(size)?;

        let range = self.kind.value_range(size);
        let (min, max) = (*range.start(), *range.end());
        let full = Domain::range(min, max);
        let mut domains = Vec::with_capacity(width * height);
        for (r, row) in values.iter().enumerate() {
            for (c, &given) in row.iter().enumerate() {
                match given {
                    Some(v) if v < min || v > max => {
                        return Err(Error::GivenOutOfRange {
                            pos: Position::new(r, c),
                            value: v,
                            min,
                            max,
                        });
                    }
                    Some(v) => domains.push(Domain::singleton(v)),
                    None => domains.push(full),
                }
            }
        }
        let writable = match writable {
            Some(mask) => mask.into_iter().flatten().collect(),
            None => vec![true; width * height],
        };
        Ok(Grid::new(size, domains, writable))
    }

    /// Build the grid and entries for kinds defined by entry extents.
    fn build_entry_grid(&self, declared: Vec<(Vec<Position>, i64)>) -> Result<(Grid, Vec<Entry>)> {
        let dynamic = self.kind.dynamic().ok_or(Error::DynamicEntriesUnsupported)?;

        // The grid is sized by the furthest declared cell.
        let mut size = GridSize::new(0, 0);
        for (cells, _) in &declared {
            if cells.is_empty() {
                return Err(Error::EmptyEntry);
            }
            for cell in cells {
                size.width = size.width.max(cell.col + 1);
                size.height = size.height.max(cell.row + 1);
            }
        }
        self.check_size(size)?;

        let range = self.kind.value_range(size);
        let max_value = *range.end();
        let mut entries = Vec::with_capacity(declared.len());
        for (extent, target) in declared {
            let cells = if dynamic.linear_entries() {
                expand_linear_extent(extent)?
            } else {
                extent
            };
            if target < dynamic.min_entry_value(cells.len(), max_value)
                || target > dynamic.max_entry_value(cells.len(), max_value)
            {
                return Err(Error::EntryValueOutOfRange {
                    len: cells.len(),
                    value: target,
                });
            }
            let entry = if dynamic.reorderable() {
                Entry::new(cells, dynamic.clue_full(target), dynamic.clue_partial(target))
            } else {
                Entry::ordered(cells, dynamic.clue_full(target), dynamic.clue_partial(target))
            };
            entries.push(entry.with_value(target));
        }

        // Coverage bookkeeping: how many entries claim each cell.
        let mut coverage = vec![0usize; size.width * size.height];
        for entry in &entries {
            for cell in entry.cells() {
                coverage[cell.row * size.width + cell.col] += 1;
            }
        }
        let full = Domain::range(*range.start(), max_value);
        let mut domains = Vec::with_capacity(coverage.len());
        let mut writable = Vec::with_capacity(coverage.len());
        for (idx, &count) in coverage.iter().enumerate() {
            let pos = Position::new(idx / size.width, idx % size.width);
            if dynamic.one_entry_per_cell() {
                match count {
                    0 => return Err(Error::CellNotCovered { pos }),
                    1 => {}
                    _ => return Err(Error::CellInMultipleEntries { pos }),
                }
            }
            if count > 0 {
                domains.push(full);
                writable.push(true);
            } else {
                // Structural blank: holds only the sentinel, never written.
                domains.push(Domain::only_blank());
                writable.push(false);
            }
        }
        Ok((Grid::new(size, domains, writable), entries))
    }
}

/// Expand a linear extent declared by its endpoints into the full segment.
fn expand_linear_extent(extent: Vec<Position>) -> Result<Vec<Position>> {
    match extent.len() {
        1 => Ok(extent),
        2 => {
            let (a, b) = if extent[0] <= extent[1] {
                (extent[0], extent[1])
            } else {
                (extent[1], extent[0])
            };
            if a == b {
                Ok(vec![a])
            } else if a.row == b.row {
                Ok(rect_cells(a.row, a.col, 1, b.col - a.col + 1))
            } else if a.col == b.col {
                Ok(rect_cells(a.row, a.col, b.row - a.row + 1, 1))
            } else {
                Err(Error::LinearEntryNotAligned)
            }
        }
        _ => Err(Error::LinearEntryEndpoints),
    }
}

impl fmt::Display for Puzzle {
    /// Canonical textual rendering: resolved values, `.` for unresolved
    /// writable cells, and a `#` suffix marking non-writable cells.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(grid) = &self.grid else {
            return Ok(());
        };
        let size = grid.size();
        let mut width = 0;
        for pos in grid.positions() {
            let val_len = grid.value(pos).map_or(0, |v| v.to_string().len());
            let marker = usize::from(!grid.is_writable(pos));
            width = width.max(val_len + marker);
        }
        for row in 0..size.height {
            for col in 0..size.width {
                let pos = Position::new(row, col);
                let val = grid.value(pos).map(|v| v.to_string());
                if grid.is_writable(pos) {
                    let cell = val.unwrap_or_else(|| ".".to_string());
                    write!(f, "{cell:<width$}")?;
                } else {
                    let cell = format!("{}#", val.unwrap_or_default());
                    write!(f, "{cell:>width$}")?;
                }
                f.write_char(if col == size.width - 1 { '\n' } else { ' ' })?;
            }
        }
        Ok(())
    }
}
