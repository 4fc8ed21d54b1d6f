//! The candidate-domain grid: per-cell sets of still-possible values.
//!
//! `Domain` is a compact copyable bitset over the value range plus a "no
//! value" sentinel for cells outside every entry. `Grid::retain` is the only
//! mutator and only ever shrinks a domain, so solving is monotone by
//! construction.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A cell coordinate. Row 0 is the top row, column 0 the leftmost column.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    /// Create a new position.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl GridSize {
    pub fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// A value a cell may hold: a concrete number, or `None` for the structural
/// "no value" sentinel carried by cells that no entry covers.
pub type Candidate = Option<u8>;

/// The set of candidates still possible for one cell.
///
/// Values live in a `u128` bitmask (the maximum grid size is 100, so every
/// legal value fits); the sentinel gets its own flag. Domains are cheap to
/// copy and compare, which the solver leans on heavily.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Domain {
    bits: u128,
    blank: bool,
}

impl Domain {
    /// The largest value a domain can represent.
    pub const MAX_VALUE: u8 = 127;

    /// The empty domain.
    pub fn empty() -> Self {
        Self {
            bits: 0,
            blank: false,
        }
    }

    /// All values in `min..=max`.
    pub fn range(min: u8, max: u8) -> Self {
        debug_assert!(min <= max && max <= Self::MAX_VALUE);
        let high = u128::MAX >> (127 - max as u32);
        let low = (1u128 << min) - 1;
        Self {
            bits: high & !low,
            blank: false,
        }
    }

    /// The domain holding only the sentinel, for cells no entry covers.
    pub fn only_blank() -> Self {
        Self {
            bits: 0,
            blank: true,
        }
    }

    /// A domain pinned to a single value.
    pub fn singleton(value: u8) -> Self {
        debug_assert!(value <= Self::MAX_VALUE);
        Self {
            bits: 1u128 << value,
            blank: false,
        }
    }

    /// Add a candidate. Used only while building domains and supports;
    /// the grid itself never grows a domain.
    pub fn insert(&mut self, candidate: Candidate) {
        match candidate {
            Some(v) => {
                debug_assert!(v <= Self::MAX_VALUE);
                self.bits |= 1u128 << v;
            }
            None => self.blank = true,
        }
    }

    pub fn contains(&self, candidate: Candidate) -> bool {
        match candidate {
            Some(v) => v <= Self::MAX_VALUE && self.bits & (1u128 << v) != 0,
            None => self.blank,
        }
    }

    /// Number of candidates, counting the sentinel.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize + usize::from(self.blank)
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0 && !self.blank
    }

    /// The cell's value if it is pinned to exactly one concrete value.
    /// A domain holding only the sentinel reports no value.
    pub fn value(&self) -> Option<u8> {
        if !self.blank && self.bits.count_ones() == 1 {
            Some(self.bits.trailing_zeros() as u8)
        } else {
            None
        }
    }

    /// Whether exactly one candidate (value or sentinel) remains.
    pub fn is_resolved(&self) -> bool {
        self.len() == 1
    }

    /// Intersect with `other` in place. Returns whether anything was removed.
    pub fn intersect(&mut self, other: Domain) -> bool {
        let before = *self;
        self.bits &= other.bits;
        self.blank &= other.blank;
        *self != before
    }

    /// Concrete values in ascending order.
    pub fn values(&self) -> DomainValues {
        DomainValues { bits: self.bits }
    }

    /// All candidates, sentinel first, then values in ascending order.
    pub fn candidates(&self) -> impl Iterator<Item = Candidate> + '_ {
        self.blank
            .then_some(None)
            .into_iter()
            .chain(self.values().map(Some))
    }
}

impl fmt::Debug for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.candidates()).finish()
    }
}

/// Iterator over the concrete values of a `Domain`.
pub struct DomainValues {
    bits: u128,
}

impl Iterator for DomainValues {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        if self.bits == 0 {
            return None;
        }
        let v = self.bits.trailing_zeros() as u8;
        self.bits &= self.bits - 1;
        Some(v)
    }
}

/// The rectangular grid of candidate domains plus the fixed writability mask.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    size: GridSize,
    domains: Vec<Domain>,
    writable: Vec<bool>,
}

impl Grid {
    pub(crate) fn new(size: GridSize, domains: Vec<Domain>, writable: Vec<bool>) -> Self {
        debug_assert_eq!(domains.len(), size.width * size.height);
        debug_assert_eq!(writable.len(), size.width * size.height);
        Self {
            size,
            domains,
            writable,
        }
    }

    #[inline]
    fn index(&self, pos: Position) -> usize {
        debug_assert!(pos.row < self.size.height && pos.col < self.size.width);
        pos.row * self.size.width + pos.col
    }

    #[inline]
    pub fn size(&self) -> GridSize {
        self.size
    }

    /// The candidates still possible for a cell.
    #[inline]
    pub fn candidates(&self, pos: Position) -> Domain {
        self.domains[self.index(pos)]
    }

    /// The cell's value if its domain is pinned to one concrete value.
    #[inline]
    pub fn value(&self, pos: Position) -> Option<u8> {
        self.candidates(pos).value()
    }

    /// Whether the cell must ultimately hold exactly one value.
    #[inline]
    pub fn is_writable(&self, pos: Position) -> bool {
        self.writable[self.index(pos)]
    }

    /// Intersect a cell's domain with `allowed`, the sole narrowing channel.
    /// Returns whether the domain actually shrank.
    pub fn retain(&mut self, pos: Position, allowed: Domain) -> bool {
        let idx = self.index(pos);
        self.domains[idx].intersect(allowed)
    }

    /// Iterate all cell positions in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = Position> {
        let size = self.size;
        (0..size.height).flat_map(move |row| (0..size.width).map(move |col| Position::new(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_range() {
        let d = Domain::range(1, 9);
        assert_eq!(d.len(), 9);
        assert!(d.contains(Some(1)));
        assert!(d.contains(Some(9)));
        assert!(!d.contains(Some(0)));
        assert!(!d.contains(Some(10)));
        assert!(!d.contains(None));
    }

    #[test]
    fn test_domain_zero_based_range() {
        // Takuzu uses 0..=1
        let d = Domain::range(0, 1);
        assert_eq!(d.values().collect::<Vec<_>>(), vec![0, 1]);
    }

    #[test]
    fn test_domain_value_requires_single_concrete() {
        assert_eq!(Domain::singleton(4).value(), Some(4));
        assert_eq!(Domain::range(1, 4).value(), None);
        // The sentinel-only domain is resolved but has no value.
        let blank = Domain::only_blank();
        assert!(blank.is_resolved());
        assert_eq!(blank.value(), None);
    }

    #[test]
    fn test_domain_intersect_is_monotone() {
        let mut d = Domain::range(1, 9);
        let allowed = Domain::range(3, 5);
        assert!(d.intersect(allowed));
        assert_eq!(d.values().collect::<Vec<_>>(), vec![3, 4, 5]);
        // Intersecting again changes nothing.
        assert!(!d.intersect(allowed));
        // A superset never grows the domain back.
        assert!(!d.intersect(Domain::range(1, 9)));
        assert_eq!(d.len(), 3);
    }

    #[test]
    fn test_domain_candidate_order() {
        let mut d = Domain::range(2, 3);
        d.insert(None);
        let cands: Vec<Candidate> = d.candidates().collect();
        assert_eq!(cands, vec![None, Some(2), Some(3)]);
    }

    #[test]
    fn test_grid_retain_reports_change() {
        let size = GridSize::new(2, 1);
        let domains = vec![Domain::range(1, 2), Domain::singleton(1)];
        let mut grid = Grid::new(size, domains, vec![true, true]);
        let pos = Position::new(0, 0);
        assert!(grid.retain(pos, Domain::singleton(2)));
        assert_eq!(grid.value(pos), Some(2));
        assert!(!grid.retain(pos, Domain::singleton(2)));
    }

    #[test]
    fn test_grid_positions_row_major() {
        let size = GridSize::new(2, 2);
        let grid = Grid::new(
            size,
            vec![Domain::singleton(1); 4],
            vec![true; 4],
        );
        let all: Vec<Position> = grid.positions().collect();
        assert_eq!(
            all,
            vec![
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(1, 0),
                Position::new(1, 1),
            ]
        );
    }
}
