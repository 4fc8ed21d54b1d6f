//! The propagation engine: solves puzzles by shrinking candidate domains
//! to a fixpoint, without guessing.
//!
//! Entries are scheduled easiest-first in small batches. For each batch
//! entry the solver enumerates every value sequence its clues allow, then
//! repeatedly filters the sequences of all entries seen so far against the
//! grid: a cell keeps only the values it attains in some surviving sequence,
//! and a sequence survives only while all its values remain candidates.
//! When no batch remains the puzzle is `Solved` if every writable cell is
//! pinned, otherwise `Unsolvable` (including genuinely ambiguous puzzles).
//!
//! Both per-entry phases read a frozen grid snapshot and return local
//! results that are merged serially in entry order, so a solve is
//! deterministic for any worker count.

mod tasks;

use crate::entry::Entry;
use crate::error::Result;
use crate::grid::{Candidate, Domain, Grid, Position};
use crate::puzzle::{Puzzle, PuzzleState};
use tasks::{parallel_map, worker_count};

/// Scheduling knobs. The defaults work well across the built-in kinds;
/// per-kind tuning might do better.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// An entry joins a batch while its difficulty score is at most the
    /// easiest pending score times this ratio.
    pub batch_ratio: f64,
    /// Hard cap on entries per batch.
    pub batch_limit: usize,
    /// Worker thread count; `None` uses available parallelism.
    pub threads: Option<usize>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            batch_ratio: 1.35,
            batch_limit: 10,
            threads: None,
        }
    }
}

/// The solving engine. Stateless between calls; all per-solve bookkeeping
/// lives on the stack.
#[derive(Debug, Default)]
pub struct Solver {
    config: SolverConfig,
}

impl Solver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Solve an initialized puzzle, moving it to `Solved` or `Unsolvable`
    /// and returning the final state.
    ///
    /// `Unsolvable` covers both contradictory puzzles and puzzles whose
    /// solution cannot be pinned down by propagation alone.
    pub fn solve(&self, puzzle: &mut Puzzle) -> Result<PuzzleState> {
        let workers = worker_count(self.config.threads);
        let (grid, pending) = puzzle.begin_solve()?;
        propagate(grid, pending, &self.config, workers);
        let solved = grid
            .positions()
            .filter(|&pos| grid.is_writable(pos))
            .all(|pos| grid.value(pos).is_some());
        let state = if solved {
            PuzzleState::Solved
        } else {
            PuzzleState::Unsolvable
        };
        puzzle.set_state(state);
        Ok(state)
    }
}

/// Solve with the default configuration.
pub fn solve(puzzle: &mut Puzzle) -> Result<PuzzleState> {
    Solver::default().solve(puzzle)
}

/// An entry taken into solving, with the sequences still considered
/// possible solutions for it.
struct ActiveEntry {
    entry: Entry,
    sequences: Vec<Vec<Candidate>>,
}

/// Result of one read-only filter phase over one entry.
struct EntryPass {
    /// Per-sequence flag: true when some value is no longer a candidate.
    stale: Vec<bool>,
    /// Per writable cell, the values it attains across current sequences.
    supports: Vec<(Position, Domain)>,
}

fn propagate(grid: &mut Grid, mut pending: Vec<Entry>, config: &SolverConfig, workers: usize) {
    let mut active: Vec<ActiveEntry> = Vec::new();
    while !pending.is_empty() {
        let batch = select_batch(grid, &pending, config);
        let mut fresh: Vec<Entry> = Vec::with_capacity(batch.len());
        {
            let mut slots: Vec<Option<Entry>> = pending.drain(..).map(Some).collect();
            for &i in &batch {
                if let Some(mut entry) = slots[i].take() {
                    if entry.reorderable() {
                        entry.reorder_cells_by_key(|cell| grid.candidates(cell).len());
                    }
                    fresh.push(entry);
                }
            }
            pending.extend(slots.into_iter().flatten());
        }

        let generated = {
            let snapshot = &*grid;
            parallel_map(&fresh, workers, |entry| generate_sequences(entry, snapshot))
        };
        for (entry, sequences) in fresh.into_iter().zip(generated) {
            active.push(ActiveEntry { entry, sequences });
        }

        // Filter everything seen so far to a fixpoint before the next batch.
        loop {
            let passes = {
                let snapshot = &*grid;
                parallel_map(&active, workers, |a| filter_pass(a, snapshot))
            };
            let mut changed = false;
            for (a, pass) in active.iter_mut().zip(passes) {
                if pass.stale.contains(&true) {
                    changed = true;
                    let mut keep = pass.stale.iter().map(|&s| !s);
                    a.sequences.retain(|_| keep.next().unwrap_or(true));
                }
                for (cell, support) in pass.supports {
                    changed |= grid.retain(cell, support);
                }
            }
            if !changed {
                break;
            }
        }
    }
}

/// Pick the next batch of pending entries by difficulty.
///
/// An entry's score is the total candidate count over its cells. Entries are
/// ranked by score (ties by list position); the batch takes scores within
/// `batch_ratio` of the minimum, capped at `batch_limit`. Returns indices
/// into `pending`, in rank order.
fn select_batch(grid: &Grid, pending: &[Entry], config: &SolverConfig) -> Vec<usize> {
    let mut ranked: Vec<(usize, usize)> = pending
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            let score = entry
                .cells()
                .iter()
                .map(|&cell| grid.candidates(cell).len())
                .sum();
            (score, i)
        })
        .collect();
    ranked.sort_unstable();
    let Some(&(easiest, _)) = ranked.first() else {
        return Vec::new();
    };
    // The easiest entry always qualifies, so a batch is never empty.
    let cutoff = (easiest as f64 * config.batch_ratio).max(easiest as f64);
    ranked
        .into_iter()
        .take_while(|&(score, _)| score as f64 <= cutoff)
        .map(|(_, i)| i)
        .take(config.batch_limit.max(1))
        .collect()
}

/// Enumerate every sequence the entry's clues and current domains allow.
///
/// Sequences grow cell by cell: writable cells branch over their candidates
/// (pruned by the partial clue), non-writable cells contribute their fixed
/// value, or the sentinel when they have none. The full clue filters the
/// complete sequences.
fn generate_sequences(entry: &Entry, grid: &Grid) -> Vec<Vec<Candidate>> {
    let mut sequences: Vec<Vec<Candidate>> = vec![Vec::new()];
    for &cell in entry.cells() {
        let mut extended = Vec::new();
        if grid.is_writable(cell) {
            let candidates = grid.candidates(cell);
            for seq in &sequences {
                for v in candidates.values() {
                    if entry.allows_extension(seq, v) {
                        let mut longer = Vec::with_capacity(seq.len() + 1);
                        longer.extend_from_slice(seq);
                        longer.push(Some(v));
                        extended.push(longer);
                    }
                }
            }
        } else {
            let fixed = grid.value(cell);
            for seq in &sequences {
                let mut longer = Vec::with_capacity(seq.len() + 1);
                longer.extend_from_slice(seq);
                longer.push(fixed);
                extended.push(longer);
            }
        }
        sequences = extended;
    }
    sequences.retain(|seq| entry.is_valid_solution(seq));
    sequences
}

/// One filter phase for one entry against a frozen grid.
///
/// For each writable cell, collect the values it attains across sequences
/// whose value there is still a candidate, and mark sequences carrying a
/// dropped value as stale. Cells whose sequences no longer support some
/// candidate get a narrowed support domain for the merge step.
fn filter_pass(active: &ActiveEntry, grid: &Grid) -> EntryPass {
    let mut stale = vec![false; active.sequences.len()];
    let mut supports = Vec::new();
    for (i, &cell) in active.entry.cells().iter().enumerate() {
        if !grid.is_writable(cell) {
            continue;
        }
        let candidates = grid.candidates(cell);
        let mut attained = Domain::empty();
        for (s, seq) in active.sequences.iter().enumerate() {
            match seq[i] {
                Some(v) if candidates.contains(Some(v)) => attained.insert(Some(v)),
                Some(_) => stale[s] = true,
                None => {}
            }
        }
        supports.push((cell, attained));
    }
    EntryPass { stale, supports }
}
