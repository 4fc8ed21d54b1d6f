//! End-to-end solves across the built-in puzzle kinds.

use gridlock_core::{kind_for_code, solve, Definition, GridSize, Position, Puzzle, PuzzleState};

/// Parse a digit grid where '0' or '.' marks an unknown cell.
fn digit_rows(rows: &[&str]) -> Vec<Vec<Option<u8>>> {
    rows.iter()
        .map(|row| {
            row.chars()
                .map(|c| match c {
                    '0' | '.' => None,
                    d => Some(d.to_digit(10).map(|v| v as u8).unwrap_or_else(|| {
                        panic!("bad digit {d:?}")
                    })),
                })
                .collect()
        })
        .collect()
}

fn values(puzzle: &Puzzle) -> Vec<Vec<Option<u8>>> {
    let size = puzzle.grid_size().unwrap();
    (0..size.height)
        .map(|row| {
            (0..size.width)
                .map(|col| puzzle.value(Position::new(row, col)))
                .collect()
        })
        .collect()
}

const SUDOKU_SOLUTION: [&str; 9] = [
    "534678912",
    "672195348",
    "198342567",
    "859761423",
    "426853791",
    "713924856",
    "961537284",
    "287419635",
    "345286179",
];

#[test]
fn classic_sudoku_solves_completely() {
    let mut puzzle = Puzzle::from_code("su").unwrap();
    puzzle
        .initialize(Definition::Values(digit_rows(&[
            "530070000",
            "600195000",
            "098000060",
            "800060003",
            "400803001",
            "700020006",
            "060000280",
            "000419005",
            "000080079",
        ])))
        .unwrap();
    assert_eq!(solve(&mut puzzle).unwrap(), PuzzleState::Solved);
    assert_eq!(values(&puzzle), digit_rows(&SUDOKU_SOLUTION));
}

/// Blanking all four corners of a "deadly rectangle" leaves two valid
/// completions, which the solver must refuse to decide between. Restoring
/// any one corner makes the puzzle unique again.
#[test]
fn sudoku_ambiguity_is_detected() {
    // (3,5)/(3,8)/(4,5)/(4,8) hold 1/3/3/1: rows 3 and 4 share a band and
    // each column pair shares a box, so swapping 1 and 3 stays valid.
    let corners = [
        Position::new(3, 5),
        Position::new(3, 8),
        Position::new(4, 5),
        Position::new(4, 8),
    ];

    let mut blanked = digit_rows(&SUDOKU_SOLUTION);
    for pos in corners {
        blanked[pos.row][pos.col] = None;
    }
    let mut puzzle = Puzzle::from_code("su").unwrap();
    puzzle.initialize(Definition::Values(blanked)).unwrap();
    assert_eq!(solve(&mut puzzle).unwrap(), PuzzleState::Unsolvable);

    // Keep one corner given and the other three follow by elimination.
    let mut blanked = digit_rows(&SUDOKU_SOLUTION);
    for pos in &corners[1..] {
        blanked[pos.row][pos.col] = None;
    }
    let mut puzzle = Puzzle::from_code("su").unwrap();
    puzzle.initialize(Definition::Values(blanked)).unwrap();
    assert_eq!(solve(&mut puzzle).unwrap(), PuzzleState::Solved);
    assert_eq!(values(&puzzle), digit_rows(&SUDOKU_SOLUTION));
}

#[test]
fn takuzu_balance_and_uniqueness() {
    let mut puzzle = Puzzle::from_code("ta").unwrap();
    puzzle
        .initialize(Definition::Values(vec![
            vec![Some(1), Some(1), Some(0), Some(0)],
            vec![Some(0), Some(0), Some(1), Some(1)],
            vec![Some(1), Some(0), Some(1), None],
            vec![None, None, None, None],
        ]))
        .unwrap();
    assert_eq!(solve(&mut puzzle).unwrap(), PuzzleState::Solved);
    let expected = vec![
        vec![Some(1), Some(1), Some(0), Some(0)],
        vec![Some(0), Some(0), Some(1), Some(1)],
        vec![Some(1), Some(0), Some(1), Some(0)],
        vec![Some(0), Some(1), Some(0), Some(1)],
    ];
    assert_eq!(values(&puzzle), expected);
}

#[test]
fn takuzu_two_completions_stay_open() {
    // Rows 2 and 3 can be 1010/0101 or 1001/0110; both keep every line
    // balanced and all rows and columns distinct.
    let mut puzzle = Puzzle::from_code("ta").unwrap();
    puzzle
        .initialize(Definition::Values(vec![
            vec![Some(1), Some(1), Some(0), Some(0)],
            vec![Some(0), Some(0), Some(1), Some(1)],
            vec![Some(1), Some(0), None, None],
            vec![Some(0), Some(1), None, None],
        ]))
        .unwrap();
    assert_eq!(solve(&mut puzzle).unwrap(), PuzzleState::Unsolvable);
}

#[test]
fn str8ts_two_by_two() {
    let mut puzzle = Puzzle::from_code("s8").unwrap();
    puzzle
        .initialize(Definition::ValuesAndWritability {
            values: vec![vec![Some(1), None], vec![None, None]],
            writable: vec![vec![true, true], vec![true, true]],
        })
        .unwrap();
    assert_eq!(solve(&mut puzzle).unwrap(), PuzzleState::Solved);
    assert_eq!(puzzle.value(Position::new(0, 1)), Some(2));
    assert_eq!(puzzle.value(Position::new(1, 0)), Some(2));
    assert_eq!(puzzle.value(Position::new(1, 1)), Some(1));
}

#[test]
fn str8ts_black_cells_shape_compartments() {
    // A black corner cell with a given value still constrains its row and
    // column, but belongs to no compartment.
    let mut puzzle = Puzzle::from_code("s8").unwrap();
    puzzle
        .initialize(Definition::ValuesAndWritability {
            values: vec![
                vec![Some(3), Some(1), None],
                vec![None, Some(3), None],
                vec![None, None, None],
            ],
            writable: vec![
                vec![false, true, true],
                vec![true, true, true],
                vec![true, true, true],
            ],
        })
        .unwrap();
    assert_eq!(solve(&mut puzzle).unwrap(), PuzzleState::Solved);
    assert_eq!(
        values(&puzzle),
        vec![
            vec![Some(3), Some(1), Some(2)],
            vec![Some(2), Some(3), Some(1)],
            vec![Some(1), Some(2), Some(3)],
        ]
    );
    assert!(!puzzle.is_writable(Position::new(0, 0)));
}

#[test]
fn inshi_no_heya_rooms() {
    let mut puzzle = Puzzle::from_code("in").unwrap();
    puzzle
        .initialize(Definition::Entries(vec![
            (vec![Position::new(0, 0)], 1),
            (vec![Position::new(0, 1), Position::new(1, 1)], 2),
            (vec![Position::new(1, 0)], 2),
        ]))
        .unwrap();
    assert_eq!(solve(&mut puzzle).unwrap(), PuzzleState::Solved);
    assert_eq!(
        values(&puzzle),
        vec![vec![Some(1), Some(2)], vec![Some(2), Some(1)]]
    );
}

#[test]
fn killer_sudoku_cages() {
    // 4x4 Killer Sudoku whose cages pin the grid without any given values.
    let cage = |cells: &[(usize, usize)], sum: i64| {
        (
            cells
                .iter()
                .map(|&(r, c)| Position::new(r, c))
                .collect::<Vec<_>>(),
            sum,
        )
    };
    let cages = vec![
        cage(&[(0, 0)], 1),
        cage(&[(0, 1), (0, 2)], 5),
        cage(&[(0, 3)], 4),
        cage(&[(1, 0), (1, 1)], 7),
        cage(&[(1, 2)], 1),
        cage(&[(1, 3)], 2),
        cage(&[(2, 0), (3, 0)], 6),
        cage(&[(2, 1)], 1),
        cage(&[(2, 2), (2, 3)], 7),
        cage(&[(3, 1)], 3),
        cage(&[(3, 2), (3, 3)], 3),
    ];
    let mut puzzle = Puzzle::from_code("ks").unwrap();
    puzzle
        .initialize(Definition::Entries(cages.clone()))
        .unwrap();
    assert_eq!(solve(&mut puzzle).unwrap(), PuzzleState::Solved);
    assert_eq!(
        values(&puzzle),
        digit_rows(&["1234", "3412", "2143", "4321"])
    );

    // The solved grid must satisfy every cage clue rebuilt from scratch.
    let kind = kind_for_code("ks").unwrap();
    let dynamic = kind.dynamic().unwrap();
    for (cells, sum) in &cages {
        let seq: Vec<Option<u8>> = cells.iter().map(|&pos| puzzle.value(pos)).collect();
        let full = dynamic.clue_full(*sum);
        assert!(full(&seq), "cage {cells:?} does not sum to {sum}");
    }
}

#[test]
fn grid_types_round_trip_through_json() {
    let pos = Position::new(2, 7);
    let json = serde_json::to_string(&pos).unwrap();
    assert_eq!(serde_json::from_str::<Position>(&json).unwrap(), pos);

    let size = GridSize::new(9, 9);
    let json = serde_json::to_string(&size).unwrap();
    assert_eq!(serde_json::from_str::<GridSize>(&json).unwrap(), size);

    let state = PuzzleState::Unsolvable;
    let json = serde_json::to_string(&state).unwrap();
    assert_eq!(serde_json::from_str::<PuzzleState>(&json).unwrap(), state);
}
