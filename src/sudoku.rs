//! A 9×9 Sudoku front-end for the exact cover solver.
//!
//! Filling a board is an exact cover problem over 324 items: every
//! (row, value), (column, value) and (block, value) combination must be
//! used exactly once, and every cell must hold exactly one digit. Each of
//! the 729 possible digit placements becomes one option covering four of
//! those items, and the given digits of a puzzle are forced before the
//! search starts.

use crate::{Matrix, MatrixError};

const SIDE: usize = 9;
const BLOCK_SIDE: usize = 3;
const CELL_COUNT: usize = SIDE * SIDE;
/// Row-value, column-value, block-value and cell item groups.
const ITEM_COUNT: usize = 4 * CELL_COUNT;

/// A single digit placed at a position on the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Placement {
    /// The row index, ranging from 0 to 8.
    pub row: usize,
    /// The column index, ranging from 0 to 8.
    pub column: usize,
    /// The digit, ranging from 1 to 9.
    pub value: usize,
}

impl Placement {
    /// Return an iterator over all possible placements, in option index
    /// order.
    fn all() -> impl Iterator<Item = Self> {
        crate::util::triple_iter([SIDE, SIDE, SIDE]).map(|[row, column, digit]| Placement {
            row,
            column,
            value: digit + 1,
        })
    }

    fn block(&self) -> usize {
        (self.row / BLOCK_SIDE) * BLOCK_SIDE + self.column / BLOCK_SIDE
    }

    /// The index of the option representing this placement.
    fn option_index(&self) -> usize {
        CELL_COUNT * self.row + SIDE * self.column + (self.value - 1)
    }

    /// The placement represented by the given option index.
    fn from_option_index(index: usize) -> Self {
        Placement {
            row: index / CELL_COUNT,
            column: index / SIDE % SIDE,
            value: index % SIDE + 1,
        }
    }

    /// The four items this placement covers.
    fn items(&self) -> [usize; 4] {
        let value = self.value - 1;
        [
            SIDE * value + self.row,
            CELL_COUNT + SIDE * value + self.column,
            2 * CELL_COUNT + SIDE * value + self.block(),
            3 * CELL_COUNT + SIDE * self.row + self.column,
        ]
    }
}

/// A 9×9 Sudoku puzzle described by its given digits.
#[derive(Debug, Clone)]
pub struct Sudoku {
    givens: Vec<Placement>,
}

impl Sudoku {
    /// Create a puzzle from its given digits.
    ///
    /// Givens that clash (sharing a cell, or repeating a digit in a row,
    /// column or block) leave the forced matrix in an unspecified state;
    /// see [`Matrix::force_options`].
    pub fn new(givens: impl IntoIterator<Item = Placement>) -> Self {
        Sudoku {
            givens: givens.into_iter().collect(),
        }
    }

    /// Parse a board from its 81-character row-major digit string, where
    /// `'0'` denotes an empty cell.
    ///
    /// # Panics
    ///  - If the input is not exactly 81 characters.
    ///  - If any character is not in `[0-9]`.
    pub fn parse(input: &str) -> Self {
        assert_eq!(
            input.len(),
            CELL_COUNT,
            "board needs one digit per cell, got [{}] characters",
            input.len()
        );

        let mut givens = Vec::new();
        for (index, c) in input.char_indices() {
            match c.to_digit(10) {
                Some(0) => {}
                Some(value) => givens.push(Placement {
                    row: index / SIDE,
                    column: index % SIDE,
                    value: value as usize,
                }),
                None => panic!("invalid board character [{}]", c),
            }
        }

        Sudoku { givens }
    }

    /// Format placements back into the 81-character row-major digit string,
    /// leaving unplaced cells as `'0'`.
    pub fn format(placements: &[Placement]) -> String {
        let mut board = vec![b'0'; CELL_COUNT];
        for placement in placements {
            board[SIDE * placement.row + placement.column] = b'0' + placement.value as u8;
        }
        board.into_iter().map(char::from).collect()
    }

    /// The given digits of this puzzle.
    pub fn givens(&self) -> &[Placement] {
        &self.givens
    }

    /// Build the exact cover matrix for this board, with the givens
    /// already forced.
    pub fn matrix(&self) -> Result<Matrix, MatrixError> {
        let options = Placement::all().map(|p| p.items().to_vec()).collect();
        let mut matrix = Matrix::new(ITEM_COUNT, options)?;
        matrix.force_options(self.givens.iter().map(Placement::option_index))?;
        Ok(matrix)
    }

    /// Solve the puzzle, returning the full board (givens included) in
    /// row-major order, or `None` if the board cannot be completed.
    pub fn solve(&self) -> Result<Option<Vec<Placement>>, MatrixError> {
        let mut matrix = self.matrix()?;
        Ok(matrix.any_cover().map(|cover| {
            let mut placements = self.givens.clone();
            placements.extend(cover.into_iter().map(Placement::from_option_index));
            placements.sort_unstable();
            placements
        }))
    }
}
