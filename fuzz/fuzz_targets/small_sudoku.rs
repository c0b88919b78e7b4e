#![no_main]

use dlx_matrix::sudoku::{Placement, Sudoku};
use libfuzzer_sys::fuzz_target;

#[derive(Debug)]
struct BoardInput {
    givens: Vec<Placement>,
}

fn block(placement: &Placement) -> usize {
    (placement.row / 3) * 3 + placement.column / 3
}

/// Two givens are compatible when they occupy different cells and don't
/// repeat a digit in a row, column or block.
fn compatible(a: &Placement, b: &Placement) -> bool {
    if a.row == b.row && a.column == b.column {
        return false;
    }
    if a.value != b.value {
        return true;
    }
    a.row != b.row && a.column != b.column && block(a) != block(b)
}

impl<'a> arbitrary::Arbitrary<'a> for BoardInput {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        let cells = u.arbitrary::<[u8; 81]>()?;

        let mut givens: Vec<Placement> = Vec::new();
        for (index, value) in cells.into_iter().enumerate() {
            let value = usize::from(value) % 10;
            if value == 0 {
                continue;
            }
            let candidate = Placement {
                row: index / 9,
                column: index % 9,
                value,
            };
            // Only keep boards whose givens are mutually consistent.
            if givens.iter().all(|given| compatible(given, &candidate)) {
                givens.push(candidate);
            }
        }

        Ok(BoardInput { givens })
    }
}

fuzz_target!(|input: BoardInput| {
    let puzzle = Sudoku::new(input.givens.clone());

    if let Ok(Some(solution)) = puzzle.solve() {
        // A completed board fills all 81 cells and keeps every given.
        assert_eq!(solution.len(), 81);
        for given in &input.givens {
            assert!(solution.contains(given));
        }
    }
});
