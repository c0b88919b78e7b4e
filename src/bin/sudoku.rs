//! Solve a 9×9 Sudoku board.
//! Usage:
//!
//! ```bash
//! cargo run --release --bin sudoku 300080900000340000008005600500104070002009010003000040005001200000000000070008090
//! ```
//!
//! Prints the first solution as nine rows, then the total number of ways
//! the board can be completed.

use dlx_matrix::sudoku::Sudoku;
use std::ops::ControlFlow;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        eprintln!("board needed");
        std::process::exit(1);
    }

    let board = &args[1];
    if board.len() != 9 * 9 {
        eprintln!("invalid board format");
        std::process::exit(1);
    }

    let puzzle = Sudoku::parse(board);
    let mut matrix = match puzzle.matrix() {
        Ok(matrix) => matrix,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    };

    match puzzle.solve() {
        Ok(Some(solution)) => {
            let formatted = Sudoku::format(&solution);
            for row in 0..9 {
                println!("{}", &formatted[row * 9..(row + 1) * 9]);
            }
        }
        Ok(None) => println!("no solution"),
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(1);
        }
    }

    let mut count = 0u64;
    matrix.generate_covers(|_| {
        count += 1;
        ControlFlow::Continue(())
    });
    println!("{} solutions", count);
}
