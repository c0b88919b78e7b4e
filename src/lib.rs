#![warn(missing_docs)]

//! An exact cover solver built on Knuth's dancing links technique.
//!
//! Given a universe of items and a collection of options, each covering a
//! subset of the items, a [`Matrix`] enumerates every selection of options
//! that covers each item exactly once. Solutions stream through a callback
//! as paths of [`Step`] records, so callers can stop the search at any
//! point, and options can be forced up front to solve the residual problem
//! that remains.
//!
//! ```
//! use dlx_matrix::Matrix;
//!
//! let mut matrix = Matrix::new(
//!     7,
//!     vec![
//!         vec![2, 4],
//!         vec![0, 3, 6],
//!         vec![1, 2, 5],
//!         vec![0, 3, 5],
//!         vec![1, 6],
//!         vec![3, 4, 6],
//!     ],
//! )?;
//!
//! assert_eq!(matrix.all_covers(), vec![vec![3, 4, 0]]);
//! # Ok::<(), dlx_matrix::MatrixError>(())
//! ```

pub mod matrix;
pub(crate) mod solver;
pub mod sudoku;
pub(crate) mod util;

pub use matrix::{Matrix, MatrixError};
pub use solver::Step;
