//! Backtracking search over the dancing links matrix.
//!
//! The search is an explicit stack of frames rather than recursion; each
//! frame remembers the cover that entered it so unwinding the stack undoes
//! covers in exactly reverse order, whether the search ran to completion or
//! the caller stopped it early.

use crate::matrix::Matrix;
use std::ops::ControlFlow;

/// One decision in a solution path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// The item covered by this step.
    pub item: usize,
    /// The option selected to cover the item; always an element of
    /// `choices`.
    pub option: usize,
    /// Every option that covered the item when the decision was made, in
    /// column order.
    pub choices: Vec<usize>,
}

/// One level of the backtracking stack.
#[derive(Debug)]
struct Frame {
    /// The option covered to enter this frame together with the options
    /// deleted by that cover; `None` on the root frame.
    decision: Option<(usize, Vec<usize>)>,
    /// The item to branch on plus the candidate options covering it;
    /// `None` when the frame was entered with nothing left to cover.
    branch: Option<(usize, Vec<usize>)>,
    /// Position of the next candidate to try.
    cursor: usize,
}

impl Matrix {
    /// Enumerate every exact cover of the residual problem, streaming each
    /// one through `visit` as its decision path.
    ///
    /// Candidates for an item are tried in column order and items are
    /// branched on fewest-choices-first, so enumeration order is fully
    /// determined by the input. If nothing is left to cover when the search
    /// starts, `visit` sees the empty path once.
    ///
    /// Returning [`ControlFlow::Break`] stops the enumeration; outstanding
    /// covers are unwound before this method returns, so the matrix is back
    /// in its entry state no matter where the search stopped. The path
    /// passed to `visit` is only valid for the duration of the call.
    pub fn generate_solutions<F>(&mut self, mut visit: F)
    where
        F: FnMut(&[Step]) -> ControlFlow<()>,
    {
        let branch = match self.next_choices() {
            Some(branch) => branch,
            None => {
                // Nothing to cover: the empty selection is the one cover.
                visit(&[]);
                return;
            }
        };

        let mut stack = vec![Frame {
            decision: None,
            branch: Some(branch),
            cursor: 0,
        }];
        let mut path: Vec<Step> = Vec::new();
        let mut keep_going = true;

        loop {
            let step = {
                let top = match stack.last_mut() {
                    Some(top) => top,
                    None => return,
                };

                match &top.branch {
                    Some((item, candidates)) if keep_going && top.cursor < candidates.len() => {
                        let step = Step {
                            item: *item,
                            option: candidates[top.cursor],
                            choices: candidates.clone(),
                        };
                        top.cursor += 1;
                        Some(step)
                    }
                    _ => None,
                }
            };

            match step {
                Some(step) => {
                    let option = step.option;
                    let mut deleted = Vec::new();
                    self.choose_option(option, &mut deleted);
                    path.push(step);

                    let branch = self.next_choices();
                    if branch.is_none() {
                        keep_going = visit(&path).is_continue();
                    }

                    stack.push(Frame {
                        decision: Some((option, deleted)),
                        branch,
                        cursor: 0,
                    });
                }
                None => {
                    // The frame ran out of candidates, or the caller
                    // stopped the search; undo the cover that entered it.
                    if let Some(Frame {
                        decision: Some((option, deleted)),
                        ..
                    }) = stack.pop()
                    {
                        path.pop();
                        self.unchoose_option(option, &deleted);
                    }
                }
            }
        }
    }

    /// Like [`Matrix::generate_solutions`], but projecting each path down
    /// to the chosen option indices.
    pub fn generate_covers<F>(&mut self, mut visit: F)
    where
        F: FnMut(&[usize]) -> ControlFlow<()>,
    {
        self.generate_solutions(|path| {
            let cover: Vec<usize> = path.iter().map(|step| step.option).collect();
            visit(&cover)
        });
    }

    /// Collect every solution path.
    pub fn all_solutions(&mut self) -> Vec<Vec<Step>> {
        let mut solutions = Vec::new();
        self.generate_solutions(|path| {
            solutions.push(path.to_vec());
            ControlFlow::Continue(())
        });
        solutions
    }

    /// Collect every exact cover as a list of option indices.
    pub fn all_covers(&mut self) -> Vec<Vec<usize>> {
        let mut covers = Vec::new();
        self.generate_covers(|cover| {
            covers.push(cover.to_vec());
            ControlFlow::Continue(())
        });
        covers
    }

    /// The first solution path in enumeration order, or `None` if the
    /// residual problem has no exact cover.
    pub fn any_solution(&mut self) -> Option<Vec<Step>> {
        let mut solution = None;
        self.generate_solutions(|path| {
            solution = Some(path.to_vec());
            ControlFlow::Break(())
        });
        solution
    }

    /// The first exact cover in enumeration order, or `None` if the
    /// residual problem has none.
    pub fn any_cover(&mut self) -> Option<Vec<usize>> {
        let mut cover = None;
        self.generate_covers(|options| {
            cover = Some(options.to_vec());
            ControlFlow::Break(())
        });
        cover
    }
}
