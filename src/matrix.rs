//! The dancing links matrix: items, entries and the link surgery that
//! temporarily removes them.
//!
//! Nodes live in flat arenas and refer to each other through plain `usize`
//! indices, so unlinking and relinking a node is a pair of index writes on
//! its neighbors. The unlinked node keeps its own links untouched, which is
//! what makes the restore operations possible.

use std::mem;
use thiserror::Error;

/// Marks the per-item column sentinels, which belong to no option.
const NO_OPTION: usize = usize::MAX;

/// Errors reported when building a [`Matrix`] or forcing options on one.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MatrixError {
    /// An option listed an item index outside the matrix's item range.
    #[error("option {option} lists item {item}, but the matrix has {item_count} items")]
    InvalidItemIndex {
        /// Index of the offending option.
        option: usize,
        /// The out-of-range item index.
        item: usize,
        /// Number of items in the matrix.
        item_count: usize,
    },
    /// An option index passed to [`Matrix::force_options`] was out of range.
    #[error("option index {index} is out of range for a matrix with {option_count} options")]
    OptionOutOfRange {
        /// The out-of-range option index.
        index: usize,
        /// Number of options in the matrix.
        option_count: usize,
    },
}

/// A node in the cyclic ring of items left to cover.
///
/// Items occupy indices `0..item_count` of the item arena and the ring
/// anchor sits at index `item_count`. The anchor's `choices` field is never
/// read.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Item {
    left: usize,
    right: usize,
    /// Number of entries presently linked into this item's column.
    choices: usize,
}

/// A node in one column's cyclic entry ring.
///
/// The sentinel anchoring item `k`'s column is stored at index `k` of the
/// entry arena; entries created for options follow after `item_count`.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Entry {
    up: usize,
    down: usize,
    /// The item this entry covers.
    item: usize,
    /// The option this entry belongs to, or [`NO_OPTION`] for sentinels.
    option: usize,
}

/// An exact cover problem held as a dancing links matrix.
///
/// The matrix owns every node; callers only ever see option indices and the
/// [`Step`] records produced by the solver. Searching and forcing mutate the
/// link state in place, but every search restores the state it found on
/// entry, so one matrix can serve any number of consecutive searches.
///
/// ```
/// use dlx_matrix::Matrix;
///
/// let mut matrix = Matrix::new(3, vec![vec![0, 2], vec![1], vec![0, 1]])?;
/// assert_eq!(matrix.any_cover(), Some(vec![0, 1]));
/// # Ok::<(), dlx_matrix::MatrixError>(())
/// ```
///
/// [`Step`]: crate::Step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Matrix {
    item_count: usize,
    items: Vec<Item>,
    entries: Vec<Entry>,
    /// Per option, the indices of its entries in the caller's item order.
    options: Vec<Vec<usize>>,
    /// Options forced so far, in forcing order.
    selected: Vec<usize>,
    /// Options deleted while forcing, in deletion order.
    deleted: Vec<usize>,
}

impl Matrix {
    /// Build a matrix for `item_count` items and the given options, each an
    /// ordered list of the item indices it covers.
    ///
    /// Options may repeat: duplicates are distinct options with distinct
    /// indices, and all of them show up in solutions. Item order within an
    /// option is preserved and determines the order link surgery walks the
    /// option.
    ///
    /// # Errors
    ///  - [`MatrixError::InvalidItemIndex`] if any option lists an item
    ///    index `>= item_count`.
    pub fn new(item_count: usize, options: Vec<Vec<usize>>) -> Result<Self, MatrixError> {
        for (option, items) in options.iter().enumerate() {
            for &item in items {
                if item >= item_count {
                    return Err(MatrixError::InvalidItemIndex {
                        option,
                        item,
                        item_count,
                    });
                }
            }
        }

        Ok(Self::new_unchecked(item_count, options))
    }

    /// Build a matrix from a dense boolean matrix.
    ///
    /// Each row becomes one option covering the item indices where the row
    /// is true. Rows may have different lengths; the item count is the
    /// longest row's length and shorter rows are treated as padded with
    /// false.
    pub fn from_matrix(matrix: &[Vec<bool>]) -> Self {
        let item_count = matrix.iter().map(Vec::len).max().unwrap_or(0);
        let options = matrix
            .iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .filter_map(|(item, &cell)| cell.then_some(item))
                    .collect()
            })
            .collect();

        Self::new_unchecked(item_count, options)
    }

    fn new_unchecked(item_count: usize, option_items: Vec<Vec<usize>>) -> Self {
        let anchor = item_count;
        let mut items: Vec<Item> = (0..=item_count)
            .map(|index| Item {
                left: if index == 0 { anchor } else { index - 1 },
                right: if index == item_count { 0 } else { index + 1 },
                choices: 0,
            })
            .collect();

        // Column sentinels first, one per item, each ring initially just
        // the sentinel itself.
        let mut entries: Vec<Entry> = (0..item_count)
            .map(|item| Entry {
                up: item,
                down: item,
                item,
                option: NO_OPTION,
            })
            .collect();

        // Bottom-most linked entry of each column so far.
        let mut last: Vec<usize> = (0..item_count).collect();

        let mut options = Vec::with_capacity(option_items.len());
        for (option, covered) in option_items.into_iter().enumerate() {
            let mut option_entries = Vec::with_capacity(covered.len());
            for item in covered {
                let index = entries.len();
                entries.push(Entry {
                    up: last[item],
                    down: item,
                    item,
                    option,
                });
                entries[last[item]].down = index;
                last[item] = index;
                items[item].choices += 1;
                option_entries.push(index);
            }
            options.push(option_entries);
        }

        // Close the column rings.
        for item in 0..item_count {
            entries[last[item]].down = item;
            entries[item].up = last[item];
        }

        Matrix {
            item_count,
            items,
            entries,
            options,
            selected: Vec::new(),
            deleted: Vec::new(),
        }
    }

    /// Number of items in the universe to cover.
    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Number of options the matrix was built with.
    pub fn option_count(&self) -> usize {
        self.options.len()
    }

    /// Options forced so far, in forcing order.
    pub fn forced_options(&self) -> &[usize] {
        &self.selected
    }

    /// Render the currently linked part of the matrix as a dense boolean
    /// matrix.
    ///
    /// Rows correspond to all original options in index order; columns to
    /// the currently active items in their ring order. A cell is true iff
    /// the option lists that item and the item is still active. Does not
    /// mutate the matrix.
    pub fn to_matrix(&self) -> Vec<Vec<bool>> {
        let anchor = self.item_count;
        let mut positions = vec![None; self.item_count];
        let mut width = 0;
        let mut item = self.items[anchor].right;
        while item != anchor {
            positions[item] = Some(width);
            width += 1;
            item = self.items[item].right;
        }

        self.options
            .iter()
            .map(|option_entries| {
                let mut row = vec![false; width];
                for &entry in option_entries {
                    if let Some(column) = positions[self.entries[entry].item] {
                        row[column] = true;
                    }
                }
                row
            })
            .collect()
    }

    /// Force the given options into every future solution.
    ///
    /// Each option is covered against the matrix's persistent deletion log,
    /// so searches run afterwards only see the residual problem. Forced
    /// options do not appear in the decision paths those searches produce;
    /// read them back with [`Matrix::forced_options`] to reassemble a full
    /// cover. [`Matrix::unforce_options`] reverses all forcing at once.
    ///
    /// Forcing an option that duplicates an already forced one is harmless.
    /// Forcing an option that was deleted as a *conflict* of an earlier
    /// force operates on a partially detached ring and leaves the residual
    /// problem unspecified; callers are expected to force mutually
    /// compatible options only.
    ///
    /// # Errors
    ///  - [`MatrixError::OptionOutOfRange`] if any index is `>=`
    ///    [`Matrix::option_count`]. No forcing is applied in that case.
    pub fn force_options<I>(&mut self, options: I) -> Result<(), MatrixError>
    where
        I: IntoIterator<Item = usize>,
    {
        let indices: Vec<usize> = options.into_iter().collect();
        for &index in &indices {
            if index >= self.options.len() {
                return Err(MatrixError::OptionOutOfRange {
                    index,
                    option_count: self.options.len(),
                });
            }
        }

        let mut deleted = mem::take(&mut self.deleted);
        for &index in &indices {
            self.selected.push(index);
            self.choose_option(index, &mut deleted);
        }
        self.deleted = deleted;

        Ok(())
    }

    /// Undo every [`Matrix::force_options`] call, restoring the matrix to
    /// its freshly built state.
    pub fn unforce_options(&mut self) {
        // Relink the covered items of each forced option, most recent
        // first, then replay the deletion log backwards.
        let selected = mem::take(&mut self.selected);
        for &option in selected.iter().rev() {
            for position in (0..self.options[option].len()).rev() {
                let item = self.entries[self.options[option][position]].item;
                let (left, right) = (self.items[item].left, self.items[item].right);
                self.items[left].right = item;
                self.items[right].left = item;
            }
        }

        let deleted = mem::take(&mut self.deleted);
        self.restore_options(&deleted);
    }

    /// Cover every item of the given option: unlink the items from the item
    /// ring and delete every other option that covers one of them, logging
    /// deletions into `deleted` in order.
    ///
    /// The log is what makes the matching [`Matrix::unchoose_option`]
    /// possible; it must be kept untouched in between. The option itself
    /// ends up in the log through its own column entries.
    pub(crate) fn choose_option(&mut self, index: usize, deleted: &mut Vec<usize>) {
        for position in 0..self.options[index].len() {
            let item = self.entries[self.options[index][position]].item;

            // Unlink the covered item from the item ring.
            let (left, right) = (self.items[item].left, self.items[item].right);
            self.items[left].right = right;
            self.items[right].left = left;

            // Each item can only be covered once, so every option sharing
            // it has to go. Options already deleted in this step must not
            // be unlinked a second time.
            let mut conflict = self.entries[item].down;
            while conflict != item {
                let option = self.entries[conflict].option;
                if !deleted.contains(&option) {
                    deleted.push(option);
                    for entry_position in 0..self.options[option].len() {
                        let entry = self.options[option][entry_position];
                        let (up, down) = (self.entries[entry].up, self.entries[entry].down);
                        self.entries[up].down = down;
                        self.entries[down].up = up;
                        self.items[self.entries[entry].item].choices -= 1;
                    }
                }
                conflict = self.entries[conflict].down;
            }
        }
    }

    /// The exact reverse of [`Matrix::choose_option`]: relink the option's
    /// items right to left, then restore the logged deletions back to front.
    pub(crate) fn unchoose_option(&mut self, index: usize, deleted: &[usize]) {
        for position in (0..self.options[index].len()).rev() {
            let item = self.entries[self.options[index][position]].item;
            let (left, right) = (self.items[item].left, self.items[item].right);
            self.items[left].right = item;
            self.items[right].left = item;
        }

        self.restore_options(deleted);
    }

    /// Relink the entries of the logged options in reverse log order,
    /// bumping the per-item counters back up.
    pub(crate) fn restore_options(&mut self, deleted: &[usize]) {
        for &option in deleted.iter().rev() {
            for position in 0..self.options[option].len() {
                let entry = self.options[option][position];
                let (up, down) = (self.entries[entry].up, self.entries[entry].down);
                self.entries[up].down = entry;
                self.entries[down].up = entry;
                self.items[self.entries[entry].item].choices += 1;
            }
        }
    }

    /// Pick the next item to branch on: the active item with the fewest
    /// remaining options, leftmost on ties. Returns the item index and the
    /// options covering it in column order, or `None` when no items remain
    /// and the current selection is a complete cover.
    pub(crate) fn next_choices(&self) -> Option<(usize, Vec<usize>)> {
        let anchor = self.item_count;
        let mut best = self.items[anchor].right;
        let mut item = best;
        while item != anchor {
            if self.items[item].choices < self.items[best].choices {
                best = item;
            }
            item = self.items[item].right;
        }

        if best == anchor {
            return None;
        }

        let mut choices = Vec::with_capacity(self.items[best].choices);
        let mut entry = self.entries[best].down;
        while entry != best {
            choices.push(self.entries[entry].option);
            entry = self.entries[entry].down;
        }

        Some((best, choices))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn knuth() -> Matrix {
        Matrix::new(
            7,
            vec![
                vec![2, 4],
                vec![0, 3, 6],
                vec![1, 2, 5],
                vec![0, 3, 5],
                vec![1, 6],
                vec![3, 4, 6],
            ],
        )
        .unwrap()
    }

    #[test]
    #[rustfmt::skip]
    fn build_small_matrix() {
        let matrix = knuth();

        assert_eq!(matrix.item_count(), 7);
        assert_eq!(matrix.option_count(), 6);
        assert_eq!(
            matrix.to_matrix(),
            vec![
                vec![false, false, true,  false, true,  false, false],
                vec![true,  false, false, true,  false, false, true ],
                vec![false, true,  true,  false, false, true,  false],
                vec![true,  false, false, true,  false, true,  false],
                vec![false, true,  false, false, false, false, true ],
                vec![false, false, false, true,  true,  false, true ],
            ]
        );

        let choices: Vec<usize> = (0..7).map(|item| matrix.items[item].choices).collect();
        assert_eq!(choices, vec![2, 2, 2, 3, 2, 2, 3]);
    }

    #[test]
    fn reject_out_of_range_item() {
        assert_eq!(
            Matrix::new(2, vec![vec![0], vec![0, 2]]),
            Err(MatrixError::InvalidItemIndex {
                option: 1,
                item: 2,
                item_count: 2,
            })
        );
    }

    #[test]
    fn from_matrix_matches_direct_construction() {
        let direct = knuth();
        let via_dense = Matrix::from_matrix(&direct.to_matrix());

        assert_eq!(via_dense, direct);
    }

    #[test]
    fn from_matrix_pads_ragged_rows() {
        let matrix = Matrix::from_matrix(&[vec![true], vec![false, true]]);

        assert_eq!(matrix.item_count(), 2);
        assert_eq!(
            matrix.to_matrix(),
            vec![vec![true, false], vec![false, true]]
        );
    }

    #[test]
    fn choose_then_unchoose_restores_every_link() {
        let mut matrix = knuth();
        let snapshot = matrix.clone();

        let mut deleted = Vec::new();
        matrix.choose_option(3, &mut deleted);
        assert_ne!(matrix, snapshot);

        matrix.unchoose_option(3, &deleted);
        assert_eq!(matrix, snapshot);
    }

    #[test]
    fn choose_records_each_conflict_once() {
        let mut matrix = knuth();

        let mut deleted = Vec::new();
        matrix.choose_option(3, &mut deleted);

        // Option 1 conflicts with option 3 on items 0 and 3 but may only be
        // unlinked once.
        assert_eq!(deleted, vec![1, 3, 5, 2]);
    }

    #[test]
    fn next_choices_prefers_fewest_remaining() {
        let matrix = knuth();

        assert_eq!(matrix.next_choices(), Some((0, vec![1, 3])));
    }

    #[test]
    fn next_choices_reports_done_on_empty_ring() {
        let matrix = Matrix::new(0, vec![]).unwrap();

        assert_eq!(matrix.next_choices(), None);
    }

    #[test]
    fn force_out_of_range_option_changes_nothing() {
        let mut matrix = knuth();
        let snapshot = matrix.clone();

        assert_eq!(
            matrix.force_options([0, 6]),
            Err(MatrixError::OptionOutOfRange {
                index: 6,
                option_count: 6,
            })
        );
        assert_eq!(matrix, snapshot);
    }

    #[test]
    fn force_then_unforce_round_trips() {
        let mut matrix = knuth();
        let snapshot = matrix.clone();

        matrix.force_options([0]).unwrap();
        assert_eq!(matrix.forced_options(), &[0]);
        assert_ne!(matrix, snapshot);

        matrix.unforce_options();
        assert_eq!(matrix, snapshot);
    }

    #[test]
    fn unforce_handles_overlapping_forces() {
        let mut matrix = Matrix::new(
            7,
            vec![
                vec![2, 4],
                vec![2, 4],
                vec![0, 3, 6],
                vec![1, 2, 5],
                vec![0, 3, 5],
                vec![0, 3, 5],
                vec![1, 6],
                vec![3, 4, 6],
            ],
        )
        .unwrap();
        let snapshot = matrix.clone();

        // Option 1 duplicates option 0, so the second force re-covers items
        // that are already unlinked.
        matrix.force_options([0, 1]).unwrap();
        matrix.unforce_options();
        assert_eq!(matrix, snapshot);
    }
}
