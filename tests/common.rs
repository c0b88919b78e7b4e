use dlx_matrix::{Matrix, Step};

/// A worked exact cover instance together with the exact solver output it
/// must produce.
pub struct Example {
    pub item_count: usize,
    pub options: Vec<Vec<usize>>,
    pub solutions: Vec<Vec<Step>>,
}

impl Example {
    pub fn matrix(&self) -> Matrix {
        Matrix::new(self.item_count, self.options.clone()).expect("example options are in range")
    }

    /// The dense boolean form of the full problem.
    pub fn dense(&self) -> Vec<Vec<bool>> {
        self.options
            .iter()
            .map(|option| {
                let mut row = vec![false; self.item_count];
                for &item in option {
                    row[item] = true;
                }
                row
            })
            .collect()
    }
}

pub fn step(item: usize, option: usize, choices: &[usize]) -> Step {
    Step {
        item,
        option,
        choices: choices.to_vec(),
    }
}

/// Knuth's introductory exact cover problem, with a unique solution.
#[allow(dead_code)]
pub fn classic() -> Example {
    Example {
        item_count: 7,
        options: vec![
            vec![2, 4],
            vec![0, 3, 6],
            vec![1, 2, 5],
            vec![0, 3, 5],
            vec![1, 6],
            vec![3, 4, 6],
        ],
        solutions: vec![vec![
            step(0, 3, &[1, 3]),
            step(1, 4, &[4]),
            step(2, 0, &[0]),
        ]],
    }
}

/// The classic problem with options 0 and 3 duplicated, giving four
/// solutions.
#[allow(dead_code)]
pub fn classic_duplicates() -> Example {
    Example {
        item_count: 7,
        options: vec![
            vec![2, 4],
            vec![2, 4],
            vec![0, 3, 6],
            vec![1, 2, 5],
            vec![0, 3, 5],
            vec![0, 3, 5],
            vec![1, 6],
            vec![3, 4, 6],
        ],
        solutions: vec![
            vec![
                step(1, 6, &[3, 6]),
                step(0, 4, &[4, 5]),
                step(2, 0, &[0, 1]),
            ],
            vec![
                step(1, 6, &[3, 6]),
                step(0, 4, &[4, 5]),
                step(2, 1, &[0, 1]),
            ],
            vec![
                step(1, 6, &[3, 6]),
                step(0, 5, &[4, 5]),
                step(2, 0, &[0, 1]),
            ],
            vec![
                step(1, 6, &[3, 6]),
                step(0, 5, &[4, 5]),
                step(2, 1, &[0, 1]),
            ],
        ],
    }
}

/// Two overlapping options that cannot cover three items.
#[allow(dead_code)]
pub fn impossible() -> Example {
    Example {
        item_count: 3,
        options: vec![vec![0, 1], vec![1, 2]],
        solutions: vec![],
    }
}

/// Nothing to cover: the empty selection is the one solution.
#[allow(dead_code)]
pub fn trivial() -> Example {
    Example {
        item_count: 0,
        options: vec![],
        solutions: vec![vec![]],
    }
}

#[allow(dead_code)]
pub fn all() -> Vec<Example> {
    vec![classic(), classic_duplicates(), impossible(), trivial()]
}
