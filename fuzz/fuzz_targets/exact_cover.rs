#![no_main]

use dlx_matrix::Matrix;
use libfuzzer_sys::fuzz_target;
use std::ops::ControlFlow;

#[derive(Debug)]
struct Problem {
    item_count: usize,
    options: Vec<Vec<usize>>,
}

impl<'a> arbitrary::Arbitrary<'a> for Problem {
    fn arbitrary(u: &mut arbitrary::Unstructured<'a>) -> arbitrary::Result<Self> {
        // Keep instances small so full enumeration stays cheap.
        let item_count = usize::from(u.arbitrary::<u8>()?) % 7;
        let option_count = usize::from(u.arbitrary::<u8>()?) % 12;

        let mut options = Vec::with_capacity(option_count);
        for _ in 0..option_count {
            let length = usize::from(u.arbitrary::<u8>()?) % (item_count + 1);
            let mut option = Vec::with_capacity(length);
            for _ in 0..length {
                option.push(usize::from(u.arbitrary::<u8>()?) % item_count.max(1));
            }
            option.sort_unstable();
            option.dedup();
            options.push(option);
        }

        Ok(Problem {
            item_count,
            options,
        })
    }
}

fuzz_target!(|problem: Problem| {
    let mut matrix = match Matrix::new(problem.item_count, problem.options.clone()) {
        Ok(matrix) => matrix,
        Err(_) => return,
    };
    let before = matrix.to_matrix();

    for solution in matrix.all_solutions() {
        let mut covered = vec![0usize; problem.item_count];
        for step in &solution {
            assert!(step.choices.contains(&step.option));
            for &item in &problem.options[step.option] {
                covered[item] += 1;
            }
        }
        assert!(covered.iter().all(|&count| count == 1));
    }

    // A full enumeration must leave the matrix exactly as it found it.
    assert_eq!(matrix.to_matrix(), before);

    // So must an abandoned one.
    matrix.generate_solutions(|_| ControlFlow::Break(()));
    assert_eq!(matrix.to_matrix(), before);
});
