pub fn triple_iter(limits: [usize; 3]) -> impl Iterator<Item = [usize; 3]> {
    (0..limits[0]).flat_map(move |first| {
        (0..limits[1])
            .flat_map(move |second| (0..limits[2]).map(move |third| [first, second, third]))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn triples_are_lexicographic() {
        let triples: Vec<_> = triple_iter([2, 2, 2]).collect();

        assert_eq!(
            triples,
            vec![
                [0, 0, 0],
                [0, 0, 1],
                [0, 1, 0],
                [0, 1, 1],
                [1, 0, 0],
                [1, 0, 1],
                [1, 1, 0],
                [1, 1, 1],
            ]
        );
    }
}
