use rand::Rng;
use rand::seq::SliceRandom;

use quiz_core::model::{Question, ShuffledQuestion};

/// Put a question's options in random order and record where the correct one
/// landed.
///
/// The permutation is uniform over all `n!` orderings for a uniform `rng`.
pub fn shuffle<R: Rng + ?Sized>(question: &Question, rng: &mut R) -> ShuffledQuestion {
    let options = question.options();

    // Index 0 of `options` is the correct option.
    let mut order: Vec<usize> = (0..options.len()).collect();
    order.shuffle(rng);
    let correct_index = order.iter().position(|&i| i == 0).unwrap_or_default();

    let incorrect = order
        .iter()
        .filter(|&&i| i != 0)
        .filter_map(|&i| options.get(i).cloned())
        .collect();

    ShuffledQuestion::new(
        question.prompt(),
        question.correct_option(),
        incorrect,
        correct_index,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::QuestionDraft;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    fn question() -> Question {
        QuestionDraft::new("Capital of France?", "Paris", ["Rome", "Madrid", "Berlin"])
            .validate()
            .unwrap()
    }

    #[test]
    fn shuffled_options_are_a_permutation() {
        let question = question();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let shuffled = shuffle(&question, &mut rng);
            let mut got: Vec<_> = shuffled.options().to_vec();
            let mut expected = question.options();
            got.sort();
            expected.sort();
            assert_eq!(got, expected);
            assert_eq!(shuffled.correct_option(), "Paris");
            assert_eq!(shuffled.prompt(), question.prompt());
        }
    }

    #[test]
    fn every_ordering_is_reachable_and_roughly_even() {
        let question = QuestionDraft::new("Q", "A", ["B", "C"]).validate().unwrap();
        let mut rng = StdRng::seed_from_u64(42);
        let mut counts: HashMap<Vec<String>, usize> = HashMap::new();

        for _ in 0..6_000 {
            let shuffled = shuffle(&question, &mut rng);
            *counts.entry(shuffled.options().to_vec()).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        for count in counts.values() {
            assert!((800..=1_200).contains(count), "skewed count {count}");
        }
    }

    #[test]
    fn single_option_question_is_trivially_shuffled() {
        let question = QuestionDraft::new("Q", "only", Vec::<String>::new())
            .validate()
            .unwrap();
        let shuffled = shuffle(&question, &mut StdRng::seed_from_u64(1));
        assert_eq!(shuffled.options(), ["only".to_string()]);
        assert_eq!(shuffled.correct_index(), 0);
    }

    #[test]
    fn same_seed_gives_same_order() {
        let question = question();
        let a = shuffle(&question, &mut StdRng::seed_from_u64(9));
        let b = shuffle(&question, &mut StdRng::seed_from_u64(9));
        assert_eq!(a, b);
    }
}
