//! Random word selection for flashcard games.
//!
//! The input is copied and shuffled with `SliceRandom::shuffle` (Fisher-Yates), so with a
//! uniform random source every permutation is equally likely. The caller's slice is never touched.

use rand::Rng;
use rand::seq::SliceRandom;

/// Returns up to `count` elements of `items` in random order, each element at most once.
pub fn sample<T: Clone, R: Rng + ?Sized>(items: &[T], count: usize, rng: &mut R) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(rng);
    shuffled.truncate(count);
    shuffled
}

/// `sample` driven by the thread-local generator.
pub fn sample_random<T: Clone>(items: &[T], count: usize) -> Vec<T> {
    sample(items, count, &mut rand::rng())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    #[test]
    fn test_sample_length_is_bounded() {
        let mut rng = StdRng::seed_from_u64(7);
        let items: Vec<u32> = (0..8).collect();

        assert_eq!(sample(&items, 5, &mut rng).len(), 5);
        assert_eq!(sample(&items, 20, &mut rng).len(), 8);
        assert_eq!(sample(&items, 0, &mut rng).len(), 0);
    }

    #[test]
    fn test_sample_is_a_permutation_subset() {
        let mut rng = StdRng::seed_from_u64(42);
        let items: Vec<u32> = (0..20).collect();

        let mut picked = sample(&items, 20, &mut rng);
        picked.sort();
        assert_eq!(picked, items);

        let partial = sample(&items, 10, &mut rng);
        let mut unique = partial.clone();
        unique.sort();
        unique.dedup();
        assert_eq!(unique.len(), 10);
        assert!(partial.iter().all(|x| items.contains(x)));
    }

    #[test]
    fn test_input_is_not_mutated() {
        let mut rng = StdRng::seed_from_u64(1);
        let items = vec!["a", "b", "c", "d"];
        let _ = sample(&items, 2, &mut rng);
        assert_eq!(items, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_empty_input_gives_empty_sample() {
        let items: Vec<u32> = Vec::new();
        assert!(sample_random(&items, 10).is_empty());
    }

    #[test]
    fn test_all_orders_show_up() {
        // 3 elements have 6 orders; 6000 draws leave each around 1000.
        let mut rng = StdRng::seed_from_u64(2024);
        let items = [1, 2, 3];
        let mut counts: HashMap<Vec<i32>, usize> = HashMap::new();

        for _ in 0..6000 {
            *counts.entry(sample(&items, 3, &mut rng)).or_default() += 1;
        }

        assert_eq!(counts.len(), 6);
        assert!(counts.values().all(|&c| c > 800 && c < 1200));
    }
}
