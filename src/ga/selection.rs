//! Parent selection strategies.
//!
//! Both strategies minimize fitness. Equal fitness values are ordered by
//! population index, lower first, so a run never depends on sort
//! instability.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use std::cmp::Ordering;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::types::Individual;

/// Selection strategy for choosing parents.
///
/// # Examples
///
/// ```
/// use u_cvrp::ga::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
/// assert_eq!(sel, Selection::default());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Selection {
    /// Pick `k` individuals uniformly with replacement and keep the best.
    ///
    /// Higher `k` means stronger selection pressure. `k = 0` is rejected by
    /// [`GaConfig::validate`](super::GaConfig::validate).
    Tournament(usize),

    /// Linear ranking: the i-th best of n individuals is drawn with weight
    /// `n - i`.
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a parent index from `population`.
    ///
    /// # Panics
    ///
    /// Panics if `population` is empty.
    pub fn select<I: Individual, R: Rng>(&self, population: &[I], rng: &mut R) -> usize {
        assert!(
            !population.is_empty(),
            "cannot select from empty population"
        );

        match self {
            Selection::Tournament(k) => tournament(population, *k, rng),
            Selection::Rank => rank(population, rng),
        }
    }
}

/// Compares by fitness, then by index.
fn better<I: Individual>(population: &[I], a: usize, b: usize) -> Ordering {
    population[a]
        .fitness()
        .total_cmp(&population[b].fitness())
        .then(a.cmp(&b))
}

fn tournament<I: Individual, R: Rng>(population: &[I], k: usize, rng: &mut R) -> usize {
    let n = population.len();
    let mut best = rng.random_range(0..n);
    for _ in 1..k.max(1) {
        let idx = rng.random_range(0..n);
        if better(population, idx, best) == Ordering::Less {
            best = idx;
        }
    }
    best
}

fn rank<I: Individual, R: Rng>(population: &[I], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let mut order: Vec<usize> = (0..n).collect();
    order.sort_by(|&a, &b| better(population, a, b));

    // weight of rank r is n - r; total = n(n+1)/2
    let total = n * (n + 1) / 2;
    let mut threshold = rng.random_range(0..total);
    for (r, &idx) in order.iter().enumerate() {
        let weight = n - r;
        if threshold < weight {
            return idx;
        }
        threshold -= weight;
    }

    order[n - 1]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[derive(Clone)]
    struct TestInd {
        fit: f64,
    }

    impl Individual for TestInd {
        fn fitness(&self) -> f64 {
            self.fit
        }
        fn set_fitness(&mut self, f: f64) {
            self.fit = f;
        }
    }

    fn make_population(fitnesses: &[f64]) -> Vec<TestInd> {
        fitnesses.iter().map(|&f| TestInd { fit: f }).collect()
    }

    #[test]
    fn test_tournament_favors_best() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        let n = 10000;
        for _ in 0..n {
            let idx = Selection::Tournament(4).select(&pop, &mut rng);
            counts[idx] += 1;
        }
        // 1 - (3/4)^4 ≈ 0.68
        let best_count = counts[2];
        assert!(
            best_count > 6000,
            "expected best to be selected >60% of the time, got {best_count}/{n}"
        );
    }

    #[test]
    fn test_tournament_size_1_is_uniform() {
        let pop = make_population(&[10.0, 5.0, 1.0, 8.0]);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[Selection::Tournament(1).select(&pop, &mut rng)] += 1;
        }
        for &c in &counts {
            assert!(c > 1500, "expected uniform, got counts: {counts:?}");
        }
    }

    #[test]
    fn test_tournament_tie_prefers_lower_index() {
        let pop = make_population(&[5.0, 5.0, 5.0, 5.0]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[Selection::Tournament(2).select(&pop, &mut rng)] += 1;
        }
        // P(i) = ((4-i)² - (3-i)²)/16 → 7/16, 5/16, 3/16, 1/16
        assert!(counts[0] > counts[1]);
        assert!(counts[1] > counts[2]);
        assert!(counts[2] > counts[3]);
    }

    #[test]
    fn test_rank_favors_best() {
        let pop = make_population(&[100.0, 50.0, 1.0, 80.0]);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let mut counts = [0u32; 4];
        for _ in 0..10000 {
            counts[Selection::Rank.select(&pop, &mut rng)] += 1;
        }
        // weights 4:3:2:1 for indices 2, 1, 3, 0
        assert!(counts[2] > counts[1]);
        assert!(counts[1] > counts[3]);
        assert!(counts[3] > counts[0]);
    }

    #[test]
    fn test_single_individual() {
        let pop = make_population(&[5.0]);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        assert_eq!(Selection::Tournament(3).select(&pop, &mut rng), 0);
        assert_eq!(Selection::Rank.select(&pop, &mut rng), 0);
    }

    #[test]
    fn test_serde_round_trip() {
        for sel in [Selection::Tournament(5), Selection::Rank] {
            let json = serde_json::to_string(&sel).expect("serializes");
            let back: Selection = serde_json::from_str(&json).expect("deserializes");
            assert_eq!(back, sel);
        }
    }

    #[test]
    #[should_panic(expected = "cannot select from empty population")]
    fn test_empty_population_panics() {
        let pop: Vec<TestInd> = vec![];
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        Selection::Tournament(3).select(&pop, &mut rng);
    }
}
