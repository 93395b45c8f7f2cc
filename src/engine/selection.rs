//! Parent selection strategies.
//!
//! Selection chooses, with replacement, which individuals become parents
//! for the next generation. Different strategies apply different
//! selection pressure.
//!
//! # References
//!
//! - Blickle & Thiele (1996), "A Comparison of Selection Schemes used in
//!   Evolutionary Algorithms"
//! - Baker (1985), "Adaptive Selection Methods for Genetic Algorithms"

use super::types::{Fitness, Individual, Objective};
use rand::Rng;

/// Selection strategy for choosing parents.
///
/// All strategies are direction-aware: the [`Objective`] passed to
/// [`select`](Selection::select) decides which fitness is better.
///
/// # Examples
///
/// ```
/// use evokit::engine::Selection;
///
/// // Tournament with size 3 (moderate selection pressure)
/// let sel = Selection::Tournament(3);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Selection {
    /// Tournament selection: pick `k` individuals at random, select the best.
    ///
    /// Higher `k` = stronger selection pressure.
    /// - k=2: light pressure (good for diversity)
    /// - k=3-5: moderate pressure (typical default)
    /// - k>5: strong pressure (risk of premature convergence)
    ///
    /// # Complexity
    /// O(k) per selection
    Tournament(usize),

    /// Fitness-proportionate (roulette wheel) selection.
    ///
    /// Each individual's selection probability is proportional to its raw
    /// fitness value, which only makes sense for **maximization over
    /// strictly positive fitness**. This is a well-known footgun and is
    /// deliberately not patched over: zero or negative fitness values are
    /// a contract violation (panic), and
    /// [`EaConfig::validate`](super::EaConfig::validate) rejects roulette
    /// for minimization problems outright. Callers whose fitness can be
    /// non-positive must shift or transform it themselves, or use
    /// [`Tournament`](Selection::Tournament) / [`Rank`](Selection::Rank).
    ///
    /// # Complexity
    /// O(n) per selection (linear scan)
    Roulette,

    /// Rank-based selection.
    ///
    /// Individuals are ordered by fitness and selection probability is
    /// proportional to rank position, not raw fitness value. This avoids
    /// the scaling problems of roulette wheel selection and works for
    /// either objective direction.
    ///
    /// # Complexity
    /// O(n log n) per selection (sort), O(n) scan
    Rank,
}

impl Default for Selection {
    fn default() -> Self {
        Selection::Tournament(3)
    }
}

impl Selection {
    /// Selects a parent index from an evaluated population.
    ///
    /// The source population is never mutated; the caller clones the
    /// individual at the returned index.
    ///
    /// # Panics
    ///
    /// Panics if `population` is empty, or if [`Roulette`](Selection::Roulette)
    /// encounters an unevaluated individual or a fitness that is not
    /// strictly positive.
    pub fn select<I: Individual, R: Rng>(
        &self,
        population: &[I],
        objective: Objective,
        rng: &mut R,
    ) -> usize {
        assert!(!population.is_empty(), "cannot select from empty population");

        match self {
            Selection::Tournament(k) => tournament(population, objective, *k, rng),
            Selection::Roulette => roulette(population, rng),
            Selection::Rank => rank(population, objective, rng),
        }
    }
}

/// Tournament selection: k uniform draws with replacement, best wins.
fn tournament<I: Individual, R: Rng>(
    population: &[I],
    objective: Objective,
    k: usize,
    rng: &mut R,
) -> usize {
    let k = k.max(1);
    let n = population.len();

    let mut best_idx = rng.random_range(0..n);
    for _ in 1..k {
        let idx = rng.random_range(0..n);
        if objective
            .order(population[idx].fitness(), population[best_idx].fitness())
            .is_lt()
        {
            best_idx = idx;
        }
    }
    best_idx
}

/// Roulette wheel over raw fitness weights.
///
/// Requires strictly positive fitness (see [`Selection::Roulette`]).
fn roulette<I: Individual, R: Rng>(population: &[I], rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    let weights: Vec<f64> = population
        .iter()
        .map(|ind| {
            let w = ind
                .fitness()
                .expect("roulette selection requires an evaluated population")
                .to_f64();
            assert!(
                w > 0.0,
                "roulette selection requires strictly positive fitness, got {w}; \
                 shift the fitness or use Tournament/Rank selection"
            );
            w
        })
        .collect();

    let total: f64 = weights.iter().sum();
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;
    for (i, &w) in weights.iter().enumerate() {
        cumulative += w;
        if cumulative > threshold {
            return i;
        }
    }

    n - 1 // floating-point fallback
}

/// Rank-based selection using linear ranking.
fn rank<I: Individual, R: Rng>(population: &[I], objective: Objective, rng: &mut R) -> usize {
    let n = population.len();
    if n == 1 {
        return 0;
    }

    // Sort indices best-first by objective order.
    let mut indexed: Vec<usize> = (0..n).collect();
    indexed.sort_by(|&a, &b| objective.order(population[a].fitness(), population[b].fitness()));

    // Linear ranking: rank 0 (best) gets weight n, the worst gets 1.
    let total: f64 = (n * (n + 1)) as f64 / 2.0;
    let threshold = rng.random_range(0.0..total);
    let mut cumulative = 0.0;

    for (rank_pos, &original_idx) in indexed.iter().enumerate() {
        let weight = (n - rank_pos) as f64;
        cumulative += weight;
        if cumulative > threshold {
            return original_idx;
        }
    }

    *indexed.last().expect("population has n >= 2 elements")
}
