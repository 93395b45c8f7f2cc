//! Engine configuration.
//!
//! [`EaConfig`] holds all parameters that control the evolutionary loop.

use super::selection::Selection;
use super::types::Objective;

/// Configuration for the evolutionary engine.
///
/// Controls population size, optimization direction, selection strategy,
/// operator rates, elitism, hall-of-fame capacity, and termination.
///
/// # Defaults
///
/// ```
/// use evokit::engine::EaConfig;
///
/// let config = EaConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.max_generations, 500);
/// ```
///
/// # Builder pattern
///
/// ```
/// use evokit::engine::{EaConfig, Objective, Selection};
///
/// let config = EaConfig::default()
///     .with_population_size(200)
///     .with_objective(Objective::Maximize)
///     .with_selection(Selection::Tournament(5))
///     .with_elitism(2)
///     .with_mutation_rate(0.1);
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EaConfig {
    /// Number of individuals in the population.
    ///
    /// Constant across generations: every replacement step produces
    /// exactly this many individuals. Typical range: 50–500.
    pub population_size: usize,

    /// Maximum number of generations before termination.
    pub max_generations: usize,

    /// Optimization direction. Defaults to minimization.
    pub objective: Objective,

    /// Selection strategy for choosing parents.
    pub selection: Selection,

    /// Number of best previous-generation individuals that displace the
    /// worst offspring before replacement.
    ///
    /// With `elitism >= 1` the best fitness in the population never
    /// regresses between generations. `0` gives plain generational
    /// replacement with no such guarantee (the hall of fame still tracks
    /// the best-ever individual either way).
    pub elitism: usize,

    /// Probability of applying crossover to a pair of parents (0.0–1.0).
    ///
    /// A pair that skips crossover passes through as parent clones,
    /// keeping their cached fitness.
    pub crossover_rate: f64,

    /// Probability of applying mutation to an offspring (0.0–1.0).
    ///
    /// Applied independently of crossover: an individual can undergo
    /// both, either, or neither in one generation.
    pub mutation_rate: f64,

    /// Capacity of the hall of fame (best-ever archive).
    pub hof_capacity: usize,

    /// Number of generations with no significant improvement before stopping.
    ///
    /// Set to 0 to disable stagnation-based termination.
    pub stagnation_limit: usize,

    /// Minimum relative improvement to reset the stagnation counter.
    ///
    /// When a new best fitness is found, the improvement ratio is computed
    /// as `|old - new| / |old|`. If this ratio is below
    /// `convergence_threshold`, the generation still counts as stagnating.
    ///
    /// Set to 0.0 to count any improvement (the default).
    pub convergence_threshold: f64,

    /// Whether to evaluate individuals in parallel using rayon.
    pub parallel: bool,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Optional wall-clock time limit in milliseconds.
    ///
    /// Checked at the start of each generation, so the actual runtime may
    /// exceed the limit by one generation's worth of work.
    ///
    /// `None` disables time-based termination (the default).
    pub time_limit_ms: Option<u64>,
}

impl Default for EaConfig {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 500,
            objective: Objective::Minimize,
            selection: Selection::default(),
            elitism: 1,
            crossover_rate: 0.9,
            mutation_rate: 0.1,
            hof_capacity: 1,
            stagnation_limit: 0,
            convergence_threshold: 0.0,
            parallel: true,
            seed: None,
            time_limit_ms: None,
        }
    }
}

impl EaConfig {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the maximum number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the optimization direction.
    pub fn with_objective(mut self, objective: Objective) -> Self {
        self.objective = objective;
        self
    }

    /// Sets the selection strategy.
    pub fn with_selection(mut self, sel: Selection) -> Self {
        self.selection = sel;
        self
    }

    /// Convenience builder for tournament selection with size `k`.
    ///
    /// Equivalent to `.with_selection(Selection::Tournament(k))`.
    pub fn with_tournament_size(self, k: usize) -> Self {
        self.with_selection(Selection::Tournament(k))
    }

    /// Sets the elitism count.
    pub fn with_elitism(mut self, k: usize) -> Self {
        self.elitism = k;
        self
    }

    /// Sets the crossover rate.
    pub fn with_crossover_rate(mut self, rate: f64) -> Self {
        self.crossover_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the mutation rate.
    pub fn with_mutation_rate(mut self, rate: f64) -> Self {
        self.mutation_rate = rate.clamp(0.0, 1.0);
        self
    }

    /// Sets the hall-of-fame capacity.
    pub fn with_hof_capacity(mut self, capacity: usize) -> Self {
        self.hof_capacity = capacity;
        self
    }

    /// Sets the stagnation limit (0 to disable).
    pub fn with_stagnation_limit(mut self, limit: usize) -> Self {
        self.stagnation_limit = limit;
        self
    }

    /// Sets the convergence threshold.
    ///
    /// The stagnation counter is only reset when the relative improvement
    /// exceeds this threshold: `|old - new| / |old| >= threshold`.
    pub fn with_convergence_threshold(mut self, threshold: f64) -> Self {
        self.convergence_threshold = threshold.max(0.0);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets the wall-clock time limit in milliseconds.
    pub fn with_time_limit_ms(mut self, ms: u64) -> Self {
        self.time_limit_ms = Some(ms);
        self
    }

    /// Validates the configuration.
    ///
    /// Returns `Err` with a description if any parameter is invalid.
    /// Called by the runner before any generation executes, so a bad
    /// configuration is the only failure a caller ever observes.
    pub fn validate(&self) -> Result<(), String> {
        if self.population_size < 2 {
            return Err("population_size must be at least 2".into());
        }
        if self.max_generations == 0 {
            return Err("max_generations must be at least 1".into());
        }
        if self.elitism >= self.population_size {
            return Err("elitism must be smaller than population_size".into());
        }
        if self.hof_capacity == 0 {
            return Err("hof_capacity must be at least 1".into());
        }
        if !(0.0..=1.0).contains(&self.crossover_rate) {
            return Err("crossover_rate must be within [0, 1]".into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err("mutation_rate must be within [0, 1]".into());
        }
        if let Selection::Tournament(k) = self.selection {
            if k == 0 {
                return Err("tournament size must be at least 1".into());
            }
        }
        if self.selection == Selection::Roulette && self.objective == Objective::Minimize {
            return Err(
                "roulette selection is fitness-proportionate and incompatible with \
                 minimization; transform the fitness or use Tournament/Rank"
                    .into(),
            );
        }
        if self.convergence_threshold < 0.0 {
            return Err("convergence_threshold must be non-negative".into());
        }
        if self.time_limit_ms == Some(0) {
            return Err("time_limit_ms must be positive or None".into());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EaConfig::default();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 500);
        assert_eq!(config.objective, Objective::Minimize);
        assert_eq!(config.selection, Selection::Tournament(3));
        assert_eq!(config.elitism, 1);
        assert!((config.crossover_rate - 0.9).abs() < 1e-10);
        assert!((config.mutation_rate - 0.1).abs() < 1e-10);
        assert_eq!(config.hof_capacity, 1);
        assert_eq!(config.stagnation_limit, 0);
        assert!(config.parallel);
        assert!(config.seed.is_none());
        assert!(config.time_limit_ms.is_none());
    }

    #[test]
    fn test_builder_pattern() {
        let config = EaConfig::default()
            .with_population_size(200)
            .with_max_generations(1000)
            .with_objective(Objective::Maximize)
            .with_selection(Selection::Rank)
            .with_elitism(5)
            .with_crossover_rate(0.8)
            .with_mutation_rate(0.05)
            .with_hof_capacity(10)
            .with_stagnation_limit(100)
            .with_parallel(false)
            .with_seed(42);

        assert_eq!(config.population_size, 200);
        assert_eq!(config.max_generations, 1000);
        assert_eq!(config.objective, Objective::Maximize);
        assert_eq!(config.selection, Selection::Rank);
        assert_eq!(config.elitism, 5);
        assert!((config.crossover_rate - 0.8).abs() < 1e-10);
        assert!((config.mutation_rate - 0.05).abs() < 1e-10);
        assert_eq!(config.hof_capacity, 10);
        assert_eq!(config.stagnation_limit, 100);
        assert!(!config.parallel);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_validate_ok() {
        assert!(EaConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_population_too_small() {
        let config = EaConfig::default().with_population_size(1);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_generations() {
        let config = EaConfig::default().with_max_generations(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_elitism_too_high() {
        let config = EaConfig::default().with_population_size(10).with_elitism(10);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_hof_capacity() {
        let config = EaConfig::default().with_hof_capacity(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_tournament() {
        let config = EaConfig::default().with_tournament_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_roulette_minimize_rejected() {
        let config = EaConfig::default()
            .with_selection(Selection::Roulette)
            .with_objective(Objective::Minimize);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_roulette_maximize_ok() {
        let config = EaConfig::default()
            .with_selection(Selection::Roulette)
            .with_objective(Objective::Maximize);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_clamp_rates() {
        let config = EaConfig::default()
            .with_crossover_rate(-0.5)
            .with_mutation_rate(2.0);

        assert!((config.crossover_rate - 0.0).abs() < 1e-10);
        assert!((config.mutation_rate - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_validate_out_of_range_rates() {
        let mut config = EaConfig::default();
        config.mutation_rate = 1.5;
        assert!(config.validate().is_err());

        let mut config = EaConfig::default();
        config.crossover_rate = -0.1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_zero_time_limit() {
        let config = EaConfig::default().with_time_limit_ms(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_convergence_threshold_clamps_negative() {
        let config = EaConfig::default().with_convergence_threshold(-0.5);
        assert!((config.convergence_threshold - 0.0).abs() < 1e-15);
    }
}
