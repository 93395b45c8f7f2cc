//! Core trait definitions for the evolutionary engine.
//!
//! Three pieces define the contract between the generic loop and
//! domain-specific problem code: [`Individual`] (a genome plus a cached
//! fitness), [`EaProblem`] (initialization, evaluation, variation), and
//! [`Objective`] (the single better-than comparator that orients
//! selection, elitism, and the hall of fame).

use rand::Rng;
use std::cmp::Ordering;

/// Marker trait for fitness values.
///
/// Fitness must support comparison and be cheaply copyable.
/// Built-in implementations exist for `f64` and `f32`.
///
/// Whether lower or higher is better is decided by [`Objective`], not by
/// the fitness type.
pub trait Fitness: PartialOrd + Copy + Send + Sync + std::fmt::Debug + 'static {
    /// Converts the fitness to `f64` for statistics and reporting.
    fn to_f64(self) -> f64;
}

impl Fitness for f64 {
    fn to_f64(self) -> f64 {
        self
    }
}

impl Fitness for f32 {
    fn to_f64(self) -> f64 {
        self as f64
    }
}

/// Optimization direction.
///
/// Every fitness comparison in the engine goes through this enum, so a
/// problem is switched between minimization and maximization by flipping
/// one configuration field rather than negating its fitness function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Objective {
    /// Lower fitness is better.
    #[default]
    Minimize,
    /// Higher fitness is better.
    Maximize,
}

impl Objective {
    /// Returns `true` if fitness `a` is strictly better than `b`.
    ///
    /// NaN is never better than anything (including another NaN).
    pub fn better<F: Fitness>(self, a: F, b: F) -> bool {
        match a.partial_cmp(&b) {
            Some(Ordering::Less) => self == Objective::Minimize,
            Some(Ordering::Greater) => self == Objective::Maximize,
            _ => false,
        }
    }

    /// Total order over optional fitness values, best first.
    ///
    /// Unevaluated (`None`) and NaN fitness rank strictly worst, so
    /// sorting a mixed population never panics and never promotes a
    /// degenerate individual.
    pub fn order<F: Fitness>(self, a: Option<F>, b: Option<F>) -> Ordering {
        match (a, b) {
            (Some(x), Some(y)) => {
                let (x_nan, y_nan) = (x.partial_cmp(&x).is_none(), y.partial_cmp(&y).is_none());
                match (x_nan, y_nan) {
                    (true, true) => Ordering::Equal,
                    (true, false) => Ordering::Greater,
                    (false, true) => Ordering::Less,
                    (false, false) => {
                        let ord = x.partial_cmp(&y).unwrap_or(Ordering::Equal);
                        match self {
                            Objective::Minimize => ord,
                            Objective::Maximize => ord.reverse(),
                        }
                    }
                }
            }
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}

/// A candidate solution in the population.
///
/// Individuals own their genome and carry a cached fitness value that is
/// `None` until the engine evaluates them. The engine only calls
/// [`EaProblem::evaluate`] for individuals whose cache is empty, and it
/// clears the cache of any offspring touched by crossover or mutation —
/// evaluation is typically the most expensive step, so an unchanged
/// clone must never be re-evaluated.
///
/// # Implementing
///
/// ```ignore
/// #[derive(Clone)]
/// struct BitString {
///     bits: Vec<bool>,
///     fitness: Option<f64>,
/// }
///
/// impl Individual for BitString {
///     type Fitness = f64;
///     fn fitness(&self) -> Option<f64> { self.fitness }
///     fn set_fitness(&mut self, f: f64) { self.fitness = Some(f); }
///     fn clear_fitness(&mut self) { self.fitness = None; }
///     fn same_genome(&self, other: &Self) -> bool { self.bits == other.bits }
/// }
/// ```
pub trait Individual: Clone + Send + Sync {
    /// The fitness type. Must implement [`Fitness`].
    type Fitness: Fitness;

    /// Returns the cached fitness, or `None` if not yet evaluated.
    fn fitness(&self) -> Option<Self::Fitness>;

    /// Stores an evaluated fitness. Called by the engine after evaluation.
    fn set_fitness(&mut self, fitness: Self::Fitness);

    /// Invalidates the cached fitness. Called by the engine after the
    /// genome is changed by a variation operator.
    fn clear_fitness(&mut self);

    /// Returns `true` if `other` carries a structurally identical genome.
    ///
    /// Fitness is excluded from the comparison. Used by the hall of fame
    /// to deduplicate entries.
    fn same_genome(&self, other: &Self) -> bool;

    /// Optional secondary measure recorded in the logbook's "size"
    /// chapter (e.g., tree node count for GP genomes).
    ///
    /// The default reports no size; fixed-length genomes rarely need one.
    fn genome_size(&self) -> Option<usize> {
        None
    }
}

/// Defines an evolutionary optimization problem.
///
/// This is the trait users implement to plug domain logic into the
/// generic engine:
///
/// 1. **Initialization**: how to create random individuals
/// 2. **Evaluation**: how to compute fitness (pure, per individual)
/// 3. **Crossover**: how to recombine two parents
/// 4. **Mutation**: how to perturb an individual
///
/// # Thread safety
///
/// `EaProblem` must be `Send + Sync` because the engine may evaluate
/// individuals in parallel using rayon. Evaluation must not share mutable
/// state across individuals.
///
/// # Evaluation errors
///
/// `evaluate` returns a plain fitness, never a `Result`: domain errors
/// (a GP tree dividing by zero, a non-finite objective value) must be
/// absorbed into a penalized or capped fitness by the implementation, so
/// the loop always runs to its configured termination.
pub trait EaProblem: Send + Sync {
    /// The individual (solution) type for this problem.
    type Individual: Individual;

    /// Creates a random individual with no fitness set.
    fn create_individual<R: Rng>(&self, rng: &mut R) -> Self::Individual;

    /// Evaluates an individual and returns its fitness.
    ///
    /// Called only for individuals without a cached fitness, possibly in
    /// parallel across the population.
    fn evaluate(&self, individual: &Self::Individual) -> <Self::Individual as Individual>::Fitness;

    /// Produces one or two offspring by recombining two parents.
    ///
    /// Parents are copies; implementations may consume or ignore them.
    /// The engine clears the fitness cache of whatever is returned.
    ///
    /// The default implementation clones `parent1` (no crossover).
    fn crossover<R: Rng>(
        &self,
        parent1: &Self::Individual,
        _parent2: &Self::Individual,
        _rng: &mut R,
    ) -> Vec<Self::Individual> {
        vec![parent1.clone()]
    }

    /// Mutates an individual in place.
    ///
    /// The engine clears the fitness cache afterwards. The default
    /// implementation is a no-op.
    fn mutate<R: Rng>(&self, _individual: &mut Self::Individual, _rng: &mut R) {}

    /// Called at the end of each generation with the best fitness so far.
    ///
    /// Useful for logging or adaptive parameter control. The default
    /// implementation is a no-op.
    fn on_generation(
        &self,
        _generation: usize,
        _best_fitness: <Self::Individual as Individual>::Fitness,
    ) {
    }
}
