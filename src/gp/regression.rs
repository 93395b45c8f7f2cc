//! Symbolic regression as an [`EaProblem`].
//!
//! The genome is an expression tree; fitness is the mean squared error
//! of the compiled tree against target values over a fixed sample set,
//! capped at a configurable ceiling so that a degenerate tree (overflow,
//! NaN) penalizes itself without ever crashing the run or blowing up
//! selection pressure.

use super::compile;
use super::generate::{generate_tree, InitMethod};
use super::primitives::PrimitiveSet;
use super::tree::Tree;
use super::variation::{limit_height, subtree_crossover, subtree_mutation};
use crate::engine::{EaProblem, Individual};
use rand::Rng;

/// A tree genome with its cached fitness.
#[derive(Debug, Clone)]
pub struct TreeIndividual {
    /// The expression tree.
    pub tree: Tree,
    fitness: Option<f64>,
}

impl TreeIndividual {
    /// Wraps a tree with no fitness set.
    pub fn new(tree: Tree) -> Self {
        Self {
            tree,
            fitness: None,
        }
    }
}

impl Individual for TreeIndividual {
    type Fitness = f64;

    fn fitness(&self) -> Option<f64> {
        self.fitness
    }

    fn set_fitness(&mut self, fitness: f64) {
        self.fitness = Some(fitness);
    }

    fn clear_fitness(&mut self) {
        self.fitness = None;
    }

    fn same_genome(&self, other: &Self) -> bool {
        self.tree == other.tree
    }

    fn genome_size(&self) -> Option<usize> {
        Some(self.tree.size())
    }
}

/// Symbolic-regression problem: evolve a tree matching target samples.
///
/// # Examples
///
/// ```
/// use evokit::gp::{PrimitiveSet, SymbolicRegression};
///
/// let pset = PrimitiveSet::new(1).with_ephemeral(-1.0, 1.0);
/// let xs: Vec<f64> = (-10..=10).map(|i| f64::from(i) / 10.0).collect();
/// let problem = SymbolicRegression::from_fn(pset, |x| x * x + x, &xs).unwrap();
/// ```
#[derive(Debug, Clone)]
pub struct SymbolicRegression {
    pset: PrimitiveSet,
    samples: Vec<(Vec<f64>, f64)>,
    init_min_depth: usize,
    init_max_depth: usize,
    mut_min_depth: usize,
    mut_max_depth: usize,
    max_height: usize,
    fitness_ceiling: f64,
}

impl SymbolicRegression {
    /// Creates a problem over explicit `(inputs, target)` samples.
    ///
    /// Fails on an invalid primitive set, an empty sample set, or a
    /// sample whose input arity does not match the primitive set — all
    /// configuration errors, reported before any generation runs.
    pub fn new(pset: PrimitiveSet, samples: Vec<(Vec<f64>, f64)>) -> Result<Self, String> {
        pset.validate()?;
        if samples.is_empty() {
            return Err("symbolic regression needs at least one sample point".into());
        }
        for (i, (inputs, _)) in samples.iter().enumerate() {
            if inputs.len() != pset.n_vars() {
                return Err(format!(
                    "sample {i} has {} inputs, primitive set expects {}",
                    inputs.len(),
                    pset.n_vars()
                ));
            }
        }
        Ok(Self {
            pset,
            samples,
            init_min_depth: 1,
            init_max_depth: 3,
            mut_min_depth: 0,
            mut_max_depth: 2,
            max_height: 17,
            fitness_ceiling: 1000.0,
        })
    }

    /// Creates a single-variable problem by sampling `target` at `xs`.
    pub fn from_fn<F: Fn(f64) -> f64>(
        pset: PrimitiveSet,
        target: F,
        xs: &[f64],
    ) -> Result<Self, String> {
        let samples = xs.iter().map(|&x| (vec![x], target(x))).collect();
        Self::new(pset, samples)
    }

    /// Sets the ramped half-and-half depth range for initialization.
    pub fn with_init_depth(mut self, min: usize, max: usize) -> Self {
        self.init_min_depth = min;
        self.init_max_depth = max;
        self
    }

    /// Sets the depth range for subtrees grown by mutation.
    pub fn with_mutation_depth(mut self, min: usize, max: usize) -> Self {
        self.mut_min_depth = min;
        self.mut_max_depth = max;
        self
    }

    /// Sets the static height limit applied after crossover and mutation.
    pub fn with_max_height(mut self, max_height: usize) -> Self {
        self.max_height = max_height;
        self
    }

    /// Sets the fitness ceiling that caps degenerate evaluations.
    pub fn with_fitness_ceiling(mut self, ceiling: f64) -> Self {
        self.fitness_ceiling = ceiling;
        self
    }

    /// The primitive set in use.
    pub fn primitive_set(&self) -> &PrimitiveSet {
        &self.pset
    }

    /// The static height limit.
    pub fn max_height(&self) -> usize {
        self.max_height
    }
}

impl EaProblem for SymbolicRegression {
    type Individual = TreeIndividual;

    fn create_individual<R: Rng>(&self, rng: &mut R) -> TreeIndividual {
        TreeIndividual::new(generate_tree(
            &self.pset,
            self.init_min_depth,
            self.init_max_depth,
            InitMethod::HalfAndHalf,
            rng,
        ))
    }

    /// Mean squared error against the sample set, capped at the ceiling.
    ///
    /// A non-finite prediction or error sum yields the ceiling directly:
    /// the run keeps moving and the individual simply loses.
    fn evaluate(&self, ind: &TreeIndividual) -> f64 {
        let mut sum = 0.0;
        for (inputs, target) in &self.samples {
            let y = compile::evaluate(&ind.tree, inputs);
            if !y.is_finite() {
                return self.fitness_ceiling;
            }
            let err = y - target;
            sum += err * err;
        }
        let mse = sum / self.samples.len() as f64;
        if mse.is_finite() {
            mse.min(self.fitness_ceiling)
        } else {
            self.fitness_ceiling
        }
    }

    fn crossover<R: Rng>(
        &self,
        p1: &TreeIndividual,
        p2: &TreeIndividual,
        rng: &mut R,
    ) -> Vec<TreeIndividual> {
        let (c1, c2) = subtree_crossover(&p1.tree, &p2.tree, rng);
        vec![
            TreeIndividual::new(limit_height(c1, &p1.tree, self.max_height)),
            TreeIndividual::new(limit_height(c2, &p2.tree, self.max_height)),
        ]
    }

    fn mutate<R: Rng>(&self, ind: &mut TreeIndividual, rng: &mut R) {
        let mutated = subtree_mutation(
            &ind.tree,
            &self.pset,
            self.mut_min_depth,
            self.mut_max_depth,
            rng,
        );
        ind.tree = limit_height(mutated, &ind.tree, self.max_height);
    }
}
