//! The generational evolutionary loop.
//!
//! [`EaRunner`] drives the complete process: initialization → evaluation
//! → selection → variation → evaluation → elitist replacement, repeated
//! until a termination criterion fires. Each generation's statistics are
//! appended to a [`Logbook`] and the best-ever individuals are archived
//! in a [`HallOfFame`].

use super::config::EaConfig;
use super::hof::HallOfFame;
use super::stats::{Aggregate, GenerationStats, Logbook, FITNESS, SIZE};
use super::types::{EaProblem, Fitness, Individual, Objective};
use crate::random::create_rng;
use rand::Rng;
use rayon::prelude::*;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Result of an evolutionary run.
///
/// Contains the best solution found, the final population, the hall of
/// fame, and the per-generation logbook consumed by external reporting
/// code.
#[derive(Debug, Clone)]
pub struct EaResult<I: Individual> {
    /// The best individual found during the entire run.
    pub best: I,

    /// Best fitness value (same as `best.fitness()`).
    pub best_fitness: I::Fitness,

    /// The population after the final replacement.
    pub population: Vec<I>,

    /// Best-ever individuals, ordered best first.
    pub hall_of_fame: HallOfFame<I>,

    /// Per-generation statistics (entry 0 = initial population).
    pub logbook: Logbook,

    /// Total number of generations executed.
    pub generations: usize,

    /// Whether the run was terminated due to stagnation.
    pub stagnated: bool,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,
}

/// Executes the evolutionary loop.
///
/// # Usage
///
/// ```ignore
/// let problem = MyProblem::new();
/// let config = EaConfig::default().with_seed(42);
/// let result = EaRunner::run(&problem, &config);
/// println!("best fitness: {:?}", result.best_fitness);
/// ```
pub struct EaRunner;

impl EaRunner {
    /// Runs the evolutionary loop to completion.
    ///
    /// # Panics
    /// Panics if the configuration is invalid (call [`EaConfig::validate`]
    /// first to get a descriptive error). Once the loop starts it always
    /// runs to a termination criterion: individual evaluation never aborts
    /// the run.
    pub fn run<P: EaProblem>(problem: &P, config: &EaConfig) -> EaResult<P::Individual> {
        Self::run_with_cancel(problem, config, None)
    }

    /// Runs the loop with an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag becomes `true`, the loop stops
    /// at the next generation boundary and returns the best solution
    /// found so far. There is no mid-generation cancellation.
    pub fn run_with_cancel<P: EaProblem>(
        problem: &P,
        config: &EaConfig,
        cancel: Option<Arc<AtomicBool>>,
    ) -> EaResult<P::Individual> {
        config.validate().expect("invalid EaConfig");

        let mut rng = match config.seed {
            Some(seed) => create_rng(seed),
            None => create_rng(rand::random()),
        };

        let n = config.population_size;
        let objective = config.objective;

        // Initialized: population created, nothing evaluated.
        let mut population: Vec<P::Individual> =
            (0..n).map(|_| problem.create_individual(&mut rng)).collect();

        // Evaluated: every individual has a fitness; archive and record.
        evaluate_population(problem, &mut population, config.parallel);
        let mut hof = HallOfFame::new(config.hof_capacity, objective);
        hof.update(&population);
        let mut logbook = Logbook::new();
        logbook.record(summarize(0, &population));

        let mut best = hof
            .best()
            .expect("evaluated population is never empty")
            .clone();

        let mut stagnation_counter = 0usize;
        let mut stagnated = false;
        let mut cancelled = false;
        let mut generations = 0usize;
        let start = Instant::now();

        for _ in 0..config.max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }
            if let Some(limit) = config.time_limit_ms {
                if start.elapsed().as_millis() >= u128::from(limit) {
                    break;
                }
            }

            // Selected: N independent parent copies, source untouched.
            let parents: Vec<P::Individual> = (0..n)
                .map(|_| {
                    let idx = config.selection.select(&population, objective, &mut rng);
                    population[idx].clone()
                })
                .collect();

            // Varied: crossover per adjacent pair, then mutation per
            // offspring, each by its own coin flip. An individual can
            // undergo both, either, or neither; only touched offspring
            // lose their fitness cache.
            let mut offspring = parents;
            for i in (1..offspring.len()).step_by(2) {
                if rng.random_bool(config.crossover_rate) {
                    let children =
                        problem.crossover(&offspring[i - 1], &offspring[i], &mut rng);
                    let mut children = children.into_iter();
                    if let Some(mut child) = children.next() {
                        child.clear_fitness();
                        offspring[i - 1] = child;
                    }
                    if let Some(mut child) = children.next() {
                        child.clear_fitness();
                        offspring[i] = child;
                    }
                }
            }
            for child in offspring.iter_mut() {
                if rng.random_bool(config.mutation_rate) {
                    problem.mutate(child, &mut rng);
                    child.clear_fitness();
                }
            }

            // Evaluated(offspring): cached survivors are skipped.
            evaluate_population(problem, &mut offspring, config.parallel);
            hof.update(&offspring);

            // Replaced: the elitism best of the previous generation
            // displace the same number of worst offspring.
            if config.elitism > 0 {
                apply_elitism(&population, &mut offspring, objective, config.elitism);
            }
            population = offspring;
            generations += 1;

            logbook.record(summarize(generations, &population));

            let gen_best = hof
                .best()
                .expect("hall of fame holds at least the initial best")
                .clone();
            let old_f = fitness_of(&best);
            let new_f = fitness_of(&gen_best);
            if objective.better(new_f, old_f) {
                let old = old_f.to_f64();
                let ratio = if old.abs() > f64::EPSILON {
                    (old - new_f.to_f64()).abs() / old.abs()
                } else {
                    f64::INFINITY
                };
                if ratio >= config.convergence_threshold {
                    stagnation_counter = 0;
                } else {
                    stagnation_counter += 1;
                }
                best = gen_best;
            } else {
                stagnation_counter += 1;
            }

            problem.on_generation(generations, fitness_of(&best));

            if config.stagnation_limit > 0 && stagnation_counter >= config.stagnation_limit {
                stagnated = true;
                break;
            }
        }

        EaResult {
            best_fitness: fitness_of(&best),
            best,
            population,
            hall_of_fame: hof,
            logbook,
            generations,
            stagnated,
            cancelled,
        }
    }
}

/// Evaluate every individual lacking a cached fitness.
///
/// Individuals that already carry a fitness are skipped: evaluation is
/// idempotent and unchanged clones are never recomputed.
fn evaluate_population<P: EaProblem>(
    problem: &P,
    population: &mut [P::Individual],
    parallel: bool,
) {
    if parallel {
        population.par_iter_mut().for_each(|ind| {
            if ind.fitness().is_none() {
                let f = problem.evaluate(ind);
                ind.set_fitness(f);
            }
        });
    } else {
        for ind in population.iter_mut() {
            if ind.fitness().is_none() {
                let f = problem.evaluate(ind);
                ind.set_fitness(f);
            }
        }
    }
}

/// Copy the `k` best of `previous` over the `k` worst of `offspring`.
fn apply_elitism<I: Individual>(
    previous: &[I],
    offspring: &mut [I],
    objective: Objective,
    k: usize,
) {
    let k = k.min(previous.len()).min(offspring.len());

    let mut prev_idx: Vec<usize> = (0..previous.len()).collect();
    prev_idx.sort_by(|&a, &b| objective.order(previous[a].fitness(), previous[b].fitness()));

    let mut off_idx: Vec<usize> = (0..offspring.len()).collect();
    // Worst first.
    off_idx.sort_by(|&a, &b| objective.order(offspring[b].fitness(), offspring[a].fitness()));

    for (slot, &elite) in off_idx.iter().take(k).zip(prev_idx.iter()) {
        offspring[*slot] = previous[elite].clone();
    }
}

fn fitness_of<I: Individual>(ind: &I) -> I::Fitness {
    ind.fitness().expect("individual has been evaluated")
}

/// Summarize one generation into its logbook record.
fn summarize<I: Individual>(generation: usize, population: &[I]) -> GenerationStats {
    let mut chapters = BTreeMap::new();

    let fitness: Vec<f64> = population
        .iter()
        .filter_map(|ind| ind.fitness().map(Fitness::to_f64))
        .collect();
    if let Some(agg) = Aggregate::from_values(&fitness) {
        chapters.insert(FITNESS.to_string(), agg);
    }

    let sizes: Vec<f64> = population
        .iter()
        .filter_map(|ind| ind.genome_size().map(|s| s as f64))
        .collect();
    if let Some(agg) = Aggregate::from_values(&sizes) {
        chapters.insert(SIZE.to_string(), agg);
    }

    GenerationStats {
        generation,
        population_size: population.len(),
        chapters,
    }
}

// ============================================================================
// Tests
// ============================================================================
