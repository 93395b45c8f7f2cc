//! Single-objective evolutionary computation engine.
//!
//! Provides a generic generational loop plus operator sets for three
//! genome families:
//!
//! - **Bit strings** ([`bitstring`]): uniform initialization, one-point
//!   crossover, per-gene flip mutation.
//! - **Bounded real vectors** ([`real`]): per-dimension bounds, uniform
//!   initialization, one-point and simulated binary crossover,
//!   polynomial mutation — every operator clips back into bounds.
//! - **Expression trees** ([`gp`]): grow/full/half-and-half generation
//!   over a primitive set with ephemeral constants, subtree crossover
//!   and mutation under a static height limit, protected evaluation,
//!   and a ready-made symbolic-regression problem.
//!
//! The [`engine`] module owns everything genome-agnostic: the
//! selection → variation → evaluation → elitist-replacement state
//! machine, tournament/roulette/rank selection, the hall of fame, and
//! the per-generation statistics logbook.
//!
//! # Architecture
//!
//! Problems implement [`engine::EaProblem`]; the engine never registers
//! operators in a global toolbox — operator choice and parameters live
//! in explicit configuration values ([`engine::EaConfig`], genome-module
//! arguments) passed down at construction time, so every operator set is
//! testable in isolation.
//!
//! # Example
//!
//! ```ignore
//! use evokit::engine::{EaConfig, EaRunner, Objective};
//!
//! let config = EaConfig::default()
//!     .with_population_size(100)
//!     .with_objective(Objective::Maximize)
//!     .with_seed(42);
//! let result = EaRunner::run(&my_problem, &config);
//! println!("best: {:?}", result.best_fitness);
//! ```

pub mod bitstring;
pub mod engine;
pub mod gp;
pub mod random;
pub mod real;
