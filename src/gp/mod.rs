//! Tree genomes for genetic programming.
//!
//! Expression trees over a configurable primitive set, stored in postfix
//! (linear token) form. Covers the full GP pipeline:
//!
//! - [`PrimitiveSet`] / [`Op`]: operators, variables, ephemeral constants
//! - [`Tree`] / [`Node`]: the genome and its token round trip
//! - [`generate`]: grow / full / ramped half-and-half initialization
//! - [`compile`]: stack evaluation and compile-to-closure
//! - [`variation`]: subtree crossover and mutation under a static height limit
//! - [`SymbolicRegression`]: a ready-made [`EaProblem`](crate::engine::EaProblem)
//!   with capped mean-squared-error fitness
//!
//! # References
//!
//! - Koza (1992), *Genetic Programming: On the Programming of Computers
//!   by Means of Natural Selection*
//! - Poli, Langdon & McPhee (2008), *A Field Guide to Genetic Programming*

pub mod compile;
pub mod generate;
mod primitives;
mod regression;
pub mod tree;
pub mod variation;

pub use generate::{generate_tree, InitMethod};
pub use primitives::{Op, PrimitiveSet};
pub use regression::{SymbolicRegression, TreeIndividual};
pub use tree::{Node, Tree};
