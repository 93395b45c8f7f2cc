//! Tree variation operators.
//!
//! Subtree crossover and subtree mutation, plus the static height limit
//! that keeps bloat bounded: an offspring whose height exceeds the limit
//! reverts to its pre-operator parent instead of entering the population.
//! The limit is applied by explicit composition — callers invoke
//! [`limit_height`] right after the operator — rather than by wrapping
//! the operators behind indirection.

use super::generate::{generate_tree, InitMethod};
use super::primitives::PrimitiveSet;
use super::tree::{Node, Tree};
use rand::Rng;

/// One-point subtree crossover.
///
/// Picks a random node independently in each parent and swaps the
/// subtrees rooted there. Splicing whole postfix ranges preserves arity
/// consistency, so both offspring are valid trees by construction.
pub fn subtree_crossover<R: Rng>(a: &Tree, b: &Tree, rng: &mut R) -> (Tree, Tree) {
    let a_sizes = a.subtree_sizes();
    let b_sizes = b.subtree_sizes();
    let a_root = rng.random_range(0..a.size());
    let b_root = rng.random_range(0..b.size());
    let (a_start, a_end) = a.subtree_range(&a_sizes, a_root);
    let (b_start, b_end) = b.subtree_range(&b_sizes, b_root);

    let a_sub = &a.nodes()[a_start..=a_end];
    let b_sub = &b.nodes()[b_start..=b_end];

    let mut child_a: Vec<Node> = Vec::with_capacity(a.size() - a_sub.len() + b_sub.len());
    child_a.extend_from_slice(&a.nodes()[..a_start]);
    child_a.extend_from_slice(b_sub);
    child_a.extend_from_slice(&a.nodes()[a_end + 1..]);

    let mut child_b: Vec<Node> = Vec::with_capacity(b.size() - b_sub.len() + a_sub.len());
    child_b.extend_from_slice(&b.nodes()[..b_start]);
    child_b.extend_from_slice(a_sub);
    child_b.extend_from_slice(&b.nodes()[b_end + 1..]);

    (Tree::from_valid(child_a), Tree::from_valid(child_b))
}

/// Uniform subtree mutation.
///
/// Replaces the subtree rooted at a random node with a freshly generated
/// subtree, grown with the same policy machinery as initialization.
pub fn subtree_mutation<R: Rng>(
    tree: &Tree,
    pset: &PrimitiveSet,
    min_depth: usize,
    max_depth: usize,
    rng: &mut R,
) -> Tree {
    let sizes = tree.subtree_sizes();
    let root = rng.random_range(0..tree.size());
    let (start, end) = tree.subtree_range(&sizes, root);

    let replacement = generate_tree(pset, min_depth, max_depth, InitMethod::Grow, rng);

    let mut nodes: Vec<Node> =
        Vec::with_capacity(tree.size() - (end - start + 1) + replacement.size());
    nodes.extend_from_slice(&tree.nodes()[..start]);
    nodes.extend_from_slice(replacement.nodes());
    nodes.extend_from_slice(&tree.nodes()[end + 1..]);

    Tree::from_valid(nodes)
}

/// Static height limit: reverts an oversized offspring to its parent.
///
/// Applied after crossover and after mutation; `parent` is the
/// pre-operator genome the offspring falls back to.
pub fn limit_height(offspring: Tree, parent: &Tree, max_height: usize) -> Tree {
    if offspring.depth() > max_height {
        parent.clone()
    } else {
        offspring
    }
}
