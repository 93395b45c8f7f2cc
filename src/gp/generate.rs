//! Random tree generation.
//!
//! Two classic shapes: *full* trees, where every branch reaches exactly
//! the target depth, and *grow* trees, where each branch may stop early.
//! Population initialization uses ramped half-and-half: each individual
//! draws its own target depth from `[min_depth, max_depth]` and uses
//! grow or full with equal probability, balancing shape diversity.

use super::primitives::PrimitiveSet;
use super::tree::{Node, Tree};
use rand::Rng;

/// Tree-generation policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InitMethod {
    /// Each branch stops at a random depth between min and the target.
    Grow,
    /// Every branch reaches exactly the target depth.
    Full,
    /// Per-tree coin flip between [`Grow`](InitMethod::Grow) and
    /// [`Full`](InitMethod::Full); combined with the per-tree random
    /// target depth this is ramped half-and-half.
    HalfAndHalf,
}

/// Generates a random tree with depth in `[min_depth, max_depth]`.
///
/// Depth is counted in edges (a single leaf is depth 0) and never
/// exceeds `max_depth` at creation time.
///
/// # Panics
/// Panics if `min_depth > max_depth` or the primitive set is invalid;
/// both are configuration errors callers should have caught via
/// [`PrimitiveSet::validate`] before starting a run.
pub fn generate_tree<R: Rng>(
    pset: &PrimitiveSet,
    min_depth: usize,
    max_depth: usize,
    method: InitMethod,
    rng: &mut R,
) -> Tree {
    assert!(min_depth <= max_depth, "min_depth must not exceed max_depth");
    pset.validate().expect("invalid primitive set");

    let target = if min_depth == max_depth {
        max_depth
    } else {
        rng.random_range(min_depth..=max_depth)
    };
    let full = match method {
        InitMethod::Full => true,
        InitMethod::Grow => false,
        InitMethod::HalfAndHalf => rng.random_bool(0.5),
    };

    let mut nodes = Vec::new();
    emit_subtree(pset, 0, target, min_depth, full, &mut nodes, rng);
    Tree::from_valid(nodes)
}

/// Appends one subtree, postfix, rooted at `depth`.
fn emit_subtree<R: Rng>(
    pset: &PrimitiveSet,
    depth: usize,
    target: usize,
    min_depth: usize,
    full: bool,
    nodes: &mut Vec<Node>,
    rng: &mut R,
) {
    let terminal = if depth >= target {
        true
    } else if full || depth < min_depth {
        false
    } else {
        // Grow: stop early with probability proportional to the share of
        // terminals among all primitives.
        rng.random_bool(pset.terminal_ratio())
    };

    if terminal {
        nodes.push(pset.random_terminal(rng));
    } else {
        let op = pset.random_op(rng);
        for _ in 0..op.arity() {
            emit_subtree(pset, depth + 1, target, min_depth, full, nodes, rng);
        }
        nodes.push(Node::Op(op));
    }
}
