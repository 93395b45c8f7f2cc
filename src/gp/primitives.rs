//! Primitive set for tree genomes.
//!
//! Internal tree nodes are operators with fixed arity; leaves are input
//! variables or ephemeral random constants. The [`PrimitiveSet`] decides
//! which operators are available and how terminals are sampled.

use rand::Rng;

/// A tree operator with fixed arity.
///
/// `Div` is protected: dividing by zero yields 1 instead of raising or
/// producing an infinity, since randomly assembled trees routinely build
/// mathematically invalid expressions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Op {
    /// Binary addition.
    Add,
    /// Binary subtraction.
    Sub,
    /// Binary multiplication.
    Mul,
    /// Protected binary division: `x / 0 = 1`.
    Div,
    /// Unary negation.
    Neg,
    /// Unary sine.
    Sin,
    /// Unary cosine.
    Cos,
}

impl Op {
    /// Number of operands.
    pub fn arity(self) -> usize {
        match self {
            Op::Add | Op::Sub | Op::Mul | Op::Div => 2,
            Op::Neg | Op::Sin | Op::Cos => 1,
        }
    }

    /// Operator name as it appears in rendered expressions.
    pub fn name(self) -> &'static str {
        match self {
            Op::Add => "add",
            Op::Sub => "sub",
            Op::Mul => "mul",
            Op::Div => "div",
            Op::Neg => "neg",
            Op::Sin => "sin",
            Op::Cos => "cos",
        }
    }

    /// Applies the operator to its operands.
    ///
    /// # Panics
    /// Panics (debug assertion) if `args.len()` does not match the arity.
    pub fn apply(self, args: &[f64]) -> f64 {
        debug_assert_eq!(args.len(), self.arity());
        match self {
            Op::Add => args[0] + args[1],
            Op::Sub => args[0] - args[1],
            Op::Mul => args[0] * args[1],
            Op::Div => {
                if args[1] == 0.0 {
                    1.0
                } else {
                    args[0] / args[1]
                }
            }
            Op::Neg => -args[0],
            Op::Sin => args[0].sin(),
            Op::Cos => args[0].cos(),
        }
    }
}

/// The operators and terminals available to tree generation.
///
/// Terminals are input variables `x0..x{n_vars}` plus, optionally,
/// ephemeral random constants: a constant terminal samples its value
/// once, at node-creation time, and the sampled value then lives
/// immutably in the node.
///
/// # Examples
///
/// ```
/// use evokit::gp::{Op, PrimitiveSet};
///
/// let pset = PrimitiveSet::new(1)
///     .with_ops(vec![Op::Add, Op::Sub, Op::Mul, Op::Div, Op::Neg])
///     .with_ephemeral(-1.0, 1.0);
/// assert!(pset.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PrimitiveSet {
    ops: Vec<Op>,
    n_vars: usize,
    const_range: Option<(f64, f64)>,
    const_prob: f64,
}

impl PrimitiveSet {
    /// Creates a set over `n_vars` input variables with the four
    /// arithmetic operators and no constants.
    pub fn new(n_vars: usize) -> Self {
        Self {
            ops: vec![Op::Add, Op::Sub, Op::Mul, Op::Div],
            n_vars,
            const_range: None,
            const_prob: 0.2,
        }
    }

    /// Replaces the operator set.
    pub fn with_ops(mut self, ops: Vec<Op>) -> Self {
        self.ops = ops;
        self
    }

    /// Enables ephemeral random constants sampled uniformly from
    /// `[low, high]`.
    pub fn with_ephemeral(mut self, low: f64, high: f64) -> Self {
        self.const_range = Some((low, high));
        self
    }

    /// Sets the probability that a sampled terminal is a constant rather
    /// than a variable (only meaningful with ephemeral constants enabled).
    pub fn with_const_prob(mut self, prob: f64) -> Self {
        self.const_prob = prob.clamp(0.0, 1.0);
        self
    }

    /// Enabled operators.
    pub fn ops(&self) -> &[Op] {
        &self.ops
    }

    /// Number of input variables.
    pub fn n_vars(&self) -> usize {
        self.n_vars
    }

    /// Ephemeral constant range, if enabled.
    pub fn const_range(&self) -> Option<(f64, f64)> {
        self.const_range
    }

    /// Fraction of terminal kinds among all primitives, used to balance
    /// terminal-vs-operator choices during grow-style generation.
    pub fn terminal_ratio(&self) -> f64 {
        let terminals = self.n_vars + usize::from(self.const_range.is_some());
        terminals as f64 / (terminals + self.ops.len()) as f64
    }

    /// Validates the set.
    ///
    /// An empty operator set or an empty terminal set is a configuration
    /// error: tree generation would be impossible.
    pub fn validate(&self) -> Result<(), String> {
        if self.ops.is_empty() {
            return Err("primitive set has no operators".into());
        }
        if self.n_vars == 0 && self.const_range.is_none() {
            return Err("primitive set has no terminals (no variables, no constants)".into());
        }
        if let Some((low, high)) = self.const_range {
            if !low.is_finite() || !high.is_finite() {
                return Err("ephemeral constant range must be finite".into());
            }
            if low > high {
                return Err(format!(
                    "ephemeral constant range is inverted: low {low} > high {high}"
                ));
            }
        }
        Ok(())
    }

    /// Samples an operator uniformly.
    pub fn random_op<R: Rng>(&self, rng: &mut R) -> Op {
        self.ops[rng.random_range(0..self.ops.len())]
    }

    /// Samples a terminal node: a variable reference, or an ephemeral
    /// constant carrying a freshly drawn immutable value.
    pub fn random_terminal<R: Rng>(&self, rng: &mut R) -> super::tree::Node {
        use super::tree::Node;

        if let Some((low, high)) = self.const_range {
            if self.n_vars == 0 || rng.random_bool(self.const_prob) {
                let value = if low == high {
                    low
                } else {
                    rng.random_range(low..high)
                };
                return Node::Const(value);
            }
        }
        Node::Var(rng.random_range(0..self.n_vars) as u16)
    }
}
