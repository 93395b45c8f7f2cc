//! Tree evaluation.
//!
//! A postfix tree evaluates directly on a value stack, one pass over the
//! node sequence. [`compile`] wraps a tree into a callable closure for
//! callers that want a plain numeric function.

use super::tree::{Node, Tree};

/// Evaluates `tree` over the given input variables.
///
/// Protected operators (see [`Op`](super::Op)) keep single invalid
/// operations from raising; a pathological tree can still overflow to a
/// non-finite value, which the caller (e.g. an MSE evaluator) is
/// expected to cap rather than propagate.
///
/// # Panics
/// Panics if the tree references a variable index not covered by `vars`.
pub fn evaluate(tree: &Tree, vars: &[f64]) -> f64 {
    let mut stack: Vec<f64> = Vec::with_capacity(tree.size());
    for node in tree.nodes() {
        match *node {
            Node::Var(i) => stack.push(vars[usize::from(i)]),
            Node::Const(v) => stack.push(v),
            Node::Op(op) => {
                let arity = op.arity();
                let split = stack.len() - arity;
                let value = op.apply(&stack[split..]);
                stack.truncate(split);
                stack.push(value);
            }
        }
    }
    stack.pop().expect("valid tree leaves one value")
}

/// Compiles a tree into a callable numeric function.
///
/// The closure owns a copy of the tree, so it outlives the genome it was
/// compiled from.
pub fn compile(tree: &Tree) -> impl Fn(&[f64]) -> f64 + Send + Sync {
    let tree = tree.clone();
    move |vars: &[f64]| evaluate(&tree, vars)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gp::{Op, PrimitiveSet};
    use crate::gp::generate::{generate_tree, InitMethod};
    use crate::random::create_rng;

    fn tree(nodes: Vec<Node>) -> Tree {
        Tree::from_nodes(nodes).unwrap()
    }

    #[test]
    fn test_evaluate_leaf() {
        assert_eq!(evaluate(&tree(vec![Node::Const(3.5)]), &[]), 3.5);
        assert_eq!(evaluate(&tree(vec![Node::Var(0)]), &[7.0]), 7.0);
    }

    #[test]
    fn test_evaluate_arithmetic() {
        // add(x0, mul(x1, 2)) at (3, 4) = 3 + 8 = 11
        let t = tree(vec![
            Node::Var(0),
            Node::Var(1),
            Node::Const(2.0),
            Node::Op(Op::Mul),
            Node::Op(Op::Add),
        ]);
        assert_eq!(evaluate(&t, &[3.0, 4.0]), 11.0);
    }

    #[test]
    fn test_evaluate_unary() {
        // neg(sub(x0, 1)) at 5 = -(5 - 1) = -4
        let t = tree(vec![
            Node::Var(0),
            Node::Const(1.0),
            Node::Op(Op::Sub),
            Node::Op(Op::Neg),
        ]);
        assert_eq!(evaluate(&t, &[5.0]), -4.0);
    }

    #[test]
    fn test_protected_division_in_tree() {
        // div(1, x0) at x0 = 0 must yield the fallback 1, not inf/NaN.
        let t = tree(vec![Node::Const(1.0), Node::Var(0), Node::Op(Op::Div)]);
        assert_eq!(evaluate(&t, &[0.0]), 1.0);
        assert_eq!(evaluate(&t, &[2.0]), 0.5);
    }

    #[test]
    fn test_nested_protected_division() {
        // div(x0, sub(x0, x0)) divides by an expression that is always 0.
        let t = tree(vec![
            Node::Var(0),
            Node::Var(0),
            Node::Var(0),
            Node::Op(Op::Sub),
            Node::Op(Op::Div),
        ]);
        for x in [-3.0, 0.0, 42.0] {
            let y = evaluate(&t, &[x]);
            assert_eq!(y, 1.0);
            assert!(y.is_finite());
        }
    }

    #[test]
    fn test_compile_matches_evaluate() {
        let pset = PrimitiveSet::new(1)
            .with_ops(vec![Op::Add, Op::Sub, Op::Mul, Op::Div, Op::Sin, Op::Cos])
            .with_ephemeral(-1.0, 1.0);
        let mut rng = create_rng(42);

        for _ in 0..50 {
            let t = generate_tree(&pset, 0, 5, InitMethod::HalfAndHalf, &mut rng);
            let f = compile(&t);
            for x in [-2.0, -0.5, 0.0, 1.0, 3.0] {
                let direct = evaluate(&t, &[x]);
                let compiled = f(&[x]);
                assert!(
                    (direct == compiled) || (direct.is_nan() && compiled.is_nan()),
                    "compile/evaluate mismatch for {t} at {x}: {direct} vs {compiled}"
                );
            }
        }
    }

    #[test]
    fn test_trig() {
        let t = tree(vec![Node::Var(0), Node::Op(Op::Sin)]);
        assert!((evaluate(&t, &[std::f64::consts::FRAC_PI_2]) - 1.0).abs() < 1e-12);
        let t = tree(vec![Node::Var(0), Node::Op(Op::Cos)]);
        assert!((evaluate(&t, &[0.0]) - 1.0).abs() < 1e-12);
    }
}
