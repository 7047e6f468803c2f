//! # revgrad_core - Reverse-mode automatic differentiation over scalars
//!
//! This crate builds a computation graph of scalar operations as arithmetic
//! is applied, then computes the gradient of one output with respect to
//! every node in a single backward pass (reverse accumulation, the same
//! scheme used to train neural networks).
//!
//! ## Quick start
//!
//! ```
//! use revgrad_core::value;
//!
//! // Leaves are the inputs we differentiate with respect to
//! let x = value(3.0);
//! let y = value(4.0);
//!
//! // Build an expression: z = x * y + x
//! let z = &x * &y + &x;
//! assert_eq!(z.value(), 15.0);
//!
//! // One backward pass fills in the gradient of every ancestor node
//! z.backward();
//! assert_eq!(x.grad(), 5.0); // dz/dx = y + 1
//! assert_eq!(y.grad(), 3.0); // dz/dy = x
//! ```
//!
//! Raw numbers auto-promote to leaf nodes on either side of an operator, so
//! `2.0 * &x + 1.0` builds the same graph as spelling out the leaves.
//!
//! ## Fallible operations
//!
//! Division and real powers can leave the reals, so they are methods that
//! return `Result` instead of operators:
//!
//! ```
//! use revgrad_core::{value, GradError};
//!
//! let x = value(2.0);
//! let q = x.div(4.0).unwrap();
//! assert_eq!(q.value(), 0.5);
//!
//! assert_eq!(x.div(0.0).unwrap_err(), GradError::DivisionByZero);
//! assert!(value(-4.0).powf(0.5).is_err());
//! ```
//!
//! ## Gradient semantics
//!
//! Gradients live on the nodes and accumulate: every backward pass adds its
//! contributions on top of whatever is already there. Reset with
//! [`Value::zero_grad`] between passes when isolation is needed.
//!
//! ## Architecture
//!
//! - [`Value`]: reference-counted handle to a graph node; cloning is O(1)
//!   and shares the node.
//! - [`backward`]: topological sort + reverse chain-rule accumulation.
//! - [`finite_diff_grad`]: numerical gradients for validating the backward
//!   pass in tests.

mod backward;
mod error;
mod finite_diff;
mod node;
mod ops;

pub use backward::backward;
pub use error::GradError;
pub use finite_diff::{finite_diff_grad, max_grad_error};
pub use node::{NodeId, Op, Value};

/// Create a leaf node holding `v`.
///
/// Shorthand for [`Value::new`]; leaves are the graph's inputs and carry no
/// operation tag and no parents.
pub fn value(v: f64) -> Value {
    Value::new(v)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_basic_arithmetic() {
        let x = value(2.0);
        let y = value(3.0);

        assert_eq!((&x + &y).value(), 5.0);
        assert_eq!((&x - &y).value(), -1.0);
        assert_eq!((&x * &y).value(), 6.0);
        assert_eq!(x.div(&y).unwrap().value(), 2.0 / 3.0);
        assert_eq!((-&x).value(), -2.0);
    }

    #[test]
    fn test_promotion_both_sides() {
        let x = value(3.0);
        assert_eq!((&x + 1.0).value(), 4.0);
        assert_eq!((1.0 + &x).value(), 4.0);
        assert_eq!((&x - 1.0).value(), 2.0);
        assert_eq!((1.0 - &x).value(), -2.0);
        assert_eq!((&x * 2.0).value(), 6.0);
        assert_eq!((2.0 * &x).value(), 6.0);
        assert_eq!(x.div(2.0).unwrap().value(), 1.5);
        assert_eq!(x.rdiv(6.0).unwrap().value(), 2.0);
        assert_eq!(x.rsub(1.0).value(), -2.0);
    }

    #[test]
    fn test_gradient_add() {
        let x = value(2.0);
        let y = value(3.0);
        let z = &x + &y;

        z.backward();
        assert_eq!(x.grad(), 1.0);
        assert_eq!(y.grad(), 1.0);
    }

    #[test]
    fn test_gradient_sub() {
        let x = value(2.0);
        let y = value(3.0);
        let z = &x - &y;

        z.backward();
        assert_eq!(x.grad(), 1.0);
        assert_eq!(y.grad(), -1.0);
    }

    #[test]
    fn test_gradient_mul() {
        // Product rule at a = 3, b = 4: grads are 4 and 3.
        let a = value(3.0);
        let b = value(4.0);
        let z = &a * &b;

        z.backward();
        assert_eq!(a.grad(), 4.0);
        assert_eq!(b.grad(), 3.0);
    }

    #[test]
    fn test_gradient_div() {
        let x = value(2.0);
        let y = value(4.0);
        let z = x.div(&y).unwrap();

        z.backward();
        assert_eq!(x.grad(), 0.25);
        assert_eq!(y.grad(), -2.0 / 16.0);
    }

    #[test]
    fn test_gradient_reversed_operands() {
        // z = 2 - x: dz/dx = -1, not the forward-order +1.
        let x = value(3.0);
        let z = 2.0 - &x;
        z.backward();
        assert_eq!(z.value(), -1.0);
        assert_eq!(x.grad(), -1.0);

        // z = 2 / x at x = 4: dz/dx = -2/x^2 = -0.125.
        let x = value(4.0);
        let z = x.rdiv(2.0).unwrap();
        z.backward();
        assert_eq!(z.value(), 0.5);
        assert_eq!(x.grad(), -0.125);
    }

    #[test]
    fn test_rdiv_by_zero_self() {
        let zero = value(0.0);
        assert_eq!(zero.rdiv(2.0).unwrap_err(), GradError::DivisionByZero);
    }

    #[test]
    fn test_gradient_neg() {
        let x = value(2.0);
        let z = -&x;
        z.backward();
        assert_eq!(x.grad(), -1.0);
    }

    #[test]
    fn test_gradient_powf() {
        // z = x^3 at x = 2: dz/dx = 3x^2 = 12.
        let x = value(2.0);
        let z = x.powf(3.0).unwrap();
        z.backward();
        assert_eq!(x.grad(), 12.0);
    }

    #[test]
    fn test_gradient_sigmoid() {
        let x = value(0.0);
        let z = x.sigmoid();
        z.backward();
        assert_eq!(z.value(), 0.5);
        assert_eq!(x.grad(), 0.25);
    }

    #[test]
    fn test_gradient_sigmoid_chain() {
        // y = sigmoid(2x) at x = 0: dy/dx = sigmoid'(0) * 2 = 0.5.
        let x = value(0.0);
        let y = (2.0 * &x).sigmoid();
        y.backward();
        assert_abs_diff_eq!(x.grad(), 0.5, epsilon = 1e-15);
    }

    #[test]
    fn test_same_node_used_twice_sums_both_edges() {
        // y = x + x must give dy/dx = 2, not 1.
        let x = value(3.0);
        let y = &x + &x;
        y.backward();
        assert_eq!(y.value(), 6.0);
        assert_eq!(x.grad(), 2.0);
    }

    #[test]
    fn test_chain_rule_through_relu_active() {
        // y = relu(x * 2 + 1) at x = 3: value 7, dy/dx = 2.
        let x = value(3.0);
        let y = (&x * 2.0 + 1.0).relu();
        assert_eq!(y.value(), 7.0);
        y.backward();
        assert_eq!(x.grad(), 2.0);
    }

    #[test]
    fn test_chain_rule_through_relu_clipped() {
        // Same expression at x = -5: value 0, dy/dx = 0.
        let x = value(-5.0);
        let y = (&x * 2.0 + 1.0).relu();
        assert_eq!(y.value(), 0.0);
        y.backward();
        assert_eq!(x.grad(), 0.0);
    }

    #[test]
    fn test_gradient_complex_expression() {
        // z = (x * y + sigmoid(x)) / (y + 2) against finite differences.
        let build = |x_val: f64, y_val: f64| -> (Value, Value, Value) {
            let x = value(x_val);
            let y = value(y_val);
            let z = (&x * &y + x.sigmoid()).div(&y + 2.0).unwrap();
            (x, y, z)
        };

        let (x, y, z) = build(1.5, 2.5);
        z.backward();

        let f = |vals: &[f64]| build(vals[0], vals[1]).2.value();
        let numeric = finite_diff_grad(f, &[1.5, 2.5], 1e-7);

        assert!((x.grad() - numeric[0]).abs() < 1e-5);
        assert!((y.grad() - numeric[1]).abs() < 1e-5);
    }

    #[test]
    fn test_gradient_random_graph_matches_finite_diff() {
        use rand::Rng;
        let mut rng = rand::thread_rng();

        // Inputs chosen so the relu argument stays strictly positive and the
        // expression is smooth around the sample point.
        let x_val: f64 = rng.gen_range(0.5..1.5);
        let y_val: f64 = rng.gen_range(0.5..1.5);

        let build = |x_val: f64, y_val: f64| -> (Value, Value, Value) {
            let x = value(x_val);
            let y = value(y_val);
            let z = (&x * &y + 1.0).relu() + (&x - &y).sigmoid() * &y;
            (x, y, z)
        };

        let (x, y, z) = build(x_val, y_val);
        z.backward();

        let f = |vals: &[f64]| build(vals[0], vals[1]).2.value();
        let numeric = finite_diff_grad(f, &[x_val, y_val], 1e-7);

        assert!(
            (x.grad() - numeric[0]).abs() < 1e-5,
            "dz/dx mismatch: autodiff={}, fd={}",
            x.grad(),
            numeric[0]
        );
        assert!(
            (y.grad() - numeric[1]).abs() < 1e-5,
            "dz/dy mismatch: autodiff={}, fd={}",
            y.grad(),
            numeric[1]
        );
    }

    #[test]
    fn test_zero_grad_resets_exactly() {
        let x = value(2.0);
        let y = value(3.0);
        let z = &x * &y;

        z.backward();
        z.backward();
        assert_ne!(x.grad(), 0.0);

        x.zero_grad();
        y.zero_grad();
        assert_eq!(x.grad(), 0.0);
        assert_eq!(y.grad(), 0.0);

        // Idempotent.
        x.zero_grad();
        assert_eq!(x.grad(), 0.0);
    }

    #[test]
    fn test_constant_receives_gradient_but_is_discardable() {
        // z = x + 5: dz/dx = 1; the promoted constant just holds grad 1 and
        // is dropped with the graph.
        let x = value(2.0);
        let z = &x + 5.0;
        z.backward();
        assert_eq!(x.grad(), 1.0);
    }
}
