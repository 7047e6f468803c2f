//! Operator implementations that extend the computation graph.
//!
//! Each operation computes its output value and the local partial derivative
//! of that output with respect to every operand, evaluated at the operand
//! values in hand right now. Output and partials are captured on the new
//! node at construction; the backward pass only ever replays these stored
//! coefficients. Operands are never mutated.

use crate::error::GradError;
use crate::node::{Op, Value};

/// `a + b`. Partials: d/da = 1, d/db = 1.
pub(crate) fn add(a: &Value, b: &Value) -> Value {
    Value::from_node(
        Op::Add,
        a.value() + b.value(),
        vec![(a.clone(), 1.0), (b.clone(), 1.0)],
    )
}

/// `a - b`. Partials: d/da = 1, d/db = -1.
pub(crate) fn sub(a: &Value, b: &Value) -> Value {
    Value::from_node(
        Op::Sub,
        a.value() - b.value(),
        vec![(a.clone(), 1.0), (b.clone(), -1.0)],
    )
}

/// `a * b`. Partials: d/da = b, d/db = a.
pub(crate) fn mul(a: &Value, b: &Value) -> Value {
    Value::from_node(
        Op::Mul,
        a.value() * b.value(),
        vec![(a.clone(), b.value()), (b.clone(), a.value())],
    )
}

/// `a / b`. Partials: d/da = 1/b, d/db = -a/b².
///
/// Fails when `b` is exactly zero: neither the quotient nor the partials are
/// defined there.
pub(crate) fn div(a: &Value, b: &Value) -> Result<Value, GradError> {
    let denominator = b.value();
    if denominator == 0.0 {
        return Err(GradError::DivisionByZero);
    }
    let numerator = a.value();
    Ok(Value::from_node(
        Op::Div,
        numerator / denominator,
        vec![
            (a.clone(), 1.0 / denominator),
            (b.clone(), -numerator / (denominator * denominator)),
        ],
    ))
}

/// `a^exponent` for a constant exponent. Partial: exponent * a^(exponent-1).
///
/// Fails when the result or the partial leaves the reals: a negative base
/// with a non-integer exponent yields a NaN result, and a zero base with an
/// exponent below one makes the partial blow up.
pub(crate) fn powf(a: &Value, exponent: f64) -> Result<Value, GradError> {
    let base = a.value();
    let out = base.powf(exponent);
    let partial = exponent * base.powf(exponent - 1.0);
    if out.is_nan() || partial.is_nan() || partial.is_infinite() {
        return Err(GradError::UndefinedPower { base, exponent });
    }
    Ok(Value::from_node(
        Op::Pow(exponent),
        out,
        vec![(a.clone(), partial)],
    ))
}

/// `max(0, a)`. Partial: 1 for a > 0, else 0 (subgradient 0 at the kink).
pub(crate) fn relu(a: &Value) -> Value {
    let input = a.value();
    let partial = if input > 0.0 { 1.0 } else { 0.0 };
    Value::from_node(Op::Relu, input.max(0.0), vec![(a.clone(), partial)])
}

/// `1 / (1 + exp(-a))`. Partial: out * (1 - out), computed from the output
/// value already in hand.
pub(crate) fn sigmoid(a: &Value) -> Value {
    let out = 1.0 / (1.0 + (-a.value()).exp());
    Value::from_node(Op::Sigmoid, out, vec![(a.clone(), out * (1.0 - out))])
}
