//! Error type for graph-building operations.

use thiserror::Error;

/// Domain errors surfaced while extending the computation graph.
///
/// Every error is local to the operation that detects it: the operation
/// returns the error to its caller and allocates no output node. There is no
/// partial state to clean up and nothing to retry.
#[derive(Error, Debug, Clone, Copy, PartialEq)]
pub enum GradError {
    /// Division with a denominator node whose value is exactly zero. Both the
    /// quotient and its partial derivatives are undefined.
    #[error("division by zero: denominator node has value 0")]
    DivisionByZero,

    /// A power whose value or derivative is undefined over the reals, e.g. a
    /// negative base with a non-integer exponent, or a zero base with a
    /// negative exponent.
    #[error("power {base}^{exponent} is undefined over the reals")]
    UndefinedPower { base: f64, exponent: f64 },
}
