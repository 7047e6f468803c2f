//! The base trait shared by every model component.

use revgrad_core::Value;

/// A model component with trainable parameters.
///
/// Implementors expose their parameters as an ordered list of leaf nodes;
/// the order is part of the contract and stays stable across calls so that
/// optimizer state can be keyed by position.
pub trait Module {
    /// Handles to the trainable leaf parameters, in a stable order.
    fn parameters(&self) -> Vec<Value>;

    /// Mutable slots holding the same parameters, in the same order. The
    /// optimizer writes updated leaves through these.
    fn parameters_mut(&mut self) -> Vec<&mut Value>;

    /// Reset every parameter's gradient to zero.
    ///
    /// Gradients accumulate across backward passes, so a training loop calls
    /// this before each new backward pass to keep steps isolated.
    fn zero_grad(&self) {
        for param in self.parameters() {
            param.zero_grad();
        }
    }
}
