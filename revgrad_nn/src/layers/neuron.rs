//! A single neuron: weighted sum plus bias, with optional ReLU.

use rand::Rng;
use revgrad_core::Value;

use crate::module::Module;

/// One unit of computation: `relu(w · x + b)`, or the raw affine sum when
/// built without the non-linearity (e.g. for an output layer).
pub struct Neuron {
    weights: Vec<Value>,
    bias: Value,
    nonlinear: bool,
}

impl Neuron {
    /// Create a neuron with `n_in` weights drawn uniformly from [-1, 1) and
    /// a zero bias.
    pub fn new(n_in: usize, nonlinear: bool) -> Self {
        let mut rng = rand::thread_rng();
        let weights = (0..n_in)
            .map(|_| Value::new(rng.gen_range(-1.0..1.0)))
            .collect();
        Neuron {
            weights,
            bias: Value::new(0.0),
            nonlinear,
        }
    }

    /// Create a neuron from explicit weights and bias, for deterministic
    /// models and reproducible tests.
    pub fn from_weights(weights: Vec<f64>, bias: f64, nonlinear: bool) -> Self {
        Neuron {
            weights: weights.into_iter().map(Value::new).collect(),
            bias: Value::new(bias),
            nonlinear,
        }
    }

    /// Number of inputs this neuron consumes.
    pub fn fan_in(&self) -> usize {
        self.weights.len()
    }

    /// Forward pass: weighted sum of `inputs` plus bias, through ReLU when
    /// the neuron is non-linear.
    ///
    /// Panics if `inputs` does not match the neuron's fan-in.
    pub fn forward(&self, inputs: &[Value]) -> Value {
        assert_eq!(
            inputs.len(),
            self.weights.len(),
            "input width {} does not match neuron fan-in {}",
            inputs.len(),
            self.weights.len()
        );

        let mut sum = self.bias.clone();
        for (weight, input) in self.weights.iter().zip(inputs) {
            sum = sum + weight * input;
        }

        if self.nonlinear {
            sum.relu()
        } else {
            sum
        }
    }
}

impl Module for Neuron {
    fn parameters(&self) -> Vec<Value> {
        let mut params: Vec<Value> = self.weights.to_vec();
        params.push(self.bias.clone());
        params
    }

    fn parameters_mut(&mut self) -> Vec<&mut Value> {
        self.weights.iter_mut().chain([&mut self.bias]).collect()
    }
}
