//! Layers of neurons and the multi-layer perceptron built from them.

use log::debug;
use revgrad_core::Value;

use crate::layers::Neuron;
use crate::module::Module;

/// A layer of neurons applied to the same input.
pub struct Layer {
    neurons: Vec<Neuron>,
}

impl Layer {
    /// Create a layer of `n_out` randomly-initialized neurons, each reading
    /// all `n_in` inputs.
    pub fn new(n_in: usize, n_out: usize, nonlinear: bool) -> Self {
        let neurons = (0..n_out).map(|_| Neuron::new(n_in, nonlinear)).collect();
        Layer { neurons }
    }

    /// Create a layer from explicit neurons, for deterministic models.
    pub fn from_neurons(neurons: Vec<Neuron>) -> Self {
        Layer { neurons }
    }

    /// Number of outputs this layer produces.
    pub fn n_out(&self) -> usize {
        self.neurons.len()
    }

    /// Apply every neuron to `inputs`, returning one output per neuron.
    pub fn forward(&self, inputs: &[Value]) -> Vec<Value> {
        self.neurons
            .iter()
            .map(|neuron| neuron.forward(inputs))
            .collect()
    }
}

impl Module for Layer {
    fn parameters(&self) -> Vec<Value> {
        self.neurons
            .iter()
            .flat_map(|neuron| neuron.parameters())
            .collect()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Value> {
        self.neurons
            .iter_mut()
            .flat_map(|neuron| neuron.parameters_mut())
            .collect()
    }
}

/// A feed-forward multi-layer perceptron.
///
/// Hidden layers apply ReLU; the last layer is linear so the model can
/// produce unbounded outputs (logits, regression targets).
pub struct Mlp {
    layers: Vec<Layer>,
}

impl Mlp {
    /// Create an MLP taking `n_in` inputs, with one layer per entry of
    /// `layer_sizes`. All layers are non-linear except the last.
    ///
    /// Panics if `layer_sizes` is empty.
    pub fn new(n_in: usize, layer_sizes: &[usize]) -> Self {
        assert!(
            !layer_sizes.is_empty(),
            "an MLP needs at least one layer size"
        );

        let widths: Vec<usize> = std::iter::once(n_in)
            .chain(layer_sizes.iter().copied())
            .collect();
        let last = layer_sizes.len() - 1;
        let layers = (0..layer_sizes.len())
            .map(|i| Layer::new(widths[i], widths[i + 1], i != last))
            .collect();

        debug!("initialized mlp: {} inputs, layer sizes {:?}", n_in, layer_sizes);
        Mlp { layers }
    }

    /// Create an MLP from explicit layers, for deterministic models.
    pub fn from_layers(layers: Vec<Layer>) -> Self {
        Mlp { layers }
    }

    /// Forward pass: thread `inputs` through every layer in order.
    pub fn forward(&self, inputs: &[Value]) -> Vec<Value> {
        let mut activations = inputs.to_vec();
        for layer in &self.layers {
            activations = layer.forward(&activations);
        }
        activations
    }
}

impl Module for Mlp {
    fn parameters(&self) -> Vec<Value> {
        self.layers
            .iter()
            .flat_map(|layer| layer.parameters())
            .collect()
    }

    fn parameters_mut(&mut self) -> Vec<&mut Value> {
        self.layers
            .iter_mut()
            .flat_map(|layer| layer.parameters_mut())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_values(inputs: &[f64]) -> Vec<Value> {
        inputs.iter().copied().map(Value::new).collect()
    }

    #[test]
    fn test_layer_applies_every_neuron() {
        let layer = Layer::from_neurons(vec![
            Neuron::from_weights(vec![1.0, 0.0], 0.0, false),
            Neuron::from_weights(vec![0.0, 1.0], 0.0, false),
            Neuron::from_weights(vec![1.0, 1.0], 1.0, false),
        ]);

        let out = layer.forward(&as_values(&[2.0, 3.0]));
        assert_eq!(out.len(), 3);
        assert_eq!(out[0].value(), 2.0);
        assert_eq!(out[1].value(), 3.0);
        assert_eq!(out[2].value(), 6.0);
    }

    #[test]
    fn test_layer_parameter_count() {
        let layer = Layer::new(3, 4, true);
        // 4 neurons, each with 3 weights + 1 bias.
        assert_eq!(layer.parameters().len(), 16);
        assert_eq!(layer.n_out(), 4);
    }

    #[test]
    fn test_mlp_shapes_and_parameter_count() {
        let mlp = Mlp::new(2, &[4, 1]);
        // Hidden layer: 4 * (2 + 1) = 12, output layer: 1 * (4 + 1) = 5.
        assert_eq!(mlp.parameters().len(), 17);

        let out = mlp.forward(&as_values(&[0.5, -0.5]));
        assert_eq!(out.len(), 1);
    }

    #[test]
    fn test_mlp_hidden_layers_are_relu_last_is_linear() {
        // All-negative weights with zero bias: a ReLU output layer would
        // clamp this model's output to 0, a linear one goes negative.
        let hidden = Layer::from_neurons(vec![Neuron::from_weights(vec![1.0], 0.0, true)]);
        let output = Layer::from_neurons(vec![Neuron::from_weights(vec![-1.0], 0.0, false)]);
        let mlp = Mlp::from_layers(vec![hidden, output]);

        let out = mlp.forward(&as_values(&[2.0]));
        assert_eq!(out[0].value(), -2.0);

        // And the randomly-initialized constructor wires the same shape.
        let mlp = Mlp::new(1, &[1, 1]);
        assert_eq!(mlp.parameters().len(), 4);
    }

    #[test]
    fn test_mlp_forward_is_reproducible_for_fixed_weights() {
        let build = || {
            Mlp::from_layers(vec![
                Layer::from_neurons(vec![
                    Neuron::from_weights(vec![0.5, -0.25], 0.1, true),
                    Neuron::from_weights(vec![-0.75, 1.0], 0.0, true),
                ]),
                Layer::from_neurons(vec![Neuron::from_weights(vec![1.0, 2.0], -0.5, false)]),
            ])
        };

        let a = build().forward(&as_values(&[1.0, 2.0]))[0].value();
        let b = build().forward(&as_values(&[1.0, 2.0]))[0].value();
        assert_eq!(a, b);
    }
}
