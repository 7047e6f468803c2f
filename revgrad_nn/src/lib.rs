//! # revgrad_nn - Neural-network layer over the revgrad_core engine
//!
//! Thin composition of graph nodes into trainable models:
//!
//! - **[`Module`]**: parameters / zero_grad contract every model implements
//! - **[`Neuron`] / [`Layer`] / [`Mlp`]**: weighted sums with ReLU hidden
//!   layers and a linear output layer
//! - **[`mse_loss`]**: mean squared error over a batch of predictions
//! - **[`SGD`]**: gradient-descent parameter updates with optional momentum
//!
//! ## Example: one training step
//!
//! ```
//! use revgrad_core::Value;
//! use revgrad_nn::{mse_loss, Mlp, Module, SGD};
//!
//! let mut model = Mlp::new(2, &[4, 1]);
//! let mut opt = SGD::new(0.05);
//!
//! let inputs = [Value::new(1.0), Value::new(-1.0)];
//!
//! // Isolate this step's gradients, then forward / loss / backward / step.
//! model.zero_grad();
//! let pred = model.forward(&inputs);
//! let loss = mse_loss(&pred, &[0.5]);
//! loss.backward();
//! opt.step(model.parameters_mut());
//! ```

pub mod activations;
pub mod layers;
pub mod loss;
pub mod module;
pub mod optim;

pub use activations::{relu, sigmoid};
pub use layers::{Layer, Mlp, Neuron};
pub use loss::mse_loss;
pub use module::Module;
pub use optim::SGD;
