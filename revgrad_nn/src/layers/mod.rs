//! Model building blocks: neurons, layers, and the MLP.

mod mlp;
mod neuron;

pub use mlp::{Layer, Mlp};
pub use neuron::Neuron;
