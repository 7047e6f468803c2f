//! Stochastic gradient descent.

use log::debug;
use revgrad_core::Value;

/// SGD optimizer with optional momentum.
///
/// Graph nodes are immutable behind their shared handles, so a step installs
/// a fresh leaf carrying the updated value into each parameter slot; the old
/// leaf is released with the rest of the step's graph. Momentum buffers are
/// keyed by parameter position, which is stable because `parameters()` order
/// is part of the [`crate::Module`] contract.
pub struct SGD {
    /// Learning rate.
    pub lr: f64,
    /// Momentum coefficient; 0 for vanilla SGD.
    pub momentum: f64,
    velocities: Vec<f64>,
}

impl SGD {
    /// Create a vanilla SGD optimizer.
    pub fn new(lr: f64) -> Self {
        SGD {
            lr,
            momentum: 0.0,
            velocities: Vec::new(),
        }
    }

    /// Create an SGD optimizer with momentum.
    pub fn with_momentum(lr: f64, momentum: f64) -> Self {
        SGD {
            lr,
            momentum,
            velocities: Vec::new(),
        }
    }

    /// Update every parameter in-place from its accumulated gradient:
    /// `v = momentum * v + grad; param = param - lr * v`.
    pub fn step(&mut self, params: Vec<&mut Value>) {
        if self.velocities.len() != params.len() {
            self.velocities = vec![0.0; params.len()];
        }
        debug!("SGD step: {} params, lr = {}", params.len(), self.lr);

        for (velocity, param) in self.velocities.iter_mut().zip(params) {
            *velocity = self.momentum * *velocity + param.grad();
            *param = Value::new(param.value() - self.lr * *velocity);
        }
    }
}
