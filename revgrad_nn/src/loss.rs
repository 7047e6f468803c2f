//! Loss functions.

use revgrad_core::Value;

/// Mean squared error: mean((pred - target)^2).
///
/// Targets are plain numbers (they are not differentiated through), so the
/// gradient of the result w.r.t. each prediction is `2 (pred - target) / n`.
///
/// Panics when the slices differ in length or are empty.
pub fn mse_loss(preds: &[Value], targets: &[f64]) -> Value {
    assert_eq!(
        preds.len(),
        targets.len(),
        "mse_loss over {} predictions but {} targets",
        preds.len(),
        targets.len()
    );
    assert!(!preds.is_empty(), "mse_loss over an empty batch");

    let mut total = Value::new(0.0);
    for (pred, &target) in preds.iter().zip(targets) {
        let diff = pred - target;
        total = total + &diff * &diff;
    }
    total * (1.0 / preds.len() as f64)
}
