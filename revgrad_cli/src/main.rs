//! CLI demo for the reverse-mode autodiff engine.
//!
//! Builds a few expressions, computes values and gradients, and validates
//! the gradients against finite differences.

use revgrad_core::{finite_diff_grad, value, GradError};

fn main() -> Result<(), GradError> {
    println!("=== Reverse-Mode Autodiff Demo ===\n");

    // Build the expression: z = (x*y + sigmoid(x)) / (y + 2)
    let x_val = 1.5;
    let y_val = 2.5;

    let x = value(x_val);
    let y = value(y_val);
    let z = (&x * &y + x.sigmoid()).div(&y + 2.0)?;

    println!("Expression: z = (x*y + sigmoid(x)) / (y + 2)");
    println!("At point:   x = {}, y = {}", x_val, y_val);
    println!("Value:      z = {:.10}\n", z.value());

    // Compute gradients via autodiff
    z.backward();
    println!("Autodiff gradients:");
    println!("  dz/dx = {:.10}", x.grad());
    println!("  dz/dy = {:.10}\n", y.grad());

    // Compute gradients via finite differences for validation
    let f = |vals: &[f64]| {
        let x = value(vals[0]);
        let y = value(vals[1]);
        (&x * &y + x.sigmoid()).div(&y + 2.0).unwrap().value()
    };
    let numeric = finite_diff_grad(f, &[x_val, y_val], 1e-7);

    println!("Finite difference gradients (eps=1e-7):");
    println!("  dz/dx = {:.10}", numeric[0]);
    println!("  dz/dy = {:.10}\n", numeric[1]);

    let err_x = (x.grad() - numeric[0]).abs();
    let err_y = (y.grad() - numeric[1]).abs();
    let max_err = err_x.max(err_y);

    println!("Gradient errors:");
    println!("  |autodiff - fd| for x: {:.2e}", err_x);
    println!("  |autodiff - fd| for y: {:.2e}", err_y);

    let tolerance = 1e-5;
    if max_err < tolerance {
        println!("PASS: max error ({:.2e}) < tolerance ({:.2e})\n", max_err, tolerance);
    } else {
        println!("FAIL: max error ({:.2e}) >= tolerance ({:.2e})\n", max_err, tolerance);
        std::process::exit(1);
    }

    println!("=== Additional Examples ===\n");

    // Example 1: chain rule through relu
    println!("1. Chain rule: y = relu(x * 2 + 1)");
    let x = value(3.0);
    let y = (&x * 2.0 + 1.0).relu();
    y.backward();
    println!("   At x = 3.0:");
    println!("   y = {} (expected: 7)", y.value());
    println!("   dy/dx = {} (expected: 2)\n", x.grad());

    // Example 2: shared subexpressions in a diamond graph
    println!("2. Diamond graph: z = (x + y) * (x - y) = x^2 - y^2");
    let x = value(3.0);
    let y = value(2.0);
    let a = &x + &y;
    let b = &x - &y;
    let z = &a * &b;
    z.backward();
    println!("   At x = 3.0, y = 2.0:");
    println!("   z = {} (expected: 5)", z.value());
    println!("   dz/dx = {} (expected: 2x = 6)", x.grad());
    println!("   dz/dy = {} (expected: -2y = -4)\n", y.grad());

    // Example 3: domain errors are recoverable, not crashes
    println!("3. Domain errors:");
    let a = value(1.0);
    match a.div(0.0) {
        Err(err) => println!("   1 / 0        -> {}", err),
        Ok(_) => unreachable!(),
    }
    match value(-4.0).powf(0.5) {
        Err(err) => println!("   (-4) ^ 0.5   -> {}", err),
        Ok(_) => unreachable!(),
    }

    Ok(())
}
