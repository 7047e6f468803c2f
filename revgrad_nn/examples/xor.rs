//! XOR training example.
//!
//! XOR is not linearly separable, so fitting it proves the hidden layer and
//! the gradients flowing through it are doing real work.

use revgrad_core::Value;
use revgrad_nn::{mse_loss, Mlp, Module, SGD};

fn main() {
    let inputs = [[0.0, 0.0], [0.0, 1.0], [1.0, 0.0], [1.0, 1.0]];
    let targets = [0.0, 1.0, 1.0, 0.0];

    // 2 -> 8 -> 1 with a ReLU hidden layer and a linear output.
    let mut model = Mlp::new(2, &[8, 1]);
    let mut opt = SGD::with_momentum(0.05, 0.9);

    println!("Training XOR network...\n");

    for epoch in 0..2000 {
        let mut total_loss = 0.0;

        for (input, &target) in inputs.iter().zip(targets.iter()) {
            let xs: Vec<Value> = input.iter().copied().map(Value::new).collect();

            model.zero_grad();
            let pred = model.forward(&xs);
            let loss = mse_loss(&pred, &[target]);
            total_loss += loss.value();

            loss.backward();
            opt.step(model.parameters_mut());
        }

        if epoch % 200 == 0 || epoch == 1999 {
            println!("Epoch {:4}: avg loss = {:.6}", epoch, total_loss / 4.0);
        }
    }

    println!("\nTrained network:");
    println!("================");

    let mut correct = 0;
    for (input, &target) in inputs.iter().zip(targets.iter()) {
        let xs: Vec<Value> = input.iter().copied().map(Value::new).collect();
        let output = model.forward(&xs)[0].value();
        let predicted = if output > 0.5 { 1.0 } else { 0.0 };
        if (predicted - target).abs() < 0.5 {
            correct += 1;
        }
        println!(
            "Input: [{:.0}, {:.0}] -> Output: {:.4} (target: {:.0})",
            input[0], input[1], output, target
        );
    }

    println!("\nAccuracy: {}/4", correct);
    if correct == 4 {
        println!("Successfully learned XOR!");
    }
}
