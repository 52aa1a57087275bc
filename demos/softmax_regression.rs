/// Softmax regression on three toy 2-D blobs for ferrite-loss.
///
/// Model:   logits = x·W + b, probabilities via Softmax
/// Loss:    CategoricalCrossentropy (normalized, so the gradient is already
///          scaled by the batch size and plain SGD steps work)
/// Labels:  sparse class indices, expanded by the loss itself
///
/// Run with:
///   cargo run --example softmax_regression

use ferrite_loss::{Batch, CategoricalCrossentropy, Labels, Loss};
use rand::prelude::*;

const FEATURES: usize = 2;
const CLASSES: usize = 3;
const PER_CLASS: usize = 40;
const EPOCHS: usize = 200;
const LEARNING_RATE: f32 = 0.5;

fn main() {
    let mut rng = rand::thread_rng();

    // -----------------------------------------------------------------------
    // Toy data: one noisy blob per class
    // -----------------------------------------------------------------------
    let centers = [[0.0_f32, 2.0], [2.0, -1.0], [-2.0, -1.0]];
    let mut inputs: Vec<[f32; FEATURES]> = Vec::new();
    let mut classes: Vec<u32> = Vec::new();
    for (class, center) in centers.iter().enumerate() {
        for _ in 0..PER_CLASS {
            inputs.push([
                center[0] + rng.gen::<f32>() - 0.5,
                center[1] + rng.gen::<f32>() - 0.5,
            ]);
            classes.push(class as u32);
        }
    }
    let truths = Labels::Sparse(classes.clone());

    // -----------------------------------------------------------------------
    // Training loop
    // -----------------------------------------------------------------------
    let mut weights = [[0.0_f32; CLASSES]; FEATURES];
    let mut bias = [0.0_f32; CLASSES];
    let loss_fn = CategoricalCrossentropy::new();

    for epoch in 0..=EPOCHS {
        let guesses = forward(&inputs, &weights, &bias);
        let (loss, d_scores) = loss_fn
            .get_both(&guesses, &truths)
            .expect("guesses and labels share the batch size");

        for (i, input) in inputs.iter().enumerate() {
            for j in 0..CLASSES {
                let d = d_scores.get(i, j);
                for k in 0..FEATURES {
                    weights[k][j] -= LEARNING_RATE * d * input[k];
                }
                bias[j] -= LEARNING_RATE * d;
            }
        }

        if epoch % 20 == 0 {
            println!("Epoch {epoch}: loss = {loss:.6}");
        }
    }

    // -----------------------------------------------------------------------
    // Report accuracy on the training blobs
    // -----------------------------------------------------------------------
    let guesses = forward(&inputs, &weights, &bias);
    let correct = (0..inputs.len())
        .filter(|&i| argmax(guesses.row(i)) == classes[i] as usize)
        .count();
    println!("Accuracy: {correct}/{}", inputs.len());
}

fn forward(
    inputs: &[[f32; FEATURES]],
    weights: &[[f32; CLASSES]; FEATURES],
    bias: &[f32; CLASSES],
) -> Batch {
    let rows = inputs
        .iter()
        .map(|input| {
            let mut logits = [0.0_f32; CLASSES];
            for j in 0..CLASSES {
                logits[j] = bias[j];
                for k in 0..FEATURES {
                    logits[j] += input[k] * weights[k][j];
                }
            }
            softmax(&logits)
        })
        .collect();
    Batch::from_rows(rows).expect("forward rows share one width")
}

fn softmax(logits: &[f32; CLASSES]) -> Vec<f32> {
    let max = logits.iter().fold(f32::MIN, |m, &z| m.max(z));
    let exps: Vec<f32> = logits.iter().map(|z| (z - max).exp()).collect();
    let total: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / total).collect()
}

fn argmax(row: &[f32]) -> usize {
    let mut best = 0;
    for (i, &value) in row.iter().enumerate() {
        if value > row[best] {
            best = i;
        }
    }
    best
}
