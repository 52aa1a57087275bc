use serde::{Deserialize, Serialize};

use crate::error::{LossError, Result};
use crate::loss::Loss;
use crate::math::batch::Batch;

/// Squared L2 distance between two batches of the same shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct L2Distance {
    /// Divide every gradient element by the row count.
    pub normalize: bool,
}

impl L2Distance {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Loss for L2Distance {
    type Guesses = Batch;
    type Truths = Batch;
    type Gradient = Batch;

    /// Per-value gradient: guesses - truths, pointing from the truths
    /// toward the guesses (then / N when `normalize`).
    fn get_grad(&self, guesses: &Batch, truths: &Batch) -> Result<Batch> {
        if guesses.shape() != truths.shape() {
            return Err(LossError::ShapeMismatch {
                left: guesses.shape(),
                right: truths.shape(),
            });
        }

        let mut data: Vec<f32> = guesses
            .data()
            .iter()
            .zip(truths.data().iter())
            .map(|(a, b)| a - b)
            .collect();

        if self.normalize && guesses.rows() > 0 {
            let inv = 1.0 / guesses.rows() as f32;
            for d in &mut data {
                *d *= inv;
            }
        }

        Batch::from_flat(guesses.rows(), guesses.cols(), data)
    }

    /// Scalar loss: the squared sum of the gradient.
    fn get_loss(&self, guesses: &Batch, truths: &Batch) -> Result<f32> {
        Ok(self.get_grad(guesses, truths)?.squared_sum())
    }

    fn get_both(&self, guesses: &Batch, truths: &Batch) -> Result<(f32, Batch)> {
        let grad = self.get_grad(guesses, truths)?;
        Ok((grad.squared_sum(), grad))
    }
}
