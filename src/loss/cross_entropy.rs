use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::loss::labels::Labels;
use crate::loss::Loss;
use crate::math::batch::Batch;

/// Categorical crossentropy over one batch of post-softmax rows.
///
/// Targets arrive as sparse class indices or as a dense per-class batch;
/// both resolve to the same dense form before any arithmetic. The gradient
/// is the combined Softmax+CE convention (guesses - target), and the scalar
/// loss is the squared sum of that gradient, so a perfect batch scores
/// exactly zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CategoricalCrossentropy {
    /// Divide every gradient element by the batch row count.
    pub normalize: bool,
}

impl CategoricalCrossentropy {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for CategoricalCrossentropy {
    fn default() -> Self {
        CategoricalCrossentropy { normalize: true }
    }
}

impl Loss for CategoricalCrossentropy {
    type Guesses = Batch;
    type Truths = Labels;
    type Gradient = Batch;

    /// Gradient of the combined Softmax + crossentropy w.r.t. the logits:
    ///   d_ij = guesses_ij - target_ij      (then / N when `normalize`)
    fn get_grad(&self, guesses: &Batch, truths: &Labels) -> Result<Batch> {
        let target = truths.to_dense(guesses.rows(), guesses.cols())?;
        let mut data: Vec<f32> = guesses
            .data()
            .iter()
            .zip(target.data().iter())
            .map(|(g, t)| g - t)
            .collect();

        if self.normalize && guesses.rows() > 0 {
            let inv = 1.0 / guesses.rows() as f32;
            for d in &mut data {
                *d *= inv;
            }
        }

        Batch::from_flat(guesses.rows(), guesses.cols(), data)
    }

    fn get_loss(&self, guesses: &Batch, truths: &Labels) -> Result<f32> {
        Ok(self.get_grad(guesses, truths)?.squared_sum())
    }

    fn get_both(&self, guesses: &Batch, truths: &Labels) -> Result<(f32, Batch)> {
        let grad = self.get_grad(guesses, truths)?;
        Ok((grad.squared_sum(), grad))
    }
}
