use serde::{Deserialize, Serialize};

use crate::error::{LossError, Result};
use crate::loss::cross_entropy::CategoricalCrossentropy;
use crate::loss::labels::Labels;
use crate::loss::Loss;
use crate::math::batch::Batch;

/// Categorical crossentropy over a sequence of per-step score batches.
///
/// Guesses and truths are parallel lists, one entry per step; steps may mix
/// sparse and dense labels freely. Each step is scored by an unnormalized
/// [`CategoricalCrossentropy`]; with `normalize` set, every gradient element
/// is divided by the number of steps M, never by any row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SequenceCategoricalCrossentropy {
    /// Divide the per-step gradients (and so the loss) by the step count.
    pub normalize: bool,
}

impl SequenceCategoricalCrossentropy {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sequence-level normalization happens in this type, so the wrapped
    /// per-step loss must not divide by its own row count.
    fn per_step(&self) -> CategoricalCrossentropy {
        CategoricalCrossentropy { normalize: false }
    }
}

impl Default for SequenceCategoricalCrossentropy {
    fn default() -> Self {
        SequenceCategoricalCrossentropy { normalize: true }
    }
}

impl Loss for SequenceCategoricalCrossentropy {
    type Guesses = [Batch];
    type Truths = [Labels];
    type Gradient = Vec<Batch>;

    fn get_grad(&self, guesses: &[Batch], truths: &[Labels]) -> Result<Vec<Batch>> {
        if guesses.len() != truths.len() {
            return Err(LossError::LengthMismatch {
                guesses: guesses.len(),
                labels: truths.len(),
            });
        }

        let per_step = self.per_step();
        let steps = guesses.len() as f32;
        let mut grads = Vec::with_capacity(guesses.len());

        for (scores, labels) in guesses.iter().zip(truths.iter()) {
            let mut d_scores = per_step.get_grad(scores, labels)?;
            if self.normalize {
                d_scores = d_scores.map(|x| x / steps);
            }
            grads.push(d_scores);
        }

        Ok(grads)
    }

    fn get_loss(&self, guesses: &[Batch], truths: &[Labels]) -> Result<f32> {
        Ok(self
            .get_grad(guesses, truths)?
            .iter()
            .map(Batch::squared_sum)
            .sum())
    }

    fn get_both(&self, guesses: &[Batch], truths: &[Labels]) -> Result<(f32, Vec<Batch>)> {
        let grads = self.get_grad(guesses, truths)?;
        let loss = grads.iter().map(Batch::squared_sum).sum();
        Ok((loss, grads))
    }
}
