pub mod cosine;
pub mod cross_entropy;
pub mod l2;
pub mod labels;
pub mod sequence;

pub use cosine::CosineDistance;
pub use cross_entropy::CategoricalCrossentropy;
pub use l2::L2Distance;
pub use labels::Labels;
pub use sequence::SequenceCategoricalCrossentropy;

use crate::error::Result;

/// Contract shared by every loss: a gradient for the training loop and a
/// scalar for monitoring, computed from the same pair of inputs.
///
/// Implementations are small stateless values; configuration is fixed at
/// construction and calls never mutate anything, so one instance can be
/// shared across threads. The gradient always has exactly the shape of the
/// guesses, and feeding the same batch as both guesses and (dense) truths
/// yields a numerically zero gradient and loss.
pub trait Loss {
    /// Model predictions, e.g. one batch or a slice of per-step batches.
    type Guesses: ?Sized;
    /// Ground truth in whatever form this loss accepts.
    type Truths: ?Sized;
    /// Gradient with respect to the guesses.
    type Gradient;

    /// The gradient to backpropagate.
    fn get_grad(&self, guesses: &Self::Guesses, truths: &Self::Truths) -> Result<Self::Gradient>;

    /// The scalar loss to monitor.
    fn get_loss(&self, guesses: &Self::Guesses, truths: &Self::Truths) -> Result<f32>;

    /// Loss and gradient from one call. Implementations override this when
    /// the two share intermediate work.
    fn get_both(
        &self,
        guesses: &Self::Guesses,
        truths: &Self::Truths,
    ) -> Result<(f32, Self::Gradient)> {
        Ok((
            self.get_loss(guesses, truths)?,
            self.get_grad(guesses, truths)?,
        ))
    }
}
