pub mod error;
pub mod loss;
pub mod math;
pub mod registry;

// Convenience re-exports
pub use error::{LossError, Result};
pub use loss::cosine::CosineDistance;
pub use loss::cross_entropy::CategoricalCrossentropy;
pub use loss::l2::L2Distance;
pub use loss::labels::Labels;
pub use loss::sequence::SequenceCategoricalCrossentropy;
pub use loss::Loss;
pub use math::batch::Batch;
pub use registry::RegisteredLoss;
