use thiserror::Error;

/// Errors surfaced by loss construction and computation.
///
/// Shape and length mismatches are caller errors: they are reported
/// synchronously and never repaired by broadcasting or reshaping.
/// Degenerate numeric inputs (NaN, Inf) are not errors; they flow into
/// the outputs unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LossError {
    /// Guesses and resolved targets disagree in (rows, cols).
    #[error("cannot compute loss: mismatched shapes {left:?} vs {right:?}")]
    ShapeMismatch {
        left: (usize, usize),
        right: (usize, usize),
    },

    /// Parallel sequence lists of different lengths.
    #[error("cannot compute sequence loss: {guesses} score batches vs {labels} label batches")]
    LengthMismatch { guesses: usize, labels: usize },

    /// A sparse class index points outside the class dimension.
    #[error("label {label} out of range for {classes} classes (row {row})")]
    LabelOutOfRange {
        row: usize,
        label: u32,
        classes: usize,
    },

    /// Malformed batch construction: ragged rows or a flat buffer whose
    /// length does not fill rows x cols.
    #[error("invalid batch data: {0}")]
    InvalidData(String),

    /// Rejected loss configuration: unknown loss name, unknown option key,
    /// or a value of the wrong type.
    #[error("invalid loss configuration: {0}")]
    InvalidConfig(String),
}

pub type Result<T> = std::result::Result<T, LossError>;
