use crate::error::{LossError, Result};
use crate::math::batch::Batch;

/// Target labels for the crossentropy losses, in either representation:
///
/// - `Sparse`: one class index per row, each in `[0, classes)`.
/// - `Dense`: a full per-class float batch (one-hot or any weighting),
///   same shape as the guesses.
///
/// Losses resolve either form to the dense one once, up front, and the
/// rest of the computation never branches on the representation again.
#[derive(Debug, Clone, PartialEq)]
pub enum Labels {
    Sparse(Vec<u32>),
    Dense(Batch),
}

impl Labels {
    /// Resolves to a dense batch of shape (rows, cols).
    ///
    /// Sparse indices expand to one-hot rows; an index outside the class
    /// dimension or a length that does not match the row count is an error.
    /// Dense labels must already carry the exact shape.
    pub fn to_dense(&self, rows: usize, cols: usize) -> Result<Batch> {
        match self {
            Labels::Sparse(indices) => {
                if indices.len() != rows {
                    return Err(LossError::ShapeMismatch {
                        left: (rows, cols),
                        right: (indices.len(), cols),
                    });
                }
                let mut data = vec![0.0; rows * cols];
                for (row, &label) in indices.iter().enumerate() {
                    if label as usize >= cols {
                        return Err(LossError::LabelOutOfRange {
                            row,
                            label,
                            classes: cols,
                        });
                    }
                    data[row * cols + label as usize] = 1.0;
                }
                Batch::from_flat(rows, cols, data)
            }
            Labels::Dense(batch) => {
                if batch.shape() != (rows, cols) {
                    return Err(LossError::ShapeMismatch {
                        left: (rows, cols),
                        right: batch.shape(),
                    });
                }
                Ok(batch.clone())
            }
        }
    }
}

impl From<Vec<u32>> for Labels {
    fn from(indices: Vec<u32>) -> Self {
        Labels::Sparse(indices)
    }
}

impl From<Batch> for Labels {
    fn from(batch: Batch) -> Self {
        Labels::Dense(batch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_expands_to_one_hot() {
        let labels = Labels::Sparse(vec![2, 0]);
        let dense = labels.to_dense(2, 3).unwrap();
        assert_eq!(dense.data(), &[0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
    }

    #[test]
    fn sparse_and_dense_spellings_agree() {
        let sparse = Labels::Sparse(vec![1, 1, 0]);
        let one_hot = Batch::from_rows(vec![
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![1.0, 0.0],
        ])
        .unwrap();
        let dense = Labels::Dense(one_hot.clone());
        assert_eq!(sparse.to_dense(3, 2).unwrap(), one_hot);
        assert_eq!(dense.to_dense(3, 2).unwrap(), one_hot);
    }

    #[test]
    fn sparse_length_must_match_rows() {
        let err = Labels::Sparse(vec![0, 1]).to_dense(3, 2).unwrap_err();
        assert_eq!(
            err,
            LossError::ShapeMismatch {
                left: (3, 2),
                right: (2, 2)
            }
        );
    }

    #[test]
    fn sparse_index_must_fit_class_dimension() {
        let err = Labels::Sparse(vec![0, 5]).to_dense(2, 3).unwrap_err();
        assert_eq!(
            err,
            LossError::LabelOutOfRange {
                row: 1,
                label: 5,
                classes: 3
            }
        );
    }

    #[test]
    fn dense_shape_must_match_exactly() {
        let narrow = Batch::zeros(2, 2);
        let err = Labels::Dense(narrow).to_dense(2, 3).unwrap_err();
        assert_eq!(
            err,
            LossError::ShapeMismatch {
                left: (2, 3),
                right: (2, 2)
            }
        );
    }

    #[test]
    fn from_conversions() {
        assert_eq!(Labels::from(vec![1_u32, 2]), Labels::Sparse(vec![1, 2]));
        let batch = Batch::zeros(1, 2);
        assert_eq!(Labels::from(batch.clone()), Labels::Dense(batch));
    }
}
