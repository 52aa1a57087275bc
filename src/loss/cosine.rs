use serde::{Deserialize, Serialize};

use crate::error::{LossError, Result};
use crate::loss::Loss;
use crate::math::batch::Batch;

/// Small constant added to every input value so all-zero rows keep a
/// finite norm instead of dividing by zero.
const EPS: f32 = 1e-8;

/// Cosine distance between paired rows of two equally-shaped batches.
///
/// Row i contributes |cos_i - 1| to the loss, where cos_i is the cosine of
/// the angle between the shifted rows, and
///   a * cos_i / ‖a‖²  -  b / (‖a‖ ‖b‖)
/// to the gradient. `normalize` divides the scalar loss by the row count;
/// the gradient is never rescaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CosineDistance {
    /// Report the mean per-row loss instead of the sum.
    pub normalize: bool,
    /// Rows where either side is entirely zero contribute a zero gradient
    /// row and no loss, instead of a meaningless direction.
    pub ignore_zeros: bool,
}

impl CosineDistance {
    pub fn new() -> Self {
        Self::default()
    }

    fn check_shapes(guesses: &Batch, truths: &Batch) -> Result<()> {
        if guesses.shape() != truths.shape() {
            return Err(LossError::ShapeMismatch {
                left: guesses.shape(),
                right: truths.shape(),
            });
        }
        Ok(())
    }

    /// Zero-row test on the raw (unshifted) values.
    fn skip_row(&self, a: &[f32], b: &[f32]) -> bool {
        self.ignore_zeros
            && (a.iter().all(|&v| v == 0.0) || b.iter().all(|&v| v == 0.0))
    }

    /// Cosine of one row pair over the shifted values, with the two norms
    /// the gradient also needs.
    fn row_cosine(a: &[f32], b: &[f32]) -> (f32, f32, f32) {
        let mut dot = 0.0;
        let mut norm_a_sq = 0.0;
        let mut norm_b_sq = 0.0;
        for (&x, &y) in a.iter().zip(b.iter()) {
            let x = x + EPS;
            let y = y + EPS;
            dot += x * y;
            norm_a_sq += x * x;
            norm_b_sq += y * y;
        }
        let norm_a = norm_a_sq.sqrt();
        let norm_b = norm_b_sq.sqrt();
        (dot / (norm_a * norm_b), norm_a, norm_b)
    }

    fn fill_grad_row(out: &mut [f32], a: &[f32], b: &[f32]) -> f32 {
        let (cos, norm_a, norm_b) = Self::row_cosine(a, b);
        for (j, value) in out.iter_mut().enumerate() {
            let aj = a[j] + EPS;
            let bj = b[j] + EPS;
            *value = aj * cos / (norm_a * norm_a) - bj / (norm_a * norm_b);
        }
        cos
    }
}

impl Loss for CosineDistance {
    type Guesses = Batch;
    type Truths = Batch;
    type Gradient = Batch;

    fn get_grad(&self, guesses: &Batch, truths: &Batch) -> Result<Batch> {
        Self::check_shapes(guesses, truths)?;
        let (rows, cols) = guesses.shape();
        let mut data = vec![0.0; rows * cols];

        for i in 0..rows {
            let a = guesses.row(i);
            let b = truths.row(i);
            if self.skip_row(a, b) {
                continue;
            }
            Self::fill_grad_row(&mut data[i * cols..(i + 1) * cols], a, b);
        }

        Batch::from_flat(rows, cols, data)
    }

    fn get_loss(&self, guesses: &Batch, truths: &Batch) -> Result<f32> {
        Self::check_shapes(guesses, truths)?;
        let mut loss = 0.0;

        for i in 0..guesses.rows() {
            let a = guesses.row(i);
            let b = truths.row(i);
            if self.skip_row(a, b) {
                continue;
            }
            let (cos, _, _) = Self::row_cosine(a, b);
            loss += (cos - 1.0).abs();
        }

        if self.normalize && guesses.rows() > 0 {
            loss /= guesses.rows() as f32;
        }
        Ok(loss)
    }

    fn get_both(&self, guesses: &Batch, truths: &Batch) -> Result<(f32, Batch)> {
        Self::check_shapes(guesses, truths)?;
        let (rows, cols) = guesses.shape();
        let mut data = vec![0.0; rows * cols];
        let mut loss = 0.0;

        for i in 0..rows {
            let a = guesses.row(i);
            let b = truths.row(i);
            if self.skip_row(a, b) {
                continue;
            }
            let cos = Self::fill_grad_row(&mut data[i * cols..(i + 1) * cols], a, b);
            loss += (cos - 1.0).abs();
        }

        if self.normalize && rows > 0 {
            loss /= rows as f32;
        }
        let grad = Batch::from_flat(rows, cols, data)?;
        Ok((loss, grad))
    }
}
