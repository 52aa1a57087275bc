use crate::error::{LossError, Result};

/// A dense 2-D batch of `f32` values, one example per row.
///
/// Storage is row-major and flat; `rows * cols == data.len()` always holds.
#[derive(Debug, Clone, PartialEq)]
pub struct Batch {
    rows: usize,
    cols: usize,
    data: Vec<f32>,
}

impl Batch {
    pub fn zeros(rows: usize, cols: usize) -> Batch {
        Batch {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Builds a batch from nested rows. All rows must have the same width;
    /// ragged input is rejected. An empty outer vec gives the 0x0 batch.
    pub fn from_rows(rows: Vec<Vec<f32>>) -> Result<Batch> {
        let n = rows.len();
        let cols = rows.first().map_or(0, |r| r.len());
        let mut data = Vec::with_capacity(n * cols);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != cols {
                return Err(LossError::InvalidData(format!(
                    "ragged rows: row {} has {} values, expected {}",
                    i,
                    row.len(),
                    cols
                )));
            }
            data.extend(row);
        }

        Ok(Batch { rows: n, cols, data })
    }

    /// Builds a batch from an already-flat row-major buffer.
    pub fn from_flat(rows: usize, cols: usize, data: Vec<f32>) -> Result<Batch> {
        if data.len() != rows * cols {
            return Err(LossError::InvalidData(format!(
                "flat buffer of length {} does not fill {}x{}",
                data.len(),
                rows,
                cols
            )));
        }
        Ok(Batch { rows, cols, data })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// One row as a slice. Panics if `r` is out of bounds.
    pub fn row(&self, r: usize) -> &[f32] {
        &self.data[r * self.cols..(r + 1) * self.cols]
    }

    /// One value. Panics if out of bounds.
    pub fn get(&self, r: usize, c: usize) -> f32 {
        self.data[r * self.cols + c]
    }

    pub fn map<F>(&self, functor: F) -> Batch
    where
        F: Fn(f32) -> f32,
    {
        Batch {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&x| functor(x)).collect(),
        }
    }

    /// Sum of the squares of every value.
    pub fn squared_sum(&self) -> f32 {
        self.data.iter().map(|x| x * x).sum()
    }
}

impl Default for Batch {
    fn default() -> Self {
        Batch {
            rows: 0,
            cols: 0,
            data: vec![],
        }
    }
}
