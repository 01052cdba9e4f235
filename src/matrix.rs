//! Dense real matrices used for strategies and game kernels
//!
//! Sender and Receiver strategies are row-stochastic: every row is a
//! probability distribution. The operations here always return new
//! matrices, so a caller can keep the "before" value of a strategy and
//! compare it with the "after" value.

use std::fmt;

use rand::{Rng, distr::StandardUniform};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, utils};

/// Row-major matrix of `f64`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Matrix of zeros
    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Square identity matrix
    pub fn identity(size: usize) -> Self {
        Self::from_fn(size, size, |i, j| if i == j { 1.0 } else { 0.0 })
    }

    /// Build a matrix entry by entry
    pub fn from_fn(rows: usize, cols: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut data = Vec::with_capacity(rows * cols);
        for i in 0..rows {
            for j in 0..cols {
                data.push(f(i, j));
            }
        }
        Self { rows, cols, data }
    }

    /// Build a matrix from nested rows.
    ///
    /// # Errors
    ///
    /// Returns [`Error::RaggedMatrix`] if the rows have different lengths.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);
        let mut data = Vec::with_capacity(n_rows * n_cols);
        for (row_idx, row) in rows.into_iter().enumerate() {
            if row.len() != n_cols {
                return Err(Error::RaggedMatrix {
                    row: row_idx,
                    expected: n_cols,
                    got: row.len(),
                });
            }
            data.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            cols: n_cols,
            data,
        })
    }

    /// Random row-stochastic matrix: uniform draws in `[0, 1)`, each row
    /// normalised to sum to one.
    pub fn random_stochastic<R: Rng>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let raw = Self::from_fn(rows, cols, |_, _| rng.sample(StandardUniform));
        raw.normalize_rows()
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

    /// Entry at `(i, j)`. Panics when out of bounds, like slice indexing.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        self.data[i * self.cols + j]
    }

    pub fn set(&mut self, i: usize, j: usize, value: f64) {
        assert!(i < self.rows && j < self.cols, "index ({i}, {j}) out of bounds");
        self.data[i * self.cols + j] = value;
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.cols..(i + 1) * self.cols]
    }

    pub fn row_iter(&self) -> impl Iterator<Item = &[f64]> {
        // chunks_exact(0) panics, an empty matrix has no rows anyway
        self.data.chunks_exact(self.cols.max(1)).take(self.rows)
    }

    pub fn column(&self, j: usize) -> Vec<f64> {
        (0..self.rows).map(|i| self.get(i, j)).collect()
    }

    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        self.row_iter().map(<[f64]>::to_vec).collect()
    }

    pub fn sum(&self) -> f64 {
        self.data.iter().sum()
    }

    pub fn transpose(&self) -> Self {
        Self::from_fn(self.cols, self.rows, |i, j| self.get(j, i))
    }

    /// Matrix product `self · other`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] if the inner dimensions differ.
    pub fn matmul(&self, other: &Matrix) -> Result<Matrix> {
        if self.cols != other.rows {
            return Err(Error::ShapeMismatch {
                context: "matrix product".to_string(),
                expected_rows: self.cols,
                expected_cols: other.cols,
                rows: other.rows,
                cols: other.cols,
            });
        }
        Ok(Self::from_fn(self.rows, other.cols, |i, j| {
            (0..self.cols).map(|k| self.get(i, k) * other.get(k, j)).sum()
        }))
    }

    /// Entrywise (Hadamard) product.
    pub fn hadamard(&self, other: &Matrix) -> Result<Matrix> {
        self.ensure_shape(other.rows, other.cols, "entrywise product")?;
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| a * b)
                .collect(),
        })
    }

    /// Apply `f` to every entry.
    pub fn map(&self, f: impl Fn(f64) -> f64) -> Matrix {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    /// Replace every row with `f(row_index, row)`.
    ///
    /// `f` must return a row of the same length.
    pub fn map_rows(&self, mut f: impl FnMut(usize, &[f64]) -> Vec<f64>) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for (i, row) in self.row_iter().enumerate() {
            let mapped = f(i, row);
            debug_assert_eq!(mapped.len(), self.cols);
            data.extend(mapped);
        }
        Self {
            rows: self.rows,
            cols: self.cols,
            data,
        }
    }

    /// Divide every row by its own sum; all-zero rows become uniform.
    pub fn normalize_rows(&self) -> Matrix {
        self.map_rows(|_, row| utils::make_distribution(row))
    }

    /// Sum of absolute entrywise differences.
    pub fn l1_distance(&self, other: &Matrix) -> Result<f64> {
        self.ensure_shape(other.rows, other.cols, "distance")?;
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .sum())
    }

    /// Largest absolute entrywise difference.
    pub fn max_abs_difference(&self, other: &Matrix) -> Result<f64> {
        self.ensure_shape(other.rows, other.cols, "distance")?;
        Ok(self
            .data
            .iter()
            .zip(&other.data)
            .map(|(a, b)| (a - b).abs())
            .fold(0.0, f64::max))
    }

    /// Whether every row is a probability distribution within `tolerance`.
    pub fn is_row_stochastic(&self, tolerance: f64) -> bool {
        self.row_iter().all(|row| {
            row.iter().all(|&p| p >= 0.0) && (row.iter().sum::<f64>() - 1.0).abs() <= tolerance
        })
    }

    /// Check that the matrix is `rows × cols`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ShapeMismatch`] naming `context` otherwise.
    pub fn ensure_shape(&self, rows: usize, cols: usize, context: &str) -> Result<()> {
        if self.rows != rows || self.cols != cols {
            return Err(Error::ShapeMismatch {
                context: context.to_string(),
                expected_rows: rows,
                expected_cols: cols,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(())
    }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.row_iter() {
            let cells: Vec<String> = row.iter().map(|v| format!("{v:.3}")).collect();
            writeln!(f, "[{}]", cells.join(", "))?;
        }
        Ok(())
    }
}
