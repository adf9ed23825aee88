use rand::Rng;
use serde::{Serialize, Deserialize};
use std::f64::consts::PI;
use std::ops::Sub;

use crate::error::{RbmError, Result};

/// Row-major dense matrix. One row per sample for activations, one row per
/// visible unit for RBM weights.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Matrix{
    pub rows: usize,
    pub cols: usize,
    pub data: Vec<Vec<f64>>
}

impl Matrix{
    pub fn zeros(rows: usize, cols: usize) -> Matrix {
        Matrix{
            rows,
            cols,
            data: vec![vec![0.0; cols]; rows]
        }
    }

    /// Builds a matrix from sample rows, rejecting empty input and ragged rows.
    pub fn from_rows(rows: &[Vec<f64>]) -> Result<Matrix> {
        let first = rows
            .first()
            .ok_or_else(|| RbmError::InvalidArgument("batch must contain at least one row".into()))?;
        let cols = first.len();
        for (i, row) in rows.iter().enumerate() {
            if row.len() != cols {
                return Err(RbmError::shape(format!("row {}", i), cols, row.len()));
            }
        }
        Ok(Matrix {
            rows: rows.len(),
            cols,
            data: rows.to_vec(),
        })
    }

    /// Single-row matrix holding `values`.
    pub fn row_vector(values: &[f64]) -> Matrix {
        Matrix {
            rows: 1,
            cols: values.len(),
            data: vec![values.to_vec()],
        }
    }

    /// Samples a single value from N(0, 1) using the Box-Muller transform.
    fn sample_standard_normal<R: Rng + ?Sized>(rng: &mut R) -> f64 {
        // (0, 1] keeps ln() finite.
        let u1: f64 = 1.0 - rng.gen::<f64>();
        let u2: f64 = 1.0 - rng.gen::<f64>();
        (-2.0 * u1.ln()).sqrt() * (2.0 * PI * u2).cos()
    }

    /// Samples every entry from N(0, std_dev).
    pub fn gaussian<R: Rng + ?Sized>(rows: usize, cols: usize, std_dev: f64, rng: &mut R) -> Matrix {
        let mut res = Matrix::zeros(rows, cols);
        for row in res.data.iter_mut() {
            for x in row.iter_mut() {
                *x = Matrix::sample_standard_normal(rng) * std_dev;
            }
        }
        res
    }

    /// Xavier (Glorot) initialization: N(0, sqrt(2 / (rows + cols))).
    ///
    /// An RBM weight matrix is used in both directions, so both dimensions
    /// count as fan-in.
    pub fn xavier<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Matrix {
        let std_dev = (2.0 / (rows + cols) as f64).sqrt();
        Matrix::gaussian(rows, cols, std_dev, rng)
    }

    pub fn transpose(&self) -> Matrix {
        let mut res = Matrix::zeros(self.cols, self.rows);

        for i in 0..res.rows {
            for j in 0..res.cols {
                res.data[i][j] = self.data[j][i];
            }
        }

        res
    }

    pub fn map<F>(&self, functor: F) -> Matrix
    where
        F: Fn(f64) -> f64,
    {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data
                .iter()
                .map(|row| row.iter().map(|&x| functor(x)).collect())
                .collect(),
        }
    }

    /// `self · rhs`, reading `rhs` column-wise in place.
    pub fn dot(&self, rhs: &Matrix) -> Matrix {
        if self.cols != rhs.rows {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, rhs.cols);

        for i in 0..res.rows {
            for j in 0..res.cols {
                let mut sum = 0.0;

                for k in 0..self.cols {
                    sum += self.data[i][k] * rhs.data[k][j];
                }

                res.data[i][j] = sum;
            }
        }

        res
    }

    /// `self · rhsᵀ`. Both operands are walked row-wise, which keeps the
    /// inner loop contiguous. Summation order matches `dot`.
    pub fn dot_transposed(&self, rhs: &Matrix) -> Matrix {
        if self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, rhs.rows);

        for (out_row, lhs_row) in res.data.iter_mut().zip(self.data.iter()) {
            for (out, rhs_row) in out_row.iter_mut().zip(rhs.data.iter()) {
                let mut sum = 0.0;
                for (a, b) in lhs_row.iter().zip(rhs_row.iter()) {
                    sum += a * b;
                }
                *out = sum;
            }
        }

        res
    }

    /// Adds `bias` to every row.
    pub fn add_row_vector(&self, bias: &[f64]) -> Matrix {
        assert_eq!(self.cols, bias.len(), "bias length must match column count");
        let data = self.data.iter()
            .map(|row| row.iter().zip(bias.iter()).map(|(x, b)| x + b).collect())
            .collect();
        Matrix { rows: self.rows, cols: self.cols, data }
    }

    /// Mean of each column.
    pub fn column_means(&self) -> Vec<f64> {
        let mut means = vec![0.0; self.cols];
        for row in &self.data {
            for (m, x) in means.iter_mut().zip(row.iter()) {
                *m += x;
            }
        }
        let inv = 1.0 / self.rows as f64;
        means.iter_mut().for_each(|m| *m *= inv);
        means
    }

    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i]
    }

    /// Copies rows `start..end` into a new matrix.
    pub fn slice_rows(&self, start: usize, end: usize) -> Matrix {
        Matrix {
            rows: end - start,
            cols: self.cols,
            data: self.data[start..end].to_vec(),
        }
    }
}

impl Sub for &Matrix {
    type Output = Matrix;

    fn sub(self, rhs: Self) -> Self::Output {
        if self.rows != rhs.rows || self.cols != rhs.cols {
            panic!("Matrices are of incorrect sizes")
        }

        let mut res = Matrix::zeros(self.rows, self.cols);

        for i in 0..self.rows {
            for j in 0..self.cols {
                res.data[i][j] = self.data[i][j] - rhs.data[i][j];
            }
        }

        res
    }
}
