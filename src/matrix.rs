//! Dense row-major matrices of `f64`
//!
//! Every operation returns a newly owned matrix and leaves its operands untouched, so
//! activations and parameters can be reused freely in gradient formulas.

use std::fmt::{self, Display};

use rand::Rng;
use rand_distr::{Distribution, StandardNormal};
use thiserror::Error;

use crate::activation::{sigmoid, sigmoid_prime};

/// Errors for matrix arithmetic
#[derive(Debug, Error, PartialEq)]
pub enum MatrixError {
    #[error("Shape mismatch in {op}: {left:?} vs {right:?}")]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    #[error("Expected {expected} elements, got {got}")]
    DataLength { expected: usize, got: usize },
}

/// A 2D matrix stored in row-major order
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Matrix {
    /// Creates a matrix from row-major data
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MatrixError> {
        if data.len() != rows * cols {
            return Err(MatrixError::DataLength {
                expected: rows * cols,
                got: data.len(),
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Creates a column vector (n x 1)
    pub fn from_vec(values: &[f64]) -> Self {
        Self {
            rows: values.len(),
            cols: 1,
            data: values.to_vec(),
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            data: vec![0.0; rows * cols],
        }
    }

    /// Creates a matrix of independent draws from the standard normal distribution
    pub fn randn<R: Rng + ?Sized>(rows: usize, cols: usize, rng: &mut R) -> Self {
        let data = (0..rows * cols)
            .map(|_| -> f64 { StandardNormal.sample(rng) })
            .collect();
        Self { rows, cols, data }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns `(rows, cols)`
    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn get(&self, row: usize, col: usize) -> Option<f64> {
        if row < self.rows && col < self.cols {
            Some(self.data[row * self.cols + col])
        } else {
            None
        }
    }

    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Flattens the matrix into a vector in row-major order
    pub fn to_vec(&self) -> Vec<f64> {
        self.data.clone()
    }

    /// Elementwise sum
    pub fn add(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        self.zip_with(other, "add", |a, b| a + b)
    }

    /// Elementwise difference
    pub fn sub(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        self.zip_with(other, "sub", |a, b| a - b)
    }

    /// Elementwise (Hadamard) product
    pub fn mul(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        self.zip_with(other, "mul", |a, b| a * b)
    }

    pub fn scale(&self, factor: f64) -> Matrix {
        self.map(|v| v * factor)
    }

    pub fn transpose(&self) -> Matrix {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.data[r * self.cols + c]);
            }
        }
        Matrix {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    /// Matrix product `self · other`
    pub fn dot(&self, other: &Matrix) -> Result<Matrix, MatrixError> {
        if self.cols != other.rows {
            return Err(MatrixError::ShapeMismatch {
                op: "dot",
                left: self.shape(),
                right: other.shape(),
            });
        }
        let mut data = vec![0.0; self.rows * other.cols];
        for r in 0..self.rows {
            for k in 0..self.cols {
                let lhs = self.data[r * self.cols + k];
                let rhs_row = &other.data[k * other.cols..(k + 1) * other.cols];
                let out_row = &mut data[r * other.cols..(r + 1) * other.cols];
                for (out, rhs) in out_row.iter_mut().zip(rhs_row) {
                    *out += lhs * rhs;
                }
            }
        }
        Ok(Matrix {
            rows: self.rows,
            cols: other.cols,
            data,
        })
    }

    /// Applies `f` to every element
    pub fn map<F: Fn(f64) -> f64>(&self, f: F) -> Matrix {
        Matrix {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(|&v| f(v)).collect(),
        }
    }

    pub fn sigmoid(&self) -> Matrix {
        self.map(sigmoid)
    }

    pub fn sigmoid_prime(&self) -> Matrix {
        self.map(sigmoid_prime)
    }

    fn zip_with<F: Fn(f64, f64) -> f64>(
        &self,
        other: &Matrix,
        op: &'static str,
        f: F,
    ) -> Result<Matrix, MatrixError> {
        if self.shape() != other.shape() {
            return Err(MatrixError::ShapeMismatch {
                op,
                left: self.shape(),
                right: other.shape(),
            });
        }
        let data = self
            .data
            .iter()
            .zip(other.data.iter())
            .map(|(&a, &b)| f(a, b))
            .collect();
        Ok(Matrix {
            rows: self.rows,
            cols: self.cols,
            data,
        })
    }
}

impl Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            let row = &self.data[r * self.cols..(r + 1) * self.cols];
            writeln!(f, "{:?}", row)?;
        }
        Ok(())
    }
}
