//! Training dataset of paired input/target vectors

use std::collections::HashSet;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg64Mcg;
use thiserror::Error;

use crate::matrix::Matrix;

/// Errors for the dataset
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    #[error("Targets must have the same length as the inputs")]
    LengthMismatch { inputs: usize, targets: usize },
    #[error(
        "All input vectors must have the same dimension. Received different sizes: {input_dims:?}"
    )]
    InputDimensionMismatch { input_dims: HashSet<usize> },
    #[error(
        "All target vectors must have the same dimension. Received different sizes: {target_dims:?}"
    )]
    TargetDimensionMismatch { target_dims: HashSet<usize> },
}

/// Input/target pairs stored as column vectors in lock-step.
///
/// The dataset owns the generator used by [`Dataset::shuffle`], so seeding it makes every
/// epoch ordering reproducible.
#[derive(Debug, Clone)]
pub struct Dataset {
    inputs: Vec<Matrix>,
    targets: Vec<Matrix>,
    rng: Pcg64Mcg,
}

impl Dataset {
    /// Creates a dataset whose shuffle generator is seeded from the thread-local RNG
    pub fn new(inputs: Vec<Vec<f64>>, targets: Vec<Vec<f64>>) -> Result<Self, DatasetError> {
        Self::with_rng(inputs, targets, Pcg64Mcg::from_rng(&mut rand::rng()))
    }

    /// Creates a dataset with a deterministic shuffle order
    pub fn with_seed(
        inputs: Vec<Vec<f64>>,
        targets: Vec<Vec<f64>>,
        seed: u64,
    ) -> Result<Self, DatasetError> {
        Self::with_rng(inputs, targets, Pcg64Mcg::seed_from_u64(seed))
    }

    fn with_rng(
        inputs: Vec<Vec<f64>>,
        targets: Vec<Vec<f64>>,
        rng: Pcg64Mcg,
    ) -> Result<Self, DatasetError> {
        if inputs.len() != targets.len() {
            return Err(DatasetError::LengthMismatch {
                inputs: inputs.len(),
                targets: targets.len(),
            });
        }
        let input_dims = inputs.iter().map(|x| x.len()).collect::<HashSet<_>>();
        if input_dims.len() > 1 {
            return Err(DatasetError::InputDimensionMismatch { input_dims });
        }
        let target_dims = targets.iter().map(|y| y.len()).collect::<HashSet<_>>();
        if target_dims.len() > 1 {
            return Err(DatasetError::TargetDimensionMismatch { target_dims });
        }
        Ok(Self {
            inputs: inputs.iter().map(|x| Matrix::from_vec(x)).collect(),
            targets: targets.iter().map(|y| Matrix::from_vec(y)).collect(),
            rng,
        })
    }

    /// Replaces the shuffle generator's state
    pub fn reseed(&mut self, seed: u64) {
        self.rng = Pcg64Mcg::seed_from_u64(seed);
    }

    /// Fisher-Yates shuffle applied to inputs and targets in lock-step
    pub fn shuffle(&mut self) {
        for i in 0..self.inputs.len() {
            let j = self.rng.random_range(0..=i);
            self.inputs.swap(i, j);
            self.targets.swap(i, j);
        }
    }

    /// Number of sample pairs
    pub fn len(&self) -> usize {
        self.inputs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inputs.is_empty()
    }

    /// Dimension of every input vector, `None` for an empty dataset
    pub fn input_dim(&self) -> Option<usize> {
        self.inputs.first().map(Matrix::rows)
    }

    /// Dimension of every target vector, `None` for an empty dataset
    pub fn target_dim(&self) -> Option<usize> {
        self.targets.first().map(Matrix::rows)
    }

    pub fn get(&self, index: usize) -> Option<(&Matrix, &Matrix)> {
        Some((self.inputs.get(index)?, self.targets.get(index)?))
    }

    /// Iterates over `(input, target)` pairs in the current order
    pub fn iter(&self) -> impl Iterator<Item = (&Matrix, &Matrix)> {
        self.inputs.iter().zip(self.targets.iter())
    }
}
