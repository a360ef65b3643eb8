//! Cost function(s)

use crate::matrix::{Matrix, MatrixError};

/// Quadratic cost `C = ½ Σ (a - y)²` between an output activation and its target
pub struct QuadraticCost;

impl QuadraticCost {
    pub fn call(output: &Matrix, target: &Matrix) -> Result<f64, MatrixError> {
        let diff = output.sub(target)?;
        Ok(0.5 * diff.as_slice().iter().map(|d| d * d).sum::<f64>())
    }

    /// Partial derivative of the cost with respect to the output activation, `a - y`
    pub fn derivative(output: &Matrix, target: &Matrix) -> Result<Matrix, MatrixError> {
        output.sub(target)
    }
}

#[cfg(test)]
mod tests {
    use crate::assert_eq_float;

    use super::*;

    #[test]
    fn test_quadratic_cost() {
        let output = Matrix::from_vec(&[2.0, 3.0]);
        let target = Matrix::from_vec(&[1.0, 5.0]);
        // ½ (1 + 4)
        assert_eq_float!(QuadraticCost::call(&output, &target).unwrap(), 2.5);
        assert_eq!(
            QuadraticCost::derivative(&output, &target).unwrap().to_vec(),
            vec![1.0, -2.0]
        );
    }

    #[test]
    fn test_quadratic_cost_shape_mismatch() {
        let output = Matrix::from_vec(&[2.0, 3.0]);
        let target = Matrix::from_vec(&[1.0]);
        assert!(QuadraticCost::call(&output, &target).is_err());
    }
}
