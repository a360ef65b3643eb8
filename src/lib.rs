//! A minimal fully connected feedforward neural network with sigmoid activations,
//! trained by backpropagation and per-sample gradient descent.

pub mod activation;
pub mod dataset;
pub mod datasets;
pub mod loss;
pub mod matrix;
pub mod nn;
