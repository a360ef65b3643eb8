//! Fully connected sigmoid network trained with per-sample gradient descent

use rand::Rng;
use thiserror::Error;

use crate::{
    dataset::Dataset,
    loss::QuadraticCost,
    matrix::{Matrix, MatrixError},
};

/// Errors for the neural network
#[derive(Debug, Error, PartialEq)]
pub enum NNError {
    #[error("A network needs at least two non-empty layers, got {sizes:?}")]
    InvalidLayerSizes { sizes: Vec<usize> },
    #[error("Layer {index} expects {expected} inputs but the previous layer outputs {got}")]
    InconsistentLayers {
        index: usize,
        expected: usize,
        got: usize,
    },
    #[error("Expected gradients for {expected} layers, got {got}")]
    GradientCountMismatch { expected: usize, got: usize },
    #[error(transparent)]
    Matrix(#[from] MatrixError),
}

/// One weighted transition between two consecutive layers of neurons
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// (outputs x inputs)
    pub weights: Matrix,
    /// (outputs x 1)
    pub biases: Matrix,
}

impl Layer {
    /// Creates a layer with weights and biases drawn from the standard normal distribution
    pub fn new<R: Rng + ?Sized>(n_inputs: usize, n_outputs: usize, rng: &mut R) -> Self {
        Self {
            weights: Matrix::randn(n_outputs, n_inputs, rng),
            biases: Matrix::randn(n_outputs, 1, rng),
        }
    }

    pub fn n_inputs(&self) -> usize {
        self.weights.cols()
    }

    pub fn n_outputs(&self) -> usize {
        self.weights.rows()
    }

    fn forward(&self, input: &Matrix) -> Result<Matrix, MatrixError> {
        self.weights.dot(input)?.add(&self.biases)
    }
}

/// Intermediate values of a single forward pass
#[derive(Debug, Clone)]
pub struct ForwardPass {
    /// Output of every layer, `activations[0]` is the input itself
    pub activations: Vec<Matrix>,
    /// Pre-activation values, one per weighted layer
    pub zs: Vec<Matrix>,
}

impl ForwardPass {
    /// Activation of the final layer
    pub fn output(&self) -> &Matrix {
        // a pass always holds at least the input
        &self.activations[self.activations.len() - 1]
    }
}

/// Gradient of the cost with respect to one layer's parameters
#[derive(Debug, Clone, PartialEq)]
pub struct LayerGradient {
    pub weights: Matrix,
    pub biases: Matrix,
}

/// A fully connected feedforward network with sigmoid activations on every layer
#[derive(Debug, Clone)]
pub struct Network {
    layers: Vec<Layer>,
}

impl Network {
    /// Creates a network from per-layer neuron counts, e.g. `[3, 6, 3]`
    pub fn new(layer_sizes: &[usize]) -> Result<Self, NNError> {
        Self::with_rng(layer_sizes, &mut rand::rng())
    }

    /// Same as [`Network::new`] with an explicit source of randomness for the initial parameters
    pub fn with_rng<R: Rng + ?Sized>(layer_sizes: &[usize], rng: &mut R) -> Result<Self, NNError> {
        if layer_sizes.len() < 2 || layer_sizes.contains(&0) {
            return Err(NNError::InvalidLayerSizes {
                sizes: layer_sizes.to_vec(),
            });
        }
        let layers = layer_sizes
            .windows(2)
            .map(|w| Layer::new(w[0], w[1], rng))
            .collect();
        log::debug!("Initialized network with layer sizes {:?}", layer_sizes);
        Ok(Self { layers })
    }

    /// Creates a network from explicit parameters
    pub fn from_layers(layers: Vec<Layer>) -> Result<Self, NNError> {
        if layers.is_empty() {
            return Err(NNError::InvalidLayerSizes { sizes: vec![] });
        }
        for (index, layer) in layers.iter().enumerate() {
            if layer.biases.shape() != (layer.n_outputs(), 1) {
                return Err(MatrixError::ShapeMismatch {
                    op: "bias",
                    left: layer.weights.shape(),
                    right: layer.biases.shape(),
                }
                .into());
            }
            if index > 0 && layers[index - 1].n_outputs() != layer.n_inputs() {
                return Err(NNError::InconsistentLayers {
                    index,
                    expected: layer.n_inputs(),
                    got: layers[index - 1].n_outputs(),
                });
            }
        }
        Ok(Self { layers })
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    /// Number of layers of neurons, including the input layer
    pub fn num_layers(&self) -> usize {
        self.layers.len() + 1
    }

    /// Neuron counts per layer, including the input layer
    pub fn layer_sizes(&self) -> Vec<usize> {
        std::iter::once(self.layers[0].n_inputs())
            .chain(self.layers.iter().map(Layer::n_outputs))
            .collect()
    }

    /// Trains the network for exactly `epochs` passes over `data`, updating the parameters
    /// after every sample. The dataset is reshuffled at the start of each epoch.
    pub fn fit(
        &mut self,
        data: &mut Dataset,
        epochs: usize,
        learning_rate: f64,
        verbose: bool,
    ) -> Result<(), NNError> {
        for epoch in 0..epochs {
            data.shuffle();
            let mut epoch_cost = 0.0;
            for (x, y) in data.iter() {
                let pass = self.feedforward(x)?;
                if verbose {
                    log::info!(
                        "epoch: {}, input: {:?}, output: {:?}",
                        epoch,
                        x.as_slice(),
                        pass.output().as_slice()
                    );
                }
                epoch_cost += QuadraticCost::call(pass.output(), y)?;
                let gradients = self.backprop(y, &pass)?;
                self.update(learning_rate, &gradients)?;
            }
            log::debug!("epoch: {}, epoch_cost: {}", epoch, epoch_cost);
        }
        Ok(())
    }

    /// Runs inference on a single input vector
    pub fn transform(&self, x: &[f64]) -> Result<Vec<f64>, NNError> {
        let pass = self.feedforward(&Matrix::from_vec(x))?;
        Ok(pass.output().to_vec())
    }

    /// Mean quadratic cost over every sample of `data`
    pub fn evaluate(&self, data: &Dataset) -> Result<f64, NNError> {
        if data.is_empty() {
            return Ok(0.0);
        }
        let mut total = 0.0;
        for (x, y) in data.iter() {
            total += QuadraticCost::call(self.feedforward(x)?.output(), y)?;
        }
        Ok(total / data.len() as f64)
    }

    /// Computes every layer's activation and pre-activation for the column vector `x`
    pub fn feedforward(&self, x: &Matrix) -> Result<ForwardPass, NNError> {
        let mut activations = Vec::with_capacity(self.layers.len() + 1);
        let mut zs = Vec::with_capacity(self.layers.len());
        activations.push(x.clone());
        for layer in &self.layers {
            let z = layer.forward(&activations[activations.len() - 1])?;
            activations.push(z.sigmoid());
            zs.push(z);
        }
        Ok(ForwardPass { activations, zs })
    }

    /// Gradients of the quadratic cost for target `y`, given the forward pass of the matching
    /// input. Returned in layer order, input side first.
    pub fn backprop(&self, y: &Matrix, pass: &ForwardPass) -> Result<Vec<LayerGradient>, NNError> {
        let n = self.layers.len();
        if pass.zs.len() != n || pass.activations.len() != n + 1 {
            return Err(NNError::GradientCountMismatch {
                expected: n,
                got: pass.zs.len(),
            });
        }

        // Walk the layers from the output back to the input. Each step sees the layer's own
        // input activation and z, plus the layer above it and that layer's delta.
        let mut gradients = Vec::with_capacity(n);
        let mut upstream: Option<(&Layer, Matrix)> = None;
        let steps = self
            .layers
            .iter()
            .zip(pass.activations[..n].iter())
            .zip(pass.zs.iter())
            .rev();
        for ((layer, a_in), z) in steps {
            let error = match &upstream {
                None => QuadraticCost::derivative(pass.output(), y)?,
                Some((above, delta)) => above.weights.transpose().dot(delta)?,
            };
            let delta = error.mul(&z.sigmoid_prime())?;
            gradients.push(LayerGradient {
                weights: delta.dot(&a_in.transpose())?,
                biases: delta.clone(),
            });
            upstream = Some((layer, delta));
        }
        gradients.reverse();
        Ok(gradients)
    }

    /// Plain gradient descent step: `p <- p - learning_rate * dp` for every weight and bias
    pub fn update(
        &mut self,
        learning_rate: f64,
        gradients: &[LayerGradient],
    ) -> Result<(), NNError> {
        if gradients.len() != self.layers.len() {
            return Err(NNError::GradientCountMismatch {
                expected: self.layers.len(),
                got: gradients.len(),
            });
        }
        for (layer, grad) in self.layers.iter_mut().zip(gradients) {
            let biases = layer.biases.sub(&grad.biases.scale(learning_rate))?;
            let weights = layer.weights.sub(&grad.weights.scale(learning_rate))?;
            layer.biases = biases;
            layer.weights = weights;
        }
        Ok(())
    }
}
