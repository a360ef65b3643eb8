//! Small built-in datasets for demonstrating training, plus helpers for reading binary outputs

use std::fmt::{self, Display};

use clap::ValueEnum;

/// Toggles between dataset types
#[derive(Debug, ValueEnum, Clone, Copy, PartialEq, Eq)]
pub enum BuiltinDataset {
    /// Maps a value in [0, 1] to half of itself
    Half,
    /// Maps each 3-bit pattern to its successor, wrapping 111 to 000
    BinaryCounter,
}

impl Display for BuiltinDataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuiltinDataset::Half => write!(f, "half"),
            BuiltinDataset::BinaryCounter => write!(f, "binary-counter"),
        }
    }
}

/// Loads a dataset as raw `(inputs, targets)` vectors
pub fn load_dataset(dataset: BuiltinDataset) -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    match dataset {
        BuiltinDataset::Half => gen_half_data(),
        BuiltinDataset::BinaryCounter => gen_binary_counter_data(),
    }
}

/// Layer sizes that train well on the given dataset
pub fn default_layers(dataset: BuiltinDataset) -> Vec<usize> {
    match dataset {
        BuiltinDataset::Half => vec![1, 4, 1],
        BuiltinDataset::BinaryCounter => vec![3, 6, 3],
    }
}

/// Inputs to run inference on after training
pub fn test_inputs(dataset: BuiltinDataset) -> Vec<Vec<f64>> {
    match dataset {
        BuiltinDataset::Half => vec![vec![0.1], vec![0.2], vec![0.6], vec![0.8]],
        BuiltinDataset::BinaryCounter => vec![
            vec![1.0, 0.0, 0.0],
            vec![1.0, 1.0, 1.0],
            vec![0.0, 0.0, 0.0],
        ],
    }
}

pub fn gen_half_data() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let inputs = [0.2, 0.3, 0.4, 0.5, 0.8];
    let data = inputs.iter().map(|&x| vec![x]).collect();
    let labels = inputs.iter().map(|&x| vec![x / 2.0]).collect();
    (data, labels)
}

pub fn gen_binary_counter_data() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let bits = |n: u8| -> Vec<f64> { (0..3).rev().map(|b| ((n >> b) & 1) as f64).collect() };
    let data = (0..8).map(bits).collect();
    let labels = (0..8).map(|n| bits((n + 1) % 8)).collect();
    (data, labels)
}

/// Rounds each value to 1 when it reaches `threshold`, otherwise to 0
pub fn binary_rounding(values: &[f64], threshold: f64) -> Vec<u8> {
    values
        .iter()
        .map(|&v| if v >= threshold { 1 } else { 0 })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_half_data() {
        let (data, labels) = load_dataset(BuiltinDataset::Half);
        assert_eq!(data.len(), 5);
        assert_eq!(labels[4], vec![0.4]);
        assert_eq!(labels[1], vec![0.15]);
    }

    #[test]
    fn test_binary_counter_data() {
        let (data, labels) = load_dataset(BuiltinDataset::BinaryCounter);
        assert_eq!(data.len(), 8);
        assert_eq!(data[1], vec![0.0, 0.0, 1.0]);
        assert_eq!(labels[1], vec![0.0, 1.0, 0.0]);
        assert_eq!(data[4], vec![1.0, 0.0, 0.0]);
        assert_eq!(labels[4], vec![1.0, 0.0, 1.0]);
        assert_eq!(labels[7], vec![0.0, 0.0, 0.0]);
        // every target is the next input
        for i in 0..8 {
            assert_eq!(labels[i], data[(i + 1) % 8]);
        }
    }

    #[test]
    fn test_binary_rounding() {
        let values = vec![0.95, 0.5, 0.9, 0.1];
        assert_eq!(binary_rounding(&values, 0.9), vec![1, 0, 1, 0]);
        assert_eq!(binary_rounding(&values, 0.5), vec![1, 1, 1, 0]);
        // input is left as is
        assert_eq!(values, vec![0.95, 0.5, 0.9, 0.1]);
    }

    #[test]
    fn test_defaults_match_data() {
        for dataset in [BuiltinDataset::Half, BuiltinDataset::BinaryCounter] {
            let (data, labels) = load_dataset(dataset);
            let layers = default_layers(dataset);
            assert_eq!(layers[0], data[0].len());
            assert_eq!(layers[layers.len() - 1], labels[0].len());
            assert!(test_inputs(dataset).iter().all(|x| x.len() == layers[0]));
        }
    }
}
