//! Trains a small sigmoid network on one of the built-in datasets using the library provided
//! by `sigmoid_net`
//!
//! # Usage
//! Runnable via
//! ```sh
//! cargo run -- -h
//! RUST_LOG=info cargo run -- --dataset binary-counter --epochs 3000
//! ```

use sigmoid_net::{
    dataset::Dataset,
    datasets::{BuiltinDataset, binary_rounding, default_layers, load_dataset, test_inputs},
    nn::Network,
};

use clap::Parser;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

#[derive(Parser)]
struct Args {
    #[clap(short, long, default_value_t = BuiltinDataset::Half)]
    dataset: BuiltinDataset,
    /// Defaults to 50000 for `half` and 3000 for `binary-counter`
    #[clap(short, long)]
    epochs: Option<usize>,
    #[clap(short, long, default_value_t = 3.0)]
    lr: f64,
    /// Hidden layer sizes, e.g. `--hidden 8 --hidden 4`
    #[clap(long)]
    hidden: Vec<usize>,
    /// Seeds parameter initialization and shuffling for a reproducible run
    #[clap(short, long)]
    seed: Option<u64>,
    /// Logs every sample's output during training
    #[clap(short, long, default_value_t = false)]
    verbose: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();
    let (inputs, targets) = load_dataset(args.dataset);
    let epochs = args.epochs.unwrap_or(match args.dataset {
        BuiltinDataset::Half => 50_000,
        BuiltinDataset::BinaryCounter => 3_000,
    });

    let mut layers = default_layers(args.dataset);
    if !args.hidden.is_empty() {
        let output = layers[layers.len() - 1];
        layers = std::iter::once(layers[0])
            .chain(args.hidden.iter().copied())
            .chain(std::iter::once(output))
            .collect();
    }

    let (mut network, mut data) = match args.seed {
        Some(seed) => (
            Network::with_rng(&layers, &mut Pcg64Mcg::seed_from_u64(seed))?,
            Dataset::with_seed(inputs, targets, seed)?,
        ),
        None => (Network::new(&layers)?, Dataset::new(inputs, targets)?),
    };

    log::info!(
        "Training {:?} on {} ({} samples) for {} epochs, lr {}",
        layers,
        args.dataset,
        data.len(),
        epochs,
        args.lr
    );
    let initial_cost = network.evaluate(&data)?;
    network.fit(&mut data, epochs, args.lr, args.verbose)?;
    log::info!(
        "Training completed, mean cost {} -> {}",
        initial_cost,
        network.evaluate(&data)?
    );

    for x in test_inputs(args.dataset) {
        let y = network.transform(&x)?;
        match args.dataset {
            BuiltinDataset::Half => log::info!("input: {:?}, output: {:?}", x, y),
            BuiltinDataset::BinaryCounter => log::info!(
                "input: {:?}, output: {:?}, rounded: {:?}",
                x,
                y,
                binary_rounding(&y, 0.9)
            ),
        }
    }
    Ok(())
}
