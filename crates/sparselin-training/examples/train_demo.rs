//! Online linear training demo.
//!
//! Generates a synthetic binary classification dataset, trains a linear
//! model with the selected optimizer, and reports per-epoch metrics plus
//! final model sparsity.
//!
//! ## Running the Example
//!
//! ```bash
//! cargo run --example train_demo -- --optimizer ftrl --num-epochs 10
//! ```

use clap::Parser;
use tracing::info;

use sparselin_core::{OptimizerConfig, SparseRow};
use sparselin_training::{Example, LogisticLoss, Trainer};

/// Command-line arguments for the training demo.
#[derive(Parser, Debug)]
#[command(name = "train_demo")]
#[command(about = "Online linear training demo for sparselin")]
struct Args {
    /// Optimizer variant ("adagrad" or "ftrl")
    #[arg(long, default_value = "adagrad")]
    optimizer: String,

    /// Number of training epochs
    #[arg(long, default_value = "10")]
    num_epochs: usize,

    /// Learning rate for the optimizer
    #[arg(long, default_value = "0.1")]
    learning_rate: f32,

    /// L2 regularization strength
    #[arg(long, default_value = "0.0")]
    l2_reg: f32,

    /// Size of the dense feature id space
    #[arg(long, default_value = "1000")]
    num_features: usize,

    /// Number of synthetic training examples
    #[arg(long, default_value = "5000")]
    num_examples: usize,

    /// Random seed for reproducibility
    #[arg(long, default_value = "42")]
    seed: u64,
}

/// A simple pseudo-random number generator for reproducible data.
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        // LCG parameters from Numerical Recipes
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    fn next_f32(&mut self) -> f32 {
        (self.next_u64() >> 40) as f32 / (1u64 << 24) as f32
    }

    fn next_usize(&mut self, max: usize) -> usize {
        (self.next_u64() as usize) % max
    }
}

/// Generates a synthetic dataset where a small set of informative
/// features decides the label and the rest is background noise.
fn generate_dataset(args: &Args, rng: &mut SimpleRng) -> Vec<Example> {
    let informative = (args.num_features / 10).max(2);
    let mut dataset = Vec::with_capacity(args.num_examples);

    for _ in 0..args.num_examples {
        let mut row = SparseRow::new();
        let mut signal = 0.0f32;

        // A handful of informative features, positive ids voting +,
        // negative ids voting -.
        for _ in 0..3 {
            let id = rng.next_usize(informative);
            let vote = if id % 2 == 0 { 1.0 } else { -1.0 };
            signal += vote;
            row.push(id as u32, 1.0);
        }

        // Background features carry no label information.
        for _ in 0..5 {
            let id = informative + rng.next_usize(args.num_features - informative);
            row.push(id as u32, rng.next_f32());
        }

        let label = if signal > 0.0 { 1.0 } else { -1.0 };
        dataset.push((row, label));
    }

    dataset
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let args = Args::parse();

    // Fail fast on an unknown optimizer name or an out-of-range learning
    // rate, before any training work starts.
    let config = match OptimizerConfig::from_name(&args.optimizer, args.learning_rate, args.l2_reg)
    {
        Ok(config) => config,
        Err(err) => {
            eprintln!("invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    info!(
        optimizer = config.variant.as_key(),
        learning_rate = config.learning_rate,
        l2_reg = config.l2_reg,
        num_features = args.num_features,
        num_examples = args.num_examples,
        "starting training"
    );

    let mut rng = SimpleRng::new(args.seed);
    let dataset = generate_dataset(&args, &mut rng);

    let mut trainer = Trainer::new(&config, args.num_features, Box::new(LogisticLoss));
    let reports = match trainer.fit(&dataset, args.num_epochs) {
        Ok(reports) => reports,
        Err(err) => {
            eprintln!("training failed: {err}");
            std::process::exit(1);
        }
    };

    let store = trainer.store();
    info!(
        final_loss = reports.last().map(|m| m.loss),
        final_accuracy = reports.last().and_then(|m| m.accuracy),
        active_weights = store.active_weights(),
        num_features = store.num_features(),
        "training complete"
    );

    println!("=== sparselin training demo ===");
    for (epoch, metrics) in reports.iter().enumerate() {
        match metrics.accuracy {
            Some(accuracy) => println!(
                "epoch {:3} | loss {:.4} | accuracy {:.4}",
                epoch, metrics.loss, accuracy
            ),
            None => println!("epoch {:3} | loss {:.4}", epoch, metrics.loss),
        }
    }
    println!(
        "active weights: {} / {}",
        store.active_weights(),
        store.num_features()
    );
}
