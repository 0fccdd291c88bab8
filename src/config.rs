use std::path::PathBuf;

use clap::Parser;

/// Step length of the gradient descent, tuned for mileages scaled to `[0, 1]`.
pub const LEARNING_RATE: f64 = 0.1;

pub const DEFAULT_DATASET_PATH: &str = "data.csv";
pub const DEFAULT_MODEL_PATH: &str = "model.txt";
pub const DEFAULT_PLOT_DIR: &str = "plots";

pub const DEFAULT_LOG_FILTER: &str = "info";

/// `RUST_LOG` overrides the default filter.
pub fn init_logging() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .format_timestamp(None)
        .init();
}

/// Fit a price-by-mileage line with gradient descent and store it.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct TrainArgs {
    #[clap(short, long, env = "MILEAGE_DATASET", default_value = DEFAULT_DATASET_PATH)]
    pub dataset: PathBuf,

    /// Written as JSON when the extension is `.json`, as key=value lines otherwise.
    #[clap(short, long, env = "MILEAGE_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Asked for interactively when omitted.
    #[clap(short, long, allow_negative_numbers = true)]
    pub iterations: Option<String>,

    #[clap(long, default_value = DEFAULT_PLOT_DIR)]
    pub plot_dir: PathBuf,

    #[clap(long)]
    pub no_plot: bool,

    /// Do not print the coefficients after every iteration.
    #[clap(short, long)]
    pub quiet: bool,
}

/// Estimate a car price from its mileage using a trained model.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct PredictArgs {
    #[clap(short, long, env = "MILEAGE_MODEL", default_value = DEFAULT_MODEL_PATH)]
    pub model: PathBuf,

    /// Asked for interactively when omitted.
    #[clap(short = 'k', long, allow_negative_numbers = true)]
    pub mileage: Option<String>,

    /// Fall back to the all-zero model when no model has been trained yet.
    #[clap(long)]
    pub allow_untrained: bool,
}
