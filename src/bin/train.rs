use std::io;

use anyhow::Context;
use clap::Parser;
use log::{debug, info, warn};

use mileage_regression::config::{self, TrainArgs};
use mileage_regression::model_store::ModelStore;
use mileage_regression::trainer::{self, GradientDescentTrainer};
use mileage_regression::{dataset, plots, prompt, reference};

fn main() -> anyhow::Result<()> {
    config::init_logging();

    let TrainArgs {
        dataset,
        model,
        iterations,
        plot_dir,
        no_plot,
        quiet,
    } = TrainArgs::parse();

    let samples = dataset::read_samples_from_path(&dataset)
        .with_context(|| format!("failed to read dataset {}", dataset.display()))?;

    info!("loaded {} samples from {}", samples.len(), dataset.display());

    let iterations = match iterations {
        Some(iterations) => iterations,
        None => prompt::ask("Amount of iterations: ", io::stdin().lock(), io::stdout())?,
    };
    let iterations = prompt::parse_iterations(&iterations)?;

    let gradient_descent = GradientDescentTrainer::new(config::LEARNING_RATE);

    let trained = trainer::train_model(&gradient_descent, &samples, iterations, |i, theta| {
        if !quiet {
            println!(
                "Iteration #{i}: Theta0 = {:.5}, Theta1 = {:.5}",
                theta.theta0, theta.theta1
            );
        }
    })?;

    if !trained.theta0().is_finite() || !trained.theta1().is_finite() {
        warn!("gradient descent diverged, coefficients are not finite");
    }

    match reference::least_squares(&samples) {
        Ok(exact) => debug!(
            "closed-form fit: theta0 = {:.5}, theta1 = {:.5} (gap {:.3e}, {:.3e})",
            exact.theta0,
            exact.theta1,
            (trained.theta0() - exact.theta0).abs(),
            (trained.theta1() - exact.theta1).abs()
        ),
        Err(e) => debug!("no closed-form reference: {e}"),
    }

    let store = ModelStore::new(&model);
    store
        .save(&trained)
        .with_context(|| format!("failed to save model to {}", model.display()))?;

    println!("---------------------------");
    println!("Model saved to {}", model.display());

    if !no_plot {
        let plot_path = plots::fit_plot_path(&plot_dir, iterations);

        plots::render_fit_svg(&plot_path, &samples, trained.coefficients)?;

        info!("plot written to {}", plot_path.display());
        println!("Plot created! Check {}", plot_path.display());
    }

    println!("-----theta0 and theta1-----");
    println!("Theta0 = {:.5}", trained.theta0());
    println!("Theta1 = {:.5}", trained.theta1());

    Ok(())
}
