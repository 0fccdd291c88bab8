use log::{debug, info};

use crate::dataset::{self, Sample};
use crate::error::{RegressionError, Result};
use crate::model::{Coefficients, Model};
use crate::normalization::{self, Normalized};

/// Batch gradient descent on the mean squared error of a single feature line.
pub struct GradientDescentTrainer {
    learning_rate: f64,
}

impl GradientDescentTrainer {
    /// Returns a new `GradientDescentTrainer`.
    ///
    /// # Arguments
    /// * `learning_rate` - The *length* of the steps taken against the gradient.
    pub fn new(learning_rate: f64) -> Self {
        Self { learning_rate }
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// One simultaneous update: both gradients come from the same prediction pass.
    pub fn step(&self, theta: Coefficients, xs: &[f64], ys: &[f64]) -> Coefficients {
        let m = xs.len() as f64;

        let (sum0, sum1) = xs
            .iter()
            .zip(ys)
            .fold((0., 0.), |(sum0, sum1), (&x, &y)| {
                let error = theta.apply(x) - y;
                (sum0 + error, sum1 + error * x)
            });

        Coefficients {
            theta0: theta.theta0 - self.learning_rate * sum0 / m,
            theta1: theta.theta1 - self.learning_rate * sum1 / m,
        }
    }

    /// Runs exactly `iterations` steps from `(0, 0)` and returns normalized-space coefficients.
    pub fn fit(&self, data: &Normalized, prices: &[f64], iterations: usize) -> Result<Coefficients> {
        self.fit_observed(data, prices, iterations, |_, _| {})
    }

    /// Same as [`fit`](Self::fit), handing `observer` the iteration number and the
    /// coefficients in raw mileage units after each step.
    pub fn fit_observed(
        &self,
        data: &Normalized,
        prices: &[f64],
        iterations: usize,
        mut observer: impl FnMut(usize, Coefficients),
    ) -> Result<Coefficients> {
        let xs = &data.values;

        if xs.is_empty() {
            return Err(RegressionError::input("no data"));
        }

        if xs.len() != prices.len() {
            return Err(RegressionError::input(format!(
                "{} mileages but {} prices",
                xs.len(),
                prices.len()
            )));
        }

        let mut theta = Coefficients::default();

        for i in 1..=iterations {
            theta = self.step(theta, xs, prices);

            observer(i, data.range.denormalize_coefficients(theta));
        }

        Ok(theta)
    }
}

pub fn mean_squared_error(samples: &[Sample], coefficients: Coefficients) -> f64 {
    let sum: f64 = samples
        .iter()
        .map(|s| (coefficients.apply(s.mileage) - s.price).powi(2))
        .sum();

    sum / samples.len() as f64
}

/// Normalizes `samples`, fits them and returns the model in raw mileage units.
///
/// A degenerate mileage range is rejected before any iteration runs.
pub fn train_model(
    trainer: &GradientDescentTrainer,
    samples: &[Sample],
    iterations: usize,
    observer: impl FnMut(usize, Coefficients),
) -> Result<Model> {
    let mileages: Vec<f64> = dataset::mileages(samples).collect();
    let prices = dataset::prices(samples);

    let normalized = normalization::normalize(&mileages)?;
    let range = normalized.range;

    info!(
        "training on {} samples, mileage range [{}, {}], {} iterations, learning rate {}",
        samples.len(),
        range.min(),
        range.max(),
        iterations,
        trainer.learning_rate()
    );

    let theta = trainer.fit_observed(&normalized, &prices, iterations, observer)?;
    let coefficients = range.denormalize_coefficients(theta);

    debug!(
        "final cost: {:.5}",
        mean_squared_error(samples, coefficients)
    );

    Ok(Model::new(coefficients, Some(range)))
}
