//! Min-max scaling of mileages into `[0, 1]` and the inverse mapping of
//! fitted coefficients back into raw mileage units.

use crate::error::{RegressionError, Result};
use crate::model::Coefficients;

pub struct MinMax<T> {
    pub min: T,
    pub max: T,
}

/// Smallest and largest item in one pass, `None` for an empty iterator.
pub fn find_max_min<T: PartialOrd + Copy>(
    mut data: impl Iterator<Item = T>,
) -> Option<MinMax<T>> {
    let first = data.next()?;

    Some(data.fold(MinMax { min: first, max: first }, |MinMax { min, max }, x| MinMax {
        min: if x < min { x } else { min },
        max: if x > max { x } else { max },
    }))
}

/// Observed mileage bounds of a training set. Always `min < max`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NormalizationRange {
    min: f64,
    max: f64,
}

impl NormalizationRange {
    /// Builds a range from already known bounds, e.g. ones read back from a model artifact.
    pub fn new(min: f64, max: f64) -> Result<Self> {
        if !min.is_finite() || !max.is_finite() {
            return Err(RegressionError::DegenerateInput(format!(
                "mileage range [{min}, {max}] is not finite"
            )));
        }

        if max <= min {
            return Err(RegressionError::DegenerateInput(format!(
                "mileage range [{min}, {max}] has no width, all mileages are identical"
            )));
        }

        Ok(Self { min, max })
    }

    /// Single pass over the training mileages.
    pub fn fit(mileages: impl Iterator<Item = f64>) -> Result<Self> {
        let MinMax { min, max } = find_max_min(mileages)
            .ok_or_else(|| RegressionError::input("no mileages to normalize"))?;

        Self::new(min, max)
    }

    pub fn min(&self) -> f64 {
        self.min
    }

    pub fn max(&self) -> f64 {
        self.max
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn normalize(&self, mileage: f64) -> f64 {
        (mileage - self.min) / self.width()
    }

    /// Maps coefficients fitted on normalized mileages onto raw mileages.
    ///
    /// A pure recomputation: calling it again on the same input gives the same bits.
    pub fn denormalize_coefficients(&self, normalized: Coefficients) -> Coefficients {
        let theta1 = normalized.theta1 / self.width();
        let theta0 = normalized.theta0 - theta1 * self.min;

        Coefficients { theta0, theta1 }
    }
}

/// The fitted range together with the rescaled training mileages.
#[derive(Debug, Clone)]
pub struct Normalized {
    pub range: NormalizationRange,
    pub values: Vec<f64>,
}

pub fn normalize(mileages: &[f64]) -> Result<Normalized> {
    if let Some(bad) = mileages.iter().find(|m| !m.is_finite()) {
        return Err(RegressionError::input(format!("mileage {bad} is not a finite number")));
    }

    let range = NormalizationRange::fit(mileages.iter().copied())?;

    let values = mileages.iter().map(|&m| range.normalize(m)).collect();

    Ok(Normalized { range, values })
}
