//! Closed-form least squares, used to check how close gradient descent got.

use nalgebra::{Matrix2, Vector2};

use crate::dataset::{self, Sample};
use crate::error::{RegressionError, Result};
use crate::model::Coefficients;
use crate::normalization::NormalizationRange;

/// Solves `(XᵀX) θ = Xᵀy` for the design matrix `[1, mileage]`.
///
/// The system is built on min-max scaled mileages, raw ones make `XᵀX` badly conditioned.
pub fn least_squares(samples: &[Sample]) -> Result<Coefficients> {
    let range = NormalizationRange::fit(dataset::mileages(samples))?;

    let n = samples.len() as f64;

    let (sum_x, sum_xx, sum_y, sum_xy) = samples.iter().fold(
        (0., 0., 0., 0.),
        |(sx, sxx, sy, sxy), &Sample { mileage, price: y }| {
            let x = range.normalize(mileage);
            (sx + x, sxx + x * x, sy + y, sxy + x * y)
        },
    );

    let xtx = Matrix2::new(n, sum_x, sum_x, sum_xx);
    let xty = Vector2::new(sum_y, sum_xy);

    let theta = xtx.lu().solve(&xty).ok_or_else(|| {
        RegressionError::DegenerateInput("normal equations are singular".to_string())
    })?;

    Ok(range.denormalize_coefficients(Coefficients::new(theta[0], theta[1])))
}
