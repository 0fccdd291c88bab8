use crate::normalization::NormalizationRange;

/// Intercept and slope of `price = theta0 + theta1 * mileage`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Coefficients {
    pub theta0: f64,
    pub theta1: f64,
}

impl Coefficients {
    pub fn new(theta0: f64, theta1: f64) -> Self {
        Self { theta0, theta1 }
    }

    pub fn apply(&self, x: f64) -> f64 {
        self.theta0 + self.theta1 * x
    }
}

/// Trained model in raw mileage units, as persisted between `train` and `predict`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Model {
    pub coefficients: Coefficients,
    /// Absent for artifacts written before the range was recorded.
    pub mileage_range: Option<NormalizationRange>,
}

impl Model {
    pub fn new(coefficients: Coefficients, mileage_range: Option<NormalizationRange>) -> Self {
        Self {
            coefficients,
            mileage_range,
        }
    }

    /// The all-zero model, predicting 0 for every mileage.
    pub fn untrained() -> Self {
        Self::default()
    }

    pub fn theta0(&self) -> f64 {
        self.coefficients.theta0
    }

    pub fn theta1(&self) -> f64 {
        self.coefficients.theta1
    }
}
