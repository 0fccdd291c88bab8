use std::path::PathBuf;

/// The result type used across the regression library.
pub type Result<T> = std::result::Result<T, RegressionError>;

#[derive(thiserror::Error, Debug)]
pub enum RegressionError {
    /// Bad user-provided data: malformed numbers, empty dataset, negative iteration count.
    #[error("invalid input: {0}")]
    Input(String),

    /// The mileage range has zero width, so normalization is undefined.
    #[error("degenerate input: {0}")]
    DegenerateInput(String),

    #[error("no model found at {}, train one first", .0.display())]
    ModelNotFound(PathBuf),

    #[error("model at {} is malformed: {reason}", .path.display())]
    ModelParse { path: PathBuf, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),

    #[error("plot error: {0}")]
    Plot(String),
}

impl RegressionError {
    pub(crate) fn input(reason: impl Into<String>) -> Self {
        Self::Input(reason.into())
    }

    pub(crate) fn model_parse(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        Self::ModelParse {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
