//! Price-by-mileage linear regression trained with batch gradient descent.
//!
//! Training: samples -> [`normalization`] -> [`trainer`] -> denormalized [`model::Model`]
//! -> [`model_store`]. Prediction: [`model_store`] -> [`predictor`].

pub mod config;
pub mod dataset;
pub mod error;
pub mod model;
pub mod model_store;
pub mod normalization;
pub mod plots;
pub mod predictor;
pub mod prompt;
pub mod reference;
pub mod trainer;

pub use error::{RegressionError, Result};
