use crate::error::Result;
use crate::model::Model;
use crate::model_store::ModelStore;

/// Price estimate in raw units; the stored coefficients are already denormalized.
pub fn estimate(mileage: f64, model: &Model) -> f64 {
    model.coefficients.apply(mileage)
}

/// Loads the model behind `store` and estimates the price for `mileage`.
pub fn estimate_from_store(mileage: f64, store: &ModelStore) -> Result<f64> {
    let model = store.load()?;

    Ok(estimate(mileage, &model))
}
