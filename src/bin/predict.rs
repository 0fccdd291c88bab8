use std::io;

use clap::Parser;
use log::{debug, warn};

use mileage_regression::config::{self, PredictArgs};
use mileage_regression::model::Model;
use mileage_regression::model_store::ModelStore;
use mileage_regression::{predictor, prompt, RegressionError};

fn main() -> anyhow::Result<()> {
    config::init_logging();

    let PredictArgs {
        model,
        mileage,
        allow_untrained,
    } = PredictArgs::parse();

    let trained = match ModelStore::new(&model).load() {
        Ok(trained) => trained,
        Err(RegressionError::ModelNotFound(path)) if allow_untrained => {
            warn!(
                "no model at {}, using theta0 = 0, theta1 = 0",
                path.display()
            );
            Model::untrained()
        }
        Err(e) => return Err(e.into()),
    };

    let mileage = match mileage {
        Some(mileage) => mileage,
        None => prompt::ask("Input the mileage: ", io::stdin().lock(), io::stdout())?,
    };
    let mileage = prompt::parse_mileage(&mileage)?;

    if let Some(range) = trained.mileage_range {
        if mileage < range.min() || mileage > range.max() {
            debug!(
                "mileage {mileage} is outside the trained range [{}, {}]",
                range.min(),
                range.max()
            );
        }
    }

    let price = predictor::estimate(mileage, &trained);

    println!("Estimated price: {price:.2}");

    Ok(())
}
