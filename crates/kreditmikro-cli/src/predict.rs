//! The `predict` subcommand: score one applicant against a saved pipeline.
use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::{Context, Result};

use kreditmikro_model::artifact;
use kreditmikro_model::report::format_percent;

#[derive(Debug, Clone)]
pub struct PredictOptions {
    pub model: PathBuf,
    /// Raw attribute-name to value mapping, as a form submission would carry.
    pub values: HashMap<String, String>,
}

pub fn run_prediction(opts: &PredictOptions) -> Result<()> {
    // An unloadable artifact is fatal: there is no degraded-prediction mode.
    let pipeline = artifact::load(&opts.model)
        .with_context(|| format!("Cannot serve predictions without {}", opts.model.display()))?;

    let prediction = pipeline.predict(&opts.values)?;

    println!("Keputusan: {}", prediction.label);
    for (class, probability) in prediction.probabilities() {
        println!("  {}: {}", class, format_percent(*probability));
    }

    Ok(())
}
