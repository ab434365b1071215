//! The `train` subcommand: CSV dataset in, serialized pipeline artifact out.
use std::path::PathBuf;

use anyhow::{Context, Result};

use kreditmikro_model::artifact;
use kreditmikro_model::config::TrainConfig;
use kreditmikro_model::io::read_dataset;
use kreditmikro_model::pipeline::Pipeline;
use kreditmikro_model::report::write_summary_report;
use kreditmikro_model::schema::CategorySchema;
use kreditmikro_model::stats::summarize;

#[derive(Debug, Clone)]
pub struct TrainOptions {
    pub data: PathBuf,
    pub output: PathBuf,
    pub config: TrainConfig,
    pub report: Option<PathBuf>,
}

pub fn run_training(opts: &TrainOptions) -> Result<()> {
    let schema = CategorySchema::kredit_mikro();

    let dataset = read_dataset(&opts.data, &schema)
        .with_context(|| format!("Failed to load training data from {}", opts.data.display()))?;
    log::info!(
        "Loaded {} training rows from {}",
        dataset.len(),
        opts.data.display()
    );

    let rows = dataset.encoded(&schema)?;
    let (pipeline, cv) = Pipeline::fit(schema, &rows, &dataset.labels, &opts.config)?;

    for (i, accuracy) in cv.fold_accuracies.iter().enumerate() {
        println!("Akurasi fold {}: {:.4}", i + 1, accuracy);
    }
    println!("Akurasi rata-rata cross-validation: {:.4}", cv.mean());
    println!("Deviasi standar: {:.4}", cv.std());

    artifact::save(&pipeline, &opts.output)?;
    println!("Model tersimpan di {}", opts.output.display());

    if let Some(report_path) = &opts.report {
        let summary = summarize(pipeline.schema(), &dataset);
        write_summary_report(&summary, Some(&cv), report_path)?;
        println!("Laporan tersimpan di {}", report_path.display());
    }

    Ok(())
}
