//! The `stats` subcommand: descriptive counts over the raw dataset.
use std::path::PathBuf;

use anyhow::{Context, Result};

use kreditmikro_model::io::read_dataset;
use kreditmikro_model::report::{format_percent, write_summary_report};
use kreditmikro_model::schema::CategorySchema;
use kreditmikro_model::stats::summarize;

#[derive(Debug, Clone)]
pub struct StatsOptions {
    pub data: PathBuf,
    pub output: Option<PathBuf>,
}

pub fn run_stats(opts: &StatsOptions) -> Result<()> {
    let schema = CategorySchema::kredit_mikro();
    let dataset = read_dataset(&opts.data, &schema)
        .with_context(|| format!("Failed to load dataset from {}", opts.data.display()))?;
    let summary = summarize(&schema, &dataset);

    println!("Total baris: {}", summary.total_rows);
    for (i, class) in summary.classes.iter().enumerate() {
        println!(
            "  {}: {} ({})",
            class,
            summary.class_counts[i],
            format_percent(summary.class_share(i))
        );
    }
    for attribute in &summary.attributes {
        println!("{}", attribute.attribute);
        for (k, category) in attribute.categories.iter().enumerate() {
            let per_class: Vec<String> = summary
                .classes
                .iter()
                .zip(&attribute.counts[k])
                .map(|(class, count)| format!("{} {}", class, count))
                .collect();
            println!("  {}: {}", category, per_class.join(", "));
        }
    }

    if let Some(output) = &opts.output {
        write_summary_report(&summary, None, output)?;
        println!("Laporan tersimpan di {}", output.display());
    }

    Ok(())
}
