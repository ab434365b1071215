//! HTML report for the dataset summary and training diagnostics.
//!
//! All percentage formatting lives here; the predictive core only ever
//! returns raw floats in [0, 1].
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use maud::{html, Markup, DOCTYPE};

use crate::model_selection::CrossValidationResult;
use crate::stats::DatasetSummary;

/// Format a probability in [0, 1] as a percentage with two decimals,
/// e.g. `0.83` becomes `"83.00%"`.
pub fn format_percent(p: f64) -> String {
    format!("{:.2}%", p * 100.0)
}

/// Render the dataset summary (and, when available, the cross-validation
/// diagnostic) as a standalone HTML document.
pub fn render_summary_report(
    summary: &DatasetSummary,
    cv: Option<&CrossValidationResult>,
) -> Markup {
    let generated = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="utf-8";
                title { "Ringkasan Dataset Kredit Mikro" }
                style {
                    "body { font-family: sans-serif; margin: 2em; }
                     table { border-collapse: collapse; margin-bottom: 1.5em; }
                     th, td { border: 1px solid #ccc; padding: 4px 10px; text-align: left; }
                     th { background-color: #f5f5f5; }
                     .meta { color: #666; font-size: 0.9em; }"
                }
            }
            body {
                h1 { "Ringkasan Dataset Kredit Mikro" }
                p class="meta" { "Generated " (generated) }

                h2 { "Keputusan" }
                table {
                    tr {
                        th { "Kelas" }
                        th { "Jumlah" }
                        th { "Persentase" }
                    }
                    @for (i, class) in summary.classes.iter().enumerate() {
                        tr {
                            td { (class) }
                            td { (summary.class_counts[i]) }
                            td { (format_percent(summary.class_share(i))) }
                        }
                    }
                    tr {
                        th { "Total" }
                        th { (summary.total_rows) }
                        th { "100.00%" }
                    }
                }

                @if let Some(cv) = cv {
                    h2 { "Akurasi Cross-Validation" }
                    p {
                        "Rata-rata " (format_percent(cv.mean()))
                        " (std " (format!("{:.4}", cv.std())) ", "
                        (cv.fold_accuracies.len()) " folds)"
                    }
                    table {
                        tr {
                            th { "Fold" }
                            th { "Akurasi" }
                        }
                        @for (i, acc) in cv.fold_accuracies.iter().enumerate() {
                            tr {
                                td { (i + 1) }
                                td { (format_percent(*acc)) }
                            }
                        }
                    }
                }

                @for attr in &summary.attributes {
                    h2 { (attr.attribute) }
                    table {
                        tr {
                            th { "Kategori" }
                            @for class in &summary.classes {
                                th { (class) }
                            }
                            th { "Total" }
                        }
                        @for (k, category) in attr.categories.iter().enumerate() {
                            tr {
                                td { (category) }
                                @for count in &attr.counts[k] {
                                    td { (count) }
                                }
                                td { (attr.category_total(k)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

/// Render the report and write it to `path`.
pub fn write_summary_report(
    summary: &DatasetSummary,
    cv: Option<&CrossValidationResult>,
    path: &Path,
) -> Result<()> {
    let markup = render_summary_report(summary, cv);
    fs::write(path, markup.into_string())
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    log::info!("Wrote dataset report to {}", path.display());
    Ok(())
}
