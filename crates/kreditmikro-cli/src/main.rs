use std::collections::HashMap;
use std::path::PathBuf;

use anyhow::Result;
use clap::{Arg, ArgMatches, Command, ValueHint};
use log::LevelFilter;

use kreditmikro_cli::predict::{run_prediction, PredictOptions};
use kreditmikro_cli::stats::{run_stats, StatsOptions};
use kreditmikro_cli::train::{run_training, TrainOptions};
use kreditmikro_model::config::TrainConfig;

/// CLI argument name and matching schema attribute for the predict inputs.
const ATTRIBUTE_ARGS: [(&str, &str, &str, &str); 5] = [
    (
        "riwayat_kredit",
        "riwayat-kredit",
        "Riwayat_Kredit",
        "Riwayat kredit pemohon (Buruk, Cukup, Baik)",
    ),
    (
        "lama_usaha",
        "lama-usaha",
        "Lama_Usaha",
        "Lama usaha berjalan (Kurang dari 1 Tahun, 1-3 Tahun, Lebih dari 3 Tahun)",
    ),
    (
        "pendapatan",
        "pendapatan",
        "Pendapatan_Bulan",
        "Pendapatan per bulan (Rendah, Sedang, Tinggi)",
    ),
    (
        "jaminan",
        "jaminan",
        "Jaminan",
        "Jaminan yang tersedia (Tidak Ada, Ada)",
    ),
    (
        "pinjaman",
        "pinjaman",
        "Jumlah_Pinjaman",
        "Jumlah pinjaman yang diajukan (Kecil, Sedang, Besar)",
    ),
];

fn main() -> Result<()> {
    env_logger::Builder::default()
        .filter_level(LevelFilter::Error)
        .parse_env(env_logger::Env::default().filter_or("KREDITMIKRO_LOG", "error,kreditmikro=info"))
        .init();

    let mut predict_cmd = Command::new("predict")
        .about("Score one applicant against a trained pipeline artifact")
        .arg(
            Arg::new("model")
                .short('m')
                .long("model")
                .help("Path to the trained pipeline artifact (*.json)")
                .required(true)
                .value_parser(clap::value_parser!(PathBuf))
                .value_hint(ValueHint::FilePath),
        );
    for (id, long, _, help) in ATTRIBUTE_ARGS {
        predict_cmd = predict_cmd.arg(
            Arg::new(id)
                .long(long)
                .help(help)
                .required(true)
                .value_parser(clap::builder::NonEmptyStringValueParser::new())
                .value_hint(ValueHint::Other),
        );
    }

    let matches = Command::new("kreditmikro")
        .version(clap::crate_version!())
        .about("Categorical Naive Bayes tools for microcredit approval decisions")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("train")
                .about("Train a pipeline from a CSV dataset and save the artifact")
                .arg(
                    Arg::new("data")
                        .help("Path to the training CSV (five attribute columns plus Keputusan)")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Path the trained pipeline artifact will be written to")
                        .default_value("model/naive_bayes_pipeline.json")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("alpha")
                        .long("alpha")
                        .help("Additive smoothing constant for the conditional tables")
                        .value_parser(clap::value_parser!(f64)),
                )
                .arg(
                    Arg::new("folds")
                        .long("folds")
                        .help("Number of stratified cross-validation folds")
                        .value_parser(clap::value_parser!(usize)),
                )
                .arg(
                    Arg::new("seed")
                        .long("seed")
                        .help("Seed for the cross-validation fold shuffle")
                        .value_parser(clap::value_parser!(u64)),
                )
                .arg(
                    Arg::new("report")
                        .long("report")
                        .help("Also write an HTML dataset/diagnostics report to this path")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .subcommand(predict_cmd)
        .subcommand(
            Command::new("stats")
                .about("Summarize a raw dataset: totals, class counts, cross-tabulations")
                .arg(
                    Arg::new("data")
                        .help("Path to the dataset CSV")
                        .required(true)
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                )
                .arg(
                    Arg::new("output")
                        .short('o')
                        .long("output")
                        .help("Write an HTML report to this path")
                        .value_parser(clap::value_parser!(PathBuf))
                        .value_hint(ValueHint::FilePath),
                ),
        )
        .get_matches();

    match matches.subcommand() {
        Some(("train", sub_m)) => handle_train(sub_m),
        Some(("predict", sub_m)) => handle_predict(sub_m),
        Some(("stats", sub_m)) => handle_stats(sub_m),
        _ => unreachable!("Subcommand is required by CLI configuration"),
    }
}

fn handle_train(matches: &ArgMatches) -> Result<()> {
    let mut config = TrainConfig::default();
    if let Some(alpha) = matches.get_one::<f64>("alpha") {
        config.alpha = *alpha;
    }
    if let Some(folds) = matches.get_one::<usize>("folds") {
        config.n_folds = *folds;
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        config.seed = *seed;
    }

    let opts = TrainOptions {
        data: matches.get_one::<PathBuf>("data").cloned().unwrap(),
        output: matches.get_one::<PathBuf>("output").cloned().unwrap(),
        config,
        report: matches.get_one::<PathBuf>("report").cloned(),
    };

    match run_training(&opts) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::error!("Training failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_predict(matches: &ArgMatches) -> Result<()> {
    let mut values = HashMap::new();
    for (id, _, attribute, _) in ATTRIBUTE_ARGS {
        let value = matches.get_one::<String>(id).cloned().unwrap();
        values.insert(attribute.to_string(), value);
    }

    let opts = PredictOptions {
        model: matches.get_one::<PathBuf>("model").cloned().unwrap(),
        values,
    };

    match run_prediction(&opts) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::error!("Prediction failed: {:#}", e);
            std::process::exit(1)
        }
    }
}

fn handle_stats(matches: &ArgMatches) -> Result<()> {
    let opts = StatsOptions {
        data: matches.get_one::<PathBuf>("data").cloned().unwrap(),
        output: matches.get_one::<PathBuf>("output").cloned(),
    };

    match run_stats(&opts) {
        Ok(()) => Ok(()),
        Err(e) => {
            log::error!("Dataset summary failed: {:#}", e);
            std::process::exit(1)
        }
    }
}
