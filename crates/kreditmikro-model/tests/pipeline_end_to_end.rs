//! End-to-end tests: CSV dataset -> encode -> cross-validate -> fit ->
//! predict, the full path the CLI and a serving layer would use.

use std::collections::HashMap;
use std::io::Write;

use kreditmikro_model::config::TrainConfig;
use kreditmikro_model::io::read_dataset;
use kreditmikro_model::pipeline::Pipeline;
use kreditmikro_model::schema::CategorySchema;

const HEADER: &str = "Riwayat_Kredit,Lama_Usaha,Pendapatan_Bulan,Jaminan,Jumlah_Pinjaman,Keputusan";

/// A dataset where Baik credit history plus Ada collateral strongly implies
/// approval, and Buruk plus Tidak Ada strongly implies rejection.
fn training_csv() -> String {
    let rows = [
        "Baik,1-3 Tahun,Sedang,Ada,Kecil,Terima",
        "Baik,Lebih dari 3 Tahun,Tinggi,Ada,Sedang,Terima",
        "Baik,1-3 Tahun,Tinggi,Ada,Besar,Terima",
        "Baik,Kurang dari 1 Tahun,Sedang,Ada,Kecil,Terima",
        "Cukup,1-3 Tahun,Sedang,Ada,Sedang,Terima",
        "Baik,Lebih dari 3 Tahun,Sedang,Ada,Kecil,Terima",
        "Cukup,Lebih dari 3 Tahun,Tinggi,Ada,Sedang,Terima",
        "Baik,1-3 Tahun,Rendah,Ada,Kecil,Terima",
        "Buruk,Kurang dari 1 Tahun,Rendah,Tidak Ada,Besar,Tolak",
        "Buruk,1-3 Tahun,Rendah,Tidak Ada,Sedang,Tolak",
        "Buruk,Kurang dari 1 Tahun,Sedang,Tidak Ada,Besar,Tolak",
        "Cukup,Kurang dari 1 Tahun,Rendah,Tidak Ada,Besar,Tolak",
        "Buruk,1-3 Tahun,Rendah,Tidak Ada,Kecil,Tolak",
        "Buruk,Kurang dari 1 Tahun,Rendah,Ada,Besar,Tolak",
        "Cukup,1-3 Tahun,Rendah,Tidak Ada,Sedang,Tolak",
        "Buruk,Lebih dari 3 Tahun,Sedang,Tidak Ada,Besar,Tolak",
    ];
    format!("{}\n{}\n", HEADER, rows.join("\n"))
}

fn write_csv(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".csv")
        .tempfile()
        .unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file
}

fn raw(values: [(&str, &str); 5]) -> HashMap<String, String> {
    values
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

fn train() -> Pipeline {
    let schema = CategorySchema::kredit_mikro();
    let file = write_csv(&training_csv());
    let dataset = read_dataset(file.path(), &schema).unwrap();
    let rows = dataset.encoded(&schema).unwrap();
    let config = TrainConfig { n_folds: 4, ..TrainConfig::default() };
    Pipeline::fit(schema, &rows, &dataset.labels, &config)
        .unwrap()
        .0
}

#[test]
fn good_history_with_collateral_is_approved() {
    let pipeline = train();
    let prediction = pipeline
        .predict(&raw([
            ("Riwayat_Kredit", "Baik"),
            ("Lama_Usaha", "1-3 Tahun"),
            ("Pendapatan_Bulan", "Sedang"),
            ("Jaminan", "Ada"),
            ("Jumlah_Pinjaman", "Sedang"),
        ]))
        .unwrap();
    assert_eq!(prediction.label, "Terima");
    assert!(prediction.probability("Terima").unwrap() > 0.5);
}

#[test]
fn training_row_query_matches_its_plurality_class() {
    let pipeline = train();
    // Identical to a training row labeled Tolak; similar rows are all Tolak.
    let prediction = pipeline
        .predict(&raw([
            ("Riwayat_Kredit", "Buruk"),
            ("Lama_Usaha", "Kurang dari 1 Tahun"),
            ("Pendapatan_Bulan", "Rendah"),
            ("Jaminan", "Tidak Ada"),
            ("Jumlah_Pinjaman", "Besar"),
        ]))
        .unwrap();
    assert_eq!(prediction.label, "Tolak");
    assert!(prediction.probability("Tolak").unwrap() > 0.5);
}

#[test]
fn both_class_probabilities_are_reported() {
    let pipeline = train();
    let prediction = pipeline
        .predict(&raw([
            ("Riwayat_Kredit", "Cukup"),
            ("Lama_Usaha", "1-3 Tahun"),
            ("Pendapatan_Bulan", "Sedang"),
            ("Jaminan", "Ada"),
            ("Jumlah_Pinjaman", "Kecil"),
        ]))
        .unwrap();
    let terima = prediction.probability("Terima").unwrap();
    let tolak = prediction.probability("Tolak").unwrap();
    assert!((terima + tolak - 1.0).abs() < 1e-9);
    assert_eq!(prediction.probabilities().len(), 2);
}

#[test]
fn repeated_training_yields_identical_models() {
    let a = train();
    let b = train();
    assert_eq!(a, b);
}
