//! Shared test utilities and fixture generators

#![allow(dead_code)]

use binlab::pipeline::{AttributeType, DataRow, Dataset};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::io::Write;
use std::path::PathBuf;
use tempfile::TempDir;

/// Semicolon separated customer sample with a text-only `CreditScore`
pub const SAMPLE_CSV: &str = "Age;Income;Student;CreditScore;BuysComputer
20;Low;No;Excellent;No
25;Low;No;Fair;No
30;High;No;Excellent;Yes
35;Medium;No;Fair;Yes
40;High;Yes;Excellent;Yes
45;Medium;Yes;Fair;No
50;Low;No;Excellent;Yes
55;High;No;Fair;Yes
60;Medium;Yes;Excellent;No
65;Low;No;Fair;No
70;High;Yes;Excellent;Yes
22;Medium;No;Fair;No
38;Low;Yes;Excellent;Yes
48;High;No;Fair;Yes
29;Low;No;Fair;No
33;High;No;Excellent;Yes
";

/// Ages of [`SAMPLE_CSV`] in row order
pub const SAMPLE_AGES: [f64; 16] = [
    20.0, 25.0, 30.0, 35.0, 40.0, 45.0, 50.0, 55.0, 60.0, 65.0, 70.0, 22.0, 38.0, 48.0, 29.0, 33.0,
];

/// Write `content` to a file named `name` inside a fresh temp directory
pub fn create_temp_file(name: &str, content: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(content.as_bytes()).unwrap();
    (temp_dir, path)
}

/// Create a temporary directory with the sample CSV
pub fn create_sample_csv() -> (TempDir, PathBuf) {
    create_temp_file("sample_data.csv", SAMPLE_CSV)
}

/// Single numeric attribute `x` with values 1..=n and a two-class target
pub fn create_sequence_dataset(n: usize) -> Dataset {
    let mut ds = Dataset::new(Some("class".to_string()));
    ds.add_attribute("x", AttributeType::Numeric);
    for i in 1..=n {
        let label = if i <= n / 2 { "low" } else { "high" };
        ds.push_row(DataRow::new(label).with("x", i as f64));
    }
    ds
}

/// Dataset with one attribute holding the given values
pub fn create_values_dataset(values: &[f64]) -> Dataset {
    let mut ds = Dataset::new(Some("class".to_string()));
    ds.add_attribute("x", AttributeType::Numeric);
    for (i, v) in values.iter().enumerate() {
        let label = if i % 2 == 0 { "a" } else { "b" };
        ds.push_row(DataRow::new(label).with("x", *v));
    }
    ds
}

/// Seeded random dataset with `attributes` numeric columns `f0..`
pub fn create_random_dataset(rows: usize, attributes: usize, seed: u64) -> Dataset {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut ds = Dataset::new(Some("target".to_string()));
    for a in 0..attributes {
        ds.add_attribute(&format!("f{}", a), AttributeType::Numeric);
    }
    for _ in 0..rows {
        let label = if rng.gen_bool(0.5) { "yes" } else { "no" };
        let mut row = DataRow::new(label);
        for a in 0..attributes {
            row = row.with(&format!("f{}", a), rng.gen_range(-100.0f64..100.0));
        }
        ds.push_row(row);
    }
    ds
}

/// Assert that cut points are strictly ascending
pub fn assert_strictly_ascending(cut_points: &[f64]) {
    for pair in cut_points.windows(2) {
        assert!(
            pair[0] < pair[1],
            "Cut points must be strictly ascending: {:?}",
            cut_points
        );
    }
}
