//! Tests for CLI argument parsing and the binary

use assert_cmd::Command;
use binlab::cli::Cli;
use binlab::pipeline::Algorithm;
use clap::Parser;
use predicates::prelude::*;

#[path = "common/mod.rs"]
mod common;

use common::*;

#[test]
fn test_cli_default_values() {
    let cli = Cli::parse_from(["binlab", "-i", "data.csv"]);

    assert_eq!(cli.algorithm, Algorithm::EqualWidth, "Default algorithm should be equal-width");
    assert_eq!(cli.bins, None, "Bin count should default to the Sturges estimate");
    assert_eq!(cli.max_depth, None);
    assert_eq!(cli.preview, 5, "Default preview should be 5 rows");
    assert_eq!(cli.infer_schema_length, 100, "Default schema inference should be 100");
    assert!(cli.attributes.is_empty());
    assert!(!cli.json);
    assert!(!cli.verbose);
}

#[test]
fn test_cli_custom_values() {
    let cli = Cli::parse_from([
        "binlab",
        "-i",
        "data.csv",
        "-t",
        "BuysComputer",
        "--algorithm",
        "supervised",
        "--max-depth",
        "3",
        "--min-gain",
        "0.01",
        "--separator",
        ";",
    ]);

    assert_eq!(cli.target.as_deref(), Some("BuysComputer"));
    assert_eq!(cli.algorithm, Algorithm::SupervisedDensity);
    let params = cli.parameters().unwrap();
    assert_eq!(params.max_depth, Some(3));
    assert_eq!(params.min_gain_threshold, Some(0.01));
    assert_eq!(cli.load_options().separator, Some(b';'));
}

#[test]
fn test_cli_rejects_invalid_values() {
    assert!(Cli::try_parse_from(["binlab", "-i", "d.csv", "--bins", "1"]).is_err());
    assert!(Cli::try_parse_from(["binlab", "-i", "d.csv", "--max-depth", "0"]).is_err());
    assert!(Cli::try_parse_from(["binlab", "-i", "d.csv", "--algorithm", "chimerge"]).is_err());
    assert!(Cli::try_parse_from(["binlab"]).is_err(), "Input is required");
}

#[test]
fn test_cli_bad_param_assignment() {
    let cli = Cli::parse_from(["binlab", "-i", "d.csv", "--param", "NumberOfBins"]);
    assert!(cli.parameters().is_err());

    let cli = Cli::parse_from(["binlab", "-i", "d.csv", "--param", "MaxDepth=-2"]);
    assert!(cli.parameters().is_err());
}

#[test]
fn test_binary_json_report() {
    let (_temp_dir, path) = create_sample_csv();

    Command::cargo_bin("binlab")
        .unwrap()
        .args(["-i", path.to_str().unwrap(), "--json", "--bins", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"attribute\": \"Age\""))
        .stdout(predicate::str::contains("\"status\": \"discretized\""))
        .stdout(predicate::str::contains("32.5"));
}

#[test]
fn test_binary_reports_pass_through_without_failing() {
    let (_temp_dir, path) = create_sample_csv();

    Command::cargo_bin("binlab")
        .unwrap()
        .args(["-i", path.to_str().unwrap(), "--json", "-a", "Age,CreditScore"])
        .assert()
        .success()
        .stdout(predicate::str::contains("pass-through"));
}

#[test]
fn test_binary_table_output() {
    let (_temp_dir, path) = create_sample_csv();

    Command::cargo_bin("binlab")
        .unwrap()
        .args([
            "-i",
            path.to_str().unwrap(),
            "--algorithm",
            "supervised-density",
            "--preview",
            "3",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("DISCRETIZATION SUMMARY"));
}

#[test]
fn test_binary_missing_file_fails() {
    Command::cargo_bin("binlab")
        .unwrap()
        .args(["-i", "/definitely/not/here.csv"])
        .assert()
        .failure();
}

#[test]
fn test_binary_no_numeric_attributes_fails() {
    let (_temp_dir, path) = create_temp_file("text.csv", "a,b\nx,y\nz,w\n");

    Command::cargo_bin("binlab")
        .unwrap()
        .args(["-i", path.to_str().unwrap(), "--json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("No attributes to discretize"));
}
