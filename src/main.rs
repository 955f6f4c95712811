//! binlab: Discretization CLI Tool
//!
//! A command-line tool for discretizing the continuous attributes of a
//! CSV or Parquet dataset into labelled bins.

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;

use binlab::cli::Cli;
use binlab::pipeline::{discretize_attributes_with, load_dataset, numeric_attributes};
use binlab::report::{
    combine_rows, print_attribute_report, print_preview, AttributeReport, RunSummary,
};
use binlab::utils::{
    create_progress_bar, create_spinner, finish_with_success, finish_with_warning, init_logging,
    print_banner, print_completion, print_config, print_count, print_dataset_summary, print_info,
    print_step_header, print_success, print_warning,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let parameters = cli.parameters().context("Invalid --param assignment")?;
    let quiet = cli.json;

    if !quiet {
        print_banner(env!("CARGO_PKG_VERSION"));
        print_config(&cli.input, cli.target.as_deref(), cli.algorithm, cli.bins);
    }

    // Step 1: Load dataset
    let run_start = Instant::now();
    let dataset = if quiet {
        load_dataset(&cli.input, &cli.load_options())?
    } else {
        print_step_header(1, "Load Dataset");
        let spinner = create_spinner("Reading dataset...");
        let dataset = load_dataset(&cli.input, &cli.load_options())?;
        finish_with_success(&spinner, "Dataset loaded");
        print_dataset_summary(&dataset.summary());
        dataset
    };

    let target_name = dataset.target_name.clone().unwrap_or_default();
    let attributes = if cli.attributes.is_empty() {
        numeric_attributes(&dataset)
    } else {
        cli.attributes.clone()
    };
    if attributes.is_empty() {
        anyhow::bail!(
            "No attributes to discretize. Dataset attributes: {:?}",
            dataset.attributes
        );
    }

    // Step 2: Discretize
    let discretizer = cli.algorithm.discretizer();
    let results = if quiet {
        discretize_attributes_with(&discretizer, &dataset, &attributes, Some(&parameters), |_| {})
    } else {
        print_step_header(2, "Discretize Attributes");
        print_count("attribute(s) to discretize", attributes.len(), None);
        let pb = create_progress_bar(attributes.len() as u64, discretizer.name());
        let results =
            discretize_attributes_with(&discretizer, &dataset, &attributes, Some(&parameters), |_| {
                pb.inc(1)
            });
        let passed = results
            .iter()
            .filter(|(_, r)| r.as_ref().map_or(true, |res| res.is_pass_through()))
            .count();
        if passed == 0 {
            finish_with_success(&pb, "All attributes discretized");
        } else {
            finish_with_warning(&pb, &format!("{} attribute(s) passed through", passed));
        }
        results
    };

    let reports: Vec<AttributeReport> = results
        .iter()
        .map(|(attribute, result)| match result {
            Ok(res) => AttributeReport::from_result(res),
            Err(e) => AttributeReport::rejected(attribute, discretizer.name(), e),
        })
        .collect();

    if quiet {
        let json = serde_json::to_string_pretty(&reports).context("Failed to serialize reports")?;
        println!("{}", json);
        return Ok(());
    }

    // Step 3: Report
    print_step_header(3, "Bins");
    for report in &reports {
        print_attribute_report(report);
    }

    let discretized: Vec<_> = results.iter().filter_map(|(_, r)| r.as_ref().ok()).collect();
    if discretized.iter().all(|r| r.is_pass_through()) {
        print_warning("No attribute could be discretized");
    } else {
        print_success("Bin labels assigned");
        let rows = combine_rows(&dataset.rows, &discretized);
        print_preview(&rows, &attributes, &target_name, cli.preview);
    }

    if cli.algorithm.is_supervised() && dataset.rows.iter().all(|r| r.target.is_empty()) {
        print_info("Target column is empty; supervised splits cannot separate classes");
    }

    RunSummary::from_reports(&reports, run_start.elapsed()).display();
    print_completion();

    Ok(())
}
