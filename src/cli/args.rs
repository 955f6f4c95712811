//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::{Algorithm, LoadOptions, Parameters};

/// binlab - Discretize continuous attributes into labelled bins
#[derive(Parser, Debug)]
#[command(name = "binlab")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input file path (CSV or Parquet)
    #[arg(short, long)]
    pub input: PathBuf,

    /// Target (class label) column. Defaults to the last column.
    #[arg(short, long)]
    pub target: Option<String>,

    /// Attributes to discretize (comma-separated).
    /// Defaults to every numeric attribute except the target.
    #[arg(short, long, value_delimiter = ',')]
    pub attributes: Vec<String>,

    /// Discretization algorithm.
    /// Options: "equal-width" (default), "equal-frequency", "supervised-density", "unsupervised-density"
    #[arg(long, default_value = "equal-width")]
    pub algorithm: Algorithm,

    /// Number of bins for equal-width and equal-frequency binning.
    /// Defaults to the Sturges estimate for the attribute.
    #[arg(short, long, value_parser = validate_bins)]
    pub bins: Option<usize>,

    /// Maximum recursion depth for the information density algorithms
    #[arg(long, value_parser = validate_max_depth)]
    pub max_depth: Option<usize>,

    /// Minimum gain threshold recorded for recursive splits (advisory)
    #[arg(long)]
    pub min_gain: Option<f64>,

    /// Extra pipeline parameter as KEY=VALUE. May be repeated.
    #[arg(long = "param", value_name = "KEY=VALUE")]
    pub params: Vec<String>,

    /// CSV field separator. Sniffed from the header line when omitted.
    #[arg(long, value_parser = validate_separator)]
    pub separator: Option<u8>,

    /// Number of rows to use for schema inference (CSV only).
    /// Use 0 for a full table scan.
    #[arg(long, default_value = "100")]
    pub infer_schema_length: usize,

    /// Number of discretized rows to preview
    #[arg(long, default_value = "5")]
    pub preview: usize,

    /// Write the attribute reports to stdout as JSON
    #[arg(long, default_value = "false")]
    pub json: bool,

    /// Emit debug diagnostics on stderr
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,
}

impl Cli {
    /// Loader settings derived from the arguments.
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            separator: self.separator,
            target: self.target.clone(),
            infer_schema_length: self.infer_schema_length,
        }
    }

    /// Initial parameters for every discretization call.
    ///
    /// Explicit flags are applied after `--param` assignments, so they win.
    pub fn parameters(&self) -> anyhow::Result<Parameters> {
        let mut params = Parameters::new();
        for assignment in &self.params {
            params.apply_assignment(assignment)?;
        }
        if let Some(bins) = self.bins {
            params = params.with_num_bins(bins);
        }
        if let Some(depth) = self.max_depth {
            params = params.with_max_depth(depth);
        }
        if let Some(gain) = self.min_gain {
            params = params.with_min_gain_threshold(gain);
        }
        Ok(params)
    }
}

/// Validator for the bin count
fn validate_bins(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid bin count", s))?;

    if value < 2 {
        Err(format!("bins must be greater than 1, got {}", value))
    } else {
        Ok(value)
    }
}

/// Validator for the recursion depth
fn validate_max_depth(s: &str) -> Result<usize, String> {
    let value: usize = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid depth", s))?;

    if value == 0 {
        Err("max_depth must be at least 1".to_string())
    } else {
        Ok(value)
    }
}

/// Validator for the CSV separator; accepts a single ASCII character or `\t`
fn validate_separator(s: &str) -> Result<u8, String> {
    match s {
        "\\t" | "tab" => Ok(b'\t'),
        _ if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        _ => Err(format!("separator must be a single ASCII character, got '{}'", s)),
    }
}
