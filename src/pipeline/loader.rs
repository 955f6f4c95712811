//! Dataset loader for CSV and Parquet files

use anyhow::{Context, Result};
use polars::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::debug;

use super::dataset::{AttributeType, DataRow, Dataset};
use super::value::{coerce_to_f64, AttributeValue};

/// Separators tried when none is given, in tie-break order
const CANDIDATE_SEPARATORS: [u8; 4] = [b',', b';', b'\t', b'|'];

/// How a file is turned into a [`Dataset`]
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// CSV field separator; sniffed from the header line when `None`
    pub separator: Option<u8>,
    /// Target column; the last column when `None`
    pub target: Option<String>,
    /// Rows used for schema and type inference (0 scans everything)
    pub infer_schema_length: usize,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            separator: None,
            target: None,
            infer_schema_length: 100,
        }
    }
}

/// Load a dataset from a file (CSV or Parquet based on extension)
pub fn load_dataset(path: &Path, options: &LoadOptions) -> Result<Dataset> {
    let df = load_dataframe(path, options)?;
    dataframe_to_dataset(&df, options.target.as_deref(), options.infer_schema_length)
}

/// Read a file into a polars DataFrame.
pub fn load_dataframe(path: &Path, options: &LoadOptions) -> Result<DataFrame> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let lf = match extension.as_str() {
        "csv" => {
            let separator = match options.separator {
                Some(sep) => sep,
                None => sniff_separator(&read_header_line(path)?),
            };
            // 0 means full scan
            let schema_length = if options.infer_schema_length == 0 {
                None
            } else {
                Some(options.infer_schema_length)
            };
            debug!(separator = %(separator as char), ?schema_length, "Reading CSV");

            LazyCsvReader::new(path)
                .with_separator(separator)
                .with_has_header(true)
                .with_infer_schema_length(schema_length)
                .finish()
                .with_context(|| format!("Failed to load CSV file: {}", path.display()))?
        }
        "parquet" => LazyFrame::scan_parquet(path, Default::default())
            .with_context(|| format!("Failed to load Parquet file: {}", path.display()))?,
        _ => anyhow::bail!(
            "Unsupported file format: {}. Supported formats: csv, parquet",
            extension
        ),
    };

    lf.collect()
        .with_context(|| format!("Failed to read data from {}", path.display()))
}

/// Pick the most frequent candidate separator in a header line.
///
/// Ties resolve to the earliest candidate, so a line without any separator
/// yields `,`.
pub fn sniff_separator(header_line: &str) -> u8 {
    let mut best = (b',', 0usize);
    for &candidate in &CANDIDATE_SEPARATORS {
        let count = header_line.bytes().filter(|&b| b == candidate).count();
        if count > best.1 {
            best = (candidate, count);
        }
    }
    best.0
}

fn read_header_line(path: &Path) -> Result<String> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut line = String::new();
    BufReader::new(file)
        .read_line(&mut line)
        .with_context(|| format!("Failed to read header of {}", path.display()))?;
    Ok(line)
}

/// Convert a DataFrame into rows plus an attribute type registry.
///
/// `target` defaults to the last column. String columns whose first
/// `infer_rows` non-empty values all coerce to numbers are registered as
/// numeric; their cells keep their text form.
pub fn dataframe_to_dataset(
    df: &DataFrame,
    target: Option<&str>,
    infer_rows: usize,
) -> Result<Dataset> {
    let column_names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();

    let target_name = match target {
        Some(t) => {
            if !column_names.iter().any(|c| c == t) {
                anyhow::bail!(
                    "Target column '{}' not found in dataset. Available columns: {:?}",
                    t,
                    column_names
                );
            }
            t.to_string()
        }
        None => column_names
            .last()
            .cloned()
            .context("Dataset has no columns")?,
    };

    let target_values: Vec<String> = column_values(
        df.column(&target_name)
            .with_context(|| format!("Target column '{}' not found", target_name))?,
    )?
    .into_iter()
    .map(|v| v.map(|v| v.to_string()).unwrap_or_default())
    .collect();

    let mut dataset = Dataset::new(Some(target_name.clone()));
    let mut columns: Vec<(String, Vec<Option<AttributeValue>>)> = Vec::new();

    for name in column_names.iter().filter(|c| **c != target_name) {
        let column = df.column(name)?;
        let values = column_values(column)?;
        let attribute_type = infer_attribute_type(column.dtype(), &values, infer_rows);
        debug!(column = %name, dtype = %column.dtype(), %attribute_type, "Registered attribute");
        dataset.add_attribute(name, attribute_type);
        columns.push((name.clone(), values));
    }

    for (i, target_value) in target_values.into_iter().enumerate() {
        let mut row = DataRow::new(target_value);
        for (name, values) in &columns {
            if let Some(value) = &values[i] {
                row.attributes.insert(name.clone(), value.clone());
            }
        }
        dataset.push_row(row);
    }

    Ok(dataset)
}

fn infer_attribute_type(
    dtype: &DataType,
    values: &[Option<AttributeValue>],
    infer_rows: usize,
) -> AttributeType {
    if dtype.is_primitive_numeric() {
        return AttributeType::Numeric;
    }
    if *dtype == DataType::Boolean {
        return AttributeType::Boolean;
    }

    let limit = if infer_rows == 0 { values.len() } else { infer_rows };
    let sample: Vec<&AttributeValue> = values
        .iter()
        .flatten()
        .filter(|v| !matches!(v, AttributeValue::Text(s) if s.trim().is_empty()))
        .take(limit)
        .collect();

    if !sample.is_empty() && sample.iter().all(|v| coerce_to_f64(v).is_some()) {
        AttributeType::Numeric
    } else {
        AttributeType::Text
    }
}

/// Cell values of a column; nulls become `None`.
fn column_values(col: &Column) -> Result<Vec<Option<AttributeValue>>> {
    let values: Vec<Option<AttributeValue>> = match col.dtype() {
        DataType::Boolean => col
            .bool()?
            .into_iter()
            .map(|v| v.map(AttributeValue::Boolean))
            .collect(),
        dtype if dtype.is_primitive_numeric() => {
            let cast = col.cast(&DataType::Float64)?;
            cast.f64()?
                .into_iter()
                .map(|v| v.map(AttributeValue::Number))
                .collect()
        }
        DataType::String => col
            .str()?
            .into_iter()
            .map(|v| v.map(|s| AttributeValue::Text(s.to_string())))
            .collect(),
        _ => {
            let cast = col.cast(&DataType::String)?;
            cast.str()?
                .into_iter()
                .map(|v| v.map(|s| AttributeValue::Text(s.to_string())))
                .collect()
        }
    };
    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sniff_separator() {
        assert_eq!(sniff_separator("a,b,c\n"), b',');
        assert_eq!(sniff_separator("a;b;c\n"), b';');
        assert_eq!(sniff_separator("a\tb\tc"), b'\t');
        assert_eq!(sniff_separator("a|b|c"), b'|');
        assert_eq!(sniff_separator("price;qty,x;y"), b';');
        assert_eq!(sniff_separator("single"), b',');
    }

    #[test]
    fn test_dataframe_to_dataset_defaults_target_to_last_column() {
        let df = df! {
            "age" => [Some(25i64), Some(40), None],
            "city" => ["a", "b", "c"],
            "buys" => ["yes", "no", "yes"],
        }
        .unwrap();

        let ds = dataframe_to_dataset(&df, None, 100).unwrap();
        assert_eq!(ds.target_name.as_deref(), Some("buys"));
        assert_eq!(ds.attributes, vec!["age".to_string(), "city".to_string()]);
        assert_eq!(ds.attribute_type("age"), Some(AttributeType::Numeric));
        assert_eq!(ds.attribute_type("city"), Some(AttributeType::Text));
        assert_eq!(ds.rows[1].target, "no");
        assert_eq!(ds.rows[0].get("age"), Some(&AttributeValue::Number(25.0)));
        // Null cells are left out of the row
        assert!(ds.rows[2].get("age").is_none());
    }

    #[test]
    fn test_numeric_text_column_is_registered_numeric() {
        let df = df! {
            "score" => ["1,5", "2.25", " 3 "],
            "flag" => [true, false, true],
            "class" => [1i32, 0, 1],
        }
        .unwrap();

        let ds = dataframe_to_dataset(&df, Some("class"), 100).unwrap();
        assert_eq!(ds.attribute_type("score"), Some(AttributeType::Numeric));
        assert_eq!(ds.attribute_type("flag"), Some(AttributeType::Boolean));
        assert_eq!(ds.rows[0].get("score"), Some(&AttributeValue::Text("1,5".into())));
        assert_eq!(ds.rows[0].numeric("score"), Some(1.5));
        assert_eq!(ds.rows[0].target, "1");
    }

    #[test]
    fn test_missing_target_is_an_error() {
        let df = df! { "a" => [1.0f64] }.unwrap();
        let err = dataframe_to_dataset(&df, Some("nope"), 100).unwrap_err();
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_inference_sample_limit() {
        let df = df! {
            "mixed" => ["1", "2", "abc"],
            "t" => ["x", "y", "z"],
        }
        .unwrap();
        let ds = dataframe_to_dataset(&df, None, 2).unwrap();
        assert_eq!(ds.attribute_type("mixed"), Some(AttributeType::Numeric));
        let ds = dataframe_to_dataset(&df, None, 0).unwrap();
        assert_eq!(ds.attribute_type("mixed"), Some(AttributeType::Text));
    }
}
