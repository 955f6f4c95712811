//! Discretization summary report generation

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, Color, Table};
use console::style;
use serde::Serialize;
use std::time::Duration;

use crate::pipeline::{DataRow, DiscretizationResult, DiscretizationStatus, DiscretizeError};

/// One bin of a discretized attribute
#[derive(Debug, Clone, Serialize)]
pub struct BinReport {
    pub label: String,
    pub count: usize,
}

/// Serializable outcome for a single attribute
#[derive(Debug, Clone, Serialize)]
pub struct AttributeReport {
    pub attribute: String,
    pub algorithm: String,
    /// `discretized` or `pass-through: <cause>`
    pub status: String,
    pub cut_points: Vec<f64>,
    pub numeric_values: usize,
    pub bins: Vec<BinReport>,
}

impl AttributeReport {
    pub fn from_result(result: &DiscretizationResult) -> Self {
        let status = match &result.status {
            DiscretizationStatus::Discretized => "discretized".to_string(),
            DiscretizationStatus::PassThrough(reason) => format!("pass-through: {}", reason),
        };
        let bins = if result.is_pass_through() {
            Vec::new()
        } else {
            result
                .bin_counts()
                .into_iter()
                .map(|(bin, count)| BinReport {
                    label: bin.label(),
                    count,
                })
                .collect()
        };

        Self {
            attribute: result.discretized_attribute_name.clone(),
            algorithm: result.algorithm.clone(),
            status,
            cut_points: result.final_cut_points.clone(),
            numeric_values: result.original_numeric_values.len(),
            bins,
        }
    }

    /// Report for a call that was rejected outright.
    pub fn rejected(attribute: &str, algorithm: &str, error: &DiscretizeError) -> Self {
        Self {
            attribute: attribute.to_string(),
            algorithm: algorithm.to_string(),
            status: format!("rejected: {}", error),
            cut_points: Vec::new(),
            numeric_values: 0,
            bins: Vec::new(),
        }
    }

    pub fn is_discretized(&self) -> bool {
        self.status == "discretized"
    }
}

/// Render the bins of one attribute as a table
pub fn print_attribute_report(report: &AttributeReport) {
    println!();
    println!(
        "    {} {} {}",
        style("▸").cyan(),
        style(&report.attribute).white().bold(),
        style(format!("({})", report.algorithm)).dim()
    );

    if !report.is_discretized() {
        println!("      {}", style(&report.status).yellow());
        return;
    }

    let total = report.numeric_values.max(1) as f64;
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Bin").add_attribute(Attribute::Bold),
        Cell::new("Interval").add_attribute(Attribute::Bold),
        Cell::new("Count").add_attribute(Attribute::Bold),
        Cell::new("Share").add_attribute(Attribute::Bold),
    ]);

    for (i, bin) in report.bins.iter().enumerate() {
        table.add_row(vec![
            Cell::new(i),
            Cell::new(&bin.label).fg(Color::Cyan),
            Cell::new(bin.count),
            Cell::new(format!("{:.1}%", bin.count as f64 / total * 100.0)),
        ]);
    }

    for line in table.to_string().lines() {
        println!("      {}", line);
    }
}

/// Totals across one run
#[derive(Debug, Default)]
pub struct RunSummary {
    pub attributes: usize,
    pub discretized: usize,
    pub passed_through: Vec<String>,
    pub total_bins: usize,
    pub elapsed: Duration,
}

impl RunSummary {
    pub fn from_reports(reports: &[AttributeReport], elapsed: Duration) -> Self {
        let mut summary = Self {
            attributes: reports.len(),
            elapsed,
            ..Default::default()
        };
        for report in reports {
            if report.is_discretized() {
                summary.discretized += 1;
                summary.total_bins += report.bins.len();
            } else {
                summary.passed_through.push(report.attribute.clone());
            }
        }
        summary
    }

    pub fn display(&self) {
        println!();
        println!(
            "    {} {}",
            style("📋").cyan(),
            style("DISCRETIZATION SUMMARY").white().bold()
        );
        println!("    {}", style("─".repeat(50)).dim());
        println!();

        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![Cell::new("📁 Attributes"), Cell::new(self.attributes)]);
        table.add_row(vec![
            Cell::new("✅ Discretized"),
            Cell::new(self.discretized)
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);
        table.add_row(vec![
            Cell::new("↪️  Passed Through"),
            Cell::new(self.passed_through.len()).fg(if self.passed_through.is_empty() {
                Color::White
            } else {
                Color::Yellow
            }),
        ]);
        table.add_row(vec![Cell::new("🧱 Total Bins"), Cell::new(self.total_bins)]);
        table.add_row(vec![
            Cell::new("⏱️  Time"),
            Cell::new(format!("{:.2}s", self.elapsed.as_secs_f64())),
        ]);

        for line in table.to_string().lines() {
            println!("    {}", line);
        }

        if !self.passed_through.is_empty() {
            println!();
            println!(
                "      {} {}:",
                style("Passed Through").yellow(),
                style(format!("({})", self.passed_through.len())).dim()
            );
            for attribute in &self.passed_through {
                println!("        {} {}", style("•").dim(), attribute);
            }
        }
    }
}

/// Overlay the labels of every discretized result onto copies of `rows`.
pub fn combine_rows(rows: &[DataRow], results: &[&DiscretizationResult]) -> Vec<DataRow> {
    let mut combined = rows.to_vec();
    for result in results.iter().filter(|r| !r.is_pass_through()) {
        let attribute = &result.discretized_attribute_name;
        for (row, discretized) in combined.iter_mut().zip(&result.discretized_rows) {
            if let Some(label) = discretized.get(attribute) {
                row.attributes.insert(attribute.clone(), label.clone());
            }
        }
    }
    combined
}

/// Print the first `limit` rows for the given attributes plus the target
pub fn print_preview(rows: &[DataRow], attributes: &[String], target_name: &str, limit: usize) {
    if limit == 0 || rows.is_empty() {
        return;
    }

    println!();
    println!(
        "    {} {}",
        style("🔎").cyan(),
        style(format!("PREVIEW (first {} rows)", limit.min(rows.len())))
            .white()
            .bold()
    );
    println!();

    let mut header: Vec<Cell> = attributes
        .iter()
        .map(|a| Cell::new(a).add_attribute(Attribute::Bold))
        .collect();
    header.push(Cell::new(target_name).add_attribute(Attribute::Bold).fg(Color::Magenta));

    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(header);

    for row in rows.iter().take(limit) {
        let mut cells: Vec<Cell> = attributes
            .iter()
            .map(|a| Cell::new(row.get(a).map(|v| v.to_string()).unwrap_or_default()))
            .collect();
        cells.push(Cell::new(&row.target));
        table.add_row(cells);
    }

    for line in table.to_string().lines() {
        println!("    {}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{Algorithm, AttributeType, Dataset};

    fn dataset() -> Dataset {
        let mut ds = Dataset::new(Some("y".to_string()));
        ds.add_attribute("x", AttributeType::Numeric);
        ds.add_attribute("name", AttributeType::Text);
        for i in 1..=10 {
            ds.push_row(DataRow::new("t").with("x", i as f64).with("name", "n"));
        }
        ds
    }

    #[test]
    fn test_report_from_discretized_result() {
        let ds = dataset();
        let params = crate::pipeline::Parameters::new().with_num_bins(2);
        let result = Algorithm::EqualWidth
            .discretizer()
            .discretize(&ds, "x", Some(&params))
            .unwrap();
        let report = AttributeReport::from_result(&result);

        assert!(report.is_discretized());
        assert_eq!(report.cut_points, vec![5.5]);
        assert_eq!(report.numeric_values, 10);
        assert_eq!(report.bins.len(), 2);
        assert_eq!(report.bins[0].label, "(-inf, 5.50)");
        assert_eq!(report.bins[0].count, 5);
    }

    #[test]
    fn test_report_from_pass_through() {
        let ds = dataset();
        let result = Algorithm::EqualWidth
            .discretizer()
            .discretize(&ds, "name", None)
            .unwrap();
        let report = AttributeReport::from_result(&result);
        assert!(!report.is_discretized());
        assert!(report.status.starts_with("pass-through:"));
        assert!(report.bins.is_empty());
    }

    #[test]
    fn test_run_summary_counts() {
        let ds = dataset();
        let discretizer = Algorithm::EqualFrequency.discretizer();
        let reports: Vec<AttributeReport> = ["x", "name"]
            .iter()
            .map(|a| AttributeReport::from_result(&discretizer.discretize(&ds, a, None).unwrap()))
            .collect();
        let summary = RunSummary::from_reports(&reports, Duration::from_millis(5));

        assert_eq!(summary.attributes, 2);
        assert_eq!(summary.discretized, 1);
        assert_eq!(summary.passed_through, vec!["name".to_string()]);
        assert!(summary.total_bins >= 2);
    }

    #[test]
    fn test_combine_rows_overlays_labels() {
        let ds = dataset();
        let params = crate::pipeline::Parameters::new().with_num_bins(2);
        let result = Algorithm::EqualWidth
            .discretizer()
            .discretize(&ds, "x", Some(&params))
            .unwrap();
        let rows = combine_rows(&ds.rows, &[&result]);
        assert_eq!(rows[0].get("x").map(|v| v.to_string()).as_deref(), Some("(-inf, 5.50)"));
        assert_eq!(rows[0].get("name"), ds.rows[0].get("name"));
    }
}
