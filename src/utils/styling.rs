//! Terminal styling utilities for console output

use console::{style, Emoji};
use std::path::Path;

use crate::pipeline::{Algorithm, DatasetSummary};

// Emoji icons with fallbacks for terminals that don't support them
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "[*] ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "[!] ");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", ">> ");
pub static CHART: Emoji<'_, '_> = Emoji("📊 ", "");
pub static FOLDER: Emoji<'_, '_> = Emoji("📂 ", "");
pub static TARGET: Emoji<'_, '_> = Emoji("🎯 ", "");
pub static GEAR: Emoji<'_, '_> = Emoji("🧮 ", "");

/// Print the application banner
pub fn print_banner(version: &str) {
    let banner = r#"
    ┏┓ ╻┏┓╻╻  ┏━┓┏┓
    ┣┻┓┃┃┗┫┃  ┣━┫┣┻┓
    ┗━┛╹╹ ╹┗━╸╹ ╹┗━┛
    "#;

    println!();
    println!("{}", style(banner).cyan().bold());
    println!(
        "    {}",
        style("Continuous attributes in, labelled bins out").dim()
    );
    println!("    {}", style(format!("v{}", version)).dim());
    println!("    {}", style("━".repeat(50)).dim());
    println!();
}

/// Print configuration card
pub fn print_config(input: &Path, target: Option<&str>, algorithm: Algorithm, bins: Option<usize>) {
    let box_width = 56;
    let line = "─".repeat(box_width - 2);

    println!("    ┌{}┐", line);
    println!(
        "    │ {}{}│",
        style("⚙️  Configuration").cyan().bold(),
        " ".repeat(box_width - 20)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Input:     {:<36}│",
        FOLDER,
        truncate_path(input, 35)
    );
    println!(
        "    │  {} Target:    {:<36}│",
        TARGET,
        truncate_string(target.unwrap_or("(last column)"), 35)
    );
    println!("    ├{}┤", line);
    println!(
        "    │  {} Algorithm: {:<36}│",
        GEAR,
        style(algorithm.to_string()).yellow()
    );
    println!(
        "    │  {} Bins:      {:<36}│",
        CHART,
        style(bins.map_or_else(|| "auto".to_string(), |b| b.to_string())).yellow()
    );
    println!("    └{}┘", line);
    println!();
}

/// Print the dataset shape
pub fn print_dataset_summary(summary: &DatasetSummary) {
    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", summary.rows);
    println!(
        "      Attributes: {} ({} numeric, {} text, {} boolean)",
        summary.attributes, summary.numeric, summary.text, summary.boolean
    );
}

/// Print a step header with styling
pub fn print_step_header(step_num: u8, title: &str) {
    println!();
    println!(
        "    {} {} {}",
        style(format!("STEP {}", step_num)).cyan().bold(),
        style("│").dim(),
        style(title).white().bold()
    );
    println!("    {}", style("─".repeat(50)).dim());
}

/// Print a success message
pub fn print_success(message: &str) {
    println!("    {} {}", style("✓").green().bold(), style(message).green());
}

/// Print an info message
pub fn print_info(message: &str) {
    println!("    {} {}", INFO, message);
}

/// Print a warning message
pub fn print_warning(message: &str) {
    println!("    {} {}", WARN, style(message).yellow());
}

/// Print the final completion message
pub fn print_completion() {
    println!();
    println!(
        "    {} {}",
        ROCKET,
        style("Discretization complete!").green().bold()
    );
    println!();
}

/// Print a styled count message
pub fn print_count(description: &str, count: usize, detail: Option<&str>) {
    if let Some(info) = detail {
        println!(
            "      Found {} {} {}",
            style(count).yellow().bold(),
            description,
            style(info).dim()
        );
    } else {
        println!("      Found {} {}", style(count).yellow().bold(), description);
    }
}

// Helper functions

fn truncate_path(path: &Path, max_len: usize) -> String {
    let path_str = path.display().to_string();
    truncate_string(&path_str, max_len)
}

/// Shorten `s` to at most `max_len` characters, keeping the tail.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    let len = s.chars().count();
    if len <= max_len {
        s.to_string()
    } else {
        let tail: String = s.chars().skip(len - max_len + 3).collect();
        format!("...{}", tail)
    }
}
