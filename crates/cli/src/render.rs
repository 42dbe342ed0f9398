//! Timeline output rendering.

use anyhow::{Context, Result};

use contracts::MergedRecord;

const HEADERS: [&str; 6] = [
    "Units",
    "Asia Start",
    "Asia End",
    "Global Start",
    "Global End",
    "Type",
];

/// Print the timeline as an aligned text table
pub fn print_table(records: &[&MergedRecord]) {
    if records.is_empty() {
        println!("No banners matched.");
        return;
    }

    let rows: Vec<[String; 6]> = records.iter().map(|r| row_of(r)).collect();

    let mut widths: [usize; 6] = HEADERS.map(|h| h.chars().count());
    for row in &rows {
        for (width, cell) in widths.iter_mut().zip(row.iter()) {
            *width = (*width).max(cell.chars().count());
        }
    }

    print_row(&HEADERS.map(String::from), &widths);
    println!(
        "{}",
        widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("-+-")
    );
    for row in &rows {
        print_row(row, &widths);
    }

    println!("\n{} banner(s)", rows.len());
}

/// Print the timeline as pretty JSON
pub fn print_json(records: &[&MergedRecord]) -> Result<()> {
    let json =
        serde_json::to_string_pretty(records).context("Failed to serialize timeline")?;
    println!("{}", json);
    Ok(())
}

fn row_of(record: &MergedRecord) -> [String; 6] {
    let release_type = record
        .global
        .as_ref()
        .or(record.asia.as_ref())
        .map(|w| w.release_type.to_string())
        .unwrap_or_else(|| "N/A".to_string());

    [
        record.units.join(", "),
        record.asia_start_str(),
        record.asia_end_str(),
        record.global_start_str(),
        record.global_end_str(),
        release_type,
    ]
}

fn print_row(cells: &[String; 6], widths: &[usize; 6]) {
    let line = cells
        .iter()
        .zip(widths.iter())
        .map(|(cell, width)| format!("{:<width$}", cell, width = width))
        .collect::<Vec<_>>()
        .join(" | ");
    println!("{}", line.trim_end());
}
