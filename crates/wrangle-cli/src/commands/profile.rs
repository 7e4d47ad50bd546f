//! Profile command - load a file and report per-column statistics.

use std::path::PathBuf;

use colored::Colorize;
use wrangle::{DataType, Session};

pub fn run(file: PathBuf, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut session = Session::new();
    let summary = session.load_file(&file)?.clone();
    let quality = session.quality_score()?;
    let profile = session.profile()?;

    if json {
        let report = serde_json::json!({
            "source": summary,
            "profile": profile,
            "quality_score": quality,
        });
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Profiling".cyan().bold(),
        file.display().to_string().white()
    );
    println!(
        "{} rows, {} columns ({}, {} bytes)",
        summary.row_count.to_string().white().bold(),
        summary.column_count.to_string().white().bold(),
        summary.format,
        summary.size_bytes
    );
    println!();

    println!(
        "  {:<24} {:<20} {:>9} {:>8}  flags",
        "column", "type", "missing", "unique"
    );
    for (name, col) in &profile.columns {
        let mut flags = Vec::new();
        if col.is_constant {
            flags.push("constant");
        }
        if col.is_mostly_empty {
            flags.push("mostly-empty");
        }
        println!(
            "  {:<24} {:<20} {:>8.1}% {:>8}  {}",
            name,
            type_label(col.data_type),
            col.missing_percentage,
            col.unique_values,
            flags.join(", ").yellow()
        );
    }

    println!();
    println!(
        "Data quality score: {}",
        format!("{:.1}", quality).white().bold()
    );

    Ok(())
}

fn type_label(data_type: DataType) -> &'static str {
    match data_type {
        DataType::Numeric => "numeric",
        DataType::Datetime => "datetime",
        DataType::PotentialDatetime => "potential datetime",
        DataType::Text => "string",
    }
}
