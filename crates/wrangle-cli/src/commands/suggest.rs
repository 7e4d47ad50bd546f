//! Suggest command - generate ranked cleaning suggestions.

use std::path::PathBuf;

use colored::Colorize;
use wrangle::{RankerKind, Session, SessionConfig};

pub fn run(
    file: PathBuf,
    max_suggestions: usize,
    learned: bool,
    model: Option<PathBuf>,
    json: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let ranker = if learned || model.is_some() {
        RankerKind::Learned { model_path: model }
    } else {
        RankerKind::Simulation
    };
    let mut session = Session::with_config(SessionConfig {
        max_suggestions,
        ranker,
    });

    session.load_file(&file)?;
    let suggestions = session.generate_suggestions()?;

    if json {
        println!("{}", serde_json::to_string_pretty(&suggestions)?);
        return Ok(());
    }

    println!(
        "{} {}",
        "Analyzing".cyan().bold(),
        file.display().to_string().white()
    );
    println!(
        "Data quality score: {}",
        format!("{:.1}", session.quality_score()?).white().bold()
    );
    println!();

    if suggestions.is_empty() {
        println!("{}", "No issues found - data looks clean!".green());
        return Ok(());
    }

    println!(
        "{} suggestions:",
        suggestions.len().to_string().white().bold()
    );
    for sug in &suggestions {
        println!(
            "  {:>2}. [{}] {}",
            sug.id.to_string().white().bold(),
            format!("+{:.2}", sug.quality_improvement).green(),
            sug.title
        );
        println!("      {}", sug.explanation.dimmed());
    }

    println!();
    println!(
        "Run {} to apply one",
        format!("wrangle apply {} --pick <ID>", file.display())
            .cyan()
            .bold()
    );

    Ok(())
}
