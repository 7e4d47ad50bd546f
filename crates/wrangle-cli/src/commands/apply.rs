//! Apply command - apply one suggestion and export the cleaned data.

use std::path::PathBuf;

use colored::Colorize;
use tracing::info;
use wrangle::{Session, Table, Value};

pub fn run(
    file: PathBuf,
    pick: usize,
    output: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    if !file.exists() {
        return Err(format!("File not found: {}", file.display()).into());
    }

    let mut session = Session::new();
    session.load_file(&file)?;
    let before = session.quality_score()?;

    // Suggestion ids are only stable within one generated batch, so the
    // pool is regenerated here and the pick resolved against it.
    let suggestions = session.generate_suggestions()?;
    let picked = suggestions
        .iter()
        .find(|s| s.id == pick)
        .ok_or_else(|| {
            format!(
                "No suggestion with id {} (run `wrangle suggest {}` to list ids)",
                pick,
                file.display()
            )
        })?
        .clone();

    if !session.apply_transformation(&picked)? {
        return Err(format!("Suggestion {} no longer applies: {}", pick, picked.title).into());
    }

    let after = session.quality_score()?;
    info!(
        pick,
        kind = picked.kind.as_str(),
        column = %picked.column,
        before,
        after,
        "applied suggestion"
    );
    session.record_feedback(&picked, (after - before).max(0.0));

    let output_path = output.unwrap_or_else(|| {
        let stem = file.file_stem().unwrap_or_default().to_string_lossy();
        file.with_file_name(format!("{}.cleaned.csv", stem))
    });
    write_csv(session.table()?, &output_path)?;

    println!(
        "{} {}",
        "Applied".green().bold(),
        picked.title.white()
    );
    println!("Data quality score: {:.1} -> {:.1}", before, after);
    println!(
        "{} {}",
        "Saved to".green().bold(),
        output_path.display().to_string().white()
    );

    Ok(())
}

fn write_csv(table: &Table, path: &PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(table.column_names())?;

    for row in 0..table.row_count() {
        let record: Vec<String> = table
            .columns
            .iter()
            .map(|col| match &col.values[row] {
                Value::Null => String::new(),
                value => value.render(),
            })
            .collect();
        writer.write_record(&record)?;
    }

    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_apply_writes_cleaned_csv() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let mut f = std::fs::File::create(&input).unwrap();
        f.write_all(b"id,unit\n1,kg\n2,kg\n3,kg\n").unwrap();

        let out = dir.path().join("out.csv");
        run(input, 1, Some(out.clone())).unwrap();

        let cleaned = std::fs::read_to_string(&out).unwrap();
        // The top suggestion drops the constant "unit" column.
        assert!(cleaned.starts_with("id\n"));
        assert_eq!(cleaned.lines().count(), 4);
    }

    #[test]
    fn test_unknown_pick_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("data.csv");
        let mut f = std::fs::File::create(&input).unwrap();
        f.write_all(b"id,unit\n1,kg\n2,kg\n").unwrap();

        assert!(run(input, 99, None).is_err());
    }
}
