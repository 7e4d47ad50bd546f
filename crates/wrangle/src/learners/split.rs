//! Learner that splits compound string columns on a delimiter.

use tracing::debug;

use crate::input::{Column, Table, Value};
use crate::profile::TableProfile;
use crate::suggestion::{Suggestion, SuggestionKind};

use super::Learner;

/// Delimiters probed in priority order; the first qualifying one wins.
const DELIMITERS: &[&str] = &[" ", ",", "-", "_", "|", ":"];

/// Number of non-null values sampled when probing delimiters.
const SAMPLE_SIZE: usize = 20;

/// Minimum fraction of sampled values that must split into multiple parts.
const SPLIT_THRESHOLD: f64 = 0.6;

pub struct SplitColumnLearner;

impl Learner for SplitColumnLearner {
    fn kind(&self) -> SuggestionKind {
        SuggestionKind::SplitColumn
    }

    fn generate(&self, table: &Table, profile: &TableProfile) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        for (name, col_profile) in &profile.columns {
            if !col_profile.data_type.is_stringy() {
                continue;
            }
            let Some(col) = table.column(name) else {
                continue;
            };

            let sample: Vec<String> = col
                .non_null()
                .take(SAMPLE_SIZE)
                .map(|v| v.render())
                .collect();
            if sample.is_empty() {
                continue;
            }

            for delim in DELIMITERS {
                let part_counts: Vec<usize> =
                    sample.iter().map(|s| s.split(delim).count()).collect();
                let multi = part_counts.iter().filter(|&&c| c > 1).count();

                if multi as f64 / sample.len() as f64 >= SPLIT_THRESHOLD {
                    let max_parts = part_counts.iter().copied().max().unwrap_or(1);
                    let preview: Vec<String> =
                        (1..=max_parts).map(|i| format!("{}_{}", name, i)).collect();

                    suggestions.push(
                        Suggestion::new(
                            SuggestionKind::SplitColumn,
                            name,
                            format!("Split '{}' by '{}'", name, delim),
                            format!(
                                "REASON: Values in column '{}' appear to be splittable by '{}' into multiple parts.",
                                name, delim
                            ),
                        )
                        .with_split(*delim, preview.clone())
                        .with_code(split_code(name, delim, &preview))
                        .with_score(3.0 + 0.5 * max_parts as f64),
                    );
                    // One split suggestion per column; later delimiters
                    // are never tried once one qualifies.
                    break;
                }
            }
        }

        suggestions
    }

    fn apply(&self, table: &mut Table, suggestion: &Suggestion) -> bool {
        if suggestion.kind != SuggestionKind::SplitColumn {
            return false;
        }
        let Some(delimiter) = suggestion.delimiter.as_deref() else {
            debug!(column = %suggestion.column, "split suggestion has no delimiter");
            return false;
        };
        let Some(index) = table.column_index(&suggestion.column) else {
            debug!(column = %suggestion.column, "split target no longer exists");
            return false;
        };

        // Split every value; missing source cells produce no parts.
        let parts_per_row: Vec<Vec<String>> = table.columns[index]
            .values
            .iter()
            .map(|v| {
                if v.is_null() {
                    Vec::new()
                } else {
                    v.render().split(delimiter).map(str::to_string).collect()
                }
            })
            .collect();

        let max_parts = parts_per_row.iter().map(Vec::len).max().unwrap_or(0);

        // Build raw sub-columns, keeping only those with any non-empty
        // part; empty-string parts count as missing.
        let mut survivors: Vec<Vec<Value>> = Vec::new();
        for part_idx in 0..max_parts {
            let values: Vec<Value> = parts_per_row
                .iter()
                .map(|parts| match parts.get(part_idx) {
                    Some(p) if !p.is_empty() => Value::Str(p.clone()),
                    _ => Value::Null,
                })
                .collect();
            if values.iter().any(|v| !v.is_null()) {
                survivors.push(values);
            }
        }

        if survivors.is_empty() {
            debug!(column = %suggestion.column, "split produced no usable sub-columns");
            return false;
        }

        let name = suggestion.column.clone();
        let replacements: Vec<Column> = survivors
            .into_iter()
            .enumerate()
            .map(|(i, values)| Column::new(format!("{}_{}", name, i + 1), values))
            .collect();

        table.splice_columns(index, replacements);
        true
    }
}

fn split_code(column: &str, delimiter: &str, new_columns: &[String]) -> String {
    let cols = new_columns
        .iter()
        .map(|c| format!("'{}'", c))
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "split_cols = df['{col}'].str.split('{delim}', expand=True)\n\
         split_cols.columns = [{cols}]\n\
         df = df.drop(columns=['{col}']).join(split_cols)",
        col = column,
        delim = delimiter,
        cols = cols
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::profile_table;

    fn str_col(name: &str, vals: &[&str]) -> Column {
        Column::new(name, vals.iter().map(|s| Value::Str(s.to_string())).collect())
    }

    #[test]
    fn test_first_qualifying_delimiter_wins() {
        // Splittable by both "-" and "_", but "-" comes first in the
        // priority list.
        let table = Table::new(vec![str_col("code", &["a-b_x", "c-d_y", "e-f_z"])]);
        let profile = profile_table(&table);
        let suggestions = SplitColumnLearner.generate(&table, &profile);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].delimiter.as_deref(), Some("-"));
        assert_eq!(suggestions[0].new_columns, vec!["code_1", "code_2"]);
        assert_eq!(suggestions[0].quality_improvement, 3.0 + 0.5 * 2.0);
    }

    #[test]
    fn test_threshold_not_met() {
        // Only 1 of 3 values splits → below 60%.
        let table = Table::new(vec![str_col("v", &["a-b", "cd", "ef"])]);
        let profile = profile_table(&table);
        assert!(SplitColumnLearner.generate(&table, &profile).is_empty());
    }

    #[test]
    fn test_apply_drops_all_empty_subcolumns() {
        // "e" yields one part, so the second sub-column has a null there;
        // no value has a third part, so only two sub-columns survive.
        let mut table = Table::new(vec![str_col("v", &["a-b", "c-d", "e"])]);
        let profile = profile_table(&table);
        let suggestions = SplitColumnLearner.generate(&table, &profile);
        assert_eq!(suggestions.len(), 1);

        assert!(SplitColumnLearner.apply(&mut table, &suggestions[0]));
        assert_eq!(table.column_names(), vec!["v_1", "v_2"]);

        let first = table.column("v_1").unwrap();
        assert_eq!(
            first.values,
            vec![
                Value::Str("a".into()),
                Value::Str("c".into()),
                Value::Str("e".into()),
            ]
        );
        let second = table.column("v_2").unwrap();
        assert_eq!(
            second.values,
            vec![Value::Str("b".into()), Value::Str("d".into()), Value::Null]
        );
    }

    #[test]
    fn test_apply_preserves_column_position() {
        let mut table = Table::new(vec![
            Column::new("before", vec![Value::Int(1), Value::Int(2)]),
            str_col("v", &["a-b", "c-d"]),
            Column::new("after", vec![Value::Int(3), Value::Int(4)]),
        ]);
        let profile = profile_table(&table);
        let suggestions = SplitColumnLearner.generate(&table, &profile);
        let split = suggestions.iter().find(|s| s.column == "v").unwrap();

        assert!(SplitColumnLearner.apply(&mut table, split));
        assert_eq!(table.column_names(), vec!["before", "v_1", "v_2", "after"]);
        assert_eq!(table.row_count(), 2);
    }

    #[test]
    fn test_apply_missing_column_fails() {
        let mut table = Table::default();
        let sug = Suggestion::new(SuggestionKind::SplitColumn, "ghost", "t", "e")
            .with_split("-", vec![]);
        assert!(!SplitColumnLearner.apply(&mut table, &sug));
    }
}
