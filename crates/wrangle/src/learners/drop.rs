//! Learner that proposes dropping constant or mostly-empty columns.

use tracing::debug;

use crate::input::Table;
use crate::profile::TableProfile;
use crate::suggestion::{Suggestion, SuggestionKind};

use super::Learner;

pub struct DropColumnLearner;

impl Learner for DropColumnLearner {
    fn kind(&self) -> SuggestionKind {
        SuggestionKind::DropColumn
    }

    fn generate(&self, table: &Table, profile: &TableProfile) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        for (name, col) in &profile.columns {
            if col.is_constant {
                let value = table
                    .column(name)
                    .and_then(|c| c.non_null().next())
                    .map(|v| v.render())
                    .unwrap_or_else(|| "null".to_string());

                suggestions.push(
                    Suggestion::new(
                        SuggestionKind::DropColumn,
                        name,
                        format!("Drop {}", name),
                        format!("REASON: contains constant value {}", value),
                    )
                    .with_code(drop_code(name))
                    .with_score(5.0),
                );
            } else if col.is_mostly_empty {
                let percentage = col.missing_percentage.round();
                suggestions.push(
                    Suggestion::new(
                        SuggestionKind::DropColumn,
                        name,
                        format!("Drop {}", name),
                        format!("REASON: {}% missing values", percentage),
                    )
                    .with_code(drop_code(name))
                    .with_score((col.missing_percentage / 10.0).min(10.0)),
                );
            }
        }

        suggestions
    }

    fn apply(&self, table: &mut Table, suggestion: &Suggestion) -> bool {
        if suggestion.kind != SuggestionKind::DropColumn {
            return false;
        }
        let ok = table.drop_column(&suggestion.column);
        if !ok {
            debug!(column = %suggestion.column, "drop target no longer exists");
        }
        ok
    }
}

fn drop_code(column: &str) -> String {
    format!("df = df.drop(columns = ['{}'])", column)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Column, Value};
    use crate::profile::profile_table;

    fn make_table() -> Table {
        Table::new(vec![
            Column::new("id", vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
            Column::new(
                "status",
                vec![
                    Value::Str("ok".into()),
                    Value::Str("ok".into()),
                    Value::Str("ok".into()),
                ],
            ),
            Column::new("sparse", vec![Value::Null, Value::Null, Value::Int(7)]),
        ])
    }

    #[test]
    fn test_constant_and_mostly_empty_triggers() {
        let table = make_table();
        let profile = profile_table(&table);
        let suggestions = DropColumnLearner.generate(&table, &profile);

        assert_eq!(suggestions.len(), 2);

        let constant = suggestions.iter().find(|s| s.column == "status").unwrap();
        assert_eq!(constant.quality_improvement, 5.0);
        assert!(constant.explanation.contains("constant value ok"));

        // 2/3 missing → 66.67% → score 6.67 (capped at 10).
        let sparse = suggestions.iter().find(|s| s.column == "sparse").unwrap();
        assert!((sparse.quality_improvement - 100.0 * 2.0 / 3.0 / 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_apply_removes_column() {
        let mut table = make_table();
        let profile = profile_table(&table);
        let suggestions = DropColumnLearner.generate(&table, &profile);
        let drop_status = suggestions.iter().find(|s| s.column == "status").unwrap();

        assert!(DropColumnLearner.apply(&mut table, drop_status));
        assert_eq!(table.column_names(), vec!["id", "sparse"]);

        let reprofiled = profile_table(&table);
        assert_eq!(reprofiled.column_count, 2);

        // A second apply fails quietly.
        assert!(!DropColumnLearner.apply(&mut table, drop_status));
    }
}
