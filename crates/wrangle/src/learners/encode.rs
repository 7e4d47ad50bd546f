//! Learner that label-encodes low-cardinality categorical columns.

use indexmap::IndexMap;
use tracing::debug;

use crate::input::{Table, Value};
use crate::profile::TableProfile;
use crate::suggestion::{Suggestion, SuggestionKind, TransformStrategy};

use super::Learner;

/// Maximum distinct values for a column to count as categorical.
const MAX_UNIQUE_THRESHOLD: usize = 10;

pub struct EncodeCategoricalLearner;

impl Learner for EncodeCategoricalLearner {
    fn kind(&self) -> SuggestionKind {
        SuggestionKind::EncodeCategorical
    }

    fn generate(&self, _table: &Table, profile: &TableProfile) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        for (name, col) in &profile.columns {
            if col.data_type.is_stringy()
                && !col.is_constant
                && !col.is_mostly_empty
                && col.unique_values <= MAX_UNIQUE_THRESHOLD
            {
                suggestions.push(
                    Suggestion::new(
                        SuggestionKind::EncodeCategorical,
                        name,
                        format!("Label encode {}", name),
                        format!(
                            "REASON: Low-cardinality categorical column with {} unique values.",
                            col.unique_values
                        ),
                    )
                    .with_strategy(TransformStrategy::LabelEncoding)
                    .with_code(encode_code(name))
                    .with_score(4.0),
                );
            }
        }

        suggestions
    }

    fn apply(&self, table: &mut Table, suggestion: &Suggestion) -> bool {
        if suggestion.kind != SuggestionKind::EncodeCategorical {
            return false;
        }
        let Some(col) = table.column_mut(&suggestion.column) else {
            debug!(column = %suggestion.column, "encode target no longer exists");
            return false;
        };

        // Dense codes in first-seen order. Missing values form their own
        // category, matching the original's encode-through-string path.
        let mut codes: IndexMap<String, i64> = IndexMap::new();
        for v in &col.values {
            let key = v.render();
            let next = codes.len() as i64;
            codes.entry(key).or_insert(next);
        }

        for v in col.values.iter_mut() {
            let code = codes[&v.render()];
            *v = Value::Int(code);
        }

        true
    }
}

fn encode_code(column: &str) -> String {
    format!(
        "le = LabelEncoder()\ndf['{col}'] = le.fit_transform(df['{col}'])",
        col = column
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Column;
    use crate::profile::profile_table;

    fn cat_table() -> Table {
        Table::new(vec![Column::new(
            "color",
            vec![
                Value::Str("red".into()),
                Value::Str("blue".into()),
                Value::Str("red".into()),
                Value::Str("green".into()),
            ],
        )])
    }

    #[test]
    fn test_generation_trigger() {
        let table = cat_table();
        let profile = profile_table(&table);
        let suggestions = EncodeCategoricalLearner.generate(&table, &profile);

        assert_eq!(suggestions.len(), 1);
        assert_eq!(suggestions[0].quality_improvement, 4.0);
        assert!(suggestions[0].explanation.contains("3 unique values"));
        assert_eq!(suggestions[0].strategy, Some(TransformStrategy::LabelEncoding));

        let json = serde_json::to_value(&suggestions[0]).unwrap();
        assert_eq!(json["strategy"], "label_encoding");
    }

    #[test]
    fn test_constant_and_high_cardinality_excluded() {
        let constant = Table::new(vec![Column::new(
            "k",
            vec![Value::Str("x".into()), Value::Str("x".into())],
        )]);
        let profile = profile_table(&constant);
        assert!(EncodeCategoricalLearner.generate(&constant, &profile).is_empty());

        let wide = Table::new(vec![Column::new(
            "id",
            (0..20).map(|i| Value::Str(format!("v{}", i))).collect(),
        )]);
        let profile = profile_table(&wide);
        assert!(EncodeCategoricalLearner.generate(&wide, &profile).is_empty());
    }

    #[test]
    fn test_apply_assigns_first_seen_codes() {
        let mut table = cat_table();
        let profile = profile_table(&table);
        let suggestions = EncodeCategoricalLearner.generate(&table, &profile);

        assert!(EncodeCategoricalLearner.apply(&mut table, &suggestions[0]));
        let values = &table.column("color").unwrap().values;
        assert_eq!(
            values,
            &vec![Value::Int(0), Value::Int(1), Value::Int(0), Value::Int(2)]
        );

        // Encoding is stable: re-running over identical input produces the
        // same codes.
        let mut again = cat_table();
        assert!(EncodeCategoricalLearner.apply(&mut again, &suggestions[0]));
        assert_eq!(&again.column("color").unwrap().values, values);
    }
}
