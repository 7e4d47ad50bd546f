//! Learner that proposes safer or tighter column types.

use indexmap::IndexSet;
use tracing::debug;

use crate::dates;
use crate::input::{Storage, Table, Value};
use crate::profile::TableProfile;
use crate::suggestion::{CastMethod, CastTarget, Suggestion, SuggestionKind};

use super::Learner;

/// Tolerance when deciding whether a float is a whole number.
const WHOLE_TOLERANCE: f64 = 1e-8;

/// Number of values sampled when probing a string column for dates.
const DATE_SAMPLE_SIZE: usize = 10;

/// Maximum distinct values for a float column to become categorical.
const FLOAT_CATEGORY_THRESHOLD: usize = 10;

/// Maximum distinct values for a string column to become categorical.
const STRING_CATEGORY_THRESHOLD: usize = 20;

pub struct TypecastColumnLearner;

impl Learner for TypecastColumnLearner {
    fn kind(&self) -> SuggestionKind {
        SuggestionKind::TypecastColumn
    }

    fn generate(&self, table: &Table, _profile: &TableProfile) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        for col in &table.columns {
            let name = col.name.as_str();
            match col.storage() {
                Storage::Float => {
                    let values: Vec<f64> = col.non_null().filter_map(|v| v.as_f64()).collect();
                    if values.is_empty() {
                        continue;
                    }

                    if values.iter().all(|v| is_whole(*v)) {
                        suggestions.push(
                            cast_suggestion(
                                name,
                                CastTarget::Int,
                                "All values are whole numbers. Safe to cast to int.",
                                format!("df['{}'] = df['{}'].astype('Int64')", name, name),
                                4.5,
                            )
                            .with_cast_method(CastMethod::Direct),
                        );
                    } else {
                        suggestions.push(
                            cast_suggestion(
                                name,
                                CastTarget::Int,
                                "Values have decimals. Round before casting to int (may cause precision loss).",
                                format!("df['{}'] = df['{}'].round().astype('Int64')", name, name),
                                3.5,
                            )
                            .with_cast_method(CastMethod::Round),
                        );
                        suggestions.push(
                            cast_suggestion(
                                name,
                                CastTarget::Int,
                                "Values have decimals. Truncate before casting to int (may cause data loss).",
                                format!("df['{}'] = df['{}'].astype('Int64')", name, name),
                                3.0,
                            )
                            .with_cast_method(CastMethod::Truncate),
                        );
                    }

                    if distinct_count(col) <= FLOAT_CATEGORY_THRESHOLD {
                        suggestions.push(cast_suggestion(
                            name,
                            CastTarget::Category,
                            "Float column with few unique values. Can be cast to category.",
                            format!("df['{}'] = df['{}'].astype('category')", name, name),
                            3.0,
                        ));
                    }
                }

                Storage::Int => {
                    let zero_one_only = col
                        .non_null()
                        .all(|v| matches!(v, Value::Int(0) | Value::Int(1)));
                    if zero_one_only {
                        suggestions.push(cast_suggestion(
                            name,
                            CastTarget::Bool,
                            "Only 0 and 1 values. Can be cast to boolean.",
                            format!("df['{}'] = df['{}'].astype(bool)", name, name),
                            3.5,
                        ));
                    }
                }

                Storage::Str => {
                    if date_sample_parses(col) {
                        suggestions.push(cast_suggestion(
                            name,
                            CastTarget::Datetime,
                            "Values look like dates. Can be cast to datetime.",
                            format!("df['{}'] = pd.to_datetime(df['{}'])", name, name),
                            4.5,
                        ));
                    }

                    if distinct_count(col) <= STRING_CATEGORY_THRESHOLD {
                        suggestions.push(cast_suggestion(
                            name,
                            CastTarget::Category,
                            "Low-cardinality text column. Can be cast to category.",
                            format!("df['{}'] = df['{}'].astype('category')", name, name),
                            3.0,
                        ));
                    }
                }

                Storage::Bool | Storage::DateTime => {}
            }
        }

        suggestions
    }

    fn apply(&self, table: &mut Table, suggestion: &Suggestion) -> bool {
        if suggestion.kind != SuggestionKind::TypecastColumn {
            return false;
        }
        let Some(target) = suggestion.target_type else {
            debug!(column = %suggestion.column, "typecast suggestion has no target type");
            return false;
        };
        let Some(col) = table.column_mut(&suggestion.column) else {
            debug!(column = %suggestion.column, "typecast target no longer exists");
            return false;
        };

        // Build the full replacement first so a failure mid-column leaves
        // the table untouched.
        let new_values: Option<Vec<Value>> = match target {
            CastTarget::Int => {
                let method = suggestion.cast_method.unwrap_or(CastMethod::Direct);
                col.values
                    .iter()
                    .map(|v| match v {
                        Value::Null => Some(Value::Null),
                        Value::Int(i) => Some(Value::Int(*i)),
                        Value::Float(f) => cast_float_to_int(*f, method),
                        _ => None,
                    })
                    .collect()
            }
            CastTarget::Bool => col
                .values
                .iter()
                .map(|v| match v {
                    Value::Null => Some(Value::Null),
                    Value::Bool(b) => Some(Value::Bool(*b)),
                    Value::Int(0) => Some(Value::Bool(false)),
                    Value::Int(1) => Some(Value::Bool(true)),
                    _ => None,
                })
                .collect(),
            CastTarget::Datetime => col
                .values
                .iter()
                .map(|v| match v {
                    Value::Null => Some(Value::Null),
                    Value::DateTime(dt) => Some(Value::DateTime(*dt)),
                    Value::Str(s) => dates::parse_datetime(s).map(Value::DateTime),
                    _ => None,
                })
                .collect(),
            CastTarget::Category => col
                .values
                .iter()
                .map(|v| {
                    Some(if v.is_null() {
                        Value::Null
                    } else {
                        Value::Str(v.render())
                    })
                })
                .collect(),
        };

        match new_values {
            Some(values) => {
                col.values = values;
                true
            }
            None => {
                debug!(
                    column = %suggestion.column,
                    target = target.label(),
                    "typecast failed: value not convertible"
                );
                false
            }
        }
    }
}

fn cast_suggestion(
    column: &str,
    target: CastTarget,
    reason: &str,
    code: String,
    score: f64,
) -> Suggestion {
    Suggestion::new(
        SuggestionKind::TypecastColumn,
        column,
        format!("Cast '{}' to {}", column, target.label()),
        format!("REASON: {}", reason),
    )
    .with_target(target)
    .with_code(code)
    .with_score(score)
}

fn is_whole(v: f64) -> bool {
    v.fract().abs() < WHOLE_TOLERANCE || (1.0 - v.fract().abs()).abs() < WHOLE_TOLERANCE
}

fn cast_float_to_int(f: f64, method: CastMethod) -> Option<Value> {
    if !f.is_finite() {
        return None;
    }
    match method {
        CastMethod::Direct => {
            if is_whole(f) {
                Some(Value::Int(f.round() as i64))
            } else {
                None
            }
        }
        // Numpy-style rounding: ties go to the even integer.
        CastMethod::Round => Some(Value::Int(f.round_ties_even() as i64)),
        CastMethod::Truncate => Some(Value::Int(f.trunc() as i64)),
    }
}

fn distinct_count(col: &crate::input::Column) -> usize {
    let mut distinct: IndexSet<String> = IndexSet::new();
    for v in col.non_null() {
        distinct.insert(v.render());
    }
    distinct.len()
}

fn date_sample_parses(col: &crate::input::Column) -> bool {
    let non_null: Vec<String> = col.non_null().map(|v| v.render()).collect();
    if non_null.is_empty() {
        return false;
    }

    // Random sample of up to DATE_SAMPLE_SIZE values.
    let mut indices: Vec<usize> = (0..non_null.len()).collect();
    fastrand::shuffle(&mut indices);
    indices
        .into_iter()
        .take(DATE_SAMPLE_SIZE)
        .all(|i| dates::parse_datetime(&non_null[i]).is_some())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Column;
    use crate::profile::profile_table;

    fn generate(table: &Table) -> Vec<Suggestion> {
        let profile = profile_table(table);
        TypecastColumnLearner.generate(table, &profile)
    }

    #[test]
    fn test_whole_float_column_proposes_safe_int_cast() {
        let mut table = Table::new(vec![Column::new(
            "x",
            vec![Value::Float(1.0), Value::Float(2.0), Value::Float(3.0)],
        )]);
        let suggestions = generate(&table);

        let int_cast = suggestions
            .iter()
            .find(|s| s.target_type == Some(CastTarget::Int))
            .unwrap();
        assert_eq!(int_cast.quality_improvement, 4.5);
        assert_eq!(int_cast.cast_method, Some(CastMethod::Direct));

        assert!(TypecastColumnLearner.apply(&mut table, int_cast));
        assert_eq!(
            table.column("x").unwrap().values,
            vec![Value::Int(1), Value::Int(2), Value::Int(3)]
        );
    }

    #[test]
    fn test_fractional_float_proposes_round_and_truncate() {
        let table = Table::new(vec![Column::new(
            "x",
            vec![Value::Float(1.4), Value::Float(2.6)],
        )]);
        let suggestions = generate(&table);

        let methods: Vec<_> = suggestions
            .iter()
            .filter(|s| s.target_type == Some(CastTarget::Int))
            .map(|s| (s.cast_method, s.quality_improvement))
            .collect();
        assert_eq!(
            methods,
            vec![
                (Some(CastMethod::Round), 3.5),
                (Some(CastMethod::Truncate), 3.0),
            ]
        );
    }

    #[test]
    fn test_round_and_truncate_differ_on_apply() {
        let base = Table::new(vec![Column::new(
            "x",
            vec![Value::Float(1.6), Value::Float(2.4)],
        )]);
        let suggestions = generate(&base);
        let round = suggestions
            .iter()
            .find(|s| s.cast_method == Some(CastMethod::Round))
            .unwrap();
        let truncate = suggestions
            .iter()
            .find(|s| s.cast_method == Some(CastMethod::Truncate))
            .unwrap();

        let mut rounded = base.clone();
        assert!(TypecastColumnLearner.apply(&mut rounded, round));
        assert_eq!(
            rounded.column("x").unwrap().values,
            vec![Value::Int(2), Value::Int(2)]
        );

        let mut truncated = base.clone();
        assert!(TypecastColumnLearner.apply(&mut truncated, truncate));
        assert_eq!(
            truncated.column("x").unwrap().values,
            vec![Value::Int(1), Value::Int(2)]
        );
    }

    #[test]
    fn test_binary_int_proposes_bool() {
        let mut table = Table::new(vec![Column::new(
            "flag",
            vec![Value::Int(0), Value::Int(1), Value::Null, Value::Int(1)],
        )]);
        let suggestions = generate(&table);

        let bool_cast = suggestions
            .iter()
            .find(|s| s.target_type == Some(CastTarget::Bool))
            .unwrap();
        assert_eq!(bool_cast.quality_improvement, 3.5);

        assert!(TypecastColumnLearner.apply(&mut table, bool_cast));
        assert_eq!(
            table.column("flag").unwrap().values,
            vec![
                Value::Bool(false),
                Value::Bool(true),
                Value::Null,
                Value::Bool(true),
            ]
        );
    }

    #[test]
    fn test_non_binary_int_not_proposed_as_bool() {
        let table = Table::new(vec![Column::new(
            "n",
            (0..30).map(Value::Int).collect(),
        )]);
        let suggestions = generate(&table);
        assert!(suggestions.iter().all(|s| s.target_type != Some(CastTarget::Bool)));
    }

    #[test]
    fn test_date_strings_propose_datetime() {
        let mut table = Table::new(vec![Column::new(
            "when",
            vec![
                Value::Str("2024-01-15".into()),
                Value::Str("2024-02-20".into()),
                Value::Null,
            ],
        )]);
        let suggestions = generate(&table);

        let dt_cast = suggestions
            .iter()
            .find(|s| s.target_type == Some(CastTarget::Datetime))
            .unwrap();
        assert_eq!(dt_cast.quality_improvement, 4.5);

        assert!(TypecastColumnLearner.apply(&mut table, dt_cast));
        assert!(matches!(
            table.column("when").unwrap().values[0],
            Value::DateTime(_)
        ));
        assert_eq!(table.column("when").unwrap().values[2], Value::Null);
    }

    #[test]
    fn test_datetime_apply_fails_on_unparseable_value() {
        let mut table = Table::new(vec![Column::new(
            "when",
            vec![Value::Str("2024-01-15".into()), Value::Str("not a date".into())],
        )]);
        let sug = cast_suggestion("when", CastTarget::Datetime, "r", String::new(), 4.5);

        assert!(!TypecastColumnLearner.apply(&mut table, &sug));
        // The column is untouched on failure.
        assert_eq!(
            table.column("when").unwrap().values[0],
            Value::Str("2024-01-15".into())
        );
    }

    #[test]
    fn test_low_cardinality_string_proposes_category() {
        let table = Table::new(vec![Column::new(
            "grade",
            vec![
                Value::Str("alpha".into()),
                Value::Str("beta".into()),
                Value::Str("alpha".into()),
            ],
        )]);
        let suggestions = generate(&table);
        assert!(suggestions
            .iter()
            .any(|s| s.target_type == Some(CastTarget::Category)));
    }
}
