//! Column and table profiling.

use indexmap::{IndexMap, IndexSet};

use crate::dates;
use crate::input::{Column, Storage, Table};

use super::column::{ColumnProfile, DataType};
use super::table::TableProfile;

/// Compute a fresh profile of the table.
///
/// Deterministic and total: the zero-row and zero-column cases produce an
/// empty profile rather than an error.
pub fn profile_table(table: &Table) -> TableProfile {
    let row_count = table.row_count();
    let mut columns = IndexMap::with_capacity(table.column_count());

    for col in &table.columns {
        columns.insert(col.name.clone(), profile_column(col, row_count));
    }

    TableProfile {
        row_count,
        column_count: table.column_count(),
        columns,
    }
}

fn profile_column(col: &Column, row_count: usize) -> ColumnProfile {
    let missing_count = col.missing_count();
    let missing_percentage = if row_count == 0 {
        0.0
    } else {
        100.0 * missing_count as f64 / row_count as f64
    };

    let mut distinct: IndexSet<String> = IndexSet::new();
    for v in col.non_null() {
        distinct.insert(v.render());
    }
    let unique_values = distinct.len();

    let data_type = classify(col);

    let (min, max, mean) = if data_type == DataType::Numeric {
        numeric_stats(col)
    } else {
        (None, None, None)
    };

    ColumnProfile {
        data_type,
        missing_count,
        missing_percentage,
        unique_values,
        is_constant: unique_values == 1,
        is_mostly_empty: missing_percentage > 50.0,
        min,
        max,
        mean,
    }
}

/// Classify a column: numeric first, then native datetime, then string
/// with a secondary probe of the first non-null value for a date shape.
fn classify(col: &Column) -> DataType {
    match col.storage() {
        Storage::Int | Storage::Float | Storage::Bool => DataType::Numeric,
        Storage::DateTime => DataType::Datetime,
        Storage::Str => {
            // Single-value probe, not a full-column validation; mixed
            // columns can be misclassified either way.
            let first = col.non_null().next();
            match first {
                Some(v) if dates::parse_datetime(&v.render()).is_some() => {
                    DataType::PotentialDatetime
                }
                _ => DataType::Text,
            }
        }
    }
}

fn numeric_stats(col: &Column) -> (Option<f64>, Option<f64>, Option<f64>) {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;

    for v in col.non_null() {
        if let Some(x) = v.as_f64() {
            count += 1;
            sum += x;
            if x < min {
                min = x;
            }
            if x > max {
                max = x;
            }
        }
    }

    if count == 0 {
        (None, None, None)
    } else {
        (Some(min), Some(max), Some(sum / count as f64))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Value;
    use proptest::prelude::*;

    fn col(name: &str, values: Vec<Value>) -> Column {
        Column::new(name, values)
    }

    #[test]
    fn test_numeric_classification_and_stats() {
        let table = Table::new(vec![col(
            "age",
            vec![Value::Int(20), Value::Int(30), Value::Null, Value::Int(40)],
        )]);
        let profile = profile_table(&table);
        let p = profile.column("age").unwrap();

        assert_eq!(p.data_type, DataType::Numeric);
        assert_eq!(p.missing_count, 1);
        assert_eq!(p.missing_percentage, 25.0);
        assert_eq!(p.unique_values, 3);
        assert_eq!(p.min, Some(20.0));
        assert_eq!(p.max, Some(40.0));
        assert_eq!(p.mean, Some(30.0));
    }

    #[test]
    fn test_potential_datetime_probe() {
        let table = Table::new(vec![
            col(
                "when",
                vec![
                    Value::Str("2024-01-15".into()),
                    Value::Str("2024-02-20".into()),
                ],
            ),
            col(
                "label",
                vec![Value::Str("alpha".into()), Value::Str("beta".into())],
            ),
        ]);
        let profile = profile_table(&table);

        assert_eq!(
            profile.column("when").unwrap().data_type,
            DataType::PotentialDatetime
        );
        assert_eq!(profile.column("label").unwrap().data_type, DataType::Text);
    }

    #[test]
    fn test_probe_only_inspects_first_value() {
        // Later non-date values do not prevent reclassification.
        let table = Table::new(vec![col(
            "mixed",
            vec![Value::Str("2024-01-15".into()), Value::Str("banana".into())],
        )]);
        let profile = profile_table(&table);
        assert_eq!(
            profile.column("mixed").unwrap().data_type,
            DataType::PotentialDatetime
        );
    }

    #[test]
    fn test_constant_detection() {
        let table = Table::new(vec![col(
            "k",
            vec![
                Value::Str("x".into()),
                Value::Str("x".into()),
                Value::Null,
            ],
        )]);
        let profile = profile_table(&table);
        let p = profile.column("k").unwrap();
        assert!(p.is_constant);
        assert_eq!(p.unique_values, 1);
    }

    #[test]
    fn test_empty_table() {
        let profile = profile_table(&Table::default());
        assert_eq!(profile.row_count, 0);
        assert_eq!(profile.column_count, 0);
        assert!(profile.columns.is_empty());
    }

    #[test]
    fn test_all_null_column_has_no_stats() {
        let table = Table::new(vec![col("empty", vec![Value::Null, Value::Null])]);
        let profile = profile_table(&table);
        let p = profile.column("empty").unwrap();

        // All-NA columns read back as numeric with no stats.
        assert_eq!(p.data_type, DataType::Numeric);
        assert_eq!(p.missing_percentage, 100.0);
        assert!(p.is_mostly_empty);
        assert!(p.min.is_none() && p.max.is_none() && p.mean.is_none());
        assert_eq!(p.unique_values, 0);
        assert!(!p.is_constant);
    }

    proptest! {
        #[test]
        fn prop_missing_percentage_invariant(values in prop::collection::vec(
            prop_oneof![
                Just(Value::Null),
                any::<i64>().prop_map(Value::Int),
                "[a-z]{1,8}".prop_map(Value::Str),
            ],
            0..50,
        )) {
            let rows = values.len();
            let table = Table::new(vec![Column::new("c", values)]);
            let profile = profile_table(&table);
            let p = profile.column("c").unwrap();

            let expected = if rows == 0 {
                0.0
            } else {
                100.0 * p.missing_count as f64 / rows as f64
            };
            prop_assert!((p.missing_percentage - expected).abs() < 1e-9);
            // is_constant iff exactly one distinct non-null value.
            prop_assert_eq!(p.is_constant, p.unique_values == 1);
        }
    }
}
