//! Learner that fills mostly-empty columns with a mean or mode value.

use indexmap::IndexMap;
use tracing::debug;

use crate::input::{Table, Value};
use crate::profile::{ColumnProfile, DataType, TableProfile};
use crate::suggestion::{Suggestion, SuggestionKind, TransformStrategy};

use super::Learner;

pub struct ImputeMissingLearner;

impl Learner for ImputeMissingLearner {
    fn kind(&self) -> SuggestionKind {
        SuggestionKind::ImputeMissing
    }

    fn generate(&self, _table: &Table, profile: &TableProfile) -> Vec<Suggestion> {
        let mut suggestions = Vec::new();

        for (name, col) in &profile.columns {
            if !col.is_mostly_empty {
                continue;
            }
            let Some(strategy) = determine_strategy(col) else {
                continue;
            };

            let label = match strategy {
                TransformStrategy::Mean => "mean",
                _ => "mode",
            };

            suggestions.push(
                Suggestion::new(
                    SuggestionKind::ImputeMissing,
                    name,
                    format!("Impute {}", name),
                    format!(
                        "REASON: {}% missing values. Suggested strategy: {}",
                        col.missing_percentage.round(),
                        label
                    ),
                )
                .with_strategy(strategy)
                .with_code(impute_code(name, strategy))
                .with_score((col.missing_percentage / 10.0).min(10.0)),
            );
        }

        suggestions
    }

    fn apply(&self, table: &mut Table, suggestion: &Suggestion) -> bool {
        if suggestion.kind != SuggestionKind::ImputeMissing {
            return false;
        }
        let Some(strategy) = suggestion.strategy else {
            debug!(column = %suggestion.column, "impute strategy undetermined");
            return false;
        };
        let Some(col) = table.column_mut(&suggestion.column) else {
            debug!(column = %suggestion.column, "impute target no longer exists");
            return false;
        };

        match strategy {
            TransformStrategy::Mean => {
                let (sum, count) = col
                    .non_null()
                    .filter_map(|v| v.as_f64())
                    .fold((0.0, 0usize), |(s, n), x| (s + x, n + 1));
                // Nothing to average: leave the column untouched, like
                // filling with NaN would.
                if count == 0 {
                    return true;
                }
                let mean = sum / count as f64;
                for v in col.values.iter_mut() {
                    if v.is_null() {
                        *v = Value::Float(mean);
                    }
                }
                true
            }
            TransformStrategy::Mode => {
                let mut counts: IndexMap<String, (usize, Value)> = IndexMap::new();
                for v in col.non_null() {
                    let entry = counts.entry(v.render()).or_insert((0, v.clone()));
                    entry.0 += 1;
                }
                // Ties break toward the first-seen value.
                let max = counts.values().map(|(count, _)| *count).max();
                let Some(mode) = counts
                    .values()
                    .find(|(count, _)| Some(*count) == max)
                    .map(|(_, v)| v.clone())
                else {
                    debug!(column = %suggestion.column, "no values to take a mode from");
                    return false;
                };
                for v in col.values.iter_mut() {
                    if v.is_null() {
                        *v = mode.clone();
                    }
                }
                true
            }
            TransformStrategy::LabelEncoding => {
                debug!(column = %suggestion.column, "label encoding is not an impute strategy");
                false
            }
        }
    }
}

fn determine_strategy(col: &ColumnProfile) -> Option<TransformStrategy> {
    match col.data_type {
        DataType::Numeric => Some(TransformStrategy::Mean),
        DataType::Text | DataType::PotentialDatetime => Some(TransformStrategy::Mode),
        DataType::Datetime => None,
    }
}

fn impute_code(column: &str, strategy: TransformStrategy) -> String {
    match strategy {
        TransformStrategy::Mean => format!(
            "df['{col}'] = df['{col}'].fillna(df['{col}'].mean())",
            col = column
        ),
        _ => format!(
            "df['{col}'] = df['{col}'].fillna(df['{col}'].mode().iloc[0])",
            col = column
        ),
    }
}
