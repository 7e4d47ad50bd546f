//! Scalar data-quality scoring.

use crate::input::{Table, Value};
use crate::profile::{DataType, TableProfile};

/// Weights for the quality sub-scores.
#[derive(Debug, Clone, Copy)]
pub struct QualityWeights {
    pub completeness: f64,
    pub redundancy: f64,
    pub type_consistency: f64,
    pub uniformity: f64,
}

impl Default for QualityWeights {
    fn default() -> Self {
        Self {
            completeness: 0.35,
            redundancy: 0.25,
            type_consistency: 0.20,
            uniformity: 0.20,
        }
    }
}

/// Computes a single 0–100 quality score for a table+profile pair.
#[derive(Debug, Clone, Default)]
pub struct QualityScorer {
    weights: QualityWeights,
}

impl QualityScorer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Weighted sum of completeness, (1 − redundancy), type consistency,
    /// and uniformity, scaled to 0–100.
    pub fn score(&self, table: &Table, profile: &TableProfile) -> f64 {
        let completeness = self.completeness(profile);
        let redundancy = self.redundancy(profile);
        let type_consistency = self.type_consistency(profile);
        let uniformity = self.uniformity(table, profile);

        (self.weights.completeness * completeness
            + self.weights.redundancy * (1.0 - redundancy)
            + self.weights.type_consistency * type_consistency
            + self.weights.uniformity * uniformity)
            * 100.0
    }

    /// Fraction of cells that are present. A table with zero cells is
    /// complete by convention.
    fn completeness(&self, profile: &TableProfile) -> f64 {
        let cells = profile.total_cells();
        if cells == 0 {
            return 1.0;
        }
        1.0 - profile.total_missing() as f64 / cells as f64
    }

    /// Fraction of columns that are constant.
    fn redundancy(&self, profile: &TableProfile) -> f64 {
        let cols = profile.column_count.max(1);
        profile.constant_columns() as f64 / cols as f64
    }

    /// Fraction of columns carrying a proper (numeric or datetime) type.
    fn type_consistency(&self, profile: &TableProfile) -> f64 {
        let cols = profile.column_count.max(1);
        let proper = profile
            .columns
            .values()
            .filter(|c| matches!(c.data_type, DataType::Numeric | DataType::Datetime))
            .count();
        proper as f64 / cols as f64
    }

    /// Average, over string-typed columns, of how consistent the value
    /// lengths are: `1 − min(cv(length), 1)`. Zero when there are no
    /// string columns or a column's mean length is zero.
    fn uniformity(&self, table: &Table, profile: &TableProfile) -> f64 {
        let mut total = 0.0;
        let mut string_cols = 0usize;

        for (name, col_profile) in &profile.columns {
            if col_profile.data_type != DataType::Text {
                continue;
            }
            string_cols += 1;

            let Some(col) = table.column(name) else {
                continue;
            };

            let lengths: Vec<f64> = col
                .non_null()
                .map(|v| match v {
                    Value::Str(s) => s.len() as f64,
                    other => other.render().len() as f64,
                })
                .collect();

            if lengths.is_empty() {
                continue;
            }

            let mean = lengths.iter().sum::<f64>() / lengths.len() as f64;
            if mean == 0.0 {
                continue;
            }

            let var =
                lengths.iter().map(|l| (l - mean).powi(2)).sum::<f64>() / lengths.len() as f64;
            let cv = var.sqrt() / mean;
            total += 1.0 - cv.min(1.0);
        }

        if string_cols == 0 {
            0.0
        } else {
            total / string_cols as f64
        }
    }
}
