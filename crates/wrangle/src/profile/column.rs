//! Per-column profile definition.

use serde::{Deserialize, Serialize};

/// Classified data type of a profiled column.
///
/// Precedence is numeric → native datetime → string, with string columns
/// reclassified as `PotentialDatetime` when the first non-null value
/// parses as a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataType {
    Numeric,
    Datetime,
    PotentialDatetime,
    #[serde(rename = "string")]
    Text,
}

impl DataType {
    /// Returns true for string-backed columns (plain text or date-looking
    /// strings that have not been cast yet).
    pub fn is_stringy(&self) -> bool {
        matches!(self, DataType::Text | DataType::PotentialDatetime)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, DataType::Numeric)
    }
}

/// Derived, read-only view of one column at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColumnProfile {
    /// Classified data type.
    pub data_type: DataType,
    /// Number of missing cells.
    pub missing_count: usize,
    /// `100 * missing_count / row_count` (0 for a zero-row table).
    pub missing_percentage: f64,
    /// Number of distinct non-missing values.
    pub unique_values: usize,
    /// Exactly one distinct non-missing value.
    pub is_constant: bool,
    /// More than half the cells are missing.
    pub is_mostly_empty: bool,
    /// Minimum value (numeric columns with at least one value).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    /// Maximum value (numeric columns with at least one value).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
    /// Mean value (numeric columns with at least one value).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,
}
