//! Table-level profile.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::column::ColumnProfile;

/// Profile of an entire table at a point in time.
///
/// Always recomputed in full after every load and every applied
/// transformation; never incrementally patched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableProfile {
    /// Number of data rows.
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
    /// Profiles per column, in table order.
    pub columns: IndexMap<String, ColumnProfile>,
}

impl TableProfile {
    /// Get a column profile by name.
    pub fn column(&self, name: &str) -> Option<&ColumnProfile> {
        self.columns.get(name)
    }

    /// Total number of cells.
    pub fn total_cells(&self) -> usize {
        self.row_count * self.column_count
    }

    /// Total number of missing cells across all columns.
    pub fn total_missing(&self) -> usize {
        self.columns.values().map(|c| c.missing_count).sum()
    }

    /// Number of constant columns.
    pub fn constant_columns(&self) -> usize {
        self.columns.values().filter(|c| c.is_constant).count()
    }

    /// Overall fraction of missing cells, guarded against zero cells.
    pub fn missing_rate(&self) -> f64 {
        let cells = self.total_cells();
        if cells == 0 {
            0.0
        } else {
            self.total_missing() as f64 / cells as f64
        }
    }
}
