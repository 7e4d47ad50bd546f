//! Typed in-memory table model.

use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// A single typed cell value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    DateTime(NaiveDateTime),
    Str(String),
}

impl Value {
    /// Returns true if this cell is missing.
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns true if this cell holds a numeric value (booleans count,
    /// mirroring pandas' numeric dtypes).
    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_) | Value::Bool(_))
    }

    /// Numeric view of the cell, with booleans as 0/1.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Render the cell as a display string. Floats keep one decimal place
    /// when whole so that `1.0` round-trips as "1.0" rather than "1".
    pub fn render(&self) -> String {
        match self {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(f) => {
                if f.fract() == 0.0 && f.is_finite() {
                    format!("{:.1}", f)
                } else {
                    f.to_string()
                }
            }
            Value::DateTime(dt) => dt.format("%Y-%m-%d %H:%M:%S").to_string(),
            Value::Str(s) => s.clone(),
        }
    }

    /// JSON view of the cell with missing values normalized to null.
    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Null => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(i) => JsonValue::from(*i),
            Value::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .unwrap_or(JsonValue::Null),
            Value::DateTime(dt) => JsonValue::String(dt.format("%Y-%m-%d %H:%M:%S").to_string()),
            Value::Str(s) => JsonValue::String(s.clone()),
        }
    }
}

/// Physical storage type of a column, derived from its cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Storage {
    Int,
    Float,
    Bool,
    DateTime,
    Str,
}

/// A named, ordered sequence of typed cells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub values: Vec<Value>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            values,
        }
    }

    /// Iterate over the non-missing cells.
    pub fn non_null(&self) -> impl Iterator<Item = &Value> {
        self.values.iter().filter(|v| !v.is_null())
    }

    /// Number of missing cells.
    pub fn missing_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_null()).count()
    }

    /// Derived storage type over the non-missing cells. Pure Int columns
    /// stay Int; any Float among numerics promotes to Float. A column with
    /// no non-missing values is Float (pandas' all-NA convention).
    pub fn storage(&self) -> Storage {
        let mut ints = 0usize;
        let mut floats = 0usize;
        let mut bools = 0usize;
        let mut datetimes = 0usize;
        let mut strings = 0usize;
        let mut total = 0usize;

        for v in self.non_null() {
            total += 1;
            match v {
                Value::Int(_) => ints += 1,
                Value::Float(_) => floats += 1,
                Value::Bool(_) => bools += 1,
                Value::DateTime(_) => datetimes += 1,
                Value::Str(_) => strings += 1,
                Value::Null => {}
            }
        }

        if total == 0 {
            return Storage::Float;
        }
        if strings > 0 {
            return Storage::Str;
        }
        if datetimes == total {
            return Storage::DateTime;
        }
        if bools == total {
            return Storage::Bool;
        }
        if ints == total {
            return Storage::Int;
        }
        if ints + floats == total {
            return Storage::Float;
        }
        Storage::Str
    }
}

/// An ordered collection of named columns with a uniform row count.
///
/// Owned by a single session and mutated in place by transformation
/// application; no history is retained.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Table {
    pub columns: Vec<Column>,
}

impl Table {
    /// Create a table from columns. Callers must supply uniform lengths.
    pub fn new(columns: Vec<Column>) -> Self {
        Self { columns }
    }

    /// Number of data rows.
    pub fn row_count(&self) -> usize {
        self.columns.first().map(|c| c.values.len()).unwrap_or(0)
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// All column names, in table order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Position of a column by name.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Get a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Get a mutable column by name.
    pub fn column_mut(&mut self, name: &str) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| c.name == name)
    }

    /// Remove a column by name. Returns false if it does not exist.
    pub fn drop_column(&mut self, name: &str) -> bool {
        match self.column_index(name) {
            Some(idx) => {
                self.columns.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Replace the column at `index` with a run of new columns, preserving
    /// its position in the table.
    pub fn splice_columns(&mut self, index: usize, replacements: Vec<Column>) {
        self.columns.splice(index..index + 1, replacements);
    }

    /// Render up to `max_rows` rows as ordered name → JSON value mappings,
    /// with missing cells normalized to null. Does not mutate the table.
    pub fn render(&self, max_rows: usize) -> Vec<IndexMap<String, JsonValue>> {
        let rows = self.row_count().min(max_rows);
        let mut out = Vec::with_capacity(rows);
        for row in 0..rows {
            let mut record = IndexMap::with_capacity(self.columns.len());
            for col in &self.columns {
                record.insert(col.name.clone(), col.values[row].to_json());
            }
            out.push(record);
        }
        out
    }

    /// Check if a raw string represents a missing/null value.
    pub fn is_null_token(value: &str) -> bool {
        let trimmed = value.trim();
        trimmed.is_empty()
            || trimmed.eq_ignore_ascii_case("na")
            || trimmed.eq_ignore_ascii_case("n/a")
            || trimmed.eq_ignore_ascii_case("nan")
            || trimmed.eq_ignore_ascii_case("null")
            || trimmed.eq_ignore_ascii_case("none")
            || trimmed.eq_ignore_ascii_case("nil")
            || trimmed == "."
            || trimmed == "-"
    }
}
