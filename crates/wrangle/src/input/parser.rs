//! Byte-level loaders for CSV and Excel input.

use std::io::Cursor;

use calamine::{open_workbook_auto_from_rs, Data, Reader};
use sha2::{Digest, Sha256};

use crate::error::{Result, WrangleError};

use super::source::{Column, Table, Value};

/// Supported input formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Csv,
    Excel,
}

impl FileFormat {
    /// Guess the format from a file extension.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "csv" | "tsv" | "txt" => Some(FileFormat::Csv),
            "xls" | "xlsx" | "xlsm" | "xlsb" | "ods" => Some(FileFormat::Excel),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::Excel => "excel",
        }
    }
}

/// Metadata describing a successful load.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct SourceSummary {
    /// SHA-256 hash of the raw bytes.
    pub hash: String,
    /// Input size in bytes.
    pub size_bytes: u64,
    /// Format the bytes were parsed as.
    pub format: String,
    /// Number of data rows (excluding header).
    pub row_count: usize,
    /// Number of columns.
    pub column_count: usize,
}

/// Parse raw bytes into a typed table.
///
/// Cells are inferred per value: null tokens become `Null`, literal
/// true/false become `Bool`, integers and floats parse numerically, and
/// everything else stays a string. Date-shaped strings are deliberately
/// left unparsed so the profiler can flag them.
pub fn load_bytes(bytes: &[u8], format: FileFormat) -> Result<(Table, SourceSummary)> {
    let table = match format {
        FileFormat::Csv => parse_csv_bytes(bytes)?,
        FileFormat::Excel => parse_excel_bytes(bytes)?,
    };

    let mut hasher = Sha256::new();
    hasher.update(bytes);
    let hash = format!("sha256:{:x}", hasher.finalize());

    let summary = SourceSummary {
        hash,
        size_bytes: bytes.len() as u64,
        format: format.as_str().to_string(),
        row_count: table.row_count(),
        column_count: table.column_count(),
    };

    Ok((table, summary))
}

fn parse_csv_bytes(bytes: &[u8]) -> Result<Table> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| WrangleError::Load(format!("failed to read CSV header: {}", e)))?
        .iter()
        .map(|s| s.to_string())
        .collect();

    let mut rows: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record =
            record.map_err(|e| WrangleError::Load(format!("failed to read CSV row: {}", e)))?;
        let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(build_table(headers, rows))
}

fn parse_excel_bytes(bytes: &[u8]) -> Result<Table> {
    let cursor = Cursor::new(bytes.to_vec());
    let mut workbook = open_workbook_auto_from_rs(cursor)
        .map_err(|e| WrangleError::Load(format!("failed to open workbook: {}", e)))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = sheet_names
        .first()
        .cloned()
        .ok_or_else(|| WrangleError::Load("workbook has no worksheets".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| WrangleError::Load(format!("failed to read worksheet: {}", e)))?;

    let mut rows_iter = range.rows();
    let headers: Vec<String> = rows_iter
        .next()
        .map(|row| row.iter().map(excel_cell_to_string).collect())
        .unwrap_or_default();

    let rows: Vec<Vec<String>> = rows_iter
        .map(|row| {
            let mut r: Vec<String> = row.iter().map(excel_cell_to_string).collect();
            r.resize(headers.len(), String::new());
            r
        })
        .collect();

    Ok(build_table(headers, rows))
}

fn excel_cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Int(i) => i.to_string(),
        Data::Float(f) => {
            if f.fract() == 0.0 {
                format!("{:.0}", f)
            } else {
                f.to_string()
            }
        }
        Data::Bool(b) => b.to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| format!("{}", dt)),
        Data::DateTimeIso(s) => s.clone(),
        Data::DurationIso(s) => s.clone(),
        Data::Error(e) => format!("#ERR:{:?}", e),
    }
}

fn build_table(headers: Vec<String>, rows: Vec<Vec<String>>) -> Table {
    let columns = headers
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            let values = rows
                .iter()
                .map(|row| infer_cell(row.get(idx).map(String::as_str).unwrap_or("")))
                .collect();
            Column::new(name.clone(), values)
        })
        .collect();
    Table::new(columns)
}

/// Infer the typed value of a raw cell.
fn infer_cell(raw: &str) -> Value {
    let trimmed = raw.trim();

    if Table::is_null_token(trimmed) {
        return Value::Null;
    }

    if trimmed.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if trimmed.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }

    if let Ok(i) = trimmed.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = trimmed.parse::<f64>() {
        return Value::Float(f);
    }

    Value::Str(trimmed.to_string())
}
