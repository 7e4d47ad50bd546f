//! Input parsing and the in-memory table model.

mod parser;
mod source;

pub use parser::{load_bytes, FileFormat, SourceSummary};
pub use source::{Column, Storage, Table, Value};
