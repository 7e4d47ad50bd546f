//! Statistical profiling of tables and columns.

mod column;
mod profiler;
mod table;

pub use column::{ColumnProfile, DataType};
pub use profiler::profile_table;
pub use table::TableProfile;
