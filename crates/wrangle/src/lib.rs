//! Wrangle: dataset profiling and cleaning suggestions.
//!
//! The library loads CSV or Excel data into a typed in-memory table,
//! profiles every column, and runs a roster of heuristic learners that
//! propose cleaning transformations (dropping junk columns, imputing
//! missing values, encoding categoricals, splitting compound columns,
//! tightening types). Suggestions are ranked either by simulating each
//! one against a cloned table or by a linear model trained on observed
//! quality deltas, and can then be applied to the session's table.
//!
//! [`Session`] is the main entry point:
//!
//! ```no_run
//! use wrangle::Session;
//!
//! # fn main() -> wrangle::Result<()> {
//! let mut session = Session::new();
//! session.load_file("data.csv")?;
//! for suggestion in session.generate_suggestions()? {
//!     println!("{}: {}", suggestion.id, suggestion.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod dates;
pub mod engine;
pub mod error;
pub mod input;
pub mod learners;
pub mod profile;
pub mod quality;
pub mod ranking;
pub mod suggestion;

pub use engine::{RankerKind, Session, SessionConfig};
pub use error::{Result, WrangleError};
pub use input::{FileFormat, SourceSummary, Table, Value};
pub use profile::{profile_table, ColumnProfile, DataType, TableProfile};
pub use quality::{QualityScorer, QualityWeights};
pub use ranking::{LearnedRanker, Ranker, SimulationRanker};
pub use suggestion::{CastMethod, CastTarget, Suggestion, SuggestionKind, TransformStrategy};
