//! Suggestion types for proposed cleaning transformations.

mod suggestion;

pub use suggestion::{CastMethod, CastTarget, Suggestion, SuggestionKind, TransformStrategy};
