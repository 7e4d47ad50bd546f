//! Heuristic learners that propose and apply cleaning transformations.

mod drop;
mod encode;
mod impute;
mod split;
mod typecast;

pub use drop::DropColumnLearner;
pub use encode::EncodeCategoricalLearner;
pub use impute::ImputeMissingLearner;
pub use split::SplitColumnLearner;
pub use typecast::TypecastColumnLearner;

use crate::input::Table;
use crate::profile::TableProfile;
use crate::suggestion::{Suggestion, SuggestionKind};

/// A strategy that proposes transformations of a single kind and knows how
/// to apply them.
///
/// `apply` mutates the table in place and signals failure as `false` (a
/// vanished column, an inapplicable operation) rather than panicking or
/// returning an error; failures never propagate past the learner boundary.
pub trait Learner {
    /// The suggestion kind this learner owns.
    fn kind(&self) -> SuggestionKind;

    /// Propose zero or more transformations for the current table state.
    /// Must return an empty list (not fail) for an empty table or profile.
    fn generate(&self, table: &Table, profile: &TableProfile) -> Vec<Suggestion>;

    /// Apply one of this learner's suggestions to the table.
    fn apply(&self, table: &mut Table, suggestion: &Suggestion) -> bool;
}

/// Fixed roster of learners, dispatched by suggestion kind.
pub struct LearnerRoster {
    learners: Vec<Box<dyn Learner>>,
}

impl LearnerRoster {
    /// The standard five learners, in registration order.
    pub fn standard() -> Self {
        Self {
            learners: vec![
                Box::new(DropColumnLearner),
                Box::new(ImputeMissingLearner),
                Box::new(EncodeCategoricalLearner),
                Box::new(SplitColumnLearner),
                Box::new(TypecastColumnLearner),
            ],
        }
    }

    /// Find the learner that owns a suggestion kind.
    pub fn for_kind(&self, kind: SuggestionKind) -> Option<&dyn Learner> {
        self.learners
            .iter()
            .find(|l| l.kind() == kind)
            .map(|l| l.as_ref())
    }

    /// Collect suggestions from every learner, in registration order.
    pub fn generate_all(&self, table: &Table, profile: &TableProfile) -> Vec<Suggestion> {
        let mut all = Vec::new();
        for learner in &self.learners {
            all.extend(learner.generate(table, profile));
        }
        all
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::profile_table;

    #[test]
    fn test_roster_dispatch_by_kind() {
        let roster = LearnerRoster::standard();
        for kind in [
            SuggestionKind::DropColumn,
            SuggestionKind::ImputeMissing,
            SuggestionKind::EncodeCategorical,
            SuggestionKind::SplitColumn,
            SuggestionKind::TypecastColumn,
        ] {
            let learner = roster.for_kind(kind).expect("learner registered");
            assert_eq!(learner.kind(), kind);
        }
    }

    #[test]
    fn test_empty_table_produces_no_suggestions() {
        let roster = LearnerRoster::standard();
        let table = Table::default();
        let profile = profile_table(&table);
        assert!(roster.generate_all(&table, &profile).is_empty());
    }
}
