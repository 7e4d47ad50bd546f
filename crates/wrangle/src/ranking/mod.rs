//! Ranking strategies that order suggestions by expected payoff.

mod features;
mod learned;
mod simulation;

pub use features::{extract, FEATURE_LEN};
pub use learned::LearnedRanker;
pub use simulation::SimulationRanker;

use crate::input::Table;
use crate::learners::LearnerRoster;
use crate::profile::TableProfile;
use crate::suggestion::Suggestion;

/// Orders a batch of suggestions, overwriting each one's
/// `quality_improvement` with the ranker's own estimate.
///
/// Ranking never mutates the caller's table; any trial application happens
/// on a clone. Sort order is descending by estimated improvement and
/// stable, so equally-scored suggestions keep their generation order.
pub trait Ranker {
    fn rank(
        &mut self,
        roster: &LearnerRoster,
        table: &Table,
        profile: &TableProfile,
        suggestions: Vec<Suggestion>,
    ) -> Vec<Suggestion>;

    /// Feed back an observed improvement for a previously ranked
    /// suggestion. A no-op for rankers that do not learn.
    fn record_feedback(&mut self, _suggestion: &Suggestion, _observed: f64) {}
}

/// Stable descending sort on `quality_improvement`.
pub(crate) fn sort_by_improvement(suggestions: &mut [Suggestion]) {
    suggestions.sort_by(|a, b| {
        b.quality_improvement
            .partial_cmp(&a.quality_improvement)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}
