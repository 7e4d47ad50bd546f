//! Ranking by trial application against a cloned table.

use tracing::debug;

use crate::input::Table;
use crate::learners::LearnerRoster;
use crate::profile::{profile_table, TableProfile};
use crate::quality::QualityScorer;
use crate::suggestion::{Suggestion, SuggestionKind};

use super::{sort_by_improvement, Ranker};

/// Ranks suggestions by actually applying each one to a throwaway copy of
/// the table and measuring the quality delta.
#[derive(Debug, Default)]
pub struct SimulationRanker {
    scorer: QualityScorer,
}

impl SimulationRanker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Measured improvement for one suggestion, or `None` when the
    /// transformation cannot be applied.
    fn simulate(
        &self,
        roster: &LearnerRoster,
        table: &Table,
        baseline: f64,
        suggestion: &Suggestion,
    ) -> Option<f64> {
        let learner = roster.for_kind(suggestion.kind)?;

        let mut trial = table.clone();
        if !learner.apply(&mut trial, suggestion) {
            return None;
        }

        let after_profile = profile_table(&trial);
        let after = self.scorer.score(&trial, &after_profile);
        // Quality can drop (encoding trades type consistency for lost
        // uniformity, say); clamp so ranking stays non-negative.
        Some((after - baseline).max(0.0))
    }

    /// Fallback estimate for suggestions whose simulation failed.
    fn heuristic(&self, profile: &TableProfile, suggestion: &Suggestion) -> f64 {
        match suggestion.kind {
            SuggestionKind::DropColumn => {
                let (missing, uniqueness) = profile
                    .column(&suggestion.column)
                    .map(|c| {
                        (
                            c.missing_percentage / 100.0,
                            c.unique_values as f64 / profile.row_count.max(1) as f64,
                        )
                    })
                    .unwrap_or((0.0, 0.0));
                missing * 8.0 - uniqueness * 5.0 + 2.0
            }
            SuggestionKind::ImputeMissing => 6.0,
            SuggestionKind::SplitColumn => 4.0,
            SuggestionKind::TypecastColumn => 3.5,
            SuggestionKind::EncodeCategorical => 3.0,
        }
    }
}

impl Ranker for SimulationRanker {
    fn rank(
        &mut self,
        roster: &LearnerRoster,
        table: &Table,
        profile: &TableProfile,
        mut suggestions: Vec<Suggestion>,
    ) -> Vec<Suggestion> {
        let baseline = self.scorer.score(table, profile);

        for suggestion in suggestions.iter_mut() {
            match self.simulate(roster, table, baseline, suggestion) {
                Some(improvement) => suggestion.quality_improvement = improvement,
                None => {
                    debug!(
                        kind = suggestion.kind.as_str(),
                        column = %suggestion.column,
                        "simulation failed, falling back to heuristic estimate"
                    );
                    suggestion.quality_improvement = self.heuristic(profile, suggestion);
                }
            }
        }

        sort_by_improvement(&mut suggestions);
        suggestions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Column, Value};

    fn messy_table() -> Table {
        Table::new(vec![
            Column::new("id", vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
            Column::new(
                "unit",
                vec![
                    Value::Str("kg".into()),
                    Value::Str("kg".into()),
                    Value::Str("kg".into()),
                ],
            ),
            Column::new("gap", vec![Value::Null, Value::Null, Value::Int(9)]),
        ])
    }

    #[test]
    fn test_rank_sorts_descending_and_leaves_table_untouched() {
        let table = messy_table();
        let profile = profile_table(&table);
        let roster = LearnerRoster::standard();
        let suggestions = roster.generate_all(&table, &profile);
        assert!(!suggestions.is_empty());

        let before = table.clone();
        let ranked = SimulationRanker::new().rank(&roster, &table, &profile, suggestions);

        assert_eq!(table.column_names(), before.column_names());
        for pair in ranked.windows(2) {
            assert!(pair[0].quality_improvement >= pair[1].quality_improvement);
        }
        assert!(ranked.iter().all(|s| s.quality_improvement >= 0.0));
    }

    #[test]
    fn test_ranking_is_idempotent() {
        let table = messy_table();
        let profile = profile_table(&table);
        let roster = LearnerRoster::standard();
        let suggestions = roster.generate_all(&table, &profile);

        let mut ranker = SimulationRanker::new();
        let first = ranker.rank(&roster, &table, &profile, suggestions.clone());
        let second = ranker.rank(&roster, &table, &profile, suggestions);

        let order = |v: &[Suggestion]| -> Vec<(SuggestionKind, String)> {
            v.iter().map(|s| (s.kind, s.column.clone())).collect()
        };
        assert_eq!(order(&first), order(&second));
    }

    #[test]
    fn test_unapplicable_suggestion_gets_heuristic_score() {
        let table = messy_table();
        let profile = profile_table(&table);
        let roster = LearnerRoster::standard();

        let ghost = Suggestion::new(SuggestionKind::ImputeMissing, "ghost", "t", "e");
        let ranked = SimulationRanker::new().rank(&roster, &table, &profile, vec![ghost]);
        assert_eq!(ranked[0].quality_improvement, 6.0);
    }
}
