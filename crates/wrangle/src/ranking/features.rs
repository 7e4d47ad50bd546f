//! Feature extraction for the learned ranker.

use crate::profile::TableProfile;
use crate::suggestion::{CastTarget, Suggestion, SuggestionKind};

/// Length of every feature vector.
pub const FEATURE_LEN: usize = 22;

/// Delimiters in the split learner's probe order; the one-hot block below
/// must stay in sync with it.
const DELIMITERS: &[&str] = &[" ", ",", "-", "_", "|", ":"];

/// Encode a suggestion in the context of the table it was generated for.
///
/// Layout:
///   0..5   suggestion kind one-hot (drop, impute, encode, split, typecast)
///   5      ln(1 + row count)
///   6      column count
///   7      target column missing fraction
///   8      target column unique ratio
///   9      target column is numeric
///   10..16 split delimiter one-hot
///   16..20 cast target one-hot (int, bool, datetime, category)
///   20     overall missing rate
///   21     transformation complexity
pub fn extract(suggestion: &Suggestion, profile: &TableProfile) -> Vec<f64> {
    let mut f = vec![0.0; FEATURE_LEN];

    let kind_slot = match suggestion.kind {
        SuggestionKind::DropColumn => 0,
        SuggestionKind::ImputeMissing => 1,
        SuggestionKind::EncodeCategorical => 2,
        SuggestionKind::SplitColumn => 3,
        SuggestionKind::TypecastColumn => 4,
    };
    f[kind_slot] = 1.0;

    f[5] = (1.0 + profile.row_count as f64).ln();
    f[6] = profile.column_count as f64;

    if let Some(col) = profile.column(&suggestion.column) {
        f[7] = col.missing_percentage / 100.0;
        f[8] = col.unique_values as f64 / profile.row_count.max(1) as f64;
        f[9] = if col.data_type.is_numeric() { 1.0 } else { 0.0 };
    }

    if let Some(delim) = suggestion.delimiter.as_deref() {
        if let Some(pos) = DELIMITERS.iter().position(|d| *d == delim) {
            f[10 + pos] = 1.0;
        }
    }

    if let Some(target) = suggestion.target_type {
        let slot = match target {
            CastTarget::Int => 16,
            CastTarget::Bool => 17,
            CastTarget::Datetime => 18,
            CastTarget::Category => 19,
        };
        f[slot] = 1.0;
    }

    f[20] = profile.missing_rate();
    f[21] = complexity(suggestion.kind);

    f
}

/// Rough cost of carrying out a transformation kind.
fn complexity(kind: SuggestionKind) -> f64 {
    match kind {
        SuggestionKind::DropColumn => 1.0,
        SuggestionKind::ImputeMissing => 2.0,
        SuggestionKind::EncodeCategorical => 2.0,
        SuggestionKind::SplitColumn => 3.0,
        SuggestionKind::TypecastColumn => 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::{Column, Table, Value};
    use crate::profile::profile_table;

    fn profile() -> TableProfile {
        let table = Table::new(vec![
            Column::new("a", vec![Value::Int(1), Value::Null, Value::Int(3)]),
            Column::new(
                "b",
                vec![
                    Value::Str("x".into()),
                    Value::Str("y".into()),
                    Value::Str("x".into()),
                ],
            ),
        ]);
        profile_table(&table)
    }

    #[test]
    fn test_vector_length_and_kind_one_hot() {
        let profile = profile();
        let sug = Suggestion::new(SuggestionKind::DropColumn, "a", "t", "e");
        let f = extract(&sug, &profile);

        assert_eq!(f.len(), FEATURE_LEN);
        assert_eq!(&f[0..5], &[1.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(f[6], 2.0);
        // 1 of 3 values missing in "a".
        assert!((f[7] - 1.0 / 3.0).abs() < 1e-9);
        assert_eq!(f[9], 1.0);
    }

    #[test]
    fn test_delimiter_and_target_blocks() {
        let profile = profile();
        let split = Suggestion::new(SuggestionKind::SplitColumn, "b", "t", "e")
            .with_split("-", vec![]);
        let f = extract(&split, &profile);
        assert_eq!(f[12], 1.0);
        assert_eq!(f[10] + f[11] + f[13] + f[14] + f[15], 0.0);

        let cast = Suggestion::new(SuggestionKind::TypecastColumn, "a", "t", "e")
            .with_target(CastTarget::Datetime);
        let f = extract(&cast, &profile);
        assert_eq!(f[18], 1.0);
        assert_eq!(f[21], 2.0);
    }

    #[test]
    fn test_vanished_column_leaves_column_block_zero() {
        let profile = profile();
        let sug = Suggestion::new(SuggestionKind::DropColumn, "ghost", "t", "e");
        let f = extract(&sug, &profile);
        assert_eq!(&f[7..10], &[0.0, 0.0, 0.0]);
    }
}
