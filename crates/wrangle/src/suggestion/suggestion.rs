//! Suggestion records produced by the learners.

use serde::{Deserialize, Serialize};

/// Kind of cleaning transformation a suggestion proposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionKind {
    DropColumn,
    ImputeMissing,
    EncodeCategorical,
    SplitColumn,
    TypecastColumn,
}

impl SuggestionKind {
    /// Get a human-readable label.
    pub fn label(&self) -> &'static str {
        match self {
            SuggestionKind::DropColumn => "Drop Column",
            SuggestionKind::ImputeMissing => "Impute Missing Values",
            SuggestionKind::EncodeCategorical => "Encode Categorical",
            SuggestionKind::SplitColumn => "Split Column",
            SuggestionKind::TypecastColumn => "Typecast Column",
        }
    }

    /// Wire/tag name for the kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            SuggestionKind::DropColumn => "drop_column",
            SuggestionKind::ImputeMissing => "impute_missing",
            SuggestionKind::EncodeCategorical => "encode_categorical",
            SuggestionKind::SplitColumn => "split_column",
            SuggestionKind::TypecastColumn => "typecast_column",
        }
    }
}

/// Strategy carried by impute and encode suggestions: how missing values
/// are filled, or how categories are encoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransformStrategy {
    Mean,
    Mode,
    LabelEncoding,
}

/// Target type for a typecast suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastTarget {
    Int,
    Bool,
    Datetime,
    Category,
}

impl CastTarget {
    pub fn label(&self) -> &'static str {
        match self {
            CastTarget::Int => "int",
            CastTarget::Bool => "bool",
            CastTarget::Datetime => "datetime",
            CastTarget::Category => "category",
        }
    }
}

/// How a float→int cast handles fractional values. Both rounding and
/// truncation share `target_type = int`, so the variant the user picked
/// must travel with the suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastMethod {
    /// Values are already whole; cast directly.
    Direct,
    /// Round to the nearest integer first (ties to even, numpy-style).
    Round,
    /// Drop the fractional part.
    Truncate,
}

/// A proposed cleaning transformation.
///
/// Suggestions are ephemeral: generated fresh on each request and never
/// persisted. The `id` is a dense display ordinal assigned after ranking;
/// it carries no semantic weight and must not be used to look up state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Suggestion {
    /// 1-based display id (0 until assigned).
    #[serde(default)]
    pub id: usize,

    /// Kind of transformation.
    #[serde(rename = "type")]
    pub kind: SuggestionKind,

    /// Short human-readable title.
    pub title: String,

    /// Rationale for the suggestion.
    pub explanation: String,

    /// Target column.
    pub column: String,

    /// Documentation of the equivalent operation. Descriptive only; never
    /// executed.
    pub code: String,

    /// Estimated quality improvement, overwritten by the ranker.
    pub quality_improvement: f64,

    /// Fill or encoding strategy (impute and encode suggestions).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strategy: Option<TransformStrategy>,

    /// Split delimiter (split suggestions).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,

    /// Preview of derived column names (split suggestions).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub new_columns: Vec<String>,

    /// Target type (typecast suggestions).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_type: Option<CastTarget>,

    /// Cast variant (float→int typecast suggestions).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cast_method: Option<CastMethod>,

    /// Feature vector for the learned ranker; attached transiently so
    /// feedback can be attributed to this suggestion.
    #[serde(skip)]
    pub features: Option<Vec<f64>>,
}

impl Suggestion {
    /// Create a new suggestion with a heuristic score.
    pub fn new(
        kind: SuggestionKind,
        column: impl Into<String>,
        title: impl Into<String>,
        explanation: impl Into<String>,
    ) -> Self {
        Self {
            id: 0,
            kind,
            title: title.into(),
            explanation: explanation.into(),
            column: column.into(),
            code: String::new(),
            quality_improvement: 0.0,
            strategy: None,
            delimiter: None,
            new_columns: Vec::new(),
            target_type: None,
            cast_method: None,
            features: None,
        }
    }

    /// Set the documentation code string.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = code.into();
        self
    }

    /// Set the heuristic quality-improvement score.
    pub fn with_score(mut self, score: f64) -> Self {
        self.quality_improvement = score;
        self
    }

    /// Set the fill or encoding strategy.
    pub fn with_strategy(mut self, strategy: TransformStrategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Set the split delimiter and derived column preview.
    pub fn with_split(mut self, delimiter: impl Into<String>, new_columns: Vec<String>) -> Self {
        self.delimiter = Some(delimiter.into());
        self.new_columns = new_columns;
        self
    }

    /// Set the typecast target.
    pub fn with_target(mut self, target: CastTarget) -> Self {
        self.target_type = Some(target);
        self
    }

    /// Set the float→int cast variant.
    pub fn with_cast_method(mut self, method: CastMethod) -> Self {
        self.cast_method = Some(method);
        self
    }
}
