//! Session orchestration: load, profile, suggest, apply.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use tracing::{debug, info};

use crate::error::{Result, WrangleError};
use crate::input::{self, FileFormat, SourceSummary, Table};
use crate::learners::LearnerRoster;
use crate::profile::{profile_table, TableProfile};
use crate::quality::QualityScorer;
use crate::ranking::{LearnedRanker, Ranker, SimulationRanker};
use crate::suggestion::Suggestion;

/// Which ranking strategy a session uses.
#[derive(Debug, Clone, Default)]
pub enum RankerKind {
    /// Trial-apply every suggestion against a cloned table.
    #[default]
    Simulation,
    /// Linear model bootstrapped from simulation, optionally persisted.
    Learned { model_path: Option<PathBuf> },
}

/// Session construction options.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Maximum number of suggestions returned per request.
    pub max_suggestions: usize,
    pub ranker: RankerKind,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_suggestions: 10,
            ranker: RankerKind::Simulation,
        }
    }
}

struct LoadedData {
    table: Table,
    profile: TableProfile,
    summary: SourceSummary,
}

/// One dataset-cleaning session.
///
/// Owns the current table, its always-fresh profile, the learner roster
/// and the ranking strategy. All state is local to the session; two
/// sessions never share anything.
pub struct Session {
    max_suggestions: usize,
    roster: LearnerRoster,
    ranker: Box<dyn Ranker>,
    scorer: QualityScorer,
    data: Option<LoadedData>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        let ranker: Box<dyn Ranker> = match config.ranker {
            RankerKind::Simulation => Box::new(SimulationRanker::new()),
            RankerKind::Learned { model_path: None } => Box::new(LearnedRanker::new()),
            RankerKind::Learned {
                model_path: Some(path),
            } => Box::new(LearnedRanker::with_model_path(path)),
        };
        Self {
            max_suggestions: config.max_suggestions,
            roster: LearnerRoster::standard(),
            ranker,
            scorer: QualityScorer::new(),
            data: None,
        }
    }

    /// Parse raw bytes as the given format and make the result the
    /// session's current table. Replaces any previously loaded data.
    pub fn load_bytes(&mut self, bytes: &[u8], format: FileFormat) -> Result<&SourceSummary> {
        let (table, summary) = input::load_bytes(bytes, format)?;
        let profile = profile_table(&table);
        info!(
            rows = summary.row_count,
            columns = summary.column_count,
            format = %summary.format,
            "loaded dataset"
        );
        let data = self.data.insert(LoadedData {
            table,
            profile,
            summary,
        });
        Ok(&data.summary)
    }

    /// Load a dataset from disk, picking the format from the extension.
    pub fn load_file(&mut self, path: impl AsRef<Path>) -> Result<&SourceSummary> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default();
        let format = FileFormat::from_extension(ext)
            .ok_or_else(|| WrangleError::UnsupportedFormat(ext.to_string()))?;

        let bytes = fs::read(path).map_err(|source| WrangleError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        self.load_bytes(&bytes, format)
    }

    pub fn table(&self) -> Result<&Table> {
        self.data.as_ref().map(|d| &d.table).ok_or(WrangleError::NoData)
    }

    pub fn profile(&self) -> Result<&TableProfile> {
        self.data
            .as_ref()
            .map(|d| &d.profile)
            .ok_or(WrangleError::NoData)
    }

    pub fn source_summary(&self) -> Option<&SourceSummary> {
        self.data.as_ref().map(|d| &d.summary)
    }

    pub fn row_count(&self) -> Result<usize> {
        Ok(self.table()?.row_count())
    }

    pub fn column_names(&self) -> Result<Vec<String>> {
        Ok(self.table()?.column_names())
    }

    /// Current quality score of the loaded table.
    pub fn quality_score(&self) -> Result<f64> {
        let data = self.data.as_ref().ok_or(WrangleError::NoData)?;
        Ok(self.scorer.score(&data.table, &data.profile))
    }

    /// First rows of the current table as name→value records.
    pub fn render(&self, max_rows: usize) -> Result<Vec<IndexMap<String, serde_json::Value>>> {
        Ok(self.table()?.render(max_rows))
    }

    /// Generate, rank and truncate suggestions for the current table.
    ///
    /// Ids are dense 1-based display ordinals over the returned batch.
    pub fn generate_suggestions(&mut self) -> Result<Vec<Suggestion>> {
        let data = self.data.as_ref().ok_or(WrangleError::NoData)?;

        let candidates = self.roster.generate_all(&data.table, &data.profile);
        debug!(count = candidates.len(), "generated candidate suggestions");

        let mut ranked = self
            .ranker
            .rank(&self.roster, &data.table, &data.profile, candidates);
        ranked.truncate(self.max_suggestions);
        for (i, suggestion) in ranked.iter_mut().enumerate() {
            suggestion.id = i + 1;
        }
        Ok(ranked)
    }

    /// Apply one suggestion to the session table.
    ///
    /// Returns `Ok(false)` when the transformation no longer applies (the
    /// column vanished, the values changed); the table is left untouched
    /// in that case. The profile is recomputed in full after a successful
    /// apply.
    pub fn apply_transformation(&mut self, suggestion: &Suggestion) -> Result<bool> {
        let data = self.data.as_mut().ok_or(WrangleError::NoData)?;

        let Some(learner) = self.roster.for_kind(suggestion.kind) else {
            return Ok(false);
        };
        if !learner.apply(&mut data.table, suggestion) {
            info!(
                kind = suggestion.kind.as_str(),
                column = %suggestion.column,
                "transformation not applicable"
            );
            return Ok(false);
        }

        data.profile = profile_table(&data.table);
        info!(
            kind = suggestion.kind.as_str(),
            column = %suggestion.column,
            "applied transformation"
        );
        Ok(true)
    }

    /// Report an observed quality improvement back to the ranker.
    pub fn record_feedback(&mut self, suggestion: &Suggestion, observed: f64) {
        self.ranker.record_feedback(suggestion, observed);
    }
}
