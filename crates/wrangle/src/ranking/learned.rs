//! Ranking by a regression model trained on observed quality deltas.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::input::Table;
use crate::learners::LearnerRoster;
use crate::profile::TableProfile;
use crate::suggestion::Suggestion;

use super::features::{extract, FEATURE_LEN};
use super::{sort_by_improvement, Ranker, SimulationRanker};

/// Examples required before predictions replace simulation.
const MIN_TRAINING_SAMPLES: usize = 10;

/// Retrain after this many new examples.
const RETRAIN_INTERVAL: usize = 5;

const LEARNING_RATE: f64 = 0.01;
const EPOCHS: usize = 200;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TrainingExample {
    features: Vec<f64>,
    target: f64,
}

/// Per-feature standardization fitted at training time.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct Scaler {
    mean: Vec<f64>,
    std: Vec<f64>,
}

impl Scaler {
    fn fit(examples: &[TrainingExample]) -> Self {
        let n = examples.len() as f64;
        let mut mean = vec![0.0; FEATURE_LEN];
        for ex in examples {
            for (m, x) in mean.iter_mut().zip(&ex.features) {
                *m += x / n;
            }
        }

        let mut std = vec![0.0; FEATURE_LEN];
        for ex in examples {
            for (i, x) in ex.features.iter().enumerate() {
                std[i] += (x - mean[i]).powi(2) / n;
            }
        }
        for s in std.iter_mut() {
            *s = s.sqrt();
            // Constant features pass through unscaled.
            if *s == 0.0 {
                *s = 1.0;
            }
        }

        Self { mean, std }
    }

    fn transform(&self, features: &[f64]) -> Vec<f64> {
        features
            .iter()
            .enumerate()
            .map(|(i, x)| (x - self.mean[i]) / self.std[i])
            .collect()
    }
}

/// Serialized model contents.
#[derive(Debug, Serialize, Deserialize)]
struct ModelState {
    weights: Vec<f64>,
    bias: f64,
    scaler: Option<Scaler>,
    examples: Vec<TrainingExample>,
}

/// Ranks with a linear model once enough feedback has accumulated,
/// delegating to [`SimulationRanker`] until then. Every delegated ranking
/// doubles as training data, so the model bootstraps itself from the
/// simulations it replaces.
pub struct LearnedRanker {
    fallback: SimulationRanker,
    examples: Vec<TrainingExample>,
    weights: Vec<f64>,
    bias: f64,
    scaler: Option<Scaler>,
    model_path: Option<PathBuf>,
}

impl Default for LearnedRanker {
    fn default() -> Self {
        Self::new()
    }
}

impl LearnedRanker {
    pub fn new() -> Self {
        Self {
            fallback: SimulationRanker::new(),
            examples: Vec::new(),
            weights: vec![0.0; FEATURE_LEN],
            bias: 0.0,
            scaler: None,
            model_path: None,
        }
    }

    /// Build a ranker persisted at `path`. A missing or unreadable model
    /// file starts the ranker empty; it is never an error.
    pub fn with_model_path(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let mut ranker = Self::new();
        ranker.load(&path);
        ranker.model_path = Some(path);
        ranker
    }

    /// Whether the model has been fitted and has enough examples to
    /// predict on its own.
    pub fn is_trained(&self) -> bool {
        self.scaler.is_some() && self.examples.len() >= MIN_TRAINING_SAMPLES
    }

    pub fn example_count(&self) -> usize {
        self.examples.len()
    }

    fn predict(&self, features: &[f64]) -> f64 {
        let scaled = match &self.scaler {
            Some(scaler) => scaler.transform(features),
            None => features.to_vec(),
        };
        self.weights
            .iter()
            .zip(&scaled)
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.bias
    }

    fn add_example(&mut self, features: Vec<f64>, target: f64) {
        self.examples.push(TrainingExample { features, target });

        let n = self.examples.len();
        if n >= MIN_TRAINING_SAMPLES && n % RETRAIN_INTERVAL == 0 {
            self.train();
            self.save();
        }
    }

    /// Full retrain from scratch over all accumulated examples.
    fn train(&mut self) {
        let scaler = Scaler::fit(&self.examples);
        let scaled: Vec<(Vec<f64>, f64)> = self
            .examples
            .iter()
            .map(|ex| (scaler.transform(&ex.features), ex.target))
            .collect();

        let mut weights = vec![0.0; FEATURE_LEN];
        let mut bias = 0.0;

        for _ in 0..EPOCHS {
            for (x, target) in &scaled {
                let pred: f64 =
                    weights.iter().zip(x).map(|(w, xi)| w * xi).sum::<f64>() + bias;
                let err = pred - target;
                for (w, xi) in weights.iter_mut().zip(x) {
                    *w -= LEARNING_RATE * err * xi;
                }
                bias -= LEARNING_RATE * err;
            }
        }

        debug!(examples = self.examples.len(), "retrained ranking model");
        self.weights = weights;
        self.bias = bias;
        self.scaler = Some(scaler);
    }

    fn load(&mut self, path: &Path) {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(_) => return,
        };
        match serde_json::from_str::<ModelState>(&text) {
            Ok(state) if state.weights.len() == FEATURE_LEN => {
                self.weights = state.weights;
                self.bias = state.bias;
                self.scaler = state.scaler;
                self.examples = state.examples;
            }
            Ok(_) => warn!(path = %path.display(), "ignoring model with stale feature layout"),
            Err(err) => warn!(path = %path.display(), %err, "ignoring unreadable model file"),
        }
    }

    fn save(&self) {
        let Some(path) = &self.model_path else {
            return;
        };
        let state = ModelState {
            weights: self.weights.clone(),
            bias: self.bias,
            scaler: self.scaler.clone(),
            examples: self.examples.clone(),
        };
        let result = serde_json::to_string_pretty(&state)
            .map_err(|e| e.to_string())
            .and_then(|json| fs::write(path, json).map_err(|e| e.to_string()));
        if let Err(err) = result {
            warn!(path = %path.display(), %err, "failed to persist ranking model");
        }
    }
}

impl Ranker for LearnedRanker {
    fn rank(
        &mut self,
        roster: &LearnerRoster,
        table: &Table,
        profile: &TableProfile,
        mut suggestions: Vec<Suggestion>,
    ) -> Vec<Suggestion> {
        for suggestion in suggestions.iter_mut() {
            suggestion.features = Some(extract(suggestion, profile));
        }

        if self.is_trained() {
            for suggestion in suggestions.iter_mut() {
                let features = suggestion.features.as_deref().unwrap_or(&[]);
                suggestion.quality_improvement = self.predict(features).max(0.0);
            }
            sort_by_improvement(&mut suggestions);
            return suggestions;
        }

        // Not enough data yet: rank by simulation and harvest each
        // measured delta as a training example.
        let ranked = self.fallback.rank(roster, table, profile, suggestions);
        for suggestion in &ranked {
            if let Some(features) = suggestion.features.clone() {
                self.add_example(features, suggestion.quality_improvement);
            }
        }
        ranked
    }

    fn record_feedback(&mut self, suggestion: &Suggestion, observed: f64) {
        match suggestion.features.clone() {
            Some(features) => self.add_example(features, observed),
            None => debug!(
                column = %suggestion.column,
                "feedback for a suggestion without features, skipping"
            ),
        }
    }
}
