use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// How far from 1.0 a probability sum may drift before the vector is rejected.
const NORMALIZATION_TOLERANCE: f32 = 1e-3;

/// A single (label, probability) pair from the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub label: String,
    pub probability: f32,
}

impl ScoreEntry {
    pub fn new(label: impl Into<String>, probability: f32) -> Self {
        Self {
            label: label.into(),
            probability,
        }
    }
}

/// Ranked output of one classifier head over its full label vocabulary.
///
/// Produced once per inference and never mutated. Probabilities are expected
/// to be non-negative and sum to 1 over the whole label set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScoreVector {
    entries: Vec<ScoreEntry>,
}

impl ScoreVector {
    pub fn new(entries: Vec<ScoreEntry>) -> Self {
        Self { entries }
    }

    pub fn from_pairs<L: Into<String>>(pairs: impl IntoIterator<Item = (L, f32)>) -> Self {
        Self {
            entries: pairs
                .into_iter()
                .map(|(label, probability)| ScoreEntry::new(label, probability))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[ScoreEntry] {
        &self.entries
    }

    /// Checks the caller's preconditions: non-empty, non-negative, normalized.
    ///
    /// `head` names the score vector in error messages ("category"/"climate").
    pub fn validate(&self, head: &'static str) -> Result<(), InputError> {
        if self.entries.is_empty() {
            return Err(InputError::EmptyScores(head));
        }
        if let Some(entry) = self.entries.iter().find(|e| !e.probability.is_finite()) {
            return Err(InputError::NonFiniteProbability(head, entry.label.clone()));
        }
        if let Some(entry) = self.entries.iter().find(|e| e.probability < 0.0) {
            return Err(InputError::NegativeProbability(head, entry.label.clone()));
        }
        let sum: f32 = self.entries.iter().map(|e| e.probability).sum();
        // Written as a negated pass condition so a NaN sum can never slip
        // through the comparison.
        if !((sum - 1.0).abs() <= NORMALIZATION_TOLERANCE) {
            return Err(InputError::NotNormalized(head, sum));
        }
        Ok(())
    }

    /// The `min(k, len)` highest-probability entries, descending.
    ///
    /// Ties keep the vector's original index order (stable sort), so the
    /// selection is deterministic for already-ranked classifier output.
    pub fn top_k(&self, k: usize) -> Vec<&ScoreEntry> {
        let mut ranked: Vec<&ScoreEntry> = self.entries.iter().collect();
        ranked.sort_by(|a, b| {
            b.probability
                .partial_cmp(&a.probability)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        ranked.truncate(k);
        ranked
    }
}
