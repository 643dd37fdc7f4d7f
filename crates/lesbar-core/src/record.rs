//! Result assembly — the `analyze` entry point.
//!
//! One call produces one immutable [`AnalysisRecord`]: every sub-metric
//! and formula value, the composite score, the tokenized views, and a
//! SHA-256 fingerprint of the input text. Persistence is the caller's
//! concern; the engine never reads a record back.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::AnalysisResult;
use crate::metrics::MetricSet;
use crate::scoring::{self, CompositeFormula, ScoreWeights};
use crate::text::TextUnit;

/// Immutable snapshot of one analysis call.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct AnalysisRecord {
    /// Every computed sub-metric and formula score.
    pub metrics: MetricSet,
    /// The weighted composite score.
    pub score: f64,
    /// The original input text.
    pub text: String,
    /// The tokenized word list.
    pub words: Vec<String>,
    /// The tokenized phrase list.
    pub phrases: Vec<String>,
    /// SHA-256 hex fingerprint of the UTF-8 text.
    pub text_hash: String,
    /// Identity of the weight table used.
    pub weight_table: String,
}

/// Analyze one text against a composite formula and weight table.
///
/// All-or-nothing: fails only when the weight table is missing a weight
/// the formula needs. Empty text is valid and produces an all-zero
/// record.
#[tracing::instrument(skip_all, fields(text_len = text.len(), table = %weights.name))]
pub fn analyze(
    text: &str,
    formula: &CompositeFormula,
    weights: &ScoreWeights,
) -> AnalysisResult<AnalysisRecord> {
    let unit = TextUnit::tokenize(text);
    let metrics = MetricSet::compute(&unit);
    let score = scoring::composite_score(&metrics, formula, weights)?;

    Ok(AnalysisRecord {
        metrics,
        score,
        text: text.to_string(),
        words: unit.words,
        phrases: unit.phrases,
        text_hash: fingerprint(text),
        weight_table: weights.name.clone(),
    })
}

/// SHA-256 content fingerprint of the UTF-8 text, lowercase hex.
pub fn fingerprint(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
