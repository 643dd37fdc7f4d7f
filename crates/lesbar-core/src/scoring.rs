//! Weighted composite scoring.
//!
//! The composite score is `Σ weight × metric` over an ordered list of
//! participating metrics (the [`CompositeFormula`]) and a caller-supplied
//! weight table ([`ScoreWeights`]). Which metrics participate is data,
//! not code — the formula can change without touching any calculator.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::error::{AnalysisError, AnalysisResult};
use crate::metrics::MetricSet;

/// A metric eligible for composite scoring.
///
/// Every [`MetricSet`] field is addressable so composite formulas can
/// evolve freely.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema,
)]
#[serde(rename_all = "kebab-case")]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum ScoreMetric {
    /// LIX readability index.
    Lix,
    /// German SMOG.
    Gsmog,
    /// Flesch-Kincaid grade level.
    FleschKincaid,
    /// Fourth Vienna formula.
    Wstf,
    /// Word count.
    CountWords,
    /// Phrase count.
    CountPhrases,
    /// Words with at least three syllables.
    SyllableComplexity,
    /// Multi-membered grapheme total.
    MultiMemberedGraphemes,
    /// Rare grapheme total.
    RareGraphemes,
    /// Consonant cluster total.
    ConsonantClusters,
    /// Mean letter-filtered word length.
    AverageWordLength,
    /// Mean syllables per word.
    AverageSyllablesPerWord,
    /// Mean words per phrase.
    AveragePhraseLength,
    /// Mean syllables per phrase.
    AverageSyllablesPerPhrase,
    /// Long-word proportion.
    ProportionOfLongWords,
    /// Complex-syllable word proportion.
    ProportionOfComplexSyllableWords,
    /// Multi-membered grapheme ratio.
    ProportionOfMultiMemberedGraphemeWords,
    /// Rare grapheme ratio.
    ProportionOfRareGraphemeWords,
    /// Consonant cluster ratio.
    ProportionOfConsonantClusterWords,
}

impl ScoreMetric {
    /// Returns the metric's kebab-case name, matching its serialized form.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Lix => "lix",
            Self::Gsmog => "gsmog",
            Self::FleschKincaid => "flesch-kincaid",
            Self::Wstf => "wstf",
            Self::CountWords => "count-words",
            Self::CountPhrases => "count-phrases",
            Self::SyllableComplexity => "syllable-complexity",
            Self::MultiMemberedGraphemes => "multi-membered-graphemes",
            Self::RareGraphemes => "rare-graphemes",
            Self::ConsonantClusters => "consonant-clusters",
            Self::AverageWordLength => "average-word-length",
            Self::AverageSyllablesPerWord => "average-syllables-per-word",
            Self::AveragePhraseLength => "average-phrase-length",
            Self::AverageSyllablesPerPhrase => "average-syllables-per-phrase",
            Self::ProportionOfLongWords => "proportion-of-long-words",
            Self::ProportionOfComplexSyllableWords => "proportion-of-complex-syllable-words",
            Self::ProportionOfMultiMemberedGraphemeWords => {
                "proportion-of-multi-membered-grapheme-words"
            }
            Self::ProportionOfRareGraphemeWords => "proportion-of-rare-grapheme-words",
            Self::ProportionOfConsonantClusterWords => "proportion-of-consonant-cluster-words",
        }
    }

    /// Read this metric's value out of a computed [`MetricSet`].
    pub fn value(self, metrics: &MetricSet) -> f64 {
        match self {
            Self::Lix => metrics.lix,
            Self::Gsmog => metrics.gsmog,
            Self::FleschKincaid => metrics.flesch_kincaid,
            Self::Wstf => metrics.wstf,
            Self::CountWords => metrics.count_words as f64,
            Self::CountPhrases => metrics.count_phrases as f64,
            Self::SyllableComplexity => metrics.syllable_complexity as f64,
            Self::MultiMemberedGraphemes => metrics.multi_membered_graphemes as f64,
            Self::RareGraphemes => metrics.rare_graphemes as f64,
            Self::ConsonantClusters => metrics.consonant_clusters as f64,
            Self::AverageWordLength => metrics.average_word_length,
            Self::AverageSyllablesPerWord => metrics.average_syllables_per_word,
            Self::AveragePhraseLength => metrics.average_phrase_length,
            Self::AverageSyllablesPerPhrase => metrics.average_syllables_per_phrase,
            Self::ProportionOfLongWords => metrics.proportion_of_long_words,
            Self::ProportionOfComplexSyllableWords => {
                metrics.proportion_of_complex_syllable_words
            }
            Self::ProportionOfMultiMemberedGraphemeWords => {
                metrics.proportion_of_multi_membered_grapheme_words
            }
            Self::ProportionOfRareGraphemeWords => metrics.proportion_of_rare_grapheme_words,
            Self::ProportionOfConsonantClusterWords => {
                metrics.proportion_of_consonant_cluster_words
            }
        }
    }
}

impl std::fmt::Display for ScoreMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The ordered list of metrics participating in the composite score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(transparent)]
pub struct CompositeFormula {
    /// Participating metrics, in evaluation order.
    pub metrics: Vec<ScoreMetric>,
}

impl CompositeFormula {
    /// The baseline formula: LIX plus the four proportion metrics.
    pub fn baseline() -> Self {
        Self {
            metrics: vec![
                ScoreMetric::Lix,
                ScoreMetric::ProportionOfComplexSyllableWords,
                ScoreMetric::ProportionOfMultiMemberedGraphemeWords,
                ScoreMetric::ProportionOfRareGraphemeWords,
                ScoreMetric::ProportionOfConsonantClusterWords,
            ],
        }
    }

    /// The extended eleven-metric formula: counts, averages, and
    /// proportions (no formula scores).
    pub fn extended() -> Self {
        Self {
            metrics: vec![
                ScoreMetric::CountWords,
                ScoreMetric::CountPhrases,
                ScoreMetric::AverageWordLength,
                ScoreMetric::AverageSyllablesPerWord,
                ScoreMetric::AveragePhraseLength,
                ScoreMetric::AverageSyllablesPerPhrase,
                ScoreMetric::ProportionOfLongWords,
                ScoreMetric::ProportionOfComplexSyllableWords,
                ScoreMetric::ProportionOfMultiMemberedGraphemeWords,
                ScoreMetric::ProportionOfRareGraphemeWords,
                ScoreMetric::ProportionOfConsonantClusterWords,
            ],
        }
    }
}

impl Default for CompositeFormula {
    fn default() -> Self {
        Self::baseline()
    }
}

/// A named, immutable weight table supplied by the caller.
///
/// The name stamps every result record so stored results can be traced
/// back to the weights that produced them. The engine only reads it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreWeights {
    /// Identity of this weight table.
    pub name: String,
    /// Weight per metric, keyed by kebab-case metric name.
    pub weights: BTreeMap<ScoreMetric, f64>,
}

impl ScoreWeights {
    /// Create an empty weight table with the given identity.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            weights: BTreeMap::new(),
        }
    }

    /// Add a weight, builder style.
    #[must_use]
    pub fn with(mut self, metric: ScoreMetric, weight: f64) -> Self {
        self.weights.insert(metric, weight);
        self
    }

    /// Look up the weight for a metric.
    pub fn get(&self, metric: ScoreMetric) -> Option<f64> {
        self.weights.get(&metric).copied()
    }
}

/// Compute the weighted composite score.
///
/// Iterates the formula's metrics in order and accumulates
/// `weight × value`. A metric without a weight in the table is a fatal
/// [`AnalysisError::MissingWeight`] — never silently treated as zero.
#[tracing::instrument(skip(metrics, weights), fields(table = %weights.name))]
pub fn composite_score(
    metrics: &MetricSet,
    formula: &CompositeFormula,
    weights: &ScoreWeights,
) -> AnalysisResult<f64> {
    let mut score = 0.0;

    for metric in &formula.metrics {
        let weight = weights
            .get(*metric)
            .ok_or_else(|| AnalysisError::MissingWeight {
                table: weights.name.clone(),
                metric: metric.as_str().to_string(),
            })?;
        score += weight * metric.value(metrics);
    }

    Ok(score)
}
