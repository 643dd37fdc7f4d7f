//! Core library for lesbar.
//!
//! A German-text readability analysis engine: tokenizes raw text into
//! words and phrases, derives linguistic sub-metrics (syllable counts,
//! grapheme patterns, length statistics), computes the LIX, gSMOG,
//! Flesch-Kincaid, and WSTF readability formulas, and combines a
//! configurable subset of metrics into one weighted composite score.
//!
//! The engine is purely functional and stateless — every analysis call is
//! a deterministic, synchronous computation with no shared mutable state,
//! so calls may run fully in parallel.
//!
//! # Modules
//!
//! - [`text`] - Word/phrase tokenization and the letter filter
//! - [`syllables`] - Vowel-group syllable estimation
//! - [`metrics`] - Sub-metric calculators and [`MetricSet`]
//! - [`formulas`] - The four readability formulas
//! - [`scoring`] - Config-driven weighted composite scoring
//! - [`record`] - The `analyze` entry point and result record
//! - [`config`] - Configuration loading and discovery
//! - [`error`] - Error types and result aliases
//!
//! # Quick Start
//!
//! ```
//! use lesbar_core::{CompositeFormula, ScoreMetric, ScoreWeights, analyze};
//!
//! let weights = ScoreWeights::new("standard")
//!     .with(ScoreMetric::Lix, 1.0)
//!     .with(ScoreMetric::ProportionOfComplexSyllableWords, 5.0)
//!     .with(ScoreMetric::ProportionOfMultiMemberedGraphemeWords, 5.0)
//!     .with(ScoreMetric::ProportionOfRareGraphemeWords, 5.0)
//!     .with(ScoreMetric::ProportionOfConsonantClusterWords, 5.0);
//!
//! let record = analyze(
//!     "Der Hund bellt laut. Die Katze schläft.",
//!     &CompositeFormula::baseline(),
//!     &weights,
//! )
//! .expect("weight table covers the baseline formula");
//!
//! assert_eq!(record.metrics.count_words, 7);
//! assert_eq!(record.metrics.count_phrases, 2);
//! ```
#![deny(unsafe_code)]

pub mod config;

pub mod error;

pub mod formulas;

pub mod metrics;

pub mod record;

pub mod scoring;

pub mod syllables;

pub mod text;

pub use config::{Config, ConfigLoader, ConfigSources, DEFAULT_MAX_INPUT_BYTES, LogLevel};

pub use error::{AnalysisError, AnalysisResult, ConfigError, ConfigResult};

pub use metrics::MetricSet;

pub use record::{AnalysisRecord, analyze, fingerprint};

pub use scoring::{CompositeFormula, ScoreMetric, ScoreWeights, composite_score};

pub use text::TextUnit;
