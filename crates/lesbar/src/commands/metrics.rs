//! Metrics command — compute the MetricSet without composite scoring.

use anyhow::Context;
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use lesbar_core::scoring::ScoreMetric;
use lesbar_core::{MetricSet, TextUnit};

use super::read_input_file;

/// Arguments for the `metrics` subcommand.
#[derive(Args, Debug)]
pub struct MetricsArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,

    /// Print only this metric's value (for scripting).
    #[arg(long, value_enum)]
    pub only: Option<ScoreMetric>,
}

/// Compute and print the readability metrics of a file.
#[instrument(name = "cmd_metrics", skip_all, fields(file = %args.file))]
pub fn cmd_metrics(
    args: MetricsArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, only = ?args.only, "executing metrics command");

    let content = read_input_file(&args.file, max_input_bytes)?;

    let unit = TextUnit::tokenize(&content);
    let metrics = MetricSet::compute(&unit);

    if let Some(metric) = args.only {
        println!("{}", metric.value(&metrics));
        return Ok(());
    }

    if global_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&metrics).context("failed to serialize metrics")?
        );
    } else {
        println!("{}", "Counts".bold().underline());
        println!("{}: {}", "Words".dimmed(), metrics.count_words);
        println!("{}: {}", "Phrases".dimmed(), metrics.count_phrases);
        println!(
            "{}: {}",
            "Complex-syllable words".dimmed(),
            metrics.syllable_complexity
        );
        println!(
            "{}: {}",
            "Multi-membered graphemes".dimmed(),
            metrics.multi_membered_graphemes
        );
        println!("{}: {}", "Rare graphemes".dimmed(), metrics.rare_graphemes);
        println!(
            "{}: {}",
            "Consonant clusters".dimmed(),
            metrics.consonant_clusters
        );

        println!();
        println!("{}", "Averages".bold().underline());
        println!(
            "{}: {:.2}",
            "Word length".dimmed(),
            metrics.average_word_length
        );
        println!(
            "{}: {:.2}",
            "Syllables per word".dimmed(),
            metrics.average_syllables_per_word
        );
        println!(
            "{}: {:.2}",
            "Phrase length".dimmed(),
            metrics.average_phrase_length
        );
        println!(
            "{}: {:.2}",
            "Syllables per phrase".dimmed(),
            metrics.average_syllables_per_phrase
        );

        println!();
        println!("{}", "Formulas".bold().underline());
        println!("{}: {:.2}", "LIX".dimmed(), metrics.lix);
        println!("{}: {:.2}", "gSMOG".dimmed(), metrics.gsmog);
        println!(
            "{}: {:.2}",
            "Flesch-Kincaid".dimmed(),
            metrics.flesch_kincaid
        );
        println!("{}: {:.2}", "WSTF".dimmed(), metrics.wstf);
    }

    Ok(())
}
