//! Analyze command — full metric record plus weighted composite score.

use anyhow::{Context, bail};
use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use tracing::{debug, instrument};

use lesbar_core::config::Config;
use lesbar_core::record;

use super::read_input_file;

/// Arguments for the `analyze` subcommand.
#[derive(Args, Debug)]
pub struct AnalyzeArgs {
    /// File to analyze.
    pub file: Utf8PathBuf,

    /// Maximum acceptable composite score.
    #[arg(long)]
    pub max_score: Option<f64>,
}

/// Analyze a file against the configured weight table.
#[instrument(name = "cmd_analyze", skip_all, fields(file = %args.file))]
pub fn cmd_analyze(
    args: AnalyzeArgs,
    global_json: bool,
    config: &Config,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, max_score = ?args.max_score, "executing analyze command");

    let content = read_input_file(&args.file, max_input_bytes)?;

    let weights = config.score_weights().context(
        "no weight table configured; add a [weights] section to lesbar.toml \
         (one weight per composite metric)",
    )?;
    let formula = config.composite_formula();

    let record = record::analyze(&content, &formula, &weights)
        .with_context(|| format!("failed to analyze {}", args.file))?;

    if global_json {
        println!("{}", serde_json::to_string_pretty(&record)?);
        return Ok(());
    }

    if let Some(max) = args.max_score {
        if record.score > max {
            bail!(
                "{} scores {:.2} (max: {:.2}). Shorten sentences or simplify vocabulary.",
                args.file,
                record.score,
                max,
            );
        }
        println!(
            "{} {} scores {:.2} (max: {:.2})",
            "PASS:".green(),
            args.file,
            record.score,
            max,
        );
    } else {
        println!("{} {}", "Score:".bold(), format!("{:.2}", record.score).green());
        println!(
            "{} words, {} phrases (weights: {})",
            record.metrics.count_words, record.metrics.count_phrases, record.weight_table,
        );
        println!(
            "LIX {:.2}  gSMOG {:.2}  Flesch-Kincaid {:.2}  WSTF {:.2}",
            record.metrics.lix,
            record.metrics.gsmog,
            record.metrics.flesch_kincaid,
            record.metrics.wstf,
        );
    }

    Ok(())
}
