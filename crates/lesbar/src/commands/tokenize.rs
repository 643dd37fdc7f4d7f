//! Tokenize command — show the word and phrase lists of a file.

use camino::Utf8PathBuf;
use clap::Args;
use owo_colors::OwoColorize;
use serde::Serialize;
use tracing::{debug, instrument};

use lesbar_core::TextUnit;

use super::read_input_file;

/// Arguments for the `tokenize` subcommand.
#[derive(Args, Debug)]
pub struct TokenizeArgs {
    /// File to tokenize.
    pub file: Utf8PathBuf,

    /// Print only the counts, not the token lists.
    #[arg(long)]
    pub counts: bool,
}

#[derive(Serialize)]
struct TokenizeReport {
    word_count: usize,
    phrase_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    words: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    phrases: Option<Vec<String>>,
}

/// Tokenize a file and print its word/phrase view.
#[instrument(name = "cmd_tokenize", skip_all, fields(file = %args.file))]
pub fn cmd_tokenize(
    args: TokenizeArgs,
    global_json: bool,
    max_input_bytes: Option<usize>,
) -> anyhow::Result<()> {
    debug!(file = %args.file, counts_only = args.counts, "executing tokenize command");

    let content = read_input_file(&args.file, max_input_bytes)?;
    let unit = TextUnit::tokenize(&content);

    if global_json {
        let report = TokenizeReport {
            word_count: unit.words.len(),
            phrase_count: unit.phrases.len(),
            words: (!args.counts).then_some(unit.words),
            phrases: (!args.counts).then_some(unit.phrases),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!(
        "{} words, {} phrases",
        unit.words.len(),
        unit.phrases.len()
    );

    if !args.counts {
        println!();
        println!("{}", "Words".bold().underline());
        for word in &unit.words {
            println!("{word}");
        }
        println!();
        println!("{}", "Phrases".bold().underline());
        for phrase in &unit.phrases {
            println!("{phrase}");
        }
    }

    Ok(())
}
