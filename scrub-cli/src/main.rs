//! Scrub CLI
//!
//! Reads an HTML fragment from a file or standard input, runs the cleanup
//! pipeline, and writes the transformed fragment to standard output.
//! Diagnostic notices go to standard error and are safe to discard.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use owo_colors::OwoColorize;
use scrub_core::{clean_fragment, Diagnostics};

/// Clean up an HTML fragment pasted out of a legacy word processor or CMS
/// export: strip presentational attributes, dissolve wrapper tags, split
/// paragraphs on line breaks, and fix typography.
#[derive(Parser)]
#[command(name = "scrub", version, about)]
struct Args {
    /// Input file; standard input when omitted.
    file: Option<PathBuf>,
}

/// One-line colored notices on standard error.
struct StderrDiagnostics;

impl Diagnostics for StderrDiagnostics {
    fn attribute_removed(&mut self, tag: &str, name: &str) {
        eprintln!("{} attribute {name:?} from <{tag}>", "removed".yellow());
    }

    fn element_unwrapped(&mut self, tag: &str) {
        eprintln!("{} <{tag}>", "unwrapped".yellow());
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    let html = match &args.file {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("cannot read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            let _ = io::stdin()
                .read_to_string(&mut buf)
                .context("cannot read standard input")?;
            buf
        }
    };

    let cleaned = clean_fragment(&html, &mut StderrDiagnostics)?;
    io::stdout()
        .write_all(cleaned.as_bytes())
        .context("cannot write output")?;
    Ok(())
}
