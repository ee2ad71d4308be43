//! Cleanup pipeline for HTML fragments of uncertain provenance.
//!
//! # Scope
//!
//! This crate provides:
//! - **Structural passes** — attribute stripping, wrapper unwrapping,
//!   `i` → `q` renaming, paragraph splitting at `br`, empty-paragraph
//!   removal ([`passes`])
//! - **Typography pass** — ellipsis, quote curling, French spacing
//!   ([`typography`])
//! - **Pipeline driver** — [`clean_fragment`], which parses, runs the
//!   passes in their fixed order, and serializes
//!
//! The pipeline is single-threaded and mutates one in-memory tree per run.
//! Passes must execute in sequence: each performs a fresh selector query
//! over the tree the previous pass left behind (the empty-paragraph remover
//! assumes the paragraph splitter has already run).

/// Structural rewrite passes and their configuration tables.
pub mod passes;
/// Injectable diagnostics sink.
pub mod report;
/// Text-node typography rules.
pub mod typography;

pub use passes::{
    rename_italics, split_paragraphs, strip_attributes, strip_empty_paragraphs, unwrap_elements,
    STRIP_RULES, UNWRAP_SELECTORS,
};
pub use report::{Diagnostics, SilentDiagnostics, WriteDiagnostics};
pub use typography::{apply_typography, refine_text};

use scrub_dom::FragmentTree;
use scrub_html::{parse_fragment, serialize_fragment};
use scrub_select::SelectorError;
use thiserror::Error;

/// Pipeline failure.
///
/// Malformed markup is never an error (the parser's recovery handles it);
/// the only failure is a malformed selector in a pass table, which is a
/// bug surfaced with the offending text rather than partial output.
#[derive(Debug, Error)]
pub enum CleanError {
    /// A pass-table selector failed to parse.
    #[error("invalid selector {selector:?} in a pass table")]
    Selector {
        /// The selector text as written in the table.
        selector: String,
        /// The parse failure.
        #[source]
        source: SelectorError,
    },
}

/// Run the whole pipeline on a fragment of markup text.
///
/// Parses error-tolerantly, applies the passes in their fixed order exactly
/// once, and returns the serialized result. Diagnostic notices go to the
/// given sink.
///
/// # Errors
///
/// Returns [`CleanError`] only for a malformed pass-table selector; input
/// markup never fails.
pub fn clean_fragment(
    html: &str,
    diagnostics: &mut dyn Diagnostics,
) -> Result<String, CleanError> {
    let mut tree = parse_fragment(html);
    clean_tree(&mut tree, diagnostics)?;
    Ok(serialize_fragment(&tree))
}

/// Run the pass sequence over an already-parsed tree, in the fixed order:
/// strip attributes, unwrap wrappers, rename italics, split paragraphs,
/// remove empty paragraphs, apply typography.
///
/// # Errors
///
/// Returns [`CleanError`] only for a malformed pass-table selector.
pub fn clean_tree(
    tree: &mut FragmentTree,
    diagnostics: &mut dyn Diagnostics,
) -> Result<(), CleanError> {
    strip_attributes(tree, diagnostics)?;
    unwrap_elements(tree, diagnostics)?;
    rename_italics(tree)?;
    split_paragraphs(tree)?;
    strip_empty_paragraphs(tree)?;
    apply_typography(tree);
    Ok(())
}
