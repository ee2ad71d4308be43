//! Text-node typography: ellipsis, quote curling, French spacing.
//!
//! The rules run as an ordered sequence of independent substitutions, each
//! on the result of the previous one. For straight quotes the order doubles
//! as the disambiguation strategy: letter adjacency wins over space
//! adjacency, which wins over punctuation adjacency, because an earlier
//! rule has already rewritten the quote before a later one can see it.
//! The order must not change — including its known misclassifications
//! (an unmatched quote at the start of a string touches no rule and stays
//! straight).

use once_cell::sync::Lazy;
use regex::Regex;
use scrub_dom::{FragmentTree, NodeId, NodeType};

/// A straight quote immediately following a letter closes a quotation.
static QUOTE_AFTER_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\p{L})""#).expect("valid pattern"));
/// A straight quote immediately preceding a letter opens one.
static QUOTE_BEFORE_LETTER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(\p{L})"#).expect("valid pattern"));
/// A straight quote before a space separator closes a quotation.
static QUOTE_BEFORE_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(\p{Zs})"#).expect("valid pattern"));
/// A straight quote after a space separator opens one.
static QUOTE_AFTER_SPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\p{Zs})""#).expect("valid pattern"));
/// A straight quote before punctuation closes a quotation.
static QUOTE_BEFORE_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#""(\p{P})"#).expect("valid pattern"));
/// A straight quote after punctuation opens one.
static QUOTE_AFTER_PUNCT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"(\p{P})""#).expect("valid pattern"));

/// Apply the typographic substitutions to one string.
#[must_use]
pub fn refine_text(text: &str) -> String {
    let text = text.replace("...", "\u{2026}");
    // Typewriter double-apostrophes become a straight double quote before
    // the curling rules run.
    let text = text.replace("''", "\"");
    let text = QUOTE_AFTER_LETTER.replace_all(&text, "${1}\u{201D}");
    let text = QUOTE_BEFORE_LETTER.replace_all(&text, "\u{201C}${1}");
    let text = QUOTE_BEFORE_SPACE.replace_all(&text, "\u{201D}${1}");
    let text = QUOTE_AFTER_SPACE.replace_all(&text, "${1}\u{201C}");
    let text = QUOTE_BEFORE_PUNCT.replace_all(&text, "\u{201D}${1}");
    let text = QUOTE_AFTER_PUNCT.replace_all(&text, "${1}\u{201C}");
    // French spacing: bind an opening guillemet to the following word, and
    // the high punctuation marks to the preceding word, with U+00A0.
    let text = text.replace("\u{AB} ", "\u{AB}\u{A0}");
    text.replace(" :", "\u{A0}:")
        .replace(" ;", "\u{A0};")
        .replace(" !", "\u{A0}!")
        .replace(" ?", "\u{A0}?")
}

/// Rewrite every text and CDATA node in the tree, in document order.
///
/// Two-phase: node ids are collected by an immutable traversal first, then
/// mutated, so traversal never observes its own rewrites.
pub fn apply_typography(tree: &mut FragmentTree) {
    let targets: Vec<NodeId> = tree
        .descendants(tree.root())
        .filter(|&id| tree.as_text(id).is_some())
        .collect();
    for id in targets {
        if let Some(node) = tree.get_mut(id)
            && let (NodeType::Text(data) | NodeType::Cdata(data)) = &mut node.node_type
        {
            *data = refine_text(data);
        }
    }
}
