//! Structural rewrite passes.
//!
//! Each pass is table-driven where it has configuration, queries the current
//! tree state with a fresh selector query, and mutates in place. Queries are
//! collected before mutation so a pass never traverses structures it is
//! rewriting.

use scrub_dom::{FragmentTree, NodeId};
use scrub_select::{parse_selector, query, Selector};

use crate::report::Diagnostics;
use crate::CleanError;

/// Presentational attributes stripped from the fragment, as
/// (selector, attribute) pairs.
///
/// `align`, `dir`, `style` and `lang` go everywhere; `class` only where its
/// value is the word-processor artifact `western`.
pub const STRIP_RULES: &[(&str, &str)] = &[
    ("*[align]", "align"),
    ("*[dir]", "dir"),
    ("*[style]", "style"),
    ("*[lang]", "lang"),
    ("*[class=western]", "class"),
];

/// Elements dissolved into their children: presentational wrappers anywhere,
/// and `b` directly inside a heading (the heading already carries the
/// emphasis).
pub const UNWRAP_SELECTORS: &[&str] = &[
    "span", "font", "address", "h0 > b", "h1 > b", "h2 > b", "h3 > b", "h4 > b", "h5 > b",
    "h6 > b",
];

/// Parse a pass-table selector, attaching the offending text on failure.
fn table_selector(raw: &str) -> Result<Selector, CleanError> {
    parse_selector(raw).map_err(|source| CleanError::Selector {
        selector: raw.to_string(),
        source,
    })
}

/// Remove the attributes listed in [`STRIP_RULES`] from every matching
/// element. Each removal is reported to the sink; zero matches is a no-op.
///
/// # Errors
///
/// Returns [`CleanError::Selector`] if a table entry fails to parse.
pub fn strip_attributes(
    tree: &mut FragmentTree,
    diagnostics: &mut dyn Diagnostics,
) -> Result<(), CleanError> {
    for (raw, attr_name) in STRIP_RULES {
        let selector = table_selector(raw)?;
        for id in query(tree, &selector) {
            let tag = tree.tag_name(id).unwrap_or("?").to_string();
            if tree.remove_attribute(id, attr_name) {
                diagnostics.attribute_removed(&tag, attr_name);
            }
        }
    }
    Ok(())
}

/// Unwrap every element matching [`UNWRAP_SELECTORS`], one full query per
/// selector. Unwrapping can expose new matches for the same selector (a
/// `span` directly inside a `span`, a `b` chain inside a heading), so each
/// selector is re-queried until no match remains.
///
/// # Errors
///
/// Returns [`CleanError::Selector`] if a table entry fails to parse.
pub fn unwrap_elements(
    tree: &mut FragmentTree,
    diagnostics: &mut dyn Diagnostics,
) -> Result<(), CleanError> {
    for raw in UNWRAP_SELECTORS {
        let selector = table_selector(raw)?;
        loop {
            let matches = query(tree, &selector);
            if matches.is_empty() {
                break;
            }
            for id in matches {
                let tag = tree.tag_name(id).unwrap_or("?").to_string();
                diagnostics.element_unwrapped(&tag);
                tree.unwrap(id);
            }
        }
    }
    Ok(())
}

/// Rename every `i` element to `q`: a structural upgrade from italic
/// presentation to quotation semantics. Attributes and children are kept.
///
/// # Errors
///
/// Returns [`CleanError::Selector`] if the selector fails to parse.
pub fn rename_italics(tree: &mut FragmentTree) -> Result<(), CleanError> {
    let selector = table_selector("i")?;
    for id in query(tree, &selector) {
        tree.rename(id, "q");
    }
    Ok(())
}

/// Split paragraphs at their line breaks.
///
/// For every `br` that is a direct child of a `p`, the break's preceding
/// siblings move into a fresh paragraph inserted before the original; the
/// break itself is removed. The original paragraph keeps the trailing
/// remainder, so N breaks yield N new leading paragraphs. A break with no
/// preceding siblings leaves an empty leading paragraph for
/// [`strip_empty_paragraphs`] to collect.
///
/// # Errors
///
/// Returns [`CleanError::Selector`] if the selector fails to parse.
pub fn split_paragraphs(tree: &mut FragmentTree) -> Result<(), CleanError> {
    let selector = table_selector("p > br")?;
    let breaks = query(tree, &selector);
    for br in breaks {
        let Some(p) = tree.parent(br) else {
            continue;
        };
        let preceding: Vec<NodeId> = tree
            .children(p)
            .iter()
            .take_while(|&&c| c != br)
            .copied()
            .collect();
        let new_p = tree.alloc_element("p");
        for child in preceding {
            tree.append_child(new_p, child);
        }
        tree.insert_before(new_p, p);
        tree.remove(br);
    }
    Ok(())
}

/// Remove every `p` with no element children whose text content trims to
/// empty. Runs after [`split_paragraphs`] so paragraphs emptied by the
/// split are collected too.
///
/// # Errors
///
/// Returns [`CleanError::Selector`] if the selector fails to parse.
pub fn strip_empty_paragraphs(tree: &mut FragmentTree) -> Result<(), CleanError> {
    let selector = table_selector("p")?;
    for id in query(tree, &selector) {
        let has_element_child = tree
            .children(id)
            .iter()
            .any(|&c| tree.as_element(c).is_some());
        if !has_element_child && tree.text_content(id).trim().is_empty() {
            tree.remove(id);
        }
    }
    Ok(())
}
