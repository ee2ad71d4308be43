//! CSS selector parsing and matching for the scrub pipeline.
//!
//! # Scope
//!
//! The rewrite passes drive all their tree queries through the selector
//! subset implemented here:
//! - Type selectors (`p`, `span`) and the universal selector (`*`)
//! - Attribute selectors: presence (`[align]`) and exact value
//!   (`[class=western]`, quoted or unquoted)
//! - Descendant (`h1 b`) and child (`p > br`) combinators
//!
//! Classes, ids, pseudo-classes, and sibling combinators are not
//! implemented; no pass needs them and there is no cascade here, so
//! selectors carry no specificity either.
//!
//! Matching follows [Selectors Level 4](https://www.w3.org/TR/selectors-4/):
//! the rightmost compound is the subject, and the combinator chain is
//! walked from the subject upward through the tree.

use scrub_dom::{ElementData, FragmentTree, NodeId};
use thiserror::Error;

/// Error raised when selector text cannot be parsed.
///
/// Pass tables are static, so in practice this surfaces a programming
/// mistake in a table entry rather than a runtime condition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectorError {
    /// The selector text was empty or all whitespace.
    #[error("empty selector")]
    Empty,
    /// A character that cannot appear in this selector subset.
    #[error("unexpected character {0:?} in selector")]
    UnexpectedChar(char),
    /// A combinator with no compound selector on its left.
    #[error("combinator without a left-hand side")]
    DanglingCombinator,
    /// A combinator with no compound selector on its right.
    #[error("combinator without a right-hand side")]
    TrailingCombinator,
    /// An attribute selector missing its closing bracket.
    #[error("unterminated attribute selector")]
    UnterminatedAttribute,
    /// An attribute selector with `=` but no value.
    #[error("missing attribute value")]
    MissingAttributeValue,
}

/// A single condition on one element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SimpleSelector {
    /// [§ 5.1 Type selector](https://www.w3.org/TR/selectors-4/#type-selectors)
    Type(String),
    /// [§ 5.2 Universal selector](https://www.w3.org/TR/selectors-4/#universal-selector)
    Universal,
    /// [§ 6 Attribute selectors](https://www.w3.org/TR/selectors-4/#attribute-selectors)
    Attribute(AttributeSelector),
}

/// The attribute selector forms the passes use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeSelector {
    /// `[attr]` — the element has the attribute.
    Exists(String),
    /// `[attr=value]` — the attribute's value is exactly `value`.
    Equals(String, String),
}

/// [§ 4.2 Compound selectors](https://www.w3.org/TR/selectors-4/#compound)
///
/// Simultaneous conditions on a single element, e.g. `*[align]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompoundSelector {
    /// The simple selectors that must all match.
    pub simple_selectors: Vec<SimpleSelector>,
}

/// [§ 16 Combinators](https://www.w3.org/TR/selectors-4/#combinators)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Combinator {
    /// Whitespace: `A B` matches a `B` anywhere under an `A`.
    Descendant,
    /// `>`: `A > B` matches a `B` whose parent is an `A`.
    Child,
}

/// A parsed selector ready for matching.
///
/// The combinator chain is stored right-to-left from the subject, so
/// matching walks up the tree: for `h1 > b`, `subject` is `b` and the
/// chain is `[(Child, h1)]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
    /// The rightmost compound selector (the subject).
    pub subject: CompoundSelector,
    /// `(combinator, compound)` pairs going left from the subject.
    pub combinators: Vec<(Combinator, CompoundSelector)>,
}

impl Selector {
    /// Match this selector against an element with full tree context.
    #[must_use]
    pub fn matches_in_tree(&self, tree: &FragmentTree, node_id: NodeId) -> bool {
        if !compound_matches(&self.subject, tree, node_id) {
            return false;
        }
        let mut current_id = node_id;
        for (combinator, compound) in &self.combinators {
            match combinator {
                Combinator::Descendant => {
                    let matched = tree
                        .ancestors(current_id)
                        .find(|&ancestor_id| compound_matches(compound, tree, ancestor_id));
                    match matched {
                        Some(ancestor_id) => current_id = ancestor_id,
                        None => return false,
                    }
                }
                Combinator::Child => {
                    let Some(parent_id) = tree.parent(current_id) else {
                        return false;
                    };
                    if !compound_matches(compound, tree, parent_id) {
                        return false;
                    }
                    current_id = parent_id;
                }
            }
        }
        true
    }
}

/// Check if a compound selector matches the element at `node_id`.
fn compound_matches(compound: &CompoundSelector, tree: &FragmentTree, node_id: NodeId) -> bool {
    let Some(element) = tree.as_element(node_id) else {
        return false;
    };
    compound
        .simple_selectors
        .iter()
        .all(|simple| simple.matches(element))
}

impl SimpleSelector {
    /// Check if this simple selector matches the given element.
    #[must_use]
    pub fn matches(&self, element: &ElementData) -> bool {
        match self {
            Self::Type(name) => element.tag_name.eq_ignore_ascii_case(name),
            Self::Universal => true,
            Self::Attribute(attr_sel) => match attr_sel {
                AttributeSelector::Exists(name) => element.has_attr(name),
                AttributeSelector::Equals(name, val) => {
                    element.attr(name).is_some_and(|v| v == val)
                }
            },
        }
    }
}

/// All elements matching `selector`, in document order.
#[must_use]
pub fn query(tree: &FragmentTree, selector: &Selector) -> Vec<NodeId> {
    tree.descendants(tree.root())
        .filter(|&id| selector.matches_in_tree(tree, id))
        .collect()
}

/// Check if a character can start an identifier.
/// [§ 4.3.10 ident-start code point](https://www.w3.org/TR/css-syntax-3/#ident-start-code-point)
const fn is_ident_start_char(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

/// Check if a character can continue an identifier.
/// [§ 4.3.9 ident code point](https://www.w3.org/TR/css-syntax-3/#ident-code-point)
const fn is_ident_char(c: char) -> bool {
    is_ident_start_char(c) || c.is_ascii_digit() || c == '-'
}

/// Parse an attribute value inside `[attr=value]`.
/// Handles quoted (`"val"`, `'val'`) and unquoted ident values.
fn parse_attr_value(
    chars: &mut std::iter::Peekable<std::str::Chars<'_>>,
) -> Result<String, SelectorError> {
    while chars.peek().is_some_and(|&ch| ch.is_ascii_whitespace()) {
        let _ = chars.next();
    }
    match chars.peek() {
        Some(&q @ ('"' | '\'')) => {
            let _ = chars.next();
            let mut val = String::new();
            for ch in chars.by_ref() {
                if ch == q {
                    return Ok(val);
                }
                val.push(ch);
            }
            Err(SelectorError::UnterminatedAttribute)
        }
        Some(_) => {
            let mut val = String::new();
            while let Some(&ch) = chars.peek() {
                if !is_ident_char(ch) {
                    break;
                }
                val.push(ch);
                let _ = chars.next();
            }
            if val.is_empty() {
                Err(SelectorError::MissingAttributeValue)
            } else {
                Ok(val)
            }
        }
        None => Err(SelectorError::MissingAttributeValue),
    }
}

/// Parse a raw selector string into a [`Selector`].
///
/// # Errors
///
/// Returns a [`SelectorError`] when the text is empty, uses syntax outside
/// the supported subset, or leaves a combinator or attribute selector
/// unterminated.
pub fn parse_selector(raw: &str) -> Result<Selector, SelectorError> {
    /// Flush the current identifier as a type selector into the compound.
    fn flush_ident(ident: &mut String, compound: &mut Vec<SimpleSelector>) {
        if !ident.is_empty() {
            compound.push(SimpleSelector::Type(std::mem::take(ident)));
        }
    }

    /// Flush the current compound selector into the compounds list.
    /// Returns true if a non-empty compound was flushed.
    fn flush_compound(
        ident: &mut String,
        compound: &mut Vec<SimpleSelector>,
        compounds: &mut Vec<CompoundSelector>,
    ) -> bool {
        flush_ident(ident, compound);
        if compound.is_empty() {
            return false;
        }
        compounds.push(CompoundSelector {
            simple_selectors: std::mem::take(compound),
        });
        true
    }

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(SelectorError::Empty);
    }

    let mut compounds: Vec<CompoundSelector> = Vec::new();
    let mut combinators_between: Vec<Combinator> = Vec::new();

    let mut chars = trimmed.chars().peekable();
    let mut current_compound = Vec::new();
    let mut current_ident = String::new();

    while let Some(c) = chars.next() {
        match c {
            '*' => {
                flush_ident(&mut current_ident, &mut current_compound);
                current_compound.push(SimpleSelector::Universal);
            }

            // Whitespace may be the descendant combinator; an explicit `>`
            // may also follow it.
            ' ' | '\t' | '\n' | '\r' => {
                while chars.peek().is_some_and(|&ch| ch.is_ascii_whitespace()) {
                    let _ = chars.next();
                }
                match chars.peek() {
                    // Trailing whitespace only (`trim` leaves none, but the
                    // loop can land here after consuming a run).
                    None => {
                        let _ = flush_compound(
                            &mut current_ident,
                            &mut current_compound,
                            &mut compounds,
                        );
                    }
                    // Explicit combinator follows; its own arm flushes.
                    Some('>') => {
                        flush_ident(&mut current_ident, &mut current_compound);
                    }
                    Some(_) => {
                        if !flush_compound(
                            &mut current_ident,
                            &mut current_compound,
                            &mut compounds,
                        ) {
                            continue;
                        }
                        combinators_between.push(Combinator::Descendant);
                    }
                }
            }

            '>' => {
                if !flush_compound(&mut current_ident, &mut current_compound, &mut compounds) {
                    return Err(SelectorError::DanglingCombinator);
                }
                while chars.peek().is_some_and(|&ch| ch.is_ascii_whitespace()) {
                    let _ = chars.next();
                }
                combinators_between.push(Combinator::Child);
            }

            '[' => {
                flush_ident(&mut current_ident, &mut current_compound);

                while chars.peek().is_some_and(|&ch| ch.is_ascii_whitespace()) {
                    let _ = chars.next();
                }
                let mut attr_name = String::new();
                while let Some(&ch) = chars.peek() {
                    if !is_ident_char(ch) {
                        break;
                    }
                    attr_name.push(ch);
                    let _ = chars.next();
                }
                if attr_name.is_empty() {
                    return Err(SelectorError::UnterminatedAttribute);
                }
                while chars.peek().is_some_and(|&ch| ch.is_ascii_whitespace()) {
                    let _ = chars.next();
                }

                match chars.next() {
                    Some(']') => {
                        current_compound
                            .push(SimpleSelector::Attribute(AttributeSelector::Exists(attr_name)));
                    }
                    Some('=') => {
                        let val = parse_attr_value(&mut chars)?;
                        while chars.peek().is_some_and(|&ch| ch.is_ascii_whitespace()) {
                            let _ = chars.next();
                        }
                        if chars.next() != Some(']') {
                            return Err(SelectorError::UnterminatedAttribute);
                        }
                        current_compound.push(SimpleSelector::Attribute(
                            AttributeSelector::Equals(attr_name, val),
                        ));
                    }
                    Some(other) => return Err(SelectorError::UnexpectedChar(other)),
                    None => return Err(SelectorError::UnterminatedAttribute),
                }
            }

            _ if current_ident.is_empty() && (is_ident_start_char(c) || c == '-') => {
                current_ident.push(c);
            }
            _ if !current_ident.is_empty() && is_ident_char(c) => {
                current_ident.push(c);
            }

            _ => return Err(SelectorError::UnexpectedChar(c)),
        }
    }

    let _ = flush_compound(&mut current_ident, &mut current_compound, &mut compounds);

    if compounds.is_empty() {
        return Err(SelectorError::Empty);
    }
    // For "A > B C" there is exactly one more compound than combinators.
    if compounds.len() != combinators_between.len() + 1 {
        return Err(SelectorError::TrailingCombinator);
    }

    let subject = compounds.pop().ok_or(SelectorError::Empty)?;

    // Reverse into right-to-left order so matching walks up from the subject.
    let mut combinator_chain = Vec::new();
    for (compound, combinator) in compounds
        .into_iter()
        .zip(combinators_between.into_iter())
        .rev()
    {
        combinator_chain.push((combinator, compound));
    }

    Ok(Selector {
        subject,
        combinators: combinator_chain,
    })
}
