//! HTML tokenizer, fragment tree builder, and serializer for the scrub
//! pipeline.
//!
//! # Scope
//!
//! This crate implements:
//! - **HTML Tokenizer** ([WHATWG § 13.2.5](https://html.spec.whatwg.org/multipage/parsing.html#tokenization))
//!   - Data, tag, attribute, comment, CDATA, and RAWTEXT states
//!   - Numeric character references (with the Windows-1252 remapping) and a
//!     curated named-entity table
//!   - Silent error recovery: malformed markup degrades to text or comments,
//!     never to a failure
//! - **Fragment Tree Builder** ([WHATWG § 13.2.6](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction))
//!   - Single stack of open elements, no html/head/body synthesis
//!   - Void and self-closing tags, stray end tags ignored, implicit `</p>`
//!     before block-level start tags, silent close at EOF
//! - **Serializer** ([WHATWG § 13.3](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments))
//!
//! # Not Implemented
//!
//! - DOCTYPE tokens (a doctype in a fragment is consumed and dropped)
//! - RCDATA (`title`/`textarea`) and script double-escape states
//! - Nested `<!--` bookkeeping inside comments
//! - The full 2,231-entry named entity table
//! - Table fixup, foster parenting, the adoption agency algorithm

/// Fragment tree construction.
pub mod parser;
/// Serialization back to HTML text.
pub mod serializer;
/// HTML tokenization.
pub mod tokenizer;

pub use parser::FragmentParser;
pub use serializer::serialize_fragment;
pub use tokenizer::{Token, Tokenizer};

use scrub_dom::FragmentTree;

/// [§ 13.1.2 Elements — void elements](https://html.spec.whatwg.org/multipage/syntax.html#void-elements)
///
/// Elements with no content and no end tag. They never go on the stack of
/// open elements and serialize without a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// [§ 13.1.2 Elements — raw text elements](https://html.spec.whatwg.org/multipage/syntax.html#raw-text-elements)
///
/// Elements whose content is tokenized as raw text (no tags, no character
/// references) and serialized without escaping.
pub const RAW_TEXT_ELEMENTS: &[&str] = &["script", "style"];

/// [§ 13.2.6.4.7 The "in body" insertion mode](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
///
/// Start tags that close an open `p` element ("If the stack of open elements
/// has a p element in button scope, then close a p element").
pub const P_CLOSING_TAGS: &[&str] = &[
    "address",
    "article",
    "aside",
    "blockquote",
    "details",
    "div",
    "dl",
    "fieldset",
    "figcaption",
    "figure",
    "footer",
    "form",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
    "header",
    "hr",
    "main",
    "nav",
    "ol",
    "p",
    "pre",
    "section",
    "table",
    "ul",
];

/// Parse an HTML fragment into a tree.
///
/// This is the main entry point for the parse half of the pipeline: it runs
/// the tokenizer and the tree builder. Malformed input is repaired or
/// dropped by the recovery rules, never surfaced as an error.
#[must_use]
pub fn parse_fragment(html: &str) -> FragmentTree {
    let mut tokenizer = Tokenizer::new(html);
    tokenizer.run();
    let parser = FragmentParser::new(tokenizer.into_tokens());
    parser.run()
}
