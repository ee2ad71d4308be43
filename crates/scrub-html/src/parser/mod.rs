//! Fragment tree construction.
//!
//! [§ 13.2.6 Tree construction](https://html.spec.whatwg.org/multipage/parsing.html#tree-construction)
//!
//! A fragment has no document element, so the full insertion-mode machine
//! collapses to a single stack of open elements rooted at the fragment
//! root. Error recovery is silent: stray end tags are ignored, unclosed
//! elements are closed at EOF, and a new block-level start tag implicitly
//! closes an open `p`.

use scrub_dom::{Attribute, ElementData, FragmentTree, NodeId, NodeType};

use crate::tokenizer::Token;
use crate::{P_CLOSING_TAGS, VOID_ELEMENTS};

/// Builds a [`FragmentTree`] from a token stream.
pub struct FragmentParser {
    /// [§ 13.2.4.2 The stack of open elements](https://html.spec.whatwg.org/multipage/parsing.html#the-stack-of-open-elements)
    ///
    /// Stores `NodeId`s into the arena; the fragment root is the implicit
    /// bottom of the stack.
    open_elements: Vec<NodeId>,

    /// The tree under construction. `NodeId::ROOT` is the fragment root.
    tree: FragmentTree,

    /// Input tokens from the tokenizer.
    tokens: Vec<Token>,

    /// Consecutive character tokens, coalesced into one text node when a
    /// non-character token arrives.
    text_buffer: String,
}

impl FragmentParser {
    /// Create a new parser from a token stream.
    #[must_use]
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            open_elements: Vec::new(),
            tree: FragmentTree::new(),
            tokens,
            text_buffer: String::new(),
        }
    }

    /// Run the parser and return the fragment tree.
    #[must_use]
    pub fn run(mut self) -> FragmentTree {
        let tokens = std::mem::take(&mut self.tokens);
        for token in tokens {
            self.process_token(token);
        }
        // Defensive close in case the stream lacked an EndOfFile token.
        self.flush_text();
        self.open_elements.clear();
        self.tree
    }

    /// The current insertion point: the innermost open element, or the
    /// fragment root.
    fn current_parent(&self) -> NodeId {
        self.open_elements.last().copied().unwrap_or(NodeId::ROOT)
    }

    /// Turn buffered character tokens into a text node.
    fn flush_text(&mut self) {
        if self.text_buffer.is_empty() {
            return;
        }
        let data = std::mem::take(&mut self.text_buffer);
        let parent = self.current_parent();
        let id = self.tree.alloc(NodeType::Text(data));
        self.tree.append_child(parent, id);
    }

    /// True if an element with this tag name is somewhere on the stack.
    fn has_open_element(&self, name: &str) -> bool {
        self.open_elements
            .iter()
            .any(|&id| self.tree.tag_name(id) == Some(name))
    }

    /// Pop open elements until an element with this tag name has been
    /// popped. Elements left open above it are implicitly closed.
    fn pop_until_popped(&mut self, name: &str) {
        while let Some(id) = self.open_elements.pop() {
            if self.tree.tag_name(id) == Some(name) {
                break;
            }
        }
    }

    fn process_token(&mut self, token: Token) {
        match token {
            Token::Character { data } => {
                self.text_buffer.push(data);
            }
            Token::StartTag {
                name,
                self_closing,
                attributes,
            } => {
                self.flush_text();
                self.insert_element(&name, self_closing, attributes);
            }
            Token::EndTag { name, .. } => {
                self.flush_text();
                // "An end tag whose tag name does not match an element in
                // the stack of open elements" is a parse error; ignore it.
                if self.has_open_element(&name) {
                    self.pop_until_popped(&name);
                }
            }
            Token::Comment { data } => {
                self.flush_text();
                let parent = self.current_parent();
                let id = self.tree.alloc(NodeType::Comment(data));
                self.tree.append_child(parent, id);
            }
            Token::Cdata { data } => {
                self.flush_text();
                let parent = self.current_parent();
                let id = self.tree.alloc(NodeType::Cdata(data));
                self.tree.append_child(parent, id);
            }
            Token::EndOfFile => {
                self.flush_text();
                self.open_elements.clear();
            }
        }
    }

    fn insert_element(&mut self, name: &str, self_closing: bool, attributes: Vec<Attribute>) {
        // [§ 13.2.6.4.7 "in body"](https://html.spec.whatwg.org/multipage/parsing.html#parsing-main-inbody)
        // "If the stack of open elements has a p element in button scope,
        // then close a p element." Reduced to: a block-level start tag
        // closes an open paragraph.
        if P_CLOSING_TAGS.contains(&name) && self.has_open_element("p") {
            self.pop_until_popped("p");
        }

        let parent = self.current_parent();
        let id = self.tree.alloc(NodeType::Element(ElementData::new(
            name.to_string(),
            attributes,
        )));
        self.tree.append_child(parent, id);

        if !self_closing && !VOID_ELEMENTS.contains(&name) {
            self.open_elements.push(id);
        }
    }
}
