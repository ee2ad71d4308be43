//! Fragment serialization back to HTML text.
//!
//! [§ 13.3 Serializing HTML fragments](https://html.spec.whatwg.org/multipage/parsing.html#serialising-html-fragments)
//!
//! Text nodes escape `&`, `<` and `>`; attribute values escape `&` and `"`;
//! void elements serialize without an end tag; `script`/`style` content is
//! emitted raw. Inserted typographic characters (no-break spaces, curly
//! quotes) are emitted as raw UTF-8, not entity-encoded.

use scrub_dom::{FragmentTree, NodeId, NodeType};

use crate::{RAW_TEXT_ELEMENTS, VOID_ELEMENTS};

/// Serialize the whole fragment to HTML text.
#[must_use]
pub fn serialize_fragment(tree: &FragmentTree) -> String {
    let mut out = String::new();
    for &child in tree.children(tree.root()) {
        serialize_node(tree, child, &mut out);
    }
    out
}

fn serialize_node(tree: &FragmentTree, id: NodeId, out: &mut String) {
    let Some(node) = tree.get(id) else {
        return;
    };
    match &node.node_type {
        NodeType::Fragment => {
            for &child in tree.children(id) {
                serialize_node(tree, child, out);
            }
        }
        NodeType::Text(data) => {
            if parent_is_raw_text(tree, id) {
                out.push_str(data);
            } else {
                escape_text(data, out);
            }
        }
        NodeType::Cdata(data) => {
            out.push_str("<![CDATA[");
            out.push_str(data);
            out.push_str("]]>");
        }
        NodeType::Comment(data) => {
            out.push_str("<!--");
            out.push_str(data);
            out.push_str("-->");
        }
        NodeType::Element(data) => {
            out.push('<');
            out.push_str(&data.tag_name);
            for attr in &data.attrs {
                // Error recovery can leave an attribute with an empty name
                // (e.g. a stray `=` in a tag); it is not serializable.
                if attr.name.is_empty() {
                    continue;
                }
                out.push(' ');
                out.push_str(&attr.name);
                out.push_str("=\"");
                escape_attribute_value(&attr.value, out);
                out.push('"');
            }
            out.push('>');
            if VOID_ELEMENTS.contains(&data.tag_name.as_str()) {
                return;
            }
            for &child in tree.children(id) {
                serialize_node(tree, child, out);
            }
            out.push_str("</");
            out.push_str(&data.tag_name);
            out.push('>');
        }
    }
}

/// "If the parent of current node is a style, script, ... element, then
/// append the value of current node's data IDL attribute literally."
fn parent_is_raw_text(tree: &FragmentTree, id: NodeId) -> bool {
    tree.parent(id)
        .and_then(|p| tree.as_element(p))
        .is_some_and(|data| RAW_TEXT_ELEMENTS.contains(&data.tag_name.as_str()))
}

/// [§ 13.3](https://html.spec.whatwg.org/multipage/parsing.html#escapingString)
/// Escape a text node for serialization.
fn escape_text(data: &str, out: &mut String) {
    for c in data.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(c),
        }
    }
}

/// Escape an attribute value for serialization ("attribute mode").
fn escape_attribute_value(data: &str, out: &mut String) {
    for c in data.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
}
