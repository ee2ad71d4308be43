//! Integration tests for the fragment tree builder.

use scrub_dom::{FragmentTree, NodeId, NodeType};
use scrub_html::parse_fragment;

/// Helper to get the first element with this tag name, depth-first.
fn find_element(tree: &FragmentTree, from: NodeId, tag: &str) -> Option<NodeId> {
    if tree.tag_name(from) == Some(tag) {
        return Some(from);
    }
    for &child_id in tree.children(from) {
        if let Some(found) = find_element(tree, child_id, tag) {
            return Some(found);
        }
    }
    None
}

/// Helper listing the tag names of a node's element children.
fn child_tags(tree: &FragmentTree, id: NodeId) -> Vec<String> {
    tree.children(id)
        .iter()
        .filter_map(|&c| tree.tag_name(c).map(str::to_string))
        .collect()
}

#[test]
fn test_top_level_nodes_under_fragment_root() {
    let tree = parse_fragment("Hello <b>world</b>");
    let root_children = tree.children(NodeId::ROOT);
    assert_eq!(root_children.len(), 2);
    assert_eq!(tree.as_text(root_children[0]), Some("Hello "));
    assert_eq!(tree.tag_name(root_children[1]), Some("b"));
    assert_eq!(tree.text_content(NodeId::ROOT), "Hello world");
}

#[test]
fn test_nested_elements() {
    let tree = parse_fragment("<div><p>Text</p></div>");
    let div = find_element(&tree, NodeId::ROOT, "div").unwrap();
    let p = find_element(&tree, div, "p").unwrap();
    assert_eq!(tree.text_content(p), "Text");
}

#[test]
fn test_attributes_preserved_in_order() {
    let tree = parse_fragment(r#"<p align="center" style="color:red" lang="fr">Hi</p>"#);
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    let data = tree.as_element(p).unwrap();
    let names: Vec<&str> = data.attrs.iter().map(|a| a.name.as_str()).collect();
    assert_eq!(names, vec!["align", "style", "lang"]);
    assert_eq!(data.attr("style"), Some("color:red"));
}

#[test]
fn test_void_element_takes_no_children() {
    let tree = parse_fragment("<p>a<br>b</p>");
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    assert_eq!(tree.children(p).len(), 3);
    let br = find_element(&tree, p, "br").unwrap();
    assert_eq!(tree.children(br).len(), 0);
    assert_eq!(tree.text_content(p), "ab");
}

#[test]
fn test_new_paragraph_implicitly_closes_open_one() {
    let tree = parse_fragment("<p>one<p>two");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["p", "p"]);
    let root_children = tree.children(NodeId::ROOT);
    assert_eq!(tree.text_content(root_children[0]), "one");
    assert_eq!(tree.text_content(root_children[1]), "two");
}

#[test]
fn test_block_start_tag_closes_open_paragraph() {
    let tree = parse_fragment("<p>intro<div>body</div>");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["p", "div"]);
}

#[test]
fn test_inline_start_tag_does_not_close_paragraph() {
    let tree = parse_fragment("<p>a<span>b</span></p>");
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    let span = find_element(&tree, NodeId::ROOT, "span").unwrap();
    assert_eq!(tree.parent(span), Some(p));
}

#[test]
fn test_stray_end_tag_is_ignored() {
    let tree = parse_fragment("</div><p>x</p>");
    assert_eq!(child_tags(&tree, NodeId::ROOT), vec!["p"]);
}

#[test]
fn test_unclosed_elements_closed_at_eof() {
    let tree = parse_fragment("<p><b>bold");
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    let b = find_element(&tree, p, "b").unwrap();
    assert_eq!(tree.text_content(b), "bold");
}

#[test]
fn test_end_tag_closes_inner_elements_too() {
    let tree = parse_fragment("<div><p>a</div>after");
    let div = find_element(&tree, NodeId::ROOT, "div").unwrap();
    // "after" lands at the fragment root, not inside div or p.
    let root_children = tree.children(NodeId::ROOT);
    assert_eq!(root_children.len(), 2);
    assert_eq!(tree.as_text(root_children[1]), Some("after"));
    assert_eq!(tree.text_content(div), "a");
}

#[test]
fn test_comment_node_preserved() {
    let tree = parse_fragment("<p>a<!-- note -->b</p>");
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    let has_comment = tree.children(p).iter().any(|&c| {
        matches!(
            tree.get(c).map(|n| &n.node_type),
            Some(NodeType::Comment(data)) if data == " note "
        )
    });
    assert!(has_comment);
    assert_eq!(tree.text_content(p), "ab");
}

#[test]
fn test_cdata_node_preserved() {
    let tree = parse_fragment("<p><![CDATA[x & y]]></p>");
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    let cdata = tree.children(p)[0];
    assert!(matches!(
        tree.get(cdata).map(|n| &n.node_type),
        Some(NodeType::Cdata(data)) if data == "x & y"
    ));
    assert_eq!(tree.text_content(p), "x & y");
}

#[test]
fn test_character_references_decoded_into_text() {
    let tree = parse_fragment("<p>caf&eacute; &amp; th&#233;</p>");
    let p = find_element(&tree, NodeId::ROOT, "p").unwrap();
    assert_eq!(tree.text_content(p), "caf\u{e9} & th\u{e9}");
}

#[test]
fn test_self_closing_span_does_not_swallow_siblings() {
    let tree = parse_fragment("<span/>text");
    let root_children = tree.children(NodeId::ROOT);
    assert_eq!(root_children.len(), 2);
    assert_eq!(tree.as_text(root_children[1]), Some("text"));
}
