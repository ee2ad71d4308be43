//! Tests for fragment tree mutation primitives: remove, insert_before,
//! unwrap, rename, remove_attribute.

use scrub_dom::{Attribute, ElementData, FragmentTree, NodeId, NodeType};

/// Helper to create an element node and return its NodeId.
fn alloc_element(tree: &mut FragmentTree, tag: &str) -> NodeId {
    tree.alloc(NodeType::Element(ElementData::new(
        tag.to_string(),
        Vec::new(),
    )))
}

/// Helper to create a text node and return its NodeId.
fn alloc_text(tree: &mut FragmentTree, data: &str) -> NodeId {
    tree.alloc(NodeType::Text(data.to_string()))
}

// ========== remove ==========

#[test]
fn test_remove_single_child() {
    let mut tree = FragmentTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let child = alloc_element(&mut tree, "p");
    tree.append_child(parent, child);

    assert_eq!(tree.children(parent).len(), 1);

    tree.remove(child);

    assert_eq!(tree.children(parent).len(), 0);
    assert_eq!(tree.parent(child), None);
}

#[test]
fn test_remove_middle_of_three_preserves_order() {
    let mut tree = FragmentTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "em");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    tree.remove(b);

    assert_eq!(tree.children(parent), &[a, c]);
}

#[test]
fn test_remove_detached_is_noop() {
    let mut tree = FragmentTree::new();
    let orphan = alloc_element(&mut tree, "p");

    tree.remove(orphan);

    assert_eq!(tree.parent(orphan), None);
}

#[test]
fn test_remove_root_is_noop() {
    let mut tree = FragmentTree::new();
    let child = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, child);

    tree.remove(NodeId::ROOT);

    assert_eq!(tree.children(NodeId::ROOT), &[child]);
}

// ========== insert_before ==========

#[test]
fn test_insert_before_first_child() {
    let mut tree = FragmentTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let existing = alloc_element(&mut tree, "b");
    tree.append_child(parent, existing);

    let new_child = alloc_element(&mut tree, "a");
    tree.insert_before(new_child, existing);

    assert_eq!(tree.children(parent), &[new_child, existing]);
    assert_eq!(tree.parent(new_child), Some(parent));
}

#[test]
fn test_insert_before_middle() {
    let mut tree = FragmentTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let c = alloc_element(&mut tree, "em");
    tree.append_child(parent, a);
    tree.append_child(parent, c);

    let b = alloc_element(&mut tree, "b");
    tree.insert_before(b, c);

    assert_eq!(tree.children(parent), &[a, b, c]);
}

#[test]
fn test_insert_before_moves_attached_node() {
    let mut tree = FragmentTree::new();
    let parent = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, parent);

    let a = alloc_element(&mut tree, "a");
    let b = alloc_element(&mut tree, "b");
    let c = alloc_element(&mut tree, "em");
    tree.append_child(parent, a);
    tree.append_child(parent, b);
    tree.append_child(parent, c);

    // Moving c before a must detach c from its old position first.
    tree.insert_before(c, a);

    assert_eq!(tree.children(parent), &[c, a, b]);
    assert_eq!(tree.parent(c), Some(parent));
}

#[test]
fn test_insert_before_detached_reference_is_noop() {
    let mut tree = FragmentTree::new();
    let orphan = alloc_element(&mut tree, "p");
    let new_child = alloc_element(&mut tree, "a");

    tree.insert_before(new_child, orphan);

    assert_eq!(tree.parent(new_child), None);
}

// ========== unwrap ==========

#[test]
fn test_unwrap_promotes_children_in_place() {
    let mut tree = FragmentTree::new();
    let p = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, p);

    let before = alloc_text(&mut tree, "before ");
    let span = alloc_element(&mut tree, "span");
    let after = alloc_text(&mut tree, " after");
    tree.append_child(p, before);
    tree.append_child(p, span);
    tree.append_child(p, after);

    let inner_a = alloc_text(&mut tree, "one");
    let inner_b = alloc_element(&mut tree, "em");
    tree.append_child(span, inner_a);
    tree.append_child(span, inner_b);

    tree.unwrap(span);

    assert_eq!(tree.children(p), &[before, inner_a, inner_b, after]);
    assert_eq!(tree.parent(inner_a), Some(p));
    assert_eq!(tree.parent(inner_b), Some(p));
    assert_eq!(tree.parent(span), None);
    assert_eq!(tree.children(span).len(), 0);
}

#[test]
fn test_unwrap_empty_element_just_removes_it() {
    let mut tree = FragmentTree::new();
    let p = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, p);

    let span = alloc_element(&mut tree, "span");
    tree.append_child(p, span);

    tree.unwrap(span);

    assert_eq!(tree.children(p).len(), 0);
}

#[test]
fn test_unwrap_preserves_text_content() {
    let mut tree = FragmentTree::new();
    let p = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, p);

    let span = alloc_element(&mut tree, "span");
    tree.append_child(p, span);
    let text = alloc_text(&mut tree, "Hello");
    tree.append_child(span, text);

    let before = tree.text_content(NodeId::ROOT);
    tree.unwrap(span);
    let after = tree.text_content(NodeId::ROOT);

    assert_eq!(before, after);
    assert_eq!(after, "Hello");
}

#[test]
fn test_unwrap_detached_is_noop() {
    let mut tree = FragmentTree::new();
    let orphan = alloc_element(&mut tree, "span");
    let text = alloc_text(&mut tree, "x");
    tree.append_child(orphan, text);

    tree.unwrap(orphan);

    assert_eq!(tree.children(orphan), &[text]);
}

// ========== rename ==========

#[test]
fn test_rename_keeps_attributes_and_children() {
    let mut tree = FragmentTree::new();
    let i = tree.alloc(NodeType::Element(ElementData::new(
        "i".to_string(),
        vec![Attribute::new("title".to_string(), "note".to_string())],
    )));
    tree.append_child(NodeId::ROOT, i);
    let text = alloc_text(&mut tree, "quoted");
    tree.append_child(i, text);

    tree.rename(i, "q");

    let data = tree.as_element(i).unwrap();
    assert_eq!(data.tag_name, "q");
    assert_eq!(data.attr("title"), Some("note"));
    assert_eq!(tree.children(i), &[text]);
}

#[test]
fn test_rename_non_element_is_noop() {
    let mut tree = FragmentTree::new();
    let text = alloc_text(&mut tree, "plain");
    tree.append_child(NodeId::ROOT, text);

    tree.rename(text, "q");

    assert!(tree.as_element(text).is_none());
}

// ========== remove_attribute ==========

#[test]
fn test_remove_attribute_present() {
    let mut tree = FragmentTree::new();
    let p = tree.alloc(NodeType::Element(ElementData::new(
        "p".to_string(),
        vec![
            Attribute::new("align".to_string(), "center".to_string()),
            Attribute::new("id".to_string(), "intro".to_string()),
        ],
    )));
    tree.append_child(NodeId::ROOT, p);

    assert!(tree.remove_attribute(p, "align"));

    let data = tree.as_element(p).unwrap();
    assert!(!data.has_attr("align"));
    assert_eq!(data.attr("id"), Some("intro"));
}

#[test]
fn test_remove_attribute_absent_is_noop() {
    let mut tree = FragmentTree::new();
    let p = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, p);

    assert!(!tree.remove_attribute(p, "style"));
}

// ========== traversal ==========

#[test]
fn test_descendants_document_order() {
    let mut tree = FragmentTree::new();
    let div = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, div);
    let p1 = alloc_element(&mut tree, "p");
    let p2 = alloc_element(&mut tree, "p");
    tree.append_child(div, p1);
    tree.append_child(div, p2);
    let t1 = alloc_text(&mut tree, "one");
    tree.append_child(p1, t1);

    let order: Vec<NodeId> = tree.descendants(NodeId::ROOT).collect();
    assert_eq!(order, vec![div, p1, t1, p2]);
}

#[test]
fn test_ancestors_walk_to_root() {
    let mut tree = FragmentTree::new();
    let div = alloc_element(&mut tree, "div");
    tree.append_child(NodeId::ROOT, div);
    let p = alloc_element(&mut tree, "p");
    tree.append_child(div, p);

    let chain: Vec<NodeId> = tree.ancestors(p).collect();
    assert_eq!(chain, vec![div, NodeId::ROOT]);
}

#[test]
fn test_text_content_skips_comments() {
    let mut tree = FragmentTree::new();
    let p = alloc_element(&mut tree, "p");
    tree.append_child(NodeId::ROOT, p);
    let t1 = alloc_text(&mut tree, "a");
    let comment = tree.alloc(NodeType::Comment(" hidden ".to_string()));
    let cdata = tree.alloc(NodeType::Cdata("b".to_string()));
    tree.append_child(p, t1);
    tree.append_child(p, comment);
    tree.append_child(p, cdata);

    assert_eq!(tree.text_content(p), "ab");
}
