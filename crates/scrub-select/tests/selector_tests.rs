//! Integration tests for selector parsing and matching.

use scrub_dom::{Attribute, ElementData, FragmentTree, NodeId, NodeType};
use scrub_select::{
    AttributeSelector, Combinator, SelectorError, SimpleSelector, parse_selector, query,
};

fn make_element(tree: &mut FragmentTree, tag: &str, attrs: &[(&str, &str)]) -> NodeId {
    let attrs = attrs
        .iter()
        .map(|(name, value)| Attribute::new((*name).to_string(), (*value).to_string()))
        .collect();
    tree.alloc(NodeType::Element(ElementData::new(tag.to_string(), attrs)))
}

// ========== parsing ==========

#[test]
fn test_parse_type_selector() {
    let selector = parse_selector("span").unwrap();
    assert!(selector.combinators.is_empty());
    assert_eq!(selector.subject.simple_selectors.len(), 1);
    assert!(matches!(
        &selector.subject.simple_selectors[0],
        SimpleSelector::Type(name) if name == "span"
    ));
}

#[test]
fn test_parse_universal_with_attribute() {
    let selector = parse_selector("*[align]").unwrap();
    assert_eq!(selector.subject.simple_selectors.len(), 2);
    assert!(matches!(
        &selector.subject.simple_selectors[0],
        SimpleSelector::Universal
    ));
    assert!(matches!(
        &selector.subject.simple_selectors[1],
        SimpleSelector::Attribute(AttributeSelector::Exists(name)) if name == "align"
    ));
}

#[test]
fn test_parse_attribute_equals_unquoted() {
    let selector = parse_selector("*[class=western]").unwrap();
    assert!(matches!(
        &selector.subject.simple_selectors[1],
        SimpleSelector::Attribute(AttributeSelector::Equals(name, value))
            if name == "class" && value == "western"
    ));
}

#[test]
fn test_parse_attribute_equals_quoted() {
    let single = parse_selector("*[class='western']").unwrap();
    let double = parse_selector("*[class=\"western\"]").unwrap();
    assert_eq!(single, double);
}

#[test]
fn test_parse_child_combinator() {
    let selector = parse_selector("p > br").unwrap();
    assert!(matches!(
        &selector.subject.simple_selectors[0],
        SimpleSelector::Type(name) if name == "br"
    ));
    assert_eq!(selector.combinators.len(), 1);
    let (combinator, compound) = &selector.combinators[0];
    assert_eq!(*combinator, Combinator::Child);
    assert!(matches!(
        &compound.simple_selectors[0],
        SimpleSelector::Type(name) if name == "p"
    ));
}

#[test]
fn test_parse_descendant_combinator() {
    let selector = parse_selector("h1 b").unwrap();
    assert_eq!(selector.combinators.len(), 1);
    assert_eq!(selector.combinators[0].0, Combinator::Descendant);
}

#[test]
fn test_parse_errors() {
    assert_eq!(parse_selector(""), Err(SelectorError::Empty));
    assert_eq!(parse_selector("   "), Err(SelectorError::Empty));
    assert_eq!(parse_selector("> p"), Err(SelectorError::DanglingCombinator));
    assert_eq!(parse_selector("p >"), Err(SelectorError::TrailingCombinator));
    assert_eq!(
        parse_selector("*[align"),
        Err(SelectorError::UnterminatedAttribute)
    );
    assert_eq!(
        parse_selector("p.western"),
        Err(SelectorError::UnexpectedChar('.'))
    );
}

// ========== matching ==========

#[test]
fn test_query_type_in_document_order() {
    let mut tree = FragmentTree::new();
    let div = make_element(&mut tree, "div", &[]);
    tree.append_child(NodeId::ROOT, div);
    let first = make_element(&mut tree, "span", &[]);
    tree.append_child(div, first);
    let second = make_element(&mut tree, "span", &[]);
    tree.append_child(first, second);
    let third = make_element(&mut tree, "span", &[]);
    tree.append_child(NodeId::ROOT, third);

    let selector = parse_selector("span").unwrap();
    assert_eq!(query(&tree, &selector), vec![first, second, third]);
}

#[test]
fn test_query_attribute_presence() {
    let mut tree = FragmentTree::new();
    let with = make_element(&mut tree, "p", &[("align", "center")]);
    let without = make_element(&mut tree, "p", &[]);
    tree.append_child(NodeId::ROOT, with);
    tree.append_child(NodeId::ROOT, without);

    let selector = parse_selector("*[align]").unwrap();
    assert_eq!(query(&tree, &selector), vec![with]);
}

#[test]
fn test_query_attribute_value_is_exact() {
    let mut tree = FragmentTree::new();
    let western = make_element(&mut tree, "p", &[("class", "western")]);
    let other = make_element(&mut tree, "p", &[("class", "western wide")]);
    tree.append_child(NodeId::ROOT, western);
    tree.append_child(NodeId::ROOT, other);

    let selector = parse_selector("*[class=western]").unwrap();
    assert_eq!(query(&tree, &selector), vec![western]);
}

#[test]
fn test_child_combinator_requires_direct_parent() {
    let mut tree = FragmentTree::new();
    let p = make_element(&mut tree, "p", &[]);
    tree.append_child(NodeId::ROOT, p);
    let direct = make_element(&mut tree, "br", &[]);
    tree.append_child(p, direct);
    let em = make_element(&mut tree, "em", &[]);
    tree.append_child(p, em);
    let nested = make_element(&mut tree, "br", &[]);
    tree.append_child(em, nested);

    let selector = parse_selector("p > br").unwrap();
    assert_eq!(query(&tree, &selector), vec![direct]);
}

#[test]
fn test_descendant_combinator_matches_any_depth() {
    let mut tree = FragmentTree::new();
    let h1 = make_element(&mut tree, "h1", &[]);
    tree.append_child(NodeId::ROOT, h1);
    let em = make_element(&mut tree, "em", &[]);
    tree.append_child(h1, em);
    let b = make_element(&mut tree, "b", &[]);
    tree.append_child(em, b);

    let selector = parse_selector("h1 b").unwrap();
    assert_eq!(query(&tree, &selector), vec![b]);
}

#[test]
fn test_tag_match_is_ascii_case_insensitive() {
    let mut tree = FragmentTree::new();
    let span = make_element(&mut tree, "span", &[]);
    tree.append_child(NodeId::ROOT, span);

    let selector = parse_selector("SPAN").unwrap();
    assert_eq!(query(&tree, &selector), vec![span]);
}

#[test]
fn test_no_match_is_empty_not_error() {
    let tree = FragmentTree::new();
    let selector = parse_selector("font").unwrap();
    assert!(query(&tree, &selector).is_empty());
}
