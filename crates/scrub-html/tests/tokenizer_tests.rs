//! Integration tests for the HTML tokenizer.

use scrub_html::{Token, Tokenizer};

/// Helper to tokenize input and return the token stream.
fn tokenize(input: &str) -> Vec<Token> {
    let mut tokenizer = Tokenizer::new(input);
    tokenizer.run();
    tokenizer.into_tokens()
}

/// Helper to collect the character tokens of a stream into a string.
fn text_of(tokens: &[Token]) -> String {
    tokens
        .iter()
        .filter_map(|t| match t {
            Token::Character { data } => Some(*data),
            _ => None,
        })
        .collect()
}

#[test]
fn test_plain_text() {
    let tokens = tokenize("hello");
    assert_eq!(text_of(&tokens), "hello");
    assert_eq!(tokens.last(), Some(&Token::EndOfFile));
}

#[test]
fn test_start_tag_with_attributes() {
    let tokens = tokenize(r#"<p align="center" style="color:red">"#);
    let Token::StartTag {
        name,
        self_closing,
        attributes,
    } = &tokens[0]
    else {
        panic!("expected start tag, got {:?}", tokens[0]);
    };
    assert_eq!(name, "p");
    assert!(!self_closing);
    assert_eq!(attributes.len(), 2);
    assert_eq!(attributes[0].name, "align");
    assert_eq!(attributes[0].value, "center");
    assert_eq!(attributes[1].name, "style");
    assert_eq!(attributes[1].value, "color:red");
}

#[test]
fn test_tag_and_attribute_names_are_lowercased() {
    let tokens = tokenize("<P ALIGN=CENTER>");
    let Token::StartTag {
        name, attributes, ..
    } = &tokens[0]
    else {
        panic!("expected start tag");
    };
    assert_eq!(name, "p");
    assert_eq!(attributes[0].name, "align");
    // Attribute values keep their case.
    assert_eq!(attributes[0].value, "CENTER");
}

#[test]
fn test_self_closing_tag() {
    let tokens = tokenize("<br/>");
    assert!(matches!(
        &tokens[0],
        Token::StartTag {
            name,
            self_closing: true,
            ..
        } if name == "br"
    ));
}

#[test]
fn test_end_tag() {
    let tokens = tokenize("</p>");
    assert!(matches!(&tokens[0], Token::EndTag { name, .. } if name == "p"));
}

#[test]
fn test_single_quoted_and_unquoted_values() {
    let tokens = tokenize("<p class='western' lang=fr>");
    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected start tag");
    };
    assert_eq!(attributes[0].value, "western");
    assert_eq!(attributes[1].value, "fr");
}

#[test]
fn test_duplicate_attribute_keeps_first() {
    let tokens = tokenize(r#"<p class="a" class="b">"#);
    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected start tag");
    };
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes[0].value, "a");
}

#[test]
fn test_comment() {
    let tokens = tokenize("<!-- a comment -->");
    assert!(matches!(
        &tokens[0],
        Token::Comment { data } if data == " a comment "
    ));
}

#[test]
fn test_cdata_section() {
    let tokens = tokenize("<![CDATA[a < b && c]]>");
    assert!(matches!(
        &tokens[0],
        Token::Cdata { data } if data == "a < b && c"
    ));
}

#[test]
fn test_doctype_is_dropped() {
    let tokens = tokenize("<!DOCTYPE html><p>");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "p"));
}

#[test]
fn test_named_character_reference() {
    assert_eq!(text_of(&tokenize("a &amp; b")), "a & b");
    assert_eq!(text_of(&tokenize("caf&eacute;")), "caf\u{e9}");
}

#[test]
fn test_legacy_reference_without_semicolon() {
    assert_eq!(text_of(&tokenize("a &amp b")), "a & b");
}

#[test]
fn test_unknown_reference_passes_through() {
    assert_eq!(text_of(&tokenize("&xyz;")), "&xyz;");
}

#[test]
fn test_numeric_character_references() {
    assert_eq!(text_of(&tokenize("&#233;")), "\u{e9}");
    assert_eq!(text_of(&tokenize("&#x2026;")), "\u{2026}");
}

#[test]
fn test_windows_1252_numeric_remapping() {
    // Legacy word-processor exports write curly quotes as C1 codes.
    assert_eq!(text_of(&tokenize("&#147;word&#148;")), "\u{201C}word\u{201D}");
}

#[test]
fn test_reference_in_attribute_value() {
    let tokens = tokenize(r#"<a href="?a=1&amp;b=2">"#);
    let Token::StartTag { attributes, .. } = &tokens[0] else {
        panic!("expected start tag");
    };
    assert_eq!(attributes[0].value, "?a=1&b=2");
}

#[test]
fn test_stray_less_than_is_text() {
    assert_eq!(text_of(&tokenize("a < b")), "a < b");
}

#[test]
fn test_rawtext_content_is_not_tokenized() {
    let tokens = tokenize("<style>a < b</style>");
    assert!(matches!(&tokens[0], Token::StartTag { name, .. } if name == "style"));
    assert_eq!(text_of(&tokens), "a < b");
    assert!(
        tokens
            .iter()
            .any(|t| matches!(t, Token::EndTag { name, .. } if name == "style"))
    );
}

#[test]
fn test_unterminated_tag_at_eof() {
    // The unfinished tag is abandoned, not emitted.
    let tokens = tokenize("text<p class=");
    assert_eq!(text_of(&tokens), "text");
    assert_eq!(tokens.last(), Some(&Token::EndOfFile));
}

#[test]
fn test_bogus_comment_from_stray_end_tag() {
    let tokens = tokenize("</@nonsense>");
    assert!(matches!(
        &tokens[0],
        Token::Comment { data } if data == "@nonsense"
    ));
}
