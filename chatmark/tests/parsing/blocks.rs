//! Block-level parsing: paragraphs, headings, quotes, code and lists.

use crate::common::{standard_ast, standard_html};
use chatmark::AstNode;

#[test]
fn blank_line_splits_paragraphs() {
    let nodes = standard_ast("a\n\nb");
    assert_eq!(nodes.len(), 2);
    assert!(matches!(&nodes[0], AstNode::Paragraph { .. }));
    assert!(matches!(&nodes[1], AstNode::Paragraph { .. }));
    assert_eq!(standard_html("a\n\nb"), "<p>a</p><p>b</p>");
}

#[test]
fn heading_level_follows_marker_count() {
    let nodes = standard_ast("## Title\n");
    match &nodes[0] {
        AstNode::Heading {
            level, children, ..
        } => {
            assert_eq!(*level, 2);
            assert_eq!(
                children,
                &[AstNode::Text {
                    source: "Title".to_string(),
                    content: "Title".to_string(),
                }]
            );
        }
        other => panic!("expected heading, got {other:?}"),
    }
}

#[test]
fn underline_heading_maps_marker_to_level() {
    let nodes = standard_ast("Title\n====\n");
    match &nodes[0] {
        AstNode::Heading { level, .. } => assert_eq!(*level, 1),
        other => panic!("expected heading, got {other:?}"),
    }
    let nodes = standard_ast("Title\n----\n");
    match &nodes[0] {
        AstNode::Heading { level, .. } => assert_eq!(*level, 2),
        other => panic!("expected heading, got {other:?}"),
    }
}

#[test]
fn horizontal_rule() {
    let nodes = standard_ast("---\n");
    assert!(matches!(&nodes[0], AstNode::HorizontalRule { .. }));
    assert_eq!(standard_html("---\n"), "<hr>");
}

#[test]
fn blockquote_wraps_a_paragraph() {
    assert_eq!(
        standard_html("> quoted text\n"),
        "<blockquote><p>quoted text</p></blockquote>"
    );
}

#[test]
fn fenced_code_keeps_language_and_body() {
    let nodes = standard_ast("```rust\nlet x = 1;\n```\n");
    match &nodes[0] {
        AstNode::CodeBlock {
            language, children, ..
        } => {
            assert_eq!(language.as_deref(), Some("rust"));
            assert_eq!(
                children,
                &[AstNode::Text {
                    source: "let x = 1;".to_string(),
                    content: "let x = 1;".to_string(),
                }]
            );
        }
        other => panic!("expected code block, got {other:?}"),
    }
    assert_eq!(
        standard_html("```rust\nlet x = 1;\n```\n"),
        "<pre><code class=\"language-rust\">let x = 1;</code></pre>\n"
    );
}

#[test]
fn numbered_bullets_make_an_ordered_list() {
    let nodes = standard_ast("1. one\n2. two\n");
    match &nodes[0] {
        AstNode::List {
            ordered, children, ..
        } => {
            assert!(*ordered);
            assert_eq!(children.len(), 2);
        }
        other => panic!("expected list, got {other:?}"),
    }
    assert_eq!(
        standard_html("- one\n- two\n"),
        "<ul><li>one</li><li>two</li></ul>"
    );
}

#[test]
fn blank_line_marks_the_following_item_loose() {
    let nodes = standard_ast("- a\n\n- b\n- c\n");
    match &nodes[0] {
        AstNode::List { children, .. } => {
            let loose: Vec<bool> = children
                .iter()
                .map(|item| match item {
                    AstNode::ListItem { loose, .. } => *loose,
                    other => panic!("expected list item, got {other:?}"),
                })
                .collect();
            assert_eq!(loose, vec![false, true, false]);
        }
        other => panic!("expected list, got {other:?}"),
    }
}

#[test]
fn ast_serializes_with_kind_tags() {
    let nodes = standard_ast("# Hi\n");
    let json = serde_json::to_string(&nodes).expect("ast to serialize");
    assert!(json.contains("\"kind\":\"Heading\""));
    assert!(json.contains("\"level\":1"));
}
