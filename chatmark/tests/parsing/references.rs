//! Reference-style links and their definition table.

use crate::common::{standard_ast, standard_html};
use chatmark::AstNode;

#[test]
fn definition_after_reference_resolves_it() {
    assert_eq!(
        standard_html("[text][id]\n\n[id]: http://x \"T\""),
        "<p><a href=\"http://x\" title=\"T\" target=\"_blank\" rel=\"nofollow\">text</a></p>"
    );
}

#[test]
fn definition_before_reference_also_resolves() {
    assert_eq!(
        standard_html("[id]: http://x\n\n[text][id]"),
        "<p><a href=\"http://x\" target=\"_blank\" rel=\"nofollow\">text</a></p>"
    );
}

#[test]
fn definition_lines_emit_no_node() {
    let nodes = standard_ast("[id]: http://x\n\nafter");
    assert_eq!(nodes.len(), 1);
    assert!(matches!(&nodes[0], AstNode::Paragraph { .. }));
}

#[test]
fn unresolved_reference_keeps_empty_href() {
    assert_eq!(
        standard_html("[text][nope]"),
        "<p><a href=\"\">text</a></p>"
    );
    let nodes = standard_ast("[text][nope]");
    match &nodes[0] {
        AstNode::Paragraph { children, .. } => match &children[0] {
            AstNode::Link { href, id, .. } => {
                assert_eq!(href, "");
                assert_eq!(id.as_deref(), Some("nope"));
            }
            other => panic!("expected link, got {other:?}"),
        },
        other => panic!("expected paragraph, got {other:?}"),
    }
}

#[test]
fn image_references_resolve_too() {
    assert_eq!(
        standard_html("![alt][img]\n\n[img]: pic.png"),
        "<p><img src=\"pic.png\" alt=\"alt\"></p>"
    );
}

#[test]
fn reference_ids_are_case_insensitive() {
    assert_eq!(
        standard_html("[text][ID]\n\n[id]: http://x"),
        "<p><a href=\"http://x\" target=\"_blank\" rel=\"nofollow\">text</a></p>"
    );
}
