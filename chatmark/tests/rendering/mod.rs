//! Rendered HTML snapshots for mixed documents and the chat dialect.

use insta::assert_snapshot;

use crate::common::{chat_html, standard_html};

#[test]
fn mixed_document() {
    let html = standard_html("# Title\n\nSome **bold** text\n\n- one\n- two\n");
    assert_snapshot!(
        html,
        @"<h1>Title</h1>\n<p>Some <b>bold</b> text</p><ul><li>one</li><li>two</li></ul>"
    );
}

#[test]
fn chat_dialect_wrappers() {
    let html = chat_html("**bold** __it__ _u_ ||s|| ~~st~~");
    assert_snapshot!(
        html,
        @"<b>bold</b> <i>it</i> <u>u</u> <span data-entity-type=\"spoiler\">s</span> <s>st</s>"
    );
}

#[test]
fn chat_expandable_blockquote() {
    let html = chat_html("> hidden||");
    assert_snapshot!(html, @"<blockquote class=\"expandable\">hidden</blockquote>\n");
}

#[test]
fn chat_has_no_block_structure() {
    // no paragraph wrapper and no heading grammar in the chat dialect
    assert_snapshot!(chat_html("# not a heading"), @"# not a heading");
    assert_snapshot!(chat_html("plain text"), @"plain text");
}
