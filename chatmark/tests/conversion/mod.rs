//! HTML to chat-markdown conversion against rendered output.

use chatmark::{markup_to_markdown, MarkdownTemplates};

use crate::common::chat_html;

#[test]
fn chat_wrappers_convert_back() {
    let html = chat_html("**bold** and __italic__");
    assert_eq!(html, "<b>bold</b> and <i>italic</i>");
    let markdown = markup_to_markdown(&html, &MarkdownTemplates::default());
    assert_eq!(markdown, "**bold** and __italic__");
}

#[test]
fn spoilers_convert_back() {
    let html = chat_html("||secret||");
    assert_eq!(html, "<span data-entity-type=\"spoiler\">secret</span>");
    let markdown = markup_to_markdown(&html, &MarkdownTemplates::default());
    assert_eq!(markdown, "||secret||");
}

#[test]
fn multi_line_quotes_convert_line_by_line() {
    let html = chat_html("> line1\n> line2");
    assert_eq!(html, "<blockquote>line1\nline2</blockquote>");
    let markdown = markup_to_markdown(&html, &MarkdownTemplates::default());
    assert_eq!(markdown, ">line1\n>line2\n");
}

#[test]
fn custom_templates_are_honored() {
    let templates = MarkdownTemplates {
        bold: "*#text#*".to_string(),
        ..MarkdownTemplates::default()
    };
    assert_eq!(markup_to_markdown("<b>x</b>", &templates), "*x*");
}
