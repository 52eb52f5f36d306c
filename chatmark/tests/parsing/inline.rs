//! Inline parsing: emphasis, code spans, links, escapes and emojis.

use crate::common::standard_html;

#[test]
fn emphasis_nests() {
    assert_eq!(
        standard_html("**bold _inner_**"),
        "<p><b>bold <i>inner</i></b></p>"
    );
}

#[test]
fn escaped_markers_stay_literal() {
    assert_eq!(standard_html("\\*not bold*"), "<p>*not bold*</p>");
}

#[test]
fn trailing_spaces_break_the_line() {
    assert_eq!(standard_html("a  \nb"), "<p>a<br>b</p>");
}

#[test]
fn shortcodes_become_emoji() {
    assert_eq!(standard_html("hi ;)"), "<p>hi \u{1F609}</p>");
    assert_eq!(standard_html("see :wink:"), "<p>see \u{1F609}</p>");
}

#[test]
fn code_span() {
    assert_eq!(
        standard_html("use `code` here"),
        "<p>use <code>code</code> here</p>"
    );
}

#[test]
fn simple_wrappers() {
    assert_eq!(standard_html("~~strike~~"), "<p><s>strike</s></p>");
    assert_eq!(standard_html("==mark=="), "<p><mark>mark</mark></p>");
    assert_eq!(standard_html("++under++"), "<p><u>under</u></p>");
    assert_eq!(standard_html("~sub~"), "<p><sub>sub</sub></p>");
    assert_eq!(standard_html("^sup^"), "<p><sup>sup</sup></p>");
}

#[test]
fn bare_urls_become_links() {
    assert_eq!(
        standard_html("visit https://example.com now"),
        "<p>visit <a href=\"https://example.com\" target=\"_blank\" rel=\"nofollow\">\
         https://example.com</a> now</p>"
    );
}

#[test]
fn angle_bracket_autolinks() {
    assert_eq!(
        standard_html("<user@example.com>"),
        "<p><a href=\"mailto:user@example.com\">user@example.com</a></p>"
    );
}

#[test]
fn inline_links() {
    assert_eq!(
        standard_html("[site](https://example.com)"),
        "<p><a href=\"https://example.com\" target=\"_blank\" rel=\"nofollow\">site</a></p>"
    );
    assert_eq!(
        standard_html("[page](notes.html)"),
        "<p><a href=\"notes.html\">page</a></p>"
    );
}

#[test]
fn images_carry_title_and_alt() {
    assert_eq!(
        standard_html("![alt text](pic.png \"Nice\")"),
        "<p><img src=\"pic.png\" title=\"Nice\" alt=\"alt text\"></p>"
    );
}

#[test]
fn image_titles_are_sanitized() {
    assert_eq!(
        standard_html("![a](p.png \"bad-title:here\")"),
        "<p><img src=\"p.png\" title=\"badtitlehere\" alt=\"a\"></p>"
    );
}
