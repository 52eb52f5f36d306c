//! Markup to chat-markdown conversion
//!
//! The reverse direction of the pipeline: take an HTML fragment (typically
//! the contents of a rich-text input surface) and rewrite it as chat-dialect
//! markdown. The fragment is parsed with `html5ever` into an `rcdom` tree and
//! walked children-first; recognized elements wrap their collected text in a
//! template from [`MarkdownTemplates`], everything else passes its text
//! through unchanged.

use std::cell::RefCell;

use html5ever::tendril::TendrilSink;
use html5ever::{parse_document, Attribute, ParseOpts};
use markup5ever_rcdom::{Handle, NodeData, RcDom};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::render::SPOILER_ENTITY_TYPE;

static MARKUP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"<\s*(\w+)[^>]*>((\s*(\w+)[^>]*)|(.*))</\s*(\w+)[^/>]*>").unwrap());
static DIV_BR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<div><br[^>]*></div>").unwrap());
static BR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<br[^>]*>").unwrap());

/// True if `text` contains at least one element with an opening and a
/// closing tag. Used to decide whether pasted content needs conversion at
/// all.
pub fn is_markup(text: &str) -> bool {
    MARKUP_RE.is_match(text)
}

/// Template table for the converter. Each template contains a `#text#`
/// placeholder; the link template additionally contains `#url#` and the
/// fenced-code template `#language#`.
#[derive(Debug, Clone)]
pub struct MarkdownTemplates {
    pub bold: String,
    pub italic: String,
    pub underline: String,
    pub strikethrough: String,
    pub inline_code: String,
    pub fenced_code: String,
    /// Wraps each line of a multi-line quote.
    pub quote_line: String,
    /// Wraps a quote whose text has no newline.
    pub quote_inline: String,
    pub link: String,
    pub spoiler: String,
    /// Class name of caption paragraphs that are dropped from the output.
    pub code_title_class: String,
}

impl Default for MarkdownTemplates {
    fn default() -> Self {
        Self {
            bold: "**#text#**".to_string(),
            italic: "__#text#__".to_string(),
            underline: "_#text#_".to_string(),
            strikethrough: "~~#text#~~".to_string(),
            inline_code: "`#text#`".to_string(),
            fenced_code: "```#language#\n#text#\n```\n".to_string(),
            quote_line: ">#text#".to_string(),
            quote_inline: ">>#text#<<".to_string(),
            link: "[#text#](#url#)".to_string(),
            spoiler: "||#text#||".to_string(),
            code_title_class: "code-title".to_string(),
        }
    }
}

/// Convert an HTML fragment to markdown using the given templates.
pub fn markup_to_markdown(markup: &str, templates: &MarkdownTemplates) -> String {
    // a small fixed set of entities is decoded up front, and explicit line
    // break elements become plain newlines before the tree is built
    let text = markup
        .replace("&gt;", ">")
        .replace("&lt;", "<")
        .replace("&nbsp;", " ");
    let text = DIV_BR_RE.replace_all(&text, "\n");
    let text = BR_RE.replace_all(&text, "\n");

    // the explicit body wrapper keeps leading whitespace-only text, which
    // document parsing would otherwise discard before the body opens
    let dom = parse_document(RcDom::default(), ParseOpts::default()).one(format!("<body>{text}"));

    let mut result = String::new();
    if let Some(body) = find_body(&dom.document) {
        for child in body.children.borrow().iter() {
            let emitted = convert_node(child, templates, &result);
            result.push_str(&emitted);
        }
    }
    result
}

fn find_body(handle: &Handle) -> Option<Handle> {
    if let NodeData::Element { name, .. } = &handle.data {
        if name.local.as_ref() == "body" {
            return Some(handle.clone());
        }
    }
    for child in handle.children.borrow().iter() {
        if let Some(found) = find_body(child) {
            return Some(found);
        }
    }
    None
}

fn attribute(attrs: &RefCell<Vec<Attribute>>, name: &str) -> Option<String> {
    attrs
        .borrow()
        .iter()
        .find(|attr| attr.name.local.as_ref() == name)
        .map(|attr| attr.value.to_string())
}

fn fill(template: &str, text: &str) -> String {
    template.replacen("#text#", text, 1)
}

// `emitted` is the markdown the root loop has produced so far. Only the
// fenced-code branch consults it, to avoid gluing a fence onto the end of an
// unterminated line.
fn convert_node(node: &Handle, templates: &MarkdownTemplates, emitted: &str) -> String {
    let mut text = String::new();
    for child in node.children.borrow().iter() {
        text.push_str(&convert_node(child, templates, emitted));
    }

    match &node.data {
        NodeData::Text { contents } => contents.borrow().to_string(),
        NodeData::Element { name, attrs, .. } => match name.local.as_ref() {
            "b" | "strong" => fill(&templates.bold, &text),
            "i" | "em" => fill(&templates.italic, &text),
            "ins" | "u" => fill(&templates.underline, &text),
            "s" | "strike" | "del" => fill(&templates.strikethrough, &text),
            "code" => fill(&templates.inline_code, &text),
            "blockquote" => {
                let lines: Vec<&str> = text.split('\n').collect();
                if lines.len() > 1 {
                    let mut quoted = String::new();
                    for line in lines {
                        if !line.is_empty() {
                            quoted.push_str(&fill(&templates.quote_line, line));
                            quoted.push('\n');
                        }
                    }
                    quoted
                } else {
                    fill(&templates.quote_inline, &text)
                }
            }
            "a" => {
                if text.is_empty() {
                    // an image-only link contributes its alt text
                    for child in node.children.borrow().iter() {
                        if let NodeData::Element {
                            name: child_name,
                            attrs: child_attrs,
                            ..
                        } = &child.data
                        {
                            if child_name.local.as_ref() == "img" {
                                if let Some(alt) = attribute(child_attrs, "alt") {
                                    if !alt.is_empty() {
                                        text = alt;
                                        break;
                                    }
                                }
                            }
                        }
                    }
                }
                let href = attribute(attrs, "href").unwrap_or_default();
                fill(&templates.link, &text).replacen("#url#", &href, 1)
            }
            "span" => {
                if attribute(attrs, "data-entity-type").as_deref() == Some(SPOILER_ENTITY_TYPE) {
                    fill(&templates.spoiler, &text)
                } else {
                    text
                }
            }
            "pre" => {
                let language = attribute(attrs, "data-language").unwrap_or_default();
                let block =
                    fill(&templates.fenced_code, &text).replacen("#language#", &language, 1);
                if emitted.is_empty() || emitted.ends_with('\n') {
                    block
                } else {
                    format!("\n{block}")
                }
            }
            "p" => {
                let class = attribute(attrs, "class").unwrap_or_default();
                if class
                    .split_whitespace()
                    .any(|c| c == templates.code_title_class)
                {
                    String::new()
                } else {
                    text
                }
            }
            _ => text,
        },
        // document, doctype and comment nodes contribute child text only
        _ => text,
    }
}
