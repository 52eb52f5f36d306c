//! AST to HTML rendering

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{AstNode, TableCell};

/// Value of the `data-entity-type` attribute marking spoiler spans, shared
/// between the renderer and the markup-to-markdown converter.
pub const SPOILER_ENTITY_TYPE: &str = "spoiler";

static ABSOLUTE_HREF_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^(//|http)").unwrap());

/// Presentation capabilities of the target surface.
#[derive(Debug, Clone)]
pub struct RenderCapabilities {
    /// When false, images degrade to plain links around their alt content.
    pub supports_inline_images: bool,
}

impl Default for RenderCapabilities {
    fn default() -> Self {
        Self {
            supports_inline_images: true,
        }
    }
}

/// Render a node sequence to an HTML fragment.
///
/// Pure and deterministic for a given sequence and capability set. Block
/// nodes wrap the recursive render of their children in kind-specific tags;
/// leaf nodes emit their content verbatim. An escaped character renders
/// exactly once, from the `Escape` node that consumed it.
pub fn render(nodes: &[AstNode], capabilities: &RenderCapabilities) -> String {
    let mut html = String::new();
    for node in nodes {
        match node {
            AstNode::Text { content, .. }
            | AstNode::Emoji { content, .. }
            | AstNode::Escape { content, .. }
            | AstNode::Html { content, .. } => html.push_str(content),
            AstNode::Space { .. } => html.push(' '),
            AstNode::NewLine { .. } | AstNode::LineBreak { .. } => html.push_str("<br>"),
            AstNode::HorizontalRule { .. } => html.push_str("<hr>"),
            AstNode::Paragraph { children, .. } => {
                html.push_str(&format!("<p>{}</p>", render(children, capabilities)));
            }
            AstNode::Blockquote { children, .. } => {
                html.push_str(&format!(
                    "<blockquote>{}</blockquote>",
                    render(children, capabilities)
                ));
            }
            AstNode::ExpandableBlockquote { children, .. } => {
                html.push_str(&format!(
                    "<blockquote class=\"expandable\">{}</blockquote>\n",
                    render(children, capabilities)
                ));
            }
            AstNode::InlineCode { children, .. } => {
                html.push_str(&format!("<code>{}</code>", render(children, capabilities)));
            }
            AstNode::CodeBlock {
                language, children, ..
            } => {
                let lang_attr = match language {
                    Some(lang) if !lang.is_empty() => format!(" class=\"language-{lang}\""),
                    _ => String::new(),
                };
                html.push_str(&format!(
                    "<pre><code{lang_attr}>{}</code></pre>\n",
                    render(children, capabilities)
                ));
            }
            AstNode::Heading {
                level, children, ..
            } => {
                html.push_str(&format!(
                    "<h{level}>{}</h{level}>\n",
                    render(children, capabilities)
                ));
            }
            AstNode::Italic { children, .. } => {
                html.push_str(&format!("<i>{}</i>", render(children, capabilities)));
            }
            AstNode::Bold { children, .. } => {
                html.push_str(&format!("<b>{}</b>", render(children, capabilities)));
            }
            AstNode::Strikethrough { children, .. } => {
                html.push_str(&format!("<s>{}</s>", render(children, capabilities)));
            }
            AstNode::Highlight { children, .. } => {
                html.push_str(&format!("<mark>{}</mark>", render(children, capabilities)));
            }
            AstNode::Underline { children, .. } => {
                html.push_str(&format!("<u>{}</u>", render(children, capabilities)));
            }
            AstNode::Spoiler { children, .. } => {
                html.push_str(&format!(
                    "<span data-entity-type=\"{SPOILER_ENTITY_TYPE}\">{}</span>",
                    render(children, capabilities)
                ));
            }
            AstNode::Subscript { children, .. } => {
                html.push_str(&format!("<sub>{}</sub>", render(children, capabilities)));
            }
            AstNode::Superscript { children, .. } => {
                html.push_str(&format!("<sup>{}</sup>", render(children, capabilities)));
            }
            AstNode::ListItem { children, .. } => {
                html.push_str(&format!("<li>{}</li>", render(children, capabilities)));
            }
            AstNode::List {
                ordered, children, ..
            } => {
                let tag = if *ordered { "ol" } else { "ul" };
                html.push_str(&format!(
                    "<{tag}>{}</{tag}>",
                    render(children, capabilities)
                ));
            }
            AstNode::Link {
                href,
                title,
                children,
                ..
            } => {
                let title_attr = title_attribute(title);
                let target_attr = if ABSOLUTE_HREF_RE.is_match(href) {
                    " target=\"_blank\" rel=\"nofollow\""
                } else {
                    ""
                };
                html.push_str(&format!(
                    "<a href=\"{href}\"{title_attr}{target_attr}>{}</a>",
                    render(children, capabilities)
                ));
            }
            AstNode::Image {
                href,
                title,
                children,
                ..
            } => {
                let title_attr = title_attribute(title);
                let inner = render(children, capabilities);
                if capabilities.supports_inline_images {
                    html.push_str(&format!("<img src=\"{href}\"{title_attr} alt=\"{inner}\">"));
                } else {
                    html.push_str(&format!("<a href=\"{href}\"{title_attr}>{inner}</a>"));
                }
            }
            AstNode::Table { headers, rows, .. } => {
                let mut head = String::new();
                for cell in headers {
                    head.push_str(&render_cell(cell, capabilities));
                }
                let mut body = String::new();
                for row in rows {
                    let mut cells = String::new();
                    for cell in &row.cells {
                        cells.push_str(&render_cell(cell, capabilities));
                    }
                    body.push_str(&format!("<tr>{cells}</tr>\n"));
                }
                html.push_str(&format!(
                    "<table>\n<thead>\n{head}</thead>\n<tbody>\n{body}</tbody>\n</table>\n"
                ));
            }
        }
    }
    html
}

fn title_attribute(title: &str) -> String {
    if title.is_empty() {
        String::new()
    } else {
        format!(" title=\"{title}\"")
    }
}

fn render_cell(cell: &TableCell, capabilities: &RenderCapabilities) -> String {
    let tag = if cell.header { "th" } else { "td" };
    let style_attr = cell.alignment.map_or_else(String::new, |alignment| {
        format!(" style=\"text-align:{}\"", alignment.as_str())
    });
    format!(
        "<{tag}{style_attr}>{}</{tag}>\n",
        render(&cell.children, capabilities)
    )
}
