//! Recursive parser over an ordered rule table
//!
//! The parser tries each rule of the dialect in order at the current input
//! position; the first match wins, its prefix is consumed, and the token kind
//! decides how the node is built. Captured sub-content is parsed again with
//! the same table, so nested grammar (emphasis inside a link, cells inside a
//! table) falls out of the recursion.
//!
//! Reference-style links are emitted as placeholders keyed by a lowercased
//! id. Definition lines populate a per-invocation side table, and a fixup
//! walk after the top-level parse fills in href and title. A reference that
//! is never defined keeps its empty href.

use std::collections::HashMap;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::ast::{Alignment, AstNode, TableCell, TableRow};
use crate::error::ParseError;
use crate::rules::{replace_emoji_shortcodes, rules, Dialect, Rule, RuleMatch, TokenKind};

static BLANK_LINE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^ +$").unwrap());
static QUOTE_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?m)^ *> ?").unwrap());
static ITEM_START_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^( *)([*+-]|\d+\.) ").unwrap());
static ITEM_BULLET_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^([*+-]|\d+\.) ").unwrap());
static ITEM_PREFIX_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ *([*+-]|\d+\.) +").unwrap());
static ROW_TRAILER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?: *\| *)?\n$").unwrap());
static HEADER_EDGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ *| *\| *$").unwrap());
static ALIGN_EDGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ *|\| *$").unwrap());
static CELL_EDGE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ *\| *| *\| *$").unwrap());
static PIPE_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" *\| *").unwrap());
static CELL_SPLIT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r" *\| ").unwrap());
static ALIGN_RIGHT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ *-+: *$").unwrap());
static ALIGN_CENTER_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ *:-+: *$").unwrap());
static ALIGN_LEFT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^ *:-+ *$").unwrap());

/// Parse `source` with the given dialect into a sequence of AST nodes.
///
/// Any string is accepted, including the empty string (which yields an empty
/// sequence). An error only occurs if the dialect's rule table fails to
/// account for some input, which is a defect in the table rather than in the
/// input.
pub fn parse(source: &str, dialect: Dialect) -> Result<Vec<AstNode>, ParseError> {
    let normalized = normalize(source);
    let mut parser = Parser::new(rules(dialect));
    let mut nodes = parser.parse_block(&normalized, true)?;
    parser.resolve_references(&mut nodes);
    Ok(nodes)
}

// Applied once at the outermost call: strip carriage returns, expand tabs,
// fold the two Unicode whitespace variants to plain space and newline.
fn normalize(source: &str) -> String {
    source
        .replace('\r', "")
        .replace('\t', "    ")
        .replace('\u{00a0}', " ")
        .replace('\u{2424}', "\n")
}

fn snippet(text: &str) -> String {
    text.chars().take(20).collect()
}

// Titles pass through the same character-removal filter the renderer relies
// on before attribute emission.
fn sanitize_title(title: &str) -> String {
    title
        .chars()
        .filter(|c| {
            !matches!(
                c,
                '\\' | '~' | '#' | '%' | '*' | '{' | '}' | ':' | '?' | '|' | '-'
            )
        })
        .collect()
}

// A blank line inside item text, ignoring a purely trailing one.
fn has_internal_blank_line(text: &str) -> bool {
    let mut search = 0;
    while let Some(found) = text[search..].find("\n\n") {
        let start = search + found;
        if !text[start + 2..].chars().all(char::is_whitespace) {
            return true;
        }
        search = start + 1;
    }
    false
}

fn classify_alignment(cell: &str) -> Option<Alignment> {
    if ALIGN_RIGHT_RE.is_match(cell) {
        Some(Alignment::Right)
    } else if ALIGN_CENTER_RE.is_match(cell) {
        Some(Alignment::Center)
    } else if ALIGN_LEFT_RE.is_match(cell) {
        Some(Alignment::Left)
    } else {
        None
    }
}

// The formatting rules capture their content in group 2 or group 1 depending
// on which delimiter alternative matched.
fn formatting_content(m: &RuleMatch) -> &str {
    if m.has_group(2) {
        m.group(2)
    } else {
        m.group(1)
    }
}

struct Definition {
    href: String,
    title: String,
}

struct Parser {
    rules: &'static [Rule],
    definitions: HashMap<String, Definition>,
}

impl Parser {
    fn new(rules: &'static [Rule]) -> Self {
        Self {
            rules,
            definitions: HashMap::new(),
        }
    }

    fn parse_block(&mut self, source: &str, top_level: bool) -> Result<Vec<AstNode>, ParseError> {
        let mut text = BLANK_LINE_RE.replace_all(source, "").into_owned();
        let mut nodes = Vec::new();
        let rules = self.rules;
        'input: while !text.is_empty() {
            for rule in rules {
                if rule.block_level_only && !top_level {
                    continue;
                }
                let Some(m) = rule.pattern.matches(&text) else {
                    continue;
                };
                if rule.kind == TokenKind::Emoji {
                    // substitution rule: rewrite the input and re-enter the
                    // loop at the same position
                    text = replace_emoji_shortcodes(&text);
                    continue 'input;
                }
                let matched = text[..m.end].to_string();
                text = text[m.end..].to_string();
                self.dispatch(&mut nodes, rule.kind, matched, &m, top_level)?;
                continue 'input;
            }
            return Err(ParseError::NoMatchingRule {
                snippet: snippet(&text),
            });
        }
        Ok(nodes)
    }

    fn dispatch(
        &mut self,
        nodes: &mut Vec<AstNode>,
        kind: TokenKind,
        source: String,
        m: &RuleMatch,
        top_level: bool,
    ) -> Result<(), ParseError> {
        match kind {
            TokenKind::NewLine => nodes.push(AstNode::NewLine { source }),
            TokenKind::Space => {
                if source.len() > 1 {
                    nodes.push(AstNode::Space { source });
                }
            }
            TokenKind::LineBreak => nodes.push(AstNode::LineBreak { source }),
            TokenKind::FencedCode => {
                let language = m.groups.get(2).and_then(Clone::clone);
                let children = self.parse_block(m.group(3), false)?;
                nodes.push(AstNode::CodeBlock {
                    source,
                    language,
                    children,
                });
            }
            TokenKind::InlineCode => {
                let children = self.parse_block(formatting_content(m), false)?;
                nodes.push(AstNode::InlineCode { source, children });
            }
            TokenKind::Heading => {
                let level = m.group(1).len() as u8;
                let children = self.parse_block(m.group(2), false)?;
                nodes.push(AstNode::Heading {
                    source,
                    level,
                    children,
                });
            }
            TokenKind::UnderlineHeading => {
                let level = if m.group(2) == "=" { 1 } else { 2 };
                let children = self.parse_block(m.group(1), false)?;
                nodes.push(AstNode::Heading {
                    source,
                    level,
                    children,
                });
            }
            TokenKind::HorizontalRule => nodes.push(AstNode::HorizontalRule { source }),
            TokenKind::Blockquote => self.parse_blockquote(nodes, source, top_level)?,
            TokenKind::List => self.parse_list(nodes, source, m)?,
            TokenKind::Html => {
                let preformatted = matches!(m.group(1), "pre" | "script" | "style");
                nodes.push(AstNode::Html {
                    content: source.clone(),
                    source,
                    preformatted,
                });
            }
            TokenKind::NpTable | TokenKind::Table => self.parse_table(nodes, source, m)?,
            TokenKind::Definition | TokenKind::IdLink => {
                // declaration lines contribute no visible node
                let id = m.group(1).to_lowercase();
                self.definitions.insert(
                    id,
                    Definition {
                        href: m.group(2).to_string(),
                        title: sanitize_title(m.group(3)),
                    },
                );
            }
            TokenKind::Paragraph => {
                let text = m.group(1);
                let text = text.strip_suffix('\n').unwrap_or(text);
                let children = self.parse_block(text, false)?;
                nodes.push(AstNode::Paragraph { source, children });
            }
            TokenKind::Escape => nodes.push(AstNode::Escape {
                source,
                content: m.group(1).to_string(),
            }),
            TokenKind::Image => {
                let children = self.parse_block(m.group(1), false)?;
                nodes.push(AstNode::Image {
                    source,
                    href: m.group(2).to_string(),
                    title: sanitize_title(m.group(3)),
                    id: None,
                    children,
                });
            }
            TokenKind::Link => {
                let children = self.parse_block(m.group(1), false)?;
                nodes.push(AstNode::Link {
                    source,
                    href: m.group(2).to_string(),
                    title: sanitize_title(m.group(3)),
                    id: None,
                    children,
                });
            }
            TokenKind::Url => {
                let url = m.group(1).to_string();
                let children = vec![AstNode::Text {
                    source: url.clone(),
                    content: url.clone(),
                }];
                nodes.push(AstNode::Link {
                    source,
                    href: url,
                    title: String::new(),
                    id: None,
                    children,
                });
            }
            TokenKind::AutoLink => {
                let target = m.group(1).to_string();
                let href = if m.group(2) == "@" {
                    format!("mailto:{target}")
                } else {
                    target.clone()
                };
                let children = vec![AstNode::Text {
                    source: target.clone(),
                    content: target,
                }];
                nodes.push(AstNode::Link {
                    source,
                    href,
                    title: String::new(),
                    id: None,
                    children,
                });
            }
            TokenKind::ReferenceLink => {
                let id = m.group(2).to_lowercase();
                let children = self.parse_block(m.group(1), false)?;
                let image = source.starts_with('!');
                let node = if image {
                    AstNode::Image {
                        source,
                        href: String::new(),
                        title: String::new(),
                        id: Some(id),
                        children,
                    }
                } else {
                    AstNode::Link {
                        source,
                        href: String::new(),
                        title: String::new(),
                        id: Some(id),
                        children,
                    }
                };
                nodes.push(node);
            }
            TokenKind::Tag => nodes.push(AstNode::Html {
                content: source.clone(),
                source,
                preformatted: false,
            }),
            TokenKind::Bold
            | TokenKind::Italic
            | TokenKind::Strikethrough
            | TokenKind::Highlight
            | TokenKind::Underline
            | TokenKind::Spoiler
            | TokenKind::Subscript
            | TokenKind::Superscript => {
                let children = self.parse_block(formatting_content(m), false)?;
                nodes.push(match kind {
                    TokenKind::Bold => AstNode::Bold { source, children },
                    TokenKind::Italic => AstNode::Italic { source, children },
                    TokenKind::Strikethrough => AstNode::Strikethrough { source, children },
                    TokenKind::Highlight => AstNode::Highlight { source, children },
                    TokenKind::Underline => AstNode::Underline { source, children },
                    TokenKind::Spoiler => AstNode::Spoiler { source, children },
                    TokenKind::Subscript => AstNode::Subscript { source, children },
                    _ => AstNode::Superscript { source, children },
                });
            }
            TokenKind::InlineText | TokenKind::Text => nodes.push(AstNode::Text {
                content: source.clone(),
                source,
            }),
            // handled inside the match loop
            TokenKind::Emoji => {}
        }
        Ok(())
    }

    fn parse_blockquote(
        &mut self,
        nodes: &mut Vec<AstNode>,
        source: String,
        top_level: bool,
    ) -> Result<(), ParseError> {
        let mut content = QUOTE_PREFIX_RE.replace_all(&source, "").into_owned();
        let expandable = source.len() > 1 && source.ends_with("||");
        if expandable {
            content = content.replace("||", "");
        }
        let children = self.parse_block(&content, top_level)?;
        nodes.push(if expandable {
            AstNode::ExpandableBlockquote { source, children }
        } else {
            AstNode::Blockquote { source, children }
        });
        Ok(())
    }

    // Split the matched block into items. An item only ends at a line that
    // repeats the first item's exact indent followed by a bullet; everything
    // else, blank lines included, is carried as continuation text.
    fn parse_list(
        &mut self,
        nodes: &mut Vec<AstNode>,
        source: String,
        m: &RuleMatch,
    ) -> Result<(), ParseError> {
        let ordered = m.group(2).len() > 1;
        let mut items: Vec<String> = Vec::new();
        let mut current: Option<(String, String)> = None;
        for line in source.split('\n') {
            match &mut current {
                None => {
                    if let Some(caps) = ITEM_START_RE.captures(line) {
                        let indent = caps.get(1).map_or("", |c| c.as_str()).to_string();
                        current = Some((indent, line.to_string()));
                    }
                }
                Some((indent, text)) => {
                    let starts_new = line
                        .strip_prefix(indent.as_str())
                        .map_or(false, |rest| ITEM_BULLET_RE.is_match(rest));
                    if starts_new {
                        items.push(text.clone());
                        *text = line.to_string();
                    } else {
                        text.push('\n');
                        text.push_str(line);
                    }
                }
            }
        }
        if let Some((_, text)) = current {
            items.push(text);
        }

        let mut children = Vec::new();
        let mut next_loose = false;
        let count = items.len();
        for (i, item) in items.iter().enumerate() {
            let stripped = ITEM_PREFIX_RE.replace(item, "").into_owned();
            // looseness is decided before the embedded newlines are folded,
            // so a trailing blank line marks the following item loose
            let loose = next_loose || has_internal_blank_line(&stripped);
            if i < count - 1 {
                next_loose = stripped.ends_with('\n');
            }
            let flat = stripped.replace('\n', "");
            let item_children = self.parse_block(&flat, false)?;
            children.push(AstNode::ListItem {
                source: item.clone(),
                loose,
                children: item_children,
            });
        }
        nodes.push(AstNode::List {
            source,
            ordered,
            children,
        });
        Ok(())
    }

    // Header and separator lines are split on pipes, each separator cell is
    // classified independently, and body cells zip positionally to the
    // alignment array. Ragged rows are tolerated.
    fn parse_table(
        &mut self,
        nodes: &mut Vec<AstNode>,
        source: String,
        m: &RuleMatch,
    ) -> Result<(), ParseError> {
        let rows_text = ROW_TRAILER_RE.replace(m.group(3), "").into_owned();
        let header_text = HEADER_EDGE_RE.replace_all(m.group(1), "").into_owned();
        let align_text = ALIGN_EDGE_RE.replace_all(m.group(2), "").into_owned();

        let alignments: Vec<Option<Alignment>> = PIPE_SPLIT_RE
            .split(&align_text)
            .map(classify_alignment)
            .collect();

        let mut headers = Vec::new();
        for (i, cell) in PIPE_SPLIT_RE.split(&header_text).enumerate() {
            headers.push(TableCell {
                source: cell.to_string(),
                header: true,
                alignment: alignments.get(i).copied().flatten(),
                children: self.parse_block(cell, false)?,
            });
        }

        let mut rows = Vec::new();
        for row in rows_text.split('\n') {
            let cells_text = CELL_EDGE_RE.replace_all(row, "").into_owned();
            let mut cells = Vec::new();
            for (j, cell) in CELL_SPLIT_RE.split(&cells_text).enumerate() {
                cells.push(TableCell {
                    source: cell.to_string(),
                    header: false,
                    alignment: alignments.get(j).copied().flatten(),
                    children: self.parse_block(cell, false)?,
                });
            }
            rows.push(TableRow {
                source: row.to_string(),
                cells,
            });
        }

        nodes.push(AstNode::Table {
            source,
            headers,
            rows,
        });
        Ok(())
    }

    // Post-parse fixup: fill placeholder links and images from the
    // definition table. Unresolved ids keep their empty href.
    fn resolve_references(&self, nodes: &mut [AstNode]) {
        for node in nodes.iter_mut() {
            match node {
                AstNode::Link {
                    href,
                    title,
                    id,
                    children,
                    ..
                }
                | AstNode::Image {
                    href,
                    title,
                    id,
                    children,
                    ..
                } => {
                    if let Some(id) = id {
                        if let Some(def) = self.definitions.get(id.as_str()) {
                            *href = def.href.clone();
                            *title = def.title.clone();
                        }
                    }
                    self.resolve_references(children);
                }
                AstNode::Paragraph { children, .. }
                | AstNode::Blockquote { children, .. }
                | AstNode::ExpandableBlockquote { children, .. }
                | AstNode::Bold { children, .. }
                | AstNode::Italic { children, .. }
                | AstNode::Strikethrough { children, .. }
                | AstNode::Highlight { children, .. }
                | AstNode::Underline { children, .. }
                | AstNode::Spoiler { children, .. }
                | AstNode::Subscript { children, .. }
                | AstNode::Superscript { children, .. }
                | AstNode::InlineCode { children, .. }
                | AstNode::CodeBlock { children, .. }
                | AstNode::Heading { children, .. }
                | AstNode::List { children, .. }
                | AstNode::ListItem { children, .. } => self.resolve_references(children),
                AstNode::Table { headers, rows, .. } => {
                    for cell in headers.iter_mut() {
                        self.resolve_references(&mut cell.children);
                    }
                    for row in rows.iter_mut() {
                        for cell in row.cells.iter_mut() {
                            self.resolve_references(&mut cell.children);
                        }
                    }
                }
                AstNode::Space { .. }
                | AstNode::NewLine { .. }
                | AstNode::LineBreak { .. }
                | AstNode::HorizontalRule { .. }
                | AstNode::Text { .. }
                | AstNode::Escape { .. }
                | AstNode::Emoji { .. }
                | AstNode::Html { .. } => {}
            }
        }
    }
}
