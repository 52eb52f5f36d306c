//! AST node model
//!
//! A closed set of node kinds produced by the parser. Every variant keeps the
//! `source` slice it was built from, which makes node boundaries inspectable
//! after the fact (debug output, tests, editor integrations).

use serde::Serialize;

/// Horizontal alignment of a table column, taken from the separator row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    Left,
    Center,
    Right,
}

impl Alignment {
    pub fn as_str(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
        }
    }
}

/// A single table cell. Header cells come from the row above the separator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub source: String,
    pub header: bool,
    pub alignment: Option<Alignment>,
    pub children: Vec<AstNode>,
}

/// One body row of a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub source: String,
    pub cells: Vec<TableCell>,
}

/// A parsed markup node.
///
/// Leaf kinds carry raw `content`; container kinds carry `children` in
/// document order. Specialized kinds add exactly the fields they need, so a
/// renderer can match exhaustively without optional-field guesswork.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum AstNode {
    Space {
        source: String,
    },
    NewLine {
        source: String,
    },
    LineBreak {
        source: String,
    },
    HorizontalRule {
        source: String,
    },
    Text {
        source: String,
        content: String,
    },
    /// Records that a character was intentionally escaped. The renderer emits
    /// the character itself exactly once.
    Escape {
        source: String,
        content: String,
    },
    Emoji {
        source: String,
        content: String,
    },
    /// Raw markup passed through untouched.
    Html {
        source: String,
        content: String,
        preformatted: bool,
    },
    Paragraph {
        source: String,
        children: Vec<AstNode>,
    },
    Blockquote {
        source: String,
        children: Vec<AstNode>,
    },
    ExpandableBlockquote {
        source: String,
        children: Vec<AstNode>,
    },
    Bold {
        source: String,
        children: Vec<AstNode>,
    },
    Italic {
        source: String,
        children: Vec<AstNode>,
    },
    Strikethrough {
        source: String,
        children: Vec<AstNode>,
    },
    Highlight {
        source: String,
        children: Vec<AstNode>,
    },
    Underline {
        source: String,
        children: Vec<AstNode>,
    },
    Spoiler {
        source: String,
        children: Vec<AstNode>,
    },
    Subscript {
        source: String,
        children: Vec<AstNode>,
    },
    Superscript {
        source: String,
        children: Vec<AstNode>,
    },
    InlineCode {
        source: String,
        children: Vec<AstNode>,
    },
    CodeBlock {
        source: String,
        language: Option<String>,
        children: Vec<AstNode>,
    },
    Heading {
        source: String,
        level: u8,
        children: Vec<AstNode>,
    },
    List {
        source: String,
        ordered: bool,
        children: Vec<AstNode>,
    },
    /// `loose` items came with a blank line in their source and render with
    /// paragraph spacing in clients that distinguish the two.
    ListItem {
        source: String,
        loose: bool,
        children: Vec<AstNode>,
    },
    /// `id` is set only for reference-style links, before and after the
    /// definition table fixup resolves `href`/`title`.
    Link {
        source: String,
        href: String,
        title: String,
        id: Option<String>,
        children: Vec<AstNode>,
    },
    Image {
        source: String,
        href: String,
        title: String,
        id: Option<String>,
        children: Vec<AstNode>,
    },
    Table {
        source: String,
        headers: Vec<TableCell>,
        rows: Vec<TableRow>,
    },
}
