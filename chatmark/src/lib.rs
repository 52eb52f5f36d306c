//! Markdown processing for chat messages.
//!
//! Two independent pipelines:
//!
//! - markdown → AST → HTML: [`parse`] runs an ordered rule table (one of two
//!   [`Dialect`]s) over the input and produces a typed node tree, [`render`]
//!   turns the tree into an HTML fragment, and [`to_html`] chains the two.
//! - HTML → markdown: [`markup_to_markdown`] rewrites a rich-text HTML
//!   fragment as chat-dialect markdown through a template table.
//!
//! Malformed input never fails; anything the grammar rules do not claim is
//! carried through as plain text.

pub mod ast;
pub mod error;
pub mod markdown;
pub mod parser;
pub mod render;
pub mod rules;

pub use ast::{Alignment, AstNode, TableCell, TableRow};
pub use error::ParseError;
pub use markdown::{is_markup, markup_to_markdown, MarkdownTemplates};
pub use parser::parse;
pub use render::{render, RenderCapabilities, SPOILER_ENTITY_TYPE};
pub use rules::Dialect;

/// Parse `source` with `dialect` and render the result with default
/// capabilities.
pub fn to_html(source: &str, dialect: Dialect) -> Result<String, ParseError> {
    let nodes = parse(source, dialect)?;
    Ok(render(&nodes, &RenderCapabilities::default()))
}
