//! Shared helpers for integration tests.

use chatmark::{parse, render, AstNode, Dialect, RenderCapabilities};

/// Parse with the permissive dialect and render with default capabilities.
pub fn standard_html(source: &str) -> String {
    let nodes = parse(source, Dialect::Standard).expect("input to parse");
    render(&nodes, &RenderCapabilities::default())
}

/// Parse with the constrained chat dialect and render with default
/// capabilities.
pub fn chat_html(source: &str) -> String {
    let nodes = parse(source, Dialect::Chat).expect("input to parse");
    render(&nodes, &RenderCapabilities::default())
}

pub fn standard_ast(source: &str) -> Vec<AstNode> {
    parse(source, Dialect::Standard).expect("input to parse")
}
