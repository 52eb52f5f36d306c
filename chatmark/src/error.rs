//! Error types for parsing

use std::fmt;

/// Errors produced while turning source text into an AST.
///
/// Malformed markdown never errors; unmatched syntax falls through to the
/// plain-text rules. The only runtime failure is an incomplete rule table,
/// which is a defect in the dialect definition rather than in user input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No rule matched the remaining input. Carries a short snippet of the
    /// text the rule table could not account for.
    NoMatchingRule { snippet: String },
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::NoMatchingRule { snippet } => {
                write!(f, "no rule matched remaining input at: {snippet:?}")
            }
        }
    }
}

impl std::error::Error for ParseError {}
