//! Snippet parsing from strings.

use std::str::FromStr;

use tracing::debug;

use super::{
    Snippet,
    validate::{ParseContext, validate_statements},
};
use crate::{Error, Result, error::SourceContext};

/// Filename used in diagnostics when none is given.
const DEFAULT_FILENAME: &str = "snippet.toml";

impl FromStr for Snippet {
    type Err = Box<Error>;

    fn from_str(s: &str) -> Result<Self> {
        parse_snippet(s, DEFAULT_FILENAME)
    }
}

impl Snippet {
    /// Parse a snippet from a string with a custom filename for error reporting.
    pub fn from_str_with_filename(content: &str, filename: &str) -> Result<Self> {
        parse_snippet(content, filename)
    }
}

/// Parse and validate a snippet from content with the given filename for
/// error reporting.
pub fn parse_snippet(content: &str, filename: &str) -> Result<Snippet> {
    let source = SourceContext::new(content, filename);
    let mut snippet: Snippet = toml::from_str(content).map_err(|e| source.parse_error(e))?;

    validate_statements(&snippet.statements, &ParseContext::new(&source), "statements")?;
    debug!(
        filename,
        statements = snippet.statement_count(),
        "parsed snippet"
    );

    snippet.source = source;
    Ok(snippet)
}
