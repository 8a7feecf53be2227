//! Return statements.

use super::{Source, WithSource};
use crate::{
    Result,
    builder::{Formatting, Render, render::indent_lines},
};

/// `return source;`, or a bare `return;` when no source is set or the
/// source is a blank expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Return {
    source: Option<Source>,
    formatting: Formatting,
}

impl Return {
    pub fn new() -> Self {
        Self {
            source: None,
            formatting: Formatting::process_default(),
        }
    }

    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }
}

impl Default for Return {
    fn default() -> Self {
        Self::new()
    }
}

impl WithSource for Return {
    fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }
}

impl Render for Return {
    fn formatting(&self) -> &Formatting {
        &self.formatting
    }

    fn with_formatting(mut self, formatting: Formatting) -> Self {
        self.formatting = formatting;
        self
    }

    fn render(&self) -> Result<Vec<String>> {
        let mut lines = match &self.source {
            Some(source) if !source.is_empty() => source.lines(&self.formatting)?,
            _ => Vec::new(),
        };
        match lines.first_mut() {
            Some(first) => *first = format!("return {}", first),
            None => lines.push("return".to_string()),
        }
        if let Some(last) = lines.last_mut() {
            last.push(';');
        }
        Ok(indent_lines(&self.formatting, lines))
    }
}
