//! Line accumulator for indented output.

use super::Formatting;

/// Fluent API for building a sequence of indented lines.
///
/// Every line is prefixed with the formatting's base indent plus one
/// indent string per nesting level. Like the statement builders, it
/// supports both consuming methods (returning `Self`) and mutable methods
/// (prefixed with `push_`).
///
/// # Example
///
/// ```
/// use phpgen_codegen::builder::{Formatting, LineBuilder};
///
/// let lines = LineBuilder::new(Formatting::default())
///     .line("if( $ok ) {")
///     .indent()
///     .line("return 1;")
///     .dedent()
///     .line("}")
///     .build();
///
/// assert_eq!(lines, vec!["if( $ok ) {", "    return 1;", "}"]);
/// ```
#[derive(Debug, Clone)]
pub struct LineBuilder {
    level: usize,
    formatting: Formatting,
    lines: Vec<String>,
}

impl LineBuilder {
    pub fn new(formatting: Formatting) -> Self {
        Self {
            level: 0,
            formatting,
            lines: Vec::new(),
        }
    }

    // =========================================================================
    // Mutable API - methods prefixed with `push_`
    // =========================================================================

    /// Add a line at the current indentation (mutable).
    pub fn push_line(&mut self, s: &str) -> &mut Self {
        let mut line = self.formatting.prefix(self.level);
        line.push_str(s);
        self.lines.push(line);
        self
    }

    /// Add an empty line, without indentation (mutable).
    pub fn push_blank(&mut self) -> &mut Self {
        self.lines.push(String::new());
        self
    }

    /// Splice opaque lines at the current indentation (mutable).
    ///
    /// Lines are not reformatted; empty lines stay empty.
    pub fn push_body<S: AsRef<str>>(&mut self, body: &[S]) -> &mut Self {
        for line in body {
            let line = line.as_ref();
            if line.is_empty() {
                self.push_blank();
            } else {
                self.push_line(line);
            }
        }
        self
    }

    /// Increase indentation level (mutable).
    pub fn push_indent(&mut self) -> &mut Self {
        self.level += 1;
        self
    }

    /// Decrease indentation level (mutable).
    pub fn push_dedent(&mut self) -> &mut Self {
        self.level = self.level.saturating_sub(1);
        self
    }

    // =========================================================================
    // Consuming API
    // =========================================================================

    pub fn line(mut self, s: &str) -> Self {
        self.push_line(s);
        self
    }

    pub fn body<S: AsRef<str>>(mut self, body: &[S]) -> Self {
        self.push_body(body);
        self
    }

    pub fn indent(mut self) -> Self {
        self.push_indent();
        self
    }

    pub fn dedent(mut self) -> Self {
        self.push_dedent();
        self
    }

    /// Add a header line, an indented block and a closing line.
    pub fn block_with_close<F>(self, header: &str, close: &str, f: F) -> Self
    where
        F: FnOnce(Self) -> Self,
    {
        let builder = self.line(header).indent();
        f(builder).dedent().line(close)
    }

    /// Consume the builder and return the lines.
    pub fn build(self) -> Vec<String> {
        self.lines
    }
}
