//! The render contract shared by line-producing builders.

use super::Formatting;
use crate::Result;

/// Trait for builders that render to a sequence of lines.
///
/// Rendering is a pure function of the builder's current state: calling
/// [`render`](Render::render) twice on an unmodified builder yields the same
/// lines. A failed render produces no output at all.
pub trait Render {
    /// The formatting this builder renders with.
    fn formatting(&self) -> &Formatting;

    /// Replace this builder's formatting.
    fn with_formatting(self, formatting: Formatting) -> Self
    where
        Self: Sized;

    /// Render to lines, without line terminators.
    fn render(&self) -> Result<Vec<String>>;

    /// Copy line ending, indentation and target version from a parent
    /// builder.
    fn with_formatting_from(self, parent: &dyn Render) -> Self
    where
        Self: Sized,
    {
        let formatting = parent.formatting().clone();
        self.with_formatting(formatting)
    }

    /// Render and join the lines with the configured line ending, adding
    /// one trailing line ending.
    fn render_joined(&self) -> Result<String> {
        let lines = self.render()?;
        Ok(self.formatting().join(&lines))
    }
}

/// Prefix every line with the base indent of `formatting`.
pub(crate) fn indent_lines(formatting: &Formatting, lines: Vec<String>) -> Vec<String> {
    let base = formatting.base_indent();
    if base.is_empty() {
        return lines;
    }
    lines
        .into_iter()
        .map(|line| {
            if line.is_empty() {
                line
            } else {
                format!("{}{}", base, line)
            }
        })
        .collect()
}
