//! Check command report data structures.

use std::path::PathBuf;

use phpgen_codegen::Formatting;

use super::output::{Output, Report};

/// Summary of a snippet that parsed and rendered.
#[derive(Debug)]
pub struct CheckReport {
    /// Path to the snippet file.
    pub config_path: PathBuf,
    /// Statements, including nested bodies.
    pub statements: usize,
    /// Rendered line count.
    pub lines: usize,
    pub formatting: Formatting,
}

fn plural(n: usize) -> &'static str {
    if n == 1 { "" } else { "s" }
}

impl Report for CheckReport {
    fn render(&self, out: &mut dyn Output) {
        out.preformatted(&format!("✓ {} is valid", self.config_path.display()));
        out.newline();
        out.preformatted(&format!(
            "  {} statement{} rendering {} line{}",
            self.statements,
            plural(self.statements),
            self.lines,
            plural(self.lines)
        ));
        out.key_value_indented("target", &self.formatting.target_version().to_string());
        out.key_value_indented("eol", self.formatting.eol().name());
        out.key_value_indented("indent", &format!("{:?}", self.formatting.indent()));
        if !self.formatting.base_indent().is_empty() {
            out.key_value_indented("base indent", &format!("{:?}", self.formatting.base_indent()));
        }
    }
}
