//! Render operation.

use phpgen_codegen::Formatting;
use phpgen_manifest::{Result, SnippetFile};
use tracing::debug;

/// Rendered lines of a snippet along with the formatting they were built with.
#[derive(Debug)]
pub struct Rendered {
    pub lines: Vec<String>,
    pub formatting: Formatting,
}

impl Rendered {
    /// Lines joined with the configured line ending.
    pub fn text(&self) -> String {
        self.formatting.join(&self.lines)
    }

    /// Lines as a pretty-printed JSON array.
    pub fn json(&self) -> serde_json::Result<String> {
        let mut json = serde_json::to_string_pretty(&self.lines)?;
        json.push('\n');
        Ok(json)
    }
}

/// Execute the render operation.
pub fn render(file: &SnippetFile) -> Result<Rendered> {
    let lines = file.render()?;
    debug!(path = %file.path().display(), lines = lines.len(), "rendered snippet");
    Ok(Rendered {
        lines,
        formatting: file.snippet().formatting(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const SNIPPET: &str = r#"
[format]
eol = "crlf"

[[statements]]
kind = "assign"
target = { name = "a" }
value = 1

[[statements]]
kind = "return"
reference = { name = "a" }
"#;

    fn rendered(content: &str) -> Rendered {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        render(&SnippetFile::open(file.path()).unwrap()).unwrap()
    }

    #[test]
    fn test_text_uses_line_ending() {
        assert_eq!(rendered(SNIPPET).text(), "$a = 1;\r\nreturn $a;\r\n");
    }

    #[test]
    fn test_json_lines() {
        let json = rendered(SNIPPET).json().unwrap();
        let lines: Vec<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(lines, vec!["$a = 1;", "return $a;"]);
    }
}
