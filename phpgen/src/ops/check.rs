//! Check operation - snippet validation.

use phpgen_manifest::{Result, SnippetFile};
use tracing::debug;

use crate::reports::CheckReport;

/// Execute the check operation.
///
/// Parsing already validated the snippet; rendering catches what only the
/// builders can reject.
pub fn check(file: &SnippetFile) -> Result<CheckReport> {
    let lines = file.render()?;
    let snippet = file.snippet();
    debug!(lines = lines.len(), "snippet renders");

    Ok(CheckReport {
        config_path: file.path().to_path_buf(),
        statements: snippet.statement_count(),
        lines: lines.len(),
        formatting: snippet.formatting(),
    })
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_check_counts() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"
[[statements]]
kind = "while"
condition = {{ value = true }}

[[statements.body]]
kind = "raw"
lines = ["tick();"]
"#
        )
        .unwrap();

        let report = check(&SnippetFile::open(file.path()).unwrap()).unwrap();
        assert_eq!(report.statements, 2);
        assert_eq!(report.lines, 3);
        assert!(report.formatting.base_indent().is_empty());
    }
}
