use std::path::{Path, PathBuf};

use super::Snippet;
use crate::{Error, Result};

/// A snippet file with both raw content and the parsed snippet.
#[derive(Debug)]
pub struct SnippetFile {
    path: PathBuf,
    content: String,
    snippet: Snippet,
}

impl SnippetFile {
    /// Open and parse a snippet file.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let content = std::fs::read_to_string(&path).map_err(|e| Error::io(&path, e))?;
        let filename = path.display().to_string();
        let snippet = Snippet::from_str_with_filename(&content, &filename)?;

        Ok(Self {
            path,
            content,
            snippet,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn snippet(&self) -> &Snippet {
        &self.snippet
    }

    /// Render the snippet to lines.
    pub fn render(&self) -> Result<Vec<String>> {
        self.snippet.render()
    }
}
