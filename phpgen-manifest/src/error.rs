use std::path::PathBuf;

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

/// Result type for manifest operations (boxed to reduce size on stack)
pub type Result<T> = std::result::Result<T, Box<Error>>;

/// Source context for error reporting.
///
/// Holds the manifest text and filename so every error can point back into
/// the file it came from.
#[derive(Debug, Clone)]
pub struct SourceContext {
    src: String,
    filename: String,
}

impl SourceContext {
    pub fn new(src: impl Into<String>, filename: impl Into<String>) -> Self {
        Self {
            src: src.into(),
            filename: filename.into(),
        }
    }

    pub fn src(&self) -> &str {
        &self.src
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Create a NamedSource for miette error reporting.
    pub fn named_source(&self) -> NamedSource<String> {
        NamedSource::new(&self.filename, self.src.clone())
    }

    /// Create a parse error from a toml error.
    pub fn parse_error(&self, source: toml::de::Error) -> Box<Error> {
        let span = source.span().map(SourceSpan::from);
        Box::new(Error::Parse {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Create a validation error with an optional span.
    pub fn validation_error(
        &self,
        message: impl Into<String>,
        span: Option<SourceSpan>,
    ) -> Box<Error> {
        Box::new(Error::Validation {
            src: self.named_source(),
            span,
            message: message.into(),
        })
    }

    /// Wrap a builder error, labelled at the offending token when it can be
    /// found in the source and at `fallback` otherwise.
    pub fn codegen_error(
        &self,
        source: phpgen_codegen::Error,
        fallback: Option<SourceSpan>,
    ) -> Box<Error> {
        let span = source
            .value()
            .and_then(|value| self.find_token(value))
            .or(fallback);
        Box::new(Error::Codegen {
            src: self.named_source(),
            span,
            source,
        })
    }

    /// Find a token in the source, preferring its quoted form.
    pub fn find_token(&self, token: &str) -> Option<SourceSpan> {
        if token.is_empty() {
            return None;
        }
        let quoted = format!("\"{}\"", token);
        if let Some(pos) = self.src.find(&quoted) {
            return Some(SourceSpan::from((pos + 1, token.len())));
        }
        self.src
            .find(token)
            .map(|pos| SourceSpan::from((pos, token.len())))
    }
}

impl Default for SourceContext {
    fn default() -> Self {
        Self::new("", "snippet.toml")
    }
}

#[derive(Debug, Error, Diagnostic)]
pub enum Error {
    #[error("failed to read '{}'", path.display())]
    #[diagnostic(
        code(phpgen::io_error),
        help("pass an existing snippet file with --config")
    )]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse snippet")]
    #[diagnostic(code(phpgen::parse_error))]
    Parse {
        #[source_code]
        src: NamedSource<String>,
        #[label("parse error here")]
        span: Option<SourceSpan>,
        #[source]
        source: toml::de::Error,
    },

    #[error("{message}")]
    #[diagnostic(code(phpgen::validation_error))]
    Validation {
        #[source_code]
        src: NamedSource<String>,
        #[label("{message}")]
        span: Option<SourceSpan>,
        message: String,
    },

    #[error("failed to build statement")]
    #[diagnostic(code(phpgen::codegen_error))]
    Codegen {
        #[source_code]
        src: NamedSource<String>,
        #[label("rejected here")]
        span: Option<SourceSpan>,
        #[source]
        #[diagnostic_source]
        source: phpgen_codegen::Error,
    },
}

impl Error {
    /// Create an I/O error for `path`.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Box<Self> {
        Box::new(Error::Io {
            path: path.into(),
            source,
        })
    }
}
