use miette::Diagnostic;
use thiserror::Error;

/// Result type for builder operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Builder failures.
///
/// Invalid arguments are raised by the setter or constructor that first
/// receives the malformed value. Structural errors are raised by `render()`
/// so that builders can be assembled over several steps.
#[derive(Debug, Error, Diagnostic, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("invalid {context} '{value}'")]
    #[diagnostic(code(phpgen::invalid_argument), help("{reason}"))]
    InvalidArgument {
        context: String,
        value: String,
        reason: String,
    },

    #[error("cannot render {builder}: {reason}")]
    #[diagnostic(code(phpgen::structural))]
    Structural {
        builder: &'static str,
        reason: String,
    },
}

impl Error {
    /// Create an invalid argument error.
    pub fn invalid(
        context: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::InvalidArgument {
            context: context.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a structural (render-time precondition) error.
    pub fn structural(builder: &'static str, reason: impl Into<String>) -> Self {
        Self::Structural {
            builder,
            reason: reason.into(),
        }
    }

    /// The offending value of an invalid argument error.
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::InvalidArgument { value, .. } => Some(value),
            Self::Structural { .. } => None,
        }
    }
}
