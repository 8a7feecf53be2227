//! Formatting configuration shared by every builder.

use std::{fmt, str::FromStr, sync::OnceLock};

use phpgen_core::PhpVersion;
use serde::Deserialize;
use tracing::debug;

use crate::{Error, Result};

static PROCESS_DEFAULT: OnceLock<Formatting> = OnceLock::new();

/// Line terminator used when joining rendered lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\n`
    #[default]
    Lf,
    /// `\r\n`
    CrLf,
    /// `\n\r`
    LfCr,
    /// `\r`
    Cr,
}

impl LineEnding {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Lf => "\n",
            Self::CrLf => "\r\n",
            Self::LfCr => "\n\r",
            Self::Cr => "\r",
        }
    }

    /// Short name used in configuration files.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Lf => "lf",
            Self::CrLf => "crlf",
            Self::LfCr => "lfcr",
            Self::Cr => "cr",
        }
    }

    /// Parse a line ending from its literal byte sequence. Anything other
    /// than `\n`, `\r\n`, `\n\r` or `\r` is rejected.
    pub fn parse(s: &str) -> Result<Self> {
        match s {
            "\n" => Ok(Self::Lf),
            "\r\n" => Ok(Self::CrLf),
            "\n\r" => Ok(Self::LfCr),
            "\r" => Ok(Self::Cr),
            _ => Err(Error::invalid(
                "line ending",
                s.escape_debug().to_string(),
                "expected one of \\n, \\r\\n, \\n\\r or \\r",
            )),
        }
    }

    /// Configuration form: a [name](LineEnding::name), case-insensitive, or
    /// the literal byte sequence.
    fn from_config(s: &str) -> Result<Self> {
        [Self::Lf, Self::CrLf, Self::LfCr, Self::Cr]
            .into_iter()
            .find(|eol| eol.name().eq_ignore_ascii_case(s))
            .map_or_else(|| Self::parse(s), Ok)
    }
}

impl FromStr for LineEnding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for LineEnding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Line ending, indentation and target version of rendered output.
///
/// Builders copy the [process default](Formatting::process_default) when
/// they are constructed and keep their own copy from then on. Use
/// `with_formatting` / `with_formatting_from` on a builder to propagate
/// settings from a parent.
///
/// # Example
///
/// ```
/// use phpgen_codegen::builder::{Formatting, LineEnding};
///
/// let formatting = Formatting::default()
///     .with_eol(LineEnding::CrLf)
///     .with_indent("  ")
///     .unwrap();
///
/// assert_eq!(formatting.join(&["a".into(), "b".into()]), "a\r\nb\r\n");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "FormattingConfig")]
pub struct Formatting {
    eol: LineEnding,
    indent: String,
    base_indent: String,
    target_version: PhpVersion,
}

impl Formatting {
    pub const DEFAULT_INDENT: &'static str = "    ";

    /// Install the process-wide default. Only the first call wins; later
    /// calls hand the rejected value back.
    pub fn install_default(formatting: Formatting) -> std::result::Result<(), Formatting> {
        debug!(
            indent = ?formatting.indent,
            base_indent = ?formatting.base_indent,
            target_version = %formatting.target_version,
            "installing process default formatting"
        );
        PROCESS_DEFAULT.set(formatting)
    }

    /// The installed process-wide default, or the built-in default.
    pub fn process_default() -> Formatting {
        PROCESS_DEFAULT.get().cloned().unwrap_or_default()
    }

    pub fn eol(&self) -> LineEnding {
        self.eol
    }

    pub fn indent(&self) -> &str {
        &self.indent
    }

    pub fn base_indent(&self) -> &str {
        &self.base_indent
    }

    pub fn target_version(&self) -> PhpVersion {
        self.target_version
    }

    pub fn with_eol(mut self, eol: LineEnding) -> Self {
        self.eol = eol;
        self
    }

    /// Set the string used for one indentation level.
    pub fn with_indent(mut self, indent: &str) -> Result<Self> {
        validate_indent("indent", indent)?;
        self.indent = indent.to_string();
        Ok(self)
    }

    /// Set the prefix applied to every rendered line.
    pub fn with_base_indent(mut self, base_indent: &str) -> Result<Self> {
        validate_indent("base indent", base_indent)?;
        self.base_indent = base_indent.to_string();
        Ok(self)
    }

    pub fn with_target_version(mut self, version: PhpVersion) -> Self {
        self.target_version = version;
        self
    }

    /// Prefix for a line nested `level` indentation levels below the base.
    pub fn prefix(&self, level: usize) -> String {
        let mut prefix = self.base_indent.clone();
        for _ in 0..level {
            prefix.push_str(&self.indent);
        }
        prefix
    }

    /// Join lines with the line ending, adding one trailing line ending.
    pub fn join(&self, lines: &[String]) -> String {
        let eol = self.eol.as_str();
        let mut out = String::new();
        for line in lines {
            out.push_str(line);
            out.push_str(eol);
        }
        out
    }
}

impl Default for Formatting {
    fn default() -> Self {
        Self {
            eol: LineEnding::Lf,
            indent: Self::DEFAULT_INDENT.to_string(),
            base_indent: String::new(),
            target_version: PhpVersion::default(),
        }
    }
}

fn validate_indent(context: &str, value: &str) -> Result<()> {
    if value.chars().all(|c| c == ' ' || c == '\t') {
        Ok(())
    } else {
        Err(Error::invalid(
            context,
            value.escape_debug().to_string(),
            "indentation may only contain spaces and tabs",
        ))
    }
}

/// Serialized form of [`Formatting`]; omitted fields fall back to the
/// process default.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct FormattingConfig {
    eol: Option<String>,
    indent: Option<String>,
    base_indent: Option<String>,
    target_version: Option<PhpVersion>,
}

impl TryFrom<FormattingConfig> for Formatting {
    type Error = Error;

    fn try_from(config: FormattingConfig) -> Result<Self> {
        let mut formatting = Formatting::process_default();
        if let Some(eol) = config.eol {
            formatting = formatting.with_eol(LineEnding::from_config(&eol)?);
        }
        if let Some(indent) = config.indent {
            formatting = formatting.with_indent(&indent)?;
        }
        if let Some(base_indent) = config.base_indent {
            formatting = formatting.with_base_indent(&base_indent)?;
        }
        if let Some(version) = config.target_version {
            formatting = formatting.with_target_version(version);
        }
        Ok(formatting)
    }
}
