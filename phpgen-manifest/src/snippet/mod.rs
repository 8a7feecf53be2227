//! Snippet manifest schema.
//!
//! A snippet is an optional `[format]` table and an ordered list of
//! `[[statements]]`, each tagged by `kind`. Control statements nest their
//! body as further statements.

mod build;
mod file;
mod parse;
mod validate;

use phpgen_codegen::{Formatting, expr::Scalar};
use serde::Deserialize;
use toml::Spanned;

pub use file::SnippetFile;
pub use parse::parse_snippet;

use crate::error::SourceContext;

/// Root schema of a snippet file.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Snippet {
    /// Formatting of the rendered output; the process default when absent.
    #[serde(default)]
    pub format: Option<Formatting>,

    #[serde(default)]
    pub statements: Vec<Statement>,

    #[serde(skip)]
    source: SourceContext,
}

/// Kind tag of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatementKind {
    Assign,
    Return,
    Call,
    Raw,
    If,
    #[serde(rename = "elseif")]
    ElseIf,
    Else,
    Switch,
    Case,
    Default,
    While,
    DoWhile,
}

impl StatementKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assign => "assign",
            Self::Return => "return",
            Self::Call => "call",
            Self::Raw => "raw",
            Self::If => "if",
            Self::ElseIf => "elseif",
            Self::Else => "else",
            Self::Switch => "switch",
            Self::Case => "case",
            Self::Default => "default",
            Self::While => "while",
            Self::DoWhile => "do-while",
        }
    }

    /// Whether statements of this kind carry a nested body.
    pub fn is_control(&self) -> bool {
        !matches!(self, Self::Assign | Self::Return | Self::Call | Self::Raw)
    }
}

/// One `[[statements]]` entry.
///
/// Which fields apply depends on `kind`; validation rejects the rest.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Statement {
    /// Wrapped in Spanned to label errors at the statement
    pub kind: Spanned<StatementKind>,

    /// Assignment target
    pub target: Option<ReferenceSpec>,

    /// Assignment operator, `=` when absent
    pub op: Option<String>,

    pub value: Option<ScalarValue>,
    pub expression: Option<String>,
    pub reference: Option<ReferenceSpec>,
    pub call: Option<CallSpec>,
    pub chain: Option<Vec<CallSpec>>,

    /// Verbatim lines of a `raw` statement
    pub lines: Option<Vec<String>>,

    pub condition: Option<ConditionSpec>,

    #[serde(default)]
    pub body: Vec<Statement>,
}

impl Statement {
    pub fn kind(&self) -> StatementKind {
        *self.kind.get_ref()
    }

    /// Names of the source fields that are set.
    pub(crate) fn source_fields(&self) -> Vec<&'static str> {
        let mut set = Vec::new();
        if self.value.is_some() {
            set.push("value");
        }
        if self.expression.is_some() {
            set.push("expression");
        }
        if self.reference.is_some() {
            set.push("reference");
        }
        if self.call.is_some() {
            set.push("call");
        }
        if self.chain.is_some() {
            set.push("chain");
        }
        set
    }
}

/// A literal value.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ScalarValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
}

impl From<&ScalarValue> for Scalar {
    fn from(value: &ScalarValue) -> Self {
        match value {
            ScalarValue::Bool(v) => Scalar::Bool(*v),
            ScalarValue::Int(v) => Scalar::Int(*v),
            ScalarValue::Float(v) => Scalar::Float(*v),
            ScalarValue::String(v) => Scalar::String(v.clone()),
        }
    }
}

/// Array index of a reference: `"[]"`, a number, or a variable name.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IndexSpec {
    Number(i64),
    Token(String),
}

/// A variable, property, class member or constant.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceSpec {
    /// `self`, `parent`, `this`, `$handle` or a class name
    pub owner: Option<String>,
    pub name: Option<String>,

    #[serde(rename = "const", default)]
    pub is_const: bool,

    /// Static access through a `$handle` owner
    #[serde(rename = "static", default)]
    pub is_static: bool,

    /// Set to false to render a bare identifier
    pub sigil: Option<bool>,

    pub index: Option<IndexSpec>,
}

/// A function or method call.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CallSpec {
    pub owner: Option<String>,
    pub name: String,

    #[serde(rename = "static", default)]
    pub is_static: bool,

    #[serde(default)]
    pub args: Vec<ArgSpec>,
}

/// A call argument: exactly one of `value`, `reference` or `expression`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ArgSpec {
    pub value: Option<ScalarValue>,
    pub reference: Option<ReferenceSpec>,
    pub expression: Option<String>,
}

/// A condition: `{ value }`, `{ left }` or `{ left, op, right }`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConditionSpec {
    pub value: Option<ScalarValue>,
    pub left: Option<OperandSpec>,
    pub op: Option<String>,
    pub right: Option<OperandSpec>,
}

/// One side of a condition: exactly one of `value`, `reference` or `call`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OperandSpec {
    pub value: Option<ScalarValue>,
    pub reference: Option<ReferenceSpec>,
    pub call: Option<CallSpec>,
}

impl Snippet {
    /// The source text and filename this snippet was parsed from.
    pub fn source(&self) -> &SourceContext {
        &self.source
    }

    /// Formatting the snippet renders with.
    pub fn formatting(&self) -> Formatting {
        self.format.clone().unwrap_or_else(Formatting::process_default)
    }

    /// Count statements, including nested bodies.
    pub fn statement_count(&self) -> usize {
        fn count(statements: &[Statement]) -> usize {
            statements.iter().map(|s| 1 + count(&s.body)).sum()
        }
        count(&self.statements)
    }
}
