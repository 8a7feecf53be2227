//! Assignment statements.

use std::{fmt, str::FromStr};

use super::{Source, WithSource};
use crate::{
    Error, Result,
    builder::{Formatting, Render, render::indent_lines},
    expr::Reference,
};

/// Assignment operator, `=` or a compound form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssignOp {
    #[default]
    Assign,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Concat,
    Coalesce,
    Pow,
    BitAnd,
    BitOr,
    BitXor,
    Shl,
    Shr,
}

impl AssignOp {
    pub const ALL: [AssignOp; 14] = [
        Self::Assign,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Concat,
        Self::Coalesce,
        Self::Pow,
        Self::BitAnd,
        Self::BitOr,
        Self::BitXor,
        Self::Shl,
        Self::Shr,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assign => "=",
            Self::Add => "+=",
            Self::Sub => "-=",
            Self::Mul => "*=",
            Self::Div => "/=",
            Self::Mod => "%=",
            Self::Concat => ".=",
            Self::Coalesce => "??=",
            Self::Pow => "**=",
            Self::BitAnd => "&=",
            Self::BitOr => "|=",
            Self::BitXor => "^=",
            Self::Shl => "<<=",
            Self::Shr => ">>=",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| {
                Error::invalid(
                    "assignment operator",
                    s,
                    "expected =, a compound arithmetic, string or bitwise form, or ??=",
                )
            })
    }
}

impl FromStr for AssignOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for AssignOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// `target op source;`
///
/// Target and source may be set in any order; both are checked when
/// rendering.
///
/// # Example
///
/// ```
/// use phpgen_codegen::builder::Render;
/// use phpgen_codegen::expr::{Owner, Reference};
/// use phpgen_codegen::stmt::{Assignment, WithSource};
///
/// let stmt = Assignment::new()
///     .with_target(Reference::variable("x").unwrap())
///     .unwrap()
///     .with_reference(Reference::new(Owner::ThisKw, "y").unwrap())
///     .unwrap();
///
/// assert_eq!(stmt.render().unwrap(), vec!["$x = $this->y;"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Assignment {
    target: Option<Reference>,
    op: AssignOp,
    source: Option<Source>,
    formatting: Formatting,
}

impl Assignment {
    pub fn new() -> Self {
        Self {
            target: None,
            op: AssignOp::default(),
            source: None,
            formatting: Formatting::process_default(),
        }
    }

    /// Set the target. Constants cannot be assigned to.
    pub fn with_target(mut self, target: Reference) -> Result<Self> {
        if target.is_const() {
            return Err(Error::invalid(
                "assignment target",
                target.render(),
                "constants cannot be assigned to",
            ));
        }
        if target.name().is_none() && target.owner().is_none() {
            return Err(Error::invalid(
                "assignment target",
                "",
                "target has neither an owner nor a name",
            ));
        }
        self.target = Some(target);
        Ok(self)
    }

    pub fn with_operator(mut self, op: AssignOp) -> Self {
        self.op = op;
        self
    }

    pub fn with_operator_str(self, op: &str) -> Result<Self> {
        Ok(self.with_operator(AssignOp::parse(op)?))
    }

    pub fn target(&self) -> Option<&Reference> {
        self.target.as_ref()
    }

    pub fn operator(&self) -> AssignOp {
        self.op
    }

    pub fn source(&self) -> Option<&Source> {
        self.source.as_ref()
    }
}

impl Default for Assignment {
    fn default() -> Self {
        Self::new()
    }
}

impl WithSource for Assignment {
    fn with_source(mut self, source: Source) -> Self {
        self.source = Some(source);
        self
    }
}

impl Render for Assignment {
    fn formatting(&self) -> &Formatting {
        &self.formatting
    }

    fn with_formatting(mut self, formatting: Formatting) -> Self {
        self.formatting = formatting;
        self
    }

    fn render(&self) -> Result<Vec<String>> {
        let Some(target) = &self.target else {
            return Err(Error::structural("assignment", "no target set"));
        };
        let Some(source) = self.source.as_ref().filter(|s| !s.is_empty()) else {
            return Err(Error::structural("assignment", "no source set"));
        };

        let mut lines = source.lines(&self.formatting)?;
        if let Some(first) = lines.first_mut() {
            *first = format!("{} {} {}", target.render(), self.op, first);
        }
        if let Some(last) = lines.last_mut() {
            last.push(';');
        }
        Ok(indent_lines(&self.formatting, lines))
    }
}
