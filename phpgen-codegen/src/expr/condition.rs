//! Boolean conditions for control structures.

use std::{fmt, str::FromStr};

use super::{Invocation, Reference, Scalar};
use crate::{Error, Result};

/// Comparison operator of a binary condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    Eq,
    NotEq,
    Identical,
    NotIdentical,
    Gt,
    Gte,
    Lt,
    Lte,
}

impl ComparisonOp {
    pub const ALL: [ComparisonOp; 8] = [
        Self::Eq,
        Self::NotEq,
        Self::Identical,
        Self::NotIdentical,
        Self::Gt,
        Self::Gte,
        Self::Lt,
        Self::Lte,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "==",
            Self::NotEq => "!=",
            Self::Identical => "===",
            Self::NotIdentical => "!==",
            Self::Gt => ">",
            Self::Gte => ">=",
            Self::Lt => "<",
            Self::Lte => "<=",
        }
    }

    pub fn parse(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| {
                Error::invalid(
                    "comparison operator",
                    s,
                    "expected one of ==, !=, ===, !==, >, >=, <, <=",
                )
            })
    }
}

impl FromStr for ComparisonOp {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for ComparisonOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One side of a condition.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Scalar(Scalar),
    Reference(Reference),
    Invocation(Invocation),
}

impl Operand {
    pub(crate) fn render(&self) -> Result<String> {
        match self {
            Self::Scalar(value) => Ok(value.render()),
            Self::Reference(reference) => Ok(reference.render()),
            Self::Invocation(invocation) => invocation.inline(),
        }
    }
}

impl From<Scalar> for Operand {
    fn from(value: Scalar) -> Self {
        Self::Scalar(value)
    }
}

impl From<Reference> for Operand {
    fn from(value: Reference) -> Self {
        Self::Reference(value)
    }
}

impl From<Invocation> for Operand {
    fn from(value: Invocation) -> Self {
        Self::Invocation(value)
    }
}

impl From<bool> for Operand {
    fn from(value: bool) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<i64> for Operand {
    fn from(value: i64) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<i32> for Operand {
    fn from(value: i32) -> Self {
        Self::Scalar(value.into())
    }
}

impl From<&str> for Operand {
    fn from(value: &str) -> Self {
        Self::Scalar(value.into())
    }
}

/// A condition, possibly assembled across several calls.
///
/// Completeness is not enforced here; the consuming block checks it with
/// [`is_set`](Condition::is_set) and
/// [`is_complete_binary`](Condition::is_complete_binary) at render time.
///
/// ```
/// use phpgen_codegen::expr::{Condition, Reference};
///
/// let cond = Condition::default()
///     .with_left(Reference::variable("a").unwrap())
///     .with_operator_str("==")
///     .unwrap()
///     .with_right(1);
///
/// assert_eq!(cond.render().unwrap(), "( $a == 1 )");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Condition {
    left: Option<Operand>,
    op: Option<ComparisonOp>,
    right: Option<Operand>,
}

impl Condition {
    /// A literal condition such as `true`.
    pub fn scalar(value: impl Into<Scalar>) -> Self {
        Self::single(Operand::Scalar(value.into()))
    }

    /// A single operand used as a boolean expression.
    pub fn single(operand: impl Into<Operand>) -> Self {
        Self {
            left: Some(operand.into()),
            op: None,
            right: None,
        }
    }

    pub fn binary(left: impl Into<Operand>, op: ComparisonOp, right: impl Into<Operand>) -> Self {
        Self {
            left: Some(left.into()),
            op: Some(op),
            right: Some(right.into()),
        }
    }

    pub fn with_left(mut self, operand: impl Into<Operand>) -> Self {
        self.left = Some(operand.into());
        self
    }

    pub fn with_operator(mut self, op: ComparisonOp) -> Self {
        self.op = Some(op);
        self
    }

    pub fn with_operator_str(self, op: &str) -> Result<Self> {
        Ok(self.with_operator(ComparisonOp::parse(op)?))
    }

    pub fn with_right(mut self, operand: impl Into<Operand>) -> Self {
        self.right = Some(operand.into());
        self
    }

    /// Whether any operand configuration is present.
    pub fn is_set(&self) -> bool {
        self.left.is_some() || self.right.is_some()
    }

    /// Whether both sides and the operator of a comparison are present.
    pub fn is_complete_binary(&self) -> bool {
        self.left.is_some() && self.op.is_some() && self.right.is_some()
    }

    /// Exactly one operand and no operator.
    pub fn is_single(&self) -> bool {
        self.op.is_none() && (self.left.is_some() != self.right.is_some())
    }

    /// Render on a single line; a comparison is parenthesized.
    pub fn render(&self) -> Result<String> {
        let inner = self.render_inner()?;
        if self.is_complete_binary() {
            Ok(format!("( {} )", inner))
        } else {
            Ok(inner)
        }
    }

    /// Render without the comparison parentheses, for splicing into
    /// `if( ... )` style headers.
    pub(crate) fn render_inner(&self) -> Result<String> {
        if self.is_complete_binary() {
            if let (Some(left), Some(op), Some(right)) = (&self.left, self.op, &self.right) {
                return Ok(format!("{} {} {}", left.render()?, op, right.render()?));
            }
        }
        if self.is_single() {
            if let Some(operand) = self.left.as_ref().or(self.right.as_ref()) {
                return operand.render();
            }
        }
        Err(Error::structural(
            "condition",
            "expected a single operand or both sides of a comparison",
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Argument, Owner};

    #[test]
    fn test_binary() {
        let cond = Condition::binary(Reference::variable("a").unwrap(), ComparisonOp::Eq, 1);
        assert_eq!(cond.render().unwrap(), "( $a == 1 )");
        assert_eq!(cond.render_inner().unwrap(), "$a == 1");
    }

    #[test]
    fn test_scalar_is_not_parenthesized() {
        assert_eq!(Condition::scalar(true).render().unwrap(), "true");
    }

    #[test]
    fn test_single_operand() {
        let call = Invocation::method(Owner::ThisKw, "isReady").unwrap();
        assert_eq!(Condition::single(call).render().unwrap(), "$this->isReady()");

        let var = Reference::variable("ok").unwrap();
        assert_eq!(Condition::single(var).render().unwrap(), "$ok");
    }

    #[test]
    fn test_operands_render_by_kind() {
        let call = Invocation::function("count")
            .unwrap()
            .with_arg(Argument::variable("items").unwrap());
        let cond = Condition::binary(call, ComparisonOp::Gte, "10");
        assert_eq!(cond.render().unwrap(), "( count( $items ) >= 10 )");

        let cond = Condition::binary(
            Reference::new(Owner::ThisKw, "name").unwrap(),
            ComparisonOp::NotIdentical,
            "x",
        );
        assert_eq!(cond.render().unwrap(), "( $this->name !== \"x\" )");
    }

    #[test]
    fn test_incremental_assembly() {
        let cond = Condition::default();
        assert!(!cond.is_set());

        let cond = cond.with_left(Reference::variable("n").unwrap());
        assert!(cond.is_set());
        assert!(cond.is_single());
        assert!(!cond.is_complete_binary());

        let cond = cond.with_operator(ComparisonOp::Lt);
        assert!(!cond.is_single());
        assert!(cond.render().is_err());

        let cond = cond.with_right(0);
        assert!(cond.is_complete_binary());
        assert_eq!(cond.render().unwrap(), "( $n < 0 )");
    }

    #[test]
    fn test_empty_condition_is_structural_error() {
        assert!(matches!(
            Condition::default().render(),
            Err(Error::Structural { .. })
        ));
    }

    #[test]
    fn test_operator_parsing() {
        for op in ComparisonOp::ALL {
            assert_eq!(ComparisonOp::parse(op.as_str()).unwrap(), op);
        }
        let err = ComparisonOp::parse("<>").unwrap_err();
        assert_eq!(err.value(), Some("<>"));
        assert!("=".parse::<ComparisonOp>().is_err());
    }
}
