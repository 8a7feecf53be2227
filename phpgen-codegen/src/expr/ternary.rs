//! Ternary and null-coalescing expressions.

use super::{Condition, Operand};
use crate::Result;

#[derive(Debug, Clone, PartialEq)]
enum Form {
    Full {
        condition: Condition,
        then: Operand,
        otherwise: Operand,
    },
    Short {
        condition: Condition,
        otherwise: Operand,
    },
    NullCoalesce {
        value: Operand,
        fallback: Operand,
    },
}

/// A conditional expression: `c ? a : b`, `c ?: b` or `a ?? b`.
///
/// ```
/// use phpgen_codegen::expr::{Reference, Ternary};
///
/// let expr = Ternary::null_coalesce(Reference::variable("name").unwrap(), "guest");
/// assert_eq!(expr.render().unwrap(), "$name ?? \"guest\"");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Ternary {
    form: Form,
}

impl Ternary {
    pub fn ternary(
        condition: Condition,
        then: impl Into<Operand>,
        otherwise: impl Into<Operand>,
    ) -> Self {
        Self {
            form: Form::Full {
                condition,
                then: then.into(),
                otherwise: otherwise.into(),
            },
        }
    }

    pub fn short(condition: Condition, otherwise: impl Into<Operand>) -> Self {
        Self {
            form: Form::Short {
                condition,
                otherwise: otherwise.into(),
            },
        }
    }

    pub fn null_coalesce(value: impl Into<Operand>, fallback: impl Into<Operand>) -> Self {
        Self {
            form: Form::NullCoalesce {
                value: value.into(),
                fallback: fallback.into(),
            },
        }
    }

    /// Render on a single line, without terminator.
    pub fn render(&self) -> Result<String> {
        match &self.form {
            Form::Full {
                condition,
                then,
                otherwise,
            } => Ok(format!(
                "{} ? {} : {}",
                condition.render()?,
                then.render()?,
                otherwise.render()?
            )),
            Form::Short {
                condition,
                otherwise,
            } => Ok(format!("{} ?: {}", condition.render()?, otherwise.render()?)),
            Form::NullCoalesce { value, fallback } => {
                Ok(format!("{} ?? {}", value.render()?, fallback.render()?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Error,
        expr::{ComparisonOp, Invocation, Owner, Reference},
    };

    #[test]
    fn test_full_ternary() {
        let cond = Condition::binary(Reference::variable("n").unwrap(), ComparisonOp::Gt, 0);
        let expr = Ternary::ternary(cond, "positive", "other");
        assert_eq!(
            expr.render().unwrap(),
            "( $n > 0 ) ? \"positive\" : \"other\""
        );
    }

    #[test]
    fn test_short_ternary() {
        let cond = Condition::single(Reference::new(Owner::ThisKw, "title").unwrap());
        let expr = Ternary::short(cond, "Untitled");
        assert_eq!(expr.render().unwrap(), "$this->title ?: \"Untitled\"");
    }

    #[test]
    fn test_null_coalesce_with_call() {
        let call = Invocation::method(Owner::SelfKw, "fallback").unwrap();
        let expr = Ternary::null_coalesce(Reference::variable("cached").unwrap(), call);
        assert_eq!(expr.render().unwrap(), "$cached ?? self::fallback()");
    }

    #[test]
    fn test_incomplete_condition_fails() {
        let expr = Ternary::ternary(Condition::default(), 1, 2);
        assert!(matches!(expr.render(), Err(Error::Structural { .. })));
    }
}
