//! Right-hand sides shared by assignments and returns.

use crate::{
    Error, Result,
    builder::{Formatting, Render},
    expr::{ChainedInvocation, Invocation, Reference, Scalar, Ternary},
};

/// The value a statement assigns or returns.
#[derive(Debug, Clone, PartialEq)]
pub enum Source {
    Value(Scalar),
    /// Source text spliced verbatim, possibly spanning several lines.
    Expression(String),
    Reference(Reference),
    Chain(ChainedInvocation),
    Ternary(Ternary),
}

impl Source {
    /// A blank expression renders nothing and counts as no source.
    pub fn is_empty(&self) -> bool {
        matches!(self, Self::Expression(expr) if expr.trim().is_empty())
    }

    /// Expression lines without base indent or terminator.
    pub(crate) fn lines(&self, formatting: &Formatting) -> Result<Vec<String>> {
        match self {
            Self::Value(value) => Ok(vec![value.render()]),
            Self::Expression(expr) => Ok(expr.split('\n').map(str::to_string).collect()),
            Self::Reference(reference) => Ok(vec![reference.render()]),
            Self::Chain(chain) => chain
                .clone()
                .with_formatting(formatting.clone())
                .expr_lines(),
            Self::Ternary(ternary) => Ok(vec![ternary.render()?]),
        }
    }
}

/// Setters for a statement's source. The last one called wins.
pub trait WithSource: Sized {
    /// Replace the source.
    fn with_source(self, source: Source) -> Self;

    fn with_value(self, value: impl Into<Scalar>) -> Self {
        self.with_source(Source::Value(value.into()))
    }

    fn with_expression(self, expr: impl Into<String>) -> Self {
        self.with_source(Source::Expression(expr.into()))
    }

    /// Use a reference as the source. An append index (`$a[]`) cannot be
    /// read from.
    fn with_reference(self, reference: Reference) -> Result<Self> {
        if reference.is_append() {
            return Err(Error::invalid(
                "source reference",
                reference.render(),
                "an append index can only be assigned to",
            ));
        }
        Ok(self.with_source(Source::Reference(reference)))
    }

    fn with_invocation(self, invocation: Invocation) -> Self {
        self.with_source(Source::Chain(ChainedInvocation::single(invocation)))
    }

    fn with_chain(self, chain: ChainedInvocation) -> Self {
        self.with_source(Source::Chain(chain))
    }

    fn with_ternary(self, ternary: Ternary) -> Self {
        self.with_source(Source::Ternary(ternary))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Index, Owner};

    #[test]
    fn test_multi_line_expression_is_split() {
        let source = Source::Expression("[\n    1,\n]".to_string());
        assert_eq!(
            source.lines(&Formatting::default()).unwrap(),
            vec!["[", "    1,", "]"]
        );
    }

    #[test]
    fn test_blank_expression_is_empty() {
        assert!(Source::Expression(String::new()).is_empty());
        assert!(Source::Expression(" \n".to_string()).is_empty());
        assert!(!Source::Expression("0".to_string()).is_empty());
        assert!(!Source::Value(Scalar::string("")).is_empty());
    }

    #[test]
    fn test_chain_uses_statement_indent() {
        let chain = ChainedInvocation::new()
            .append(Invocation::method(Owner::ThisKw, "a").unwrap())
            .unwrap()
            .append(Invocation::method(Owner::None, "b").unwrap())
            .unwrap();
        let formatting = Formatting::default().with_indent("  ").unwrap();
        assert_eq!(
            Source::Chain(chain).lines(&formatting).unwrap(),
            vec!["$this->a()", "  ->b()"]
        );
    }

    #[test]
    fn test_append_reference_is_rejected() {
        struct Probe(Option<Source>);

        impl WithSource for Probe {
            fn with_source(mut self, source: Source) -> Self {
                self.0 = Some(source);
                self
            }
        }

        let append = Reference::variable("list")
            .unwrap()
            .with_index(Index::Append)
            .unwrap();
        assert!(Probe(None).with_reference(append).is_err());

        let probe = Probe(None).with_value(1).with_expression("null");
        assert_eq!(probe.0, Some(Source::Expression("null".to_string())));
    }
}
