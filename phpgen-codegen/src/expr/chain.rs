//! Fluent method chains.

use tracing::debug;

use super::{Invocation, Owner};
use crate::{
    Error, Result,
    builder::{Formatting, Render, render::indent_lines},
};

/// A sequence of invocations sharing the owner of the first one.
///
/// The first call fixes the anchor. Later calls either omit their owner,
/// declare `$this`, or name the anchor itself; the anchor is imposed on them
/// in every case. Any other owner is rejected, as is a later call without a
/// method name. A chain whose first call has no owner cannot be extended.
///
/// # Example
///
/// ```
/// use phpgen_codegen::builder::Render;
/// use phpgen_codegen::expr::{ChainedInvocation, Invocation, Owner};
///
/// let chain = ChainedInvocation::new()
///     .append(Invocation::method(Owner::ThisKw, "query").unwrap())
///     .unwrap()
///     .append(Invocation::method(Owner::None, "all").unwrap())
///     .unwrap();
///
/// assert_eq!(chain.render().unwrap(), vec!["$this->query()", "    ->all();"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ChainedInvocation {
    anchor: Option<Owner>,
    calls: Vec<Invocation>,
    formatting: Formatting,
}

impl ChainedInvocation {
    pub fn new() -> Self {
        Self {
            anchor: None,
            calls: Vec::new(),
            formatting: Formatting::process_default(),
        }
    }

    /// A chain of one call.
    pub(crate) fn single(invocation: Invocation) -> Self {
        Self {
            anchor: Some(invocation.owner().clone()),
            formatting: invocation.formatting().clone(),
            calls: vec![invocation],
        }
    }

    /// Append a call (consuming).
    pub fn append(mut self, invocation: Invocation) -> Result<Self> {
        self.push_append(invocation)?;
        Ok(self)
    }

    /// Append a call (mutable).
    pub fn push_append(&mut self, invocation: Invocation) -> Result<&mut Self> {
        let anchor = match self.anchor.clone() {
            Some(anchor) => anchor,
            None => {
                self.anchor = Some(invocation.owner().clone());
                self.calls
                    .push(invocation.with_formatting(self.formatting.clone()));
                return Ok(self);
            }
        };

        if anchor.is_none() {
            return Err(Error::invalid(
                "chained call",
                invocation.name().render(),
                "the chain has no owner to extend from",
            ));
        }

        if invocation.name().name().is_none_or(str::is_empty) {
            return Err(Error::invalid(
                "chained call",
                invocation.name().render(),
                "calls after the first need a method name",
            ));
        }

        let declared = invocation.owner();
        let imposable =
            declared.is_none() || *declared == Owner::ThisKw || declared.same_anchor(&anchor);
        if !imposable {
            return Err(Error::invalid(
                "chained call owner",
                declared.token(),
                format!("the chain is anchored on '{}'", anchor),
            ));
        }

        debug!(anchor = %anchor, call = ?invocation.name().name(), "imposing chain owner");
        let invocation = invocation
            .with_owner(anchor)
            .with_formatting(self.formatting.clone());
        self.calls.push(invocation);
        Ok(self)
    }

    pub fn anchor(&self) -> Option<&Owner> {
        self.anchor.as_ref()
    }

    pub fn calls(&self) -> &[Invocation] {
        &self.calls
    }

    pub fn is_empty(&self) -> bool {
        self.calls.is_empty()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }

    /// Expression lines without base indent or terminator.
    pub(crate) fn expr_lines(&self) -> Result<Vec<String>> {
        let Some((first, rest)) = self.calls.split_first() else {
            return Err(Error::structural("chained invocation", "no calls appended"));
        };

        let indent = self.formatting.indent();
        let mut lines = first.expr_lines()?;
        for call in rest {
            for (i, line) in call.member_lines()?.into_iter().enumerate() {
                if i == 0 {
                    lines.push(format!("{}->{}", indent, line));
                } else if line.is_empty() {
                    lines.push(line);
                } else {
                    lines.push(format!("{}{}{}", indent, indent, line));
                }
            }
        }
        Ok(lines)
    }
}

impl Default for ChainedInvocation {
    fn default() -> Self {
        Self::new()
    }
}

impl Render for ChainedInvocation {
    fn formatting(&self) -> &Formatting {
        &self.formatting
    }

    fn with_formatting(mut self, formatting: Formatting) -> Self {
        self.calls = self
            .calls
            .into_iter()
            .map(|call| call.with_formatting(formatting.clone()))
            .collect();
        self.formatting = formatting;
        self
    }

    /// Render as a statement; the terminator follows the last line.
    fn render(&self) -> Result<Vec<String>> {
        let mut lines = self.expr_lines()?;
        if let Some(last) = lines.last_mut() {
            last.push(';');
        }
        Ok(indent_lines(&self.formatting, lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{Argument, Reference};

    fn builder_chain() -> ChainedInvocation {
        ChainedInvocation::new()
            .append(
                Invocation::method(Owner::type_name("Builder").unwrap(), "create")
                    .unwrap()
                    .with_arg(Argument::variable("a").unwrap()),
            )
            .unwrap()
            .append(
                Invocation::method(Owner::None, "withX")
                    .unwrap()
                    .with_arg(Argument::variable("b").unwrap()),
            )
            .unwrap()
            .append(Invocation::method(Owner::None, "build").unwrap())
            .unwrap()
    }

    #[test]
    fn test_chain_renders_one_call_per_line() {
        assert_eq!(
            builder_chain().render().unwrap(),
            vec![
                "Builder::create( $a )",
                "    ->withX( $b )",
                "    ->build();",
            ]
        );
    }

    #[test]
    fn test_missing_owner_inherits_anchor() {
        let chain = builder_chain();
        for call in chain.calls() {
            assert_eq!(call.owner(), &Owner::TypeName("Builder".to_string()));
        }
    }

    #[test]
    fn test_matching_owner_is_accepted() {
        let chain = ChainedInvocation::new()
            .append(Invocation::method(Owner::handle("q").unwrap(), "where").unwrap())
            .unwrap()
            .append(Invocation::method(Owner::handle("$q").unwrap(), "get").unwrap())
            .unwrap();
        assert_eq!(chain.render().unwrap(), vec!["$q->where()", "    ->get();"]);
    }

    #[test]
    fn test_foreign_owner_is_rejected() {
        let err = ChainedInvocation::new()
            .append(Invocation::method(Owner::ThisKw, "a").unwrap())
            .unwrap()
            .append(Invocation::method(Owner::SelfKw, "b").unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
        assert_eq!(err.value(), Some("self"));
    }

    #[test]
    fn test_this_owner_takes_the_anchor() {
        let chain = ChainedInvocation::new()
            .append(Invocation::method(Owner::type_name("Builder").unwrap(), "create").unwrap())
            .unwrap()
            .append(Invocation::method(Owner::ThisKw, "build").unwrap())
            .unwrap();
        assert_eq!(chain.calls()[1].owner(), &Owner::TypeName("Builder".to_string()));
        assert_eq!(
            chain.render().unwrap(),
            vec!["Builder::create()", "    ->build();"]
        );
    }

    #[test]
    fn test_unnamed_member_call_is_rejected() {
        let err = ChainedInvocation::new()
            .append(Invocation::method(Owner::ThisKw, "a").unwrap())
            .unwrap()
            .append(
                Invocation::new(Reference::owner_only(Owner::None)).with_arg(Argument::scalar(1)),
            )
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_anchorless_chain_cannot_extend() {
        let err = ChainedInvocation::new()
            .append(Invocation::function("collect").unwrap())
            .unwrap()
            .append(Invocation::method(Owner::None, "map").unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidArgument { .. }));
    }

    #[test]
    fn test_empty_chain_is_structural_error() {
        let chain = ChainedInvocation::new();
        assert!(matches!(chain.render(), Err(Error::Structural { .. })));
    }

    #[test]
    fn test_multi_line_member_call() {
        let chain = ChainedInvocation::new()
            .append(Invocation::method(Owner::ThisKw, "items").unwrap())
            .unwrap()
            .append(
                Invocation::method(Owner::None, "filter")
                    .unwrap()
                    .with_arg(Argument::expression("function( $i ) {\nreturn $i;\n}")),
            )
            .unwrap();
        assert_eq!(
            chain.render().unwrap(),
            vec![
                "$this->items()",
                "    ->filter( function( $i ) {",
                "        return $i;",
                "        } );",
            ]
        );
    }

    #[test]
    fn test_base_indent() {
        let chain = builder_chain().with_formatting(
            Formatting::default()
                .with_indent("\t")
                .unwrap()
                .with_base_indent("\t")
                .unwrap(),
        );
        assert_eq!(
            chain.render().unwrap(),
            vec![
                "\tBuilder::create( $a )",
                "\t\t->withX( $b )",
                "\t\t->build();",
            ]
        );
    }
}
