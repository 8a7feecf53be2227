//! Shape validation of parsed statements.

use miette::SourceSpan;

use super::{ArgSpec, CallSpec, ConditionSpec, OperandSpec, Statement, StatementKind};
use crate::{Error, Result, error::SourceContext};

/// Validation context carrying the source and the path to the current
/// statement, e.g. `statements[2].body[0]`.
#[derive(Debug, Clone)]
pub(crate) struct ParseContext<'a> {
    source: &'a SourceContext,
    path: Vec<String>,
}

impl<'a> ParseContext<'a> {
    pub fn new(source: &'a SourceContext) -> Self {
        Self {
            source,
            path: Vec::new(),
        }
    }

    /// Push a path segment and return a new context.
    pub fn push(&self, segment: impl Into<String>) -> Self {
        let mut path = self.path.clone();
        path.push(segment.into());
        Self {
            source: self.source,
            path,
        }
    }

    pub fn path_string(&self) -> String {
        self.path.join(".")
    }

    fn error(&self, message: impl AsRef<str>, span: Option<SourceSpan>) -> Box<Error> {
        let message = if self.path.is_empty() {
            message.as_ref().to_string()
        } else {
            format!("{}: {}", self.path_string(), message.as_ref())
        };
        self.source.validation_error(message, span)
    }
}

fn span_of(statement: &Statement) -> SourceSpan {
    let range = statement.kind.span();
    SourceSpan::from((range.start, range.end - range.start))
}

/// Validate a statement list found under `field`, and every nested body.
pub(crate) fn validate_statements(
    statements: &[Statement],
    ctx: &ParseContext,
    field: &str,
) -> Result<()> {
    for (i, statement) in statements.iter().enumerate() {
        validate_statement(statement, &ctx.push(format!("{}[{}]", field, i)))?;
    }
    Ok(())
}

fn validate_statement(statement: &Statement, ctx: &ParseContext) -> Result<()> {
    let kind = statement.kind();
    let span = Some(span_of(statement));
    let sources = statement.source_fields();

    if !kind.is_control() && !statement.body.is_empty() {
        return Err(ctx.error(format!("{} statements take no body", kind.as_str()), span));
    }
    if kind.is_control() && !sources.is_empty() {
        return Err(ctx.error(
            format!("{} statements take no {}", kind.as_str(), sources.join(", ")),
            span,
        ));
    }
    if kind != StatementKind::Assign && (statement.target.is_some() || statement.op.is_some()) {
        return Err(ctx.error("only assign statements take a target or op", span));
    }
    if kind != StatementKind::Raw && statement.lines.is_some() {
        return Err(ctx.error("only raw statements take lines", span));
    }

    match kind {
        StatementKind::Assign => {
            if statement.target.is_none() {
                return Err(ctx.error("assign needs a target", span));
            }
            if sources.len() != 1 {
                return Err(ctx.error(
                    "assign needs exactly one of value, expression, reference, call or chain",
                    span,
                ));
            }
        }
        StatementKind::Return => {
            if sources.len() > 1 {
                return Err(ctx.error(
                    format!("return takes at most one source, got {}", sources.join(", ")),
                    span,
                ));
            }
        }
        StatementKind::Call => {
            if sources != ["call"] && sources != ["chain"] {
                return Err(ctx.error("call needs exactly one of call or chain", span));
            }
        }
        StatementKind::Raw => {
            if statement.lines.is_none() || !sources.is_empty() {
                return Err(ctx.error("raw needs lines and nothing else", span));
            }
        }
        StatementKind::Else | StatementKind::Default => {
            if statement.condition.is_some() {
                return Err(ctx.error(format!("{} takes no condition", kind.as_str()), span));
            }
        }
        _ => match &statement.condition {
            Some(condition) => validate_condition(condition, &ctx.push("condition"), span)?,
            None => {
                return Err(ctx.error(format!("{} needs a condition", kind.as_str()), span));
            }
        },
    }

    if let Some(call) = &statement.call {
        validate_call(call, &ctx.push("call"), span)?;
    }
    if let Some(chain) = &statement.chain {
        if chain.is_empty() {
            return Err(ctx.error("chain needs at least one call", span));
        }
        for (i, call) in chain.iter().enumerate() {
            validate_call(call, &ctx.push(format!("chain[{}]", i)), span)?;
        }
    }

    validate_statements(&statement.body, ctx, "body")
}

fn validate_condition(
    condition: &ConditionSpec,
    ctx: &ParseContext,
    span: Option<SourceSpan>,
) -> Result<()> {
    match (
        &condition.value,
        &condition.left,
        &condition.op,
        &condition.right,
    ) {
        (Some(_), None, None, None) => Ok(()),
        (None, Some(left), None, None) => validate_operand(left, &ctx.push("left"), span),
        (None, Some(left), Some(_), Some(right)) => {
            validate_operand(left, &ctx.push("left"), span)?;
            validate_operand(right, &ctx.push("right"), span)
        }
        _ => Err(ctx.error("expected { value }, { left } or { left, op, right }", span)),
    }
}

fn validate_operand(
    operand: &OperandSpec,
    ctx: &ParseContext,
    span: Option<SourceSpan>,
) -> Result<()> {
    let set = [
        operand.value.is_some(),
        operand.reference.is_some(),
        operand.call.is_some(),
    ];
    if set.iter().filter(|s| **s).count() != 1 {
        return Err(ctx.error("expected exactly one of value, reference or call", span));
    }
    if let Some(call) = &operand.call {
        validate_call(call, &ctx.push("call"), span)?;
    }
    Ok(())
}

fn validate_call(call: &CallSpec, ctx: &ParseContext, span: Option<SourceSpan>) -> Result<()> {
    for (i, arg) in call.args.iter().enumerate() {
        validate_arg(arg, &ctx.push(format!("args[{}]", i)), span)?;
    }
    Ok(())
}

fn validate_arg(arg: &ArgSpec, ctx: &ParseContext, span: Option<SourceSpan>) -> Result<()> {
    let set = [
        arg.value.is_some(),
        arg.reference.is_some(),
        arg.expression.is_some(),
    ];
    if set.iter().filter(|s| **s).count() != 1 {
        return Err(ctx.error("expected exactly one of value, reference or expression", span));
    }
    Ok(())
}
