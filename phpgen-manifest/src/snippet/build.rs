//! Statements to builders to rendered lines.

use miette::SourceSpan;
use phpgen_codegen::{
    Formatting, Render,
    builder::LineBuilder,
    expr::{
        Argument, ChainedInvocation, Condition, Index, Invocation, Operand, Owner, Reference,
        Scalar, as_array_index,
    },
    stmt::{Assignment, ControlBlock, ControlKind, Return, WithSource},
};
use tracing::trace;

use super::{
    ArgSpec, CallSpec, ConditionSpec, IndexSpec, OperandSpec, ReferenceSpec, Snippet, Statement,
    StatementKind,
};
use crate::{Result, error::SourceContext};

type CodegenResult<T> = phpgen_codegen::Result<T>;

impl Snippet {
    /// Render every statement with the snippet's formatting.
    ///
    /// An `if` directly followed by `elseif`/`else` statements renders as
    /// one chained statement.
    pub fn render(&self) -> Result<Vec<String>> {
        render_statements(&self.statements, &self.formatting(), &self.source)
    }

    /// Render and join with the configured line ending.
    pub fn render_joined(&self) -> Result<String> {
        let lines = self.render()?;
        Ok(self.formatting().join(&lines))
    }
}

fn span_of(statement: &Statement) -> Option<SourceSpan> {
    let range = statement.kind.span();
    Some(SourceSpan::from((range.start, range.end - range.start)))
}

fn render_statements(
    statements: &[Statement],
    formatting: &Formatting,
    source: &SourceContext,
) -> Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut i = 0;
    while i < statements.len() {
        let statement = &statements[i];
        if statement.kind() != StatementKind::If {
            lines.extend(render_statement(statement, formatting, source)?);
            i += 1;
            continue;
        }

        let mut end = i + 1;
        while end < statements.len() && statements[end].kind() == StatementKind::ElseIf {
            end += 1;
        }
        if end < statements.len() && statements[end].kind() == StatementKind::Else {
            end += 1;
        }

        let group = &statements[i..end];
        if group.len() == 1 {
            lines.extend(render_statement(statement, formatting, source)?);
        } else {
            let blocks = group
                .iter()
                .map(|s| control_block(s, formatting, source))
                .collect::<Result<Vec<_>>>()?;
            trace!(blocks = blocks.len(), "rendering if chain");
            let rendered = ControlBlock::render_chain(&blocks)
                .map_err(|e| source.codegen_error(e, span_of(statement)))?;
            lines.extend(rendered);
        }
        i = end;
    }
    Ok(lines)
}

fn render_statement(
    statement: &Statement,
    formatting: &Formatting,
    source: &SourceContext,
) -> Result<Vec<String>> {
    trace!(kind = statement.kind().as_str(), "rendering statement");
    let span = span_of(statement);
    let lines = match statement.kind() {
        StatementKind::Raw => Ok(LineBuilder::new(formatting.clone())
            .body(statement.lines.as_deref().unwrap_or_default())
            .build()),
        StatementKind::Assign => assignment(statement, formatting),
        StatementKind::Return => return_stmt(statement, formatting),
        StatementKind::Call => call_stmt(statement, formatting),
        _ => {
            return control_block(statement, formatting, source)?
                .render()
                .map_err(|e| source.codegen_error(e, span));
        }
    };
    lines.map_err(|e| source.codegen_error(e, span))
}

fn assignment(statement: &Statement, formatting: &Formatting) -> CodegenResult<Vec<String>> {
    let mut stmt = Assignment::new().with_formatting(formatting.clone());
    if let Some(target) = &statement.target {
        stmt = stmt.with_target(reference(target)?)?;
    }
    if let Some(op) = &statement.op {
        stmt = stmt.with_operator_str(op)?;
    }
    with_statement_source(stmt, statement)?.render()
}

fn return_stmt(statement: &Statement, formatting: &Formatting) -> CodegenResult<Vec<String>> {
    let stmt = Return::new().with_formatting(formatting.clone());
    with_statement_source(stmt, statement)?.render()
}

fn call_stmt(statement: &Statement, formatting: &Formatting) -> CodegenResult<Vec<String>> {
    let chain = match (&statement.call, &statement.chain) {
        (Some(call), _) => ChainedInvocation::new().append(invocation(call)?)?,
        (None, Some(calls)) => chain(calls)?,
        (None, None) => ChainedInvocation::new(),
    };
    chain.with_formatting(formatting.clone()).render()
}

/// Apply whichever source field of the statement is set.
fn with_statement_source<S: WithSource>(stmt: S, statement: &Statement) -> CodegenResult<S> {
    if let Some(value) = &statement.value {
        return Ok(stmt.with_value(Scalar::from(value)));
    }
    if let Some(expr) = &statement.expression {
        return Ok(stmt.with_expression(expr.as_str()));
    }
    if let Some(spec) = &statement.reference {
        return stmt.with_reference(reference(spec)?);
    }
    if let Some(call) = &statement.call {
        return Ok(stmt.with_invocation(invocation(call)?));
    }
    if let Some(calls) = &statement.chain {
        return Ok(stmt.with_chain(chain(calls)?));
    }
    Ok(stmt)
}

fn control_block(
    statement: &Statement,
    formatting: &Formatting,
    source: &SourceContext,
) -> Result<ControlBlock> {
    let span = span_of(statement);
    let kind = match statement.kind() {
        StatementKind::If => ControlKind::If,
        StatementKind::ElseIf => ControlKind::ElseIf,
        StatementKind::Else => ControlKind::Else,
        StatementKind::Switch => ControlKind::Switch,
        StatementKind::Case => ControlKind::Case,
        StatementKind::Default => ControlKind::Default,
        StatementKind::While => ControlKind::While,
        StatementKind::DoWhile => ControlKind::DoWhile,
        other => {
            return Err(source.validation_error(
                format!("{} is not a control statement", other.as_str()),
                span,
            ));
        }
    };

    let nested = formatting
        .clone()
        .with_base_indent("")
        .map_err(|e| source.codegen_error(e, span))?;
    let body = render_statements(&statement.body, &nested, source)?;

    let mut block = ControlBlock::new(kind)
        .with_body(body)
        .with_formatting(formatting.clone());
    if let Some(spec) = &statement.condition {
        block = block.with_condition(condition(spec).map_err(|e| source.codegen_error(e, span))?);
    }
    Ok(block)
}

fn reference(spec: &ReferenceSpec) -> CodegenResult<Reference> {
    let mut reference = Reference::parse(spec.owner.as_deref(), spec.name.as_deref())?
        .with_const(spec.is_const)
        .with_static(spec.is_static);
    if spec.sigil == Some(false) {
        reference = reference.without_sigil();
    }
    match &spec.index {
        Some(IndexSpec::Number(n)) => reference.with_index(Index::Number(*n)),
        Some(IndexSpec::Token(token)) => reference.with_index(as_array_index(token)?),
        None => Ok(reference),
    }
}

fn invocation(spec: &CallSpec) -> CodegenResult<Invocation> {
    let call = match spec.owner.as_deref() {
        Some(owner) => {
            let name = Reference::new(Owner::parse(owner)?, &spec.name)?.with_static(spec.is_static);
            Invocation::new(name)
        }
        None => Invocation::function(&spec.name)?,
    };
    let args = spec.args.iter().map(argument).collect::<CodegenResult<Vec<_>>>()?;
    Ok(call.with_args(args))
}

fn chain(calls: &[CallSpec]) -> CodegenResult<ChainedInvocation> {
    calls
        .iter()
        .try_fold(ChainedInvocation::new(), |chain, call| {
            chain.append(invocation(call)?)
        })
}

fn argument(spec: &ArgSpec) -> CodegenResult<Argument> {
    if let Some(value) = &spec.value {
        return Ok(Argument::scalar(Scalar::from(value)));
    }
    if let Some(spec) = &spec.reference {
        return Ok(Argument::reference(reference(spec)?));
    }
    Ok(Argument::expression(
        spec.expression.clone().unwrap_or_default(),
    ))
}

fn operand(spec: &OperandSpec) -> CodegenResult<Operand> {
    if let Some(value) = &spec.value {
        return Ok(Operand::Scalar(value.into()));
    }
    if let Some(spec) = &spec.reference {
        return Ok(Operand::Reference(reference(spec)?));
    }
    match &spec.call {
        Some(call) => Ok(Operand::Invocation(invocation(call)?)),
        None => Ok(Operand::Scalar(Scalar::Bool(true))),
    }
}

fn condition(spec: &ConditionSpec) -> CodegenResult<Condition> {
    let mut condition = Condition::default();
    if let Some(value) = &spec.value {
        condition = Condition::scalar(Scalar::from(value));
    }
    if let Some(left) = &spec.left {
        condition = condition.with_left(operand(left)?);
    }
    if let Some(op) = &spec.op {
        condition = condition.with_operator_str(op)?;
    }
    if let Some(right) = &spec.right {
        condition = condition.with_right(operand(right)?);
    }
    Ok(condition)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    fn render(toml: &str) -> Vec<String> {
        toml.parse::<Snippet>().unwrap().render().unwrap()
    }

    #[test]
    fn test_reference_spec() {
        let spec = ReferenceSpec {
            owner: Some("self".to_string()),
            name: Some("var".to_string()),
            is_const: true,
            ..Default::default()
        };
        assert_eq!(reference(&spec).unwrap().render(), "self::VAR");

        let spec = ReferenceSpec {
            owner: Some("$model".to_string()),
            name: Some("rows".to_string()),
            is_static: true,
            index: Some(IndexSpec::Token("[]".to_string())),
            ..Default::default()
        };
        assert_eq!(reference(&spec).unwrap().render(), "$model::$rows[]");

        let spec = ReferenceSpec {
            name: Some("PHP_EOL".to_string()),
            sigil: Some(false),
            ..Default::default()
        };
        assert_eq!(reference(&spec).unwrap().render(), "PHP_EOL");
    }

    #[test]
    fn test_assignment_from_reference() {
        let lines = render(
            r#"
            [[statements]]
            kind = "assign"
            target = { name = "x" }
            reference = { owner = "this", name = "y" }
            "#,
        );
        assert_eq!(lines, vec!["$x = $this->y;"]);
    }

    #[test]
    fn test_call_statement() {
        let lines = render(
            r#"
            [[statements]]
            kind = "call"
            call = { owner = "parent", name = "__construct", args = [{ reference = { name = "config" } }] }
            "#,
        );
        assert_eq!(lines, vec!["parent::__construct( $config );"]);
    }

    #[test]
    fn test_if_group_is_chained() {
        let lines = render(
            r#"
            [[statements]]
            kind = "if"
            condition = { left = { reference = { name = "a" } }, op = "==", right = { value = 1 } }
            [[statements.body]]
            kind = "raw"
            lines = ["one();"]

            [[statements]]
            kind = "else"
            [[statements.body]]
            kind = "raw"
            lines = ["other();"]
            "#,
        );
        assert_eq!(
            lines,
            vec![
                "if( $a == 1 ) {",
                "    one();",
                "} else {",
                "    other();",
                "} // end if",
            ]
        );
    }

    #[test]
    fn test_codegen_error_is_labelled_at_token() {
        let src = r#"
            [[statements]]
            kind = "assign"
            target = { name = "bad-name" }
            value = 1
        "#;
        let err = src.parse::<Snippet>().unwrap().render().unwrap_err();
        match *err {
            Error::Codegen { span, source, .. } => {
                assert_eq!(source.value(), Some("bad-name"));
                let span = span.unwrap();
                assert_eq!(&src[span.offset()..span.offset() + span.len()], "bad-name");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
