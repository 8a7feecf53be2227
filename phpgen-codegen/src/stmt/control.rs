//! Control-structure blocks wrapping opaque body lines.

use std::fmt;

use crate::{
    Error, Result,
    builder::{Formatting, LineBuilder, Render},
    expr::Condition,
};

/// The kind of a control block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlKind {
    If,
    ElseIf,
    Else,
    Switch,
    Case,
    Default,
    While,
    DoWhile,
}

impl ControlKind {
    pub fn as_str(&self) -> &'static str {
        match self {
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

    /// Whether this kind must not carry a condition.
    pub fn is_unconditional(&self) -> bool {
        matches!(self, Self::Else | Self::Default)
    }
}

impl fmt::Display for ControlKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A control structure around pre-rendered body lines.
///
/// Body lines are spliced verbatim, indented at the block's depth. `case`
/// and `default` blocks sit one level inside their switch and get a
/// `break;` appended; callers must not add their own.
///
/// `elseif` and `else` continue a preceding `if`: they open with `} ` to
/// close the previous block and close the whole statement with
/// `} // end if`. Splice one after an `if` whose closing line was dropped,
/// or use [`ControlBlock::render_chain`], which does exactly that.
///
/// # Example
///
/// ```
/// use phpgen_codegen::builder::Render;
/// use phpgen_codegen::expr::{ComparisonOp, Condition, Reference};
/// use phpgen_codegen::stmt::ControlBlock;
///
/// let cond = Condition::binary(Reference::variable("a").unwrap(), ComparisonOp::Eq, 1);
/// let block = ControlBlock::if_(cond).with_body(["/*x*/"]);
///
/// assert_eq!(
///     block.render().unwrap(),
///     vec!["if( $a == 1 ) {", "    /*x*/", "} // end if"]
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ControlBlock {
    kind: ControlKind,
    condition: Option<Condition>,
    body: Vec<String>,
    formatting: Formatting,
}

impl ControlBlock {
    pub fn new(kind: ControlKind) -> Self {
        Self {
            kind,
            condition: None,
            body: Vec::new(),
            formatting: Formatting::process_default(),
        }
    }

    pub fn if_(condition: Condition) -> Self {
        Self::new(ControlKind::If).with_condition(condition)
    }

    pub fn else_if(condition: Condition) -> Self {
        Self::new(ControlKind::ElseIf).with_condition(condition)
    }

    pub fn else_() -> Self {
        Self::new(ControlKind::Else)
    }

    pub fn switch(subject: Condition) -> Self {
        Self::new(ControlKind::Switch).with_condition(subject)
    }

    pub fn case(value: Condition) -> Self {
        Self::new(ControlKind::Case).with_condition(value)
    }

    pub fn default_() -> Self {
        Self::new(ControlKind::Default)
    }

    pub fn while_(condition: Condition) -> Self {
        Self::new(ControlKind::While).with_condition(condition)
    }

    pub fn do_while(condition: Condition) -> Self {
        Self::new(ControlKind::DoWhile).with_condition(condition)
    }

    pub fn with_kind(mut self, kind: ControlKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.condition = Some(condition);
        self
    }

    /// Replace the body with opaque lines.
    pub fn with_body<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body = lines.into_iter().map(Into::into).collect();
        self
    }

    /// Append one body line (mutable).
    pub fn push_body_line(&mut self, line: impl Into<String>) -> &mut Self {
        self.body.push(line.into());
        self
    }

    pub fn kind(&self) -> ControlKind {
        self.kind
    }

    pub fn condition(&self) -> Option<&Condition> {
        self.condition.as_ref()
    }

    pub fn body(&self) -> &[String] {
        &self.body
    }

    /// Condition text for the header, checked against the kind.
    fn header_condition(&self) -> Result<Option<String>> {
        let builder = self.builder_name();
        let condition = self.condition.as_ref().filter(|c| c.is_set());

        if self.kind.is_unconditional() {
            return match condition {
                Some(_) => Err(Error::structural(builder, "takes no condition")),
                None => Ok(None),
            };
        }

        let Some(condition) = condition else {
            return Err(Error::structural(builder, "no condition set"));
        };
        if matches!(self.kind, ControlKind::If | ControlKind::ElseIf)
            && !(condition.is_single() || condition.is_complete_binary())
        {
            return Err(Error::structural(
                builder,
                "condition needs a single operand or both sides of a comparison",
            ));
        }

        let text = match self.kind {
            ControlKind::Case => condition.render()?,
            _ => condition.render_inner()?,
        };
        Ok(Some(text))
    }

    fn builder_name(&self) -> &'static str {
        match self.kind {
            ControlKind::If => "if block",
            ControlKind::ElseIf => "elseif block",
            ControlKind::Else => "else block",
            ControlKind::Switch => "switch block",
            ControlKind::Case => "case block",
            ControlKind::Default => "default block",
            ControlKind::While => "while block",
            ControlKind::DoWhile => "do-while block",
        }
    }

    fn opening(&self, condition: Option<&str>) -> String {
        let condition = condition.unwrap_or_default();
        match self.kind {
            ControlKind::If => format!("if( {} ) {{", condition),
            ControlKind::ElseIf => format!("}} elseif( {} ) {{", condition),
            ControlKind::Else => "} else {".to_string(),
            ControlKind::Switch => format!("switch( {} ) {{", condition),
            ControlKind::Case => format!("case {} :", condition),
            ControlKind::Default => "default :".to_string(),
            ControlKind::While => format!("while( {} ) {{", condition),
            ControlKind::DoWhile => "do {".to_string(),
        }
    }

    fn closing(&self, condition: Option<&str>) -> String {
        match self.kind {
            ControlKind::DoWhile => format!("}} while( {} );", condition.unwrap_or_default()),
            ControlKind::Case | ControlKind::Default => "break;".to_string(),
            ControlKind::ElseIf | ControlKind::Else => "} // end if".to_string(),
            kind => format!("}} // end {}", kind),
        }
    }

    /// Render an `if` followed by `elseif` blocks and an optional `else`
    /// as one statement.
    ///
    /// The formatting of the first block applies to the whole statement.
    pub fn render_chain(blocks: &[ControlBlock]) -> Result<Vec<String>> {
        let Some((first, rest)) = blocks.split_first() else {
            return Err(Error::structural("if chain", "no blocks given"));
        };
        if first.kind != ControlKind::If {
            return Err(Error::structural(
                "if chain",
                format!("must start with if, not {}", first.kind),
            ));
        }
        for (i, block) in rest.iter().enumerate() {
            let is_last = i + 1 == rest.len();
            match block.kind {
                ControlKind::ElseIf => {}
                ControlKind::Else if is_last => {}
                ControlKind::Else => {
                    return Err(Error::structural("if chain", "else must be the last block"));
                }
                kind => {
                    return Err(Error::structural(
                        "if chain",
                        format!("{} cannot continue an if", kind),
                    ));
                }
            }
        }

        let mut builder = LineBuilder::new(first.formatting.clone());
        for block in blocks {
            let condition = block.header_condition()?;
            builder
                .push_line(&block.opening(condition.as_deref()))
                .push_indent()
                .push_body(block.body.as_slice())
                .push_dedent();
        }
        builder.push_line("} // end if");
        Ok(builder.build())
    }
}

impl Render for ControlBlock {
    fn formatting(&self) -> &Formatting {
        &self.formatting
    }

    fn with_formatting(mut self, formatting: Formatting) -> Self {
        self.formatting = formatting;
        self
    }

    fn render(&self) -> Result<Vec<String>> {
        let condition = self.header_condition()?;
        let opening = self.opening(condition.as_deref());
        let closing = self.closing(condition.as_deref());
        let builder = LineBuilder::new(self.formatting.clone());

        let lines = match self.kind {
            ControlKind::Switch => builder
                .line(&opening)
                .body(self.body.as_slice())
                .line(&closing)
                .build(),
            ControlKind::Case | ControlKind::Default => builder
                .indent()
                .line(&opening)
                .indent()
                .body(self.body.as_slice())
                .line(&closing)
                .build(),
            _ => builder
                .block_with_close(&opening, &closing, |b| b.body(self.body.as_slice()))
                .build(),
        };
        Ok(lines)
    }
}
