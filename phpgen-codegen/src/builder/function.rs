//! Function and method frames.
//!
//! A frame is the declaration header plus braces around an opaque body.
//! The target version decides which type decorations are emitted.

use phpgen_core::{validate_identifier, validate_type_hint};

use super::{Formatting, LineBuilder, Render};
use crate::{
    Error, Result,
    expr::{Argument, hint_supported},
};

/// Header length above which arguments are laid out one per line.
const MAX_HEADER_WIDTH: usize = 120;

/// Member visibility of a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Protected => "protected",
            Self::Private => "private",
        }
    }
}

/// A function or method declaration wrapping pre-rendered body lines.
///
/// # Example
///
/// ```
/// use phpgen_codegen::builder::{FunctionFrame, Render, Visibility};
/// use phpgen_codegen::expr::Argument;
///
/// let frame = FunctionFrame::new("find")
///     .unwrap()
///     .visibility(Visibility::Public)
///     .arg(Argument::variable("id").unwrap().with_type_hint("int").unwrap())
///     .returns("?array")
///     .unwrap()
///     .body(["return null;"]);
///
/// assert_eq!(
///     frame.render().unwrap(),
///     vec![
///         "public function find( int $id ) : ?array",
///         "{",
///         "    return null;",
///         "}",
///     ]
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionFrame {
    name: String,
    visibility: Option<Visibility>,
    is_static: bool,
    args: Vec<Argument>,
    return_type: Option<String>,
    body: Vec<String>,
    formatting: Formatting,
}

impl FunctionFrame {
    pub fn new(name: &str) -> Result<Self> {
        if let Some(reason) = validate_identifier(name) {
            return Err(Error::invalid("function name", name, reason));
        }
        Ok(Self {
            name: name.to_string(),
            visibility: None,
            is_static: false,
            args: Vec::new(),
            return_type: None,
            body: Vec::new(),
            formatting: Formatting::process_default(),
        })
    }

    pub fn visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = Some(visibility);
        self
    }

    pub fn static_(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn arg(mut self, arg: Argument) -> Self {
        self.args.push(arg);
        self
    }

    pub fn args(mut self, args: impl IntoIterator<Item = Argument>) -> Self {
        self.args.extend(args);
        self
    }

    /// Declare a return type such as `int`, `?string` or `void`.
    pub fn returns(mut self, ty: &str) -> Result<Self> {
        if let Some(reason) = validate_type_hint(ty) {
            return Err(Error::invalid("return type", ty, reason));
        }
        self.return_type = Some(ty.to_string());
        Ok(self)
    }

    /// Replace the body with opaque lines.
    pub fn body<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.body = lines.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn modifiers(&self) -> String {
        let mut out = String::new();
        if let Some(visibility) = self.visibility {
            out.push_str(visibility.as_str());
            out.push(' ');
        }
        if self.is_static {
            out.push_str("static ");
        }
        out.push_str("function ");
        out.push_str(&self.name);
        out
    }

    fn return_suffix(&self) -> String {
        let version = self.formatting.target_version();
        match self.return_type.as_deref() {
            Some(ty) if version.supports_return_types() && hint_supported(ty, version) => {
                format!(" : {}", ty)
            }
            _ => String::new(),
        }
    }
}

impl Render for FunctionFrame {
    fn formatting(&self) -> &Formatting {
        &self.formatting
    }

    fn with_formatting(mut self, formatting: Formatting) -> Self {
        self.formatting = formatting;
        self
    }

    fn render(&self) -> Result<Vec<String>> {
        let version = self.formatting.target_version();
        let args = self
            .args
            .iter()
            .map(|arg| arg.render_declaration(version))
            .collect::<Result<Vec<_>>>()?;

        let head = self.modifiers();
        let tail = self.return_suffix();
        let one_line = if args.is_empty() {
            format!("{}(){}", head, tail)
        } else {
            format!("{}( {} ){}", head, args.join(", "), tail)
        };

        let mut builder = LineBuilder::new(self.formatting.clone());
        if one_line.len() <= MAX_HEADER_WIDTH {
            builder.push_line(&one_line);
        } else {
            builder.push_line(&format!("{}(", head)).push_indent();
            let last = args.len().saturating_sub(1);
            for (i, arg) in args.iter().enumerate() {
                if i == last {
                    builder.push_line(arg);
                } else {
                    builder.push_line(&format!("{},", arg));
                }
            }
            builder.push_dedent().push_line(&format!("){}", tail));
        }

        let lines = builder
            .line("{")
            .indent()
            .body(self.body.as_slice())
            .dedent()
            .line("}")
            .build();
        Ok(lines)
    }
}
