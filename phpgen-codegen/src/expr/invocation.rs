//! Function and method invocations.

use phpgen_core::{PhpVersion, validate_qualified_name, validate_type_hint};

use super::{Owner, Reference, Scalar};
use crate::{
    Error, Result,
    builder::{Formatting, Render, render::indent_lines},
};

/// Scalar type hints that need PHP 7.0.
const SCALAR_HINTS: &[&str] = &["bool", "int", "float", "string"];

/// What an argument passes, or declares.
#[derive(Debug, Clone, PartialEq)]
pub enum ArgValue {
    Reference(Reference),
    Scalar(Scalar),
    /// Source text spliced verbatim.
    Expression(String),
    Invocation(Box<Invocation>),
}

/// One argument of an invocation or function declaration.
///
/// Type hint, by-reference marker and default only appear in
/// declarations; calls render the value alone.
#[derive(Debug, Clone, PartialEq)]
pub struct Argument {
    value: ArgValue,
    type_hint: Option<String>,
    default: Option<String>,
    by_ref: bool,
    variadic: bool,
}

impl Argument {
    fn new(value: ArgValue) -> Self {
        Self {
            value,
            type_hint: None,
            default: None,
            by_ref: false,
            variadic: false,
        }
    }

    /// A plain variable argument, e.g. `$id`.
    pub fn variable(name: &str) -> Result<Self> {
        Ok(Self::reference(Reference::variable(name)?))
    }

    pub fn reference(reference: Reference) -> Self {
        Self::new(ArgValue::Reference(reference))
    }

    pub fn scalar(value: impl Into<Scalar>) -> Self {
        Self::new(ArgValue::Scalar(value.into()))
    }

    pub fn expression(expr: impl Into<String>) -> Self {
        Self::new(ArgValue::Expression(expr.into()))
    }

    pub fn invocation(invocation: Invocation) -> Self {
        Self::new(ArgValue::Invocation(Box::new(invocation)))
    }

    /// Declare a type hint, e.g. `int`, `?string`, `\App\User|null`.
    pub fn with_type_hint(mut self, hint: &str) -> Result<Self> {
        if let Some(reason) = validate_type_hint(hint) {
            return Err(Error::invalid("type hint", hint, reason));
        }
        self.type_hint = Some(hint.to_string());
        Ok(self)
    }

    /// Declare a literal default value.
    pub fn with_default(mut self, value: impl Into<Scalar>) -> Self {
        self.default = Some(value.into().render());
        self
    }

    /// Declare a default given as source text, e.g. `null` or `[]`.
    pub fn with_default_expression(mut self, expr: impl Into<String>) -> Self {
        self.default = Some(expr.into());
        self
    }

    pub fn by_reference(mut self) -> Self {
        self.by_ref = true;
        self
    }

    pub fn variadic(mut self) -> Self {
        self.variadic = true;
        self
    }

    pub fn value(&self) -> &ArgValue {
        &self.value
    }

    pub fn type_hint(&self) -> Option<&str> {
        self.type_hint.as_deref()
    }

    /// Render as passed in a call: value only.
    pub(crate) fn render_call(&self) -> Result<String> {
        let value = match &self.value {
            ArgValue::Reference(reference) => reference.render(),
            ArgValue::Scalar(scalar) => scalar.render(),
            ArgValue::Expression(expr) => expr.clone(),
            ArgValue::Invocation(invocation) => invocation.expr_lines()?.join("\n"),
        };
        Ok(if self.variadic {
            format!("...{}", value)
        } else {
            value
        })
    }

    /// Render as declared in a function signature.
    pub(crate) fn render_declaration(&self, version: PhpVersion) -> Result<String> {
        let name = match &self.value {
            ArgValue::Reference(reference)
                if reference.owner().is_none() && reference.index().is_none() =>
            {
                reference.render()
            }
            _ => {
                return Err(Error::structural(
                    "function frame",
                    "declared arguments must be plain variables",
                ));
            }
        };

        let mut out = String::new();
        if let Some(hint) = self.type_hint.as_deref().filter(|h| hint_supported(h, version)) {
            out.push_str(hint);
            out.push(' ');
        }
        if self.by_ref {
            out.push('&');
        }
        if self.variadic {
            out.push_str("...");
        }
        out.push_str(&name);
        if let Some(default) = &self.default {
            out.push_str(" = ");
            out.push_str(default);
        }
        Ok(out)
    }
}

/// Whether a type hint may be emitted for the target version.
pub(crate) fn hint_supported(hint: &str, version: PhpVersion) -> bool {
    if hint.starts_with('?') && !version.supports_nullable_types() {
        return false;
    }
    if hint.contains('|') && !version.at_least(8, 0) {
        return false;
    }
    let bare = hint.trim_start_matches('?');
    if SCALAR_HINTS.contains(&bare) && !version.supports_return_types() {
        return false;
    }
    true
}

/// A callable name plus an ordered argument list.
///
/// # Example
///
/// ```
/// use phpgen_codegen::builder::Render;
/// use phpgen_codegen::expr::{Argument, Invocation, Owner};
///
/// let call = Invocation::method(Owner::ThisKw, "load")
///     .unwrap()
///     .with_arg(Argument::variable("id").unwrap())
///     .with_arg(Argument::scalar(true));
///
/// assert_eq!(call.render().unwrap(), vec!["$this->load( $id, true )"]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    name: Reference,
    args: Vec<Argument>,
    formatting: Formatting,
}

impl Invocation {
    /// Invoke whatever `name` refers to. The name is never given a sigil.
    pub fn new(name: Reference) -> Self {
        Self {
            name: name.without_sigil(),
            args: Vec::new(),
            formatting: Formatting::process_default(),
        }
    }

    /// A plain function call; the name may be namespace-qualified.
    pub fn function(name: &str) -> Result<Self> {
        if let Some(reason) = validate_qualified_name(name) {
            return Err(Error::invalid("function name", name, reason));
        }
        Ok(Self::new(Reference::unchecked(
            Owner::None,
            Some(name.to_string()),
        )))
    }

    /// A method call on `owner`.
    pub fn method(owner: Owner, name: &str) -> Result<Self> {
        Ok(Self::new(Reference::new(owner, name)?))
    }

    pub fn with_arg(mut self, arg: Argument) -> Self {
        self.args.push(arg);
        self
    }

    pub fn with_args(mut self, args: impl IntoIterator<Item = Argument>) -> Self {
        self.args.extend(args);
        self
    }

    pub fn name(&self) -> &Reference {
        &self.name
    }

    pub fn owner(&self) -> &Owner {
        self.name.owner()
    }

    pub fn args(&self) -> &[Argument] {
        &self.args
    }

    pub(crate) fn with_owner(mut self, owner: Owner) -> Self {
        self.name = self.name.with_owner(owner);
        self
    }

    fn has_name(&self) -> bool {
        self.name.name().is_some() || !self.owner().is_none()
    }

    /// Lines of the call as written after its callee prefix. The first line
    /// is unindented, continuation lines come verbatim.
    fn raw_lines(&self, callee: String) -> Result<Vec<String>> {
        if !self.has_name() && self.args.is_empty() {
            return Err(Error::structural("invocation", "no name or arguments set"));
        }

        let args = self
            .args
            .iter()
            .map(Argument::render_call)
            .collect::<Result<Vec<_>>>()?;
        let text = if args.is_empty() {
            format!("{}()", callee)
        } else {
            format!("{}( {} )", callee, args.join(", "))
        };
        Ok(text.lines().map(str::to_string).collect())
    }

    /// Expression lines without base indent or terminator; continuation
    /// lines of a multi-line call are indented one level.
    pub(crate) fn expr_lines(&self) -> Result<Vec<String>> {
        let lines = self.raw_lines(self.name.render())?;
        Ok(self.nest(lines, 1))
    }

    /// Lines of the call with its owner dropped, as it follows `->` in a
    /// chain. Continuation lines come unindented.
    pub(crate) fn member_lines(&self) -> Result<Vec<String>> {
        self.raw_lines(self.name.render_member())
    }

    /// The call on a single line, for use inside conditions.
    pub(crate) fn inline(&self) -> Result<String> {
        let lines = self.raw_lines(self.name.render())?;
        Ok(lines
            .iter()
            .map(|line| line.trim())
            .collect::<Vec<_>>()
            .join(" "))
    }

    fn nest(&self, lines: Vec<String>, level: usize) -> Vec<String> {
        let indent = self.formatting.indent().repeat(level);
        lines
            .into_iter()
            .enumerate()
            .map(|(i, line)| {
                if i == 0 || line.is_empty() {
                    line
                } else {
                    format!("{}{}", indent, line)
                }
            })
            .collect()
    }
}

impl Render for Invocation {
    fn formatting(&self) -> &Formatting {
        &self.formatting
    }

    fn with_formatting(mut self, formatting: Formatting) -> Self {
        self.formatting = formatting;
        self
    }

    /// Render as an expression, without terminator.
    fn render(&self) -> Result<Vec<String>> {
        Ok(indent_lines(&self.formatting, self.expr_lines()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_function_call_without_args() {
        let call = Invocation::function("time").unwrap();
        assert_eq!(call.render().unwrap(), vec!["time()"]);
    }

    #[test]
    fn test_namespaced_function() {
        let call = Invocation::function("\\App\\helper")
            .unwrap()
            .with_arg(Argument::scalar("x"));
        assert_eq!(call.render().unwrap(), vec!["\\App\\helper( \"x\" )"]);
    }

    #[test]
    fn test_static_call_never_gets_sigil() {
        let call = Invocation::method(Owner::type_name("Builder").unwrap(), "create")
            .unwrap()
            .with_arg(Argument::variable("a").unwrap());
        assert_eq!(call.render().unwrap(), vec!["Builder::create( $a )"]);

        let call = Invocation::method(Owner::SelfKw, "make").unwrap();
        assert_eq!(call.render().unwrap(), vec!["self::make()"]);
    }

    #[test]
    fn test_variable_function_call() {
        let call = Invocation::new(Reference::owner_only(Owner::handle("fn").unwrap()))
            .with_arg(Argument::scalar(1));
        assert_eq!(call.render().unwrap(), vec!["$fn( 1 )"]);
    }

    #[test]
    fn test_call_suppresses_declaration_details() {
        let arg = Argument::variable("items")
            .unwrap()
            .with_type_hint("array")
            .unwrap()
            .with_default_expression("[]")
            .by_reference();
        let call = Invocation::function("sort").unwrap().with_arg(arg);
        assert_eq!(call.render().unwrap(), vec!["sort( $items )"]);
    }

    #[test]
    fn test_spread_argument() {
        let call = Invocation::function("max")
            .unwrap()
            .with_arg(Argument::variable("values").unwrap().variadic());
        assert_eq!(call.render().unwrap(), vec!["max( ...$values )"]);
    }

    #[test]
    fn test_nested_invocation_argument() {
        let inner = Invocation::function("trim")
            .unwrap()
            .with_arg(Argument::variable("s").unwrap());
        let call = Invocation::function("strlen")
            .unwrap()
            .with_arg(Argument::invocation(inner));
        assert_eq!(call.render().unwrap(), vec!["strlen( trim( $s ) )"]);
    }

    #[test]
    fn test_multi_line_argument_is_nested() {
        let call = Invocation::function("array_map")
            .unwrap()
            .with_arg(Argument::expression("function( $x ) {\nreturn $x * 2;\n}"))
            .with_arg(Argument::variable("list").unwrap());
        assert_eq!(
            call.render().unwrap(),
            vec![
                "array_map( function( $x ) {",
                "    return $x * 2;",
                "    }, $list )",
            ]
        );
    }

    #[test]
    fn test_base_indent_applies_to_every_line() {
        let formatting = Formatting::default().with_base_indent("  ").unwrap();
        let call = Invocation::function("f")
            .unwrap()
            .with_arg(Argument::expression("a\nb"))
            .with_formatting(formatting);
        assert_eq!(call.render().unwrap(), vec!["  f( a", "      b )"]);
    }

    #[test]
    fn test_empty_invocation_is_structural_error() {
        let call = Invocation::new(Reference::owner_only(Owner::None));
        assert!(matches!(call.render(), Err(Error::Structural { .. })));
    }

    #[test]
    fn test_invalid_names() {
        assert!(Invocation::function("1st").is_err());
        assert!(Invocation::method(Owner::ThisKw, "do-it").is_err());
        assert!(
            Argument::variable("x")
                .unwrap()
                .with_type_hint("in t")
                .is_err()
        );
    }

    #[test]
    fn test_declaration_rendering() {
        let arg = Argument::variable("name")
            .unwrap()
            .with_type_hint("?string")
            .unwrap()
            .with_default_expression("null");
        assert_eq!(
            arg.render_declaration(PhpVersion::new(8, 0, 0)).unwrap(),
            "?string $name = null"
        );
        assert_eq!(
            arg.render_declaration(PhpVersion::new(7, 0, 0)).unwrap(),
            "$name = null"
        );

        let by_ref = Argument::variable("out").unwrap().by_reference();
        assert_eq!(
            by_ref.render_declaration(PhpVersion::default()).unwrap(),
            "&$out"
        );

        assert!(
            Argument::scalar(1)
                .render_declaration(PhpVersion::default())
                .is_err()
        );
    }

    #[test]
    fn test_hint_supported() {
        let php56 = PhpVersion::new(5, 6, 0);
        assert!(hint_supported("array", php56));
        assert!(hint_supported("\\App\\User", php56));
        assert!(!hint_supported("int", php56));
        assert!(hint_supported("int", PhpVersion::new(7, 0, 0)));
        assert!(!hint_supported("int|string", PhpVersion::new(7, 4, 0)));
        assert!(hint_supported("int|string", PhpVersion::new(8, 0, 0)));
    }
}
