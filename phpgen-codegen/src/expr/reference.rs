//! References to variables, properties, class members and constants.

use std::fmt;

use phpgen_core::{
    SIGIL, as_variable_name, is_digits, strip_sigil, validate_qualified_name,
    validate_variable_name,
};

use crate::{Error, Result};

const STATIC_SEPARATOR: &str = "::";
const INSTANCE_SEPARATOR: &str = "->";

/// The left-hand qualifier of a reference.
///
/// `self`, `parent` and `$this` are fixed keywords; every other owner is
/// validated when it is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Owner {
    /// Bare variable or function, no qualifier.
    #[default]
    None,
    SelfKw,
    ParentKw,
    ThisKw,
    /// A (fully-qualified) class name, always static context.
    TypeName(String),
    /// A class handle held in a variable (`$obj`), stored without sigil.
    /// Instance context unless `is_static`.
    Handle { name: String, is_static: bool },
}

impl Owner {
    /// A class name owner such as `Foo` or `\Vendor\Foo`.
    pub fn type_name(name: &str) -> Result<Self> {
        if let Some(reason) = validate_qualified_name(name) {
            return Err(Error::invalid("owner class name", name, reason));
        }
        Ok(Self::TypeName(name.to_string()))
    }

    /// A variable-held owner such as `$obj`, in instance context.
    pub fn handle(name: &str) -> Result<Self> {
        if let Some(reason) = validate_variable_name(name) {
            return Err(Error::invalid("owner variable", name, reason));
        }
        Ok(Self::Handle {
            name: strip_sigil(name).to_string(),
            is_static: false,
        })
    }

    /// Classify an owner token: `self`, `parent`, `this`/`$this`, a
    /// `$variable` handle, or a class name.
    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "self" => Ok(Self::SelfKw),
            "parent" => Ok(Self::ParentKw),
            "this" | "$this" => Ok(Self::ThisKw),
            t if t.starts_with(SIGIL) => Self::handle(t),
            t => Self::type_name(t),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Owner equality as far as chaining is concerned: a handle's static
    /// flag does not make it a different owner.
    pub fn same_anchor(&self, other: &Owner) -> bool {
        match (self, other) {
            (Self::Handle { name: a, .. }, Self::Handle { name: b, .. }) => a == b,
            (a, b) => a == b,
        }
    }

    /// The owner token as written in source.
    pub fn token(&self) -> String {
        match self {
            Self::None => String::new(),
            Self::SelfKw => "self".to_string(),
            Self::ParentKw => "parent".to_string(),
            Self::ThisKw => "$this".to_string(),
            Self::TypeName(name) => name.clone(),
            Self::Handle { name, .. } => as_variable_name(name),
        }
    }
}

impl fmt::Display for Owner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.token())
    }
}

/// Array access appended to a reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Index {
    /// `[]`, only meaningful as an assignment target.
    Append,
    /// `[N]`
    Number(i64),
    /// `[$name]`
    Variable(String),
}

impl Index {
    /// A named index, rendered as a variable inside the brackets.
    pub fn variable(name: &str) -> Result<Self> {
        if let Some(reason) = validate_variable_name(name) {
            return Err(Error::invalid("array index", name, reason));
        }
        Ok(Self::Variable(strip_sigil(name).to_string()))
    }

    pub fn render(&self) -> String {
        match self {
            Self::Append => "[]".to_string(),
            Self::Number(n) => format!("[{}]", n),
            Self::Variable(name) => format!("[{}]", as_variable_name(name)),
        }
    }
}

/// Coerce an index token: `""` or `"[]"` appends, an optionally signed
/// digit string is numeric, anything else must be a variable name.
pub fn as_array_index(token: &str) -> Result<Index> {
    let token = token.trim();
    if token.is_empty() || token == "[]" {
        return Ok(Index::Append);
    }
    let digits = token.strip_prefix('-').unwrap_or(token);
    if is_digits(digits) {
        return token
            .parse()
            .map(Index::Number)
            .map_err(|_| Error::invalid("array index", token, "numeric index out of range"));
    }
    Index::variable(token)
}

/// A reference to a named value: variable, property, class member or
/// constant.
///
/// # Example
///
/// ```
/// use phpgen_codegen::expr::{Owner, Reference};
///
/// let var = Reference::new(Owner::SelfKw, "var").unwrap().with_const(true);
/// assert_eq!(var.render(), "self::VAR");
///
/// let prop = Reference::new(Owner::ThisKw, "items").unwrap();
/// assert_eq!(prop.render(), "$this->items");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reference {
    owner: Owner,
    name: Option<String>,
    index: Option<Index>,
    is_const: bool,
    force_sigil: bool,
}

impl Reference {
    /// A reference to `name` on `owner`.
    pub fn new(owner: Owner, name: &str) -> Result<Self> {
        if let Some(reason) = validate_variable_name(name) {
            return Err(Error::invalid("name", name, reason));
        }
        Ok(Self::unchecked(owner, Some(strip_sigil(name).to_string())))
    }

    /// A bare variable, e.g. `$count`.
    pub fn variable(name: &str) -> Result<Self> {
        Self::new(Owner::None, name)
    }

    /// A constant, e.g. `MAX` or `self::MAX`.
    pub fn constant(owner: Owner, name: &str) -> Result<Self> {
        Ok(Self::new(owner, name)?.with_const(true))
    }

    /// The owner alone, e.g. `$this` or `$handler`.
    pub fn owner_only(owner: Owner) -> Self {
        Self::unchecked(owner, None)
    }

    /// Build from string tokens, classifying the owner with
    /// [`Owner::parse`].
    pub fn parse(owner: Option<&str>, name: Option<&str>) -> Result<Self> {
        let owner = match owner {
            Some(token) => Owner::parse(token)?,
            None => Owner::None,
        };
        match name {
            Some(name) => Self::new(owner, name),
            None => Ok(Self::owner_only(owner)),
        }
    }

    pub(crate) fn unchecked(owner: Owner, name: Option<String>) -> Self {
        Self {
            owner,
            name,
            index: None,
            is_const: false,
            force_sigil: true,
        }
    }

    /// Render the name upper-cased with static-style access.
    pub fn with_const(mut self, is_const: bool) -> Self {
        self.is_const = is_const;
        self
    }

    /// Switch a variable-held owner between instance (`->`) and static
    /// (`::`) access. Other owners ignore the flag.
    pub fn with_static(mut self, is_static: bool) -> Self {
        if let Owner::Handle {
            is_static: flag, ..
        } = &mut self.owner
        {
            *flag = is_static;
        }
        self
    }

    /// Whether names that may carry a sigil get one. Disabled for
    /// callables and bare identifiers.
    pub fn with_sigil(mut self, force_sigil: bool) -> Self {
        self.force_sigil = force_sigil;
        self
    }

    pub fn without_sigil(self) -> Self {
        self.with_sigil(false)
    }

    /// Add an array index. A reference without a name cannot be indexed.
    pub fn with_index(mut self, index: Index) -> Result<Self> {
        if self.name.is_none() {
            return Err(Error::invalid(
                "array index",
                index.render(),
                format!("'{}' has no name to index", self.owner),
            ));
        }
        self.index = Some(index);
        Ok(self)
    }

    pub(crate) fn with_owner(mut self, owner: Owner) -> Self {
        self.owner = owner;
        self
    }

    pub fn owner(&self) -> &Owner {
        &self.owner
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn index(&self) -> Option<&Index> {
        self.index.as_ref()
    }

    pub fn is_const(&self) -> bool {
        self.is_const
    }

    pub fn is_append(&self) -> bool {
        matches!(self.index, Some(Index::Append))
    }

    /// Render as source text, without indentation or terminator.
    pub fn render(&self) -> String {
        let mut out = self.owner.token();
        if self.render_name(&mut out) {
            if let Some(index) = &self.index {
                out.push_str(&index.render());
            }
        }
        out
    }

    /// Render the name part without the owner token, as it follows `->`
    /// in a call chain.
    pub(crate) fn render_member(&self) -> String {
        match self.name.as_deref() {
            Some(name) if self.is_const => name.to_uppercase(),
            Some(name) => name.to_string(),
            None => String::new(),
        }
    }

    fn render_name(&self, out: &mut String) -> bool {
        let Some(name) = self.name.as_deref().filter(|n| !n.is_empty()) else {
            return false;
        };

        if self.is_const {
            if !self.owner.is_none() {
                out.push_str(STATIC_SEPARATOR);
            }
            out.push_str(&name.to_uppercase());
            return true;
        }

        match &self.owner {
            Owner::None => out.push_str(&self.decorate(name)),
            Owner::SelfKw
            | Owner::ParentKw
            | Owner::TypeName(_)
            | Owner::Handle {
                is_static: true, ..
            } => {
                out.push_str(STATIC_SEPARATOR);
                out.push_str(&self.decorate(name));
            }
            Owner::ThisKw
            | Owner::Handle {
                is_static: false, ..
            } => {
                out.push_str(INSTANCE_SEPARATOR);
                out.push_str(name);
            }
        }
        true
    }

    fn decorate(&self, name: &str) -> String {
        if self.force_sigil {
            as_variable_name(name)
        } else {
            name.to_string()
        }
    }
}

impl fmt::Display for Reference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handle(name: &str) -> Owner {
        Owner::handle(name).unwrap()
    }

    #[test]
    fn test_owner_parse() {
        assert_eq!(Owner::parse("self").unwrap(), Owner::SelfKw);
        assert_eq!(Owner::parse("parent").unwrap(), Owner::ParentKw);
        assert_eq!(Owner::parse("this").unwrap(), Owner::ThisKw);
        assert_eq!(Owner::parse("$this").unwrap(), Owner::ThisKw);
        assert_eq!(Owner::parse("$obj").unwrap(), handle("obj"));
        assert_eq!(
            Owner::parse("\\App\\Model").unwrap(),
            Owner::TypeName("\\App\\Model".into())
        );
    }

    #[test]
    fn test_owner_parse_rejects_garbage() {
        assert!(Owner::parse("$1abc").is_err());
        assert!(Owner::parse("Foo\\").is_err());
        assert!(Owner::parse("a-b").is_err());
        assert!(Owner::parse("").is_err());
    }

    #[test]
    fn test_bare_variable() {
        assert_eq!(Reference::variable("x").unwrap().render(), "$x");
        assert_eq!(Reference::variable("$x").unwrap().render(), "$x");
        assert_eq!(
            Reference::variable("PHP_EOL").unwrap().without_sigil().render(),
            "PHP_EOL"
        );
    }

    #[test]
    fn test_keyword_owners() {
        let self_ref = Reference::new(Owner::SelfKw, "count").unwrap();
        assert_eq!(self_ref.render(), "self::$count");

        let parent_ref = Reference::new(Owner::ParentKw, "$count").unwrap();
        assert_eq!(parent_ref.render(), "parent::$count");

        let this_ref = Reference::new(Owner::ThisKw, "$count").unwrap();
        assert_eq!(this_ref.render(), "$this->count");
    }

    #[test]
    fn test_handle_owner() {
        let instance = Reference::new(handle("obj"), "prop").unwrap();
        assert_eq!(instance.render(), "$obj->prop");

        let class_static = Reference::new(handle("class"), "prop")
            .unwrap()
            .with_static(true);
        assert_eq!(class_static.render(), "$class::$prop");
    }

    #[test]
    fn test_type_name_owner() {
        let owner = Owner::type_name("\\App\\Config").unwrap();
        let reference = Reference::new(owner, "instance").unwrap();
        assert_eq!(reference.render(), "\\App\\Config::$instance");
    }

    #[test]
    fn test_static_flag_ignored_for_other_owners() {
        let reference = Reference::new(Owner::ThisKw, "x").unwrap().with_static(true);
        assert_eq!(reference.render(), "$this->x");
    }

    #[test]
    fn test_constants() {
        assert_eq!(
            Reference::constant(Owner::SelfKw, "var").unwrap().render(),
            "self::VAR"
        );
        assert_eq!(
            Reference::constant(Owner::None, "max_size").unwrap().render(),
            "MAX_SIZE"
        );
        assert_eq!(
            Reference::constant(Owner::type_name("Foo").unwrap(), "$bar")
                .unwrap()
                .render(),
            "Foo::BAR"
        );
    }

    #[test]
    fn test_owner_only() {
        assert_eq!(Reference::owner_only(Owner::ThisKw).render(), "$this");
        assert_eq!(Reference::owner_only(handle("fn")).render(), "$fn");
    }

    #[test]
    fn test_indexes() {
        let append = Reference::variable("list")
            .unwrap()
            .with_index(Index::Append)
            .unwrap();
        assert_eq!(append.render(), "$list[]");
        assert!(append.is_append());

        let numeric = Reference::new(Owner::ThisKw, "items")
            .unwrap()
            .with_index(Index::Number(3))
            .unwrap();
        assert_eq!(numeric.render(), "$this->items[3]");

        let named = Reference::variable("map")
            .unwrap()
            .with_index(Index::variable("key").unwrap())
            .unwrap();
        assert_eq!(named.render(), "$map[$key]");
    }

    #[test]
    fn test_index_requires_name() {
        let result = Reference::owner_only(Owner::ThisKw).with_index(Index::Number(0));
        assert!(matches!(result, Err(Error::InvalidArgument { .. })));
    }

    #[test]
    fn test_as_array_index() {
        assert_eq!(as_array_index("").unwrap(), Index::Append);
        assert_eq!(as_array_index("[]").unwrap(), Index::Append);
        assert_eq!(as_array_index("12").unwrap(), Index::Number(12));
        assert_eq!(as_array_index("-1").unwrap(), Index::Number(-1));
        assert_eq!(as_array_index("$key").unwrap(), Index::Variable("key".into()));
        assert_eq!(as_array_index("key").unwrap(), Index::Variable("key".into()));
        assert!(as_array_index("a b").is_err());
    }

    #[test]
    fn test_invalid_names() {
        assert!(Reference::variable("").is_err());
        assert!(Reference::variable("$$x").is_err());
        assert!(Reference::variable("9x").is_err());
        assert!(Reference::parse(Some("Foo"), Some("a.b")).is_err());
    }

    #[test]
    fn test_never_double_sigil() {
        let owners = [
            Owner::None,
            Owner::SelfKw,
            Owner::ParentKw,
            Owner::ThisKw,
            Owner::type_name("Foo").unwrap(),
            handle("obj"),
        ];
        for owner in owners {
            for is_const in [false, true] {
                for is_static in [false, true] {
                    let rendered = Reference::new(owner.clone(), "$name")
                        .unwrap()
                        .with_const(is_const)
                        .with_static(is_static)
                        .render();
                    assert!(!rendered.contains("$$"), "{}", rendered);
                    assert!(rendered.to_lowercase().ends_with("name"), "{}", rendered);
                }
            }
        }
    }

    #[test]
    fn test_member_rendering_drops_owner() {
        let reference = Reference::new(Owner::type_name("Foo").unwrap(), "create")
            .unwrap()
            .without_sigil();
        assert_eq!(reference.render(), "Foo::create");
        assert_eq!(reference.render_member(), "create");
    }
}
