//! PHP identifier grammar and the named coercions built on it.
//!
//! Validators return `None` when the input is valid and `Some(reason)`
//! otherwise, so callers can wrap the reason into their own error type.

/// Leading marker of a runtime variable.
pub const SIGIL: char = '$';

/// Namespace separator in a fully-qualified type name.
pub const NS_SEPARATOR: char = '\\';

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_' || !c.is_ascii()
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

/// Validate a bare PHP label (`[a-zA-Z_\x80-\xff][a-zA-Z0-9_\x80-\xff]*`).
pub fn validate_identifier(name: &str) -> Option<&'static str> {
    let mut chars = name.chars();

    match chars.next() {
        Some(c) if is_ident_start(c) => {}
        Some(_) => return Some("name must start with a letter or underscore"),
        None => return Some("name cannot be empty"),
    }

    if chars.all(is_ident_continue) {
        None
    } else {
        Some("name must contain only letters, numbers and underscores")
    }
}

/// Validate a variable name, with or without its leading sigil.
pub fn validate_variable_name(name: &str) -> Option<&'static str> {
    validate_identifier(strip_sigil(name))
}

/// Validate a (possibly fully-qualified) type name such as `\Foo\Bar`.
pub fn validate_qualified_name(name: &str) -> Option<&'static str> {
    let unrooted = name.strip_prefix(NS_SEPARATOR).unwrap_or(name);
    if unrooted.is_empty() {
        return Some("type name cannot be empty");
    }

    for segment in unrooted.split(NS_SEPARATOR) {
        if segment.is_empty() {
            return Some("type name cannot contain an empty namespace segment");
        }
        if let Some(reason) = validate_identifier(segment) {
            return Some(reason);
        }
    }
    None
}

/// Validate a parameter or return type hint: `?T` or a `|` union of
/// qualified names.
pub fn validate_type_hint(hint: &str) -> Option<&'static str> {
    let (nullable, body) = match hint.strip_prefix('?') {
        Some(rest) => (true, rest),
        None => (false, hint),
    };
    if body.is_empty() {
        return Some("type hint cannot be empty");
    }
    if nullable && body.contains('|') {
        return Some("nullable shorthand cannot be combined with a union");
    }
    body.split('|').find_map(validate_qualified_name)
}

/// Remove one leading sigil, if present.
pub fn strip_sigil(name: &str) -> &str {
    name.strip_prefix(SIGIL).unwrap_or(name)
}

/// Coerce a name into variable form, adding the sigil when missing.
///
/// Never produces a double sigil.
pub fn as_variable_name(name: &str) -> String {
    format!("{}{}", SIGIL, strip_sigil(name))
}

/// Check whether a string is composed solely of ASCII digits.
pub fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        assert!(validate_identifier("hello").is_none());
        assert!(validate_identifier("hello_world").is_none());
        assert!(validate_identifier("_private").is_none());
        assert!(validate_identifier("arg1").is_none());
        assert!(validate_identifier("größe").is_none());
    }

    #[test]
    fn test_invalid_identifiers() {
        assert_eq!(validate_identifier(""), Some("name cannot be empty"));
        assert!(validate_identifier("1abc").is_some());
        assert!(validate_identifier("my-var").is_some());
        assert!(validate_identifier("$var").is_some());
        assert!(validate_identifier("a b").is_some());
    }

    #[test]
    fn test_variable_names() {
        assert!(validate_variable_name("$var").is_none());
        assert!(validate_variable_name("var").is_none());
        assert!(validate_variable_name("$$var").is_some());
        assert!(validate_variable_name("$").is_some());
    }

    #[test]
    fn test_qualified_names() {
        assert!(validate_qualified_name("Foo").is_none());
        assert!(validate_qualified_name("\\Foo").is_none());
        assert!(validate_qualified_name("Vendor\\Package\\Foo").is_none());
        assert!(validate_qualified_name("\\Vendor\\Foo_2").is_none());
        assert!(validate_qualified_name("").is_some());
        assert!(validate_qualified_name("\\").is_some());
        assert!(validate_qualified_name("Foo\\").is_some());
        assert!(validate_qualified_name("Foo\\\\Bar").is_some());
        assert!(validate_qualified_name("$foo").is_some());
        assert!(validate_qualified_name("9Lives").is_some());
    }

    #[test]
    fn test_type_hints() {
        assert!(validate_type_hint("int").is_none());
        assert!(validate_type_hint("?string").is_none());
        assert!(validate_type_hint("\\App\\User|null").is_none());
        assert!(validate_type_hint("").is_some());
        assert!(validate_type_hint("?").is_some());
        assert!(validate_type_hint("?int|string").is_some());
        assert!(validate_type_hint("int|").is_some());
        assert!(validate_type_hint("in t").is_some());
    }

    #[test]
    fn test_sigil_coercion() {
        assert_eq!(strip_sigil("$var"), "var");
        assert_eq!(strip_sigil("var"), "var");
        assert_eq!(as_variable_name("var"), "$var");
        assert_eq!(as_variable_name("$var"), "$var");
    }

    #[test]
    fn test_is_digits() {
        assert!(is_digits("0"));
        assert!(is_digits("1234"));
        assert!(!is_digits(""));
        assert!(!is_digits("-1"));
        assert!(!is_digits("1.5"));
        assert!(!is_digits("12a"));
    }
}
