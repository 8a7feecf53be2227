//! Core utilities and types for the phpgen PHP code generator.
//!
//! This crate provides the identifier grammar and target-version types
//! shared by the builder and manifest crates.

mod ident;
mod version;

// Identifier grammar and coercions
pub use ident::{
    SIGIL, as_variable_name, is_digits, strip_sigil, validate_identifier, validate_qualified_name,
    validate_type_hint, validate_variable_name,
};
pub use version::PhpVersion;
