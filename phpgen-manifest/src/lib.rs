//! TOML snippet manifests for phpgen.
//!
//! A snippet file describes a sequence of PHP statements declaratively; this
//! crate parses and validates it, maps each statement onto the builders of
//! `phpgen-codegen` and renders the result.
//!
//! ```
//! use phpgen_manifest::Snippet;
//!
//! let snippet: Snippet = r#"
//!     [[statements]]
//!     kind = "return"
//!     reference = { owner = "this", name = "items" }
//! "#
//! .parse()
//! .unwrap();
//!
//! assert_eq!(snippet.render().unwrap(), vec!["return $this->items;"]);
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

mod error;
mod snippet;

pub use error::{Error, Result, SourceContext};
pub use snippet::{
    ArgSpec, CallSpec, ConditionSpec, IndexSpec, OperandSpec, ReferenceSpec, ScalarValue, Snippet,
    SnippetFile, Statement, StatementKind, parse_snippet,
};
