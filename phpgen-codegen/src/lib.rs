//! PHP source-fragment builders.
//!
//! Every builder is a plain value holding a copy of its [`Formatting`]
//! and renders to a sequence of lines without terminators.
//!
//! # Module Organization
//!
//! - [`builder`] - Formatting, line accumulation, the [`Render`] trait and function frames
//! - [`expr`] - Scalars, references, invocations, chains, conditions and ternaries
//! - [`stmt`] - Assignments, returns and control-structure blocks
//!
//! # Example
//!
//! ```
//! use phpgen_codegen::builder::Render;
//! use phpgen_codegen::expr::{Argument, ChainedInvocation, Invocation, Owner, Reference};
//! use phpgen_codegen::stmt::{Assignment, WithSource};
//!
//! let chain = ChainedInvocation::new()
//!     .append(
//!         Invocation::method(Owner::type_name("Builder").unwrap(), "create")
//!             .unwrap()
//!             .with_arg(Argument::variable("a").unwrap()),
//!     )
//!     .unwrap()
//!     .append(Invocation::method(Owner::None, "build").unwrap())
//!     .unwrap();
//!
//! let stmt = Assignment::new()
//!     .with_target(Reference::variable("x").unwrap())
//!     .unwrap()
//!     .with_chain(chain);
//!
//! assert_eq!(
//!     stmt.render().unwrap(),
//!     vec!["$x = Builder::create( $a )", "    ->build();"]
//! );
//! ```

// Miette's derive macro generates code that triggers these warnings
#![allow(unused_assignments)]

pub mod builder;
mod error;
pub mod expr;
pub mod stmt;

pub use builder::{Formatting, LineEnding, Render};
pub use error::{Error, Result};
