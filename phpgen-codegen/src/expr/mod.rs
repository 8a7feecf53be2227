//! Expression builders: scalars, references, invocations, chains,
//! conditions and ternaries.
//!
//! Expressions render relative to column zero; statements and blocks add
//! the base indent.

mod chain;
mod condition;
mod invocation;
mod reference;
mod scalar;
mod ternary;

pub use chain::ChainedInvocation;
pub use condition::{ComparisonOp, Condition, Operand};
pub use invocation::{ArgValue, Argument, Invocation};
pub(crate) use invocation::hint_supported;
pub use reference::{Index, Owner, Reference, as_array_index};
pub use scalar::{Scalar, ScalarType};
pub use ternary::Ternary;
