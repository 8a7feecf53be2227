//! Statement builders: assignments, returns and control blocks.

mod assign;
mod control;
mod ret;
mod source;

pub use assign::{AssignOp, Assignment};
pub use control::{ControlBlock, ControlKind};
pub use ret::Return;
pub use source::{Source, WithSource};
