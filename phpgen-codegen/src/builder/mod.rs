//! Line-level building blocks shared by every builder.
//!
//! - [`Formatting`] - Line ending, indentation and target version
//! - [`LineBuilder`] - Fluent accumulator for indented lines
//! - [`Render`] - Trait for builders that render to lines
//! - [`FunctionFrame`] - Function and method declarations around a body

mod format;
mod function;
mod line_builder;
pub(crate) mod render;

pub use format::{Formatting, LineEnding};
pub use function::{FunctionFrame, Visibility};
pub use line_builder::LineBuilder;
pub use render::Render;
