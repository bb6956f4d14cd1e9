//! Shared types for the Sprout language core.
//!
//! This crate defines the AST node types, source spans, and the user-facing
//! error taxonomy shared by the parser and the evaluator.

mod error;
mod span;
pub mod ast;

pub use error::{SproutError, WireError, ANONYMOUS_CALLEE};
pub use span::{SourceFile, Span};

/// Result type used throughout the Sprout language core.
pub type Result<T> = std::result::Result<T, SproutError>;
