//! The user-facing error taxonomy.
//!
//! Every error a Sprout program can trigger carries three message parts:
//! *what* happened, *why* it happened, and *how* to fix it. Hosts must
//! surface all three — [`SproutError::report`] renders them together, and
//! [`WireError`] carries them across the serialized execution-result
//! boundary.
//!
//! All six kinds are recoverable at the call site. Internal defects (an
//! unmatched node kind reaching evaluation, say) are not represented here;
//! those are bugs and should panic.

use crate::Span;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A user-facing Sprout error.
#[derive(Debug, Clone, PartialEq, Error, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum SproutError {
    /// The grammar failed to match the source text.
    #[error("syntax error: {message}")]
    SyntaxError {
        /// The engine's diagnostic, e.g. `expected '}', got 'let'`.
        message: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        suggestion: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        span: Option<Span>,
    },

    /// A name was absent through the whole environment chain.
    #[error("unknown variable \"{name}\"")]
    UnknownVariable {
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        span: Option<Span>,
    },

    /// An operator was applied to values it cannot handle.
    #[error("invalid operation \"{operator}\": {reason}")]
    InvalidOperation {
        operator: String,
        reason: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        span: Option<Span>,
    },

    /// A value's runtime type does not match what an operation requires.
    #[error("type mismatch: expected {expected}, got {actual}")]
    TypeMismatch {
        expected: String,
        actual: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        span: Option<Span>,
    },

    /// A call's callee did not resolve to a callable value.
    #[error("function not found: \"{name}\"")]
    FunctionNotFound {
        /// The callee's name, or `<anonymous>` when the callee was not a
        /// bare identifier.
        name: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        span: Option<Span>,
    },

    /// A list index outside `[0, length)`.
    #[error("index {index} out of bounds for list of size {size}")]
    IndexOutOfBounds {
        index: i64,
        size: usize,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        span: Option<Span>,
    },
}

/// Marker used for [`SproutError::FunctionNotFound`] when the callee has
/// no source name.
pub const ANONYMOUS_CALLEE: &str = "<anonymous>";

impl SproutError {
    /// The kind tag, matching the serialized `"kind"` field.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::SyntaxError { .. } => "SyntaxError",
            Self::UnknownVariable { .. } => "UnknownVariable",
            Self::InvalidOperation { .. } => "InvalidOperation",
            Self::TypeMismatch { .. } => "TypeMismatch",
            Self::FunctionNotFound { .. } => "FunctionNotFound",
            Self::IndexOutOfBounds { .. } => "IndexOutOfBounds",
        }
    }

    /// A plain statement of what happened.
    pub fn what(&self) -> String {
        match self {
            Self::SyntaxError { .. } => "I couldn't understand that code.".to_string(),
            Self::UnknownVariable { name, .. } => {
                format!("The name \"{name}\" was used before it was created.")
            }
            Self::InvalidOperation { operator, .. } => {
                format!("The \"{operator}\" operation could not be carried out.")
            }
            Self::TypeMismatch {
                expected, actual, ..
            } => format!("A {expected} was expected here, but a {actual} turned up."),
            Self::FunctionNotFound { name, .. } => {
                if name == ANONYMOUS_CALLEE {
                    "The value being called is not a function.".to_string()
                } else {
                    format!("There is no function called \"{name}\".")
                }
            }
            Self::IndexOutOfBounds { index, size, .. } => {
                format!("Item number {index} was requested, but the list has {size} item(s).")
            }
        }
    }

    /// Why it happened.
    pub fn why(&self) -> String {
        match self {
            Self::SyntaxError { message, .. } => {
                format!("There is a syntax mistake: {message}")
            }
            Self::UnknownVariable { name, .. } => format!(
                "Nothing called \"{name}\" exists in the current scope or any enclosing one."
            ),
            Self::InvalidOperation { reason, .. } => reason.clone(),
            Self::TypeMismatch { .. } => {
                "Some operations only work on one specific type of value.".to_string()
            }
            Self::FunctionNotFound { name, .. } => {
                if name == ANONYMOUS_CALLEE {
                    "Only functions can be called with (...).".to_string()
                } else {
                    "It was never defined, or its name is spelled differently.".to_string()
                }
            }
            Self::IndexOutOfBounds { size, .. } => {
                if *size == 0 {
                    "The list is empty, so it has no items at all.".to_string()
                } else {
                    format!("List items are numbered from 0 up to {}.", size - 1)
                }
            }
        }
    }

    /// How to fix it.
    pub fn how(&self) -> String {
        match self {
            Self::SyntaxError { suggestion, .. } => suggestion.clone().unwrap_or_else(|| {
                "Read the line carefully and check for missing brackets (}) or quotes (\")."
                    .to_string()
            }),
            Self::UnknownVariable { name, .. } => {
                format!("Create it first with: let {name} = ...")
            }
            Self::InvalidOperation { .. } => {
                "Check that the values involved make sense for this operation.".to_string()
            }
            Self::TypeMismatch { expected, .. } => {
                format!("Make sure the value is a {expected} before using it here.")
            }
            Self::FunctionNotFound { name, .. } => {
                if name == ANONYMOUS_CALLEE {
                    "Check that the expression before the parentheses is a function.".to_string()
                } else {
                    format!("Define it first with: function {name}(...) {{ ... }}")
                }
            }
            Self::IndexOutOfBounds { size, .. } => {
                if *size == 0 {
                    "Add items to the list before looking one up.".to_string()
                } else {
                    format!("Use an index between 0 and {}.", size - 1)
                }
            }
        }
    }

    /// The source span, if one was recorded.
    pub fn span(&self) -> Option<Span> {
        match self {
            Self::SyntaxError { span, .. }
            | Self::UnknownVariable { span, .. }
            | Self::InvalidOperation { span, .. }
            | Self::TypeMismatch { span, .. }
            | Self::FunctionNotFound { span, .. }
            | Self::IndexOutOfBounds { span, .. } => *span,
        }
    }

    /// Attach a source span (replacing any existing one).
    pub fn with_span(mut self, new_span: Span) -> Self {
        match &mut self {
            Self::SyntaxError { span, .. }
            | Self::UnknownVariable { span, .. }
            | Self::InvalidOperation { span, .. }
            | Self::TypeMismatch { span, .. }
            | Self::FunctionNotFound { span, .. }
            | Self::IndexOutOfBounds { span, .. } => *span = Some(new_span),
        }
        self
    }

    /// Render the full three-part message for a human reader.
    pub fn report(&self) -> String {
        format!(
            "🌱 Whoops! Something went wrong.\n\n\
             What happened:\n{}\n\n\
             Why it happened:\n{}\n\n\
             How to fix it:\n{}\n",
            self.what(),
            self.why(),
            self.how()
        )
    }

    /// Convert to the serialized wire payload. The `message` carries the
    /// what/why parts; the `hint` carries the how part.
    pub fn to_wire(&self) -> WireError {
        WireError {
            kind: self.kind_name().to_string(),
            message: format!("{} {}", self.what(), self.why()),
            location: self.span(),
            hint: Some(self.how()),
        }
    }
}

/// The error payload inside a serialized execution result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireError {
    pub kind: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Span>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}
