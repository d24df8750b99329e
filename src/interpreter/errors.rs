//! Error types for command dispatch
//!
//! This module defines the two failure kinds a command line can produce:
//! - [`ParseError`]: the text does not match the grammar. Recoverable; the
//!   engine reports it and returns [`Command::Error`](super::Command::Error).
//! - [`SemanticFault`]: the parser accepted something the transform has no
//!   handler for. Operators are resolved through the same tables the lexer
//!   uses, so this indicates an internal defect rather than bad input.
//!
//! [`HistoryError`] covers stepping back through replayed lines.

use crate::parser::ast::SourceLocation;
use crate::parser::ParseError;
use thiserror::Error;

/// Parse tree node with no semantic handler
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SemanticFault {
    #[error("Unsupported comparison operator '{symbol}' at column {}", .location.column)]
    UnsupportedComparison {
        symbol: String,
        location: SourceLocation,
    },

    #[error("Unsupported compound operator '{symbol}' at column {}", .location.column)]
    UnsupportedCompound {
        symbol: String,
        location: SourceLocation,
    },

    #[error("Invalid numeric literal '{text}' at column {}", .location.column)]
    InvalidNumber {
        text: String,
        location: SourceLocation,
    },
}

impl SemanticFault {
    pub fn location(&self) -> SourceLocation {
        match self {
            SemanticFault::UnsupportedComparison { location, .. }
            | SemanticFault::UnsupportedCompound { location, .. }
            | SemanticFault::InvalidNumber { location, .. } => *location,
        }
    }
}

/// Failure of [`Engine::try_dispatch`](super::Engine::try_dispatch)
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error(transparent)]
    Syntax(#[from] ParseError),

    #[error("Internal error: {0}")]
    Semantic(#[from] SemanticFault),
}

/// Stepping back through the replay history failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HistoryError {
    #[error("Already at the first replayed line")]
    AtStart,

    #[error("Earlier lines were dropped from history (limit is {limit} lines)")]
    Truncated { limit: usize },
}
