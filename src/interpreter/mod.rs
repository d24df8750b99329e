//! Command evaluation engine
//!
//! This module turns parse trees into registered behaviour and runs it:
//! - [`formula`]: Evaluable fragments (operands, guards, statements, assertions)
//! - [`transform`]: Parse tree → fragments, bottom-up
//! - [`commands`]: The [`Command`] tag and the per-command handlers
//! - [`engine`]: [`Engine`], the session state and per-line evaluation
//! - [`errors`]: Error types
//!
//! # Execution Model
//!
//! For every replayed log line the driver binds the line's fields into the
//! symbol table, calls [`Engine::apply_one_line`] and then
//! [`Engine::check_assertions`]. Tracked statements run first, in
//! registration order, then every assertion is checked against the result.

pub mod commands;
pub mod engine;
pub mod errors;
pub mod formula;
pub mod transform;

pub use commands::Command;
pub use engine::{
    AssertionCheck, Engine, EngineConfig, HaltReason, LineReport, ReplayOutcome, SessionState,
};
pub use errors::{CommandError, HistoryError, SemanticFault};
