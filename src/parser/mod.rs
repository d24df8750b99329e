//! Debugger command parser
//!
//! This module transforms one line of user input into a parse tree:
//! - [`grammar`]: Command aliases and operator tables (single source of truth)
//! - [`lexer`]: Tokenization (command text → tokens)
//! - [`parser`]: Parsing (tokens → parse tree)
//! - [`ast`]: Parse tree node definitions
//!
//! # Parser Implementation
//!
//! Hand-written recursive descent parser. No external parser generator
//! dependencies.

pub mod ast;
pub mod grammar;
pub mod lexer;
pub mod parser;

pub use parser::{parse, ParseError};
