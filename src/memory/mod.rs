//! Session memory model
//!
//! This module provides the state a replay session evaluates against:
//! - [`value`]: Numeric values ([`Number`](value::Number)) with mixed
//!   integer/float arithmetic
//! - [`symbols`]: The symbol table mapping variable names to numbers
//!
//! # First-Reference Default
//!
//! Variables are never declared. Reading a name that was never written yields
//! `0`, so `track hits += 1` works without any setup.

pub mod symbols;
pub mod value;

pub use symbols::SymbolTable;
pub use value::Number;
