//! # Introduction
//!
//! logstep is the command language behind an interactive log-replay
//! debugger. The user types short commands (`next`, `track x += 1`,
//! `verify x == 0`, `break on x != 0`); each one steps the log cursor,
//! registers a per-line side effect, registers a per-line assertion, or prints
//! a value straight away.
//!
//! ## Evaluation pipeline
//!
//! ```text
//! Command text → Lexer → Parser → Parse tree → Transform → Engine
//! ```
//!
//! 1. [`parser`] — tokenises one command line and builds its parse tree.
//! 2. [`interpreter`] — transforms the tree into evaluable fragments,
//!    registers them and evaluates them once per replayed line.
//! 3. [`memory`] — [`memory::Number`] values in a [`memory::SymbolTable`].
//! 4. [`snapshot`] — bounded per-line history so the driver can step back.
//!
//! Reading logs, the prompt loop and terminal output belong to the driver.
//!
//! ```
//! use logstep::{Command, Engine};
//!
//! let mut engine = Engine::new();
//! assert_eq!(engine.parse_and_dispatch("track x += 1"), Command::Track);
//! engine.apply_one_line();
//! assert_eq!(engine.parse_and_dispatch("list x"), Command::Print);
//! assert_eq!(engine.printed(), Some("1"));
//! ```

pub mod interpreter;
pub mod memory;
pub mod parser;
pub mod snapshot;

pub use interpreter::{
    AssertionCheck, Command, CommandError, Engine, EngineConfig, HaltReason, HistoryError,
    LineReport, ReplayOutcome, SemanticFault, SessionState,
};
pub use interpreter::formula::{AssertionKind, Verdict};
pub use memory::{Number, SymbolTable};
pub use parser::grammar::help_text;
