//! Command handlers
//!
//! Each handler takes an already built fragment, registers it with the
//! engine where applicable and returns the [`Command`] tag the driver acts on.
//! Handlers cannot fail; everything fallible happened during parsing and
//! transformation.

use crate::interpreter::engine::{Engine, HaltReason, SessionState};
use crate::interpreter::formula::{Assertion, AssertionKind, Guard, GuardedStatement, Operand};
use crate::interpreter::transform::CommandFragment;
use std::fmt;

/// What the user asked for, produced once per input line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Help,
    Quit,
    Prev,
    Next,
    Track,
    Verify,
    Disprove,
    BreakOn,
    Print,
    /// The line was rejected
    Error,
}

impl Command {
    pub fn is_error(self) -> bool {
        self == Command::Error
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Command::Help => "help",
            Command::Quit => "quit",
            Command::Prev => "prev",
            Command::Next => "next",
            Command::Track => "track",
            Command::Verify => "verify",
            Command::Disprove => "disprove",
            Command::BreakOn => "break on",
            Command::Print => "print",
            Command::Error => "error",
        };
        f.write_str(name)
    }
}

impl Engine {
    pub(super) fn dispatch_fragment(&mut self, fragment: CommandFragment) -> Command {
        match fragment {
            CommandFragment::Help => self.cmd_help(),
            CommandFragment::Quit => self.cmd_quit(),
            CommandFragment::Prev => self.cmd_prev(),
            CommandFragment::Next => self.cmd_next(),
            CommandFragment::Track(tracked) => self.cmd_track(tracked),
            CommandFragment::Verify(guard) => self.cmd_verify(guard),
            CommandFragment::Disprove(guard) => self.cmd_disprove(guard),
            CommandFragment::BreakOn(guard) => self.cmd_breakon(guard),
            CommandFragment::List(operand) => self.cmd_list(operand),
        }
    }

    fn cmd_help(&mut self) -> Command {
        Command::Help
    }

    fn cmd_quit(&mut self) -> Command {
        self.state = SessionState::Halted(HaltReason::Quit);
        Command::Quit
    }

    /// Moving the cursor is up to the driver
    fn cmd_prev(&mut self) -> Command {
        Command::Prev
    }

    fn cmd_next(&mut self) -> Command {
        Command::Next
    }

    fn cmd_track(&mut self, tracked: GuardedStatement) -> Command {
        tracing::debug!(
            index = self.statements.len(),
            statement = %tracked,
            "tracking statement"
        );
        self.statements.push(tracked);
        Command::Track
    }

    fn cmd_verify(&mut self, guard: Guard) -> Command {
        self.register_assertion(AssertionKind::Verify, guard);
        Command::Verify
    }

    fn cmd_disprove(&mut self, guard: Guard) -> Command {
        self.register_assertion(AssertionKind::Disprove, guard);
        Command::Disprove
    }

    fn cmd_breakon(&mut self, guard: Guard) -> Command {
        self.register_assertion(AssertionKind::BreakOn, guard);
        Command::BreakOn
    }

    /// Evaluated now, against the current table
    fn cmd_list(&mut self, operand: Operand) -> Command {
        let value = operand.resolve(&self.symbols);
        self.printed = Some(value.to_string());
        Command::Print
    }

    fn register_assertion(&mut self, kind: AssertionKind, guard: Guard) {
        let assertion = Assertion::new(kind, guard);
        tracing::debug!(
            index = self.assertions.len(),
            assertion = %assertion,
            "registered assertion"
        );
        self.assertions.push(assertion);
    }
}
