// Evaluation engine for debugger commands

use crate::interpreter::commands::Command;
use crate::interpreter::errors::{CommandError, HistoryError};
use crate::interpreter::formula::{Assertion, AssertionKind, GuardedStatement, Verdict};
use crate::interpreter::transform::transform;
use crate::memory::SymbolTable;
use crate::parser::parse;
use crate::snapshot::{History, Snapshot};

/// Per-line snapshots kept for `prev` unless configured otherwise
pub const DEFAULT_HISTORY_LIMIT: usize = 4096;

/// Engine settings, fixed for the lifetime of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    /// Maximum number of replayed lines that can be stepped back over
    pub history_limit: usize,
    /// Also write rejected-command diagnostics to stderr
    pub print_diagnostics: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            history_limit: DEFAULT_HISTORY_LIMIT,
            print_diagnostics: true,
        }
    }
}

/// Why replay stopped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HaltReason {
    /// A BreakOn guard held on `line`
    BreakOn { line: usize },
    /// The log ran out
    Exhausted,
    /// The user quit
    Quit,
}

/// Session lifecycle: `Idle → Replaying → Halted`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Replaying,
    Halted(HaltReason),
}

/// Result of one assertion's guard on one line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssertionCheck {
    /// Registration index
    pub index: usize,
    pub kind: AssertionKind,
    pub holds: bool,
}

impl AssertionCheck {
    /// Whether this line is something the driver should report: a Verify
    /// failure, a Disprove counterexample, or a BreakOn hit
    pub fn signals(&self) -> bool {
        match self.kind {
            AssertionKind::Verify | AssertionKind::Disprove => !self.holds,
            AssertionKind::BreakOn => self.holds,
        }
    }
}

/// All assertion results for one replayed line, in registration order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineReport {
    /// Zero-based index of the replayed line
    pub line: usize,
    pub checks: Vec<AssertionCheck>,
}

impl LineReport {
    fn signalled(&self, kind: AssertionKind) -> impl Iterator<Item = &AssertionCheck> {
        self.checks
            .iter()
            .filter(move |c| c.kind == kind && c.signals())
    }

    pub fn break_requested(&self) -> bool {
        self.signalled(AssertionKind::BreakOn).next().is_some()
    }

    /// Verify assertions whose guard is false on this line
    pub fn violations(&self) -> impl Iterator<Item = &AssertionCheck> {
        self.signalled(AssertionKind::Verify)
    }

    /// Disprove assertions whose guard is false on this line
    pub fn counterexamples(&self) -> impl Iterator<Item = &AssertionCheck> {
        self.signalled(AssertionKind::Disprove)
    }
}

/// Summary of [`Engine::replay`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplayOutcome {
    pub lines_processed: usize,
    pub halt: HaltReason,
}

/// Owns all state of one replay session
pub struct Engine {
    config: EngineConfig,

    /// Variable values, read and written by tracked statements
    pub(super) symbols: SymbolTable,

    /// Tracked statements in registration order
    pub(super) statements: Vec<GuardedStatement>,

    /// Verify/Disprove/BreakOn assertions in registration order
    pub(super) assertions: Vec<Assertion>,

    /// Rendered value of the last `list` command
    pub(super) printed: Option<String>,

    /// Message for the last rejected command
    last_diagnostic: Option<String>,

    /// End-of-line snapshots for stepping back
    history: History,

    /// Number of lines applied so far
    lines_seen: usize,

    pub(super) state: SessionState,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    pub fn with_config(config: EngineConfig) -> Self {
        Engine {
            config,
            symbols: SymbolTable::new(),
            statements: Vec::new(),
            assertions: Vec::new(),
            printed: None,
            last_diagnostic: None,
            history: History::new(config.history_limit),
            lines_seen: 0,
            state: SessionState::Idle,
        }
    }

    // ========== Command dispatch ==========

    /// Parse and execute one command line.
    ///
    /// Never fails: rejected input is reported as a one-line diagnostic and
    /// yields [`Command::Error`] with no change to the session.
    pub fn parse_and_dispatch(&mut self, text: &str) -> Command {
        match self.try_dispatch(text) {
            Ok(command) => command,
            Err(err) => {
                self.report(&err);
                Command::Error
            }
        }
    }

    /// Like [`parse_and_dispatch`](Self::parse_and_dispatch) but hands the
    /// failure kind back to the caller instead of reporting it
    pub fn try_dispatch(&mut self, text: &str) -> Result<Command, CommandError> {
        let tree = parse(text)?;
        let fragment = transform(&tree)?;
        self.printed = None;
        let command = self.dispatch_fragment(fragment);
        tracing::debug!(input = text, ?command, "dispatched command");
        Ok(command)
    }

    fn report(&mut self, err: &CommandError) {
        let message = err.to_string();
        match err {
            CommandError::Syntax(_) => tracing::warn!(%message, "rejected command"),
            CommandError::Semantic(_) => {
                tracing::error!(%message, "accepted command has no semantic handler")
            }
        }
        if self.config.print_diagnostics {
            eprintln!("{}", message);
        }
        self.last_diagnostic = Some(message);
    }

    // ========== Per-line evaluation ==========

    /// Apply every tracked statement once, in registration order.
    ///
    /// Single pass with no snapshotting between statements: a statement sees
    /// writes made by earlier statements on the same line. Does nothing
    /// once the user has quit.
    pub fn apply_one_line(&mut self) {
        if self.has_quit() {
            tracing::debug!("session has quit, line not applied");
            return;
        }
        self.state = SessionState::Replaying;

        for (index, tracked) in self.statements.iter().enumerate() {
            let applied = tracked.apply(&mut self.symbols);
            tracing::trace!(index, applied, statement = %tracked, "tracked statement");
        }

        self.lines_seen += 1;
        let snapshot = self.snapshot();
        self.history.push(snapshot);
    }

    /// Evaluate every assertion against the current table and fold the
    /// results into their verdicts.
    ///
    /// Before the first applied line, or after quit, there is no line to
    /// judge: the report is empty and no verdict changes.
    pub fn check_assertions(&mut self) -> LineReport {
        let line = self.current_line();
        if self.lines_seen == 0 || self.has_quit() {
            tracing::debug!(line, "no replayed line to check assertions against");
            return LineReport {
                line,
                checks: Vec::new(),
            };
        }

        let mut checks = Vec::with_capacity(self.assertions.len());

        for (index, assertion) in self.assertions.iter_mut().enumerate() {
            let holds = assertion.guard.holds(&self.symbols);
            tracing::trace!(index, line, holds, "checked assertion");

            let verdict = assertion.verdict.observe(holds, line);
            if verdict != assertion.verdict {
                assertion.verdict = verdict;
                tracing::info!(index, line, ?verdict, assertion = %assertion, "assertion decided");
            }

            checks.push(AssertionCheck {
                index,
                kind: assertion.kind,
                holds,
            });
        }

        let report = LineReport { line, checks };

        if report.break_requested() {
            tracing::info!(line, "break condition hit");
            self.state = SessionState::Halted(HaltReason::BreakOn { line });
        }

        let verdicts = self.verdicts();
        let lines_seen = self.lines_seen;
        if let Some(latest) = self.history.latest_mut() {
            if latest.lines_seen == lines_seen {
                latest.verdicts = verdicts;
            }
        }

        report
    }

    /// Drive a whole log: bind each line's fields, apply, check, and stop at
    /// the first BreakOn hit. Verdicts are concluded if the log runs out.
    pub fn replay<I, F>(&mut self, lines: I, mut bind: F) -> ReplayOutcome
    where
        I: IntoIterator,
        F: FnMut(&I::Item, &mut SymbolTable),
    {
        let mut lines_processed = 0;

        for line in lines {
            if self.has_quit() {
                return ReplayOutcome {
                    lines_processed,
                    halt: HaltReason::Quit,
                };
            }

            bind(&line, &mut self.symbols);
            self.apply_one_line();
            let report = self.check_assertions();
            lines_processed += 1;

            if report.break_requested() {
                return ReplayOutcome {
                    lines_processed,
                    halt: HaltReason::BreakOn { line: report.line },
                };
            }
        }

        self.finish();
        ReplayOutcome {
            lines_processed,
            halt: HaltReason::Exhausted,
        }
    }

    /// Close the session: undecided verdicts are concluded as if the log
    /// ended here
    pub fn finish(&mut self) -> Vec<Verdict> {
        for assertion in &mut self.assertions {
            assertion.verdict = assertion.verdict.conclude();
        }
        if !self.has_quit() {
            self.state = SessionState::Halted(HaltReason::Exhausted);
        }
        tracing::info!(lines = self.lines_seen, "replay finished");
        self.verdicts()
    }

    // ========== History ==========

    /// Restore the state at the end of the previous line.
    /// Returns the index of the line that is now current.
    pub fn step_back(&mut self) -> Result<usize, HistoryError> {
        if self.lines_seen <= 1 {
            return Err(HistoryError::AtStart);
        }

        let limit = self.history.limit();
        let snapshot = match self.history.rewind() {
            Some(snapshot) => snapshot.clone(),
            None => return Err(HistoryError::Truncated { limit }),
        };
        self.restore_snapshot(snapshot);

        tracing::debug!(line = self.current_line(), "stepped back");
        Ok(self.current_line())
    }

    fn snapshot(&self) -> Snapshot {
        Snapshot {
            symbols: self.symbols.clone(),
            verdicts: self.verdicts(),
            lines_seen: self.lines_seen,
        }
    }

    /// Assertions registered after the snapshot restart from their initial verdict
    fn restore_snapshot(&mut self, snapshot: Snapshot) {
        self.symbols = snapshot.symbols;
        for (index, assertion) in self.assertions.iter_mut().enumerate() {
            assertion.verdict = snapshot
                .verdicts
                .get(index)
                .copied()
                .unwrap_or_else(|| assertion.kind.initial_verdict());
        }
        self.lines_seen = snapshot.lines_seen;
        if !self.has_quit() {
            self.state = SessionState::Replaying;
        }
    }

    // ========== Getter methods for the driver ==========

    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Mutable access for binding log-line fields before `apply_one_line`
    pub fn symbols_mut(&mut self) -> &mut SymbolTable {
        &mut self.symbols
    }

    pub fn statements(&self) -> &[GuardedStatement] {
        &self.statements
    }

    pub fn assertions(&self) -> &[Assertion] {
        &self.assertions
    }

    /// Current verdict of every assertion, in registration order
    pub fn verdicts(&self) -> Vec<Verdict> {
        self.assertions.iter().map(|a| a.verdict).collect()
    }

    /// Output of the most recent dispatch if it was a `list` command
    pub fn printed(&self) -> Option<&str> {
        self.printed.as_deref()
    }

    pub fn last_diagnostic(&self) -> Option<&str> {
        self.last_diagnostic.as_deref()
    }

    pub fn lines_seen(&self) -> usize {
        self.lines_seen
    }

    /// Zero-based index of the most recently applied line
    pub fn current_line(&self) -> usize {
        self.lines_seen.saturating_sub(1)
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    fn has_quit(&self) -> bool {
        self.state == SessionState::Halted(HaltReason::Quit)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Number;

    fn quiet() -> Engine {
        Engine::with_config(EngineConfig {
            print_diagnostics: false,
            ..EngineConfig::default()
        })
    }

    #[test]
    fn test_statements_see_earlier_writes_on_same_line() {
        let mut engine = quiet();
        engine.parse_and_dispatch("track a += 1");
        engine.parse_and_dispatch("track b += a");
        engine.parse_and_dispatch("track (b == 2) c += 10");

        engine.apply_one_line();
        assert_eq!(engine.symbols().get("a"), Number::Int(1));
        assert_eq!(engine.symbols().get("b"), Number::Int(1));
        assert_eq!(engine.symbols().get("c"), Number::Int(0));

        engine.apply_one_line();
        assert_eq!(engine.symbols().get("b"), Number::Int(3));
        assert_eq!(engine.symbols().get("c"), Number::Int(0));
    }

    #[test]
    fn test_check_assertions_reports_in_registration_order() {
        let mut engine = quiet();
        engine.parse_and_dispatch("disprove x == 0");
        engine.parse_and_dispatch("verify x == 0");
        engine.parse_and_dispatch("break on x != 0");

        engine.apply_one_line();
        let report = engine.check_assertions();
        assert_eq!(report.line, 0);
        let kinds: Vec<_> = report.checks.iter().map(|c| (c.kind, c.holds)).collect();
        assert_eq!(
            kinds,
            vec![
                (AssertionKind::Disprove, true),
                (AssertionKind::Verify, true),
                (AssertionKind::BreakOn, false),
            ]
        );
        assert!(!report.break_requested());
        assert_eq!(engine.state(), SessionState::Replaying);
    }

    #[test]
    fn test_break_sets_halted_state() {
        let mut engine = quiet();
        engine.parse_and_dispatch("break on x != 0");
        engine.symbols_mut().set("x", 4);
        engine.apply_one_line();
        let report = engine.check_assertions();

        assert!(report.break_requested());
        assert_eq!(
            engine.state(),
            SessionState::Halted(HaltReason::BreakOn { line: 0 })
        );
        assert_eq!(engine.verdicts(), vec![Verdict::BrokeAt { line: 0 }]);
    }

    #[test]
    fn test_step_back_restores_symbols_and_verdicts() {
        let mut engine = quiet();
        engine.parse_and_dispatch("track x += 1");
        engine.parse_and_dispatch("verify x != 3");

        for _ in 0..3 {
            engine.apply_one_line();
            engine.check_assertions();
        }
        assert_eq!(engine.verdicts(), vec![Verdict::Violated { line: 2 }]);

        assert_eq!(engine.step_back(), Ok(1));
        assert_eq!(engine.symbols().get("x"), Number::Int(2));
        assert_eq!(engine.verdicts(), vec![Verdict::Holding]);
        assert_eq!(engine.lines_seen(), 2);

        assert_eq!(engine.step_back(), Ok(0));
        assert_eq!(engine.step_back(), Err(HistoryError::AtStart));
    }

    #[test]
    fn test_step_back_past_history_limit() {
        let mut engine = Engine::with_config(EngineConfig {
            history_limit: 2,
            print_diagnostics: false,
        });
        engine.parse_and_dispatch("track x += 1");
        for _ in 0..5 {
            engine.apply_one_line();
        }

        assert_eq!(engine.config().history_limit, 2);
        assert_eq!(engine.step_back(), Ok(3));
        assert_eq!(engine.step_back(), Err(HistoryError::Truncated { limit: 2 }));
    }

    #[test]
    fn test_quit_is_terminal() {
        let mut engine = quiet();
        assert_eq!(engine.parse_and_dispatch("q"), Command::Quit);
        engine.apply_one_line();
        assert_eq!(engine.state(), SessionState::Halted(HaltReason::Quit));

        let outcome = engine.replay(0..3, |_, _| {});
        assert_eq!(outcome.lines_processed, 0);
        assert_eq!(outcome.halt, HaltReason::Quit);
    }

    #[test]
    fn test_lines_after_quit_change_nothing() {
        let mut engine = quiet();
        engine.parse_and_dispatch("track x += 1");
        engine.parse_and_dispatch("verify x == 0");
        engine.parse_and_dispatch("quit");

        engine.apply_one_line();
        let report = engine.check_assertions();

        assert!(report.checks.is_empty());
        assert_eq!(engine.symbols().get("x"), Number::Int(0));
        assert_eq!(engine.lines_seen(), 0);
        assert_eq!(engine.verdicts(), vec![Verdict::Holding]);
        assert_eq!(engine.step_back(), Err(HistoryError::AtStart));
    }

    #[test]
    fn test_check_before_first_line_decides_nothing() {
        let mut engine = quiet();
        engine.parse_and_dispatch("verify x == 1");
        engine.parse_and_dispatch("break on x != 1");

        let report = engine.check_assertions();
        assert!(report.checks.is_empty());
        assert!(!report.break_requested());
        assert_eq!(engine.state(), SessionState::Idle);
        assert_eq!(engine.verdicts(), vec![Verdict::Holding, Verdict::Armed]);

        engine.symbols_mut().set("x", 1);
        engine.apply_one_line();
        let report = engine.check_assertions();
        assert_eq!(report.checks.len(), 2);
        assert_eq!(engine.verdicts(), vec![Verdict::Holding, Verdict::Armed]);
    }

    #[test]
    fn test_diagnostic_is_recorded() {
        let mut engine = quiet();
        assert_eq!(engine.parse_and_dispatch("track x := 1"), Command::Error);
        assert_eq!(
            engine.last_diagnostic(),
            Some("Parse error at column 9: Unexpected character: ':'")
        );
    }
}
