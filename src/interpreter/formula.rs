//! Evaluable fragments built from the parse tree
//!
//! Fragments hold names, not values: every evaluation resolves operands
//! against the [`SymbolTable`] passed in at call time, so one registered
//! statement or guard yields different results on each replayed line.

use crate::memory::{Number, SymbolTable};
use crate::parser::grammar::{CompareOp, CompoundOp};
use std::fmt;

/// A value expression: `value := NUMBER | name`
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Const(Number),
    VarRef(String),
}

impl Operand {
    /// Resolve to a number against the current table
    pub fn resolve(&self, symbols: &SymbolTable) -> Number {
        match self {
            Operand::Const(n) => *n,
            Operand::VarRef(name) => symbols.get(name),
        }
    }
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operand::Const(n) => write!(f, "{}", n),
            Operand::VarRef(name) => f.write_str(name),
        }
    }
}

/// Boolean comparison of two operands
#[derive(Debug, Clone, PartialEq)]
pub struct Guard {
    pub left: Operand,
    pub op: CompareOp,
    pub right: Operand,
}

impl Guard {
    pub fn holds(&self, symbols: &SymbolTable) -> bool {
        let left = self.left.resolve(symbols);
        let right = self.right.resolve(symbols);
        match self.op {
            CompareOp::Eq => left == right,
            CompareOp::Ne => left != right,
        }
    }
}

impl fmt::Display for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.left, self.op, self.right)
    }
}

/// Compound assignment to a named variable
#[derive(Debug, Clone, PartialEq)]
pub struct Statement {
    pub target: String,
    pub op: CompoundOp,
    pub value: Operand,
}

impl Statement {
    /// Read the target (0 if unset), combine with the operand, write back.
    /// Returns the stored value.
    pub fn apply(&self, symbols: &mut SymbolTable) -> Number {
        let current = symbols.get(&self.target);
        let rhs = self.value.resolve(symbols);
        let updated = match self.op {
            CompoundOp::AddAssign => current + rhs,
        };
        symbols.set(self.target.as_str(), updated);
        updated
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.target, self.op, self.value)
    }
}

/// A tracked statement, optionally gated by a guard
#[derive(Debug, Clone, PartialEq)]
pub struct GuardedStatement {
    pub guard: Option<Guard>,
    pub statement: Statement,
}

impl GuardedStatement {
    /// Apply the statement if the guard holds (or is absent).
    /// Returns whether it was applied.
    pub fn apply(&self, symbols: &mut SymbolTable) -> bool {
        if let Some(guard) = &self.guard {
            if !guard.holds(symbols) {
                return false;
            }
        }
        self.statement.apply(symbols);
        true
    }
}

impl fmt::Display for GuardedStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.guard {
            Some(guard) => write!(f, "({}) {}", guard, self.statement),
            None => write!(f, "{}", self.statement),
        }
    }
}

/// The command an assertion was registered with
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssertionKind {
    Verify,
    Disprove,
    BreakOn,
}

impl AssertionKind {
    /// Verdict of a freshly registered assertion
    pub fn initial_verdict(self) -> Verdict {
        match self {
            AssertionKind::Verify => Verdict::Holding,
            AssertionKind::Disprove => Verdict::Pending,
            AssertionKind::BreakOn => Verdict::Armed,
        }
    }
}

impl fmt::Display for AssertionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AssertionKind::Verify => f.write_str("verify"),
            AssertionKind::Disprove => f.write_str("disprove"),
            AssertionKind::BreakOn => f.write_str("break on"),
        }
    }
}

/// Running outcome of an assertion over the lines replayed so far.
///
/// `line` is the zero-based index of the replayed log line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// Verify: guard held on every line so far
    Holding,
    /// Verify: guard was false on `line`
    Violated { line: usize },
    /// Verify: guard held on every line of a finished replay
    Verified,
    /// Disprove: no counterexample yet
    Pending,
    /// Disprove: guard was false on `line`
    Disproved { line: usize },
    /// Disprove: guard held on every line of a finished replay
    NotDisproved,
    /// BreakOn: guard not yet true
    Armed,
    /// BreakOn: guard first held on `line`
    BrokeAt { line: usize },
    /// BreakOn: guard never held during a finished replay
    NeverBroke,
}

impl Verdict {
    pub fn kind(self) -> AssertionKind {
        match self {
            Verdict::Holding | Verdict::Violated { .. } | Verdict::Verified => {
                AssertionKind::Verify
            }
            Verdict::Pending | Verdict::Disproved { .. } | Verdict::NotDisproved => {
                AssertionKind::Disprove
            }
            Verdict::Armed | Verdict::BrokeAt { .. } | Verdict::NeverBroke => {
                AssertionKind::BreakOn
            }
        }
    }

    /// `Some(true)` once the assertion's goal is met, `Some(false)` once it
    /// can no longer be met, `None` while undecided
    pub fn succeeded(self) -> Option<bool> {
        match self {
            Verdict::Verified | Verdict::Disproved { .. } | Verdict::BrokeAt { .. } => Some(true),
            Verdict::Violated { .. } | Verdict::NotDisproved | Verdict::NeverBroke => Some(false),
            Verdict::Holding | Verdict::Pending | Verdict::Armed => None,
        }
    }

    /// Line that decided the verdict, if any
    pub fn witness(self) -> Option<usize> {
        match self {
            Verdict::Violated { line }
            | Verdict::Disproved { line }
            | Verdict::BrokeAt { line } => Some(line),
            _ => None,
        }
    }

    /// Fold one line's guard result into the verdict
    pub fn observe(self, holds: bool, line: usize) -> Verdict {
        match (self, holds) {
            (Verdict::Holding, false) => Verdict::Violated { line },
            (Verdict::Pending, false) => Verdict::Disproved { line },
            (Verdict::Armed, true) => Verdict::BrokeAt { line },
            (verdict, _) => verdict,
        }
    }

    /// Close an undecided verdict at the end of the log
    pub fn conclude(self) -> Verdict {
        match self {
            Verdict::Holding => Verdict::Verified,
            Verdict::Pending => Verdict::NotDisproved,
            Verdict::Armed => Verdict::NeverBroke,
            verdict => verdict,
        }
    }
}

/// A registered guard with its kind and running verdict
#[derive(Debug, Clone, PartialEq)]
pub struct Assertion {
    pub kind: AssertionKind,
    pub guard: Guard,
    pub verdict: Verdict,
}

impl Assertion {
    pub fn new(kind: AssertionKind, guard: Guard) -> Self {
        Assertion {
            kind,
            guard,
            verdict: kind.initial_verdict(),
        }
    }
}

impl fmt::Display for Assertion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.guard)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn var(name: &str) -> Operand {
        Operand::VarRef(name.to_string())
    }

    fn add_assign(target: &str, value: Operand) -> Statement {
        Statement {
            target: target.to_string(),
            op: CompoundOp::AddAssign,
            value,
        }
    }

    #[test]
    fn test_operand_resolves_late() {
        let mut symbols = SymbolTable::new();
        let x = var("x");
        assert_eq!(x.resolve(&symbols), Number::Int(0));
        symbols.set("x", 7);
        assert_eq!(x.resolve(&symbols), Number::Int(7));
    }

    #[test]
    fn test_guard_ops() {
        let mut symbols = SymbolTable::new();
        symbols.set("x", 1);
        let eq = Guard {
            left: var("x"),
            op: CompareOp::Eq,
            right: Operand::Const(Number::Float(1.0)),
        };
        let ne = Guard {
            op: CompareOp::Ne,
            ..eq.clone()
        };
        assert!(eq.holds(&symbols));
        assert!(!ne.holds(&symbols));
    }

    #[test]
    fn test_statement_adds_resolved_value() {
        let mut symbols = SymbolTable::new();
        symbols.set("step", 5);
        let stmt = add_assign("total", var("step"));
        stmt.apply(&mut symbols);
        stmt.apply(&mut symbols);
        assert_eq!(symbols.get("total"), Number::Int(10));
    }

    #[test]
    fn test_guarded_statement() {
        let mut symbols = SymbolTable::new();
        let tracked = GuardedStatement {
            guard: Some(Guard {
                left: var("flag"),
                op: CompareOp::Ne,
                right: Operand::Const(Number::Int(0)),
            }),
            statement: add_assign("hits", Operand::Const(Number::Int(1))),
        };

        assert!(!tracked.apply(&mut symbols));
        symbols.set("flag", 1);
        assert!(tracked.apply(&mut symbols));
        assert_eq!(symbols.get("hits"), Number::Int(1));
        assert_eq!(tracked.to_string(), "(flag != 0) hits += 1");
    }

    #[test]
    fn test_verdict_transitions() {
        let v = Verdict::Holding.observe(true, 0).observe(false, 3).observe(false, 4);
        assert_eq!(v, Verdict::Violated { line: 3 });
        assert_eq!(v.succeeded(), Some(false));

        let d = Verdict::Pending.observe(true, 0).conclude();
        assert_eq!(d, Verdict::NotDisproved);

        let b = Verdict::Armed.observe(false, 0).observe(true, 1);
        assert_eq!(b.witness(), Some(1));
        assert_eq!(b.kind(), AssertionKind::BreakOn);
        assert_eq!(Verdict::Holding.conclude(), Verdict::Verified);
    }
}
