//! Keyword and operator tables for the command language
//!
//! Everything the lexer and parser accept as a keyword or operator is listed
//! here, and the transform step resolves operators through the same enums.
//! A new operator therefore has to be added in exactly one place, and the
//! `match` statements over [`CompareOp`] and [`CompoundOp`] in the evaluator
//! stop compiling until it is handled.

use std::fmt;

/// Command keyword, independent of which alias was typed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Help,
    Quit,
    Prev,
    Next,
    Track,
    Verify,
    Disprove,
    Break,
    List,
}

impl Keyword {
    /// All keywords in help-text order
    pub const ALL: [Keyword; 9] = [
        Keyword::Help,
        Keyword::Quit,
        Keyword::Prev,
        Keyword::Next,
        Keyword::Track,
        Keyword::Verify,
        Keyword::Disprove,
        Keyword::Break,
        Keyword::List,
    ];

    /// Argument shape shown in the help text
    pub fn usage(self) -> &'static str {
        match self {
            Keyword::Help | Keyword::Quit | Keyword::Prev | Keyword::Next => "",
            Keyword::Track => "[(<guard>)] <name> += <value>",
            Keyword::Verify | Keyword::Disprove | Keyword::Break => {
                "<value> (==|!=) <value>"
            }
            Keyword::List => "<value>",
        }
    }

    /// One-line description shown in the help text
    pub fn summary(self) -> &'static str {
        match self {
            Keyword::Help => "show this help",
            Keyword::Quit => "leave the debugger",
            Keyword::Prev => "step one line back in the log",
            Keyword::Next => "step one line forward in the log",
            Keyword::Track => "apply a statement on every replayed line",
            Keyword::Verify => "check that every line satisfies the guard",
            Keyword::Disprove => "find a line that violates the guard",
            Keyword::Break => "stop replay at the first line satisfying the guard",
            Keyword::List => "print the current value",
        }
    }
}

/// Accepted spellings of every command, searched first-match.
///
/// Multi-word aliases separate their words with a single space; the parser
/// accepts any whitespace between them.
pub const COMMAND_ALIASES: &[(&str, Keyword)] = &[
    ("h", Keyword::Help),
    ("help", Keyword::Help),
    ("q", Keyword::Quit),
    ("quit", Keyword::Quit),
    ("exit", Keyword::Quit),
    ("p", Keyword::Prev),
    ("prev", Keyword::Prev),
    ("n", Keyword::Next),
    ("next", Keyword::Next),
    ("t", Keyword::Track),
    ("track", Keyword::Track),
    ("v", Keyword::Verify),
    ("verify", Keyword::Verify),
    ("d", Keyword::Disprove),
    ("disprove", Keyword::Disprove),
    ("break on", Keyword::Break),
    ("b", Keyword::Break),
    ("break", Keyword::Break),
    ("breakon", Keyword::Break),
    ("l", Keyword::List),
    ("list", Keyword::List),
    ("e", Keyword::List),
    ("echo", Keyword::List),
    ("print", Keyword::List),
];

/// Look up a (possibly multi-word) alias
pub fn lookup_keyword(alias: &str) -> Option<Keyword> {
    COMMAND_ALIASES
        .iter()
        .find(|(spelling, _)| *spelling == alias)
        .map(|(_, keyword)| *keyword)
}

/// All aliases of a keyword, in table order
pub fn aliases_of(keyword: Keyword) -> impl Iterator<Item = &'static str> {
    COMMAND_ALIASES
        .iter()
        .filter(move |(_, kw)| *kw == keyword)
        .map(|(spelling, _)| *spelling)
}

/// Render the command reference shown in response to `help`
pub fn help_text() -> String {
    let rows: Vec<(String, &str)> = Keyword::ALL
        .iter()
        .map(|kw| {
            let spellings = aliases_of(*kw).collect::<Vec<_>>().join(", ");
            let usage = kw.usage();
            let left = if usage.is_empty() {
                spellings
            } else {
                format!("{} {}", spellings, usage)
            };
            (left, kw.summary())
        })
        .collect();

    let width = rows.iter().map(|(left, _)| left.len()).max().unwrap_or(0);
    rows.iter()
        .map(|(left, summary)| format!("  {:<width$}  {}", left, summary, width = width))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Comparison operators usable in a guard
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Eq,
    Ne,
}

impl CompareOp {
    pub const ALL: [CompareOp; 2] = [CompareOp::Eq, CompareOp::Ne];

    pub fn symbol(self) -> &'static str {
        match self {
            CompareOp::Eq => "==",
            CompareOp::Ne => "!=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

impl fmt::Display for CompareOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Compound assignment operators usable in a tracked statement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompoundOp {
    AddAssign,
}

impl CompoundOp {
    pub const ALL: [CompoundOp; 1] = [CompoundOp::AddAssign];

    pub fn symbol(self) -> &'static str {
        match self {
            CompoundOp::AddAssign => "+=",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }
}

impl fmt::Display for CompoundOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Every operator spelling the lexer recognises
pub fn operator_symbols() -> impl Iterator<Item = &'static str> {
    CompareOp::ALL
        .into_iter()
        .map(CompareOp::symbol)
        .chain(CompoundOp::ALL.into_iter().map(CompoundOp::symbol))
}
