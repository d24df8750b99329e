//! Lexer (tokenizer) for debugger commands
//!
//! Converts a single command line into a flat [`Token`] stream consumed by the
//! parser. Whitespace is insignificant. Operators are recognised only if they
//! appear in [`grammar::operator_symbols`], so anything else (`:=`, `<`, `-=`)
//! fails here with a [`LexError`].

use super::ast::SourceLocation;
use super::grammar;
use std::fmt;
use thiserror::Error;

/// All token variants produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    /// Bare identifier or keyword spelling
    Ident(String, SourceLocation),
    /// Unsigned numeric literal as written
    Number(String, SourceLocation),
    /// One of the grammar's operator symbols
    Operator(String, SourceLocation),
    LParen(SourceLocation),
    RParen(SourceLocation),
    Eof(SourceLocation),
}

impl Token {
    /// Returns the source location where this token appears.
    pub fn location(&self) -> SourceLocation {
        match self {
            Token::Ident(_, loc)
            | Token::Number(_, loc)
            | Token::Operator(_, loc)
            | Token::LParen(loc)
            | Token::RParen(loc)
            | Token::Eof(loc) => *loc,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Ident(s, _) => write!(f, "identifier '{}'", s),
            Token::Number(s, _) => write!(f, "number {}", s),
            Token::Operator(s, _) => write!(f, "'{}'", s),
            Token::LParen(_) => write!(f, "'('"),
            Token::RParen(_) => write!(f, "')'"),
            Token::Eof(_) => write!(f, "end of input"),
        }
    }
}

/// Lexer error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Lexer error at column {}: {message}", .location.column)]
pub struct LexError {
    pub message: String,
    pub location: SourceLocation,
}

/// Lexer for one command line
pub struct Lexer {
    input: Vec<char>,
    position: usize,
}

impl Lexer {
    /// Create a new lexer for the given command line.
    pub fn new(input: &str) -> Self {
        Self {
            input: input.chars().collect(),
            position: 0,
        }
    }

    /// Tokenize the entire input
    pub fn tokenize(&mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();

        loop {
            self.skip_whitespace();

            if self.is_at_end() {
                tokens.push(Token::Eof(self.current_location()));
                break;
            }

            tokens.push(self.next_token()?);
        }

        Ok(tokens)
    }

    /// Get next token
    fn next_token(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let ch = self.peek().ok_or_else(|| LexError {
            message: "Unexpected end of input".to_string(),
            location: loc,
        })?;

        match ch {
            '0'..='9' => Ok(self.number_literal()),
            '.' if self.peek_ahead(1).is_some_and(|c| c.is_ascii_digit()) => {
                Ok(self.number_literal())
            }
            'a'..='z' | 'A'..='Z' | '_' => Ok(self.identifier()),
            '(' => {
                self.advance();
                Ok(Token::LParen(loc))
            }
            ')' => {
                self.advance();
                Ok(Token::RParen(loc))
            }
            _ => self.operator(),
        }
    }

    /// Longest operator symbol matching at the current position
    fn operator(&mut self) -> Result<Token, LexError> {
        let loc = self.current_location();
        let symbol = grammar::operator_symbols()
            .filter(|symbol| self.starts_with(symbol))
            .max_by_key(|symbol| symbol.len());

        match symbol {
            Some(symbol) => {
                for _ in symbol.chars() {
                    self.advance();
                }
                Ok(Token::Operator(symbol.to_string(), loc))
            }
            None => Err(LexError {
                message: format!(
                    "Unexpected character: '{}'",
                    self.peek().unwrap_or(' ')
                ),
                location: loc,
            }),
        }
    }

    /// `INT`, `INT.INT?` or `.INT`, with an optional exponent
    fn number_literal(&mut self) -> Token {
        let loc = self.current_location();
        let mut num_str = String::new();

        self.take_digits(&mut num_str);
        if self.peek() == Some('.') {
            num_str.push('.');
            self.advance();
            self.take_digits(&mut num_str);
        }

        if matches!(self.peek(), Some('e') | Some('E')) {
            let signed = matches!(self.peek_ahead(1), Some('+') | Some('-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek_ahead(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    if let Some(c) = self.advance() {
                        num_str.push(c);
                    }
                }
                self.take_digits(&mut num_str);
            }
        }

        Token::Number(num_str, loc)
    }

    fn take_digits(&mut self, out: &mut String) {
        while let Some(ch) = self.peek() {
            if ch.is_ascii_digit() {
                out.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Parse identifier
    fn identifier(&mut self) -> Token {
        let loc = self.current_location();
        let mut ident = String::new();

        while let Some(ch) = self.peek() {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ident.push(ch);
                self.advance();
            } else {
                break;
            }
        }

        Token::Ident(ident, loc)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }

    fn starts_with(&self, symbol: &str) -> bool {
        symbol
            .chars()
            .enumerate()
            .all(|(i, c)| self.peek_ahead(i) == Some(c))
    }

    /// Peek at current character without consuming
    fn peek(&self) -> Option<char> {
        self.input.get(self.position).copied()
    }

    /// Peek ahead n characters
    fn peek_ahead(&self, n: usize) -> Option<char> {
        self.input.get(self.position + n).copied()
    }

    /// Advance to next character
    fn advance(&mut self) -> Option<char> {
        let ch = self.peek()?;
        self.position += 1;
        Some(ch)
    }

    fn is_at_end(&self) -> bool {
        self.position >= self.input.len()
    }

    /// Columns are 1-based
    fn current_location(&self) -> SourceLocation {
        SourceLocation::new(self.position + 1)
    }
}
