//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct, the [`ParseError`] type and the
//! [`parse`] entry point. The grammar is small enough for a single
//! recursive descent pass with one token of lookahead (two for the
//! `break on` alias).
//!
//! ```text
//! command          := KEYWORD [statement | guard | expression]
//! statement        := "(" guard ")" single_statement | single_statement
//! single_statement := name "+=" expression
//! expression       := value
//! value            := NUMBER | name
//! guard            := value ("==" | "!=") value
//! ```

use crate::parser::ast::*;
use crate::parser::grammar::{self, CompareOp, CompoundOp, Keyword};
use crate::parser::lexer::{LexError, Lexer, Token};
use thiserror::Error;

/// Parser error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Parse error at column {}: {message}", .location.column)]
pub struct ParseError {
    pub message: String,
    pub location: SourceLocation,
}

impl From<LexError> for ParseError {
    fn from(err: LexError) -> Self {
        ParseError {
            message: err.message,
            location: err.location,
        }
    }
}

/// Parse one command line into its parse tree
pub fn parse(text: &str) -> Result<CommandNode, ParseError> {
    Parser::new(text)?.parse_command()
}

/// Recursive descent parser for the command language
pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) position: usize,
}

impl Parser {
    pub fn new(source: &str) -> Result<Self, ParseError> {
        let mut lexer = Lexer::new(source);
        let tokens = lexer.tokenize()?;
        Ok(Self {
            tokens,
            position: 0,
        })
    }

    /// Parse the whole line; trailing tokens are an error
    pub fn parse_command(&mut self) -> Result<CommandNode, ParseError> {
        let node = match self.parse_keyword()? {
            Keyword::Help => CommandNode::Help,
            Keyword::Quit => CommandNode::Quit,
            Keyword::Prev => CommandNode::Prev,
            Keyword::Next => CommandNode::Next,
            Keyword::Track => CommandNode::Track(self.parse_statement()?),
            Keyword::Verify => CommandNode::Verify(self.parse_guard()?),
            Keyword::Disprove => CommandNode::Disprove(self.parse_guard()?),
            Keyword::Break => CommandNode::BreakOn(self.parse_guard()?),
            Keyword::List => CommandNode::List(self.parse_value()?),
        };

        if !self.is_at_end() {
            return Err(self.error_here("Unexpected trailing input"));
        }

        Ok(node)
    }

    /// Resolve the leading alias, preferring a two-word spelling
    fn parse_keyword(&mut self) -> Result<Keyword, ParseError> {
        let Token::Ident(first, location) = self.peek_token() else {
            return Err(self.error_here("Expected command"));
        };

        if let Some(Token::Ident(second, _)) = self.peek_ahead(1) {
            if let Some(keyword) = grammar::lookup_keyword(&format!("{} {}", first, second)) {
                self.advance();
                self.advance();
                return Ok(keyword);
            }
        }

        match grammar::lookup_keyword(&first) {
            Some(keyword) => {
                self.advance();
                Ok(keyword)
            }
            None => Err(ParseError {
                message: format!("Unknown command '{}'", first),
                location,
            }),
        }
    }

    /// `statement := "(" guard ")" single_statement | single_statement`
    pub(crate) fn parse_statement(&mut self) -> Result<StatementNode, ParseError> {
        let guard = if self.match_token(&Token::LParen(self.current_location())) {
            let guard = self.parse_guard()?;
            self.expect_token(
                &Token::RParen(self.current_location()),
                "Expected ')' after guard",
            )?;
            Some(guard)
        } else {
            None
        };

        let body = self.parse_single_statement()?;
        Ok(StatementNode { guard, body })
    }

    /// `single_statement := name "+=" expression`
    pub(crate) fn parse_single_statement(&mut self) -> Result<SingleStatementNode, ParseError> {
        let target_location = self.current_location();
        let target = self.expect_identifier()?;
        let op = self.expect_operator("compound assignment", |symbol| {
            CompoundOp::from_symbol(symbol).is_some()
        })?;
        let value = self.parse_value()?;

        Ok(SingleStatementNode {
            target,
            target_location,
            op,
            value,
        })
    }

    /// `guard := value ("==" | "!=") value`
    pub(crate) fn parse_guard(&mut self) -> Result<GuardNode, ParseError> {
        let left = self.parse_value()?;
        let op = self.expect_operator("comparison", |symbol| {
            CompareOp::from_symbol(symbol).is_some()
        })?;
        let right = self.parse_value()?;

        Ok(GuardNode { left, op, right })
    }

    /// `value := NUMBER | name`
    pub(crate) fn parse_value(&mut self) -> Result<ValueNode, ParseError> {
        match self.peek_token() {
            Token::Number(text, loc) => {
                self.advance();
                Ok(ValueNode::Number(text, loc))
            }
            Token::Ident(name, loc) => {
                self.advance();
                Ok(ValueNode::Variable(name, loc))
            }
            _ => Err(self.error_here("Expected number or name")),
        }
    }

    // ===== Helper methods =====

    pub(crate) fn match_token(&mut self, token: &Token) -> bool {
        if self.check(token) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn check(&self, token: &Token) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(token)
    }

    pub(crate) fn advance(&mut self) -> &Token {
        if !self.is_at_end() {
            self.position += 1;
        }
        self.previous()
    }

    pub(crate) fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof(_))
    }

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.position]
    }

    pub(crate) fn peek_token(&self) -> Token {
        self.tokens[self.position].clone()
    }

    pub(crate) fn peek_ahead(&self, n: usize) -> Option<Token> {
        self.tokens.get(self.position + n).cloned()
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.position.saturating_sub(1)]
    }

    pub(crate) fn current_location(&self) -> SourceLocation {
        self.peek().location()
    }

    fn error_here(&self, message: &str) -> ParseError {
        ParseError {
            message: format!("{}, found {}", message, self.peek()),
            location: self.current_location(),
        }
    }

    pub(crate) fn expect_token(&mut self, token: &Token, message: &str) -> Result<(), ParseError> {
        if self.match_token(token) {
            Ok(())
        } else {
            Err(self.error_here(message))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<String, ParseError> {
        if let Token::Ident(name, _) = self.peek_token() {
            self.advance();
            Ok(name)
        } else {
            Err(self.error_here("Expected identifier"))
        }
    }

    /// Consume an operator token accepted by `allowed`
    pub(crate) fn expect_operator(
        &mut self,
        kind: &str,
        allowed: impl Fn(&str) -> bool,
    ) -> Result<OperatorNode, ParseError> {
        match self.peek_token() {
            Token::Operator(symbol, location) if allowed(&symbol) => {
                self.advance();
                Ok(OperatorNode { symbol, location })
            }
            _ => Err(self.error_here(&format!("Expected {} operator", kind))),
        }
    }
}
