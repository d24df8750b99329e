// Parse tree → evaluable fragments
//
// Bottom-up, one function per grammar node. Nothing here touches engine
// state, so a command either transforms completely or not at all before
// anything is registered.

use crate::interpreter::errors::SemanticFault;
use crate::interpreter::formula::{Guard, GuardedStatement, Operand, Statement};
use crate::memory::Number;
use crate::parser::ast::*;
use crate::parser::grammar::{CompareOp, CompoundOp};

/// A fully built command, ready to be registered or executed
#[derive(Debug, Clone, PartialEq)]
pub enum CommandFragment {
    Help,
    Quit,
    Prev,
    Next,
    Track(GuardedStatement),
    Verify(Guard),
    Disprove(Guard),
    BreakOn(Guard),
    List(Operand),
}

pub fn transform(node: &CommandNode) -> Result<CommandFragment, SemanticFault> {
    Ok(match node {
        CommandNode::Help => CommandFragment::Help,
        CommandNode::Quit => CommandFragment::Quit,
        CommandNode::Prev => CommandFragment::Prev,
        CommandNode::Next => CommandFragment::Next,
        CommandNode::Track(stmt) => CommandFragment::Track(build_statement(stmt)?),
        CommandNode::Verify(guard) => CommandFragment::Verify(build_guard(guard)?),
        CommandNode::Disprove(guard) => CommandFragment::Disprove(build_guard(guard)?),
        CommandNode::BreakOn(guard) => CommandFragment::BreakOn(build_guard(guard)?),
        CommandNode::List(expr) => CommandFragment::List(build_value(expr)?),
    })
}

/// `NUMBER` → `Const`, identifier → `VarRef`
pub fn build_value(node: &ValueNode) -> Result<Operand, SemanticFault> {
    match node {
        ValueNode::Number(text, location) => Number::from_literal(text)
            .map(Operand::Const)
            .ok_or_else(|| SemanticFault::InvalidNumber {
                text: text.clone(),
                location: *location,
            }),
        ValueNode::Variable(name, _) => Ok(Operand::VarRef(name.clone())),
    }
}

pub fn build_guard(node: &GuardNode) -> Result<Guard, SemanticFault> {
    let op = CompareOp::from_symbol(&node.op.symbol).ok_or_else(|| {
        SemanticFault::UnsupportedComparison {
            symbol: node.op.symbol.clone(),
            location: node.op.location,
        }
    })?;

    Ok(Guard {
        left: build_value(&node.left)?,
        op,
        right: build_value(&node.right)?,
    })
}

pub fn build_single_statement(node: &SingleStatementNode) -> Result<Statement, SemanticFault> {
    let op = CompoundOp::from_symbol(&node.op.symbol).ok_or_else(|| {
        SemanticFault::UnsupportedCompound {
            symbol: node.op.symbol.clone(),
            location: node.op.location,
        }
    })?;

    Ok(Statement {
        target: node.target.clone(),
        op,
        value: build_value(&node.value)?,
    })
}

/// Guarded → `(Some(guard), stmt)`, bare → `(None, stmt)`
pub fn build_statement(node: &StatementNode) -> Result<GuardedStatement, SemanticFault> {
    let guard = node.guard.as_ref().map(build_guard).transpose()?;
    Ok(GuardedStatement {
        guard,
        statement: build_single_statement(&node.body)?,
    })
}
