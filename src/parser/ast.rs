// Parse tree definitions for the debugger command language

/// Source location information for error reporting.
///
/// Commands are single-line, so only the column is tracked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub column: usize,
}

impl SourceLocation {
    pub fn new(column: usize) -> Self {
        Self { column }
    }
}

/// Leaf of the grammar: `value := NUMBER | name`
#[derive(Debug, Clone, PartialEq)]
pub enum ValueNode {
    /// Numeric literal, kept as written until the transform step
    Number(String, SourceLocation),
    /// Bare identifier
    Variable(String, SourceLocation),
}

impl ValueNode {
    pub fn location(&self) -> SourceLocation {
        match self {
            ValueNode::Number(_, loc) | ValueNode::Variable(_, loc) => *loc,
        }
    }
}

/// `expression := value`
pub type ExpressionNode = ValueNode;

/// An operator token as it appeared in the input
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperatorNode {
    pub symbol: String,
    pub location: SourceLocation,
}

/// `guard := value ("==" | "!=") value`
#[derive(Debug, Clone, PartialEq)]
pub struct GuardNode {
    pub left: ValueNode,
    pub op: OperatorNode,
    pub right: ValueNode,
}

/// `single_statement := name "+=" expression`
#[derive(Debug, Clone, PartialEq)]
pub struct SingleStatementNode {
    pub target: String,
    pub target_location: SourceLocation,
    pub op: OperatorNode,
    pub value: ExpressionNode,
}

/// `statement := "(" guard ")" single_statement | single_statement`
#[derive(Debug, Clone, PartialEq)]
pub struct StatementNode {
    pub guard: Option<GuardNode>,
    pub body: SingleStatementNode,
}

/// Root of the parse tree, one per input line
#[derive(Debug, Clone, PartialEq)]
pub enum CommandNode {
    Help,
    Quit,
    Prev,
    Next,
    Track(StatementNode),
    Verify(GuardNode),
    Disprove(GuardNode),
    BreakOn(GuardNode),
    List(ExpressionNode),
}
