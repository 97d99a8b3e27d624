//! AST node types for JavaScript.
//!
//! One sum type covers every construct. Each node owns its children
//! outright (`Box` for single children, [`NodeList`] for sequences), so a
//! tree is a plain ownership hierarchy with no sharing and no cycles.

use crate::error::AstError;
use crate::list::NodeList;
use crate::position::Position;

/// A single AST node: a kind-specific payload plus the position at which
/// it was built.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub pos: Position,
}

/// Structural equality. Positions are ignored.
impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.kind == other.kind
    }
}

impl Eq for Node {}

impl Node {
    pub fn new(kind: NodeKind, pos: Position) -> Self {
        Self { kind, pos }
    }

    /// Name of the node's kind, as used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        self.kind.name()
    }

    /// Whether this node is a `StatementList`.
    pub fn is_list(&self) -> bool {
        matches!(self.kind, NodeKind::StatementList(_))
    }

    /// Borrow the underlying list, if this is a `StatementList`.
    pub fn as_list(&self) -> Option<&NodeList> {
        match &self.kind {
            NodeKind::StatementList(list) => Some(list),
            _ => None,
        }
    }

    /// Mutably borrow the underlying list, if this is a `StatementList`.
    pub fn as_list_mut(&mut self) -> Option<&mut NodeList> {
        match &mut self.kind {
            NodeKind::StatementList(list) => Some(list),
            _ => None,
        }
    }

    /// Append `item` to this node's list.
    ///
    /// Fails without modifying `self` when this node is not a
    /// `StatementList`; the rejected item is handed back inside the error.
    pub fn push_child(&mut self, item: Node) -> Result<(), AstError> {
        let found = self.kind_name();
        let pos = self.pos;
        match self.as_list_mut() {
            Some(list) => {
                list.push(item);
                Ok(())
            }
            None => Err(AstError::NotAList {
                found,
                pos,
                rejected: Box::new(item),
            }),
        }
    }
}

/// Declaration keyword of a variable declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    Var,
    Let,
    Const,
}

impl DeclKind {
    /// The source keyword.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Var => "var",
            Self::Let => "let",
            Self::Const => "const",
        }
    }
}

/// Literal values.
///
/// Number, string and bigint literals keep their source text exactly as
/// written (quotes and the `n` suffix included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Literal {
    Null,
    Boolean(bool),
    Number(Box<str>),
    String(Box<str>),
    BigInt(Box<str>),
}

/// Node kinds and their payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    // === Structure ===
    /// Root of a parsed script.
    Program { body: Box<Node> },
    /// Ordered sequence of owned nodes: statements, parameters, arguments,
    /// array elements or object properties.
    StatementList(NodeList),

    // === Declarations ===
    /// `var x = init`, `let x`, `const x = init`
    VarDeclaration {
        kind: DeclKind,
        name: Box<str>,
        init: Option<Box<Node>>,
    },
    /// `function name(params) { body }`
    FunctionDeclaration {
        name: Box<str>,
        params: Option<Box<Node>>,
        body: Box<Node>,
        is_async: bool,
        /// Never set by any builder; `function*` is not recognized.
        is_generator: bool,
    },

    // === Statements ===
    IfStatement {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Option<Box<Node>>,
    },
    WhileStatement { test: Box<Node>, body: Box<Node> },
    /// `do body while (test)`
    DoWhileStatement { body: Box<Node>, test: Box<Node> },
    ForStatement {
        init: Option<Box<Node>>,
        test: Option<Box<Node>>,
        update: Option<Box<Node>>,
        body: Box<Node>,
    },
    ReturnStatement { argument: Option<Box<Node>> },
    BreakStatement { label: Option<Box<Node>> },
    ContinueStatement { label: Option<Box<Node>> },
    ThrowStatement { argument: Box<Node> },
    BlockStatement { body: Box<Node> },
    EmptyStatement,
    ExpressionStatement { expression: Box<Node> },

    // === Expressions ===
    /// Binary operation, including the comma operator (`,`).
    BinaryExpression {
        operator: Box<str>,
        left: Box<Node>,
        right: Box<Node>,
    },
    /// Unary operation, including prefix and postfix `++`/`--`.
    UnaryExpression {
        operator: Box<str>,
        argument: Box<Node>,
        prefix: bool,
    },
    AssignmentExpression {
        operator: Box<str>,
        left: Box<Node>,
        right: Box<Node>,
    },
    ConditionalExpression {
        test: Box<Node>,
        consequent: Box<Node>,
        alternate: Box<Node>,
    },
    CallExpression { callee: Box<Node>, arguments: Box<Node> },
    MemberExpression {
        object: Box<Node>,
        property: Box<Node>,
        computed: bool,
    },
    /// `new callee`; arguments, when present, live in a nested call.
    NewExpression { callee: Box<Node> },
    Identifier { name: Box<str> },
    Literal(Literal),
    ThisExpression,
    ArrayExpression { elements: Option<Box<Node>> },
    ObjectExpression { properties: Option<Box<Node>> },
    /// One `key: value` entry of an object literal.
    Property {
        key: Box<Node>,
        value: Box<Node>,
        computed: bool,
        shorthand: bool,
    },
}

impl NodeKind {
    /// Name of the kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Program { .. } => "Program",
            Self::StatementList(_) => "StatementList",
            Self::VarDeclaration { .. } => "VarDeclaration",
            Self::FunctionDeclaration { .. } => "FunctionDeclaration",
            Self::IfStatement { .. } => "IfStatement",
            Self::WhileStatement { .. } => "WhileStatement",
            Self::DoWhileStatement { .. } => "DoWhileStatement",
            Self::ForStatement { .. } => "ForStatement",
            Self::ReturnStatement { .. } => "ReturnStatement",
            Self::BreakStatement { .. } => "BreakStatement",
            Self::ContinueStatement { .. } => "ContinueStatement",
            Self::ThrowStatement { .. } => "ThrowStatement",
            Self::BlockStatement { .. } => "BlockStatement",
            Self::EmptyStatement => "EmptyStatement",
            Self::ExpressionStatement { .. } => "ExpressionStatement",
            Self::BinaryExpression { .. } => "BinaryExpression",
            Self::UnaryExpression { .. } => "UnaryExpression",
            Self::AssignmentExpression { .. } => "AssignmentExpression",
            Self::ConditionalExpression { .. } => "ConditionalExpression",
            Self::CallExpression { .. } => "CallExpression",
            Self::MemberExpression { .. } => "MemberExpression",
            Self::NewExpression { .. } => "NewExpression",
            Self::Identifier { .. } => "Identifier",
            Self::Literal(_) => "Literal",
            Self::ThisExpression => "ThisExpression",
            Self::ArrayExpression { .. } => "ArrayExpression",
            Self::ObjectExpression { .. } => "ObjectExpression",
            Self::Property { .. } => "Property",
        }
    }
}
