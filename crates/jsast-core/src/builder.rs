//! Tree construction API.
//!
//! A grammar drives the [`Builder`] bottom-up: children are built first and
//! moved into their parent's constructor. Every constructor stamps the new
//! node with the builder's current scan cursor, which the grammar advances
//! with [`Builder::seek`] before each call.
//!
//! Leaf text (names, operators, literal lexemes) is copied into the node,
//! so callers keep ownership of their input buffers.

use crate::ast::{DeclKind, Literal, Node, NodeKind};
use crate::list::NodeList;
use crate::position::Position;

/// Node factory carrying the current scan cursor.
#[derive(Debug, Clone, Default)]
pub struct Builder {
    cursor: Position,
}

impl Builder {
    /// Create a builder positioned at line 1, column 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a builder positioned at `pos`.
    pub fn at(pos: Position) -> Self {
        Self { cursor: pos }
    }

    /// The position the next node will be stamped with.
    #[inline]
    pub fn cursor(&self) -> Position {
        self.cursor
    }

    /// Move the scan cursor.
    #[inline]
    pub fn seek(&mut self, pos: Position) {
        self.cursor = pos;
    }

    fn node(&self, kind: NodeKind) -> Node {
        tracing::trace!(kind = kind.name(), pos = %self.cursor, "build node");
        Node::new(kind, self.cursor)
    }

    // =========================================================================
    // Structure
    // =========================================================================

    pub fn program(&self, body: Node) -> Node {
        self.node(NodeKind::Program {
            body: Box::new(body),
        })
    }

    /// An empty `StatementList` with the initial capacity reserved.
    pub fn statement_list(&self) -> Node {
        self.node(NodeKind::StatementList(NodeList::new()))
    }

    /// A `StatementList` holding `items` in order.
    pub fn statement_list_of(&self, items: impl IntoIterator<Item = Node>) -> Node {
        let mut list = NodeList::new();
        for item in items {
            list.push(item);
        }
        self.node(NodeKind::StatementList(list))
    }

    /// Append `item` to `list`, passing absent values through.
    ///
    /// - no list: the item itself is returned (possibly `None`)
    /// - no item: the list is returned unchanged
    /// - a list target that is not a `StatementList`: a warning is logged,
    ///   the item is released and the target is returned unmodified
    ///
    /// Use [`Node::push_child`] to get the misuse back as an error instead.
    pub fn append_statement(&self, list: Option<Node>, item: Option<Node>) -> Option<Node> {
        let Some(mut list) = list else {
            return item;
        };
        let Some(item) = item else {
            return Some(list);
        };
        if let Err(err) = list.push_child(item) {
            tracing::warn!(%err, cursor = %self.cursor, "append ignored");
        }
        Some(list)
    }

    // =========================================================================
    // Declarations
    // =========================================================================

    pub fn declaration(&self, kind: DeclKind, name: &str, init: Option<Node>) -> Node {
        self.node(NodeKind::VarDeclaration {
            kind,
            name: name.into(),
            init: init.map(Box::new),
        })
    }

    pub fn var_declaration(&self, name: &str, init: Option<Node>) -> Node {
        self.declaration(DeclKind::Var, name, init)
    }

    pub fn let_declaration(&self, name: &str, init: Option<Node>) -> Node {
        self.declaration(DeclKind::Let, name, init)
    }

    pub fn const_declaration(&self, name: &str, init: Option<Node>) -> Node {
        self.declaration(DeclKind::Const, name, init)
    }

    /// A plain (non-async, non-generator) function declaration.
    ///
    /// `params`, when present, is a `StatementList` of identifiers.
    pub fn function_declaration(&self, name: &str, params: Option<Node>, body: Node) -> Node {
        self.node(NodeKind::FunctionDeclaration {
            name: name.into(),
            params: params.map(Box::new),
            body: Box::new(body),
            is_async: false,
            is_generator: false,
        })
    }

    pub fn async_function_declaration(
        &self,
        name: &str,
        params: Option<Node>,
        body: Node,
    ) -> Node {
        let mut node = self.function_declaration(name, params, body);
        if let NodeKind::FunctionDeclaration { is_async, .. } = &mut node.kind {
            *is_async = true;
        }
        node
    }

    // =========================================================================
    // Statements
    // =========================================================================

    pub fn expression_statement(&self, expression: Node) -> Node {
        self.node(NodeKind::ExpressionStatement {
            expression: Box::new(expression),
        })
    }

    pub fn if_statement(&self, test: Node, consequent: Node, alternate: Option<Node>) -> Node {
        self.node(NodeKind::IfStatement {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: alternate.map(Box::new),
        })
    }

    pub fn while_statement(&self, test: Node, body: Node) -> Node {
        self.node(NodeKind::WhileStatement {
            test: Box::new(test),
            body: Box::new(body),
        })
    }

    pub fn do_while_statement(&self, body: Node, test: Node) -> Node {
        self.node(NodeKind::DoWhileStatement {
            body: Box::new(body),
            test: Box::new(test),
        })
    }

    pub fn for_statement(
        &self,
        init: Option<Node>,
        test: Option<Node>,
        update: Option<Node>,
        body: Node,
    ) -> Node {
        self.node(NodeKind::ForStatement {
            init: init.map(Box::new),
            test: test.map(Box::new),
            update: update.map(Box::new),
            body: Box::new(body),
        })
    }

    /// `for (var name = init; test; update) body`
    pub fn for_statement_with_var(
        &self,
        name: &str,
        init: Option<Node>,
        test: Option<Node>,
        update: Option<Node>,
        body: Node,
    ) -> Node {
        let decl = self.var_declaration(name, init);
        self.for_statement(Some(decl), test, update, body)
    }

    pub fn return_statement(&self, argument: Option<Node>) -> Node {
        self.node(NodeKind::ReturnStatement {
            argument: argument.map(Box::new),
        })
    }

    pub fn break_statement(&self, label: Option<Node>) -> Node {
        self.node(NodeKind::BreakStatement {
            label: label.map(Box::new),
        })
    }

    pub fn continue_statement(&self, label: Option<Node>) -> Node {
        self.node(NodeKind::ContinueStatement {
            label: label.map(Box::new),
        })
    }

    pub fn throw_statement(&self, argument: Node) -> Node {
        self.node(NodeKind::ThrowStatement {
            argument: Box::new(argument),
        })
    }

    pub fn block_statement(&self, body: Node) -> Node {
        self.node(NodeKind::BlockStatement {
            body: Box::new(body),
        })
    }

    pub fn empty_statement(&self) -> Node {
        self.node(NodeKind::EmptyStatement)
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    pub fn binary_expression(&self, operator: &str, left: Node, right: Node) -> Node {
        self.node(NodeKind::BinaryExpression {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    /// `a, b` is a binary expression with operator `,`.
    pub fn comma_expression(&self, left: Node, right: Node) -> Node {
        self.binary_expression(",", left, right)
    }

    /// A prefix unary operation such as `!x` or `typeof x`.
    pub fn unary_expression(&self, operator: &str, argument: Node) -> Node {
        self.update_expression(operator, argument, true)
    }

    /// `++x`, `x--` and friends. Shares the unary payload.
    pub fn update_expression(&self, operator: &str, argument: Node, prefix: bool) -> Node {
        self.node(NodeKind::UnaryExpression {
            operator: operator.into(),
            argument: Box::new(argument),
            prefix,
        })
    }

    pub fn assignment_expression(&self, operator: &str, left: Node, right: Node) -> Node {
        self.node(NodeKind::AssignmentExpression {
            operator: operator.into(),
            left: Box::new(left),
            right: Box::new(right),
        })
    }

    pub fn conditional_expression(&self, test: Node, consequent: Node, alternate: Node) -> Node {
        self.node(NodeKind::ConditionalExpression {
            test: Box::new(test),
            consequent: Box::new(consequent),
            alternate: Box::new(alternate),
        })
    }

    /// `arguments` is a `StatementList`, empty for `f()`.
    pub fn call_expression(&self, callee: Node, arguments: Node) -> Node {
        self.node(NodeKind::CallExpression {
            callee: Box::new(callee),
            arguments: Box::new(arguments),
        })
    }

    pub fn member_expression(&self, object: Node, property: Node, computed: bool) -> Node {
        self.node(NodeKind::MemberExpression {
            object: Box::new(object),
            property: Box::new(property),
            computed,
        })
    }

    pub fn new_expression(&self, callee: Node) -> Node {
        self.node(NodeKind::NewExpression {
            callee: Box::new(callee),
        })
    }

    pub fn identifier(&self, name: &str) -> Node {
        self.node(NodeKind::Identifier { name: name.into() })
    }

    pub fn this_expression(&self) -> Node {
        self.node(NodeKind::ThisExpression)
    }

    pub fn array_expression(&self, elements: Option<Node>) -> Node {
        self.node(NodeKind::ArrayExpression {
            elements: elements.map(Box::new),
        })
    }

    pub fn object_expression(&self, properties: Option<Node>) -> Node {
        self.node(NodeKind::ObjectExpression {
            properties: properties.map(Box::new),
        })
    }

    pub fn property(&self, key: Node, value: Node, computed: bool, shorthand: bool) -> Node {
        self.node(NodeKind::Property {
            key: Box::new(key),
            value: Box::new(value),
            computed,
            shorthand,
        })
    }

    // === Literals ===

    pub fn null_literal(&self) -> Node {
        self.node(NodeKind::Literal(Literal::Null))
    }

    pub fn boolean_literal(&self, value: bool) -> Node {
        self.node(NodeKind::Literal(Literal::Boolean(value)))
    }

    /// Numeric literal, stored as written (`0x1F`, `1e3`, `.5`).
    pub fn number_literal(&self, raw: &str) -> Node {
        self.node(NodeKind::Literal(Literal::Number(raw.into())))
    }

    /// String literal, stored as written including its quotes.
    pub fn string_literal(&self, raw: &str) -> Node {
        self.node(NodeKind::Literal(Literal::String(raw.into())))
    }

    /// BigInt literal, stored as written including the `n` suffix.
    pub fn bigint_literal(&self, raw: &str) -> Node {
        self.node(NodeKind::Literal(Literal::BigInt(raw.into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_nodes_take_cursor_position() {
        let mut b = Builder::new();
        let first = b.identifier("a");
        b.seek(Position::new(7, 3));
        let second = b.identifier("b");
        assert_eq!(first.pos, Position::new(1, 1));
        assert_eq!(second.pos, Position::new(7, 3));
        assert_eq!(b.cursor(), Position::new(7, 3));
    }

    #[test]
    fn test_parent_position_is_its_own() {
        let mut b = Builder::at(Position::new(2, 1));
        let left = b.identifier("a");
        b.seek(Position::new(2, 5));
        let right = b.number_literal("1");
        b.seek(Position::new(2, 9));
        let sum = b.binary_expression("+", left, right);
        assert_eq!(sum.pos, Position::new(2, 9));
        let NodeKind::BinaryExpression { left, right, .. } = &sum.kind else {
            panic!("expected binary expression");
        };
        assert_eq!(left.pos, Position::new(2, 1));
        assert_eq!(right.pos, Position::new(2, 5));
    }

    #[test]
    fn test_append_without_list_returns_item() {
        let b = Builder::new();
        let item = b.identifier("x");
        assert_eq!(b.append_statement(None, Some(item.clone())), Some(item));
        assert_eq!(b.append_statement(None, None), None);
    }

    #[test]
    fn test_append_without_item_returns_list() {
        let b = Builder::new();
        let list = b.append_statement(Some(b.statement_list()), None).unwrap();
        assert_eq!(list.as_list().map(NodeList::len), Some(0));
    }

    #[test]
    fn test_append_grows_list() {
        let b = Builder::new();
        let mut list = Some(b.statement_list());
        for name in ["a", "b", "c"] {
            list = b.append_statement(list, Some(b.identifier(name)));
        }
        let list = list.unwrap();
        let items = list.as_list().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2], b.identifier("c"));
    }

    #[test]
    fn test_statement_list_of_matches_appends() {
        let b = Builder::new();
        let mut appended = Some(b.statement_list());
        for name in ["a", "b"] {
            appended = b.append_statement(appended, Some(b.identifier(name)));
        }
        let collected = b.statement_list_of(["a", "b"].map(|name| b.identifier(name)));
        assert_eq!(appended, Some(collected));
    }

    #[test]
    fn test_append_to_non_list_is_ignored() {
        let b = Builder::new();
        let target = b.identifier("x");
        let result = b.append_statement(Some(target.clone()), Some(b.identifier("y")));
        assert_eq!(result, Some(target));
    }

    #[test]
    fn test_declarations_copy_names() {
        let b = Builder::new();
        let mut name = String::from("counter");
        let decl = b.let_declaration(&name, Some(b.number_literal("0")));
        name.clear();
        let NodeKind::VarDeclaration { kind, name, init } = &decl.kind else {
            panic!("expected declaration");
        };
        assert_eq!(*kind, DeclKind::Let);
        assert_eq!(&**name, "counter");
        assert!(init.is_some());
    }

    #[test]
    fn test_var_and_const_declarations() {
        let b = Builder::new();
        let var = b.var_declaration("a", None);
        let constant = b.const_declaration("b", None);
        assert!(matches!(var.kind, NodeKind::VarDeclaration { kind: DeclKind::Var, .. }));
        assert!(matches!(
            constant.kind,
            NodeKind::VarDeclaration { kind: DeclKind::Const, .. }
        ));
    }

    #[test]
    fn test_async_function_sets_only_async_flag() {
        let b = Builder::new();
        let f = b.async_function_declaration("load", None, b.block_statement(b.statement_list()));
        let NodeKind::FunctionDeclaration {
            is_async,
            is_generator,
            ..
        } = f.kind
        else {
            panic!("expected function");
        };
        assert!(is_async);
        assert!(!is_generator);
    }

    #[test]
    fn test_plain_function_is_not_async() {
        let b = Builder::new();
        let f = b.function_declaration("f", None, b.block_statement(b.statement_list()));
        assert!(matches!(
            f.kind,
            NodeKind::FunctionDeclaration { is_async: false, is_generator: false, .. }
        ));
    }

    #[test]
    fn test_for_statement_with_var() {
        let b = Builder::new();
        let stmt = b.for_statement_with_var(
            "i",
            Some(b.number_literal("0")),
            None,
            None,
            b.empty_statement(),
        );
        let NodeKind::ForStatement { init: Some(init), test, update, .. } = &stmt.kind else {
            panic!("expected for statement with init");
        };
        assert_eq!(**init, b.var_declaration("i", Some(b.number_literal("0"))));
        assert!(test.is_none());
        assert!(update.is_none());
    }

    #[test]
    fn test_comma_is_binary() {
        let b = Builder::new();
        let comma = b.comma_expression(b.identifier("a"), b.identifier("b"));
        assert_eq!(
            comma,
            b.binary_expression(",", b.identifier("a"), b.identifier("b"))
        );
    }

    #[test]
    fn test_unary_is_prefix() {
        let b = Builder::new();
        assert_eq!(
            b.unary_expression("!", b.identifier("ok")),
            b.update_expression("!", b.identifier("ok"), true)
        );
    }

    #[test]
    fn test_literals_keep_source_text() {
        let b = Builder::new();
        assert_eq!(
            b.string_literal("'hi'").kind,
            NodeKind::Literal(Literal::String("'hi'".into()))
        );
        assert_eq!(
            b.number_literal("0x1F").kind,
            NodeKind::Literal(Literal::Number("0x1F".into()))
        );
        assert_eq!(
            b.bigint_literal("10n").kind,
            NodeKind::Literal(Literal::BigInt("10n".into()))
        );
        assert_eq!(b.boolean_literal(false).kind, NodeKind::Literal(Literal::Boolean(false)));
        assert_eq!(b.null_literal().kind, NodeKind::Literal(Literal::Null));
    }
}
