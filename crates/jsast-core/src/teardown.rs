//! Explicit tree teardown.
//!
//! Dropping a [`Node`] already frees its whole subtree exactly once. The
//! walk here does the same by hand, post-order, so that every release is
//! counted: children first, then the node's owned strings, then the node's
//! own storage.
//!
//! The walk keeps its own work stack instead of recursing, so trees of
//! any depth can be released.

use crate::ast::{Literal, Node, NodeKind};
use serde::Serialize;

/// What a teardown released.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Released {
    pub nodes: usize,
    pub strings: usize,
}

/// Release a tree and everything it owns. `None` is a no-op.
pub fn teardown(root: Option<Node>) -> Released {
    let mut released = Released::default();
    let mut stack: Vec<Step> = root
        .map(|root| Step::Visit(Slot::Inline(root)))
        .into_iter()
        .collect();

    while let Some(step) = stack.pop() {
        match step {
            Step::Visit(slot) => detach(slot, &mut stack),
            Step::Text(text) => {
                drop(text);
                released.strings += 1;
            }
            Step::Free(slot) => {
                // Children are gone already, so this drop does not recurse.
                drop(slot);
                released.nodes += 1;
            }
        }
    }

    tracing::debug!(
        nodes = released.nodes,
        strings = released.strings,
        "tree released"
    );
    released
}

/// Where a node's storage lives.
enum Slot {
    /// The root, or an item of a statement list.
    Inline(Node),
    /// A child held through its own box.
    Boxed(Box<Node>),
}

impl Slot {
    fn node_mut(&mut self) -> &mut Node {
        match self {
            Slot::Inline(node) => node,
            Slot::Boxed(node) => &mut **node,
        }
    }
}

enum Step {
    Visit(Slot),
    Text(Box<str>),
    Free(Slot),
}

/// Move a node's children and strings onto the stack above the node, so
/// they are all released before it.
fn detach(mut slot: Slot, stack: &mut Vec<Step>) {
    let kind = std::mem::replace(&mut slot.node_mut().kind, NodeKind::EmptyStatement);

    if let NodeKind::StatementList(mut list) = kind {
        // The emptied list goes back into its node and keeps its buffer
        // until the node is freed, after every item.
        let at = stack.len();
        stack.extend(list.drain().rev().map(|item| Step::Visit(Slot::Inline(item))));
        slot.node_mut().kind = NodeKind::StatementList(list);
        stack.insert(at, Step::Free(slot));
        return;
    }

    stack.push(Step::Free(slot));
    push_payload(kind, &mut Pending { stack });
}

/// Pushes onto the work stack. The stack is LIFO, so strings are pushed
/// before children and children in reverse of their release order.
struct Pending<'a> {
    stack: &'a mut Vec<Step>,
}

impl Pending<'_> {
    fn text(&mut self, text: Box<str>) {
        self.stack.push(Step::Text(text));
    }

    fn child(&mut self, node: Box<Node>) {
        self.stack.push(Step::Visit(Slot::Boxed(node)));
    }

    fn child_opt(&mut self, node: Option<Box<Node>>) {
        if let Some(node) = node {
            self.child(node);
        }
    }
}

fn push_payload(kind: NodeKind, out: &mut Pending<'_>) {
    match kind {
        NodeKind::Program { body } => out.child(body),

        // Handled by `detach`.
        NodeKind::StatementList(_) => {}

        NodeKind::VarDeclaration { name, init, .. } => {
            out.text(name);
            out.child_opt(init);
        }

        NodeKind::FunctionDeclaration {
            name, params, body, ..
        } => {
            out.text(name);
            out.child(body);
            out.child_opt(params);
        }

        NodeKind::IfStatement {
            test,
            consequent,
            alternate,
        } => {
            out.child_opt(alternate);
            out.child(consequent);
            out.child(test);
        }

        NodeKind::WhileStatement { test, body } | NodeKind::DoWhileStatement { body, test } => {
            out.child(body);
            out.child(test);
        }

        NodeKind::ForStatement {
            init,
            test,
            update,
            body,
        } => {
            out.child(body);
            out.child_opt(update);
            out.child_opt(test);
            out.child_opt(init);
        }

        NodeKind::ReturnStatement { argument: child }
        | NodeKind::BreakStatement { label: child }
        | NodeKind::ContinueStatement { label: child }
        | NodeKind::ArrayExpression { elements: child }
        | NodeKind::ObjectExpression { properties: child } => out.child_opt(child),

        NodeKind::ThrowStatement { argument: child }
        | NodeKind::BlockStatement { body: child }
        | NodeKind::ExpressionStatement { expression: child }
        | NodeKind::NewExpression { callee: child } => out.child(child),

        NodeKind::BinaryExpression {
            operator,
            left,
            right,
        }
        | NodeKind::AssignmentExpression {
            operator,
            left,
            right,
        } => {
            out.text(operator);
            out.child(right);
            out.child(left);
        }

        NodeKind::UnaryExpression {
            operator, argument, ..
        } => {
            out.text(operator);
            out.child(argument);
        }

        NodeKind::ConditionalExpression {
            test,
            consequent,
            alternate,
        } => {
            out.child(alternate);
            out.child(consequent);
            out.child(test);
        }

        NodeKind::CallExpression { callee, arguments } => {
            out.child(arguments);
            out.child(callee);
        }

        NodeKind::MemberExpression {
            object, property, ..
        } => {
            out.child(property);
            out.child(object);
        }

        NodeKind::Property { key, value, .. } => {
            out.child(value);
            out.child(key);
        }

        NodeKind::Identifier { name } => out.text(name),

        NodeKind::Literal(literal) => match literal {
            Literal::Null | Literal::Boolean(_) => {}
            Literal::Number(raw) | Literal::String(raw) | Literal::BigInt(raw) => out.text(raw),
        },

        NodeKind::ThisExpression | NodeKind::EmptyStatement => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;

    #[test]
    fn test_none_is_noop() {
        assert_eq!(teardown(None), Released::default());
    }

    #[test]
    fn test_single_leaf() {
        let b = Builder::new();
        assert_eq!(
            teardown(Some(b.this_expression())),
            Released { nodes: 1, strings: 0 }
        );
        assert_eq!(
            teardown(Some(b.identifier("x"))),
            Released { nodes: 1, strings: 1 }
        );
    }

    #[test]
    fn test_program_counts() {
        let b = Builder::new();
        let list = b.append_statement(
            Some(b.statement_list()),
            Some(b.var_declaration("x", Some(b.number_literal("5")))),
        );
        let program = b.program(list.unwrap());
        // Program, StatementList, VarDeclaration, Literal; "x" and "5".
        assert_eq!(teardown(Some(program)), Released { nodes: 4, strings: 2 });
    }

    #[test]
    fn test_operators_and_optional_children() {
        let b = Builder::new();
        let tree = b.for_statement(
            Some(b.assignment_expression("=", b.identifier("i"), b.number_literal("0"))),
            None,
            Some(b.update_expression("++", b.identifier("i"), false)),
            b.block_statement(b.statement_list()),
        );
        // for, =, i, 0, ++, i, block, list
        // strings: "=", "i", "0", "++", "i"
        assert_eq!(teardown(Some(tree)), Released { nodes: 8, strings: 5 });
    }

    #[test]
    fn test_large_list_counts_every_item() {
        let b = Builder::new();
        let mut list = Some(b.statement_list());
        for i in 0..100 {
            list = b.append_statement(list, Some(b.number_literal(&i.to_string())));
        }
        assert_eq!(teardown(list), Released { nodes: 101, strings: 100 });
    }

    #[test]
    fn test_object_with_properties() {
        let b = Builder::new();
        let props = b.append_statement(
            Some(b.statement_list()),
            Some(b.property(b.identifier("k"), b.boolean_literal(true), false, false)),
        );
        let obj = b.object_expression(props);
        // object, list, property, key, value
        assert_eq!(teardown(Some(obj)), Released { nodes: 5, strings: 1 });
    }

    #[test]
    fn test_deep_expression_chain() {
        let b = Builder::new();
        let mut expr = b.identifier("x");
        for _ in 0..100_000 {
            expr = b.unary_expression("!", expr);
        }
        assert_eq!(
            teardown(Some(expr)),
            Released { nodes: 100_001, strings: 100_001 }
        );
    }

    #[test]
    fn test_deeply_nested_blocks() {
        let b = Builder::new();
        let mut stmt = b.empty_statement();
        for _ in 0..10_000 {
            stmt = b.block_statement(b.statement_list_of([stmt]));
        }
        // Each level is a block and its list.
        assert_eq!(
            teardown(Some(stmt)),
            Released { nodes: 20_001, strings: 0 }
        );
    }
}
