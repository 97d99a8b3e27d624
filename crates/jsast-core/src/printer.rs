//! Indented tree dump.
//!
//! A read-only depth-first walk that writes one line per node, two spaces
//! per level. Labeled sections (`Test:`, `Body:`, ...) sit one level below
//! their node and the section's child one level below that. Absent
//! optional children either omit their section or print a placeholder,
//! depending on the kind; an absent node handed to the printer directly
//! prints `(null)`.
//!
//! The output is deterministic: printing the same tree twice yields
//! byte-identical text.

use crate::ast::{DeclKind, Literal, Node, NodeKind};
use std::fmt::{self, Write};

/// Indentation written in one call; deeper levels repeat it.
const SPACES: &str = "                                                                ";
const INDENT_WIDTH: usize = 2;

/// Writes a tree dump into any [`fmt::Write`] sink.
///
/// The walk keeps its own stack of pending lines, so trees of any depth
/// can be printed.
pub struct TreePrinter<W> {
    out: W,
}

/// A pending line of output.
enum Item<'a> {
    /// A node's own line, followed by its sections.
    Node(&'a Node, usize),
    /// `Title:` above a section's child.
    Title(&'static str, usize),
    /// Stands in for an absent child.
    Placeholder(&'static str, usize),
}

impl<W: Write> TreePrinter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Print `node` and its subtree starting at `depth`.
    pub fn print(&mut self, node: Option<&Node>, depth: usize) -> fmt::Result {
        let Some(node) = node else {
            self.indent(depth)?;
            return self.out.write_str("(null)\n");
        };

        let mut stack = vec![Item::Node(node, depth)];
        while let Some(item) = stack.pop() {
            match item {
                Item::Node(node, depth) => {
                    self.indent(depth)?;
                    self.header(node)?;
                    let mark = stack.len();
                    sections(&node.kind, depth, &mut stack);
                    stack[mark..].reverse();
                }
                Item::Title(title, depth) => {
                    self.indent(depth)?;
                    writeln!(self.out, "{title}:")?;
                }
                Item::Placeholder(text, depth) => {
                    self.indent(depth)?;
                    writeln!(self.out, "{text}")?;
                }
            }
        }
        Ok(())
    }

    /// The node's label and inline details, up to the end of its line.
    fn header(&mut self, node: &Node) -> fmt::Result {
        self.out.write_str(label(&node.kind))?;

        match &node.kind {
            NodeKind::StatementList(list) => write!(self.out, " ({} statements)", list.len())?,
            NodeKind::VarDeclaration { name, .. } => write!(self.out, " name={name}")?,
            NodeKind::FunctionDeclaration {
                name,
                is_async,
                is_generator,
                ..
            } => {
                write!(self.out, " name={name}")?;
                if *is_async {
                    self.out.write_str(" (async)")?;
                }
                if *is_generator {
                    self.out.write_str(" (generator)")?;
                }
            }
            NodeKind::BinaryExpression { operator, .. }
            | NodeKind::AssignmentExpression { operator, .. } => {
                write!(self.out, " op='{operator}'")?;
            }
            NodeKind::UnaryExpression {
                operator, prefix, ..
            } => {
                let fixity = if *prefix { "(prefix)" } else { "(postfix)" };
                write!(self.out, " op='{operator}' {fixity}")?;
            }
            NodeKind::MemberExpression { computed, .. } => {
                self.out
                    .write_str(if *computed { " (computed)" } else { " (dot)" })?;
            }
            NodeKind::Identifier { name } => write!(self.out, " '{name}'")?,
            NodeKind::Literal(literal) => match literal {
                Literal::Null => self.out.write_str(" null")?,
                Literal::Boolean(value) => write!(self.out, " {value}")?,
                Literal::Number(raw) => write!(self.out, " (number) {raw}")?,
                Literal::String(raw) => write!(self.out, " (string) {raw}")?,
                Literal::BigInt(raw) => write!(self.out, " (bigint) {raw}")?,
            },
            NodeKind::Property {
                computed,
                shorthand,
                ..
            } => {
                if *computed {
                    self.out.write_str(" (computed)")?;
                }
                if *shorthand {
                    self.out.write_str(" (shorthand)")?;
                }
            }
            _ => {}
        }

        self.out.write_char('\n')
    }

    fn indent(&mut self, depth: usize) -> fmt::Result {
        let mut width = depth * INDENT_WIDTH;
        while width > 0 {
            let chunk = width.min(SPACES.len());
            self.out.write_str(&SPACES[..chunk])?;
            width -= chunk;
        }
        Ok(())
    }
}

/// Queue the lines below a node's own line, in print order. Labeled
/// sections sit one level below the node and their child one level below
/// that; direct children sit one level below.
fn sections<'a>(kind: &'a NodeKind, depth: usize, out: &mut Vec<Item<'a>>) {
    let mut lines = Lines { out, depth };

    match kind {
        NodeKind::Program { body } => lines.child(body),

        NodeKind::StatementList(list) => {
            for item in list {
                lines.child(item);
            }
        }

        NodeKind::VarDeclaration { init, .. } => {
            if let Some(init) = init {
                lines.section("Initializer", init);
            }
        }

        NodeKind::FunctionDeclaration { params, body, .. } => {
            if let Some(params) = params {
                lines.section("Parameters", params);
            }
            lines.section("Body", body);
        }

        NodeKind::IfStatement {
            test,
            consequent,
            alternate,
        } => {
            lines.section("Test", test);
            lines.section("Consequent", consequent);
            if let Some(alternate) = alternate {
                lines.section("Alternate", alternate);
            }
        }

        NodeKind::WhileStatement { test, body } => {
            lines.section("Test", test);
            lines.section("Body", body);
        }

        NodeKind::DoWhileStatement { body, test } => {
            lines.section("Body", body);
            lines.section("Test", test);
        }

        NodeKind::ForStatement {
            init,
            test,
            update,
            body,
        } => {
            if let Some(init) = init {
                lines.section("Init", init);
            }
            if let Some(test) = test {
                lines.section("Test", test);
            }
            if let Some(update) = update {
                lines.section("Update", update);
            }
            lines.section("Body", body);
        }

        NodeKind::ReturnStatement { argument } => match argument {
            Some(argument) => lines.section("Argument", argument),
            None => lines.placeholder("(no argument)"),
        },

        NodeKind::BreakStatement { label } | NodeKind::ContinueStatement { label } => {
            if let Some(label) = label {
                lines.section("Label", label);
            }
        }

        NodeKind::ThrowStatement { argument: child }
        | NodeKind::ExpressionStatement { expression: child }
        | NodeKind::BlockStatement { body: child } => lines.child(child),

        NodeKind::BinaryExpression { left, right, .. }
        | NodeKind::AssignmentExpression { left, right, .. } => {
            lines.section("Left", left);
            lines.section("Right", right);
        }

        NodeKind::UnaryExpression { argument, .. } => lines.section("Argument", argument),

        NodeKind::ConditionalExpression {
            test,
            consequent,
            alternate,
        } => {
            lines.section("Test", test);
            lines.section("Consequent", consequent);
            lines.section("Alternate", alternate);
        }

        NodeKind::CallExpression { callee, arguments } => {
            lines.section("Callee", callee);
            lines.section("Arguments", arguments);
        }

        NodeKind::MemberExpression {
            object, property, ..
        } => {
            lines.section("Object", object);
            lines.section("Property", property);
        }

        NodeKind::NewExpression { callee } => lines.section("Callee", callee),

        NodeKind::ArrayExpression { elements } => match elements {
            Some(elements) => lines.section("Elements", elements),
            None => lines.placeholder("(empty array)"),
        },

        NodeKind::ObjectExpression { properties } => match properties {
            Some(properties) => lines.section("Properties", properties),
            None => lines.placeholder("(empty object)"),
        },

        NodeKind::Property { key, value, .. } => {
            lines.section("Key", key);
            lines.section("Value", value);
        }

        NodeKind::Identifier { .. }
        | NodeKind::Literal(_)
        | NodeKind::ThisExpression
        | NodeKind::EmptyStatement => {}
    }
}

struct Lines<'a, 'v> {
    out: &'v mut Vec<Item<'a>>,
    depth: usize,
}

impl<'a> Lines<'a, '_> {
    /// `Title:` one level down, then `child` two levels down.
    fn section(&mut self, title: &'static str, child: &'a Node) {
        self.out.push(Item::Title(title, self.depth + 1));
        self.out.push(Item::Node(child, self.depth + 2));
    }

    fn child(&mut self, child: &'a Node) {
        self.out.push(Item::Node(child, self.depth + 1));
    }

    fn placeholder(&mut self, text: &'static str) {
        self.out.push(Item::Placeholder(text, self.depth + 1));
    }
}

/// The label printed at the start of a node's line.
fn label(kind: &NodeKind) -> &'static str {
    match kind {
        NodeKind::VarDeclaration { kind, .. } => match kind {
            DeclKind::Var => "VariableDeclaration(var)",
            DeclKind::Let => "VariableDeclaration(let)",
            DeclKind::Const => "VariableDeclaration(const)",
        },
        NodeKind::BinaryExpression { operator, .. } if &**operator == "," => "CommaExpression",
        NodeKind::UnaryExpression { operator, .. } if matches!(&**operator, "++" | "--") => {
            "UpdateExpression"
        }
        other => other.name(),
    }
}

/// Dump a tree (or `(null)` for an absent one) into a new string.
pub fn print_tree(node: Option<&Node>) -> String {
    let mut printer = TreePrinter::new(String::new());
    // Writing into a String cannot fail.
    let _ = printer.print(node, 0);
    printer.into_inner()
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        TreePrinter::new(f).print(Some(self), 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::Builder;

    fn block(b: &Builder, items: Vec<Node>) -> Node {
        let mut list = Some(b.statement_list());
        for item in items {
            list = b.append_statement(list, Some(item));
        }
        b.block_statement(list.unwrap())
    }

    #[test]
    fn test_null_node() {
        assert_eq!(print_tree(None), "(null)\n");
    }

    #[test]
    fn test_declaration_with_initializer() {
        let b = Builder::new();
        let decl = b.var_declaration("x", Some(b.number_literal("5")));
        assert_eq!(
            print_tree(Some(&decl)),
            "VariableDeclaration(var) name=x\n  Initializer:\n    Literal (number) 5\n"
        );
    }

    #[test]
    fn test_declaration_without_initializer() {
        let b = Builder::new();
        assert_eq!(
            print_tree(Some(&b.const_declaration("y", None))),
            "VariableDeclaration(const) name=y\n"
        );
    }

    #[test]
    fn test_if_without_alternate_omits_section() {
        let b = Builder::new();
        let stmt = b.if_statement(
            b.identifier("x"),
            block(&b, vec![b.empty_statement()]),
            None,
        );
        let out = print_tree(Some(&stmt));
        assert_eq!(
            out,
            "IfStatement\n\
             \x20 Test:\n\
             \x20   Identifier 'x'\n\
             \x20 Consequent:\n\
             \x20   BlockStatement\n\
             \x20     StatementList (1 statements)\n\
             \x20       EmptyStatement\n"
        );
        assert!(!out.contains("Alternate:"));
    }

    #[test]
    fn test_if_with_alternate() {
        let b = Builder::new();
        let stmt = b.if_statement(
            b.identifier("x"),
            b.empty_statement(),
            Some(b.empty_statement()),
        );
        assert!(print_tree(Some(&stmt)).ends_with("  Alternate:\n    EmptyStatement\n"));
    }

    #[test]
    fn test_empty_array_and_object() {
        let b = Builder::new();
        assert_eq!(
            print_tree(Some(&b.array_expression(None))),
            "ArrayExpression\n  (empty array)\n"
        );
        assert_eq!(
            print_tree(Some(&b.object_expression(None))),
            "ObjectExpression\n  (empty object)\n"
        );
    }

    #[test]
    fn test_async_function_flag() {
        let b = Builder::new();
        let f = b.async_function_declaration("fetchAll", None, block(&b, vec![]));
        let out = print_tree(Some(&f));
        assert!(out.starts_with("FunctionDeclaration name=fetchAll (async)\n"));
        assert!(!out.contains("(generator)"));
        assert!(!out.contains("Parameters:"));
        assert!(out.contains("  Body:\n    BlockStatement\n      StatementList (0 statements)\n"));
    }

    #[test]
    fn test_function_parameters() {
        let b = Builder::new();
        let params = b.append_statement(Some(b.statement_list()), Some(b.identifier("a")));
        let f = b.function_declaration("f", params, block(&b, vec![]));
        assert!(print_tree(Some(&f))
            .contains("  Parameters:\n    StatementList (1 statements)\n      Identifier 'a'\n"));
    }

    #[test]
    fn test_return_without_argument() {
        let b = Builder::new();
        assert_eq!(
            print_tree(Some(&b.return_statement(None))),
            "ReturnStatement\n  (no argument)\n"
        );
    }

    #[test]
    fn test_break_with_label() {
        let b = Builder::new();
        assert_eq!(
            print_tree(Some(&b.break_statement(Some(b.identifier("outer"))))),
            "BreakStatement\n  Label:\n    Identifier 'outer'\n"
        );
        assert_eq!(
            print_tree(Some(&b.continue_statement(None))),
            "ContinueStatement\n"
        );
    }

    #[test]
    fn test_update_and_unary_labels() {
        let b = Builder::new();
        assert_eq!(
            print_tree(Some(&b.update_expression("++", b.identifier("i"), false))),
            "UpdateExpression op='++' (postfix)\n  Argument:\n    Identifier 'i'\n"
        );
        assert_eq!(
            print_tree(Some(&b.unary_expression("typeof", b.identifier("v")))),
            "UnaryExpression op='typeof' (prefix)\n  Argument:\n    Identifier 'v'\n"
        );
    }

    #[test]
    fn test_comma_label() {
        let b = Builder::new();
        let comma = b.comma_expression(b.identifier("a"), b.identifier("b"));
        assert_eq!(
            print_tree(Some(&comma)),
            "CommaExpression op=','\n  Left:\n    Identifier 'a'\n  Right:\n    Identifier 'b'\n"
        );
    }

    #[test]
    fn test_literal_forms() {
        let b = Builder::new();
        let cases = [
            (b.null_literal(), "Literal null\n"),
            (b.boolean_literal(true), "Literal true\n"),
            (b.boolean_literal(false), "Literal false\n"),
            (b.number_literal("3.14"), "Literal (number) 3.14\n"),
            (b.string_literal("\"hi\""), "Literal (string) \"hi\"\n"),
            (b.bigint_literal("9n"), "Literal (bigint) 9n\n"),
        ];
        for (node, expected) in cases {
            assert_eq!(print_tree(Some(&node)), expected);
        }
    }

    #[test]
    fn test_member_and_call() {
        let b = Builder::new();
        let callee = b.member_expression(b.identifier("console"), b.identifier("log"), false);
        let args = b.append_statement(Some(b.statement_list()), Some(b.number_literal("1")));
        let call = b.call_expression(callee, args.unwrap());
        assert_eq!(
            print_tree(Some(&call)),
            "CallExpression\n\
             \x20 Callee:\n\
             \x20   MemberExpression (dot)\n\
             \x20     Object:\n\
             \x20       Identifier 'console'\n\
             \x20     Property:\n\
             \x20       Identifier 'log'\n\
             \x20 Arguments:\n\
             \x20   StatementList (1 statements)\n\
             \x20     Literal (number) 1\n"
        );
    }

    #[test]
    fn test_object_property() {
        let b = Builder::new();
        let prop = b.property(b.identifier("a"), b.identifier("a"), false, true);
        let props = b.append_statement(Some(b.statement_list()), Some(prop));
        let obj = b.object_expression(props);
        assert_eq!(
            print_tree(Some(&obj)),
            "ObjectExpression\n\
             \x20 Properties:\n\
             \x20   StatementList (1 statements)\n\
             \x20     Property (shorthand)\n\
             \x20       Key:\n\
             \x20         Identifier 'a'\n\
             \x20       Value:\n\
             \x20         Identifier 'a'\n"
        );
    }

    #[test]
    fn test_for_sections() {
        let b = Builder::new();
        let stmt = b.for_statement(None, Some(b.boolean_literal(true)), None, b.empty_statement());
        assert_eq!(
            print_tree(Some(&stmt)),
            "ForStatement\n  Test:\n    Literal true\n  Body:\n    EmptyStatement\n"
        );
    }

    #[test]
    fn test_do_while_sections() {
        let b = Builder::new();
        let stmt = b.do_while_statement(b.empty_statement(), b.identifier("go"));
        assert_eq!(
            print_tree(Some(&stmt)),
            "DoWhileStatement\n  Body:\n    EmptyStatement\n  Test:\n    Identifier 'go'\n"
        );
    }

    #[test]
    fn test_program_nesting() {
        let b = Builder::new();
        let list = b.append_statement(
            Some(b.statement_list()),
            Some(b.expression_statement(b.this_expression())),
        );
        let program = b.program(list.unwrap());
        assert_eq!(
            program.to_string(),
            "Program\n  StatementList (1 statements)\n    ExpressionStatement\n      ThisExpression\n"
        );
    }

    #[test]
    fn test_output_is_deterministic() {
        let b = Builder::new();
        let tree = b.program(block(
            &b,
            vec![
                b.let_declaration("a", Some(b.number_literal("1"))),
                b.while_statement(b.identifier("a"), b.empty_statement()),
            ],
        ));
        let first = print_tree(Some(&tree));
        let second = print_tree(Some(&tree));
        assert_eq!(first, second);
        assert_eq!(tree.to_string(), first);
    }

    #[test]
    fn test_nested_depth_indentation() {
        let b = Builder::new();
        let tree = b.new_expression(b.new_expression(b.identifier("Deep")));
        assert_eq!(
            print_tree(Some(&tree)),
            "NewExpression\n  Callee:\n    NewExpression\n      Callee:\n        Identifier 'Deep'\n"
        );
    }

    /// Measures the dump without keeping it.
    #[derive(Default)]
    struct Shape {
        lines: usize,
        column: usize,
        widest: usize,
    }

    impl Write for Shape {
        fn write_str(&mut self, s: &str) -> fmt::Result {
            self.column += s.len();
            self.widest = self.widest.max(self.column);
            if s.ends_with('\n') {
                self.lines += 1;
                self.column = 0;
            }
            Ok(())
        }
    }

    #[test]
    fn test_deep_tree_prints() {
        let depth = 10_000;
        let b = Builder::new();
        let mut expr = b.identifier("x");
        for _ in 0..depth {
            expr = b.unary_expression("!", expr);
        }

        let mut printer = TreePrinter::new(Shape::default());
        printer.print(Some(&expr), 0).unwrap();
        let shape = printer.into_inner();

        // A header and an `Argument:` line per level, then the identifier.
        // The innermost header is the widest line.
        assert_eq!(shape.lines, 2 * depth + 1);
        assert_eq!(
            shape.widest,
            4 * (depth - 1) + "UnaryExpression op='!' (prefix)\n".len()
        );

        crate::teardown::teardown(Some(expr));
    }

    #[test]
    fn test_indent_wider_than_one_chunk() {
        let b = Builder::new();
        let mut printer = TreePrinter::new(String::new());
        printer.print(Some(&b.this_expression()), 40).unwrap();
        assert_eq!(printer.into_inner(), format!("{}ThisExpression\n", " ".repeat(80)));
    }
}
