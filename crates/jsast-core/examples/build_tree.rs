//! Build a small program by hand and dump it.
//!
//! Run with: cargo run -p jsast-core --example build_tree

use jsast_core::{print_tree, teardown, Builder, Position};

fn main() {
    let mut b = Builder::new();

    // let total = 0;
    let total = b.let_declaration("total", Some(b.number_literal("0")));

    // for (var i = 0; i < 10; i++) total += i;
    b.seek(Position::new(2, 1));
    let body = b.expression_statement(b.assignment_expression(
        "+=",
        b.identifier("total"),
        b.identifier("i"),
    ));
    let loop_stmt = b.for_statement_with_var(
        "i",
        Some(b.number_literal("0")),
        Some(b.binary_expression("<", b.identifier("i"), b.number_literal("10"))),
        Some(b.update_expression("++", b.identifier("i"), false)),
        body,
    );

    let mut list = Some(b.statement_list());
    list = b.append_statement(list, Some(total));
    list = b.append_statement(list, Some(loop_stmt));
    let program = list.map(|body| b.program(body));

    print!("{}", print_tree(program.as_ref()));

    let released = teardown(program);
    println!("released {} nodes, {} strings", released.nodes, released.strings);
}
