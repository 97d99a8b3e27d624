//! JavaScript parser.
//!
//! Recursive descent for statements, precedence climbing for binary
//! operators. Every node is created through [`Builder`]; before each
//! construction the builder's cursor is moved to the first token of the
//! construct, so node positions point at where the construct begins.
//!
//! The accepted language is the subset the tree can represent. Anything
//! outside it (classes, arrow functions, destructuring, templates, ...)
//! is reported as a [`ParseError`] rather than silently dropped.
//!
//! Errors are recovered at statement boundaries: a failing top-level
//! statement is skipped and parsing resumes at the next one, so a single
//! run reports several independent problems.
//!
//! Nesting is bounded: input nested deeper than the parser is willing to
//! recurse is a `Nesting too deep` error, not a stack overflow.

use crate::lexer::Lexer;
use crate::span::Span;
use crate::token::{Token, TokenKind};
use jsast_core::{Builder, DeclKind, Node, NodeKind, Position};
use thiserror::Error;

/// Stop collecting after this many syntax errors.
const MAX_ERRORS: usize = 25;

/// Deepest allowed nesting of statements and expressions. Each level of
/// parentheses or brackets costs about three.
const MAX_DEPTH: usize = 256;

/// A syntax error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{message} at {pos}")]
pub struct ParseError {
    pub message: String,
    /// Source range of the offending token.
    pub span: Span,
    /// Line/column of the offending token.
    pub pos: Position,
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Span, pos: Position) -> Self {
        Self {
            message: message.into(),
            span,
            pos,
        }
    }
}

/// Result of parsing a whole source text.
#[derive(Debug)]
pub struct Parsed {
    /// The `Program` node. Statements that failed to parse are missing
    /// from it.
    pub root: Option<Node>,
    /// Syntax errors in source order.
    pub errors: Vec<ParseError>,
    /// Number of lines in the source.
    pub lines: u32,
}

impl Parsed {
    /// True when the source parsed without any syntax error.
    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }
}

/// The parser.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    builder: Builder,
    errors: Vec<ParseError>,
    /// When false, `in` is not parsed as a binary operator (for-loop init).
    allow_in: bool,
    /// Current recursion depth, bounded by `MAX_DEPTH`.
    depth: usize,
    /// Number of `{` consumed and not yet closed.
    brace_depth: usize,
}

impl<'a> Parser<'a> {
    /// Create a new parser.
    pub fn new(source: &'a str) -> Self {
        let mut lexer = Lexer::new(source);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            builder: Builder::new(),
            errors: Vec::new(),
            allow_in: true,
            depth: 0,
            brace_depth: 0,
        }
    }

    /// Parse the entire source.
    pub fn parse(mut self) -> Parsed {
        let root = self.parse_program();
        // Drain the rest of the input so the line count covers all of it.
        while !self.is_eof() {
            self.advance();
        }
        let lines = self.lexer.line_count();
        tracing::debug!(lines, errors = self.errors.len(), "parse finished");
        Parsed {
            root,
            errors: self.errors,
            lines,
        }
    }

    // =========================================================================
    // Token Handling
    // =========================================================================

    fn peek(&self) -> &TokenKind {
        &self.current.kind
    }

    /// Advance to the next token and return the previous.
    fn advance(&mut self) -> Token {
        let token = std::mem::replace(&mut self.current, self.lexer.next_token());
        match token.kind {
            TokenKind::LBrace => self.brace_depth += 1,
            TokenKind::RBrace => self.brace_depth = self.brace_depth.saturating_sub(1),
            _ => {}
        }
        token
    }

    /// Check if the current token matches the given kind.
    fn check(&self, kind: &TokenKind) -> bool {
        std::mem::discriminant(self.peek()) == std::mem::discriminant(kind)
    }

    fn is_eof(&self) -> bool {
        matches!(self.peek(), TokenKind::Eof)
    }

    /// Consume a token if it matches, otherwise return an error.
    fn expect(&mut self, kind: &TokenKind) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error_here(format!("Expected {kind} but found {}", self.peek())))
        }
    }

    /// Consume a token if it matches, returning true if consumed.
    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume a semicolon, inserting one where the language allows.
    fn expect_semicolon(&mut self) -> Result<(), ParseError> {
        if self.eat(&TokenKind::Semicolon) {
            return Ok(());
        }
        if self.check(&TokenKind::RBrace) || self.is_eof() || self.current.had_newline_before {
            return Ok(());
        }
        Err(self.error_here(format!("Expected `;` but found {}", self.peek())))
    }

    /// Consume an identifier and return its name.
    fn expect_identifier(&mut self, what: &str) -> Result<String, ParseError> {
        match self.peek() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.advance();
                Ok(name)
            }
            TokenKind::Async => {
                self.advance();
                Ok("async".to_string())
            }
            other => Err(self.error_here(format!("Expected {what} but found {other}"))),
        }
    }

    fn error_here(&self, message: impl Into<String>) -> ParseError {
        ParseError::new(message, self.current.span, self.current.pos)
    }

    fn unsupported(&self, what: &str) -> ParseError {
        self.error_here(format!("{what} are not supported"))
    }

    /// The builder with its cursor moved to `pos`.
    fn at(&mut self, pos: Position) -> &Builder {
        self.builder.seek(pos);
        &self.builder
    }

    /// Run `f` one nesting level deeper, failing once `MAX_DEPTH` is reached.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error_here("Nesting too deep"));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Run `f` with `in` enabled or disabled as a binary operator.
    fn with_in<T>(
        &mut self,
        allow_in: bool,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved = std::mem::replace(&mut self.allow_in, allow_in);
        let result = f(self);
        self.allow_in = saved;
        result
    }

    // =========================================================================
    // Program Parsing
    // =========================================================================

    fn parse_program(&mut self) -> Option<Node> {
        let start = Position::start();
        let mut body = Some(self.at(start).statement_list());

        while !self.is_eof() {
            let depth = self.brace_depth;
            match self.parse_stmt() {
                Ok(stmt) => body = self.builder.append_statement(body, Some(stmt)),
                Err(err) => {
                    tracing::debug!(%err, "syntax error");
                    self.errors.push(err);
                    if self.errors.len() >= MAX_ERRORS {
                        tracing::warn!(limit = MAX_ERRORS, "too many syntax errors, giving up");
                        break;
                    }
                    self.synchronize(depth);
                }
            }
        }

        body.map(|body| self.at(start).program(body))
    }

    /// Skip the rest of a failed statement that began at brace depth
    /// `depth`. Blocks the error left open are skipped to their end.
    fn synchronize(&mut self, depth: usize) {
        while !self.is_eof() {
            let kind = self.advance().kind;
            if self.brace_depth > depth {
                continue;
            }
            if matches!(kind, TokenKind::Semicolon | TokenKind::RBrace) {
                return;
            }
            if self.current.had_newline_before && starts_statement(self.peek()) {
                return;
            }
        }
    }

    // =========================================================================
    // Statements
    // =========================================================================

    fn parse_stmt(&mut self) -> Result<Node, ParseError> {
        self.nested(Self::parse_stmt_inner)
    }

    fn parse_stmt_inner(&mut self) -> Result<Node, ParseError> {
        if let Some(kind) = decl_kind(self.peek()) {
            let decl = self.parse_var_decl(kind)?;
            self.expect_semicolon()?;
            return Ok(decl);
        }

        match self.peek() {
            TokenKind::Function => self.parse_function_decl(false),
            TokenKind::Async if self.async_function_follows() => self.parse_function_decl(true),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::For => self.parse_for_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Do => self.parse_do_while_stmt(),
            TokenKind::Break | TokenKind::Continue => self.parse_jump_stmt(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::Throw => self.parse_throw_stmt(),
            TokenKind::LBrace => self.parse_block_stmt(),
            TokenKind::Semicolon => {
                let start = self.advance().pos;
                Ok(self.at(start).empty_statement())
            }
            TokenKind::Class => Err(self.unsupported("Class declarations")),
            TokenKind::Switch => Err(self.unsupported("`switch` statements")),
            TokenKind::Try => Err(self.unsupported("`try` statements")),
            TokenKind::Import | TokenKind::Export => Err(self.unsupported("Modules")),
            TokenKind::With => Err(self.unsupported("`with` statements")),
            TokenKind::Debugger => Err(self.unsupported("`debugger` statements")),
            TokenKind::Identifier(_) if self.lexer.peek().kind == TokenKind::Colon => {
                Err(self.unsupported("Labeled statements"))
            }
            _ => self.parse_expr_stmt(),
        }
    }

    /// `async function` with no line break in between.
    fn async_function_follows(&self) -> bool {
        let next = self.lexer.peek();
        next.kind == TokenKind::Function && !next.had_newline_before
    }

    /// `var a = 1, b`, without the terminating semicolon. A single
    /// declarator yields a declaration node; several yield a
    /// `StatementList` of them.
    fn parse_var_decl(&mut self, kind: DeclKind) -> Result<Node, ParseError> {
        let start = self.advance().pos;
        let mut decls = Vec::new();

        loop {
            // The first declarator starts at the keyword.
            let decl_start = if decls.is_empty() { start } else { self.current.pos };
            let name = self.expect_identifier("variable name")?;
            let init = if self.eat(&TokenKind::Eq) {
                Some(self.parse_assign_expr()?)
            } else {
                None
            };
            if kind == DeclKind::Const && init.is_none() {
                return Err(self.error_here("Missing initializer in const declaration"));
            }
            decls.push(self.at(decl_start).declaration(kind, &name, init));

            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        if decls.len() > 1 {
            return Ok(self.at(start).statement_list_of(decls));
        }
        decls
            .pop()
            .ok_or_else(|| self.error_here("Expected variable name"))
    }

    fn parse_function_decl(&mut self, is_async: bool) -> Result<Node, ParseError> {
        let start = self.current.pos;
        if is_async {
            self.advance();
        }
        self.expect(&TokenKind::Function)?;
        if self.check(&TokenKind::Star) {
            return Err(self.unsupported("Generator functions"));
        }

        let name = self.expect_identifier("function name")?;
        let params = self.parse_params()?;
        let body = self.parse_block_stmt()?;

        let b = self.at(start);
        Ok(if is_async {
            b.async_function_declaration(&name, params, body)
        } else {
            b.function_declaration(&name, params, body)
        })
    }

    /// `(a, b)`. An empty list yields no node.
    fn parse_params(&mut self) -> Result<Option<Node>, ParseError> {
        let start = self.expect(&TokenKind::LParen)?.pos;
        let mut params = Vec::new();

        while !self.check(&TokenKind::RParen) {
            let param_start = self.current.pos;
            let name = self.expect_identifier("parameter name")?;
            if self.check(&TokenKind::Eq) {
                return Err(self.unsupported("Default parameters"));
            }
            params.push(self.at(param_start).identifier(&name));
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;

        if params.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.at(start).statement_list_of(params)))
    }

    fn parse_block_stmt(&mut self) -> Result<Node, ParseError> {
        let start = self.expect(&TokenKind::LBrace)?.pos;
        let mut stmts = Vec::new();

        while !self.check(&TokenKind::RBrace) && !self.is_eof() {
            stmts.push(self.parse_stmt()?);
        }
        self.expect(&TokenKind::RBrace)?;

        let b = self.at(start);
        Ok(b.block_statement(b.statement_list_of(stmts)))
    }

    fn parse_if_stmt(&mut self) -> Result<Node, ParseError> {
        let start = self.advance().pos;
        self.expect(&TokenKind::LParen)?;
        let test = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;

        let consequent = self.parse_stmt()?;
        let alternate = if self.eat(&TokenKind::Else) {
            Some(self.parse_stmt()?)
        } else {
            None
        };

        Ok(self.at(start).if_statement(test, consequent, alternate))
    }

    fn parse_while_stmt(&mut self) -> Result<Node, ParseError> {
        let start = self.advance().pos;
        self.expect(&TokenKind::LParen)?;
        let test = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        let body = self.parse_stmt()?;
        Ok(self.at(start).while_statement(test, body))
    }

    fn parse_do_while_stmt(&mut self) -> Result<Node, ParseError> {
        let start = self.advance().pos;
        let body = self.parse_stmt()?;
        self.expect(&TokenKind::While)?;
        self.expect(&TokenKind::LParen)?;
        let test = self.parse_expr()?;
        self.expect(&TokenKind::RParen)?;
        // A semicolon is always inserted after `do ... while (...)`.
        self.eat(&TokenKind::Semicolon);
        Ok(self.at(start).do_while_statement(body, test))
    }

    fn parse_for_stmt(&mut self) -> Result<Node, ParseError> {
        let start = self.advance().pos;
        if self.check(&TokenKind::Await) {
            return Err(self.unsupported("`for await` loops"));
        }
        self.expect(&TokenKind::LParen)?;

        let init = if self.check(&TokenKind::Semicolon) {
            None
        } else if let Some(kind) = decl_kind(self.peek()) {
            Some(self.with_in(false, |p| p.parse_var_decl(kind))?)
        } else {
            Some(self.with_in(false, Self::parse_expr)?)
        };

        if self.check(&TokenKind::In) || self.current_is_contextual("of") {
            return Err(self.unsupported("`for-in` and `for-of` loops"));
        }
        self.expect(&TokenKind::Semicolon)?;

        let test = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::Semicolon)?;

        let update = if self.check(&TokenKind::RParen) {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect(&TokenKind::RParen)?;

        let body = self.parse_stmt()?;
        let b = self.at(start);

        Ok(match init {
            Some(Node {
                kind:
                    NodeKind::VarDeclaration {
                        kind: DeclKind::Var,
                        name,
                        init,
                    },
                ..
            }) => b.for_statement_with_var(&name, init.map(|init| *init), test, update, body),
            other => b.for_statement(other, test, update, body),
        })
    }

    fn current_is_contextual(&self, word: &str) -> bool {
        matches!(self.peek(), TokenKind::Identifier(name) if name == word)
    }

    /// `break` or `continue`, with an optional label on the same line.
    fn parse_jump_stmt(&mut self) -> Result<Node, ParseError> {
        let keyword = self.advance();

        let label = match self.peek() {
            TokenKind::Identifier(name) if !self.current.had_newline_before => {
                let name = name.clone();
                let label_start = self.advance().pos;
                Some(self.at(label_start).identifier(&name))
            }
            _ => None,
        };
        self.expect_semicolon()?;

        let b = self.at(keyword.pos);
        Ok(if keyword.kind == TokenKind::Break {
            b.break_statement(label)
        } else {
            b.continue_statement(label)
        })
    }

    fn parse_return_stmt(&mut self) -> Result<Node, ParseError> {
        let start = self.advance().pos;

        // A line break after `return` ends the statement.
        let argument = if self.check(&TokenKind::Semicolon)
            || self.check(&TokenKind::RBrace)
            || self.is_eof()
            || self.current.had_newline_before
        {
            None
        } else {
            Some(self.parse_expr()?)
        };
        self.expect_semicolon()?;

        Ok(self.at(start).return_statement(argument))
    }

    fn parse_throw_stmt(&mut self) -> Result<Node, ParseError> {
        let start = self.advance().pos;
        if self.current.had_newline_before {
            return Err(self.error_here("Illegal newline after throw"));
        }
        let argument = self.parse_expr()?;
        self.expect_semicolon()?;
        Ok(self.at(start).throw_statement(argument))
    }

    fn parse_expr_stmt(&mut self) -> Result<Node, ParseError> {
        let start = self.current.pos;
        let expression = self.parse_expr()?;
        self.expect_semicolon()?;
        Ok(self.at(start).expression_statement(expression))
    }

    // =========================================================================
    // Expressions
    // =========================================================================

    /// Full expression, including the comma operator.
    fn parse_expr(&mut self) -> Result<Node, ParseError> {
        let start = self.current.pos;
        let mut expr = self.parse_assign_expr()?;

        while self.eat(&TokenKind::Comma) {
            let right = self.parse_assign_expr()?;
            expr = self.at(start).comma_expression(expr, right);
        }

        Ok(expr)
    }

    fn parse_assign_expr(&mut self) -> Result<Node, ParseError> {
        self.nested(Self::parse_assign_expr_inner)
    }

    fn parse_assign_expr_inner(&mut self) -> Result<Node, ParseError> {
        let start = self.current.pos;
        let left = self.parse_conditional_expr()?;

        if self.check(&TokenKind::Arrow) {
            return Err(self.unsupported("Arrow functions"));
        }
        if !self.peek().is_assignment() {
            return Ok(left);
        }

        if !matches!(
            left.kind,
            NodeKind::Identifier { .. } | NodeKind::MemberExpression { .. }
        ) {
            return Err(self.error_here("Invalid assignment target"));
        }

        let operator = self.advance().kind.as_str();
        let right = self.parse_assign_expr()?;
        Ok(self.at(start).assignment_expression(operator, left, right))
    }

    fn parse_conditional_expr(&mut self) -> Result<Node, ParseError> {
        let start = self.current.pos;
        let test = self.parse_binary_expr(0)?;

        if !self.eat(&TokenKind::Question) {
            return Ok(test);
        }

        let consequent = self.with_in(true, Self::parse_assign_expr)?;
        self.expect(&TokenKind::Colon)?;
        let alternate = self.parse_assign_expr()?;
        Ok(self
            .at(start)
            .conditional_expression(test, consequent, alternate))
    }

    /// Binary operators by precedence climbing.
    fn parse_binary_expr(&mut self, min_prec: u8) -> Result<Node, ParseError> {
        self.nested(|p| p.parse_binary_operands(min_prec))
    }

    fn parse_binary_operands(&mut self, min_prec: u8) -> Result<Node, ParseError> {
        let start = self.current.pos;
        let mut left = self.parse_unary_expr()?;

        loop {
            let Some(prec) = self.peek().binary_precedence() else {
                break;
            };
            if prec <= min_prec || (!self.allow_in && self.check(&TokenKind::In)) {
                break;
            }

            let op = self.advance().kind;
            let next_min = if op.is_right_associative() { prec - 1 } else { prec };
            let right = self.parse_binary_expr(next_min)?;
            left = self.at(start).binary_expression(op.as_str(), left, right);
        }

        Ok(left)
    }

    fn parse_unary_expr(&mut self) -> Result<Node, ParseError> {
        self.nested(Self::parse_unary_operand)
    }

    fn parse_unary_operand(&mut self) -> Result<Node, ParseError> {
        let start = self.current.pos;

        match self.peek() {
            TokenKind::Bang
            | TokenKind::Tilde
            | TokenKind::Minus
            | TokenKind::Plus
            | TokenKind::Typeof
            | TokenKind::Void
            | TokenKind::Delete => {
                let op = self.advance().kind;
                let argument = self.parse_unary_expr()?;
                Ok(self.at(start).unary_expression(op.as_str(), argument))
            }
            TokenKind::PlusPlus | TokenKind::MinusMinus => {
                let op = self.advance().kind;
                let argument = self.parse_unary_expr()?;
                Ok(self.at(start).update_expression(op.as_str(), argument, true))
            }
            TokenKind::Await => Err(self.unsupported("`await` expressions")),
            TokenKind::Yield => Err(self.unsupported("`yield` expressions")),
            _ => self.parse_postfix_expr(),
        }
    }

    fn parse_postfix_expr(&mut self) -> Result<Node, ParseError> {
        let start = self.current.pos;
        let expr = self.parse_lhs_expr()?;

        // No line break is allowed before a postfix operator.
        if matches!(self.peek(), TokenKind::PlusPlus | TokenKind::MinusMinus)
            && !self.current.had_newline_before
        {
            let op = self.advance().kind;
            return Ok(self.at(start).update_expression(op.as_str(), expr, false));
        }

        Ok(expr)
    }

    /// Member accesses and calls.
    fn parse_lhs_expr(&mut self) -> Result<Node, ParseError> {
        let start = self.current.pos;
        let mut expr = if self.check(&TokenKind::New) {
            self.parse_new_expr()?
        } else {
            self.parse_primary_expr()?
        };

        loop {
            expr = match self.peek() {
                TokenKind::Dot | TokenKind::LBracket => self.parse_member_suffix(start, expr)?,
                TokenKind::LParen => {
                    let arguments = self.parse_arguments()?;
                    self.at(start).call_expression(expr, arguments)
                }
                TokenKind::QuestionDot => return Err(self.unsupported("Optional chains")),
                _ => break,
            };
        }

        Ok(expr)
    }

    /// `.name` or `[expr]` applied to `object`.
    fn parse_member_suffix(&mut self, start: Position, object: Node) -> Result<Node, ParseError> {
        if self.eat(&TokenKind::Dot) {
            let property = self.parse_property_name()?;
            return Ok(self.at(start).member_expression(object, property, false));
        }

        self.expect(&TokenKind::LBracket)?;
        let property = self.with_in(true, Self::parse_expr)?;
        self.expect(&TokenKind::RBracket)?;
        Ok(self.at(start).member_expression(object, property, true))
    }

    /// The name after a dot. Keywords are valid property names.
    fn parse_property_name(&mut self) -> Result<Node, ParseError> {
        let start = self.current.pos;
        let name = match self.peek() {
            TokenKind::Identifier(name) => name.clone(),
            kind if kind.is_keyword() => kind.as_str().to_string(),
            other => {
                return Err(self.error_here(format!("Expected property name but found {other}")))
            }
        };
        self.advance();
        Ok(self.at(start).identifier(&name))
    }

    /// `new Callee` or `new Callee(args)`. With arguments, the callee is a
    /// `CallExpression`.
    fn parse_new_expr(&mut self) -> Result<Node, ParseError> {
        self.nested(Self::parse_new_callee)
    }

    fn parse_new_callee(&mut self) -> Result<Node, ParseError> {
        let start = self.advance().pos;
        if self.check(&TokenKind::Dot) {
            return Err(self.unsupported("`new.target` expressions"));
        }

        let mut callee = if self.check(&TokenKind::New) {
            self.parse_new_expr()?
        } else {
            self.parse_primary_expr()?
        };
        let callee_start = callee.pos;
        while matches!(self.peek(), TokenKind::Dot | TokenKind::LBracket) {
            callee = self.parse_member_suffix(callee_start, callee)?;
        }

        if self.check(&TokenKind::LParen) {
            let arguments = self.parse_arguments()?;
            callee = self.at(callee_start).call_expression(callee, arguments);
        }

        Ok(self.at(start).new_expression(callee))
    }

    /// `(a, b)`, always a `StatementList` (possibly empty).
    fn parse_arguments(&mut self) -> Result<Node, ParseError> {
        let start = self.expect(&TokenKind::LParen)?.pos;
        let mut args = Vec::new();

        while !self.check(&TokenKind::RParen) {
            if self.check(&TokenKind::Spread) {
                return Err(self.unsupported("Spread arguments"));
            }
            args.push(self.with_in(true, Self::parse_assign_expr)?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RParen)?;

        Ok(self.at(start).statement_list_of(args))
    }

    fn parse_primary_expr(&mut self) -> Result<Node, ParseError> {
        let start = self.current.pos;

        match self.peek().clone() {
            TokenKind::Identifier(name) => {
                self.advance();
                Ok(self.at(start).identifier(&name))
            }
            TokenKind::Async => {
                if self.async_function_follows() {
                    return Err(self.unsupported("Function expressions"));
                }
                self.advance();
                Ok(self.at(start).identifier("async"))
            }
            TokenKind::Number(raw) => {
                self.advance();
                Ok(self.at(start).number_literal(&raw))
            }
            TokenKind::BigInt(raw) => {
                self.advance();
                Ok(self.at(start).bigint_literal(&raw))
            }
            TokenKind::String(raw) => {
                self.advance();
                Ok(self.at(start).string_literal(&raw))
            }
            TokenKind::True | TokenKind::False => {
                let value = self.advance().kind == TokenKind::True;
                Ok(self.at(start).boolean_literal(value))
            }
            TokenKind::Null => {
                self.advance();
                Ok(self.at(start).null_literal())
            }
            TokenKind::This => {
                self.advance();
                Ok(self.at(start).this_expression())
            }
            TokenKind::LParen => {
                self.advance();
                if self.check(&TokenKind::RParen) {
                    return Err(self.unsupported("Arrow functions"));
                }
                let expr = self.with_in(true, Self::parse_expr)?;
                self.expect(&TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::LBracket => self.with_in(true, Self::parse_array_literal),
            TokenKind::LBrace => self.with_in(true, Self::parse_object_literal),
            TokenKind::Function => Err(self.unsupported("Function expressions")),
            TokenKind::Class => Err(self.unsupported("Class expressions")),
            TokenKind::Super => Err(self.unsupported("`super` expressions")),
            TokenKind::Import => Err(self.unsupported("Dynamic imports")),
            TokenKind::Invalid(text) => {
                Err(self.error_here(format!("Invalid or unexpected token {text}")))
            }
            TokenKind::Eof => Err(self.error_here("Unexpected end of input")),
            other => Err(self.error_here(format!("Unexpected {other}"))),
        }
    }

    /// `[a, b]`. Holes and spread elements are rejected.
    fn parse_array_literal(&mut self) -> Result<Node, ParseError> {
        let start = self.advance().pos;
        let mut elements = Vec::new();

        while !self.check(&TokenKind::RBracket) {
            match self.peek() {
                TokenKind::Comma => return Err(self.unsupported("Array holes")),
                TokenKind::Spread => return Err(self.unsupported("Spread elements")),
                _ => elements.push(self.parse_assign_expr()?),
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBracket)?;

        let b = self.at(start);
        let elements = (!elements.is_empty()).then(|| b.statement_list_of(elements));
        Ok(b.array_expression(elements))
    }

    /// `{ a: 1, [k]: v, b }`.
    fn parse_object_literal(&mut self) -> Result<Node, ParseError> {
        let start = self.advance().pos;
        let mut properties = Vec::new();

        while !self.check(&TokenKind::RBrace) {
            properties.push(self.parse_property()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        self.expect(&TokenKind::RBrace)?;

        let b = self.at(start);
        let properties = (!properties.is_empty()).then(|| b.statement_list_of(properties));
        Ok(b.object_expression(properties))
    }

    fn parse_property(&mut self) -> Result<Node, ParseError> {
        let start = self.current.pos;

        let (key, computed, shorthand_ok) = match self.peek().clone() {
            TokenKind::Identifier(name) => {
                self.advance();
                (self.at(start).identifier(&name), false, true)
            }
            TokenKind::String(raw) => {
                self.advance();
                (self.at(start).string_literal(&raw), false, false)
            }
            TokenKind::Number(raw) => {
                self.advance();
                (self.at(start).number_literal(&raw), false, false)
            }
            TokenKind::LBracket => {
                self.advance();
                let key = self.parse_assign_expr()?;
                self.expect(&TokenKind::RBracket)?;
                (key, true, false)
            }
            TokenKind::Spread => return Err(self.unsupported("Spread properties")),
            kind if kind.is_keyword() => {
                self.advance();
                (self.at(start).identifier(kind.as_str()), false, false)
            }
            other => {
                return Err(self.error_here(format!("Expected property name but found {other}")))
            }
        };

        if self.eat(&TokenKind::Colon) {
            let value = self.parse_assign_expr()?;
            return Ok(self.at(start).property(key, value, computed, false));
        }
        if self.check(&TokenKind::LParen) {
            return Err(self.unsupported("Object methods"));
        }
        if !shorthand_ok {
            return Err(self.error_here(format!("Expected `:` but found {}", self.peek())));
        }

        let value = key.clone();
        Ok(self.at(start).property(key, value, false, true))
    }
}

fn decl_kind(kind: &TokenKind) -> Option<DeclKind> {
    match kind {
        TokenKind::Var => Some(DeclKind::Var),
        TokenKind::Let => Some(DeclKind::Let),
        TokenKind::Const => Some(DeclKind::Const),
        _ => None,
    }
}

/// Keywords that begin a statement; error recovery resumes at them.
fn starts_statement(kind: &TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Var
            | TokenKind::Let
            | TokenKind::Const
            | TokenKind::Function
            | TokenKind::Class
            | TokenKind::If
            | TokenKind::For
            | TokenKind::While
            | TokenKind::Do
            | TokenKind::Return
            | TokenKind::Break
            | TokenKind::Continue
            | TokenKind::Throw
            | TokenKind::Switch
            | TokenKind::Try
    )
}
