//! jsast-parser: JavaScript source to `jsast-core` trees.
//!
//! # Design
//!
//! 1. **Lexing on demand**
//!    - The lexer is called by the parser one token at a time and keeps the
//!      line/column cursor each token is stamped with.
//!    - A `/` is always division; regular expression literals are not
//!      recognized.
//!
//! 2. **The builder makes every node**
//!    - The parser never constructs nodes directly. It moves the builder's
//!      cursor to the start of each construct and calls the matching
//!      constructor.
//!
//! 3. **Errors don't stop the run**
//!    - A syntax error abandons the current top-level statement only;
//!      [`Parsed::errors`] collects all of them.
//!
//! # Example
//!
//! ```
//! use jsast_parser::parse;
//!
//! let parsed = parse("let answer = 42;\n");
//! assert!(parsed.is_ok());
//! assert_eq!(parsed.lines, 2);
//! ```

#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::cast_possible_truncation)]

mod lexer;
mod parser;
mod span;
mod token;

pub use lexer::Lexer;
pub use parser::{ParseError, Parsed, Parser};
pub use span::Span;
pub use token::{Token, TokenKind};

/// Parse a whole source text.
pub fn parse(source: &str) -> Parsed {
    Parser::new(source).parse()
}
