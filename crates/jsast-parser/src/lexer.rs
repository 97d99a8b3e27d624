//! Lexer (tokenizer) for JavaScript.
//!
//! The lexer converts source text into a stream of tokens. It's called
//! on-demand by the parser, not upfront, and keeps the line/column scan
//! cursor that the parser hands to the tree builder.
//!
//! Literal tokens keep their exact source text; nothing is unescaped or
//! converted to a numeric value here.

use crate::span::Span;
use crate::token::{keyword_from_str, Token, TokenKind};
use jsast_core::Position;

/// Every punctuator and operator, longest first so the first prefix match
/// is the longest one. The text comes from [`TokenKind::as_str`].
static PUNCTUATORS: &[TokenKind] = &[
    TokenKind::GtGtGtEq,
    TokenKind::EqEqEq,
    TokenKind::BangEqEq,
    TokenKind::StarStarEq,
    TokenKind::LtLtEq,
    TokenKind::GtGtEq,
    TokenKind::GtGtGt,
    TokenKind::AmpAmpEq,
    TokenKind::PipePipeEq,
    TokenKind::QuestionQuestionEq,
    TokenKind::Spread,
    TokenKind::Arrow,
    TokenKind::EqEq,
    TokenKind::BangEq,
    TokenKind::LtEq,
    TokenKind::GtEq,
    TokenKind::AmpAmp,
    TokenKind::PipePipe,
    TokenKind::QuestionQuestion,
    TokenKind::QuestionDot,
    TokenKind::PlusPlus,
    TokenKind::MinusMinus,
    TokenKind::StarStar,
    TokenKind::PlusEq,
    TokenKind::MinusEq,
    TokenKind::StarEq,
    TokenKind::SlashEq,
    TokenKind::PercentEq,
    TokenKind::AmpEq,
    TokenKind::PipeEq,
    TokenKind::CaretEq,
    TokenKind::LtLt,
    TokenKind::GtGt,
    TokenKind::LParen,
    TokenKind::RParen,
    TokenKind::LBrace,
    TokenKind::RBrace,
    TokenKind::LBracket,
    TokenKind::RBracket,
    TokenKind::Semicolon,
    TokenKind::Comma,
    TokenKind::Colon,
    TokenKind::Dot,
    TokenKind::Question,
    TokenKind::Eq,
    TokenKind::Lt,
    TokenKind::Gt,
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::Percent,
    TokenKind::Amp,
    TokenKind::Pipe,
    TokenKind::Caret,
    TokenKind::Tilde,
    TokenKind::Bang,
];

/// The lexer state.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    /// Source text, for slicing token text.
    text: &'a str,
    /// Source code as bytes (for fast indexing).
    source: &'a [u8],
    /// Current byte position.
    pos: usize,
    /// Start position of the current token.
    token_start: usize,
    /// Line and column of the current token's first byte.
    token_pos: Position,
    /// Current line, starting at 1.
    line: u32,
    /// Characters on the current line before `column_at`.
    column: u32,
    /// Byte offset up to which `column` has been counted.
    column_at: usize,
    /// Whether a line terminator was skipped before the current token.
    newline_before: bool,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given source code.
    pub fn new(source: &'a str) -> Self {
        Self {
            text: source,
            source: source.as_bytes(),
            pos: 0,
            token_start: 0,
            token_pos: Position::start(),
            line: 1,
            column: 0,
            column_at: 0,
            newline_before: false,
        }
    }

    /// Line/column of the scan cursor. Columns count characters, not
    /// bytes.
    pub fn position(&self) -> Position {
        let rest = self.source.get(self.column_at..self.pos).unwrap_or_default();
        let column = self.column + char_count(rest);
        Position::new(self.line, column + 1)
    }

    /// Number of lines scanned so far. Once the lexer has reached the end
    /// of input this is the line count of the whole source (a trailing
    /// newline opens one more, empty line).
    pub fn line_count(&self) -> u32 {
        self.line
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Token {
        self.newline_before = false;
        self.skip_whitespace_and_comments();
        self.token_start = self.pos;
        self.token_pos = self.position();
        self.column = self.token_pos.column - 1;
        self.column_at = self.pos;

        if self.is_eof() {
            return self.make_token(TokenKind::Eof);
        }

        let ch = self.current();
        let kind = match ch {
            // Identifiers and keywords; non-ASCII bytes are taken as
            // identifier characters.
            b'a'..=b'z' | b'A'..=b'Z' | b'_' | b'$' | 0x80..=0xff => self.scan_identifier(),

            // Numbers
            b'0'..=b'9' => self.scan_number(),

            // Strings
            b'"' | b'\'' => self.scan_string(ch),

            // Template literals are not supported; consume the whole
            // literal so it reports as a single bad token.
            b'`' => self.scan_template(),

            // A number starting with `.`
            b'.' if self.peek_char().is_ascii_digit() => self.scan_number(),

            _ => self.scan_punctuator().unwrap_or_else(|| {
                self.advance();
                TokenKind::Invalid(self.token_slice().to_string())
            }),
        };

        self.make_token(kind)
    }

    /// Peek at the next token without consuming it.
    pub fn peek(&self) -> Token {
        self.clone().next_token()
    }

    // === Helper methods ===

    fn is_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn current(&self) -> u8 {
        self.source.get(self.pos).copied().unwrap_or(0)
    }

    fn peek_char(&self) -> u8 {
        self.source.get(self.pos + 1).copied().unwrap_or(0)
    }

    fn advance(&mut self) {
        self.pos += 1;
    }

    fn advance_n(&mut self, n: usize) {
        self.pos += n;
    }

    /// Consume a `\n` and start a new line.
    fn newline(&mut self) {
        self.advance();
        self.line += 1;
        self.column = 0;
        self.column_at = self.pos;
    }

    fn make_token(&self, kind: TokenKind) -> Token {
        Token::new(
            kind,
            Span::new(self.token_start as u32, self.pos as u32),
            self.token_pos,
            self.newline_before,
        )
    }

    fn slice(&self, start: usize, end: usize) -> &'a str {
        // Token boundaries always fall on ASCII bytes or the end of input.
        self.text.get(start..end).unwrap_or_default()
    }

    fn token_slice(&self) -> &'a str {
        self.slice(self.token_start, self.pos)
    }

    // === Whitespace and comments ===

    fn skip_whitespace_and_comments(&mut self) {
        loop {
            match self.current() {
                b'\n' => {
                    self.newline();
                    self.newline_before = true;
                }
                b'\r' => {
                    self.advance();
                    self.newline_before = true;
                }
                b' ' | b'\t' | 0x0b | 0x0c => {
                    self.advance();
                }
                // Comments
                b'/' if self.peek_char() == b'/' => {
                    self.skip_line_comment();
                }
                b'/' if self.peek_char() == b'*' => {
                    self.skip_block_comment();
                }
                _ => break,
            }
        }
    }

    fn skip_line_comment(&mut self) {
        self.advance_n(2); // Skip //
        while !self.is_eof() && self.current() != b'\n' {
            self.advance();
        }
    }

    fn skip_block_comment(&mut self) {
        self.advance_n(2); // Skip /*
        while !self.is_eof() {
            match self.current() {
                b'*' if self.peek_char() == b'/' => {
                    self.advance_n(2);
                    return;
                }
                b'\n' => {
                    self.newline();
                    self.newline_before = true;
                }
                _ => self.advance(),
            }
        }
        // Unterminated block comment runs to end of input.
    }

    // === Token scanning ===

    fn scan_identifier(&mut self) -> TokenKind {
        while !self.is_eof() {
            match self.current() {
                b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_' | b'$' | 0x80..=0xff => {
                    self.advance();
                }
                _ => break,
            }
        }

        let ident = self.token_slice();

        // Check if it's a keyword
        keyword_from_str(ident).unwrap_or_else(|| TokenKind::Identifier(ident.to_string()))
    }

    fn scan_digits(&mut self, is_digit: fn(u8) -> bool) {
        while is_digit(self.current()) || (self.current() == b'_' && is_digit(self.peek_char())) {
            self.advance();
        }
    }

    fn scan_number(&mut self) -> TokenKind {
        // Handle different number formats
        if self.current() == b'0' {
            let radix_digit: Option<fn(u8) -> bool> = match self.peek_char() {
                b'x' | b'X' => Some(|c: u8| c.is_ascii_hexdigit()),
                b'b' | b'B' => Some(|c: u8| c == b'0' || c == b'1'),
                b'o' | b'O' => Some(|c: u8| (b'0'..=b'7').contains(&c)),
                _ => None,
            };
            if let Some(is_digit) = radix_digit {
                self.advance_n(2); // Skip 0x / 0b / 0o
                self.scan_digits(is_digit);
                return self.finish_number();
            }
        }

        // Decimal integer part
        self.scan_digits(|c| c.is_ascii_digit());

        // Decimal part
        if self.current() == b'.' {
            self.advance();
            self.scan_digits(|c| c.is_ascii_digit());
        }

        // Exponent part
        if matches!(self.current(), b'e' | b'E') {
            self.advance();
            if matches!(self.current(), b'+' | b'-') {
                self.advance();
            }
            self.scan_digits(|c| c.is_ascii_digit());
        }

        self.finish_number()
    }

    fn finish_number(&mut self) -> TokenKind {
        // BigInt suffix
        if self.current() == b'n' {
            self.advance();
            return TokenKind::BigInt(self.token_slice().to_string());
        }
        TokenKind::Number(self.token_slice().to_string())
    }

    fn scan_string(&mut self, quote: u8) -> TokenKind {
        self.advance(); // Skip opening quote

        while !self.is_eof() {
            match self.current() {
                c if c == quote => {
                    self.advance(); // Skip closing quote
                    return TokenKind::String(self.token_slice().to_string());
                }
                b'\\' => {
                    self.advance();
                    // Line continuation
                    if self.current() == b'\n' {
                        self.newline();
                    } else if !self.is_eof() {
                        self.advance();
                    }
                }
                b'\n' => break,
                _ => self.advance(),
            }
        }

        // Unterminated string
        TokenKind::Invalid(self.token_slice().to_string())
    }

    fn scan_template(&mut self) -> TokenKind {
        self.advance(); // Skip `
        while !self.is_eof() {
            match self.current() {
                b'`' => {
                    self.advance();
                    break;
                }
                b'\\' => {
                    self.advance();
                    if self.current() == b'\n' {
                        self.newline();
                    } else if !self.is_eof() {
                        self.advance();
                    }
                }
                b'\n' => self.newline(),
                _ => self.advance(),
            }
        }
        TokenKind::Invalid(self.token_slice().to_string())
    }

    /// Longest match against [`PUNCTUATORS`].
    fn scan_punctuator(&mut self) -> Option<TokenKind> {
        let source = self.source;
        let rest = source.get(self.pos..)?;
        let kind = PUNCTUATORS
            .iter()
            .find(|kind| rest.starts_with(kind.as_str().as_bytes()))?;

        // `a?.5:b` is a conditional, not an optional chain.
        if *kind == TokenKind::QuestionDot && rest.get(2).is_some_and(u8::is_ascii_digit) {
            self.advance();
            return Some(TokenKind::Question);
        }

        self.advance_n(kind.as_str().len());
        Some(kind.clone())
    }
}

/// Number of UTF-8 characters in `bytes`: every byte that is not a
/// continuation byte starts one.
fn char_count(bytes: &[u8]) -> u32 {
    bytes.iter().filter(|&&b| b & 0xC0 != 0x80).count() as u32
}
