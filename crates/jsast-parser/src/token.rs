//! Token types for JavaScript.

use crate::span::Span;
use jsast_core::Position;
use std::fmt;

/// A token with its kind and source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
    /// Line and column of the token's first character.
    pub pos: Position,
    /// Whether a line terminator appeared between the previous token and
    /// this one. Drives automatic semicolon insertion.
    pub had_newline_before: bool,
}

impl Token {
    /// Create a new token.
    #[inline]
    pub const fn new(kind: TokenKind, span: Span, pos: Position, had_newline_before: bool) -> Self {
        Self {
            kind,
            span,
            pos,
            had_newline_before,
        }
    }
}

/// The kind of token.
///
/// Literal tokens carry their exact source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenKind {
    // === Literals ===
    /// Identifier: `foo`, `_bar`, `$baz`
    Identifier(String),
    /// String literal as written, quotes included: `"hello"`, `'world'`
    String(String),
    /// Number literal as written: `42`, `3.14`, `0xff`
    Number(String),
    /// BigInt literal as written, suffix included: `42n`
    BigInt(String),

    // === Keywords ===
    // Declarations
    Var,
    Let,
    Const,
    Function,
    Class,

    // Control flow
    If,
    Else,
    Switch,
    Case,
    Default,
    For,
    While,
    Do,
    Break,
    Continue,
    Return,

    // Exception handling
    Try,
    Catch,
    Finally,
    Throw,

    // Operators as keywords
    New,
    Delete,
    Typeof,
    Void,
    In,
    Instanceof,

    // Values
    This,
    Super,
    Null,
    True,
    False,

    // Modules
    Import,
    Export,

    // Async and generators
    Async,
    Await,
    Yield,

    // Other
    Extends,
    With,
    Debugger,

    // === Punctuation ===
    LParen,     // (
    RParen,     // )
    LBrace,     // {
    RBrace,     // }
    LBracket,   // [
    RBracket,   // ]
    Semicolon,  // ;
    Comma,      // ,
    Colon,      // :
    Dot,        // .
    Question,   // ?
    QuestionDot, // ?.
    Arrow,      // =>
    Spread,     // ...

    // === Operators ===
    // Assignment
    Eq,         // =
    PlusEq,     // +=
    MinusEq,    // -=
    StarEq,     // *=
    SlashEq,    // /=
    PercentEq,  // %=
    StarStarEq, // **=
    AmpEq,      // &=
    PipeEq,     // |=
    CaretEq,    // ^=
    LtLtEq,     // <<=
    GtGtEq,     // >>=
    GtGtGtEq,   // >>>=
    AmpAmpEq,   // &&=
    PipePipeEq, // ||=
    QuestionQuestionEq, // ??=

    // Comparison
    EqEq,       // ==
    EqEqEq,     // ===
    BangEq,     // !=
    BangEqEq,   // !==
    Lt,         // <
    LtEq,       // <=
    Gt,         // >
    GtEq,       // >=

    // Arithmetic
    Plus,       // +
    Minus,      // -
    Star,       // *
    Slash,      // /
    Percent,    // %
    StarStar,   // **
    PlusPlus,   // ++
    MinusMinus, // --

    // Bitwise
    Amp,        // &
    Pipe,       // |
    Caret,      // ^
    Tilde,      // ~
    LtLt,       // <<
    GtGt,       // >>
    GtGtGt,     // >>>

    // Logical
    AmpAmp,     // &&
    PipePipe,   // ||
    Bang,       // !
    QuestionQuestion, // ??

    // === Special ===
    /// End of file
    Eof,
    /// Character or construct the lexer cannot tokenize
    Invalid(String),
}

impl TokenKind {
    /// Source text of a keyword, punctuator or operator.
    ///
    /// Literal, identifier and special tokens have no fixed text and
    /// return an empty string.
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenKind::Var => "var",
            TokenKind::Let => "let",
            TokenKind::Const => "const",
            TokenKind::Function => "function",
            TokenKind::Class => "class",
            TokenKind::If => "if",
            TokenKind::Else => "else",
            TokenKind::Switch => "switch",
            TokenKind::Case => "case",
            TokenKind::Default => "default",
            TokenKind::For => "for",
            TokenKind::While => "while",
            TokenKind::Do => "do",
            TokenKind::Break => "break",
            TokenKind::Continue => "continue",
            TokenKind::Return => "return",
            TokenKind::Try => "try",
            TokenKind::Catch => "catch",
            TokenKind::Finally => "finally",
            TokenKind::Throw => "throw",
            TokenKind::New => "new",
            TokenKind::Delete => "delete",
            TokenKind::Typeof => "typeof",
            TokenKind::Void => "void",
            TokenKind::In => "in",
            TokenKind::Instanceof => "instanceof",
            TokenKind::This => "this",
            TokenKind::Super => "super",
            TokenKind::Null => "null",
            TokenKind::True => "true",
            TokenKind::False => "false",
            TokenKind::Import => "import",
            TokenKind::Export => "export",
            TokenKind::Async => "async",
            TokenKind::Await => "await",
            TokenKind::Yield => "yield",
            TokenKind::Extends => "extends",
            TokenKind::With => "with",
            TokenKind::Debugger => "debugger",

            TokenKind::LParen => "(",
            TokenKind::RParen => ")",
            TokenKind::LBrace => "{",
            TokenKind::RBrace => "}",
            TokenKind::LBracket => "[",
            TokenKind::RBracket => "]",
            TokenKind::Semicolon => ";",
            TokenKind::Comma => ",",
            TokenKind::Colon => ":",
            TokenKind::Dot => ".",
            TokenKind::Question => "?",
            TokenKind::QuestionDot => "?.",
            TokenKind::Arrow => "=>",
            TokenKind::Spread => "...",

            TokenKind::Eq => "=",
            TokenKind::PlusEq => "+=",
            TokenKind::MinusEq => "-=",
            TokenKind::StarEq => "*=",
            TokenKind::SlashEq => "/=",
            TokenKind::PercentEq => "%=",
            TokenKind::StarStarEq => "**=",
            TokenKind::AmpEq => "&=",
            TokenKind::PipeEq => "|=",
            TokenKind::CaretEq => "^=",
            TokenKind::LtLtEq => "<<=",
            TokenKind::GtGtEq => ">>=",
            TokenKind::GtGtGtEq => ">>>=",
            TokenKind::AmpAmpEq => "&&=",
            TokenKind::PipePipeEq => "||=",
            TokenKind::QuestionQuestionEq => "??=",

            TokenKind::EqEq => "==",
            TokenKind::EqEqEq => "===",
            TokenKind::BangEq => "!=",
            TokenKind::BangEqEq => "!==",
            TokenKind::Lt => "<",
            TokenKind::LtEq => "<=",
            TokenKind::Gt => ">",
            TokenKind::GtEq => ">=",

            TokenKind::Plus => "+",
            TokenKind::Minus => "-",
            TokenKind::Star => "*",
            TokenKind::Slash => "/",
            TokenKind::Percent => "%",
            TokenKind::StarStar => "**",
            TokenKind::PlusPlus => "++",
            TokenKind::MinusMinus => "--",

            TokenKind::Amp => "&",
            TokenKind::Pipe => "|",
            TokenKind::Caret => "^",
            TokenKind::Tilde => "~",
            TokenKind::LtLt => "<<",
            TokenKind::GtGt => ">>",
            TokenKind::GtGtGt => ">>>",

            TokenKind::AmpAmp => "&&",
            TokenKind::PipePipe => "||",
            TokenKind::Bang => "!",
            TokenKind::QuestionQuestion => "??",

            TokenKind::Identifier(_)
            | TokenKind::String(_)
            | TokenKind::Number(_)
            | TokenKind::BigInt(_)
            | TokenKind::Eof
            | TokenKind::Invalid(_) => "",
        }
    }

    /// Check if this is a reserved or contextual keyword.
    pub fn is_keyword(&self) -> bool {
        KEYWORDS.contains(self)
    }

    /// Check if this is an assignment operator.
    pub fn is_assignment(&self) -> bool {
        matches!(
            self,
            TokenKind::Eq
                | TokenKind::PlusEq
                | TokenKind::MinusEq
                | TokenKind::StarEq
                | TokenKind::SlashEq
                | TokenKind::PercentEq
                | TokenKind::StarStarEq
                | TokenKind::AmpEq
                | TokenKind::PipeEq
                | TokenKind::CaretEq
                | TokenKind::LtLtEq
                | TokenKind::GtGtEq
                | TokenKind::GtGtGtEq
                | TokenKind::AmpAmpEq
                | TokenKind::PipePipeEq
                | TokenKind::QuestionQuestionEq
        )
    }

    /// Get the precedence of a binary operator (higher = binds tighter).
    /// Returns None if not a binary operator.
    pub fn binary_precedence(&self) -> Option<u8> {
        match self {
            TokenKind::QuestionQuestion => Some(1),
            TokenKind::PipePipe => Some(2),
            TokenKind::AmpAmp => Some(3),
            TokenKind::Pipe => Some(4),
            TokenKind::Caret => Some(5),
            TokenKind::Amp => Some(6),
            TokenKind::EqEq | TokenKind::EqEqEq | TokenKind::BangEq | TokenKind::BangEqEq => Some(7),
            TokenKind::Lt | TokenKind::LtEq | TokenKind::Gt | TokenKind::GtEq
            | TokenKind::In | TokenKind::Instanceof => Some(8),
            TokenKind::LtLt | TokenKind::GtGt | TokenKind::GtGtGt => Some(9),
            TokenKind::Plus | TokenKind::Minus => Some(10),
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent => Some(11),
            TokenKind::StarStar => Some(12), // Right associative
            _ => None,
        }
    }

    /// Check if this binary operator is right associative.
    pub fn is_right_associative(&self) -> bool {
        matches!(self, TokenKind::StarStar)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Identifier(name) => write!(f, "identifier `{name}`"),
            TokenKind::String(raw) => write!(f, "string {raw}"),
            TokenKind::Number(raw) | TokenKind::BigInt(raw) => write!(f, "number `{raw}`"),
            TokenKind::Eof => f.write_str("end of file"),
            TokenKind::Invalid(text) => write!(f, "`{text}`"),
            other => write!(f, "`{}`", other.as_str()),
        }
    }
}

/// Every keyword token. The spelling comes from [`TokenKind::as_str`].
static KEYWORDS: &[TokenKind] = &[
    TokenKind::Var,
    TokenKind::Let,
    TokenKind::Const,
    TokenKind::Function,
    TokenKind::Class,
    TokenKind::If,
    TokenKind::Else,
    TokenKind::Switch,
    TokenKind::Case,
    TokenKind::Default,
    TokenKind::For,
    TokenKind::While,
    TokenKind::Do,
    TokenKind::Break,
    TokenKind::Continue,
    TokenKind::Return,
    TokenKind::Try,
    TokenKind::Catch,
    TokenKind::Finally,
    TokenKind::Throw,
    TokenKind::New,
    TokenKind::Delete,
    TokenKind::Typeof,
    TokenKind::Void,
    TokenKind::In,
    TokenKind::Instanceof,
    TokenKind::This,
    TokenKind::Super,
    TokenKind::Null,
    TokenKind::True,
    TokenKind::False,
    TokenKind::Import,
    TokenKind::Export,
    TokenKind::Async,
    TokenKind::Await,
    TokenKind::Yield,
    TokenKind::Extends,
    TokenKind::With,
    TokenKind::Debugger,
];

/// The keyword spelled `word`, if any.
pub fn keyword_from_str(word: &str) -> Option<TokenKind> {
    KEYWORDS.iter().find(|kind| kind.as_str() == word).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_round_trip() {
        for word in ["var", "let", "const", "function", "typeof", "instanceof", "async"] {
            let kind = keyword_from_str(word).unwrap();
            assert!(kind.is_keyword());
            assert_eq!(kind.as_str(), word);
        }
        assert_eq!(keyword_from_str("of"), None);
        assert_eq!(keyword_from_str(""), None);
    }

    #[test]
    fn test_every_keyword_has_distinct_text() {
        let mut words: Vec<_> = KEYWORDS.iter().map(TokenKind::as_str).collect();
        assert!(words.iter().all(|word| !word.is_empty()));
        words.sort_unstable();
        words.dedup();
        assert_eq!(words.len(), KEYWORDS.len());
    }

    #[test]
    fn test_precedence_ordering() {
        let mul = TokenKind::Star.binary_precedence().unwrap();
        let add = TokenKind::Plus.binary_precedence().unwrap();
        let or = TokenKind::PipePipe.binary_precedence().unwrap();
        assert!(mul > add && add > or);
        assert_eq!(TokenKind::Eq.binary_precedence(), None);
        assert!(TokenKind::StarStar.is_right_associative());
    }

    #[test]
    fn test_display() {
        assert_eq!(TokenKind::LParen.to_string(), "`(`");
        assert_eq!(TokenKind::Identifier("x".into()).to_string(), "identifier `x`");
        assert_eq!(TokenKind::Eof.to_string(), "end of file");
    }
}
