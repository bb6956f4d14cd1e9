//! Token types for the Sprout lexer.
//!
//! Defines [`TokenKind`] covering every lexeme in the language and
//! [`Token`], which pairs a kind with a source [`Span`].

use sprout_types::Span;
use std::fmt;

/// All 20 reserved words in Sprout.
///
/// These cannot be used as user-defined names. The lexer recognises each
/// one and emits a specific keyword token instead of [`TokenKind::Identifier`].
pub const ALL_KEYWORDS: &[&str] = &[
    // Statements (11)
    "let", "show", "ask", "into", "if", "else", "repeat", "times", "while",
    "function", "return",
    // Expressions (5)
    "true", "false", "and", "or", "not",
    // Type names (4)
    "number", "string", "boolean", "array",
];

// ─────────────────────────────────────────────────────────────────────
// Token
// ─────────────────────────────────────────────────────────────────────

/// A single token produced by the Sprout lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// What kind of token this is.
    pub kind: TokenKind,
    /// Source location.
    pub span: Span,
}

impl Token {
    /// Create a new token.
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

// ─────────────────────────────────────────────────────────────────────
// TokenKind
// ─────────────────────────────────────────────────────────────────────

/// Every token kind in the Sprout language.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals ──────────────────────────────────────────────

    /// Numeric literal (integer or decimal): `42`, `3.14`
    Number(f64),
    /// String literal: `"hello"` (carries the unquoted text; the language
    /// has no escape sequences)
    Str(String),
    /// `true`
    True,
    /// `false`
    False,

    // ── Identifiers ──────────────────────────────────────────

    /// User-defined identifier: `my_var`, `total_score`
    Identifier(String),

    // ── Statement Keywords ───────────────────────────────────

    /// `let`
    Let,
    /// `show`
    Show,
    /// `ask`
    Ask,
    /// `into`
    Into,
    /// `if`
    If,
    /// `else`
    Else,
    /// `repeat`
    Repeat,
    /// `times`
    Times,
    /// `while`
    While,
    /// `function`
    Function,
    /// `return`
    Return,

    // ── Expression Keywords ──────────────────────────────────

    /// `and` (boolean conjunction)
    And,
    /// `or` (boolean disjunction)
    Or,
    /// `not` (unary boolean negation)
    Not,

    // ── Type-Name Keywords ───────────────────────────────────
    //
    // Accepted in optional annotations (`let x: number = 1`) and
    // otherwise reserved.

    /// `number`
    KwNumber,
    /// `string`
    KwString,
    /// `boolean`
    KwBoolean,
    /// `array`
    KwArray,

    // ── Operators ────────────────────────────────────────────

    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `%`
    Percent,
    /// `^`
    Caret,
    /// `=`
    Eq,
    /// `==`
    EqEq,
    /// `!=`
    BangEq,
    /// `<`
    Less,
    /// `<=`
    LessEq,
    /// `>`
    Greater,
    /// `>=`
    GreaterEq,

    // ── Punctuation ──────────────────────────────────────────

    /// `(`
    LParen,
    /// `)`
    RParen,
    /// `{`
    LBrace,
    /// `}`
    RBrace,
    /// `[`
    LBracket,
    /// `]`
    RBracket,
    /// `,`
    Comma,
    /// `:`
    Colon,
    /// `.`
    Dot,

    // ── End of input ─────────────────────────────────────────

    /// End of the token stream.
    Eof,
}

impl TokenKind {
    /// Map a reserved word to its keyword token, if it is one.
    pub fn keyword(word: &str) -> Option<TokenKind> {
        match word {
            "let" => Some(TokenKind::Let),
            "show" => Some(TokenKind::Show),
            "ask" => Some(TokenKind::Ask),
            "into" => Some(TokenKind::Into),
            "if" => Some(TokenKind::If),
            "else" => Some(TokenKind::Else),
            "repeat" => Some(TokenKind::Repeat),
            "times" => Some(TokenKind::Times),
            "while" => Some(TokenKind::While),
            "function" => Some(TokenKind::Function),
            "return" => Some(TokenKind::Return),
            "true" => Some(TokenKind::True),
            "false" => Some(TokenKind::False),
            "and" => Some(TokenKind::And),
            "or" => Some(TokenKind::Or),
            "not" => Some(TokenKind::Not),
            "number" => Some(TokenKind::KwNumber),
            "string" => Some(TokenKind::KwString),
            "boolean" => Some(TokenKind::KwBoolean),
            "array" => Some(TokenKind::KwArray),
            _ => None,
        }
    }

    /// Returns `true` if this token is one of the type-name keywords.
    pub fn is_type_name(&self) -> bool {
        matches!(
            self,
            TokenKind::KwNumber | TokenKind::KwString | TokenKind::KwBoolean | TokenKind::KwArray
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Number(n) => write!(f, "{n}"),
            TokenKind::Str(s) => write!(f, "\"{s}\""),
            TokenKind::True => write!(f, "true"),
            TokenKind::False => write!(f, "false"),
            TokenKind::Identifier(name) => write!(f, "{name}"),
            TokenKind::Let => write!(f, "let"),
            TokenKind::Show => write!(f, "show"),
            TokenKind::Ask => write!(f, "ask"),
            TokenKind::Into => write!(f, "into"),
            TokenKind::If => write!(f, "if"),
            TokenKind::Else => write!(f, "else"),
            TokenKind::Repeat => write!(f, "repeat"),
            TokenKind::Times => write!(f, "times"),
            TokenKind::While => write!(f, "while"),
            TokenKind::Function => write!(f, "function"),
            TokenKind::Return => write!(f, "return"),
            TokenKind::And => write!(f, "and"),
            TokenKind::Or => write!(f, "or"),
            TokenKind::Not => write!(f, "not"),
            TokenKind::KwNumber => write!(f, "number"),
            TokenKind::KwString => write!(f, "string"),
            TokenKind::KwBoolean => write!(f, "boolean"),
            TokenKind::KwArray => write!(f, "array"),
            TokenKind::Plus => write!(f, "+"),
            TokenKind::Minus => write!(f, "-"),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Slash => write!(f, "/"),
            TokenKind::Percent => write!(f, "%"),
            TokenKind::Caret => write!(f, "^"),
            TokenKind::Eq => write!(f, "="),
            TokenKind::EqEq => write!(f, "=="),
            TokenKind::BangEq => write!(f, "!="),
            TokenKind::Less => write!(f, "<"),
            TokenKind::LessEq => write!(f, "<="),
            TokenKind::Greater => write!(f, ">"),
            TokenKind::GreaterEq => write!(f, ">="),
            TokenKind::LParen => write!(f, "("),
            TokenKind::RParen => write!(f, ")"),
            TokenKind::LBrace => write!(f, "{{"),
            TokenKind::RBrace => write!(f, "}}"),
            TokenKind::LBracket => write!(f, "["),
            TokenKind::RBracket => write!(f, "]"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Colon => write!(f, ":"),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}
