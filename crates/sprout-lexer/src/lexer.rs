//! Core Sprout lexer — converts source text to a token stream.
//!
//! - `#` starts a comment running to end of line
//! - whitespace (including newlines) carries no structure; statements are
//!   delimited by the grammar, not by line breaks
//! - string literals are double-quoted with no escape sequences
//! - numbers are `digit+` or `digit+.digit+`
//! - lexing stops at the first error; the caller receives one
//!   [`SproutError::SyntaxError`] carrying the diagnostic

use sprout_types::{SourceFile, Span, SproutError};

use crate::token::{Token, TokenKind};

/// The Sprout lexer.
///
/// Converts source text into a vector of [`Token`]s ending with
/// [`TokenKind::Eof`].
pub struct Lexer<'src> {
    /// The full source text as bytes.
    source: &'src [u8],
    /// Current byte offset into `source`.
    pos: usize,
    /// Current line number (1-based).
    line: u32,
    /// Current column number (1-based).
    col: u32,
}

impl<'src> Lexer<'src> {
    /// Create a new lexer for the given source file.
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            source: source_file.source.as_bytes(),
            pos: 0,
            line: 1,
            col: 1,
        }
    }

    /// Lex the entire source into a token stream.
    pub fn lex(mut self) -> sprout_types::Result<Vec<Token>> {
        let mut tokens = Vec::new();
        loop {
            let token = self.scan_token()?;
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }
        Ok(tokens)
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.source.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let ch = self.source.get(self.pos).copied()?;
        self.pos += 1;
        if ch == b'\n' {
            self.line += 1;
            self.col = 1;
        } else {
            self.col += 1;
        }
        Some(ch)
    }

    fn at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn span_from(&self, start: usize, start_line: u32, start_col: u32) -> Span {
        Span::new(start, self.pos, start_line, start_col)
    }

    fn error(&self, message: impl Into<String>, span: Span) -> SproutError {
        SproutError::SyntaxError {
            message: message.into(),
            suggestion: None,
            span: Some(span),
        }
    }

    fn error_with_suggestion(
        &self,
        message: impl Into<String>,
        span: Span,
        suggestion: impl Into<String>,
    ) -> SproutError {
        SproutError::SyntaxError {
            message: message.into(),
            suggestion: Some(suggestion.into()),
            span: Some(span),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Whitespace & comments
    // ─────────────────────────────────────────────────────────────

    /// Skip whitespace (newlines included) and `#` comments.
    fn skip_trivia(&mut self) {
        while let Some(ch) = self.peek() {
            match ch {
                b' ' | b'\t' | b'\r' | b'\n' => {
                    self.advance();
                }
                b'#' => {
                    while let Some(c) = self.peek() {
                        if c == b'\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    /// Scan a single token.
    fn scan_token(&mut self) -> sprout_types::Result<Token> {
        self.skip_trivia();

        if self.at_end() {
            return Ok(Token::new(
                TokenKind::Eof,
                Span::point(self.pos, self.line, self.col),
            ));
        }

        let start = self.pos;
        let start_line = self.line;
        let start_col = self.col;
        let ch = self.advance().unwrap_or(0);

        let kind = match ch {
            b'"' => return self.scan_string(start, start_line, start_col),
            b'0'..=b'9' => return self.scan_number(start, start_line, start_col),
            b'a'..=b'z' | b'A'..=b'Z' => return self.scan_word(start, start_line, start_col),

            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'%' => TokenKind::Percent,
            b'^' => TokenKind::Caret,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'{' => TokenKind::LBrace,
            b'}' => TokenKind::RBrace,
            b'[' => TokenKind::LBracket,
            b']' => TokenKind::RBracket,
            b',' => TokenKind::Comma,
            b':' => TokenKind::Colon,
            b'.' => TokenKind::Dot,

            b'=' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::EqEq
                } else {
                    TokenKind::Eq
                }
            }
            b'<' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::LessEq
                } else {
                    TokenKind::Less
                }
            }
            b'>' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::GreaterEq
                } else {
                    TokenKind::Greater
                }
            }
            b'!' => {
                if self.peek() == Some(b'=') {
                    self.advance();
                    TokenKind::BangEq
                } else {
                    let span = self.span_from(start, start_line, start_col);
                    return Err(self.error_with_suggestion(
                        "unexpected character '!'",
                        span,
                        "Use 'not' to negate a condition: not x",
                    ));
                }
            }

            other => {
                let span = self.span_from(start, start_line, start_col);
                return Err(self.error(
                    format!("unexpected character '{}'", other as char),
                    span,
                ));
            }
        };

        Ok(Token::new(kind, self.span_from(start, start_line, start_col)))
    }

    /// Scan a string literal. The opening `"` is already consumed.
    fn scan_string(
        &mut self,
        start: usize,
        start_line: u32,
        start_col: u32,
    ) -> sprout_types::Result<Token> {
        let text_start = self.pos;
        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    let span = self.span_from(start, start_line, start_col);
                    return Err(self.error_with_suggestion(
                        "unterminated string literal",
                        span,
                        "Close the string with a matching \"",
                    ));
                }
                Some(b'"') => break,
                _ => {
                    self.advance();
                }
            }
        }
        let text = String::from_utf8_lossy(&self.source[text_start..self.pos]).into_owned();
        self.advance(); // closing quote
        Ok(Token::new(
            TokenKind::Str(text),
            self.span_from(start, start_line, start_col),
        ))
    }

    /// Scan a numeric literal. The first digit is already consumed.
    ///
    /// Integer-looking text goes through integer parsing, dotted text
    /// through float parsing; both end up as one numeric type.
    fn scan_number(
        &mut self,
        start: usize,
        start_line: u32,
        start_col: u32,
    ) -> sprout_types::Result<Token> {
        while matches!(self.peek(), Some(b'0'..=b'9')) {
            self.advance();
        }
        // A fractional part only counts when a digit follows the dot;
        // otherwise the dot is a member-access token.
        let mut is_float = false;
        if self.peek() == Some(b'.') && matches!(self.peek_at(1), Some(b'0'..=b'9')) {
            is_float = true;
            self.advance(); // '.'
            while matches!(self.peek(), Some(b'0'..=b'9')) {
                self.advance();
            }
        }
        let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap_or("0");
        let value = if is_float {
            text.parse::<f64>().unwrap_or(f64::INFINITY)
        } else {
            match text.parse::<i64>() {
                Ok(n) => n as f64,
                // Digit runs too long for an integer still have a float value.
                Err(_) => text.parse::<f64>().unwrap_or(f64::INFINITY),
            }
        };
        Ok(Token::new(
            TokenKind::Number(value),
            self.span_from(start, start_line, start_col),
        ))
    }

    /// Scan an identifier or keyword. The first letter is already consumed.
    fn scan_word(
        &mut self,
        start: usize,
        start_line: u32,
        start_col: u32,
    ) -> sprout_types::Result<Token> {
        while matches!(self.peek(), Some(b'a'..=b'z' | b'A'..=b'Z' | b'0'..=b'9' | b'_')) {
            self.advance();
        }
        let text = std::str::from_utf8(&self.source[start..self.pos]).unwrap_or("");
        let kind = TokenKind::keyword(text)
            .unwrap_or_else(|| TokenKind::Identifier(text.to_string()));
        Ok(Token::new(
            kind,
            self.span_from(start, start_line, start_col),
        ))
    }
}
