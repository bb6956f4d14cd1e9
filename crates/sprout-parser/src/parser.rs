//! Core parser infrastructure: token cursor, error reporting, helpers.

use sprout_lexer::token::{Token, TokenKind};
use sprout_types::ast::{Identifier, Program};
use sprout_types::{SourceFile, Span, SproutError};

/// The Sprout parser.
///
/// Consumes a token stream produced by the lexer and builds an AST. One
/// parse function per grammar alternative; the first syntax error aborts
/// the parse, so a caller either receives a complete [`Program`] or a
/// single [`SproutError::SyntaxError`] carrying the diagnostic.
pub struct Parser<'src> {
    /// The token stream.
    tokens: Vec<Token>,
    /// Current index into `tokens`.
    pos: usize,
    /// Source file, for slicing raw literal text out of spans.
    source_file: &'src SourceFile,
}

impl<'src> Parser<'src> {
    /// Create a new parser from a token stream and source file.
    pub fn new(tokens: Vec<Token>, source_file: &'src SourceFile) -> Self {
        Self {
            tokens,
            pos: 0,
            source_file,
        }
    }

    // ── Token Cursor ──────────────────────────────────────────────────────────

    /// Returns the current token without advancing.
    pub(crate) fn peek(&self) -> &Token {
        self.tokens.get(self.pos).unwrap_or_else(|| {
            self.tokens
                .last()
                .expect("token stream should end with Eof")
        })
    }

    /// Returns the kind of the current token.
    pub(crate) fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    /// Look ahead by `n` tokens from the current position.
    pub(crate) fn look_ahead(&self, n: usize) -> &TokenKind {
        self.tokens
            .get(self.pos + n)
            .map(|t| &t.kind)
            .unwrap_or(&TokenKind::Eof)
    }

    /// Advance the cursor by one and return the consumed token.
    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        token
    }

    /// Returns the previously consumed token's span.
    pub(crate) fn previous_span(&self) -> Span {
        if self.pos > 0 {
            self.tokens[self.pos - 1].span
        } else {
            Span::point(0, 1, 1)
        }
    }

    /// Returns the span of the current token.
    pub(crate) fn current_span(&self) -> Span {
        self.peek().span
    }

    /// Returns `true` if the current token is `Eof`.
    pub(crate) fn at_end(&self) -> bool {
        matches!(self.peek_kind(), TokenKind::Eof)
    }

    /// Check if the current token matches the given kind exactly.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        self.peek_kind() == kind
    }

    /// If the current token matches, advance and return `true`.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Slice the raw source text covered by a span.
    pub(crate) fn raw_text(&self, span: Span) -> String {
        self.source_file
            .source
            .get(span.start..span.end)
            .unwrap_or("")
            .to_string()
    }

    // ── Expect Helpers ────────────────────────────────────────────────────────

    /// Expect a specific token kind; return the consumed token or a
    /// syntax error naming what was found instead.
    pub(crate) fn expect(&mut self, expected: &TokenKind) -> sprout_types::Result<Token> {
        if self.check(expected) {
            Ok(self.advance())
        } else {
            Err(self.error_at_current(format!(
                "expected '{expected}', got '{}'",
                self.peek_kind()
            )))
        }
    }

    /// Expect an identifier token.
    pub(crate) fn expect_identifier(&mut self) -> sprout_types::Result<Identifier> {
        match self.peek_kind().clone() {
            TokenKind::Identifier(name) => {
                let span = self.advance().span;
                Ok(Identifier::new(name, span))
            }
            _ => Err(self.error_at_current(format!(
                "expected identifier, got '{}'",
                self.peek_kind()
            ))),
        }
    }

    /// Expect one of the type-name keywords (`number`, `string`, `boolean`,
    /// `array`). Annotations are accepted for readability and discarded.
    pub(crate) fn expect_type_name(&mut self) -> sprout_types::Result<()> {
        if self.peek_kind().is_type_name() {
            self.advance();
            Ok(())
        } else {
            Err(self.error_at_current(format!(
                "expected a type name (number, string, boolean or array), got '{}'",
                self.peek_kind()
            )))
        }
    }

    // ── Error Reporting ───────────────────────────────────────────────────────

    /// Build a syntax error at the current token position.
    pub(crate) fn error_at_current(&self, message: impl Into<String>) -> SproutError {
        SproutError::SyntaxError {
            message: message.into(),
            suggestion: None,
            span: Some(self.current_span()),
        }
    }

    /// Build a syntax error at the current token with a fix suggestion.
    pub(crate) fn error_with_suggestion(
        &self,
        message: impl Into<String>,
        suggestion: impl Into<String>,
    ) -> SproutError {
        SproutError::SyntaxError {
            message: message.into(),
            suggestion: Some(suggestion.into()),
            span: Some(self.current_span()),
        }
    }

    // ── Public API ────────────────────────────────────────────────────────────

    /// Parse the token stream into a `Program` AST.
    pub fn parse(mut self) -> sprout_types::Result<Program> {
        let mut body = Vec::new();
        while !self.at_end() {
            body.push(self.parse_statement()?);
        }
        let span = Span::new(0, self.source_file.source.len(), 1, 1);
        Ok(Program::new(body, span))
    }
}
