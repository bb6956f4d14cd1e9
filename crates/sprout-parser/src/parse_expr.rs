//! Expression parsing with full operator precedence.
//!
//! Precedence (lowest → highest):
//! 8. `or`
//! 7. `and`
//! 6. unary `not`
//! 5. `==`, `!=`, `<`, `>`, `<=`, `>=` (no chaining)
//! 4. `+`, `-`
//! 3. `*`, `/`, `%`
//! 2. unary `-`, `^` (right-associative)
//! 1. `[i]` (indexing), `.p` (member access)

use crate::parser::Parser;
use sprout_lexer::token::TokenKind;
use sprout_types::ast::*;

impl<'src> Parser<'src> {
    // ══════════════════════════════════════════════════════════════════════════
    // Entry Point
    // ══════════════════════════════════════════════════════════════════════════

    /// Parse an expression.
    pub(crate) fn parse_expression(&mut self) -> sprout_types::Result<Expr> {
        self.parse_or()
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Precedence Chain
    // ══════════════════════════════════════════════════════════════════════════

    /// `OrExpr = AndExpr { "or" AndExpr }`
    fn parse_or(&mut self) -> sprout_types::Result<Expr> {
        let mut left = self.parse_and()?;
        while self.eat(&TokenKind::Or) {
            let right = self.parse_and()?;
            let span = left.span().merge(right.span());
            left = Expr::Binary(BinaryExpr {
                operator: BinOp::Or,
                left: Box::new(left),
                right: Box::new(right),
                span,
            });
        }
        Ok(left)
    }

    /// `AndExpr = NotExpr { "and" NotExpr }`
    fn parse_and(&mut self) -> sprout_types::Result<Expr> {
        let mut left = self.parse_not()?;
        while self.eat(&TokenKind::And) {
            let right = self.parse_not()?;
            let span = left.span().merge(right.span());
            left = Expr::Binary(BinaryExpr {
                operator: BinOp::And,
                left: Box::new(left),
                right: Box::new(right),
                span,
            });
        }
        Ok(left)
    }

    /// `NotExpr = "not" CompExpr | CompExpr`
    ///
    /// `not` does not stack; `not not x` is a syntax error.
    fn parse_not(&mut self) -> sprout_types::Result<Expr> {
        if self.check(&TokenKind::Not) {
            let start = self.advance().span;
            let argument = self.parse_comparison()?;
            let span = start.merge(argument.span());
            return Ok(Expr::Unary(UnaryExpr {
                operator: UnaryOp::Not,
                argument: Box::new(argument),
                span,
            }));
        }
        self.parse_comparison()
    }

    /// `CompExpr = AddExpr [ CompOp AddExpr ]`
    ///
    /// Comparison operators do NOT chain: `a < b < c` is a syntax error.
    fn parse_comparison(&mut self) -> sprout_types::Result<Expr> {
        let mut left = self.parse_add()?;
        if let Some(operator) = self.match_comparison_op() {
            self.advance(); // consume operator
            let right = self.parse_add()?;
            let span = left.span().merge(right.span());
            left = Expr::Binary(BinaryExpr {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                span,
            });
            if self.match_comparison_op().is_some() {
                return Err(self.error_with_suggestion(
                    "comparison operators cannot be chained",
                    "Combine comparisons with 'and': a < b and b < c",
                ));
            }
        }
        Ok(left)
    }

    /// Check if the current token is a comparison operator.
    fn match_comparison_op(&self) -> Option<BinOp> {
        match self.peek_kind() {
            TokenKind::EqEq => Some(BinOp::Eq),
            TokenKind::BangEq => Some(BinOp::NotEq),
            TokenKind::Less => Some(BinOp::Less),
            TokenKind::LessEq => Some(BinOp::LessEq),
            TokenKind::Greater => Some(BinOp::Greater),
            TokenKind::GreaterEq => Some(BinOp::GreaterEq),
            _ => None,
        }
    }

    /// `AddExpr = MulExpr { ("+" | "-") MulExpr }`
    fn parse_add(&mut self) -> sprout_types::Result<Expr> {
        let mut left = self.parse_mul()?;
        loop {
            let operator = match self.peek_kind() {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_mul()?;
            let span = left.span().merge(right.span());
            left = Expr::Binary(BinaryExpr {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                span,
            });
        }
        Ok(left)
    }

    /// `MulExpr = UnaryExpr { ("*" | "/" | "%") UnaryExpr }`
    fn parse_mul(&mut self) -> sprout_types::Result<Expr> {
        let mut left = self.parse_unary()?;
        loop {
            let operator = match self.peek_kind() {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                TokenKind::Percent => BinOp::Mod,
                _ => break,
            };
            self.advance();
            let right = self.parse_unary()?;
            let span = left.span().merge(right.span());
            left = Expr::Binary(BinaryExpr {
                operator,
                left: Box::new(left),
                right: Box::new(right),
                span,
            });
        }
        Ok(left)
    }

    /// `UnaryExpr = "-" UnaryExpr | PowExpr`
    fn parse_unary(&mut self) -> sprout_types::Result<Expr> {
        if self.check(&TokenKind::Minus) {
            let start = self.advance().span;
            let argument = self.parse_unary()?;
            let span = start.merge(argument.span());
            return Ok(Expr::Unary(UnaryExpr {
                operator: UnaryOp::Neg,
                argument: Box::new(argument),
                span,
            }));
        }
        self.parse_power()
    }

    /// `PowExpr = PostfixExpr [ "^" UnaryExpr ]` — right-associative.
    fn parse_power(&mut self) -> sprout_types::Result<Expr> {
        let left = self.parse_postfix()?;
        if self.eat(&TokenKind::Caret) {
            let right = self.parse_unary()?;
            let span = left.span().merge(right.span());
            return Ok(Expr::Binary(BinaryExpr {
                operator: BinOp::Pow,
                left: Box::new(left),
                right: Box::new(right),
                span,
            }));
        }
        Ok(left)
    }

    /// `PostfixExpr = Atom { "[" Expr "]" | "." Identifier }`
    fn parse_postfix(&mut self) -> sprout_types::Result<Expr> {
        let mut expr = self.parse_atom()?;
        loop {
            match self.peek_kind() {
                TokenKind::LBracket => {
                    self.advance(); // eat `[`
                    let index = self.parse_expression()?;
                    self.expect(&TokenKind::RBracket)?;
                    let span = expr.span().merge(self.previous_span());
                    expr = Expr::Index(IndexExpr {
                        object: Box::new(expr),
                        index: Box::new(index),
                        span,
                    });
                }
                TokenKind::Dot => {
                    self.advance(); // eat `.`
                    let property = self.expect_identifier()?;
                    let span = expr.span().merge(property.span);
                    expr = Expr::Member(MemberExpr {
                        object: Box::new(expr),
                        property,
                        span,
                    });
                }
                _ => break,
            }
        }
        Ok(expr)
    }

    // ══════════════════════════════════════════════════════════════════════════
    // Atoms
    // ══════════════════════════════════════════════════════════════════════════

    /// Parse an atom: grouping, call, list, object, identifier or literal.
    fn parse_atom(&mut self) -> sprout_types::Result<Expr> {
        match self.peek_kind().clone() {
            TokenKind::LParen => {
                self.advance();
                let expr = self.parse_expression()?;
                self.expect(&TokenKind::RParen)?;
                Ok(expr)
            }
            TokenKind::LBracket => self.parse_array_literal(),
            TokenKind::LBrace => self.parse_object_literal(),
            TokenKind::Identifier(name) => {
                let span = self.advance().span;
                let ident = Identifier::new(name, span);
                // Call syntax applies to bare identifiers only; calls on
                // computed values go through indexing/member results.
                if self.check(&TokenKind::LParen) {
                    self.advance(); // eat `(`
                    let arguments = self.parse_arg_list()?;
                    self.expect(&TokenKind::RParen)?;
                    let span = span.merge(self.previous_span());
                    return Ok(Expr::Call(CallExpr {
                        callee: Box::new(Expr::Identifier(ident)),
                        arguments,
                        span,
                    }));
                }
                Ok(Expr::Identifier(ident))
            }
            TokenKind::Number(value) => {
                let span = self.advance().span;
                let raw = self.raw_text(span);
                Ok(Expr::Literal(Literal {
                    value: LiteralValue::Number(value),
                    raw,
                    span,
                }))
            }
            TokenKind::Str(text) => {
                let span = self.advance().span;
                let raw = self.raw_text(span);
                Ok(Expr::Literal(Literal {
                    value: LiteralValue::Str(text),
                    raw,
                    span,
                }))
            }
            TokenKind::True | TokenKind::False => {
                let token = self.advance();
                let raw = self.raw_text(token.span);
                Ok(Expr::Literal(Literal {
                    value: LiteralValue::Bool(token.kind == TokenKind::True),
                    raw,
                    span: token.span,
                }))
            }
            _ => Err(self.error_at_current(format!(
                "expected an expression, got '{}'",
                self.peek_kind()
            ))),
        }
    }

    /// Comma-separated argument list (empty allowed). The caller handles
    /// the surrounding parentheses.
    fn parse_arg_list(&mut self) -> sprout_types::Result<Vec<Expr>> {
        let mut args = Vec::new();
        if self.check(&TokenKind::RParen) {
            return Ok(args);
        }
        loop {
            args.push(self.parse_expression()?);
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }
        Ok(args)
    }

    /// `[ expr, expr, ... ]`
    fn parse_array_literal(&mut self) -> sprout_types::Result<Expr> {
        let start = self.current_span();
        self.expect(&TokenKind::LBracket)?;
        let mut elements = Vec::new();
        if !self.check(&TokenKind::RBracket) {
            loop {
                elements.push(self.parse_expression()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RBracket)?;
        let span = start.merge(self.previous_span());
        Ok(Expr::Array(ArrayLiteral { elements, span }))
    }

    /// `{ key: value, ... }` — keys are identifiers or string literals.
    fn parse_object_literal(&mut self) -> sprout_types::Result<Expr> {
        let start = self.current_span();
        self.expect(&TokenKind::LBrace)?;
        let mut properties = Vec::new();
        if !self.check(&TokenKind::RBrace) {
            loop {
                properties.push(self.parse_property()?);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RBrace)?;
        let span = start.merge(self.previous_span());
        Ok(Expr::Object(ObjectLiteral { properties, span }))
    }

    /// One `key: value` entry in an object literal.
    fn parse_property(&mut self) -> sprout_types::Result<Property> {
        let key = match self.peek_kind().clone() {
            TokenKind::Identifier(name) => {
                let span = self.advance().span;
                PropertyKey::Identifier(Identifier::new(name, span))
            }
            TokenKind::Str(text) => {
                let span = self.advance().span;
                let raw = self.raw_text(span);
                PropertyKey::Literal(Literal {
                    value: LiteralValue::Str(text),
                    raw,
                    span,
                })
            }
            _ => {
                return Err(self.error_with_suggestion(
                    format!("expected a property name, got '{}'", self.peek_kind()),
                    "Object keys are names or strings: { name: \"Ada\" }",
                ));
            }
        };
        let key_span = match &key {
            PropertyKey::Identifier(id) => id.span,
            PropertyKey::Literal(lit) => lit.span,
        };
        self.expect(&TokenKind::Colon)?;
        let value = self.parse_expression()?;
        let span = key_span.merge(value.span());
        Ok(Property { key, value, span })
    }
}
