//! Statement parsing — one function per grammar alternative.

use crate::parser::Parser;
use sprout_lexer::token::TokenKind;
use sprout_types::ast::*;
use std::rc::Rc;

impl<'src> Parser<'src> {
    /// Parse a single statement.
    pub(crate) fn parse_statement(&mut self) -> sprout_types::Result<Stmt> {
        match self.peek_kind() {
            TokenKind::Let => self.parse_let_stmt(),
            TokenKind::Show => self.parse_show_stmt(),
            TokenKind::Ask => self.parse_ask_stmt(),
            TokenKind::If => self.parse_if_stmt(),
            TokenKind::Repeat => self.parse_repeat_stmt(),
            TokenKind::While => self.parse_while_stmt(),
            TokenKind::Function => self.parse_func_decl(),
            TokenKind::Return => self.parse_return_stmt(),
            TokenKind::LBrace => Ok(Stmt::Block(self.parse_block()?)),
            // `x = expr` reassignment needs one token of lookahead to
            // distinguish it from an expression starting with `x`.
            TokenKind::Identifier(_) if self.look_ahead(1) == &TokenKind::Eq => {
                self.parse_assign_stmt()
            }
            // Anything else is a bare expression statement.
            _ => {
                let expression = self.parse_expression()?;
                let span = expression.span();
                Ok(Stmt::Expr(ExprStmt { expression, span }))
            }
        }
    }

    /// `{ statements... }`
    pub(crate) fn parse_block(&mut self) -> sprout_types::Result<Block> {
        let start = self.current_span();
        self.expect(&TokenKind::LBrace)?;
        let mut body = Vec::new();
        while !self.check(&TokenKind::RBrace) {
            if self.at_end() {
                return Err(self.error_with_suggestion(
                    "expected '}', got end of input",
                    "Close the block with }",
                ));
            }
            body.push(self.parse_statement()?);
        }
        self.expect(&TokenKind::RBrace)?;
        let span = start.merge(self.previous_span());
        Ok(Block { body, span })
    }

    /// `let name (: type)? = expr`
    fn parse_let_stmt(&mut self) -> sprout_types::Result<Stmt> {
        let start = self.current_span();
        self.advance(); // eat `let`
        let name = self.expect_identifier()?;
        if self.eat(&TokenKind::Colon) {
            self.expect_type_name()?;
        }
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expression()?;
        let span = start.merge(self.previous_span());
        Ok(Stmt::Let(LetStmt { name, value, span }))
    }

    /// `name = expr` — reassignment of an existing binding.
    fn parse_assign_stmt(&mut self) -> sprout_types::Result<Stmt> {
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::Eq)?;
        let value = self.parse_expression()?;
        let span = name.span.merge(self.previous_span());
        Ok(Stmt::Assign(AssignStmt { name, value, span }))
    }

    /// `show expr`
    fn parse_show_stmt(&mut self) -> sprout_types::Result<Stmt> {
        let start = self.current_span();
        self.advance(); // eat `show`
        let expression = self.parse_expression()?;
        let span = start.merge(self.previous_span());
        Ok(Stmt::Show(ShowStmt { expression, span }))
    }

    /// `ask "prompt" into name`
    ///
    /// Sugar: lowers to `name = ask("prompt")`, so the interception of the
    /// reserved `ask` callee and the assignment search both apply.
    fn parse_ask_stmt(&mut self) -> sprout_types::Result<Stmt> {
        let start = self.current_span();
        let ask_span = self.advance().span; // eat `ask`
        let prompt = match self.peek_kind().clone() {
            TokenKind::Str(text) => {
                let span = self.advance().span;
                let raw = self.raw_text(span);
                Literal {
                    value: LiteralValue::Str(text),
                    raw,
                    span,
                }
            }
            _ => {
                return Err(self.error_with_suggestion(
                    format!("expected a prompt string, got '{}'", self.peek_kind()),
                    "Write the question in quotes: ask \"How many?\" into count",
                ));
            }
        };
        self.expect(&TokenKind::Into)?;
        let name = self.expect_identifier()?;
        let span = start.merge(self.previous_span());
        let call = Expr::Call(CallExpr {
            callee: Box::new(Expr::Identifier(Identifier::new("ask", ask_span))),
            arguments: vec![Expr::Literal(prompt)],
            span,
        });
        Ok(Stmt::Assign(AssignStmt {
            name,
            value: call,
            span,
        }))
    }

    /// `if cond { ... } (else { ... })?`
    fn parse_if_stmt(&mut self) -> sprout_types::Result<Stmt> {
        let start = self.current_span();
        self.advance(); // eat `if`
        let condition = self.parse_expression()?;
        let then_block = self.parse_block()?;
        let else_block = if self.eat(&TokenKind::Else) {
            Some(self.parse_block()?)
        } else {
            None
        };
        let span = start.merge(self.previous_span());
        Ok(Stmt::If(IfStmt {
            condition,
            then_block,
            else_block,
            span,
        }))
    }

    /// `repeat count times { ... }`
    fn parse_repeat_stmt(&mut self) -> sprout_types::Result<Stmt> {
        let start = self.current_span();
        self.advance(); // eat `repeat`
        let count = self.parse_expression()?;
        if !self.eat(&TokenKind::Times) {
            return Err(self.error_with_suggestion(
                format!("expected 'times', got '{}'", self.peek_kind()),
                "Write the loop as: repeat 3 times { ... }",
            ));
        }
        let body = self.parse_block()?;
        let span = start.merge(self.previous_span());
        Ok(Stmt::Repeat(RepeatStmt { count, body, span }))
    }

    /// `while cond { ... }`
    fn parse_while_stmt(&mut self) -> sprout_types::Result<Stmt> {
        let start = self.current_span();
        self.advance(); // eat `while`
        let condition = self.parse_expression()?;
        let body = self.parse_block()?;
        let span = start.merge(self.previous_span());
        Ok(Stmt::While(WhileStmt {
            condition,
            body,
            span,
        }))
    }

    /// `function name(params) (: type)? { ... }`
    fn parse_func_decl(&mut self) -> sprout_types::Result<Stmt> {
        let start = self.current_span();
        self.advance(); // eat `function`
        let name = self.expect_identifier()?;
        self.expect(&TokenKind::LParen)?;
        let mut params = Vec::new();
        if !self.check(&TokenKind::RParen) {
            loop {
                let param = self.expect_identifier()?;
                if self.eat(&TokenKind::Colon) {
                    self.expect_type_name()?;
                }
                params.push(param);
                if !self.eat(&TokenKind::Comma) {
                    break;
                }
            }
        }
        self.expect(&TokenKind::RParen)?;
        if self.eat(&TokenKind::Colon) {
            self.expect_type_name()?;
        }
        let body = self.parse_block()?;
        let span = start.merge(self.previous_span());
        Ok(Stmt::Func(FuncDecl {
            name,
            params,
            body: Rc::new(body),
            span,
        }))
    }

    /// `return expr?`
    fn parse_return_stmt(&mut self) -> sprout_types::Result<Stmt> {
        let start = self.current_span();
        self.advance(); // eat `return`
        let argument = if self.starts_expression() {
            Some(self.parse_expression()?)
        } else {
            None
        };
        let span = start.merge(self.previous_span());
        Ok(Stmt::Return(ReturnStmt { argument, span }))
    }

    /// Can the current token begin an expression? Used to decide whether
    /// `return` carries an argument.
    fn starts_expression(&self) -> bool {
        matches!(
            self.peek_kind(),
            TokenKind::Number(_)
                | TokenKind::Str(_)
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Identifier(_)
                | TokenKind::LParen
                | TokenKind::LBracket
                | TokenKind::LBrace
                | TokenKind::Not
                | TokenKind::Minus
        )
    }
}
