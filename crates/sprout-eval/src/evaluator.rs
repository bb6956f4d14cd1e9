//! Core statement and expression evaluator.
//!
//! A single recursive dispatch walks the tree against an environment chain.
//! Early return is modeled as explicit data flow — [`Flow::Return`] carries
//! the value outward through blocks and loops until the nearest call
//! boundary catches it — never as unwinding. Evaluation order is strictly
//! left-to-right, depth-first; `and`/`or` do NOT short-circuit.

use crate::env::Environment;
use crate::host::Host;
use crate::value::{FunctionValue, Value};
use sprout_types::ast::*;
use sprout_types::{Span, SproutError, ANONYMOUS_CALLEE};
use std::rc::Rc;

/// How a statement finished: normally, or unwinding a `return`.
///
/// `Return` must never leak past a function-call boundary; the program
/// evaluator guards against a bare top-level `return` explicitly.
#[derive(Debug, Clone, PartialEq)]
pub enum Flow {
    Value(Value),
    Return(Value),
}

/// The tree-walking evaluator. Holds the host boundary for `show` output
/// and `ask` input; all variable state lives in the environment chain
/// passed to each call.
pub struct Evaluator<'h> {
    host: &'h mut dyn Host,
}

impl<'h> Evaluator<'h> {
    pub fn new(host: &'h mut dyn Host) -> Self {
        Self { host }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Program & statements
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate a whole program against the given environment.
    /// The result is the last statement's value.
    pub fn eval_program(
        &mut self,
        program: &Program,
        env: &Rc<Environment>,
    ) -> sprout_types::Result<Value> {
        let mut last = Value::Null;
        for stmt in &program.body {
            match self.eval_stmt(stmt, env)? {
                Flow::Value(value) => last = value,
                Flow::Return(_) => {
                    return Err(SproutError::InvalidOperation {
                        operator: "return".to_string(),
                        reason: "\"return\" only works inside a function body.".to_string(),
                        span: Some(stmt.span()),
                    });
                }
            }
        }
        Ok(last)
    }

    /// Evaluate a single statement.
    pub fn eval_stmt(
        &mut self,
        stmt: &Stmt,
        env: &Rc<Environment>,
    ) -> sprout_types::Result<Flow> {
        match stmt {
            Stmt::Let(s) => {
                let value = self.eval_expr(&s.value, env)?;
                env.define(&s.name.name, value);
                Ok(Flow::Value(Value::Null))
            }
            Stmt::Assign(s) => {
                let value = self.eval_expr(&s.value, env)?;
                env.assign(&s.name.name, value)
                    .map_err(|e| e.with_span(s.name.span))?;
                Ok(Flow::Value(Value::Null))
            }
            Stmt::Show(s) => {
                let value = self.eval_expr(&s.expression, env)?;
                self.host.show(&value.to_string());
                Ok(Flow::Value(Value::Null))
            }
            Stmt::If(s) => {
                let condition = self.eval_expr(&s.condition, env)?;
                if condition.is_truthy() {
                    self.eval_block(&s.then_block, env)
                } else if let Some(else_block) = &s.else_block {
                    self.eval_block(else_block, env)
                } else {
                    Ok(Flow::Value(Value::Null))
                }
            }
            Stmt::Repeat(s) => self.eval_repeat(s, env),
            Stmt::While(s) => self.eval_while(s, env),
            Stmt::Func(s) => {
                let function = Value::Function(Rc::new(FunctionValue {
                    name: s.name.name.clone(),
                    params: s.params.iter().map(|p| p.name.clone()).collect(),
                    body: Rc::clone(&s.body),
                    env: Rc::clone(env),
                }));
                env.define(&s.name.name, function);
                Ok(Flow::Value(Value::Null))
            }
            Stmt::Return(s) => {
                let value = match &s.argument {
                    Some(expr) => self.eval_expr(expr, env)?,
                    None => Value::Null,
                };
                Ok(Flow::Return(value))
            }
            Stmt::Expr(s) => Ok(Flow::Value(self.eval_expr(&s.expression, env)?)),
            Stmt::Block(block) => self.eval_block(block, env),
        }
    }

    /// Evaluate a block in a fresh child environment, propagating a
    /// `Return` signal immediately without running later statements.
    pub fn eval_block(
        &mut self,
        block: &Block,
        env: &Rc<Environment>,
    ) -> sprout_types::Result<Flow> {
        let block_env = Rc::new(Environment::new_enclosed(Rc::clone(env)));
        let mut last = Value::Null;
        for stmt in &block.body {
            match self.eval_stmt(stmt, &block_env)? {
                Flow::Value(value) => last = value,
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }
        }
        Ok(Flow::Value(last))
    }

    /// `repeat N times { ... }` — the count is evaluated once, up front;
    /// body mutations of its inputs do not change the iteration count.
    fn eval_repeat(
        &mut self,
        stmt: &RepeatStmt,
        env: &Rc<Environment>,
    ) -> sprout_types::Result<Flow> {
        let count = self.eval_expr(&stmt.count, env)?;
        let Value::Number(n) = count else {
            return Err(SproutError::TypeMismatch {
                expected: "number".to_string(),
                actual: count.type_name().to_string(),
                span: Some(stmt.count.span()),
            });
        };
        // Fractional counts truncate; zero, negative and NaN run nothing.
        let iterations = if n.is_nan() || n < 1.0 { 0 } else { n as u64 };
        let mut last = Value::Null;
        for _ in 0..iterations {
            match self.eval_block(&stmt.body, env)? {
                Flow::Value(value) => last = value,
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }
        }
        Ok(Flow::Value(last))
    }

    /// `while cond { ... }` — condition re-evaluated before every iteration.
    fn eval_while(
        &mut self,
        stmt: &WhileStmt,
        env: &Rc<Environment>,
    ) -> sprout_types::Result<Flow> {
        let mut last = Value::Null;
        loop {
            let condition = self.eval_expr(&stmt.condition, env)?;
            if !condition.is_truthy() {
                break;
            }
            match self.eval_block(&stmt.body, env)? {
                Flow::Value(value) => last = value,
                Flow::Return(value) => return Ok(Flow::Return(value)),
            }
        }
        Ok(Flow::Value(last))
    }

    // ══════════════════════════════════════════════════════════════════════
    // Expressions
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate an expression to a value.
    pub fn eval_expr(
        &mut self,
        expr: &Expr,
        env: &Rc<Environment>,
    ) -> sprout_types::Result<Value> {
        match expr {
            Expr::Literal(lit) => Ok(literal_value(lit)),
            Expr::Identifier(id) => env.get(&id.name).map_err(|e| e.with_span(id.span)),
            Expr::Binary(bin) => self.eval_binary(bin, env),
            Expr::Unary(unary) => self.eval_unary(unary, env),
            Expr::Call(call) => self.eval_call(call, env),
            Expr::Index(index) => {
                let target = self.eval_expr(&index.object, env)?;
                let key = self.eval_expr(&index.index, env)?;
                self.index_value(target, key, index.span)
            }
            Expr::Member(member) => {
                let target = self.eval_expr(&member.object, env)?;
                self.lookup_member(target, &member.property.name, member.span)
            }
            Expr::Array(array) => {
                let mut items = Vec::with_capacity(array.elements.len());
                for element in &array.elements {
                    items.push(self.eval_expr(element, env)?);
                }
                Ok(Value::List(items))
            }
            Expr::Object(object) => {
                let mut map = std::collections::HashMap::new();
                for property in &object.properties {
                    let value = self.eval_expr(&property.value, env)?;
                    map.insert(property.key.name(), value);
                }
                Ok(Value::Object(map))
            }
        }
    }

    // ── Operators ────────────────────────────────────────────────────────

    /// Left then right, both always evaluated — there is deliberately no
    /// short-circuit, so side effects in the right operand always run.
    fn eval_binary(
        &mut self,
        bin: &BinaryExpr,
        env: &Rc<Environment>,
    ) -> sprout_types::Result<Value> {
        let left = self.eval_expr(&bin.left, env)?;
        let right = self.eval_expr(&bin.right, env)?;
        match bin.operator {
            BinOp::Add => add_values(left, right, bin.span),
            BinOp::Sub | BinOp::Mul | BinOp::Div | BinOp::Mod | BinOp::Pow => {
                numeric_op(left, right, bin.operator, bin.span)
            }
            BinOp::Eq => Ok(Value::Bool(left == right)),
            BinOp::NotEq => Ok(Value::Bool(left != right)),
            BinOp::Less | BinOp::LessEq | BinOp::Greater | BinOp::GreaterEq => {
                compare_values(left, right, bin.operator, bin.span)
            }
            // Host-logical and/or return one of the operands, not a bool.
            BinOp::And => Ok(if left.is_truthy() { right } else { left }),
            BinOp::Or => Ok(if left.is_truthy() { left } else { right }),
        }
    }

    fn eval_unary(
        &mut self,
        unary: &UnaryExpr,
        env: &Rc<Environment>,
    ) -> sprout_types::Result<Value> {
        let value = self.eval_expr(&unary.argument, env)?;
        match unary.operator {
            UnaryOp::Not => Ok(Value::Bool(!value.is_truthy())),
            UnaryOp::Neg => match value {
                Value::Number(n) => Ok(Value::Number(-n)),
                other => Err(SproutError::TypeMismatch {
                    expected: "number".to_string(),
                    actual: other.type_name().to_string(),
                    span: Some(unary.span),
                }),
            },
        }
    }

    // ── Calls ────────────────────────────────────────────────────────────

    /// Evaluate a call. The callee is evaluated first; a list or object
    /// callee with exactly one argument is index/member access written in
    /// call syntax. Everything else must be a function.
    fn eval_call(
        &mut self,
        call: &CallExpr,
        env: &Rc<Environment>,
    ) -> sprout_types::Result<Value> {
        // The reserved `ask` identifier is intercepted before general call
        // evaluation.
        if let Expr::Identifier(id) = call.callee.as_ref() {
            if id.name == "ask" {
                return self.eval_ask(call, env);
            }
        }

        let callee = self.eval_expr(&call.callee, env)?;

        if matches!(callee, Value::List(_) | Value::Object(_)) && call.arguments.len() == 1 {
            let key = self.eval_expr(&call.arguments[0], env)?;
            return self.index_value(callee, key, call.span);
        }

        let Value::Function(function) = callee else {
            let name = match call.callee.as_ref() {
                Expr::Identifier(id) => id.name.clone(),
                _ => ANONYMOUS_CALLEE.to_string(),
            };
            return Err(SproutError::FunctionNotFound {
                name,
                span: Some(call.span),
            });
        };

        let mut args = Vec::with_capacity(call.arguments.len());
        for argument in &call.arguments {
            args.push(self.eval_expr(argument, env)?);
        }

        // Parameters bind positionally in a fresh scope whose parent is
        // the function's captured environment. Unsupplied trailing
        // arguments bind null; extras are ignored.
        let call_env = Rc::new(Environment::new_enclosed(Rc::clone(&function.env)));
        for (i, param) in function.params.iter().enumerate() {
            call_env.define(param, args.get(i).cloned().unwrap_or(Value::Null));
        }

        // The call boundary is where a Return signal stops.
        match self.eval_block(&function.body, &call_env)? {
            Flow::Return(value) => Ok(value),
            Flow::Value(_) => Ok(Value::Null),
        }
    }

    /// The `ask` built-in: one string prompt, one blocking line read.
    /// A reply that parses fully as a number comes back numeric.
    fn eval_ask(
        &mut self,
        call: &CallExpr,
        env: &Rc<Environment>,
    ) -> sprout_types::Result<Value> {
        if call.arguments.len() != 1 {
            return Err(SproutError::InvalidOperation {
                operator: "ask".to_string(),
                reason: "\"ask\" takes exactly one prompt, e.g. ask \"How many?\" into answer."
                    .to_string(),
                span: Some(call.span),
            });
        }
        let prompt = self.eval_expr(&call.arguments[0], env)?;
        let Value::Str(text) = prompt else {
            return Err(SproutError::TypeMismatch {
                expected: "string".to_string(),
                actual: prompt.type_name().to_string(),
                span: Some(call.arguments[0].span()),
            });
        };
        let reply = self.host.ask(&text);
        match reply.trim().parse::<f64>() {
            Ok(number) => Ok(Value::Number(number)),
            Err(_) => Ok(Value::Str(reply)),
        }
    }

    // ── Indexing & member access ─────────────────────────────────────────

    /// `target[key]` — shared by `IndexExpr` and call-syntax indexing.
    fn index_value(
        &self,
        target: Value,
        key: Value,
        span: Span,
    ) -> sprout_types::Result<Value> {
        match target {
            Value::List(items) => match key {
                Value::Number(n) => {
                    if !n.is_finite() || n.fract() != 0.0 {
                        return Err(SproutError::TypeMismatch {
                            expected: "whole number".to_string(),
                            actual: "number".to_string(),
                            span: Some(span),
                        });
                    }
                    let index = n as i64;
                    if index < 0 || index as usize >= items.len() {
                        return Err(SproutError::IndexOutOfBounds {
                            index,
                            size: items.len(),
                            span: Some(span),
                        });
                    }
                    Ok(items[index as usize].clone())
                }
                Value::Str(name) => self.lookup_member(Value::List(items), &name, span),
                other => Err(SproutError::TypeMismatch {
                    expected: "number".to_string(),
                    actual: other.type_name().to_string(),
                    span: Some(span),
                }),
            },
            Value::Object(map) => match key {
                Value::Str(name) => self.lookup_member(Value::Object(map), &name, span),
                other => Err(SproutError::TypeMismatch {
                    expected: "string".to_string(),
                    actual: other.type_name().to_string(),
                    span: Some(span),
                }),
            },
            other => Err(SproutError::TypeMismatch {
                expected: "list or object".to_string(),
                actual: other.type_name().to_string(),
                span: Some(span),
            }),
        }
    }

    /// `target.name` — object key lookup (missing keys yield null) plus
    /// the one list property, `length`.
    fn lookup_member(
        &self,
        target: Value,
        name: &str,
        span: Span,
    ) -> sprout_types::Result<Value> {
        match target {
            Value::Object(map) => Ok(map.get(name).cloned().unwrap_or(Value::Null)),
            Value::List(items) if name == "length" => Ok(Value::Number(items.len() as f64)),
            Value::List(_) => Err(SproutError::TypeMismatch {
                expected: "number".to_string(),
                actual: "string".to_string(),
                span: Some(span),
            }),
            other => Err(SproutError::TypeMismatch {
                expected: "list or object".to_string(),
                actual: other.type_name().to_string(),
                span: Some(span),
            }),
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════
// Value-level operator helpers
// ══════════════════════════════════════════════════════════════════════════

fn literal_value(lit: &Literal) -> Value {
    match &lit.value {
        LiteralValue::Null => Value::Null,
        LiteralValue::Bool(b) => Value::Bool(*b),
        LiteralValue::Number(n) => Value::Number(*n),
        LiteralValue::Str(s) => Value::Str(s.clone()),
    }
}

/// `+` — string concatenation if either operand is a string, else numeric
/// addition.
fn add_values(left: Value, right: Value, span: Span) -> sprout_types::Result<Value> {
    match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => Ok(Value::Number(a + b)),
        _ if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) => {
            Ok(Value::Str(format!("{left}{right}")))
        }
        _ => {
            let offender = if matches!(left, Value::Number(_)) {
                right.type_name()
            } else {
                left.type_name()
            };
            Err(SproutError::TypeMismatch {
                expected: "number or string".to_string(),
                actual: offender.to_string(),
                span: Some(span),
            })
        }
    }
}

/// `- * / % ^` — numbers only; dividing or taking a remainder by zero is
/// an invalid operation, not an IEEE infinity.
fn numeric_op(left: Value, right: Value, op: BinOp, span: Span) -> sprout_types::Result<Value> {
    let (Value::Number(a), Value::Number(b)) = (&left, &right) else {
        let offender = if matches!(left, Value::Number(_)) {
            right.type_name()
        } else {
            left.type_name()
        };
        return Err(SproutError::TypeMismatch {
            expected: "number".to_string(),
            actual: offender.to_string(),
            span: Some(span),
        });
    };
    let result = match op {
        BinOp::Sub => a - b,
        BinOp::Mul => a * b,
        BinOp::Div => {
            if *b == 0.0 {
                return Err(SproutError::InvalidOperation {
                    operator: "/".to_string(),
                    reason: "Dividing by zero is not allowed.".to_string(),
                    span: Some(span),
                });
            }
            a / b
        }
        BinOp::Mod => {
            if *b == 0.0 {
                return Err(SproutError::InvalidOperation {
                    operator: "%".to_string(),
                    reason: "Taking a remainder by zero is not allowed.".to_string(),
                    span: Some(span),
                });
            }
            a % b
        }
        BinOp::Pow => a.powf(*b),
        _ => unreachable!("not a numeric operator: {op:?}"),
    };
    Ok(Value::Number(result))
}

/// `< <= > >=` — numeric ordering, or lexicographic ordering for strings.
fn compare_values(left: Value, right: Value, op: BinOp, span: Span) -> sprout_types::Result<Value> {
    let ordering = match (&left, &right) {
        (Value::Number(a), Value::Number(b)) => a.partial_cmp(b),
        (Value::Str(a), Value::Str(b)) => Some(a.cmp(b)),
        _ => {
            let (expected, actual) = match (&left, &right) {
                (Value::Number(_), other) => ("number", other.type_name()),
                (Value::Str(_), other) => ("string", other.type_name()),
                (other, _) => ("number or string", other.type_name()),
            };
            return Err(SproutError::TypeMismatch {
                expected: expected.to_string(),
                actual: actual.to_string(),
                span: Some(span),
            });
        }
    };
    // NaN ordering comparisons are all false.
    let Some(ordering) = ordering else {
        return Ok(Value::Bool(false));
    };
    let result = match op {
        BinOp::Less => ordering.is_lt(),
        BinOp::LessEq => ordering.is_le(),
        BinOp::Greater => ordering.is_gt(),
        BinOp::GreaterEq => ordering.is_ge(),
        _ => unreachable!("not a comparison operator: {op:?}"),
    };
    Ok(Value::Bool(result))
}
