//! AST node types for the Sprout language.
//!
//! Every node carries a [`Span`] (zero-filled when a tree arrives from an
//! external producer without location data). Large recursive types are boxed
//! to keep enum sizes reasonable. The whole tree serializes as JSON keyed by
//! `"kind"` per node — the wire form shared with the native execution engine,
//! which is why serde renames map Rust names onto the established camelCase
//! field names.
//!
//! Nodes are immutable once built and owned by their parent, with one
//! exception: [`FuncDecl::body`] is an `Rc<Block>` so that every function
//! value created from one declaration references the same body.

use crate::Span;
use serde::{Deserialize, Serialize};
use std::rc::Rc;

// ══════════════════════════════════════════════════════════════════════════════
// Top Level
// ══════════════════════════════════════════════════════════════════════════════

/// A complete Sprout program: an ordered list of top-level statements.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Program {
    /// Always `"Program"` — kept as an explicit field so the root node is
    /// keyed by kind on the wire like every other node.
    #[serde(default = "program_kind")]
    pub kind: String,
    pub body: Vec<Stmt>,
    #[serde(default)]
    pub span: Span,
}

fn program_kind() -> String {
    "Program".to_string()
}

impl Program {
    pub fn new(body: Vec<Stmt>, span: Span) -> Self {
        Self {
            kind: program_kind(),
            body,
            span,
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Statements
// ══════════════════════════════════════════════════════════════════════════════

/// A statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Stmt {
    /// `let name = expr`
    #[serde(rename = "LetStmt")]
    Let(LetStmt),
    /// `name = expr`
    #[serde(rename = "AssignStmt")]
    Assign(AssignStmt),
    /// `show expr`
    #[serde(rename = "ShowStmt")]
    Show(ShowStmt),
    /// `if cond { ... } [else { ... }]`
    #[serde(rename = "IfStmt")]
    If(IfStmt),
    /// `repeat count times { ... }`
    #[serde(rename = "RepeatStmt")]
    Repeat(RepeatStmt),
    /// `while cond { ... }`
    #[serde(rename = "WhileStmt")]
    While(WhileStmt),
    /// `function name(params) { ... }`
    #[serde(rename = "FuncDecl")]
    Func(FuncDecl),
    /// `return [expr]`
    #[serde(rename = "ReturnStmt")]
    Return(ReturnStmt),
    /// A bare expression evaluated for its side effects.
    #[serde(rename = "ExprStmt")]
    Expr(ExprStmt),
    /// A bare `{ ... }` block opening a new scope.
    #[serde(rename = "Block")]
    Block(Block),
}

impl Stmt {
    /// The source span of this statement.
    pub fn span(&self) -> Span {
        match self {
            Stmt::Let(s) => s.span,
            Stmt::Assign(s) => s.span,
            Stmt::Show(s) => s.span,
            Stmt::If(s) => s.span,
            Stmt::Repeat(s) => s.span,
            Stmt::While(s) => s.span,
            Stmt::Func(s) => s.span,
            Stmt::Return(s) => s.span,
            Stmt::Expr(s) => s.span,
            Stmt::Block(s) => s.span,
        }
    }
}

/// `let name = expr`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LetStmt {
    pub name: Identifier,
    pub value: Expr,
    #[serde(default)]
    pub span: Span,
}

/// `name = expr` — reassignment of an existing binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssignStmt {
    pub name: Identifier,
    pub value: Expr,
    #[serde(default)]
    pub span: Span,
}

/// `show expr` — emit one line of program output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShowStmt {
    pub expression: Expr,
    #[serde(default)]
    pub span: Span,
}

/// `if cond { ... } [else { ... }]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IfStmt {
    pub condition: Expr,
    #[serde(rename = "thenBlock")]
    pub then_block: Block,
    #[serde(
        rename = "elseBlock",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub else_block: Option<Block>,
    #[serde(default)]
    pub span: Span,
}

/// `repeat count times { ... }` — count is evaluated once, before the loop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RepeatStmt {
    pub count: Expr,
    pub body: Block,
    #[serde(default)]
    pub span: Span,
}

/// `while cond { ... }` — condition re-evaluated before every iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WhileStmt {
    pub condition: Expr,
    pub body: Block,
    #[serde(default)]
    pub span: Span,
}

/// `function name(params) { ... }`
///
/// The body lives behind an `Rc`: every function value created from this
/// declaration shares the same block instead of copying it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncDecl {
    pub name: Identifier,
    pub params: Vec<Identifier>,
    pub body: Rc<Block>,
    #[serde(default)]
    pub span: Span,
}

/// `return [expr]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReturnStmt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub argument: Option<Expr>,
    #[serde(default)]
    pub span: Span,
}

/// A bare expression statement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExprStmt {
    pub expression: Expr,
    #[serde(default)]
    pub span: Span,
}

/// `{ statements... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub body: Vec<Stmt>,
    #[serde(default)]
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Expressions
// ══════════════════════════════════════════════════════════════════════════════

/// An expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Expr {
    /// `a + b`, `a and b`, `a == b`, ...
    #[serde(rename = "BinaryExpr")]
    Binary(BinaryExpr),
    /// `-x`, `not x`
    #[serde(rename = "UnaryExpr")]
    Unary(UnaryExpr),
    /// `callee(args...)`
    #[serde(rename = "CallExpr")]
    Call(CallExpr),
    /// `object[index]`
    #[serde(rename = "IndexExpr")]
    Index(IndexExpr),
    /// `object.property`
    #[serde(rename = "MemberExpr")]
    Member(MemberExpr),
    /// `42`, `"hello"`, `true`
    #[serde(rename = "Literal")]
    Literal(Literal),
    /// `my_var`
    #[serde(rename = "Identifier")]
    Identifier(Identifier),
    /// `[a, b, c]`
    #[serde(rename = "ArrayLiteral")]
    Array(ArrayLiteral),
    /// `{ key: value, ... }`
    #[serde(rename = "ObjectLiteral")]
    Object(ObjectLiteral),
}

impl Expr {
    /// The source span of this expression.
    pub fn span(&self) -> Span {
        match self {
            Expr::Binary(e) => e.span,
            Expr::Unary(e) => e.span,
            Expr::Call(e) => e.span,
            Expr::Index(e) => e.span,
            Expr::Member(e) => e.span,
            Expr::Literal(e) => e.span,
            Expr::Identifier(e) => e.span,
            Expr::Array(e) => e.span,
            Expr::Object(e) => e.span,
        }
    }
}

/// A binary operation. The operator keeps its literal source text as the
/// tag value (`"+"`, `"and"`, `"=="`), never a numeric opcode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinaryExpr {
    pub operator: BinOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    #[serde(default)]
    pub span: Span,
}

/// A unary operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnaryExpr {
    pub operator: UnaryOp,
    pub argument: Box<Expr>,
    #[serde(default)]
    pub span: Span,
}

/// A call. The callee is usually an identifier, but any expression that
/// evaluates to a function works (`f(1)(2)` chains through the result).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallExpr {
    pub callee: Box<Expr>,
    pub arguments: Vec<Expr>,
    #[serde(default)]
    pub span: Span,
}

/// `object[index]` — list indexing or object key lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexExpr {
    pub object: Box<Expr>,
    pub index: Box<Expr>,
    #[serde(default)]
    pub span: Span,
}

/// `object.property`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemberExpr {
    pub object: Box<Expr>,
    pub property: Identifier,
    #[serde(default)]
    pub span: Span,
}

// ══════════════════════════════════════════════════════════════════════════════
// Literals & Identifiers
// ══════════════════════════════════════════════════════════════════════════════

/// A literal value: `42`, `3.14`, `"hello"`, `true`.
///
/// `value` holds the parsed value; `raw` the original source text
/// (including quotes for strings).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Literal {
    pub value: LiteralValue,
    pub raw: String,
    #[serde(default)]
    pub span: Span,
}

/// The value carried by a [`Literal`] node. Serializes as the bare JSON
/// scalar (`42`, `"hello"`, `true`, `null`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LiteralValue {
    Null,
    Bool(bool),
    Number(f64),
    Str(String),
}

/// A named reference.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identifier {
    pub name: String,
    #[serde(default)]
    pub span: Span,
}

impl Identifier {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            span,
        }
    }
}

/// `[a, b, c]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArrayLiteral {
    pub elements: Vec<Expr>,
    #[serde(default)]
    pub span: Span,
}

/// `{ key: value, ... }`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectLiteral {
    pub properties: Vec<Property>,
    #[serde(default)]
    pub span: Span,
}

/// One `key: value` entry in an object literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub key: PropertyKey,
    pub value: Expr,
    #[serde(default)]
    pub span: Span,
}

/// An object key — a bare identifier or a string literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum PropertyKey {
    Identifier(Identifier),
    Literal(Literal),
}

impl PropertyKey {
    /// The key text: the identifier's name, or the literal's string value.
    /// Non-string literal keys render through their raw source text.
    pub fn name(&self) -> String {
        match self {
            PropertyKey::Identifier(id) => id.name.clone(),
            PropertyKey::Literal(lit) => match &lit.value {
                LiteralValue::Str(s) => s.clone(),
                _ => lit.raw.clone(),
            },
        }
    }
}

// ══════════════════════════════════════════════════════════════════════════════
// Operators
// ══════════════════════════════════════════════════════════════════════════════

/// Binary operators, tagged by their literal source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BinOp {
    #[serde(rename = "+")]
    Add,
    #[serde(rename = "-")]
    Sub,
    #[serde(rename = "*")]
    Mul,
    #[serde(rename = "/")]
    Div,
    #[serde(rename = "%")]
    Mod,
    #[serde(rename = "^")]
    Pow,
    #[serde(rename = "==")]
    Eq,
    #[serde(rename = "!=")]
    NotEq,
    #[serde(rename = "<")]
    Less,
    #[serde(rename = "<=")]
    LessEq,
    #[serde(rename = ">")]
    Greater,
    #[serde(rename = ">=")]
    GreaterEq,
    #[serde(rename = "and")]
    And,
    #[serde(rename = "or")]
    Or,
}

impl BinOp {
    /// The operator's source text, for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "^",
            BinOp::Eq => "==",
            BinOp::NotEq => "!=",
            BinOp::Less => "<",
            BinOp::LessEq => "<=",
            BinOp::Greater => ">",
            BinOp::GreaterEq => ">=",
            BinOp::And => "and",
            BinOp::Or => "or",
        }
    }
}

/// Unary operators, tagged by their literal source text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Logical negation (`not x` in source; `"!"` on the wire).
    #[serde(rename = "!")]
    Not,
    /// Numeric negation.
    #[serde(rename = "-")]
    Neg,
}

impl UnaryOp {
    /// The operator's source text, for error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            UnaryOp::Not => "!",
            UnaryOp::Neg => "-",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(n: f64) -> Expr {
        Expr::Literal(Literal {
            value: LiteralValue::Number(n),
            raw: format!("{n}"),
            span: Span::default(),
        })
    }

    #[test]
    fn test_stmt_serializes_keyed_by_kind() {
        let stmt = Stmt::Let(LetStmt {
            name: Identifier::new("x", Span::default()),
            value: num(1.0),
            span: Span::default(),
        });
        let json = serde_json::to_value(&stmt).unwrap();
        assert_eq!(json["kind"], "LetStmt");
        assert_eq!(json["name"]["name"], "x");
        assert_eq!(json["value"]["kind"], "Literal");
        assert_eq!(json["value"]["value"], 1.0);
    }

    #[test]
    fn test_if_stmt_wire_field_names() {
        let stmt = Stmt::If(IfStmt {
            condition: num(1.0),
            then_block: Block {
                body: vec![],
                span: Span::default(),
            },
            else_block: None,
            span: Span::default(),
        });
        let json = serde_json::to_value(&stmt).unwrap();
        assert_eq!(json["kind"], "IfStmt");
        assert!(json.get("thenBlock").is_some());
        // Absent else branch is omitted entirely, not serialized as null.
        assert!(json.get("elseBlock").is_none());
    }

    #[test]
    fn test_operator_serializes_as_source_text() {
        let expr = Expr::Binary(BinaryExpr {
            operator: BinOp::Add,
            left: Box::new(num(1.0)),
            right: Box::new(num(2.0)),
            span: Span::default(),
        });
        let json = serde_json::to_value(&expr).unwrap();
        assert_eq!(json["kind"], "BinaryExpr");
        assert_eq!(json["operator"], "+");
    }

    #[test]
    fn test_program_round_trip() {
        let prog = Program::new(
            vec![Stmt::Show(ShowStmt {
                expression: Expr::Binary(BinaryExpr {
                    operator: BinOp::Mul,
                    left: Box::new(num(6.0)),
                    right: Box::new(num(7.0)),
                    span: Span::default(),
                }),
                span: Span::default(),
            })],
            Span::default(),
        );
        let json = serde_json::to_string(&prog).unwrap();
        assert!(json.contains("\"kind\":\"Program\""));
        let back: Program = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prog);
    }

    #[test]
    fn test_deserialize_tree_without_spans() {
        // Trees from external producers may omit location data entirely.
        let json = r#"{
            "kind": "Program",
            "body": [
                { "kind": "ShowStmt",
                  "expression": { "kind": "Literal", "value": "hi", "raw": "\"hi\"" } }
            ]
        }"#;
        let prog: Program = serde_json::from_str(json).unwrap();
        assert_eq!(prog.body.len(), 1);
        assert_eq!(prog.span, Span::default());
    }

    #[test]
    fn test_literal_value_untagged_round_trip() {
        let cases = vec![
            (LiteralValue::Null, "null"),
            (LiteralValue::Bool(true), "true"),
            (LiteralValue::Number(3.5), "3.5"),
            (LiteralValue::Str("hi".into()), "\"hi\""),
        ];
        for (value, expected) in cases {
            let json = serde_json::to_string(&value).unwrap();
            assert_eq!(json, expected);
            let back: LiteralValue = serde_json::from_str(&json).unwrap();
            assert_eq!(back, value);
        }
    }

    #[test]
    fn test_func_decl_body_is_shared() {
        let body = Rc::new(Block {
            body: vec![],
            span: Span::default(),
        });
        let decl = FuncDecl {
            name: Identifier::new("f", Span::default()),
            params: vec![],
            body: Rc::clone(&body),
            span: Span::default(),
        };
        assert!(Rc::ptr_eq(&decl.body, &body));
    }

    #[test]
    fn test_property_key_name() {
        let ident_key = PropertyKey::Identifier(Identifier::new("age", Span::default()));
        assert_eq!(ident_key.name(), "age");
        let str_key = PropertyKey::Literal(Literal {
            value: LiteralValue::Str("full name".into()),
            raw: "\"full name\"".into(),
            span: Span::default(),
        });
        assert_eq!(str_key.name(), "full name");
    }
}
