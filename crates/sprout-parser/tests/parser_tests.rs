//! Parser tests: statement mapping, operator precedence, postfix forms,
//! the `ask` lowering, literals, and syntax-error diagnostics.

use sprout_parser::parse_source;
use sprout_types::ast::*;
use sprout_types::{SourceFile, SproutError};

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

/// Parse source, panicking on errors.
fn parse_ok(source: &str) -> Program {
    let sf = SourceFile::new("test.sprout", source);
    match parse_source(&sf) {
        Ok(program) => program,
        Err(err) => panic!("unexpected parse error: {err}"),
    }
}

/// Parse source, returning the error.
fn parse_err(source: &str) -> SproutError {
    let sf = SourceFile::new("test.sprout", source);
    parse_source(&sf).expect_err("expected a parse error")
}

/// Parse a single-statement program and return that statement.
fn stmt(source: &str) -> Stmt {
    let mut program = parse_ok(source);
    assert_eq!(program.body.len(), 1, "expected exactly one statement");
    program.body.remove(0)
}

/// Parse a single expression statement and return the expression.
fn expr(source: &str) -> Expr {
    match stmt(source) {
        Stmt::Expr(e) => e.expression,
        other => panic!("expected expression statement, got {other:?}"),
    }
}

fn num_literal(e: &Expr) -> f64 {
    match e {
        Expr::Literal(Literal {
            value: LiteralValue::Number(n),
            ..
        }) => *n,
        other => panic!("expected number literal, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Statements
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_let_stmt() {
    match stmt("let x = 10") {
        Stmt::Let(let_stmt) => {
            assert_eq!(let_stmt.name.name, "x");
            assert_eq!(num_literal(&let_stmt.value), 10.0);
        }
        other => panic!("expected LetStmt, got {other:?}"),
    }
}

#[test]
fn test_let_with_type_annotation_is_accepted_and_discarded() {
    match stmt("let x: number = 10") {
        Stmt::Let(let_stmt) => assert_eq!(let_stmt.name.name, "x"),
        other => panic!("expected LetStmt, got {other:?}"),
    }
}

#[test]
fn test_assign_stmt() {
    match stmt("x = 42") {
        Stmt::Assign(assign) => {
            assert_eq!(assign.name.name, "x");
            assert_eq!(num_literal(&assign.value), 42.0);
        }
        other => panic!("expected AssignStmt, got {other:?}"),
    }
}

#[test]
fn test_show_stmt() {
    match stmt("show \"hello\"") {
        Stmt::Show(show) => match show.expression {
            Expr::Literal(lit) => {
                assert_eq!(lit.value, LiteralValue::Str("hello".into()));
                assert_eq!(lit.raw, "\"hello\"");
            }
            other => panic!("expected literal, got {other:?}"),
        },
        other => panic!("expected ShowStmt, got {other:?}"),
    }
}

#[test]
fn test_ask_lowers_to_assignment_of_ask_call() {
    match stmt("ask \"How many?\" into count") {
        Stmt::Assign(assign) => {
            assert_eq!(assign.name.name, "count");
            match assign.value {
                Expr::Call(call) => {
                    match call.callee.as_ref() {
                        Expr::Identifier(id) => assert_eq!(id.name, "ask"),
                        other => panic!("expected identifier callee, got {other:?}"),
                    }
                    assert_eq!(call.arguments.len(), 1);
                }
                other => panic!("expected CallExpr, got {other:?}"),
            }
        }
        other => panic!("expected AssignStmt, got {other:?}"),
    }
}

#[test]
fn test_if_without_else() {
    match stmt("if x { show x }") {
        Stmt::If(if_stmt) => {
            assert_eq!(if_stmt.then_block.body.len(), 1);
            assert!(if_stmt.else_block.is_none());
        }
        other => panic!("expected IfStmt, got {other:?}"),
    }
}

#[test]
fn test_if_with_else() {
    match stmt("if x { show 1 } else { show 2 }") {
        Stmt::If(if_stmt) => {
            assert!(if_stmt.else_block.is_some());
        }
        other => panic!("expected IfStmt, got {other:?}"),
    }
}

#[test]
fn test_repeat_stmt() {
    match stmt("repeat 3 times { show 1 }") {
        Stmt::Repeat(repeat) => {
            assert_eq!(num_literal(&repeat.count), 3.0);
            assert_eq!(repeat.body.body.len(), 1);
        }
        other => panic!("expected RepeatStmt, got {other:?}"),
    }
}

#[test]
fn test_while_stmt() {
    match stmt("while x < 10 { x = x + 1 }") {
        Stmt::While(while_stmt) => {
            assert!(matches!(while_stmt.condition, Expr::Binary(_)));
            assert_eq!(while_stmt.body.body.len(), 1);
        }
        other => panic!("expected WhileStmt, got {other:?}"),
    }
}

#[test]
fn test_func_decl() {
    match stmt("function add(a, b) { return a + b }") {
        Stmt::Func(func) => {
            assert_eq!(func.name.name, "add");
            assert_eq!(func.params.len(), 2);
            assert_eq!(func.params[0].name, "a");
            assert_eq!(func.params[1].name, "b");
            assert_eq!(func.body.body.len(), 1);
        }
        other => panic!("expected FuncDecl, got {other:?}"),
    }
}

#[test]
fn test_func_decl_no_params_with_return_type() {
    match stmt("function zero(): number { return 0 }") {
        Stmt::Func(func) => assert!(func.params.is_empty()),
        other => panic!("expected FuncDecl, got {other:?}"),
    }
}

#[test]
fn test_return_with_and_without_argument() {
    match stmt("function f() { return }") {
        Stmt::Func(func) => match &func.body.body[0] {
            Stmt::Return(ret) => assert!(ret.argument.is_none()),
            other => panic!("expected ReturnStmt, got {other:?}"),
        },
        other => panic!("expected FuncDecl, got {other:?}"),
    }
    match stmt("function f() { return 5 }") {
        Stmt::Func(func) => match &func.body.body[0] {
            Stmt::Return(ret) => assert!(ret.argument.is_some()),
            other => panic!("expected ReturnStmt, got {other:?}"),
        },
        other => panic!("expected FuncDecl, got {other:?}"),
    }
}

#[test]
fn test_bare_block_statement() {
    match stmt("{ let x = 1 }") {
        Stmt::Block(block) => assert_eq!(block.body.len(), 1),
        other => panic!("expected Block, got {other:?}"),
    }
}

#[test]
fn test_program_with_multiple_statements() {
    let program = parse_ok("let x = 1 show x x = 2 show x");
    assert_eq!(program.body.len(), 4);
    assert_eq!(program.kind, "Program");
}

#[test]
fn test_comments_are_ignored() {
    let program = parse_ok("# header\nlet x = 1 # trailing\n# footer");
    assert_eq!(program.body.len(), 1);
}

// ─────────────────────────────────────────────────────────────────────
// Precedence
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_mul_binds_tighter_than_add() {
    // 1 + 2 * 3 → (+ 1 (* 2 3))
    match expr("1 + 2 * 3") {
        Expr::Binary(add) => {
            assert_eq!(add.operator, BinOp::Add);
            assert_eq!(num_literal(&add.left), 1.0);
            match add.right.as_ref() {
                Expr::Binary(mul) => {
                    assert_eq!(mul.operator, BinOp::Mul);
                    assert_eq!(num_literal(&mul.left), 2.0);
                    assert_eq!(num_literal(&mul.right), 3.0);
                }
                other => panic!("expected multiplication, got {other:?}"),
            }
        }
        other => panic!("expected binary expression, got {other:?}"),
    }
}

#[test]
fn test_parens_override_precedence() {
    // (1 + 2) * 3 → (* (+ 1 2) 3)
    match expr("(1 + 2) * 3") {
        Expr::Binary(mul) => {
            assert_eq!(mul.operator, BinOp::Mul);
            assert!(matches!(mul.left.as_ref(), Expr::Binary(_)));
        }
        other => panic!("expected binary expression, got {other:?}"),
    }
}

#[test]
fn test_add_is_left_associative() {
    // 1 - 2 - 3 → (- (- 1 2) 3)
    match expr("1 - 2 - 3") {
        Expr::Binary(outer) => {
            assert_eq!(outer.operator, BinOp::Sub);
            assert_eq!(num_literal(&outer.right), 3.0);
            assert!(matches!(outer.left.as_ref(), Expr::Binary(_)));
        }
        other => panic!("expected binary expression, got {other:?}"),
    }
}

#[test]
fn test_power_is_right_associative() {
    // 2 ^ 3 ^ 2 → (^ 2 (^ 3 2))
    match expr("2 ^ 3 ^ 2") {
        Expr::Binary(outer) => {
            assert_eq!(outer.operator, BinOp::Pow);
            assert_eq!(num_literal(&outer.left), 2.0);
            assert!(matches!(outer.right.as_ref(), Expr::Binary(_)));
        }
        other => panic!("expected binary expression, got {other:?}"),
    }
}

#[test]
fn test_comparison_binds_looser_than_arithmetic() {
    // x + 1 < y * 2
    match expr("x + 1 < y * 2") {
        Expr::Binary(cmp) => {
            assert_eq!(cmp.operator, BinOp::Less);
            assert!(matches!(cmp.left.as_ref(), Expr::Binary(_)));
            assert!(matches!(cmp.right.as_ref(), Expr::Binary(_)));
        }
        other => panic!("expected binary expression, got {other:?}"),
    }
}

#[test]
fn test_and_or_precedence() {
    // a or b and c → (or a (and b c))
    match expr("a or b and c") {
        Expr::Binary(or) => {
            assert_eq!(or.operator, BinOp::Or);
            match or.right.as_ref() {
                Expr::Binary(and) => assert_eq!(and.operator, BinOp::And),
                other => panic!("expected and, got {other:?}"),
            }
        }
        other => panic!("expected binary expression, got {other:?}"),
    }
}

#[test]
fn test_not_binds_looser_than_comparison() {
    // not a == b → (not (== a b))
    match expr("not a == b") {
        Expr::Unary(unary) => {
            assert_eq!(unary.operator, UnaryOp::Not);
            assert!(matches!(unary.argument.as_ref(), Expr::Binary(_)));
        }
        other => panic!("expected unary expression, got {other:?}"),
    }
}

#[test]
fn test_unary_minus() {
    match expr("-x") {
        Expr::Unary(unary) => {
            assert_eq!(unary.operator, UnaryOp::Neg);
            assert!(matches!(unary.argument.as_ref(), Expr::Identifier(_)));
        }
        other => panic!("expected unary expression, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Postfix: calls, indexing, member access
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_call_with_arguments() {
    match expr("add(1, 2)") {
        Expr::Call(call) => {
            assert_eq!(call.arguments.len(), 2);
        }
        other => panic!("expected CallExpr, got {other:?}"),
    }
}

#[test]
fn test_call_no_arguments() {
    match expr("next()") {
        Expr::Call(call) => assert!(call.arguments.is_empty()),
        other => panic!("expected CallExpr, got {other:?}"),
    }
}

#[test]
fn test_indexing_builds_index_expr() {
    match expr("xs[0]") {
        Expr::Index(index) => {
            assert!(matches!(index.object.as_ref(), Expr::Identifier(_)));
            assert_eq!(num_literal(&index.index), 0.0);
        }
        other => panic!("expected IndexExpr, got {other:?}"),
    }
}

#[test]
fn test_member_access_builds_member_expr() {
    match expr("person.name") {
        Expr::Member(member) => {
            assert_eq!(member.property.name, "name");
        }
        other => panic!("expected MemberExpr, got {other:?}"),
    }
}

#[test]
fn test_call_result_can_be_indexed() {
    // f(1, 2)[0] → Index(Call(f, [1, 2]), 0)
    match expr("f(1, 2)[0]") {
        Expr::Index(index) => match index.object.as_ref() {
            Expr::Call(call) => assert_eq!(call.arguments.len(), 2),
            other => panic!("expected CallExpr object, got {other:?}"),
        },
        other => panic!("expected IndexExpr, got {other:?}"),
    }
}

#[test]
fn test_postfix_chain() {
    // data.rows[1].label
    match expr("data.rows[1].label") {
        Expr::Member(outer) => {
            assert_eq!(outer.property.name, "label");
            assert!(matches!(outer.object.as_ref(), Expr::Index(_)));
        }
        other => panic!("expected MemberExpr, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Literals
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_number_literal_keeps_raw_text() {
    match expr("2.50") {
        Expr::Literal(lit) => {
            assert_eq!(lit.value, LiteralValue::Number(2.5));
            assert_eq!(lit.raw, "2.50");
        }
        other => panic!("expected literal, got {other:?}"),
    }
}

#[test]
fn test_boolean_literals() {
    assert!(matches!(
        expr("true"),
        Expr::Literal(Literal {
            value: LiteralValue::Bool(true),
            ..
        })
    ));
    assert!(matches!(
        expr("false"),
        Expr::Literal(Literal {
            value: LiteralValue::Bool(false),
            ..
        })
    ));
}

#[test]
fn test_array_literal() {
    match expr("[1, 2, 3]") {
        Expr::Array(array) => assert_eq!(array.elements.len(), 3),
        other => panic!("expected ArrayLiteral, got {other:?}"),
    }
}

#[test]
fn test_empty_array_literal() {
    match expr("[]") {
        Expr::Array(array) => assert!(array.elements.is_empty()),
        other => panic!("expected ArrayLiteral, got {other:?}"),
    }
}

#[test]
fn test_object_literal_with_both_key_kinds() {
    match expr("{ name: \"Ada\", \"full name\": \"Ada Lovelace\" }") {
        Expr::Object(object) => {
            assert_eq!(object.properties.len(), 2);
            assert_eq!(object.properties[0].key.name(), "name");
            assert_eq!(object.properties[1].key.name(), "full name");
        }
        other => panic!("expected ObjectLiteral, got {other:?}"),
    }
}

#[test]
fn test_nested_literals() {
    match expr("[{ tags: [\"a\", \"b\"] }]") {
        Expr::Array(array) => {
            assert!(matches!(array.elements[0], Expr::Object(_)));
        }
        other => panic!("expected ArrayLiteral, got {other:?}"),
    }
}

// ─────────────────────────────────────────────────────────────────────
// Wire shape of a parsed tree
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_parsed_tree_serializes_keyed_by_kind() {
    let program = parse_ok("if x > 1 { show x } else { show 0 }");
    let json = serde_json::to_value(&program).unwrap();
    assert_eq!(json["kind"], "Program");
    assert_eq!(json["body"][0]["kind"], "IfStmt");
    assert_eq!(json["body"][0]["condition"]["kind"], "BinaryExpr");
    assert_eq!(json["body"][0]["condition"]["operator"], ">");
    assert!(json["body"][0].get("thenBlock").is_some());
    assert!(json["body"][0].get("elseBlock").is_some());
}

#[test]
fn test_parsed_tree_round_trips_through_json() {
    let program = parse_ok(
        "function greet(name) { return \"hi \" + name } let msg = greet(\"you\") show msg",
    );
    let json = serde_json::to_string(&program).unwrap();
    let back: Program = serde_json::from_str(&json).unwrap();
    assert_eq!(back, program);
}

// ─────────────────────────────────────────────────────────────────────
// Syntax errors
// ─────────────────────────────────────────────────────────────────────

#[test]
fn test_missing_closing_brace() {
    let err = parse_err("if x { show x");
    match err {
        SproutError::SyntaxError {
            message,
            suggestion,
            ..
        } => {
            assert!(message.contains("end of input"));
            assert!(suggestion.is_some());
        }
        other => panic!("expected SyntaxError, got {other:?}"),
    }
}

#[test]
fn test_repeat_without_times() {
    let err = parse_err("repeat 3 { show 1 }");
    match err {
        SproutError::SyntaxError { suggestion, .. } => {
            assert!(suggestion.unwrap().contains("times"));
        }
        other => panic!("expected SyntaxError, got {other:?}"),
    }
}

#[test]
fn test_chained_comparison_is_rejected() {
    let err = parse_err("let ok = 1 < 2 < 3");
    match err {
        SproutError::SyntaxError {
            message,
            suggestion,
            ..
        } => {
            assert!(message.contains("chained"));
            assert!(suggestion.unwrap().contains("and"));
        }
        other => panic!("expected SyntaxError, got {other:?}"),
    }
}

#[test]
fn test_keyword_cannot_be_identifier() {
    let err = parse_err("let repeat = 1");
    assert!(matches!(err, SproutError::SyntaxError { .. }));
}

#[test]
fn test_ask_requires_string_prompt() {
    let err = parse_err("ask 42 into x");
    match err {
        SproutError::SyntaxError { message, .. } => {
            assert!(message.contains("prompt"));
        }
        other => panic!("expected SyntaxError, got {other:?}"),
    }
}

#[test]
fn test_error_reports_three_parts() {
    let err = parse_err("let = 5");
    let report = err.report();
    assert!(report.contains("What happened:"));
    assert!(report.contains("Why it happened:"));
    assert!(report.contains("How to fix it:"));
}
