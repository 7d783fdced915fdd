use glint_par::{parse, Expr, Literal, Stmt};

fn parse_ok(source: &str) -> Vec<Stmt> {
    let tokens = glint_lex::scan(source).expect("source should scan");
    parse(tokens).expect("source should parse")
}

#[test]
fn empty_program_parses_to_no_statements() {
    assert!(parse_ok("").is_empty());
}

#[test]
fn var_decl_with_initializer() {
    let stmts = parse_ok("dec x = 1;");
    assert_eq!(stmts.len(), 1);
    match &stmts[0] {
        Stmt::Var(name, Some(Expr::Literal(Literal::Number(n)))) => {
            assert_eq!(name.lexeme, "x");
            assert_eq!(*n, 1.0);
        }
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn var_decl_without_initializer() {
    let stmts = parse_ok("dec x;");
    match &stmts[0] {
        Stmt::Var(name, None) => assert_eq!(name.lexeme, "x"),
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn short_declaration_desugars_to_var_with_initializer() {
    let stmts = parse_ok("x := 5;");
    match &stmts[0] {
        Stmt::Var(name, Some(_)) => assert_eq!(name.lexeme, "x"),
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn function_decl_with_params_and_body() {
    let stmts = parse_ok("fn add(a, b) { return a + b; }");
    match &stmts[0] {
        Stmt::Function(decl) => {
            assert_eq!(decl.name.lexeme, "add");
            assert_eq!(decl.params.len(), 2);
            assert_eq!(decl.body.len(), 1);
        }
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn if_without_braces_parses_as_a_single_statement_branch() {
    // The grammar allows `ifStmt := 'if' expression statement (...)`, so a
    // bare non-block statement is a legal branch, not just `{ ... }`.
    let stmts = parse_ok("if true print 1;");
    match &stmts[0] {
        Stmt::If(_, then_branch, None) => {
            assert!(matches!(**then_branch, Stmt::Print(_)));
        }
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn if_else_chain() {
    let stmts = parse_ok("if true { print 1; } else if false { print 2; } else { print 3; }");
    match &stmts[0] {
        Stmt::If(_, _, Some(else_branch)) => {
            assert!(matches!(**else_branch, Stmt::If(..)));
        }
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn while_loop_with_break_and_continue() {
    let stmts = parse_ok("while true { break; continue; }");
    match &stmts[0] {
        Stmt::While(_, body) => match &**body {
            Stmt::Block(inner) => {
                assert!(matches!(inner[0], Stmt::Break { .. }));
                assert!(matches!(inner[1], Stmt::Continue { .. }));
            }
            other => panic!("unexpected body: {other:?}"),
        },
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn return_with_and_without_value() {
    let stmts = parse_ok("fn f() { return; } fn g() { return 1; }");
    let Stmt::Function(f) = &stmts[0] else { panic!("expected function") };
    assert!(matches!(f.body[0], Stmt::Return { value: None, .. }));
    let Stmt::Function(g) = &stmts[1] else { panic!("expected function") };
    assert!(matches!(g.body[0], Stmt::Return { value: Some(_), .. }));
}

#[test]
fn assignment_to_a_variable() {
    let stmts = parse_ok("dec x = 1; x = 2;");
    match &stmts[1] {
        Stmt::Expr(Expr::Assignment(_, name, _)) => assert_eq!(name.lexeme, "x"),
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn short_declarator_also_works_as_an_assignment_operator_in_expression_position() {
    // At the start of a statement, `x := 2;` is the short-declaration
    // statement (re-declaring `x`). Inside an expression already in
    // progress — here, `print`'s operand — the same token is parsed by
    // `assignment`'s own `':='` arm instead.
    let stmts = parse_ok("dec x = 1; print x := 2;");
    match &stmts[1] {
        Stmt::Print(Expr::Assignment(_, name, _)) => assert_eq!(name.lexeme, "x"),
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn assignment_to_a_non_variable_is_a_parse_error() {
    let tokens = glint_lex::scan("1 = 2;").unwrap();
    assert!(parse(tokens).is_err());
}

#[test]
fn call_expression_with_arguments() {
    let stmts = parse_ok("f(1, 2, 3);");
    match &stmts[0] {
        Stmt::Expr(Expr::Call { args, .. }) => assert_eq!(args.len(), 3),
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn chained_calls_are_left_associative() {
    let stmts = parse_ok("f()();");
    match &stmts[0] {
        Stmt::Expr(Expr::Call { callee, .. }) => {
            assert!(matches!(**callee, Expr::Call { .. }));
        }
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn precedence_climbs_correctly() {
    // 1 + 2 * 3 must parse as 1 + (2 * 3), i.e. the top-level node is `+`.
    let stmts = parse_ok("print 1 + 2 * 3;");
    match &stmts[0] {
        Stmt::Print(Expr::Binary(_, op, rhs)) => {
            assert_eq!(op.lexeme, "+");
            assert!(matches!(**rhs, Expr::Binary(..)));
        }
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn logical_operators_bind_looser_than_equality() {
    let stmts = parse_ok("print 1 == 1 && 2 == 2;");
    match &stmts[0] {
        Stmt::Print(Expr::Logical(lhs, op, rhs)) => {
            assert_eq!(op.lexeme, "&&");
            assert!(matches!(**lhs, Expr::Binary(..)));
            assert!(matches!(**rhs, Expr::Binary(..)));
        }
        other => panic!("unexpected statement: {other:?}"),
    }
}

#[test]
fn every_variable_reference_gets_a_distinct_node_id() {
    let stmts = parse_ok("dec x = 1; print x; print x;");
    let mut ids = Vec::new();
    for stmt in &stmts {
        if let Stmt::Print(Expr::Variable(id, _)) = stmt {
            ids.push(*id);
        }
    }
    assert_eq!(ids.len(), 2);
    assert_ne!(ids[0], ids[1]);
}

#[test]
fn missing_semicolon_is_a_parse_error_that_still_reports_a_line() {
    let tokens = glint_lex::scan("dec x = 1\ndec y = 2;").unwrap();
    let err = parse(tokens).unwrap_err();
    assert_eq!(err.0.len(), 1);
    assert_eq!(err.0[0].line, 2);
}

#[test]
fn multiple_bad_declarations_are_all_reported() {
    let tokens = glint_lex::scan("dec ; dec ; dec x = 1;").unwrap();
    let err = parse(tokens).unwrap_err();
    assert!(err.0.len() >= 2);
}

#[test]
fn parsing_is_deterministic() {
    let source = "fn fib(n) { if n < 2 { return n; } return fib(n - 1) + fib(n - 2); }";
    let a = format!("{:?}", parse_ok(source));
    let b = format!("{:?}", parse_ok(source));
    assert_eq!(a, b);
}
