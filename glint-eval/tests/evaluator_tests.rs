fn run(source: &str) -> Result<String, String> {
    let tokens = glint_lex::scan(source).map_err(|e| e.to_string())?;
    let stmts = glint_par::parse(tokens).map_err(|e| e.to_string())?;
    let map = glint_sem::resolve(&stmts).map_err(|e| e.to_string())?;

    let (output, result) = glint_eval::evaluate(&stmts, map);
    result.map_err(|e| e.to_string())?;
    Ok(String::from_utf8(output).unwrap())
}

fn run_ok(source: &str) -> String {
    run(source).unwrap_or_else(|e| panic!("expected {source:?} to run, got error: {e}"))
}

fn run_err(source: &str) -> String {
    run(source).unwrap_err()
}

#[test]
fn empty_source_produces_no_output() {
    assert_eq!(run_ok(""), "");
}

#[test]
fn scenario_print_a_declared_variable() {
    assert_eq!(run_ok("dec a = 1; print a;"), "1\n");
}

#[test]
fn scenario_recursive_fibonacci() {
    assert_eq!(
        run_ok("fn fib(n) { if n < 2 { return n; } return fib(n-1) + fib(n-2); } print fib(10);"),
        "55\n"
    );
}

#[test]
fn scenario_while_loop_counts_up() {
    assert_eq!(run_ok("dec a = 0; while a < 3 { print a; a = a + 1; }"), "0\n1\n2\n");
}

#[test]
fn scenario_closure_captures_declaration_environment() {
    assert_eq!(run_ok("fn make(x) { fn get() { return x; } return get; } dec g = make(7); print g();"), "7\n");
}

#[test]
fn scenario_block_scoping_shadows_then_restores() {
    assert_eq!(run_ok("dec a = 1; { dec a = 2; print a; } print a;"), "2\n1\n");
}

#[test]
fn scenario_break_at_top_level_is_rejected_before_execution() {
    let err = run_err("break;");
    assert!(err.contains("break"));
}

#[test]
fn scenario_adding_string_and_number_is_a_runtime_error_at_its_line() {
    let err = run_err("print \"a\" + 1;");
    assert!(err.contains("line 1"));
}

#[test]
fn print_null_renders_as_null() {
    assert_eq!(run_ok("print null;"), "null\n");
}

#[test]
fn print_zero_renders_as_zero_and_is_truthy() {
    assert_eq!(run_ok("print 0; if 0 { print \"truthy\"; }"), "0\ntruthy\n");
}

#[test]
fn division_by_zero_is_a_runtime_error() {
    let err = run_err("print 1 / 0;");
    assert!(err.contains("division by zero"));
}

#[test]
fn modulus_by_zero_is_a_runtime_error() {
    let err = run_err("print 1 % 0;");
    assert!(err.contains("division by zero"));
}

#[test]
fn if_with_null_condition_takes_the_else_branch() {
    assert_eq!(run_ok("if null { print \"then\"; } else { print \"else\"; }"), "else\n");
}

#[test]
fn comments_contribute_no_observable_behavior() {
    assert_eq!(run_ok("# a comment\nprint 1; # trailing\n"), "1\n");
}

#[test]
fn double_negation_preserves_truthiness() {
    for (source, expected) in [("print !!0;", "true\n"), ("print !!null;", "false\n"), ("print !!\"\";", "true\n")] {
        assert_eq!(run_ok(source), expected);
    }
}

#[test]
fn string_concatenation_and_numeric_addition_both_use_plus() {
    assert_eq!(run_ok("print \"a\" + \"b\"; print 1 + 2;"), "ab\n3\n");
}

#[test]
fn break_exits_a_while_loop_on_first_iteration() {
    assert_eq!(run_ok("dec a = 0; while true { a = 1; break; } print a;"), "1\n");
}

#[test]
fn continue_skips_the_rest_of_the_loop_body() {
    assert_eq!(
        run_ok("dec a = 0; dec sum = 0; while a < 5 { a = a + 1; if a == 3 { continue; } sum = sum + a; } print sum;"),
        "12\n"
    );
}

#[test]
fn reassigning_an_outer_variable_through_a_closure_is_visible_after_the_call() {
    assert_eq!(
        run_ok("dec a = 1; fn bump() { a = a + 1; } bump(); bump(); print a;"),
        "3\n"
    );
}

#[test]
fn calling_with_the_wrong_number_of_arguments_is_a_runtime_error() {
    let err = run_err("fn f(a, b) { return a + b; } print f(1);");
    assert!(err.contains("argument"));
}

#[test]
fn calling_a_non_callable_value_is_a_runtime_error() {
    let err = run_err("dec a = 1; a();");
    assert!(err.contains("not callable"));
}

#[test]
fn logical_operators_short_circuit_and_return_the_operand_not_a_coerced_bool() {
    assert_eq!(run_ok("print 1 || 2; print null && 2; print 0 || 5;"), "1\nnull\n0\n");
}

#[test]
fn builtin_min_and_max_require_numbers() {
    assert_eq!(run_ok("print min(3, 5); print max(3, 5);"), "3\n5\n");
    assert!(run("print min(\"a\", 1);").is_err());
}

#[test]
fn builtin_clock_returns_a_number() {
    assert_eq!(run_ok("print clock() >= 0;"), "true\n");
}

#[test]
fn equality_follows_the_null_and_kind_rules() {
    assert_eq!(
        run_ok("print null == null; print null == 1; print 1 == 1; print 1 == \"1\"; print 1 <> 2;"),
        "true\nfalse\ntrue\nfalse\ntrue\n"
    );
}

#[test]
fn pure_function_is_referentially_transparent_across_calls() {
    assert_eq!(run_ok("fn sq(x) { return x * x; } print sq(4); print sq(4);"), "16\n16\n");
}

#[test]
fn nested_function_declared_inside_a_block_captures_that_blocks_environment() {
    assert_eq!(run_ok("{ dec x = 9; fn get() { return x; } print get(); }"), "9\n");
}
