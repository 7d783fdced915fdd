use proptest::prelude::*;

fn run_ok(source: &str) -> String {
    let tokens = glint_lex::scan(source).expect("source should scan");
    let stmts = glint_par::parse(tokens).expect("source should parse");
    let map = glint_sem::resolve(&stmts).expect("source should resolve");
    let (output, result) = glint_eval::evaluate(&stmts, map);
    result.expect("source should run");
    String::from_utf8(output).unwrap()
}

fn literal_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("null".to_string()),
        Just("true".to_string()),
        Just("false".to_string()),
        any::<i32>().prop_map(|n| n.to_string()),
    ]
}

proptest! {
    /// `!(!(x))` and `x` have identical truthiness for any literal `x`.
    #[test]
    fn double_negation_preserves_truthiness(literal in literal_strategy()) {
        let direct = run_ok(&format!("print !{literal};"));
        let double_negated = run_ok(&format!("print !!{literal};"));
        let negated_direct = format!("{}\n", direct.trim() == "false");
        prop_assert_eq!(double_negated, negated_direct);
    }

    /// Adding two arbitrary numbers through the pipeline matches plain
    /// IEEE-754 addition.
    #[test]
    fn numeric_addition_matches_ieee754(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
        let output = run_ok(&format!("print {a} + {b};"));
        let expected = format!("{}\n", (a + b) as f64);
        prop_assert_eq!(output, expected);
    }

    /// A pure function returns equal values for equal arguments across
    /// repeated calls.
    #[test]
    fn pure_function_is_referentially_transparent(n in 0i64..1000) {
        let output = run_ok(&format!(
            "fn sq(x) {{ return x * x; }} print sq({n}) == sq({n});"
        ));
        prop_assert_eq!(output, "true\n");
    }
}
