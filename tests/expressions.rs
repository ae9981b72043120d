use std::fs;

use formula::{
    Formula,
    compiler::shunting_yard::compile,
    error::{ParseError, RuntimeError},
    evaluate,
    machine::{evaluator::Evaluator, functions::NativeFunction},
};
use walkdir::WalkDir;

fn eval(expression: &str) -> f64 {
    evaluate(expression).unwrap_or_else(|e| panic!("'{expression}' failed: {e}"))
}

fn compile_error(expression: &str) -> ParseError {
    match compile(expression) {
        Ok(program) => {
            panic!("'{expression}' compiled to '{program}' but was expected to fail")
        },
        Err(e) => e,
    }
}

fn run_error(expression: &str) -> RuntimeError {
    let program =
        compile(expression).unwrap_or_else(|e| panic!("'{expression}' failed to compile: {e}"));
    match Evaluator::new().run(&program) {
        Ok(value) => {
            panic!("'{expression}' evaluated to {value} but was expected to fail")
        },
        Err(e) => e,
    }
}

#[test]
fn precedence_orders_the_postfix() {
    assert_eq!(compile("1 + 2 * 3").unwrap().to_string(), "1 2 3 * +");
    assert_eq!(eval("1 + 2 * 3"), 7.0);
    assert_eq!(eval("2 + 3 * 4 ^ 2"), 50.0);
    assert_eq!(eval("(1 + 2) * 3"), 9.0);
}

#[test]
fn same_precedence_groups_to_the_left() {
    assert_eq!(eval("10 - 2 - 3"), 5.0);
    assert_eq!(eval("12 / 3 / 2"), 2.0);
    assert_eq!(eval("7 - 2 + 1"), 6.0);
}

#[test]
fn exponentiation_groups_to_the_right() {
    assert_eq!(compile("2 ^ 3 ^ 2").unwrap().to_string(), "2 3 2 ^ ^");
    assert_eq!(eval("2 ^ 3 ^ 2"), 512.0);
    assert_eq!(eval("(2 ^ 3) ^ 2"), 64.0);
}

#[test]
fn unary_minus_in_value_position() {
    assert_eq!(eval("-3 + 5"), 2.0);
    assert_eq!(eval("2 * -3"), -6.0);
    assert_eq!(eval("2 ^ -1"), 0.5);
    assert_eq!(eval("--4"), 4.0);
    assert_eq!(eval("max(-1, 2)"), 2.0);
    assert_eq!(eval("-(1 + 2)"), -3.0);

    // Negation binds tighter than multiplication but looser than `^`.
    assert_eq!(compile("-x * 3").unwrap().to_string(), "x neg 3 *");
    assert_eq!(eval("-2 ^ 2"), -4.0);
}

#[test]
fn logic_and_comparisons() {
    assert_eq!(eval("2 < 3"), 1.0);
    assert_eq!(eval("3 < 2"), 0.0);
    assert_eq!(eval("2 <= 2"), 1.0);
    assert_eq!(eval("3 >= 4"), 0.0);
    assert_eq!(eval("5 > 4"), 1.0);
    assert_eq!(eval("1 = 1"), 1.0);
    assert_eq!(eval("1 != 1"), 0.0);
    assert_eq!(eval("!1"), 0.0);
    assert_eq!(eval("!0"), 1.0);
    assert_eq!(eval("!(2 < 1)"), 1.0);

    assert_eq!(eval("(1 < 2) & (3 > 2)"), 1.0);
    assert_eq!(eval("(1 > 2) | (3 > 2)"), 1.0);

    // Comparisons bind looser than arithmetic, logic looser still.
    assert_eq!(eval("1 + 1 = 2"), 1.0);
    assert_eq!(eval("0 & 1 | 1"), 1.0);
    assert_eq!(compile("1 < 2 & 3 < 4").unwrap().to_string(), "1 2 < 3 4 < &");
}

#[test]
fn redundant_grouping_compiles_identically() {
    let flat = compile("1 + 2 * 3").unwrap();

    assert_eq!(compile("(1 + 2 * 3)").unwrap(), flat);
    assert_eq!(compile("((1 + 2 * 3))").unwrap(), flat);
    assert_eq!(compile("(((1 + 2 * 3)))").unwrap().to_string(), flat.to_string());
}

#[test]
fn builtin_functions() {
    assert_eq!(eval("sin(0)"), 0.0);
    assert_eq!(eval("cos(0)"), 1.0);
    assert_eq!(eval("sqrt(81)"), 9.0);
    assert_eq!(eval("abs(-5)"), 5.0);
    assert_eq!(eval("floor(3.7)"), 3.0);
    assert_eq!(eval("ceil(3.2)"), 4.0);
    assert_eq!(eval("pow(2, 10)"), 1024.0);
    assert_eq!(eval("atan2(0, 1)"), 0.0);
    assert_eq!(eval("log(1)"), 0.0);
    assert_eq!(eval("log2(8)"), 3.0);
    assert_eq!(eval("log10(1000)"), 3.0);
    assert_eq!(eval("exp(0)"), 1.0);
    assert_eq!(eval("min(3, 5)"), 3.0);
    assert_eq!(eval("max(3, 5)"), 5.0);

    // C-style remainder: the sign follows the dividend.
    assert_eq!(eval("mod(7, 3)"), 1.0);
    assert_eq!(eval("mod(-7, 3)"), -1.0);

    assert_eq!(eval("max(min(10, 20), 5)"), 10.0);
    assert_eq!(eval("max (1, 2)"), 2.0);
}

#[test]
fn call_arity_is_compiled_in() {
    assert_eq!(compile("sin(1)").unwrap().to_string(), "1 sin:1");
    assert_eq!(compile("max(1, 2)").unwrap().to_string(), "1 2 max:2");

    // `max(1)` compiles with arity 1; the registry disagrees at run time.
    assert!(matches!(run_error("max(1)"),
                     RuntimeError::ArgumentCountMismatch { name, expected: 2, found: 1 }
                     if name == "max"));
    assert!(matches!(run_error("bark(1)"),
                     RuntimeError::UnknownFunction { name } if name == "bark"));
}

#[test]
fn too_many_arguments_is_a_compile_error() {
    assert!(matches!(compile_error("max(1, 2, 3)"),
                     ParseError::TooManyArguments { name, count: 3 } if name == "max"));
    assert!(matches!(compile_error("sin(1, 2, 3, 4)"),
                     ParseError::TooManyArguments { name, count: 4 } if name == "sin"));
}

#[test]
fn unbalanced_parens_are_errors() {
    assert!(matches!(compile_error("(1 + 2"), ParseError::MissingCloseParen));
    assert!(matches!(compile_error("max(1, 2"), ParseError::MissingCloseParen));
    assert!(matches!(compile_error("1 + 2)"), ParseError::UnmatchedCloseParen));
}

#[test]
fn malformed_numbers_are_errors() {
    assert!(matches!(compile_error("1."),
                     ParseError::ExpectedDigitAfterDot { literal } if literal == "1."));
    assert!(matches!(compile_error("3 + 1."),
                     ParseError::ExpectedDigitAfterDot { literal } if literal == "1."));
    assert!(matches!(compile_error("."),
                     ParseError::ExpectedDigitAfterDot { literal } if literal == "."));
}

#[test]
fn number_literals_scan_as_single_tokens() {
    use formula::compiler::lexer::{Token, tokenize};

    for literal in ["12", "1.5", ".5", "2e5", "1.25e-2", "1.5e"] {
        let tokens = tokenize(literal).unwrap_or_else(|e| panic!("'{literal}' failed: {e}"));
        assert_eq!(tokens, vec![Token::Number(literal.to_string())], "'{literal}'");
    }

    // A dot with no digit after it is a scan error, not a number token.
    assert!(matches!(tokenize("1."),
                     Err(ParseError::ExpectedDigitAfterDot { literal }) if literal == "1."));
}

#[test]
fn bare_exponent_markers_are_tolerated() {
    assert_eq!(eval("1.5e"), 1.5);
    assert_eq!(eval("2e+"), 2.0);
    assert_eq!(eval("2e3"), 2000.0);
    assert_eq!(eval("1.25e2"), 125.0);
    assert_eq!(eval(".5"), 0.5);
}

#[test]
fn invalid_characters_are_named() {
    assert!(matches!(compile_error("1 # 2"), ParseError::InvalidCharacter { character: '#' }));
    assert!(matches!(compile_error("$x"), ParseError::InvalidCharacter { character: '$' }));
    assert!(matches!(compile_error("a ? b"), ParseError::InvalidCharacter { character: '?' }));
}

#[test]
fn comma_outside_a_call_is_an_error() {
    assert!(matches!(compile_error("1, 2"), ParseError::MisplacedComma));
    assert!(matches!(compile_error("(1, 2)"), ParseError::MisplacedComma));
    assert!(matches!(compile_error("max((1, 2))"), ParseError::MisplacedComma));
}

#[test]
fn variables_resolve_at_run_time() {
    let mut formula = Formula::new("x ^ 2 + y").unwrap();
    formula.set_variable("x", 3.0);
    formula.set_variable("y", 1.0);
    assert_eq!(formula.evaluate().unwrap(), 10.0);

    formula.set_variable("x", 4.0);
    assert_eq!(formula.evaluate().unwrap(), 17.0);

    formula.set_variable("_gain", 2.5);
    formula.set_expression("_gain * 2").unwrap();
    assert_eq!(formula.evaluate().unwrap(), 5.0);

    assert!(matches!(run_error("q + 1"), RuntimeError::UnknownVariable { name } if name == "q"));
}

fn always_nine(_x: f64) -> f64 {
    9.0
}

#[test]
fn registry_rebinds_and_resets() {
    let mut formula = Formula::new("sin(2)").unwrap();
    formula.register_function("sin", NativeFunction::Unary(always_nine));
    assert_eq!(formula.evaluate().unwrap(), 9.0);

    // Replacing the expression restores the default table.
    formula.set_expression("sin(0)").unwrap();
    assert_eq!(formula.evaluate().unwrap(), 0.0);

    formula.evaluator_mut().functions_mut().clear();
    assert!(matches!(formula.evaluate().unwrap_err(),
                     RuntimeError::UnknownFunction { name } if name == "sin"));
}

#[test]
fn scratch_memory_round_trips() {
    assert_eq!(eval("write(5, 100)"), 0.0);
    assert_eq!(eval("read(100)"), 5.0);

    // Write and read back within one program.
    assert_eq!(eval("write(7, 101) + read(101)"), 7.0);

    // Addresses truncate toward zero.
    assert_eq!(eval("write(9, 102.9)"), 0.0);
    assert_eq!(eval("read(102)"), 9.0);
}

#[test]
fn scratch_memory_out_of_range_is_a_sentinel() {
    assert_eq!(eval("read(-1)"), -10.0);
    assert_eq!(eval("read(441000)"), -10.0);
    assert_eq!(eval("write(5, -1)"), -10.0);
    assert_eq!(eval("write(5, 441000)"), -10.0);

    // The last valid cell is fine, and still zero: nothing here writes it.
    assert_eq!(eval("read(440999)"), 0.0);
}

#[test]
fn instances_share_the_scratch_cells() {
    let writer = Formula::new("write(42, 103)").unwrap();
    let reader = Formula::new("read(103)").unwrap();

    assert_eq!(writer.evaluate().unwrap(), 0.0);
    assert_eq!(reader.evaluate().unwrap(), 42.0);
}

#[test]
fn empty_expression_produces_nothing() {
    assert!(compile("").unwrap().is_empty());
    assert!(compile("  \t ").unwrap().is_empty());
    assert!(matches!(run_error(""), RuntimeError::MissingResult));
}

#[test]
fn operand_starvation_is_reported() {
    assert!(matches!(run_error("1 +"),
                     RuntimeError::StackUnderflow { instruction } if instruction == "+"));

    // An empty argument list still compiles to arity 1.
    assert!(matches!(run_error("sin()"),
                     RuntimeError::StackUnderflow { instruction } if instruction == "sin:1"));
}

#[test]
fn loose_sequences_are_tolerated_until_run_time() {
    // The implicit outer parentheses make this balance as `(1)(2)`.
    assert!(compile("1)(2").is_ok());

    // Two adjacent values compile; the later one ends up on top.
    assert_eq!(eval("1 2"), 2.0);

    // `==` is two equality tokens; the second one starves.
    assert!(matches!(run_error("1 == 1"), RuntimeError::StackUnderflow { .. }));
}

#[test]
fn division_by_zero_is_infinite() {
    assert_eq!(eval("1 / 0"), f64::INFINITY);
    assert_eq!(eval("-1 / 0"), f64::NEG_INFINITY);
}

#[test]
fn postfix_display_is_normalized() {
    assert_eq!(compile("write(read(10) * 0.5, 10)").unwrap().to_string(),
               "10 read:1 0.5 * 10 write:2");
    assert_eq!(compile("a + b * c").unwrap().to_string(), "a b c * +");
}

#[test]
fn demo_scripts_work() {
    let mut count = 0;

    for entry in
        WalkDir::new("demos").into_iter()
                             .filter_map(Result::ok)
                             .filter(|e| e.path().extension().is_some_and(|ext| ext == "formula"))
    {
        let path = entry.path();
        let contents =
            fs::read_to_string(path).unwrap_or_else(|e| panic!("Failed to read {path:?}: {e}"));

        count += 1;
        let mut formula = match Formula::new(contents.trim()) {
            Ok(formula) => formula,
            Err(e) => panic!("Demo {path:?} failed to compile: {e}"),
        };
        formula.set_variable("x", 0.25);
        formula.set_variable("y", 0.75);
        formula.set_variable("t", 0.5);

        match formula.evaluate() {
            Ok(value) => assert!(value.is_finite(), "Demo {path:?} produced {value}"),
            Err(e) => panic!("Demo {path:?} failed to evaluate: {e}"),
        }
    }

    assert!(count > 0, "No demo scripts found in demos/");
}
