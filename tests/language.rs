use std::{
    str::FromStr,
    time::{Duration, Instant},
};

use decalc::{
    BigDecimal, Calculator, ErrorKind, EvalError,
    error::{DomainError, OperationError, ParseError},
    evaluate,
    interpreter::parser::core::MAX_NESTING,
    util::num::to_plain_string,
};
use rstest::rstest;

fn assert_success(src: &str, expected: &str) {
    match evaluate(src) {
        Ok(value) => assert_eq!(to_plain_string(&value), expected, "`{src}`"),
        Err(e) => panic!("`{src}` failed: {e}"),
    }
}

fn assert_failure(src: &str, kind: ErrorKind) -> EvalError {
    match evaluate(src) {
        Ok(value) => panic!("`{src}` evaluated to {} but was expected to fail", to_plain_string(&value)),
        Err(e) => {
            assert_eq!(e.kind(), kind, "`{src}` failed with {e}");
            e
        },
    }
}

#[rstest]
#[case::multiplication_binds_tighter("2+3*4", "14")]
#[case::groups_override_precedence("(2+3)*4", "20")]
#[case::subtraction_is_left_associative("10-4-3", "3")]
#[case::division_is_left_associative("100/10/5", "2")]
#[case::power_shares_the_multiplicative_level("2^3*2", "16")]
#[case::power_is_left_associative("2^3^2", "64")]
#[case::percent_binds_like_multiplication("3 + 50 % 10", "8")]
#[case::nested_groups("((1 + 2) * (3 + 4)) - 1", "20")]
#[case::whitespace_is_ignored(" \t1 +\n 2 ", "3")]
fn precedence_and_associativity(#[case] src: &str, #[case] expected: &str) {
    assert_success(src, expected);
}

#[rstest]
#[case::leading_minus("-5+3", "-2")]
#[case::leading_plus("+4", "4")]
#[case::minus_after_minus("5- -3", "8")]
#[case::separated_signs("5 - - 3", "8")]
#[case::sign_inside_group("(-2)*3", "-6")]
#[case::sign_after_operator("2*-3", "-6")]
#[case::sign_in_argument("SQRT(+9)", "3")]
#[case::negative_exponent("2^-1", "0.5")]
#[case::leading_dot("-.5*2", "-1")]
#[case::trailing_dot("2.*3", "6")]
fn signed_literals(#[case] src: &str, #[case] expected: &str) {
    assert_success(src, expected);
}

#[rstest]
#[case::exact_tenths("0.1+0.2", "0.3")]
#[case::one_third("1/3", "0.3333333333333333333333333333333333")]
#[case::two_thirds("2/3", "0.6666666666666666666666666666666667")]
#[case::third_times_three("1/3*3", "0.9999999999999999999999999999999999")]
#[case::root_of_two_squared("SQRT(2)*SQRT(2)", "2")]
#[case::integer_power("2^10", "1024")]
#[case::truncated_exponent("2^3.9", "8")]
#[case::percent_of("50%200", "100")]
#[case::square_root("SQRT(16)", "4")]
#[case::square_root_of_zero("SQRT(0)", "0")]
#[case::remainder("REMAINDER(10, 3)", "1")]
#[case::remainder_takes_dividend_sign("REMAINDER(-7, 3)", "-1")]
#[case::average_of_two("AVG(1, 2)", "1.5")]
#[case::average_of_many("AVG(2, 4, 9)", "5")]
#[case::arguments_are_expressions("AVG(1+1, 2*3, SQRT(16))", "4")]
fn arithmetic(#[case] src: &str, #[case] expected: &str) {
    assert_success(src, expected);
}

#[rstest]
#[case::division_by_zero("1/0")]
#[case::division_by_decimal_zero("5/(2-2.0)")]
#[case::negative_root("SQRT(-1)")]
#[case::zero_to_zero("0^0")]
#[case::remainder_by_zero("REMAINDER(1, 0)")]
fn domain_errors(#[case] src: &str) {
    assert_failure(src, ErrorKind::Domain);
}

#[rstest]
#[case::average_of_one("AVG(5)")]
#[case::average_of_none("AVG()")]
#[case::root_of_two_values("SQRT(1, 2)")]
#[case::root_of_nothing("SQRT()")]
#[case::remainder_of_three("REMAINDER(1, 2, 3)")]
fn arity_errors(#[case] src: &str) {
    assert_failure(src, ErrorKind::Arity);
}

#[test]
fn unknown_names_are_operation_errors() {
    let err = assert_failure("1 + FOO(2)", ErrorKind::UnknownOperation);
    assert_eq!(err.offset(), Some(4));

    assert_failure("PI", ErrorKind::UnknownOperation);
    assert_failure("ANS(1)", ErrorKind::UnknownOperation);
}

#[test]
fn invalid_characters_are_lexical_errors() {
    let err = assert_failure("2#3", ErrorKind::Lexical);
    assert_eq!(err.offset(), Some(1));
    assert_eq!(err.to_string(), "invalid character '#' at offset 1");

    assert_failure(".", ErrorKind::Lexical);
}

#[rstest]
#[case::empty("", None)]
#[case::blank("   ", None)]
#[case::dangling_operator("2+", Some(2))]
#[case::leading_operator("*3", Some(0))]
#[case::adjacent_numbers("2 3", Some(2))]
#[case::unbalanced_close("2+3)", Some(3))]
#[case::leading_zeros("007", Some(1))]
#[case::unclosed_group("(2+3", Some(4))]
#[case::unclosed_call("SQRT(4", Some(6))]
#[case::missing_separator("AVG(1 2)", Some(6))]
#[case::trailing_comma("AVG(1,)", Some(6))]
fn syntax_errors(#[case] src: &str, #[case] offset: Option<usize>) {
    let err = assert_failure(src, ErrorKind::Syntax);
    assert_eq!(err.offset(), offset, "`{src}`: {err}");
}

#[test]
fn ans_chains_results() {
    let mut calculator = Calculator::new();

    assert_eq!(calculator.evaluate("3*3").unwrap(), BigDecimal::from(9));
    assert_eq!(calculator.evaluate("ANS+1").unwrap(), BigDecimal::from(10));
    assert_eq!(calculator.evaluate("ANS * ANS").unwrap(), BigDecimal::from(100));
}

#[test]
fn failed_evaluation_leaves_ans_alone() {
    let mut calculator = Calculator::new();
    calculator.evaluate("12").unwrap();

    assert!(calculator.evaluate("ANS/0").is_err());
    assert_eq!(calculator.evaluate("ANS").unwrap(), BigDecimal::from(12));
}

#[test]
fn evaluation_is_deterministic() {
    let mut calculator = Calculator::new();
    let first = calculator.evaluate("AVG(1, 2, 2) ^ 3 - 1/7").unwrap();
    let second = calculator.evaluate("AVG(1, 2, 2) ^ 3 - 1/7").unwrap();

    assert_eq!(first, second);
    assert_eq!(to_plain_string(&first), to_plain_string(&second));
}

#[test]
fn results_keep_34_significant_digits() {
    let value = evaluate("7/3").unwrap();

    assert_eq!(value, BigDecimal::from_str("2.333333333333333333333333333333333").unwrap());
}

#[rstest]
#[case::huge_chain("((10^999999999)^999999999)^10")]
#[case::tiny_chain("((0.1^999999999)^999999999)^10")]
#[case::huge_product("(10^999999999)^999999999 * 2")]
fn unrepresentable_powers_are_domain_errors(#[case] src: &str) {
    let err = assert_failure(src, ErrorKind::Domain);

    assert!(matches!(err,
                     EvalError::Operation(OperationError::Domain { reason: DomainError::Overflow, .. })),
            "`{src}`: {err}");
}

#[rstest]
#[case::small_on_the_right("10^99999999 + 0.1")]
#[case::small_on_the_left("0.1 + 10^99999999")]
#[case::subtraction("10^99999999 - 0.1")]
fn sums_of_distant_magnitudes_finish_quickly(#[case] src: &str) {
    let started = Instant::now();
    let value = evaluate(src).unwrap();

    assert!(started.elapsed() < Duration::from_secs(5), "`{src}` took {:?}", started.elapsed());
    assert_eq!(value, BigDecimal::from_str("1e99999999").unwrap());
}

#[test]
fn deep_nesting_is_a_syntax_error() {
    let depth = 20_000;
    let src = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));

    let err = assert_failure(&src, ErrorKind::Syntax);
    assert_eq!(err, EvalError::Syntax(ParseError::NestingTooDeep { limit:  MAX_NESTING,
                                                                   offset: MAX_NESTING, }));
}

#[test]
fn nesting_within_the_limit_evaluates() {
    let depth = MAX_NESTING - 1;
    let src = format!("{}1{}", "(".repeat(depth), ")".repeat(depth));
    assert_success(&src, "1");

    let calls = format!("{}1{}", "SQRT(".repeat(depth), ")".repeat(depth));
    assert_success(&calls, "1");
}
