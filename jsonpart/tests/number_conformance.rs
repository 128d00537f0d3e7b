// SPDX-License-Identifier: Apache-2.0

// Table-driven checks of the numeric getters against the standard library parsers

use jsonpart::{
    parse_f64, parse_f64_best_effort, parse_i64, parse_i64_best_effort, parse_u64,
    parse_u64_best_effort, NumberError, Parser,
};

/// Every float in this table must convert exactly like `str::parse::<f64>`.
macro_rules! float_matches_std {
    ($($name:ident => $text:expr),* $(,)?) => {
        $(
            paste::paste! {
                #[test]
                fn [<test_float_ $name>]() {
                    let expected: f64 = $text.parse().unwrap();
                    assert_eq!(parse_f64($text), Ok(expected), "parsing {:?}", $text);
                    assert_eq!(parse_f64_best_effort($text).to_bits(), expected.to_bits());

                    let json = format!("[{}]", $text);
                    let mut parser = Parser::new();
                    let root = parser.parse(&json).unwrap();
                    assert_eq!(root.get_f64(&["0"]).to_bits(), expected.to_bits());
                }
            }
        )*
    };
}

float_matches_std! {
    zero => "0",
    negative_zero => "-0",
    small_int => "42",
    simple_fraction => "3.25",
    tenth => "0.1",
    third => "0.3333333333333333",
    exp_positive => "1.5e10",
    exp_negative => "2.5E-3",
    exp_plus_sign => "7e+2",
    eighteen_digits => "123456789012345678",
    nineteen_digits => "1234567890123456789",
    long_fraction => "0.12345678901234567890123",
    many_fraction_digits => "1.00000000000000000000000001",
    pow_table_edge => "1e22",
    past_pow_table => "1e23",
    huge_mantissa_scaled => "9007199254740993e-3",
    large_exponent => "1.7976931348623157e308",
    tiny => "5e-324",
    underflow => "1e-400",
    overflow => "1e400",
    negative_overflow => "-1e400",
    leading_plus => "+12.5",
}

/// Texts that both numeric parsers reject, with the reported error.
macro_rules! float_rejects {
    ($($name:ident => $text:expr, $error:expr),* $(,)?) => {
        $(
            paste::paste! {
                #[test]
                fn [<test_float_rejects_ $name>]() {
                    assert_eq!(parse_f64($text), Err($error));
                    assert_eq!(parse_f64_best_effort($text), 0.0);
                }
            }
        )*
    };
}

float_rejects! {
    empty => "", NumberError::Empty,
    minus_only => "-", NumberError::SignOnly,
    plus_only => "+", NumberError::SignOnly,
    dot_only => ".", NumberError::MissingDigits,
    signed_dot => "-.", NumberError::MissingDigits,
    double_dot => "1.2.3", NumberError::UnparsedTail,
    missing_exponent => "1e", NumberError::InvalidExponent,
    signed_missing_exponent => "1e+", NumberError::InvalidExponent,
    letters => "abc", NumberError::InvalidDigit,
    trailing_letter => "12x", NumberError::UnparsedTail,
}

#[test]
fn test_elided_parts() {
    assert_eq!(parse_f64(".5"), Ok(0.5));
    assert_eq!(parse_f64("-.25"), Ok(-0.25));
    assert_eq!(parse_f64("5."), Ok(5.0));
}

#[test]
fn test_special_tokens() {
    assert_eq!(parse_f64("inf"), Ok(f64::INFINITY));
    assert_eq!(parse_f64("-Infinity"), Ok(f64::NEG_INFINITY));
    assert_eq!(parse_f64("+INF"), Ok(f64::INFINITY));
    assert!(parse_f64("NaN").unwrap().is_nan());
    assert!(parse_f64("nana").is_err());
}

macro_rules! int_cases {
    ($($name:ident => $text:expr),* $(,)?) => {
        $(
            paste::paste! {
                #[test]
                fn [<test_int_ $name>]() {
                    let expected_i64 = $text.parse::<i64>();
                    let expected_u64 = $text.parse::<u64>();
                    assert_eq!(parse_i64($text).ok(), expected_i64.clone().ok(), "i64 {:?}", $text);
                    assert_eq!(parse_u64($text).ok(), expected_u64.clone().ok(), "u64 {:?}", $text);
                    assert_eq!(parse_i64_best_effort($text), expected_i64.unwrap_or(0));
                    assert_eq!(parse_u64_best_effort($text), expected_u64.unwrap_or(0));
                }
            }
        )*
    };
}

int_cases! {
    zero => "0",
    small => "17",
    negative => "-17",
    plus => "+17",
    eighteen_digits => "999999999999999999",
    nineteen_digits => "1000000000000000000",
    i64_max => "9223372036854775807",
    i64_min => "-9223372036854775808",
    i64_overflow => "9223372036854775808",
    u64_max => "18446744073709551615",
    u64_overflow => "18446744073709551616",
    leading_zeros => "0000000000000000000000042",
    fraction => "1.5",
    exponent => "1e3",
    empty => "",
    sign_only => "-",
}

#[test]
fn test_integer_errors() {
    assert_eq!(parse_i64("9223372036854775808"), Err(NumberError::Overflow));
    assert_eq!(parse_u64("18446744073709551616"), Err(NumberError::Overflow));
    assert_eq!(parse_i64("12a"), Err(NumberError::UnparsedTail));
    assert_eq!(parse_u64("-1"), Err(NumberError::InvalidDigit));
    assert_eq!(parse_i64(""), Err(NumberError::Empty));
    assert_eq!(parse_i64("+"), Err(NumberError::SignOnly));
}

#[test]
fn test_platform_width_getters() {
    let mut parser = Parser::new();
    let root = parser
        .parse("[9223372036854775807, -1, 18446744073709551615]")
        .unwrap();
    assert_eq!(root.get_int(&["0"]) as i64, i64::MAX);
    assert_eq!(root.get_uint(&["1"]), 0);
    assert_eq!(root.get_uint(&["2"]) as u64, u64::MAX);
    assert!(root.try_get_int(&["2"]).is_err());
}
