// SPDX-License-Identifier: Apache-2.0

//! Decimal text to `f64` / `i64` / `u64` conversion.
//!
//! Every conversion has a strict variant that reports a [`NumberError`] and a
//! best-effort variant that yields 0 for malformed input. Both run a fast
//! accumulator first and hand the whole text to a general parser once the
//! accumulator can no longer guarantee an exact result.

use log::trace;

use crate::int_parser::{from_ascii_i64, from_ascii_u64};
use crate::parse_error::NumberError;

/// Exact powers of ten. Every entry is representable in an f64 without rounding.
const FLOAT64_POW10: [f64; 23] = [
    1e0, 1e1, 1e2, 1e3, 1e4, 1e5, 1e6, 1e7, 1e8, 1e9, 1e10, 1e11, 1e12, 1e13, 1e14, 1e15, 1e16,
    1e17, 1e18, 1e19, 1e20, 1e21, 1e22,
];

/// Number of decimal digits the accumulators take before deferring to the general parser.
const MAX_FAST_DIGITS: usize = 18;

/// Exponent magnitude past which the fast float path gives up.
const MAX_FAST_EXPONENT: i32 = 300;

/// Largest mantissa that converts to f64 without rounding (2^53).
const MAX_EXACT_MANTISSA: u64 = 1 << 53;

fn digit_at(bytes: &[u8], i: usize) -> Option<u64> {
    match bytes.get(i) {
        Some(&b @ b'0'..=b'9') => Some(u64::from(b - b'0')),
        _ => None,
    }
}

fn apply_sign(f: f64, minus: bool) -> f64 {
    if minus {
        -f
    } else {
        f
    }
}

/// General decimal to float conversion, correctly rounded.
///
/// Out of range magnitudes become infinities, matching IEEE overflow behavior.
fn parse_f64_general(s: &str) -> Result<f64, NumberError> {
    trace!("float fast path exhausted, using general parser for {s:?}");
    s.parse::<f64>().map_err(|_| NumberError::InvalidDigit)
}

/// Recognizes `inf`, `infinity` and `nan` in any letter case.
fn parse_special(tail: &str, minus: bool) -> Result<f64, NumberError> {
    let tail = tail.strip_prefix('+').unwrap_or(tail);
    if tail.eq_ignore_ascii_case("inf") || tail.eq_ignore_ascii_case("infinity") {
        return Ok(apply_sign(f64::INFINITY, minus));
    }
    if tail.eq_ignore_ascii_case("nan") {
        return Ok(f64::NAN);
    }
    Err(NumberError::InvalidDigit)
}

/// Parses a floating point number from decimal text.
///
/// Accepts an optional sign, an elided integer part (`.5`), an elided
/// fractional part (`5.`), an exponent, and the `inf` / `infinity` / `nan`
/// tokens. Results are correctly rounded.
pub fn parse_f64(s: &str) -> Result<f64, NumberError> {
    let bytes = s.as_bytes();
    let (minus, mut i) = match bytes.first() {
        None => return Err(NumberError::Empty),
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        Some(_) => (false, 0),
    };
    if i >= bytes.len() {
        return Err(NumberError::SignOnly);
    }

    // The integer part may be elided, but then a fractional digit is required
    if bytes.get(i) == Some(&b'.') && digit_at(bytes, i + 1).is_none() {
        return Err(NumberError::MissingDigits);
    }

    let int_start = i;
    let mut mantissa: u64 = 0;
    while let Some(d) = digit_at(bytes, i) {
        mantissa = mantissa * 10 + d;
        i += 1;
        if i - int_start > MAX_FAST_DIGITS {
            return parse_f64_general(s);
        }
    }
    let mut digits = i - int_start;

    if digits == 0 && bytes.get(i) != Some(&b'.') {
        return parse_special(s.get(i..).unwrap_or_default(), minus);
    }
    if i >= bytes.len() {
        // Plain integer
        return Ok(apply_sign(mantissa as f64, minus));
    }

    let mut frac_digits = 0usize;
    if bytes.get(i) == Some(&b'.') {
        i += 1;
        while let Some(d) = digit_at(bytes, i) {
            mantissa = mantissa * 10 + d;
            i += 1;
            frac_digits += 1;
            digits += 1;
            if digits > MAX_FAST_DIGITS || frac_digits >= FLOAT64_POW10.len() {
                return parse_f64_general(s);
            }
        }
    }

    let mut exp: i32 = 0;
    match bytes.get(i) {
        None => {}
        Some(b'e' | b'E') => {
            i += 1;
            let exp_minus = match bytes.get(i) {
                None => return Err(NumberError::InvalidExponent),
                Some(b'-') => {
                    i += 1;
                    true
                }
                Some(b'+') => {
                    i += 1;
                    false
                }
                Some(_) => false,
            };
            let exp_start = i;
            while let Some(d) = digit_at(bytes, i) {
                exp = exp * 10 + d as i32;
                i += 1;
                if exp > MAX_FAST_EXPONENT {
                    return parse_f64_general(s);
                }
            }
            if i == exp_start {
                return Err(NumberError::InvalidExponent);
            }
            if exp_minus {
                exp = -exp;
            }
            if i < bytes.len() {
                return Err(NumberError::UnparsedTail);
            }
        }
        Some(_) => return Err(NumberError::UnparsedTail),
    }

    // Convert the whole mantissa at once so only a single rounding happens.
    let scale = exp - frac_digits as i32;
    let exact_pow = FLOAT64_POW10.get(scale.unsigned_abs() as usize);
    match exact_pow {
        Some(&pow) if mantissa <= MAX_EXACT_MANTISSA => {
            let f = mantissa as f64;
            let f = if scale >= 0 { f * pow } else { f / pow };
            Ok(apply_sign(f, minus))
        }
        _ => parse_f64_general(s),
    }
}

/// Best-effort variant of [`parse_f64`]: malformed input yields 0.
pub fn parse_f64_best_effort(s: &str) -> f64 {
    parse_f64(s).unwrap_or(0.0)
}

/// Accumulates up to [`MAX_FAST_DIGITS`] digits starting at `start`.
///
/// Returns `None` when the accumulator gave up and the general parser must run.
fn accumulate_digits(bytes: &[u8], start: usize) -> Option<Result<u64, NumberError>> {
    let mut i = start;
    let mut acc: u64 = 0;
    while let Some(d) = digit_at(bytes, i) {
        acc = acc * 10 + d;
        i += 1;
        if i - start > MAX_FAST_DIGITS {
            return None;
        }
    }
    if i == start {
        return Some(Err(NumberError::InvalidDigit));
    }
    if i < bytes.len() {
        return Some(Err(NumberError::UnparsedTail));
    }
    Some(Ok(acc))
}

/// Parses a signed 64-bit integer from decimal text.
pub fn parse_i64(s: &str) -> Result<i64, NumberError> {
    let bytes = s.as_bytes();
    let (minus, start) = match bytes.first() {
        None => return Err(NumberError::Empty),
        Some(b'-') => (true, 1),
        Some(b'+') => (false, 1),
        Some(_) => (false, 0),
    };
    if start >= bytes.len() {
        return Err(NumberError::SignOnly);
    }
    match accumulate_digits(bytes, start) {
        // Fewer than 19 digits always fit an i64
        Some(Ok(acc)) => {
            let n = acc as i64;
            Ok(if minus { -n } else { n })
        }
        Some(Err(e)) => Err(e),
        None => {
            trace!("integer fast path exhausted, using general parser for {s:?}");
            from_ascii_i64(bytes)
        }
    }
}

/// Best-effort variant of [`parse_i64`]: malformed input yields 0.
pub fn parse_i64_best_effort(s: &str) -> i64 {
    parse_i64(s).unwrap_or(0)
}

/// Parses an unsigned 64-bit integer from decimal text.
pub fn parse_u64(s: &str) -> Result<u64, NumberError> {
    let bytes = s.as_bytes();
    let start = match bytes.first() {
        None => return Err(NumberError::Empty),
        Some(b'+') => 1,
        Some(_) => 0,
    };
    if start >= bytes.len() {
        return Err(NumberError::SignOnly);
    }
    match accumulate_digits(bytes, start) {
        Some(result) => result,
        None => {
            trace!("integer fast path exhausted, using general parser for {s:?}");
            from_ascii_u64(bytes)
        }
    }
}

/// Best-effort variant of [`parse_u64`]: malformed input yields 0.
pub fn parse_u64_best_effort(s: &str) -> u64 {
    parse_u64(s).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_float_fast_path() {
        assert_eq!(parse_f64("0"), Ok(0.0));
        assert_eq!(parse_f64("123"), Ok(123.0));
        assert_eq!(parse_f64("-123"), Ok(-123.0));
        assert_eq!(parse_f64("+2.5"), Ok(2.5));
        assert_eq!(parse_f64("3.25"), Ok(3.25));
        assert_eq!(parse_f64("0.1"), Ok(0.1));
        assert_eq!(parse_f64("1e3"), Ok(1000.0));
        assert_eq!(parse_f64("1.5E-2"), Ok(0.015));
        assert_eq!(parse_f64("12e+2"), Ok(1200.0));
    }

    #[test]
    fn test_float_elided_parts() {
        assert_eq!(parse_f64(".5"), Ok(0.5));
        assert_eq!(parse_f64("-.5"), Ok(-0.5));
        assert_eq!(parse_f64("5."), Ok(5.0));
        assert_eq!(parse_f64("5.e1"), Ok(50.0));
    }

    #[test]
    fn test_float_special_tokens() {
        assert_eq!(parse_f64("inf"), Ok(f64::INFINITY));
        assert_eq!(parse_f64("-Inf"), Ok(f64::NEG_INFINITY));
        assert_eq!(parse_f64("+INFINITY"), Ok(f64::INFINITY));
        assert!(parse_f64("NaN").unwrap().is_nan());
        assert!(parse_f64("nan").unwrap().is_nan());
        assert_eq!(parse_f64("nope"), Err(NumberError::InvalidDigit));
    }

    #[test]
    fn test_float_malformed() {
        assert_eq!(parse_f64(""), Err(NumberError::Empty));
        assert_eq!(parse_f64("-"), Err(NumberError::SignOnly));
        assert_eq!(parse_f64("+"), Err(NumberError::SignOnly));
        assert_eq!(parse_f64("."), Err(NumberError::MissingDigits));
        assert_eq!(parse_f64("-.e5"), Err(NumberError::MissingDigits));
        assert_eq!(parse_f64("1e"), Err(NumberError::InvalidExponent));
        assert_eq!(parse_f64("1e-"), Err(NumberError::InvalidExponent));
        assert_eq!(parse_f64("1ex"), Err(NumberError::InvalidExponent));
        assert_eq!(parse_f64("1.2.3"), Err(NumberError::UnparsedTail));
        assert_eq!(parse_f64("12abc"), Err(NumberError::UnparsedTail));
        assert_eq!(parse_f64("1e5x"), Err(NumberError::UnparsedTail));
    }

    #[test]
    fn test_float_fallback_matches_general_parser() {
        let cases = [
            "1e400",
            "-1e400",
            "1e-400",
            "12345678901234567890",
            "0.12345678901234567890123",
            "1.7976931348623157e308",
            "4.9e-324",
            "9007199254740993",
            "123456789012345.678",
            "1e23",
        ];
        for case in cases {
            let expected: f64 = case.parse().unwrap();
            assert_eq!(parse_f64(case), Ok(expected), "mismatch for {case}");
        }
        assert_eq!(parse_f64("1e400"), Ok(f64::INFINITY));
    }

    #[test]
    fn test_float_best_effort() {
        assert_eq!(parse_f64_best_effort("2.5"), 2.5);
        assert_eq!(parse_f64_best_effort(""), 0.0);
        assert_eq!(parse_f64_best_effort("-"), 0.0);
        assert_eq!(parse_f64_best_effort("1x"), 0.0);
        assert_eq!(parse_f64_best_effort("12345678901234567890x"), 0.0);
        assert_eq!(parse_f64_best_effort("-inf"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_int_parsing() {
        assert_eq!(parse_i64("0"), Ok(0));
        assert_eq!(parse_i64("-42"), Ok(-42));
        assert_eq!(parse_i64("+42"), Ok(42));
        assert_eq!(parse_i64("9223372036854775807"), Ok(i64::MAX));
        assert_eq!(parse_i64("-9223372036854775808"), Ok(i64::MIN));
        assert_eq!(
            parse_i64("9223372036854775808"),
            Err(NumberError::Overflow)
        );
        assert_eq!(parse_i64(""), Err(NumberError::Empty));
        assert_eq!(parse_i64("-"), Err(NumberError::SignOnly));
        assert_eq!(parse_i64("-x"), Err(NumberError::InvalidDigit));
        assert_eq!(parse_i64("1.5"), Err(NumberError::UnparsedTail));
        assert_eq!(parse_i64_best_effort("1e3"), 0);
        assert_eq!(parse_i64_best_effort("77"), 77);
    }

    #[test]
    fn test_uint_parsing() {
        assert_eq!(parse_u64("18446744073709551615"), Ok(u64::MAX));
        assert_eq!(
            parse_u64("18446744073709551616"),
            Err(NumberError::Overflow)
        );
        assert_eq!(parse_u64("-1"), Err(NumberError::InvalidDigit));
        assert_eq!(parse_u64("12a"), Err(NumberError::UnparsedTail));
        assert_eq!(parse_u64_best_effort("-1"), 0);
        assert_eq!(parse_u64_best_effort("123456789012345678901"), 0);
        assert_eq!(parse_u64_best_effort("1234567890123456789"), 1234567890123456789);
    }
}
