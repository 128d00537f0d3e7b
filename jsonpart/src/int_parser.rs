// SPDX-License-Identifier: Apache-2.0

// General base-10 integer parsers, mostly borrowed from core::num::parse::radix.
// These are the slow paths behind the accumulators in number_parser.

use crate::parse_error::NumberError;

/// Creates a panic-free, const-stable, base-10 parser for a signed integer type.
macro_rules! define_signed_parser {
    ($fn_name:ident, $int_ty:ty) => {
        /// Parses a byte slice of arbitrary length into a(n) `
        #[doc = stringify!($int_ty)]
        /// `, reporting overflow instead of wrapping.
        ///
        /// This function is guaranteed not to panic.
        pub const fn $fn_name(src: &[u8]) -> Result<$int_ty, NumberError> {
            let (is_negative, mut digits) = match src {
                [] => return Err(NumberError::Empty),
                [b'+', rest @ ..] => (false, rest),
                [b'-', rest @ ..] => (true, rest),
                _ => (false, src),
            };

            if digits.is_empty() {
                return Err(NumberError::SignOnly);
            }

            let mut result: $int_ty = 0;

            while let Some((&byte, rest)) = digits.split_first() {
                let digit = match byte {
                    b'0'..=b'9' => (byte - b'0') as $int_ty,
                    _ => return Err(NumberError::InvalidDigit),
                };

                result = match result.checked_mul(10) {
                    Some(val) => val,
                    None => return Err(NumberError::Overflow),
                };

                // Building the number negatively from the start correctly handles MIN.
                if is_negative {
                    result = match result.checked_sub(digit) {
                        Some(val) => val,
                        None => return Err(NumberError::Overflow),
                    }
                } else {
                    result = match result.checked_add(digit) {
                        Some(val) => val,
                        None => return Err(NumberError::Overflow),
                    }
                }

                digits = rest;
            }

            Ok(result)
        }
    };
}

/// Creates a panic-free, const-stable, base-10 parser for an unsigned integer type.
///
/// A leading `+` is accepted, a leading `-` is an invalid digit.
macro_rules! define_unsigned_parser {
    ($fn_name:ident, $int_ty:ty) => {
        /// Parses a byte slice of arbitrary length into a(n) `
        #[doc = stringify!($int_ty)]
        /// `, reporting overflow instead of wrapping.
        ///
        /// This function is guaranteed not to panic.
        pub const fn $fn_name(src: &[u8]) -> Result<$int_ty, NumberError> {
            let mut digits = match src {
                [] => return Err(NumberError::Empty),
                [b'+', rest @ ..] => rest,
                _ => src,
            };

            if digits.is_empty() {
                return Err(NumberError::SignOnly);
            }

            let mut result: $int_ty = 0;

            while let Some((&byte, rest)) = digits.split_first() {
                let digit = match byte {
                    b'0'..=b'9' => (byte - b'0') as $int_ty,
                    _ => return Err(NumberError::InvalidDigit),
                };

                result = match result.checked_mul(10) {
                    Some(val) => val,
                    None => return Err(NumberError::Overflow),
                };
                result = match result.checked_add(digit) {
                    Some(val) => val,
                    None => return Err(NumberError::Overflow),
                };

                digits = rest;
            }

            Ok(result)
        }
    };
}

define_signed_parser!(from_ascii_i64, i64);
define_unsigned_parser!(from_ascii_u64, u64);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_ascii_i64_simple() {
        assert_eq!(from_ascii_i64(b"0"), Ok(0));
        assert_eq!(from_ascii_i64(b"1234567890"), Ok(1234567890));
        assert_eq!(from_ascii_i64(b"-1234567890"), Ok(-1234567890));
        assert_eq!(from_ascii_i64(b"+1234567890"), Ok(1234567890));
    }

    #[test]
    fn test_from_ascii_i64_limits() {
        assert_eq!(
            from_ascii_i64(i64::MAX.to_string().as_bytes()),
            Ok(i64::MAX)
        );
        assert_eq!(
            from_ascii_i64(i64::MIN.to_string().as_bytes()),
            Ok(i64::MIN)
        );
        // Leading zeros push past 18 digits without changing the value
        assert_eq!(from_ascii_i64(b"0000000000000000000042"), Ok(42));
    }

    #[test]
    fn test_from_ascii_i64_overflow() {
        assert_eq!(
            from_ascii_i64(b"9223372036854775808"),
            Err(NumberError::Overflow)
        );
        assert_eq!(
            from_ascii_i64(b"-9223372036854775809"),
            Err(NumberError::Overflow)
        );
    }

    #[test]
    fn test_from_ascii_i64_errors() {
        assert_eq!(from_ascii_i64(b""), Err(NumberError::Empty));
        assert_eq!(from_ascii_i64(b"-"), Err(NumberError::SignOnly));
        assert_eq!(from_ascii_i64(b"+"), Err(NumberError::SignOnly));
        assert_eq!(
            from_ascii_i64(b"123a4567890"),
            Err(NumberError::InvalidDigit)
        );
    }

    #[test]
    fn test_from_ascii_u64() {
        assert_eq!(
            from_ascii_u64(u64::MAX.to_string().as_bytes()),
            Ok(u64::MAX)
        );
        assert_eq!(from_ascii_u64(b"+7"), Ok(7));
        assert_eq!(
            from_ascii_u64(b"18446744073709551616"),
            Err(NumberError::Overflow)
        );
        assert_eq!(from_ascii_u64(b"-1"), Err(NumberError::InvalidDigit));
        assert_eq!(from_ascii_u64(b""), Err(NumberError::Empty));
        assert_eq!(from_ascii_u64(b"+"), Err(NumberError::SignOnly));
    }
}
