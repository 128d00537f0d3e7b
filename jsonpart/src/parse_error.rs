// SPDX-License-Identifier: Apache-2.0

use alloc::string::String;
use alloc::vec::Vec;

use crate::shared::{start_end_preview, Kind};

/// The JSON construct that was being parsed when an error occurred.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Construct {
    Object,
    ObjectKey,
    ObjectValue,
    Array,
    ArrayValue,
    String,
    Number,
}

impl Construct {
    const fn describe(self) -> &'static str {
        match self {
            Construct::Object => "cannot parse object",
            Construct::ObjectKey => "cannot parse object key",
            Construct::ObjectValue => "cannot parse object value",
            Construct::Array => "cannot parse array",
            Construct::ArrayValue => "cannot parse array value",
            Construct::String => "cannot parse string",
            Construct::Number => "cannot parse number",
        }
    }
}

/// What exactly was wrong with the structure of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Malformed {
    /// Nothing left to parse where a value was expected.
    EmptyInput,
    /// A value started with a character no JSON value starts with.
    UnexpectedChar(char),
    /// A `t`/`f`/`n` token that is not `true`/`false`/`null`.
    UnexpectedValue,
    /// A string or key without its closing quote.
    MissingClosingQuote,
    /// An object member that does not start with `"`.
    MissingKeyQuote,
    /// An object key not followed by `:`.
    MissingColon,
    /// A value inside an object or array not followed by `,` or the terminator.
    MissingComma,
    /// Input ended right after `{` or `[`.
    MissingTerminator(char),
    /// Input ended after a value inside an object or array.
    UnexpectedEnd,
}

impl core::fmt::Display for Malformed {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Malformed::EmptyInput => f.write_str("cannot parse empty string"),
            Malformed::UnexpectedChar(c) => write!(f, "unexpected char: {c:?}"),
            Malformed::UnexpectedValue => f.write_str("unexpected value found"),
            Malformed::MissingClosingQuote => f.write_str("missing closing '\"'"),
            Malformed::MissingKeyQuote => f.write_str("cannot find opening '\"' for object key"),
            Malformed::MissingColon => f.write_str("missing ':' after object key"),
            Malformed::MissingComma => f.write_str("missing ',' after value"),
            Malformed::MissingTerminator(c) => write!(f, "missing '{c}'"),
            Malformed::UnexpectedEnd => f.write_str("unexpected end of input"),
        }
    }
}

/// Errors returned by the parse entry points and by partial extraction.
///
/// Structural errors abort the whole parse; no partial tree is returned.
/// `context` lists the enclosing constructs innermost first and `tail` is a
/// bounded preview of the text that was left unparsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The input is not well-formed; `reason` says what was wrong.
    MalformedStructure {
        reason: Malformed,
        context: Vec<Construct>,
        tail: String,
    },
    /// Nesting went past the configured maximum depth.
    DepthExceeded {
        max_depth: usize,
        context: Vec<Construct>,
        tail: String,
    },
    /// Partial extraction could not find the quoted key in the text.
    KeyNotFound { key: String, preview: String },
    /// Partial extraction found the quoted key but no `:` after it.
    InvalidPartialKey { key: String, preview: String },
    /// The byte entry point was handed bytes that are not UTF-8.
    InvalidUtf8(core::str::Utf8Error),
}

impl ParseError {
    pub(crate) fn malformed(reason: Malformed, rest: &str) -> Self {
        ParseError::MalformedStructure {
            reason,
            context: Vec::new(),
            tail: start_end_preview(rest),
        }
    }

    pub(crate) fn depth_exceeded(max_depth: usize, rest: &str) -> Self {
        ParseError::DepthExceeded {
            max_depth,
            context: Vec::new(),
            tail: start_end_preview(rest),
        }
    }

    /// Records the enclosing construct while the error unwinds.
    pub(crate) fn within(mut self, construct: Construct) -> Self {
        match &mut self {
            ParseError::MalformedStructure { context, .. }
            | ParseError::DepthExceeded { context, .. } => context.push(construct),
            _ => {}
        }
        self
    }

    /// Enclosing constructs, innermost first.
    pub fn context(&self) -> &[Construct] {
        match self {
            ParseError::MalformedStructure { context, .. }
            | ParseError::DepthExceeded { context, .. } => context,
            _ => &[],
        }
    }

    /// Preview of the unparsed remainder, if the error carries one.
    pub fn tail(&self) -> Option<&str> {
        match self {
            ParseError::MalformedStructure { tail, .. }
            | ParseError::DepthExceeded { tail, .. } => Some(tail),
            _ => None,
        }
    }
}

impl From<core::str::Utf8Error> for ParseError {
    fn from(err: core::str::Utf8Error) -> Self {
        ParseError::InvalidUtf8(err)
    }
}

fn write_context(f: &mut core::fmt::Formatter<'_>, context: &[Construct]) -> core::fmt::Result {
    f.write_str("cannot parse JSON: ")?;
    for construct in context.iter().rev() {
        write!(f, "{}: ", construct.describe())?;
    }
    Ok(())
}

impl core::fmt::Display for ParseError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ParseError::MalformedStructure {
                reason,
                context,
                tail,
            } => {
                write_context(f, context)?;
                write!(f, "{reason}; unparsed tail: {tail:?}")
            }
            ParseError::DepthExceeded {
                max_depth,
                context,
                tail,
            } => {
                write_context(f, context)?;
                write!(
                    f,
                    "too big depth for the nested JSON; it exceeds {max_depth}; unparsed tail: {tail:?}"
                )
            }
            ParseError::KeyNotFound { key, preview } => {
                write!(f, "cannot find partialKey: \"{key}\"; JSON: {preview:?}")
            }
            ParseError::InvalidPartialKey { key, preview } => {
                write!(f, "invalid partialKey: \"{key}\"; JSON: {preview:?}")
            }
            ParseError::InvalidUtf8(e) => write!(f, "Invalid UTF-8: {e}"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ParseError::InvalidUtf8(e) => Some(e),
            _ => None,
        }
    }
}

/// Why decimal text could not be converted to a number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberError {
    /// The text was empty.
    Empty,
    /// The text consisted only of a sign character (`+` or `-`).
    SignOnly,
    /// A character that is not a base-10 digit where a digit was required.
    InvalidDigit,
    /// Neither integer nor fractional digits around the `.`.
    MissingDigits,
    /// An `e`/`E` without exponent digits.
    InvalidExponent,
    /// Characters left after a valid number.
    UnparsedTail,
    /// The value does not fit the 64-bit target type.
    Overflow,
}

impl core::fmt::Display for NumberError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(match self {
            NumberError::Empty => "cannot parse number from empty string",
            NumberError::SignOnly => "sign without digits",
            NumberError::InvalidDigit => "invalid digit",
            NumberError::MissingDigits => "missing integer and fractional part",
            NumberError::InvalidExponent => "cannot parse exponent",
            NumberError::UnparsedTail => "unparsed tail left after number",
            NumberError::Overflow => "number out of range",
        })
    }
}

#[cfg(feature = "std")]
impl std::error::Error for NumberError {}

/// Errors returned by the strict typed accessors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessError {
    /// An object along the path has no member with this key.
    KeyNotFound { key: String },
    /// An array along the path is indexed with a segment that is not a valid index.
    IndexOutOfRange { segment: String, len: usize },
    /// A path segment met a string, number, boolean or null.
    NotAContainer { segment: String, found: Kind },
    /// The value has a different kind than the accessor reads.
    TypeMismatch { expected: &'static str, found: Kind },
    /// The number text could not be converted.
    MalformedNumber { raw: String, error: NumberError },
    /// The number converted but does not fit the platform-sized target.
    NumberDoesNotFit { raw: String, target: &'static str },
}

impl core::fmt::Display for AccessError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AccessError::KeyNotFound { key } => write!(f, "key {key:?} not found"),
            AccessError::IndexOutOfRange { segment, len } => {
                write!(f, "index {segment:?} out of range for array of length {len}")
            }
            AccessError::NotAContainer { segment, found } => {
                write!(f, "cannot look up {segment:?} in {found}")
            }
            AccessError::TypeMismatch { expected, found } => {
                write!(f, "value doesn't contain {expected}; it contains {found}")
            }
            AccessError::MalformedNumber { raw, error } => {
                write!(f, "cannot parse number {raw:?}: {error}")
            }
            AccessError::NumberDoesNotFit { raw, target } => {
                write!(f, "number {raw:?} doesn't fit {target}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AccessError {}
