// SPDX-License-Identifier: Apache-2.0

use alloc::borrow::Cow;
use alloc::string::String;
use core::fmt::Write;

/// Backslash escape handling for JSON strings.
///
/// Unescaping is best-effort: malformed escapes are kept as literal text so
/// reading a string value never fails.
pub struct EscapeProcessor;

impl EscapeProcessor {
    /// Process a simple escape sequence character and return the unescaped byte.
    ///
    /// # Arguments
    /// * `escape_char` - The character following the backslash in an escape sequence
    ///
    /// # Returns
    /// The unescaped byte value, or None if this is not a single-character escape.
    pub fn process_simple_escape(escape_char: u8) -> Option<u8> {
        match escape_char {
            b'n' => Some(b'\n'),
            b't' => Some(b'\t'),
            b'r' => Some(b'\r'),
            b'\\' => Some(b'\\'),
            b'"' => Some(b'"'),
            b'/' => Some(b'/'),
            b'b' => Some(0x08), // Backspace
            b'f' => Some(0x0C), // Form feed
            _ => None,
        }
    }

    /// Returns the numeric value (0-15) of a hex digit.
    pub fn validate_hex_digit(byte: u8) -> Option<u32> {
        match byte {
            b'0'..=b'9' => Some((byte - b'0') as u32),
            b'a'..=b'f' => Some(byte.wrapping_sub(b'a').wrapping_add(10) as u32),
            b'A'..=b'F' => Some(byte.wrapping_sub(b'A').wrapping_add(10) as u32),
            _ => None,
        }
    }

    /// Decodes the four hex digits at the start of `s`.
    pub fn parse_hex4(s: &str) -> Option<u32> {
        let digits = s.as_bytes().get(..4)?;
        let mut codepoint = 0u32;
        for &byte in digits {
            codepoint = (codepoint << 4) | Self::validate_hex_digit(byte)?;
        }
        Some(codepoint)
    }

    /// Check if a Unicode codepoint is a high surrogate (0xD800-0xDBFF)
    pub fn is_high_surrogate(codepoint: u32) -> bool {
        (0xD800..=0xDBFF).contains(&codepoint)
    }

    /// Check if a Unicode codepoint is a low surrogate (0xDC00-0xDFFF)
    pub fn is_low_surrogate(codepoint: u32) -> bool {
        (0xDC00..=0xDFFF).contains(&codepoint)
    }

    /// Combine a high and low surrogate pair into a single Unicode codepoint
    pub fn combine_surrogate_pair(high: u32, low: u32) -> Option<char> {
        if !Self::is_high_surrogate(high) || !Self::is_low_surrogate(low) {
            return None;
        }

        // Combine surrogates according to UTF-16 specification
        let codepoint = 0x10000 + ((high & 0x3FF) << 10) + (low & 0x3FF);
        char::from_u32(codepoint)
    }

    /// Decodes a `\uXXXX` low surrogate at the start of `rest` that completes `high`.
    fn trailing_low_surrogate(high: u32, rest: &str) -> Option<char> {
        let hex = rest.strip_prefix("\\u")?;
        let low = Self::parse_hex4(hex)?;
        Self::combine_surrogate_pair(high, low)
    }

    /// Unescapes raw JSON string content.
    ///
    /// Content without a backslash is returned borrowed. Short, non-hex or
    /// unpaired `\u` escapes and unknown escape letters are copied through
    /// unchanged.
    pub fn unescape(raw: &str) -> Cow<'_, str> {
        let Some(first) = raw.find('\\') else {
            return Cow::Borrowed(raw);
        };

        let mut out = String::with_capacity(raw.len());
        out.push_str(raw.get(..first).unwrap_or_default());
        // Invariant: `rest` starts right after a backslash
        let mut rest = raw.get(first + 1..).unwrap_or_default();
        loop {
            match rest.as_bytes().first() {
                None => {
                    out.push('\\');
                    break;
                }
                Some(b'u') => {
                    rest = rest.get(1..).unwrap_or_default();
                    match Self::parse_hex4(rest) {
                        None => out.push_str("\\u"),
                        Some(codepoint) => {
                            let hex = rest.get(..4).unwrap_or_default();
                            rest = rest.get(4..).unwrap_or_default();
                            if let Some(ch) = char::from_u32(codepoint) {
                                out.push(ch);
                            } else if let Some(ch) = Self::trailing_low_surrogate(codepoint, rest)
                            {
                                out.push(ch);
                                rest = rest.get(6..).unwrap_or_default();
                            } else {
                                out.push_str("\\u");
                                out.push_str(hex);
                            }
                        }
                    }
                }
                Some(&c) => match Self::process_simple_escape(c) {
                    Some(unescaped) => {
                        out.push(char::from(unescaped));
                        rest = rest.get(1..).unwrap_or_default();
                    }
                    None => out.push('\\'),
                },
            }

            match rest.find('\\') {
                None => {
                    out.push_str(rest);
                    break;
                }
                Some(n) => {
                    out.push_str(rest.get(..n).unwrap_or_default());
                    rest = rest.get(n + 1..).unwrap_or_default();
                }
            }
        }
        Cow::Owned(out)
    }
}

/// True when `s` holds a quote, a backslash or a control character.
pub(crate) fn has_special_chars(s: &str) -> bool {
    s.bytes().any(|b| b == b'"' || b == b'\\' || b < 0x20)
}

/// Writes `s` as a quoted JSON string.
///
/// Strings without special characters are copied verbatim between quotes.
pub(crate) fn write_quoted<W: Write>(dst: &mut W, s: &str) -> core::fmt::Result {
    dst.write_char('"')?;
    if !has_special_chars(s) {
        dst.write_str(s)?;
        return dst.write_char('"');
    }

    let mut last = 0;
    for (i, b) in s.bytes().enumerate() {
        let escaped = match b {
            b'"' => "\\\"",
            b'\\' => "\\\\",
            b'\n' => "\\n",
            b'\r' => "\\r",
            b'\t' => "\\t",
            0x08 => "\\b",
            0x0C => "\\f",
            0x00..=0x1F => "",
            _ => continue,
        };
        dst.write_str(s.get(last..i).unwrap_or_default())?;
        if escaped.is_empty() {
            write!(dst, "\\u{b:04x}")?;
        } else {
            dst.write_str(escaped)?;
        }
        last = i + 1;
    }
    dst.write_str(s.get(last..).unwrap_or_default())?;
    dst.write_char('"')
}
