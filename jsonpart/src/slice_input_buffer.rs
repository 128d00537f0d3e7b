// SPDX-License-Identifier: Apache-2.0

use crate::shared::{is_json_whitespace, Span};

/// A buffer that manages input text and the current parsing position.
///
/// All scanning is byte-oriented; positions only ever land on ASCII
/// structural bytes or on the end of input, so they are always char
/// boundaries of `data`.
#[derive(Debug)]
pub struct SliceInputBuffer<'a> {
    data: &'a str,
    pos: usize,
}

impl<'a> SliceInputBuffer<'a> {
    /// Creates a new SliceInputBuffer with the given text.
    pub fn new(data: &'a str) -> Self {
        Self { data, pos: 0 }
    }

    pub fn current_pos(&self) -> usize {
        self.pos
    }

    /// Unconsumed remainder of the input.
    pub fn rest(&self) -> &'a str {
        self.data.get(self.pos..).unwrap_or_default()
    }

    /// The byte at the current position without consuming it.
    pub fn peek(&self) -> Option<u8> {
        self.data.as_bytes().get(self.pos).copied()
    }

    /// Consumes `n` bytes, stopping at the end of input.
    pub fn advance(&mut self, n: usize) {
        self.pos = self.pos.saturating_add(n).min(self.data.len());
    }

    /// Skips the insignificant whitespace between JSON tokens.
    pub fn skip_whitespace(&mut self) {
        let bytes = self.data.as_bytes();
        // Fast path: most tokens are not preceded by whitespace
        if bytes.get(self.pos).is_some_and(|&b| b > b' ') {
            return;
        }
        while bytes.get(self.pos).copied().is_some_and(is_json_whitespace) {
            self.pos += 1;
        }
    }

    /// Consumes `token` if the remainder starts with it.
    pub fn eat(&mut self, token: &str) -> bool {
        if self.rest().starts_with(token) {
            self.advance(token.len());
            return true;
        }
        false
    }

    /// Whether the remainder starts with `token` in any letter case.
    pub fn peek_token_ignore_case(&self, token: &str) -> bool {
        self.rest()
            .as_bytes()
            .get(..token.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(token.as_bytes()))
    }

    /// Scans the content of a string whose opening quote was already consumed.
    ///
    /// The first quote not preceded by a backslash closes the string. A quote
    /// preceded by a run of backslashes closes it only if the run has even
    /// length, since every pair is an escaped backslash. On success the
    /// closing quote is consumed; on failure the position is left unchanged.
    pub fn scan_string(&mut self) -> Option<Span> {
        let bytes = self.data.as_bytes();
        let start = self.pos;
        let mut from = start;
        loop {
            let quote = from + bytes.get(from..)?.iter().position(|&b| b == b'"')?;
            let mut run_start = quote;
            while run_start > start && bytes.get(run_start - 1) == Some(&b'\\') {
                run_start -= 1;
            }
            if (quote - run_start) % 2 == 0 {
                self.pos = quote + 1;
                return Some(Span::new(start, quote));
            }
            from = quote + 1;
        }
    }

    /// Scans an object key whose opening quote was already consumed.
    ///
    /// Keys rarely contain escapes, so this looks for the closing quote
    /// directly and only defers to [`scan_string`](Self::scan_string) once a
    /// backslash shows up.
    pub fn scan_key(&mut self) -> Option<Span> {
        let bytes = self.data.as_bytes();
        let start = self.pos;
        for (offset, &b) in bytes.get(start..)?.iter().enumerate() {
            match b {
                b'"' => {
                    let end = start + offset;
                    self.pos = end + 1;
                    return Some(Span::new(start, end));
                }
                b'\\' => return self.scan_string(),
                _ => {}
            }
        }
        None
    }

    /// Scans a raw number token.
    ///
    /// Takes the longest run of digits, `.`, `-`, `+`, `e` and `E`. When the
    /// run is empty, or only a sign, a case-insensitive `inf` or `nan` right
    /// there is taken instead. Otherwise the character that cannot start a
    /// number is returned as the error and the position is left unchanged.
    pub fn scan_number(&mut self) -> Result<Span, char> {
        let bytes = self.data.as_bytes();
        let start = self.pos;
        let tail = bytes.get(start..).unwrap_or_default();
        let len = tail
            .iter()
            .position(|&b| !matches!(b, b'0'..=b'9' | b'.' | b'-' | b'+' | b'e' | b'E'))
            .unwrap_or(tail.len());

        let sign_only = len == 1 && matches!(tail.first(), Some(b'-' | b'+'));
        if len > 0 && !sign_only {
            self.pos = start + len;
            return Ok(Span::new(start, self.pos));
        }
        if len < tail.len() {
            let word = tail.get(len..len + 3);
            if word.is_some_and(|w| w.eq_ignore_ascii_case(b"inf") || w.eq_ignore_ascii_case(b"nan")) {
                self.pos = start + len + 3;
                return Ok(Span::new(start, self.pos));
            }
        }
        let offending = self
            .data
            .get(start + len..)
            .and_then(|s| s.chars().next())
            .unwrap_or('\0');
        Err(offending)
    }
}
