// SPDX-License-Identifier: Apache-2.0

/// Shared components for the parser, the arena and the accessors
use alloc::string::String;

/// The type of a JSON value as seen by callers.
///
/// Strings that still await unescaping report [`Kind::String`]; the raw
/// state is an internal detail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    /// JSON `null`.
    Null,
    /// An object (`{...}`).
    Object,
    /// An array (`[...]`).
    Array,
    /// A string (`"..."`).
    String,
    /// A number, kept as its raw decimal text.
    Number,
    /// JSON `true`.
    True,
    /// JSON `false`.
    False,
}

impl Kind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Kind::Null => "null",
            Kind::Object => "object",
            Kind::Array => "array",
            Kind::String => "string",
            Kind::Number => "number",
            Kind::True => "true",
            Kind::False => "false",
        }
    }
}

impl core::fmt::Display for Kind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Byte range into the parsed input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Resolves the span against the text it was taken from.
    ///
    /// Spans are only ever built on char boundaries of that text, so the
    /// empty fallback is unreachable in practice.
    pub fn text<'s>(&self, src: &'s str) -> &'s str {
        src.get(self.start..self.end).unwrap_or_default()
    }
}

/// Longest text shown in full inside error messages.
const MAX_PREVIEW_CHARS: usize = 80;
/// Characters kept from each end of a longer text.
const PREVIEW_EDGE_CHARS: usize = 40;

/// Bounded preview of `s` for error messages.
///
/// Texts of up to 80 characters are returned whole; longer ones keep their
/// first and last 40 characters joined by `...`.
pub(crate) fn start_end_preview(s: &str) -> String {
    let head_end = match s.char_indices().nth(MAX_PREVIEW_CHARS) {
        None => return String::from(s),
        Some(_) => s
            .char_indices()
            .nth(PREVIEW_EDGE_CHARS)
            .map_or(s.len(), |(i, _)| i),
    };
    let tail_start = s
        .char_indices()
        .rev()
        .nth(PREVIEW_EDGE_CHARS - 1)
        .map_or(0, |(i, _)| i);

    let head = s.get(..head_end).unwrap_or_default();
    let tail = s.get(tail_start..).unwrap_or_default();
    let mut preview = String::with_capacity(head.len() + 3 + tail.len());
    preview.push_str(head);
    preview.push_str("...");
    preview.push_str(tail);
    preview
}

/// True for the four whitespace bytes JSON allows between tokens.
pub(crate) const fn is_json_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
