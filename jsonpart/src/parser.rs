// SPDX-License-Identifier: Apache-2.0

use log::debug;

use crate::arena::{Arena, Slot};
use crate::parse_error::ParseError;
use crate::parser_core::ValueParser;
use crate::partial::locate_partial;
use crate::value::Value;

/// Default nesting limit. Every value counts one level, scalars included.
pub const MAX_DEPTH: usize = 300;

fn parse_into(arena: &mut Arena, input: &str, max_depth: usize) -> Result<Slot, ParseError> {
    arena.reset();
    let root = ValueParser::new(input, arena, max_depth).parse_root()?;
    debug!(
        "Parsed {} bytes of JSON into {} nodes",
        input.len(),
        arena.len()
    );
    Ok(root)
}

/// A reusable JSON parser.
///
/// Each parse resets and refills the parser's arena, so once the arena has
/// grown to fit a typical document further parses stop allocating nodes.
/// The returned [`Value`] borrows both the input and the parser, which keeps
/// it from outliving the next parse.
///
/// A parser serves one caller at a time. Threads that want to share parsers
/// can use a [`ParserPool`].
///
/// # Example
/// ```
/// use jsonpart::Parser;
///
/// let mut parser = Parser::new();
/// let root = parser.parse(r#"{"a":{"b":[1,2,3]}}"#).unwrap();
/// assert_eq!(root.get_int(&["a", "b", "1"]), 2);
/// ```
#[derive(Debug)]
pub struct Parser {
    arena: Arena,
    max_depth: usize,
}

impl Default for Parser {
    fn default() -> Self {
        Self::new()
    }
}

impl Parser {
    /// Creates a parser with the default nesting limit of [`MAX_DEPTH`].
    pub fn new() -> Self {
        Self::with_max_depth(MAX_DEPTH)
    }

    /// Creates a parser that rejects input nested deeper than `max_depth`.
    pub fn with_max_depth(max_depth: usize) -> Self {
        Self {
            arena: Arena::new(),
            max_depth,
        }
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Node capacity currently held by the parser's arena.
    pub fn capacity(&self) -> usize {
        self.arena.capacity()
    }

    /// Parses the JSON value at the start of `input`.
    ///
    /// Leading whitespace is skipped and anything after the value is ignored.
    pub fn parse<'p>(&'p mut self, input: &'p str) -> Result<Value<'p>, ParseError> {
        let root = parse_into(&mut self.arena, input, self.max_depth)?;
        Ok(Value::new(input, &self.arena, root))
    }

    /// Like [`parse`](Self::parse), for input that has not been checked to be UTF-8.
    pub fn parse_bytes<'p>(&'p mut self, input: &'p [u8]) -> Result<Value<'p>, ParseError> {
        let text = core::str::from_utf8(input)?;
        self.parse(text)
    }

    /// Parses the value that follows `"key":` somewhere inside `input`.
    ///
    /// See [`locate_partial`] for how the key is found. An empty key parses
    /// `input` as a whole.
    pub fn parse_partial<'p>(
        &'p mut self,
        input: &'p str,
        key: &str,
    ) -> Result<Value<'p>, ParseError> {
        let text = locate_partial(input, key)?;
        self.parse(text)
    }
}

/// The result of a one-off parse; owns its arena and borrows the input.
#[derive(Debug)]
pub struct Document<'a> {
    src: &'a str,
    arena: Arena,
    root: Slot,
}

impl<'a> Document<'a> {
    fn parse(src: &'a str) -> Result<Self, ParseError> {
        let mut arena = Arena::new();
        let root = parse_into(&mut arena, src, MAX_DEPTH)?;
        Ok(Self { src, arena, root })
    }

    /// The root value of the document.
    pub fn root(&self) -> Value<'_> {
        Value::new(self.src, &self.arena, self.root)
    }

    /// The text the document was parsed from.
    pub fn source(&self) -> &'a str {
        self.src
    }
}

/// Parses `input` with a fresh arena. Prefer a [`Parser`] for repeated parses.
pub fn parse(input: &str) -> Result<Document<'_>, ParseError> {
    Document::parse(input)
}

/// Parses `input` after checking that it is UTF-8.
pub fn parse_bytes(input: &[u8]) -> Result<Document<'_>, ParseError> {
    Document::parse(core::str::from_utf8(input)?)
}

/// Parses the value that follows `"key":` inside `input`.
///
/// # Example
/// ```
/// let html = r#"<script>window.ctx = {"ctx": {"user": "ann"}};</script>"#;
/// let doc = jsonpart::parse_partial(html, "ctx").unwrap();
/// assert_eq!(doc.root().get_str(&["user"]), "ann");
/// ```
pub fn parse_partial<'a>(input: &'a str, key: &str) -> Result<Document<'a>, ParseError> {
    Document::parse(locate_partial(input, key)?)
}

/// A shared free list of parsers for use across threads.
///
/// [`get`](Self::get) hands out a parser that only the caller uses until it
/// is returned with [`put`](Self::put).
#[cfg(feature = "std")]
#[derive(Debug, Default)]
pub struct ParserPool {
    parsers: std::sync::Mutex<alloc::vec::Vec<Parser>>,
}

#[cfg(feature = "std")]
impl ParserPool {
    pub fn new() -> Self {
        Self::default()
    }

    fn free_list(&self) -> std::sync::MutexGuard<'_, alloc::vec::Vec<Parser>> {
        // A panic while holding the lock cannot leave the list inconsistent
        self.parsers
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Takes a parser from the pool, creating one if the pool is empty.
    pub fn get(&self) -> Parser {
        self.free_list().pop().unwrap_or_default()
    }

    /// Returns a parser to the pool for later reuse.
    pub fn put(&self, parser: Parser) {
        self.free_list().push(parser);
    }

    /// Number of idle parsers in the pool.
    pub fn idle(&self) -> usize {
        self.free_list().len()
    }
}
