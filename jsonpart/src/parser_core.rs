// SPDX-License-Identifier: Apache-2.0

//! Recursive-descent construction of a tree inside an [`Arena`].

use crate::arena::{Arena, LazyText, Node, Slot};
use crate::parse_error::{Construct, Malformed, ParseError};
use crate::shared::Span;
use crate::slice_input_buffer::SliceInputBuffer;

/// Builds one tree from `input` into `arena`.
///
/// The arena is expected to be empty; the caller resets it. Text after the
/// root value is left alone, so a value can be read from the front of a
/// longer blob.
pub(crate) struct ValueParser<'a, 'r> {
    buffer: SliceInputBuffer<'a>,
    arena: &'r mut Arena,
    max_depth: usize,
}

impl<'a, 'r> ValueParser<'a, 'r> {
    pub fn new(input: &'a str, arena: &'r mut Arena, max_depth: usize) -> Self {
        Self {
            buffer: SliceInputBuffer::new(input),
            arena,
            max_depth,
        }
    }

    /// Parses the root value, returning the slot it was stored in.
    pub fn parse_root(mut self) -> Result<Slot, ParseError> {
        self.buffer.skip_whitespace();
        self.parse_value(0)
    }

    fn fail(&self, reason: Malformed) -> ParseError {
        ParseError::malformed(reason, self.buffer.rest())
    }

    fn store(&mut self, node: Node) -> Slot {
        Slot::Node(self.arena.acquire(node))
    }

    /// Parses the value at the current position; leading whitespace must
    /// already be skipped.
    fn parse_value(&mut self, depth: usize) -> Result<Slot, ParseError> {
        let Some(first) = self.buffer.peek() else {
            return Err(self.fail(Malformed::EmptyInput));
        };
        let depth = depth + 1;
        if depth > self.max_depth {
            return Err(ParseError::depth_exceeded(
                self.max_depth,
                self.buffer.rest(),
            ));
        }

        match first {
            b'{' => {
                self.buffer.advance(1);
                self.parse_object(depth)
                    .map_err(|e| e.within(Construct::Object))
            }
            b'[' => {
                self.buffer.advance(1);
                self.parse_array(depth)
                    .map_err(|e| e.within(Construct::Array))
            }
            b'"' => {
                self.buffer.advance(1);
                self.parse_string().map_err(|e| e.within(Construct::String))
            }
            b't' => self.parse_literal("true", Slot::True),
            b'f' => self.parse_literal("false", Slot::False),
            b'n' => {
                if self.buffer.eat("null") {
                    Ok(Slot::Null)
                } else if self.buffer.peek_token_ignore_case("nan") {
                    let start = self.buffer.current_pos();
                    self.buffer.advance(3);
                    Ok(self.store(Node::Number(Span::new(start, start + 3))))
                } else {
                    Err(self.fail(Malformed::UnexpectedValue))
                }
            }
            _ => self.parse_number().map_err(|e| e.within(Construct::Number)),
        }
    }

    fn parse_literal(&mut self, token: &str, slot: Slot) -> Result<Slot, ParseError> {
        if self.buffer.eat(token) {
            Ok(slot)
        } else {
            Err(self.fail(Malformed::UnexpectedValue))
        }
    }

    fn parse_string(&mut self) -> Result<Slot, ParseError> {
        let span = self
            .buffer
            .scan_string()
            .ok_or_else(|| self.fail(Malformed::MissingClosingQuote))?;
        Ok(self.store(Node::String(LazyText::new(span))))
    }

    fn parse_number(&mut self) -> Result<Slot, ParseError> {
        let span = self
            .buffer
            .scan_number()
            .map_err(|c| self.fail(Malformed::UnexpectedChar(c)))?;
        Ok(self.store(Node::Number(span)))
    }

    fn parse_array(&mut self, depth: usize) -> Result<Slot, ParseError> {
        self.buffer.skip_whitespace();
        match self.buffer.peek() {
            None => return Err(self.fail(Malformed::MissingTerminator(']'))),
            Some(b']') => {
                self.buffer.advance(1);
                let mark = self.arena.item_mark();
                return Ok(Slot::Node(self.arena.finish_array(mark)));
            }
            Some(_) => {}
        }

        let mark = self.arena.item_mark();
        loop {
            self.buffer.skip_whitespace();
            let item = self
                .parse_value(depth)
                .map_err(|e| e.within(Construct::ArrayValue))?;
            self.arena.push_item(item);

            self.buffer.skip_whitespace();
            match self.buffer.peek() {
                None => return Err(self.fail(Malformed::UnexpectedEnd)),
                Some(b',') => self.buffer.advance(1),
                Some(b']') => {
                    self.buffer.advance(1);
                    return Ok(Slot::Node(self.arena.finish_array(mark)));
                }
                Some(_) => return Err(self.fail(Malformed::MissingComma)),
            }
        }
    }

    fn parse_object(&mut self, depth: usize) -> Result<Slot, ParseError> {
        self.buffer.skip_whitespace();
        match self.buffer.peek() {
            None => return Err(self.fail(Malformed::MissingTerminator('}'))),
            Some(b'}') => {
                self.buffer.advance(1);
                let mark = self.arena.pair_mark();
                return Ok(Slot::Node(self.arena.finish_object(mark)));
            }
            Some(_) => {}
        }

        let mark = self.arena.pair_mark();
        loop {
            self.buffer.skip_whitespace();
            if self.buffer.peek() != Some(b'"') {
                return Err(self.fail(Malformed::MissingKeyQuote));
            }
            self.buffer.advance(1);
            // Keys stay escaped until the object is searched or iterated
            let key = self.buffer.scan_key().ok_or_else(|| {
                self.fail(Malformed::MissingClosingQuote)
                    .within(Construct::ObjectKey)
            })?;

            self.buffer.skip_whitespace();
            if self.buffer.peek() != Some(b':') {
                return Err(self.fail(Malformed::MissingColon));
            }
            self.buffer.advance(1);

            self.buffer.skip_whitespace();
            let value = self
                .parse_value(depth)
                .map_err(|e| e.within(Construct::ObjectValue))?;
            self.arena.push_pair(key, value);

            self.buffer.skip_whitespace();
            match self.buffer.peek() {
                None => return Err(self.fail(Malformed::UnexpectedEnd)),
                Some(b',') => self.buffer.advance(1),
                Some(b'}') => {
                    self.buffer.advance(1);
                    return Ok(Slot::Node(self.arena.finish_object(mark)));
                }
                Some(_) => return Err(self.fail(Malformed::MissingComma)),
            }
        }
    }
}
