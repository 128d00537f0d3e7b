// SPDX-License-Identifier: Apache-2.0

//! Compact JSON serialization of parsed trees.
//!
//! Numbers are written as their source text. Strings and keys that were
//! never unescaped are still valid escaped JSON, so they are copied as found;
//! decoded text goes through [`write_quoted`].

use alloc::string::String;
use core::fmt::{self, Write};

use crate::arena::{Arena, Node, Slot};
use crate::escape_processor::write_quoted;
use crate::value::{Array, Object, Value};

fn write_raw_quoted<W: Write>(dst: &mut W, raw: &str) -> fmt::Result {
    dst.write_char('"')?;
    dst.write_str(raw)?;
    dst.write_char('"')
}

fn write_slot<W: Write>(dst: &mut W, src: &str, arena: &Arena, slot: Slot) -> fmt::Result {
    let id = match slot {
        Slot::Null => return dst.write_str("null"),
        Slot::True => return dst.write_str("true"),
        Slot::False => return dst.write_str("false"),
        Slot::Node(id) => id,
    };
    match arena.node(id) {
        None => dst.write_str("null"),
        Some(Node::Number(span)) => dst.write_str(span.text(src)),
        Some(Node::String(text)) => {
            if text.is_decoded() {
                write_quoted(dst, text.text(src))
            } else {
                write_raw_quoted(dst, text.raw(src))
            }
        }
        Some(Node::Array(range)) => write_items(dst, src, arena, arena.items(range)),
        Some(Node::Object(object)) => write_object(dst, &Object::new(src, arena, object)),
    }
}

fn write_items<W: Write>(dst: &mut W, src: &str, arena: &Arena, items: &[Slot]) -> fmt::Result {
    dst.write_char('[')?;
    for (i, &item) in items.iter().enumerate() {
        if i > 0 {
            dst.write_char(',')?;
        }
        write_slot(dst, src, arena, item)?;
    }
    dst.write_char(']')
}

fn write_object<W: Write>(dst: &mut W, object: &Object<'_>) -> fmt::Result {
    let (src, arena) = (object.src(), object.arena());
    let unescaped = object.keys_unescaped();
    dst.write_char('{')?;
    for (i, pair) in object.pairs().iter().enumerate() {
        if i > 0 {
            dst.write_char(',')?;
        }
        if unescaped {
            write_quoted(dst, pair.key.text(src))?;
        } else {
            write_raw_quoted(dst, pair.key.raw(src))?;
        }
        dst.write_char(':')?;
        write_slot(dst, src, arena, pair.value)?;
    }
    dst.write_char('}')
}

impl Value<'_> {
    /// Appends the compact JSON form of the value to `dst`.
    pub fn marshal_to(&self, dst: &mut String) -> fmt::Result {
        write_slot(dst, self.src(), self.arena(), self.slot())
    }
}

impl fmt::Display for Value<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_slot(f, self.src(), self.arena(), self.slot())
    }
}

impl fmt::Display for Object<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_object(f, self)
    }
}

impl fmt::Display for Array<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        f.write_char('[')?;
        for item in self.iter() {
            if !first {
                f.write_char(',')?;
            }
            first = false;
            write!(f, "{item}")?;
        }
        f.write_char(']')
    }
}
