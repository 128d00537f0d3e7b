// SPDX-License-Identifier: Apache-2.0

//! Read access to a parsed tree.
//!
//! A [`Value`] is a small `Copy` handle into the arena of the parser that
//! produced it. Getters come in two flavours: `get_*` methods walk a path
//! and fall back to a zero value on any mismatch, while the `try_get_*`
//! methods and the kind-named methods (`str`, `i64`, ...) report an
//! [`AccessError`].

use alloc::string::String;

use crate::arena::{Arena, Node, ObjectNode, Pair, Slot};
use crate::number_parser::{
    parse_f64, parse_f64_best_effort, parse_i64, parse_i64_best_effort, parse_u64,
    parse_u64_best_effort,
};
use crate::parse_error::AccessError;
use crate::shared::Kind;

/// A JSON value borrowed from a parse result.
///
/// Valid until the owning [`Parser`](crate::Parser) parses again, which the
/// borrow checker enforces.
#[derive(Clone, Copy)]
pub struct Value<'p> {
    src: &'p str,
    arena: &'p Arena,
    slot: Slot,
}

macro_rules! define_path_accessor {
    ($name:ident, $method:ident, $ty:ty) => {
        #[doc = concat!(
            "[`lookup`](Self::lookup) followed by [`",
            stringify!($method),
            "`](Self::",
            stringify!($method),
            ")."
        )]
        pub fn $name<S: AsRef<str>>(&self, path: &[S]) -> Result<$ty, AccessError> {
            self.lookup(path)?.$method()
        }
    };
}

impl<'p> Value<'p> {
    pub(crate) fn new(src: &'p str, arena: &'p Arena, slot: Slot) -> Self {
        Self { src, arena, slot }
    }

    pub(crate) fn src(&self) -> &'p str {
        self.src
    }

    pub(crate) fn arena(&self) -> &'p Arena {
        self.arena
    }

    pub(crate) fn slot(&self) -> Slot {
        self.slot
    }

    fn node(&self) -> Option<&'p Node> {
        match self.slot {
            Slot::Node(id) => self.arena.node(id),
            _ => None,
        }
    }

    fn child(&self, slot: Slot) -> Value<'p> {
        Value::new(self.src, self.arena, slot)
    }

    /// The kind of this value.
    pub fn kind(&self) -> Kind {
        match self.slot {
            Slot::Null => Kind::Null,
            Slot::True => Kind::True,
            Slot::False => Kind::False,
            Slot::Node(_) => match self.node() {
                Some(Node::Number(_)) => Kind::Number,
                Some(Node::String(_)) => Kind::String,
                Some(Node::Array(_)) => Kind::Array,
                Some(Node::Object(_)) => Kind::Object,
                None => Kind::Null,
            },
        }
    }

    /// Follows one path segment: a key for objects, a decimal index for arrays.
    fn step(&self, segment: &str) -> Result<Value<'p>, AccessError> {
        match self.node() {
            Some(Node::Object(object)) => Object::new(self.src, self.arena, object)
                .get(segment)
                .ok_or_else(|| AccessError::KeyNotFound {
                    key: String::from(segment),
                }),
            Some(Node::Array(range)) => {
                let items = self.arena.items(range);
                segment
                    .parse::<usize>()
                    .ok()
                    .and_then(|index| items.get(index))
                    .map(|&slot| self.child(slot))
                    .ok_or_else(|| AccessError::IndexOutOfRange {
                        segment: String::from(segment),
                        len: items.len(),
                    })
            }
            _ => Err(AccessError::NotAContainer {
                segment: String::from(segment),
                found: self.kind(),
            }),
        }
    }

    /// Walks `path` through nested objects and arrays.
    ///
    /// Returns `None` as soon as a key is missing, an index does not parse or
    /// is out of range, or a segment meets a scalar. An empty path returns
    /// the value itself.
    pub fn get<S: AsRef<str>>(&self, path: &[S]) -> Option<Value<'p>> {
        self.lookup(path).ok()
    }

    /// Like [`get`](Self::get), but reports the segment that failed.
    pub fn lookup<S: AsRef<str>>(&self, path: &[S]) -> Result<Value<'p>, AccessError> {
        let mut current = *self;
        for segment in path {
            current = current.step(segment.as_ref())?;
        }
        Ok(current)
    }

    /// Whether `path` resolves to a value.
    pub fn exists<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.get(path).is_some()
    }

    fn mismatch(&self, expected: &'static str) -> AccessError {
        AccessError::TypeMismatch {
            expected,
            found: self.kind(),
        }
    }

    fn number_text(&self) -> Result<&'p str, AccessError> {
        match self.node() {
            Some(Node::Number(span)) => Ok(span.text(self.src)),
            _ => Err(self.mismatch("number")),
        }
    }

    /// The unescaped string content, decoded on the first read.
    pub fn str(&self) -> Result<&'p str, AccessError> {
        match self.node() {
            Some(Node::String(text)) => Ok(text.text(self.src)),
            _ => Err(self.mismatch("string")),
        }
    }

    pub fn bool(&self) -> Result<bool, AccessError> {
        match self.slot {
            Slot::True => Ok(true),
            Slot::False => Ok(false),
            _ => Err(self.mismatch("bool")),
        }
    }

    pub fn f64(&self) -> Result<f64, AccessError> {
        let raw = self.number_text()?;
        parse_f64(raw).map_err(|error| AccessError::MalformedNumber {
            raw: String::from(raw),
            error,
        })
    }

    pub fn i64(&self) -> Result<i64, AccessError> {
        let raw = self.number_text()?;
        parse_i64(raw).map_err(|error| AccessError::MalformedNumber {
            raw: String::from(raw),
            error,
        })
    }

    pub fn u64(&self) -> Result<u64, AccessError> {
        let raw = self.number_text()?;
        parse_u64(raw).map_err(|error| AccessError::MalformedNumber {
            raw: String::from(raw),
            error,
        })
    }

    /// The number as a platform-sized signed integer.
    pub fn int(&self) -> Result<isize, AccessError> {
        let n = self.i64()?;
        isize::try_from(n).map_err(|_| AccessError::NumberDoesNotFit {
            raw: String::from(self.number_text().unwrap_or_default()),
            target: "int",
        })
    }

    /// The number as a platform-sized unsigned integer.
    pub fn uint(&self) -> Result<usize, AccessError> {
        let n = self.u64()?;
        usize::try_from(n).map_err(|_| AccessError::NumberDoesNotFit {
            raw: String::from(self.number_text().unwrap_or_default()),
            target: "uint",
        })
    }

    pub fn object(&self) -> Result<Object<'p>, AccessError> {
        match self.node() {
            Some(Node::Object(object)) => Ok(Object::new(self.src, self.arena, object)),
            _ => Err(self.mismatch("object")),
        }
    }

    pub fn array(&self) -> Result<Array<'p>, AccessError> {
        match self.node() {
            Some(Node::Array(range)) => Ok(Array::new(self.src, self.arena, self.arena.items(range))),
            _ => Err(self.mismatch("array")),
        }
    }

    define_path_accessor!(try_get_str, str, &'p str);
    define_path_accessor!(try_get_bool, bool, bool);
    define_path_accessor!(try_get_f64, f64, f64);
    define_path_accessor!(try_get_i64, i64, i64);
    define_path_accessor!(try_get_u64, u64, u64);
    define_path_accessor!(try_get_int, int, isize);
    define_path_accessor!(try_get_uint, uint, usize);
    define_path_accessor!(try_get_object, object, Object<'p>);
    define_path_accessor!(try_get_array, array, Array<'p>);

    /// String at `path`, or `""` if missing or not a string.
    pub fn get_str<S: AsRef<str>>(&self, path: &[S]) -> &'p str {
        self.get(path).and_then(|v| v.str().ok()).unwrap_or_default()
    }

    /// Boolean at `path`; anything other than `true` reads as `false`.
    pub fn get_bool<S: AsRef<str>>(&self, path: &[S]) -> bool {
        self.get(path).is_some_and(|v| v.slot == Slot::True)
    }

    /// Number at `path` as `f64`, or `0.0` if missing, not a number or malformed.
    pub fn get_f64<S: AsRef<str>>(&self, path: &[S]) -> f64 {
        self.get(path)
            .and_then(|v| v.number_text().ok())
            .map_or(0.0, parse_f64_best_effort)
    }

    pub fn get_i64<S: AsRef<str>>(&self, path: &[S]) -> i64 {
        self.get(path)
            .and_then(|v| v.number_text().ok())
            .map_or(0, parse_i64_best_effort)
    }

    pub fn get_u64<S: AsRef<str>>(&self, path: &[S]) -> u64 {
        self.get(path)
            .and_then(|v| v.number_text().ok())
            .map_or(0, parse_u64_best_effort)
    }

    /// Like [`get_i64`](Self::get_i64); `0` when the number does not fit `isize`.
    pub fn get_int<S: AsRef<str>>(&self, path: &[S]) -> isize {
        isize::try_from(self.get_i64(path)).unwrap_or(0)
    }

    /// Like [`get_u64`](Self::get_u64); `0` when the number does not fit `usize`.
    pub fn get_uint<S: AsRef<str>>(&self, path: &[S]) -> usize {
        usize::try_from(self.get_u64(path)).unwrap_or(0)
    }

    pub fn get_object<S: AsRef<str>>(&self, path: &[S]) -> Option<Object<'p>> {
        self.get(path).and_then(|v| v.object().ok())
    }

    pub fn get_array<S: AsRef<str>>(&self, path: &[S]) -> Option<Array<'p>> {
        self.get(path).and_then(|v| v.array().ok())
    }
}

impl core::fmt::Debug for Value<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Value({}: {self})", self.kind())
    }
}

/// An object view: members in source order, duplicates included.
#[derive(Clone, Copy)]
pub struct Object<'p> {
    src: &'p str,
    arena: &'p Arena,
    node: &'p ObjectNode,
}

impl<'p> Object<'p> {
    pub(crate) fn new(src: &'p str, arena: &'p Arena, node: &'p ObjectNode) -> Self {
        Self { src, arena, node }
    }

    pub(crate) fn pairs(&self) -> &'p [Pair] {
        self.arena.pairs(&self.node.pairs)
    }

    pub(crate) fn keys_unescaped(&self) -> bool {
        self.node.keys_unescaped.get()
    }

    pub(crate) fn src(&self) -> &'p str {
        self.src
    }

    pub(crate) fn arena(&self) -> &'p Arena {
        self.arena
    }

    fn unescape_keys(&self) {
        if self.node.keys_unescaped.get() {
            return;
        }
        for pair in self.pairs() {
            pair.key.text(self.src);
        }
        self.node.keys_unescaped.set(true);
    }

    pub fn len(&self) -> usize {
        self.node.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node.pairs.is_empty()
    }

    /// The value of the first member named `key`.
    pub fn get(&self, key: &str) -> Option<Value<'p>> {
        let pairs = self.pairs();
        if !self.keys_unescaped() && !key.contains('\\') {
            // Fast path: compare against the keys as written
            if let Some(pair) = pairs.iter().find(|pair| pair.key.raw(self.src) == key) {
                return Some(Value::new(self.src, self.arena, pair.value));
            }
        }

        self.unescape_keys();
        pairs
            .iter()
            .find(|pair| pair.key.text(self.src) == key)
            .map(|pair| Value::new(self.src, self.arena, pair.value))
    }

    /// Calls `f` with every member in source order.
    pub fn visit<F: FnMut(&'p str, Value<'p>)>(&self, mut f: F) {
        for (key, value) in self.iter() {
            f(key, value);
        }
    }

    /// Members in source order with unescaped keys.
    pub fn iter(&self) -> impl Iterator<Item = (&'p str, Value<'p>)> + 'p {
        self.unescape_keys();
        let (src, arena) = (self.src, self.arena);
        self.pairs()
            .iter()
            .map(move |pair| (pair.key.text(src), Value::new(src, arena, pair.value)))
    }
}

impl core::fmt::Debug for Object<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Object({self})")
    }
}

/// An array view.
#[derive(Clone, Copy)]
pub struct Array<'p> {
    src: &'p str,
    arena: &'p Arena,
    items: &'p [Slot],
}

impl<'p> Array<'p> {
    pub(crate) fn new(src: &'p str, arena: &'p Arena, items: &'p [Slot]) -> Self {
        Self { src, arena, items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<Value<'p>> {
        self.items
            .get(index)
            .map(|&slot| Value::new(self.src, self.arena, slot))
    }

    pub fn iter(&self) -> impl Iterator<Item = Value<'p>> + 'p {
        let (src, arena) = (self.src, self.arena);
        self.items
            .iter()
            .map(move |&slot| Value::new(src, arena, slot))
    }
}

impl core::fmt::Debug for Array<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "Array({self})")
    }
}
