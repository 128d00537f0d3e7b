// SPDX-License-Identifier: Apache-2.0

//! Index-based node storage for parsed trees.
//!
//! Nodes refer to their children through [`Slot`]s instead of owning
//! pointers. Array items and object members live in two flat vectors; while
//! a container is being parsed its entries collect on a scratch stack and
//! are moved into the flat vector in one piece once the container closes.
//! [`Arena::reset`] truncates every vector and keeps their capacity, so a
//! parser that is reused for similar inputs stops allocating nodes.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cell::{Cell, OnceCell};
use core::ops::Range;

use crate::escape_processor::EscapeProcessor;
use crate::shared::Span;

/// Index of a node inside its [`Arena`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct NodeId(usize);

impl NodeId {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Reference to a value in a tree.
///
/// `true`, `false` and `null` carry no payload, so they are shared constants
/// and never take up a node.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub(crate) enum Slot {
    Null,
    True,
    False,
    Node(NodeId),
}

/// String content that is unescaped on first read.
///
/// Until then only the raw span is known. Decoding that finds no escapes
/// keeps borrowing the input; otherwise the unescaped text is stored here.
#[derive(Debug)]
pub(crate) struct LazyText {
    raw: Span,
    decoded: OnceCell<Option<Box<str>>>,
}

impl LazyText {
    pub fn new(raw: Span) -> Self {
        Self {
            raw,
            decoded: OnceCell::new(),
        }
    }

    /// The still-escaped text as found in the input.
    pub fn raw<'s>(&self, src: &'s str) -> &'s str {
        self.raw.text(src)
    }

    /// The unescaped text, decoding it on the first call.
    pub fn text<'s>(&'s self, src: &'s str) -> &'s str {
        let raw = self.raw.text(src);
        let decoded = self
            .decoded
            .get_or_init(|| match EscapeProcessor::unescape(raw) {
                alloc::borrow::Cow::Borrowed(_) => None,
                alloc::borrow::Cow::Owned(s) => Some(s.into_boxed_str()),
            });
        decoded.as_deref().unwrap_or(raw)
    }

    /// Whether [`text`](Self::text) has run.
    pub fn is_decoded(&self) -> bool {
        self.decoded.get().is_some()
    }
}

/// One object member. Keys are kept raw until the object is searched or
/// iterated in a way that needs them unescaped.
#[derive(Debug)]
pub(crate) struct Pair {
    pub key: LazyText,
    pub value: Slot,
}

#[derive(Debug)]
pub(crate) struct ObjectNode {
    pub pairs: Range<usize>,
    pub keys_unescaped: Cell<bool>,
}

impl ObjectNode {
    pub fn new(pairs: Range<usize>) -> Self {
        Self {
            pairs,
            keys_unescaped: Cell::new(false),
        }
    }
}

#[derive(Debug)]
pub(crate) enum Node {
    /// Raw decimal text, converted on every numeric read.
    Number(Span),
    String(LazyText),
    Array(Range<usize>),
    Object(ObjectNode),
}

/// Reusable backing store for the nodes of one parsed tree.
#[derive(Debug, Default)]
pub struct Arena {
    nodes: Vec<Node>,
    items: Vec<Slot>,
    pairs: Vec<Pair>,
    // Entries of containers that are still open
    item_stack: Vec<Slot>,
    pair_stack: Vec<Pair>,
}

impl Arena {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets every node while keeping the allocated capacity.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.items.clear();
        self.pairs.clear();
        self.item_stack.clear();
        self.pair_stack.clear();
    }

    /// Stores a fully initialized node, reusing spare capacity before growing.
    pub(crate) fn acquire(&mut self, node: Node) -> NodeId {
        self.nodes.push(node);
        NodeId(self.nodes.len() - 1)
    }

    /// Number of nodes in the current tree.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of nodes the arena can hold without reallocating.
    pub fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    pub(crate) fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.index())
    }

    pub(crate) fn items(&self, range: &Range<usize>) -> &[Slot] {
        self.items.get(range.clone()).unwrap_or_default()
    }

    pub(crate) fn pairs(&self, range: &Range<usize>) -> &[Pair] {
        self.pairs.get(range.clone()).unwrap_or_default()
    }

    /// Marks the start of a new array's items on the scratch stack.
    pub(crate) fn item_mark(&self) -> usize {
        self.item_stack.len()
    }

    pub(crate) fn push_item(&mut self, slot: Slot) {
        self.item_stack.push(slot);
    }

    /// Closes the array whose items start at `mark`.
    pub(crate) fn finish_array(&mut self, mark: usize) -> NodeId {
        let start = self.items.len();
        if mark < self.item_stack.len() {
            self.items.extend(self.item_stack.drain(mark..));
        }
        let range = start..self.items.len();
        self.acquire(Node::Array(range))
    }

    /// Marks the start of a new object's members on the scratch stack.
    pub(crate) fn pair_mark(&self) -> usize {
        self.pair_stack.len()
    }

    pub(crate) fn push_pair(&mut self, key: Span, value: Slot) {
        self.pair_stack.push(Pair {
            key: LazyText::new(key),
            value,
        });
    }

    /// Closes the object whose members start at `mark`.
    pub(crate) fn finish_object(&mut self, mark: usize) -> NodeId {
        let start = self.pairs.len();
        if mark < self.pair_stack.len() {
            self.pairs.extend(self.pair_stack.drain(mark..));
        }
        let range = start..self.pairs.len();
        self.acquire(Node::Object(ObjectNode::new(range)))
    }
}
