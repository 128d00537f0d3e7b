// SPDX-License-Identifier: Apache-2.0

//! Zero-copy JSON parsing into a reusable arena, with path accessors.
//!
//! The parser builds a tree whose strings and numbers stay slices of the
//! input: numbers are converted on every read and strings are unescaped on
//! the first read. [`locate_partial`] and [`parse_partial`] pull one value
//! out of text that merely embeds JSON, such as an HTML page.
//!
//! ```
//! let mut parser = jsonpart::Parser::new();
//! let root = parser.parse(r#"{"x":"va\"l","n":[1,2]}"#).unwrap();
//! assert_eq!(root.get_str(&["x"]), "va\"l");
//! assert_eq!(root.get_u64(&["n", "1"]), 2);
//! assert_eq!(root.to_string(), r#"{"x":"va\"l","n":[1,2]}"#);
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]

extern crate alloc;

mod arena;

mod escape_processor;

mod int_parser;

mod marshal;

mod number_parser;
pub use number_parser::{
    parse_f64, parse_f64_best_effort, parse_i64, parse_i64_best_effort, parse_u64,
    parse_u64_best_effort,
};

mod parse_error;
pub use parse_error::{AccessError, Construct, Malformed, NumberError, ParseError};

mod parser;
#[cfg(feature = "std")]
pub use parser::ParserPool;
pub use parser::{parse, parse_bytes, parse_partial, Document, Parser, MAX_DEPTH};

mod parser_core;

mod partial;
pub use partial::locate_partial;

mod shared;
pub use shared::Kind;

mod slice_input_buffer;

mod value;
pub use value::{Array, Object, Value};
