// SPDX-License-Identifier: Apache-2.0

use alloc::format;
use alloc::string::String;

use log::debug;

use crate::parse_error::ParseError;
use crate::shared::start_end_preview;
use crate::slice_input_buffer::SliceInputBuffer;

/// Finds the value of `key` inside text that embeds JSON.
///
/// Searches for the first literal `"key"` in `input`, skips whitespace after
/// it and requires a `:`. The text right after the colon is returned; it can
/// be handed to the parser as is, since trailing text after the value is
/// ignored. An empty key returns `input` unchanged.
///
/// This is a plain substring search: a `"key":` that appears inside an
/// earlier string literal matches too.
pub fn locate_partial<'a>(input: &'a str, key: &str) -> Result<&'a str, ParseError> {
    if key.is_empty() {
        return Ok(input);
    }

    let quoted = format!("\"{key}\"");
    let Some(found) = input.find(quoted.as_str()) else {
        debug!("Partial key {key:?} not found in {} bytes of input", input.len());
        return Err(ParseError::KeyNotFound {
            key: String::from(key),
            preview: start_end_preview(input),
        });
    };

    let from_key = input.get(found..).unwrap_or_default();
    let mut buffer = SliceInputBuffer::new(from_key.get(quoted.len()..).unwrap_or_default());
    buffer.skip_whitespace();
    if !buffer.eat(":") {
        debug!("Partial key {key:?} at byte {found} is not followed by ':'");
        return Err(ParseError::InvalidPartialKey {
            key: String::from(key),
            preview: start_end_preview(from_key),
        });
    }
    Ok(buffer.rest())
}
