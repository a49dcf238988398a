//! Newline-delimited JSON codec for the stdio transport.
//!
//! Each frame is one JSON value on one line. A line that fails to parse is
//! yielded as an item-level error so the stream keeps going; only I/O
//! failures end it.

use bytes::{Buf, BufMut, BytesMut};
use serde::{Serialize, de::DeserializeOwned};
use std::marker::PhantomData;
use tokio_util::codec::{Decoder, Encoder};

use crate::error::McpError;

/// Default maximum line length (16 MB).
pub const DEFAULT_MAX_LENGTH: usize = 16 * 1024 * 1024;

/// Outcome of decoding one line
pub type Frame<T> = std::result::Result<T, McpError>;

/// Newline-delimited JSON codec.
#[derive(Debug)]
pub struct NdJsonCodec<T> {
    _phantom: PhantomData<T>,
    max_length: usize,
    /// Bytes of `src` already searched for a newline
    next_index: usize,
    /// Skipping the remainder of an oversized line
    discarding: bool,
}

impl<T> NdJsonCodec<T> {
    /// Create a codec with the default max length.
    pub fn new() -> Self {
        Self::with_max_length(DEFAULT_MAX_LENGTH)
    }

    /// Create a codec with a custom max length.
    pub fn with_max_length(max_length: usize) -> Self {
        Self {
            _phantom: PhantomData,
            max_length,
            next_index: 0,
            discarding: false,
        }
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    fn too_large(&self, length: usize) -> Frame<T> {
        Err(McpError::Transport(format!(
            "Message too large: {} > {}",
            length, self.max_length
        )))
    }
}

impl<T> Default for NdJsonCodec<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for NdJsonCodec<T> {
    fn clone(&self) -> Self {
        Self::with_max_length(self.max_length)
    }
}

/// Strip trailing `\n` / `\r\n`; `None` for blank lines
fn trim_line(line: &[u8]) -> Option<&[u8]> {
    let end = line
        .iter()
        .rposition(|b| !b.is_ascii_whitespace())
        .map(|pos| pos + 1)?;
    Some(&line[..end])
}

impl<T: DeserializeOwned> Decoder for NdJsonCodec<T> {
    type Item = Frame<T>;
    type Error = std::io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> std::result::Result<Option<Self::Item>, Self::Error> {
        loop {
            let read_to = src.len();
            let Some(offset) = src[self.next_index..read_to].iter().position(|&b| b == b'\n') else {
                if self.discarding {
                    src.clear();
                    self.next_index = 0;
                } else if read_to > self.max_length {
                    src.clear();
                    self.next_index = 0;
                    self.discarding = true;
                    return Ok(Some(self.too_large(read_to)));
                } else {
                    self.next_index = read_to;
                }
                return Ok(None);
            };

            let pos = self.next_index + offset;
            self.next_index = 0;
            let line = src.split_to(pos);
            src.advance(1);

            if self.discarding {
                self.discarding = false;
                continue;
            }
            if pos > self.max_length {
                return Ok(Some(self.too_large(pos)));
            }

            match trim_line(&line) {
                Some(text) => return Ok(Some(serde_json::from_slice(text).map_err(McpError::from))),
                None => continue,
            }
        }
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> std::result::Result<Option<Self::Item>, Self::Error> {
        if let Some(frame) = self.decode(src)? {
            return Ok(Some(frame));
        }
        if src.is_empty() {
            return Ok(None);
        }

        // Unterminated last line
        let line = src.split();
        self.next_index = 0;
        if std::mem::take(&mut self.discarding) {
            return Ok(None);
        }
        Ok(trim_line(&line).map(|text| serde_json::from_slice(text).map_err(McpError::from)))
    }
}

impl<T, U: Serialize> Encoder<U> for NdJsonCodec<T> {
    type Error = std::io::Error;

    fn encode(&mut self, item: U, dst: &mut BytesMut) -> std::result::Result<(), Self::Error> {
        let json = serde_json::to_vec(&item)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, format!("JSON error: {}", e)))?;

        if json.len() > self.max_length {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Message too large: {} > {}", json.len(), self.max_length),
            ));
        }

        dst.reserve(json.len() + 1);
        dst.put_slice(&json);
        dst.put_u8(b'\n');
        Ok(())
    }
}
