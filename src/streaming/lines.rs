//! Incremental line splitter for response bodies
//!
//! Body chunks arrive at arbitrary byte boundaries. Bytes are held until a
//! `\n` completes a line, so multi-byte UTF-8 sequences split across chunks
//! decode correctly.

use bytes::BytesMut;

/// Accumulates body bytes and yields complete lines
#[derive(Debug, Default)]
pub struct LineDecoder {
    buffer: BytesMut,
    /// Prefix of `buffer` already known to hold no `\n`
    scanned: usize,
}

impl LineDecoder {
    pub fn new() -> Self {
        Self {
            buffer: BytesMut::with_capacity(4096),
            scanned: 0,
        }
    }

    /// Add bytes and drain every line they complete
    ///
    /// Lines are returned without the terminator; a `\r` before the `\n`
    /// is dropped as well.
    pub fn push(&mut self, bytes: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(bytes);

        let mut lines = Vec::new();
        while let Some(offset) = self.buffer[self.scanned..].iter().position(|&b| b == b'\n') {
            let pos = self.scanned + offset;
            let raw = self.buffer.split_to(pos + 1);
            lines.push(decode_line(&raw[..pos]));
            self.scanned = 0;
        }
        self.scanned = self.buffer.len();
        lines
    }

    /// Flush the unterminated tail at end of input
    pub fn finish(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let raw = self.buffer.split();
        self.scanned = 0;
        Some(decode_line(&raw))
    }

    /// Bytes waiting for a line terminator
    pub fn pending(&self) -> usize {
        self.buffer.len()
    }
}

fn decode_line(raw: &[u8]) -> String {
    let raw = raw.strip_suffix(b"\r").unwrap_or(raw);
    String::from_utf8_lossy(raw).into_owned()
}
