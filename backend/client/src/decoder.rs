//! Incremental UTF-8 decoding.
//!
//! Network chunk boundaries are arbitrary, so a multi-byte character can be
//! cut in half. The decoder holds back a trailing incomplete sequence until
//! the next chunk completes it, and only substitutes U+FFFD at `flush()` time
//! for bytes that never completed.

use std::borrow::Cow;

const BOM: &[u8] = b"\xEF\xBB\xBF";
const REPLACEMENT: char = '\u{FFFD}';

/// Stateful byte-to-text decoder for a single stream.
///
/// Concatenating the output of every `decode` call plus the final `flush`
/// yields the same text as a one-shot lossy decode of the whole byte stream,
/// whatever the chunking. A leading byte-order mark is dropped.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    pending: Vec<u8>,
    bom_checked: bool,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes currently held back waiting for the rest of a character.
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }

    /// Decode as much of `chunk` as is complete.
    pub fn decode(&mut self, chunk: &[u8]) -> String {
        let mut buf = std::mem::take(&mut self.pending);
        buf.extend_from_slice(chunk);

        let mut start = 0;
        if !self.bom_checked {
            if buf.len() < BOM.len() && BOM.starts_with(&buf) {
                self.pending = buf;
                return String::new();
            }
            self.bom_checked = true;
            if buf.starts_with(BOM) {
                start = BOM.len();
            }
        }

        let mut input = &buf[start..];
        let mut out = String::with_capacity(input.len());
        loop {
            match std::str::from_utf8(input) {
                Ok(valid) => {
                    out.push_str(valid);
                    break;
                }
                Err(err) => {
                    let (valid, rest) = input.split_at(err.valid_up_to());
                    out.push_str(&String::from_utf8_lossy(valid));
                    match err.error_len() {
                        Some(len) => {
                            out.push(REPLACEMENT);
                            input = &rest[len..];
                        }
                        // Incomplete sequence at the end: wait for more bytes.
                        None => {
                            self.pending = rest.to_vec();
                            break;
                        }
                    }
                }
            }
        }
        out
    }

    /// End of stream. Decodes whatever is held back, replacing a truncated
    /// sequence with U+FFFD, and resets the decoder for reuse.
    pub fn flush(&mut self) -> String {
        let pending = std::mem::take(&mut self.pending);
        self.bom_checked = false;
        match String::from_utf8_lossy(&pending) {
            Cow::Borrowed(s) => s.to_owned(),
            Cow::Owned(s) => s,
        }
    }
}
