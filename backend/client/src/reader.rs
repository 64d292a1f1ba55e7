//! Stream Reader Loop
//!
//! Pulls chunks from an open response body until it is exhausted or fails,
//! pushing each decoded fragment to a callback as soon as it is available.

use futures::{Stream, StreamExt};
use tracing::debug;

use reviewlens_core::StreamError;

use crate::decoder::Utf8Decoder;

/// Drive `body` to completion.
///
/// `None` means the server gave no streamable body and fails with
/// [`StreamError::NoBody`] before any read. A failed read ends the loop with
/// [`StreamError::Transport`]; fragments already delivered stay delivered.
/// Empty fragments are never passed to `on_fragment`.
pub async fn drain<S, B, E, F>(body: Option<S>, mut on_fragment: F) -> Result<(), StreamError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
    F: FnMut(&str),
{
    let Some(body) = body else {
        return Err(StreamError::NoBody);
    };
    let mut body = std::pin::pin!(body);
    let mut decoder = Utf8Decoder::new();
    let mut chunks = 0usize;
    let mut bytes = 0usize;

    while let Some(next) = body.next().await {
        let chunk = match next {
            Ok(chunk) => chunk,
            Err(err) => {
                let err = StreamError::transport(err);
                debug!(chunks, bytes, error = %err, "Stream read failed");
                return Err(err);
            }
        };
        let chunk = chunk.as_ref();
        chunks += 1;
        bytes += chunk.len();

        let text = decoder.decode(chunk);
        if !text.is_empty() {
            on_fragment(&text);
        }
    }

    let tail = decoder.flush();
    if !tail.is_empty() {
        on_fragment(&tail);
    }

    debug!(chunks, bytes, "Stream drained");
    Ok(())
}
