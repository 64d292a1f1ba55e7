//! HTTP access to the reviews API.
//!
//! - [`decoder`]: incremental UTF-8 decoding across chunk boundaries
//! - [`reader`]: pull loop over a response body
//! - [`api`]: the [`ReviewsBackend`](reviewlens_core::ReviewsBackend) implementation

pub mod api;
pub mod decoder;
pub mod reader;

pub use api::ReviewsApi;
pub use decoder::Utf8Decoder;
pub use reader::drain;
