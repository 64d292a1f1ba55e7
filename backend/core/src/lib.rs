pub mod error;
pub mod traits;
pub mod types;

pub use error::{ApiError, StreamError};
pub use traits::{FragmentSink, ReviewsBackend};
pub use types::{
    GetReviewsResponse, Product, ProductId, ProductsResponse, Review, ReviewSet,
    SummarizeResponse,
};
