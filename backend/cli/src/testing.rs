//! Canned backend for command tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{TimeZone, Utc};

use reviewlens_config::ReviewLensConfig;
use reviewlens_core::{
    ApiError, FragmentSink, Product, ProductId, Review, ReviewSet, ReviewsBackend, StreamError,
};

use crate::context::AppContext;

#[derive(Default)]
pub struct FakeBackend {
    pub products: Vec<Product>,
    pub reviews: Vec<Review>,
    pub cached_summary: Option<String>,
    pub fragments: Vec<&'static str>,
    pub fail_stream: bool,
    pub fail_fetch: bool,
}

impl FakeBackend {
    pub fn into_context(self) -> AppContext {
        let mut config = ReviewLensConfig::default();
        config.catalog.retries = 0;
        AppContext::with_backend(Arc::new(self), &config)
    }
}

pub fn product(id: u64, name: &str, price: f64) -> Product {
    Product {
        id: ProductId::new(id).unwrap(),
        name: name.to_string(),
        description: None,
        price,
        image: format!("https://img.example/{id}.png"),
    }
}

pub fn review(id: u64, author: &str, rating: u8, day: u32, content: &str) -> Review {
    Review {
        id,
        author: author.to_string(),
        content: content.to_string(),
        rating,
        created_at: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
    }
}

#[async_trait]
impl ReviewsBackend for FakeBackend {
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        if self.fail_fetch {
            return Err(ApiError::status("http://test/products", 500, "boom"));
        }
        Ok(self.products.clone())
    }

    async fn fetch_reviews(&self, product_id: ProductId) -> Result<ReviewSet, ApiError> {
        if self.fail_fetch {
            return Err(ApiError::status(
                format!("http://test/products/{product_id}/reviews"),
                500,
                "boom",
            ));
        }
        Ok(ReviewSet {
            reviews: self.reviews.clone(),
            summary: self.cached_summary.clone(),
        })
    }

    async fn summarize_reviews(&self, _product_id: ProductId) -> Result<String, ApiError> {
        Ok(self.fragments.concat())
    }

    async fn stream_summary(
        &self,
        _product_id: ProductId,
        on_fragment: &mut FragmentSink<'_>,
    ) -> Result<(), ApiError> {
        for fragment in &self.fragments {
            on_fragment(fragment);
            tokio::task::yield_now().await;
        }
        if self.fail_stream {
            return Err(StreamError::transport("connection reset").into());
        }
        Ok(())
    }
}
