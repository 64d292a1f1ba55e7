//! Reviews API client.
//!
//! One client covers both deployment shapes (absolute API host or a
//! same-origin `/api` prefix); only the base URL differs.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, info};

use reviewlens_core::{
    ApiError, FragmentSink, Product, ProductId, ProductsResponse, ReviewSet, ReviewsBackend,
    SummarizeResponse,
};

use crate::reader;

/// Default timeout for the non-streaming calls.
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// HTTP implementation of [`ReviewsBackend`].
#[derive(Clone)]
pub struct ReviewsApi {
    client: Client,
    base_url: String,
    request_timeout: Duration,
}

impl ReviewsApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: normalize_base(base_url.into()),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }

    /// Use a preconfigured client (connect timeout, proxies, TLS).
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    /// Total timeout for the non-streaming calls. The summary stream is
    /// never cut off by this; it runs until the server ends it.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: String) -> Result<T, ApiError> {
        debug!(%url, "GET");
        let response = self
            .client
            .get(&url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| ApiError::request(&url, e.to_string()))?;
        read_json(url, response).await
    }
}

fn normalize_base(raw: String) -> String {
    raw.trim().trim_end_matches('/').to_string()
}

async fn read_json<T: DeserializeOwned>(
    url: String,
    response: reqwest::Response,
) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        let error_body = response.text().await.unwrap_or_default();
        return Err(ApiError::status(url, status.as_u16(), &error_body));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::request(url, format!("invalid response body: {e}")))
}

/// Statuses that by definition carry no body to stream.
fn has_no_body(status: StatusCode) -> bool {
    matches!(status, StatusCode::NO_CONTENT | StatusCode::RESET_CONTENT)
}

#[async_trait]
impl ReviewsBackend for ReviewsApi {
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        let body: ProductsResponse = self.get_json(self.url("/products")).await?;
        Ok(body.products)
    }

    async fn fetch_reviews(&self, product_id: ProductId) -> Result<ReviewSet, ApiError> {
        self.get_json(self.url(&format!("/products/{product_id}/reviews")))
            .await
    }

    async fn summarize_reviews(&self, product_id: ProductId) -> Result<String, ApiError> {
        let url = self.url(&format!("/products/{product_id}/reviews/summarize"));
        debug!(%url, "POST");
        let response = self
            .client
            .post(&url)
            .timeout(self.request_timeout)
            .send()
            .await
            .map_err(|e| ApiError::request(&url, e.to_string()))?;
        let body: SummarizeResponse = read_json(url, response).await?;
        Ok(body.summary)
    }

    async fn stream_summary(
        &self,
        product_id: ProductId,
        on_fragment: &mut FragmentSink<'_>,
    ) -> Result<(), ApiError> {
        let url = self.url(&format!("/products/{product_id}/reviews/summarize-stream"));
        let started = Instant::now();
        debug!(%url, "Opening summary stream");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ApiError::request(&url, e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(ApiError::status(url, status.as_u16(), &error_body));
        }

        let body = if has_no_body(status) {
            None
        } else {
            Some(response.bytes_stream())
        };

        let mut delivered = 0usize;
        reader::drain(body, |text| {
            delivered += text.len();
            on_fragment(text);
        })
        .await?;

        info!(
            product_id = %product_id,
            bytes = delivered,
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Summary stream finished"
        );
        Ok(())
    }
}
