use thiserror::Error;

/// Failure while consuming a streamed response body.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("server responded without a streamable body")]
    NoBody,

    #[error("stream transport failed: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl StreamError {
    pub fn transport<E>(err: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        Self::Transport(err.into())
    }
}

/// Top-level error type for calls against the reviews API.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request to {url} failed: {reason}")]
    Request {
        url: String,
        status: Option<u16>,
        reason: String,
    },

    #[error("summary stream failed: {0}")]
    Stream(#[from] StreamError),
}

impl ApiError {
    /// Network or decode failure with no HTTP status attached.
    pub fn request(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Request {
            url: url.into(),
            status: None,
            reason: reason.into(),
        }
    }

    /// Non-success HTTP status.
    pub fn status(url: impl Into<String>, status: u16, body: &str) -> Self {
        let reason = if body.trim().is_empty() {
            format!("server returned {status}")
        } else {
            format!("server returned {status}: {}", body.trim())
        };
        Self::Request {
            url: url.into(),
            status: Some(status),
            reason,
        }
    }

    /// Request failures surface as a retryable failed state. Stream failures
    /// are only ever restarted explicitly.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::Request { .. })
    }

    pub fn http_status(&self) -> Option<u16> {
        match self {
            Self::Request { status, .. } => *status,
            Self::Stream(_) => None,
        }
    }
}
