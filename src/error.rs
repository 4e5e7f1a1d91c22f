use crate::constants::{
    ERR_CONTEXT_LENGTH, ERR_EMPTY_RESPONSE, ERR_GENERIC, ERR_IMAGE_TOO_LARGE, ERR_INVALID_API_KEY,
    ERR_INVALID_BODY, ERR_INVALID_IMAGE, ERR_NO_IMAGE, ERR_RATE_LIMIT,
};
use crate::vision::VisionResponse;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

#[derive(Debug, thiserror::Error, PartialEq)]
pub enum ProxyError {
    #[error("{}", ERR_NO_IMAGE)]
    MissingImage,

    #[error("{}", ERR_INVALID_BODY)]
    InvalidBody,

    #[error("{}", ERR_INVALID_IMAGE)]
    InvalidImage,

    #[error("{}", ERR_IMAGE_TOO_LARGE)]
    ImageTooLarge,

    #[error("{}", ERR_CONTEXT_LENGTH)]
    UpstreamContext,

    #[error("{}", ERR_INVALID_API_KEY)]
    UpstreamAuth,

    #[error("{}", ERR_RATE_LIMIT)]
    UpstreamRateLimit,

    /// Carries the upstream message verbatim when there is one.
    #[error("{}", upstream_text(.0))]
    UpstreamOther(String),

    #[error("{}", ERR_EMPTY_RESPONSE)]
    EmptyResponse,
}

impl ProxyError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingImage
            | Self::InvalidBody
            | Self::InvalidImage
            | Self::ImageTooLarge
            | Self::UpstreamContext => StatusCode::BAD_REQUEST,
            Self::UpstreamAuth => StatusCode::UNAUTHORIZED,
            Self::UpstreamRateLimit => StatusCode::TOO_MANY_REQUESTS,
            Self::UpstreamOther(_) | Self::EmptyResponse => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Maps a failure raised around the upstream call onto a user-facing kind.
    /// Matching is on substrings of the provider's message text.
    pub fn from_upstream_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains("maximum context length") {
            Self::UpstreamContext
        } else if message.contains("invalid_api_key") {
            Self::UpstreamAuth
        } else if message.contains("rate_limit_exceeded") {
            Self::UpstreamRateLimit
        } else {
            Self::UpstreamOther(message)
        }
    }
}

fn upstream_text(message: &str) -> &str {
    if message.is_empty() {
        ERR_GENERIC
    } else {
        message
    }
}

impl From<reqwest::Error> for ProxyError {
    fn from(err: reqwest::Error) -> Self {
        Self::from_upstream_message(err.to_string())
    }
}

impl IntoResponse for ProxyError {
    fn into_response(self) -> Response {
        let body = VisionResponse::Failure {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Image must be 20MB or smaller (selected file is {size} bytes)")]
    ImageTooLarge { size: u64 },

    #[error("Unsupported image type {0}. Use JPEG, PNG, WEBP or GIF.")]
    UnsupportedImageType(String),

    #[error("Failed to read image file: {0}")]
    ReadImage(#[source] std::io::Error),

    #[error("The selected image is empty")]
    EmptyImage,

    #[error("A request is already in progress")]
    Busy,

    /// The `error` field of a non-2xx proxy response, or a fallback.
    #[error("{0}")]
    Proxy(String),

    #[error("Failed to reach the server: {0}")]
    Http(#[from] reqwest::Error),
}
