use crate::config::ProxyConfig;
use crate::constants::{MAX_IMAGE_BYTES, MAX_REQUEST_BODY_BYTES, VISION_ROUTE};
use crate::error::ProxyError;
use crate::utils::{build_vision_request, decoded_image_len, make_openai_request};
use crate::vision::{VisionRequest, VisionResponse};
use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::StatusCode,
    routing::post,
    Json, Router,
};
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub client: Client,
    pub config: Arc<ProxyConfig>,
}

pub fn create_router(config: ProxyConfig) -> Router {
    let state = AppState {
        client: Client::new(),
        config: Arc::new(config),
    };

    Router::new()
        .route(VISION_ROUTE, post(vision_handler))
        .layer(DefaultBodyLimit::max(MAX_REQUEST_BODY_BYTES))
        .with_state(state)
}

pub async fn serve(config: ProxyConfig) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    log::info!(
        "Vision proxy listening on http://{}{} (model {})",
        listener.local_addr()?,
        VISION_ROUTE,
        config.model
    );
    axum::serve(listener, create_router(config)).await
}

/// A request that passed validation. `image_base64` is guaranteed non-empty.
#[derive(Debug, PartialEq)]
pub struct ValidatedRequest {
    pub image_base64: String,
    pub question: String,
    pub image_bytes: usize,
}

pub fn validate_request(request: VisionRequest) -> Result<ValidatedRequest, ProxyError> {
    let image_base64 = request
        .image_base64
        .filter(|data| !data.trim().is_empty())
        .ok_or(ProxyError::MissingImage)?;

    let image_bytes = decoded_image_len(&image_base64).map_err(|_| ProxyError::InvalidImage)?;
    if image_bytes as u64 > MAX_IMAGE_BYTES {
        log::debug!("Decoded image is {} bytes", image_bytes);
        return Err(ProxyError::ImageTooLarge);
    }

    Ok(ValidatedRequest {
        image_base64,
        question: request.question.unwrap_or_default(),
        image_bytes,
    })
}

// Only an image can push the body past the limit.
fn body_rejection_error(rejection: &JsonRejection) -> ProxyError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ProxyError::ImageTooLarge
    } else {
        ProxyError::InvalidBody
    }
}

pub async fn vision_handler(
    State(state): State<AppState>,
    payload: Result<Json<VisionRequest>, JsonRejection>,
) -> Result<Json<VisionResponse>, ProxyError> {
    let Json(request) = payload.map_err(|rejection| {
        log::warn!("Rejected vision request body: {}", rejection);
        body_rejection_error(&rejection)
    })?;

    let validated = validate_request(request).map_err(|e| {
        log::warn!("Vision request failed validation: {}", e);
        e
    })?;
    log::debug!(
        "Forwarding {} image bytes with a {} char question",
        validated.image_bytes,
        validated.question.chars().count()
    );

    let body = build_vision_request(
        &state.config.model,
        &validated.question,
        &validated.image_base64,
    );
    match make_openai_request(&state.client, &state.config, &body).await {
        Ok(result) => Ok(Json(VisionResponse::Success { result })),
        Err(e) => {
            log::error!("Vision request failed with {}: {}", e.status(), e);
            Err(e)
        }
    }
}
