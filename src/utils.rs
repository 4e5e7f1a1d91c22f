use crate::config::ProxyConfig;
use crate::constants::{VISION_DETAIL, VISION_MAX_TOKENS};
use crate::error::ProxyError;
use crate::vision::{
    ApiErrorBody, ImageUrl, OpenAiVisionRequestBody, VisionApiResponse, VisionContent,
    VisionMessageRole,
};
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::{
    header::{HeaderMap, HeaderValue, InvalidHeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Client,
};
use std::{io, path::Path};

pub fn build_headers(api_key: &str) -> Result<HeaderMap, InvalidHeaderValue> {
    let mut headers = HeaderMap::new();
    headers.insert(
        AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {}", api_key))?,
    );
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    Ok(headers)
}

pub fn create_spinner(color: &str, message: String) -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template(&format!("{{spinner:.{}}} {{msg}}", color)),
    );
    spinner.enable_steady_tick(100);
    spinner.set_message(message);

    spinner
}

pub async fn encode_image(image_path: &Path) -> io::Result<String> {
    let buffer = tokio::fs::read(image_path).await?;
    Ok(base64::encode(buffer))
}

pub fn to_data_uri(mime_type: &str, image_base64: &str) -> String {
    format!("data:{};base64,{}", mime_type, image_base64)
}

/// `data:image/png;base64,AAAA` -> `AAAA`. Input without a prefix is returned as is.
pub fn strip_data_uri_prefix(data_uri: &str) -> &str {
    match data_uri.strip_prefix("data:") {
        Some(rest) => rest.split_once(',').map_or(data_uri, |(_, payload)| payload),
        None => data_uri,
    }
}

/// Decoded byte length of a base64 payload; fails on malformed input.
pub fn decoded_image_len(image_base64: &str) -> Result<usize, base64::DecodeError> {
    base64::decode(image_base64.trim()).map(|bytes| bytes.len())
}

pub fn build_vision_request(model: &str, question: &str, image_base64: &str) -> OpenAiVisionRequestBody {
    OpenAiVisionRequestBody {
        model: model.to_string(),
        messages: vec![VisionMessageRole {
            role: "user".to_string(),
            content: vec![
                VisionContent::Text {
                    text: question.to_string(),
                },
                VisionContent::ImageUrl {
                    // Always labelled JPEG; the original MIME type is not forwarded.
                    image_url: ImageUrl {
                        url: to_data_uri("image/jpeg", image_base64),
                        detail: VISION_DETAIL.to_string(),
                    },
                },
            ],
        }],
        max_tokens: VISION_MAX_TOKENS,
    }
}

pub async fn process_vision_response(response: reqwest::Response) -> Result<String, ProxyError> {
    let api_response = response.json::<VisionApiResponse>().await?;
    api_response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .filter(|content| !content.is_empty())
        .ok_or(ProxyError::EmptyResponse)
}

/// Flattens an upstream failure into one line that keeps the provider's status,
/// error code, error type and message, so the substring classifier can see them.
pub fn describe_upstream_failure(status: reqwest::StatusCode, body: &str) -> String {
    match serde_json::from_str::<ApiErrorBody>(body) {
        Ok(ApiErrorBody { error }) => {
            let mut parts = vec![status.as_u16().to_string()];
            parts.extend(error.code);
            parts.extend(error.kind);
            format!("{}: {}", parts.join(" "), error.message)
        }
        Err(_) if body.trim().is_empty() => format!("{} status code (no body)", status.as_u16()),
        Err(_) => format!("{}: {}", status.as_u16(), body.trim()),
    }
}

pub async fn make_openai_request(
    client: &Client,
    config: &ProxyConfig,
    request_body: &OpenAiVisionRequestBody,
) -> Result<String, ProxyError> {
    let headers = build_headers(&config.api_key)
        .map_err(|e| ProxyError::from_upstream_message(e.to_string()))?;

    let response = client
        .post(&config.api_url)
        .headers(headers)
        .json(request_body)
        .send()
        .await?;

    if response.status().is_success() {
        process_vision_response(response).await
    } else {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        let message = describe_upstream_failure(status, &body);
        log::warn!("Upstream vision request failed: {}", message);
        Err(ProxyError::from_upstream_message(message))
    }
}
