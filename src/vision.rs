use serde::{Deserialize, Serialize};

// Upstream chat completions API.

#[derive(Debug, Deserialize)]
pub struct VisionMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VisionChoice {
    pub message: VisionMessage,
}

#[derive(Debug, Deserialize)]
pub struct VisionApiResponse {
    #[serde(default)]
    pub choices: Vec<VisionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiErrorDetail,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorDetail {
    #[serde(default)]
    pub message: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub code: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ImageUrl {
    pub url: String,
    pub detail: String,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum VisionContent {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "image_url")]
    ImageUrl { image_url: ImageUrl },
}

#[derive(Debug, Serialize)]
pub struct VisionMessageRole {
    pub role: String,
    pub content: Vec<VisionContent>,
}

#[derive(Debug, Serialize)]
pub struct OpenAiVisionRequestBody {
    pub model: String,
    pub messages: Vec<VisionMessageRole>,
    pub max_tokens: u32,
}

// Proxy endpoint payloads.

/// Body of `POST /api/assistants/vision`.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VisionRequest {
    /// Raw base64, no `data:` prefix.
    #[serde(default)]
    pub image_base64: Option<String>,
    /// Passed through verbatim; absent or null is sent as an empty question.
    #[serde(default)]
    pub question: Option<String>,
}

/// Either `{"result": ...}` or `{"error": ...}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum VisionResponse {
    Success { result: String },
    Failure { error: String },
}
