pub const GPT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const GPT4_VISION_MODEL: &str = "gpt-4o";
pub const DEFAULT_VISION_QUESTION: &str = "What is in this image?";
pub const VISION_DETAIL: &str = "low";
pub const VISION_MAX_TOKENS: u32 = 300;

pub const VISION_ROUTE: &str = "/api/assistants/vision";
pub const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";
pub const DEFAULT_PROXY_URL: &str = "http://127.0.0.1:3000";

/// 20 MiB, applied to the raw image bytes on both sides of the proxy.
pub const MAX_IMAGE_BYTES: u64 = 20 * 1024 * 1024;
// Base64 inflates by 4/3; leave headroom so oversized images reach the size check.
pub const MAX_REQUEST_BODY_BYTES: usize = 64 * 1024 * 1024;

pub const ALLOWED_IMAGE_MIME_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/webp", "image/gif"];

pub const CMD_SERVE: &str = "serve";
pub const CMD_CHAT: &str = "chat";
pub const CMD_ASK: &str = "ask";

pub const ERR_NO_IMAGE: &str = "No image data provided";
pub const ERR_INVALID_BODY: &str = "Request body must be a JSON object";
pub const ERR_INVALID_IMAGE: &str = "Image data is not valid base64";
pub const ERR_IMAGE_TOO_LARGE: &str = "Image size exceeds 20MB limit";
pub const ERR_CONTEXT_LENGTH: &str =
    "The request is too large for the model. Try a smaller image or a shorter question.";
pub const ERR_INVALID_API_KEY: &str = "Invalid API key. Check the server configuration.";
pub const ERR_RATE_LIMIT: &str = "Rate limit exceeded. Please try again later.";
pub const ERR_EMPTY_RESPONSE: &str = "No response content from the vision model";
pub const ERR_GENERIC: &str = "An error occurred while processing the image";
pub const ERR_CLIENT_FALLBACK: &str = "Failed to get a response from the server";
