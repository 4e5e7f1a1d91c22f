use crate::config::ClientConfig;
use crate::constants::{
    ALLOWED_IMAGE_MIME_TYPES, DEFAULT_VISION_QUESTION, ERR_CLIENT_FALLBACK, MAX_IMAGE_BYTES,
    VISION_ROUTE,
};
use crate::error::ClientError;
use crate::utils::{encode_image, strip_data_uri_prefix, to_data_uri};
use crate::vision::{VisionRequest, VisionResponse};
use reqwest::Client;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    pub role: Role,
    pub text: String,
    /// Data URI of the attached image, kept for local preview only.
    pub image_url: Option<String>,
}

impl Message {
    pub fn user(text: impl Into<String>, image_url: Option<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
            image_url,
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            text: text.into(),
            image_url: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImageAttachment {
    pub path: PathBuf,
    pub mime_type: String,
    pub size: u64,
}

pub trait VisionBackend {
    async fn ask(&self, request: &VisionRequest) -> Result<String, ClientError>;
}

pub struct ProxyClient {
    client: Client,
    endpoint: String,
}

impl ProxyClient {
    pub fn new(config: &ClientConfig) -> Self {
        Self {
            client: Client::new(),
            endpoint: format!("{}{}", config.proxy_url, VISION_ROUTE),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl VisionBackend for ProxyClient {
    async fn ask(&self, request: &VisionRequest) -> Result<String, ClientError> {
        let response = self.client.post(&self.endpoint).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;

        match serde_json::from_str::<VisionResponse>(&body) {
            Ok(VisionResponse::Success { result }) if status.is_success() => Ok(result),
            Ok(VisionResponse::Failure { error }) if !error.is_empty() => {
                Err(ClientError::Proxy(error))
            }
            _ => {
                log::debug!("Unusable proxy response ({}): {}", status, body);
                Err(ClientError::Proxy(ERR_CLIENT_FALLBACK.to_string()))
            }
        }
    }
}

/// MIME type as declared by the file name, the way a file picker reports it.
pub fn declared_mime_type(path: &Path) -> Option<String> {
    mime_guess::from_path(path)
        .first()
        .map(|mime| mime.essence_str().to_string())
}

/// Local checks run before anything touches the network.
pub fn check_image(size: u64, mime_type: Option<&str>) -> Result<(), ClientError> {
    if size > MAX_IMAGE_BYTES {
        return Err(ClientError::ImageTooLarge { size });
    }
    match mime_type {
        // GIFs are expected to be static but animation is not checked.
        Some(mime) if ALLOWED_IMAGE_MIME_TYPES.contains(&mime) => Ok(()),
        Some(mime) => Err(ClientError::UnsupportedImageType(mime.to_string())),
        None => Err(ClientError::UnsupportedImageType("unknown".to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Nothing to send, or a request is already in flight.
    Ignored,
    /// Text without an image is recorded locally only.
    TextOnly,
    Answered,
    Failed,
}

#[derive(Debug, Default)]
pub struct ChatSession {
    messages: Vec<Message>,
    attachment: Option<ImageAttachment>,
    preview: Option<String>,
    pub input: String,
    loading: bool,
    error: Option<String>,
    rendered: usize,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn attachment(&self) -> Option<&ImageAttachment> {
        self.attachment.as_ref()
    }

    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Messages appended since the last call; the view follows the newest entry.
    pub fn take_unrendered(&mut self) -> &[Message] {
        let start = self.rendered;
        self.rendered = self.messages.len();
        &self.messages[start..]
    }

    pub fn clear_attachment(&mut self) {
        self.error = None;
        self.attachment = None;
        self.preview = None;
    }

    /// Validates and stores an image. A rejected file leaves any previous
    /// attachment untouched.
    pub async fn select_image(&mut self, path: impl AsRef<Path>) -> Result<(), ClientError> {
        let result = self.try_select_image(path.as_ref()).await;
        if let Err(e) = &result {
            log::debug!("Image selection rejected: {}", e);
            self.error = Some(e.to_string());
        }
        result
    }

    async fn try_select_image(&mut self, path: &Path) -> Result<(), ClientError> {
        if self.loading {
            return Err(ClientError::Busy);
        }
        self.error = None;

        let size = tokio::fs::metadata(path)
            .await
            .map_err(ClientError::ReadImage)?
            .len();
        let mime_type = declared_mime_type(path);
        check_image(size, mime_type.as_deref())?;
        let mime_type = mime_type.unwrap_or_default();

        let preview = encode_image(path)
            .await
            .map(|data| to_data_uri(&mime_type, &data))
            .map_err(ClientError::ReadImage)?;

        self.attachment = Some(ImageAttachment {
            path: path.to_path_buf(),
            mime_type,
            size,
        });
        self.preview = Some(preview);
        Ok(())
    }

    pub async fn submit<B: VisionBackend>(&mut self, backend: &B) -> SubmitOutcome {
        if self.loading {
            self.error = Some(ClientError::Busy.to_string());
            return SubmitOutcome::Ignored;
        }
        self.error = None;
        let text = self.input.trim().to_string();
        if text.is_empty() && self.attachment.is_none() {
            return SubmitOutcome::Ignored;
        }

        self.loading = true;

        let outcome = match self.attachment.clone() {
            Some(attachment) => {
                let question = if text.is_empty() {
                    DEFAULT_VISION_QUESTION.to_string()
                } else {
                    text
                };
                self.messages
                    .push(Message::user(question.clone(), self.preview.clone()));

                match ask_about_image(backend, &attachment, question).await {
                    Ok(answer) => {
                        self.messages.push(Message::assistant(answer));
                        self.clear_attachment();
                        SubmitOutcome::Answered
                    }
                    Err(e) => {
                        log::warn!("Vision request failed: {}", e);
                        self.error = Some(e.to_string());
                        SubmitOutcome::Failed
                    }
                }
            }
            None => {
                self.messages.push(Message::user(text, None));
                SubmitOutcome::TextOnly
            }
        };

        self.input.clear();
        self.loading = false;
        outcome
    }
}

async fn ask_about_image<B: VisionBackend>(
    backend: &B,
    attachment: &ImageAttachment,
    question: String,
) -> Result<String, ClientError> {
    let data_uri = encode_image(&attachment.path)
        .await
        .map(|data| to_data_uri(&attachment.mime_type, &data))
        .map_err(ClientError::ReadImage)?;
    let image_base64 = strip_data_uri_prefix(&data_uri);
    if image_base64.is_empty() {
        return Err(ClientError::EmptyImage);
    }

    let request = VisionRequest {
        image_base64: Some(image_base64.to_string()),
        question: Some(question),
    };
    backend.ask(&request).await
}
