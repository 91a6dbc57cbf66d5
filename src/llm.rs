use crate::{
    config, log_internal,
    volatile_state::{Role, Turn},
};

/// Anything which can continue a conversation.
#[serenity::async_trait]
pub trait Backend: Send + Sync {
    /// Generate the next model turn.  `turns` ends with the new user turn.
    async fn generate(&self, turns: &[Turn], system: &str) -> Result<String, BackendError>;
}

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API returned {status}: {message}")]
    Status {
        status: reqwest::StatusCode,
        message: String,
    },
    #[error("could not decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(serde::Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest<'a> {
    /// Conversation to continue, oldest first
    contents: Vec<Content<'a>>,
    /// Fixed persona
    system_instruction: SystemInstruction<'a>,
}

#[derive(serde::Serialize)]
struct Content<'a> {
    role: Role,
    parts: [Part<'a>; 1],
}

#[derive(serde::Serialize)]
struct SystemInstruction<'a> {
    parts: [Part<'a>; 1],
}

#[derive(serde::Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(serde::Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(serde::Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(serde::Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(serde::Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

#[derive(serde::Deserialize)]
struct ErrorResponse {
    error: ErrorBody,
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    message: String,
}

impl<'a> GenerateContentRequest<'a> {
    fn new(turns: &'a [Turn], system: &'a str) -> Self {
        let contents = turns
            .iter()
            .map(|turn| Content {
                role: turn.role,
                parts: [Part { text: &turn.text }],
            })
            .collect();

        Self {
            contents,
            system_instruction: SystemInstruction {
                parts: [Part { text: system }],
            },
        }
    }
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate.  Empty if the model produced nothing.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<String>()
            })
            .unwrap_or_default()
    }
}

/// Google Gemini `generateContent` client
pub struct Gemini {
    http: reqwest::Client,
    url: String,
    api_key: String,
}

impl Gemini {
    pub fn new(cfg: &config::Gemini) -> Result<Self, BackendError> {
        let http = reqwest::Client::builder().timeout(cfg.timeout()).build()?;
        let url = format!(
            "{}/models/{}:generateContent",
            cfg.api_base.trim_end_matches('/'),
            cfg.model
        );

        Ok(Self {
            http,
            url,
            api_key: cfg.api_key.clone(),
        })
    }
}

#[serenity::async_trait]
impl Backend for Gemini {
    async fn generate(&self, turns: &[Turn], system: &str) -> Result<String, BackendError> {
        let request = GenerateContentRequest::new(turns, system);

        log_internal!("Sending request to {}... ", self.url);
        let response = self
            .http
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(BackendError::Status {
                status,
                message: error_message(&body),
            });
        }
        log_internal!("Sending request to {}... done", self.url);

        let response: GenerateContentResponse = serde_json::from_str(&body)?;
        Ok(response.text())
    }
}

/// Pull the human-readable message out of an API error body, falling back to the raw body.
fn error_message(body: &str) -> String {
    serde_json::from_str::<ErrorResponse>(body)
        .map(|e| e.error.message)
        .unwrap_or_else(|_| body.to_owned())
}
