use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;

use super::api_types::{
    ChatRequest, ChatResponse, ExplainRequest, ExplainResponse, ProgressUpdate,
    RecommendationResponse,
};
use super::{Reply, Responder, TutorRequest};
use crate::config::AppConfig;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Status(StatusCode),
    #[error("invalid API URL: {0}")]
    InvalidUrl(String),
}

/// Client for the tutoring backend. Every public call fails soft: transport
/// errors and non-2xx answers are logged and replaced by a fixed payload.
/// Nothing is retried.
#[derive(Clone)]
pub struct TutorApiClient {
    client: Client,
    base_url: String,
}

impl TutorApiClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Self {
        let client = Client::builder().timeout(timeout).build().unwrap_or_else(|err| {
            log::warn!("Failed to build HTTP client with timeout ({err}); using defaults");
            Client::new()
        });
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(
            config.api_url.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Base URL plus `segments`, each percent-encoded as a single segment.
    fn url_with_segments(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|err| ApiError::InvalidUrl(format!("{}: {err}", self.base_url)))?;
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    pub async fn chat(&self, request: &ChatRequest) -> ChatResponse {
        match self.try_chat(request).await {
            Ok(response) => response,
            Err(err) => {
                log::error!("Chat API error: {err}");
                ChatResponse::fallback()
            }
        }
    }

    async fn try_chat(&self, request: &ChatRequest) -> Result<ChatResponse, ApiError> {
        let response = self.client.post(self.url("/chat")).json(request).send().await?;
        decode(response).await
    }

    pub async fn recommend(&self, user_id: &str) -> RecommendationResponse {
        match self.try_recommend(user_id).await {
            Ok(response) => response,
            Err(err) => {
                log::error!("Recommendation API error: {err}");
                RecommendationResponse::fallback()
            }
        }
    }

    async fn try_recommend(&self, user_id: &str) -> Result<RecommendationResponse, ApiError> {
        let url = self.url_with_segments(&["recommend", user_id])?;
        let response = self.client.get(url).send().await?;
        decode(response).await
    }

    pub async fn explain(&self, code: &str, prediction: &str) -> ExplainResponse {
        let request = ExplainRequest {
            code_snippet: code.to_string(),
            model_prediction: prediction.to_string(),
        };
        match self.try_explain(&request).await {
            Ok(response) => response,
            Err(err) => {
                log::error!("XAI API error: {err}");
                ExplainResponse::fallback()
            }
        }
    }

    async fn try_explain(&self, request: &ExplainRequest) -> Result<ExplainResponse, ApiError> {
        let response = self
            .client
            .post(self.url("/xai/explain"))
            .json(request)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn update_progress(&self, update: &ProgressUpdate) {
        match self
            .client
            .post(self.url("/progress/update"))
            .json(update)
            .send()
            .await
        {
            Ok(response) if !response.status().is_success() => {
                log::warn!("Progress update failed: {}", response.status());
            }
            Ok(_) => {}
            Err(err) => log::error!("Progress update error: {err}"),
        }
    }

    pub async fn health(&self) -> bool {
        match self.client.get(self.url("/health")).send().await {
            Ok(response) => response.status().is_success(),
            Err(err) => {
                log::warn!("Backend health check failed: {err}");
                false
            }
        }
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::Status(status));
    }
    Ok(response.json::<T>().await?)
}

/// Responder backed by `POST /chat`.
pub struct RemoteResponder {
    client: TutorApiClient,
}

impl RemoteResponder {
    pub fn new(client: TutorApiClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Responder for RemoteResponder {
    fn name(&self) -> &str {
        "remote"
    }

    async fn reply(&self, request: &TutorRequest) -> Reply {
        let body = ChatRequest {
            user_id: request.user_id.clone(),
            message: request.message.clone(),
            code_snippet: request.code_snippet.clone(),
            conversation_id: request.conversation_id.clone(),
        };
        let response = self.client.chat(&body).await;
        Reply {
            content: response.reply,
            explanation: response.explanation,
            confidence: Some(response.confidence_score),
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    /// Answer exactly one HTTP request with `status` and `body`; the handle
    /// yields the raw request that was received.
    pub async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let base_url = format!("http://{}/api", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });

        (base_url, handle)
    }

    async fn read_request(socket: &mut tokio::net::TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let read = socket.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..read]);

            let text = String::from_utf8_lossy(&buf);
            if let Some(header_end) = text.find("\r\n\r\n") {
                let content_length = text[..header_end]
                    .lines()
                    .find_map(|line| {
                        let (name, value) = line.split_once(':')?;
                        name.eq_ignore_ascii_case("content-length")
                            .then(|| value.trim().parse::<usize>().ok())
                            .flatten()
                    })
                    .unwrap_or(0);
                if buf.len() >= header_end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    /// Base URL of a port nothing listens on.
    pub async fn unreachable_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        format!("http://{addr}/api")
    }
}
