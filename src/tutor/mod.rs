pub mod analyzer;
pub mod api_types;
pub mod canned;
pub mod mock;
pub mod remote;
pub mod worker;

pub use mock::{Latency, MockResponder};
pub use remote::{RemoteResponder, TutorApiClient};
pub use worker::TutorWorker;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::config::{AppConfig, ResponderMode};

/// What the UI hands to a responder for one user submission.
#[derive(Debug, Clone, PartialEq)]
pub struct TutorRequest {
    pub user_id: String,
    pub message: String,
    pub code_snippet: Option<String>,
    pub conversation_id: Option<String>,
}

impl TutorRequest {
    pub fn new(
        user_id: impl Into<String>,
        message: impl Into<String>,
        code_snippet: Option<String>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            message: message.into(),
            code_snippet,
            conversation_id: None,
        }
    }

    pub fn in_conversation(mut self, conversation_id: impl Into<String>) -> Self {
        self.conversation_id = Some(conversation_id.into());
        self
    }
}

/// Assistant answer plus whatever metadata the responder could supply.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub content: String,
    pub explanation: Option<String>,
    pub confidence: Option<f32>,
}

impl Reply {
    pub fn text(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            explanation: None,
            confidence: None,
        }
    }
}

/// Line highlights and feature weights for a snippet.
#[derive(Debug, Clone, PartialEq)]
pub struct CodeExplanation {
    pub highlighted_lines: Vec<u32>,
    pub feature_importance: BTreeMap<String, f64>,
    pub text: String,
}

/// Produces assistant replies. Implementations never fail: problems degrade
/// into a fallback reply.
#[async_trait]
pub trait Responder: Send + Sync {
    fn name(&self) -> &str;

    async fn reply(&self, request: &TutorRequest) -> Reply;
}

/// Pick the responder variant named in the configuration.
pub fn build_responder(config: &AppConfig) -> Arc<dyn Responder> {
    match config.responder {
        ResponderMode::Mock => Arc::new(MockResponder::new(Latency::from_millis(
            config.latency_min_ms,
            config.latency_max_ms,
        ))),
        ResponderMode::Remote => Arc::new(RemoteResponder::new(TutorApiClient::from_config(config))),
    }
}
