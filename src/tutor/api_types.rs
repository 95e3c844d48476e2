//! Request/response bodies of the remote tutoring API, with the payloads
//! substituted when a call fails.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChatRequest {
    pub user_id: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conversation_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ChatResponse {
    pub reply: String,
    #[serde(default)]
    pub explanation: Option<String>,
    pub confidence_score: f32,
    #[serde(default)]
    pub code_suggestion: Option<String>,
    #[serde(default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub learning_objective: Option<String>,
}

impl ChatResponse {
    pub fn fallback() -> Self {
        Self {
            reply: "I'm having trouble connecting to the AI service. Please try again.".to_string(),
            explanation: None,
            confidence_score: 0.0,
            code_suggestion: None,
            error_type: None,
            learning_objective: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RecommendationResponse {
    pub challenge_id: String,
    pub title: String,
    pub description: String,
    pub difficulty: String,
    pub reason: String,
    pub confidence: f32,
}

impl RecommendationResponse {
    pub fn fallback() -> Self {
        Self {
            challenge_id: "1".to_string(),
            title: "Start with Loop Errors".to_string(),
            description: "Learn to debug common loop mistakes".to_string(),
            difficulty: "Easy".to_string(),
            reason: "This is a great starting point for beginners!".to_string(),
            confidence: 0.85,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainRequest {
    pub code_snippet: String,
    pub model_prediction: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ExplainResponse {
    pub highlighted_lines: Vec<u32>,
    pub feature_importance: BTreeMap<String, f64>,
    pub explanation_text: String,
}

impl ExplainResponse {
    pub fn fallback() -> Self {
        Self {
            highlighted_lines: Vec::new(),
            feature_importance: BTreeMap::new(),
            explanation_text: "XAI explanation unavailable".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProgressUpdate {
    pub user_id: String,
    pub challenge_id: String,
    pub success: bool,
    pub time_spent: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chat_request_omits_absent_optionals() {
        let request = ChatRequest {
            user_id: "anonymous".to_string(),
            message: "hi".to_string(),
            code_snippet: None,
            conversation_id: None,
        };

        let json = serde_json::to_value(&request).unwrap();

        assert_eq!(json, serde_json::json!({"user_id": "anonymous", "message": "hi"}));
    }

    #[test]
    fn chat_response_tolerates_missing_optionals() {
        let response: ChatResponse =
            serde_json::from_str(r#"{"reply": "Add a colon", "confidence_score": 0.92}"#).unwrap();

        assert_eq!(response.reply, "Add a colon");
        assert!(response.explanation.is_none());
        assert!(response.learning_objective.is_none());
    }
}
