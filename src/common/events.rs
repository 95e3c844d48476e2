use uuid::Uuid;

use super::types::{ConversationId, RecommendedTask};
use crate::tutor::{CodeExplanation, Reply};

/// Events the tutor worker sends back to the UI.
#[derive(Debug, Clone)]
pub enum TutorEvent {
    ReplyReady {
        request_id: Uuid,
        conversation_id: ConversationId,
        reply: Reply,
    },
    HealthChecked(bool),
    RecommendationReady(RecommendedTask),
    ExplanationReady(CodeExplanation),
}
