use uuid::Uuid;

use super::types::ConversationId;
use crate::tutor::TutorRequest;

/// Commands the UI sends to the tutor worker.
#[derive(Debug, Clone)]
pub enum TutorCommand {
    /// Ask the configured responder for a reply to a user message.
    /// - request_id: correlates the eventual `ReplyReady`
    /// - conversation_id: where the reply gets appended
    Ask {
        request_id: Uuid,
        conversation_id: ConversationId,
        request: TutorRequest,
    },
    /// Probe `GET /health` on the remote tutoring API.
    CheckHealth,
    /// Fetch the next recommended challenge for a student.
    FetchRecommendation { user_id: String },
    /// Request highlighted lines for a snippet and the reply it produced.
    ExplainCode { code: String, prediction: String },
    /// Report the outcome of a challenge attempt.
    ReportProgress {
        user_id: String,
        challenge_id: String,
        success: bool,
        time_spent_secs: u64,
    },
}
