use std::sync::Arc;

use tokio::sync::mpsc;

use super::api_types::{ExplainResponse, ProgressUpdate, RecommendationResponse};
use super::{CodeExplanation, Responder, TutorApiClient};
use crate::challenges;
use crate::common::{TutorCommand, TutorEvent};

/// Async side of the app: turns UI commands into responder and API calls.
///
/// Every command runs in its own task, so replies come back in completion
/// order and a slow reply never holds up a later one. `api` is `None` when
/// the app runs fully offline.
pub struct TutorWorker {
    responder: Arc<dyn Responder>,
    api: Option<TutorApiClient>,
    command_receiver: mpsc::Receiver<TutorCommand>,
    event_sender: mpsc::Sender<TutorEvent>,
}

impl TutorWorker {
    pub fn new(
        responder: Arc<dyn Responder>,
        api: Option<TutorApiClient>,
        command_receiver: mpsc::Receiver<TutorCommand>,
        event_sender: mpsc::Sender<TutorEvent>,
    ) -> Self {
        Self {
            responder,
            api,
            command_receiver,
            event_sender,
        }
    }

    /// Process commands until every sender is dropped. Tasks already spawned
    /// keep running and still deliver their events.
    pub async fn run(mut self) {
        log::info!("Tutor worker started (responder: {})", self.responder.name());

        while let Some(command) = self.command_receiver.recv().await {
            self.handle_command(command);
        }

        log::info!("Tutor worker stopped: command channel closed");
    }

    fn handle_command(&self, command: TutorCommand) {
        let events = self.event_sender.clone();
        match command {
            TutorCommand::Ask {
                request_id,
                conversation_id,
                request,
            } => {
                let responder = self.responder.clone();
                tokio::spawn(async move {
                    let reply = responder.reply(&request).await;
                    log::debug!("Reply ready for request {request_id}");
                    send(
                        &events,
                        TutorEvent::ReplyReady {
                            request_id,
                            conversation_id,
                            reply,
                        },
                    )
                    .await;
                });
            }
            TutorCommand::CheckHealth => {
                let api = self.api.clone();
                tokio::spawn(async move {
                    let healthy = match api {
                        Some(api) => api.health().await,
                        None => false,
                    };
                    send(&events, TutorEvent::HealthChecked(healthy)).await;
                });
            }
            TutorCommand::FetchRecommendation { user_id } => {
                let api = self.api.clone();
                tokio::spawn(async move {
                    let task = match api {
                        Some(api) => {
                            let response = api.recommend(&user_id).await;
                            challenges::recommendation_from(&response)
                        }
                        None => challenges::default_recommendation(),
                    };
                    let task = task.or_else(|| {
                        challenges::recommendation_from(&RecommendationResponse::fallback())
                    });
                    if let Some(task) = task {
                        send(&events, TutorEvent::RecommendationReady(task)).await;
                    }
                });
            }
            TutorCommand::ExplainCode { code, prediction } => {
                let api = self.api.clone();
                tokio::spawn(async move {
                    let response = match api {
                        Some(api) => api.explain(&code, &prediction).await,
                        None => ExplainResponse::fallback(),
                    };
                    let explanation = CodeExplanation {
                        highlighted_lines: response.highlighted_lines,
                        feature_importance: response.feature_importance,
                        text: response.explanation_text,
                    };
                    send(&events, TutorEvent::ExplanationReady(explanation)).await;
                });
            }
            TutorCommand::ReportProgress {
                user_id,
                challenge_id,
                success,
                time_spent_secs,
            } => {
                let Some(api) = self.api.clone() else {
                    log::debug!("Offline mode: progress for challenge {challenge_id} not reported");
                    return;
                };
                tokio::spawn(async move {
                    let update = ProgressUpdate {
                        user_id,
                        challenge_id,
                        success,
                        time_spent: time_spent_secs,
                    };
                    api.update_progress(&update).await;
                });
            }
        }
    }
}

async fn send(events: &mpsc::Sender<TutorEvent>, event: TutorEvent) {
    if let Err(err) = events.send(event).await {
        log::warn!("Failed to deliver tutor event to UI: {err}");
    }
}
