use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::challenges::DifficultyFilter;
use crate::common::{
    Challenge, ConversationId, RecommendedTask, Role, TutorCommand, TutorEvent,
};
use crate::history::{ConversationStore, StoreError};
use crate::preferences::{StudentSession, Theme, ThemePreference, profile};
use crate::storage::LocalStorage;
use crate::tutor::{CodeExplanation, TutorRequest};

const MAX_DEBUG_EVENTS: usize = 100;

/// Page routes of the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Page {
    #[default]
    Home,
    Auth,
    Chat,
    Challenges,
    Profile,
    Contact,
    About,
}

impl Page {
    pub const ALL: [Page; 7] = [
        Page::Home,
        Page::Auth,
        Page::Chat,
        Page::Challenges,
        Page::Profile,
        Page::Contact,
        Page::About,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Page::Home => "Home",
            Page::Auth => "Sign in",
            Page::Chat => "Chat",
            Page::Challenges => "Challenges",
            Page::Profile => "Profile",
            Page::Contact => "Contact",
            Page::About => "About",
        }
    }
}

/// Event shown in the status panel
#[derive(Debug, Clone)]
pub struct DebugEvent {
    pub timestamp: DateTime<Utc>,
    pub event_type: String,
    pub message: String,
}

/// Auth form fields.
#[derive(Debug, Default)]
pub struct AuthForm {
    pub student_id: String,
    pub name: String,
    pub consent: bool,
    pub error: Option<String>,
}

/// Local UI state plus the stores it renders.
pub struct AppState {
    pub store: ConversationStore,
    pub theme: ThemePreference,
    storage: Arc<dyn LocalStorage>,
    pub session: Option<StudentSession>,
    pub responder_name: String,
    pub page: Page,
    pub input_text: String,
    pub code_input: String,
    pub show_code_box: bool,
    /// In-flight replies, request id -> target conversation
    pub pending: HashMap<Uuid, ConversationId>,
    pub recommendation: Option<RecommendedTask>,
    pub backend_healthy: Option<bool>,
    pub last_explanation: Option<CodeExplanation>,
    pub challenge_filter: DifficultyFilter,
    pub revealed_hints: HashMap<String, usize>,
    pub completed_challenges: HashSet<String>,
    challenge_started: HashMap<String, DateTime<Utc>>,
    pub auth_form: AuthForm,
    pub debug_events: Vec<DebugEvent>,
}

impl AppState {
    pub fn new(
        store: ConversationStore,
        storage: Arc<dyn LocalStorage>,
        default_theme: Theme,
        responder_name: impl Into<String>,
    ) -> Self {
        let theme = ThemePreference::load(storage.clone(), default_theme);
        let session = StudentSession::load(storage.as_ref());
        Self {
            store,
            theme,
            storage,
            session,
            responder_name: responder_name.into(),
            page: Page::default(),
            input_text: String::new(),
            code_input: String::new(),
            show_code_box: false,
            pending: HashMap::new(),
            recommendation: None,
            backend_healthy: None,
            last_explanation: None,
            challenge_filter: DifficultyFilter::default(),
            revealed_hints: HashMap::new(),
            completed_challenges: HashSet::new(),
            challenge_started: HashMap::new(),
            auth_form: AuthForm::default(),
            debug_events: Vec::new(),
        }
    }

    pub fn user_id(&self) -> String {
        profile::user_id(self.session.as_ref())
    }

    pub fn display_name(&self) -> String {
        profile::display_name(self.session.as_ref())
    }

    /// Submit the input bar. Blank text and blank code is rejected here and
    /// never reaches the store.
    pub fn submit(&mut self) -> Option<TutorCommand> {
        if self.input_text.trim().is_empty() && self.code_input.trim().is_empty() {
            return None;
        }
        let content = std::mem::take(&mut self.input_text);
        let code = std::mem::take(&mut self.code_input);
        self.show_code_box = false;
        let code = (!code.is_empty()).then_some(code);
        self.submit_message(content, code)
    }

    /// Append the user message to the current conversation and build the
    /// command that asks for a reply.
    pub fn submit_message(&mut self, content: String, code: Option<String>) -> Option<TutorCommand> {
        let conversation_id = self.store.ensure_current();
        if let Err(err) =
            self.store
                .append_message(&conversation_id, Role::User, content.clone(), code.clone())
        {
            log::warn!("Failed to record user message: {err}");
            return None;
        }

        let request_id = Uuid::new_v4();
        self.pending.insert(request_id, conversation_id.clone());
        let request = TutorRequest::new(self.user_id(), content, code)
            .in_conversation(conversation_id.as_str());
        Some(TutorCommand::Ask {
            request_id,
            conversation_id,
            request,
        })
    }

    pub fn apply_event(&mut self, event: TutorEvent) {
        match event {
            TutorEvent::ReplyReady {
                request_id,
                conversation_id,
                reply,
            } => {
                self.pending.remove(&request_id);
                let appended = self.store.append_message_with_explanation(
                    &conversation_id,
                    Role::Assistant,
                    reply.content,
                    None,
                    reply.explanation,
                );
                match appended {
                    Ok(_) => {}
                    Err(StoreError::ConversationNotFound(id)) => {
                        log::warn!("Dropping reply for deleted conversation {id}");
                        self.add_debug_event(
                            "REPLY_DROPPED".to_string(),
                            format!("Conversation {id} was deleted before its reply arrived"),
                        );
                    }
                }
            }
            TutorEvent::HealthChecked(healthy) => {
                self.backend_healthy = Some(healthy);
                self.add_debug_event(
                    "HEALTH".to_string(),
                    format!("Backend {}", if healthy { "reachable" } else { "unreachable" }),
                );
            }
            TutorEvent::RecommendationReady(task) => {
                self.add_debug_event(
                    "RECOMMENDATION".to_string(),
                    format!("Suggested: {}", task.challenge.title),
                );
                self.recommendation = Some(task);
            }
            TutorEvent::ExplanationReady(explanation) => {
                self.last_explanation = Some(explanation);
            }
        }
    }

    /// Start the recommended challenge in the chat.
    pub fn accept_recommendation(&mut self) -> Option<TutorCommand> {
        let task = self.recommendation.take()?;
        self.page = Page::Chat;
        self.submit_message(
            format!("I'd like to work on: {}", task.challenge.title),
            Some(task.challenge.buggy_code),
        )
    }

    /// Open a challenge in the chat and start its attempt timer.
    pub fn start_challenge(&mut self, challenge: &Challenge) -> Option<TutorCommand> {
        self.challenge_started
            .entry(challenge.id.clone())
            .or_insert_with(Utc::now);
        self.page = Page::Chat;
        self.submit_message(
            format!("Help me debug the \"{}\" challenge", challenge.title),
            Some(challenge.buggy_code.clone()),
        )
    }

    pub fn complete_challenge(&mut self, challenge_id: &str) -> TutorCommand {
        let time_spent_secs = self
            .challenge_started
            .remove(challenge_id)
            .map(|started| (Utc::now() - started).num_seconds().max(0) as u64)
            .unwrap_or(0);
        self.completed_challenges.insert(challenge_id.to_string());
        self.add_debug_event(
            "PROGRESS".to_string(),
            format!("Challenge {challenge_id} solved in {time_spent_secs}s"),
        );
        TutorCommand::ReportProgress {
            user_id: self.user_id(),
            challenge_id: challenge_id.to_string(),
            success: true,
            time_spent_secs,
        }
    }

    /// Ask for line highlights on a snippet the assistant replied to.
    pub fn explain(&mut self, code: &str, prediction: &str) -> TutorCommand {
        self.last_explanation = None;
        TutorCommand::ExplainCode {
            code: code.to_string(),
            prediction: prediction.to_string(),
        }
    }

    pub fn dismiss_recommendation(&mut self) {
        self.recommendation = None;
    }

    pub fn new_conversation(&mut self) {
        self.store.create_conversation();
    }

    pub fn select_conversation(&mut self, id: &ConversationId) {
        if let Err(err) = self.store.select_conversation(id) {
            log::warn!("{err}");
        }
    }

    pub fn delete_conversation(&mut self, id: &ConversationId) {
        match self.store.delete_conversation(id) {
            Ok(()) => self.add_debug_event("DELETED".to_string(), format!("Conversation {id}")),
            Err(err) => log::warn!("{err}"),
        }
    }

    pub fn is_waiting_for_reply(&self) -> bool {
        match self.store.current_id() {
            Some(current) => self.pending.values().any(|id| id == current),
            None => false,
        }
    }

    pub fn sign_in(&mut self) -> bool {
        let form = &mut self.auth_form;
        match StudentSession::sign_in(self.storage.as_ref(), &form.student_id, &form.name, form.consent) {
            Ok(session) => {
                *form = AuthForm::default();
                self.session = Some(session);
                self.page = Page::Chat;
                true
            }
            Err(err) => {
                form.error = Some(err.to_string());
                false
            }
        }
    }

    pub fn sign_out(&mut self) {
        if let Err(err) = StudentSession::sign_out(self.storage.as_ref()) {
            log::error!("Failed to clear student session: {err}");
        }
        self.session = None;
        self.page = Page::Home;
    }

    pub fn toggle_theme(&mut self) {
        if let Err(err) = self.theme.toggle() {
            log::error!("Failed to save theme preference: {err}");
        }
    }

    /// Show one more hint for `challenge_id`, up to `total`.
    pub fn reveal_hint(&mut self, challenge_id: &str, total: usize) {
        let shown = self.revealed_hints.entry(challenge_id.to_string()).or_insert(0);
        *shown = (*shown + 1).min(total);
    }

    pub fn hints_shown(&self, challenge_id: &str) -> usize {
        self.revealed_hints.get(challenge_id).copied().unwrap_or(0)
    }

    pub fn add_debug_event(&mut self, event_type: String, message: String) {
        self.debug_events.push(DebugEvent {
            timestamp: Utc::now(),
            event_type,
            message,
        });

        if self.debug_events.len() > MAX_DEBUG_EVENTS {
            self.debug_events.remove(0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::challenges;
    use crate::history::clock::testing::FixedClock;
    use crate::storage::MemoryStorage;
    use crate::tutor::Reply;

    fn state() -> AppState {
        let storage: Arc<dyn LocalStorage> = Arc::new(MemoryStorage::new());
        let store = ConversationStore::open(storage.clone(), Arc::new(FixedClock::new()));
        AppState::new(store, storage, Theme::Dark, "mock")
    }

    fn reply_for(command: &TutorCommand, content: &str) -> TutorEvent {
        match command {
            TutorCommand::Ask {
                request_id,
                conversation_id,
                ..
            } => TutorEvent::ReplyReady {
                request_id: *request_id,
                conversation_id: conversation_id.clone(),
                reply: Reply::text(content),
            },
            other => panic!("expected Ask, got {other:?}"),
        }
    }

    #[test]
    fn blank_submission_is_rejected() {
        let mut state = state();
        state.input_text = "   ".to_string();
        state.code_input = "\n".to_string();

        assert!(state.submit().is_none());
        assert!(state.store.conversations().is_empty());
    }

    #[test]
    fn submit_creates_conversation_and_records_user_message() {
        let mut state = state();
        state.input_text = "fix my loop".to_string();

        let command = state.submit().unwrap();

        let conversation = state.store.current().unwrap();
        assert_eq!(conversation.title, "fix my loop");
        assert_eq!(conversation.messages.len(), 1);
        assert!(state.input_text.is_empty());
        assert!(state.is_waiting_for_reply());
        match command {
            TutorCommand::Ask { request, .. } => {
                assert_eq!(request.message, "fix my loop");
                assert_eq!(request.user_id, "anonymous");
                assert_eq!(request.code_snippet, None);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn code_only_submission_is_accepted() {
        let mut state = state();
        state.code_input = "def f()\n    pass".to_string();

        let command = state.submit().unwrap();

        match command {
            TutorCommand::Ask { request, .. } => {
                assert_eq!(request.message, "");
                assert_eq!(request.code_snippet.as_deref(), Some("def f()\n    pass"));
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn reply_lands_in_the_conversation_it_was_asked_in() {
        let mut state = state();
        state.input_text = "first".to_string();
        let command = state.submit().unwrap();
        let asked_in = state.store.current_id().unwrap().clone();
        state.new_conversation();

        state.apply_event(reply_for(&command, "answer"));

        let conversation = state.store.get(&asked_in).unwrap();
        let contents: Vec<_> = conversation.messages.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, ["first", "answer"]);
        assert!(state.store.current().unwrap().messages.is_empty());
        assert!(state.pending.is_empty());
    }

    #[test]
    fn overlapping_replies_are_both_appended() {
        let mut state = state();
        state.input_text = "one".to_string();
        let first = state.submit().unwrap();
        state.input_text = "two".to_string();
        let second = state.submit().unwrap();

        state.apply_event(reply_for(&second, "reply two"));
        state.apply_event(reply_for(&first, "reply one"));

        let contents: Vec<_> = state
            .store
            .current()
            .unwrap()
            .messages
            .iter()
            .map(|m| m.content.as_str())
            .collect();
        assert_eq!(contents, ["one", "two", "reply two", "reply one"]);
    }

    #[test]
    fn reply_for_deleted_conversation_is_dropped() {
        let mut state = state();
        state.input_text = "doomed".to_string();
        let command = state.submit().unwrap();
        let id = state.store.current_id().unwrap().clone();
        state.delete_conversation(&id);

        state.apply_event(reply_for(&command, "too late"));

        assert!(state.store.conversations().is_empty());
        assert!(
            state
                .debug_events
                .iter()
                .any(|event| event.event_type == "REPLY_DROPPED")
        );
    }

    #[test]
    fn accepting_recommendation_sends_buggy_code() {
        let mut state = state();
        state.recommendation = challenges::default_recommendation();

        let command = state.accept_recommendation().unwrap();

        assert!(state.recommendation.is_none());
        assert_eq!(state.page, Page::Chat);
        match command {
            TutorCommand::Ask { request, .. } => {
                assert_eq!(request.message, "I'd like to work on: Off-by-One Loop Error");
                assert_eq!(
                    request.code_snippet.as_deref(),
                    Some("for i in range(10):\n    print(i)")
                );
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn completing_a_started_challenge_reports_progress() {
        let mut state = state();
        let challenge = challenges::find("2").unwrap();

        let ask = state.start_challenge(&challenge).unwrap();
        let report = state.complete_challenge("2");

        match ask {
            TutorCommand::Ask { request, .. } => {
                assert_eq!(request.code_snippet.as_deref(), Some(challenge.buggy_code.as_str()));
            }
            other => panic!("unexpected command {other:?}"),
        }
        match report {
            TutorCommand::ReportProgress {
                user_id,
                challenge_id,
                success,
                ..
            } => {
                assert_eq!(user_id, "anonymous");
                assert_eq!(challenge_id, "2");
                assert!(success);
            }
            other => panic!("unexpected command {other:?}"),
        }
        assert!(state.completed_challenges.contains("2"));
    }

    #[test]
    fn sign_in_uses_student_id_for_requests() {
        let mut state = state();
        state.auth_form = AuthForm {
            student_id: "2020CS001".to_string(),
            name: "Ada".to_string(),
            consent: true,
            error: None,
        };

        assert!(state.sign_in());

        assert_eq!(state.user_id(), "2020CS001");
        assert_eq!(state.display_name(), "Ada");
        assert_eq!(state.page, Page::Chat);
    }

    #[test]
    fn failed_sign_in_keeps_form_and_reports_error() {
        let mut state = state();
        state.auth_form.student_id = "2020CS001".to_string();
        state.auth_form.name = "Ada".to_string();

        assert!(!state.sign_in());

        assert_eq!(state.auth_form.student_id, "2020CS001");
        assert!(state.auth_form.error.as_deref().unwrap().contains("consent"));
        assert!(state.session.is_none());
    }

    #[test]
    fn sign_out_falls_back_to_anonymous() {
        let mut state = state();
        state.auth_form.student_id = "2020CS001".to_string();
        state.auth_form.name = "Ada".to_string();
        state.auth_form.consent = true;
        state.sign_in();

        state.sign_out();

        assert_eq!(state.user_id(), "anonymous");
        assert_eq!(state.display_name(), "Student");
        assert_eq!(state.page, Page::Home);
    }

    #[test]
    fn hints_reveal_one_at_a_time_up_to_total() {
        let mut state = state();

        state.reveal_hint("5", 3);
        state.reveal_hint("5", 3);
        assert_eq!(state.hints_shown("5"), 2);

        state.reveal_hint("5", 3);
        state.reveal_hint("5", 3);
        assert_eq!(state.hints_shown("5"), 3);
        assert_eq!(state.hints_shown("1"), 0);
    }

    #[test]
    fn debug_events_are_capped() {
        let mut state = state();
        for index in 0..150 {
            state.add_debug_event("TEST".to_string(), index.to_string());
        }

        assert_eq!(state.debug_events.len(), MAX_DEBUG_EVENTS);
        assert_eq!(state.debug_events[0].message, "50");
    }
}
