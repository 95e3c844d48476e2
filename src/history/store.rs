use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};

use super::clock::{Clock, MonotonicIds};
use crate::common::{Conversation, ConversationId, Message, MessageId, Role};
use crate::storage::{LocalStorage, StorageError, keys};

pub const NEW_CONVERSATION_TITLE: &str = "New Debugging Session";
const TITLE_MAX_CHARS: usize = 50;
const MAX_ID_LEAD_DAYS: i64 = 365;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("conversation not found: {0}")]
    ConversationNotFound(ConversationId),
}

/// Numbers shown on the profile page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSummary {
    pub total_sessions: usize,
    pub questions_asked: usize,
    pub last_activity: Option<DateTime<Utc>>,
}

/// Conversation history with a single "current" conversation, written back
/// to local storage after every mutation.
pub struct ConversationStore {
    storage: Arc<dyn LocalStorage>,
    clock: Arc<dyn Clock>,
    ids: MonotonicIds,
    conversations: Vec<Conversation>,
    current: Option<ConversationId>,
}

impl ConversationStore {
    /// Empty store; nothing is read from `storage` until [`Self::hydrate`].
    pub fn new(storage: Arc<dyn LocalStorage>, clock: Arc<dyn Clock>) -> Self {
        Self {
            storage,
            clock,
            ids: MonotonicIds::new(),
            conversations: Vec::new(),
            current: None,
        }
    }

    /// Construct and hydrate in one step.
    pub fn open(storage: Arc<dyn LocalStorage>, clock: Arc<dyn Clock>) -> Self {
        let mut store = Self::new(storage, clock);
        store.hydrate();
        store
    }

    /// Read persisted conversations. Missing or unreadable state is an empty
    /// history.
    pub fn load(&self) -> Vec<Conversation> {
        let raw = match self.storage.get_item(keys::CONVERSATIONS) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                log::warn!("Failed to read conversation history: {err}");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<Conversation>>(&raw) {
            Ok(conversations) => conversations,
            Err(err) => {
                log::warn!("Discarding unreadable conversation history: {err}");
                Vec::new()
            }
        }
    }

    /// Replace in-memory state with persisted state. The first conversation
    /// becomes current.
    pub fn hydrate(&mut self) {
        let conversations = self.load();
        for conversation in &conversations {
            self.observe_id(conversation.id.as_str());
            for message in &conversation.messages {
                self.observe_id(message.id.as_str());
            }
        }

        self.current = conversations.first().map(|conversation| conversation.id.clone());
        self.conversations = conversations;
        log::info!(
            "Loaded {} conversations from local storage",
            self.conversations.len()
        );
    }

    /// Seed the id generator with a persisted id. Ids more than a year
    /// ahead of the clock are corrupt and skipped.
    fn observe_id(&mut self, raw: &str) {
        let Ok(value) = raw.parse::<i64>() else {
            return;
        };
        let ceiling = (self.clock.now() + Duration::days(MAX_ID_LEAD_DAYS)).timestamp_millis();
        if value > ceiling {
            log::warn!("Ignoring implausible persisted id {raw}");
            return;
        }
        self.ids.observe(value);
    }

    pub fn conversations(&self) -> &[Conversation] {
        &self.conversations
    }

    pub fn current(&self) -> Option<&Conversation> {
        self.current.as_ref().and_then(|id| self.get(id))
    }

    pub fn current_id(&self) -> Option<&ConversationId> {
        self.current.as_ref()
    }

    pub fn get(&self, id: &ConversationId) -> Option<&Conversation> {
        self.conversations
            .iter()
            .find(|conversation| &conversation.id == id)
    }

    /// Start a fresh conversation at the head of the list and make it
    /// current.
    pub fn create_conversation(&mut self) -> Conversation {
        let now = self.clock.now();
        let conversation = Conversation {
            id: ConversationId::new(self.ids.next(now)),
            title: NEW_CONVERSATION_TITLE.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        };

        self.conversations.insert(0, conversation.clone());
        self.current = Some(conversation.id.clone());
        self.persist();
        log::debug!("Created conversation {}", conversation.id);
        conversation
    }

    /// Handle of the current conversation, creating one if there is none.
    pub fn ensure_current(&mut self) -> ConversationId {
        if let Some(id) = &self.current {
            return id.clone();
        }
        self.create_conversation().id
    }

    pub fn append_message(
        &mut self,
        conversation_id: &ConversationId,
        role: Role,
        content: impl Into<String>,
        code_snippet: Option<String>,
    ) -> Result<Message, StoreError> {
        self.append_message_with_explanation(conversation_id, role, content, code_snippet, None)
    }

    /// Append to the end of `conversation_id`. The first user message also
    /// names the conversation.
    pub fn append_message_with_explanation(
        &mut self,
        conversation_id: &ConversationId,
        role: Role,
        content: impl Into<String>,
        code_snippet: Option<String>,
        explanation: Option<String>,
    ) -> Result<Message, StoreError> {
        let index = self
            .position(conversation_id)
            .ok_or_else(|| StoreError::ConversationNotFound(conversation_id.clone()))?;

        let now = self.clock.now();
        let message = Message {
            id: MessageId::new(self.ids.next(now)),
            role,
            content: content.into(),
            timestamp: now,
            code_snippet,
            explanation,
        };

        let conversation = &mut self.conversations[index];
        if role == Role::User && !conversation.has_user_message() {
            conversation.title = derive_title(&message.content);
        }
        conversation.messages.push(message.clone());
        conversation.updated_at = now;

        self.persist();
        Ok(message)
    }

    pub fn select_conversation(&mut self, id: &ConversationId) -> Result<(), StoreError> {
        if self.position(id).is_none() {
            return Err(StoreError::ConversationNotFound(id.clone()));
        }
        self.current = Some(id.clone());
        self.persist();
        Ok(())
    }

    /// Remove a conversation and its messages. Deleting the current one moves
    /// "current" to the first remaining conversation.
    pub fn delete_conversation(&mut self, id: &ConversationId) -> Result<(), StoreError> {
        let index = self
            .position(id)
            .ok_or_else(|| StoreError::ConversationNotFound(id.clone()))?;
        self.conversations.remove(index);

        if self.current.as_ref() == Some(id) {
            self.current = self
                .conversations
                .first()
                .map(|conversation| conversation.id.clone());
        }

        self.persist();
        log::debug!("Deleted conversation {id}");
        Ok(())
    }

    pub fn summary(&self) -> ProfileSummary {
        ProfileSummary {
            total_sessions: self.conversations.len(),
            questions_asked: self
                .conversations
                .iter()
                .flat_map(|conversation| &conversation.messages)
                .filter(|message| message.role == Role::User)
                .count(),
            last_activity: self
                .conversations
                .iter()
                .map(|conversation| conversation.updated_at)
                .max(),
        }
    }

    fn position(&self, id: &ConversationId) -> Option<usize> {
        self.conversations
            .iter()
            .position(|conversation| &conversation.id == id)
    }

    fn persist(&self) {
        if let Err(err) = self.write_all() {
            log::error!("Failed to persist conversation history: {err}");
        }
    }

    fn write_all(&self) -> Result<(), StorageError> {
        let json = serde_json::to_string(&self.conversations)?;
        self.storage.set_item(keys::CONVERSATIONS, &json)
    }
}

/// First 50 characters of the message, with "..." when anything was cut.
pub fn derive_title(content: &str) -> String {
    let mut chars = content.chars();
    let head: String = chars.by_ref().take(TITLE_MAX_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}
