pub mod commands;
pub mod events;
pub mod types;

pub use commands::TutorCommand;
pub use events::TutorEvent;
pub use types::{
    Challenge, Conversation, ConversationId, Difficulty, Message, MessageId, Priority,
    RecommendedTask, Role,
};
