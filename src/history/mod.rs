pub mod clock;
pub mod store;

pub use clock::{Clock, SystemClock};
pub use store::{ConversationStore, ProfileSummary, StoreError};
