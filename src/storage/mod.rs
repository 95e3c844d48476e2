pub mod error;
pub mod local_store;
pub mod memory_store;

pub use error::StorageError;
pub use local_store::SqliteStorage;
pub use memory_store::MemoryStorage;

use std::fs;
use std::path::Path;

/// Fixed keys of the client-local key/value store.
pub mod keys {
    pub const CONVERSATIONS: &str = "pytutor-conversations";
    pub const THEME: &str = "pytutor-theme";
    pub const STUDENT_ID: &str = "student-id";
    pub const STUDENT_NAME: &str = "student-name";
}

/// String key/value storage scoped to this client, modelled on a browser's
/// `localStorage`.
pub trait LocalStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

/// Ensure the directory holding `db_path` exists
pub fn ensure_data_dir<P: AsRef<Path>>(db_path: P) -> std::io::Result<()> {
    if let Some(parent) = db_path.as_ref().parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
