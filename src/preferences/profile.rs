use crate::storage::{LocalStorage, StorageError, keys};

pub const ANONYMOUS_USER_ID: &str = "anonymous";
pub const DEFAULT_DISPLAY_NAME: &str = "Student";

#[derive(Debug, thiserror::Error)]
pub enum SignInError {
    #[error("student ID is required")]
    MissingId,
    #[error("name is required")]
    MissingName,
    #[error("consent is required to take part in the study")]
    ConsentRequired,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Identity written at sign-in. Not verified against anything.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentSession {
    pub id: String,
    pub name: String,
}

impl StudentSession {
    /// Validate the auth form and store the student's id and name.
    pub fn sign_in(
        storage: &dyn LocalStorage,
        id: &str,
        name: &str,
        consent: bool,
    ) -> Result<Self, SignInError> {
        let id = id.trim();
        let name = name.trim();
        if id.is_empty() {
            return Err(SignInError::MissingId);
        }
        if name.is_empty() {
            return Err(SignInError::MissingName);
        }
        if !consent {
            return Err(SignInError::ConsentRequired);
        }

        storage.set_item(keys::STUDENT_ID, id)?;
        storage.set_item(keys::STUDENT_NAME, name)?;
        log::info!("Signed in student {id}");
        Ok(Self {
            id: id.to_string(),
            name: name.to_string(),
        })
    }

    /// Session written by an earlier sign-in, if both keys are present.
    pub fn load(storage: &dyn LocalStorage) -> Option<Self> {
        let read = |key: &str| match storage.get_item(key) {
            Ok(value) => value,
            Err(err) => {
                log::warn!("Failed to read {key}: {err}");
                None
            }
        };
        Some(Self {
            id: read(keys::STUDENT_ID)?,
            name: read(keys::STUDENT_NAME)?,
        })
    }

    pub fn sign_out(storage: &dyn LocalStorage) -> Result<(), StorageError> {
        storage.remove_item(keys::STUDENT_ID)?;
        storage.remove_item(keys::STUDENT_NAME)
    }
}

/// Id sent to the tutoring API.
pub fn user_id(session: Option<&StudentSession>) -> String {
    session
        .map(|session| session.id.clone())
        .unwrap_or_else(|| ANONYMOUS_USER_ID.to_string())
}

/// Name shown on the profile page.
pub fn display_name(session: Option<&StudentSession>) -> String {
    session
        .map(|session| session.name.clone())
        .unwrap_or_else(|| DEFAULT_DISPLAY_NAME.to_string())
}
