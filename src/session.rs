//! File-backed session state: the auth token, the cached user profile, and
//! the last booking bridged to the result view. Owns its storage path and
//! persists on every mutation, so dropping the store never loses state.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::models::{BookingResponse, UserProfile};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Corrupt session file: {0}")]
    CorruptState(String),
}

/// Proof of authentication plus the cached profile.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub user: UserProfile,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredState {
    #[serde(default)]
    session: Option<Session>,
    #[serde(default, rename = "lastBooking")]
    last_booking: Option<BookingResponse>,
}

pub struct SessionStore {
    path: PathBuf,
    state: StoredState,
}

impl SessionStore {
    /// Open the store at `path`. A missing file is an empty store; an
    /// unreadable or unparsable file is an error.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SessionError> {
        let path = path.as_ref().to_path_buf();
        let state = match std::fs::read_to_string(&path) {
            Ok(content) => serde_json::from_str(&content)
                .map_err(|e| SessionError::CorruptState(e.to_string()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => StoredState::default(),
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, state })
    }

    pub fn session(&self) -> Option<&Session> {
        self.state.session.as_ref()
    }

    pub fn token(&self) -> Option<&str> {
        self.state.session.as_ref().map(|s| s.token.as_str())
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.state.session.as_ref().map(|s| &s.user)
    }

    /// Page-load guard predicate: callers navigate to the entry screen when
    /// this is false.
    pub fn is_authenticated(&self) -> bool {
        self.state.session.is_some()
    }

    /// Create or replace the session, persisting immediately.
    pub fn set_session(&mut self, token: String, user: UserProfile) -> Result<(), SessionError> {
        self.state.session = Some(Session {
            token,
            user,
            created_at: Utc::now(),
        });
        self.persist()
    }

    pub fn last_booking(&self) -> Option<&BookingResponse> {
        self.state.last_booking.as_ref()
    }

    pub fn set_last_booking(&mut self, booking: BookingResponse) -> Result<(), SessionError> {
        self.state.last_booking = Some(booking);
        self.persist()
    }

    /// Destroy all persisted state (logout, or forced on auth expiry).
    pub fn clear(&mut self) -> Result<(), SessionError> {
        self.state = StoredState::default();
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn persist(&self) -> Result<(), SessionError> {
        let content = serde_json::to_string_pretty(&self.state)
            .map_err(|e| SessionError::CorruptState(e.to_string()))?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }
}
