//! Per-session state and the store it is kept in between requests.
//!
//! A [`Session`] is rebuilt from its [`SessionRecord`] at the start of every
//! request and written back at the end. Nothing else keeps todo lists alive.

use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{FlashKind, FlashMessage, ListCollection, TodoError, TodoListRecord};

/// The state of one browser session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub id: Uuid,
    pub lists: ListCollection,
    /// Messages waiting to be shown by the next view.
    pub flash: Vec<FlashMessage>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    /// A fresh, empty session. `expires_at` is refreshed before every save.
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            lists: ListCollection::new(),
            flash: Vec::new(),
            expires_at: Utc::now(),
        }
    }

    pub fn from_record(
        id: Uuid,
        record: SessionRecord,
        expires_at: DateTime<Utc>,
    ) -> Result<Self, TodoError> {
        Ok(Self {
            id,
            lists: ListCollection::from_records(record.todo_lists)?,
            flash: record.flash,
            expires_at,
        })
    }

    pub fn to_record(&self) -> SessionRecord {
        SessionRecord {
            todo_lists: self.lists.to_records(),
            flash: self.flash.clone(),
        }
    }

    pub fn flash_success(&mut self, message: impl Into<String>) {
        self.push_flash(FlashKind::Success, message.into());
    }

    pub fn flash_error(&mut self, message: impl Into<String>) {
        self.push_flash(FlashKind::Error, message.into());
    }

    /// Drain queued messages; each is shown once.
    pub fn take_flash(&mut self) -> Vec<FlashMessage> {
        std::mem::take(&mut self.flash)
    }

    fn push_flash(&mut self, kind: FlashKind, message: String) {
        self.flash.push(FlashMessage { kind, message });
    }
}

/// Serialized form of a [`Session`], without its id and expiry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    #[serde(default)]
    pub todo_lists: Vec<TodoListRecord>,
    #[serde(default)]
    pub flash: Vec<FlashMessage>,
}

/// Where sessions live between requests.
///
/// The request layer only ever talks to this trait; it never reaches into a
/// particular backend.
pub trait SessionStore: Send + Sync {
    /// Load a live session. Unknown and expired ids yield `None`.
    fn load(&self, id: Uuid) -> Result<Option<Session>>;

    /// Insert or replace the session under its id.
    fn save(&self, session: &Session) -> Result<()>;

    /// Forget a session. Returns whether it existed.
    fn destroy(&self, id: Uuid) -> Result<bool>;
}
