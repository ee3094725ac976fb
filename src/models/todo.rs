use serde::{Deserialize, Serialize};

use super::error::{validate_title, TitleKind, TodoError};
use super::ids::IdAllocator;

/// A single task inside a [`TodoList`](super::TodoList).
///
/// The title is always trimmed and between 1 and 100 characters; every
/// constructor and [`Todo::set_title`] enforce it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Todo {
    id: u64,
    title: String,
    done: bool,
}

impl Todo {
    /// Create an undone todo with a fresh id.
    pub fn create(ids: &dyn IdAllocator, title: &str) -> Result<Self, TodoError> {
        let title = validate_title(title, TitleKind::Todo)?;
        Ok(Self {
            id: ids.next_id(),
            title,
            done: false,
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn mark_undone(&mut self) {
        self.done = false;
    }

    /// Flip the done flag and return its new value.
    pub fn toggle(&mut self) -> bool {
        self.done = !self.done;
        self.done
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), TodoError> {
        self.title = validate_title(title, TitleKind::Todo)?;
        Ok(())
    }

    pub fn to_record(&self) -> TodoRecord {
        TodoRecord {
            id: self.id,
            title: self.title.clone(),
            done: self.done,
        }
    }

    pub fn from_record(record: TodoRecord) -> Result<Self, TodoError> {
        Ok(Self {
            id: record.id,
            title: validate_title(&record.title, TitleKind::Todo)?,
            done: record.done,
        })
    }
}

/// Plain attribute form of a [`Todo`], as stored in a session and returned
/// to clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoRecord {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub done: bool,
}
