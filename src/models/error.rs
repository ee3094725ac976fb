use std::fmt;

use thiserror::Error;

/// Longest title, in characters, accepted for lists and todos.
pub const MAX_TITLE_LEN: usize = 100;

/// Errors raised by the domain model.
///
/// `Validation` and `DuplicateTitle` are recoverable: the request layer shows
/// the message next to the submitted input. `NotFound` fails the request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TodoError {
    #[error("{0}")]
    Validation(String),

    #[error("List title must be unique.")]
    DuplicateTitle { title: String },

    #[error("{resource} {id} not found")]
    NotFound { resource: Resource, id: u64 },
}

impl TodoError {
    pub(crate) fn list_not_found(id: u64) -> Self {
        Self::NotFound {
            resource: Resource::TodoList,
            id,
        }
    }

    pub(crate) fn todo_not_found(id: u64) -> Self {
        Self::NotFound {
            resource: Resource::Todo,
            id,
        }
    }
}

/// The kind of entity a [`TodoError::NotFound`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    TodoList,
    Todo,
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TodoList => f.write_str("Todo list"),
            Self::Todo => f.write_str("Todo"),
        }
    }
}

/// Which entity a title belongs to; only changes the wording of errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TitleKind {
    List,
    Todo,
}

impl TitleKind {
    fn required_message(self) -> &'static str {
        match self {
            Self::List => "The list title is required.",
            Self::Todo => "The todo title is required.",
        }
    }

    fn length_message(self) -> &'static str {
        match self {
            Self::List => "List title must be between 1 and 100 characters.",
            Self::Todo => "Todo title must be between 1 and 100 characters.",
        }
    }
}

/// Strip surrounding whitespace and byte order marks (U+FEFF), which
/// `str::trim` leaves in place.
pub(crate) fn trim_title(raw: &str) -> &str {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '\u{feff}')
}

/// Trim `raw` and check it holds 1 to [`MAX_TITLE_LEN`] characters.
pub fn validate_title(raw: &str, kind: TitleKind) -> Result<String, TodoError> {
    let title = trim_title(raw);

    if title.is_empty() {
        return Err(TodoError::Validation(kind.required_message().to_string()));
    }

    if title.chars().count() > MAX_TITLE_LEN {
        return Err(TodoError::Validation(kind.length_message().to_string()));
    }

    Ok(title.to_string())
}
