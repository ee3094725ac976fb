use serde::{Deserialize, Serialize};

use super::flash::FlashMessage;
use super::todo::TodoRecord;
use super::todo_list::TodoList;

/// A todo list as shown in the overview, without its todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoListSummary {
    pub id: u64,
    pub title: String,
    pub done: bool,
    pub todo_count: usize,
    /// Todos not yet done.
    pub remaining: usize,
}

impl From<&TodoList> for TodoListSummary {
    fn from(list: &TodoList) -> Self {
        Self {
            id: list.id(),
            title: list.title().to_string(),
            done: list.is_done(),
            todo_count: list.len(),
            remaining: list.remaining(),
        }
    }
}

/// Response for the overview of all lists, in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListsView {
    pub todo_lists: Vec<TodoListSummary>,
    #[serde(default)]
    pub flash: Vec<FlashMessage>,
}

/// Response for a single list with its todos in display order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListView {
    pub todo_list: TodoListSummary,
    pub todos: Vec<TodoRecord>,
    #[serde(default)]
    pub flash: Vec<FlashMessage>,
}

/// Input for creating or renaming a todo list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodoListTitleInput {
    /// A missing title is treated as an empty one.
    #[serde(default)]
    pub todo_list_title: String,
}

/// Input for adding a todo to a list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTodoInput {
    #[serde(default)]
    pub todo_title: String,
}
