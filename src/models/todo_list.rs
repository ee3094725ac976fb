use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::error::{validate_title, TitleKind, TodoError};
use super::ids::IdAllocator;
use super::todo::{Todo, TodoRecord};

/// A named, ordered collection of [`Todo`]s.
///
/// Todos keep insertion order and never share an id. Title uniqueness across
/// lists is not checked here; see
/// [`ListCollection::is_title_unique`](super::ListCollection::is_title_unique).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoList {
    id: u64,
    title: String,
    todos: Vec<Todo>,
}

impl TodoList {
    /// Create an empty list with a fresh id.
    pub fn create(ids: &dyn IdAllocator, title: &str) -> Result<Self, TodoError> {
        let title = validate_title(title, TitleKind::List)?;
        Ok(Self {
            id: ids.next_id(),
            title,
            todos: Vec::new(),
        })
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn todos(&self) -> &[Todo] {
        &self.todos
    }

    pub fn len(&self) -> usize {
        self.todos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.todos.is_empty()
    }

    /// Number of todos not yet done.
    pub fn remaining(&self) -> usize {
        self.todos.iter().filter(|todo| !todo.is_done()).count()
    }

    /// Append a todo. Duplicate titles are allowed, duplicate ids are not.
    pub fn add(&mut self, todo: Todo) -> Result<(), TodoError> {
        if self.find_by_id(todo.id()).is_some() {
            return Err(duplicate_todo_id(self.id, todo.id()));
        }
        self.todos.push(todo);
        Ok(())
    }

    pub fn find_by_id(&self, todo_id: u64) -> Option<&Todo> {
        self.todos.iter().find(|todo| todo.id() == todo_id)
    }

    pub fn find_by_id_mut(&mut self, todo_id: u64) -> Option<&mut Todo> {
        self.todos.iter_mut().find(|todo| todo.id() == todo_id)
    }

    /// Position of `todo` in this list, matched by id.
    pub fn find_index_of(&self, todo: &Todo) -> Option<usize> {
        self.todos.iter().position(|t| t.id() == todo.id())
    }

    /// Remove the todo at `index`. Out-of-range indices leave the list
    /// untouched and return `None`.
    pub fn remove_at(&mut self, index: usize) -> Option<Todo> {
        if index < self.todos.len() {
            Some(self.todos.remove(index))
        } else {
            None
        }
    }

    pub fn mark_all_done(&mut self) {
        self.todos.iter_mut().for_each(Todo::mark_done);
    }

    /// A list is done when it has todos and all of them are done.
    pub fn is_done(&self) -> bool {
        !self.todos.is_empty() && self.todos.iter().all(Todo::is_done)
    }

    pub fn set_title(&mut self, title: &str) -> Result<(), TodoError> {
        self.title = validate_title(title, TitleKind::List)?;
        Ok(())
    }

    pub fn to_record(&self) -> TodoListRecord {
        TodoListRecord {
            id: self.id,
            title: self.title.clone(),
            todos: self.todos.iter().map(Todo::to_record).collect(),
        }
    }

    /// Rebuild a list from its stored form, re-checking every invariant.
    pub fn from_record(record: TodoListRecord) -> Result<Self, TodoError> {
        let title = validate_title(&record.title, TitleKind::List)?;

        let mut seen = HashSet::with_capacity(record.todos.len());
        let mut todos = Vec::with_capacity(record.todos.len());
        for todo in record.todos {
            if !seen.insert(todo.id) {
                return Err(duplicate_todo_id(record.id, todo.id));
            }
            todos.push(Todo::from_record(todo)?);
        }

        Ok(Self {
            id: record.id,
            title,
            todos,
        })
    }
}

fn duplicate_todo_id(list_id: u64, todo_id: u64) -> TodoError {
    TodoError::Validation(format!(
        "Todo list {list_id} contains todo id {todo_id} more than once."
    ))
}

/// Plain attribute form of a [`TodoList`] and its todos.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TodoListRecord {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub todos: Vec<TodoRecord>,
}
