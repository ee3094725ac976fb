use super::error::{trim_title, validate_title, TitleKind, TodoError};
use super::ids::IdAllocator;
use super::todo::Todo;
use super::todo_list::{TodoList, TodoListRecord};

/// All todo lists belonging to one session, in creation order.
///
/// This is where list title uniqueness is decided. Titles are compared after
/// trimming and lowercasing, the same normalization [`crate::sort`] uses.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListCollection {
    lists: Vec<TodoList>,
}

impl ListCollection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records(records: Vec<TodoListRecord>) -> Result<Self, TodoError> {
        let lists = records
            .into_iter()
            .map(TodoList::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { lists })
    }

    pub fn to_records(&self) -> Vec<TodoListRecord> {
        self.lists.iter().map(TodoList::to_record).collect()
    }

    pub fn lists(&self) -> &[TodoList] {
        &self.lists
    }

    pub fn len(&self) -> usize {
        self.lists.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lists.is_empty()
    }

    /// Whether `title` is free for use, ignoring the list `excluding` (the
    /// list being renamed, if any).
    pub fn is_title_unique(&self, title: &str, excluding: Option<u64>) -> bool {
        let wanted = normalize(title);
        !self
            .lists
            .iter()
            .filter(|list| Some(list.id()) != excluding)
            .any(|list| normalize(list.title()) == wanted)
    }

    /// The highest list or todo id in the collection, if it holds anything.
    pub fn max_id(&self) -> Option<u64> {
        self.lists
            .iter()
            .flat_map(|list| std::iter::once(list.id()).chain(list.todos().iter().map(Todo::id)))
            .max()
    }

    pub fn find(&self, list_id: u64) -> Option<&TodoList> {
        self.lists.iter().find(|list| list.id() == list_id)
    }

    pub fn find_mut(&mut self, list_id: u64) -> Option<&mut TodoList> {
        self.lists.iter_mut().find(|list| list.id() == list_id)
    }

    pub fn find_todo(&self, list_id: u64, todo_id: u64) -> Option<&Todo> {
        self.find(list_id)?.find_by_id(todo_id)
    }

    pub fn create_list(
        &mut self,
        ids: &dyn IdAllocator,
        title: &str,
    ) -> Result<&TodoList, TodoError> {
        let title = validate_title(title, TitleKind::List)?;
        if !self.is_title_unique(&title, None) {
            return Err(TodoError::DuplicateTitle { title });
        }

        let list = TodoList::create(ids, &title)?;
        self.lists.push(list);
        Ok(&self.lists[self.lists.len() - 1])
    }

    pub fn rename_list(&mut self, list_id: u64, title: &str) -> Result<&TodoList, TodoError> {
        if self.find(list_id).is_none() {
            return Err(TodoError::list_not_found(list_id));
        }

        let title = validate_title(title, TitleKind::List)?;
        if !self.is_title_unique(&title, Some(list_id)) {
            return Err(TodoError::DuplicateTitle { title });
        }

        let list = self.list_mut(list_id)?;
        list.set_title(&title)?;
        Ok(&*list)
    }

    /// Remove a list together with all of its todos.
    pub fn remove_list(&mut self, list_id: u64) -> Result<TodoList, TodoError> {
        let index = self
            .lists
            .iter()
            .position(|list| list.id() == list_id)
            .ok_or_else(|| TodoError::list_not_found(list_id))?;
        Ok(self.lists.remove(index))
    }

    pub fn add_todo(
        &mut self,
        ids: &dyn IdAllocator,
        list_id: u64,
        title: &str,
    ) -> Result<&Todo, TodoError> {
        let list = self.list_mut(list_id)?;
        let todo = Todo::create(ids, title)?;
        let todo_id = todo.id();
        list.add(todo)?;
        list.find_by_id(todo_id)
            .ok_or_else(|| TodoError::todo_not_found(todo_id))
    }

    pub fn toggle_todo(&mut self, list_id: u64, todo_id: u64) -> Result<&Todo, TodoError> {
        let todo = self
            .list_mut(list_id)?
            .find_by_id_mut(todo_id)
            .ok_or_else(|| TodoError::todo_not_found(todo_id))?;
        todo.toggle();
        Ok(&*todo)
    }

    pub fn delete_todo(&mut self, list_id: u64, todo_id: u64) -> Result<Todo, TodoError> {
        let list = self.list_mut(list_id)?;
        let index = list
            .find_by_id(todo_id)
            .and_then(|todo| list.find_index_of(todo))
            .ok_or_else(|| TodoError::todo_not_found(todo_id))?;
        list.remove_at(index)
            .ok_or_else(|| TodoError::todo_not_found(todo_id))
    }

    pub fn complete_all(&mut self, list_id: u64) -> Result<&TodoList, TodoError> {
        let list = self.list_mut(list_id)?;
        list.mark_all_done();
        Ok(&*list)
    }

    fn list_mut(&mut self, list_id: u64) -> Result<&mut TodoList, TodoError> {
        self.find_mut(list_id)
            .ok_or_else(|| TodoError::list_not_found(list_id))
    }
}

fn normalize(title: &str) -> String {
    trim_title(title).to_lowercase()
}
