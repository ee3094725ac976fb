//! Display ordering for lists and todos.
//!
//! Both orderings put unfinished items first, then finished ones, and sort each
//! group by title ignoring case. The sort is stable: titles equal after
//! lowercasing keep their original relative order. Inputs are never modified.

use crate::models::{Todo, TodoList};

/// Something that can be ordered for display.
pub(crate) trait Sortable {
    fn sort_title(&self) -> &str;
    fn is_complete(&self) -> bool;
}

impl Sortable for TodoList {
    fn sort_title(&self) -> &str {
        self.title()
    }

    fn is_complete(&self) -> bool {
        self.is_done()
    }
}

impl Sortable for Todo {
    fn sort_title(&self) -> &str {
        self.title()
    }

    fn is_complete(&self) -> bool {
        self.is_done()
    }
}

/// Order lists for the overview page.
pub fn sort_todo_lists<'a, I>(lists: I) -> Vec<&'a TodoList>
where
    I: IntoIterator<Item = &'a TodoList>,
{
    sort_for_display(lists)
}

/// Order the todos of `list` for its detail page.
pub fn sort_todos(list: &TodoList) -> Vec<&Todo> {
    sort_for_display(list.todos())
}

fn sort_for_display<'a, T, I>(items: I) -> Vec<&'a T>
where
    T: Sortable + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let (mut undone, mut done): (Vec<&T>, Vec<&T>) =
        items.into_iter().partition(|item| !item.is_complete());

    // sort_by_cached_key is stable
    undone.sort_by_cached_key(|item| item.sort_title().to_lowercase());
    done.sort_by_cached_key(|item| item.sort_title().to_lowercase());

    undone.extend(done);
    undone
}
