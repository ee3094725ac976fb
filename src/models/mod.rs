//! Domain models for session todos.
//!
//! # Core Concepts
//!
//! - [`Todo`]: a single task with a title and a done flag.
//! - [`TodoList`]: a named, ordered collection of todos. A list is done once it
//!   has todos and all of them are done.
//! - [`ListCollection`]: every list of one session. Owns the title uniqueness
//!   policy and the mutations the request layer performs.
//! - [`IdAllocator`]: where list and todo ids come from.
//!
//! Each entity has a plain record form ([`TodoRecord`], [`TodoListRecord`])
//! used to carry it between requests.

mod collection;
mod error;
mod flash;
mod ids;
mod todo;
mod todo_list;
mod view;

pub use collection::*;
pub use error::*;
pub use flash::*;
pub use ids::*;
pub use todo::*;
pub use todo_list::*;
pub use view::*;
