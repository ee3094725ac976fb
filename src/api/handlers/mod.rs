use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Redirect},
    Extension, Json,
};

use super::extract::{Ids, Input};
use super::{ApiError, AppState, SessionHandle};
use crate::models::*;
use crate::sort::{sort_todo_lists, sort_todos};

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

pub async fn index() -> Redirect {
    Redirect::to("/lists")
}

// ============================================================
// Todo lists
// ============================================================

pub async fn list_todo_lists(Extension(handle): Extension<SessionHandle>) -> Json<ListsView> {
    let mut session = handle.lock();
    let todo_lists = sort_todo_lists(session.lists.lists())
        .into_iter()
        .map(TodoListSummary::from)
        .collect();

    Json(ListsView {
        todo_lists,
        flash: session.take_flash(),
    })
}

pub async fn create_todo_list(
    State(state): State<AppState>,
    Extension(handle): Extension<SessionHandle>,
    Input(input): Input<TodoListTitleInput>,
) -> Result<(StatusCode, Json<TodoListSummary>), ApiError> {
    let mut session = handle.lock();
    let summary = session
        .lists
        .create_list(state.ids.as_ref(), &input.todo_list_title)
        .map(TodoListSummary::from)
        .map_err(|e| ApiError::from(e).with_input(&input.todo_list_title))?;

    session.flash_success("The todo list has been created.");
    tracing::info!(list_id = summary.id, "Created todo list");
    Ok((StatusCode::CREATED, Json(summary)))
}

pub async fn get_todo_list(
    Extension(handle): Extension<SessionHandle>,
    Ids(list_id): Ids<u64>,
) -> Result<Json<ListView>, ApiError> {
    let mut session = handle.lock();
    let list = session
        .lists
        .find(list_id)
        .ok_or(TodoError::list_not_found(list_id))?;

    let todo_list = TodoListSummary::from(list);
    let todos = sort_todos(list).into_iter().map(Todo::to_record).collect();

    Ok(Json(ListView {
        todo_list,
        todos,
        flash: session.take_flash(),
    }))
}

pub async fn edit_todo_list(
    Extension(handle): Extension<SessionHandle>,
    Ids(list_id): Ids<u64>,
) -> Result<Json<TodoListSummary>, ApiError> {
    let session = handle.lock();
    session
        .lists
        .find(list_id)
        .map(|list| Json(TodoListSummary::from(list)))
        .ok_or_else(|| TodoError::list_not_found(list_id).into())
}

pub async fn rename_todo_list(
    Extension(handle): Extension<SessionHandle>,
    Ids(list_id): Ids<u64>,
    Input(input): Input<TodoListTitleInput>,
) -> Result<Json<TodoListSummary>, ApiError> {
    let mut session = handle.lock();
    let summary = session
        .lists
        .rename_list(list_id, &input.todo_list_title)
        .map(TodoListSummary::from)
        .map_err(|e| ApiError::from(e).with_input(&input.todo_list_title))?;

    session.flash_success("Todo list updated.");
    tracing::info!(list_id, "Renamed todo list");
    Ok(Json(summary))
}

pub async fn delete_todo_list(
    Extension(handle): Extension<SessionHandle>,
    Ids(list_id): Ids<u64>,
) -> Result<StatusCode, ApiError> {
    let mut session = handle.lock();
    let removed = session.lists.remove_list(list_id)?;

    session.flash_success("Todo List deleted!");
    tracing::info!(list_id, todos = removed.len(), "Deleted todo list");
    Ok(StatusCode::NO_CONTENT)
}

pub async fn complete_all_todos(
    Extension(handle): Extension<SessionHandle>,
    Ids(list_id): Ids<u64>,
) -> Result<Json<TodoListSummary>, ApiError> {
    let mut session = handle.lock();
    let summary = TodoListSummary::from(session.lists.complete_all(list_id)?);

    session.flash_success("All todos have been marked done.");
    Ok(Json(summary))
}

// ============================================================
// Todos
// ============================================================

pub async fn create_todo(
    State(state): State<AppState>,
    Extension(handle): Extension<SessionHandle>,
    Ids(list_id): Ids<u64>,
    Input(input): Input<NewTodoInput>,
) -> Result<(StatusCode, Json<TodoRecord>), ApiError> {
    let mut session = handle.lock();
    let todo = session
        .lists
        .add_todo(state.ids.as_ref(), list_id, &input.todo_title)
        .map(Todo::to_record)
        .map_err(|e| ApiError::from(e).with_input(&input.todo_title))?;

    session.flash_success("Todo added!");
    tracing::info!(list_id, todo_id = todo.id, "Added todo");
    Ok((StatusCode::CREATED, Json(todo)))
}

pub async fn toggle_todo(
    Extension(handle): Extension<SessionHandle>,
    Ids((list_id, todo_id)): Ids<(u64, u64)>,
) -> Result<Json<TodoRecord>, ApiError> {
    let mut session = handle.lock();
    let todo = session.lists.toggle_todo(list_id, todo_id)?.to_record();

    if todo.done {
        session.flash_success(format!("{} marked done.", todo.title));
    } else {
        session.flash_success(format!("{} marked as NOT done!", todo.title));
    }
    Ok(Json(todo))
}

pub async fn delete_todo(
    Extension(handle): Extension<SessionHandle>,
    Ids((list_id, todo_id)): Ids<(u64, u64)>,
) -> Result<StatusCode, ApiError> {
    let mut session = handle.lock();
    session.lists.delete_todo(list_id, todo_id)?;

    session.flash_success("The todo has been deleted.");
    Ok(StatusCode::NO_CONTENT)
}
