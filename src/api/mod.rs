mod error;
mod extract;
mod handlers;
mod middleware;

use std::sync::Arc;

use axum::{
    middleware::from_fn_with_state,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::models::IdAllocator;
use crate::session::SessionStore;

pub use error::{ApiError, ErrorResponse};
pub use middleware::{SessionConfig, SessionHandle};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn SessionStore>,
    pub ids: Arc<dyn IdAllocator>,
    pub session: SessionConfig,
}

impl AppState {
    pub fn new(
        store: impl SessionStore + 'static,
        ids: impl IdAllocator + 'static,
        session: SessionConfig,
    ) -> Self {
        Self {
            store: Arc::new(store),
            ids: Arc::new(ids),
            session,
        }
    }
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::index))
        // Lists
        .route("/lists", get(handlers::list_todo_lists))
        .route("/lists", post(handlers::create_todo_list))
        .route("/lists/{list_id}", get(handlers::get_todo_list))
        .route("/lists/{list_id}/edit", get(handlers::edit_todo_list))
        .route("/lists/{list_id}/edit", post(handlers::rename_todo_list))
        .route("/lists/{list_id}/destroy", post(handlers::delete_todo_list))
        .route("/lists/{list_id}/complete_all", post(handlers::complete_all_todos))
        // Todos
        .route("/lists/{list_id}/todos", post(handlers::create_todo))
        .route(
            "/lists/{list_id}/todos/{todo_id}/toggle",
            post(handlers::toggle_todo),
        )
        .route(
            "/lists/{list_id}/todos/{todo_id}/destroy",
            post(handlers::delete_todo),
        )
        // Everything above runs inside a session
        .route_layer(from_fn_with_state(state.clone(), middleware::session_middleware))
        // Health
        .route("/health", get(handlers::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
