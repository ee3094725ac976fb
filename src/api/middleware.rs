//! Session middleware: ties a browser cookie to a stored [`Session`].
//!
//! Every routed request gets its session rebuilt from the store before the
//! handler runs and written back afterwards, along with a refreshed cookie.

use std::sync::{Arc, Mutex, MutexGuard};

use axum::{
    body::Body,
    extract::State,
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue, Request,
    },
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use uuid::Uuid;

use super::{error::ApiError, AppState};
use crate::session::Session;

const DEFAULT_COOKIE_NAME: &str = "todos-session-id";
const DEFAULT_MAX_AGE_DAYS: i64 = 31;
const MAX_AGE_LIMIT_DAYS: i64 = 3650;

/// Session cookie configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Cookie name (from TODOS_SESSION_COOKIE)
    pub cookie_name: String,
    /// Idle lifetime of a session (from TODOS_SESSION_MAX_AGE_DAYS)
    pub max_age: Duration,
    /// Mark the cookie `Secure` (from TODOS_SESSION_SECURE)
    pub secure: bool,
}

impl SessionConfig {
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let cookie_name = std::env::var("TODOS_SESSION_COOKIE")
            .ok()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(defaults.cookie_name);

        let max_age = std::env::var("TODOS_SESSION_MAX_AGE_DAYS")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|days| (1..=MAX_AGE_LIMIT_DAYS).contains(days))
            .map(Duration::days)
            .unwrap_or(defaults.max_age);

        let secure = std::env::var("TODOS_SESSION_SECURE")
            .map(|s| matches!(s.trim(), "1" | "true" | "yes"))
            .unwrap_or(defaults.secure);

        Self {
            cookie_name,
            max_age,
            secure,
        }
    }

    fn cookie_header(&self, session_id: Uuid) -> Result<HeaderValue, ApiError> {
        let mut cookie = format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
            self.cookie_name,
            session_id,
            self.max_age.num_seconds()
        );
        if self.secure {
            cookie.push_str("; Secure");
        }
        HeaderValue::from_str(&cookie)
            .map_err(|e| ApiError::Internal(anyhow::anyhow!("Invalid session cookie: {e}")))
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            max_age: Duration::days(DEFAULT_MAX_AGE_DAYS),
            secure: false,
        }
    }
}

/// The current request's session, shared between middleware and handler.
#[derive(Clone)]
pub struct SessionHandle(Arc<Mutex<Session>>);

impl SessionHandle {
    fn new(session: Session) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    pub fn lock(&self) -> MutexGuard<'_, Session> {
        self.0.lock().expect("session lock poisoned")
    }
}

/// Load the session named by the request cookie (or start a new one), run
/// the handler, then save the session and refresh the cookie.
pub async fn session_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, ApiError> {
    let existing = match session_id_from_headers(request.headers(), &state.session.cookie_name) {
        Some(id) => state.store.load(id)?,
        None => None,
    };
    if let Some(max_id) = existing.as_ref().and_then(|session| session.lists.max_id()) {
        state.ids.observe(max_id);
    }
    let session = existing.unwrap_or_else(|| {
        let session = Session::new(Uuid::new_v4());
        tracing::debug!(session_id = %session.id, "Starting new session");
        session
    });

    let handle = SessionHandle::new(session);
    request.extensions_mut().insert(handle.clone());

    let mut response = next.run(request).await;

    let session_id = {
        let mut session = handle.lock();
        session.expires_at = Utc::now() + state.session.max_age;
        state.store.save(&session)?;
        session.id
    };

    response
        .headers_mut()
        .append(SET_COOKIE, state.session.cookie_header(session_id)?);
    Ok(response)
}

/// Find the session id among the request's cookies. Malformed ids are ignored.
fn session_id_from_headers(headers: &HeaderMap, cookie_name: &str) -> Option<Uuid> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| *name == cookie_name)
        .and_then(|(_, value)| Uuid::parse_str(value.trim()).ok())
}
