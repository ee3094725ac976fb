mod schema;

use std::path::PathBuf;
use std::sync::{Arc, Mutex};

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{Connection, OptionalExtension};
use uuid::Uuid;

use crate::session::{Session, SessionRecord, SessionStore};

/// Shown to a user whose stored lists could not be read back.
const UNREADABLE_SESSION_MESSAGE: &str = "Your saved todo lists could not be restored.";

/// SQLite-backed session store.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open(path: PathBuf) -> Result<Self> {
        let parent = path
            .parent()
            .ok_or_else(|| anyhow::anyhow!("Database path has no parent directory"))?;
        std::fs::create_dir_all(parent)?;
        let conn = Connection::open(&path)?;
        conn.pragma_update(None, "journal_mode", "WAL")?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_default() -> Result<Self> {
        Self::open(Self::default_path()?)
    }

    /// `<platform data dir>/todos.db`
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("", "", "session-todos")
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
        Ok(dirs.data_dir().join("todos.db"))
    }

    pub fn open_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().expect("database lock poisoned");
        schema::run_migrations(&conn)
    }

    /// Delete every session whose expiry has passed. Returns how many went.
    pub fn purge_expired_sessions(&self) -> Result<usize> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let removed = conn.execute(
            "DELETE FROM sessions WHERE expires_at <= ?",
            [Utc::now().timestamp()],
        )?;
        Ok(removed)
    }

    /// Number of stored sessions, expired ones included.
    pub fn count_sessions(&self) -> Result<usize> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}

impl SessionStore for Database {
    fn load(&self, id: Uuid) -> Result<Option<Session>> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let row: Option<(String, i64)> = conn
            .query_row(
                "SELECT data, expires_at FROM sessions WHERE id = ? AND expires_at > ?",
                (id.to_string(), Utc::now().timestamp()),
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let Some((data, expires_at)) = row else {
            return Ok(None);
        };
        let expires_at = parse_timestamp(expires_at);

        let restored = serde_json::from_str::<SessionRecord>(&data)
            .map_err(anyhow::Error::from)
            .and_then(|record| {
                Session::from_record(id, record, expires_at).map_err(anyhow::Error::from)
            });

        match restored {
            Ok(session) => Ok(Some(session)),
            Err(e) => {
                tracing::warn!(session_id = %id, error = %e, "Discarding unreadable session data");
                let mut session = Session::new(id);
                session.expires_at = expires_at;
                session.flash_error(UNREADABLE_SESSION_MESSAGE);
                Ok(Some(session))
            }
        }
    }

    fn save(&self, session: &Session) -> Result<()> {
        let data = serde_json::to_string(&session.to_record())
            .context("Failed to serialize session")?;
        let conn = self.conn.lock().expect("database lock poisoned");
        upsert(&conn, session.id, &data, session.expires_at)
    }

    fn destroy(&self, id: Uuid) -> Result<bool> {
        let conn = self.conn.lock().expect("database lock poisoned");
        let rows = conn.execute("DELETE FROM sessions WHERE id = ?", [id.to_string()])?;
        Ok(rows > 0)
    }
}

fn upsert(conn: &Connection, id: Uuid, data: &str, expires_at: DateTime<Utc>) -> Result<()> {
    conn.execute(
        "INSERT INTO sessions (id, data, expires_at, updated_at)
         VALUES (?, ?, ?, ?)
         ON CONFLICT(id) DO UPDATE SET
            data = excluded.data,
            expires_at = excluded.expires_at,
            updated_at = excluded.updated_at",
        (
            id.to_string(),
            data,
            expires_at.timestamp(),
            Utc::now().to_rfc3339(),
        ),
    )?;
    Ok(())
}

fn parse_timestamp(secs: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(secs, 0).unwrap_or_else(Utc::now)
}
