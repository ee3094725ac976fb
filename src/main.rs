use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use session_todos::api::{self, AppState, SessionConfig};
use session_todos::db::Database;
use session_todos::models::SequentialIds;

const PURGE_INTERVAL: Duration = Duration::from_secs(60 * 60);

#[derive(Parser)]
#[command(name = "todos")]
#[command(about = "Session-scoped todo list server")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the todo list server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port for HTTP
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Session database file (defaults to the platform data directory)
        #[arg(long)]
        db: Option<PathBuf>,
    },
    /// Delete expired sessions and exit
    Purge {
        /// Session database file (defaults to the platform data directory)
        #[arg(long)]
        db: Option<PathBuf>,
    },
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::new(
        std::env::var("RUST_LOG").unwrap_or_else(|_| "session_todos=debug,tower_http=debug".into()),
    );

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

fn open_database(path: Option<PathBuf>) -> anyhow::Result<Database> {
    let db = match path {
        Some(path) => Database::open(path)?,
        None => Database::open_default()?,
    };
    db.migrate()?;
    Ok(db)
}

async fn serve(host: &str, port: u16, db: Database) -> anyhow::Result<()> {
    let purge_db = db.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(PURGE_INTERVAL);
        loop {
            interval.tick().await;
            match purge_db.purge_expired_sessions() {
                Ok(0) => {}
                Ok(removed) => tracing::info!(removed, "Purged expired sessions"),
                Err(e) => tracing::error!("Failed to purge sessions: {:#}", e),
            }
        }
    });

    let state = AppState::new(db, SequentialIds::new(), SessionConfig::from_env());
    let app = api::create_router(state);

    let listener = tokio::net::TcpListener::bind((host, port)).await?;
    tracing::info!("Todos listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing();

    match cli.command {
        Some(Commands::Serve { host, port, db }) => {
            let db = open_database(db)?;
            serve(&host, port, db).await?;
        }
        Some(Commands::Purge { db }) => {
            let db = open_database(db)?;
            let removed = db.purge_expired_sessions()?;
            println!("Removed {} expired session(s)", removed);
        }
        None => {
            let db = open_database(None)?;
            serve("127.0.0.1", 3000, db).await?;
        }
    }

    Ok(())
}
