use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use std::path::Path;
use tracing::info;

#[cfg(feature = "desktop")]
use std::{fs, path::PathBuf};
#[cfg(feature = "desktop")]
use tauri::Manager;

use crate::config::CoachConfig;
use crate::session::CoachSession;
use crate::settings::SqliteSettingsStore;

pub type DbPool = SqlitePool;

/// Application state shared with the command layer
pub struct AppState {
  pub settings: SqliteSettingsStore,
  pub config: CoachConfig,
  /// Held only between suspension points, never across a reply delay
  pub session: tokio::sync::Mutex<CoachSession>,
}

/// sqlite URL for a database file, created on first open
pub fn sqlite_url(path: &Path) -> String {
  format!("sqlite://{}?mode=rwc", path.display())
}

/// Get the path to the database file inside the app data dir
#[cfg(feature = "desktop")]
pub fn get_db_path<R: tauri::Runtime>(app: &tauri::AppHandle<R>) -> Result<PathBuf, Box<dyn std::error::Error>> {
  let data_dir = app
    .path()
    .app_data_dir()
    .map_err(|e| format!("Failed to get app data dir: {}", e))?;

  // Create directory if it doesn't exist
  fs::create_dir_all(&data_dir)?;

  Ok(data_dir.join("smart-workout-coach.db"))
}

/// Open the connection pool and run migrations
pub async fn initialize_db(db_url: &str) -> Result<DbPool, Box<dyn std::error::Error>> {
  info!(url = %db_url, "initializing database");

  // In-memory databases are per-connection, so keep a single one
  let max_connections = if db_url.contains(":memory:") { 1 } else { 5 };

  let pool = SqlitePoolOptions::new()
    .max_connections(max_connections)
    .connect(db_url)
    .await?;

  sqlx::migrate!("./migrations").run(&pool).await?;

  info!("database initialized");

  Ok(pool)
}
