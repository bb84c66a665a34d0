//! Persisted key/value settings
//!
//! Core logic reads and writes persisted state only through `SettingsStore`.
//! The sqlite store backs the app; the in-memory store backs tests and
//! headless sessions.

use async_trait::async_trait;
use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use thiserror::Error;

use crate::db::DbPool;

/// ---------------------------------------------------------------------------
/// Error Types
/// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum SettingsError {
  #[error("Database error: {0}")]
  Database(#[from] sqlx::Error),

  #[error("Settings lock poisoned")]
  Poisoned,
}

impl Serialize for SettingsError {
  fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
  where
    S: serde::Serializer,
  {
    serializer.serialize_str(&self.to_string())
  }
}

/// ---------------------------------------------------------------------------
/// Store Contract
/// ---------------------------------------------------------------------------

#[async_trait]
pub trait SettingsStore: Send + Sync {
  async fn get(&self, key: &str) -> Result<Option<String>, SettingsError>;

  async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError>;

  /// Removing a missing key is not an error
  async fn remove(&self, key: &str) -> Result<(), SettingsError>;
}

/// ---------------------------------------------------------------------------
/// SQLite Store
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct SqliteSettingsStore {
  pool: DbPool,
}

impl SqliteSettingsStore {
  pub fn new(pool: DbPool) -> Self {
    Self { pool }
  }
}

#[async_trait]
impl SettingsStore for SqliteSettingsStore {
  async fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
    let value: Option<String> = sqlx::query_scalar("SELECT value FROM app_settings WHERE key = ?1")
      .bind(key)
      .fetch_optional(&self.pool)
      .await?;
    Ok(value)
  }

  async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
    sqlx::query(
      r#"
      INSERT INTO app_settings (key, value, updated_at)
      VALUES (?1, ?2, ?3)
      ON CONFLICT(key) DO UPDATE SET
        value = excluded.value,
        updated_at = excluded.updated_at
      "#,
    )
    .bind(key)
    .bind(value)
    .bind(Utc::now().to_rfc3339())
    .execute(&self.pool)
    .await?;
    Ok(())
  }

  async fn remove(&self, key: &str) -> Result<(), SettingsError> {
    sqlx::query("DELETE FROM app_settings WHERE key = ?1")
      .bind(key)
      .execute(&self.pool)
      .await?;
    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// In-Memory Store
/// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct MemorySettingsStore {
  values: Mutex<HashMap<String, String>>,
}

impl MemorySettingsStore {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
  async fn get(&self, key: &str) -> Result<Option<String>, SettingsError> {
    let values = self.values.lock().map_err(|_| SettingsError::Poisoned)?;
    Ok(values.get(key).cloned())
  }

  async fn set(&self, key: &str, value: &str) -> Result<(), SettingsError> {
    let mut values = self.values.lock().map_err(|_| SettingsError::Poisoned)?;
    values.insert(key.to_string(), value.to_string());
    Ok(())
  }

  async fn remove(&self, key: &str) -> Result<(), SettingsError> {
    let mut values = self.values.lock().map_err(|_| SettingsError::Poisoned)?;
    values.remove(key);
    Ok(())
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
