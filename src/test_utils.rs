//! Test utilities shared by the unit tests
//!
//! - Database setup/teardown
//! - Mock workout and suggestion factories

use sqlx::SqlitePool;

use crate::models::{Exercise, Intensity, WorkoutCategory, WorkoutDay, WorkoutSuggestion};

/// ---------------------------------------------------------------------------
/// Database Test Utilities
/// ---------------------------------------------------------------------------

/// Create an in-memory SQLite database for testing
/// Runs all migrations and returns a ready-to-use pool
///
/// Uses max_connections(1) to prevent multiple pool connections from creating
/// isolated in-memory databases, which would cause intermittent test failures
pub async fn setup_test_db() -> SqlitePool {
  let pool = sqlx::sqlite::SqlitePoolOptions::new()
    .max_connections(1)
    .connect("sqlite::memory:")
    .await
    .expect("Failed to create in-memory database");

  sqlx::migrate!("./migrations")
    .run(&pool)
    .await
    .expect("Failed to run migrations");

  pool
}

/// Close a test database pool
pub async fn teardown_test_db(pool: SqlitePool) {
  pool.close().await;
}

/// ---------------------------------------------------------------------------
/// Mock Data Factories
/// ---------------------------------------------------------------------------

/// A plain, unadapted workout day
pub fn mock_workout_day(id: &str, duration: &str, calories: u32) -> WorkoutDay {
  WorkoutDay {
    id: id.to_string(),
    date: "Monday, Mar 18".to_string(),
    category: "Cardio".to_string(),
    title: "Test Run".to_string(),
    duration: duration.to_string(),
    intensity: Intensity::Medium,
    calories,
    video_url: "/videos/test-run".to_string(),
    thumbnail: "https://example.com/run.jpg".to_string(),
    exercises: vec![Exercise {
      name: "Intervals".to_string(),
      sets: 4,
      reps: 1,
    }],
    description: Some("Steady effort".to_string()),
    is_ai_modified: false,
    original_plan: None,
    ai_reasoning: None,
  }
}

/// A suggestion card with the given title and intensity
pub fn mock_suggestion(title: &str, intensity: Intensity) -> WorkoutSuggestion {
  WorkoutSuggestion {
    id: "mock".to_string(),
    title: title.to_string(),
    category: WorkoutCategory::Strength,
    duration: "40 MIN".to_string(),
    intensity,
    description: format!("{} for testing", title),
    thumbnail: "https://example.com/strength.jpg".to_string(),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[tokio::test]
  async fn test_setup_test_db() {
    let pool = setup_test_db().await;

    // Verify the settings table exists
    let result: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM app_settings")
      .fetch_one(&pool)
      .await
      .expect("Failed to query app_settings table");

    assert_eq!(result.0, 0);
    teardown_test_db(pool).await;
  }

  #[test]
  fn test_mock_workout_day_is_unadapted() {
    let day = mock_workout_day("9", "45 MIN", 400);
    assert_eq!(day.id, "9");
    assert!(!day.is_ai_modified);
    assert!(day.original_plan.is_none());
  }
}
