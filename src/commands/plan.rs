//! Tauri commands for the weekly plan

use std::sync::Arc;
use tauri::State;

use crate::catalog;
use crate::db::AppState;
use crate::energy::EnergyLevel;
use crate::models::WorkoutDay;
use crate::schedule::WorkoutSchedule;

#[tauri::command]
pub async fn get_workout_schedule(
  state: State<'_, Arc<AppState>>,
) -> Result<WorkoutSchedule, String> {
  Ok(state.session.lock().await.schedule().clone())
}

/// Header label for the seeded week, e.g. "Mar 18 - 24"
#[tauri::command]
pub fn get_week_label() -> String {
  catalog::week_label(catalog::plan_start())
}

#[tauri::command]
pub async fn select_workout_day(
  state: State<'_, Arc<AppState>>,
  index: usize,
) -> Result<WorkoutDay, String> {
  state
    .session
    .lock()
    .await
    .select_day(index)
    .cloned()
    .map_err(|e| format!("Failed to select workout: {}", e))
}

#[tauri::command]
pub async fn next_workout_day(
  state: State<'_, Arc<AppState>>,
) -> Result<Option<WorkoutDay>, String> {
  Ok(state.session.lock().await.next_day().cloned())
}

#[tauri::command]
pub async fn previous_workout_day(
  state: State<'_, Arc<AppState>>,
) -> Result<Option<WorkoutDay>, String> {
  Ok(state.session.lock().await.previous_day().cloned())
}

/// Scale the selected day without picking a suggestion
#[tauri::command]
pub async fn adapt_workout(
  state: State<'_, Arc<AppState>>,
  level: EnergyLevel,
) -> Result<WorkoutDay, String> {
  state
    .session
    .lock()
    .await
    .adapt_current(level)
    .cloned()
    .map_err(|e| format!("Failed to adapt workout: {}", e))
}

/// Put back the original plan for the selected day. `false` when it was
/// never adapted.
#[tauri::command]
pub async fn restore_workout(
  state: State<'_, Arc<AppState>>,
) -> Result<bool, String> {
  state
    .session
    .lock()
    .await
    .restore_current()
    .map_err(|e| format!("Failed to restore workout: {}", e))
}
