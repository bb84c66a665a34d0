pub mod chat;
pub mod devices;
pub mod onboarding;
pub mod plan;
pub mod voice;

use crate::db::AppState;
use crate::session::View;
use std::sync::Arc;
use tauri::State;

#[tauri::command]
pub async fn get_view(
  state: State<'_, Arc<AppState>>,
) -> Result<View, String> {
  Ok(state.session.lock().await.view())
}

/// Navigate between Home, Devices, Train and Plan. Leaving drops any chat
/// reply still being typed.
#[tauri::command]
pub async fn switch_view(
  state: State<'_, Arc<AppState>>,
  view: View,
) -> Result<View, String> {
  let mut session = state.session.lock().await;
  session.switch_view(view);
  Ok(session.view())
}
