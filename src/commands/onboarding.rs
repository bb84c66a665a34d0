//! Tauri commands for the first-run overlay

use serde::Serialize;
use std::sync::Arc;
use tauri::State;

use crate::db::AppState;
use crate::onboarding::{OnboardingFlow, OnboardingPhase, OnboardingStep};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingView {
  pub phase: OnboardingPhase,
  pub visible: bool,
  pub step: Option<&'static OnboardingStep>,
}

impl From<&OnboardingFlow> for OnboardingView {
  fn from(flow: &OnboardingFlow) -> Self {
    Self {
      phase: flow.phase(),
      visible: flow.is_visible(),
      step: flow.current_step(),
    }
  }
}

#[tauri::command]
pub async fn get_onboarding_status(
  state: State<'_, Arc<AppState>>,
) -> Result<OnboardingView, String> {
  Ok(state.session.lock().await.onboarding().into())
}

/// Advance a step. Leaving the last step shows the set-up screen for a
/// moment, then stores completion.
#[tauri::command]
pub async fn onboarding_next(
  state: State<'_, Arc<AppState>>,
) -> Result<OnboardingView, String> {
  let phase = state.session.lock().await.onboarding_next();
  if phase == OnboardingPhase::SettingUp {
    tokio::time::sleep(state.config.pacing.onboarding_setup).await;
    let mut session = state.session.lock().await;
    session
      .finish_onboarding(&state.settings)
      .await
      .map_err(|e| format!("Failed to save onboarding: {}", e))?;
    return Ok(session.onboarding().into());
  }
  Ok(state.session.lock().await.onboarding().into())
}

#[tauri::command]
pub async fn onboarding_back(
  state: State<'_, Arc<AppState>>,
) -> Result<OnboardingView, String> {
  let mut session = state.session.lock().await;
  session.onboarding_back();
  Ok(session.onboarding().into())
}

/// Clear the stored flag and show the overlay again
#[tauri::command]
pub async fn reset_onboarding(
  state: State<'_, Arc<AppState>>,
) -> Result<OnboardingView, String> {
  let mut session = state.session.lock().await;
  session
    .restart_onboarding(&state.settings)
    .await
    .map_err(|e| format!("Failed to reset onboarding: {}", e))?;
  Ok(session.onboarding().into())
}
