//! Tauri commands for voice check-ins
//!
//! Recognition runs in the webview. Rust asks it to start or stop through
//! window events and receives its results through `voice_event`. A webview
//! without a speech API reports `unsupported`, which disables the mic.

use std::sync::Arc;
use tauri::{AppHandle, Emitter, State};
use tracing::warn;

use crate::db::AppState;
use crate::voice::{SpeechRecognizer, VoiceError, VoiceEvent, VoiceStatus};

pub const START_EVENT: &str = "voice://start";
pub const STOP_EVENT: &str = "voice://stop";

/// Recognizer backed by the webview's speech API
pub struct WebviewRecognizer {
  app: AppHandle,
}

impl WebviewRecognizer {
  pub fn new(app: AppHandle) -> Self {
    Self { app }
  }
}

impl SpeechRecognizer for WebviewRecognizer {
  fn start(&mut self) -> Result<(), VoiceError> {
    self
      .app
      .emit(START_EVENT, ())
      .map_err(|e| VoiceError::Recognition(e.to_string()))
  }

  fn stop(&mut self) {
    if let Err(e) = self.app.emit(STOP_EVENT, ()) {
      warn!(error = %e, "failed to stop webview recognizer");
    }
  }
}

/// Mic button
#[tauri::command]
pub async fn toggle_voice(
  state: State<'_, Arc<AppState>>,
) -> Result<VoiceStatus, String> {
  Ok(state.session.lock().await.toggle_voice())
}

#[tauri::command]
pub async fn get_voice_status(
  state: State<'_, Arc<AppState>>,
) -> Result<VoiceStatus, String> {
  Ok(state.session.lock().await.voice_status())
}

/// Recognizer event from the webview; a final transcript becomes the draft
#[tauri::command]
pub async fn voice_event(
  state: State<'_, Arc<AppState>>,
  event: VoiceEvent,
) -> Result<VoiceStatus, String> {
  Ok(state.session.lock().await.voice_event(event))
}
