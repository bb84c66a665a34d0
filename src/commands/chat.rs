//! Tauri commands for the chat

use serde::Serialize;
use std::sync::Arc;
use tauri::State;

use crate::conversation::{PendingReply, ReplyKind};
use crate::db::AppState;
use crate::energy::EnergyLevel;
use crate::models::{Message, WorkoutDay};
use crate::session::CoachSession;

/// What the chat panel renders
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatView {
  pub messages: Vec<Message>,
  pub is_typing: bool,
  pub energy_level: Option<EnergyLevel>,
  pub plan_intro_shown: bool,
  pub draft: String,
}

impl ChatView {
  fn of(session: &CoachSession) -> Self {
    let chat = session.conversation();
    Self {
      messages: chat.messages().to_vec(),
      is_typing: chat.is_typing(),
      energy_level: chat.energy_level(),
      plan_intro_shown: chat.plan_intro_shown(),
      draft: session.draft().to_string(),
    }
  }
}

/// Outcome of a chat message, once its reply has landed (or been dropped)
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatResult {
  pub chat: ChatView,
  pub adapted_workout: Option<WorkoutDay>,
}

/// Wait out a reply without holding the session lock, then apply it
async fn deliver(state: &AppState, reply: PendingReply) -> bool {
  tokio::time::sleep(reply.delay).await;
  let kind = reply.kind;
  let resolved = state.session.lock().await.resolve(reply);
  if resolved && kind == ReplyKind::InitialResponse {
    tokio::time::sleep(state.config.pacing.initial_settle).await;
  }
  resolved
}

#[tauri::command]
pub async fn get_chat(
  state: State<'_, Arc<AppState>>,
) -> Result<ChatView, String> {
  Ok(ChatView::of(&*state.session.lock().await))
}

/// Play the welcome sequence on an empty transcript
#[tauri::command]
pub async fn start_conversation(
  state: State<'_, Arc<AppState>>,
) -> Result<ChatView, String> {
  let replies = state.session.lock().await.welcome();
  for reply in replies {
    if !deliver(&state, reply).await {
      break;
    }
  }
  Ok(ChatView::of(&*state.session.lock().await))
}

#[tauri::command]
pub async fn send_chat_message(
  state: State<'_, Arc<AppState>>,
  text: String,
) -> Result<ChatResult, String> {
  let turn = state
    .session
    .lock()
    .await
    .send_message(&text)
    .map_err(|e| format!("Failed to adapt workout: {}", e))?;

  if let Some(reply) = turn.reply {
    deliver(&state, reply).await;
  }

  Ok(ChatResult {
    chat: ChatView::of(&*state.session.lock().await),
    adapted_workout: turn.adapted,
  })
}

/// Tap on a suggestion card
#[tauri::command]
pub async fn select_workout_suggestion(
  state: State<'_, Arc<AppState>>,
  index: usize,
  open_plan: bool,
) -> Result<ChatResult, String> {
  let mut session = state.session.lock().await;
  let adapted = session
    .select_suggestion(index, open_plan)
    .map_err(|e| format!("Failed to adapt workout: {}", e))?;
  Ok(ChatResult {
    chat: ChatView::of(&session),
    adapted_workout: adapted,
  })
}

/// "Adapt workout" from the plan view
#[tauri::command]
pub async fn request_workout_adaptation(
  state: State<'_, Arc<AppState>>,
) -> Result<ChatView, String> {
  let mut session = state.session.lock().await;
  session.request_adaptation();
  Ok(ChatView::of(&session))
}
