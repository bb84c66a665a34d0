//! Top-level session: one user, one transcript, one plan
//!
//! Owns every piece of mutable state and is the only thing the command layer
//! talks to. Persisted state is read once at startup and handed in through
//! `SessionConfig`.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::catalog;
use crate::config::PacingConfig;
use crate::conversation::{Conversation, PendingReply, Selection, Submission};
use crate::devices::{DeviceError, DeviceRegistry};
use crate::energy::EnergyLevel;
use crate::models::{ConnectionStatus, WorkoutDay};
use crate::onboarding::{self, OnboardingFlow, OnboardingPhase};
use crate::schedule::{ScheduleError, WorkoutSchedule};
use crate::settings::{SettingsError, SettingsStore};
use crate::voice::{VoiceEvent, VoiceInput, VoiceStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
  Home,
  Devices,
  Train,
  Plan,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
  pub onboarding_completed: bool,
  pub pacing: PacingConfig,
}

impl SessionConfig {
  /// Read the persisted onboarding flag
  pub async fn load(store: &dyn SettingsStore, pacing: PacingConfig) -> Result<Self, SettingsError> {
    Ok(Self {
      onboarding_completed: onboarding::is_completed(store).await?,
      pacing,
    })
  }
}

/// Result of sending a chat message, after any plan change was committed
#[derive(Debug, Clone, PartialEq)]
pub struct ChatTurn {
  pub reply: Option<PendingReply>,
  pub adapted: Option<WorkoutDay>,
}

pub struct CoachSession {
  conversation: Conversation,
  schedule: WorkoutSchedule,
  devices: DeviceRegistry,
  onboarding: OnboardingFlow,
  voice: VoiceInput,
  view: View,
  draft: String,
}

impl CoachSession {
  pub fn start(config: SessionConfig, voice: VoiceInput) -> Self {
    info!(onboarding_completed = config.onboarding_completed, "starting session");
    Self {
      conversation: Conversation::new(config.pacing),
      schedule: WorkoutSchedule::new(catalog::initial_schedule()),
      devices: DeviceRegistry::new(catalog::initial_devices(), catalog::initial_app_connections()),
      onboarding: OnboardingFlow::new(config.onboarding_completed),
      voice,
      view: View::Home,
      draft: String::new(),
    }
  }

  pub fn conversation(&self) -> &Conversation {
    &self.conversation
  }

  pub fn schedule(&self) -> &WorkoutSchedule {
    &self.schedule
  }

  pub fn devices(&self) -> &DeviceRegistry {
    &self.devices
  }

  pub fn onboarding(&self) -> &OnboardingFlow {
    &self.onboarding
  }

  pub fn view(&self) -> View {
    self.view
  }

  pub fn draft(&self) -> &str {
    &self.draft
  }

  /// ---------------------------------------------------------------------------
  /// Navigation
  /// ---------------------------------------------------------------------------

  /// Switching away drops any reply still waiting to appear
  pub fn switch_view(&mut self, view: View) {
    if view != self.view {
      self.conversation.supersede();
      self.view = view;
    }
  }

  /// ---------------------------------------------------------------------------
  /// Chat
  /// ---------------------------------------------------------------------------

  pub fn welcome(&mut self) -> Vec<PendingReply> {
    self.conversation.welcome()
  }

  /// Send a message. An "option N" pick is applied to the selected plan day
  /// right away; the confirmation follows in the reply.
  pub fn send_message(&mut self, text: &str) -> Result<ChatTurn, ScheduleError> {
    self.draft.clear();
    let Submission { reply, selection } = self.conversation.submit(text);
    let adapted = match selection {
      Some(selection) => Some(self.apply_selection(&selection)?),
      None => None,
    };
    Ok(ChatTurn { reply, adapted })
  }

  /// Send whatever is in the draft (typed or dictated)
  pub fn send_draft(&mut self) -> Result<ChatTurn, ScheduleError> {
    let text = std::mem::take(&mut self.draft);
    self.send_message(&text)
  }

  pub fn resolve(&mut self, reply: PendingReply) -> bool {
    self.conversation.resolve(reply)
  }

  /// Tap on a suggestion card: adapt the plan and, optionally, open it
  pub fn select_suggestion(
    &mut self,
    index: usize,
    open_plan: bool,
  ) -> Result<Option<WorkoutDay>, ScheduleError> {
    let Some(selection) = self.conversation.select_suggestion(index) else {
      return Ok(None);
    };
    let adapted = self.apply_selection(&selection)?;
    if open_plan {
      self.switch_view(View::Plan);
    }
    Ok(Some(adapted))
  }

  fn apply_selection(&mut self, selection: &Selection) -> Result<WorkoutDay, ScheduleError> {
    self
      .schedule
      .adapt_current(selection.level, Some(&selection.suggestion))
      .cloned()
  }

  /// ---------------------------------------------------------------------------
  /// Plan
  /// ---------------------------------------------------------------------------

  /// "Adapt workout" on the plan: back to the chat to ask about energy
  pub fn request_adaptation(&mut self) {
    self.switch_view(View::Home);
    self.conversation.request_adaptation();
  }

  pub fn select_day(&mut self, index: usize) -> Result<&WorkoutDay, ScheduleError> {
    self.schedule.select(index)
  }

  pub fn next_day(&mut self) -> Option<&WorkoutDay> {
    self.schedule.next()
  }

  pub fn previous_day(&mut self) -> Option<&WorkoutDay> {
    self.schedule.previous()
  }

  /// Scale the selected day for an energy level without a suggestion
  pub fn adapt_current(&mut self, level: EnergyLevel) -> Result<&WorkoutDay, ScheduleError> {
    self.schedule.adapt_current(level, None)
  }

  pub fn restore_current(&mut self) -> Result<bool, ScheduleError> {
    self.schedule.restore_current()
  }

  /// ---------------------------------------------------------------------------
  /// Devices
  /// ---------------------------------------------------------------------------

  pub fn toggle_device(&mut self, device_id: &str) -> Result<ConnectionStatus, DeviceError> {
    self.devices.toggle(device_id)
  }

  /// ---------------------------------------------------------------------------
  /// Voice
  /// ---------------------------------------------------------------------------

  pub fn toggle_voice(&mut self) -> VoiceStatus {
    self.voice.toggle()
  }

  pub fn voice_status(&self) -> VoiceStatus {
    self.voice.status()
  }

  /// A final transcript replaces the draft; it is not sent automatically
  pub fn voice_event(&mut self, event: VoiceEvent) -> VoiceStatus {
    if let Some(transcript) = self.voice.handle_event(event) {
      self.draft = transcript;
    }
    self.voice.status()
  }

  /// ---------------------------------------------------------------------------
  /// Onboarding
  /// ---------------------------------------------------------------------------

  pub fn onboarding_next(&mut self) -> OnboardingPhase {
    self.onboarding.next()
  }

  pub fn onboarding_back(&mut self) -> OnboardingPhase {
    self.onboarding.back()
  }

  pub async fn finish_onboarding(&mut self, store: &dyn SettingsStore) -> Result<OnboardingPhase, SettingsError> {
    self.onboarding.finish(store).await
  }

  pub async fn restart_onboarding(&mut self, store: &dyn SettingsStore) -> Result<(), SettingsError> {
    self.onboarding.restart(store).await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::models::Intensity;
  use crate::onboarding::mark_completed;
  use crate::settings::MemorySettingsStore;
  use crate::voice::fake::FakeRecognizer;

  fn session() -> CoachSession {
    CoachSession::start(
      SessionConfig {
        onboarding_completed: true,
        pacing: PacingConfig::immediate(),
      },
      VoiceInput::new(Some(Box::new(FakeRecognizer::default()))),
    )
  }

  #[tokio::test]
  async fn test_config_reads_persisted_flag() {
    let store = MemorySettingsStore::new();
    let config = SessionConfig::load(&store, PacingConfig::immediate()).await.unwrap();
    assert!(!config.onboarding_completed);

    mark_completed(&store).await.unwrap();
    let config = SessionConfig::load(&store, PacingConfig::immediate()).await.unwrap();
    assert!(config.onboarding_completed);

    let session = CoachSession::start(config, VoiceInput::unsupported());
    assert!(!session.onboarding().is_visible());
  }

  #[test]
  fn test_tap_on_suggestion_adapts_current_day_and_opens_plan() {
    let mut session = session();
    let reply = session.send_message("honestly pretty exhausted").unwrap().reply.unwrap();
    assert!(session.resolve(reply));

    let adapted = session.select_suggestion(0, true).unwrap().unwrap();
    assert_eq!(adapted.title, "Yoga Vinyasa Flow");
    assert_eq!(adapted.calories, 200);
    assert_eq!(adapted.video_url, "/videos/yoga-vinyasa-flow");
    assert_eq!(session.view(), View::Plan);
    assert_eq!(session.schedule().days()[0], adapted);

    let original = adapted.original_plan.unwrap();
    assert_eq!(original.title, "HIIT Endurance Run");
  }

  #[test]
  fn test_option_message_adapts_without_navigating() {
    let mut session = session();
    session.select_day(1).unwrap();
    let reply = session.send_message("I feel amazing").unwrap().reply.unwrap();
    assert!(session.resolve(reply));

    let turn = session.send_message("option 2").unwrap();
    let adapted = turn.adapted.unwrap();
    assert_eq!(adapted.title, "Advanced Strength Training");
    assert_eq!(adapted.calories, 400);
    assert_eq!(session.schedule().days()[1], adapted);
    assert_eq!(session.view(), View::Home);
    assert!(session.resolve(turn.reply.unwrap()));
  }

  #[test]
  fn test_welcome_sequence_ends_without_typing_indicator() {
    let mut session = session();
    for reply in session.welcome() {
      assert!(session.resolve(reply));
    }
    assert_eq!(session.conversation().messages(), catalog::welcome_messages().as_slice());
    assert!(!session.conversation().is_typing());
  }

  #[test]
  fn test_switching_view_drops_pending_reply() {
    let mut session = session();
    let reply = session.send_message("I'm so tired").unwrap().reply.unwrap();
    session.switch_view(View::Devices);
    assert!(!session.resolve(reply));
    assert_eq!(session.conversation().messages().len(), 1);
  }

  #[test]
  fn test_switching_to_same_view_keeps_pending_reply() {
    let mut session = session();
    let reply = session.send_message("I'm so tired").unwrap().reply.unwrap();
    session.switch_view(View::Home);
    assert!(session.resolve(reply));
  }

  #[test]
  fn test_default_adaptation_and_restore() {
    let mut session = session();
    let adapted = session.adapt_current(EnergyLevel::Low).unwrap().clone();
    assert_eq!(adapted.duration, "24 MIN");
    assert_eq!(adapted.intensity, Intensity::Low);

    assert_eq!(session.restore_current(), Ok(true));
    assert_eq!(session.restore_current(), Ok(false));
    assert_eq!(session.schedule().days()[0], catalog::initial_schedule()[0]);
  }

  #[test]
  fn test_request_adaptation_returns_to_chat() {
    let mut session = session();
    session.switch_view(View::Plan);
    session.request_adaptation();
    assert_eq!(session.view(), View::Home);
    assert_eq!(
      session.conversation().messages().last().unwrap().text,
      catalog::ADAPTATION_PROMPT
    );
  }

  #[test]
  fn test_voice_transcript_fills_draft() {
    let mut session = session();
    assert!(session.toggle_voice().listening);
    let status = session.voice_event(VoiceEvent::Final("feeling okay".into()));
    assert!(!status.listening);
    assert_eq!(session.draft(), "feeling okay");

    let turn = session.send_draft().unwrap();
    assert_eq!(turn.reply.unwrap().energy, Some(EnergyLevel::Medium));
    assert_eq!(session.draft(), "");
  }

  #[test]
  fn test_toggle_device() {
    let mut session = session();
    assert_eq!(session.toggle_device("3"), Ok(ConnectionStatus::Connected));
    assert!(session.toggle_device("nope").is_err());
    assert_eq!(session.devices().connected_count(), 3);
  }

  #[tokio::test]
  async fn test_onboarding_through_session() {
    let store = MemorySettingsStore::new();
    let config = SessionConfig::load(&store, PacingConfig::immediate()).await.unwrap();
    let mut session = CoachSession::start(config, VoiceInput::unsupported());
    assert!(session.onboarding().is_visible());

    session.onboarding_next();
    assert_eq!(session.onboarding_next(), OnboardingPhase::SettingUp);
    assert_eq!(
      session.finish_onboarding(&store).await.unwrap(),
      OnboardingPhase::Complete
    );
    assert!(onboarding::is_completed(&store).await.unwrap());

    session.restart_onboarding(&store).await.unwrap();
    assert!(session.onboarding().is_visible());
    assert!(!onboarding::is_completed(&store).await.unwrap());
  }
}
