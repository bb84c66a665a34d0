//! First-run onboarding
//!
//! The only persisted state in the app: a flag stored under
//! `hasCompletedOnboarding`. The literal `"true"` means completed; any other
//! value, or no value, means not completed.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::settings::{SettingsError, SettingsStore};

pub const ONBOARDING_KEY: &str = "hasCompletedOnboarding";
const COMPLETED: &str = "true";

/// ---------------------------------------------------------------------------
/// Persisted Flag
/// ---------------------------------------------------------------------------

pub async fn is_completed(store: &dyn SettingsStore) -> Result<bool, SettingsError> {
  Ok(store.get(ONBOARDING_KEY).await?.as_deref() == Some(COMPLETED))
}

pub async fn mark_completed(store: &dyn SettingsStore) -> Result<(), SettingsError> {
  store.set(ONBOARDING_KEY, COMPLETED).await?;
  info!("onboarding completed");
  Ok(())
}

/// "Restart Onboarding" from the profile menu
pub async fn reset(store: &dyn SettingsStore) -> Result<(), SettingsError> {
  store.remove(ONBOARDING_KEY).await?;
  info!("onboarding reset");
  Ok(())
}

/// ---------------------------------------------------------------------------
/// Screens
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStep {
  pub title: &'static str,
  pub body: &'static str,
  pub permissions: &'static [&'static str],
  pub action: &'static str,
}

pub const STEPS: [OnboardingStep; 2] = [
  OnboardingStep {
    title: "Introducing Smart Workouts",
    body: "Workout plans that adapt to your energy and motivation EVERY day! Do more based on how you feel.",
    permissions: &[],
    action: "Show me more",
  },
  OnboardingStep {
    title: "Your fitness buddy",
    body: "Your fitness buddy will ask you about your well-being and provide recommendations so you don't miss any workouts. We'll need the following access:",
    permissions: &[
      "Access to your profile data",
      "Microphone access for voice check-ins",
    ],
    action: "Continue",
  },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "phase", content = "step", rename_all = "snake_case")]
pub enum OnboardingPhase {
  Step(usize),
  /// "We are setting you up..."
  SettingUp,
  Complete,
}

/// Overlay state machine: steps -> setting up -> complete
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OnboardingFlow {
  phase: OnboardingPhase,
}

impl Default for OnboardingFlow {
  fn default() -> Self {
    Self::new(false)
  }
}

impl OnboardingFlow {
  pub fn new(completed: bool) -> Self {
    let phase = if completed {
      OnboardingPhase::Complete
    } else {
      OnboardingPhase::Step(0)
    };
    Self { phase }
  }

  pub fn phase(&self) -> OnboardingPhase {
    self.phase
  }

  /// Overlay shown when not complete
  pub fn is_visible(&self) -> bool {
    self.phase != OnboardingPhase::Complete
  }

  pub fn current_step(&self) -> Option<&'static OnboardingStep> {
    match self.phase {
      OnboardingPhase::Step(i) => STEPS.get(i),
      _ => None,
    }
  }

  /// Advance; the last step moves into the setting-up phase
  pub fn next(&mut self) -> OnboardingPhase {
    if let OnboardingPhase::Step(i) = self.phase {
      self.phase = if i + 1 < STEPS.len() {
        OnboardingPhase::Step(i + 1)
      } else {
        OnboardingPhase::SettingUp
      };
    }
    self.phase
  }

  pub fn back(&mut self) -> OnboardingPhase {
    if let OnboardingPhase::Step(i) = self.phase {
      self.phase = OnboardingPhase::Step(i.saturating_sub(1));
    }
    self.phase
  }

  /// Leave the setting-up screen and persist completion. Does nothing in
  /// any other phase.
  pub async fn finish(&mut self, store: &dyn SettingsStore) -> Result<OnboardingPhase, SettingsError> {
    if self.phase == OnboardingPhase::SettingUp {
      mark_completed(store).await?;
      self.phase = OnboardingPhase::Complete;
    }
    Ok(self.phase)
  }

  /// Clear the flag and show the overlay again from the first step
  pub async fn restart(&mut self, store: &dyn SettingsStore) -> Result<(), SettingsError> {
    reset(store).await?;
    self.phase = OnboardingPhase::Step(0);
    Ok(())
  }
}
