//! Voice check-ins
//!
//! Speech-to-text lives outside the app (a platform recognizer). The core
//! only starts and stops it and consumes the events it reports. A missing or
//! failing recognizer disables voice input and shows a message; it never
//! fails the chat.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

pub const UNSUPPORTED_MESSAGE: &str = "Speech recognition is not supported in this browser.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VoiceError {
  #[error("Speech recognition is not supported in this browser.")]
  Unsupported,

  #[error("Error: {0}")]
  Recognition(String),
}

/// Platform speech recognizer
pub trait SpeechRecognizer: Send {
  fn start(&mut self) -> Result<(), VoiceError>;
  fn stop(&mut self);
}

/// What the recognizer reports back
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "kind", content = "text", rename_all = "snake_case")]
pub enum VoiceEvent {
  Started,
  /// Partial text; not acted on
  Interim(String),
  /// Finished utterance
  Final(String),
  Error(String),
  Ended,
  /// The platform has no speech API
  Unsupported,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceStatus {
  pub listening: bool,
  pub available: bool,
  pub error: Option<String>,
}

pub struct VoiceInput {
  recognizer: Option<Box<dyn SpeechRecognizer>>,
  listening: bool,
  error: Option<String>,
}

impl VoiceInput {
  /// `None` means the platform has no recognizer
  pub fn new(recognizer: Option<Box<dyn SpeechRecognizer>>) -> Self {
    Self {
      recognizer,
      listening: false,
      error: None,
    }
  }

  pub fn unsupported() -> Self {
    Self::new(None)
  }

  pub fn status(&self) -> VoiceStatus {
    VoiceStatus {
      listening: self.listening,
      available: self.recognizer.is_some(),
      error: self.error.clone(),
    }
  }

  pub fn is_listening(&self) -> bool {
    self.listening
  }

  /// Mic button: start when idle, stop when listening
  pub fn toggle(&mut self) -> VoiceStatus {
    if self.listening {
      self.stop();
      return self.status();
    }

    let Some(recognizer) = self.recognizer.as_mut() else {
      self.error = Some(VoiceError::Unsupported.to_string());
      return self.status();
    };

    match recognizer.start() {
      Ok(()) => {
        self.listening = true;
        self.error = None;
      }
      Err(e) => {
        warn!(error = %e, "speech recognizer failed to start");
        if e == VoiceError::Unsupported {
          self.recognizer = None;
        }
        self.listening = false;
        self.error = Some(e.to_string());
      }
    }
    self.status()
  }

  pub fn stop(&mut self) {
    if let Some(recognizer) = self.recognizer.as_mut() {
      recognizer.stop();
    }
    self.listening = false;
  }

  /// Feed a recognizer event. Returns the transcript once it is final, to be
  /// placed in the message draft.
  pub fn handle_event(&mut self, event: VoiceEvent) -> Option<String> {
    match event {
      VoiceEvent::Started => {
        self.listening = true;
        self.error = None;
        None
      }
      VoiceEvent::Interim(_) => None,
      VoiceEvent::Final(transcript) => {
        self.stop();
        Some(transcript)
      }
      VoiceEvent::Error(reason) => {
        warn!(%reason, "speech recognition error");
        self.error = Some(VoiceError::Recognition(reason).to_string());
        self.listening = false;
        None
      }
      VoiceEvent::Ended => {
        self.listening = false;
        None
      }
      VoiceEvent::Unsupported => {
        warn!("speech recognition unavailable, disabling voice input");
        self.recognizer = None;
        self.listening = false;
        self.error = Some(VoiceError::Unsupported.to_string());
        None
      }
    }
  }
}


#[cfg(test)]
mod tests {
  use super::fake::FakeRecognizer;
  use super::*;

  #[test]
  fn test_final_transcript_is_delivered_and_stops() {
    let recognizer = FakeRecognizer::default();
    let calls = recognizer.calls.clone();
    let mut voice = VoiceInput::new(Some(Box::new(recognizer)));

    assert!(voice.toggle().listening);
    assert_eq!(voice.handle_event(VoiceEvent::Interim("i feel".into())), None);
    assert_eq!(
      voice.handle_event(VoiceEvent::Final("i feel tired".into())),
      Some("i feel tired".to_string())
    );
    assert!(!voice.is_listening());
    assert_eq!(*calls.lock().unwrap(), vec!["start", "stop"]);
  }

  #[test]
  fn test_toggle_while_listening_stops() {
    let mut voice = VoiceInput::new(Some(Box::new(FakeRecognizer::default())));
    voice.toggle();
    let status = voice.toggle();
    assert!(!status.listening);
    assert!(status.available);
  }

  #[test]
  fn test_missing_recognizer_disables_voice() {
    let mut voice = VoiceInput::unsupported();
    let status = voice.toggle();
    assert!(!status.available);
    assert!(!status.listening);
    assert_eq!(status.error.as_deref(), Some(UNSUPPORTED_MESSAGE));
  }

  #[test]
  fn test_unsupported_on_start_disables_voice() {
    let recognizer = FakeRecognizer {
      fail_with: Some(VoiceError::Unsupported),
      ..Default::default()
    };
    let mut voice = VoiceInput::new(Some(Box::new(recognizer)));
    let status = voice.toggle();
    assert!(!status.available);
    assert_eq!(status.error.as_deref(), Some(UNSUPPORTED_MESSAGE));
  }

  #[test]
  fn test_recognition_error_is_shown() {
    let mut voice = VoiceInput::new(Some(Box::new(FakeRecognizer::default())));
    voice.toggle();
    assert_eq!(voice.handle_event(VoiceEvent::Error("no-speech".into())), None);
    let status = voice.status();
    assert!(!status.listening);
    assert!(status.available);
    assert_eq!(status.error.as_deref(), Some("Error: no-speech"));

    // A fresh start clears the message
    voice.toggle();
    assert_eq!(voice.status().error, None);
  }

  #[test]
  fn test_events_from_webview_json() {
    let event: VoiceEvent =
      serde_json::from_str(r#"{"kind":"final","text":"feeling strong"}"#).unwrap();
    assert_eq!(event, VoiceEvent::Final("feeling strong".to_string()));

    let event: VoiceEvent = serde_json::from_str(r#"{"kind":"ended"}"#).unwrap();
    assert_eq!(event, VoiceEvent::Ended);
  }

  #[test]
  fn test_unsupported_event_disables_voice() {
    let recognizer = FakeRecognizer::default();
    let calls = recognizer.calls.clone();
    let mut voice = VoiceInput::new(Some(Box::new(recognizer)));
    assert!(voice.toggle().listening);

    let event: VoiceEvent = serde_json::from_str(r#"{"kind":"unsupported"}"#).unwrap();
    assert_eq!(voice.handle_event(event), None);

    let status = voice.status();
    assert!(!status.listening);
    assert!(!status.available);
    assert_eq!(status.error.as_deref(), Some(UNSUPPORTED_MESSAGE));

    // Mic button stays disabled and never reaches the old recognizer
    let status = voice.toggle();
    assert!(!status.listening);
    assert_eq!(status.error.as_deref(), Some(UNSUPPORTED_MESSAGE));
    assert_eq!(*calls.lock().unwrap(), vec!["start"]);
  }
}
