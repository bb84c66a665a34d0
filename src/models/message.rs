use serde::{Deserialize, Serialize};

use super::suggestion::WorkoutSuggestion;

/// One transcript entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
  pub text: String,
  #[serde(rename = "isAI")]
  pub is_ai: bool,
  /// Only present on the message that offers a choice
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub suggestions: Option<Vec<WorkoutSuggestion>>,
}

impl Message {
  pub fn assistant(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      is_ai: true,
      suggestions: None,
    }
  }

  pub fn user(text: impl Into<String>) -> Self {
    Self {
      text: text.into(),
      is_ai: false,
      suggestions: None,
    }
  }

  pub fn with_suggestions(text: impl Into<String>, suggestions: Vec<WorkoutSuggestion>) -> Self {
    Self {
      text: text.into(),
      is_ai: true,
      suggestions: Some(suggestions),
    }
  }
}
