use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::workout::Intensity;

/// Categories a suggestion can belong to. Each one has a card image in
/// `catalog::thumbnail_for`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkoutCategory {
  Yoga,
  #[serde(rename = "High Intensity")]
  HighIntensity,
  Strength,
  Cardio,
  Mixed,
  #[serde(rename = "Lower Body")]
  LowerBody,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown workout category: {0}")]
pub struct UnknownCategory(pub String);

impl WorkoutCategory {
  pub const ALL: [WorkoutCategory; 6] = [
    Self::Yoga,
    Self::HighIntensity,
    Self::Strength,
    Self::Cardio,
    Self::Mixed,
    Self::LowerBody,
  ];

  pub fn label(&self) -> &'static str {
    match self {
      Self::Yoga => "Yoga",
      Self::HighIntensity => "High Intensity",
      Self::Strength => "Strength",
      Self::Cardio => "Cardio",
      Self::Mixed => "Mixed",
      Self::LowerBody => "Lower Body",
    }
  }
}

impl std::fmt::Display for WorkoutCategory {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.label())
  }
}

impl std::str::FromStr for WorkoutCategory {
  type Err = UnknownCategory;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    Self::ALL
      .into_iter()
      .find(|c| c.label().eq_ignore_ascii_case(s.trim()))
      .ok_or_else(|| UnknownCategory(s.to_string()))
  }
}

/// A lightweight replacement workout offered in the chat. It has no
/// exercise breakdown and only becomes a `WorkoutDay` once accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSuggestion {
  pub id: String,
  pub title: String,
  #[serde(rename = "type")]
  pub category: WorkoutCategory,
  pub duration: String,
  pub intensity: Intensity,
  pub description: String,
  pub thumbnail: String,
}

impl WorkoutSuggestion {
  /// One line per suggestion as listed in the chat: title, then duration and
  /// intensity, then the description underneath
  pub fn chat_summary(&self) -> String {
    format!(
      "{} ({}, {})\n{}",
      self.title, self.duration, self.intensity, self.description
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_category_parses_labels_case_insensitively() {
    assert_eq!("Yoga".parse::<WorkoutCategory>(), Ok(WorkoutCategory::Yoga));
    assert_eq!(
      "high intensity".parse::<WorkoutCategory>(),
      Ok(WorkoutCategory::HighIntensity)
    );
    assert_eq!(
      " Lower Body ".parse::<WorkoutCategory>(),
      Ok(WorkoutCategory::LowerBody)
    );
  }

  #[test]
  fn test_unknown_category_is_an_error() {
    let err = "Pilates".parse::<WorkoutCategory>().unwrap_err();
    assert_eq!(err, UnknownCategory("Pilates".to_string()));
    assert_eq!(err.to_string(), "Unknown workout category: Pilates");
  }

  #[test]
  fn test_category_serializes_with_display_label() {
    let json = serde_json::to_string(&WorkoutCategory::HighIntensity).unwrap();
    assert_eq!(json, "\"High Intensity\"");
  }
}
