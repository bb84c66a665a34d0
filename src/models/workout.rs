use serde::{Deserialize, Serialize};

/// Intensity label shown on a workout card
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Intensity {
  Low,
  Medium,
  High,
}

impl Intensity {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::Low => "Low",
      Self::Medium => "Medium",
      Self::High => "High",
    }
  }
}

impl std::fmt::Display for Intensity {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

impl std::str::FromStr for Intensity {
  type Err = String;
  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "Low" => Ok(Self::Low),
      "Medium" => Ok(Self::Medium),
      "High" => Ok(Self::High),
      _ => Err(format!("Unknown intensity: {}", s)),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Exercise {
  pub name: String,
  pub sets: u32,
  pub reps: u32,
}

/// A scheduled session in the workout plan.
///
/// `original_plan` holds the pre-adaptation copy. It is a `WorkoutSnapshot`,
/// which has no adaptation fields of its own, so snapshots cannot nest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutDay {
  pub id: String,
  pub date: String,
  #[serde(rename = "type")]
  pub category: String,
  pub title: String,
  pub duration: String,
  pub intensity: Intensity,
  pub calories: u32,
  pub video_url: String,
  pub thumbnail: String,
  #[serde(default)]
  pub exercises: Vec<Exercise>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
  #[serde(default)]
  pub is_ai_modified: bool,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub original_plan: Option<WorkoutSnapshot>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub ai_reasoning: Option<String>,
}

/// Pre-adaptation copy of a `WorkoutDay`, without adaptation metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkoutSnapshot {
  pub id: String,
  pub date: String,
  #[serde(rename = "type")]
  pub category: String,
  pub title: String,
  pub duration: String,
  pub intensity: Intensity,
  pub calories: u32,
  pub video_url: String,
  pub thumbnail: String,
  #[serde(default)]
  pub exercises: Vec<Exercise>,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub description: Option<String>,
}

impl WorkoutDay {
  /// Copy of the live fields, dropping any adaptation metadata
  pub fn snapshot(&self) -> WorkoutSnapshot {
    WorkoutSnapshot {
      id: self.id.clone(),
      date: self.date.clone(),
      category: self.category.clone(),
      title: self.title.clone(),
      duration: self.duration.clone(),
      intensity: self.intensity,
      calories: self.calories,
      video_url: self.video_url.clone(),
      thumbnail: self.thumbnail.clone(),
      exercises: self.exercises.clone(),
      description: self.description.clone(),
    }
  }
}

impl From<WorkoutSnapshot> for WorkoutDay {
  fn from(snapshot: WorkoutSnapshot) -> Self {
    Self {
      id: snapshot.id,
      date: snapshot.date,
      category: snapshot.category,
      title: snapshot.title,
      duration: snapshot.duration,
      intensity: snapshot.intensity,
      calories: snapshot.calories,
      video_url: snapshot.video_url,
      thumbnail: snapshot.thumbnail,
      exercises: snapshot.exercises,
      description: snapshot.description,
      is_ai_modified: false,
      original_plan: None,
      ai_reasoning: None,
    }
  }
}
