//! Workout adaptation engine
//!
//! Turns a scheduled `WorkoutDay` into an adapted one for an energy bucket,
//! either by scaling the existing session or by swapping in a suggestion the
//! user picked. The pre-adaptation fields are kept as a one-level snapshot so
//! the change can be undone.
//!
//! Both operations are pure: they borrow the input and return a new record.
//! Committing the result into the schedule is the caller's job.

use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::catalog::thumbnail_for;
use crate::energy::EnergyLevel;
use crate::models::{Intensity, WorkoutCategory, WorkoutDay, WorkoutSuggestion};

// ---------------------------------------------------------------------------
/// Error Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModifyError {
    #[error("Malformed duration {0:?}: expected a leading number of minutes")]
    MalformedDuration(String),

    #[error("Duration {0:?} is too large")]
    DurationOutOfRange(String),

    #[error("Scaled {field} overflows: {value} x {multiplier}")]
    ScaledOutOfRange {
        field: &'static str,
        value: u32,
        multiplier: f64,
    },

    #[error("Nothing to restore: workout has no original plan")]
    NothingToRestore,
}

impl Serialize for ModifyError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

// ---------------------------------------------------------------------------
/// Modification Table
// ---------------------------------------------------------------------------

/// Static description of a suggestion; realised into `WorkoutSuggestion`
/// on demand.
#[derive(Debug, Clone, Copy)]
pub struct SuggestionTemplate {
    pub id: &'static str,
    pub title: &'static str,
    pub category: WorkoutCategory,
    pub duration: &'static str,
    pub intensity: Intensity,
    pub description: &'static str,
}

impl SuggestionTemplate {
    pub fn to_suggestion(&self) -> WorkoutSuggestion {
        WorkoutSuggestion {
            id: self.id.to_string(),
            title: self.title.to_string(),
            category: self.category,
            duration: self.duration.to_string(),
            intensity: self.intensity,
            description: self.description.to_string(),
            thumbnail: thumbnail_for(self.category).to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct WorkoutModification {
    /// Kept for parity with the plan data; no adaptation path reads it
    pub intensity_multiplier: f64,
    pub duration_multiplier: f64,
    pub calories_multiplier: f64,
    pub reasoning: &'static str,
    pub suggestions: [SuggestionTemplate; 2],
}

impl WorkoutModification {
    pub fn suggestions(&self) -> Vec<WorkoutSuggestion> {
        self.suggestions.iter().map(SuggestionTemplate::to_suggestion).collect()
    }
}

const HIGH_ENERGY: WorkoutModification = WorkoutModification {
    intensity_multiplier: 1.2,
    duration_multiplier: 1.15,
    calories_multiplier: 1.25,
    reasoning: "Based on your high energy levels, I've intensified your workout to maximize your potential. I've increased the intensity and added more challenging exercises to help you achieve better results.",
    suggestions: [
        SuggestionTemplate {
            id: "1",
            title: "Power HIIT Circuit",
            category: WorkoutCategory::HighIntensity,
            duration: "45 MIN",
            intensity: Intensity::High,
            description: "An intense circuit combining polymetrics and strength training",
        },
        SuggestionTemplate {
            id: "2",
            title: "Advanced Strength Training",
            category: WorkoutCategory::Strength,
            duration: "60 MIN",
            intensity: Intensity::High,
            description: "Heavy lifting with compound exercises for maximum gains",
        },
    ],
};

const MEDIUM_ENERGY: WorkoutModification = WorkoutModification {
    intensity_multiplier: 1.0,
    duration_multiplier: 1.0,
    calories_multiplier: 1.0,
    reasoning: "I've maintained your regular workout intensity while focusing on balanced exercises that match your current energy level.",
    suggestions: [
        SuggestionTemplate {
            id: "3",
            title: "Balanced Workout Mix",
            category: WorkoutCategory::Mixed,
            duration: "40 MIN",
            intensity: Intensity::Medium,
            description: "A well-rounded combination of cardio and strength exercises",
        },
        SuggestionTemplate {
            id: "4",
            title: "Moderate Cardio Plus",
            category: WorkoutCategory::Cardio,
            duration: "35 MIN",
            intensity: Intensity::Medium,
            description: "Steady-state cardio with intervals for variety",
        },
    ],
};

const LOW_ENERGY: WorkoutModification = WorkoutModification {
    intensity_multiplier: 0.7,
    duration_multiplier: 0.8,
    calories_multiplier: 0.75,
    reasoning: "I've adapted your workout to be more manageable while still being effective. I've reduced the intensity and focused on mobility and lighter exercises to help you stay active without overexertion.",
    suggestions: [
        SuggestionTemplate {
            id: "5",
            title: "Yoga Vinyasa Flow",
            category: WorkoutCategory::Yoga,
            duration: "30 MIN",
            intensity: Intensity::Low,
            description: "A gentle flow combining breath with movement for flexibility and mindfulness",
        },
        SuggestionTemplate {
            id: "6",
            title: "Low Intensity Legs",
            category: WorkoutCategory::LowerBody,
            duration: "25 MIN",
            intensity: Intensity::Low,
            description: "A gentle lower body workout focusing on mobility and muscle activation",
        },
    ],
};

/// Table entry for a bucket. Exhaustive over `EnergyLevel`.
pub fn modification_for(level: EnergyLevel) -> &'static WorkoutModification {
    match level {
        EnergyLevel::High => &HIGH_ENERGY,
        EnergyLevel::Medium => &MEDIUM_ENERGY,
        EnergyLevel::Low => &LOW_ENERGY,
    }
}

// ---------------------------------------------------------------------------
/// Helpers
// ---------------------------------------------------------------------------

/// Leading whole number of a duration label: "30 MIN" -> 30
pub fn parse_duration_minutes(duration: &str) -> Result<u32, ModifyError> {
    let trimmed = duration.trim_start();
    let digits: &str = trimmed
        .split(|c: char| !c.is_ascii_digit())
        .next()
        .unwrap_or_default();
    if digits.is_empty() {
        return Err(ModifyError::MalformedDuration(duration.to_string()));
    }
    digits
        .parse()
        .map_err(|_| ModifyError::DurationOutOfRange(duration.to_string()))
}

/// Video path for a title: "Yoga Vinyasa Flow" -> "yoga-vinyasa-flow"
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}

/// Fixed calorie estimate for an accepted suggestion
fn suggestion_calories(suggestion: &WorkoutSuggestion) -> u32 {
    if suggestion.category.label().to_lowercase().contains("yoga") {
        200
    } else {
        match suggestion.intensity {
            Intensity::High => 400,
            Intensity::Medium => 300,
            Intensity::Low => 250,
        }
    }
}

fn scale(field: &'static str, value: u32, multiplier: f64) -> Result<u32, ModifyError> {
    let scaled = (f64::from(value) * multiplier).round();
    if scaled < 0.0 || scaled > f64::from(u32::MAX) {
        return Err(ModifyError::ScaledOutOfRange {
            field,
            value,
            multiplier,
        });
    }
    Ok(scaled as u32)
}

// ---------------------------------------------------------------------------
/// Adaptation
// ---------------------------------------------------------------------------

/// Adapt `current` to an energy bucket, optionally replacing it with a
/// chosen suggestion.
///
/// The returned day always has `is_ai_modified` set, an empty exercise list,
/// and `original_plan` holding the live fields of `current`.
pub fn modify(
    current: &WorkoutDay,
    level: EnergyLevel,
    suggestion: Option<&WorkoutSuggestion>,
) -> Result<WorkoutDay, ModifyError> {
    let modification = modification_for(level);

    let adapted = match suggestion {
        Some(chosen) => WorkoutDay {
            category: chosen.category.label().to_string(),
            title: chosen.title.clone(),
            duration: chosen.duration.clone(),
            intensity: chosen.intensity,
            calories: suggestion_calories(chosen),
            thumbnail: thumbnail_for(chosen.category).to_string(),
            video_url: format!("/videos/{}", slugify(&chosen.title)),
            ai_reasoning: Some(format!(
                "I've adapted your workout to {}. {}",
                chosen.title, modification.reasoning
            )),
            exercises: Vec::new(),
            is_ai_modified: true,
            original_plan: Some(current.snapshot()),
            ..current.clone()
        },
        None => {
            let minutes = parse_duration_minutes(&current.duration)?;
            WorkoutDay {
                intensity: level.intensity(),
                duration: format!(
                    "{} MIN",
                    scale("duration", minutes, modification.duration_multiplier)?
                ),
                calories: scale("calories", current.calories, modification.calories_multiplier)?,
                ai_reasoning: Some(modification.reasoning.to_string()),
                exercises: Vec::new(),
                is_ai_modified: true,
                original_plan: Some(current.snapshot()),
                ..current.clone()
            }
        }
    };

    debug!(
        workout_id = %current.id,
        %level,
        suggestion = suggestion.map(|s| s.title.as_str()),
        "adapted workout"
    );

    Ok(adapted)
}

/// Undo an adaptation, returning the stored snapshot with the adaptation
/// metadata cleared.
pub fn restore(current: &WorkoutDay) -> Result<WorkoutDay, ModifyError> {
    let snapshot = current
        .original_plan
        .clone()
        .ok_or(ModifyError::NothingToRestore)?;
    debug!(workout_id = %current.id, "restored original workout");
    Ok(WorkoutDay::from(snapshot))
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
