//! Energy-level detection
//!
//! Maps free text ("feeling pretty tired today") to one of three energy
//! buckets by substring matching over fixed keyword lists.
//!
//! Priority, preserved exactly:
//! - a negation marker flips high -> low, then low -> high
//! - otherwise high, then low, then medium
//! - the medium list is never consulted by the negation branch

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Intensity;

// ---------------------------------------------------------------------------
/// Energy Level
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnergyLevel {
    Low,
    Medium,
    High,
}

impl EnergyLevel {
    pub const ALL: [EnergyLevel; 3] = [Self::High, Self::Medium, Self::Low];

    /// Intensity label a default adaptation assigns for this bucket
    pub fn intensity(&self) -> Intensity {
        match self {
            Self::Low => Intensity::Low,
            Self::Medium => Intensity::Medium,
            Self::High => Intensity::High,
        }
    }
}

impl std::fmt::Display for EnergyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Low => write!(f, "low"),
            Self::Medium => write!(f, "medium"),
            Self::High => write!(f, "high"),
        }
    }
}

impl std::str::FromStr for EnergyLevel {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            _ => Err(format!("Unknown energy level: {}", s)),
        }
    }
}

// ---------------------------------------------------------------------------
/// Keyword Lists
// ---------------------------------------------------------------------------

pub const HIGH_ENERGY_KEYWORDS: [&str; 16] = [
    "high",
    "energetic",
    "motivated",
    "pumped",
    "excited",
    "ready",
    "strong",
    "great",
    "amazing",
    "fantastic",
    "powerful",
    "enthusiastic",
    "eager",
    "active",
    "vigorous",
    "dynamic",
];

pub const LOW_ENERGY_KEYWORDS: [&str; 14] = [
    "low",
    "tired",
    "exhausted",
    "fatigued",
    "drained",
    "sleepy",
    "lazy",
    "weak",
    "sluggish",
    "unmotivated",
    "lethargic",
    "not feeling",
    "bit down",
    "under the weather",
];

pub const MEDIUM_ENERGY_KEYWORDS: [&str; 9] = [
    "medium",
    "moderate",
    "okay",
    "alright",
    "fine",
    "normal",
    "average",
    "balanced",
    "neutral",
];

pub const NEGATION_MARKERS: [&str; 6] = ["not", "don't", "cant", "can't", "won't", "wouldn't"];

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|needle| haystack.contains(needle))
}

// ---------------------------------------------------------------------------
/// Classification
// ---------------------------------------------------------------------------

/// Classify free text into an energy bucket. `None` means nothing matched.
pub fn classify(input: &str) -> Option<EnergyLevel> {
    let text = input.to_lowercase();

    let has_negation = contains_any(&text, &NEGATION_MARKERS);
    let has_high = contains_any(&text, &HIGH_ENERGY_KEYWORDS);
    let has_low = contains_any(&text, &LOW_ENERGY_KEYWORDS);

    let level = if has_negation && has_high {
        Some(EnergyLevel::Low)
    } else if has_negation && has_low {
        Some(EnergyLevel::High)
    } else if has_high {
        Some(EnergyLevel::High)
    } else if has_low {
        Some(EnergyLevel::Low)
    } else if contains_any(&text, &MEDIUM_ENERGY_KEYWORDS) {
        Some(EnergyLevel::Medium)
    } else {
        None
    };

    debug!(negation = has_negation, ?level, "classified energy level");
    level
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------
