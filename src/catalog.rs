//! Static content: card images, canned assistant lines, and the seed data a
//! fresh session starts from.

use chrono::NaiveDate;

use crate::models::{
  AppConnection, ConnectionStatus, Device, DeviceKind, Intensity, Message, WorkoutCategory,
  WorkoutDay,
};

/// ---------------------------------------------------------------------------
/// Card Images
/// ---------------------------------------------------------------------------

const IMAGE_YOGA: &str =
  "https://images.unsplash.com/photo-1575052814086-f385e2e2ad1b?auto=format&fit=crop&q=80&w=800";
const IMAGE_RUN: &str =
  "https://images.unsplash.com/photo-1538805060514-97d9cc17730c?auto=format&fit=crop&q=80&w=800";
const IMAGE_STRENGTH: &str =
  "https://images.unsplash.com/photo-1581009146145-b5ef050c2e1e?auto=format&fit=crop&q=80&w=800";
const IMAGE_MIXED: &str =
  "https://images.unsplash.com/photo-1517836357463-d25dfeac3438?auto=format&fit=crop&q=80&w=800";
const IMAGE_LEGS: &str =
  "https://images.unsplash.com/photo-1434608519344-49d77a699e1d?auto=format&fit=crop&q=80&w=800";
const IMAGE_RECOVERY: &str =
  "https://images.unsplash.com/photo-1544367567-0f2fcb009e0b?auto=format&fit=crop&q=80&w=800";

/// Card image for a suggestion category. Total over `WorkoutCategory`.
pub fn thumbnail_for(category: WorkoutCategory) -> &'static str {
  match category {
    WorkoutCategory::Yoga => IMAGE_YOGA,
    WorkoutCategory::HighIntensity => IMAGE_RUN,
    WorkoutCategory::Strength => IMAGE_STRENGTH,
    WorkoutCategory::Cardio => IMAGE_RUN,
    WorkoutCategory::Mixed => IMAGE_MIXED,
    WorkoutCategory::LowerBody => IMAGE_LEGS,
  }
}

/// ---------------------------------------------------------------------------
/// Assistant Lines
/// ---------------------------------------------------------------------------

pub const INITIAL_RESPONSE: &str =
  "Alright then. As per your plan, this is what is in store for today";
pub const ENERGY_QUERY: &str = "How motivated do you feel today after your 45 min upper body strength workout yesterday? Do you feel high or low on energy?";
pub const LOW_ENERGY_RESPONSE: &str = "I understand you're feeling low on energy today. Your sleep score also tells me you didn't catch the perfect sleep last night. Happens, no?";
pub const MOTIVATION_RESPONSE: &str = "But I am glad you feel like moving. Let me suggest you some workout options that won't be too demanding but will still allow you to move well";
pub const HIGH_ENERGY_RESPONSE: &str = "That's great to hear you're feeling energetic! Let's make the most of your high energy levels today.";
pub const MEDIUM_ENERGY_RESPONSE: &str = "Sounds like you're feeling balanced today. Let's find a workout that matches your energy level.";
pub const SUGGEST_OPTIONS: &str = "Here are two workout options that would be perfect for you today:";
pub const PLAN_UPDATED: &str =
  "I've updated your workout plan with your selected option. You can start whenever you're ready.";
pub const ADAPTATION_REQUEST: &str = "I'd like to adapt my workout plan. Can you help me optimize it based on my current condition?";
pub const ADAPTATION_PROMPT: &str = "I'll help you adapt your workout. How are you feeling today? Let me know about your energy level, any soreness, or specific goals for today.";

/// Welcome sequence shown on first open of the chat
pub fn welcome_messages() -> Vec<Message> {
  vec![
    Message::assistant("Hi there 👋🏾 I'm your smart workout buddy. It's simple - I am here to help you train better and with more consistency."),
    Message::assistant("Here's how it works. I will ask you about how you feel and you can tell me about your sleep quality, energy levels and motivation for the day, and anything else really! Based on that we can work together to find a workout that best meets your needs"),
    Message::assistant("You can choose to type or speak to me. If that sounds good to you, shall we get going? I'm excited!"),
  ]
}

/// ---------------------------------------------------------------------------
/// Seed Schedule
/// ---------------------------------------------------------------------------

/// "Monday, Mar 18"
pub fn display_date(date: NaiveDate) -> String {
  date.format("%A, %b %-d").to_string()
}

/// "Mar 18 - 24" for the seven days starting at `start`
pub fn week_label(start: NaiveDate) -> String {
  let end = start + chrono::Duration::days(6);
  if end.format("%b").to_string() == start.format("%b").to_string() {
    format!("{} - {}", start.format("%b %-d"), end.format("%-d"))
  } else {
    format!("{} - {}", start.format("%b %-d"), end.format("%b %-d"))
  }
}

#[allow(clippy::too_many_arguments)]
fn scheduled_day(
  id: &str,
  date: NaiveDate,
  category: &str,
  title: &str,
  duration: &str,
  intensity: Intensity,
  calories: u32,
  video_url: &str,
  thumbnail: &str,
) -> WorkoutDay {
  WorkoutDay {
    id: id.to_string(),
    date: display_date(date),
    category: category.to_string(),
    title: title.to_string(),
    duration: duration.to_string(),
    intensity,
    calories,
    video_url: video_url.to_string(),
    thumbnail: thumbnail.to_string(),
    exercises: Vec::new(),
    description: None,
    is_ai_modified: false,
    original_plan: None,
    ai_reasoning: None,
  }
}

/// First day of the seeded plan
pub fn plan_start() -> NaiveDate {
  NaiveDate::from_ymd_opt(2024, 3, 18).unwrap_or_default()
}

pub fn initial_schedule() -> Vec<WorkoutDay> {
  let start = plan_start();
  let day = |offset: i64| start + chrono::Duration::days(offset);
  vec![
    scheduled_day(
      "1",
      day(0),
      "Cardio",
      "HIIT Endurance Run",
      "30 MIN",
      Intensity::High,
      350,
      "/videos/hiit-run",
      IMAGE_RUN,
    ),
    scheduled_day(
      "2",
      day(1),
      "Upper Body",
      "Upper Body Power",
      "45 MIN",
      Intensity::Medium,
      280,
      "/videos/upper-body",
      IMAGE_STRENGTH,
    ),
    scheduled_day(
      "3",
      day(2),
      "Lower Body",
      "Leg Day Strength",
      "50 MIN",
      Intensity::High,
      400,
      "/videos/leg-day",
      IMAGE_LEGS,
    ),
    scheduled_day(
      "4",
      day(3),
      "Rest",
      "Active Recovery",
      "20 MIN",
      Intensity::Low,
      100,
      "/videos/recovery",
      IMAGE_RECOVERY,
    ),
  ]
}

/// ---------------------------------------------------------------------------
/// Seed Devices
/// ---------------------------------------------------------------------------

pub fn initial_devices() -> Vec<Device> {
  vec![
    Device {
      id: "1".to_string(),
      name: "Apple Watch Series 8".to_string(),
      kind: DeviceKind::Watch,
      status: ConnectionStatus::Connected,
      battery_level: Some(72),
    },
    Device {
      id: "2".to_string(),
      name: "iPhone 15 Pro".to_string(),
      kind: DeviceKind::Phone,
      status: ConnectionStatus::Connected,
      battery_level: Some(85),
    },
    Device {
      id: "3".to_string(),
      name: "Garmin Forerunner".to_string(),
      kind: DeviceKind::Watch,
      status: ConnectionStatus::Disconnected,
      battery_level: None,
    },
  ]
}

pub fn initial_app_connections() -> Vec<AppConnection> {
  [
    ("nike-run", "Nike Run Club", ConnectionStatus::Connected),
    ("strava", "Strava", ConnectionStatus::Connected),
    ("apple-health", "Apple Health", ConnectionStatus::Disconnected),
  ]
  .into_iter()
  .map(|(id, name, status)| AppConnection {
    id: id.to_string(),
    name: name.to_string(),
    status,
  })
  .collect()
}
