//! Chat flow with the workout buddy
//!
//! User messages land in the transcript immediately. Assistant replies are
//! paced: each one is returned as a `PendingReply` that the caller waits out
//! and then hands back to `resolve`. Every pending reply is stamped with the
//! conversation epoch; anything that moves the conversation on (a new
//! message, a tap, switching away) bumps the epoch, and a stale reply is
//! dropped instead of being appended late.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::time::Duration;
use tracing::debug;

use crate::catalog;
use crate::config::PacingConfig;
use crate::energy::{self, EnergyLevel};
use crate::models::{Message, WorkoutSuggestion};
use crate::modifier::modification_for;

static OPTION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)option (\d+)").expect("valid option pattern"));

// ---------------------------------------------------------------------------
/// Pending Replies
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Welcome,
    /// Plan introduction and the energy question
    InitialResponse,
    /// Reaction to a detected energy level, ending with two suggestions
    Suggestions,
    /// Confirmation of an "option N" pick
    SelectionConfirmed,
}

/// Assistant output waiting for its delay to elapse
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PendingReply {
    #[serde(skip)]
    epoch: u64,
    /// Last reply of its batch; landing it turns the typing indicator off
    #[serde(skip)]
    last: bool,
    pub delay: Duration,
    pub kind: ReplyKind,
    pub messages: Vec<Message>,
    /// Energy level to remember once the reply is shown
    pub energy: Option<EnergyLevel>,
}

/// A suggestion the user picked, with the energy bucket it came from
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Selection {
    pub suggestion: WorkoutSuggestion,
    pub level: EnergyLevel,
}

/// Result of submitting a message
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Submission {
    pub reply: Option<PendingReply>,
    pub selection: Option<Selection>,
}

// ---------------------------------------------------------------------------
/// Conversation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Conversation {
    messages: Vec<Message>,
    energy: Option<EnergyLevel>,
    epoch: u64,
    typing_epoch: Option<u64>,
    plan_intro_shown: bool,
    pacing: PacingConfig,
}

impl Conversation {
    pub fn new(pacing: PacingConfig) -> Self {
        Self::with_transcript(Vec::new(), pacing)
    }

    /// Resume with an existing transcript (no welcome sequence)
    pub fn with_transcript(messages: Vec<Message>, pacing: PacingConfig) -> Self {
        Self {
            messages,
            energy: None,
            epoch: 0,
            typing_epoch: None,
            plan_intro_shown: false,
            pacing,
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn energy_level(&self) -> Option<EnergyLevel> {
        self.energy
    }

    /// Typing indicator: on while a current reply is outstanding
    pub fn is_typing(&self) -> bool {
        self.typing_epoch == Some(self.epoch)
    }

    pub fn plan_intro_shown(&self) -> bool {
        self.plan_intro_shown
    }

    /// Drop every outstanding reply
    pub fn supersede(&mut self) {
        self.epoch += 1;
        self.typing_epoch = None;
        debug!(epoch = self.epoch, "superseded pending replies");
    }

    fn queue(
        &mut self,
        kind: ReplyKind,
        delay: Duration,
        messages: Vec<Message>,
        energy: Option<EnergyLevel>,
    ) -> PendingReply {
        self.typing_epoch = Some(self.epoch);
        PendingReply {
            epoch: self.epoch,
            last: true,
            delay,
            kind,
            messages,
            energy,
        }
    }

    /// Welcome messages for an empty transcript, one reply per message, to
    /// be delivered in order
    pub fn welcome(&mut self) -> Vec<PendingReply> {
        if !self.messages.is_empty() {
            return Vec::new();
        }
        let typing = self.pacing.welcome_typing;
        let settle = self.pacing.welcome_settle;
        let messages = catalog::welcome_messages();
        let count = messages.len();
        messages
            .into_iter()
            .enumerate()
            .map(|(i, message)| {
                let delay = if i == 0 { typing } else { settle + typing };
                let mut reply = self.queue(ReplyKind::Welcome, delay, vec![message], None);
                reply.last = i + 1 == count;
                reply
            })
            .collect()
    }

    /// Apply a reply whose delay has elapsed. Returns `false` when it was
    /// superseded and nothing changed.
    pub fn resolve(&mut self, reply: PendingReply) -> bool {
        if reply.epoch != self.epoch {
            debug!(kind = ?reply.kind, reply_epoch = reply.epoch, epoch = self.epoch, "dropping stale reply");
            return false;
        }
        self.messages.extend(reply.messages);
        if reply.energy.is_some() {
            self.energy = reply.energy;
        }
        if reply.kind == ReplyKind::InitialResponse {
            self.plan_intro_shown = true;
        }
        if reply.last {
            self.typing_epoch = None;
        }
        true
    }

    /// Wait out the reply's delay, then resolve it. The plan introduction is
    /// given an extra moment on screen before this returns.
    pub async fn deliver(&mut self, reply: PendingReply) -> bool {
        tokio::time::sleep(reply.delay).await;
        let kind = reply.kind;
        let resolved = self.resolve(reply);
        if resolved && kind == ReplyKind::InitialResponse {
            tokio::time::sleep(self.pacing.initial_settle).await;
        }
        resolved
    }

    /// Deliver a batch in order, stopping at the first stale one
    pub async fn deliver_all(&mut self, replies: Vec<PendingReply>) -> usize {
        let mut delivered = 0;
        for reply in replies {
            if !self.deliver(reply).await {
                break;
            }
            delivered += 1;
        }
        delivered
    }

    /// The most recent message offering suggestions
    fn last_suggestions(&self) -> Option<&[WorkoutSuggestion]> {
        self.messages
            .iter()
            .rev()
            .find_map(|m| m.suggestions.as_deref())
    }

    fn pick(&self, index: usize) -> Option<Selection> {
        let level = self.energy?;
        let suggestion = self.last_suggestions()?.get(index)?.clone();
        Some(Selection { suggestion, level })
    }

    /// Handle typed (or dictated) input
    pub fn submit(&mut self, input: &str) -> Submission {
        if input.trim().is_empty() {
            return Submission::default();
        }

        self.supersede();
        self.messages.push(Message::user(input));

        // "option 2" picks from the last offered suggestions
        let picked = OPTION_PATTERN
            .captures(input)
            .and_then(|caps| caps[1].parse::<usize>().ok())
            .and_then(|n| n.checked_sub(1))
            .and_then(|index| self.pick(index));
        if let Some(selection) = picked {
            let messages = vec![
                Message::user(format!("Selected: {}", selection.suggestion.title)),
                Message::assistant(catalog::PLAN_UPDATED),
            ];
            let reply = self.queue(
                ReplyKind::SelectionConfirmed,
                self.pacing.selection_delay,
                messages,
                None,
            );
            return Submission {
                reply: Some(reply),
                selection: Some(selection),
            };
        }

        if input.eq_ignore_ascii_case("sounds good") {
            let messages = vec![
                Message::assistant(catalog::INITIAL_RESPONSE),
                Message::assistant(catalog::ENERGY_QUERY),
            ];
            let reply = self.queue(
                ReplyKind::InitialResponse,
                self.pacing.reply_delay,
                messages,
                None,
            );
            return Submission {
                reply: Some(reply),
                selection: None,
            };
        }

        if self.energy.is_some() {
            return Submission::default();
        }

        let Some(level) = energy::classify(input) else {
            return Submission::default();
        };
        let messages = suggestion_messages(level);
        let reply = self.queue(
            ReplyKind::Suggestions,
            self.pacing.reply_delay,
            messages,
            Some(level),
        );
        Submission {
            reply: Some(reply),
            selection: None,
        }
    }

    /// Tap on a suggestion card. Confirms right away.
    pub fn select_suggestion(&mut self, index: usize) -> Option<Selection> {
        let selection = self.pick(index)?;
        self.supersede();
        self.messages.push(Message::user(format!(
            "Selected: {}",
            selection.suggestion.title
        )));
        self.messages.push(Message::assistant(catalog::PLAN_UPDATED));
        Some(selection)
    }

    /// "Adapt workout" from the plan view: ask again how the user feels
    pub fn request_adaptation(&mut self) {
        self.supersede();
        self.energy = None;
        self.messages.push(Message::user(catalog::ADAPTATION_REQUEST));
        self.messages.push(Message::assistant(catalog::ADAPTATION_PROMPT));
    }
}

/// Assistant messages for a detected level, ending with the choice message
pub fn suggestion_messages(level: EnergyLevel) -> Vec<Message> {
    let mut messages = match level {
        EnergyLevel::Low => vec![
            Message::assistant(catalog::LOW_ENERGY_RESPONSE),
            Message::assistant(catalog::MOTIVATION_RESPONSE),
        ],
        EnergyLevel::Medium => vec![Message::assistant(catalog::MEDIUM_ENERGY_RESPONSE)],
        EnergyLevel::High => vec![Message::assistant(catalog::HIGH_ENERGY_RESPONSE)],
    };
    messages.push(Message::assistant(catalog::SUGGEST_OPTIONS));

    let suggestions = modification_for(level).suggestions();
    let text = suggestions
        .iter()
        .map(WorkoutSuggestion::chat_summary)
        .collect::<Vec<_>>()
        .join("\n\n");
    messages.push(Message::with_suggestions(text, suggestions));
    messages
}

// ---------------------------------------------------------------------------
/// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn conversation() -> Conversation {
        Conversation::new(PacingConfig::default())
    }

    fn offer_low_energy(chat: &mut Conversation) {
        let reply = chat.submit("I'm so tired").reply.unwrap();
        assert!(chat.resolve(reply));
    }

    #[test]
    fn test_blank_input_is_ignored() {
        let mut chat = conversation();
        assert_eq!(chat.submit("   "), Submission::default());
        assert!(chat.messages().is_empty());
    }

    #[test]
    fn test_low_energy_reply_offers_two_suggestions() {
        let mut chat = conversation();
        let submission = chat.submit("I'm so tired");
        assert!(submission.selection.is_none());
        let reply = submission.reply.unwrap();
        assert_eq!(reply.kind, ReplyKind::Suggestions);
        assert_eq!(reply.delay, Duration::from_millis(2000));
        assert_eq!(reply.energy, Some(EnergyLevel::Low));

        // User message shows right away, energy only once the reply lands
        assert_eq!(chat.messages().len(), 1);
        assert!(chat.is_typing());
        assert_eq!(chat.energy_level(), None);

        assert!(chat.resolve(reply));
        assert!(!chat.is_typing());
        assert_eq!(chat.energy_level(), Some(EnergyLevel::Low));

        let texts: Vec<_> = chat.messages().iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts[1], catalog::LOW_ENERGY_RESPONSE);
        assert_eq!(texts[2], catalog::MOTIVATION_RESPONSE);
        assert_eq!(texts[3], catalog::SUGGEST_OPTIONS);

        let offer = chat.messages().last().unwrap();
        let suggestions = offer.suggestions.as_ref().unwrap();
        assert_eq!(suggestions.len(), 2);
        assert_eq!(suggestions[0].title, "Yoga Vinyasa Flow");
        assert!(offer.text.starts_with(
            "Yoga Vinyasa Flow (30 MIN, Low)\nA gentle flow combining breath"
        ));
        assert!(offer.text.contains("\n\nLow Intensity Legs (25 MIN, Low)\n"));
    }

    #[test]
    fn test_high_and_medium_intros() {
        let high = suggestion_messages(EnergyLevel::High);
        assert_eq!(high.len(), 3);
        assert_eq!(high[0].text, catalog::HIGH_ENERGY_RESPONSE);

        let medium = suggestion_messages(EnergyLevel::Medium);
        assert_eq!(medium[0].text, catalog::MEDIUM_ENERGY_RESPONSE);
        let titles: Vec<_> = medium[2]
            .suggestions
            .as_ref()
            .unwrap()
            .iter()
            .map(|s| s.title.as_str())
            .collect();
        assert_eq!(titles, ["Balanced Workout Mix", "Moderate Cardio Plus"]);
    }

    #[test]
    fn test_sounds_good_queues_plan_intro() {
        let mut chat = conversation();
        let reply = chat.submit("Sounds Good").reply.unwrap();
        assert_eq!(reply.kind, ReplyKind::InitialResponse);
        assert!(chat.resolve(reply));
        assert!(chat.plan_intro_shown());
        let last_two: Vec<_> = chat.messages()[1..].iter().map(|m| m.text.as_str()).collect();
        assert_eq!(last_two, [catalog::INITIAL_RESPONSE, catalog::ENERGY_QUERY]);
    }

    #[test]
    fn test_unclassified_input_gets_no_reply() {
        let mut chat = conversation();
        assert_eq!(chat.submit("banana").reply, None);
        assert_eq!(chat.messages().len(), 1);
        assert!(!chat.is_typing());
    }

    #[test]
    fn test_known_energy_skips_classification() {
        let mut chat = conversation();
        offer_low_energy(&mut chat);
        assert_eq!(chat.submit("actually I feel great").reply, None);
        assert_eq!(chat.energy_level(), Some(EnergyLevel::Low));
    }

    #[test]
    fn test_option_number_selects_suggestion() {
        let mut chat = conversation();
        offer_low_energy(&mut chat);

        let submission = chat.submit("Option 2 please");
        let selection = submission.selection.unwrap();
        assert_eq!(selection.suggestion.title, "Low Intensity Legs");
        assert_eq!(selection.level, EnergyLevel::Low);

        let reply = submission.reply.unwrap();
        assert_eq!(reply.kind, ReplyKind::SelectionConfirmed);
        assert_eq!(reply.delay, Duration::from_millis(4000));
        assert!(chat.resolve(reply));

        let n = chat.messages().len();
        assert_eq!(chat.messages()[n - 2], Message::user("Selected: Low Intensity Legs"));
        assert_eq!(chat.messages()[n - 1], Message::assistant(catalog::PLAN_UPDATED));
    }

    #[test]
    fn test_option_out_of_range_falls_through() {
        let mut chat = conversation();
        offer_low_energy(&mut chat);
        let submission = chat.submit("option 3");
        assert_eq!(submission, Submission::default());
        let submission = chat.submit("option 0");
        assert!(submission.selection.is_none());
    }

    #[test]
    fn test_option_without_offer_is_classified_instead() {
        let mut chat = conversation();
        let submission = chat.submit("option 1, I'm exhausted");
        assert!(submission.selection.is_none());
        assert_eq!(submission.reply.unwrap().energy, Some(EnergyLevel::Low));
    }

    #[test]
    fn test_tap_selects_immediately() {
        let mut chat = conversation();
        offer_low_energy(&mut chat);
        let selection = chat.select_suggestion(0).unwrap();
        assert_eq!(selection.suggestion.title, "Yoga Vinyasa Flow");
        assert_eq!(
            chat.messages().last().unwrap(),
            &Message::assistant(catalog::PLAN_UPDATED)
        );
        assert!(chat.select_suggestion(5).is_none());
    }

    #[test]
    fn test_new_message_supersedes_pending_reply() {
        let mut chat = conversation();
        let stale = chat.submit("I'm so tired").reply.unwrap();
        let fresh = chat.submit("sounds good").reply.unwrap();

        assert!(!chat.resolve(stale));
        assert_eq!(chat.energy_level(), None);
        assert!(chat.is_typing());

        assert!(chat.resolve(fresh));
        assert!(!chat.is_typing());
        assert!(chat
            .messages()
            .iter()
            .all(|m| m.text != catalog::LOW_ENERGY_RESPONSE));
    }

    #[test]
    fn test_supersede_drops_reply_and_typing() {
        let mut chat = conversation();
        let reply = chat.submit("I feel pumped").reply.unwrap();
        chat.supersede();
        assert!(!chat.is_typing());
        assert!(!chat.resolve(reply));
        assert_eq!(chat.messages().len(), 1);
    }

    #[test]
    fn test_request_adaptation_forgets_energy() {
        let mut chat = conversation();
        offer_low_energy(&mut chat);
        chat.request_adaptation();
        assert_eq!(chat.energy_level(), None);
        assert_eq!(
            chat.messages().last().unwrap(),
            &Message::assistant(catalog::ADAPTATION_PROMPT)
        );
        let reply = chat.submit("feeling great").reply.unwrap();
        assert_eq!(reply.energy, Some(EnergyLevel::High));
    }

    #[test]
    fn test_welcome_only_for_empty_transcript() {
        let mut chat = conversation();
        let replies = chat.welcome();
        assert_eq!(replies.len(), 3);
        assert_eq!(replies[0].delay, Duration::from_millis(1000));
        assert_eq!(replies[1].delay, Duration::from_millis(1500));

        let mut resumed =
            Conversation::with_transcript(vec![Message::user("hi")], PacingConfig::default());
        assert!(resumed.welcome().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deliver_waits_for_delay() {
        let mut chat = conversation();
        let reply = chat.submit("I'm okay").reply.unwrap();
        let start = tokio::time::Instant::now();
        assert!(chat.deliver(reply).await);
        assert!(start.elapsed() >= Duration::from_millis(2000));
        assert_eq!(chat.energy_level(), Some(EnergyLevel::Medium));
    }

    #[tokio::test(start_paused = true)]
    async fn test_deliver_all_welcome_messages() {
        let mut chat = conversation();
        let replies = chat.welcome();
        assert!(chat.is_typing());
        assert_eq!(chat.deliver_all(replies).await, 3);
        assert_eq!(chat.messages(), catalog::welcome_messages().as_slice());
        assert!(!chat.is_typing());
    }

    #[tokio::test(start_paused = true)]
    async fn test_deliver_all_stops_when_superseded() {
        let mut chat = conversation();
        let mut replies = chat.welcome();
        let first = replies.remove(0);
        assert!(chat.deliver(first).await);
        chat.supersede();
        assert_eq!(chat.deliver_all(replies).await, 0);
        assert_eq!(chat.messages().len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_plan_intro_settles_before_returning() {
        let mut chat = conversation();
        let reply = chat.submit("sounds good").reply.unwrap();
        let start = tokio::time::Instant::now();
        assert!(chat.deliver(reply).await);
        assert!(start.elapsed() >= Duration::from_millis(2500));
        assert!(chat.plan_intro_shown());
    }

    #[test]
    fn test_typing_stops_after_last_welcome_message() {
        let mut chat = Conversation::new(PacingConfig::immediate());
        let replies = chat.welcome();
        let count = replies.len();
        for (i, reply) in replies.into_iter().enumerate() {
            assert!(chat.is_typing(), "typing before welcome message {}", i);
            assert!(chat.resolve(reply));
        }
        assert_eq!(chat.messages().len(), count);
        assert!(!chat.is_typing());
    }

    #[test]
    fn test_sounds_good_must_match_exactly() {
        let mut chat = conversation();
        assert_eq!(chat.submit("sounds good "), Submission::default());
        assert_eq!(chat.submit("sounds good to me"), Submission::default());
        let reply = chat.submit("SOUNDS GOOD").reply.unwrap();
        assert_eq!(reply.kind, ReplyKind::InitialResponse);
    }
}
