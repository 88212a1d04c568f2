//! The study cat: mood and speech lines reacting to judgments.

use std::time::{Duration, Instant};

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Judgment;
use crate::session::JudgeOutcome;

const HAPPY_SPEECH: &[&str] = &[
    "Nyan~!",
    "Sugoi!",
    "Pawfect!",
    "Yatta!",
    "Meow-velous!",
    "Purr-fect!",
    "Nyamazing!",
];
const ENCOURAGE_SPEECH: &[&str] = &["Ganbatte!", "You can do it!", "Almost nyan~!", "Don't give up!"];
const STREAK_SPEECH: &[&str] = &["On fire!", "Unstoppable!", "Nyantastic!"];

/// How long a reaction stays on screen before the cat goes idle again.
pub const REACTION_TIME: Duration = Duration::from_millis(2200);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Idle,
    Happy,
    Celebrating,
    Encouraging,
    Nyan,
}

impl Mood {
    pub fn face(&self) -> &'static str {
        match self {
            Mood::Idle => "(=^･ω･^=)",
            Mood::Happy => "(=^▽^=)",
            Mood::Celebrating => "(=★ω★=)",
            Mood::Encouraging => "(=^･ｪ･^=)ﾉ",
            Mood::Nyan => "~(=^‥^)ノ🌈",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Mascot {
    pub mood: Mood,
    pub speech: Option<String>,
    since: Instant,
}

impl Default for Mascot {
    fn default() -> Self {
        Self::idle()
    }
}

impl Mascot {
    pub fn idle() -> Self {
        Self {
            mood: Mood::Idle,
            speech: None,
            since: Instant::now(),
        }
    }

    /// React to a judgment, escalating with the session streak.
    pub fn react<R: Rng + ?Sized>(outcome: &JudgeOutcome, rng: &mut R) -> Self {
        let pick = |lines: &[&str], rng: &mut R| lines.choose(rng).copied().unwrap_or_default().to_string();
        let streak = outcome.session_streak;

        let (mood, speech) = match outcome.judgment {
            _ if outcome.mastered => (Mood::Nyan, "PURR-FECT! All mastered! 🌈".to_string()),
            Judgment::NotYet => (Mood::Encouraging, pick(ENCOURAGE_SPEECH, rng)),
            Judgment::GotIt if streak >= 7 => (
                Mood::Celebrating,
                format!("{}x Streak! {}", streak, pick(STREAK_SPEECH, rng)),
            ),
            Judgment::GotIt if streak >= 4 => (
                Mood::Celebrating,
                format!("{}x! {}", streak, pick(HAPPY_SPEECH, rng)),
            ),
            Judgment::GotIt => (Mood::Happy, pick(HAPPY_SPEECH, rng)),
        };

        Self {
            mood,
            speech: Some(speech),
            since: Instant::now(),
        }
    }

    /// Drop back to idle once the reaction has been shown long enough.
    /// The mastery reaction stays until the session restarts.
    pub fn settle(&mut self) {
        if self.mood != Mood::Idle && self.mood != Mood::Nyan && self.since.elapsed() >= REACTION_TIME {
            *self = Self::idle();
        }
    }
}
