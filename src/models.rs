//! Data models for flashcards, buckets and decks.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::SchedulerError;

/// The user's verdict on a revealed card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Judgment {
    NotYet,
    GotIt,
}

impl Judgment {
    pub fn from_correct(correct: bool) -> Self {
        if correct {
            Self::GotIt
        } else {
            Self::NotYet
        }
    }

    pub fn is_correct(&self) -> bool {
        matches!(self, Self::GotIt)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::NotYet => "Not Yet",
            Self::GotIt => "Got It",
        }
    }

    pub fn color_for_theme(&self, theme: &crate::ui::theme::Theme) -> ratatui::style::Color {
        match self {
            Self::NotYet => theme.colors.judge_not_yet,
            Self::GotIt => theme.colors.judge_got_it,
        }
    }
}

/// One of the three mastery tiers a card can sit in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Bucket {
    Learning = 0,
    Reviewing = 1,
    Mastered = 2,
}

impl Bucket {
    pub const ALL: [Bucket; 3] = [Bucket::Learning, Bucket::Reviewing, Bucket::Mastered];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Selection weight of a single card in this bucket.
    pub fn weight(self) -> u32 {
        match self {
            Self::Learning => 6,
            Self::Reviewing => 3,
            Self::Mastered => 1,
        }
    }

    /// The bucket a correct judgment moves a card into.
    pub fn promoted(self) -> Self {
        match self {
            Self::Learning => Self::Reviewing,
            Self::Reviewing | Self::Mastered => Self::Mastered,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Learning => "Learning",
            Self::Reviewing => "Reviewing",
            Self::Mastered => "Mastered",
        }
    }

    pub fn color_for_theme(self, theme: &crate::ui::theme::Theme) -> ratatui::style::Color {
        match self {
            Self::Learning => theme.colors.bucket_learning,
            Self::Reviewing => theme.colors.bucket_reviewing,
            Self::Mastered => theme.colors.bucket_mastered,
        }
    }
}

/// A single flashcard. Everything but `id` is display payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: String,
    pub front: String,
    pub back: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub difficulty: String,
}

impl Card {
    pub fn new(front: String, back: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string()[..8].to_string(),
            front,
            back,
            category: String::new(),
            difficulty: String::new(),
        }
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    pub fn with_difficulty(mut self, difficulty: impl Into<String>) -> Self {
        self.difficulty = difficulty.into();
        self
    }
}

/// Number of cards per bucket, in bucket order.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BucketCounts {
    pub learning: usize,
    pub reviewing: usize,
    pub mastered: usize,
}

impl BucketCounts {
    pub fn total(&self) -> usize {
        self.learning + self.reviewing + self.mastered
    }

    pub fn get(&self, bucket: Bucket) -> usize {
        match bucket {
            Bucket::Learning => self.learning,
            Bucket::Reviewing => self.reviewing,
            Bucket::Mastered => self.mastered,
        }
    }
}

/// An immutable, id-unique set of cards handed to a study session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    pub fn new(cards: Vec<Card>) -> Result<Self, SchedulerError> {
        let mut seen = HashSet::with_capacity(cards.len());
        for card in &cards {
            if !seen.insert(card.id.as_str()) {
                return Err(SchedulerError::DuplicateCard(card.id.clone()));
            }
        }
        Ok(Self { cards })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(id: &str) -> Card {
        Card {
            id: id.to_string(),
            front: format!("front {id}"),
            back: format!("back {id}"),
            category: String::new(),
            difficulty: String::new(),
        }
    }

    #[test]
    fn test_deck_rejects_duplicate_ids() {
        let err = Deck::new(vec![card("a"), card("b"), card("a")]).unwrap_err();
        assert_eq!(err, SchedulerError::DuplicateCard("a".to_string()));
    }

    #[test]
    fn test_empty_deck_is_valid() {
        let deck = Deck::new(Vec::new()).unwrap();
        assert!(deck.is_empty());
        assert_eq!(deck, Deck::empty());
    }

    #[test]
    fn test_promotion_caps_at_mastered() {
        assert_eq!(Bucket::Learning.promoted(), Bucket::Reviewing);
        assert_eq!(Bucket::Reviewing.promoted(), Bucket::Mastered);
        assert_eq!(Bucket::Mastered.promoted(), Bucket::Mastered);
    }

    #[test]
    fn test_bucket_weights() {
        let weights: Vec<u32> = Bucket::ALL.iter().map(|b| b.weight()).collect();
        assert_eq!(weights, vec![6, 3, 1]);
    }

    #[test]
    fn test_generated_card_ids_are_short() {
        let card = Card::new("Q".into(), "A".into()).with_category("Society");
        assert_eq!(card.id.len(), 8);
        assert_eq!(card.category, "Society");
    }

    #[test]
    fn test_card_payload_fields_default_when_missing() {
        let card: Card = serde_json::from_str(r#"{"id":"x","front":"f","back":"b"}"#).unwrap();
        assert!(card.category.is_empty());
        assert!(card.difficulty.is_empty());
    }
}
