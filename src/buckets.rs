//! The three-bucket store that partitions a deck by recall success.
//!
//! Every card of the active deck lives in exactly one bucket. Cards only move
//! through [`BucketStore::apply_correct`] and [`BucketStore::apply_incorrect`],
//! and always land at the tail of their new bucket.

use std::collections::HashMap;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::SchedulerError;
use crate::models::{Bucket, BucketCounts, Card, Deck};

#[derive(Debug, Clone, Default)]
pub struct BucketStore {
    buckets: [Vec<Card>; 3],
    card_streaks: HashMap<String, u32>,
    session_streak: u32,
}

impl BucketStore {
    /// Shuffle the deck uniformly and place every card in `Learning`.
    pub fn initialize<R: Rng + ?Sized>(deck: &Deck, rng: &mut R) -> Result<Self, SchedulerError> {
        if deck.is_empty() {
            return Err(SchedulerError::EmptyDeck);
        }

        let mut learning = deck.cards().to_vec();
        learning.shuffle(rng);

        Ok(Self {
            buckets: [learning, Vec::new(), Vec::new()],
            card_streaks: HashMap::new(),
            session_streak: 0,
        })
    }

    /// A store holding no cards at all.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn locate(&self, card_id: &str) -> Result<Bucket, SchedulerError> {
        Bucket::ALL
            .into_iter()
            .find(|b| self.buckets[b.index()].iter().any(|c| c.id == card_id))
            .ok_or_else(|| SchedulerError::NotFound(card_id.to_string()))
    }

    pub fn get(&self, card_id: &str) -> Option<&Card> {
        self.buckets.iter().flatten().find(|c| c.id == card_id)
    }

    /// Promote a card one bucket (capped at `Mastered`). Returns its new bucket.
    pub fn apply_correct(&mut self, card_id: &str) -> Result<Bucket, SchedulerError> {
        let (from, card) = self.take(card_id)?;
        let to = from.promoted();
        self.buckets[to.index()].push(card);

        *self.card_streaks.entry(card_id.to_string()).or_insert(0) += 1;
        self.session_streak += 1;
        Ok(to)
    }

    /// Send a card back to `Learning` and reset both streaks.
    pub fn apply_incorrect(&mut self, card_id: &str) -> Result<Bucket, SchedulerError> {
        let (_, card) = self.take(card_id)?;
        self.buckets[Bucket::Learning.index()].push(card);

        self.card_streaks.insert(card_id.to_string(), 0);
        self.session_streak = 0;
        Ok(Bucket::Learning)
    }

    /// True once nothing is left in `Learning` or `Reviewing`.
    pub fn is_mastered(&self) -> bool {
        self.buckets[Bucket::Learning.index()].is_empty()
            && self.buckets[Bucket::Reviewing.index()].is_empty()
    }

    pub fn bucket(&self, bucket: Bucket) -> &[Card] {
        &self.buckets[bucket.index()]
    }

    /// All cards with their bucket, lowest bucket first, in bucket order.
    pub fn iter(&self) -> impl Iterator<Item = (Bucket, &Card)> {
        Bucket::ALL
            .into_iter()
            .flat_map(move |b| self.buckets[b.index()].iter().map(move |c| (b, c)))
    }

    pub fn counts(&self) -> BucketCounts {
        BucketCounts {
            learning: self.buckets[0].len(),
            reviewing: self.buckets[1].len(),
            mastered: self.buckets[2].len(),
        }
    }

    pub fn len(&self) -> usize {
        self.buckets.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn card_streak(&self, card_id: &str) -> u32 {
        self.card_streaks.get(card_id).copied().unwrap_or(0)
    }

    pub fn session_streak(&self) -> u32 {
        self.session_streak
    }

    fn take(&mut self, card_id: &str) -> Result<(Bucket, Card), SchedulerError> {
        let from = self.locate(card_id)?;
        let bucket = &mut self.buckets[from.index()];
        let pos = bucket
            .iter()
            .position(|c| c.id == card_id)
            .ok_or_else(|| SchedulerError::NotFound(card_id.to_string()))?;
        Ok((from, bucket.remove(pos)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn deck(ids: &[&str]) -> Deck {
        let cards = ids
            .iter()
            .map(|id| Card {
                id: id.to_string(),
                front: format!("Q{id}"),
                back: format!("A{id}"),
                category: "Edo".to_string(),
                difficulty: "easy".to_string(),
            })
            .collect();
        Deck::new(cards).unwrap()
    }

    fn store(ids: &[&str]) -> BucketStore {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        BucketStore::initialize(&deck(ids), &mut rng).unwrap()
    }

    fn ids(cards: &[Card]) -> Vec<&str> {
        cards.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_initialize_places_everything_in_learning() {
        let store = store(&["a", "b", "c", "d"]);
        let counts = store.counts();
        assert_eq!(counts.learning, 4);
        assert_eq!(counts.reviewing, 0);
        assert_eq!(counts.mastered, 0);
        assert_eq!(store.session_streak(), 0);

        let mut learning = ids(store.bucket(Bucket::Learning));
        learning.sort();
        assert_eq!(learning, vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn test_initialize_rejects_empty_deck() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let err = BucketStore::initialize(&Deck::empty(), &mut rng).unwrap_err();
        assert_eq!(err, SchedulerError::EmptyDeck);
    }

    #[test]
    fn test_shuffle_produces_different_orders() {
        let deck = deck(&["a", "b", "c", "d", "e", "f", "g", "h"]);
        let orders: HashSet<Vec<String>> = (0..20)
            .map(|seed| {
                let mut rng = ChaCha8Rng::seed_from_u64(seed);
                let store = BucketStore::initialize(&deck, &mut rng).unwrap();
                store.bucket(Bucket::Learning).iter().map(|c| c.id.clone()).collect()
            })
            .collect();
        assert!(orders.len() > 1, "shuffle always produced the same order");
    }

    #[test]
    fn test_correct_promotes_to_tail_of_next_bucket() {
        let mut store = store(&["a", "b", "c"]);
        assert_eq!(store.apply_correct("a").unwrap(), Bucket::Reviewing);
        assert_eq!(store.apply_correct("b").unwrap(), Bucket::Reviewing);
        assert_eq!(ids(store.bucket(Bucket::Reviewing)), vec!["a", "b"]);
        assert_eq!(store.locate("c").unwrap(), Bucket::Learning);
    }

    #[test]
    fn test_correct_from_mastered_stays_mastered() {
        let mut store = store(&["a", "b"]);
        store.apply_correct("a").unwrap();
        store.apply_correct("a").unwrap();
        assert_eq!(store.locate("a").unwrap(), Bucket::Mastered);
        assert_eq!(store.apply_correct("a").unwrap(), Bucket::Mastered);
        assert_eq!(store.counts().mastered, 1);
        assert_eq!(store.card_streak("a"), 3);
    }

    #[test]
    fn test_incorrect_demotes_to_learning_from_any_bucket() {
        let mut store = store(&["a", "b", "c"]);
        store.apply_correct("a").unwrap();
        store.apply_correct("a").unwrap();
        assert_eq!(store.locate("a").unwrap(), Bucket::Mastered);

        assert_eq!(store.apply_incorrect("a").unwrap(), Bucket::Learning);
        assert_eq!(store.bucket(Bucket::Learning).last().unwrap().id, "a");
        assert_eq!(store.card_streak("a"), 0);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_streaks() {
        let mut store = store(&["a", "b"]);
        store.apply_correct("a").unwrap();
        store.apply_correct("b").unwrap();
        assert_eq!(store.session_streak(), 2);
        assert_eq!(store.card_streak("a"), 1);

        store.apply_incorrect("b").unwrap();
        assert_eq!(store.session_streak(), 0);
        assert_eq!(store.card_streak("a"), 1);
        assert_eq!(store.card_streak("b"), 0);
    }

    #[test]
    fn test_unknown_card_is_not_found() {
        let mut store = store(&["a"]);
        let missing = SchedulerError::NotFound("zzz".to_string());
        assert_eq!(store.locate("zzz").unwrap_err(), missing);
        assert_eq!(store.apply_correct("zzz").unwrap_err(), missing);
        assert_eq!(store.apply_incorrect("zzz").unwrap_err(), missing);
        assert_eq!(store.session_streak(), 0);
    }

    #[test]
    fn test_mastered_only_when_learning_and_reviewing_empty() {
        let mut store = store(&["a", "b"]);
        assert!(!store.is_mastered());
        store.apply_correct("a").unwrap();
        store.apply_correct("b").unwrap();
        assert!(!store.is_mastered());
        store.apply_correct("a").unwrap();
        assert!(!store.is_mastered());
        store.apply_correct("b").unwrap();
        assert!(store.is_mastered());
    }

    #[test]
    fn test_empty_store() {
        let store = BucketStore::empty();
        assert!(store.is_empty());
        assert!(store.is_mastered());
        assert_eq!(store.iter().count(), 0);
    }
}
