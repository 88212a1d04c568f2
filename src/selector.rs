//! Weighted random choice of the next card to show.
//!
//! Each card counts with its bucket's weight (6 for `Learning`, 3 for
//! `Reviewing`, 1 for `Mastered`). The card that was just shown is left out
//! unless it is the only candidate, in which case it is shown again.

use rand::Rng;

use crate::buckets::BucketStore;
use crate::models::Card;

/// Pick the next card from `store`, avoiding `exclude_id` when possible.
///
/// Returns `None` only when the store holds no cards.
pub fn pick<'a, R: Rng + ?Sized>(
    store: &'a BucketStore,
    exclude_id: Option<&str>,
    rng: &mut R,
) -> Option<&'a Card> {
    let total: u32 = store
        .iter()
        .filter(|(_, card)| exclude_id != Some(card.id.as_str()))
        .map(|(bucket, _)| bucket.weight())
        .sum();

    if total == 0 {
        // Repetition is unavoidable; fall back to the head of the lowest bucket.
        return store.iter().next().map(|(_, card)| card);
    }

    let mut target = rng.gen_range(0..total);
    let candidates = store
        .iter()
        .filter(|(_, card)| exclude_id != Some(card.id.as_str()));
    for (bucket, card) in candidates {
        let weight = bucket.weight();
        if target < weight {
            return Some(card);
        }
        target -= weight;
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use crate::models::{Bucket, Deck};

    fn store(ids: &[&str]) -> BucketStore {
        let cards = ids
            .iter()
            .map(|id| Card {
                id: id.to_string(),
                front: String::new(),
                back: String::new(),
                category: String::new(),
                difficulty: String::new(),
            })
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        BucketStore::initialize(&Deck::new(cards).unwrap(), &mut rng).unwrap()
    }

    #[test]
    fn test_empty_store_yields_nothing() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert!(pick(&BucketStore::empty(), None, &mut rng).is_none());
        assert!(pick(&BucketStore::empty(), Some("a"), &mut rng).is_none());
    }

    #[test]
    fn test_never_repeats_when_alternatives_exist() {
        let mut store = store(&["a", "b", "c"]);
        store.apply_correct("b").unwrap();
        store.apply_correct("c").unwrap();
        store.apply_correct("c").unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..500 {
            let card = pick(&store, Some("a"), &mut rng).unwrap();
            assert_ne!(card.id, "a");
        }
    }

    #[test]
    fn test_single_card_is_repeated() {
        let store = store(&["a"]);
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(pick(&store, Some("a"), &mut rng).unwrap().id, "a");
    }

    #[test]
    fn test_mastered_cards_remain_candidates() {
        let mut store = store(&["a", "b"]);
        store.apply_correct("b").unwrap();
        store.apply_correct("b").unwrap();
        assert_eq!(store.locate("b").unwrap(), Bucket::Mastered);

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        assert_eq!(pick(&store, Some("a"), &mut rng).unwrap().id, "b");
    }

    #[test]
    fn test_same_seed_same_choice() {
        let store = store(&["a", "b", "c", "d", "e"]);
        let mut rng1 = ChaCha8Rng::seed_from_u64(9);
        let mut rng2 = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..50 {
            let first = pick(&store, Some("c"), &mut rng1).unwrap();
            let second = pick(&store, Some("c"), &mut rng2).unwrap();
            assert_eq!(first.id, second.id);
        }
    }

    #[test]
    fn test_weights_favor_learning_cards() {
        // one card per bucket
        let mut store = store(&["learn", "review", "master"]);
        store.apply_correct("review").unwrap();
        store.apply_correct("master").unwrap();
        store.apply_correct("master").unwrap();

        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let draws = 20_000;
        let mut counts: HashMap<String, u32> = HashMap::new();
        for _ in 0..draws {
            let card = pick(&store, None, &mut rng).unwrap();
            *counts.entry(card.id.clone()).or_insert(0) += 1;
        }

        let learn = counts["learn"] as f64;
        let review = counts["review"] as f64;
        let master = counts["master"] as f64;

        let learn_ratio = learn / master;
        let review_ratio = review / master;
        assert!((5.0..7.2).contains(&learn_ratio), "learning/mastered ratio {}", learn_ratio);
        assert!((2.4..3.6).contains(&review_ratio), "reviewing/mastered ratio {}", review_ratio);
        assert!((learn / draws as f64 - 0.6).abs() < 0.03);
    }
}
