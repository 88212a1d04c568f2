//! Study session state machine.
//!
//! A [`Session`] owns the deck, its [`BucketStore`] and the random source.
//! The presentation layer drives it with [`Session::reveal`],
//! [`Session::judge`] and [`Session::restart`], and reads the current card,
//! bucket counts and streaks back to render them.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::buckets::BucketStore;
use crate::error::SchedulerError;
use crate::models::{Bucket, BucketCounts, Card, Deck, Judgment};
use crate::selector;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Card shown, answer hidden.
    Answering,
    /// Answer shown, waiting for a judgment.
    Revealed,
    /// Every card mastered, or nothing to study.
    Complete,
}

/// How a (re)started session begins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStart {
    Studying,
    NothingToStudy,
}

/// What a single judgment did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JudgeOutcome {
    pub card_id: String,
    pub judgment: Judgment,
    pub from: Bucket,
    pub to: Bucket,
    pub session_streak: u32,
    pub mastered: bool,
}

pub struct Session<R = ChaCha8Rng> {
    deck: Deck,
    store: BucketStore,
    state: SessionState,
    current_id: Option<String>,
    last_shown: Option<String>,
    judgments: usize,
    rng: R,
}

impl Session<ChaCha8Rng> {
    pub fn new(deck: Deck) -> Self {
        Self::with_rng(deck, ChaCha8Rng::from_entropy())
    }

    /// Create a session with a fixed seed (for testing and `--seed`).
    pub fn with_seed(deck: Deck, seed: u64) -> Self {
        Self::with_rng(deck, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(deck: Deck, rng: R) -> Self {
        let mut session = Self {
            deck,
            store: BucketStore::empty(),
            state: SessionState::Complete,
            current_id: None,
            last_shown: None,
            judgments: 0,
            rng,
        };
        session.restart(None);
        session
    }

    /// Rebuild the bucket store from `deck`, or from the current deck if `None`.
    pub fn restart(&mut self, deck: Option<Deck>) -> SessionStart {
        if let Some(deck) = deck {
            self.deck = deck;
        }
        self.last_shown = None;
        self.judgments = 0;

        let store = match BucketStore::initialize(&self.deck, &mut self.rng) {
            Ok(store) => store,
            Err(err) => {
                info!(%err, "nothing to study");
                self.store = BucketStore::empty();
                self.current_id = None;
                self.state = SessionState::Complete;
                return SessionStart::NothingToStudy;
            }
        };

        self.current_id = store
            .bucket(Bucket::Learning)
            .first()
            .map(|card| card.id.clone());
        self.store = store;
        self.state = SessionState::Answering;
        info!(cards = self.deck.len(), "session started");
        SessionStart::Studying
    }

    /// Show the answer of the current card.
    pub fn reveal(&mut self) {
        if self.state == SessionState::Answering && self.current_id.is_some() {
            self.state = SessionState::Revealed;
        }
    }

    /// Toggle between the question and answer sides.
    pub fn flip(&mut self) {
        match self.state {
            SessionState::Answering => self.reveal(),
            SessionState::Revealed => self.state = SessionState::Answering,
            SessionState::Complete => {}
        }
    }

    /// Apply a judgment to the current card and advance to the next one.
    pub fn judge(&mut self, correct: bool) -> Result<JudgeOutcome, SchedulerError> {
        let invalid = SchedulerError::InvalidState {
            action: "judge",
            state: self.state,
        };
        if self.state != SessionState::Revealed {
            return Err(invalid);
        }
        let card_id = self.current_id.clone().ok_or(invalid)?;

        let judgment = Judgment::from_correct(correct);
        let from = self.store.locate(&card_id)?;
        let to = match judgment {
            Judgment::GotIt => self.store.apply_correct(&card_id)?,
            Judgment::NotYet => self.store.apply_incorrect(&card_id)?,
        };
        self.last_shown = Some(card_id.clone());
        self.judgments += 1;

        let mastered = judgment.is_correct() && self.store.is_mastered();
        if mastered {
            self.current_id = None;
            self.state = SessionState::Complete;
            info!(judgments = self.judgments, "all cards mastered");
        } else {
            self.current_id = selector::pick(&self.store, self.last_shown.as_deref(), &mut self.rng)
                .map(|card| card.id.clone());
            self.state = if self.current_id.is_some() {
                SessionState::Answering
            } else {
                SessionState::Complete
            };
        }

        debug!(
            card = %card_id,
            ?judgment,
            ?from,
            ?to,
            next = ?self.current_id,
            "card judged"
        );

        Ok(JudgeOutcome {
            card_id,
            judgment,
            from,
            to,
            session_streak: self.store.session_streak(),
            mastered,
        })
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_card(&self) -> Option<&Card> {
        self.current_id.as_deref().and_then(|id| self.store.get(id))
    }

    pub fn current_bucket(&self) -> Option<Bucket> {
        self.current_id
            .as_deref()
            .and_then(|id| self.store.locate(id).ok())
    }

    pub fn last_shown(&self) -> Option<&str> {
        self.last_shown.as_deref()
    }

    pub fn counts(&self) -> BucketCounts {
        self.store.counts()
    }

    pub fn session_streak(&self) -> u32 {
        self.store.session_streak()
    }

    pub fn card_streak(&self, card_id: &str) -> u32 {
        self.store.card_streak(card_id)
    }

    /// Judgments made since the last restart.
    pub fn judgments(&self) -> usize {
        self.judgments
    }

    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    pub fn store(&self) -> &BucketStore {
        &self.store
    }

    /// True when the session was started with an empty deck.
    pub fn is_empty(&self) -> bool {
        self.deck.is_empty()
    }

    pub fn is_complete(&self) -> bool {
        self.state == SessionState::Complete
    }
}
