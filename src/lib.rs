//! Three-bucket adaptive flashcard scheduler and its terminal front end.
//!
//! The scheduler core is [`session::Session`], built on [`buckets::BucketStore`]
//! and [`selector::pick`]. Decks come from [`content`]; [`ui`] renders them.

pub mod buckets;
pub mod config;
pub mod content;
pub mod error;
pub mod logging;
pub mod models;
pub mod selector;
pub mod session;
pub mod ui;

pub use error::SchedulerError;
pub use models::{Bucket, Card, Deck, Judgment};
pub use session::{JudgeOutcome, Session, SessionStart, SessionState};
