//! Errors raised by the flashcard scheduler.

use thiserror::Error;

use crate::session::SessionState;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchedulerError {
    /// The deck has no cards. Callers surface this as "nothing to study".
    #[error("deck has no cards")]
    EmptyDeck,

    /// An action arrived while the session was in a state that cannot accept it.
    #[error("cannot {action} while {state:?}")]
    InvalidState {
        action: &'static str,
        state: SessionState,
    },

    /// A card id the bucket store does not hold.
    #[error("card {0} is not in the bucket store")]
    NotFound(String),

    #[error("duplicate card id {0} in deck")]
    DuplicateCard(String),
}
