//! Advisory outcomes returned by the session entry points.
//!
//! Rejections are ordinary values, never errors: a rejected intent leaves
//! the snapshot unchanged.

use std::error::Error;
use std::fmt;

/// Why an intent was not applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RejectReason {
    /// An empty or opponent square where an own piece was required, a frozen
    /// piece, or a malformed coordinate/slot index.
    InvalidSelection,
    /// A destination outside the selected piece's legal moves.
    IllegalDestination,
    /// The acting color cannot afford the offer slot.
    InsufficientPoints,
    /// The power cannot possibly apply at purchase time; nothing is charged.
    NoValidTarget,
    /// The supplied power target is unusable; the pending power remains
    /// active and another target may be tried.
    NoValidPowerTarget,
    /// The intent came from the non-active color or a non-purchaser.
    WrongTurnOwner,
    /// The game has already ended.
    GameOver,
}

impl fmt::Display for RejectReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RejectReason::InvalidSelection => write!(f, "invalid selection"),
            RejectReason::IllegalDestination => write!(f, "illegal destination"),
            RejectReason::InsufficientPoints => write!(f, "insufficient points"),
            RejectReason::NoValidTarget => write!(f, "power has no valid target"),
            RejectReason::NoValidPowerTarget => write!(f, "unusable power target, retry allowed"),
            RejectReason::WrongTurnOwner => write!(f, "not this player's turn"),
            RejectReason::GameOver => write!(f, "the game is over"),
        }
    }
}

impl Error for RejectReason {}

/// Result of one intent submitted to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntentOutcome {
    /// A piece of the active color is now selected.
    Selected,
    /// A half-move fully resolved (move, reflected attempt, obstacle fall).
    MoveResolved,
    /// A promotion choice is required before the half-move resolves.
    AwaitingPromotion,
    /// A power was purchased or armed and now awaits a board target.
    AwaitingPowerTarget,
    /// A power activation resolved and consumed the turn.
    PowerResolved,
    /// A resignation ended the game.
    Resigned,
    /// Nothing changed.
    Rejected(RejectReason),
}

impl IntentOutcome {
    #[inline]
    pub fn is_rejected(&self) -> bool {
        matches!(self, IntentOutcome::Rejected(_))
    }
}
