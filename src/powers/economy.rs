//! Power store economy: point ledger, rotating offer, purchase validation.
//!
//! Available points are always recomputed from the captured lists plus bonus
//! credits minus spend; nothing here is cached.

use rand::seq::{IndexedRandom, SliceRandom};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::game_state::chess_types::{ByColor, Color};
use crate::game_state::game_state::GameState;
use crate::powers::power_list::{
    power_definition, PendingPower, PendingPowerKind, PowerId, ALL_POWER_IDS,
    BLESSING_DURATION_HALF_MOVES,
};
use crate::session::intents::RejectReason;
use crate::session::resolution::pass_turn_for_power;

/// Points granted when a piece collects the bonus token (doubled while the
/// collector's blessing is active).
pub const BONUS_TOKEN_VALUE: u32 = 10;

/// Number of offer slots presented at once.
pub const OFFER_SLOTS: usize = 4;

/// Store-side state: the rotating offer plus each color's ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreState {
    pub offer: Vec<PowerId>,
    pub points_spent: ByColor<u32>,
    pub bonus_points: ByColor<u32>,
    pub blessing_half_moves: ByColor<u8>,
    pub acquired: ByColor<Vec<PowerId>>,
}

impl StoreState {
    /// Fresh store with a uniformly shuffled 4-of-6 offer.
    pub fn new<R: Rng>(rng: &mut R) -> Self {
        let mut pool = ALL_POWER_IDS;
        pool.shuffle(rng);
        Self {
            offer: pool[..OFFER_SLOTS].to_vec(),
            points_spent: ByColor::default(),
            bonus_points: ByColor::default(),
            blessing_half_moves: ByColor::default(),
            acquired: ByColor {
                light: Vec::new(),
                dark: Vec::new(),
            },
        }
    }
}

/// Net points of `color`: captured piece values plus bonus credits minus
/// points already spent in the store.
pub fn available_points(state: &GameState, color: Color) -> u32 {
    let captured: u32 = state
        .captured
        .get(color)
        .iter()
        .map(|piece| piece.kind.capture_value())
        .sum();
    (captured + state.store.bonus_points.get(color))
        .saturating_sub(*state.store.points_spent.get(color))
}

/// Credit the bonus token to `color`, doubled under an active blessing.
pub fn collect_bonus_token(state: &mut GameState, color: Color) {
    let value = if *state.store.blessing_half_moves.get(color) > 0 {
        2 * BONUS_TOKEN_VALUE
    } else {
        BONUS_TOKEN_VALUE
    };
    *state.store.bonus_points.get_mut(color) += value;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PurchaseOutcome {
    /// The power resolved at purchase time and the turn passed (blessing).
    TurnConsumed,
    /// The power now awaits a board target through the activation machine.
    TargetPending,
}

/// Validate and execute a purchase of the offer slot `slot` for the side to
/// move. On success the slot is replaced by a power not currently offered
/// (or removed outright once all six are in play).
pub fn purchase<R: Rng>(
    state: &mut GameState,
    rng: &mut R,
    slot: usize,
) -> Result<PurchaseOutcome, RejectReason> {
    if state.status.is_game_over() {
        return Err(RejectReason::GameOver);
    }
    if state.pending_power.is_some() {
        return Err(RejectReason::InvalidSelection);
    }
    let Some(&power) = state.store.offer.get(slot) else {
        return Err(RejectReason::InvalidSelection);
    };

    let buyer = state.turn;
    let cost = power_definition(power).cost;
    if available_points(state, buyer) < cost {
        return Err(RejectReason::InsufficientPoints);
    }

    // The obstacle needs at least one empty square; refuse (refund-free)
    // before touching the ledger or the offer.
    if power == PowerId::Obstacle && !state.board.has_empty_square() {
        return Err(RejectReason::NoValidTarget);
    }

    *state.store.points_spent.get_mut(buyer) += cost;
    rotate_offer_slot(state, rng, slot);
    state.store.acquired.get_mut(buyer).push(power);

    match power {
        PowerId::Blessing => {
            *state.store.blessing_half_moves.get_mut(buyer) = BLESSING_DURATION_HALF_MOVES;
            pass_turn_for_power(state, rng, "Blessing");
            Ok(PurchaseOutcome::TurnConsumed)
        }
        PowerId::Obstacle => {
            state.pending_power = Some(PendingPower {
                kind: PendingPowerKind::Obstacle,
                owner: buyer,
            });
            Ok(PurchaseOutcome::TargetPending)
        }
        PowerId::Duplicate => {
            state.pending_power = Some(PendingPower {
                kind: PendingPowerKind::Duplicate,
                owner: buyer,
            });
            Ok(PurchaseOutcome::TargetPending)
        }
        PowerId::Hunt => {
            state.pending_power = Some(PendingPower {
                kind: PendingPowerKind::Hunt,
                owner: buyer,
            });
            Ok(PurchaseOutcome::TargetPending)
        }
        PowerId::Freeze => {
            state.pending_power = Some(PendingPower {
                kind: PendingPowerKind::Freeze,
                owner: buyer,
            });
            Ok(PurchaseOutcome::TargetPending)
        }
        PowerId::Shield => {
            state.pending_power = Some(PendingPower {
                kind: PendingPowerKind::Shield,
                owner: buyer,
            });
            Ok(PurchaseOutcome::TargetPending)
        }
    }
}

/// Replace the purchased slot with a uniformly random power outside the
/// current offer, or drop the slot when the pool is exhausted.
fn rotate_offer_slot<R: Rng>(state: &mut GameState, rng: &mut R, slot: usize) {
    let outside_offer: Vec<PowerId> = ALL_POWER_IDS
        .iter()
        .copied()
        .filter(|candidate| !state.store.offer.contains(candidate))
        .collect();
    if let Some(&replacement) = outside_offer.choose(rng) {
        state.store.offer[slot] = replacement;
    } else {
        state.store.offer.remove(slot);
    }
}
