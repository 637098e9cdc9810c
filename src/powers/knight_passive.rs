//! The knight's capture passive.
//!
//! Knights charge up by capturing; once ready, the passive can be armed and
//! the next own-piece target swaps squares with the knight. The swap spends
//! the turn exactly like a store power.

use rand::Rng;

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::powers::power_list::{PendingPower, PendingPowerKind};
use crate::session::intents::RejectReason;
use crate::session::resolution::pass_turn_for_power;

/// Captures needed before the swap becomes available.
pub const PASSIVE_READY_THRESHOLD: u8 = 3;

/// Accrue one charge on the capturing piece (knights only).
pub fn record_capture(piece: &mut Piece) {
    if piece.kind != PieceKind::Knight {
        return;
    }
    piece.passive_charge += 1;
    if piece.passive_charge >= PASSIVE_READY_THRESHOLD {
        piece.passive_ready = true;
    }
}

/// Arm the swap: the next target intent picks the exchange partner.
pub fn begin_swap(state: &mut GameState, source: BoardLocation) -> Result<(), RejectReason> {
    if state.status.is_game_over() {
        return Err(RejectReason::GameOver);
    }
    if state.pending_power.is_some() || state.pending_promotion.is_some() {
        return Err(RejectReason::InvalidSelection);
    }
    let Some(knight) = state.board.piece_at(source) else {
        return Err(RejectReason::InvalidSelection);
    };
    if knight.color != state.turn {
        return Err(RejectReason::WrongTurnOwner);
    }
    if knight.kind != PieceKind::Knight || !knight.passive_ready {
        return Err(RejectReason::InvalidSelection);
    }

    state.pending_power = Some(PendingPower {
        kind: PendingPowerKind::KnightSwap { source },
        owner: knight.color,
    });
    Ok(())
}

/// Swap the charged knight with another own piece and spend the turn.
pub fn resolve_swap<R: Rng>(
    state: &mut GameState,
    rng: &mut R,
    source: BoardLocation,
    target: BoardLocation,
) -> Result<(), RejectReason> {
    if target == source {
        return Err(RejectReason::NoValidPowerTarget);
    }
    let owner = state.turn;
    if !state
        .board
        .piece_at(target)
        .is_some_and(|piece| piece.color == owner)
    {
        return Err(RejectReason::NoValidPowerTarget);
    }

    let knight_cell = state.board.take(source);
    let partner_cell = state.board.take(target);
    state.board.set(source, partner_cell);
    state.board.set(target, knight_cell);

    if let Some(knight) = state.board.piece_at_mut(target) {
        knight.passive_charge = 0;
        knight.passive_ready = false;
    }
    state.last_move = Some((source, target));
    pass_turn_for_power(state, rng, "Knight swap");
    Ok(())
}
