//! Half-move resolution.
//!
//! Resolution order for a chosen destination: bonus-token collection, shield
//! interception, obstacle fall, then the normal apply path with capture
//! crediting and blessing bonuses. Every completed half-move flips the turn,
//! advances the timed-effects scheduler, and recomputes the status.

use rand::Rng;

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{apply_move_to_board, update_castling_rights};
use crate::move_generation::legal_move_generator::classify_status;
use crate::powers::economy;
use crate::powers::knight_passive;
use crate::session::notation;
use crate::timed_effects::scheduler;

/// Resolve a legal half-move. `promotion` must be set when (and only when) a
/// pawn reaches the last rank; the session suspends the move until then.
pub fn resolve_move<R: Rng>(
    state: &mut GameState,
    rng: &mut R,
    from: BoardLocation,
    to: BoardLocation,
    en_passant: bool,
    castle: Option<CastleSide>,
    promotion: Option<PieceKind>,
) {
    let mover_color = state.turn;
    let capture_square = if en_passant { (from.0, to.1) } else { to };

    // The token sits only on otherwise-empty squares, so collecting it never
    // coincides with a shield or obstacle branch.
    if state.bonus_token == Some(to) {
        state.bonus_token = None;
        economy::collect_bonus_token(state, mover_color);
    }

    let notation = notation::algebraic(&state.board, from, to, en_passant, castle, promotion);
    update_castling_rights(&mut state.castling_rights, &state.board, from, to);

    // Shield interception pre-empts everything: the shield is consumed, the
    // attacker stays home, and the half-move is still spent.
    let target_shielded = state
        .board
        .piece_at(capture_square)
        .is_some_and(|piece| piece.shielded);
    if target_shielded {
        if let Some(defender) = state.board.piece_at_mut(capture_square) {
            defender.shielded = false;
        }
        state.en_passant_target = None;
        state.last_move = Some((from, to));
        state.history.push(HistoryRecord {
            notation: format!("{notation} (reflected)"),
            color: mover_color,
        });
        finish_half_move(state, rng);
        return;
    }

    // A piece stepping onto an obstacle dies in it; the mover's own captured
    // list is credited with the fallen piece.
    if state.board.has_obstacle(to) {
        if let Some(Cell::Piece(fallen)) = state.board.take(from) {
            state.captured.get_mut(mover_color).push(fallen);
        }
        state.en_passant_target = None;
        state.last_move = Some((from, to));
        state.history.push(HistoryRecord {
            notation: format!("{notation} (fell into obstacle)"),
            color: mover_color,
        });
        finish_half_move(state, rng);
        return;
    }

    let mover_kind = state.board.piece_at(from).map(|piece| piece.kind);
    state.en_passant_target = match mover_kind {
        Some(PieceKind::Pawn) if (to.0 - from.0).abs() == 2 => Some(((from.0 + to.0) / 2, from.1)),
        _ => None,
    };

    let captured = apply_move_to_board(&mut state.board, from, to, en_passant, castle, promotion)
        .ok()
        .flatten();

    if let Some(victim) = captured {
        state.captured.get_mut(mover_color).push(victim);
        if *state.store.blessing_half_moves.get(mover_color) > 0 {
            *state.store.bonus_points.get_mut(mover_color) += victim.kind.capture_value();
        }
        if mover_kind == Some(PieceKind::Knight) {
            if let Some(knight) = state.board.piece_at_mut(to) {
                knight_passive::record_capture(knight);
            }
        }
    }

    state.last_move = Some((from, to));
    state.history.push(HistoryRecord {
        notation,
        color: mover_color,
    });
    finish_half_move(state, rng);
}

/// Spend the turn on a power activation: records a `[label]` history entry,
/// clears the pending marker, and runs the shared end-of-half-move path.
pub fn pass_turn_for_power<R: Rng>(state: &mut GameState, rng: &mut R, label: &str) {
    state.history.push(HistoryRecord {
        notation: format!("[{label}]"),
        color: state.turn,
    });
    state.pending_power = None;
    finish_half_move(state, rng);
}

/// Flip the turn, advance timers, recompute status, drop the selection.
fn finish_half_move<R: Rng>(state: &mut GameState, rng: &mut R) {
    state.turn = state.turn.opposite();
    scheduler::advance_timers(state, rng);
    refresh_status(state);
    state.selected = None;
}

/// Re-derive the status for the side to move. Resignation is sticky.
pub fn refresh_status(state: &mut GameState) {
    if matches!(state.status, GameStatus::Resigned(_)) {
        return;
    }
    state.status = classify_status(
        &state.board,
        state.turn,
        state.en_passant_target,
        &state.castling_rights,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn fresh() -> (GameState, StdRng) {
        let mut rng = StdRng::seed_from_u64(11);
        let state = GameState::new_game(&mut rng);
        (state, rng)
    }

    #[test]
    fn quiet_move_flips_turn_and_records_history() {
        let (mut state, mut rng) = fresh();
        resolve_move(&mut state, &mut rng, (6, 4), (4, 4), false, None, None);
        assert_eq!(state.turn, Color::Dark);
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].notation, "e4");
        assert_eq!(state.en_passant_target, Some((5, 4)));
        assert_eq!(state.status, GameStatus::Playing);
    }

    #[test]
    fn shield_intercepts_exactly_one_capture() {
        let (mut state, mut rng) = fresh();
        // Light pawn to e4, dark pawn to d5, shield the d5 pawn.
        resolve_move(&mut state, &mut rng, (6, 4), (4, 4), false, None, None);
        resolve_move(&mut state, &mut rng, (1, 3), (3, 3), false, None, None);
        state
            .board
            .piece_at_mut((3, 3))
            .expect("dark pawn on d5")
            .shielded = true;

        let defender_id = state.board.piece_at((3, 3)).expect("pawn").identity;
        resolve_move(&mut state, &mut rng, (4, 4), (3, 3), false, None, None);

        // Attacker stayed, defender lost only the shield.
        assert_eq!(
            state.board.piece_at((4, 4)).map(|p| p.kind),
            Some(PieceKind::Pawn)
        );
        let defender = state.board.piece_at((3, 3)).expect("defender survives");
        assert_eq!(defender.identity, defender_id);
        assert!(!defender.shielded);
        assert!(state.captured.get(Color::Light).is_empty());
        assert!(state
            .history
            .last()
            .expect("history entry")
            .notation
            .ends_with("(reflected)"));
        assert_eq!(state.turn, Color::Dark);

        // The second identical attack goes through.
        resolve_move(&mut state, &mut rng, (1, 0), (2, 0), false, None, None);
        resolve_move(&mut state, &mut rng, (4, 4), (3, 3), false, None, None);
        assert_eq!(state.captured.get(Color::Light).len(), 1);
        assert_eq!(state.captured.get(Color::Light)[0].identity, defender_id);
    }

    #[test]
    fn moving_onto_an_obstacle_captures_the_mover() {
        let (mut state, mut rng) = fresh();
        state.board.set(
            (4, 4),
            Some(Cell::Obstacle(Obstacle {
                remaining_half_moves: 6,
            })),
        );
        let mover_id = state.board.piece_at((6, 4)).expect("pawn").identity;
        resolve_move(&mut state, &mut rng, (6, 4), (4, 4), false, None, None);

        assert!(state.board.is_empty((6, 4)));
        assert!(state.board.has_obstacle((4, 4)));
        assert_eq!(state.captured.get(Color::Light).len(), 1);
        assert_eq!(state.captured.get(Color::Light)[0].identity, mover_id);
        assert!(state
            .history
            .last()
            .expect("history entry")
            .notation
            .ends_with("(fell into obstacle)"));
        assert_eq!(state.turn, Color::Dark);
    }

    #[test]
    fn blessing_doubles_capture_credit_via_bonus_points() {
        let (mut state, mut rng) = fresh();
        resolve_move(&mut state, &mut rng, (6, 4), (4, 4), false, None, None);
        resolve_move(&mut state, &mut rng, (1, 3), (3, 3), false, None, None);
        *state.store.blessing_half_moves.get_mut(Color::Light) = 4;

        resolve_move(&mut state, &mut rng, (4, 4), (3, 3), false, None, None);
        // Pawn capture: 3 points from the captured list plus 3 bonus points.
        assert_eq!(*state.store.bonus_points.get(Color::Light), 3);
        assert_eq!(economy::available_points(&state, Color::Light), 6);
    }

    #[test]
    fn bonus_token_is_collected_by_the_piece_landing_on_it() {
        let (mut state, mut rng) = fresh();
        state.bonus_token = Some((4, 4));
        resolve_move(&mut state, &mut rng, (6, 4), (4, 4), false, None, None);
        assert_eq!(state.bonus_token, None);
        assert_eq!(*state.store.bonus_points.get(Color::Light), 10);

        // With an active blessing the token is worth double.
        state.bonus_token = Some((3, 4));
        *state.store.blessing_half_moves.get_mut(Color::Dark) = 0;
        *state.store.blessing_half_moves.get_mut(Color::Light) = 0;
        resolve_move(&mut state, &mut rng, (1, 0), (2, 0), false, None, None);
        *state.store.blessing_half_moves.get_mut(Color::Light) = 3;
        resolve_move(&mut state, &mut rng, (4, 4), (3, 4), false, None, None);
        assert_eq!(*state.store.bonus_points.get(Color::Light), 30);
    }

    #[test]
    fn fools_mate_is_checkmate_for_dark() {
        let (mut state, mut rng) = fresh();
        resolve_move(&mut state, &mut rng, (6, 5), (5, 5), false, None, None); // f3
        resolve_move(&mut state, &mut rng, (1, 4), (3, 4), false, None, None); // e5
        resolve_move(&mut state, &mut rng, (6, 6), (4, 6), false, None, None); // g4
        resolve_move(&mut state, &mut rng, (0, 3), (4, 7), false, None, None); // Qh4#
        assert_eq!(state.status, GameStatus::Checkmate);
        assert_eq!(state.turn, Color::Light);
        assert_eq!(state.history.last().map(|r| r.color), Some(Color::Dark));
    }

    #[test]
    fn en_passant_window_lasts_exactly_one_reply() {
        let (mut state, mut rng) = fresh();
        resolve_move(&mut state, &mut rng, (6, 4), (4, 4), false, None, None);
        assert_eq!(state.en_passant_target, Some((5, 4)));
        resolve_move(&mut state, &mut rng, (1, 0), (2, 0), false, None, None);
        assert_eq!(state.en_passant_target, None);
    }
}
