//! The power activation machine.
//!
//! While a `PendingPower` is set, the next target-selection intent lands
//! here instead of normal move handling. Every failure leaves the pending
//! marker and the rest of the state untouched so the purchaser can retry
//! with a different target.

use rand::Rng;

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::powers::knight_passive;
use crate::powers::power_list::{
    PendingPowerKind, FREEZE_DURATION_HALF_MOVES, OBSTACLE_LIFESPAN_HALF_MOVES,
};
use crate::session::intents::RejectReason;
use crate::session::resolution::pass_turn_for_power;

/// Candidate-placement order for a duplicated piece, relative to the owner's
/// direction of travel for pawns, fixed for everything else.
fn duplicate_candidates(origin: BoardLocation, piece: &Piece) -> Vec<BoardLocation> {
    let mut candidates = Vec::with_capacity(8);
    if piece.kind == PieceKind::Pawn {
        let dir = piece.color.forward_row_step();
        for delta in [(dir, 0), (-dir, 0), (0, -1), (0, 1)] {
            if let Some(loc) = offset_location(origin, delta.0, delta.1) {
                candidates.push(loc);
            }
        }
    } else {
        for delta in [
            (0, -1),
            (0, 1),
            (-1, 0),
            (1, 0),
            (-1, -1),
            (-1, 1),
            (1, -1),
            (1, 1),
        ] {
            if let Some(loc) = offset_location(origin, delta.0, delta.1) {
                candidates.push(loc);
            }
        }
    }
    candidates
}

/// Route the board target of the currently pending power.
pub fn supply_power_target<R: Rng>(
    state: &mut GameState,
    rng: &mut R,
    target: BoardLocation,
) -> Result<(), RejectReason> {
    let Some(pending) = state.pending_power else {
        return Err(RejectReason::InvalidSelection);
    };
    if state.status.is_game_over() {
        return Err(RejectReason::GameOver);
    }
    if pending.owner != state.turn {
        return Err(RejectReason::WrongTurnOwner);
    }
    if !on_board(target) {
        return Err(RejectReason::InvalidSelection);
    }

    match pending.kind {
        PendingPowerKind::Obstacle => place_obstacle(state, rng, target),
        PendingPowerKind::Duplicate => duplicate_piece(state, rng, target),
        PendingPowerKind::Hunt => hunt_pull(state, rng, target),
        PendingPowerKind::Freeze => freeze_column(state, rng, target),
        PendingPowerKind::Shield => grant_shield(state, rng, target),
        PendingPowerKind::KnightSwap { source } => {
            knight_passive::resolve_swap(state, rng, source, target)
        }
    }
}

fn place_obstacle<R: Rng>(
    state: &mut GameState,
    rng: &mut R,
    target: BoardLocation,
) -> Result<(), RejectReason> {
    if !state.board.is_empty(target) || state.bonus_token == Some(target) {
        return Err(RejectReason::NoValidPowerTarget);
    }
    state.board.set(
        target,
        Some(Cell::Obstacle(Obstacle {
            remaining_half_moves: OBSTACLE_LIFESPAN_HALF_MOVES,
        })),
    );
    pass_turn_for_power(state, rng, "Obstacle");
    Ok(())
}

fn grant_shield<R: Rng>(
    state: &mut GameState,
    rng: &mut R,
    target: BoardLocation,
) -> Result<(), RejectReason> {
    let owner = state.turn;
    let eligible = state
        .board
        .piece_at(target)
        .is_some_and(|piece| piece.color == owner && !piece.shielded);
    if !eligible {
        return Err(RejectReason::NoValidPowerTarget);
    }
    if let Some(piece) = state.board.piece_at_mut(target) {
        piece.shielded = true;
    }
    pass_turn_for_power(state, rng, "Shield");
    Ok(())
}

fn duplicate_piece<R: Rng>(
    state: &mut GameState,
    rng: &mut R,
    target: BoardLocation,
) -> Result<(), RejectReason> {
    let owner = state.turn;
    let original = match state.board.piece_at(target) {
        Some(piece)
            if piece.color == owner
                && piece.kind != PieceKind::King
                && piece.kind != PieceKind::Queen =>
        {
            *piece
        }
        _ => return Err(RejectReason::NoValidPowerTarget),
    };

    let placement = duplicate_candidates(target, &original)
        .into_iter()
        .find(|&loc| state.board.is_empty(loc) && state.bonus_token != Some(loc));
    let Some(placement) = placement else {
        // No free square around this piece; the mode stays armed so another
        // piece can be tried.
        return Err(RejectReason::NoValidPowerTarget);
    };

    let identity = state.allocate_identity();
    state.board.set(
        placement,
        Some(Cell::Piece(Piece::new(original.kind, original.color, identity))),
    );
    pass_turn_for_power(state, rng, "Duplicate");
    Ok(())
}

fn hunt_pull<R: Rng>(
    state: &mut GameState,
    rng: &mut R,
    target: BoardLocation,
) -> Result<(), RejectReason> {
    let owner = state.turn;
    if !state
        .board
        .piece_at(target)
        .is_some_and(|piece| piece.color == owner)
    {
        return Err(RejectReason::NoValidPowerTarget);
    }

    // Nearest enemy in the hunter's column, kings excluded; row-scan order
    // breaks distance ties.
    let column = target.1;
    let mut prey: Option<BoardLocation> = None;
    for row in 0..8i8 {
        let loc = (row, column);
        let Some(piece) = state.board.piece_at(loc) else {
            continue;
        };
        if piece.color == owner || piece.kind == PieceKind::King {
            continue;
        }
        let closer = match prey {
            Some(best) => (row - target.0).abs() < (best.0 - target.0).abs(),
            None => true,
        };
        if closer {
            prey = Some(loc);
        }
    }
    let Some(prey) = prey else {
        return Err(RejectReason::NoValidPowerTarget);
    };

    // Landing square: the free adjacent square (empty, or an obstacle which
    // kills the pulled piece) minimizing the prey's displacement.
    let mut landing: Option<BoardLocation> = None;
    let mut best_distance = i8::MAX;
    for (d_row, d_col) in [
        (-1, -1),
        (-1, 0),
        (-1, 1),
        (0, -1),
        (0, 1),
        (1, -1),
        (1, 0),
        (1, 1),
    ] {
        let Some(loc) = offset_location(target, d_row, d_col) else {
            continue;
        };
        let usable = (state.board.is_empty(loc) || state.board.has_obstacle(loc))
            && state.bonus_token != Some(loc);
        if !usable {
            continue;
        }
        let distance = (loc.0 - prey.0).abs() + (loc.1 - prey.1).abs();
        if distance < best_distance {
            best_distance = distance;
            landing = Some(loc);
        }
    }
    let Some(landing) = landing else {
        return Err(RejectReason::NoValidPowerTarget);
    };

    let Some(Cell::Piece(pulled)) = state.board.take(prey) else {
        return Err(RejectReason::NoValidPowerTarget);
    };
    if state.board.has_obstacle(landing) {
        // The pulled piece falls in and is credited to the purchaser.
        state.captured.get_mut(owner).push(pulled);
    } else {
        state.board.set(landing, Some(Cell::Piece(pulled)));
    }
    state.last_move = Some((prey, landing));
    pass_turn_for_power(state, rng, "Hunt");
    Ok(())
}

fn freeze_column<R: Rng>(
    state: &mut GameState,
    rng: &mut R,
    target: BoardLocation,
) -> Result<(), RejectReason> {
    let owner = state.turn;
    state.frozen.push(FreezeEntry {
        column: target.1,
        affected_color: owner.opposite(),
        remaining_half_moves: FREEZE_DURATION_HALF_MOVES,
    });
    pass_turn_for_power(state, rng, "Freeze");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::powers::power_list::PendingPower;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn armed(kind: PendingPowerKind) -> (GameState, StdRng) {
        let mut rng = StdRng::seed_from_u64(21);
        let mut state = GameState::new_game(&mut rng);
        state.pending_power = Some(PendingPower {
            kind,
            owner: Color::Light,
        });
        (state, rng)
    }

    #[test]
    fn obstacle_placement_requires_an_empty_tokenless_square() {
        let (mut state, mut rng) = armed(PendingPowerKind::Obstacle);
        state.bonus_token = Some((4, 4));
        assert_eq!(
            supply_power_target(&mut state, &mut rng, (6, 0)),
            Err(RejectReason::NoValidPowerTarget)
        );
        assert_eq!(
            supply_power_target(&mut state, &mut rng, (4, 4)),
            Err(RejectReason::NoValidPowerTarget)
        );
        assert!(state.pending_power.is_some());

        supply_power_target(&mut state, &mut rng, (4, 3)).expect("placement should succeed");
        assert!(state.board.has_obstacle((4, 3)));
        assert!(state.pending_power.is_none());
        assert_eq!(state.turn, Color::Dark);
        assert_eq!(
            state.history.last().map(|r| r.notation.as_str()),
            Some("[Obstacle]")
        );
    }

    #[test]
    fn shield_goes_only_to_own_unshielded_pieces() {
        let (mut state, mut rng) = armed(PendingPowerKind::Shield);
        assert_eq!(
            supply_power_target(&mut state, &mut rng, (1, 0)),
            Err(RejectReason::NoValidPowerTarget)
        );
        supply_power_target(&mut state, &mut rng, (6, 0)).expect("shield should apply");
        assert!(state.board.piece_at((6, 0)).expect("pawn").shielded);

        // A second shield on the same piece is refused for the next owner.
        state.pending_power = Some(PendingPower {
            kind: PendingPowerKind::Shield,
            owner: Color::Dark,
        });
        assert_eq!(
            supply_power_target(&mut state, &mut rng, (6, 0)),
            Err(RejectReason::NoValidPowerTarget)
        );
    }

    #[test]
    fn duplicate_prefers_the_forward_square_for_pawns() {
        let (mut state, mut rng) = armed(PendingPowerKind::Duplicate);
        supply_power_target(&mut state, &mut rng, (6, 3)).expect("duplication should succeed");
        let copy = state.board.piece_at((5, 3)).expect("copy in front");
        assert_eq!(copy.kind, PieceKind::Pawn);
        assert_eq!(copy.color, Color::Light);
        assert_eq!(copy.identity, 33);
        assert!(!copy.shielded && copy.passive_charge == 0);
    }

    #[test]
    fn duplicate_falls_back_in_candidate_order() {
        let (mut state, mut rng) = armed(PendingPowerKind::Duplicate);
        state.board.set(
            (5, 3),
            Some(Cell::Obstacle(Obstacle {
                remaining_half_moves: 4,
            })),
        );

        // The b1 knight has every candidate square occupied: the mode stays
        // armed and nothing is consumed.
        assert_eq!(
            supply_power_target(&mut state, &mut rng, (7, 1)),
            Err(RejectReason::NoValidPowerTarget)
        );
        assert!(state.pending_power.is_some());

        // The d2 pawn's forward square holds the obstacle and backward holds
        // the queen, so the copy lands on the next candidate: the left
        // neighbor square, once cleared.
        state.board.take((6, 2));
        supply_power_target(&mut state, &mut rng, (6, 3)).expect("fallback should place");
        assert_eq!(
            state.board.piece_at((6, 2)).map(|p| p.kind),
            Some(PieceKind::Pawn)
        );
    }

    #[test]
    fn duplicate_refuses_kings_queens_and_enemies() {
        let (mut state, mut rng) = armed(PendingPowerKind::Duplicate);
        for target in [(7, 4), (7, 3), (1, 0)] {
            assert_eq!(
                supply_power_target(&mut state, &mut rng, target),
                Err(RejectReason::NoValidPowerTarget)
            );
        }
    }

    #[test]
    fn hunt_pulls_the_nearest_column_enemy_next_to_the_hunter() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = GameState::new_game(&mut rng);
        state.board = crate::game_state::board::Board::empty();
        state.board.set(
            (7, 4),
            Some(Cell::Piece(Piece::new(PieceKind::King, Color::Light, 1))),
        );
        state.board.set(
            (0, 0),
            Some(Cell::Piece(Piece::new(PieceKind::King, Color::Dark, 2))),
        );
        state.board.set(
            (5, 2),
            Some(Cell::Piece(Piece::new(PieceKind::Rook, Color::Light, 3))),
        );
        state.board.set(
            (1, 2),
            Some(Cell::Piece(Piece::new(PieceKind::Bishop, Color::Dark, 4))),
        );
        state.board.set(
            (2, 2),
            Some(Cell::Piece(Piece::new(PieceKind::Knight, Color::Dark, 5))),
        );
        state.pending_power = Some(PendingPower {
            kind: PendingPowerKind::Hunt,
            owner: Color::Light,
        });

        supply_power_target(&mut state, &mut rng, (5, 2)).expect("hunt should succeed");
        // The knight on (2,2) was nearer than the bishop and lands on the
        // adjacent square closest to where it stood.
        assert!(state.board.is_empty((2, 2)));
        assert_eq!(
            state.board.piece_at((4, 2)).map(|p| p.kind),
            Some(PieceKind::Knight)
        );
        assert_eq!(state.turn, Color::Dark);
    }

    #[test]
    fn hunt_into_an_obstacle_credits_the_purchaser() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut state = GameState::new_game(&mut rng);
        state.board = crate::game_state::board::Board::empty();
        state.board.set(
            (7, 4),
            Some(Cell::Piece(Piece::new(PieceKind::King, Color::Light, 1))),
        );
        state.board.set(
            (0, 0),
            Some(Cell::Piece(Piece::new(PieceKind::King, Color::Dark, 2))),
        );
        state.board.set(
            (5, 6),
            Some(Cell::Piece(Piece::new(PieceKind::Rook, Color::Light, 3))),
        );
        state.board.set(
            (2, 6),
            Some(Cell::Piece(Piece::new(PieceKind::Queen, Color::Dark, 4))),
        );
        // Every adjacent square of the hunter is filled except an obstacle.
        for (i, (d_row, d_col)) in [(-1, -1), (-1, 0), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)]
            .into_iter()
            .enumerate()
        {
            let loc = (5 + d_row, 6 + d_col);
            state.board.set(
                loc,
                Some(Cell::Piece(Piece::new(
                    PieceKind::Pawn,
                    Color::Light,
                    10 + i as u32,
                ))),
            );
        }
        state.board.set(
            (4, 7),
            Some(Cell::Obstacle(Obstacle {
                remaining_half_moves: 8,
            })),
        );
        state.pending_power = Some(PendingPower {
            kind: PendingPowerKind::Hunt,
            owner: Color::Light,
        });

        supply_power_target(&mut state, &mut rng, (5, 6)).expect("hunt should succeed");
        assert!(state.board.is_empty((2, 6)));
        assert!(state.board.has_obstacle((4, 7)));
        let captured = state.captured.get(Color::Light);
        assert_eq!(captured.len(), 1);
        assert_eq!(captured[0].kind, PieceKind::Queen);
    }

    #[test]
    fn freeze_targets_the_opponent_for_eight_half_moves() {
        let (mut state, mut rng) = armed(PendingPowerKind::Freeze);
        supply_power_target(&mut state, &mut rng, (3, 2)).expect("freeze should succeed");
        // One half-move already elapsed with the activation itself.
        assert!(state.is_square_frozen(2, Color::Dark));
        assert!(!state.is_square_frozen(2, Color::Light));
        assert_eq!(
            state.frozen[0].remaining_half_moves,
            FREEZE_DURATION_HALF_MOVES - 1
        );
    }

    #[test]
    fn wrong_owner_cannot_supply_the_target() {
        let mut rng = StdRng::seed_from_u64(21);
        let mut state = GameState::new_game(&mut rng);
        state.pending_power = Some(PendingPower {
            kind: PendingPowerKind::Freeze,
            owner: Color::Dark,
        });
        assert_eq!(
            supply_power_target(&mut state, &mut rng, (3, 2)),
            Err(RejectReason::WrongTurnOwner)
        );
    }
}
