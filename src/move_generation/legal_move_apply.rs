//! Board-level application of a chosen move.
//!
//! `apply_move_to_board` performs only the mechanical relocation: en-passant
//! victim removal, castling rook relocation, promotion substitution, and
//! identity preservation. Capture crediting, shields, obstacles, and the
//! turn flip belong to the resolution layer.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

/// Apply `from -> to` and return the captured piece, if any.
///
/// The moving piece keeps its identity across the relocation; a promotion
/// substitutes a fresh record of the chosen kind under the same identity
/// (shield and passive flags do not survive promotion).
pub fn apply_move_to_board(
    board: &mut Board,
    from: BoardLocation,
    to: BoardLocation,
    en_passant: bool,
    castle: Option<CastleSide>,
    promotion: Option<PieceKind>,
) -> Result<Option<Piece>, String> {
    let Some(Cell::Piece(mover)) = board.take(from) else {
        return Err(format!("no piece on from-square {from:?}"));
    };

    let captured = if en_passant {
        let victim_square = (from.0, to.1);
        match board.take(victim_square) {
            Some(Cell::Piece(victim)) => Some(victim),
            other => {
                return Err(format!(
                    "en-passant victim missing on {victim_square:?}: {other:?}"
                ))
            }
        }
    } else {
        match board.take(to) {
            None => None,
            Some(Cell::Piece(victim)) => Some(victim),
            Some(Cell::Obstacle(_)) => {
                return Err(format!("destination {to:?} holds an obstacle"));
            }
        }
    };

    if let Some(side) = castle {
        let back_rank = mover.color.back_rank_row();
        let (rook_from, rook_to) = match side {
            CastleSide::King => ((back_rank, 7), (back_rank, 5)),
            CastleSide::Queen => ((back_rank, 0), (back_rank, 3)),
        };
        if let Some(rook_cell) = board.take(rook_from) {
            board.set(rook_to, Some(rook_cell));
        }
    }

    let placed = match promotion {
        Some(kind) => Piece::new(kind, mover.color, mover.identity),
        None => mover,
    };
    board.set(to, Some(Cell::Piece(placed)));

    Ok(captured)
}

/// Revoke castling rights touched by a move about to be applied. Must run on
/// the pre-move board: it inspects the piece still standing on `from` and
/// the corner squares involved in the move.
pub fn update_castling_rights(
    rights: &mut CastlingRights,
    board: &Board,
    from: BoardLocation,
    to: BoardLocation,
) {
    if let Some(piece) = board.piece_at(from) {
        match piece.kind {
            PieceKind::King => {
                let side = rights.for_color_mut(piece.color);
                side.king_side = false;
                side.queen_side = false;
            }
            PieceKind::Rook => match from {
                (7, 7) => rights.light.king_side = false,
                (7, 0) => rights.light.queen_side = false,
                (0, 7) => rights.dark.king_side = false,
                (0, 0) => rights.dark.queen_side = false,
                _ => {}
            },
            _ => {}
        }
    }

    // Capturing onto a rook's original square also revokes that right.
    match to {
        (7, 7) => rights.light.king_side = false,
        (7, 0) => rights.light.queen_side = false,
        (0, 7) => rights.dark.king_side = false,
        (0, 0) => rights.dark.queen_side = false,
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_move_preserves_the_piece_record() {
        let mut board = Board::starting_position();
        let before = *board.piece_at((6, 4)).expect("pawn");
        let captured = apply_move_to_board(&mut board, (6, 4), (4, 4), false, None, None)
            .expect("apply should succeed");
        assert!(captured.is_none());
        assert_eq!(board.piece_at((4, 4)), Some(&before));
        assert!(board.is_empty((6, 4)));
    }

    #[test]
    fn en_passant_removes_the_bypassing_pawn() {
        let mut board = Board::empty();
        board.set(
            (3, 4),
            Some(Cell::Piece(Piece::new(PieceKind::Pawn, Color::Light, 1))),
        );
        board.set(
            (3, 5),
            Some(Cell::Piece(Piece::new(PieceKind::Pawn, Color::Dark, 2))),
        );
        let captured = apply_move_to_board(&mut board, (3, 4), (2, 5), true, None, None)
            .expect("apply should succeed")
            .expect("victim should be captured");
        assert_eq!(captured.identity, 2);
        assert!(board.is_empty((3, 5)));
        assert_eq!(board.piece_at((2, 5)).map(|p| p.identity), Some(1));
    }

    #[test]
    fn castling_relocates_the_rook() {
        let mut board = Board::starting_position();
        board.take((7, 5));
        board.take((7, 6));
        apply_move_to_board(
            &mut board,
            (7, 4),
            (7, 6),
            false,
            Some(CastleSide::King),
            None,
        )
        .expect("apply should succeed");
        assert_eq!(
            board.piece_at((7, 5)).map(|p| p.kind),
            Some(PieceKind::Rook)
        );
        assert!(board.is_empty((7, 7)));
        assert_eq!(
            board.piece_at((7, 6)).map(|p| p.kind),
            Some(PieceKind::King)
        );
    }

    #[test]
    fn promotion_keeps_identity_but_sheds_flags() {
        let mut board = Board::empty();
        let mut pawn = Piece::new(PieceKind::Pawn, Color::Light, 9);
        pawn.shielded = true;
        board.set((1, 0), Some(Cell::Piece(pawn)));
        apply_move_to_board(&mut board, (1, 0), (0, 0), false, None, Some(PieceKind::Queen))
            .expect("apply should succeed");
        let queen = board.piece_at((0, 0)).expect("queen");
        assert_eq!(queen.kind, PieceKind::Queen);
        assert_eq!(queen.identity, 9);
        assert!(!queen.shielded);
    }

    #[test]
    fn rook_moves_and_corner_captures_revoke_rights() {
        let board = Board::starting_position();
        let mut rights = CastlingRights::initial();
        update_castling_rights(&mut rights, &board, (7, 7), (5, 7));
        assert!(!rights.light.king_side);
        assert!(rights.light.queen_side);

        update_castling_rights(&mut rights, &board, (6, 0), (0, 0));
        assert!(!rights.dark.queen_side);
    }
}
