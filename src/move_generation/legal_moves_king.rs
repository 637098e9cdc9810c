//! King pseudo-move generation including castling candidates.
//!
//! Castling here only gates on untouched rights, empty lanes, and the rook
//! standing on its original square; attack-safety of the king's path is
//! filtered by the legal-move generator.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{steppable, KING_STEPS};

pub fn generate_king_moves(
    board: &Board,
    from: BoardLocation,
    piece: &Piece,
    rights: &CastlingRights,
    out: &mut Vec<MoveCandidate>,
) {
    for (d_row, d_col) in KING_STEPS {
        if let Some(to) = offset_location(from, d_row, d_col) {
            if steppable(board, to, piece.color) {
                out.push(MoveCandidate::plain(to));
            }
        }
    }

    generate_castling_moves(board, from, piece, rights, out);
}

fn generate_castling_moves(
    board: &Board,
    from: BoardLocation,
    piece: &Piece,
    rights: &CastlingRights,
    out: &mut Vec<MoveCandidate>,
) {
    let back_rank = piece.color.back_rank_row();
    if from != (back_rank, 4) {
        return;
    }
    let side_rights = rights.for_color(piece.color);

    let rook_on = |col: i8| {
        board
            .piece_at((back_rank, col))
            .is_some_and(|p| p.kind == PieceKind::Rook && p.color == piece.color)
    };

    if side_rights.king_side
        && board.is_empty((back_rank, 5))
        && board.is_empty((back_rank, 6))
        && rook_on(7)
    {
        out.push(MoveCandidate {
            to: (back_rank, 6),
            en_passant: false,
            castle: Some(CastleSide::King),
        });
    }

    if side_rights.queen_side
        && board.is_empty((back_rank, 3))
        && board.is_empty((back_rank, 2))
        && board.is_empty((back_rank, 1))
        && rook_on(0)
    {
        out.push(MoveCandidate {
            to: (back_rank, 2),
            en_passant: false,
            castle: Some(CastleSide::Queen),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn king_side_castle_requires_a_clear_lane_and_rook() {
        let mut board = Board::starting_position();
        board.take((7, 5));
        board.take((7, 6));
        let piece = *board.piece_at((7, 4)).expect("king");
        let rights = CastlingRights::initial();

        let mut out = Vec::new();
        generate_king_moves(&board, (7, 4), &piece, &rights, &mut out);
        assert!(out
            .iter()
            .any(|m| m.to == (7, 6) && m.castle == Some(CastleSide::King)));

        // Remove the rook and the candidate disappears.
        board.take((7, 7));
        out.clear();
        generate_king_moves(&board, (7, 4), &piece, &rights, &mut out);
        assert!(out.iter().all(|m| m.castle.is_none()));
    }

    #[test]
    fn revoked_rights_suppress_castling() {
        let mut board = Board::starting_position();
        for col in 1..=3 {
            board.take((0, col));
        }
        let piece = *board.piece_at((0, 4)).expect("king");
        let mut rights = CastlingRights::initial();
        rights.for_color_mut(Color::Dark).queen_side = false;

        let mut out = Vec::new();
        generate_king_moves(&board, (0, 4), &piece, &rights, &mut out);
        assert!(out.iter().all(|m| m.castle.is_none()));
    }
}
