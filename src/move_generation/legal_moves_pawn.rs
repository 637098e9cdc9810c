//! Pawn pseudo-move generation, including the super-pawn override.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{steppable, KING_STEPS};

pub fn generate_pawn_moves(
    board: &Board,
    from: BoardLocation,
    piece: &Piece,
    en_passant: Option<BoardLocation>,
    out: &mut Vec<MoveCandidate>,
) {
    if piece.super_pawn {
        // Super pawns step like a king onto any non-ally, non-obstacle
        // square. The enemy king is excluded: it is never a capture target.
        for (d_row, d_col) in KING_STEPS {
            if let Some(to) = offset_location(from, d_row, d_col) {
                let targets_king = board
                    .piece_at(to)
                    .is_some_and(|p| p.kind == PieceKind::King);
                if steppable(board, to, piece.color) && !targets_king {
                    out.push(MoveCandidate::plain(to));
                }
            }
        }
        return;
    }

    let dir = piece.color.forward_row_step();

    // Forward pushes onto empty squares only.
    if let Some(one) = offset_location(from, dir, 0) {
        if board.is_empty(one) {
            out.push(MoveCandidate::plain(one));
            if from.0 == piece.color.pawn_start_row() {
                let two = (from.0 + 2 * dir, from.1);
                if board.is_empty(two) {
                    out.push(MoveCandidate::plain(two));
                }
            }
        }
    }

    // Diagonal captures and en passant.
    for d_col in [-1i8, 1i8] {
        let Some(to) = offset_location(from, dir, d_col) else {
            continue;
        };
        if board
            .piece_at(to)
            .is_some_and(|target| target.color != piece.color)
        {
            out.push(MoveCandidate::plain(to));
        }
        if en_passant == Some(to) {
            out.push(MoveCandidate {
                to,
                en_passant: true,
                castle: None,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn moves(board: &Board, from: BoardLocation, ep: Option<BoardLocation>) -> Vec<BoardLocation> {
        let piece = *board.piece_at(from).expect("pawn should exist");
        let mut out = Vec::new();
        generate_pawn_moves(board, from, &piece, ep, &mut out);
        out.iter().map(|m| m.to).collect()
    }

    #[test]
    fn pawn_gets_single_and_double_push_from_start_row() {
        let board = Board::starting_position();
        assert_eq!(moves(&board, (6, 4), None), vec![(5, 4), (4, 4)]);
    }

    #[test]
    fn blocked_pawn_has_no_forward_moves() {
        let mut board = Board::starting_position();
        board.set(
            (5, 4),
            Some(Cell::Obstacle(Obstacle {
                remaining_half_moves: 3,
            })),
        );
        assert!(moves(&board, (6, 4), None).is_empty());
    }

    #[test]
    fn en_passant_candidate_is_flagged() {
        let mut board = Board::empty();
        board.set(
            (3, 4),
            Some(Cell::Piece(Piece::new(PieceKind::Pawn, Color::Light, 1))),
        );
        board.set(
            (3, 5),
            Some(Cell::Piece(Piece::new(PieceKind::Pawn, Color::Dark, 2))),
        );
        let piece = *board.piece_at((3, 4)).expect("pawn");
        let mut out = Vec::new();
        generate_pawn_moves(&board, (3, 4), &piece, Some((2, 5)), &mut out);
        assert!(out
            .iter()
            .any(|m| m.to == (2, 5) && m.en_passant));
    }

    #[test]
    fn super_pawn_steps_in_all_directions_but_never_onto_kings() {
        let mut board = Board::empty();
        let mut pawn = Piece::new(PieceKind::Pawn, Color::Light, 1);
        pawn.super_pawn = true;
        board.set((4, 4), Some(Cell::Piece(pawn)));
        board.set(
            (4, 5),
            Some(Cell::Piece(Piece::new(PieceKind::King, Color::Dark, 2))),
        );
        board.set(
            (3, 4),
            Some(Cell::Piece(Piece::new(PieceKind::Rook, Color::Dark, 3))),
        );
        let destinations = moves(&board, (4, 4), None);
        assert_eq!(destinations.len(), 7);
        assert!(destinations.contains(&(3, 4)));
        assert!(!destinations.contains(&(4, 5)));
    }
}
