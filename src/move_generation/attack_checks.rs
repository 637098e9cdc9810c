//! Square-attack testing and check detection.
//!
//! Sliding scans stop at the first occupant of any kind, so obstacles block
//! lines exactly like pieces do.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{
    DIAGONAL_DIRECTIONS, KING_STEPS, KNIGHT_JUMPS, ORTHOGONAL_DIRECTIONS,
};

/// Is `target` attacked by any piece of `by_color`?
pub fn is_square_attacked(board: &Board, target: BoardLocation, by_color: Color) -> bool {
    // Pawns attack one row toward their own direction of travel, so the
    // attacker sits one row "behind" the target from its point of view.
    let pawn_row_offset = match by_color {
        Color::Light => 1,
        Color::Dark => -1,
    };
    for d_col in [-1i8, 1i8] {
        if let Some(from) = offset_location(target, pawn_row_offset, d_col) {
            if board
                .piece_at(from)
                .is_some_and(|p| p.kind == PieceKind::Pawn && p.color == by_color)
            {
                return true;
            }
        }
    }

    for (d_row, d_col) in KNIGHT_JUMPS {
        if let Some(from) = offset_location(target, d_row, d_col) {
            if board
                .piece_at(from)
                .is_some_and(|p| p.kind == PieceKind::Knight && p.color == by_color)
            {
                return true;
            }
        }
    }

    if sliding_attack(board, target, by_color, &ORTHOGONAL_DIRECTIONS, PieceKind::Rook) {
        return true;
    }
    if sliding_attack(board, target, by_color, &DIAGONAL_DIRECTIONS, PieceKind::Bishop) {
        return true;
    }

    for (d_row, d_col) in KING_STEPS {
        if let Some(from) = offset_location(target, d_row, d_col) {
            if board
                .piece_at(from)
                .is_some_and(|p| p.kind == PieceKind::King && p.color == by_color)
            {
                return true;
            }
        }
    }

    false
}

fn sliding_attack(
    board: &Board,
    target: BoardLocation,
    by_color: Color,
    directions: &[(i8, i8); 4],
    slider: PieceKind,
) -> bool {
    for &(d_row, d_col) in directions {
        let mut scan = target;
        while let Some(next) = offset_location(scan, d_row, d_col) {
            scan = next;
            match board.cell_at(scan) {
                None => continue,
                Some(Cell::Piece(piece)) => {
                    if piece.color == by_color
                        && (piece.kind == slider || piece.kind == PieceKind::Queen)
                    {
                        return true;
                    }
                    break;
                }
                Some(Cell::Obstacle(_)) => break,
            }
        }
    }
    false
}

/// Is the king of `color` currently attacked?
pub fn is_in_check(board: &Board, color: Color) -> bool {
    match board.king_location(color) {
        Some(king) => is_square_attacked(board, king, color.opposite()),
        None => false,
    }
}
