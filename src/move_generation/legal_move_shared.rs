//! Direction tables and the sliding helper shared by piece generators.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];

pub const KING_STEPS: [(i8, i8); 8] = [
    (0, 1),
    (0, -1),
    (1, 0),
    (-1, 0),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];

pub const KNIGHT_JUMPS: [(i8, i8); 8] = [
    (-2, -1),
    (-2, 1),
    (-1, -2),
    (-1, 2),
    (1, -2),
    (1, 2),
    (2, -1),
    (2, 1),
];

/// Walk each direction from `from`, pushing empty squares and the first
/// enemy piece. Allies and obstacles end the ray without a candidate.
pub fn slide_moves(
    board: &Board,
    from: BoardLocation,
    mover_color: Color,
    directions: &[(i8, i8)],
    out: &mut Vec<MoveCandidate>,
) {
    for &(d_row, d_col) in directions {
        let mut scan = from;
        while let Some(next) = offset_location(scan, d_row, d_col) {
            scan = next;
            match board.cell_at(scan) {
                None => out.push(MoveCandidate::plain(scan)),
                Some(Cell::Piece(piece)) => {
                    if piece.color != mover_color {
                        out.push(MoveCandidate::plain(scan));
                    }
                    break;
                }
                Some(Cell::Obstacle(_)) => break,
            }
        }
    }
}

/// Single-step destination filter shared by knight/king/super-pawn moves:
/// on the board, not an ally, not an obstacle.
#[inline]
pub fn steppable(board: &Board, target: BoardLocation, mover_color: Color) -> bool {
    match board.cell_at(target) {
        None => on_board(target),
        Some(Cell::Piece(piece)) => piece.color != mover_color,
        Some(Cell::Obstacle(_)) => false,
    }
}
