use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{slide_moves, DIAGONAL_DIRECTIONS};

pub fn generate_bishop_moves(
    board: &Board,
    from: BoardLocation,
    piece: &Piece,
    out: &mut Vec<MoveCandidate>,
) {
    slide_moves(board, from, piece.color, &DIAGONAL_DIRECTIONS, out);
}
