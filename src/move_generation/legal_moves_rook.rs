use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{slide_moves, ORTHOGONAL_DIRECTIONS};

pub fn generate_rook_moves(
    board: &Board,
    from: BoardLocation,
    piece: &Piece,
    out: &mut Vec<MoveCandidate>,
) {
    slide_moves(board, from, piece.color, &ORTHOGONAL_DIRECTIONS, out);
}
