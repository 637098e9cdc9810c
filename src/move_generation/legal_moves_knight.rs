use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{steppable, KNIGHT_JUMPS};

pub fn generate_knight_moves(
    board: &Board,
    from: BoardLocation,
    piece: &Piece,
    out: &mut Vec<MoveCandidate>,
) {
    for (d_row, d_col) in KNIGHT_JUMPS {
        if let Some(to) = offset_location(from, d_row, d_col) {
            if steppable(board, to, piece.color) {
                out.push(MoveCandidate::plain(to));
            }
        }
    }
}
