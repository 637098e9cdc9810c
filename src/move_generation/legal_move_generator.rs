//! Full legal move generation pipeline.
//!
//! Collects piece-wise pseudo-moves, applies each candidate to a scratch
//! board, and discards any that leaves the mover's own king attacked.
//! Castling additionally requires the king's start and transit squares to be
//! safe. Terminal status classification lives here as well.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::attack_checks::{is_in_check, is_square_attacked};
use crate::move_generation::legal_move_apply::apply_move_to_board;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;

/// Piece-wise candidate destinations ignoring self-check.
pub fn pseudo_moves(
    board: &Board,
    from: BoardLocation,
    piece: &Piece,
    en_passant: Option<BoardLocation>,
    rights: &CastlingRights,
    out: &mut Vec<MoveCandidate>,
) {
    match piece.kind {
        PieceKind::Pawn => generate_pawn_moves(board, from, piece, en_passant, out),
        PieceKind::Knight => generate_knight_moves(board, from, piece, out),
        PieceKind::Bishop => generate_bishop_moves(board, from, piece, out),
        PieceKind::Rook => generate_rook_moves(board, from, piece, out),
        PieceKind::Queen => generate_queen_moves(board, from, piece, out),
        PieceKind::King => generate_king_moves(board, from, piece, rights, out),
    }
}

/// Legal destinations of the piece on `from` (empty when the square holds no
/// piece).
pub fn legal_moves(
    board: &Board,
    from: BoardLocation,
    en_passant: Option<BoardLocation>,
    rights: &CastlingRights,
) -> Vec<MoveCandidate> {
    let Some(piece) = board.piece_at(from).copied() else {
        return Vec::new();
    };
    let enemy = piece.color.opposite();

    let mut pseudo = Vec::with_capacity(28);
    pseudo_moves(board, from, &piece, en_passant, rights, &mut pseudo);

    let mut legal = Vec::with_capacity(pseudo.len());
    for candidate in pseudo {
        if let Some(side) = candidate.castle {
            let pass_col = match side {
                CastleSide::King => 5,
                CastleSide::Queen => 3,
            };
            if is_square_attacked(board, from, enemy) {
                continue;
            }
            if is_square_attacked(board, (from.0, pass_col), enemy) {
                continue;
            }
        }

        let mut scratch = board.clone();
        if apply_move_to_board(
            &mut scratch,
            from,
            candidate.to,
            candidate.en_passant,
            candidate.castle,
            None,
        )
        .is_err()
        {
            continue;
        }
        if !is_in_check(&scratch, piece.color) {
            legal.push(candidate);
        }
    }
    legal
}

/// Does `color` have at least one legal move anywhere?
pub fn any_legal_move(
    board: &Board,
    color: Color,
    en_passant: Option<BoardLocation>,
    rights: &CastlingRights,
) -> bool {
    board
        .piece_locations(color)
        .into_iter()
        .any(|from| !legal_moves(board, from, en_passant, rights).is_empty())
}

/// Classify the position for the side to move.
pub fn classify_status(
    board: &Board,
    to_move: Color,
    en_passant: Option<BoardLocation>,
    rights: &CastlingRights,
) -> GameStatus {
    let has_moves = any_legal_move(board, to_move, en_passant, rights);
    let in_check = is_in_check(board, to_move);
    match (has_moves, in_check) {
        (false, true) => GameStatus::Checkmate,
        (false, false) => GameStatus::Stalemate,
        (true, true) => GameStatus::Check,
        (true, false) => GameStatus::Playing,
    }
}
