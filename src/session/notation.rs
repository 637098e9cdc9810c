//! Simplified algebraic notation for history records.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;

const FILES: [char; 8] = ['a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'];

/// Notation for a half-move about to be applied to `board`.
pub fn algebraic(
    board: &Board,
    from: BoardLocation,
    to: BoardLocation,
    en_passant: bool,
    castle: Option<CastleSide>,
    promotion: Option<PieceKind>,
) -> String {
    let Some(piece) = board.piece_at(from) else {
        return "?".to_owned();
    };
    match castle {
        Some(CastleSide::King) => return "O-O".to_owned(),
        Some(CastleSide::Queen) => return "O-O-O".to_owned(),
        None => {}
    }

    let is_capture = board.cell_at(to).is_some() || en_passant;
    let capture_mark = if is_capture { "x" } else { "" };
    let pawn_file = if piece.kind == PieceKind::Pawn && is_capture {
        FILES[from.1 as usize].to_string()
    } else {
        String::new()
    };
    let promotion_suffix = match promotion {
        Some(kind) => format!("={}", kind.notation_letter()),
        None => String::new(),
    };

    format!(
        "{}{}{}{}{}{}",
        piece.kind.notation_letter(),
        pawn_file,
        capture_mark,
        FILES[to.1 as usize],
        8 - to.0,
        promotion_suffix
    )
}
