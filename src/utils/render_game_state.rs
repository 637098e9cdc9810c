//! Terminal-oriented Unicode renderer for the full game state.
//!
//! Creates a human-readable view for debugging, tests, and diagnostics in
//! text environments: the board with obstacles and the bonus token, plus a
//! one-line status summary with both ledgers.

use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::powers::economy::available_points;

/// Render the board and a status line to a Unicode string.
pub fn render_game_state(state: &GameState) -> String {
    let mut out = String::new();

    out.push_str("  a b c d e f g h\n");

    for row in 0..8i8 {
        let rank_char = char::from(b'1' + (7 - row) as u8);
        out.push(rank_char);
        out.push(' ');

        for col in 0..8i8 {
            let glyph = match state.board.cell_at((row, col)) {
                Some(Cell::Piece(piece)) => piece_to_unicode(piece),
                Some(Cell::Obstacle(_)) => '■',
                None if state.bonus_token == Some((row, col)) => '◆',
                None => '·',
            };
            out.push(glyph);
            if col < 7 {
                out.push(' ');
            }
        }

        out.push(' ');
        out.push(rank_char);
        out.push('\n');
    }

    out.push_str("  a b c d e f g h\n");
    out.push_str(&format!(
        "{:?} to move | {:?} | points L{} D{}\n",
        state.turn,
        state.status,
        available_points(state, Color::Light),
        available_points(state, Color::Dark),
    ));

    out
}

fn piece_to_unicode(piece: &Piece) -> char {
    match (piece.color, piece.kind) {
        (Color::Light, PieceKind::Pawn) => '♙',
        (Color::Light, PieceKind::Knight) => '♘',
        (Color::Light, PieceKind::Bishop) => '♗',
        (Color::Light, PieceKind::Rook) => '♖',
        (Color::Light, PieceKind::Queen) => '♕',
        (Color::Light, PieceKind::King) => '♔',
        (Color::Dark, PieceKind::Pawn) => '♟',
        (Color::Dark, PieceKind::Knight) => '♞',
        (Color::Dark, PieceKind::Bishop) => '♝',
        (Color::Dark, PieceKind::Rook) => '♜',
        (Color::Dark, PieceKind::Queen) => '♛',
        (Color::Dark, PieceKind::King) => '♚',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn rendered_start_position_has_eleven_lines() {
        let mut rng = StdRng::seed_from_u64(1);
        let state = GameState::new_game(&mut rng);
        let rendered = render_game_state(&state);
        assert_eq!(rendered.lines().count(), 11);
        assert!(rendered.contains('♔'));
        assert!(rendered.contains('♚'));
        assert!(rendered.contains("Light to move"));
    }
}
