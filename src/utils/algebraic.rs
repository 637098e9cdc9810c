//! Conversions between human-readable coordinates (e.g., `e4`) and the
//! internal `(row, column)` representation with row 0 at the top.

use crate::game_state::chess_types::{on_board, BoardLocation};

/// Convert algebraic notation (for example: "e4") to a board location.
#[inline]
pub fn algebraic_to_location(square: &str) -> Result<BoardLocation, String> {
    let bytes = square.as_bytes();
    if bytes.len() != 2 {
        return Err(format!("Invalid algebraic square: {square}"));
    }

    let file = bytes[0];
    let rank = bytes[1];

    if !(b'a'..=b'h').contains(&file) {
        return Err(format!("Invalid algebraic file: {}", file as char));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(format!("Invalid algebraic rank: {}", rank as char));
    }

    let col = (file - b'a') as i8;
    let row = 7 - (rank - b'1') as i8;
    Ok((row, col))
}

/// Convert a board location to algebraic notation (for example: "e4").
#[inline]
pub fn location_to_algebraic(location: BoardLocation) -> Result<String, String> {
    if !on_board(location) {
        return Err(format!("Location out of bounds: {location:?}"));
    }
    let file_char = char::from(b'a' + location.1 as u8);
    let rank_char = char::from(b'1' + (7 - location.0) as u8);
    Ok(format!("{file_char}{rank_char}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn corners_and_center_round_trip() {
        assert_eq!(algebraic_to_location("a1"), Ok((7, 0)));
        assert_eq!(algebraic_to_location("h8"), Ok((0, 7)));
        assert_eq!(algebraic_to_location("e4"), Ok((4, 4)));
        assert_eq!(location_to_algebraic((4, 4)).as_deref(), Ok("e4"));
        assert_eq!(location_to_algebraic((0, 7)).as_deref(), Ok("h8"));
    }

    #[test]
    fn malformed_squares_are_rejected() {
        assert!(algebraic_to_location("i4").is_err());
        assert!(algebraic_to_location("e9").is_err());
        assert!(algebraic_to_location("e").is_err());
        assert!(location_to_algebraic((8, 0)).is_err());
    }
}
