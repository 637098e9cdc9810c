//! Mailbox board: an 8x8 grid of optional cell occupants.
//!
//! A mailbox layout (rather than bitboards) carries the variant state this
//! game needs per cell: obstacles are occupants in their own right, and each
//! piece holds identity, shield, and passive flags that must ride along on
//! every relocation.

use crate::game_state::chess_types::*;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Board {
    cells: [[Option<Cell>; 8]; 8],
}

impl Board {
    pub fn empty() -> Self {
        Self {
            cells: [[None; 8]; 8],
        }
    }

    /// Standard chess starting position. Identities are assigned column by
    /// column over the four populated ranks, starting at 1, matching the
    /// order captured pieces and passives expect.
    pub fn starting_position() -> Self {
        const BACK_RANK: [PieceKind; 8] = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];

        let mut board = Self::empty();
        let mut identity = 1u32;
        for col in 0..8i8 {
            let kind = BACK_RANK[col as usize];
            for (row, kind, color) in [
                (0, kind, Color::Dark),
                (1, PieceKind::Pawn, Color::Dark),
                (6, PieceKind::Pawn, Color::Light),
                (7, kind, Color::Light),
            ] {
                board.set((row, col), Some(Cell::Piece(Piece::new(kind, color, identity))));
                identity += 1;
            }
        }
        board
    }

    #[inline]
    fn slot(&self, location: BoardLocation) -> &Option<Cell> {
        &self.cells[location.0 as usize][location.1 as usize]
    }

    #[inline]
    fn slot_mut(&mut self, location: BoardLocation) -> &mut Option<Cell> {
        &mut self.cells[location.0 as usize][location.1 as usize]
    }

    #[inline]
    pub fn cell_at(&self, location: BoardLocation) -> Option<&Cell> {
        if !on_board(location) {
            return None;
        }
        self.slot(location).as_ref()
    }

    #[inline]
    pub fn piece_at(&self, location: BoardLocation) -> Option<&Piece> {
        self.cell_at(location).and_then(Cell::piece)
    }

    #[inline]
    pub fn piece_at_mut(&mut self, location: BoardLocation) -> Option<&mut Piece> {
        if !on_board(location) {
            return None;
        }
        match self.slot_mut(location) {
            Some(Cell::Piece(piece)) => Some(piece),
            _ => None,
        }
    }

    #[inline]
    pub fn obstacle_at_mut(&mut self, location: BoardLocation) -> Option<&mut Obstacle> {
        match self.slot_mut(location) {
            Some(Cell::Obstacle(obstacle)) => Some(obstacle),
            _ => None,
        }
    }

    #[inline]
    pub fn is_empty(&self, location: BoardLocation) -> bool {
        on_board(location) && self.slot(location).is_none()
    }

    #[inline]
    pub fn has_obstacle(&self, location: BoardLocation) -> bool {
        self.cell_at(location).is_some_and(Cell::is_obstacle)
    }

    #[inline]
    pub fn set(&mut self, location: BoardLocation, cell: Option<Cell>) {
        *self.slot_mut(location) = cell;
    }

    #[inline]
    pub fn take(&mut self, location: BoardLocation) -> Option<Cell> {
        self.slot_mut(location).take()
    }

    pub fn king_location(&self, color: Color) -> Option<BoardLocation> {
        for row in 0..8i8 {
            for col in 0..8i8 {
                if let Some(piece) = self.piece_at((row, col)) {
                    if piece.kind == PieceKind::King && piece.color == color {
                        return Some((row, col));
                    }
                }
            }
        }
        None
    }

    /// Locations of every piece belonging to `color`, in board scan order.
    pub fn piece_locations(&self, color: Color) -> Vec<BoardLocation> {
        let mut locations = Vec::new();
        for row in 0..8i8 {
            for col in 0..8i8 {
                if self.piece_at((row, col)).is_some_and(|p| p.color == color) {
                    locations.push((row, col));
                }
            }
        }
        locations
    }

    pub fn empty_locations(&self) -> Vec<BoardLocation> {
        let mut locations = Vec::with_capacity(32);
        for row in 0..8i8 {
            for col in 0..8i8 {
                if self.slot((row, col)).is_none() {
                    locations.push((row, col));
                }
            }
        }
        locations
    }

    #[inline]
    pub fn has_empty_square(&self) -> bool {
        self.cells.iter().any(|row| row.iter().any(Option::is_none))
    }

    pub fn obstacle_locations(&self) -> Vec<BoardLocation> {
        let mut locations = Vec::new();
        for row in 0..8i8 {
            for col in 0..8i8 {
                if self.has_obstacle((row, col)) {
                    locations.push((row, col));
                }
            }
        }
        locations
    }

    pub fn king_count(&self, color: Color) -> usize {
        let mut count = 0;
        for row in 0..8i8 {
            for col in 0..8i8 {
                if self
                    .piece_at((row, col))
                    .is_some_and(|p| p.kind == PieceKind::King && p.color == color)
                {
                    count += 1;
                }
            }
        }
        count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_position_places_thirty_two_pieces() {
        let board = Board::starting_position();
        assert_eq!(board.piece_locations(Color::Light).len(), 16);
        assert_eq!(board.piece_locations(Color::Dark).len(), 16);
        assert_eq!(board.empty_locations().len(), 32);
        assert_eq!(board.king_location(Color::Light), Some((7, 4)));
        assert_eq!(board.king_location(Color::Dark), Some((0, 4)));
    }

    #[test]
    fn starting_position_identities_are_unique() {
        let board = Board::starting_position();
        let mut seen = std::collections::HashSet::new();
        for color in [Color::Light, Color::Dark] {
            for location in board.piece_locations(color) {
                let piece = board.piece_at(location).expect("piece should exist");
                assert!(seen.insert(piece.identity), "duplicate identity");
            }
        }
        assert_eq!(seen.len(), 32);
        assert_eq!(seen.iter().max(), Some(&32));
    }

    #[test]
    fn take_and_set_round_trip_a_cell() {
        let mut board = Board::starting_position();
        let cell = board.take((6, 0)).expect("pawn should be present");
        assert!(board.is_empty((6, 0)));
        board.set((4, 0), Some(cell));
        assert_eq!(
            board.piece_at((4, 0)).map(|p| p.kind),
            Some(PieceKind::Pawn)
        );
    }
}
