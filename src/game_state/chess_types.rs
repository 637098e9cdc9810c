//! Core data definitions shared by every subsystem.
//!
//! Coordinates are `(row, column)` pairs with row 0 at the top of the board
//! (the dark back rank) and row 7 at the bottom. All state types are
//! serializable so collaborators can replicate full snapshots.

use serde::{Deserialize, Serialize};

/// Board coordinate as `(row, column)`, each in `0..=7` when on the board.
pub type BoardLocation = (i8, i8);

#[inline]
pub fn on_board(location: BoardLocation) -> bool {
    (0..8).contains(&location.0) && (0..8).contains(&location.1)
}

/// Offset a location, returning `None` when the result leaves the board.
#[inline]
pub fn offset_location(location: BoardLocation, d_row: i8, d_col: i8) -> Option<BoardLocation> {
    let moved = (location.0 + d_row, location.1 + d_col);
    on_board(moved).then_some(moved)
}

/// Side to move. Light sits on rows 6/7 and advances toward row 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Color {
    Light,
    Dark,
}

impl Color {
    #[inline]
    pub const fn opposite(self) -> Self {
        match self {
            Color::Light => Color::Dark,
            Color::Dark => Color::Light,
        }
    }

    /// Row delta of a forward pawn step.
    #[inline]
    pub const fn forward_row_step(self) -> i8 {
        match self {
            Color::Light => -1,
            Color::Dark => 1,
        }
    }

    #[inline]
    pub const fn back_rank_row(self) -> i8 {
        match self {
            Color::Light => 7,
            Color::Dark => 0,
        }
    }

    #[inline]
    pub const fn pawn_start_row(self) -> i8 {
        match self {
            Color::Light => 6,
            Color::Dark => 1,
        }
    }
}

/// Piece kind (color is represented separately).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Store points credited to the capturer's ledger.
    #[inline]
    pub const fn capture_value(self) -> u32 {
        match self {
            PieceKind::Pawn => 3,
            PieceKind::Knight => 5,
            PieceKind::Bishop => 6,
            PieceKind::Rook => 6,
            PieceKind::Queen => 8,
            PieceKind::King => 0,
        }
    }

    #[inline]
    pub const fn notation_letter(self) -> &'static str {
        match self {
            PieceKind::Pawn => "",
            PieceKind::Knight => "N",
            PieceKind::Bishop => "B",
            PieceKind::Rook => "R",
            PieceKind::Queen => "Q",
            PieceKind::King => "K",
        }
    }
}

/// A piece on the board. The identity is assigned at setup and survives every
/// relocation (including promotion) so per-piece state stays attached.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Piece {
    pub kind: PieceKind,
    pub color: Color,
    pub identity: u32,
    pub shielded: bool,
    pub super_pawn: bool,
    pub passive_charge: u8,
    pub passive_ready: bool,
}

impl Piece {
    #[inline]
    pub fn new(kind: PieceKind, color: Color, identity: u32) -> Self {
        Self {
            kind,
            color,
            identity,
            shielded: false,
            super_pawn: false,
            passive_charge: 0,
            passive_ready: false,
        }
    }
}

/// A transient cell occupant that kills pieces landing on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Obstacle {
    pub remaining_half_moves: i8,
}

/// A cell occupant: a piece or an obstacle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cell {
    Piece(Piece),
    Obstacle(Obstacle),
}

impl Cell {
    #[inline]
    pub fn piece(&self) -> Option<&Piece> {
        match self {
            Cell::Piece(piece) => Some(piece),
            Cell::Obstacle(_) => None,
        }
    }

    #[inline]
    pub fn is_obstacle(&self) -> bool {
        matches!(self, Cell::Obstacle(_))
    }
}

/// Per-color pair of values, addressed by [`Color`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ByColor<T> {
    pub light: T,
    pub dark: T,
}

impl<T> ByColor<T> {
    #[inline]
    pub fn get(&self, color: Color) -> &T {
        match color {
            Color::Light => &self.light,
            Color::Dark => &self.dark,
        }
    }

    #[inline]
    pub fn get_mut(&mut self, color: Color) -> &mut T {
        match color {
            Color::Light => &mut self.light,
            Color::Dark => &mut self.dark,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideCastlingRights {
    pub king_side: bool,
    pub queen_side: bool,
}

/// Castling rights per color; revoked permanently once lost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingRights {
    pub light: SideCastlingRights,
    pub dark: SideCastlingRights,
}

impl CastlingRights {
    #[inline]
    pub fn initial() -> Self {
        let allowed = SideCastlingRights {
            king_side: true,
            queen_side: true,
        };
        Self {
            light: allowed,
            dark: allowed,
        }
    }

    #[inline]
    pub fn for_color(&self, color: Color) -> &SideCastlingRights {
        match color {
            Color::Light => &self.light,
            Color::Dark => &self.dark,
        }
    }

    #[inline]
    pub fn for_color_mut(&mut self, color: Color) -> &mut SideCastlingRights {
        match color {
            Color::Light => &mut self.light,
            Color::Dark => &mut self.dark,
        }
    }
}

/// Derived game status. `Resigned` carries the color that resigned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Playing,
    Check,
    Checkmate,
    Stalemate,
    Resigned(Color),
}

impl GameStatus {
    #[inline]
    pub fn is_game_over(&self) -> bool {
        matches!(
            self,
            GameStatus::Checkmate | GameStatus::Stalemate | GameStatus::Resigned(_)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CastleSide {
    King,
    Queen,
}

/// A candidate destination produced by move generation. Promotion is decided
/// at resolution time (any pawn reaching row 0/7 promotes), not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveCandidate {
    pub to: BoardLocation,
    pub en_passant: bool,
    pub castle: Option<CastleSide>,
}

impl MoveCandidate {
    #[inline]
    pub fn plain(to: BoardLocation) -> Self {
        Self {
            to,
            en_passant: false,
            castle: None,
        }
    }
}

/// A half-move suspended until the promotion piece kind is supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingPromotion {
    pub from: BoardLocation,
    pub to: BoardLocation,
    pub en_passant: bool,
}

/// One record per half-move, in play order. The length of the history drives
/// periodic-event cadence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    pub notation: String,
    pub color: Color,
}

/// An active column freeze against `affected_color`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreezeEntry {
    pub column: i8,
    pub affected_color: Color,
    pub remaining_half_moves: i8,
}

/// A 2x2 region that removes its occupants when the countdown expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HazardZone {
    pub top_row: i8,
    pub left_col: i8,
    pub remaining_half_moves: i8,
}

impl HazardZone {
    #[inline]
    pub fn contains(&self, location: BoardLocation) -> bool {
        (self.top_row..=self.top_row + 1).contains(&location.0)
            && (self.left_col..=self.left_col + 1).contains(&location.1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_geometry_is_mirrored() {
        assert_eq!(Color::Light.opposite(), Color::Dark);
        assert_eq!(Color::Light.forward_row_step(), -1);
        assert_eq!(Color::Dark.forward_row_step(), 1);
        assert_eq!(Color::Light.back_rank_row(), 7);
        assert_eq!(Color::Dark.pawn_start_row(), 1);
    }

    #[test]
    fn capture_values_match_the_store_economy() {
        assert_eq!(PieceKind::Queen.capture_value(), 8);
        assert_eq!(PieceKind::Rook.capture_value(), 6);
        assert_eq!(PieceKind::Bishop.capture_value(), 6);
        assert_eq!(PieceKind::Knight.capture_value(), 5);
        assert_eq!(PieceKind::Pawn.capture_value(), 3);
        assert_eq!(PieceKind::King.capture_value(), 0);
    }

    #[test]
    fn hazard_zone_footprint_is_two_by_two() {
        let zone = HazardZone {
            top_row: 3,
            left_col: 5,
            remaining_half_moves: 4,
        };
        assert!(zone.contains((3, 5)));
        assert!(zone.contains((4, 6)));
        assert!(!zone.contains((2, 5)));
        assert!(!zone.contains((3, 7)));
    }
}
